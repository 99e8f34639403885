//! Matches call-graph symbols against a catalog and builds a [`Report`].

use std::collections::BTreeMap;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::IgnoreConfig;
use crate::model::{Finding, Report, Symbol};
use crate::resolver::package_path;

/// Scans `symbols` for calls into vulnerable packages.
///
/// A symbol is affected when an advisory lists its package and either lists
/// no symbols for it or names the symbol (`Func` or `Type.Method`). Findings
/// are grouped per advisory and package, ordered by advisory ID.
pub fn scan(catalog: &Catalog, symbols: &[Symbol], ignore: &IgnoreConfig) -> Report {
    let mut findings: BTreeMap<(String, String), Finding> = BTreeMap::new();

    for symbol in symbols {
        let package = package_path(symbol);
        if package.is_empty() {
            debug!(symbol = %symbol, "no package path for symbol");
            continue;
        }

        let qualified = symbol.qualified_name();
        for m in catalog.entries_for_package(&package) {
            let module = &m.affected.module.path;
            if ignore.should_ignore_vulnerability(&m.entry.id)
                || ignore.should_ignore_module(module)
            {
                continue;
            }
            if !m.import.symbols.is_empty() && !m.import.symbols.contains(&qualified) {
                continue;
            }

            let finding = findings
                .entry((m.entry.id.clone(), package.clone()))
                .or_insert_with(|| Finding {
                    osv: m.entry.id.clone(),
                    summary: m.entry.summary.clone(),
                    module: module.clone(),
                    package: package.clone(),
                    symbols: Vec::new(),
                    fixed_version: catalog
                        .fix_status(module)
                        .as_version()
                        .map(str::to_string),
                });

            let name = symbol.to_string();
            if !finding.symbols.contains(&name) {
                finding.symbols.push(name);
            }
        }
    }

    Report::new(symbols.len(), findings.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Affected, Entry, Import, Range, RangeEvent};

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            Entry::new("GO-2021-0113").with_affected(
                Affected::new("golang.org/x/text")
                    .with_range(Range::semver(vec![
                        RangeEvent::new(Some("0"), None),
                        RangeEvent::new(None, Some("v0.3.7")),
                    ]))
                    .with_import(
                        Import::new("golang.org/x/text/language").with_symbols(["Parse"]),
                    ),
            ),
            Entry::new("GO-2022-0969").with_affected(
                Affected::new("golang.org/x/net")
                    .with_range(Range::semver(vec![RangeEvent::new(Some("v0.1.0"), None)]))
                    .with_import(
                        Import::new("golang.org/x/net/http2").with_symbols(["Server.ServeConn"]),
                    ),
            ),
            Entry::new("GO-2022-0236").with_affected(
                Affected::new("golang.org/x/net")
                    .with_range(Range::semver(vec![RangeEvent::new(
                        Some("0"),
                        Some("v0.0.5"),
                    )]))
                    .with_import(Import::new("golang.org/x/net/http2")),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_scan_matches_symbols() {
        let symbols = vec![
            Symbol::function("golang.org/x/text/language", "Parse"),
            Symbol::function("golang.org/x/text/language", "Make"),
            Symbol::method("*golang.org/x/net/http2.Server", "ServeConn"),
            Symbol::function("math", "Floor"),
        ];

        let report = scan(&catalog(), &symbols, &IgnoreConfig::default());
        assert_eq!(report.symbols_scanned, 4);

        let ids: Vec<_> = report.findings.iter().map(|f| f.osv.as_str()).collect();
        assert_eq!(ids, vec!["GO-2021-0113", "GO-2022-0236", "GO-2022-0969"]);

        let text = &report.findings[0];
        assert_eq!(text.package, "golang.org/x/text/language");
        assert_eq!(text.symbols, vec!["golang.org/x/text/language.Parse"]);
        assert_eq!(text.fixed_version.as_deref(), Some("v0.3.7"));

        // Module-wide fix is unknown while GO-2022-0969 stays open.
        let net = &report.findings[2];
        assert_eq!(net.symbols, vec!["(*golang.org/x/net/http2.Server).ServeConn"]);
        assert_eq!(net.fixed_version, None);
    }

    #[test]
    fn test_scan_respects_ignore() {
        let symbols = vec![
            Symbol::function("golang.org/x/text/language", "Parse"),
            Symbol::method("*golang.org/x/net/http2.Server", "ServeConn"),
        ];
        let ignore = IgnoreConfig {
            vulnerabilities: vec!["GO-2021-0113".to_string()],
            modules: vec!["golang.org/x/net".to_string()],
        };

        let report = scan(&catalog(), &symbols, &ignore);
        assert!(!report.has_findings());
    }

    #[test]
    fn test_scan_groups_symbols_per_package() {
        let symbols = vec![
            Symbol::method("*golang.org/x/net/http2.Server", "ServeConn"),
            Symbol::function("golang.org/x/net/http2", "ConfigureServer"),
            Symbol::function("golang.org/x/net/http2", "ConfigureServer"),
        ];

        let report = scan(&catalog(), &symbols, &IgnoreConfig::default());
        let wide = report
            .findings
            .iter()
            .find(|f| f.osv == "GO-2022-0236")
            .unwrap();
        assert_eq!(wide.symbols.len(), 2);
        assert_eq!(report.advisory_count(), 2);
    }

    #[test]
    fn test_scan_skips_unresolvable_symbols() {
        let symbols = vec![Symbol::method("Server", "ServeConn")];
        let report = scan(&catalog(), &symbols, &IgnoreConfig::default());
        assert!(report.findings.is_empty());
        assert_eq!(report.symbols_scanned, 1);
    }
}
