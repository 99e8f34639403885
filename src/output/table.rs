use crate::model::Report;
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "OSV")]
    osv: String,
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Symbols")]
    symbols: String,
    #[tabled(rename = "Fixed In")]
    fixed_in: String,
}

pub fn print_table(report: &Report) -> Result<()> {
    println!();
    println!(
        "Scan completed at: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if report.findings.is_empty() {
        println!("No vulnerable symbols found.");
    } else {
        println!(
            "Found {} vulnerable packages across {} advisories:",
            report.findings.len(),
            report.advisory_count()
        );
        println!();

        let rows: Vec<FindingRow> = report
            .findings
            .iter()
            .map(|f| FindingRow {
                osv: f.osv.clone(),
                module: truncate(&f.module, 40),
                package: truncate(&f.package, 50),
                symbols: format_symbols(&f.symbols),
                fixed_in: format_fixed(f.fixed_version.as_deref()),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
    }

    println!();
    print_summary(report);

    Ok(())
}

fn format_fixed(fixed: Option<&str>) -> String {
    match fixed {
        Some(v) => v.to_string(),
        None => "\x1b[31mN/A\x1b[0m".to_string(),
    }
}

fn format_symbols(symbols: &[String]) -> String {
    match symbols {
        [] => "-".to_string(),
        [one] => truncate(one, 50),
        [first, rest @ ..] => format!("{} (+{})", truncate(first, 40), rest.len()),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

fn print_summary(report: &Report) {
    let unfixed = report
        .findings
        .iter()
        .filter(|f| f.fixed_version.is_none())
        .count();

    println!("Summary:");
    println!("  Symbols scanned: {}", report.symbols_scanned);
    println!("  Advisories: {}", report.advisory_count());
    if unfixed > 0 {
        println!("  Without a known fix: {}", unfixed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("golang.org/x/net", 20), "golang.org/x/net");
        assert_eq!(truncate("golang.org/x/net/http2", 10), "golang....");
    }

    #[test]
    fn test_format_symbols() {
        assert_eq!(format_symbols(&[]), "-");
        assert_eq!(format_symbols(&["math.Floor".to_string()]), "math.Floor");
        assert_eq!(
            format_symbols(&["a.F".to_string(), "a.G".to_string(), "a.H".to_string()]),
            "a.F (+2)"
        );
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(Some("v1.2.3")), "v1.2.3");
        assert!(format_fixed(None).contains("N/A"));
    }
}
