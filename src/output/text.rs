use crate::model::{Finding, Report};
use anyhow::Result;
use std::fmt::Write;

pub fn print_text(report: &Report) -> Result<()> {
    print!("{}", render(report));
    Ok(())
}

pub(crate) fn render(report: &Report) -> String {
    let mut out = String::new();

    if report.findings.is_empty() {
        out.push_str("No vulnerabilities found.\n");
        return out;
    }

    for (i, finding) in report.findings.iter().enumerate() {
        let _ = writeln!(out, "Vulnerability #{}: {}", i + 1, finding.osv);
        out.push_str(&indent(&render_finding(finding), 2));
        out.push_str("\n\n");
    }

    let _ = writeln!(
        out,
        "Your code is affected by {} vulnerabilities.",
        report.advisory_count()
    );
    out
}

fn render_finding(finding: &Finding) -> String {
    let mut lines = Vec::new();
    if let Some(summary) = &finding.summary {
        lines.push(summary.clone());
    }
    lines.push(format!("Module: {}", finding.module));
    lines.push(format!("Found in: {}", finding.package));
    lines.push(format!(
        "Fixed in: {}",
        finding.fixed_version.as_deref().unwrap_or("N/A")
    ));
    if !finding.symbols.is_empty() {
        lines.push("Symbols:".to_string());
        lines.push(indent(&finding.symbols.join("\n"), 2));
    }
    lines.join("\n")
}

/// Prefixes every line of `s` with `n` spaces.
pub fn indent(s: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    s.split('\n')
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}
