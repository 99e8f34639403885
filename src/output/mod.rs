mod json;
mod table;
mod text;

pub use json::print_json;
pub use table::print_table;
pub use text::{indent, print_text};

use crate::model::Report;
use anyhow::Result;

/// Output format for scan reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format for programmatic use
    Json,
    /// Indented plain text, one block per finding
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Unknown format: {}. Use 'table', 'json', or 'text'",
                s
            )),
        }
    }
}

pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(report),
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => print_text(report),
    }
}

/// Format a report to a string for file output
pub fn format_report_to_string(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report)),
        // Tables are for terminals; files get JSON.
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(report)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("txt").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_format_report_to_string_json() {
        let report = Report::new(0, Vec::new());
        let json = format_report_to_string(&report, OutputFormat::Table).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["symbols_scanned"], 0);
        assert!(value["findings"].as_array().unwrap().is_empty());
    }
}
