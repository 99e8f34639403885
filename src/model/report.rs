use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vulnerable package reached through one or more call-graph symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub osv: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub module: String,
    pub package: String,
    pub symbols: Vec<String>,
    /// Latest known fix for `module`; `None` when no fix is known or the
    /// module is still vulnerable at its newest version.
    pub fixed_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub symbols_scanned: usize,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn new(symbols_scanned: usize, findings: Vec<Finding>) -> Self {
        Self {
            generated_at: Utc::now(),
            symbols_scanned,
            findings,
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Number of distinct advisories among the findings.
    pub fn advisory_count(&self) -> usize {
        let mut ids: Vec<&str> = self.findings.iter().map(|f| f.osv.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}
