//! Configuration file handling.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/vulnfix/config.toml`
//! - macOS: `~/Library/Application Support/vulnfix/config.toml`
//! - Windows: `%APPDATA%\vulnfix\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_format = "table"
//! catalog = "/var/lib/vulndb"
//! log_level = "warn"
//!
//! [ignore]
//! vulnerabilities = ["GO-2021-0113"]
//! modules = ["example.com/internal/*"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration.
///
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json", "text"
    pub default_format: String,

    /// Advisory catalog used when no `--catalog` flag is provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Log level when `RUST_LOG` is unset.
    pub log_level: String,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Advisories and modules to leave out of scan reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Advisory IDs (e.g., "GO-2021-0113").
    pub vulnerabilities: Vec<String>,

    /// Module paths. Supports `*` wildcards (e.g., "example.com/internal/*").
    pub modules: Vec<String>,
}

impl IgnoreConfig {
    pub fn should_ignore_vulnerability(&self, id: &str) -> bool {
        self.vulnerabilities.iter().any(|v| v == id)
    }

    pub fn should_ignore_module(&self, module: &str) -> bool {
        self.modules.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, module)
            } else {
                pattern == module
            }
        })
    }
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    // Prefix before the first *
    if !parts[0].is_empty() {
        match remaining.strip_prefix(parts[0]) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    // Suffix after the last *
    let last_part = parts[parts.len() - 1];
    if !last_part.is_empty() {
        match remaining.strip_suffix(last_part) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: "table".to_string(),
            catalog: None,
            log_level: "warn".to_string(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the default config file, creating its
    /// parent directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vulnfix")
            .join("config.toml")
    }

    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_match_exact() {
        assert!(glob_match("golang.org/x/net", "golang.org/x/net"));
        assert!(!glob_match("golang.org/x/net", "golang.org/x/text"));
    }

    #[test]
    fn test_glob_match_prefix() {
        assert!(glob_match("golang.org/x/*", "golang.org/x/net"));
        assert!(glob_match("golang.org/x/*", "golang.org/x/"));
        assert!(!glob_match("golang.org/x/*", "github.com/x/net"));
    }

    #[test]
    fn test_glob_match_suffix_and_contains() {
        assert!(glob_match("*/internal", "example.com/internal"));
        assert!(glob_match("*/internal/*", "example.com/internal/auth"));
        assert!(!glob_match("*/internal/*", "example.com/auth"));
    }

    #[test]
    fn test_ignore_config() {
        let ignore = IgnoreConfig {
            vulnerabilities: vec!["GO-2021-0113".to_string()],
            modules: vec!["example.com/*".to_string(), "golang.org/x/net".to_string()],
        };

        assert!(ignore.should_ignore_vulnerability("GO-2021-0113"));
        assert!(!ignore.should_ignore_vulnerability("GO-2022-0969"));
        assert!(ignore.should_ignore_module("example.com/module"));
        assert!(ignore.should_ignore_module("golang.org/x/net"));
        assert!(!ignore.should_ignore_module("golang.org/x/text"));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_format, "table");
        assert_eq!(config.log_level, "warn");
        assert!(config.catalog.is_none());
        assert!(config.ignore.modules.is_empty());
    }

    #[test]
    fn test_config_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_format = \"json\"\n\n[ignore]\nvulnerabilities = [\"GO-2021-0113\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_format, "json");
        assert_eq!(config.log_level, "warn");
        assert!(config.ignore.should_ignore_vulnerability("GO-2021-0113"));
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            catalog: Some(PathBuf::from("/var/lib/vulndb")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.catalog, Some(PathBuf::from("/var/lib/vulndb")));
    }

    #[test]
    fn test_config_missing_file() {
        let config = Config::load_from(Path::new("/nonexistent/vulnfix.toml")).unwrap();
        assert_eq!(config.default_format, "table");
    }
}
