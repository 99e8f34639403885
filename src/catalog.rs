//! Local catalog of OSV advisories.
//!
//! A catalog is loaded from a single JSON file or a directory tree of them.
//! Each file holds either one OSV entry or a JSON array of entries.
//!
//! Loading validates that the events of every semver range are in ascending
//! version order, since the resolver only ever looks at the last event.
//!
//! # Example
//!
//! ```no_run
//! use vulnfix::Catalog;
//!
//! let catalog = Catalog::load("./vulndb")?;
//! println!("{}", catalog.latest_fixed("golang.org/x/text"));
//! # Ok::<(), vulnfix::error::CatalogError>(())
//! ```

use serde::Deserialize;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::CatalogError;
use crate::model::{Affected, Entry, Import};
use crate::resolver::{self, version, FixStatus};

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    One(Box<Entry>),
    Many(Vec<Entry>),
}

/// An advisory entry matched to one of its affected packages.
#[derive(Debug, Clone, Copy)]
pub struct PackageMatch<'a> {
    pub entry: &'a Entry,
    pub affected: &'a Affected,
    pub import: &'a Import,
}

/// An in-memory set of advisories.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Builds a catalog from already-parsed entries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnorderedEvents`] if any semver range lists its
    /// events out of ascending order.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, CatalogError> {
        for entry in &entries {
            check_order(entry)?;
        }
        Ok(Self { entries })
    }

    /// Loads every `.json` file under `path`.
    ///
    /// Directory entries are read in sorted order so results are stable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let files = if path.is_dir() {
            let mut files = Vec::new();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|e| e == "json")
                {
                    files.push(entry.into_path());
                }
            }
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut entries = Vec::new();
        for file in &files {
            entries.extend(read_document(file)?);
        }
        debug!(
            files = files.len(),
            entries = entries.len(),
            "loaded advisory catalog"
        );

        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All affected records naming `module`, across every entry.
    pub fn affected<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Affected> + 'a {
        self.entries
            .iter()
            .flat_map(|e| e.affected.iter())
            .filter(move |a| a.module.path == module)
    }

    pub fn fix_status(&self, module: &str) -> FixStatus {
        resolver::fix_status(module, self.affected(module))
    }

    pub fn latest_fixed(&self, module: &str) -> String {
        self.fix_status(module).into_version()
    }

    /// Entries whose affected imports list the package at `path`.
    pub fn entries_for_package<'a>(&'a self, path: &str) -> Vec<PackageMatch<'a>> {
        let mut matches = Vec::new();
        for entry in &self.entries {
            for affected in &entry.affected {
                for import in &affected.ecosystem_specific.imports {
                    if import.path == path {
                        matches.push(PackageMatch {
                            entry,
                            affected,
                            import,
                        });
                    }
                }
            }
        }
        matches
    }
}

fn read_document(path: &Path) -> Result<Vec<Entry>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Document =
        serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(match document {
        Document::One(entry) => vec![*entry],
        Document::Many(entries) => entries,
    })
}

fn check_order(entry: &Entry) -> Result<(), CatalogError> {
    for affected in &entry.affected {
        for range in affected.ranges.iter().filter(|r| r.is_semver()) {
            // "0" marks a window open since the first release. Malformed
            // versions have no place in the order and are left to the resolver.
            let versions: Vec<&str> = range
                .versions()
                .filter(|v| *v != "0")
                .filter(|v| {
                    let valid = version::is_valid(v);
                    if !valid {
                        debug!(id = %entry.id, version = %v, "skipping malformed version");
                    }
                    valid
                })
                .collect();
            let ordered = versions
                .windows(2)
                .all(|pair| version::compare(pair[0], pair[1]) != Ordering::Greater);
            if !ordered {
                warn!(
                    id = %entry.id,
                    module = %affected.module.path,
                    "semver range events are not in ascending order"
                );
                return Err(CatalogError::UnorderedEvents {
                    id: entry.id.clone(),
                    module: affected.module.path.clone(),
                });
            }
        }
    }
    Ok(())
}
