use serde::{Deserialize, Serialize};

/// A single OSV advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub affected: Vec<Affected>,
}

impl Entry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_affected(mut self, affected: Affected) -> Self {
        self.affected.push(affected);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    #[serde(rename = "name", alias = "path")]
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ecosystem: String,
}

/// The affected versions of one module within an advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affected {
    #[serde(rename = "package", alias = "module")]
    pub module: Module,
    #[serde(default)]
    pub ranges: Vec<Range>,
    #[serde(default, skip_serializing_if = "EcosystemSpecific::is_empty")]
    pub ecosystem_specific: EcosystemSpecific,
}

impl Affected {
    pub fn new(module_path: impl Into<String>) -> Self {
        Self {
            module: Module {
                path: module_path.into(),
                ecosystem: String::new(),
            },
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.ranges.push(range);
        self
    }

    pub fn with_import(mut self, import: Import) -> Self {
        self.ecosystem_specific.imports.push(import);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemSpecific {
    #[serde(default)]
    pub imports: Vec<Import>,
}

impl EcosystemSpecific {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}

/// A package within the affected module and the symbols in it that are vulnerable.
///
/// An empty symbol list means every symbol of the package is affected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            symbols: Vec::new(),
        }
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RangeType {
    Semver,
    Ecosystem,
    Git,
    #[serde(other)]
    Unspecified,
}

/// An ordered set of vulnerable windows.
///
/// Events are expected in ascending version order; only [`RangeType::Semver`]
/// ranges carry information the resolver understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    #[serde(rename = "type")]
    pub range_type: RangeType,
    #[serde(default)]
    pub events: Vec<RangeEvent>,
}

impl Range {
    pub fn semver(events: Vec<RangeEvent>) -> Self {
        Self {
            range_type: RangeType::Semver,
            events,
        }
    }

    pub fn is_semver(&self) -> bool {
        self.range_type == RangeType::Semver
    }

    /// Every version the range mentions, in the order it mentions them.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.events
            .iter()
            .flat_map(|e| [e.introduced(), e.fixed()])
            .flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<String>,
}

impl RangeEvent {
    pub fn new(introduced: Option<&str>, fixed: Option<&str>) -> Self {
        Self {
            introduced: introduced.map(str::to_string),
            fixed: fixed.map(str::to_string),
        }
    }

    pub fn introduced(&self) -> Option<&str> {
        self.introduced.as_deref().filter(|v| !v.is_empty())
    }

    pub fn fixed(&self) -> Option<&str> {
        self.fixed.as_deref().filter(|v| !v.is_empty())
    }
}
