use crate::model::Affected;
use tracing::debug;

use super::version;

/// Remediation status of a module across every advisory record naming it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixStatus {
    /// No semver range information exists for the module.
    Absent,
    /// The latest known fixed version, exactly as the advisory wrote it.
    Fixed(String),
    /// A vulnerable window is still open at the newest known version.
    Unresolved,
}

impl FixStatus {
    /// Collapses the status into a version string, empty unless [`FixStatus::Fixed`].
    pub fn into_version(self) -> String {
        match self {
            FixStatus::Fixed(v) => v,
            FixStatus::Absent | FixStatus::Unresolved => String::new(),
        }
    }

    pub fn as_version(&self) -> Option<&str> {
        match self {
            FixStatus::Fixed(v) => Some(v),
            _ => None,
        }
    }
}

/// Determines the remediation status of `module` from a set of affected records.
///
/// Only the last event of each semver range is consulted, so events must
/// arrive sorted ascending. A range whose last event has no fix marks the
/// module unresolved, overriding fixes from every other range.
pub fn fix_status<'a, I>(module: &str, affected: I) -> FixStatus
where
    I: IntoIterator<Item = &'a Affected>,
{
    let mut latest: Option<&str> = None;
    let mut open = false;

    let ranges = affected
        .into_iter()
        .filter(|a| a.module.path == module)
        .flat_map(|a| a.ranges.iter())
        .filter(|r| r.is_semver());

    for range in ranges {
        let Some(last) = range.events.last() else {
            continue;
        };

        match last.fixed() {
            Some(fixed) => {
                if latest.map_or(true, |l| version::less(l, fixed)) {
                    latest = Some(fixed);
                }
            }
            None => open = true,
        }
    }

    if open {
        debug!(module, "module has an open vulnerable window");
        return FixStatus::Unresolved;
    }

    match latest {
        Some(v) => FixStatus::Fixed(v.to_string()),
        None => FixStatus::Absent,
    }
}

/// Returns the latest fixed version of `module`, or an empty string when no
/// fix is known or the module is still vulnerable.
pub fn latest_fixed(module: &str, affected: &[Affected]) -> String {
    fix_status(module, affected).into_version()
}
