use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;

/// Parses a loose semantic version.
///
/// A leading `v` is optional, and the `1` / `1.2` shorthands are padded with
/// zeros. The OSV "from the beginning" marker `0` therefore parses as `0.0.0`.
/// Components that do not fit in a `u64` fail to parse; [`compare`] still
/// orders them.
pub fn parse(version: &str) -> Option<Version> {
    let v = version.strip_prefix('v').unwrap_or(version);
    let core_end = v.find(|c: char| c == '-' || c == '+').unwrap_or(v.len());
    let (core, rest) = v.split_at(core_end);

    let normalized = match core.matches('.').count() {
        0 => format!("{}.0.0{}", core, rest),
        1 => format!("{}.0{}", core, rest),
        _ => v.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// A version whose numeric components are kept as digit strings, so any
/// length compares correctly.
struct Wide<'a> {
    core: [&'a str; 3],
    pre: Prerelease,
}

impl<'a> Wide<'a> {
    fn parse(version: &'a str) -> Option<Self> {
        let v = version.strip_prefix('v').unwrap_or(version);
        let v = match v.split_once('+') {
            Some((_, "")) => return None,
            Some((v, build)) => {
                BuildMetadata::new(build).ok()?;
                v
            }
            None => v,
        };
        let (core, pre) = match v.split_once('-') {
            Some((_, "")) => return None,
            Some(split) => split,
            None => (v, ""),
        };
        let pre = Prerelease::new(pre).ok()?;

        let mut parts = ["0"; 3];
        for (i, part) in core.split('.').enumerate() {
            if i >= parts.len() || !is_numeric(part) {
                return None;
            }
            parts[i] = part;
        }

        Some(Self { core: parts, pre })
    }

    fn cmp(&self, other: &Self) -> Ordering {
        self.core
            .iter()
            .zip(other.core.iter())
            .map(|(a, b)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'))
}

/// Whether `version` is a well-formed loose semantic version of any size.
pub fn is_valid(version: &str) -> bool {
    Wide::parse(version).is_some()
}

/// Compares two version literals by semver precedence.
///
/// Build metadata is ignored. A literal that does not parse orders below every
/// valid version and equal to any other invalid literal.
pub fn compare(a: &str, b: &str) -> Ordering {
    if let (Some(a), Some(b)) = (parse(a), parse(b)) {
        return a
            .major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre));
    }

    // At least one side overflows u64 or is malformed.
    match (Wide::parse(a), Wide::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

pub fn less(a: &str, b: &str) -> bool {
    compare(a, b) == Ordering::Less
}
