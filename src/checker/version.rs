use semver::Version;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid version `{raw}`: {reason}")]
    Invalid { raw: String, reason: String },
}

/// A version string as it appeared in an advisory or a descriptor, paired
/// with its parsed form.
///
/// Ordering and equality follow semver precedence, so `1.2` equals `1.2.0`
/// and build metadata never affects the result. [`Display`](fmt::Display)
/// prints the original text.
#[derive(Debug, Clone)]
pub struct PkgVersion {
    raw: String,
    parsed: Version,
}

impl PkgVersion {
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let parsed = parse_version(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn semver(&self) -> &Version {
        &self.parsed
    }
}

impl FromStr for PkgVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for PkgVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        precedence(&self.parsed, &other.parsed)
    }
}

impl PartialOrd for PkgVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PkgVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PkgVersion {}

impl fmt::Display for PkgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Compare two bare version strings by precedence.
///
/// Shorthand versions (`1`, `1.2`) are padded with zeros. Anything else that
/// is not a semantic version, including a leading `v`, is an error.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionError> {
    let a = parse_version(a)?;
    let b = parse_version(b)?;
    Ok(precedence(&a, &b))
}

/// Parse a version string, padding `MAJOR` and `MAJOR.MINOR` forms.
pub fn parse_version(raw: &str) -> Result<Version, VersionError> {
    let invalid = |reason: String| VersionError::Invalid {
        raw: raw.to_string(),
        reason,
    };

    if raw.is_empty() {
        return Err(invalid("empty version".to_string()));
    }

    // Pad only the release core; suffixes stay attached to the last component.
    let core_end = raw.find(['-', '+']).unwrap_or(raw.len());
    let (core, suffix) = raw.split_at(core_end);
    let normalized = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => raw.to_string(),
    };

    Version::parse(&normalized).map_err(|e| invalid(e.to_string()))
}

/// Semver 2.0 precedence: release core, then pre-release. Build metadata is
/// not part of precedence even though `Version`'s own `Ord` looks at it.
fn precedence(a: &Version, b: &Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}
