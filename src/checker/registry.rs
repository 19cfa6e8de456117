//! The compromised-package registry.
//!
//! Every advisory entry for a package is folded into one closed
//! [`AffectedRange`] spanning the lowest and highest reported versions.
//! Anything between those bounds is presumed affected, even if the
//! advisory list never named it.

use crate::config::IgnoreConfig;
use crate::error::AuditError;
use crate::model::{AdvisoryEntry, ParseError};
use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::PkgVersion;

/// The tightest closed interval covering every advisory version seen for
/// one package. Both bounds are versions that actually appeared in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedRange {
    pub min: PkgVersion,
    pub max: PkgVersion,
}

impl AffectedRange {
    pub fn single(version: PkgVersion) -> Self {
        Self {
            min: version.clone(),
            max: version,
        }
    }

    /// Returns the range grown just enough to include `version`.
    ///
    /// Bounds of equal precedence (`1.2` and `1.2.0`) keep the lexically
    /// smaller raw text, so the printed range does not depend on input order.
    pub fn widen(self, version: &PkgVersion) -> Self {
        let Self { mut min, mut max } = self;
        if version.cmp(&min).then_with(|| version.as_str().cmp(min.as_str())) == Ordering::Less {
            min = version.clone();
        }
        if version.cmp(&max).then_with(|| max.as_str().cmp(version.as_str())) == Ordering::Greater {
            max = version.clone();
        }
        Self { min, max }
    }

    pub fn contains(&self, version: &PkgVersion) -> bool {
        *version >= self.min && *version <= self.max
    }
}

impl std::fmt::Display for AffectedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// Package name to affected range. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    ranges: BTreeMap<String, AffectedRange>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-widen: the registry with `entry` folded in.
    pub fn fold(mut self, entry: AdvisoryEntry) -> Self {
        let AdvisoryEntry { name, version } = entry;
        let range = match self.ranges.remove(&name) {
            Some(current) => current.widen(&version),
            None => AffectedRange::single(version),
        };
        self.ranges.insert(name, range);
        self
    }

    /// Parse an advisory document and fold every entry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`]; no partial registry is produced.
    pub fn build(input: &str) -> Result<Self, ParseError> {
        let entries = AdvisoryEntry::parse_all(input)?;
        Ok(entries.into_iter().fold(Self::new(), Self::fold))
    }

    /// Read and build the registry from an advisory file.
    ///
    /// # Errors
    ///
    /// [`AuditError::AdvisorySource`] if the file cannot be read,
    /// [`AuditError::Parse`] if any line is malformed.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let content = fs::read_to_string(path).map_err(|source| AuditError::AdvisorySource {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::build(&content).map_err(|source| AuditError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            packages = registry.len(),
            "loaded advisory list"
        );
        Ok(registry)
    }

    /// Drop packages suppressed by the ignore list.
    pub fn without_ignored(mut self, ignore: &IgnoreConfig) -> Self {
        self.ranges
            .retain(|name, _| !ignore.should_ignore_package(name));
        self
    }

    pub fn get(&self, name: &str) -> Option<&AffectedRange> {
        self.ranges.get(name)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AffectedRange> {
        self.ranges.iter()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = (&'a String, &'a AffectedRange);
    type IntoIter = btree_map::Iter<'a, String, AffectedRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl FromIterator<AdvisoryEntry> for Registry {
    fn from_iter<I: IntoIterator<Item = AdvisoryEntry>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::fold)
    }
}
