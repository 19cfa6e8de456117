use crate::checker::AffectedRange;
use std::fmt;
use std::path::PathBuf;

/// Why an installed package's version could not be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreadableReason {
    /// The package directory exists but has no descriptor file.
    MissingDescriptor,
    /// The descriptor could not be read or is not a JSON object.
    Malformed(String),
    /// The descriptor has no string `version` field.
    MissingVersion,
    /// The descriptor's version is not a valid semantic version.
    InvalidVersion(String),
}

impl fmt::Display for UnreadableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnreadableReason::MissingDescriptor => write!(f, "no descriptor found"),
            UnreadableReason::Malformed(detail) => write!(f, "parse failure: {}", detail),
            UnreadableReason::MissingVersion => {
                write!(f, "version field missing or wrong type")
            }
            UnreadableReason::InvalidVersion(raw) => write!(f, "invalid version `{}`", raw),
        }
    }
}

/// The verdict for one package at one install location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    InRange,
    OutOfRange,
    NotInstalled,
    Unreadable(UnreadableReason),
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::InRange => "in_range",
            Classification::OutOfRange => "out_of_range",
            Classification::NotInstalled => "not_installed",
            Classification::Unreadable(_) => "unreadable",
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Classification::InRange)
    }
}

/// A reported (package, location) pair.
#[derive(Debug, Clone)]
pub struct Finding {
    pub package: String,
    pub range: AffectedRange,
    pub location: PathBuf,
    pub installed: Option<String>,
    pub classification: Classification,
}

impl Finding {
    pub fn new(
        package: impl Into<String>,
        range: AffectedRange,
        location: impl Into<PathBuf>,
        classification: Classification,
    ) -> Self {
        Self {
            package: package.into(),
            range,
            location: location.into(),
            installed: None,
            classification,
        }
    }

    pub fn with_installed(mut self, version: impl Into<String>) -> Self {
        self.installed = Some(version.into());
        self
    }
}
