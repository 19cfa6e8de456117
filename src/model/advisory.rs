use crate::checker::PkgVersion;
use thiserror::Error;

/// Why an advisory line could not be turned into an [`AdvisoryEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected `name@version`, got `{text}`")]
    MissingSeparator { line: usize, text: String },

    #[error("line {line}: empty version in `{text}`")]
    EmptyVersion { line: usize, text: String },

    #[error("line {line}: `{text}` has an invalid version: {reason}")]
    InvalidVersion {
        line: usize,
        text: String,
        reason: String,
    },
}

impl ParseError {
    /// The 1-based line number of the offending entry.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingSeparator { line, .. }
            | ParseError::EmptyVersion { line, .. }
            | ParseError::InvalidVersion { line, .. } => *line,
        }
    }
}

/// One known-bad release, as listed in the advisory file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryEntry {
    pub name: String,
    pub version: PkgVersion,
}

impl AdvisoryEntry {
    pub fn new(name: impl Into<String>, version: PkgVersion) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Parse a single trimmed `name@version` line.
    ///
    /// The separator is the first `@` at index 1 or later, so scoped names
    /// such as `@scope/pkg@1.4.0` keep their leading `@`.
    pub fn parse(text: &str, line: usize) -> Result<Self, ParseError> {
        let at = text
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '@')
            .map(|(i, _)| i)
            .ok_or_else(|| ParseError::MissingSeparator {
                line,
                text: text.to_string(),
            })?;

        let (name, version) = (&text[..at], &text[at + 1..]);

        if version.is_empty() {
            return Err(ParseError::EmptyVersion {
                line,
                text: text.to_string(),
            });
        }

        let version = PkgVersion::parse(version).map_err(|e| ParseError::InvalidVersion {
            line,
            text: text.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self::new(name, version))
    }

    /// Parse a whole advisory document.
    ///
    /// Blank lines and `#` comments are skipped; the first malformed line
    /// aborts parsing.
    pub fn parse_all(input: &str) -> Result<Vec<Self>, ParseError> {
        input
            .lines()
            .enumerate()
            .map(|(i, raw)| (i + 1, raw.trim()))
            .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
            .map(|(line, text)| Self::parse(text, line))
            .collect()
    }
}
