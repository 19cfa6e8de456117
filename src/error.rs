use crate::model::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that end a run.
///
/// Missing or unreadable packages are not errors; they are reported as
/// [`Classification`](crate::model::Classification)s and the scan goes on.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("unable to read advisory list {path:?}")]
    AdvisorySource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed advisory list {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("no directory '{dir_name}' found in {base:?}")]
    MissingInstallRoot { base: PathBuf, dir_name: String },

    #[error(transparent)]
    Inspect(#[from] InspectError),

    #[error("failed to write report")]
    Report(#[from] std::io::Error),
}

/// An I/O failure while inspecting a package that is neither "not
/// installed" nor "unreadable".
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("failed to inspect '{package}' at {path:?}")]
    Io {
        package: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
