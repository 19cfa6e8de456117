//! Install-tree discovery and the audit loop.
//!
//! [`InstallTree`] finds every install location under a base directory,
//! a [`VersionProbe`] reads what is installed there, and the [`Auditor`]
//! classifies each registry entry at each location, streaming
//! [`Finding`]s to a [`ReportSink`].
//!
//! # Example
//!
//! ```no_run
//! use modscan::checker::Registry;
//! use modscan::output::CliReporter;
//! use modscan::scanner::{Auditor, InstallTree, PackageInspector};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = Registry::load(Path::new("compromised.txt"))?;
//!     let tree = InstallTree::open(Path::new("."), "node_modules")?;
//!
//!     let auditor = Auditor::new(&registry, PackageInspector::new());
//!     let mut reporter = CliReporter::stdout();
//!     let result = auditor.audit(tree.locations(), &mut reporter)?;
//!
//!     println!("{} affected", result.hits.len());
//!     Ok(())
//! }
//! ```

mod discovery;
mod npm;

pub use discovery::InstallTree;
pub use npm::PackageInspector;

use crate::checker::{classify, Registry};
use crate::error::{AuditError, InspectError};
use crate::model::{Classification, Finding, ScanResult, UnreadableReason};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a [`VersionProbe`] found for one package at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    /// The version string from the descriptor, unvalidated.
    Installed(String),
    NotInstalled,
    Unreadable(UnreadableReason),
}

/// Reads the installed version of a package at an install location.
pub trait VersionProbe {
    /// Looks up `package` under `location`.
    ///
    /// # Errors
    ///
    /// Only for I/O failures that are neither "not installed" nor
    /// "unreadable"; these abort the whole scan.
    fn inspect(&self, package: &str, location: &Path) -> Result<Inspection, InspectError>;
}

/// Receives the audit as it happens.
///
/// A failed write aborts the audit with [`AuditError::Report`].
pub trait ReportSink {
    fn begin_location(&mut self, location: &Path) -> io::Result<()>;
    fn finding(&mut self, finding: &Finding) -> io::Result<()>;
}

/// Checks every registry entry at every install location.
pub struct Auditor<'a, P> {
    registry: &'a Registry,
    probe: P,
}

impl<'a, P: VersionProbe> Auditor<'a, P> {
    pub fn new(registry: &'a Registry, probe: P) -> Self {
        Self { registry, probe }
    }

    /// Audits `locations` one at a time.
    ///
    /// Not-installed and unreadable packages are reported and skipped.
    ///
    /// # Errors
    ///
    /// Stops at the first escalated [`InspectError`] or failed sink write.
    pub fn audit<I>(&self, locations: I, sink: &mut dyn ReportSink) -> Result<ScanResult, AuditError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut result = ScanResult::new();

        for location in locations {
            info!(location = %location.display(), "checking install location");
            sink.begin_location(&location)?;
            result.directories_checked += 1;

            for finding in self.audit_location(&location)? {
                sink.finding(&finding)?;
                result.record(&finding);
            }
        }

        Ok(result)
    }

    /// Classifies every registry entry at a single location.
    pub fn audit_location(&self, location: &Path) -> Result<Vec<Finding>, InspectError> {
        let mut findings = Vec::with_capacity(self.registry.len());

        for (name, range) in self.registry {
            let finding = match self.probe.inspect(name, location)? {
                Inspection::NotInstalled => {
                    Finding::new(name, range.clone(), location, Classification::NotInstalled)
                }
                Inspection::Unreadable(reason) => Finding::new(
                    name,
                    range.clone(),
                    location,
                    Classification::Unreadable(reason),
                ),
                Inspection::Installed(version) => {
                    let classification = classify(&version, range);
                    Finding::new(name, range.clone(), location, classification)
                        .with_installed(version)
                }
            };

            debug!(
                package = %name,
                classification = finding.classification.as_str(),
                "classified package"
            );
            findings.push(finding);
        }

        Ok(findings)
    }
}
