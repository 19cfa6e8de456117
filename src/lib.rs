pub mod checker;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod scanner;

pub use checker::{compare, AffectedRange, PkgVersion, Registry};
pub use config::Config;
pub use error::{AuditError, InspectError};
pub use model::{AdvisoryEntry, Classification, Finding, ScanResult};
pub use scanner::{Auditor, InstallTree, PackageInspector};
