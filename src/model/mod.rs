//! Core data types for advisories, findings, and scan results.
//!
//! - [`AdvisoryEntry`] - One `name@version` line from the advisory list
//! - [`Classification`] - The verdict for a package at an install location
//! - [`Finding`] - A reported (package, location) pair
//! - [`ScanResult`] - Totals and hits for a completed scan
//!
//! # Example
//!
//! ```
//! use modscan::model::AdvisoryEntry;
//!
//! let entry = AdvisoryEntry::parse("@scope/pkg@1.4.0", 1).unwrap();
//! assert_eq!(entry.name, "@scope/pkg");
//! assert_eq!(entry.version.as_str(), "1.4.0");
//! ```

mod advisory;
mod package;
mod result;

pub use advisory::*;
pub use package::*;
pub use result::*;
