use crate::error::InspectError;
use crate::model::UnreadableReason;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::{Inspection, VersionProbe};

/// Reads the installed version of a package from its `package.json`.
#[derive(Debug, Clone)]
pub struct PackageInspector {
    descriptor_file: String,
}

impl PackageInspector {
    pub fn new() -> Self {
        Self::with_descriptor("package.json")
    }

    pub fn with_descriptor(descriptor_file: impl Into<String>) -> Self {
        Self {
            descriptor_file: descriptor_file.into(),
        }
    }
}

impl Default for PackageInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionProbe for PackageInspector {
    fn inspect(&self, package: &str, location: &Path) -> Result<Inspection, InspectError> {
        let package_dir = location.join(package);

        match fs::metadata(&package_dir) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Inspection::NotInstalled),
            Err(source) => {
                return Err(InspectError::Io {
                    package: package.to_string(),
                    path: package_dir,
                    source,
                })
            }
        }

        let descriptor = package_dir.join(&self.descriptor_file);
        if !descriptor.is_file() {
            return Ok(Inspection::Unreadable(UnreadableReason::MissingDescriptor));
        }

        let content = match fs::read_to_string(&descriptor) {
            Ok(c) => c,
            Err(e) => return Ok(Inspection::Unreadable(UnreadableReason::Malformed(e.to_string()))),
        };

        let pkg_json: Map<String, Value> = match serde_json::from_str(&content) {
            Ok(p) => p,
            Err(e) => return Ok(Inspection::Unreadable(UnreadableReason::Malformed(e.to_string()))),
        };

        match pkg_json.get("version").and_then(Value::as_str) {
            Some(version) => Ok(Inspection::Installed(version.to_string())),
            None => Ok(Inspection::Unreadable(UnreadableReason::MissingVersion)),
        }
    }
}
