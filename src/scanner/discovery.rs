use crate::error::AuditError;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// A top-level install directory and every nested one beneath it.
#[derive(Debug, Clone)]
pub struct InstallTree {
    root: PathBuf,
    dir_name: String,
}

impl InstallTree {
    /// Verifies that `<base>/<dir_name>` exists and is a directory.
    ///
    /// # Errors
    ///
    /// [`AuditError::MissingInstallRoot`] otherwise.
    pub fn open(base: &Path, dir_name: &str) -> Result<Self, AuditError> {
        let root = base.join(dir_name);
        if !root.is_dir() {
            return Err(AuditError::MissingInstallRoot {
                base: base.to_path_buf(),
                dir_name: dir_name.to_string(),
            });
        }

        Ok(Self {
            root,
            dir_name: dir_name.to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the tree and yields the root plus every nested directory named
    /// like it, in sorted order.
    ///
    /// Each call starts a fresh walk. Symlinks are not followed, and
    /// subtrees that cannot be read are skipped with a warning.
    pub fn locations(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable path");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir() && entry.file_name() == self.dir_name.as_str())
            .map(|entry| entry.into_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_root() {
        let base = TempDir::new().unwrap();
        let err = InstallTree::open(base.path(), "node_modules").unwrap_err();
        assert!(matches!(err, AuditError::MissingInstallRoot { .. }));
    }

    #[test]
    fn test_open_root_is_a_file() {
        let base = TempDir::new().unwrap();
        fs::write(base.path().join("node_modules"), "").unwrap();
        assert!(InstallTree::open(base.path(), "node_modules").is_err());
    }

    #[test]
    fn test_locations_finds_nested_dirs() {
        let base = TempDir::new().unwrap();
        let nm = base.path().join("node_modules");
        fs::create_dir_all(nm.join("a").join("node_modules").join("b")).unwrap();
        fs::create_dir_all(nm.join("@scope").join("c").join("node_modules")).unwrap();
        fs::create_dir_all(nm.join("d").join("lib")).unwrap();
        fs::write(nm.join("d").join("node_modules"), "not a dir").unwrap();

        let tree = InstallTree::open(base.path(), "node_modules").unwrap();
        let found: Vec<PathBuf> = tree.locations().collect();

        assert_eq!(
            found,
            vec![
                nm.clone(),
                nm.join("@scope").join("c").join("node_modules"),
                nm.join("a").join("node_modules"),
            ]
        );
    }

    #[test]
    fn test_locations_is_restartable() {
        let base = TempDir::new().unwrap();
        fs::create_dir_all(base.path().join("node_modules").join("x").join("node_modules")).unwrap();

        let tree = InstallTree::open(base.path(), "node_modules").unwrap();
        assert_eq!(tree.locations().count(), 2);
        assert_eq!(tree.locations().count(), 2);
    }
}
