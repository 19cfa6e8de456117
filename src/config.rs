//! Configuration file handling.
//!
//! This module provides loading and saving of modscan configuration
//! from a TOML file. Every field has a default, so an absent or partial
//! file is fine.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/modscan/config.toml`
//! - macOS: `~/Library/Application Support/modscan/config.toml`
//! - Windows: `%APPDATA%\modscan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! advisory_file = "compromised.txt"
//! install_dir_name = "node_modules"
//! descriptor_file = "package.json"
//!
//! [ignore]
//! packages = ["@types/*", "left-pad"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use modscan::Config;
///
/// // Load from file (or use defaults if file doesn't exist)
/// let config = Config::load().unwrap();
///
/// println!("Advisories: {}", config.advisory_file.display());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Advisory list, one `name@version` per line.
    ///
    /// Relative paths resolve against the working directory.
    /// Default: `compromised.txt`
    pub advisory_file: PathBuf,

    /// Name of the directories that hold installed packages.
    ///
    /// Default: `node_modules`
    pub install_dir_name: String,

    /// Metadata file inside each package directory.
    ///
    /// Default: `package.json`
    pub descriptor_file: String,

    /// Packages to leave out of the audit.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Packages to suppress, e.g. accepted risks or known false positives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Package names to skip. Supports `*` wildcards (e.g. `@types/*`).
    pub packages: Vec<String>,
}

impl IgnoreConfig {
    /// Check if a package should be ignored.
    pub fn should_ignore_package(&self, name: &str) -> bool {
        self.packages.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, name)
            } else {
                pattern == name
            }
        })
    }
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    // Check prefix (before first *)
    if !parts[0].is_empty() {
        if !remaining.starts_with(parts[0]) {
            return false;
        }
        remaining = &remaining[parts[0].len()..];
    }

    // Check suffix (after last *)
    let last_part = parts[parts.len() - 1];
    if !last_part.is_empty() {
        if !remaining.ends_with(last_part) {
            return false;
        }
        remaining = &remaining[..remaining.len() - last_part.len()];
    }

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        if let Some(pos) = remaining.find(part) {
            remaining = &remaining[pos + part.len()..];
        } else {
            return false;
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            advisory_file: PathBuf::from("compromised.txt"),
            install_dir_name: "node_modules".to_string(),
            descriptor_file: "package.json".to_string(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Saves the configuration to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use modscan::Config;
    ///
    /// let path = Config::config_path();
    /// assert!(path.ends_with("modscan/config.toml"));
    /// ```
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("modscan")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
