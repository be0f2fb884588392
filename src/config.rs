//! Configuration management for prockit.
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    constants::{CONFIG_FILE_SUFFIX, LOG_ROTATE_KEEP, LOG_ROTATE_SIZE},
    error::ToolkitError,
    logger::Severity,
};

/// Resolves the config file path for an application name inside `dir`.
pub fn config_path(app_name: &str, dir: &Path) -> PathBuf {
    dir.join(format!("{app_name}{CONFIG_FILE_SUFFIX}"))
}

/// Loads and parses a YAML configuration file into a generic value.
///
/// The document is a parsed map with no schema validation. A missing file is
/// reported as [`ToolkitError::ConfigMissing`] so callers can treat it as the
/// fatal startup condition it usually is.
pub fn load_config(path: &Path) -> Result<serde_yaml::Value, ToolkitError> {
    if !path.exists() {
        return Err(ToolkitError::ConfigMissing {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(ToolkitError::ConfigRead)?;
    let config = serde_yaml::from_str(&content).map_err(ToolkitError::ConfigParse)?;
    Ok(config)
}

/// Logger tuning read from the optional `log:` section of the config file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum severity for the console target.
    pub console_level: Severity,
    /// Minimum severity for the file target.
    pub file_level: Severity,
    /// Size threshold at which the file target rotates.
    pub rotate_size: u64,
    /// Number of rotated generations to retain.
    pub rotate_keep: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            console_level: Severity::Warn,
            file_level: Severity::Info,
            rotate_size: LOG_ROTATE_SIZE,
            rotate_keep: LOG_ROTATE_KEEP,
        }
    }
}

/// Extracts [`LogSettings`] from a parsed config, falling back to defaults
/// when the `log:` section is absent or malformed.
pub fn log_settings(config: &serde_yaml::Value) -> LogSettings {
    config
        .get("log")
        .and_then(|section| serde_yaml::from_value(section.clone()).ok())
        .unwrap_or_default()
}
