// SPDX-License-Identifier: GPL-3.0-only

//! Presentation options that persist between runs.
//!
//! These flags only shape how state is shown (popup lifetime, tooltips,
//! completion style, label length); none of them affect what the aggregator
//! derives. Stored as JSON under the user config directory. A missing file
//! means defaults; an unreadable or malformed file is an error the caller
//! decides how to handle.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User-facing view options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Keep the popup open on focus loss and after actions.
    pub keep_open: bool,
    /// Show action-column tooltips in the fact list.
    pub tooltips: bool,
    /// Present completion as a dropdown instead of inline.
    pub dropdown_completion: bool,
    /// Truncate the button label to the configured character budget.
    pub ellipsize_label: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            keep_open: false,
            tooltips: true,
            dropdown_completion: false,
            ellipsize_label: false,
        }
    }
}

/// Default on-disk location of the settings file.
pub fn settings_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("tracklet/settings.json")
}

/// Result type for settings persistence.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur while loading or saving settings.
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to read or write the settings file.
    Io(std::io::Error),
    /// The settings file exists but is not valid JSON for this shape.
    Malformed(serde_json::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O failed: {}", e),
            SettingsError::Malformed(e) => write!(f, "settings file is malformed: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Malformed(e)
    }
}

impl ViewSettings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: defaults match the original plugin's option defaults.
    #[test]
    fn test_defaults() {
        let settings = ViewSettings::default();
        assert!(!settings.keep_open);
        assert!(settings.tooltips);
        assert!(!settings.dropdown_completion);
        assert!(!settings.ellipsize_label);
    }

    /// Test: a missing file loads as defaults rather than an error.
    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = ViewSettings::load(&path).unwrap();
        assert_eq!(settings, ViewSettings::default());
    }

    /// Test: save then load round-trips every flag.
    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/settings.json");
        let settings = ViewSettings {
            keep_open: true,
            tooltips: false,
            dropdown_completion: true,
            ellipsize_label: true,
        };
        settings.save(&path).unwrap();
        assert_eq!(ViewSettings::load(&path).unwrap(), settings);
    }

    /// Test: unknown or missing fields fall back per-field to defaults.
    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "keep_open": true }"#).unwrap();
        let settings = ViewSettings::load(&path).unwrap();
        assert!(settings.keep_open);
        assert!(settings.tooltips, "unset fields keep their defaults");
    }

    /// Test: a malformed file is an error, not silently defaults.
    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        let err = ViewSettings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Malformed(_)));
        assert!(err.to_string().contains("malformed"));
    }
}
