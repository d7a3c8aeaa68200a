// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[stamp]` - Constant EXIF tag values written alongside the GPS block
//! - `[archive]` - Archive packaging preferences
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `GEOSTAMP_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use geostamp::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

// Re-export all default constants so call sites read `config::DEFAULT_*`
pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::geotag::TagDefaults;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Constant EXIF tag values written with every stamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StampConfig {
    /// Value of the `Make` tag (0th IFD).
    #[serde(default = "default_camera_make", skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,

    /// Value of the `UserComment` tag (Exif IFD).
    #[serde(default = "default_user_comment", skip_serializing_if = "Option::is_none")]
    pub user_comment: Option<String>,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            camera_make: default_camera_make(),
            user_comment: default_user_comment(),
        }
    }
}

/// Archive packaging preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveConfig {
    /// File name suggested by the save dialog.
    #[serde(default = "default_archive_name", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            file_name: default_archive_name(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Stamp metadata settings.
    #[serde(default)]
    pub stamp: StampConfig,

    /// Archive settings.
    #[serde(default)]
    pub archive: ArchiveConfig,
}

impl Config {
    /// The tag values the stamping core should use, with unset fields
    /// replaced by the placeholder defaults.
    #[must_use]
    pub fn tag_defaults(&self) -> TagDefaults {
        TagDefaults {
            camera_make: self
                .stamp
                .camera_make
                .clone()
                .unwrap_or_else(|| DEFAULT_CAMERA_MAKE.to_string()),
            user_comment: self
                .stamp
                .user_comment
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_COMMENT.to_string()),
        }
    }

    /// The archive file name to suggest, falling back to the default.
    #[must_use]
    pub fn archive_file_name(&self) -> String {
        self.archive
            .file_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ARCHIVE_FILE_NAME.to_string())
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_camera_make() -> Option<String> {
    Some(DEFAULT_CAMERA_MAKE.to_string())
}

fn default_user_comment() -> Option<String> {
    Some(DEFAULT_USER_COMMENT.to_string())
}

fn default_archive_name() -> Option<String> {
    Some(DEFAULT_ARCHIVE_FILE_NAME.to_string())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a notification key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
