// SPDX-License-Identifier: MPL-2.0
//! This module handles the lightbox configuration, including loading and saving
//! it to a `lightbox.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Gallery group id and language
//! - `[behavior]` - Close-on-blur, close-on-escape, arrow-key navigation
//! - `[interface]` - Animations and which UI widgets are enabled
//!
//! Animation overrides are code, not data: pass them to
//! [`LightboxBuilder::transitions`](crate::gallery::LightboxBuilder::transitions).
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `LENS_LIGHTBOX_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lens_lightbox::config::{self, LightboxConfig};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.behavior.close_on_blur = false;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "lightbox.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Group and language settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Gallery group identifier; only triggers of this group are scanned.
    #[serde(default = "default_uid", deserialize_with = "deserialize_uid")]
    pub uid: String,

    /// Language code for loading and error messages (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            uid: default_uid(),
            language: None,
        }
    }
}

/// Input behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default = "default_close_on_blur")]
    pub close_on_blur: bool,

    #[serde(default = "default_close_on_escape")]
    pub close_on_escape: bool,

    #[serde(default = "default_arrow_keys")]
    pub arrow_keys: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            close_on_blur: DEFAULT_CLOSE_ON_BLUR,
            close_on_escape: DEFAULT_CLOSE_ON_ESCAPE,
            arrow_keys: DEFAULT_ARROW_KEYS,
        }
    }
}

/// Animation and widget settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceConfig {
    #[serde(default = "default_animations")]
    pub animations: bool,

    #[serde(default = "default_close_button")]
    pub close_button: bool,

    /// Prev/next buttons.
    #[serde(default = "default_navigation")]
    pub navigation: bool,

    #[serde(default = "default_pagination")]
    pub pagination: bool,

    #[serde(default = "default_bulletlist")]
    pub bulletlist: bool,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            animations: DEFAULT_ANIMATIONS,
            close_button: DEFAULT_CLOSE_BUTTON,
            navigation: DEFAULT_NAVIGATION,
            pagination: DEFAULT_PAGINATION,
            bulletlist: DEFAULT_BULLETLIST,
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LightboxConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub interface: InterfaceConfig,
}

impl LightboxConfig {
    /// Default configuration for another gallery group.
    #[must_use]
    pub fn for_group(uid: impl Into<String>) -> Self {
        Self {
            general: GeneralConfig {
                uid: uid.into(),
                ..GeneralConfig::default()
            },
            ..Self::default()
        }
    }
}

// =============================================================================
// Default Value Functions (for serde)
// =============================================================================

fn default_uid() -> String {
    DEFAULT_UID.to_string()
}

fn default_close_on_blur() -> bool {
    DEFAULT_CLOSE_ON_BLUR
}

fn default_close_on_escape() -> bool {
    DEFAULT_CLOSE_ON_ESCAPE
}

fn default_arrow_keys() -> bool {
    DEFAULT_ARROW_KEYS
}

fn default_animations() -> bool {
    DEFAULT_ANIMATIONS
}

fn default_close_button() -> bool {
    DEFAULT_CLOSE_BUTTON
}

fn default_navigation() -> bool {
    DEFAULT_NAVIGATION
}

fn default_pagination() -> bool {
    DEFAULT_PAGINATION
}

fn default_bulletlist() -> bool {
    DEFAULT_BULLETLIST
}

/// Accepts `uid = 1` as well as `uid = "1"`.
fn deserialize_uid<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Uid {
        Text(String),
        Number(i64),
    }

    Ok(match Uid::deserialize(deserializer)? {
        Uid::Text(text) => text,
        Uid::Number(number) => number.to_string(),
    })
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
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
/// default config with a warning key explaining what went wrong.
pub fn load() -> (LightboxConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (LightboxConfig, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default config");
                    return (
                        LightboxConfig::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (LightboxConfig::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<LightboxConfig> {
    let content = fs::read_to_string(path)?;
    let config: LightboxConfig = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &LightboxConfig) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &LightboxConfig, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &LightboxConfig, path: &Path) -> Result<()> {
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
