// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to [`config_dir_with_override`] (for tests)
//! 2. **Environment variable** `LENS_LIGHTBOX_CONFIG_DIR`
//! 3. **Platform default** - via the `dirs` crate, with the app name appended

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "LensLightbox";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LENS_LIGHTBOX_CONFIG_DIR";

/// Returns the config directory path.
///
/// Returns `None` if the config directory cannot be determined (rare edge case).
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_override(None)
}

/// Returns the config directory path with an optional override.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
