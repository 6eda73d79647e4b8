// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate.

// ==========================================================================
// General Defaults
// ==========================================================================

/// Default gallery group identifier (`data-lightbox-group` value).
pub const DEFAULT_UID: &str = "1";

/// Locale used when neither the caller, the config nor the OS picks one.
pub const DEFAULT_LOCALE: &str = "en-US";

// ==========================================================================
// Behavior Defaults
// ==========================================================================

/// Clicking the backdrop outside the content closes the overlay.
pub const DEFAULT_CLOSE_ON_BLUR: bool = true;

/// Pressing Escape closes the overlay.
pub const DEFAULT_CLOSE_ON_ESCAPE: bool = true;

/// Left/Right arrow keys navigate while open.
pub const DEFAULT_ARROW_KEYS: bool = true;

// ==========================================================================
// Interface Defaults
// ==========================================================================

/// Run open/close/show-element transitions.
pub const DEFAULT_ANIMATIONS: bool = true;

/// Show the close button.
pub const DEFAULT_CLOSE_BUTTON: bool = true;

/// Show the prev/next buttons.
pub const DEFAULT_NAVIGATION: bool = true;

/// Show the `current / total` readout.
pub const DEFAULT_PAGINATION: bool = true;

/// Show one bullet per item.
pub const DEFAULT_BULLETLIST: bool = false;
