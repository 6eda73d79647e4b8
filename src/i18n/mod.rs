// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the lightbox.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It localizes the loading indicator, the error placeholder shown for items
//! that failed to load and the pagination readout.
//!
//! # Features
//!
//! - Locale detection from an explicit language, config, or system settings
//! - `.ftl` translation files embedded at build time
//! - Runtime language switching
//! - Fallback to default locale when translations are missing

pub mod fluent;

pub use fluent::I18n;
