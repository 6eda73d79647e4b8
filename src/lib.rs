// SPDX-License-Identifier: MPL-2.0
//! `lens_lightbox` is the core of an embeddable media lightbox.
//!
//! It tracks which registered media item is current, loads items lazily with
//! at most one authoritative load per display, discards results that arrive
//! after the user moved on, and drives the overlay, its widgets and its
//! transitions through narrow host interfaces.
//!
//! Start with [`gallery::Lightbox::builder`].

#![doc(html_root_url = "https://docs.rs/lens_lightbox/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod infrastructure;
pub mod media;

pub use error::{ConfigError, Error, LoadError, Result};
pub use gallery::{Lightbox, LightboxBuilder, NavigationOutcome};
