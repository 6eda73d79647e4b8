// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. A browser embedding brings its own DOM adapters; the
//! ones here run without a page.
//!
//! # Available Adapters
//!
//! - [`headless`]: Recording stage and widgets, scripted and timed media
//!   backends, static trigger list, manually completed transitions
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Everything is single-threaded (`Rc`, `Cell`, `RefCell`)

pub mod headless;

// Re-export main types for convenience
pub use headless::{
    HeadlessStage, HeadlessWidget, ManualTransitions, ScriptedBackend, StaticTriggers,
    TimedBackend,
};
