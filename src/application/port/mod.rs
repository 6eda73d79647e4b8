// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the narrow interfaces the host page implements.
//! These traits use only domain types, so the gallery never touches the
//! DOM, the animation engine or a concrete media renderer directly.
//!
//! # Available Ports
//!
//! - [`media`]: Media renderers (the load contract)
//! - [`stage`]: Overlay root and item containers
//! - [`transition`]: Open / close / show-element animations
//! - [`trigger`]: Trigger element scanning and binding
//! - [`widget`]: Close, navigation, pagination and bullet-list widgets
//!
//! # Design Notes
//!
//! - Single-threaded host: ports are not `Send`, futures are `LocalBoxFuture`
//! - Loads return futures; the host drives them (like an Iced `Task`)
//! - Failures travel as [`LoadError`](crate::error::LoadError), never panics

pub mod media;
pub mod stage;
pub mod transition;
pub mod trigger;
pub mod widget;

// Re-export main types for convenience
pub use media::{LoadFuture, MediaBackend};
pub use stage::Stage;
pub use transition::{InstantTransitions, TransitionCompleter, TransitionHandle, Transitions};
pub use trigger::{TriggerElement, TriggerSurface};
pub use widget::{Widget, WidgetSlot};
