// SPDX-License-Identifier: MPL-2.0
//! The gallery core: item registry, load coordination, navigation and the
//! open/close state machine.
//!
//! [`Lightbox`] is the entry point. The other modules are its parts and stay
//! usable on their own:
//!
//! - [`registry`]: ordered, keyed item collection
//! - [`coordinator`]: load admission and the supersession guard
//! - [`navigation`]: clamped target computation and [`NavigationInfo`]
//! - [`events`]: the four lifecycle hooks
//! - [`ui`]: widget driving
//! - [`input`]: keyboard and click handling
//! - [`deep_link`]: URL fragment replay

pub mod controller;
pub mod coordinator;
pub mod deep_link;
pub mod events;
pub mod input;
pub mod navigation;
pub mod registry;
pub mod state;
pub mod ui;

pub use controller::{Lightbox, LightboxBuilder, NavigationOutcome};
pub use coordinator::LoadCoordinator;
pub use deep_link::{ArmedDeepLink, DeepLink, DeepLinkTarget, IndexSpec};
pub use events::{EventPayload, ItemRef, LightboxEvent};
pub use input::{InputEvent, Key};
pub use navigation::NavigationInfo;
pub use registry::ElementRegistry;
pub use state::{GalleryState, OverlayState};
pub use ui::UiControls;
