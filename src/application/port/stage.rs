// SPDX-License-Identifier: MPL-2.0
//! Overlay surface port.
//!
//! The stage is the overlay root plus one container per loaded item. Only
//! the gallery's show step activates a container, so at most one container
//! is active at a time.

use crate::domain::media::{ContainerId, ItemKey, RenderedContent};

pub trait Stage {
    /// Mounts settled content into a fresh, inactive container.
    fn mount(&self, key: &ItemKey, content: &RenderedContent) -> ContainerId;

    /// Activates or deactivates an item container.
    fn set_active(&self, container: ContainerId, active: bool);

    /// Shows or hides the overlay root.
    fn set_open(&self, open: bool);

    /// Shows the loading indicator with a message, or hides it with `None`.
    fn set_loading(&self, message: Option<&str>);
}
