// SPDX-License-Identifier: MPL-2.0
//! Overlay state machine and the read-only gallery snapshot.

use crate::domain::media::{Direction, ItemKey};

/// Open/close state of the overlay.
///
/// `Opening` and `Closing` only last while a transition runs; without
/// animations the gallery goes straight to `Open` or `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl OverlayState {
    /// `Opening` counts as open, so a second `open()` is a no-op.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, OverlayState::Opening | OverlayState::Open)
    }
}

/// Snapshot of the controller state, as seen by collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryState {
    pub overlay: OverlayState,
    /// Displayed item, `None` while nothing is shown.
    pub current_index: Option<usize>,
    /// Item whose pending load may still be displayed.
    pub loading_key: Option<ItemKey>,
    /// Hint for the next show transition.
    pub direction: Direction,
}

impl GalleryState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }
}
