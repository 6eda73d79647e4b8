// SPDX-License-Identifier: MPL-2.0
//! UI widget port (close / prev / next buttons, pagination, bullet list).
//!
//! Widgets are purely presentational and driven one way by the gallery.

/// Position of a widget in the overlay chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetSlot {
    Close,
    Prev,
    Next,
    Pagination,
    Bulletlist,
}

pub trait Widget {
    fn show(&self);
    fn hide(&self);
    fn enable(&self);
    fn disable(&self);

    /// Refreshes a readout with a 1-based `current` position.
    ///
    /// Buttons ignore it.
    fn update(&self, _current: usize, _total: usize) {}
}
