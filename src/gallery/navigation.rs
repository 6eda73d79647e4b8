// SPDX-License-Identifier: MPL-2.0
//! Target resolution for next / prev / jump.
//!
//! Every request is clamped into `[0, count - 1]`: stepping past either end
//! re-targets the boundary item instead of failing or wrapping around.

/// Navigation state information for UI rendering.
///
/// A snapshot of the current position, consumed by the pagination readout and
/// the prev/next buttons without access to the registry.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationInfo {
    /// Whether there is a next item to navigate to.
    pub has_next: bool,
    /// Whether there is a previous item to navigate to.
    pub has_previous: bool,
    /// Whether the current item is the first one.
    pub at_first: bool,
    /// Whether the current item is the last one.
    pub at_last: bool,
    /// Current position (0-indexed), if an item is shown.
    pub current_index: Option<usize>,
    /// Total number of registered items.
    pub total_count: usize,
}

impl NavigationInfo {
    #[must_use]
    pub fn new(current_index: Option<usize>, total_count: usize) -> Self {
        match current_index {
            Some(index) if index < total_count => Self {
                has_next: index + 1 < total_count,
                has_previous: index > 0,
                at_first: index == 0,
                at_last: index + 1 == total_count,
                current_index: Some(index),
                total_count,
            },
            _ => Self {
                total_count,
                ..Self::default()
            },
        }
    }

    /// 1-based position for readouts.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.current_index.map(|index| index + 1)
    }
}

/// Clamps a requested index into the registry's bounds.
///
/// Returns `None` only for an empty registry.
#[must_use]
pub fn clamp_index(requested: i64, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    Some(usize::try_from(requested.max(0)).map_or(last, |index| index.min(last)))
}

/// Target of `next()`: the following item, or the first one when nothing is
/// shown yet.
#[must_use]
pub fn next_index(current: Option<usize>, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    Some(current.map_or(0, |index| (index + 1).min(last)))
}

/// Target of `prev()`: the preceding item, or the first one when nothing is
/// shown yet.
#[must_use]
pub fn prev_index(current: Option<usize>, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    Some(current.map_or(0, |index| index.saturating_sub(1).min(last)))
}
