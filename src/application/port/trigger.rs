// SPDX-License-Identifier: MPL-2.0
//! Trigger surface port (elements that open the gallery when clicked).

use crate::domain::media::{ItemKey, TriggerId};

/// A trigger found by a scan, with its raw descriptor text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerElement {
    pub id: TriggerId,
    pub descriptor: String,
}

pub trait TriggerSurface {
    /// Returns the triggers tagged for `group`, in document order.
    fn scan(&self, group: &str) -> Vec<TriggerElement>;

    /// Wires the trigger's click to `InputEvent::TriggerClicked(trigger)`
    /// and marks it as owned by `key`.
    fn bind(&self, trigger: TriggerId, key: &ItemKey);
}
