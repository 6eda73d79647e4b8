// SPDX-License-Identifier: MPL-2.0
//! Lifecycle event hooks.
//!
//! Exactly four hooks exist: `open`, `close`, `change.before` and
//! `change.after`. Each holds at most one callback; registering again
//! replaces it.

use crate::domain::media::{ItemKey, MediaKind};
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightboxEvent {
    Open,
    Close,
    ChangeBefore,
    ChangeAfter,
}

impl LightboxEvent {
    pub const ALL: [LightboxEvent; 4] = [
        LightboxEvent::Open,
        LightboxEvent::Close,
        LightboxEvent::ChangeBefore,
        LightboxEvent::ChangeAfter,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LightboxEvent::Open => "open",
            LightboxEvent::Close => "close",
            LightboxEvent::ChangeBefore => "change.before",
            LightboxEvent::ChangeAfter => "change.after",
        }
    }
}

impl FromStr for LightboxEvent {
    type Err = ConfigError;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == name)
            .ok_or_else(|| ConfigError::UnknownEvent(name.to_string()))
    }
}

impl fmt::Display for LightboxEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies an item in event payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub key: ItemKey,
    pub index: usize,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    Open,
    Close,
    /// Fired before a different item is shown. `from` is `None` when nothing
    /// was displayed.
    ChangeBefore { from: Option<ItemRef>, to: ItemRef },
    /// Fired once the new item's show transition completed.
    ChangeAfter { item: ItemRef },
}

impl EventPayload {
    #[must_use]
    pub fn event(&self) -> LightboxEvent {
        match self {
            EventPayload::Open => LightboxEvent::Open,
            EventPayload::Close => LightboxEvent::Close,
            EventPayload::ChangeBefore { .. } => LightboxEvent::ChangeBefore,
            EventPayload::ChangeAfter { .. } => LightboxEvent::ChangeAfter,
        }
    }
}

pub type EventCallback = Rc<dyn Fn(&EventPayload)>;

#[derive(Default)]
pub struct EventHooks {
    hooks: HashMap<LightboxEvent, EventCallback>,
}

impl EventHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under an event name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEvent`] for names outside the four hooks.
    pub fn on<F>(&mut self, name: &str, callback: F) -> Result<()>
    where
        F: Fn(&EventPayload) + 'static,
    {
        let event = name.parse::<LightboxEvent>()?;
        self.set(event, Rc::new(callback));
        Ok(())
    }

    pub fn set(&mut self, event: LightboxEvent, callback: EventCallback) {
        if self.hooks.insert(event, callback).is_some() {
            tracing::debug!(%event, "replaced event callback");
        }
    }

    /// Callback for `event`, cloned out so it can run without borrowing the
    /// hooks.
    #[must_use]
    pub fn callback(&self, event: LightboxEvent) -> Option<EventCallback> {
        self.hooks.get(&event).cloned()
    }
}

impl fmt::Debug for EventHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<_> = LightboxEvent::ALL
            .into_iter()
            .filter(|event| self.hooks.contains_key(event))
            .collect();
        f.debug_struct("EventHooks")
            .field("registered", &registered)
            .finish()
    }
}
