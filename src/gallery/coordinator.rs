// SPDX-License-Identifier: MPL-2.0
//! Load admission and the supersession guard.
//!
//! The coordinator holds the single-writer token: the key of the item whose
//! pending load is still allowed to reach the screen. A newer navigation
//! replaces the token; a load that settles without holding it is cached on
//! its item but never shown.

use crate::application::port::Stage;
use crate::domain::media::{ItemKey, NodeHandle};
use crate::error::LoadError;
use crate::media::{MediaItem, SharedLoad};

/// How a navigation target gets its content.
pub(crate) enum Admission {
    /// Already settled; show right away.
    Cached,
    /// A load started by an earlier request is still running. The caller
    /// awaits the same load; the earlier request may be gone.
    Joined(SharedLoad),
    /// A fresh load.
    Load(SharedLoad),
}

#[derive(Debug, Default)]
pub struct LoadCoordinator {
    loading_key: Option<ItemKey>,
}

impl LoadCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the load that may still be displayed.
    #[must_use]
    pub fn loading_key(&self) -> Option<&ItemKey> {
        self.loading_key.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading_key.is_some()
    }

    /// Makes `item` the authoritative target and starts its load if needed.
    ///
    /// `load()` is invoked at most once per item: settled items are reused and
    /// loading items are joined.
    pub(crate) fn admit(&mut self, item: &mut MediaItem) -> Admission {
        if let Some(load) = item.begin_load() {
            tracing::debug!(key = %item.key(), "load started");
            self.loading_key = Some(item.key().clone());
            return Admission::Load(load);
        }
        if let Some(load) = item.pending_load() {
            tracing::debug!(key = %item.key(), "joined running load");
            self.loading_key = Some(item.key().clone());
            Admission::Joined(load)
        } else {
            self.loading_key = None;
            Admission::Cached
        }
    }

    /// Drops the token: any pending load settles into the cache only.
    pub(crate) fn supersede(&mut self) {
        if let Some(key) = self.loading_key.take() {
            tracing::debug!(%key, "pending load superseded");
        }
    }

    /// Records a finished load on its item and mounts the content.
    ///
    /// Returns `true` when this load still holds the token and must be shown.
    /// The token is released in that case, so when several requests await the
    /// same load only the first to settle it shows it.
    pub(crate) fn settle(
        &mut self,
        item: &mut MediaItem,
        result: Result<NodeHandle, LoadError>,
        stage: &dyn Stage,
        error_message: impl FnOnce(&LoadError) -> String,
    ) -> bool {
        let key = item.key().clone();
        if let Err(err) = &result {
            tracing::warn!(%key, %err, "load failed");
        }
        if let Some(content) = item.settle(result, error_message) {
            let container = stage.mount(&key, content);
            item.attach(container);
        }

        if self.loading_key.as_ref() == Some(&key) {
            self.loading_key = None;
            true
        } else {
            tracing::debug!(%key, "settled after supersession; cached only");
            false
        }
    }
}
