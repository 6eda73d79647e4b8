// SPDX-License-Identifier: MPL-2.0
//! A registered media item and its load state machine.
//!
//! `NotLoaded -> Loading -> Loaded | Failed`, nothing else. Content and
//! container are written once, at settlement, and never replaced.
//!
//! A running load is kept on the item as a shared future, so it outlives the
//! request that started it: whichever request awaits it next drives it to
//! settlement.

use crate::application::port::LoadFuture;
use crate::domain::media::{
    ContainerId, ItemKey, LoadState, MediaKind, NodeHandle, RenderedContent, TriggerId,
};
use crate::error::LoadError;
use crate::media::MediaSource;
use futures_util::future::{FutureExt, Shared};
use std::fmt;

/// A running load, awaitable by every request that targets the item.
pub type SharedLoad = Shared<LoadFuture>;

pub struct MediaItem {
    key: ItemKey,
    kind: MediaKind,
    source: Box<dyn MediaSource>,
    state: LoadState,
    content: Option<RenderedContent>,
    container: Option<ContainerId>,
    pending: Option<SharedLoad>,
    /// Trigger that opens this item. Lookup only; the host owns the element.
    trigger: Option<TriggerId>,
}

impl MediaItem {
    #[must_use]
    pub fn new(key: ItemKey, source: Box<dyn MediaSource>, trigger: Option<TriggerId>) -> Self {
        Self {
            key,
            kind: source.kind(),
            source,
            state: LoadState::NotLoaded,
            content: None,
            container: None,
            pending: None,
            trigger,
        }
    }

    #[must_use]
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    #[must_use]
    pub fn kind(&self) -> &MediaKind {
        &self.kind
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.state
    }

    /// Settled content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&RenderedContent> {
        self.content.as_ref()
    }

    /// Container the content is mounted into, once settled.
    #[must_use]
    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }

    #[must_use]
    pub fn trigger(&self) -> Option<TriggerId> {
        self.trigger
    }

    /// Starts the load if it never started.
    ///
    /// Returns `None` when the item is already loading or settled, so the
    /// source is never asked twice.
    pub(crate) fn begin_load(&mut self) -> Option<SharedLoad> {
        if self.state != LoadState::NotLoaded {
            return None;
        }
        self.state = LoadState::Loading;
        let load = self.source.load().shared();
        self.pending = Some(load.clone());
        Some(load)
    }

    /// The load started by [`Self::begin_load`], while it has not settled.
    pub(crate) fn pending_load(&self) -> Option<SharedLoad> {
        self.pending.clone()
    }

    /// Records the outcome of the load started by [`Self::begin_load`].
    ///
    /// A failure becomes an error placeholder carrying `error_message`.
    /// Returns the content only on the first settlement.
    pub(crate) fn settle(
        &mut self,
        result: Result<NodeHandle, LoadError>,
        error_message: impl FnOnce(&LoadError) -> String,
    ) -> Option<&RenderedContent> {
        if self.state != LoadState::Loading {
            return None;
        }
        self.pending = None;
        let (state, content) = match result {
            Ok(node) => (LoadState::Loaded, RenderedContent::Media(node)),
            Err(err) => (
                LoadState::Failed,
                RenderedContent::Error {
                    message: error_message(&err),
                    reason: err.reason().to_string(),
                },
            ),
        };
        self.state = state;
        Some(self.content.insert(content))
    }

    /// Remembers the container the settled content was mounted into.
    pub(crate) fn attach(&mut self, container: ContainerId) {
        if self.container.is_none() {
            self.container = Some(container);
        }
    }

    /// Gives playing media a chance to pause before another item is shown.
    pub fn before_change(&self) {
        if let (Some(playback), Some(node)) = (self.source.playback(), self.node()) {
            playback.before_change(node);
        }
    }

    /// Gives playing media a chance to pause before the gallery closes.
    pub fn before_close(&self) {
        if let (Some(playback), Some(node)) = (self.source.playback(), self.node()) {
            playback.before_close(node);
        }
    }

    fn node(&self) -> Option<NodeHandle> {
        self.content.as_ref().and_then(RenderedContent::node)
    }
}

impl fmt::Debug for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaItem")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("content", &self.content)
            .field("container", &self.container)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
