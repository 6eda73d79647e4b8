// SPDX-License-Identifier: MPL-2.0
//! YouTube source: settles when the embedded player reports ready.

use crate::application::port::{LoadFuture, MediaBackend};
use crate::domain::media::{MediaKind, NodeHandle, YoutubeParams};
use crate::media::{MediaSource, Playback};
use std::rc::Rc;

pub struct YoutubeSource {
    params: YoutubeParams,
    backend: Rc<dyn MediaBackend>,
}

impl YoutubeSource {
    #[must_use]
    pub fn new(params: YoutubeParams, backend: Rc<dyn MediaBackend>) -> Self {
        Self { params, backend }
    }

    #[must_use]
    pub fn params(&self) -> &YoutubeParams {
        &self.params
    }
}

impl MediaSource for YoutubeSource {
    fn kind(&self) -> MediaKind {
        MediaKind::Youtube
    }

    fn load(&self) -> LoadFuture {
        self.backend.load_youtube(&self.params)
    }

    fn playback(&self) -> Option<&dyn Playback> {
        Some(self)
    }
}

impl Playback for YoutubeSource {
    fn pause(&self, node: NodeHandle) {
        self.backend.pause(node);
    }
}
