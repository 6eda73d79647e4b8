// SPDX-License-Identifier: MPL-2.0
//! Video source: settles once the host video element can play.
//!
//! Videos keep playing in the background unless paused, so this source
//! exposes the [`Playback`] capability.

use crate::application::port::{LoadFuture, MediaBackend};
use crate::domain::media::{MediaKind, NodeHandle, VideoParams};
use crate::media::{MediaSource, Playback};
use std::rc::Rc;

pub struct VideoSource {
    params: VideoParams,
    backend: Rc<dyn MediaBackend>,
}

impl VideoSource {
    #[must_use]
    pub fn new(params: VideoParams, backend: Rc<dyn MediaBackend>) -> Self {
        Self { params, backend }
    }

    #[must_use]
    pub fn params(&self) -> &VideoParams {
        &self.params
    }
}

impl MediaSource for VideoSource {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn load(&self) -> LoadFuture {
        self.backend.load_video(&self.params)
    }

    fn playback(&self) -> Option<&dyn Playback> {
        Some(self)
    }
}

impl Playback for VideoSource {
    fn pause(&self, node: NodeHandle) {
        self.backend.pause(node);
    }
}
