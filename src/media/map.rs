// SPDX-License-Identifier: MPL-2.0
//! Map source: settles once the maps SDK has built the canvas.

use crate::application::port::{LoadFuture, MediaBackend};
use crate::domain::media::{MapParams, MediaKind};
use crate::media::MediaSource;
use std::rc::Rc;

pub struct MapSource {
    params: MapParams,
    backend: Rc<dyn MediaBackend>,
}

impl MapSource {
    #[must_use]
    pub fn new(params: MapParams, backend: Rc<dyn MediaBackend>) -> Self {
        Self { params, backend }
    }

    #[must_use]
    pub fn params(&self) -> &MapParams {
        &self.params
    }
}

impl MediaSource for MapSource {
    fn kind(&self) -> MediaKind {
        MediaKind::Map
    }

    fn load(&self) -> LoadFuture {
        self.backend.load_map(&self.params)
    }
}
