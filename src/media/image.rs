// SPDX-License-Identifier: MPL-2.0
//! Image source: settles when the host has decoded the image.

use crate::application::port::{LoadFuture, MediaBackend};
use crate::domain::media::{ImageParams, MediaKind};
use crate::media::MediaSource;
use std::rc::Rc;

pub struct ImageSource {
    params: ImageParams,
    backend: Rc<dyn MediaBackend>,
}

impl ImageSource {
    #[must_use]
    pub fn new(params: ImageParams, backend: Rc<dyn MediaBackend>) -> Self {
        Self { params, backend }
    }

    #[must_use]
    pub fn params(&self) -> &ImageParams {
        &self.params
    }
}

impl MediaSource for ImageSource {
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    fn load(&self) -> LoadFuture {
        self.backend.load_image(&self.params)
    }
}
