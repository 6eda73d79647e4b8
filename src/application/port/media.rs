// SPDX-License-Identifier: MPL-2.0
//! Media renderer port definition.
//!
//! The host owns node construction (image figures, video elements, player
//! iframes, map canvases). The lightbox only needs the load contract: a
//! future that settles exactly once with a node handle or a [`LoadError`].

use crate::domain::media::{ImageParams, MapParams, NodeHandle, VideoParams, YoutubeParams};
use crate::error::LoadError;
use futures_util::future::LocalBoxFuture;

/// Future returned by every loader.
///
/// `'static` so that no borrow of the gallery is held while it is pending.
pub type LoadFuture = LocalBoxFuture<'static, Result<NodeHandle, LoadError>>;

/// Port for the host's media renderers.
///
/// Every method is called at most once per item; the coordinator never asks
/// for the same item twice.
///
/// # Example
///
/// ```ignore
/// use lens_lightbox::application::port::{LoadFuture, MediaBackend};
///
/// impl MediaBackend for DomBackend {
///     fn load_image(&self, params: &ImageParams) -> LoadFuture {
///         let img = self.document.create_image(&params.src);
///         Box::pin(async move { img.decoded().await.map_err(LoadError::new) })
///     }
///     // ...
/// }
/// ```
pub trait MediaBackend {
    /// Decodes an image, failing on a decode error.
    fn load_image(&self, params: &ImageParams) -> LoadFuture;

    /// Prepares a video element, settling once it can play.
    fn load_video(&self, params: &VideoParams) -> LoadFuture;

    /// Creates an embedded YouTube player, settling when the player is ready.
    fn load_youtube(&self, params: &YoutubeParams) -> LoadFuture;

    /// Loads the maps SDK and builds a map canvas.
    fn load_map(&self, params: &MapParams) -> LoadFuture;

    /// Pauses playback of a video or player node. No-op for other nodes.
    fn pause(&self, node: NodeHandle);
}
