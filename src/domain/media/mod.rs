// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains core media types that are independent of any
//! host or renderer concerns.

pub mod descriptor;
pub mod params;
pub mod types;

// Re-export commonly used types
pub use descriptor::MediaDescriptor;
pub use params::{ImageParams, MapParams, VideoParams, YoutubeParams};
pub use types::{
    ContainerId, Direction, ItemKey, LoadState, MediaKind, NodeHandle, RenderedContent,
    TriggerId,
};
