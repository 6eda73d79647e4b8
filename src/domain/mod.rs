// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure data shared by every other layer.
//!
//! # Modules
//!
//! - [`media`]: Media types ([`MediaKind`](media::MediaKind), [`ItemKey`](media::ItemKey),
//!   [`LoadState`](media::LoadState), [`RenderedContent`](media::RenderedContent),
//!   [`MediaDescriptor`](media::MediaDescriptor))

pub mod media;
