// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any host (DOM) dependencies.

use std::borrow::Borrow;
use std::fmt;

/// Type tag of a media item.
///
/// Built-in tags map to their own variant; anything else is carried as
/// [`MediaKind::Custom`] and must be backed by a registered custom type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Static image decoded by the host.
    Image,
    /// Native video element.
    Video,
    /// Embedded YouTube player.
    Youtube,
    /// Third-party map widget.
    Map,
    /// Type registered by the embedding application.
    Custom(String),
}

impl MediaKind {
    pub const IMAGE: &'static str = "image";
    pub const VIDEO: &'static str = "video";
    pub const YOUTUBE: &'static str = "youtube";
    pub const MAP: &'static str = "map";

    /// Resolves a descriptor tag into a kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            Self::IMAGE => MediaKind::Image,
            Self::VIDEO => MediaKind::Video,
            Self::YOUTUBE => MediaKind::Youtube,
            Self::MAP => MediaKind::Map,
            other => MediaKind::Custom(other.to_string()),
        }
    }

    /// Returns the tag as written in descriptors.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            MediaKind::Image => Self::IMAGE,
            MediaKind::Video => Self::VIDEO,
            MediaKind::Youtube => Self::YOUTUBE,
            MediaKind::Map => Self::MAP,
            MediaKind::Custom(tag) => tag,
        }
    }

    #[must_use]
    pub fn is_builtin(&self) -> bool {
        !matches!(self, MediaKind::Custom(_))
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Opaque unique identifier of an item inside one gallery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(String);

impl ItemKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generates a fresh random key for items whose descriptor carries none.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ItemKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Load progress of a single item.
///
/// Transitions only go forward: `NotLoaded -> Loading -> Loaded | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    /// `Loaded` and `Failed` both carry displayable content.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed)
    }
}

/// Hint for the show-element transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

/// Host handle of a rendered node (image figure, video element, iframe...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u64);

/// Host handle of the container an item's content is mounted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// Host handle of a trigger element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(pub u64);

/// Content produced by a settled load. Set once per item, never replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedContent {
    /// Node produced by the media renderer.
    Media(NodeHandle),
    /// Inline error placeholder shown instead of the media.
    Error {
        /// Localized message shown to the user.
        message: String,
        /// Technical reason reported by the renderer.
        reason: String,
    },
}

impl RenderedContent {
    #[must_use]
    pub fn node(&self) -> Option<NodeHandle> {
        match self {
            RenderedContent::Media(node) => Some(*node),
            RenderedContent::Error { .. } => None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, RenderedContent::Error { .. })
    }
}
