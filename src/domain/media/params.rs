// SPDX-License-Identifier: MPL-2.0
//! Type-specific parameters of the built-in media kinds.
//!
//! Field defaults follow the attribute conventions of trigger markup:
//! numbers may arrive as strings, and boolean flags are only enabled by an
//! explicit `true`.

use crate::domain::media::descriptor::{flag, lenient_f64, lenient_i64};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Default width of video and YouTube players.
pub const DEFAULT_PLAYER_WIDTH: u32 = 854;

/// Default height of video and YouTube players.
pub const DEFAULT_PLAYER_HEIGHT: u32 = 480;

/// Default map canvas width.
pub const DEFAULT_MAP_WIDTH: u32 = 1024;

/// Default map canvas height.
pub const DEFAULT_MAP_HEIGHT: u32 = 720;

/// Default map zoom level.
pub const DEFAULT_MAP_ZOOM: u32 = 8;

/// Default map language.
pub const DEFAULT_MAP_LANG: &str = "fr";

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube(?:-nocookie)?\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([a-zA-Z0-9_-]{11})",
    )
    .expect("YouTube id pattern is valid")
});

/// Positive dimension, `None` when absent, zero or negative.
fn dimension(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok()).filter(|v| *v > 0)
}

// =============================================================================
// Image
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageParams {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    width: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    height: Option<i64>,
}

impl ImageParams {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: String::new(),
            width: None,
            height: None,
        }
    }

    /// Explicit width; the image keeps its natural size when `None`.
    #[must_use]
    pub fn width(&self) -> Option<u32> {
        dimension(self.width)
    }

    #[must_use]
    pub fn height(&self) -> Option<u32> {
        dimension(self.height)
    }
}

// =============================================================================
// Video
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoParams {
    pub src: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    width: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    height: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    autoplay: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    controls: Option<bool>,
}

impl VideoParams {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: None,
            height: None,
            autoplay: None,
            controls: None,
        }
    }

    #[must_use]
    pub fn width(&self) -> Option<u32> {
        match self.width {
            None => Some(DEFAULT_PLAYER_WIDTH),
            explicit => dimension(explicit),
        }
    }

    #[must_use]
    pub fn height(&self) -> Option<u32> {
        match self.height {
            None => Some(DEFAULT_PLAYER_HEIGHT),
            explicit => dimension(explicit),
        }
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.autoplay.unwrap_or(false)
    }

    #[must_use]
    pub fn controls(&self) -> bool {
        self.controls.unwrap_or(true)
    }
}

// =============================================================================
// YouTube
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YoutubeParams {
    pub src: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    width: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    height: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    rel: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    autoplay: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    controls: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    showinfo: Option<bool>,
    #[serde(default, deserialize_with = "lenient_i64")]
    start: Option<i64>,
    #[serde(default, alias = "allowFullscreen", deserialize_with = "flag")]
    allow_fullscreen: Option<bool>,
}

impl YoutubeParams {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: None,
            height: None,
            rel: None,
            autoplay: None,
            controls: None,
            showinfo: None,
            start: None,
            allow_fullscreen: None,
        }
    }

    /// Extracts the 11-character video id from any YouTube URL shape.
    ///
    /// A bare id (or anything unrecognised) is returned unchanged.
    #[must_use]
    pub fn video_id(&self) -> &str {
        YOUTUBE_ID
            .captures(&self.src)
            .and_then(|caps| caps.get(1))
            .map_or(self.src.as_str(), |m| m.as_str())
    }

    #[must_use]
    pub fn width(&self) -> Option<u32> {
        match self.width {
            None => Some(DEFAULT_PLAYER_WIDTH),
            explicit => dimension(explicit),
        }
    }

    #[must_use]
    pub fn height(&self) -> Option<u32> {
        match self.height {
            None => Some(DEFAULT_PLAYER_HEIGHT),
            explicit => dimension(explicit),
        }
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.autoplay.unwrap_or(false)
    }

    #[must_use]
    pub fn allow_fullscreen(&self) -> bool {
        self.allow_fullscreen.unwrap_or(true)
    }

    /// Start offset in seconds.
    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
            .and_then(|s| u32::try_from(s).ok())
            .unwrap_or(0)
    }

    /// Embed URL with the player variables encoded as `0`/`1` flags.
    #[must_use]
    pub fn embed_url(&self) -> String {
        let bit = |value: bool| u8::from(value);
        format!(
            "https://www.youtube.com/embed/{}?autoplay={}&rel={}&controls={}&showinfo={}&start={}",
            self.video_id(),
            bit(self.autoplay()),
            bit(self.rel.unwrap_or(true)),
            bit(self.controls.unwrap_or(true)),
            bit(self.showinfo.unwrap_or(true)),
            self.start()
        )
    }
}

// =============================================================================
// Map
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapParams {
    pub api_key: String,
    #[serde(default = "default_map_lang")]
    pub lang: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    zoom: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    width: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    height: Option<i64>,
    /// Map styling rules, passed through to the maps SDK untouched.
    #[serde(default)]
    pub styles: Vec<serde_json::Value>,
}

fn default_map_lang() -> String {
    DEFAULT_MAP_LANG.to_string()
}

impl MapParams {
    #[must_use]
    pub fn new(api_key: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            api_key: api_key.into(),
            lang: default_map_lang(),
            lat: Some(lat),
            lng: Some(lng),
            zoom: None,
            width: None,
            height: None,
            styles: Vec::new(),
        }
    }

    /// Map center as `(lat, lng)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.lat.unwrap_or(0.0), self.lng.unwrap_or(0.0))
    }

    #[must_use]
    pub fn zoom(&self) -> u32 {
        self.zoom
            .and_then(|z| u32::try_from(z).ok())
            .unwrap_or(DEFAULT_MAP_ZOOM)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        dimension(self.width).unwrap_or(DEFAULT_MAP_WIDTH)
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        dimension(self.height).unwrap_or(DEFAULT_MAP_HEIGHT)
    }
}
