// SPDX-License-Identifier: MPL-2.0
//! Deep-link fragments such as `#g=1&i=last&d=500`.
//!
//! Recognized keys:
//! - `g`: gallery group the link targets
//! - `k`: target item key (wins over `i`)
//! - `i`: target index, or `first` / `last` / `random`
//! - `d`: delay before opening, in milliseconds
//! - `s`: scroll offset in pixels the page must reach before the link fires
//! - `f`: whether to switch items when the gallery is already open
//!   (default on; `0`, `false` and `no` turn it off)
//!
//! Unknown keys and empty values are ignored.

use rand::Rng;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

static PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&?([a-z])=([a-zA-Z0-9_-]*)").expect("parameter pattern is valid"));

/// Raw `key -> value` pairs of a fragment. Later duplicates win.
#[must_use]
pub fn fragment_params(fragment: &str) -> HashMap<char, String> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    PARAM
        .captures_iter(fragment)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().chars().next()?;
            let value = caps.get(2)?.as_str();
            (!value.is_empty()).then(|| (key, value.to_string()))
        })
        .collect()
}

/// Index request of the `i` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSpec {
    First,
    Last,
    Random,
    At(i64),
}

impl IndexSpec {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "first" => Some(IndexSpec::First),
            "last" => Some(IndexSpec::Last),
            "random" => Some(IndexSpec::Random),
            other => other.parse().ok().map(IndexSpec::At),
        }
    }

    /// Raw index to hand to a clamping jump. `None` for an empty gallery.
    #[must_use]
    pub fn resolve(self, count: usize) -> Option<i64> {
        if count == 0 {
            return None;
        }
        let last = i64::try_from(count - 1).unwrap_or(i64::MAX);
        Some(match self {
            IndexSpec::First => 0,
            IndexSpec::Last => last,
            IndexSpec::Random => rand::thread_rng().gen_range(0..=last),
            IndexSpec::At(index) => index,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeepLinkTarget {
    /// No target given: open on the first item.
    #[default]
    Default,
    Key(String),
    Index(IndexSpec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    pub group: Option<String>,
    pub target: DeepLinkTarget,
    pub delay: Duration,
    pub scroll_threshold: Option<u32>,
    pub force: bool,
}

impl Default for DeepLink {
    fn default() -> Self {
        Self {
            group: None,
            target: DeepLinkTarget::Default,
            delay: Duration::ZERO,
            scroll_threshold: None,
            force: true,
        }
    }
}

impl DeepLink {
    /// Parses a URL fragment, with or without its leading `#`.
    ///
    /// Returns `None` when the fragment carries none of the recognized keys.
    #[must_use]
    pub fn parse(fragment: &str) -> Option<Self> {
        let params = fragment_params(fragment);
        if !['g', 'k', 'i', 'd', 's', 'f']
            .iter()
            .any(|key| params.contains_key(key))
        {
            return None;
        }

        let target = match (params.get(&'k'), params.get(&'i')) {
            (Some(key), _) => DeepLinkTarget::Key(key.clone()),
            (None, Some(index)) => IndexSpec::parse(index)
                .map(DeepLinkTarget::Index)
                .unwrap_or_default(),
            (None, None) => DeepLinkTarget::Default,
        };

        Some(Self {
            group: params.get(&'g').cloned(),
            target,
            delay: params
                .get(&'d')
                .and_then(|d| d.parse().ok())
                .map_or(Duration::ZERO, Duration::from_millis),
            scroll_threshold: params.get(&'s').and_then(|s| s.parse().ok()),
            force: params
                .get(&'f')
                .is_none_or(|f| !matches!(f.as_str(), "0" | "false" | "no")),
        })
    }

    /// Whether the link is meant for the gallery with this group id.
    ///
    /// A link without `g` applies to any gallery.
    #[must_use]
    pub fn applies_to(&self, uid: &str) -> bool {
        self.group.as_deref().is_none_or(|group| group == uid)
    }

    /// Arms the link until the page scroll reaches its threshold.
    #[must_use]
    pub fn arm(self) -> ArmedDeepLink {
        ArmedDeepLink {
            link: self,
            fired: false,
        }
    }
}

/// A deep link waiting for its scroll threshold. Fires at most once.
#[derive(Debug, Clone)]
pub struct ArmedDeepLink {
    link: DeepLink,
    fired: bool,
}

impl ArmedDeepLink {
    /// Reports a scroll position; returns the link the first time the
    /// threshold is reached.
    pub fn on_scroll(&mut self, scroll_y: u32) -> Option<&DeepLink> {
        if self.fired || scroll_y < self.link.scroll_threshold.unwrap_or(0) {
            return None;
        }
        self.fired = true;
        Some(&self.link)
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
