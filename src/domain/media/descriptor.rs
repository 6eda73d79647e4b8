// SPDX-License-Identifier: MPL-2.0
//! Trigger descriptors.
//!
//! A trigger element carries a JSON object such as
//! `{"type": "image", "group": 1, "src": "a.jpg", "key": "cover"}`.
//! `type`, `group` and `key` are lifted out; every other field is kept as
//! type-specific parameters and handed to the type's factory.

use crate::domain::media::{ItemKey, MediaKind};
use crate::error::{ConfigError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaDescriptor {
    /// Type tag (`image`, `video`, `youtube`, `map` or a custom tag).
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Gallery group this trigger belongs to.
    #[serde(default, deserialize_with = "deserialize_group")]
    pub group: Option<String>,

    /// Caller-supplied key; generated on registration when absent.
    #[serde(default)]
    pub key: Option<String>,

    /// Remaining type-specific parameters.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl MediaDescriptor {
    /// Creates a descriptor with no parameters.
    #[must_use]
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            group: None,
            key: None,
            params: Map::new(),
        }
    }

    /// Parses the JSON-ish descriptor stored on a trigger element.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDescriptor`] when the text is not a JSON
    /// object or lacks a `type` field.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_tag(&self.type_tag)
    }

    #[must_use]
    pub fn item_key(&self) -> Option<ItemKey> {
        self.key.as_deref().map(ItemKey::from)
    }

    /// Deserializes the type-specific parameters into a source struct.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParams`] when a required field is missing
    /// or has the wrong shape.
    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.params.clone())).map_err(|err| {
            ConfigError::InvalidParams {
                type_tag: self.type_tag.clone(),
                message: err.to_string(),
            }
            .into()
        })
    }
}

/// Groups come from `data-*` attributes and numeric `uid` options alike.
fn deserialize_group<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Lenient integer: accepts numbers and numeric strings, like attribute values.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// Lenient float: accepts numbers and numeric strings.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Strict boolean flag: only `true` (or `"true"`) enables it.
pub(crate) fn flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => Some(s == "true"),
        Some(_) => Some(false),
    })
}
