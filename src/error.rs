// SPDX-License-Identifier: MPL-2.0
//! Error types for the lightbox.
//!
//! Two families exist and never mix:
//! - [`Error`] / [`ConfigError`]: setup-time failures, returned synchronously
//!   to whoever registered the type, item or callback.
//! - [`LoadError`]: a single item failed to load. It never leaves the
//!   navigation API; the coordinator turns it into an inline error placeholder.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Config(ConfigError),
    Io(String),
    Settings(String),
}

/// Invalid registrations and setup calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No factory is registered for this type tag.
    UnknownType(String),

    /// A custom type tried to reuse an already registered tag.
    DuplicateType(String),

    /// An item key is already present in the registry.
    DuplicateKey(String),

    /// `on()` was called with a name outside the four known hooks.
    UnknownEvent(String),

    /// A trigger descriptor could not be parsed.
    InvalidDescriptor(String),

    /// Type-specific parameters were rejected by the type's factory.
    InvalidParams {
        /// Type tag of the failing descriptor.
        type_tag: String,
        /// Parser message.
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownType(tag) => write!(f, "unknown type: {tag}"),
            ConfigError::DuplicateType(tag) => write!(f, "duplicate type: {tag}"),
            ConfigError::DuplicateKey(key) => write!(f, "duplicate key: {key}"),
            ConfigError::UnknownEvent(name) => write!(f, "unknown event: {name}"),
            ConfigError::InvalidDescriptor(msg) => write!(f, "invalid descriptor: {msg}"),
            ConfigError::InvalidParams { type_tag, message } => {
                write!(f, "invalid parameters for {type_tag}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Settings(e) => write!(f, "Settings Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(ConfigError::InvalidDescriptor(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single media item failed to produce content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    reason: String,
}

impl LoadError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Human-readable reason reported by the renderer.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Load Error: {}", self.reason)
    }
}

impl std::error::Error for LoadError {}
