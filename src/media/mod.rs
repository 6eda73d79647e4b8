// SPDX-License-Identifier: MPL-2.0
//! Media sources: the polymorphic loaders behind gallery items.
//!
//! A [`MediaSource`] knows its type tag and how to produce content. Optional
//! behaviour is exposed as capability accessors checked at the type level
//! (see [`MediaSource::playback`]) rather than detected at runtime.
//!
//! Sources are created by the [`TypeRegistry`], which maps a descriptor's
//! type tag to a factory. Built-in factories wrap the host [`MediaBackend`];
//! embedding applications add their own through [`CustomType`].

pub mod image;
pub mod item;
pub mod map;
pub mod video;
pub mod youtube;

pub use image::ImageSource;
pub use item::{MediaItem, SharedLoad};
pub use map::MapSource;
pub use video::VideoSource;
pub use youtube::YoutubeSource;

use crate::application::port::{LoadFuture, MediaBackend};
use crate::domain::media::{MediaDescriptor, MediaKind, NodeHandle};
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Common capability set of every media variant.
pub trait MediaSource {
    /// Type tag of this source.
    fn kind(&self) -> MediaKind;

    /// Starts producing content. Called at most once per source.
    fn load(&self) -> LoadFuture;

    /// Playback capability, for sources that produce playing media.
    fn playback(&self) -> Option<&dyn Playback> {
        None
    }
}

/// Optional capability: media that keeps playing unless told to pause.
pub trait Playback {
    /// Pauses the node produced by this source's load.
    fn pause(&self, node: NodeHandle);

    /// Called before the gallery switches away from this item.
    fn before_change(&self, node: NodeHandle) {
        self.pause(node);
    }

    /// Called before the gallery closes while showing this item.
    fn before_close(&self, node: NodeHandle) {
        self.pause(node);
    }
}

/// Builds a source from a descriptor.
pub type SourceFactory = Box<dyn Fn(&MediaDescriptor) -> Result<Box<dyn MediaSource>>>;

/// A media type registered by the embedding application.
pub struct CustomType {
    tag: String,
    factory: SourceFactory,
}

impl CustomType {
    pub fn new<F>(tag: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&MediaDescriptor) -> Result<Box<dyn MediaSource>> + 'static,
    {
        Self {
            tag: tag.into(),
            factory: Box::new(factory),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType").field("tag", &self.tag).finish()
    }
}

/// Maps type tags to source factories.
pub struct TypeRegistry {
    factories: HashMap<String, SourceFactory>,
}

impl TypeRegistry {
    /// Creates a registry with no types at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the four built-in types backed by `backend`.
    #[must_use]
    pub fn with_builtins(backend: Rc<dyn MediaBackend>) -> Self {
        let mut registry = Self::empty();

        let b = Rc::clone(&backend);
        registry.insert(MediaKind::IMAGE, move |d| {
            Ok(Box::new(ImageSource::new(d.params_as()?, Rc::clone(&b))))
        });
        let b = Rc::clone(&backend);
        registry.insert(MediaKind::VIDEO, move |d| {
            Ok(Box::new(VideoSource::new(d.params_as()?, Rc::clone(&b))))
        });
        let b = Rc::clone(&backend);
        registry.insert(MediaKind::YOUTUBE, move |d| {
            Ok(Box::new(YoutubeSource::new(d.params_as()?, Rc::clone(&b))))
        });
        registry.insert(MediaKind::MAP, move |d| {
            Ok(Box::new(MapSource::new(d.params_as()?, Rc::clone(&backend))))
        });

        registry
    }

    fn insert<F>(&mut self, tag: &str, factory: F)
    where
        F: Fn(&MediaDescriptor) -> Result<Box<dyn MediaSource>> + 'static,
    {
        self.factories.insert(tag.to_string(), Box::new(factory));
    }

    /// Registers a custom type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateType`] when the tag is already taken,
    /// built-in tags included.
    pub fn register(&mut self, custom: CustomType) -> Result<()> {
        if self.factories.contains_key(&custom.tag) {
            return Err(ConfigError::DuplicateType(custom.tag).into());
        }
        tracing::debug!(tag = %custom.tag, "registered custom media type");
        self.factories.insert(custom.tag, custom.factory);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Builds the source for a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownType`] for unregistered tags, or the
    /// factory's own error for bad parameters.
    pub fn create(&self, descriptor: &MediaDescriptor) -> Result<Box<dyn MediaSource>> {
        let factory = self
            .factories
            .get(&descriptor.type_tag)
            .ok_or_else(|| ConfigError::UnknownType(descriptor.type_tag.clone()))?;
        factory(descriptor)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&String> = self.factories.keys().collect();
        tags.sort();
        f.debug_struct("TypeRegistry").field("tags", &tags).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LoadError};
    use crate::infrastructure::headless::ScriptedBackend;
    use futures_util::future;

    struct Panorama;

    impl MediaSource for Panorama {
        fn kind(&self) -> MediaKind {
            MediaKind::Custom("panorama".to_string())
        }

        fn load(&self) -> LoadFuture {
            Box::pin(future::ready(Err(LoadError::new("not supported"))))
        }
    }

    fn panorama_type() -> CustomType {
        CustomType::new("panorama", |_| Ok(Box::new(Panorama)))
    }

    fn registry() -> TypeRegistry {
        TypeRegistry::with_builtins(Rc::new(ScriptedBackend::new()))
    }

    #[test]
    fn builtins_are_registered() {
        let registry = registry();
        for tag in ["image", "video", "youtube", "map"] {
            assert!(registry.contains(tag), "{tag} should be built in");
        }
    }

    #[test]
    fn create_builds_matching_kind() {
        let registry = registry();
        let descriptor = MediaDescriptor::new("video").with_param("src", "clip.mp4");
        let source = registry.create(&descriptor).expect("video should build");
        assert_eq!(source.kind(), MediaKind::Video);
        assert!(source.playback().is_some());
    }

    #[test]
    fn create_unknown_type_fails() {
        let registry = registry();
        let err = match registry.create(&MediaDescriptor::new("panorama")) {
            Err(err) => err,
            Ok(_) => panic!("panorama is not registered"),
        };
        assert_eq!(
            err,
            Error::Config(ConfigError::UnknownType("panorama".to_string()))
        );
    }

    #[test]
    fn custom_type_can_be_registered_once() {
        let mut registry = registry();
        registry
            .register(panorama_type())
            .expect("first registration succeeds");

        let err = registry
            .register(panorama_type())
            .expect_err("second registration must fail");
        assert_eq!(
            err,
            Error::Config(ConfigError::DuplicateType("panorama".to_string()))
        );

        let source = registry
            .create(&MediaDescriptor::new("panorama"))
            .expect("custom type should build");
        assert!(source.playback().is_none());
    }

    #[test]
    fn custom_type_cannot_shadow_builtin() {
        let mut registry = registry();
        let err = registry
            .register(CustomType::new("image", |_| Ok(Box::new(Panorama))))
            .expect_err("image is built in");
        assert!(matches!(
            err,
            Error::Config(ConfigError::DuplicateType(_))
        ));
    }
}
