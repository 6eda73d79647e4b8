// SPDX-License-Identifier: MPL-2.0
//! Ordered collection of gallery items.
//!
//! Insertion order is display order and navigation order. Items are only ever
//! appended, so an index stays valid for the registry's whole life and the
//! key-to-index map never needs rebuilding.

use crate::domain::media::{ItemKey, MediaDescriptor, TriggerId};
use crate::error::{ConfigError, Result};
use crate::media::{MediaItem, TypeRegistry};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct ElementRegistry {
    items: Vec<MediaItem>,
    positions: HashMap<ItemKey, usize>,
}

impl ElementRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and appends one item.
    ///
    /// The descriptor's key is used when present, otherwise one is generated.
    /// Returns the new item's index.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownType`] when no factory handles the type tag
    /// - [`ConfigError::InvalidParams`] when the factory rejects the parameters
    /// - [`ConfigError::DuplicateKey`] when the key is already registered
    pub fn register(
        &mut self,
        types: &TypeRegistry,
        descriptor: &MediaDescriptor,
        trigger: Option<TriggerId>,
    ) -> Result<usize> {
        let item = Self::build(types, descriptor, trigger)?;
        if self.positions.contains_key(item.key()) {
            return Err(ConfigError::DuplicateKey(item.key().to_string()).into());
        }
        Ok(self.push(item))
    }

    /// Appends a batch of descriptors.
    ///
    /// Validation runs over the whole batch first: either every descriptor is
    /// appended or none is. Returns the new indices in order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register`]; a key repeated inside the batch is also a
    /// [`ConfigError::DuplicateKey`].
    pub fn feed(
        &mut self,
        types: &TypeRegistry,
        descriptors: &[MediaDescriptor],
    ) -> Result<Vec<usize>> {
        self.append_batch(types, descriptors.iter().map(|descriptor| (descriptor, None)))
    }

    /// Appends a batch of scanned triggers, each bound to its new item.
    pub(crate) fn feed_triggers(
        &mut self,
        types: &TypeRegistry,
        entries: &[(MediaDescriptor, TriggerId)],
    ) -> Result<Vec<usize>> {
        self.append_batch(
            types,
            entries
                .iter()
                .map(|(descriptor, trigger)| (descriptor, Some(*trigger))),
        )
    }

    fn append_batch<'a>(
        &mut self,
        types: &TypeRegistry,
        entries: impl Iterator<Item = (&'a MediaDescriptor, Option<TriggerId>)>,
    ) -> Result<Vec<usize>> {
        let mut seen = HashSet::new();
        let mut built = Vec::new();
        for (descriptor, trigger) in entries {
            let item = Self::build(types, descriptor, trigger)?;
            if self.positions.contains_key(item.key()) || !seen.insert(item.key().clone()) {
                return Err(ConfigError::DuplicateKey(item.key().to_string()).into());
            }
            built.push(item);
        }
        Ok(built.into_iter().map(|item| self.push(item)).collect())
    }

    fn build(
        types: &TypeRegistry,
        descriptor: &MediaDescriptor,
        trigger: Option<TriggerId>,
    ) -> Result<MediaItem> {
        let source = types.create(descriptor)?;
        let key = descriptor.item_key().unwrap_or_else(ItemKey::generate);
        Ok(MediaItem::new(key, source, trigger))
    }

    fn push(&mut self, item: MediaItem) -> usize {
        let index = self.items.len();
        tracing::debug!(key = %item.key(), kind = %item.kind(), index, "registered item");
        self.positions.insert(item.key().clone(), index);
        self.items.push(item);
        index
    }

    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&MediaItem> {
        self.find_index(key).and_then(|index| self.items.get(index))
    }

    #[must_use]
    pub fn find_index(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Item at `index`; out of range is `None`.
    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub(crate) fn by_index_mut(&mut self, index: usize) -> Option<&mut MediaItem> {
        self.items.get_mut(index)
    }

    /// Index of the item a trigger element opens.
    #[must_use]
    pub fn find_by_trigger(&self, trigger: TriggerId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.trigger() == Some(trigger))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }
}
