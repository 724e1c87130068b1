#![forbid(unsafe_code)]

//! Ordered, immutable section registry.
//!
//! The registry fixes three orders at once: top-to-bottom page order, nav bar
//! order, and hero card order. It is built once and never reordered. Lookup by
//! id goes through an [`AHashMap`] index so it stays O(1) regardless of how
//! many sections the deck grows to.

use ahash::AHashMap;
use thiserror::Error;

use crate::section::{SectionDescriptor, SectionId};

/// Construction errors. A registry that exists is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("section registry must contain at least one section")]
    Empty,
    #[error("duplicate section id `{id}` at positions {first} and {second}")]
    DuplicateId {
        id: SectionId,
        first: usize,
        second: usize,
    },
}

/// Ordered list of [`SectionDescriptor`]s with an id index.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: Vec<SectionDescriptor>,
    index: AHashMap<SectionId, usize>,
}

impl SectionRegistry {
    /// Build a registry, rejecting empty input and duplicate ids.
    pub fn new(sections: Vec<SectionDescriptor>) -> Result<Self, RegistryError> {
        if sections.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut index = AHashMap::with_capacity(sections.len());
        for (pos, section) in sections.iter().enumerate() {
            if let Some(first) = index.insert(section.id.clone(), pos) {
                return Err(RegistryError::DuplicateId {
                    id: section.id.clone(),
                    first,
                    second: pos,
                });
            }
        }
        tracing::debug!(sections = sections.len(), "section registry built");
        Ok(Self { sections, index })
    }

    /// First section in page order. Always present.
    #[must_use]
    pub fn first(&self) -> &SectionDescriptor {
        // Non-empty is checked in `new`.
        &self.sections[0]
    }

    /// Look up a section by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SectionDescriptor> {
        self.index.get(id).map(|&pos| &self.sections[pos])
    }

    /// Whether `id` names a registered section.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Page position of `id`, if registered.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Section at page position `pos`.
    #[must_use]
    pub fn at(&self, pos: usize) -> Option<&SectionDescriptor> {
        self.sections.get(pos)
    }

    /// Iterate in page order.
    pub fn iter(&self) -> std::slice::Iter<'_, SectionDescriptor> {
        self.sections.iter()
    }

    /// Ids in page order.
    pub fn ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|s| &s.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a SectionDescriptor;
    type IntoIter = std::slice::Iter<'a, SectionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
