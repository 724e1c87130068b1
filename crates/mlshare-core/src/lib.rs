#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and the section registry.
//!
//! # Role in mlshare
//! `mlshare-core` is the leaf crate. It owns the vocabulary every other crate
//! speaks: rectangles for layout and hit testing, the [`event::Event`] enum the
//! runtime feeds into models, and the immutable [`registry::SectionRegistry`]
//! that defines page order and navigation order.
//!
//! # How it fits in the system
//! The runtime (`mlshare-runtime`) consumes `Event` values and drives the deck
//! model. Renderers (`mlshare-render`, `mlshare-widgets`) use [`geometry::Rect`].
//! The deck crate builds its registry from [`section::SectionDescriptor`]s.

pub mod event;
pub mod geometry;
#[cfg(feature = "logging")]
pub mod logging;
pub mod registry;
pub mod section;

pub use registry::{RegistryError, SectionRegistry};
pub use section::{DisplayMeta, Gradient, Icon, SectionDescriptor, SectionId};
