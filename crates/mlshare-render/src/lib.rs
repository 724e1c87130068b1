#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, document frames, and ANSI presentation.
//!
//! # Role in mlshare
//! `mlshare-render` is the deterministic drawing surface. A model renders the
//! whole page into a [`frame::Frame`], which also records where each section
//! anchor landed and which rows are clickable. Hosts then cut a window out of
//! that document at the current scroll offset and present it.
//!
//! # Primary responsibilities
//! - **Cell/Buffer**: 2D grid of styled cells with clipped writes.
//! - **Frame**: document buffer plus hit grid, anchor table and sticky band.
//! - **Presenter**: stateful ANSI emitter driven by buffer diffs.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;
pub mod style;

pub use buffer::Buffer;
pub use cell::{Cell, PackedRgba, StyleFlags};
pub use frame::{DocumentMetrics, Frame, HitData, HitId, HitRegion};
pub use style::Style;
