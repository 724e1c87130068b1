#![forbid(unsafe_code)]

//! Frame = document buffer + hit grid + anchor table for a render pass.
//!
//! The deck is a document taller than the screen. `Model::view()` renders the
//! *whole* document into the frame, growing it with
//! [`Frame::set_document_height`]; the host then shows a window of it at the
//! current scroll offset via [`Frame::window`].
//!
//! Two pieces of metadata ride along with the cells:
//!
//! - **Anchors**: named document rows. A section container registers an
//!   anchor equal to its id so scroll requests can find it. Anchors are
//!   rebuilt on every render; an id missing from the latest frame is simply
//!   not rendered.
//! - **Sticky band**: rows that behave like CSS `position: sticky; top: 0`.
//!   Once the window scrolls past them they are pinned to the top of the
//!   window instead of scrolling away.
//!
//! # Usage
//!
//! ```
//! use mlshare_core::geometry::Rect;
//! use mlshare_render::frame::{Frame, HitId, HitRegion};
//!
//! let mut frame = Frame::with_hit_grid(40, 10);
//! frame.set_document_height(30);
//! frame.set_anchor("agents", 20);
//! frame.register_hit(Rect::new(0, 20, 40, 1), HitId::new(7), HitRegion::Button, 4);
//!
//! assert_eq!(frame.anchor("agents"), Some(20));
//! assert_eq!(frame.hit_test_window(3, 0, 20).map(|h| h.0), Some(HitId::new(7)));
//! ```

use ahash::AHashMap;
use mlshare_core::geometry::Rect;

use crate::buffer::Buffer;

/// Owner of a clickable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Payload the owner attaches to a region, such as a nav index.
pub type HitData = u64;

/// What kind of target a region is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    #[default]
    None,
    Content,
    /// Nav entries and card actions.
    Button,
    /// One label of a tab strip.
    Tab,
}

type Hit = (HitId, HitRegion, HitData);

/// Per-cell owner table in document coordinates.
///
/// Regions registered later cover earlier ones.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    rows: Vec<Vec<Option<Hit>>>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            rows: vec![vec![None; usize::from(width)]; usize::from(height)],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        u16::try_from(self.rows.len()).unwrap_or(u16::MAX)
    }

    /// Grow or shrink to `height` rows.
    pub fn set_height(&mut self, height: u16) {
        let width = usize::from(self.width);
        self.rows.resize_with(usize::from(height), || vec![None; width]);
    }

    /// Claim every cell of `rect` that lies inside the grid.
    pub fn register(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) {
        let area = rect.intersection(&Rect::from_size(self.width, self.height()));
        let columns = usize::from(area.x)..usize::from(area.right());
        for row in &mut self.rows[usize::from(area.y)..usize::from(area.bottom())] {
            row[columns.clone()].fill(Some((id, region, data)));
        }
    }

    /// Owner of cell `(x, y)`, if any.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        self.rows
            .get(usize::from(y))
            .and_then(|row| row.get(usize::from(x)))
            .copied()
            .flatten()
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }
}

/// Rows pinned to the top of the window once scrolled past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickyBand {
    /// First document row of the band.
    pub row: u16,
    /// Band height in rows.
    pub height: u16,
}

/// Geometry a viewport needs to resolve scroll requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetrics {
    /// Total document height in rows.
    pub height: u16,
    /// Visible window height in rows.
    pub viewport_height: u16,
    /// Rows hidden under the sticky band when it is pinned.
    pub sticky_height: u16,
    /// Anchor id to document row.
    pub anchors: AHashMap<String, u16>,
}

impl DocumentMetrics {
    /// Largest valid scroll offset.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        f64::from(self.height.saturating_sub(self.viewport_height))
    }
}

/// Frame = document buffer + metadata for a render pass.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The document cell grid.
    pub buffer: Buffer,

    /// Optional hit grid for mouse hit testing, in document coordinates.
    pub hit_grid: Option<HitGrid>,

    viewport_height: u16,
    anchors: AHashMap<String, u16>,
    sticky: Option<StickyBand>,
}

impl Frame {
    /// Create a frame for a window `width` x `viewport_height`.
    ///
    /// The document starts exactly one window tall.
    pub fn new(width: u16, viewport_height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, viewport_height),
            hit_grid: None,
            viewport_height,
            anchors: AHashMap::new(),
            sticky: None,
        }
    }

    /// Create a frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, viewport_height: u16) -> Self {
        let mut frame = Self::new(width, viewport_height);
        frame.hit_grid = Some(HitGrid::new(width, viewport_height));
        frame
    }

    /// Frame width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Document height in rows.
    #[inline]
    pub fn document_height(&self) -> u16 {
        self.buffer.height()
    }

    /// Visible window height in rows.
    #[inline]
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Bounds of the whole document.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Resize the document to `height` rows (never shorter than the window).
    pub fn set_document_height(&mut self, height: u16) {
        let height = height.max(self.viewport_height);
        self.buffer.set_height(height);
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.set_height(height);
        }
    }

    /// Clear cells, hits, anchors and the sticky band.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.clear();
        }
        self.anchors.clear();
        self.sticky = None;
    }

    /// Name document row `row` as anchor `id`. Re-registering moves it.
    pub fn set_anchor(&mut self, id: impl Into<String>, row: u16) {
        self.anchors.insert(id.into(), row);
    }

    /// Row of anchor `id`, if rendered.
    #[must_use]
    pub fn anchor(&self, id: &str) -> Option<u16> {
        self.anchors.get(id).copied()
    }

    /// All anchors ordered by row.
    #[must_use]
    pub fn anchors(&self) -> Vec<(&str, u16)> {
        let mut out: Vec<(&str, u16)> = self
            .anchors
            .iter()
            .map(|(id, row)| (id.as_str(), *row))
            .collect();
        out.sort_by_key(|&(id, row)| (row, id));
        out
    }

    /// Declare the sticky band.
    pub fn set_sticky(&mut self, row: u16, height: u16) {
        self.sticky = Some(StickyBand { row, height });
    }

    #[inline]
    pub fn sticky(&self) -> Option<StickyBand> {
        self.sticky
    }

    /// Snapshot of what a viewport needs from this frame.
    #[must_use]
    pub fn metrics(&self) -> DocumentMetrics {
        DocumentMetrics {
            height: self.document_height(),
            viewport_height: self.viewport_height,
            sticky_height: self.sticky.map_or(0, |s| s.height),
            anchors: self.anchors.clone(),
        }
    }

    /// Record a clickable region. A frame without a hit grid ignores it and
    /// returns `false`.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) -> bool {
        let Some(grid) = self.hit_grid.as_mut() else {
            return false;
        };
        grid.register(rect, id, region, data);
        true
    }

    /// Hit test in document coordinates.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }

    /// Whether the sticky band is pinned at this offset.
    fn pinned(&self, offset: u16) -> Option<StickyBand> {
        self.sticky.filter(|band| offset > band.row)
    }

    /// Map a window row to the document row painted there.
    #[must_use]
    pub fn document_row(&self, window_y: u16, offset: u16) -> u16 {
        match self.pinned(offset) {
            Some(band) if window_y < band.height => band.row + window_y,
            _ => offset.saturating_add(window_y),
        }
    }

    /// Hit test in window coordinates at scroll `offset`.
    pub fn hit_test_window(
        &self,
        x: u16,
        y: u16,
        offset: u16,
    ) -> Option<(HitId, HitRegion, HitData)> {
        if y >= self.viewport_height {
            return None;
        }
        self.hit_test(x, self.document_row(y, offset))
    }

    /// Compose the visible window at scroll `offset`.
    #[must_use]
    pub fn window(&self, offset: u16) -> Buffer {
        let mut out = Buffer::new(self.width(), self.viewport_height);
        out.copy_rows(&self.buffer, offset, 0, self.viewport_height);
        if let Some(band) = self.pinned(offset) {
            out.copy_rows(&self.buffer, band.row, 0, band.height);
        }
        out
    }
}

impl Default for Frame {
    /// Create a 1x1 frame (minimum size).
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::style::Style;
    use pretty_assertions::assert_eq;

    fn numbered(width: u16, viewport: u16, doc: u16) -> Frame {
        let mut frame = Frame::with_hit_grid(width, viewport);
        frame.set_document_height(doc);
        for y in 0..doc {
            frame
                .buffer
                .set_string(0, y, &format!("{y}"), Style::new(), width);
        }
        frame
    }

    #[test]
    fn document_never_shorter_than_window() {
        let mut frame = Frame::new(10, 8);
        frame.set_document_height(3);
        assert_eq!(frame.document_height(), 8);
        frame.set_document_height(40);
        assert_eq!(frame.document_height(), 40);
        assert_eq!(frame.viewport_height(), 8);
    }

    #[test]
    fn growing_keeps_hit_grid_in_step() {
        let mut frame = Frame::with_hit_grid(4, 2);
        frame.set_document_height(10);
        let row = Rect::new(0, 9, 4, 1);
        assert!(frame.register_hit(row, HitId::new(3), HitRegion::Content, 0));
        assert_eq!(frame.hit_test(1, 9), Some((HitId::new(3), HitRegion::Content, 0)));
        assert!(!Frame::new(4, 2).register_hit(row, HitId::new(3), HitRegion::Content, 0));
    }

    #[test]
    fn anchors_sorted_and_cleared() {
        let mut frame = Frame::new(4, 2);
        frame.set_anchor("b", 9);
        frame.set_anchor("a", 4);
        assert_eq!(frame.anchors(), vec![("a", 4), ("b", 9)]);
        frame.clear();
        assert!(frame.anchor("a").is_none());
    }

    #[test]
    fn window_scrolls_document() {
        let frame = numbered(4, 3, 10);
        assert_eq!(
            frame.window(4).to_text(),
            vec!["4".to_string(), "5".to_string(), "6".to_string()]
        );
    }

    #[test]
    fn sticky_band_pins_after_scrolling_past() {
        let mut frame = numbered(4, 3, 10);
        frame.set_sticky(2, 1);
        // Not yet past the band: in flow.
        assert_eq!(frame.window(1).row_text(0), "1");
        assert_eq!(frame.window(2).row_text(0), "2");
        // Past it: pinned to the top.
        assert_eq!(
            frame.window(6).to_text(),
            vec!["2".to_string(), "7".to_string(), "8".to_string()]
        );
        assert_eq!(frame.document_row(0, 6), 2);
        assert_eq!(frame.document_row(1, 6), 7);
    }

    #[test]
    fn window_hit_test_follows_sticky() {
        let mut frame = numbered(4, 3, 10);
        frame.set_sticky(2, 1);
        frame.register_hit(Rect::new(0, 2, 4, 1), HitId::new(1), HitRegion::Button, 5);
        frame.register_hit(Rect::new(0, 8, 4, 1), HitId::new(2), HitRegion::Button, 6);
        assert_eq!(frame.hit_test_window(0, 0, 6).map(|h| h.2), Some(5));
        assert_eq!(frame.hit_test_window(0, 2, 6).map(|h| h.2), Some(6));
        assert!(frame.hit_test_window(0, 3, 6).is_none());
    }

    #[test]
    fn metrics_carry_anchors() {
        let mut frame = Frame::new(4, 5);
        frame.set_document_height(20);
        frame.set_sticky(0, 2);
        frame.set_anchor("x", 12);
        let m = frame.metrics();
        assert_eq!(m.height, 20);
        assert_eq!(m.sticky_height, 2);
        assert_eq!(m.anchors.get("x"), Some(&12));
        assert_eq!(m.max_offset(), 15.0);
    }

    #[test]
    fn later_region_covers_earlier_one() {
        let mut grid = HitGrid::new(6, 4);
        grid.register(Rect::new(0, 0, 6, 4), HitId::new(1), HitRegion::Content, 10);
        grid.register(Rect::new(4, 2, 9, 9), HitId::new(2), HitRegion::Tab, 20);
        assert_eq!(grid.hit_test(3, 3).map(|h| h.2), Some(10));
        assert_eq!(grid.hit_test(5, 3).map(|h| h.2), Some(20));
        assert_eq!(grid.hit_test(6, 3), None);
        grid.clear();
        assert!(grid.hit_test(0, 0).is_none());
    }

    #[test]
    fn frame_clear_resets_cells() {
        let mut frame = Frame::with_hit_grid(4, 4);
        frame.buffer.set(1, 1, Cell::from_char('x'));
        frame.set_sticky(0, 1);
        frame.clear();
        assert!(frame.buffer.get(1, 1).unwrap().is_empty());
        assert!(frame.sticky().is_none());
    }
}
