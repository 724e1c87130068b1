#![forbid(unsafe_code)]

//! 2D cell grid.
//!
//! All writes are clipped to the grid. Out-of-range coordinates are ignored
//! rather than reported, because widgets routinely lay out past the visible
//! edge on narrow surfaces.

use mlshare_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::style::Style;

/// Row-major grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer of empty cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Overwrite one cell.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Grow or shrink to `height` rows, keeping existing rows.
    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.cells
            .resize(usize::from(self.width) * usize::from(height), Cell::EMPTY);
    }

    /// Fill `rect` with `cell`, clipped to the buffer.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let area = rect.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Apply `style` to every cell in `rect`, keeping content.
    pub fn set_style(&mut self, rect: Rect, style: Style) {
        let area = rect.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    style.apply(cell);
                }
            }
        }
    }

    /// Write `text` starting at `(x, y)`, stopping at `max_x` (exclusive).
    ///
    /// Returns the column after the last written cell. A wide character that
    /// would straddle `max_x` is not written.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > max_x {
                break;
            }
            let mut cell = self.get(col, y).copied().unwrap_or_default();
            cell.ch = Some(ch);
            style.apply(&mut cell);
            self.set(col, y, cell);
            if w == 2 {
                let mut cont = Cell::continuation();
                cont.bg = cell.bg;
                self.set(col + 1, y, cont);
            }
            col += w;
        }
        col
    }

    /// Copy `rows` rows from `src` (starting at `src_y`) to this buffer
    /// (starting at `dst_y`). Columns beyond either width are dropped.
    pub fn copy_rows(&mut self, src: &Buffer, src_y: u16, dst_y: u16, rows: u16) {
        let cols = self.width.min(src.width);
        for r in 0..rows {
            let (Some(sy), Some(dy)) = (src_y.checked_add(r), dst_y.checked_add(r)) else {
                break;
            };
            if sy >= src.height || dy >= self.height {
                break;
            }
            for x in 0..cols {
                if let Some(cell) = src.get(x, sy) {
                    self.set(x, dy, *cell);
                }
            }
        }
    }

    /// Plain text of row `y`, trailing blanks trimmed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        if y >= self.height {
            return out;
        }
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                if cell.is_continuation() {
                    continue;
                }
                out.push(cell.ch.unwrap_or(' '));
            }
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// All rows as plain text.
    #[must_use]
    pub fn to_text(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// Runs of cells that differ from `prev`, row by row.
    ///
    /// A size mismatch marks every cell as changed.
    #[must_use]
    pub fn diff(&self, prev: &Buffer) -> Vec<ChangeRun> {
        let full = prev.width != self.width || prev.height != self.height;
        let mut runs = Vec::new();
        for y in 0..self.height {
            let mut start: Option<u16> = None;
            for x in 0..self.width {
                let changed = full || self.get(x, y) != prev.get(x, y);
                match (changed, start) {
                    (true, None) => start = Some(x),
                    (false, Some(x0)) => {
                        runs.push(ChangeRun { y, x0, x1: x - 1 });
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(x0) = start {
                runs.push(ChangeRun {
                    y,
                    x0,
                    x1: self.width - 1,
                });
            }
        }
        runs
    }
}

/// Contiguous changed cells on one row, `x0..=x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    pub y: u16,
    pub x0: u16,
    pub x1: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_string_clips_at_max() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_string(2, 0, "hello world", Style::new(), 8);
        assert_eq!(end, 8);
        assert_eq!(buf.row_text(0), "  hello");
    }

    #[test]
    fn wide_chars_take_two_cells() {
        let mut buf = Buffer::new(6, 1);
        let end = buf.set_string(0, 0, "a你b", Style::new(), 6);
        assert_eq!(end, 4);
        assert!(buf.get(2, 0).unwrap().is_continuation());
        assert_eq!(buf.row_text(0), "a你b");
    }

    #[test]
    fn wide_char_does_not_straddle_edge() {
        let mut buf = Buffer::new(3, 1);
        let end = buf.set_string(0, 0, "ab你", Style::new(), 3);
        assert_eq!(end, 2);
    }

    #[test]
    fn fill_and_style_are_clipped() {
        let mut buf = Buffer::new(4, 2);
        buf.fill(Rect::new(2, 1, 10, 10), Cell::from_char('#'));
        assert_eq!(buf.to_text(), vec!["".to_string(), "  ##".to_string()]);
        buf.set_style(Rect::new(0, 0, 99, 99), Style::new().bg(PackedRgba::rgb(1, 1, 1)));
        assert_eq!(buf.get(3, 1).unwrap().bg, PackedRgba::rgb(1, 1, 1));
        assert_eq!(buf.get(3, 1).unwrap().ch, Some('#'));
    }

    #[test]
    fn set_height_keeps_rows() {
        let mut buf = Buffer::new(3, 1);
        buf.set_string(0, 0, "abc", Style::new(), 3);
        buf.set_height(3);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.row_text(0), "abc");
        assert_eq!(buf.row_text(2), "");
    }

    #[test]
    fn copy_rows_window() {
        let mut doc = Buffer::new(3, 5);
        for y in 0..5u16 {
            buf_line(&mut doc, y);
        }
        let mut screen = Buffer::new(3, 2);
        screen.copy_rows(&doc, 3, 0, 4);
        assert_eq!(screen.to_text(), vec!["r3".to_string(), "r4".to_string()]);
    }

    fn buf_line(buf: &mut Buffer, y: u16) {
        buf.set_string(0, y, &format!("r{y}"), Style::new(), 3);
    }

    #[test]
    fn diff_groups_runs() {
        let prev = Buffer::new(5, 2);
        let mut next = prev.clone();
        next.set_string(1, 0, "ab", Style::new(), 5);
        next.set(4, 1, Cell::from_char('z'));
        assert_eq!(
            next.diff(&prev),
            vec![
                ChangeRun { y: 0, x0: 1, x1: 2 },
                ChangeRun { y: 1, x0: 4, x1: 4 },
            ]
        );
        assert!(next.diff(&next).is_empty());
    }

    #[test]
    fn diff_size_mismatch_is_full() {
        let prev = Buffer::new(2, 1);
        let next = Buffer::new(3, 1);
        assert_eq!(next.diff(&prev), vec![ChangeRun { y: 0, x0: 0, x1: 2 }]);
    }

    proptest::proptest! {
        #[test]
        fn diff_runs_cover_exactly_the_changed_cells(
            writes in proptest::collection::vec((0u16..8, 0u16..4, proptest::char::range('a', 'z')), 0..20)
        ) {
            let prev = Buffer::new(8, 4);
            let mut next = prev.clone();
            for (x, y, ch) in writes {
                next.set(x, y, Cell::from_char(ch));
            }
            let runs = next.diff(&prev);
            for y in 0..4u16 {
                for x in 0..8u16 {
                    let changed = next.get(x, y) != prev.get(x, y);
                    let covered = runs.iter().any(|r| r.y == y && r.x0 <= x && x <= r.x1);
                    proptest::prop_assert_eq!(changed, covered);
                }
            }
        }
    }
}
