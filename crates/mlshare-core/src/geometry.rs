#![forbid(unsafe_code)]

//! Geometric primitives.

/// Cell-space rectangle. The origin is the top-left cell of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// One past the last column.
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// True when either side is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half-open containment test for a cell.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        let in_columns = self.x <= x && x < self.right();
        let in_rows = self.y <= y && y < self.bottom();
        in_columns && in_rows
    }

    /// Shrink by `pad` on each side, saturating at zero size.
    #[must_use]
    pub fn inner(&self, pad: Sides) -> Rect {
        let horizontal = pad.left.saturating_add(pad.right);
        let vertical = pad.top.saturating_add(pad.bottom);
        Rect {
            x: self.x.saturating_add(pad.left),
            y: self.y.saturating_add(pad.top),
            width: self.width.saturating_sub(horizontal),
            height: self.height.saturating_sub(vertical),
        }
    }

    /// Overlap of two rectangles. Disjoint inputs give [`Rect::default`].
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let (x0, y0) = (self.x.max(other.x), self.y.max(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x0 >= x1 || y0 >= y1 {
            return Rect::default();
        }
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Split off the top `rows` rows, returning `(top, rest)`.
    pub fn split_top(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        (
            Rect::new(self.x, self.y, self.width, rows),
            Rect::new(self.x, self.y + rows, self.width, self.height - rows),
        )
    }

    /// Divide the rectangle into `count` columns separated by `gap` cells.
    ///
    /// The last column absorbs any remainder so the columns always span the
    /// full width. Returns an empty vector when `count == 0`.
    pub fn columns(&self, count: u16, gap: u16) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let gaps = gap.saturating_mul(count - 1);
        let usable = self.width.saturating_sub(gaps);
        let base = usable / count;
        let mut out = Vec::with_capacity(usize::from(count));
        let mut x = self.x;
        for i in 0..count {
            let width = if i + 1 == count {
                self.right().saturating_sub(x)
            } else {
                base
            };
            out.push(Rect::new(x, self.y, width, self.height));
            x = x.saturating_add(base).saturating_add(gap);
        }
        out
    }
}

/// Edge offsets for margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    /// Same offset on every side.
    #[inline]
    pub const fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    /// Vertical and horizontal offsets.
    #[inline]
    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
    }

    #[test]
    fn inner_saturates() {
        let r = Rect::new(0, 0, 3, 3);
        let inner = r.inner(Sides::all(2));
        assert_eq!(inner.width, 0);
        assert!(inner.is_empty());
    }

    #[test]
    fn intersection_of_disjoint_is_empty() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, 5, 2, 2);
        assert_eq!(a.intersection(&b), Rect::default());
        let c = Rect::new(1, 1, 4, 4);
        assert_eq!(a.intersection(&c), Rect::new(1, 1, 1, 1));
    }

    #[test]
    fn columns_cover_full_width() {
        let r = Rect::new(1, 0, 20, 4);
        let cols = r.columns(3, 2);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].x, 1);
        assert_eq!(cols[2].right(), r.right());
        assert!(r.columns(0, 1).is_empty());
    }

    #[test]
    fn split_top_clamps() {
        let r = Rect::new(0, 0, 10, 3);
        let (top, rest) = r.split_top(5);
        assert_eq!(top.height, 3);
        assert!(rest.is_empty());
    }
}
