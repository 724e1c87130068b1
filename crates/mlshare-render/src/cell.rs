#![forbid(unsafe_code)]

//! Cells: one character plus its colors and attributes.

use bitflags::bitflags;

/// RGBA color packed into a `u32` (`0xRRGGBBAA`).
///
/// Alpha 0 means "no color set"; presenters leave the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (unset).
    pub const TRANSPARENT: Self = Self(0);

    /// Opaque color from components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Linear blend towards `other` by `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Self::rgb(
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
        )
    }

    /// `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// One grid cell.
///
/// A wide character occupies its own cell plus one continuation cell to its
/// right; the continuation is skipped on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character content; `None` for an empty cell.
    pub ch: Option<char>,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub flags: StyleFlags,
    continuation: bool,
}

impl Cell {
    /// An empty, unstyled cell.
    pub const EMPTY: Self = Self {
        ch: None,
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        flags: StyleFlags::empty(),
        continuation: false,
    };

    /// A cell holding `ch` with no style.
    #[inline]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch: Some(ch),
            ..Self::EMPTY
        }
    }

    /// Trailing half of a wide character.
    #[inline]
    pub const fn continuation() -> Self {
        Self {
            continuation: true,
            ..Self::EMPTY
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.ch.is_none() && !self.continuation
    }

    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.continuation
    }

    /// Display width of the content (0 for continuations, 1 for empty).
    #[must_use]
    pub fn width(&self) -> usize {
        if self.continuation {
            return 0;
        }
        self.ch
            .map_or(1, |c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_components() {
        let c = PackedRgba::rgb(10, 20, 30);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (10, 20, 30, 255));
        assert_eq!(PackedRgba::TRANSPARENT.a(), 0);
        assert_eq!(c.to_hex(), "#0a141e");
    }

    #[test]
    fn lerp_endpoints() {
        let a = PackedRgba::rgb(0, 0, 0);
        let b = PackedRgba::rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), PackedRgba::rgb(100, 50, 25));
    }

    #[test]
    fn cell_widths() {
        assert_eq!(Cell::EMPTY.width(), 1);
        assert_eq!(Cell::from_char('a').width(), 1);
        assert_eq!(Cell::from_char('你').width(), 2);
        assert_eq!(Cell::continuation().width(), 0);
        assert!(!Cell::continuation().is_empty());
    }
}
