#![forbid(unsafe_code)]

//! Color palette and shared styles for the terminal view.
//!
//! Gradient tokens in the content (`blue-500`, `purple-600`, ...) name
//! Tailwind palette entries; [`token_color`] maps them to terminal colors.

use mlshare_core::section::Gradient;
use mlshare_render::cell::PackedRgba;
use mlshare_render::style::Style;

// ---------------------------------------------------------------------------
// Color palette
// ---------------------------------------------------------------------------

/// Background colors.
pub mod bg {
    use super::*;

    pub const PAGE: PackedRgba = PackedRgba::rgb(15, 23, 42);
    pub const NAV: PackedRgba = PackedRgba::rgb(2, 6, 23);
    pub const CARD: PackedRgba = PackedRgba::rgb(30, 41, 59);
    pub const BADGE: PackedRgba = PackedRgba::rgb(30, 58, 138);
    pub const BUTTON: PackedRgba = PackedRgba::rgb(37, 99, 235);
}

/// Foreground / text colors.
pub mod fg {
    use super::*;

    pub const PRIMARY: PackedRgba = PackedRgba::rgb(248, 250, 252);
    pub const SECONDARY: PackedRgba = PackedRgba::rgb(203, 213, 225);
    pub const MUTED: PackedRgba = PackedRgba::rgb(148, 163, 184);
    /// Inactive nav entries (`gray-300`).
    pub const NAV: PackedRgba = PackedRgba::rgb(209, 213, 219);
}

/// Accent colors.
pub mod accent {
    use super::*;

    /// Active nav entry (`blue-400`).
    pub const ACTIVE: PackedRgba = PackedRgba::rgb(96, 165, 250);
    pub const BRAND: PackedRgba = PackedRgba::rgb(96, 165, 250);
    pub const HEADING: PackedRgba = PackedRgba::rgb(192, 132, 252);
    pub const RULE: PackedRgba = PackedRgba::rgb(51, 65, 85);
    pub const FIGURE: PackedRgba = PackedRgba::rgb(71, 85, 105);
}

/// Terminal color for a palette token such as `"purple-600"`.
///
/// Unknown tokens fall back to [`accent::ACTIVE`].
#[must_use]
pub fn token_color(token: &str) -> PackedRgba {
    match token {
        "blue-400" => PackedRgba::rgb(96, 165, 250),
        "blue-500" => PackedRgba::rgb(59, 130, 246),
        "purple-500" => PackedRgba::rgb(168, 85, 247),
        "purple-600" => PackedRgba::rgb(147, 51, 234),
        "pink-500" => PackedRgba::rgb(236, 72, 153),
        "pink-600" => PackedRgba::rgb(219, 39, 119),
        "red-500" => PackedRgba::rgb(239, 68, 68),
        "red-600" => PackedRgba::rgb(220, 38, 38),
        "orange-500" => PackedRgba::rgb(249, 115, 22),
        "orange-600" => PackedRgba::rgb(234, 88, 12),
        "yellow-600" => PackedRgba::rgb(202, 138, 4),
        "gray-300" => fg::NAV,
        _ => accent::ACTIVE,
    }
}

/// Midpoint of a gradient, used where only one color fits.
#[must_use]
pub fn gradient_mid(gradient: &Gradient) -> PackedRgba {
    token_color(gradient.from).lerp(token_color(gradient.to), 0.5)
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

#[must_use]
pub fn page() -> Style {
    Style::new().fg(fg::SECONDARY).bg(bg::PAGE)
}

#[must_use]
pub fn heading() -> Style {
    Style::new().fg(fg::PRIMARY).bold()
}

#[must_use]
pub fn heading_accent() -> Style {
    Style::new().fg(accent::HEADING).bold()
}

#[must_use]
pub fn muted() -> Style {
    Style::new().fg(fg::MUTED)
}

#[must_use]
pub fn badge() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::BADGE)
}

#[must_use]
pub fn button() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::BUTTON).bold()
}

#[must_use]
pub fn nav_bar() -> Style {
    Style::new().fg(fg::NAV).bg(bg::NAV)
}

/// Nav entry style: `blue-400` when active, `gray-300` otherwise.
#[must_use]
pub fn nav_entry(active: bool) -> Style {
    if active {
        Style::new().fg(accent::ACTIVE).bold()
    } else {
        Style::new().fg(fg::NAV)
    }
}

#[must_use]
pub fn card_fill() -> Style {
    Style::new().bg(bg::CARD)
}
