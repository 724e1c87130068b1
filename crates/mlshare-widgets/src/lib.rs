#![forbid(unsafe_code)]

//! Widgets for the deck page.
//!
//! Widgets render into a [`Frame`] rather than a bare buffer so that clickable
//! pieces (nav entries, hero cards, tab labels) can register hit regions in
//! the same pass that draws them. Every widget that takes part in the page
//! flow also reports [`Measure::height`] for a given width, which is how the
//! page layout stacks blocks without a constraint solver.

pub mod badge;
pub mod block;
pub mod card;
pub mod nav_bar;
pub mod paragraph;
pub mod tabs;

use mlshare_core::geometry::Rect;
use mlshare_render::buffer::Buffer;
use mlshare_render::frame::Frame;
use mlshare_render::style::Style;
use unicode_width::UnicodeWidthStr;

pub use badge::Badge;
pub use block::{Alignment, Block, BorderType, Borders};
pub use card::Card;
pub use nav_bar::{NavBar, NavEntry};
pub use paragraph::{Paragraph, wrap_text};
pub use tabs::{Tabs, TabsState};

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;
    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Widgets that know how tall they are at a given width.
pub trait Measure {
    /// Rows needed to render fully at `width` columns.
    fn height(&self, width: u16) -> u16;
}

/// Display width of `text` in terminal cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Draw a single-line span, clipped at `max_x`. Returns the column after it.
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    buf.set_string(x, y, text, style, max_x)
}

/// Apply a style to every cell of `area`.
pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style == Style::default() {
        return;
    }
    buf.set_style(area, style);
}

/// Saturating `usize` to `u16`.
#[inline]
pub(crate) fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
