#![forbid(unsafe_code)]

use bitflags::bitflags;
use mlshare_core::geometry::{Rect, Sides};
use mlshare_render::cell::Cell;
use mlshare_render::frame::Frame;
use mlshare_render::style::Style;

use crate::{Widget, display_width, draw_text_span, set_style_area};

bitflags! {
    /// Which edges of a [`Block`] carry a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Borders: u8 {
        const NONE = 0;
        const TOP = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
        const ALL = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Plain,
    Rounded,
    Thick,
}

struct BorderSet {
    vertical: char,
    horizontal: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
}

impl BorderType {
    const fn set(self) -> BorderSet {
        match self {
            Self::Plain => BorderSet {
                vertical: '│',
                horizontal: '─',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
            },
            Self::Rounded => BorderSet {
                vertical: '│',
                horizontal: '─',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
            },
            Self::Thick => BorderSet {
                vertical: '┃',
                horizontal: '━',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
            },
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Column where a span of `content` cells starts inside `width` cells.
    #[must_use]
    pub fn offset(self, width: u16, content: usize) -> u16 {
        let content = u16::try_from(content).unwrap_or(u16::MAX).min(width);
        match self {
            Self::Left => 0,
            Self::Center => (width - content) / 2,
            Self::Right => width - content,
        }
    }
}

/// A widget that draws a box with optional borders, title, fill and padding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    borders: Borders,
    border_style: Style,
    border_type: BorderType,
    title: Option<&'a str>,
    title_alignment: Alignment,
    style: Style,
    padding: Sides,
}

impl<'a> Block<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `Block::new().borders(Borders::ALL)`.
    pub fn bordered() -> Self {
        Self::default().borders(Borders::ALL)
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    /// Rows and columns the chrome takes: `(horizontal, vertical)`.
    #[must_use]
    pub fn chrome(&self) -> (u16, u16) {
        let b = |flag| u16::from(self.borders.contains(flag));
        (
            b(Borders::LEFT) + b(Borders::RIGHT) + self.padding.left + self.padding.right,
            b(Borders::TOP) + b(Borders::BOTTOM) + self.padding.top + self.padding.bottom,
        )
    }

    /// Area left for content once borders and padding are taken off.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        let has = |edge| u16::from(self.borders.contains(edge));
        let (left, top) = (has(Borders::LEFT), has(Borders::TOP));
        let width = area.width.saturating_sub(left + has(Borders::RIGHT));
        let height = area.height.saturating_sub(top + has(Borders::BOTTOM));
        Rect::new(
            area.x.saturating_add(left),
            area.y.saturating_add(top),
            width,
            height,
        )
        .inner(self.padding)
    }

    fn edge_cell(&self, glyph: char) -> Cell {
        let mut cell = Cell::from_char(glyph);
        self.style.apply(&mut cell);
        self.border_style.apply(&mut cell);
        cell
    }

    /// Glyph for the perimeter cell at `(x, y)`, if that edge is drawn.
    fn edge_glyph(&self, set: &BorderSet, area: Rect, x: u16, y: u16) -> Option<char> {
        let on = |edge| self.borders.contains(edge);
        let west = x == area.x && on(Borders::LEFT);
        let east = x + 1 == area.right() && on(Borders::RIGHT);
        let north = y == area.y && on(Borders::TOP);
        let south = y + 1 == area.bottom() && on(Borders::BOTTOM);
        match (north, south, west, east) {
            (true, _, true, _) => Some(set.top_left),
            (true, _, _, true) => Some(set.top_right),
            (_, true, true, _) => Some(set.bottom_left),
            (_, true, _, true) => Some(set.bottom_right),
            (true, _, _, _) | (_, true, _, _) => Some(set.horizontal),
            (_, _, true, _) | (_, _, _, true) => Some(set.vertical),
            _ => None,
        }
    }

    fn render_borders(&self, area: Rect, frame: &mut Frame) {
        if self.borders.is_empty() {
            return;
        }
        let set = self.border_type.set();
        for y in area.y..area.bottom() {
            let interior_row = y != area.y && y + 1 != area.bottom();
            let columns: Vec<u16> = if interior_row {
                vec![area.x, area.right() - 1]
            } else {
                (area.x..area.right()).collect()
            };
            for x in columns {
                if let Some(glyph) = self.edge_glyph(&set, area, x, y) {
                    frame.buffer.set(x, y, self.edge_cell(glyph));
                }
            }
        }
    }

    fn render_title(&self, area: Rect, frame: &mut Frame) {
        let Some(title) = self.title else {
            return;
        };
        if !self.borders.contains(Borders::TOP) || area.width < 3 {
            return;
        }
        let available = area.width - 2;
        let x = area.x + 1 + self.title_alignment.offset(available, display_width(title));
        let limit = area.right() - 1;
        draw_text_span(&mut frame.buffer, x, area.y, title, self.border_style.bold(), limit);
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "widget_render",
            widget = "Block",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        if self.style.bg.is_some() {
            let mut fill = Cell::from_char(' ');
            self.style.apply(&mut fill);
            frame.buffer.fill(area, fill);
        } else {
            set_style_area(&mut frame.buffer, area, self.style);
        }
        self.render_borders(area, frame);
        self.render_title(area, frame);
    }
}
