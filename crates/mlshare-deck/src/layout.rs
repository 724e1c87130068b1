#![forbid(unsafe_code)]

//! Vertical page flow.
//!
//! The page is a list of [`FlowItem`]s stacked top to bottom. Each item knows
//! its height for a given width, so the document height is the sum of the
//! item heights and every item's row is known before anything is drawn.
//! Anchors are zero-height items that only record their row.

use mlshare_core::geometry::Rect;
use mlshare_render::frame::{Frame, HitData, HitId, HitRegion};
use mlshare_render::style::Style;
use mlshare_widgets::block::{Alignment, Block, BorderType};
use mlshare_widgets::{Badge, Card, Measure, Paragraph, StatefulWidget, Tabs, TabsState, Widget};

use crate::assets::Asset;
use crate::theme;

/// Gap between grid columns.
const COLUMN_GAP: u16 = 2;

/// Number of grid columns that fit `width`, capped at `max`.
#[must_use]
pub fn columns_for(width: u16, max: u16) -> u16 {
    let fit = match width {
        120.. => 3,
        80.. => 2,
        _ => 1,
    };
    fit.min(max).max(1)
}

/// Framed image placeholder: alt text and bundled path.
#[derive(Debug, Clone, Copy)]
pub struct Figure {
    asset: Asset,
}

impl Figure {
    #[must_use]
    pub fn new(asset: Asset) -> Self {
        Self { asset }
    }
}

impl Measure for Figure {
    fn height(&self, _width: u16) -> u16 {
        7
    }
}

impl Widget for Figure {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(theme::accent::FIGURE))
            .title(self.asset.alt())
            .title_alignment(Alignment::Center);
        block.render(area, frame);
        let inner = block.inner(area);
        if inner.height < 3 {
            return;
        }
        let path = self.asset.path();
        let label = format!("▣ {}", self.asset.name());
        let (_, rest) = inner.split_top(inner.height / 2 - 1);
        let (label_row, rest) = rest.split_top(1);
        let (path_row, _) = rest.split_top(1);
        Paragraph::new(&label)
            .alignment(Alignment::Center)
            .style(theme::heading())
            .render(label_row, frame);
        Paragraph::new(&path)
            .alignment(Alignment::Center)
            .style(theme::muted())
            .render(path_row, frame);
    }
}

/// Centered one-row button.
#[derive(Debug, Clone, Copy)]
pub struct Button<'a> {
    label: &'a str,
    hit: (HitId, HitData),
    focused: bool,
}

impl<'a> Button<'a> {
    #[must_use]
    pub fn new(label: &'a str, id: HitId, data: HitData) -> Self {
        Self {
            label,
            hit: (id, data),
            focused: false,
        }
    }

    /// Draw with the keyboard focus style.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn badge(&self) -> Badge<'a> {
        let style = if self.focused {
            theme::button().reverse()
        } else {
            theme::button()
        };
        Badge::new(self.label).style(style).alignment(Alignment::Center)
    }
}

impl Measure for Button<'_> {
    fn height(&self, _width: u16) -> u16 {
        1
    }
}

impl Widget for Button<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let badge = self.badge();
        badge.render(area, frame);
        let w = badge.width().min(area.width);
        let x = area.x + Alignment::Center.offset(area.width, usize::from(w));
        let (id, data) = self.hit;
        frame.register_hit(Rect::new(x, area.y, w, 1), id, HitRegion::Button, data);
    }
}

/// One block of the page flow.
#[derive(Debug, Clone)]
pub enum FlowItem<'a> {
    /// Blank rows.
    Gap(u16),
    /// Zero-height anchor recording its row under the id.
    Anchor(&'a str),
    Badge(Badge<'a>),
    Text(Paragraph<'a>),
    Card(Card<'a>),
    Figure(Figure),
    Button(Button<'a>),
    Tabs(Tabs<'a>, TabsState),
    /// Horizontal rule.
    Rule(Style),
    /// Items laid out in equal columns, row by row.
    Grid { columns: u16, items: Vec<FlowItem<'a>> },
}

impl FlowItem<'_> {
    fn grid_rows(columns: u16, items: &[FlowItem<'_>], width: u16) -> Vec<(usize, u16)> {
        let cols = Rect::new(0, 0, width, 1).columns(columns.max(1), COLUMN_GAP);
        items
            .chunks(usize::from(columns.max(1)))
            .enumerate()
            .map(|(row, chunk)| {
                let h = chunk
                    .iter()
                    .zip(&cols)
                    .map(|(item, col)| item.height(col.width))
                    .max()
                    .unwrap_or(0);
                (row * usize::from(columns.max(1)), h)
            })
            .collect()
    }
}

impl Measure for FlowItem<'_> {
    fn height(&self, width: u16) -> u16 {
        match self {
            Self::Gap(rows) => *rows,
            Self::Anchor(_) => 0,
            Self::Badge(badge) => badge.height(width),
            Self::Text(text) => text.height(width),
            Self::Card(card) => card.height(width),
            Self::Figure(figure) => figure.height(width),
            Self::Button(button) => button.height(width),
            Self::Tabs(tabs, _) => tabs.height(width),
            Self::Rule(_) => 1,
            Self::Grid { columns, items } => {
                let rows = Self::grid_rows(*columns, items, width);
                let gaps = u16::try_from(rows.len().saturating_sub(1)).unwrap_or(u16::MAX);
                rows.iter()
                    .fold(gaps, |acc, (_, h)| acc.saturating_add(*h))
            }
        }
    }
}

impl FlowItem<'_> {
    /// Draw into `area`, whose height is this item's measured height.
    pub fn render(&self, area: Rect, frame: &mut Frame) {
        match self {
            Self::Gap(_) => {}
            Self::Anchor(id) => frame.set_anchor(*id, area.y),
            Self::Badge(badge) => badge.render(area, frame),
            Self::Text(text) => text.render(area, frame),
            Self::Card(card) => card.render(area, frame),
            Self::Figure(figure) => figure.render(area, frame),
            Self::Button(button) => button.render(area, frame),
            Self::Tabs(tabs, state) => {
                let mut state = *state;
                tabs.render(area, frame, &mut state);
            }
            Self::Rule(style) => {
                let rule = "─".repeat(usize::from(area.width));
                Paragraph::new(&rule).style(*style).render(area, frame);
            }
            Self::Grid { columns, items } => {
                let cols = area.columns((*columns).max(1), COLUMN_GAP);
                let mut y = area.y;
                for (start, h) in Self::grid_rows(*columns, items, area.width) {
                    let chunk = items.iter().skip(start).take(cols.len());
                    for (item, col) in chunk.zip(&cols) {
                        item.render(Rect::new(col.x, y, col.width, h), frame);
                    }
                    y = y.saturating_add(h).saturating_add(1);
                }
            }
        }
    }
}

/// Stack `items` from row `top` inside columns `area.x .. area.right()`.
///
/// Returns the row after the last item.
pub fn render_flow(items: &[FlowItem<'_>], area: Rect, top: u16, frame: &mut Frame) -> u16 {
    let mut y = top;
    for item in items {
        let h = item.height(area.width);
        item.render(Rect::new(area.x, y, area.width, h), frame);
        y = y.saturating_add(h);
    }
    y
}

/// Total height of `items` at `width`.
#[must_use]
pub fn flow_height(items: &[FlowItem<'_>], width: u16) -> u16 {
    items
        .iter()
        .fold(0u16, |acc, item| acc.saturating_add(item.height(width)))
}
