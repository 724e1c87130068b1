#![forbid(unsafe_code)]

//! Tabs widget.
//!
//! A one-row tab bar. Each label registers its own hit cell with
//! [`HitRegion::Tab`]; the hit data is `base | index`, where `base` is chosen
//! by the owner so several tab bars on one page stay distinguishable.

use mlshare_core::event::{KeyCode, KeyEvent};
use mlshare_core::geometry::Rect;
use mlshare_render::frame::{Frame, HitData, HitId, HitRegion};
use mlshare_render::style::Style;

use crate::{Measure, StatefulWidget, clamp_u16, display_width, draw_text_span};

/// Which label of a [`Tabs`] strip is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabsState {
    /// Active tab index.
    pub active: usize,
}

impl TabsState {
    /// Select a specific tab index. Returns whether the selection changed.
    pub fn select(&mut self, index: usize, tab_count: usize) -> bool {
        if tab_count == 0 {
            self.active = 0;
            return false;
        }
        let next = index.min(tab_count - 1);
        if self.active == next {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tabs.switch", from = self.active, to = next);
        self.active = next;
        true
    }

    /// Select the next label, stopping at the last.
    pub fn next(&mut self, tab_count: usize) -> bool {
        self.select(self.active.saturating_add(1), tab_count)
    }

    /// Select the previous label, stopping at the first.
    pub fn previous(&mut self, tab_count: usize) -> bool {
        if tab_count == 0 {
            return false;
        }
        self.select(self.active.saturating_sub(1), tab_count)
    }

    /// Handle keyboard tab switching (`Left` / `Right`).
    pub fn handle_key(&mut self, key: &KeyEvent, tab_count: usize) -> bool {
        match key.code {
            KeyCode::Left => self.previous(tab_count),
            KeyCode::Right => self.next(tab_count),
            _ => false,
        }
    }
}

/// Tabs widget.
#[derive(Debug, Clone, Default)]
pub struct Tabs<'a> {
    titles: Vec<&'a str>,
    style: Style,
    active_style: Style,
    separator: &'a str,
    hit_id: Option<HitId>,
    hit_base: HitData,
}

impl<'a> Tabs<'a> {
    /// Create tabs from titles.
    #[must_use]
    pub fn new(titles: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            titles: titles.into_iter().collect(),
            separator: " ",
            ..Self::default()
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn active_style(mut self, style: Style) -> Self {
        self.active_style = style;
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    /// Register one hit cell per label under `id`, data `base | index`.
    #[must_use]
    pub fn hit_id(mut self, id: HitId, base: HitData) -> Self {
        self.hit_id = Some(id);
        self.hit_base = base;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    fn label(title: &str, active: bool) -> String {
        if active {
            format!("[{title}]")
        } else {
            format!(" {title} ")
        }
    }

    /// Label rectangles in render order, clipped to `area`'s first row.
    #[must_use]
    pub fn layout(&self, area: Rect, active: usize) -> Vec<Rect> {
        let sep_w = clamp_u16(display_width(self.separator));
        let mut x = area.x;
        let mut out = Vec::with_capacity(self.titles.len());
        for (idx, title) in self.titles.iter().enumerate() {
            if x >= area.right() {
                break;
            }
            let w = clamp_u16(display_width(&Self::label(title, idx == active)));
            let w = w.min(area.right() - x);
            out.push(Rect::new(x, area.y, w, 1));
            x = x.saturating_add(w).saturating_add(sep_w);
        }
        out
    }
}

impl Measure for Tabs<'_> {
    fn height(&self, _width: u16) -> u16 {
        u16::from(!self.titles.is_empty())
    }
}

impl StatefulWidget for Tabs<'_> {
    type State = TabsState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut TabsState) {
        if area.is_empty() || self.titles.is_empty() {
            return;
        }
        state.active = state.active.min(self.titles.len() - 1);
        let rects = self.layout(area, state.active);
        for (idx, rect) in rects.iter().enumerate() {
            let active = idx == state.active;
            let style = if active {
                self.style.patch(self.active_style)
            } else {
                self.style
            };
            let label = Self::label(self.titles[idx], active);
            draw_text_span(&mut frame.buffer, rect.x, rect.y, &label, style, rect.right());
            if idx + 1 < rects.len() {
                draw_text_span(
                    &mut frame.buffer,
                    rect.right(),
                    rect.y,
                    self.separator,
                    self.style,
                    area.right(),
                );
            }
            if let Some(id) = self.hit_id {
                frame.register_hit(*rect, id, HitRegion::Tab, self.hit_base | idx as HitData);
            }
        }
    }
}
