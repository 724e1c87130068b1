#![forbid(unsafe_code)]

//! Top navigation bar.
//!
//! Brand on the left, one button per entry, and a progress rule underneath.
//! Entries that do not fit on the brand row wrap onto further rows, so the
//! bar's height depends on the width. Each entry registers a
//! [`HitRegion::Button`] whose data is the entry index.

use mlshare_core::geometry::Rect;
use mlshare_render::frame::{Frame, HitData, HitId, HitRegion};
use mlshare_render::style::Style;

use crate::{Measure, Widget, clamp_u16, display_width, draw_text_span};

/// One nav entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry<'a> {
    pub label: &'a str,
    /// Rendered with the active style.
    pub active: bool,
    /// Rendered with the focus style on top.
    pub focused: bool,
}

impl<'a> NavEntry<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            active: false,
            focused: false,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Navigation bar widget.
#[derive(Debug, Clone, Default)]
pub struct NavBar<'a> {
    brand: &'a str,
    entries: Vec<NavEntry<'a>>,
    progress: Option<f64>,
    style: Style,
    brand_style: Style,
    entry_style: Style,
    active_style: Style,
    focus_style: Style,
    rule_style: Style,
    progress_style: Style,
    hit_id: Option<HitId>,
}

const GAP: u16 = 1;

impl<'a> NavBar<'a> {
    pub fn new(brand: &'a str) -> Self {
        Self {
            brand,
            ..Self::default()
        }
    }

    pub fn entries(mut self, entries: impl IntoIterator<Item = NavEntry<'a>>) -> Self {
        self.entries = entries.into_iter().collect();
        self
    }

    /// Fraction of the page scrolled, shown on the bottom rule.
    pub fn progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress.clamp(0.0, 1.0));
        self
    }

    /// Background for the whole bar.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn brand_style(mut self, style: Style) -> Self {
        self.brand_style = style;
        self
    }

    pub fn entry_style(mut self, style: Style) -> Self {
        self.entry_style = style;
        self
    }

    pub fn active_style(mut self, style: Style) -> Self {
        self.active_style = style;
        self
    }

    pub fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = style;
        self
    }

    pub fn rule_style(mut self, style: Style) -> Self {
        self.rule_style = style;
        self
    }

    pub fn progress_style(mut self, style: Style) -> Self {
        self.progress_style = style;
        self
    }

    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    fn brand_width(&self) -> u16 {
        clamp_u16(display_width(self.brand)).saturating_add(2)
    }

    /// Entry rectangles in order. Row 0 starts after the brand.
    #[must_use]
    pub fn layout(&self, area: Rect) -> Vec<Rect> {
        let mut out = Vec::with_capacity(self.entries.len());
        if area.is_empty() {
            return out;
        }
        let mut x = area.x.saturating_add(self.brand_width());
        let mut y = area.y;
        for entry in &self.entries {
            let w = clamp_u16(display_width(entry.label))
                .saturating_add(2)
                .min(area.width);
            if x.saturating_add(w) > area.right() && x > area.x {
                x = area.x;
                y = y.saturating_add(1);
            }
            out.push(Rect::new(x, y, w, 1));
            x = x.saturating_add(w).saturating_add(GAP);
        }
        out
    }
}

impl Measure for NavBar<'_> {
    fn height(&self, width: u16) -> u16 {
        let rows = self
            .layout(Rect::new(0, 0, width, u16::MAX))
            .last()
            .map_or(1, |r| r.y + 1);
        rows + 1
    }
}

impl Widget for NavBar<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("widget_render", widget = "NavBar").entered();

        if area.is_empty() {
            return;
        }
        let mut fill = mlshare_render::cell::Cell::from_char(' ');
        self.style.apply(&mut fill);
        frame.buffer.fill(area, fill);

        draw_text_span(
            &mut frame.buffer,
            area.x,
            area.y,
            &format!(" {} ", self.brand),
            self.style.patch(self.brand_style),
            area.right(),
        );

        let rects = self.layout(area);
        for (idx, (entry, rect)) in self.entries.iter().zip(&rects).enumerate() {
            if rect.y >= area.bottom() {
                break;
            }
            let mut style = self.style.patch(self.entry_style);
            if entry.active {
                style = style.patch(self.active_style);
            }
            if entry.focused {
                style = style.patch(self.focus_style);
            }
            let text = format!(" {} ", entry.label);
            draw_text_span(&mut frame.buffer, rect.x, rect.y, &text, style, rect.right());
            if let Some(id) = self.hit_id {
                frame.register_hit(*rect, id, HitRegion::Button, idx as HitData);
            }
        }

        let rule_y = area.bottom() - 1;
        let filled = self.progress.map_or(0, |p| {
            (f64::from(area.width) * p).round().clamp(0.0, f64::from(area.width)) as u16
        });
        for x in area.x..area.right() {
            let (ch, style) = if x - area.x < filled {
                ('━', self.style.patch(self.progress_style))
            } else {
                ('─', self.style.patch(self.rule_style))
            };
            draw_text_span(
                &mut frame.buffer,
                x,
                rule_y,
                ch.encode_utf8(&mut [0; 4]),
                style,
                x + 1,
            );
        }
    }
}
