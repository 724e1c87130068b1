#![forbid(unsafe_code)]

use mlshare_core::geometry::Rect;
use mlshare_render::frame::Frame;
use mlshare_render::style::Style;

use crate::block::Alignment;
use crate::{Measure, Widget, clamp_u16, display_width, draw_text_span};

/// Pill label: ` text ` on a filled background.
#[derive(Debug, Clone, Copy, Default)]
pub struct Badge<'a> {
    label: &'a str,
    style: Style,
    alignment: Alignment,
}

impl<'a> Badge<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Cells the badge occupies.
    #[must_use]
    pub fn width(&self) -> u16 {
        clamp_u16(display_width(self.label)).saturating_add(2)
    }
}

impl Measure for Badge<'_> {
    fn height(&self, _width: u16) -> u16 {
        1
    }
}

impl Widget for Badge<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let w = self.width().min(area.width);
        let x = area.x + self.alignment.offset(area.width, usize::from(w));
        let text = format!(" {} ", self.label);
        draw_text_span(&mut frame.buffer, x, area.y, &text, self.style, x + w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{frame, rows};
    use mlshare_render::cell::PackedRgba;

    #[test]
    fn pads_label() {
        let mut f = frame(12, 1);
        let bg = PackedRgba::rgb(30, 64, 175);
        Badge::new("New")
            .style(Style::new().bg(bg))
            .render(Rect::new(1, 0, 12, 1), &mut f);
        assert_eq!(rows(&f)[0], "  New");
        assert_eq!(f.buffer.get(1, 0).map(|c| c.bg), Some(bg));
        assert_eq!(f.buffer.get(5, 0).map(|c| c.bg), Some(bg));
        assert_eq!(f.buffer.get(6, 0).map(|c| c.bg), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn centers() {
        let mut f = frame(11, 1);
        Badge::new("abc")
            .alignment(Alignment::Center)
            .render(Rect::new(0, 0, 11, 1), &mut f);
        assert_eq!(rows(&f)[0], "    abc");
    }
}
