#![forbid(unsafe_code)]

use mlshare_core::geometry::Rect;
use mlshare_render::frame::Frame;
use mlshare_render::style::Style;
use unicode_width::UnicodeWidthChar;

use crate::block::{Alignment, Block};
use crate::{Measure, Widget, clamp_u16, display_width, draw_text_span};

/// Word-wrap `text` to lines of at most `width` cells.
///
/// Explicit newlines start a new line. Words longer than `width` are broken
/// at the cell boundary. A zero width yields no lines.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let mut line = String::new();
        let mut line_w = 0usize;
        for word in raw.split_whitespace() {
            let word_w = display_width(word);
            let sep = usize::from(line_w > 0);
            if line_w + sep + word_w <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_w += sep + word_w;
                continue;
            }
            if line_w > 0 {
                lines.push(std::mem::take(&mut line));
                line_w = 0;
            }
            if word_w <= width {
                line.push_str(word);
                line_w = word_w;
                continue;
            }
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if line_w + w > width {
                    lines.push(std::mem::take(&mut line));
                    line_w = 0;
                }
                line.push(ch);
                line_w += w;
            }
        }
        lines.push(line);
    }
    lines
}

/// A widget that renders wrapped, aligned text.
#[derive(Debug, Clone, Default)]
pub struct Paragraph<'a> {
    text: &'a str,
    block: Option<Block<'a>>,
    style: Style,
    alignment: Alignment,
}

impl<'a> Paragraph<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn text_width(&self, width: u16) -> u16 {
        let chrome = self.block.as_ref().map_or(0, |b| b.chrome().0);
        width.saturating_sub(chrome)
    }
}

impl Measure for Paragraph<'_> {
    fn height(&self, width: u16) -> u16 {
        let lines = wrap_text(self.text, usize::from(self.text_width(width)));
        let chrome = self.block.as_ref().map_or(0, |b| b.chrome().1);
        clamp_u16(lines.len()).saturating_add(chrome)
    }
}

impl Widget for Paragraph<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "widget_render",
            widget = "Paragraph",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        let text_area = match &self.block {
            Some(block) => {
                block.render(area, frame);
                block.inner(area)
            }
            None => area,
        };
        if text_area.is_empty() {
            return;
        }
        let lines = wrap_text(self.text, usize::from(text_area.width));
        for (row, line) in lines.iter().enumerate().take(usize::from(text_area.height)) {
            let x = text_area.x + self.alignment.offset(text_area.width, display_width(line));
            let y = text_area.y + clamp_u16(row);
            draw_text_span(&mut frame.buffer, x, y, line, self.style, text_area.right());
        }
    }
}
