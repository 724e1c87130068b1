#![forbid(unsafe_code)]

//! Bordered content card.
//!
//! A card is a rounded box holding a title row (with an optional icon glyph),
//! an optional description, and a body of headings, paragraphs and bullets.
//! Every body line wraps to the card width, so [`Measure::height`] depends on
//! the width it is given.

use mlshare_core::geometry::{Rect, Sides};
use mlshare_render::frame::{Frame, HitData, HitId, HitRegion};
use mlshare_render::style::Style;

use crate::block::{Block, BorderType};
use crate::paragraph::wrap_text;
use crate::{Measure, Widget, clamp_u16, display_width, draw_text_span};

/// One logical line of card body content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLine<'a> {
    /// Bold sub-heading.
    Heading(&'a str),
    /// Wrapped paragraph.
    Text(&'a str),
    /// Bulleted item; continuation lines are indented.
    Bullet(&'a str),
    /// Bulleted `term text` pair.
    Term(&'a str, &'a str),
    /// Numbered `n. term text` step.
    Step(u8, &'a str, &'a str),
    /// Bold heading led by an icon glyph.
    IconHeading(char, &'a str),
    /// Empty spacer row.
    Blank,
}

const BULLET: &str = "• ";

/// Wrap `text` behind `prefix`, indenting continuation rows to match.
fn hanging(out: &mut Vec<(String, Style)>, prefix: &str, text: &str, width: usize, style: Style) {
    let indent = display_width(prefix);
    let pad = " ".repeat(indent);
    for (i, line) in wrap_text(text, width.saturating_sub(indent))
        .into_iter()
        .enumerate()
    {
        let lead = if i == 0 { prefix } else { pad.as_str() };
        out.push((format!("{lead}{line}"), style));
    }
}

/// Bordered card widget.
#[derive(Debug, Clone, Default)]
pub struct Card<'a> {
    icon: Option<char>,
    title: &'a str,
    description: Option<&'a str>,
    body: Vec<CardLine<'a>>,
    border_style: Style,
    title_style: Style,
    text_style: Style,
    muted_style: Style,
    fill: Style,
    hit: Option<(HitId, HitData)>,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }

    pub fn icon(mut self, glyph: char) -> Self {
        self.icon = Some(glyph);
        self
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn body(mut self, body: impl IntoIterator<Item = CardLine<'a>>) -> Self {
        self.body.extend(body);
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    pub fn muted_style(mut self, style: Style) -> Self {
        self.muted_style = style;
        self
    }

    /// Background for the whole card.
    pub fn fill(mut self, style: Style) -> Self {
        self.fill = style;
        self
    }

    /// Make the whole card a button.
    pub fn hit(mut self, id: HitId, data: HitData) -> Self {
        self.hit = Some((id, data));
        self
    }

    fn block(&self) -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.border_style)
            .style(self.fill)
            .padding(Sides::symmetric(0, 1))
    }

    fn title_text(&self) -> String {
        match self.icon {
            Some(glyph) => format!("{glyph} {}", self.title),
            None => self.title.to_string(),
        }
    }

    /// Wrapped rows with their styles, for an inner width of `width`.
    fn rows(&self, width: usize) -> Vec<(String, Style)> {
        let mut out = Vec::new();
        let title_style = self.text_style.patch(self.title_style).bold();
        for line in wrap_text(&self.title_text(), width) {
            out.push((line, title_style));
        }
        if let Some(desc) = self.description {
            for line in wrap_text(desc, width) {
                out.push((line, self.muted_style));
            }
        }
        if !self.body.is_empty() {
            out.push((String::new(), self.text_style));
        }
        for item in &self.body {
            match *item {
                CardLine::Heading(text) => {
                    let style = self.text_style.patch(self.title_style).bold();
                    out.extend(wrap_text(text, width).into_iter().map(|l| (l, style)));
                }
                CardLine::Text(text) => {
                    out.extend(
                        wrap_text(text, width)
                            .into_iter()
                            .map(|l| (l, self.text_style)),
                    );
                }
                CardLine::Bullet(text) => {
                    hanging(&mut out, BULLET, text, width, self.text_style);
                }
                CardLine::Term(term, text) => {
                    hanging(&mut out, BULLET, &format!("{term} {text}"), width, self.text_style);
                }
                CardLine::Step(n, term, text) => {
                    let prefix = format!("{n}. ");
                    hanging(&mut out, &prefix, &format!("{term} {text}"), width, self.text_style);
                }
                CardLine::IconHeading(glyph, text) => {
                    let style = self.text_style.patch(self.title_style).bold();
                    out.extend(
                        wrap_text(&format!("{glyph} {text}"), width)
                            .into_iter()
                            .map(|l| (l, style)),
                    );
                }
                CardLine::Blank => out.push((String::new(), self.text_style)),
            }
        }
        out
    }
}

impl Measure for Card<'_> {
    fn height(&self, width: u16) -> u16 {
        let block = self.block();
        let (h, v) = block.chrome();
        let inner = usize::from(width.saturating_sub(h));
        clamp_u16(self.rows(inner).len()).saturating_add(v)
    }
}

impl Widget for Card<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("widget_render", widget = "Card", title = self.title)
            .entered();

        if area.is_empty() {
            return;
        }
        let block = self.block();
        block.render(area, frame);
        let inner = block.inner(area);
        for (i, (line, style)) in self
            .rows(usize::from(inner.width))
            .iter()
            .enumerate()
            .take(usize::from(inner.height))
        {
            let y = inner.y + clamp_u16(i);
            draw_text_span(&mut frame.buffer, inner.x, y, line, *style, inner.right());
        }
        if let Some((id, data)) = self.hit {
            frame.register_hit(area, id, HitRegion::Button, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{frame, rows};
    use pretty_assertions::assert_eq;

    fn sample() -> Card<'static> {
        Card::new("Title").icon('◉').description("short desc").body([
            CardLine::Heading("Head"),
            CardLine::Bullet("alpha beta gamma"),
        ])
    }

    #[test]
    fn height_tracks_wrapping() {
        // inner width 18: title, desc, blank, heading, one bullet row
        assert_eq!(sample().height(22), 2 + 5);
        // inner width 8: description takes two rows, bullet three
        assert_eq!(sample().height(12), 2 + 8);
    }

    #[test]
    fn renders_rows_inside_border() {
        let card = sample();
        let h = card.height(22);
        let mut f = frame(22, h);
        card.render(Rect::new(0, 0, 22, h), &mut f);
        assert_eq!(
            rows(&f),
            vec![
                "╭────────────────────╮".to_string(),
                "│ ◉ Title            │".to_string(),
                "│ short desc         │".to_string(),
                "│                    │".to_string(),
                "│ Head               │".to_string(),
                "│ • alpha beta gamma │".to_string(),
                "╰────────────────────╯".to_string(),
            ]
        );
    }

    #[test]
    fn bullet_continuation_is_indented() {
        let card = Card::new("T").body([CardLine::Bullet("aaa bbb")]);
        let mut f = frame(9, 6);
        card.render(Rect::new(0, 0, 9, 6), &mut f);
        let text = rows(&f);
        assert_eq!(text[3], "│ • aaa │");
        assert_eq!(text[4], "│   bbb │");
    }

    #[test]
    fn steps_and_terms_hang_under_their_prefix() {
        let card = Card::new("T").body([
            CardLine::Step(1, "Go:", "far away"),
            CardLine::Term("A:", "b"),
        ]);
        // inner width 10
        let text = {
            let h = card.height(14);
            let mut f = frame(14, h);
            card.render(Rect::new(0, 0, 14, h), &mut f);
            rows(&f)
        };
        assert_eq!(text[3], "│ 1. Go: far │");
        assert_eq!(text[4], "│    away    │");
        assert_eq!(text[5], "│ • A: b     │");
    }

    #[test]
    fn icon_heading_is_bold() {
        let card = Card::new("T").body([CardLine::IconHeading('✦', "Reason")]);
        let mut f = frame(14, 5);
        card.render(Rect::new(0, 0, 14, 5), &mut f);
        assert_eq!(rows(&f)[3], "│ ✦ Reason   │");
        assert!(
            f.buffer
                .get(2, 3)
                .is_some_and(|c| c.flags.contains(mlshare_render::cell::StyleFlags::BOLD))
        );
    }

    #[test]
    fn hit_covers_whole_card() {
        let card = Card::new("T").hit(HitId::new(2), 3);
        let mut f = frame(10, 3);
        card.render(Rect::new(0, 0, 10, 3), &mut f);
        assert_eq!(f.hit_test(0, 0), Some((HitId::new(2), HitRegion::Button, 3)));
        assert_eq!(f.hit_test(9, 2), Some((HitId::new(2), HitRegion::Button, 3)));
    }
}
