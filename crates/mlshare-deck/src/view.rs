#![forbid(unsafe_code)]

//! Terminal render tree.
//!
//! The page renders into a document frame taller than the window: sticky nav
//! bar, hero, one block per registered section (each behind an anchor named
//! by its id), footer. Nav entries, hero cards, the call-to-action and tab
//! labels register hit regions; the model maps those back to messages in
//! `on_hit`.
//!
//! Highlights depend only on the [`PageState`] snapshot.

use mlshare_core::geometry::Rect;
use mlshare_core::registry::SectionRegistry;
use mlshare_core::section::SectionDescriptor;
use mlshare_render::cell::Cell;
use mlshare_render::frame::{Frame, HitData, HitId};
use mlshare_render::style::Style;
use mlshare_widgets::block::Alignment;
use mlshare_widgets::card::CardLine;
use mlshare_widgets::{Badge, Card, Measure, NavBar, NavEntry, Paragraph, Tabs, TabsState, Widget};

use crate::content::{BodyLine, CardSpec, ContentBlock, Deck, SectionContent};
use crate::layout::{Button, Figure, FlowItem, columns_for, flow_height, render_flow};
use crate::state::{Focus, PageState};
use crate::theme;

/// Nav bar entries; data is the registry position.
pub const NAV_HIT: HitId = HitId::new(1);
/// Hero section cards; data is the registry position.
pub const HERO_CARD_HIT: HitId = HitId::new(2);
/// Hero call-to-action.
pub const CTA_HIT: HitId = HitId::new(3);
/// Tab labels; data is `section << 8 | tab`.
pub const TAB_HIT: HitId = HitId::new(4);

/// Bits of tab hit data holding the tab index.
pub const TAB_BITS: u32 = 8;

/// Pack a section position and tab index into tab hit data.
#[must_use]
pub fn tab_hit_data(section: usize, tab: usize) -> HitData {
    ((section as HitData) << TAB_BITS) | (tab as HitData & 0xff)
}

/// Inverse of [`tab_hit_data`].
#[must_use]
pub fn split_tab_hit(data: HitData) -> (usize, usize) {
    ((data >> TAB_BITS) as usize, (data & 0xff) as usize)
}

/// Renders the page for one state snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    deck: &'a Deck,
    registry: &'a SectionRegistry,
    state: PageState<'a>,
}

impl<'a> PageView<'a> {
    #[must_use]
    pub fn new(deck: &'a Deck, registry: &'a SectionRegistry, state: PageState<'a>) -> Self {
        Self {
            deck,
            registry,
            state,
        }
    }

    fn nav_bar(&self, progress: f64) -> NavBar<'a> {
        let state = self.state;
        NavBar::new(self.deck.brand)
            .entries(self.registry.iter().enumerate().map(|(i, s)| {
                NavEntry::new(s.title.as_str())
                    .active(state.is_active(s.id.as_str()))
                    .focused(state.focus == Some(Focus::Nav(i)))
            }))
            .progress(progress)
            .style(theme::nav_bar())
            .brand_style(Style::new().fg(theme::accent::BRAND).bold())
            .entry_style(theme::nav_entry(false))
            .active_style(theme::nav_entry(true))
            .focus_style(Style::new().reverse())
            .rule_style(Style::new().fg(theme::accent::RULE))
            .progress_style(Style::new().fg(theme::accent::ACTIVE))
            .hit_id(NAV_HIT)
    }

    fn hero(&self, width: u16) -> Vec<FlowItem<'a>> {
        let hero = &self.deck.hero;
        let cards = self
            .registry
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let focused = self.state.focus == Some(Focus::HeroCard(i));
                FlowItem::Card(hero_card(s, i, focused))
            })
            .collect::<Vec<_>>();
        vec![
            FlowItem::Gap(1),
            FlowItem::Badge(
                Badge::new(hero.badge)
                    .style(theme::badge())
                    .alignment(Alignment::Center),
            ),
            FlowItem::Gap(1),
            FlowItem::Text(centered(hero.heading, theme::heading())),
            FlowItem::Text(centered(hero.heading_accent, theme::heading_accent())),
            FlowItem::Gap(1),
            FlowItem::Text(centered(hero.lead, theme::muted())),
            FlowItem::Gap(1),
            FlowItem::Grid {
                columns: columns_for(width, 3),
                items: cards,
            },
            FlowItem::Gap(1),
            FlowItem::Button(
                Button::new(hero.cta, CTA_HIT, 0).focused(self.state.focus == Some(Focus::Cta)),
            ),
            FlowItem::Gap(1),
        ]
    }

    fn section(&self, pos: usize, descriptor: &'a SectionDescriptor, width: u16) -> Vec<FlowItem<'a>> {
        let content = self.deck.section(descriptor.id.as_str());
        let heading = content.map_or(descriptor.title.as_str(), |c| c.heading);
        let lead = content.map_or(descriptor.description.as_str(), |c| c.lead);
        let accent = theme::gradient_mid(&descriptor.display_meta.gradient);
        let mut items = vec![
            FlowItem::Anchor(descriptor.id.as_str()),
            FlowItem::Rule(Style::new().fg(accent)),
            FlowItem::Gap(1),
        ];
        if let Some(content) = content {
            items.push(FlowItem::Badge(
                Badge::new(content.badge)
                    .style(Style::new().fg(theme::fg::PRIMARY).bg(accent))
                    .alignment(Alignment::Center),
            ));
        }
        items.extend([
            FlowItem::Text(centered(heading, theme::heading())),
            FlowItem::Text(centered(lead, theme::muted())),
            FlowItem::Gap(1),
        ]);
        if let Some(content) = content {
            self.blocks(pos, content, width, &mut items);
        }
        items.push(FlowItem::Gap(1));
        items
    }

    fn blocks(&self, pos: usize, content: &'a SectionContent, width: u16, out: &mut Vec<FlowItem<'a>>) {
        for block in content.blocks {
            match block {
                ContentBlock::Tabs(tabs) => {
                    let active = self.state.tab(pos).min(tabs.len().saturating_sub(1));
                    out.push(FlowItem::Tabs(
                        Tabs::new(tabs.iter().map(|t| t.label))
                            .style(theme::muted())
                            .active_style(Style::new().fg(theme::accent::ACTIVE).bold())
                            .hit_id(TAB_HIT, tab_hit_data(pos, 0)),
                        TabsState { active },
                    ));
                    out.push(FlowItem::Gap(1));
                    if let Some(tab) = tabs.get(active) {
                        out.push(FlowItem::Grid {
                            columns: columns_for(width, tab.cards.len() as u16),
                            items: tab.cards.iter().map(|c| FlowItem::Card(card(c))).collect(),
                        });
                    }
                }
                other => out.push(block_item(other, width)),
            }
            out.push(FlowItem::Gap(1));
        }
    }

    fn footer(&self) -> Vec<FlowItem<'a>> {
        let footer = &self.deck.footer;
        vec![
            FlowItem::Rule(Style::new().fg(theme::accent::RULE)),
            FlowItem::Gap(1),
            FlowItem::Text(centered(footer.heading, theme::heading())),
            FlowItem::Text(centered(footer.body, theme::muted())),
            FlowItem::Gap(1),
            FlowItem::Text(centered(footer.tagline, Style::new().fg(theme::fg::SECONDARY))),
            FlowItem::Text(centered(footer.closing, theme::muted())),
            FlowItem::Gap(1),
        ]
    }

    /// Page body below the nav bar, for a content column `width` wide.
    fn body(&self, width: u16) -> Vec<FlowItem<'a>> {
        let mut items = self.hero(width);
        for (pos, descriptor) in self.registry.iter().enumerate() {
            items.extend(self.section(pos, descriptor, width));
        }
        items.extend(self.footer());
        items
    }

    /// Render the whole document into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let width = frame.width();
        let column = content_column(width);
        let body = self.body(column.width);
        let nav_height = self.nav_bar(0.0).height(width);
        let body_height = flow_height(&body, column.width);
        frame.set_document_height(nav_height.saturating_add(body_height));

        let doc = frame.bounds();
        let mut fill = Cell::from_char(' ');
        theme::page().apply(&mut fill);
        frame.buffer.fill(doc, fill);

        render_flow(&body, column, nav_height, frame);

        let scrollable = f64::from(
            frame
                .document_height()
                .saturating_sub(frame.viewport_height()),
        );
        let progress = if scrollable > 0.0 {
            self.state.scroll_offset / scrollable
        } else {
            0.0
        };
        frame.set_sticky(0, nav_height);
        self.nav_bar(progress)
            .render(Rect::new(0, 0, width, nav_height), frame);
        tracing::trace!(
            document_height = frame.document_height(),
            nav_height,
            active = %self.state.active,
            "page rendered"
        );
    }
}

/// Horizontal band holding the page content: 2-cell margins when wide.
fn content_column(width: u16) -> Rect {
    let margin = if width >= 60 { 2 } else { 0 };
    Rect::new(margin, 0, width.saturating_sub(margin * 2), 0)
}

fn centered(text: &str, style: Style) -> Paragraph<'_> {
    Paragraph::new(text).alignment(Alignment::Center).style(style)
}

fn hero_card(section: &SectionDescriptor, pos: usize, focused: bool) -> Card<'_> {
    let meta = section.display_meta;
    let mut border = Style::new().fg(theme::gradient_mid(&meta.gradient));
    if focused {
        border = border.reverse();
    }
    Card::new(section.title.as_str())
        .icon(meta.icon.glyph())
        .description(section.description.as_str())
        .border_style(border)
        .title_style(Style::new().fg(theme::token_color(meta.gradient.from)))
        .text_style(Style::new().fg(theme::fg::SECONDARY))
        .muted_style(theme::muted())
        .fill(theme::card_fill())
        .hit(HERO_CARD_HIT, pos as HitData)
}

fn card(spec: &CardSpec) -> Card<'static> {
    let mut card = Card::new(spec.title)
        .body(spec.body.iter().map(card_line))
        .border_style(Style::new().fg(theme::accent::RULE))
        .title_style(Style::new().fg(theme::fg::PRIMARY))
        .text_style(Style::new().fg(theme::fg::SECONDARY))
        .muted_style(theme::muted())
        .fill(theme::card_fill());
    if let Some(icon) = spec.icon {
        card = card.icon(icon.glyph());
    }
    if let Some(description) = spec.description {
        card = card.description(description);
    }
    card
}

fn card_line(line: &BodyLine) -> CardLine<'static> {
    match *line {
        BodyLine::Heading(text) => CardLine::Heading(text),
        BodyLine::Text(text) => CardLine::Text(text),
        BodyLine::Bullet(text) => CardLine::Bullet(text),
        BodyLine::Term(term, text) => CardLine::Term(term, text),
        BodyLine::Step(n, term, text) => CardLine::Step(n, term, text),
        BodyLine::Icon(icon, title, _) => CardLine::IconHeading(icon.glyph(), title),
    }
}

fn block_item(block: &ContentBlock, width: u16) -> FlowItem<'static> {
    match *block {
        ContentBlock::Figure(asset) => FlowItem::Figure(Figure::new(asset)),
        ContentBlock::Card(ref spec) => FlowItem::Card(card(spec)),
        ContentBlock::Row(inner) => FlowItem::Grid {
            columns: columns_for(width, inner.len() as u16),
            items: inner.iter().map(|b| block_item(b, width)).collect(),
        },
        ContentBlock::Tabs(tabs) => FlowItem::Grid {
            columns: 1,
            items: tabs
                .first()
                .map(|t| t.cards.iter().map(|c| FlowItem::Card(card(c))).collect())
                .unwrap_or_default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DECK;
    use mlshare_core::section::SectionId;
    use mlshare_render::cell::StyleFlags;
    use mlshare_render::frame::HitRegion;
    use pretty_assertions::assert_eq;

    fn render(active: &str, width: u16, height: u16) -> Frame {
        let registry = DECK.registry().unwrap();
        let id = SectionId::from(active);
        let tabs = vec![TabsState::default(); registry.len()];
        let state = PageState {
            tabs: &tabs,
            ..PageState::new(&id)
        };
        let mut frame = Frame::with_hit_grid(width, height);
        PageView::new(&DECK, &registry, state).render(&mut frame);
        frame
    }

    #[test]
    fn every_section_has_an_anchor_in_order() {
        let frame = render("foundations", 100, 30);
        let rows: Vec<u16> = DECK
            .nav
            .iter()
            .map(|n| frame.anchor(n.id).unwrap())
            .collect();
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "{rows:?}");
        assert!(frame.document_height() > 30);
    }

    #[test]
    fn nav_bar_is_sticky_at_top() {
        let frame = render("foundations", 160, 30);
        let band = frame.sticky().unwrap();
        assert_eq!(band.row, 0);
        assert_eq!(band.height, 2);
        assert!(frame.buffer.row_text(0).starts_with(" ML Tech Sharing "));
    }

    #[test]
    fn active_entry_is_highlighted() {
        let frame = render("agents", 160, 30);
        let registry = DECK.registry().unwrap();
        let agents = SectionId::from("agents");
        let nav = PageView::new(&DECK, &registry, PageState::new(&agents)).nav_bar(0.0);
        let rects = nav.layout(Rect::new(0, 0, 160, 2));
        let fg_at = |i: usize| frame.buffer.get(rects[i].x + 1, rects[i].y).map(|c| c.fg);
        assert_eq!(fg_at(3), Some(theme::accent::ACTIVE));
        assert_eq!(fg_at(0), Some(theme::fg::NAV));
    }

    #[test]
    fn unknown_active_id_highlights_nothing() {
        let frame = render("nonexistent", 160, 30);
        let registry = DECK.registry().unwrap();
        let id = SectionId::from("nonexistent");
        let rects = PageView::new(&DECK, &registry, PageState::new(&id))
            .nav_bar(0.0)
            .layout(Rect::new(0, 0, 160, 2));
        for r in rects {
            assert_eq!(frame.buffer.get(r.x + 1, r.y).map(|c| c.fg), Some(theme::fg::NAV));
        }
    }

    #[test]
    fn hero_cards_and_cta_are_clickable() {
        let frame = render("foundations", 100, 30);
        let mut hero_hits = Vec::new();
        let mut cta = false;
        for y in 0..frame.document_height() {
            for x in 0..100 {
                match frame.hit_test(x, y) {
                    Some((id, HitRegion::Button, data)) if id == HERO_CARD_HIT => {
                        if !hero_hits.contains(&data) {
                            hero_hits.push(data);
                        }
                    }
                    Some((id, _, _)) if id == CTA_HIT => cta = true,
                    _ => {}
                }
            }
        }
        assert_eq!(hero_hits, vec![0, 1, 2, 3, 4]);
        assert!(cta);
    }

    #[test]
    fn focused_hero_card_border_is_reversed() {
        let registry = DECK.registry().unwrap();
        let id = SectionId::from("foundations");
        let state = PageState {
            focus: Some(Focus::HeroCard(1)),
            ..PageState::new(&id)
        };
        let mut frame = Frame::with_hit_grid(100, 30);
        PageView::new(&DECK, &registry, state).render(&mut frame);

        let mut corners = Vec::new();
        for y in 0..frame.document_height() {
            for x in 0..100 {
                if let Some((id, HitRegion::Button, data)) = frame.hit_test(x, y) {
                    if id == HERO_CARD_HIT && !corners.iter().any(|&(d, _, _)| d == data) {
                        corners.push((data, x, y));
                    }
                }
            }
        }
        for (data, x, y) in corners {
            let reversed = frame
                .buffer
                .get(x, y)
                .is_some_and(|c| c.flags.contains(StyleFlags::REVERSE));
            assert_eq!(reversed, data == 1, "hero card {data}");
        }
    }

    #[test]
    fn tab_hit_data_round_trips() {
        assert_eq!(split_tab_hit(tab_hit_data(2, 1)), (2, 1));
        assert_eq!(split_tab_hit(tab_hit_data(0, 0)), (0, 0));
    }

    #[test]
    fn selected_tab_changes_visible_cards() {
        let registry = DECK.registry().unwrap();
        let id = SectionId::from("foundations");
        let mut tabs = vec![TabsState::default(); registry.len()];
        let text = |tabs: &[TabsState]| {
            let state = PageState {
                tabs,
                ..PageState::new(&id)
            };
            let mut frame = Frame::new(120, 30);
            PageView::new(&DECK, &registry, state).render(&mut frame);
            frame.buffer.to_text().join("\n")
        };
        let first = text(&tabs);
        assert!(first.contains("Machine Learning"));
        assert!(!first.contains("Forward Propagation"));
        tabs[0].active = 1;
        let second = text(&tabs);
        assert!(second.contains("Forward Propagation"));
    }

    #[test]
    fn narrow_width_still_renders() {
        let frame = render("future", 30, 10);
        assert!(frame.anchor("future").is_some());
        assert!(frame.document_height() > 10);
    }
}
