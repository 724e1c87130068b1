#![forbid(unsafe_code)]

//! Static HTML render tree.
//!
//! Produces the complete page as a single document: a fixed nav with one
//! `<button data-section>` per section, the hero with its section cards,
//! one `<section id>` per registered section, and the footer. The nav entry
//! class depends only on the active id in the snapshot. Scrolling is left to
//! the browser (`scroll-behavior: smooth` plus `scroll-margin-top` so a
//! section lands below the fixed nav).

use mlshare_core::registry::SectionRegistry;
use mlshare_core::section::SectionDescriptor;

use crate::content::{BodyLine, CardSpec, ContentBlock, Deck, SectionContent};
use crate::state::PageState;

const ACTIVE_CLASS: &str = "text-blue-400";
const INACTIVE_CLASS: &str = "text-gray-300";

fn html_escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Class of a nav entry.
#[must_use]
pub fn nav_class(active: bool) -> &'static str {
    if active { ACTIVE_CLASS } else { INACTIVE_CLASS }
}

/// Render the whole page.
#[must_use]
pub fn render_html(deck: &Deck, registry: &SectionRegistry, state: &PageState<'_>) -> String {
    let mut html = String::new();

    html.push_str(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    html.push_str(&format!("  <title>{}</title>\n", html_escape(deck.brand)));
    html.push_str(
        "  <style>\n    html { scroll-behavior: smooth; }\n    body { margin: 0; font-family: ui-sans-serif, -apple-system, Segoe UI, Roboto, Arial, sans-serif; background: #0f172a; color: #cbd5e1; }\n    nav { position: fixed; top: 0; left: 0; right: 0; display: flex; gap: 8px; align-items: center; padding: 12px 24px; background: #020617e6; z-index: 10; }\n    nav .brand { font-weight: 700; color: #60a5fa; margin-right: auto; }\n    nav button { background: none; border: 0; cursor: pointer; font: inherit; }\n    .text-blue-400 { color: #60a5fa; }\n    .text-gray-300 { color: #d1d5db; }\n    section { scroll-margin-top: 64px; padding: 48px 24px; }\n    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 16px; }\n    .card { border: 1px solid #334155; border-radius: 10px; padding: 16px; background: #1e293b; }\n    .badge { display: inline-block; border-radius: 999px; padding: 2px 10px; background: #1e3a8a; color: #f8fafc; }\n    figure { margin: 0; }\n    figure img { width: 100%; border-radius: 8px; }\n  </style>\n</head>\n<body>\n",
    );

    html.push_str(&format!(
        "<nav>\n<span class=\"brand\">{}</span>\n",
        html_escape(deck.brand)
    ));
    for section in registry {
        html.push_str(&format!(
            "<button class=\"{}\" data-section=\"{}\">{}</button>\n",
            nav_class(state.is_active(section.id.as_str())),
            html_escape(section.id.as_str()),
            html_escape(&section.title)
        ));
    }
    html.push_str("</nav>\n");

    render_hero(&mut html, deck, registry);
    for (pos, section) in registry.iter().enumerate() {
        render_section(&mut html, pos, section, deck.section(section.id.as_str()), state);
    }

    let footer = &deck.footer;
    html.push_str(&format!(
        "<footer>\n<h2>{}</h2>\n<p>{}</p>\n<p>{}</p>\n<p>{}</p>\n</footer>\n",
        html_escape(footer.heading),
        html_escape(footer.body),
        html_escape(footer.tagline),
        html_escape(footer.closing)
    ));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_hero(html: &mut String, deck: &Deck, registry: &SectionRegistry) {
    let hero = &deck.hero;
    html.push_str(&format!(
        "<header>\n<span class=\"badge\">{}</span>\n<h1>{} <span class=\"accent\">{}</span></h1>\n<p>{}</p>\n<div class=\"grid\">\n",
        html_escape(hero.badge),
        html_escape(hero.heading),
        html_escape(hero.heading_accent),
        html_escape(hero.lead)
    ));
    for section in registry {
        let meta = section.display_meta;
        html.push_str(&format!(
            "<button class=\"card bg-gradient-to-r {}\" data-section=\"{}\" data-icon=\"{}\"><h3>{}</h3><p>{}</p></button>\n",
            html_escape(&meta.gradient.class()),
            html_escape(section.id.as_str()),
            meta.icon.name(),
            html_escape(&section.title),
            html_escape(&section.description)
        ));
    }
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<button class=\"cta\" data-section=\"{}\">{}</button>\n</header>\n",
        html_escape(registry.first().id.as_str()),
        html_escape(hero.cta)
    ));
}

fn render_section(
    html: &mut String,
    pos: usize,
    section: &SectionDescriptor,
    content: Option<&SectionContent>,
    state: &PageState<'_>,
) {
    html.push_str(&format!(
        "<section id=\"{}\">\n",
        html_escape(section.id.as_str())
    ));
    match content {
        Some(content) => {
            html.push_str(&format!(
                "<span class=\"badge\">{}</span>\n<h2>{}</h2>\n<p>{}</p>\n",
                html_escape(content.badge),
                html_escape(content.heading),
                html_escape(content.lead)
            ));
            for block in content.blocks {
                render_block(html, pos, block, state);
            }
        }
        None => {
            html.push_str(&format!(
                "<h2>{}</h2>\n<p>{}</p>\n",
                html_escape(&section.title),
                html_escape(&section.description)
            ));
        }
    }
    html.push_str("</section>\n");
}

fn render_block(html: &mut String, pos: usize, block: &ContentBlock, state: &PageState<'_>) {
    match block {
        ContentBlock::Figure(asset) => {
            html.push_str(&format!(
                "<figure><img src=\"{}\" alt=\"{}\" data-asset=\"{}\"></figure>\n",
                html_escape(&asset.path()),
                html_escape(asset.alt()),
                asset.name()
            ));
        }
        ContentBlock::Card(card) => render_card(html, card),
        ContentBlock::Row(inner) => {
            html.push_str("<div class=\"grid\">\n");
            for block in *inner {
                render_block(html, pos, block, state);
            }
            html.push_str("</div>\n");
        }
        ContentBlock::Tabs(tabs) => {
            let active = state.tab(pos).min(tabs.len().saturating_sub(1));
            html.push_str("<div class=\"tabs\" role=\"tablist\">\n");
            for (i, tab) in tabs.iter().enumerate() {
                html.push_str(&format!(
                    "<button role=\"tab\" data-tab=\"{}\" aria-selected=\"{}\" data-section-index=\"{pos}\" data-tab-index=\"{i}\">{}</button>\n",
                    html_escape(tab.key),
                    i == active,
                    html_escape(tab.label)
                ));
            }
            html.push_str("</div>\n");
            for (i, tab) in tabs.iter().enumerate() {
                let hidden = if i == active { "" } else { " hidden" };
                html.push_str(&format!(
                    "<div class=\"grid\" data-section-index=\"{pos}\" data-tab-index=\"{i}\" role=\"tabpanel\" data-tab=\"{}\"{hidden}>\n",
                    html_escape(tab.key)
                ));
                for card in tab.cards {
                    render_card(html, card);
                }
                html.push_str("</div>\n");
            }
        }
    }
}

fn render_card(html: &mut String, card: &CardSpec) {
    html.push_str("<div class=\"card\">\n");
    match card.icon {
        Some(icon) => html.push_str(&format!(
            "<h3 data-icon=\"{}\">{}</h3>\n",
            icon.name(),
            html_escape(card.title)
        )),
        None => html.push_str(&format!("<h3>{}</h3>\n", html_escape(card.title))),
    }
    if let Some(description) = card.description {
        html.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            html_escape(description)
        ));
    }
    let mut in_list = false;
    for line in card.body {
        let is_item = matches!(
            line,
            BodyLine::Bullet(_) | BodyLine::Term(..) | BodyLine::Step(..)
        );
        if is_item && !in_list {
            html.push_str("<ul>\n");
        } else if !is_item && in_list {
            html.push_str("</ul>\n");
        }
        in_list = is_item;
        match *line {
            BodyLine::Heading(text) => {
                html.push_str(&format!("<h4>{}</h4>\n", html_escape(text)));
            }
            BodyLine::Text(text) => html.push_str(&format!("<p>{}</p>\n", html_escape(text))),
            BodyLine::Bullet(text) => {
                html.push_str(&format!("<li>{}</li>\n", html_escape(text)));
            }
            BodyLine::Term(term, text) => html.push_str(&format!(
                "<li><strong>{}</strong> {}</li>\n",
                html_escape(term),
                html_escape(text)
            )),
            BodyLine::Step(n, term, text) => html.push_str(&format!(
                "<li data-step=\"{n}\"><strong>{}</strong> {}</li>\n",
                html_escape(term),
                html_escape(text)
            )),
            BodyLine::Icon(icon, title, text) => html.push_str(&format!(
                "<div data-icon=\"{}\"><h4>{}</h4><p>{}</p></div>\n",
                icon.name(),
                html_escape(title),
                html_escape(text)
            )),
        }
    }
    if in_list {
        html.push_str("</ul>\n");
    }
    html.push_str("</div>\n");
}
