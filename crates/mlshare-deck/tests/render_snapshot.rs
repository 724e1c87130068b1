#![forbid(unsafe_code)]

//! Render tree checks over whole frames.
//!
//! Frames are rendered through the step runner on a viewport that never
//! scrolls, so the only thing that changes between two frames is the state
//! passed down to the view.

use mlshare_deck::app::{DeckModel, Msg};
use mlshare_deck::content::DECK;
use mlshare_deck::markup::render_html;
use mlshare_deck::state::PageState;
use mlshare_core::section::SectionId;
use mlshare_runtime::step::StepProgram;
use mlshare_runtime::viewport::{NullViewport, ScrollBehavior};
use pretty_assertions::assert_eq;

fn program(width: u16, height: u16) -> StepProgram<DeckModel, NullViewport> {
    let model = DeckModel::new(ScrollBehavior::Instant).unwrap();
    let mut program = StepProgram::new(model, NullViewport, width, height);
    program.init();
    program
}

#[test]
fn same_state_renders_identical_frames() {
    let first = program(100, 30);
    let second = program(100, 30);
    assert_eq!(first.frame().buffer, second.frame().buffer);
    assert_eq!(first.frame().anchors(), second.frame().anchors());
}

#[test]
fn activation_only_restyles_the_nav_band() {
    let mut program = program(120, 40);
    let before = program.frame().buffer.clone();
    let nav_height = program.frame().sticky().unwrap().height;

    program.send(Msg::Activate("practice".into()));
    program.step();
    let runs = program.frame().buffer.diff(&before);
    assert!(!runs.is_empty());
    assert!(runs.iter().all(|run| run.y < nav_height));
}

#[test]
fn document_lists_every_section_in_registry_order() {
    let program = program(100, 30);
    let first = usize::from(program.frame().anchor("foundations").unwrap());
    let text = program.frame().buffer.to_text()[first..].join("\n");
    let mut last = 0;
    for content in DECK.sections {
        let at = text[last..]
            .find(content.heading)
            .map(|i| i + last)
            .unwrap_or_else(|| panic!("{} missing or out of order", content.id));
        last = at + content.heading.len();
    }
    assert!(text[last..].contains(DECK.footer.heading));
}

#[test]
fn anchors_follow_document_order() {
    let program = program(80, 24);
    let rows: Vec<u16> = DECK
        .nav
        .iter()
        .map(|nav| program.frame().anchor(nav.id).unwrap())
        .collect();
    assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(rows[0] > program.frame().sticky().unwrap().height);
}

#[test]
fn resize_rerenders_at_new_width() {
    let mut program = program(100, 30);
    program.resize(64, 20);
    let result = program.step();
    assert!(result.rendered);
    assert_eq!(program.frame().width(), 64);
    assert_eq!(program.window_text().len(), 20);
}

#[test]
fn html_export_matches_frame_sections() {
    let registry = DECK.registry().unwrap();
    let active = SectionId::from("future");
    let html = render_html(&DECK, &registry, &PageState::new(&active));
    let program = program(100, 30);
    assert_eq!(
        html.matches("<section id=").count(),
        program.frame().anchors().len()
    );
    assert!(html.contains("<button class=\"text-blue-400\" data-section=\"future\">"));
}
