#![forbid(unsafe_code)]

//! End-to-end navigation through the step runner.
//!
//! Each scenario mounts the deck over an in-memory viewport and drives it the
//! way a host would: pushed input events, scroll signals from the viewport,
//! and an explicit clock for smooth scrolls.
//!
//! # Running
//!
//! ```sh
//! cargo test -p mlshare-deck --test navigation_e2e
//! ```

use std::rc::Rc;
use std::time::Duration;

use mlshare_core::event::{Event, KeyCode};
use mlshare_core::registry::SectionRegistry;
use mlshare_deck::app::{DeckModel, Msg};
use mlshare_deck::content::DECK;
use mlshare_deck::view::NAV_HIT;
use mlshare_render::frame::HitRegion;
use mlshare_runtime::step::StepProgram;
use mlshare_runtime::viewport::{NullViewport, ScrollBehavior, ScrollOutcome, Viewport};
use mlshare_runtime::virtual_viewport::{IssuedScroll, VirtualViewport};
use pretty_assertions::assert_eq;

const WIDTH: u16 = 100;
const HEIGHT: u16 = 30;

type DeckProgram = StepProgram<DeckModel, Rc<VirtualViewport>>;

fn mounted(model: DeckModel) -> (DeckProgram, Rc<VirtualViewport>) {
    let viewport = Rc::new(VirtualViewport::new(HEIGHT));
    let mut program = StepProgram::new(model, Rc::clone(&viewport), WIDTH, HEIGHT);
    program.init();
    (program, viewport)
}

fn deck(behavior: ScrollBehavior) -> (DeckProgram, Rc<VirtualViewport>) {
    mounted(DeckModel::new(behavior).unwrap())
}

/// Offset at which `anchor` sits just below the sticky nav.
fn expected_target(viewport: &VirtualViewport, anchor: &str) -> f64 {
    let row = f64::from(viewport.anchor_row(anchor).unwrap());
    let sticky = f64::from(viewport.metrics().sticky_height);
    (row - sticky).clamp(0.0, viewport.max_offset())
}

#[test]
fn first_render_starts_at_first_section_and_top() {
    let (program, viewport) = deck(ScrollBehavior::Smooth);
    assert_eq!(program.model().active(), "foundations");
    assert_eq!(program.model().scroll_offset(), 0.0);
    assert_eq!(viewport.scroll_offset(), 0.0);
    assert!(program.frame_idx() >= 1);
}

#[test]
fn activation_is_visible_before_the_scroll_finishes() {
    let (mut program, viewport) = deck(ScrollBehavior::Smooth);
    let ids: Vec<String> = program
        .model()
        .registry()
        .ids()
        .map(|id| id.as_str().to_owned())
        .collect();
    for id in ids {
        program.send(Msg::Activate(id.as_str().into()));
        assert_eq!(program.model().active(), id.as_str());
        program.advance_time(Duration::from_secs(1));
        program.step();
        assert!(!viewport.is_animating());
    }
    assert_eq!(viewport.scroll_requests().len(), 5);
}

#[test]
fn repeated_activation_keeps_state_and_scrolls_again() {
    let (mut program, viewport) = deck(ScrollBehavior::Instant);
    program.send(Msg::Activate("practice".into()));
    program.step();
    assert_eq!(program.model().active(), "practice");
    program.send(Msg::Activate("practice".into()));
    program.step();
    assert_eq!(program.model().active(), "practice");

    let outcomes = program.scroll_outcomes();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(ScrollOutcome::is_requested));
    assert_eq!(viewport.scroll_offset(), expected_target(&viewport, "practice"));
}

#[test]
fn unknown_section_is_accepted_without_scrolling() {
    let (mut program, viewport) = deck(ScrollBehavior::Smooth);
    program.send(Msg::Activate("nonexistent".into()));
    assert_eq!(program.model().active(), "nonexistent");
    assert_eq!(program.scroll_outcomes(), &[ScrollOutcome::MissingAnchor]);
    assert!(viewport.scroll_requests().is_empty());
    assert_eq!(viewport.missing_anchor_count(), 1);

    let result = program.step();
    assert!(result.running);
    assert!(result.rendered);
    assert_eq!(viewport.scroll_offset(), 0.0);
    assert!(program.window_text()[0].contains("ML Tech Sharing"));
}

#[test]
fn listener_is_held_exactly_while_mounted() {
    let viewport = Rc::new(VirtualViewport::new(HEIGHT));
    let model = DeckModel::new(ScrollBehavior::Smooth).unwrap();
    let mut program = StepProgram::new(model, Rc::clone(&viewport), WIDTH, HEIGHT);
    assert_eq!(viewport.listener_count(), 0);

    program.init();
    assert_eq!(viewport.listener_count(), 1);
    for _ in 0..3 {
        program.push_event(Event::Resize {
            width: WIDTH,
            height: HEIGHT,
        });
        program.step();
    }
    program.init();
    assert_eq!(viewport.listener_count(), 1);

    program.unmount();
    assert_eq!(viewport.listener_count(), 0);
    program.unmount();
    assert_eq!(viewport.listener_count(), 0);
}

#[test]
fn dropping_the_program_releases_the_listener() {
    let (program, viewport) = deck(ScrollBehavior::Smooth);
    assert_eq!(viewport.listener_count(), 1);
    drop(program);
    assert_eq!(viewport.listener_count(), 0);
}

#[test]
fn tracker_keeps_the_latest_of_many_signals() {
    let (mut program, viewport) = deck(ScrollBehavior::Smooth);
    let offsets = [3.0, 7.0, 1.0, 12.0, 5.0];
    for offset in offsets {
        viewport.scroll_to(offset);
    }
    assert_eq!(program.pending_events(), offsets.len());
    program.step();
    assert_eq!(program.model().scroll_offset(), 5.0);
    assert_eq!(program.model().tracker().signals(), offsets.len() as u64);
}

#[test]
fn scrolling_does_not_change_the_active_section() {
    let (mut program, viewport) = deck(ScrollBehavior::Smooth);
    let agents = expected_target(&viewport, "agents");
    viewport.scroll_to(agents);
    program.step();
    assert_eq!(program.model().scroll_offset(), agents);
    assert_eq!(program.model().active(), "foundations");
}

#[test]
fn two_section_registry_scrolls_to_agents() {
    let registry = SectionRegistry::new(vec![
        DECK.nav[0].descriptor(),
        DECK.nav[3].descriptor(),
    ])
    .unwrap();
    let model = DeckModel::with_registry(&DECK, registry, ScrollBehavior::Smooth);
    let (mut program, viewport) = mounted(model);
    assert_eq!(program.model().active(), "foundations");

    program.send(Msg::Activate("agents".into()));
    assert_eq!(program.model().active(), "agents");

    let target = expected_target(&viewport, "agents");
    assert!(target > 0.0);
    assert_eq!(
        viewport.scroll_requests(),
        vec![IssuedScroll {
            anchor: "agents".into(),
            target,
            behavior: ScrollBehavior::Smooth,
        }]
    );
    assert!(viewport.is_animating());

    program.advance_time(Duration::from_millis(100));
    program.step();
    let partial = program.model().scroll_offset();
    assert!(partial > 0.0 && partial < target);

    program.advance_time(Duration::from_secs(1));
    program.step();
    assert!((program.model().scroll_offset() - target).abs() < 1e-9);
    assert_eq!(program.model().active(), "agents");
}

#[test]
fn clicking_a_nav_entry_navigates() {
    let (mut program, _viewport) = deck(ScrollBehavior::Instant);
    let nav_height = program.frame().sticky().unwrap().height;
    let (x, y) = (0..nav_height)
        .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
        .find(|&(x, y)| {
            matches!(
                program.frame().hit_test(x, y),
                Some((id, HitRegion::Button, 3)) if id == NAV_HIT
            )
        })
        .unwrap();
    program.push_event(Event::click(x, y));
    program.step();
    assert_eq!(program.model().active(), "agents");
    assert!(program.window_offset() > 0);
}

#[test]
fn number_keys_navigate_and_q_quits() {
    let (mut program, _viewport) = deck(ScrollBehavior::Instant);
    program.push_event(Event::key(KeyCode::Char('5')));
    program.step();
    assert_eq!(program.model().active(), "future");

    program.push_event(Event::key(KeyCode::Char('q')));
    let result = program.step();
    assert!(!result.running);
}

#[test]
fn non_interactive_host_degrades_quietly() {
    let model = DeckModel::new(ScrollBehavior::Smooth).unwrap();
    let mut program = StepProgram::new(model, NullViewport, WIDTH, HEIGHT);
    program.init();
    assert!(!program.is_mounted());

    program.send(Msg::Activate("agents".into()));
    program.step();
    assert_eq!(program.model().active(), "agents");
    assert_eq!(program.model().scroll_offset(), 0.0);
    assert_eq!(program.scroll_outcomes(), &[ScrollOutcome::MissingAnchor]);
}

mod trace_capture {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Debug, Clone)]
    pub struct CapturedEvent {
        pub fields: HashMap<String, String>,
    }

    struct FieldVisitor(Vec<(String, String)>);

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            self.0.push((field.name().to_string(), format!("{value:?}")));
        }
        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            self.0.push((field.name().to_string(), value.to_string()));
        }
    }

    struct EventCapture {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = FieldVisitor(Vec::new());
            event.record(&mut visitor);
            self.events.lock().unwrap().push(CapturedEvent {
                fields: visitor.0.into_iter().collect(),
            });
        }
    }

    pub fn with_captured_events<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = EventCapture {
            events: Arc::clone(&events),
        };
        let subscriber = tracing_subscriber::registry().with(layer);
        let result = tracing::subscriber::with_default(subscriber, f);
        let captured = events.lock().unwrap().clone();
        (result, captured)
    }
}

#[test]
fn navigation_is_logged_with_section_and_behavior() {
    let (_, events) = trace_capture::with_captured_events(|| {
        let (mut program, _viewport) = deck(ScrollBehavior::Smooth);
        program.send(Msg::Activate("agents".into()));
    });
    let navigate = events
        .iter()
        .find(|e| e.fields.get("message").map(String::as_str) == Some("navigate"))
        .unwrap();
    assert_eq!(navigate.fields["section"], "agents");
    assert_eq!(navigate.fields["behavior"], "smooth");
}
