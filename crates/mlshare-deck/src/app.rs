#![forbid(unsafe_code)]

//! The deck page as a [`Model`].
//!
//! `DeckModel` owns the two state cells (active section in the
//! [`NavigationController`], scroll offset in the [`ScrollTracker`]) plus the
//! purely presentational UI state: keyboard focus and per-section tab
//! selection.
//! Activation sets the active id inside `update` and returns the scroll as a
//! command, so the runtime starts scrolling only after the new id is in
//! place.

use mlshare_core::event::{Event, KeyCode, MouseEvent};
use mlshare_core::registry::{RegistryError, SectionRegistry};
use mlshare_core::section::SectionId;
use mlshare_render::frame::{Frame, HitData, HitId, HitRegion};
use mlshare_runtime::program::{Cmd, Model};
use mlshare_runtime::viewport::ScrollBehavior;
use mlshare_widgets::TabsState;

use crate::content::{DECK, Deck};
use crate::nav::NavigationController;
use crate::state::{Focus, PageState};
use crate::tracker::ScrollTracker;
use crate::view::{self, PageView};

/// Messages understood by [`DeckModel`].
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Activate a section by id. Unknown ids are accepted.
    Activate(SectionId),
    /// Activate the section at a registry position.
    ActivateIndex(usize),
    /// Viewport scroll signal.
    Scrolled(f64),
    FocusNext,
    FocusPrev,
    /// Activate whatever the focused nav entry, hero card or call-to-action
    /// points at.
    CommitFocus,
    SelectTab { section: usize, tab: usize },
    /// Next tab of the active section's tab group.
    TabNext,
    TabPrev,
    Resized,
    Quit,
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Scroll(scroll) => Msg::Scrolled(scroll.offset),
            Event::Resize { .. } => Msg::Resized,
            Event::Key(key) if key.is_press() => {
                if key.ctrl() && key.is_char('c') {
                    return Msg::Quit;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Escape => Msg::Quit,
                    KeyCode::Tab => Msg::FocusNext,
                    KeyCode::BackTab => Msg::FocusPrev,
                    KeyCode::Enter => Msg::CommitFocus,
                    KeyCode::Left => Msg::TabPrev,
                    KeyCode::Right => Msg::TabNext,
                    KeyCode::Char(c @ '1'..='9') => {
                        Msg::ActivateIndex(c as usize - '1' as usize)
                    }
                    _ => Msg::Noop,
                }
            }
            _ => Msg::Noop,
        }
    }
}

/// Page model.
#[derive(Debug, Clone)]
pub struct DeckModel {
    deck: &'static Deck,
    registry: SectionRegistry,
    nav: NavigationController,
    tracker: ScrollTracker,
    /// Position in the focus ring, see [`Focus::from_ring`].
    focus: Option<usize>,
    tabs: Vec<TabsState>,
}

impl DeckModel {
    /// The built-in page with the given scroll behavior.
    pub fn new(behavior: ScrollBehavior) -> Result<Self, RegistryError> {
        Ok(Self::with_registry(&DECK, DECK.registry()?, behavior))
    }

    /// Page over an explicit registry. Sections without content in `deck`
    /// render as a bare heading.
    #[must_use]
    pub fn with_registry(
        deck: &'static Deck,
        registry: SectionRegistry,
        behavior: ScrollBehavior,
    ) -> Self {
        let nav = NavigationController::from_registry(&registry, behavior);
        let tabs = vec![TabsState::default(); registry.len()];
        Self {
            deck,
            registry,
            nav,
            tracker: ScrollTracker::new(),
            focus: None,
            tabs,
        }
    }

    /// Start with keyboard focus on the first nav entry.
    #[must_use]
    pub fn with_nav_focus(mut self) -> Self {
        self.focus = Some(0);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn deck(&self) -> &'static Deck {
        self.deck
    }

    /// Active section id.
    #[must_use]
    pub fn active(&self) -> &SectionId {
        self.nav.active()
    }

    /// Last recorded scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.tracker.offset()
    }

    #[must_use]
    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    #[must_use]
    pub fn focus(&self) -> Option<Focus> {
        self.focus
            .map(|ring| Focus::from_ring(ring, self.registry.len()))
    }

    /// Selected tab of the section at registry position `section`.
    #[must_use]
    pub fn tab(&self, section: usize) -> usize {
        self.tabs.get(section).map_or(0, |t| t.active)
    }

    /// Snapshot for the renderers.
    #[must_use]
    pub fn state(&self) -> PageState<'_> {
        PageState {
            active: self.nav.active(),
            scroll_offset: self.tracker.offset(),
            focus: self.focus(),
            tabs: &self.tabs,
        }
    }

    fn tab_count(&self, section: usize) -> usize {
        self.registry
            .at(section)
            .and_then(|s| self.deck.section(s.id.as_str()))
            .and_then(|c| c.tabs())
            .map_or(0, <[_]>::len)
    }

    fn activate(&mut self, id: SectionId) -> Cmd<Msg> {
        let request = self.nav.activate(id);
        tracing::info!(
            section = %request.anchor,
            behavior = request.behavior.as_str(),
            "navigate"
        );
        Cmd::scroll_into_view(request)
    }

    fn step_tab(&mut self, forward: bool) {
        let Some(pos) = self.registry.index_of(self.nav.active().as_str()) else {
            return;
        };
        let count = self.tab_count(pos);
        if let Some(state) = self.tabs.get_mut(pos) {
            if forward {
                state.next(count);
            } else {
                state.previous(count);
            }
        }
    }
}

impl Model for DeckModel {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        tracing::debug!(
            sections = self.registry.len(),
            active = %self.nav.active(),
            "deck mounted"
        );
        Cmd::none()
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Activate(id) => self.activate(id),
            Msg::ActivateIndex(pos) => match self.registry.at(pos) {
                Some(section) => {
                    let id = section.id.clone();
                    self.activate(id)
                }
                None => Cmd::none(),
            },
            Msg::Scrolled(offset) => {
                self.tracker.record(offset);
                Cmd::none()
            }
            Msg::FocusNext => {
                let len = Focus::ring_len(self.registry.len());
                self.focus = Some(self.focus.map_or(0, |i| (i + 1) % len));
                Cmd::none()
            }
            Msg::FocusPrev => {
                let len = Focus::ring_len(self.registry.len());
                self.focus = Some(self.focus.map_or(len - 1, |i| (i + len - 1) % len));
                Cmd::none()
            }
            Msg::CommitFocus => {
                let target = match self.focus() {
                    Some(Focus::Nav(pos) | Focus::HeroCard(pos)) => self.registry.at(pos),
                    Some(Focus::Cta) => Some(self.registry.first()),
                    None => None,
                };
                match target {
                    Some(section) => {
                        let id = section.id.clone();
                        self.activate(id)
                    }
                    None => Cmd::none(),
                }
            }
            Msg::SelectTab { section, tab } => {
                let count = self.tab_count(section);
                if let Some(state) = self.tabs.get_mut(section) {
                    state.select(tab, count);
                }
                Cmd::none()
            }
            Msg::TabNext => {
                self.step_tab(true);
                Cmd::none()
            }
            Msg::TabPrev => {
                self.step_tab(false);
                Cmd::none()
            }
            Msg::Quit => Cmd::quit(),
            Msg::Resized | Msg::Noop => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        PageView::new(self.deck, &self.registry, self.state()).render(frame);
    }

    fn on_hit(
        &self,
        id: HitId,
        region: HitRegion,
        data: HitData,
        _mouse: &MouseEvent,
    ) -> Option<Msg> {
        match (id, region) {
            (view::NAV_HIT | view::HERO_CARD_HIT, HitRegion::Button) => {
                Some(Msg::ActivateIndex(data as usize))
            }
            (view::CTA_HIT, HitRegion::Button) => {
                Some(Msg::Activate(self.registry.first().id.clone()))
            }
            (view::TAB_HIT, HitRegion::Tab) => {
                let (section, tab) = view::split_tab_hit(data);
                Some(Msg::SelectTab { section, tab })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlshare_core::event::{KeyEvent, Modifiers};
    use mlshare_runtime::viewport::ScrollRequest;

    fn model() -> DeckModel {
        DeckModel::new(ScrollBehavior::Smooth).unwrap()
    }

    fn scroll_of(cmd: Cmd<Msg>) -> Option<ScrollRequest> {
        match cmd {
            Cmd::ScrollIntoView(req) => Some(req),
            _ => None,
        }
    }

    #[test]
    fn initial_state() {
        let m = model();
        assert_eq!(m.active(), "foundations");
        assert_eq!(m.scroll_offset(), 0.0);
        assert_eq!(m.focus(), None);
    }

    #[test]
    fn activate_sets_state_and_returns_scroll() {
        let mut m = model();
        let req = scroll_of(m.update(Msg::Activate("agents".into()))).unwrap();
        assert_eq!(m.active(), "agents");
        assert_eq!(req.anchor, "agents");
        assert_eq!(req.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn activate_index_out_of_range_is_ignored() {
        let mut m = model();
        assert!(m.update(Msg::ActivateIndex(9)).is_none());
        assert_eq!(m.active(), "foundations");
    }

    #[test]
    fn keys_map_to_messages() {
        let key = |code| Msg::from(Event::key(code));
        assert_eq!(key(KeyCode::Char('3')), Msg::ActivateIndex(2));
        assert_eq!(key(KeyCode::Tab), Msg::FocusNext);
        assert_eq!(key(KeyCode::BackTab), Msg::FocusPrev);
        assert_eq!(key(KeyCode::Enter), Msg::CommitFocus);
        assert_eq!(key(KeyCode::Char('q')), Msg::Quit);
        assert_eq!(key(KeyCode::Char('x')), Msg::Noop);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL));
        assert_eq!(Msg::from(ctrl_c), Msg::Quit);
        assert_eq!(Msg::from(Event::scroll(12.0)), Msg::Scrolled(12.0));
    }

    #[test]
    fn focus_wraps_and_commits() {
        let mut m = model();
        m.update(Msg::FocusPrev);
        assert_eq!(m.focus(), Some(Focus::Cta));
        m.update(Msg::FocusNext);
        assert_eq!(m.focus(), Some(Focus::Nav(0)));
        m.update(Msg::FocusNext);
        let req = scroll_of(m.update(Msg::CommitFocus)).unwrap();
        assert_eq!(req.anchor, "architectures");
        assert_eq!(m.active(), "architectures");
    }

    #[test]
    fn hero_cards_and_cta_commit_from_the_keyboard() {
        let mut m = model();
        for _ in 0..9 {
            m.update(Msg::FocusNext);
        }
        assert_eq!(m.focus(), Some(Focus::HeroCard(3)));
        let req = scroll_of(m.update(Msg::CommitFocus)).unwrap();
        assert_eq!(req.anchor, "agents");
        assert_eq!(m.active(), "agents");

        m.update(Msg::FocusNext);
        assert_eq!(m.focus(), Some(Focus::HeroCard(4)));
        m.update(Msg::FocusNext);
        assert_eq!(m.focus(), Some(Focus::Cta));
        let req = scroll_of(m.update(Msg::CommitFocus)).unwrap();
        assert_eq!(req.anchor, "foundations");
        assert_eq!(m.active(), "foundations");
        assert_eq!(m.state().focus, Some(Focus::Cta));
    }

    #[test]
    fn tab_keys_follow_active_section() {
        let mut m = model();
        m.update(Msg::TabNext);
        assert_eq!(m.tab(0), 1);
        m.update(Msg::Activate("architectures".into()));
        m.update(Msg::TabNext);
        assert_eq!(m.tab(1), 0);
        m.update(Msg::Activate("practice".into()));
        m.update(Msg::TabPrev);
        assert_eq!(m.tab(2), 0);
        m.update(Msg::SelectTab { section: 2, tab: 7 });
        assert_eq!(m.tab(2), 2);
    }

    #[test]
    fn hits_map_to_messages() {
        let m = model();
        let mouse = MouseEvent::new(
            mlshare_core::event::MouseEventKind::Down(mlshare_core::event::MouseButton::Left),
            0,
            0,
        );
        assert_eq!(
            m.on_hit(view::NAV_HIT, HitRegion::Button, 3, &mouse),
            Some(Msg::ActivateIndex(3))
        );
        assert_eq!(
            m.on_hit(view::CTA_HIT, HitRegion::Button, 0, &mouse),
            Some(Msg::Activate("foundations".into()))
        );
        assert_eq!(
            m.on_hit(view::TAB_HIT, HitRegion::Tab, view::tab_hit_data(3, 2), &mouse),
            Some(Msg::SelectTab { section: 3, tab: 2 })
        );
        assert_eq!(m.on_hit(HitId::new(99), HitRegion::Content, 0, &mouse), None);
    }
}
