#![forbid(unsafe_code)]

use mlshare_core::section::SectionId;
use mlshare_widgets::TabsState;

/// Keyboard focus target. `Tab` walks nav entries, then hero cards, then the
/// call-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Nav(usize),
    HeroCard(usize),
    Cta,
}

impl Focus {
    /// Target at position `ring` of the focus order over `sections` entries.
    #[must_use]
    pub fn from_ring(ring: usize, sections: usize) -> Self {
        if ring < sections {
            Self::Nav(ring)
        } else if ring < sections * 2 {
            Self::HeroCard(ring - sections)
        } else {
            Self::Cta
        }
    }

    /// Number of focusable targets for `sections` entries.
    #[must_use]
    pub const fn ring_len(sections: usize) -> usize {
        sections * 2 + 1
    }
}

/// Read-only view of the page state handed to renderers.
///
/// Both render trees (terminal and HTML) take one of these and nothing else
/// mutable, so every highlight is a function of the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PageState<'a> {
    pub active: &'a SectionId,
    pub scroll_offset: f64,
    /// Keyboard focus, if any.
    pub focus: Option<Focus>,
    /// Tab selection per registry position.
    pub tabs: &'a [TabsState],
}

impl<'a> PageState<'a> {
    #[must_use]
    pub fn new(active: &'a SectionId) -> Self {
        Self {
            active,
            scroll_offset: 0.0,
            focus: None,
            tabs: &[],
        }
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        *self.active == id
    }

    /// Selected tab of the section at registry position `section`.
    #[must_use]
    pub fn tab(&self, section: usize) -> usize {
        self.tabs.get(section).map_or(0, |t| t.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let id = SectionId::from("foundations");
        let state = PageState::new(&id);
        assert!(state.is_active("foundations"));
        assert!(!state.is_active("agents"));
        assert_eq!(state.tab(3), 0);
        assert_eq!(state.focus, None);
    }

    #[test]
    fn focus_ring_order() {
        assert_eq!(Focus::ring_len(5), 11);
        assert_eq!(Focus::from_ring(0, 5), Focus::Nav(0));
        assert_eq!(Focus::from_ring(4, 5), Focus::Nav(4));
        assert_eq!(Focus::from_ring(5, 5), Focus::HeroCard(0));
        assert_eq!(Focus::from_ring(9, 5), Focus::HeroCard(4));
        assert_eq!(Focus::from_ring(10, 5), Focus::Cta);
    }
}
