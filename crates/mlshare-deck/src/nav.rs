#![forbid(unsafe_code)]

//! Navigation controller.
//!
//! Owns the active section id. Activation is split in two: the state change
//! happens here, synchronously, and the scroll is handed back as a
//! [`ScrollRequest`] for the runtime to execute once `update` has returned.
//! Ids are not checked against the registry; an unknown id becomes the
//! active id and its scroll request simply finds no anchor.

use mlshare_core::registry::SectionRegistry;
use mlshare_core::section::SectionId;
use mlshare_runtime::viewport::{ScrollBehavior, ScrollRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    active: SectionId,
    behavior: ScrollBehavior,
}

impl NavigationController {
    /// Start with `initial` active.
    #[must_use]
    pub fn new(initial: impl Into<SectionId>, behavior: ScrollBehavior) -> Self {
        Self {
            active: initial.into(),
            behavior,
        }
    }

    /// Start on the registry's first section.
    #[must_use]
    pub fn from_registry(registry: &SectionRegistry, behavior: ScrollBehavior) -> Self {
        Self::new(registry.first().id.clone(), behavior)
    }

    /// Currently active section id.
    #[must_use]
    pub fn active(&self) -> &SectionId {
        &self.active
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active == id
    }

    #[must_use]
    pub fn behavior(&self) -> ScrollBehavior {
        self.behavior
    }

    /// Make `id` active and return the scroll towards its anchor.
    ///
    /// Re-activating the current section still yields a request, which
    /// re-centres the view on it.
    pub fn activate(&mut self, id: impl Into<SectionId>) -> ScrollRequest {
        let id = id.into();
        if self.active == id {
            tracing::debug!(section = %id, "section re-activated");
        } else {
            tracing::debug!(from = %self.active, to = %id, "section activated");
            self.active = id.clone();
        }
        ScrollRequest::new(id, self.behavior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlshare_core::section::SectionDescriptor;

    fn registry() -> SectionRegistry {
        SectionRegistry::new(vec![
            SectionDescriptor::new("foundations", "Foundations", ""),
            SectionDescriptor::new("agents", "Agents", ""),
        ])
        .unwrap()
    }

    #[test]
    fn starts_on_first_section() {
        let nav = NavigationController::from_registry(&registry(), ScrollBehavior::Smooth);
        assert_eq!(nav.active(), "foundations");
    }

    #[test]
    fn activation_is_synchronous() {
        let mut nav = NavigationController::from_registry(&registry(), ScrollBehavior::Smooth);
        let req = nav.activate("agents");
        assert_eq!(nav.active(), "agents");
        assert_eq!(req, ScrollRequest::new("agents", ScrollBehavior::Smooth));
    }

    #[test]
    fn reactivation_still_requests_scroll() {
        let mut nav = NavigationController::new("agents", ScrollBehavior::Instant);
        let first = nav.activate("agents");
        let second = nav.activate("agents");
        assert_eq!(nav.active(), "agents");
        assert_eq!(first, second);
        assert_eq!(second.behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn unknown_ids_are_accepted() {
        let mut nav = NavigationController::from_registry(&registry(), ScrollBehavior::Smooth);
        let req = nav.activate("nonexistent");
        assert!(nav.is_active("nonexistent"));
        assert_eq!(req.anchor, "nonexistent");
    }
}
