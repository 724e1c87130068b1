#![forbid(unsafe_code)]

//! Browser host for the ML Tech Sharing deck.
//!
//! This crate provides [`DeckRunner`], a `wasm-bindgen`-exported struct that
//! wraps the deck's `StepProgram` over a DOM-backed viewport and exposes it
//! to JavaScript for host-driven execution. The page markup itself comes from
//! `mlshare_deck::markup`; the runner keeps the nav classes in sync with the
//! active section and routes navigation to `scrollIntoView`.

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::DeckRunner;

// Page core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod runner_core;

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use mlshare_runtime::viewport::{NullViewport, Viewport};
    use mlshare_runtime::virtual_viewport::VirtualViewport;
    use pretty_assertions::assert_eq;

    use crate::runner_core::PageCore;

    fn core() -> (PageCore<Rc<VirtualViewport>>, Rc<VirtualViewport>) {
        let viewport = Rc::new(VirtualViewport::new(24));
        let mut core = PageCore::new(Rc::clone(&viewport)).unwrap();
        core.init();
        (core, viewport)
    }

    #[test]
    fn page_core_mounts_one_listener() {
        let (mut core, viewport) = core();
        assert!(core.is_mounted());
        assert_eq!(viewport.listener_count(), 1);
        assert_eq!(core.frame_idx(), 1);
        core.unmount();
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn page_core_activation_updates_nav_classes() {
        let (mut core, _viewport) = core();
        assert!(core.activate("agents"));
        assert_eq!(core.active(), "agents");
        let classes = core.nav_classes();
        assert_eq!(classes.len(), 5);
        for (id, class) in classes {
            let expected = if id == "agents" { "text-blue-400" } else { "text-gray-300" };
            assert_eq!(class, expected, "{id}");
        }
    }

    #[test]
    fn page_core_unknown_section_is_not_scrolled() {
        let (mut core, _viewport) = core();
        assert!(!core.activate("nonexistent"));
        assert_eq!(core.active(), "nonexistent");
        assert!(core.nav_classes().iter().all(|(_, class)| *class == "text-gray-300"));
    }

    #[test]
    fn page_core_tracks_scroll_signals() {
        let (mut core, viewport) = core();
        viewport.scroll_to(4.0);
        viewport.scroll_to(9.0);
        core.step();
        assert_eq!(core.scroll_offset(), 9.0);
    }

    #[test]
    fn page_core_smooth_scroll_follows_the_clock() {
        let (mut core, viewport) = core();
        core.activate("practice");
        assert!(viewport.is_animating());
        core.advance_time_ms(f64::NAN);
        core.advance_time_ms(-5.0);
        assert!(viewport.is_animating());
        core.advance_time_ms(1_000.0);
        core.step();
        assert!(!viewport.is_animating());
        assert!(core.scroll_offset() > 0.0);
    }

    #[test]
    fn page_core_html_reflects_state() {
        let (mut core, _viewport) = core();
        core.select_tab(2, 1);
        assert_eq!(core.tab(2), 1);
        core.activate("practice");
        let html = core.html();
        assert!(html.contains("<button class=\"text-blue-400\" data-section=\"practice\">"));
        assert!(html.contains("data-tab=\"peft\" aria-selected=\"true\""));
    }

    #[test]
    fn page_core_without_dom_degrades() {
        let mut core = PageCore::new(NullViewport).unwrap();
        core.init();
        assert!(!core.is_mounted());
        assert!(!core.activate("foundations"));
        assert_eq!(core.active(), "foundations");
        assert_eq!(core.scroll_offset(), 0.0);
        assert!(core.is_running());
    }
}
