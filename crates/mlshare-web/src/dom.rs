#![forbid(unsafe_code)]

//! Viewport over the browser window.
//!
//! Scroll listeners are `scroll` event handlers on `window`; each one is
//! removed from the window when its [`ListenerGuard`] releases. Anchors are
//! elements looked up by id at request time, so a section that is not in the
//! DOM yet is simply a missing anchor.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use mlshare_runtime::viewport::{
    ListenerGuard, ScrollBehavior, ScrollCallback, ScrollOutcome, Viewport,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type Handler = Closure<dyn FnMut()>;

#[derive(Default)]
struct Handlers {
    next_id: u64,
    entries: Vec<(u64, Handler)>,
}

/// [`Viewport`] backed by `web_sys::Window`.
pub struct DomViewport {
    window: web_sys::Window,
    handlers: Rc<RefCell<Handlers>>,
    missed: Cell<usize>,
}

impl DomViewport {
    /// Viewport over the global window. `None` outside a browser.
    #[must_use]
    pub fn from_global() -> Option<Self> {
        web_sys::window().map(Self::new)
    }

    #[must_use]
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            handlers: Rc::new(RefCell::new(Handlers::default())),
            missed: Cell::new(0),
        }
    }

    /// Number of requests that found no element.
    #[must_use]
    pub fn missing_anchor_count(&self) -> usize {
        self.missed.get()
    }

    fn scroll_y(window: &web_sys::Window) -> f64 {
        window.scroll_y().unwrap_or(0.0).max(0.0)
    }
}

fn dom_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    }
}

impl Viewport for DomViewport {
    fn is_interactive(&self) -> bool {
        true
    }

    fn scroll_offset(&self) -> f64 {
        Self::scroll_y(&self.window)
    }

    fn listen_scroll(&self, mut callback: ScrollCallback) -> Option<ListenerGuard> {
        let window = self.window.clone();
        let handler: Handler = Closure::new(move || callback(Self::scroll_y(&window)));
        if let Err(err) = self
            .window
            .add_event_listener_with_callback("scroll", handler.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, "scroll listener rejected");
            return None;
        }

        let id = {
            let mut handlers = self.handlers.borrow_mut();
            handlers.next_id += 1;
            let id = handlers.next_id;
            handlers.entries.push((id, handler));
            id
        };
        tracing::debug!(listener_id = id, "dom scroll listener registered");

        let window = self.window.clone();
        let table: Weak<RefCell<Handlers>> = Rc::downgrade(&self.handlers);
        Some(ListenerGuard::new(id, move || {
            let Some(table) = table.upgrade() else {
                return;
            };
            let removed = {
                let mut handlers = table.borrow_mut();
                let pos = handlers.entries.iter().position(|(entry, _)| *entry == id);
                pos.map(|pos| handlers.entries.remove(pos).1)
            };
            let Some(handler) = removed else {
                return;
            };
            match window.remove_event_listener_with_callback("scroll", handler.as_ref().unchecked_ref())
            {
                Ok(()) => tracing::debug!(listener_id = id, "dom scroll listener removed"),
                Err(err) => {
                    // The window may still call it; keep the closure alive.
                    tracing::warn!(?err, listener_id = id, "scroll listener removal failed");
                    handler.forget();
                }
            }
        }))
    }

    fn listener_count(&self) -> usize {
        self.handlers.borrow().entries.len()
    }

    fn scroll_into_view(&self, anchor: &str, behavior: ScrollBehavior) -> ScrollOutcome {
        let element = self
            .window
            .document()
            .and_then(|document| document.get_element_by_id(anchor));
        let Some(element) = element else {
            self.missed.set(self.missed.get() + 1);
            tracing::debug!(anchor, outcome = "missing_anchor", "scroll skipped");
            return ScrollOutcome::MissingAnchor;
        };
        let target = element.get_bounding_client_rect().top() + self.scroll_offset();
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(dom_behavior(behavior));
        element.scroll_into_view_with_scroll_into_view_options(&options);
        tracing::debug!(anchor, target, behavior = behavior.as_str(), "scroll requested");
        ScrollOutcome::Requested {
            anchor: anchor.to_owned(),
            target,
        }
    }

    fn scroll_by(&self, delta: f64) {
        self.window.scroll_by_with_x_and_y(0.0, delta);
    }

    fn scroll_to(&self, offset: f64) {
        self.window.scroll_to_with_x_and_y(0.0, offset.max(0.0));
    }
}

/// Set each nav button's class from `(id, class)` pairs.
pub fn apply_nav_classes(document: &web_sys::Document, classes: &[(&str, &str)]) {
    for (id, class) in classes {
        let selector = format!("nav button[data-section=\"{id}\"]");
        if let Ok(Some(button)) = document.query_selector(&selector) {
            button.set_class_name(class);
        }
    }
}

/// Mark tab `tab` of the section at registry position `section` selected and
/// show only its panel.
pub fn apply_tab_selection(document: &web_sys::Document, section: usize, tab: usize) {
    let selector = format!("[data-section-index=\"{section}\"][data-tab-index]");
    let Ok(nodes) = document.query_selector_all(&selector) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        let selected = data_index(&element, "data-tab-index") == Some(tab);
        let result = if element.get_attribute("role").as_deref() == Some("tab") {
            element.set_attribute("aria-selected", if selected { "true" } else { "false" })
        } else if selected {
            element.remove_attribute("hidden")
        } else {
            element.set_attribute("hidden", "")
        };
        if let Err(err) = result {
            tracing::warn!(?err, section, tab, "tab attribute update failed");
        }
    }
}

/// Where a click on the page should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// A nav entry, hero card or call-to-action.
    Section(String),
    Tab { section: usize, tab: usize },
}

/// Resolve the routed element enclosing `target`, if any.
#[must_use]
pub fn click_target(target: &web_sys::Element) -> Option<ClickTarget> {
    if let Ok(Some(tab)) = target.closest("[role=\"tab\"][data-tab-index]") {
        let section = data_index(&tab, "data-section-index")?;
        let index = data_index(&tab, "data-tab-index")?;
        return Some(ClickTarget::Tab {
            section,
            tab: index,
        });
    }
    let link = target.closest("[data-section]").ok().flatten()?;
    link.get_attribute("data-section").map(ClickTarget::Section)
}

fn data_index(element: &web_sys::Element, name: &str) -> Option<usize> {
    element.get_attribute(name)?.parse().ok()
}
