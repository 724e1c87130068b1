#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the DeckRunner.
//!
//! This module wraps [`super::runner_core::PageCore`] over a
//! [`DomViewport`] with JS-friendly types. Only compiled on `wasm32` targets.
//!
//! The host page is expected to contain the markup from [`DeckRunner::html`]
//! (or the `mlshare html` export) and to call `step()` once per animation
//! frame. Nav entries, hero cards, the call-to-action and tab buttons need
//! no JS wiring: `init()` installs one delegated click listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::{ClickTarget, DomViewport, apply_nav_classes, apply_tab_selection, click_target};
use crate::runner_core::PageCore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// State shared between the runner and its click handler.
struct Page {
    core: PageCore<Rc<DomViewport>>,
    document: web_sys::Document,
}

impl Page {
    fn activate(&mut self, id: &str) -> bool {
        let requested = self.core.activate(id);
        self.sync_nav();
        requested
    }

    fn select_tab(&mut self, section: usize, tab: usize) {
        self.core.select_tab(section, tab);
        apply_tab_selection(&self.document, section, self.core.tab(section));
    }

    fn sync_nav(&self) {
        apply_nav_classes(&self.document, &self.core.nav_classes());
    }

    fn on_click(&mut self, event: &web_sys::Event) {
        let Some(element) = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        match click_target(&element) {
            Some(ClickTarget::Section(id)) => {
                event.prevent_default();
                self.activate(&id);
            }
            Some(ClickTarget::Tab { section, tab }) => {
                event.prevent_default();
                self.select_tab(section, tab);
            }
            None => {}
        }
    }
}

type ClickHandler = Closure<dyn FnMut(web_sys::Event)>;

/// Deck page runner bound to the browser window.
///
/// While mounted, one delegated `click` listener on the document routes
/// `[data-section]` and `[role="tab"]` clicks into the runner.
#[wasm_bindgen]
pub struct DeckRunner {
    page: Rc<RefCell<Page>>,
    click: Option<ClickHandler>,
}

#[wasm_bindgen]
impl DeckRunner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<DeckRunner, JsValue> {
        install_panic_hook();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let viewport = Rc::new(DomViewport::new(window));
        let core = PageCore::new(viewport).map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self {
            page: Rc::new(RefCell::new(Page { core, document })),
            click: None,
        })
    }

    /// Mount: listen to window scrolls and page clicks, then sync the nav.
    pub fn init(&mut self) {
        {
            let mut page = self.page.borrow_mut();
            page.core.init();
            page.sync_nav();
        }
        self.attach_click();
    }

    /// Stop listening to window scrolls and page clicks.
    pub fn destroy(&mut self) {
        self.page.borrow_mut().core.unmount();
        self.detach_click();
    }

    /// Drain queued scroll signals. Returns `false` once the runner stopped.
    pub fn step(&mut self) -> bool {
        self.page.borrow_mut().core.step().running
    }

    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.page.borrow_mut().core.advance_time_ms(dt_ms);
    }

    /// Navigate to a section. Returns whether a matching element was found.
    pub fn activate(&mut self, id: &str) -> bool {
        self.page.borrow_mut().activate(id)
    }

    #[wasm_bindgen(js_name = selectTab)]
    pub fn select_tab(&mut self, section: usize, tab: usize) {
        self.page.borrow_mut().select_tab(section, tab);
    }

    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> String {
        self.page.borrow().core.active().to_owned()
    }

    #[wasm_bindgen(js_name = scrollOffset)]
    pub fn scroll_offset(&self) -> f64 {
        self.page.borrow().core.scroll_offset()
    }

    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        use mlshare_runtime::viewport::Viewport;
        self.page.borrow().core.viewport().listener_count()
    }

    /// Whether the document click listener is attached.
    #[wasm_bindgen(js_name = handlesClicks)]
    pub fn handles_clicks(&self) -> bool {
        self.click.is_some()
    }

    /// Full page markup for the current state.
    pub fn html(&self) -> String {
        self.page.borrow().core.html()
    }
}

impl DeckRunner {
    fn attach_click(&mut self) {
        if self.click.is_some() {
            return;
        }
        let page: Weak<RefCell<Page>> = Rc::downgrade(&self.page);
        let handler: ClickHandler = Closure::new(move |event: web_sys::Event| {
            let Some(page) = page.upgrade() else {
                return;
            };
            let Ok(mut page) = page.try_borrow_mut() else {
                tracing::warn!("click dropped while the runner is busy");
                return;
            };
            page.on_click(&event);
        });
        let document = self.page.borrow().document.clone();
        if let Err(err) =
            document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, "click listener rejected");
            return;
        }
        tracing::debug!("dom click listener registered");
        self.click = Some(handler);
    }

    fn detach_click(&mut self) {
        let Some(handler) = self.click.take() else {
            return;
        };
        let document = self.page.borrow().document.clone();
        match document.remove_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        {
            Ok(()) => tracing::debug!("dom click listener removed"),
            Err(err) => {
                tracing::warn!(?err, "click listener removal failed");
                handler.forget();
            }
        }
    }
}

impl Drop for DeckRunner {
    fn drop(&mut self) {
        self.detach_click();
    }
}
