#![forbid(unsafe_code)]

//! In-memory document viewport.
//!
//! Stands in for a browser window wherever there is no browser: the terminal
//! host and the test suites. It knows the document height, the window height
//! and where each anchor sits (all published by the runtime after each
//! render), keeps a clamped scroll offset, and runs smooth scrolls on the
//! host clock.
//!
//! Every change of the offset, whether from an animation tick, an instant
//! jump or user scrolling, fires every registered listener once with the new
//! offset. Listeners are invoked with no internal borrow held, so a callback
//! may drop its own guard or register another listener.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use mlshare_render::frame::DocumentMetrics;

use crate::smooth_scroll::{DEFAULT_DURATION, SmoothScroll};
use crate::viewport::{
    ListenerGuard, ScrollBehavior, ScrollCallback, ScrollOutcome, Viewport,
};

type SharedCallback = Rc<RefCell<ScrollCallback>>;

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, SharedCallback)>,
}

impl ListenerTable {
    fn insert(&mut self, callback: ScrollCallback) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push((id, Rc::new(RefCell::new(callback))));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        before != self.entries.len()
    }
}

/// A scroll that the viewport actually started.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedScroll {
    pub anchor: String,
    pub target: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug)]
struct State {
    offset: f64,
    metrics: DocumentMetrics,
    animation: Option<SmoothScroll>,
}

/// In-memory viewport over a rendered document.
pub struct VirtualViewport {
    state: RefCell<State>,
    listeners: Rc<RefCell<ListenerTable>>,
    issued: RefCell<Vec<IssuedScroll>>,
    missed: Cell<usize>,
    smooth_duration: Duration,
}

impl VirtualViewport {
    /// Viewport with a `viewport_height`-row window over an empty document.
    #[must_use]
    pub fn new(viewport_height: u16) -> Self {
        Self::with_duration(viewport_height, DEFAULT_DURATION)
    }

    /// Same as [`new`](Self::new) with a custom smooth-scroll duration.
    #[must_use]
    pub fn with_duration(viewport_height: u16, smooth_duration: Duration) -> Self {
        Self {
            state: RefCell::new(State {
                offset: 0.0,
                metrics: DocumentMetrics {
                    height: viewport_height,
                    viewport_height,
                    ..DocumentMetrics::default()
                },
                animation: None,
            }),
            listeners: Rc::new(RefCell::new(ListenerTable::default())),
            issued: RefCell::new(Vec::new()),
            missed: Cell::new(0),
            smooth_duration,
        }
    }

    /// Scrolls started so far, oldest first.
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<IssuedScroll> {
        self.issued.borrow().clone()
    }

    /// Number of requests that found no anchor.
    #[must_use]
    pub fn missing_anchor_count(&self) -> usize {
        self.missed.get()
    }

    /// Whether a smooth scroll is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.borrow().animation.is_some()
    }

    /// Largest valid offset for the current document.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.state.borrow().metrics.max_offset()
    }

    /// Row of `anchor` in the current document.
    #[must_use]
    pub fn anchor_row(&self, anchor: &str) -> Option<u16> {
        self.state.borrow().metrics.anchors.get(anchor).copied()
    }

    /// Document metrics as last published.
    #[must_use]
    pub fn metrics(&self) -> DocumentMetrics {
        self.state.borrow().metrics.clone()
    }

    /// Clamp, store and broadcast a new offset. No-op if unchanged.
    fn set_offset(&self, offset: f64) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let clamped = clamp_offset(offset, state.metrics.max_offset());
            if clamped == state.offset {
                None
            } else {
                state.offset = clamped;
                Some(clamped)
            }
        };
        if let Some(offset) = changed {
            self.dispatch(offset);
        }
    }

    fn dispatch(&self, offset: f64) {
        let callbacks: Vec<SharedCallback> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        tracing::trace!(offset, listeners = callbacks.len(), "scroll signal");
        for cb in callbacks {
            // A listener re-entering itself is skipped rather than panicking.
            if let Ok(mut cb) = cb.try_borrow_mut() {
                cb(offset);
            }
        }
    }

    fn target_for(&self, anchor: &str) -> Option<f64> {
        let state = self.state.borrow();
        let row = *state.metrics.anchors.get(anchor)?;
        let raw = f64::from(row) - f64::from(state.metrics.sticky_height);
        Some(clamp_offset(raw, state.metrics.max_offset()))
    }
}

fn clamp_offset(offset: f64, max: f64) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max.max(0.0))
}

impl Viewport for VirtualViewport {
    fn is_interactive(&self) -> bool {
        true
    }

    fn scroll_offset(&self) -> f64 {
        self.state.borrow().offset
    }

    fn listen_scroll(&self, callback: ScrollCallback) -> Option<ListenerGuard> {
        let id = self.listeners.borrow_mut().insert(callback);
        tracing::debug!(listener_id = id, "scroll listener registered");
        let table: Weak<RefCell<ListenerTable>> = Rc::downgrade(&self.listeners);
        Some(ListenerGuard::new(id, move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().remove(id);
            }
        }))
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn scroll_into_view(&self, anchor: &str, behavior: ScrollBehavior) -> ScrollOutcome {
        let Some(target) = self.target_for(anchor) else {
            self.missed.set(self.missed.get() + 1);
            tracing::debug!(anchor, outcome = "missing_anchor", "scroll skipped");
            return ScrollOutcome::MissingAnchor;
        };
        self.issued.borrow_mut().push(IssuedScroll {
            anchor: anchor.to_owned(),
            target,
            behavior,
        });
        tracing::debug!(anchor, target, behavior = behavior.as_str(), "scroll requested");
        match behavior {
            ScrollBehavior::Instant => {
                self.state.borrow_mut().animation = None;
                self.set_offset(target);
            }
            ScrollBehavior::Smooth => {
                let mut state = self.state.borrow_mut();
                let from = state.offset;
                if let Some(anim) = state.animation.as_mut() {
                    anim.retarget(target);
                } else if from != target {
                    state.animation = Some(SmoothScroll::new(from, target, self.smooth_duration));
                }
            }
        }
        ScrollOutcome::Requested {
            anchor: anchor.to_owned(),
            target,
        }
    }

    fn scroll_by(&self, delta: f64) {
        let current = self.scroll_offset();
        self.scroll_to(current + delta);
    }

    fn scroll_to(&self, offset: f64) {
        // User scrolling interrupts a smooth scroll.
        self.state.borrow_mut().animation = None;
        self.set_offset(offset);
    }

    fn tick(&self, dt: Duration) {
        let next = {
            let mut state = self.state.borrow_mut();
            let Some(anim) = state.animation.as_mut() else {
                return;
            };
            let pos = anim.advance(dt);
            if anim.is_done() {
                state.animation = None;
            }
            pos
        };
        self.set_offset(next);
    }

    fn sync_document(&self, metrics: &DocumentMetrics) {
        let offset = {
            let mut state = self.state.borrow_mut();
            state.metrics = metrics.clone();
            let max = state.metrics.max_offset();
            if let Some(anim) = state.animation.as_mut() {
                anim.clamp_target(max);
            }
            state.offset
        };
        // Document shrank below the current offset.
        self.set_offset(offset);
    }
}

impl std::fmt::Debug for VirtualViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualViewport")
            .field("state", &self.state.borrow())
            .field("listeners", &self.listener_count())
            .field("issued", &self.issued.borrow().len())
            .finish()
    }
}
