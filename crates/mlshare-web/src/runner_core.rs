#![forbid(unsafe_code)]

//! Platform-independent page core wrapping `StepProgram<DeckModel, V>`.
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here: the viewport is a
//! type parameter, so native tests run the core over a `VirtualViewport`.

use core::time::Duration;

use mlshare_core::registry::RegistryError;
use mlshare_deck::app::{DeckModel, Msg};
use mlshare_deck::markup::{nav_class, render_html};
use mlshare_runtime::step::{StepProgram, StepResult};
use mlshare_runtime::viewport::{ScrollBehavior, ScrollOutcome, Viewport};

/// Cell grid of the shadow frame. The browser lays out the real page; the
/// frame only backs hit testing and text snapshots.
const SHADOW_COLUMNS: u16 = 80;
const SHADOW_ROWS: u16 = 24;

/// Page runner for a browser-like host.
pub struct PageCore<V: Viewport> {
    inner: StepProgram<DeckModel, V>,
}

impl<V: Viewport> PageCore<V> {
    /// Core over the built-in deck with smooth navigation scrolls.
    pub fn new(viewport: V) -> Result<Self, RegistryError> {
        let model = DeckModel::new(ScrollBehavior::Smooth)?;
        Ok(Self {
            inner: StepProgram::new(model, viewport, SHADOW_COLUMNS, SHADOW_ROWS),
        })
    }

    /// Mount: registers the scroll listener.
    pub fn init(&mut self) {
        self.inner.init();
    }

    /// Unmount: releases the scroll listener. Idempotent.
    pub fn unmount(&mut self) {
        self.inner.unmount();
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Drain queued scroll signals.
    pub fn step(&mut self) -> StepResult {
        self.inner.step()
    }

    /// Advance by `dt_ms` milliseconds. Non-finite or negative input is
    /// ignored.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        self.inner
            .advance_time(Duration::from_secs_f64(dt_ms / 1_000.0));
    }

    /// Navigate to `id`. The active id changes immediately; the return value
    /// says whether the host found an element to scroll to.
    pub fn activate(&mut self, id: &str) -> bool {
        self.inner.send(Msg::Activate(id.into()));
        let requested = self
            .inner
            .scroll_outcomes()
            .last()
            .is_some_and(ScrollOutcome::is_requested);
        tracing::debug!(section = id, requested, "web navigate");
        requested
    }

    /// Select tab `tab` of the section at registry position `section`.
    pub fn select_tab(&mut self, section: usize, tab: usize) {
        self.inner.send(Msg::SelectTab { section, tab });
    }

    #[must_use]
    pub fn active(&self) -> &str {
        self.inner.model().active().as_str()
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.inner.model().scroll_offset()
    }

    /// Selected tab of the section at `section`.
    #[must_use]
    pub fn tab(&self, section: usize) -> usize {
        self.inner.model().tab(section)
    }

    /// `(id, class)` for every nav entry, in registry order.
    #[must_use]
    pub fn nav_classes(&self) -> Vec<(&str, &'static str)> {
        let model = self.inner.model();
        model
            .registry()
            .iter()
            .map(|s| (s.id.as_str(), nav_class(model.active() == s.id.as_str())))
            .collect()
    }

    /// Full page markup for the current state.
    #[must_use]
    pub fn html(&self) -> String {
        let model = self.inner.model();
        render_html(model.deck(), model.registry(), &model.state())
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.inner.frame_idx()
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    #[must_use]
    pub fn viewport(&self) -> &V {
        self.inner.viewport()
    }
}
