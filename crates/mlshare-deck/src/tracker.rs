#![forbid(unsafe_code)]

//! Scroll position tracker.
//!
//! Holds the last vertical offset reported by the viewport. Every signal is
//! one write; nothing is debounced or coalesced, so after `n` signals the
//! offset is exactly the `n`th value.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollTracker {
    offset: f64,
    signals: u64,
}

impl ScrollTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one scroll signal. Negative and non-finite offsets store 0.
    pub fn record(&mut self, offset: f64) {
        self.offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        self.signals += 1;
        tracing::trace!(offset = self.offset, signals = self.signals, "scroll offset recorded");
    }

    /// Last recorded offset; 0 before any signal.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Signals recorded so far.
    #[must_use]
    pub fn signals(&self) -> u64 {
        self.signals
    }
}
