#![forbid(unsafe_code)]

//! Smooth scroll animation.
//!
//! Ease-out cubic from a start offset to a target over a fixed duration,
//! driven by explicit `advance` calls so it stays deterministic under a
//! host-controlled clock. A new target restarts the curve from wherever the
//! animation currently is; there is no cancellation token, the latest
//! request simply wins.

use std::time::Duration;

/// Default animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(320);

/// `1 - (1 - t)^3`, clamped to `[0, 1]`.
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// One running scroll animation.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScroll {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
}

impl SmoothScroll {
    /// Start animating from `from` to `to`.
    ///
    /// A zero duration completes on the first `advance`.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Restart towards `to`, beginning at the current position.
    pub fn retarget(&mut self, to: f64) {
        self.from = self.position();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    /// Final offset.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Clamp the target (document shrank under the animation).
    pub fn clamp_target(&mut self, max: f64) {
        if self.to > max {
            self.from = self.position().min(max);
            self.to = max;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Fraction of the duration elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.elapsed.is_zero() { 0.0 } else { 1.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Current interpolated offset.
    #[must_use]
    pub fn position(&self) -> f64 {
        let p = self.progress();
        if p >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(p)
    }

    /// Whether the animation reached its target.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` and return the new position.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.duration.is_zero() && self.elapsed.is_zero() {
            // Zero-length animations still finish on the first tick.
            self.elapsed = Duration::from_nanos(1);
        }
        self.position()
    }
}
