#![forbid(unsafe_code)]

//! Viewport abstraction: scroll position, scroll signal, and anchor scrolling.
//!
//! A viewport is whatever actually scrolls: the browser window, an in-memory
//! document window in the terminal, or nothing at all when rendering
//! headlessly. The runtime talks to it through [`Viewport`] only.
//!
//! # Scroll listeners
//!
//! [`Viewport::listen_scroll`] hands back a [`ListenerGuard`]. The guard *is*
//! the registration: dropping it (or calling [`ListenerGuard::release`])
//! removes the listener, exactly once, whichever way the owner goes away.
//! A viewport that cannot be observed returns `None` and nothing is
//! registered.
//!
//! # Anchor scrolling
//!
//! [`Viewport::scroll_into_view`] is best effort. When the anchor is not part
//! of the currently rendered document it reports
//! [`ScrollOutcome::MissingAnchor`] and does nothing else.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use mlshare_core::section::SectionId;
use mlshare_render::frame::DocumentMetrics;

/// Callback receiving the new scroll offset.
pub type ScrollCallback = Box<dyn FnMut(f64)>;

/// How a scroll request should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBehavior {
    /// Animate towards the target.
    #[default]
    Smooth,
    /// Jump straight to the target.
    Instant,
}

impl ScrollBehavior {
    /// CSSOM name (`"smooth"` / `"instant"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Instant => "instant",
        }
    }
}

/// Request to bring an anchor into view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrollRequest {
    pub anchor: SectionId,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    #[must_use]
    pub fn new(anchor: impl Into<SectionId>, behavior: ScrollBehavior) -> Self {
        Self {
            anchor: anchor.into(),
            behavior,
        }
    }
}

/// Result of [`Viewport::scroll_into_view`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollOutcome {
    /// The anchor was found and a scroll towards `target` was started.
    Requested { anchor: String, target: f64 },
    /// No rendered element carries this anchor; nothing happened.
    MissingAnchor,
}

impl ScrollOutcome {
    #[must_use]
    pub fn is_requested(&self) -> bool {
        matches!(self, Self::Requested { .. })
    }
}

/// Scoped scroll-listener registration.
///
/// Holds the release action for one listener and runs it exactly once: on
/// [`release`](Self::release) or, failing that, on drop.
pub struct ListenerGuard {
    id: u64,
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    /// Wrap a release action for listener `id`.
    pub fn new(id: u64, release: impl FnOnce() + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    /// Listener id assigned by the viewport.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Release the listener now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::debug!(listener_id = self.id, "scroll listener released");
            release();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("armed", &self.release.is_some())
            .finish()
    }
}

/// Something that scrolls.
///
/// Methods take `&self`: viewports are shared between the runtime and the
/// listener callbacks they drive, so implementations use interior
/// mutability. Everything here is single-threaded.
pub trait Viewport {
    /// Whether scrolling can be observed at all.
    fn is_interactive(&self) -> bool;

    /// Current vertical scroll distance. Never negative.
    fn scroll_offset(&self) -> f64;

    /// Register a scroll listener. `None` when the viewport cannot be
    /// observed; the callback is then dropped unused.
    fn listen_scroll(&self, callback: ScrollCallback) -> Option<ListenerGuard>;

    /// Number of live listeners.
    fn listener_count(&self) -> usize;

    /// Bring `anchor` into view. Never fails; reports what it did.
    fn scroll_into_view(&self, anchor: &str, behavior: ScrollBehavior) -> ScrollOutcome;

    /// Scroll by a relative amount (user scrolling).
    fn scroll_by(&self, _delta: f64) {}

    /// Scroll to an absolute offset (user scrolling).
    fn scroll_to(&self, _offset: f64) {}

    /// Advance running animations by `dt`.
    fn tick(&self, _dt: Duration) {}

    /// Publish the geometry of the latest rendered document.
    fn sync_document(&self, _metrics: &DocumentMetrics) {}
}

impl<V: Viewport + ?Sized> Viewport for Rc<V> {
    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn listen_scroll(&self, callback: ScrollCallback) -> Option<ListenerGuard> {
        (**self).listen_scroll(callback)
    }

    fn listener_count(&self) -> usize {
        (**self).listener_count()
    }

    fn scroll_into_view(&self, anchor: &str, behavior: ScrollBehavior) -> ScrollOutcome {
        (**self).scroll_into_view(anchor, behavior)
    }

    fn scroll_by(&self, delta: f64) {
        (**self).scroll_by(delta);
    }

    fn scroll_to(&self, offset: f64) {
        (**self).scroll_to(offset);
    }

    fn tick(&self, dt: Duration) {
        (**self).tick(dt);
    }

    fn sync_document(&self, metrics: &DocumentMetrics) {
        (**self).sync_document(metrics);
    }
}

/// Viewport of a non-interactive rendering context.
///
/// Nothing scrolls, nothing can be observed, every anchor is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullViewport;

impl Viewport for NullViewport {
    fn is_interactive(&self) -> bool {
        false
    }

    fn scroll_offset(&self) -> f64 {
        0.0
    }

    fn listen_scroll(&self, _callback: ScrollCallback) -> Option<ListenerGuard> {
        tracing::debug!("viewport not interactive; scroll listener not registered");
        None
    }

    fn listener_count(&self) -> usize {
        0
    }

    fn scroll_into_view(&self, _anchor: &str, _behavior: ScrollBehavior) -> ScrollOutcome {
        ScrollOutcome::MissingAnchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn guard_releases_once_on_drop() {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let guard = ListenerGuard::new(1, move || c.set(c.get() + 1));
        assert_eq!(guard.id(), 1);
        drop(guard);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn explicit_release_does_not_double_release() {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let guard = ListenerGuard::new(2, move || c.set(c.get() + 1));
        guard.release();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn guard_releases_during_unwind() {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = ListenerGuard::new(3, move || c.set(c.get() + 1));
            panic!("view torn down");
        }));
        assert!(result.is_err());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn null_viewport_is_inert() {
        let vp = NullViewport;
        assert!(!vp.is_interactive());
        assert!(vp.listen_scroll(Box::new(|_| {})).is_none());
        assert_eq!(vp.listener_count(), 0);
        assert_eq!(vp.scroll_offset(), 0.0);
        assert_eq!(
            vp.scroll_into_view("foundations", ScrollBehavior::Smooth),
            ScrollOutcome::MissingAnchor
        );
        vp.scroll_by(10.0);
        assert_eq!(vp.scroll_offset(), 0.0);
    }

    #[test]
    fn rc_forwards() {
        let vp: Rc<NullViewport> = Rc::new(NullViewport);
        assert!(!vp.is_interactive());
        assert_eq!(Viewport::listener_count(&vp), 0);
    }

    #[test]
    fn behavior_names() {
        assert_eq!(ScrollBehavior::Smooth.as_str(), "smooth");
        assert_eq!(ScrollBehavior::Instant.as_str(), "instant");
    }
}
