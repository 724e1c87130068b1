#![forbid(unsafe_code)]

//! Elm-style model and command types.
//!
//! A [`Model`] owns application state. The runtime feeds it messages, it
//! answers with a [`Cmd`] describing side effects, and the runtime renders it
//! into a [`Frame`] whenever something changed.
//!
//! Side effects never run inside `update`. In particular a scroll request is
//! returned as [`Cmd::ScrollIntoView`] and executed by the runtime *after*
//! `update` returns, so any state written by `update` is already visible when
//! the viewport starts moving.
//!
//! # Example
//!
//! ```
//! use mlshare_core::event::Event;
//! use mlshare_render::frame::Frame;
//! use mlshare_runtime::program::{Cmd, Model};
//!
//! #[derive(Default)]
//! struct Pager {
//!     page: u8,
//! }
//!
//! enum Msg {
//!     Flip,
//!     Input,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         if event == Event::Tick { Msg::Flip } else { Msg::Input }
//!     }
//! }
//!
//! impl Model for Pager {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Flip => {
//!                 self.page = self.page.wrapping_add(1);
//!                 Cmd::log(format!("page {}", self.page))
//!             }
//!             Msg::Input => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, _frame: &mut Frame) {}
//! }
//! ```

use mlshare_core::event::{Event, MouseEvent};
use mlshare_render::frame::{Frame, HitData, HitId, HitRegion};

use crate::viewport::ScrollRequest;

/// Page state plus the rules that change it.
pub trait Model: Sized {
    /// Everything `update` reacts to. Raw input converts into it.
    type Message: From<Event> + 'static;

    /// Runs once at mount, after the scroll listener is attached.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Apply one message. Effects come back as a command.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Paint the whole document for the current state.
    fn view(&self, frame: &mut Frame);

    /// Translate a click on a registered hit region into a message.
    ///
    /// Called by the runtime for mouse presses that land on a region of the
    /// last rendered frame. Returning `None` falls back to delivering the
    /// raw mouse event.
    fn on_hit(
        &self,
        _id: HitId,
        _region: HitRegion,
        _data: HitData,
        _mouse: &MouseEvent,
    ) -> Option<Self::Message> {
        None
    }
}

/// Effects requested by `update`, run by the runtime afterwards.
#[derive(Debug)]
pub enum Cmd<M> {
    None,
    /// Stop the runner.
    Quit,
    /// Run each in order until one quits.
    Batch(Vec<Cmd<M>>),
    /// Same execution as `Batch`; kept distinct for readers of `update`.
    Sequence(Vec<Cmd<M>>),
    /// Feed a message back into `update`.
    Msg(M),
    /// Ask the viewport to bring an anchor into view. Best effort.
    ScrollIntoView(ScrollRequest),
    /// Record a log line in the runner's output log.
    Log(String),
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn scroll_into_view(request: ScrollRequest) -> Self {
        Self::ScrollIntoView(request)
    }

    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Zero commands collapse to `None`, one to itself.
    pub fn batch(cmds: Vec<Self>) -> Self {
        Self::collapse(cmds, Self::Batch)
    }

    /// Collapses like [`Cmd::batch`].
    pub fn sequence(cmds: Vec<Self>) -> Self {
        Self::collapse(cmds, Self::Sequence)
    }

    fn collapse(mut cmds: Vec<Self>, wrap: fn(Vec<Self>) -> Self) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => wrap(cmds),
        }
    }

    /// Whether this is [`Cmd::None`].
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// Knobs of [`crate::step::StepProgram`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramConfig {
    /// Apply wheel and scroll keys to the viewport, as a browser would.
    pub native_scroll: bool,
    /// Rows per wheel notch or arrow key.
    pub line_step: u16,
    /// Push [`Event::Tick`] on every clock advance.
    pub ticks: bool,
    /// Upper bound on events drained by one step.
    pub max_events_per_step: usize,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            native_scroll: true,
            line_step: 3,
            ticks: false,
            max_events_per_step: 1024,
        }
    }
}

impl ProgramConfig {
    /// Disable native scrolling.
    #[must_use]
    pub fn without_native_scroll(mut self) -> Self {
        self.native_scroll = false;
        self
    }

    /// Set the wheel / arrow step.
    #[must_use]
    pub fn with_line_step(mut self, rows: u16) -> Self {
        self.line_step = rows.max(1);
        self
    }

    /// Enable tick events.
    #[must_use]
    pub fn with_ticks(mut self) -> Self {
        self.ticks = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ScrollBehavior;

    #[test]
    fn batch_collapses() {
        assert!(Cmd::<()>::batch(vec![]).is_none());
        assert!(matches!(Cmd::<()>::batch(vec![Cmd::quit()]), Cmd::Quit));
        assert!(matches!(
            Cmd::<()>::batch(vec![Cmd::quit(), Cmd::none()]),
            Cmd::Batch(v) if v.len() == 2
        ));
    }

    #[test]
    fn sequence_collapses() {
        assert!(Cmd::<()>::sequence(vec![]).is_none());
        assert!(matches!(Cmd::<u8>::sequence(vec![Cmd::msg(4)]), Cmd::Msg(4)));
        assert!(matches!(
            Cmd::<()>::sequence(vec![Cmd::log("a"), Cmd::log("b")]),
            Cmd::Sequence(v) if v.len() == 2
        ));
    }

    #[test]
    fn scroll_command_carries_request() {
        let cmd: Cmd<()> = Cmd::scroll_into_view(ScrollRequest::new("agents", ScrollBehavior::Smooth));
        match cmd {
            Cmd::ScrollIntoView(req) => {
                assert_eq!(req.anchor, "agents");
                assert_eq!(req.behavior, ScrollBehavior::Smooth);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn config_builders() {
        let cfg = ProgramConfig::default()
            .without_native_scroll()
            .with_line_step(0)
            .with_ticks();
        assert!(!cfg.native_scroll);
        assert_eq!(cfg.line_step, 1);
        assert!(cfg.ticks);
    }
}
