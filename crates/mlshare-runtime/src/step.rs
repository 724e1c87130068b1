#![forbid(unsafe_code)]

//! Host-driven step runner.
//!
//! [`StepProgram`] runs a [`Model`] without owning a loop, a thread or a real
//! clock. The host pushes events, advances a deterministic clock and calls
//! [`StepProgram::step`] once per frame. The same runner backs the terminal
//! host, the browser host and every end-to-end test.
//!
//! # Lifecycle
//!
//! - [`init`](StepProgram::init) mounts the page: it registers exactly one
//!   scroll listener on the viewport, runs `Model::init`, and renders the
//!   first frame. Calling it again does nothing.
//! - [`unmount`](StepProgram::unmount) releases the listener. Dropping the
//!   program does the same, so the listener never outlives the page on any
//!   exit path.
//!
//! # Scroll signals
//!
//! The listener does not touch the model. It appends [`Event::Scroll`] to the
//! same FIFO queue host events go through, so scroll signals interleave with
//! input in arrival order and each one is delivered as its own `update`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use mlshare_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use mlshare_render::buffer::Buffer;
use mlshare_render::frame::Frame;

use crate::program::{Cmd, Model, ProgramConfig};
use crate::viewport::{ListenerGuard, ScrollOutcome, Viewport};

/// Monotonic clock advanced only by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time since the clock started.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Jump to an absolute time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

/// Outcome of one [`StepProgram::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// False once the model asked to quit.
    pub running: bool,
    /// Whether a new frame was rendered.
    pub rendered: bool,
    /// Events taken from the queue.
    pub events_processed: usize,
    /// Frames rendered so far.
    pub frame_idx: u64,
}

type EventQueue = Rc<RefCell<VecDeque<Event>>>;

/// Host-driven runner for a model over a viewport.
pub struct StepProgram<M: Model, V: Viewport> {
    model: M,
    viewport: V,
    config: ProgramConfig,
    queue: EventQueue,
    listener: Option<ListenerGuard>,
    clock: DeterministicClock,
    width: u16,
    height: u16,
    frame: Frame,
    logs: Vec<String>,
    scroll_outcomes: Vec<ScrollOutcome>,
    initialized: bool,
    running: bool,
    dirty: bool,
    frame_idx: u64,
}

impl<M: Model, V: Viewport> StepProgram<M, V> {
    /// Create an unmounted program with a `width` x `height` window.
    pub fn new(model: M, viewport: V, width: u16, height: u16) -> Self {
        Self::with_config(model, viewport, width, height, ProgramConfig::default())
    }

    /// Create an unmounted program with explicit configuration.
    pub fn with_config(
        model: M,
        viewport: V,
        width: u16,
        height: u16,
        config: ProgramConfig,
    ) -> Self {
        Self {
            model,
            viewport,
            config,
            queue: Rc::new(RefCell::new(VecDeque::new())),
            listener: None,
            clock: DeterministicClock::new(),
            width,
            height,
            frame: Frame::new(width, height),
            logs: Vec::new(),
            scroll_outcomes: Vec::new(),
            initialized: false,
            running: true,
            dirty: true,
            frame_idx: 0,
        }
    }

    /// Mount: register the scroll listener, run `init`, render.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let queue: Weak<RefCell<VecDeque<Event>>> = Rc::downgrade(&self.queue);
        self.listener = self.viewport.listen_scroll(Box::new(move |offset| {
            if let Some(queue) = queue.upgrade() {
                queue.borrow_mut().push_back(Event::scroll(offset));
            }
        }));
        tracing::debug!(
            interactive = self.viewport.is_interactive(),
            listener = self.listener.is_some(),
            "page mounted"
        );
        let cmd = self.model.init();
        self.execute(cmd);
        self.render();
    }

    /// Unmount: release the scroll listener. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(guard) = self.listener.take() {
            guard.release();
            tracing::debug!("page unmounted");
        }
    }

    /// Whether `init` ran.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the scroll listener is held.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queue a host event for the next step.
    pub fn push_event(&mut self, event: Event) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Events waiting for the next step.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Resize the window. The model sees a `Resize` event on the next step.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.dirty = true;
        self.push_event(Event::Resize { width, height });
    }

    /// Advance the clock, driving viewport animations.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
        self.viewport.tick(dt);
        if self.config.ticks {
            self.push_event(Event::Tick);
        }
    }

    /// Set the clock to an absolute time, ticking by the difference.
    pub fn set_time(&mut self, now: Duration) {
        let dt = now.saturating_sub(self.clock.now());
        if !dt.is_zero() {
            self.advance_time(dt);
        }
    }

    /// Drain queued events, then render if anything changed.
    pub fn step(&mut self) -> StepResult {
        if !self.initialized {
            self.init();
        }
        let mut processed = 0;
        while self.running && processed < self.config.max_events_per_step {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            processed += 1;
            self.handle_event(event);
        }
        let rendered = if self.running && self.dirty {
            self.render();
            true
        } else {
            false
        };
        StepResult {
            running: self.running,
            rendered,
            events_processed: processed,
            frame_idx: self.frame_idx,
        }
    }

    /// Deliver one event immediately, bypassing the queue.
    pub fn dispatch(&mut self, event: Event) {
        self.handle_event(event);
    }

    /// Deliver one model message immediately.
    pub fn send(&mut self, msg: M::Message) {
        self.update(msg);
    }

    fn handle_event(&mut self, event: Event) {
        if self.config.native_scroll {
            self.apply_native_scroll(&event);
        }
        if let Event::Mouse(mouse) = &event
            && let Some(msg) = self.resolve_hit(mouse)
        {
            self.update(msg);
            return;
        }
        self.update(M::Message::from(event));
    }

    fn update(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute(cmd);
    }

    fn resolve_hit(&self, mouse: &MouseEvent) -> Option<M::Message> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return None;
        }
        let (id, region, data) = self
            .frame
            .hit_test_window(mouse.x, mouse.y, self.window_offset())?;
        tracing::trace!(hit_id = id.id(), ?region, data, "hit");
        self.model.on_hit(id, region, data, mouse)
    }

    /// Browser default actions for wheel and scroll keys.
    fn apply_native_scroll(&self, event: &Event) {
        let line = f64::from(self.config.line_step);
        let page = f64::from(self.height.saturating_sub(2).max(1));
        match event {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                ..
            }) => self.viewport.scroll_by(line),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollUp,
                ..
            }) => self.viewport.scroll_by(-line),
            Event::Key(key) if key.is_press() && key.modifiers.is_empty() => {
                if let Some(action) = scroll_key(key, line, page) {
                    match action {
                        ScrollKey::By(delta) => self.viewport.scroll_by(delta),
                        ScrollKey::Top => self.viewport.scroll_to(0.0),
                        ScrollKey::Bottom => self.viewport.scroll_to(f64::MAX),
                    }
                }
            }
            _ => {}
        }
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => {
                tracing::debug!("quit requested");
                self.running = false;
            }
            Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                for cmd in cmds {
                    if !self.running {
                        break;
                    }
                    self.execute(cmd);
                }
            }
            Cmd::Msg(msg) => self.update(msg),
            Cmd::ScrollIntoView(request) => {
                let outcome = self
                    .viewport
                    .scroll_into_view(request.anchor.as_str(), request.behavior);
                tracing::debug!(
                    anchor = request.anchor.as_str(),
                    requested = outcome.is_requested(),
                    "scroll command executed"
                );
                self.scroll_outcomes.push(outcome);
            }
            Cmd::Log(line) => {
                tracing::info!(target: "mlshare::log", "{line}");
                self.logs.push(line);
            }
        }
    }

    fn render(&mut self) {
        let mut frame = Frame::with_hit_grid(self.width, self.height);
        self.model.view(&mut frame);
        self.viewport.sync_document(&frame.metrics());
        self.frame = frame;
        self.dirty = false;
        self.frame_idx += 1;
        tracing::trace!(
            frame_idx = self.frame_idx,
            document_height = self.frame.document_height(),
            "frame rendered"
        );
    }

    /// Current scroll offset in whole rows.
    #[must_use]
    pub fn window_offset(&self) -> u16 {
        let offset = self.viewport.scroll_offset().max(0.0).floor();
        if offset >= f64::from(u16::MAX) {
            u16::MAX
        } else {
            offset as u16
        }
    }

    /// Last rendered document frame.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Visible window of the last frame at the current offset.
    #[must_use]
    pub fn window(&self) -> Buffer {
        self.frame.window(self.window_offset())
    }

    /// Visible window as plain text rows.
    #[must_use]
    pub fn window_text(&self) -> Vec<String> {
        self.window().to_text()
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        self.dirty = true;
        &mut self.model
    }

    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    #[must_use]
    pub fn clock(&self) -> DeterministicClock {
        self.clock
    }

    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Outcomes of executed scroll commands, oldest first.
    #[must_use]
    pub fn scroll_outcomes(&self) -> &[ScrollOutcome] {
        &self.scroll_outcomes
    }

    /// Drain `Cmd::Log` lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }
}

impl<M: Model, V: Viewport> Drop for StepProgram<M, V> {
    fn drop(&mut self) {
        self.unmount();
    }
}

enum ScrollKey {
    By(f64),
    Top,
    Bottom,
}

fn scroll_key(key: &KeyEvent, line: f64, page: f64) -> Option<ScrollKey> {
    Some(match key.code {
        KeyCode::Down => ScrollKey::By(line),
        KeyCode::Up => ScrollKey::By(-line),
        KeyCode::PageDown | KeyCode::Char(' ') => ScrollKey::By(page),
        KeyCode::PageUp => ScrollKey::By(-page),
        KeyCode::Home => ScrollKey::Top,
        KeyCode::End => ScrollKey::Bottom,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{NullViewport, ScrollBehavior, ScrollRequest};
    use crate::virtual_viewport::VirtualViewport;
    use mlshare_core::geometry::Rect;
    use mlshare_render::frame::{HitData, HitId, HitRegion};
    use mlshare_render::style::Style;
    use pretty_assertions::assert_eq;

    /// Tall document with two anchors and one button.
    struct Doc {
        offsets: Vec<f64>,
        clicks: u32,
        keys: u32,
    }

    #[derive(Debug)]
    enum Msg {
        Scrolled(f64),
        Jump(&'static str),
        Clicked,
        Key,
        Quit,
        Other,
    }

    impl From<Event> for Msg {
        fn from(event: Event) -> Self {
            match event {
                Event::Scroll(s) => Msg::Scrolled(s.offset),
                Event::Key(k) if k.is_char('q') => Msg::Quit,
                Event::Key(_) => Msg::Key,
                _ => Msg::Other,
            }
        }
    }

    impl Model for Doc {
        type Message = Msg;

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Scrolled(o) => self.offsets.push(o),
                Msg::Jump(to) => {
                    return Cmd::batch(vec![
                        Cmd::log(format!("jump {to}")),
                        Cmd::scroll_into_view(ScrollRequest::new(to, ScrollBehavior::Instant)),
                    ]);
                }
                Msg::Clicked => self.clicks += 1,
                Msg::Key => self.keys += 1,
                Msg::Quit => return Cmd::quit(),
                Msg::Other => {}
            }
            Cmd::none()
        }

        fn view(&self, frame: &mut Frame) {
            frame.set_document_height(100);
            frame.set_anchor("top", 0);
            frame.set_anchor("bottom", 80);
            frame
                .buffer
                .set_string(0, 80, "bottom", Style::new(), frame.width());
            frame.register_hit(Rect::new(0, 1, 5, 1), HitId::new(1), HitRegion::Button, 0);
        }

        fn on_hit(&self, id: HitId, _: HitRegion, _: HitData, _: &MouseEvent) -> Option<Msg> {
            (id == HitId::new(1)).then_some(Msg::Clicked)
        }
    }

    fn doc() -> Doc {
        Doc {
            offsets: Vec::new(),
            clicks: 0,
            keys: 0,
        }
    }

    fn program() -> StepProgram<Doc, Rc<VirtualViewport>> {
        StepProgram::new(doc(), Rc::new(VirtualViewport::new(10)), 20, 10)
    }

    #[test]
    fn init_registers_one_listener_and_renders() {
        let mut p = program();
        assert_eq!(p.viewport().listener_count(), 0);
        p.init();
        p.init();
        assert_eq!(p.viewport().listener_count(), 1);
        assert_eq!(p.frame_idx(), 1);
        assert_eq!(p.frame().document_height(), 100);
        p.step();
        p.step();
        assert_eq!(p.viewport().listener_count(), 1);
    }

    #[test]
    fn drop_releases_listener() {
        let vp = Rc::new(VirtualViewport::new(10));
        {
            let mut p = StepProgram::new(doc(), Rc::clone(&vp), 20, 10);
            p.init();
            assert_eq!(vp.listener_count(), 1);
        }
        assert_eq!(vp.listener_count(), 0);
    }

    #[test]
    fn unmount_is_idempotent() {
        let mut p = program();
        p.init();
        p.unmount();
        p.unmount();
        assert_eq!(p.viewport().listener_count(), 0);
        assert!(!p.is_mounted());
    }

    #[test]
    fn scroll_signals_arrive_as_events_in_order() {
        let mut p = program();
        p.init();
        for off in [3.0, 7.0, 5.0] {
            p.viewport().scroll_to(off);
        }
        let res = p.step();
        assert_eq!(res.events_processed, 3);
        assert!(res.rendered);
        assert_eq!(p.model().offsets, vec![3.0, 7.0, 5.0]);
    }

    #[test]
    fn scroll_command_runs_after_update() {
        let mut p = program();
        p.init();
        p.send(Msg::Jump("bottom"));
        assert_eq!(p.take_logs(), vec!["jump bottom".to_string()]);
        assert_eq!(p.viewport().scroll_offset(), 80.0);
        assert!(p.scroll_outcomes()[0].is_requested());
        p.step();
        assert_eq!(p.model().offsets, vec![80.0]);
        assert_eq!(p.window_text()[0], "bottom");
    }

    #[test]
    fn missing_anchor_is_recorded_not_fatal() {
        let mut p = program();
        p.init();
        p.send(Msg::Jump("nowhere"));
        assert_eq!(p.scroll_outcomes(), &[ScrollOutcome::MissingAnchor]);
        assert_eq!(p.viewport().scroll_offset(), 0.0);
    }

    #[test]
    fn native_scroll_keys_move_viewport() {
        let mut p = program();
        p.init();
        p.push_event(Event::key(KeyCode::Down));
        p.push_event(Event::key(KeyCode::PageDown));
        p.step();
        assert_eq!(p.viewport().scroll_offset(), 3.0 + 8.0);
        p.push_event(Event::key(KeyCode::End));
        p.step();
        assert_eq!(p.viewport().scroll_offset(), 90.0);
        p.push_event(Event::key(KeyCode::Home));
        p.step();
        assert_eq!(p.viewport().scroll_offset(), 0.0);
        // Keys still reach the model.
        assert_eq!(p.model().keys, 4);
    }

    #[test]
    fn wheel_scrolls() {
        let mut p = program();
        p.init();
        p.push_event(Event::Mouse(MouseEvent::new(MouseEventKind::ScrollDown, 0, 0)));
        p.step();
        assert_eq!(p.viewport().scroll_offset(), 3.0);
    }

    #[test]
    fn clicks_resolve_through_hit_grid() {
        let mut p = program();
        p.init();
        p.push_event(Event::click(2, 1));
        p.push_event(Event::click(2, 5));
        p.step();
        assert_eq!(p.model().clicks, 1);
    }

    #[test]
    fn quit_stops_processing() {
        let mut p = program();
        p.init();
        p.push_event(Event::key(KeyCode::Char('q')));
        p.push_event(Event::key(KeyCode::Char('x')));
        let res = p.step();
        assert!(!res.running);
        assert!(!res.rendered);
        assert_eq!(res.events_processed, 1);
        assert_eq!(p.pending_events(), 1);
    }

    #[test]
    fn null_viewport_never_registers() {
        let mut p = StepProgram::new(doc(), NullViewport, 20, 10);
        p.init();
        assert!(!p.is_mounted());
        p.push_event(Event::key(KeyCode::PageDown));
        p.step();
        assert!(p.model().offsets.is_empty());
        assert_eq!(p.window_offset(), 0);
    }

    #[test]
    fn advance_time_drives_smooth_scroll() {
        let vp = Rc::new(VirtualViewport::with_duration(10, Duration::from_millis(100)));
        let mut p = StepProgram::new(doc(), Rc::clone(&vp), 20, 10);
        p.init();
        vp.scroll_into_view("bottom", ScrollBehavior::Smooth);
        p.advance_time(Duration::from_millis(50));
        p.advance_time(Duration::from_millis(50));
        p.step();
        assert_eq!(p.model().offsets.len(), 2);
        assert_eq!(p.model().offsets.last(), Some(&80.0));
        assert_eq!(p.clock().now(), Duration::from_millis(100));
    }

    #[test]
    fn set_time_never_goes_backwards() {
        let mut clock = DeterministicClock::new();
        clock.set(Duration::from_secs(2));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[test]
    fn resize_rerenders_at_new_size() {
        let mut p = program();
        p.init();
        p.resize(30, 12);
        let res = p.step();
        assert!(res.rendered);
        assert_eq!(p.frame().width(), 30);
        assert_eq!(p.window().height(), 12);
    }
}
