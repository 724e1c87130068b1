#![forbid(unsafe_code)]

//! Interactive terminal host.
//!
//! Puts the terminal into raw mode on the alternate screen, feeds crossterm
//! input into a [`StepProgram`] over a [`VirtualViewport`], and presents the
//! visible window after every rendered step. Smooth scrolls are driven by
//! wall-clock time between steps.
//!
//! # Cleanup Order
//!
//! [`TerminalSession`] restores the terminal on drop, in reverse order of
//! enabling: mouse capture, cursor, alternate screen, raw mode. Errors during
//! cleanup are ignored so that drop never panics.

use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event as ct;
use mlshare_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
use mlshare_render::buffer::Buffer;
use mlshare_render::presenter::Presenter;
use mlshare_runtime::step::StepProgram;
use mlshare_runtime::virtual_viewport::VirtualViewport;

use crate::app::DeckModel;
use crate::config::DeckConfig;
use crate::error::{DeckError, Result};

/// Poll timeout while nothing animates.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// RAII guard over raw mode, alternate screen and mouse capture.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
    mouse: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, optionally capturing the mouse.
    pub fn enter(mouse: bool) -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");
        // From here on, drop undoes whatever got enabled.
        let mut session = Self {
            alternate_screen: false,
            mouse: false,
        };
        let mut stdout = io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::Hide,
            crossterm::cursor::MoveTo(0, 0)
        )?;
        session.alternate_screen = true;
        if mouse {
            crossterm::execute!(stdout, ct::EnableMouseCapture)?;
            session.mouse = true;
            tracing::info!("mouse capture enabled");
        }
        Ok(session)
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = crossterm::execute!(stdout, ct::DisableMouseCapture);
            self.mouse = false;
        }
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
        if self.alternate_screen {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::info!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Convert a crossterm event into a deck event.
///
/// Returns `None` for input the deck has no use for (paste, release-only
/// keys on terminals without kind reporting, unmapped key codes).
#[must_use]
pub fn convert_event(event: ct::Event) -> Option<Event> {
    match event {
        ct::Event::Key(key) => convert_key(key).map(Event::Key),
        ct::Event::Mouse(mouse) => convert_mouse(mouse).map(Event::Mouse),
        ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        ct::Event::FocusGained => Some(Event::Focus(true)),
        ct::Event::FocusLost => Some(Event::Focus(false)),
        ct::Event::Paste(_) => None,
    }
}

fn convert_key(key: ct::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Esc => KeyCode::Escape,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    let kind = match key.kind {
        ct::KeyEventKind::Press => KeyEventKind::Press,
        ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
        ct::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(
        KeyEvent::new(code)
            .with_modifiers(convert_modifiers(key.modifiers))
            .with_kind(kind),
    )
}

fn convert_mouse(mouse: ct::MouseEvent) -> Option<MouseEvent> {
    let kind = match mouse.kind {
        ct::MouseEventKind::Down(button) => MouseEventKind::Down(convert_button(button)),
        ct::MouseEventKind::Up(button) => MouseEventKind::Up(convert_button(button)),
        ct::MouseEventKind::Drag(button) => MouseEventKind::Drag(convert_button(button)),
        ct::MouseEventKind::Moved => MouseEventKind::Moved,
        ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        ct::MouseEventKind::ScrollLeft | ct::MouseEventKind::ScrollRight => return None,
    };
    let mut event = MouseEvent::new(kind, mouse.column, mouse.row);
    event.modifiers = convert_modifiers(mouse.modifiers);
    Some(event)
}

fn convert_button(button: ct::MouseButton) -> MouseButton {
    match button {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    }
}

fn convert_modifiers(modifiers: ct::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if modifiers.contains(ct::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(ct::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(ct::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if modifiers.contains(ct::KeyModifiers::SUPER) {
        out |= Modifiers::SUPER;
    }
    out
}

/// Run the deck interactively until the model quits.
pub fn run(model: DeckModel, config: &DeckConfig) -> Result<()> {
    let session = TerminalSession::enter(config.terminal.mouse)?;
    let (width, height) = crossterm::terminal::size()?;
    if width == 0 || height == 0 {
        return Err(DeckError::terminal("terminal reports a zero-sized window"));
    }
    tracing::info!(width, height, "terminal session started");

    let viewport = Rc::new(VirtualViewport::with_duration(
        height,
        config.smooth_duration(),
    ));
    let mut program = StepProgram::with_config(
        model,
        Rc::clone(&viewport),
        width,
        height,
        config.program_config(),
    );
    let mut presenter = Presenter::new(io::stdout(), true);
    presenter.clear_screen()?;
    let mut previous = Buffer::new(width, height);
    let mut last = Instant::now();
    let frame_interval = config.frame_interval();

    program.init();
    loop {
        let result = program.step();
        if !result.running {
            break;
        }
        if result.rendered {
            let next = program.window();
            if next.width() != previous.width() || next.height() != previous.height() {
                presenter.reset();
                presenter.clear_screen()?;
                previous = Buffer::new(next.width(), next.height());
            }
            presenter.present(&next, &previous)?;
            previous = next;
        }

        let timeout = if viewport.is_animating() {
            frame_interval
        } else {
            IDLE_POLL
        };
        if ct::poll(timeout)? {
            loop {
                match convert_event(ct::read()?) {
                    Some(Event::Resize { width, height }) => program.resize(width, height),
                    Some(event) => program.push_event(event),
                    None => {}
                }
                if !ct::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        let now = Instant::now();
        program.advance_time(now.duration_since(last));
        last = now;
    }

    tracing::info!(frames = program.frame_idx(), "terminal session ended");
    drop(program);
    drop(session);
    Ok(())
}
