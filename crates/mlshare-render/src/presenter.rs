#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! Turns the difference between two window buffers into terminal output,
//! tracking the current style and cursor so redundant sequences are skipped.
//! Output is wrapped in DEC 2026 synchronized-output markers and flushed once
//! per frame.

use std::io::{self, BufWriter, Write};

use crate::buffer::{Buffer, ChangeRun};
use crate::cell::{Cell, PackedRgba, StyleFlags};

const BUFFER_CAPACITY: usize = 64 * 1024;
const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";
const SYNC_END: &[u8] = b"\x1b[?2026l";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    flags: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            flags: cell.flags,
        }
    }
}

/// Per-frame output counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentStats {
    pub runs: usize,
    pub cells: usize,
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    current_style: Option<CellStyle>,
    cursor: Option<(u16, u16)>,
    sync_output: bool,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter. `sync_output` enables DEC 2026 wrapping.
    pub fn new(writer: W, sync_output: bool) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            cursor: None,
            sync_output,
        }
    }

    /// Emit the cells of `next` that differ from `prev`.
    pub fn present(&mut self, next: &Buffer, prev: &Buffer) -> io::Result<PresentStats> {
        let runs = next.diff(prev);
        let mut stats = PresentStats {
            runs: runs.len(),
            cells: 0,
        };
        if self.sync_output {
            self.writer.write_all(SYNC_BEGIN)?;
        }
        for run in &runs {
            stats.cells += self.emit_run(next, run)?;
        }
        self.writer.write_all(b"\x1b[0m")?;
        self.current_style = None;
        if self.sync_output {
            self.writer.write_all(SYNC_END)?;
        }
        self.writer.flush()?;
        tracing::trace!(runs = stats.runs, cells = stats.cells, "frame presented");
        Ok(stats)
    }

    fn emit_run(&mut self, buffer: &Buffer, run: &ChangeRun) -> io::Result<usize> {
        self.move_cursor_to(run.x0, run.y)?;
        let mut emitted = 0;
        for x in run.x0..=run.x1 {
            let Some(cell) = buffer.get(x, run.y) else {
                break;
            };
            if cell.is_continuation() {
                continue;
            }
            self.emit_style(cell)?;
            let mut utf8 = [0u8; 4];
            let text = cell.ch.unwrap_or(' ').encode_utf8(&mut utf8);
            self.writer.write_all(text.as_bytes())?;
            emitted += 1;
            if let Some((cx, cy)) = self.cursor {
                self.cursor = Some((cx.saturating_add(cell.width() as u16), cy));
            }
        }
        Ok(emitted)
    }

    fn emit_style(&mut self, cell: &Cell) -> io::Result<()> {
        let style = CellStyle::from_cell(cell);
        if self.current_style == Some(style) {
            return Ok(());
        }
        // Reset then apply: simpler than incremental SGR and always correct.
        self.writer.write_all(b"\x1b[0m")?;
        if style.fg.a() > 0 {
            write!(
                self.writer,
                "\x1b[38;2;{};{};{}m",
                style.fg.r(),
                style.fg.g(),
                style.fg.b()
            )?;
        }
        if style.bg.a() > 0 {
            write!(
                self.writer,
                "\x1b[48;2;{};{};{}m",
                style.bg.r(),
                style.bg.g(),
                style.bg.b()
            )?;
        }
        for (flag, code) in [
            (StyleFlags::BOLD, 1),
            (StyleFlags::DIM, 2),
            (StyleFlags::ITALIC, 3),
            (StyleFlags::UNDERLINE, 4),
            (StyleFlags::REVERSE, 7),
        ] {
            if style.flags.contains(flag) {
                write!(self.writer, "\x1b[{code}m")?;
            }
        }
        self.current_style = Some(style);
        Ok(())
    }

    fn move_cursor_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        if self.cursor == Some((x, y)) {
            return Ok(());
        }
        write!(self.writer, "\x1b[{};{}H", y + 1, x + 1)?;
        self.cursor = Some((x, y));
        Ok(())
    }

    /// Clear the entire screen and home the cursor.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\x1b[2J\x1b[H")?;
        self.cursor = Some((0, 0));
        self.writer.flush()
    }

    /// Forget tracked terminal state (after resize or external output).
    pub fn reset(&mut self) {
        self.current_style = None;
        self.cursor = None;
    }

    /// Get the inner writer, flushing first.
    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
