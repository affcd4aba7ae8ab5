//! Screen: the real terminal as a paintable surface.
//!
//! Owns the terminal session: raw mode, alternate screen, hidden cursor,
//! focus-change reporting. The multiplexer's serializing thread calls
//! [`Surface::flush`] with the region one paint request touched; only that
//! region is re-emitted.

use crate::buffer::{Buffer, CellFlags, Rgb};
use crate::layout::Rect;
use crate::mux::Surface;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use std::io::{self, Stdout};

/// The terminal screen, set up for cell-buffer painting.
pub struct Screen {
    stdout: Stdout,
    out: super::OutputBuffer,
    width: u16,
    height: u16,
}

impl Screen {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    ///
    /// Restored on drop.
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange, cursor::Hide)?;

        let mut out = super::OutputBuffer::with_capacity(
            (width as usize) * (height as usize) * 4,
        );
        out.clear_screen();
        out.flush_to(&mut stdout)?;
        out.clear();

        Ok(Self {
            stdout,
            out,
            width,
            height,
        })
    }

}

/// Emit one cell run, switching attributes only when the style changes.
fn emit_row(out: &mut super::OutputBuffer, buffer: &Buffer, y: u16, x0: u16, x1: u16) {
    out.cursor_move(x0, y);
    let mut style: Option<(Rgb, Rgb, CellFlags)> = None;
    for x in x0..x1 {
        let Some(cell) = buffer.get(x, y) else { break };
        if cell.is_continuation() {
            // Mid-run, the wide character to its left has already advanced
            // the terminal cursor past this column. A run starting on a
            // continuation cell has emitted nothing yet, so reposition.
            if x == x0 {
                out.cursor_move(x0 + 1, y);
            }
            continue;
        }
        let current = (cell.fg, cell.bg, cell.flags);
        if style != Some(current) {
            out.reset_attrs();
            out.set_fg(cell.fg);
            out.set_bg(cell.bg);
            if cell.flags.contains(CellFlags::BOLD) {
                out.set_bold();
            }
            if cell.flags.contains(CellFlags::REVERSED) {
                out.set_reversed();
            }
            style = Some(current);
        }
        out.write_char(cell.ch);
    }
}

impl Surface for Screen {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn flush(&mut self, buffer: &Buffer, region: Rect) -> io::Result<()> {
        let region = region.intersection(&Rect::from_size(self.width, self.height));
        if region.is_empty() {
            return Ok(());
        }

        self.out.clear();
        for y in region.y..region.bottom() {
            emit_row(&mut self.out, buffer, y, region.x, region.right());
        }
        self.out.reset_attrs();
        self.out.flush_to(&mut self.stdout)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(
            self.stdout,
            cursor::Show,
            DisableFocusChange,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Cell;
    use crate::terminal::OutputBuffer;

    fn wide_row() -> Buffer {
        let mut buffer = Buffer::new(6, 1);
        buffer.set(0, 0, Cell::new('日').with_flags(CellFlags::WIDE));
        buffer.set(1, 0, Cell::continuation(Rgb::WHITE));
        buffer.set(2, 0, Cell::new('a'));
        buffer
    }

    fn emitted(buffer: &Buffer, x0: u16, x1: u16) -> String {
        let mut out = OutputBuffer::new();
        emit_row(&mut out, buffer, 0, x0, x1);
        let mut bytes = Vec::new();
        out.flush_to(&mut bytes).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_emit_row_repositions_past_leading_continuation() {
        // The run starts on the trailing half of a wide character; the
        // cursor must land on column 2 before anything is written, or every
        // later cell shifts one column left.
        let text = emitted(&wide_row(), 1, 4);
        assert!(text.starts_with("\x1b[1;2H\x1b[1;3H"), "got {text:?}");
        assert!(text.contains('a'));
    }

    #[test]
    fn test_emit_row_skips_mid_run_continuation_silently() {
        let text = emitted(&wide_row(), 0, 4);
        // One cursor move only: the wide character itself advances the
        // cursor over its trailing half.
        assert_eq!(text.matches('H').count(), 1);
        assert!(text.contains('日'));
        assert!(text.contains('a'));
    }
}
