//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crate::buffer::Rgb;
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output for one flush is accumulated here, then written in a single
/// `write()` syscall to prevent tearing mid-repaint.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a character.
    #[inline]
    pub fn write_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.data.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Move cursor to (x, y) position (0-indexed; ANSI is 1-indexed).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        write!(self.data, "\x1b[{};{}H", y + 1, x + 1).unwrap();
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b).unwrap();
    }

    /// Set background color (true color).
    #[inline]
    pub fn set_bg(&mut self, color: Rgb) {
        write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b).unwrap();
    }

    /// Turn bold on.
    #[inline]
    pub fn set_bold(&mut self) {
        self.data.extend_from_slice(b"\x1b[1m");
    }

    /// Turn reverse video on.
    #[inline]
    pub fn set_reversed(&mut self) {
        self.data.extend_from_slice(b"\x1b[7m");
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_move_is_one_indexed() {
        let mut out = OutputBuffer::new();
        out.cursor_move(0, 0);
        assert_eq!(out.data, b"\x1b[1;1H");
    }

    #[test]
    fn test_colors_and_attrs() {
        let mut out = OutputBuffer::new();
        out.reset_attrs();
        out.set_fg(Rgb::new(51, 102, 0));
        out.set_bold();
        out.write_char('7');
        assert_eq!(out.data, b"\x1b[0m\x1b[38;2;51;102;0m\x1b[1m7");
    }

    #[test]
    fn test_clear_resets_for_reuse() {
        let mut out = OutputBuffer::new();
        out.clear_screen();
        assert!(!out.is_empty());
        out.clear();
        assert!(out.is_empty());
    }
}
