//! Text drawing onto the shared buffer.
//!
//! Single-line text only: every widget in the calculator is one text row
//! tall. Wide characters take two columns; anything past the rectangle's
//! right edge is clipped.

use super::cell::{Cell, CellFlags, Rgb};
use super::Buffer;
use crate::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Horizontal alignment of text within its rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Align {
    /// Flush against the left edge.
    Left,
    /// Flush against the right edge (numeric fields).
    Right,
}

/// Text style: colors plus cell flags.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Style flags (bold, reversed).
    pub flags: CellFlags,
}

impl Style {
    /// Create a plain style from colors.
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            flags: CellFlags::empty(),
        }
    }

    /// Add bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.flags = self.flags.union(CellFlags::BOLD);
        self
    }
}

/// Display width of a string in terminal columns.
pub fn text_width(text: &str) -> u16 {
    text.chars()
        .map(|c| c.width().unwrap_or(0) as u16)
        .sum()
}

/// Draw one line of text into `rect`, filling the whole rectangle with the
/// style's background first.
///
/// Returns the rectangle that was touched, which is always `rect` itself;
/// paint closures hand this straight back to the multiplexer as their dirty
/// region.
pub fn draw_text(buffer: &mut Buffer, text: &str, rect: Rect, style: Style, align: Align) -> Rect {
    buffer.fill(
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        Cell::new(' ').with_fg(style.fg).with_bg(style.bg),
    );
    if rect.is_empty() {
        return rect;
    }

    let width = text_width(text).min(rect.width);
    let mut col = match align {
        Align::Left => rect.x,
        Align::Right => rect.x + rect.width - width,
    };
    let right = rect.right();

    for ch in text.chars() {
        let w = ch.width().unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if col + w > right {
            break;
        }
        let mut flags = style.flags;
        if w == 2 {
            flags |= CellFlags::WIDE;
        }
        buffer.set(
            col,
            rect.y,
            Cell::new(ch)
                .with_fg(style.fg)
                .with_bg(style.bg)
                .with_flags(flags),
        );
        if w == 2 {
            buffer.set(col + 1, rect.y, Cell::continuation(style.bg));
        }
        col += w;
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> Style {
        Style::new(Rgb::BLACK, Rgb::WHITE)
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("rpm"), 3);
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("日"), 2);
    }

    #[test]
    fn test_draw_left_aligned() {
        let mut buffer = Buffer::new(20, 2);
        let rect = Rect::new(2, 0, 10, 1);
        let dirty = draw_text(&mut buffer, "ve", rect, style(), Align::Left);
        assert_eq!(dirty, rect);
        assert_eq!(buffer.get(2, 0).unwrap().ch, 'v');
        assert_eq!(buffer.get(3, 0).unwrap().ch, 'e');
        assert_eq!(buffer.get(4, 0).unwrap().ch, ' ');
    }

    #[test]
    fn test_draw_right_aligned() {
        let mut buffer = Buffer::new(20, 2);
        let rect = Rect::new(0, 1, 6, 1);
        draw_text(&mut buffer, "123", rect, style(), Align::Right);
        assert_eq!(buffer.get(3, 1).unwrap().ch, '1');
        assert_eq!(buffer.get(5, 1).unwrap().ch, '3');
        assert_eq!(buffer.get(0, 1).unwrap().ch, ' ');
    }

    #[test]
    fn test_draw_clips_to_rect() {
        let mut buffer = Buffer::new(20, 1);
        let rect = Rect::new(0, 0, 4, 1);
        draw_text(&mut buffer, "displacement", rect, style(), Align::Left);
        assert_eq!(buffer.get(3, 0).unwrap().ch, 'p');
        // Nothing painted past the rectangle.
        assert_eq!(buffer.get(4, 0).unwrap().ch, ' ');
        assert_eq!(buffer.get(4, 0).unwrap().bg, Rgb::WHITE);
    }

    #[test]
    fn test_draw_wide_char_continuation() {
        let mut buffer = Buffer::new(10, 1);
        let rect = Rect::new(0, 0, 4, 1);
        draw_text(&mut buffer, "日", rect, style(), Align::Left);
        assert_eq!(buffer.get(0, 0).unwrap().ch, '日');
        assert!(buffer.get(1, 0).unwrap().is_continuation());
    }

    #[test]
    fn test_draw_fills_background() {
        let mut buffer = Buffer::new(10, 1);
        let focus = Style::new(Rgb::BLACK, Rgb::new(179, 217, 255));
        draw_text(&mut buffer, "1", Rect::new(0, 0, 5, 1), focus, Align::Right);
        for x in 0..5 {
            assert_eq!(buffer.get(x, 0).unwrap().bg, Rgb::new(179, 217, 255));
        }
    }
}
