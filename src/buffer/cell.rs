//! Cell: The atomic unit of the paintable surface.
//!
//! A cell is a plain `char` plus colors and style flags. Widget text is
//! numeric readouts and short ASCII labels, so there is no grapheme
//! clustering; wide characters occupy two cells via a continuation marker.

use bitflags::bitflags;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

bitflags! {
    /// Per-cell style and bookkeeping flags.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct CellFlags: u8 {
        /// Bold text.
        const BOLD = 0b0000_0001;
        /// Reversed colors (fg/bg swapped).
        const REVERSED = 0b0000_0010;
        /// First column of a double-width character.
        const WIDE = 0b0000_0100;
        /// Second column of a double-width character; emits nothing.
        const CONTINUATION = 0b0000_1000;
    }
}

/// A single cell of the surface: one character plus its style.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    /// The character displayed in this cell.
    pub ch: char,
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Style and bookkeeping flags.
    pub flags: CellFlags,
}

impl Cell {
    /// An empty cell: a space on a white background.
    pub const EMPTY: Self = Self::new(' ');

    /// Create a cell from a character with default colors.
    #[inline]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: Rgb::BLACK,
            bg: Rgb::WHITE,
            flags: CellFlags::empty(),
        }
    }

    /// Set the foreground color (builder style).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder style).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set the style flags (builder style).
    #[inline]
    #[must_use]
    pub const fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Continuation cell for the second column of a wide character.
    #[inline]
    pub const fn continuation(bg: Rgb) -> Self {
        Self {
            ch: ' ',
            fg: Rgb::BLACK,
            bg,
            flags: CellFlags::CONTINUATION,
        }
    }

    /// Whether this cell is the trailing half of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.flags.contains(CellFlags::CONTINUATION)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
