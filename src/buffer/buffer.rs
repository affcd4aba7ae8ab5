//! Buffer: A grid of cells representing the shared surface.
//!
//! The buffer is the one place every widget's paint closure writes to.
//! Cells are stored contiguously in row-major order; only the multiplexer's
//! serializing thread ever holds a mutable reference.

use super::cell::Cell;

/// A grid of cells representing the shared surface.
///
/// Access is in row-major order: `index = y * width + x`. Out-of-bounds
/// writes are ignored, so paint closures may clip naively against their
/// assigned rectangle.
#[derive(Clone)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to empty (space on white).
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to the cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set the cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Fill a rectangular region with a cell.
    ///
    /// The region is clipped to the buffer bounds.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                let idx = (row as usize) * (self.width as usize) + (col as usize);
                self.cells[idx] = cell;
            }
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Iterate over a single row's cells.
    ///
    /// # Panics
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: u16) -> &[Cell] {
        assert!(y < self.height, "row {y} out of bounds");
        let start = (y as usize) * (self.width as usize);
        &self.cells[start..start + self.width as usize]
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_buffer_zero_width() {
        Buffer::new(0, 24);
    }

    #[test]
    fn test_buffer_get_set() {
        let mut buffer = Buffer::new(80, 24);
        assert!(buffer.set(5, 10, Cell::new('X')));
        assert_eq!(buffer.get(5, 10).unwrap().ch, 'X');
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(79, 24).is_none());
        assert!(!buffer.set(80, 0, Cell::new('X')));
    }

    #[test]
    fn test_buffer_fill_clips() {
        let mut buffer = Buffer::new(10, 4);
        buffer.fill(8, 2, 5, 5, Cell::new('#'));
        assert_eq!(buffer.get(8, 2).unwrap().ch, '#');
        assert_eq!(buffer.get(9, 3).unwrap().ch, '#');
        assert_eq!(buffer.get(7, 2).unwrap().ch, ' ');
    }

    #[test]
    fn test_buffer_row() {
        let mut buffer = Buffer::new(4, 2);
        buffer.set(1, 1, Cell::new('y'));
        let row = buffer.row(1);
        assert_eq!(row.len(), 4);
        assert_eq!(row[1].ch, 'y');
    }
}
