//! Grid: Ragged row layout for the widget table.
//!
//! The calculator screen is a table whose rows have different widths (a
//! label-plus-field header row above several label-plus-points rows). The
//! grid assigns each slot one rectangle, row-major, computed once at
//! startup. There is no reflow; widgets keep their rectangle for the whole
//! session.

use super::rect::Rect;

/// Ragged grid layout: one rectangle per slot, row-major.
///
/// Column widths follow the slot's position in its row: slot 0 takes
/// `col_widths[0]`, slot 1 takes `col_widths[1]`, and slots past the end of
/// `col_widths` repeat its last entry. This mirrors the table shape of
/// "wide label column, then uniform data columns".
#[derive(Clone, Debug)]
pub struct Grid {
    /// Number of slots in each row.
    pub rows: Vec<usize>,
    /// Width of each column position; the last entry repeats.
    pub col_widths: Vec<u16>,
    /// Height of every row, in cells.
    pub row_height: u16,
    /// Gap between adjacent slots, in cells.
    pub gap: u16,
}

impl Grid {
    /// Compute the slot rectangles inside `bounds`, row-major.
    ///
    /// Slots that do not fit inside `bounds` get zero-sized rectangles
    /// (clipped, never an error), so callers can wire widgets without
    /// checking the terminal size first.
    ///
    /// # Panics
    /// Panics if `col_widths` is empty or `row_height` is 0.
    pub fn lay(&self, bounds: Rect) -> Vec<Rect> {
        assert!(!self.col_widths.is_empty(), "grid needs column widths");
        assert!(self.row_height > 0, "grid rows need a height");

        let mut rects = Vec::with_capacity(self.rows.iter().sum());
        let mut y = bounds.y;
        for &slots in &self.rows {
            let mut x = bounds.x;
            for slot in 0..slots {
                let width = self.col_widths[slot.min(self.col_widths.len() - 1)];
                let rect = Rect::new(x, y, width, self.row_height).intersection(&bounds);
                rects.push(rect);
                x = x.saturating_add(width + self.gap);
            }
            y = y.saturating_add(self.row_height + self.gap);
        }
        rects
    }
}
