//! Layout module: rectangles and the ragged widget grid.
//!
//! Layouts are computed once at startup. There is no tree and no reflow;
//! every widget owns one fixed rectangle for the whole session.

mod grid;
mod rect;

pub use grid::Grid;
pub use rect::Rect;
