//! Buffer module: cells, the shared surface grid, and text drawing.

#[allow(clippy::module_inception)]
mod buffer;
mod cell;
mod text;

pub use buffer::Buffer;
pub use cell::{Cell, CellFlags, Rgb};
pub use text::{draw_text, text_width, Align, Style};
