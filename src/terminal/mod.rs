//! Terminal module: ANSI output buffering and the real-screen surface.

mod output;
mod screen;

pub use output::OutputBuffer;
pub use screen::Screen;
