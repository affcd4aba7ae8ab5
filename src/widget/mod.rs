//! Widget tasks: long-running threads behind each cell of the calculator.
//!
//! Every widget is a plain function run on its own thread. It consumes its
//! [`Env`](crate::mux::Env) (events in, paint requests out) and, for
//! interactive widgets, a [`FocusSlave`](crate::focus::FocusSlave). A
//! widget exits when a stream it depends on closes, and drops whatever
//! channels it owns on the way out so shutdown keeps cascading.

mod button;
mod input;
mod label;
mod output;

pub use button::button;
pub use input::input;
pub use label::label;
pub use output::output;

use crate::buffer::Rgb;

/// Background of the focused field.
pub const FOCUS_COLOR: Rgb = Rgb::new(179, 217, 255);
/// Foreground of editable and computed values.
pub const GREEN: Rgb = Rgb::new(51, 102, 0);
/// Label foreground.
pub const BLACK: Rgb = Rgb::BLACK;
/// Default background.
pub const WHITE: Rgb = Rgb::WHITE;
