//! # Volute
//!
//! An engine air-mass-flow calculator for the terminal, for sizing
//! turbocharger compressors against a set of operating points.
//!
//! Volute is built as a swarm of small threads talking over rendezvous
//! channels. No widget owns the screen and no event queue buffers input;
//! every hand-off blocks until the other side takes it, and shutdown is
//! nothing more than closing channels and letting the closure cascade.
//!
//! ## Core Concepts
//!
//! - **Broadcast**: one source channel fanned out to many destinations,
//!   preserving order
//! - **Focus coordination**: a master grants focus to exactly one widget at
//!   a time; widgets are revoked before their successor is granted
//! - **Mux**: one environment per widget, delivering shared input events
//!   and serializing paint requests onto a single buffer
//!
//! ## Example
//!
//! ```rust,ignore
//! use volute::{Broadcast, Event};
//! use crossbeam_channel::bounded;
//!
//! let (tx, rx) = bounded::<Event>(0);
//! let broadcast = Broadcast::new(rx);
//! let consumer = broadcast.add_destination();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod broadcast;
pub mod buffer;
pub mod engine;
pub mod event;
pub mod focus;
pub mod input;
pub mod layout;
pub mod mux;
pub mod terminal;
pub mod widget;

#[cfg(test)]
mod test_util;

// Re-exports for convenience
pub use broadcast::Broadcast;
pub use buffer::{Buffer, Cell, CellFlags, Rgb};
pub use event::{Event, KeyCode, KeyModifiers};
pub use focus::{Direction, FocusMaster, FocusSlave};
pub use input::InputActor;
pub use layout::{Grid, Rect};
pub use mux::{DrawFn, Env, Mux, Surface};
pub use terminal::Screen;
