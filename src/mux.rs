//! Mux: the event/draw multiplexer behind every widget task.
//!
//! Many widget threads run concurrently, yet there is one input-event
//! stream and one surface. The mux gives each widget an [`Env`], a private
//! view onto both: a receiver carrying every input event (fanned out
//! through [`Broadcast`]) and a sender for paint-request closures. A single
//! serializing thread owns the shared [`Buffer`] and the [`Surface`]; it
//! applies one closure at a time and flushes exactly the rectangle the
//! closure reports, so no two widgets ever touch the surface concurrently.
//!
//! Shutdown is cooperative: a widget that exits drops its `Env`, releasing
//! its clone of the draw sender. The serializer exits once every clone is
//! gone; the event fan-out ends when the input source closes. Environments
//! may close in any order while the rest keep painting.

use crate::broadcast::Broadcast;
use crate::buffer::Buffer;
use crate::event::Event;
use crate::layout::Rect;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::io;
use std::thread::{self, JoinHandle};

/// A paint request: paints some sub-region of the buffer and reports the
/// rectangle it touched.
pub type DrawFn = Box<dyn FnOnce(&mut Buffer) -> Rect + Send>;

/// Something the serialized buffer contents can be flushed to.
///
/// The mux owns the surface for its whole life; implementations never see
/// concurrent calls.
pub trait Surface {
    /// Surface dimensions in cells; fixes the shared buffer's size.
    fn size(&self) -> (u16, u16);

    /// Present `region` of `buffer`. Called once per applied paint request.
    fn flush(&mut self, buffer: &Buffer, region: Rect) -> io::Result<()>;
}

/// A widget's private view of the multiplexer.
///
/// Leased, never owning: dropping an `Env` tells the mux this widget is
/// done, and nothing else.
pub struct Env {
    events: Receiver<Event>,
    draw: Sender<DrawFn>,
}

impl Env {
    /// The shared input-event stream. Closed when the input source ends.
    pub const fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Send a paint request, blocking until the serializing thread accepts
    /// it. A no-op once the serializer has shut down.
    pub fn paint<F>(&self, draw: F)
    where
        F: FnOnce(&mut Buffer) -> Rect + Send + 'static,
    {
        let _ = self.draw.send(Box::new(draw));
    }
}

/// The event/draw multiplexer.
pub struct Mux {
    events: Broadcast<Event>,
    draw_tx: Sender<DrawFn>,
    handle: JoinHandle<()>,
}

impl Mux {
    /// Build a mux over `surface`, fed by `source`, and return it together
    /// with the root environment (conventionally the driver's).
    ///
    /// # Panics
    /// Panics if the OS fails to spawn the serializing thread.
    pub fn new<S>(surface: S, source: Receiver<Event>) -> (Self, Env)
    where
        S: Surface + Send + 'static,
    {
        let (width, height) = surface.size();
        let (draw_tx, draw_rx) = bounded::<DrawFn>(0);

        let handle = thread::Builder::new()
            .name("volute-mux".to_string())
            .spawn(move || {
                if let Err(e) = serialize(surface, &draw_rx, width, height) {
                    eprintln!("surface error: {e}");
                }
            })
            .expect("Failed to spawn mux thread");

        let events = Broadcast::new(source);
        let mux = Self {
            events,
            draw_tx,
            handle,
        };
        let root = mux.make_env();
        (mux, root)
    }

    /// Lease a fresh environment sharing the event stream and funneling
    /// into the same paint-request stream as every other environment.
    pub fn make_env(&self) -> Env {
        Env {
            events: self.events.add_destination(),
            draw: self.draw_tx.clone(),
        }
    }

    /// Shut down: stop accepting paint requests from this handle, wait for
    /// the event fan-out to finish, and join the serializing thread.
    ///
    /// Every environment must already be dropped (widgets exited) and the
    /// event source closed, or this blocks until they are.
    pub fn wait(self) {
        let Self {
            events,
            draw_tx,
            handle,
        } = self;
        drop(draw_tx);
        events.wait();
        let _ = handle.join();
    }
}

/// The serializing loop: sole mutator of the shared buffer and surface.
fn serialize<S: Surface>(
    mut surface: S,
    draw_rx: &Receiver<DrawFn>,
    width: u16,
    height: u16,
) -> io::Result<()> {
    let mut buffer = Buffer::new(width, height);
    for draw in draw_rx {
        let dirty = draw(&mut buffer);
        if !dirty.is_empty() {
            surface.flush(&buffer, dirty)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Cell;
    use crate::event::KeyCode;
    use crate::test_util::TestSurface;

    #[test]
    fn test_every_env_sees_every_event_in_order() {
        let (surface, _flushes) = TestSurface::new(10, 2);
        let (event_tx, event_rx) = bounded(0);
        let (mux, root) = Mux::new(surface, event_rx);

        let collectors: Vec<_> = (0..3)
            .map(|_| {
                let env = mux.make_env();
                thread::spawn(move || env.events().iter().collect::<Vec<Event>>())
            })
            .collect();
        // The root env participates in fan-out too; drain it.
        let root_drain = thread::spawn(move || root.events().iter().count());

        let sent: Vec<Event> = "hjkl"
            .chars()
            .map(|c| Event::key(KeyCode::Char(c)))
            .collect();
        for event in &sent {
            event_tx.send(event.clone()).unwrap();
        }
        drop(event_tx);

        for collector in collectors {
            assert_eq!(collector.join().unwrap(), sent);
        }
        assert_eq!(root_drain.join().unwrap(), sent.len());
        mux.wait();
    }

    #[test]
    fn test_paint_requests_apply_serially_to_one_buffer() {
        let (surface, flushes) = TestSurface::new(8, 4);
        let (event_tx, event_rx) = bounded::<Event>(0);
        let (mux, root) = Mux::new(surface, event_rx);
        drop(root);

        let painters: Vec<_> = (0..4u16)
            .map(|row| {
                let env = mux.make_env();
                thread::spawn(move || {
                    env.paint(move |buffer| {
                        for x in 0..8 {
                            buffer.set(x, row, Cell::new(char::from(b'a' + row as u8)));
                        }
                        Rect::new(0, row, 8, 1)
                    });
                })
            })
            .collect();
        for painter in painters {
            painter.join().unwrap();
        }

        drop(event_tx);
        mux.wait();

        let flushes = flushes.lock().unwrap();
        assert_eq!(flushes.len(), 4);
        // Interleaving between painters is unspecified, but each flush is
        // a complete, uncorrupted row.
        let mut rows: Vec<_> = flushes
            .iter()
            .map(|f| (f.region.y, f.text.clone()))
            .collect();
        rows.sort();
        for (row, (y, text)) in rows.iter().enumerate() {
            assert_eq!(*y, row as u16);
            let expected: String =
                std::iter::repeat(char::from(b'a' + row as u8)).take(8).collect();
            assert_eq!(*text, expected);
        }
    }

    #[test]
    fn test_empty_dirty_region_skips_flush() {
        let (surface, flushes) = TestSurface::new(4, 4);
        let (event_tx, event_rx) = bounded::<Event>(0);
        let (mux, root) = Mux::new(surface, event_rx);

        root.paint(|_buffer| Rect::ZERO);
        root.paint(|buffer| {
            buffer.set(0, 0, Cell::new('x'));
            Rect::new(0, 0, 1, 1)
        });

        drop(root);
        drop(event_tx);
        mux.wait();

        let flushes = flushes.lock().unwrap();
        assert_eq!(flushes.len(), 1);
        assert_eq!(flushes[0].text, "x");
    }

    #[test]
    fn test_envs_may_close_in_any_order() {
        let (surface, flushes) = TestSurface::new(4, 1);
        let (event_tx, event_rx) = bounded::<Event>(0);
        let (mux, root) = Mux::new(surface, event_rx);
        drop(root);

        let first = mux.make_env();
        let second = mux.make_env();
        drop(first);

        second.paint(|buffer| {
            buffer.set(0, 0, Cell::new('!'));
            Rect::new(0, 0, 1, 1)
        });
        drop(second);

        drop(event_tx);
        mux.wait();
        assert_eq!(flushes.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_wait_returns_once_everything_closed() {
        let (surface, _flushes) = TestSurface::new(4, 1);
        let (event_tx, event_rx) = bounded::<Event>(0);
        let (mux, root) = Mux::new(surface, event_rx);

        drop(root);
        drop(event_tx);
        mux.wait();
    }
}
