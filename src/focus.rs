//! Focus: directional focus ownership for a ragged grid of widgets.
//!
//! Exactly one widget holds keyboard focus at a time. The master owns every
//! slot's signal channels and runs a dedicated hand-off thread; each widget
//! holds a [`FocusSlave`], its private capability view of the protocol.
//!
//! # Hand-off protocol
//!
//! A shift is two-phase. The coordinator first sends the navigation token
//! down the focused slot's *lose* channel. The widget has first refusal: it
//! hands the token back on the shared *yield* channel when it is willing to
//! relinquish focus (it may first finish local work, or in principle keep
//! the token and consume the navigation key itself). Only once the token
//! comes back does the coordinator compute the neighbor slot and send on its
//! *gain* channel. At most one hand-off is ever in flight.
//!
//! A widget that never yields the token stalls navigation permanently; that
//! is an accepted affordance of the protocol, not a guarded failure mode.
//!
//! # Navigation over ragged rows
//!
//! Rows may have different widths. Horizontal moves wrap within the current
//! row. Vertical moves wrap across rows and then clamp the column to the
//! destination row's last slot, so a one-wide header row above six-wide data
//! rows behaves sensibly in both directions.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// A cardinal navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Previous column, wrapping within the row.
    Left,
    /// Next column, wrapping within the row.
    Right,
    /// Previous row, wrapping, column clamped.
    Up,
    /// Next row, wrapping, column clamped.
    Down,
}

/// A grid position: column `x` within row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pos {
    x: usize,
    y: usize,
}

/// Compute the neighbor of `pos` in `dir` over rows of widths `rows`.
///
/// Horizontal moves wrap within the row; vertical moves wrap across rows
/// and clamp the column into the destination row.
fn neighbor(pos: Pos, dir: Direction, rows: &[usize]) -> Pos {
    match dir {
        Direction::Left => Pos {
            x: if pos.x == 0 { rows[pos.y] - 1 } else { pos.x - 1 },
            y: pos.y,
        },
        Direction::Right => Pos {
            x: (pos.x + 1) % rows[pos.y],
            y: pos.y,
        },
        Direction::Up => {
            let y = if pos.y == 0 { rows.len() - 1 } else { pos.y - 1 };
            Pos {
                x: pos.x.min(rows[y] - 1),
                y,
            }
        }
        Direction::Down => {
            let y = (pos.y + 1) % rows.len();
            Pos {
                x: pos.x.min(rows[y] - 1),
                y,
            }
        }
    }
}

/// A widget's private view of the focus protocol.
///
/// The receivers close when the master is closed; widgets treat that as
/// their exit condition. The slave holds only channel ends, so the apparent
/// master/slave reference cycle carries no ownership.
pub struct FocusSlave {
    gain: Receiver<()>,
    lose: Receiver<Direction>,
    yield_tx: Sender<Direction>,
}

impl FocusSlave {
    /// Signal that this widget now holds focus.
    pub const fn gain(&self) -> &Receiver<()> {
        &self.gain
    }

    /// Navigation token: a shift arrived while this widget is focused.
    pub const fn lose(&self) -> &Receiver<Direction> {
        &self.lose
    }

    /// Hand a navigation token back to the coordinator, relinquishing
    /// focus. A no-op if the coordinator has already shut down.
    pub fn yield_focus(&self, dir: Direction) {
        let _ = self.yield_tx.send(dir);
    }
}

/// Sending halves of one slot's signals, owned by the coordinator thread.
struct Slot {
    gain: Sender<()>,
    lose: Sender<Direction>,
}

enum Command {
    Start,
    Shift(Direction),
}

/// The focus coordinator for a ragged grid of widget slots.
///
/// Create it with the row widths, hand each interactive widget its slave
/// via [`FocusMaster::slave`], then [`start`](FocusMaster::start) to grant
/// the initial focus to slot (0, 0).
pub struct FocusMaster {
    cmd_tx: Sender<Command>,
    rows: Vec<usize>,
    /// Flat slot arena, row-major; `None` once a slave has been taken.
    slaves: Vec<Option<FocusSlave>>,
    /// Start index of each row in the arena.
    offsets: Vec<usize>,
    handle: JoinHandle<()>,
}

impl FocusMaster {
    /// Build the coordinator for rows of the given widths and spawn its
    /// hand-off thread.
    ///
    /// # Panics
    /// Panics if `rows` is empty, any row is empty, or the OS fails to
    /// spawn the thread.
    pub fn new(rows: &[usize]) -> Self {
        assert!(!rows.is_empty(), "focus grid needs at least one row");
        assert!(rows.iter().all(|&w| w > 0), "focus rows must be non-empty");

        let (cmd_tx, cmd_rx) = bounded(0);
        let (yield_tx, yield_rx) = bounded(0);

        let total: usize = rows.iter().sum();
        let mut slots = Vec::with_capacity(total);
        let mut slaves = Vec::with_capacity(total);
        let mut offsets = Vec::with_capacity(rows.len());
        let mut offset = 0;
        for &width in rows {
            offsets.push(offset);
            offset += width;
            for _ in 0..width {
                let (gain_tx, gain_rx) = bounded(0);
                let (lose_tx, lose_rx) = bounded(0);
                slots.push(Slot {
                    gain: gain_tx,
                    lose: lose_tx,
                });
                slaves.push(Some(FocusSlave {
                    gain: gain_rx,
                    lose: lose_rx,
                    yield_tx: yield_tx.clone(),
                }));
            }
        }

        let coordinator = Coordinator {
            rows: rows.to_vec(),
            offsets: offsets.clone(),
            slots,
            yield_rx,
        };
        let handle = thread::Builder::new()
            .name("volute-focus".to_string())
            .spawn(move || coordinator.run(&cmd_rx))
            .expect("Failed to spawn focus thread");

        Self {
            cmd_tx,
            rows: rows.to_vec(),
            slaves,
            offsets,
            handle,
        }
    }

    /// Take the slave handle for slot (`x`, `y`).
    ///
    /// # Panics
    /// Panics if the slot is out of bounds or its slave was already taken;
    /// both are wiring bugs, not runtime conditions.
    pub fn slave(&mut self, x: usize, y: usize) -> FocusSlave {
        assert!(y < self.rows.len(), "focus row {y} out of bounds");
        assert!(x < self.rows[y], "focus column {x} out of bounds in row {y}");
        self.slaves[self.offsets[y] + x]
            .take()
            .expect("focus slave taken twice")
    }

    /// Grant the initial focus to slot (0, 0).
    ///
    /// # Panics
    /// Panics if called twice.
    pub fn start(&self) {
        self.cmd_tx
            .send(Command::Start)
            .expect("focus coordinator gone");
    }

    /// Move focus one slot in `dir`, via the lose/yield/gain hand-off.
    ///
    /// Returns once the coordinator has accepted the command; the hand-off
    /// itself completes asynchronously at the focused widget's pace.
    ///
    /// # Panics
    /// Panics if called before [`start`](FocusMaster::start).
    pub fn shift(&self, dir: Direction) {
        self.cmd_tx
            .send(Command::Shift(dir))
            .expect("focus coordinator gone");
    }

    /// Shut the coordinator down, closing every slave's gain and lose
    /// signals and the shared yield signal exactly once.
    ///
    /// Blocks until the hand-off thread has exited. No focus transition is
    /// valid afterwards.
    pub fn close(self) {
        let Self {
            cmd_tx,
            slaves,
            handle,
            ..
        } = self;
        drop(cmd_tx);
        drop(slaves); // any untaken slave handles close here too

        let _ = handle.join();
    }
}

/// State owned exclusively by the hand-off thread.
struct Coordinator {
    rows: Vec<usize>,
    offsets: Vec<usize>,
    slots: Vec<Slot>,
    yield_rx: Receiver<Direction>,
}

impl Coordinator {
    fn slot(&self, pos: Pos) -> &Slot {
        &self.slots[self.offsets[pos.y] + pos.x]
    }

    /// Process commands until the master closes the command stream, then
    /// drop every slot, closing all gain/lose signals.
    fn run(self, cmd_rx: &Receiver<Command>) {
        // Idle until Start; then Focused(pos) until the stream closes.
        let mut focused: Option<Pos> = None;
        for cmd in cmd_rx {
            match (focused, cmd) {
                (None, Command::Start) => {
                    let pos = Pos { x: 0, y: 0 };
                    if self.slot(pos).gain.send(()).is_err() {
                        return;
                    }
                    focused = Some(pos);
                }
                (Some(_), Command::Start) => panic!("focus started twice"),
                (None, Command::Shift(_)) => panic!("focus shift before start"),
                (Some(pos), Command::Shift(dir)) => {
                    // Revoke: hand the token down. The widget decides when
                    // (and whether) to hand it back.
                    if self.slot(pos).lose.send(dir).is_err() {
                        return;
                    }
                    let Ok(dir) = self.yield_rx.recv() else { return };
                    let next = neighbor(pos, dir, &self.rows);
                    if self.slot(next).gain.send(()).is_err() {
                        return;
                    }
                    focused = Some(next);
                }
            }
        }
    }
}
