//! App: wiring and the top-level event loop.
//!
//! The driver owns the startup and shutdown order. It leases one
//! environment per widget from the mux, hands focus slaves to the
//! interactive fields, shares the displacement stream with every flow
//! worker through a broadcast, grants the initial focus, and then loops on
//! the root environment's events. On quit it closes its owned streams in
//! dependency order so every background task observes closure and exits;
//! there are no timeouts and no kill signals anywhere.

use crate::broadcast::Broadcast;
use crate::buffer::text_width;
use crate::engine::flow_worker;
use crate::event::{Event, KeyCode};
use crate::focus::{Direction, FocusMaster};
use crate::layout::{Grid, Rect};
use crate::mux::{Env, Mux, Surface};
use crate::widget;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Number of operating points shown side by side.
pub const POINTS: usize = 6;

const WIDEST_LABEL: &str = "mass flow (kg/min)";
const FIELD_WIDTH: u16 = 8;

/// Run the calculator against `surface`, fed by `events`.
///
/// `close_source` must close the raw event source (for the real app, join
/// the input actor); it is called once the event loop has exited, as the
/// first step of the shutdown cascade that label and output widgets depend
/// on. Returns only after every background thread has exited.
pub fn run<S, F>(surface: S, events: Receiver<Event>, close_source: F)
where
    S: Surface + Send + 'static,
    F: FnOnce(),
{
    let (width, height) = surface.size();
    let (mux, root) = Mux::new(surface, events);
    let mut focus = FocusMaster::new(&[1, POINTS, POINTS, POINTS, POINTS]);

    let grid = Grid {
        rows: vec![2, POINTS + 1, POINTS + 1, POINTS + 1, POINTS + 1, POINTS + 1],
        col_widths: vec![text_width(WIDEST_LABEL) + 1, FIELD_WIDTH],
        row_height: 1,
        gap: 1,
    };
    let bounds = grid.lay(Rect::from_size(width, height));

    let (disp_tx, disp_rx) = bounded(0);
    let broadcast = Broadcast::new(disp_rx);
    let (rpm_txs, rpm_rxs) = channels(POINTS);
    let (ve_txs, ve_rxs) = channels(POINTS);
    let (imap_txs, imap_rxs) = channels(POINTS);
    let (act_txs, act_rxs) = channels(POINTS);
    let (flow_txs, flow_rxs) = channels::<f64>(POINTS);

    let mut handles = Vec::new();

    // Row offsets into the grid's flat rect list.
    let row_at = |row: usize| -> usize { grid.rows[..row].iter().sum() };

    // Header row: displacement label plus the one shared input field.
    spawn_label(&mut handles, &mux, "displacement (cc)", bounds[0]);
    spawn_input(&mut handles, &mux, disp_tx, bounds[1], &mut focus, 0, 0);

    // Per-point input rows, in focus-grid order.
    let input_rows = [
        ("speed (rpm)", rpm_txs),
        ("VE (%)", ve_txs),
        ("IMAP (mbar)", imap_txs),
        ("ACT (°C)", act_txs),
    ];
    for (row, (text, txs)) in input_rows.into_iter().enumerate() {
        let base = row_at(row + 1);
        spawn_label(&mut handles, &mux, text, bounds[base]);
        for (i, tx) in txs.into_iter().enumerate() {
            spawn_input(&mut handles, &mux, tx, bounds[base + 1 + i], &mut focus, i, row + 1);
        }
    }

    // Readout row.
    let base = row_at(5);
    spawn_label(&mut handles, &mux, "mass flow (kg/min)", bounds[base]);
    for (i, rx) in flow_rxs.into_iter().enumerate() {
        let env = mux.make_env();
        let rect = bounds[base + 1 + i];
        spawn(&mut handles, &format!("output-{i}"), move || {
            widget::output(rx, rect, &env);
        });
    }

    // Flow workers, one per point, each with its own view of the shared
    // displacement stream.
    let per_point = rpm_rxs
        .into_iter()
        .zip(ve_rxs)
        .zip(imap_rxs)
        .zip(act_rxs)
        .zip(flow_txs);
    for (i, ((((rpm, ve), imap), act), flow)) in per_point.enumerate() {
        let disp = broadcast.add_destination();
        spawn(&mut handles, &format!("flow-{i}"), move || {
            flow_worker(&flow, &disp, &rpm, &ve, &act, &imap);
        });
    }

    focus.start();
    event_loop(&root, &focus);

    // Shutdown cascade, in dependency order.
    drop(root);
    focus.close();
    close_source();
    for handle in handles {
        let _ = handle.join();
    }
    broadcast.wait();
    mux.wait();
}

/// Read the root environment's events, forwarding navigation keys to the
/// focus coordinator, until a quit key or the end of the stream.
fn event_loop(root: &Env, focus: &FocusMaster) {
    for event in root.events() {
        let Event::Key { code, modifiers } = event else {
            continue;
        };
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return,
            KeyCode::Char('c') if modifiers.control => return,
            KeyCode::Char('h') | KeyCode::Left => focus.shift(Direction::Left),
            KeyCode::Char('l') | KeyCode::Right => focus.shift(Direction::Right),
            KeyCode::Char('k') | KeyCode::Up => focus.shift(Direction::Up),
            KeyCode::Char('j') | KeyCode::Down => focus.shift(Direction::Down),
            KeyCode::Tab => focus.shift(Direction::Right),
            KeyCode::BackTab => focus.shift(Direction::Left),
            _ => {}
        }
    }
}

fn channels<T>(n: usize) -> (Vec<Sender<T>>, Vec<Receiver<T>>) {
    (0..n).map(|_| bounded(0)).unzip()
}

fn spawn(handles: &mut Vec<JoinHandle<()>>, name: &str, f: impl FnOnce() + Send + 'static) {
    let handle = thread::Builder::new()
        .name(format!("volute-{name}"))
        .spawn(f)
        .expect("Failed to spawn widget thread");
    handles.push(handle);
}

fn spawn_label(handles: &mut Vec<JoinHandle<()>>, mux: &Mux, text: &'static str, rect: Rect) {
    let env = mux.make_env();
    spawn(handles, "label", move || widget::label(text, rect, &env));
}

fn spawn_input(
    handles: &mut Vec<JoinHandle<()>>,
    mux: &Mux,
    value: Sender<u32>,
    rect: Rect,
    focus: &mut FocusMaster,
    x: usize,
    y: usize,
) {
    let env = mux.make_env();
    let slave = focus.slave(x, y);
    spawn(handles, &format!("input-{x}-{y}"), move || {
        widget::input(&value, rect, &slave, &env);
    });
}
