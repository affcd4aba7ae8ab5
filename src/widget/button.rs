//! Button: fires a signal on Enter while focused.

use super::{BLACK, FOCUS_COLOR, WHITE};
use crate::buffer::{draw_text, Align, Style};
use crate::event::{Event, KeyCode};
use crate::focus::FocusSlave;
use crate::layout::Rect;
use crate::mux::Env;
use crossbeam_channel::{select, Sender};

/// Run a button widget: send `signal` on the channel each time Enter is
/// pressed while the button holds focus.
///
/// The calculator screen wires no buttons today; the widget ships with the
/// rest of the set for screens that need one.
pub fn button<T: Clone>(
    signal: &Sender<T>,
    value: T,
    text: &str,
    rect: Rect,
    slave: &FocusSlave,
    env: &Env,
) {
    let mut focused = false;
    let repaint = |env: &Env, focused: bool| {
        let style = if focused {
            Style::new(BLACK, FOCUS_COLOR)
        } else {
            Style::new(BLACK, WHITE)
        };
        let text = text.to_string();
        env.paint(move |buffer| draw_text(buffer, &text, rect, style, Align::Left));
    };

    repaint(env, focused);
    loop {
        select! {
            recv(slave.gain()) -> msg => {
                if msg.is_err() {
                    break;
                }
                focused = true;
                repaint(env, focused);
            }
            recv(slave.lose()) -> msg => {
                let Ok(dir) = msg else { break };
                slave.yield_focus(dir);
                focused = false;
                repaint(env, focused);
            }
            recv(env.events()) -> msg => {
                let Ok(event) = msg else { break };
                match event {
                    Event::FocusGained => repaint(env, focused),
                    Event::Key { code: KeyCode::Enter, .. } if focused => {
                        if signal.send(value.clone()).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusMaster;
    use crate::mux::Mux;
    use crate::test_util::{wait_for_flush, TestSurface};
    use crossbeam_channel::bounded;
    use std::thread;

    #[test]
    fn test_button_fires_only_while_focused() {
        let (surface, flushes) = TestSurface::new(20, 1);
        let (event_tx, event_rx) = bounded(0);
        let (mux, root) = Mux::new(surface, event_rx);
        drop(root);

        let mut master = FocusMaster::new(&[1]);
        let slave = master.slave(0, 0);
        let env = mux.make_env();
        let (signal_tx, signal_rx) = bounded(0);
        let rect = Rect::new(0, 0, 10, 1);
        let handle =
            thread::spawn(move || button(&signal_tx, "reset", "[ reset ]", rect, &slave, &env));

        // Unfocused: Enter is ignored.
        wait_for_flush(&flushes, |f| !f.is_empty());
        event_tx.send(Event::key(KeyCode::Enter)).unwrap();
        event_tx.send(Event::FocusGained).unwrap();
        wait_for_flush(&flushes, |f| f.len() >= 2);
        assert!(signal_rx.try_recv().is_err());

        master.start();
        wait_for_flush(&flushes, |f| f.iter().any(|f| f.bg == FOCUS_COLOR));
        event_tx.send(Event::key(KeyCode::Enter)).unwrap();
        assert_eq!(signal_rx.recv(), Ok("reset"));

        master.close();
        handle.join().unwrap();
        drop(event_tx);
        mux.wait();
    }
}
