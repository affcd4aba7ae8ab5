//! Output: a read-only numeric readout fed by a value channel.

use super::{BLACK, WHITE};
use crate::buffer::{draw_text, Align, Style};
use crate::event::Event;
use crate::layout::Rect;
use crate::mux::Env;
use crossbeam_channel::{never, select, Receiver};

/// Run an output widget: display each value received on `value` with three
/// decimals, exit when the event stream closes.
///
/// A closed value channel only freezes the readout; the widget stays up to
/// keep repainting until the whole system shuts down.
pub fn output(value: Receiver<f64>, rect: Rect, env: &Env) {
    let style = Style::new(BLACK, WHITE);
    let repaint = |env: &Env, v: f64| {
        env.paint(move |buffer| draw_text(buffer, &format!("{v:.3}"), rect, style, Align::Right));
    };

    let mut value = value;
    let mut current = 0.0;
    repaint(env, current);
    loop {
        select! {
            recv(value) -> msg => match msg {
                Ok(v) => {
                    current = v;
                    repaint(env, current);
                }
                Err(_) => value = never(),
            },
            recv(env.events()) -> msg => {
                let Ok(event) = msg else { break };
                if matches!(event, Event::FocusGained) {
                    repaint(env, current);
                }
            }
        }
    }
}
