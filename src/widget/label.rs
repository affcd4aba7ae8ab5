//! Label: a static line of text.

use super::{BLACK, WHITE};
use crate::buffer::{draw_text, Align, Style};
use crate::event::Event;
use crate::layout::Rect;
use crate::mux::Env;

/// Run a label widget: paint once, repaint when the terminal regains
/// focus, exit when the event stream closes.
pub fn label(text: &str, rect: Rect, env: &Env) {
    let style = Style::new(BLACK, WHITE).bold();
    let repaint = |env: &Env| {
        let text = text.to_string();
        env.paint(move |buffer| draw_text(buffer, &text, rect, style, Align::Left));
    };

    repaint(env);
    for event in env.events() {
        if matches!(event, Event::FocusGained) {
            repaint(env);
        }
    }
}
