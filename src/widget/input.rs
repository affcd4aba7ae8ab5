//! Input: an editable numeric field.
//!
//! Accepts ASCII digits and backspace while focused, and publishes the
//! parsed value on its value channel after every edit. The value channel
//! closes when the widget exits, which is how downstream computations learn
//! the field is gone.

use super::{FOCUS_COLOR, GREEN, WHITE};
use crate::buffer::{draw_text, Align, Style};
use crate::event::{Event, KeyCode};
use crate::focus::FocusSlave;
use crate::layout::Rect;
use crate::mux::Env;
use crossbeam_channel::{select, Sender};

/// Parse a digit string, saturating at `u32::MAX`. Empty parses as 0.
fn parse_value(text: &str) -> u32 {
    text.bytes().fold(0u32, |n, d| {
        n.saturating_mul(10).saturating_add(u32::from(d - b'0'))
    })
}

/// Run a numeric input widget until its focus signals or event stream
/// close.
pub fn input(value: &Sender<u32>, rect: Rect, slave: &FocusSlave, env: &Env) {
    let mut text = String::from("0");
    let mut focused = false;

    let repaint = |env: &Env, text: &str, focused: bool| {
        let style = if focused {
            Style::new(GREEN, FOCUS_COLOR)
        } else {
            Style::new(GREEN, WHITE)
        };
        let text = text.to_string();
        env.paint(move |buffer| draw_text(buffer, &text, rect, style, Align::Right));
    };

    repaint(env, &text, focused);
    loop {
        select! {
            recv(slave.gain()) -> msg => {
                if msg.is_err() {
                    break;
                }
                focused = true;
                repaint(env, &text, focused);
            }
            recv(slave.lose()) -> msg => {
                let Ok(dir) = msg else { break };
                slave.yield_focus(dir);
                focused = false;
                repaint(env, &text, focused);
            }
            recv(env.events()) -> msg => {
                let Ok(event) = msg else { break };
                match event {
                    Event::FocusGained => repaint(env, &text, focused),
                    Event::Key { code: KeyCode::Char(c), .. }
                        if focused && c.is_ascii_digit() =>
                    {
                        if text == "0" {
                            text.clear();
                        }
                        text.push(c);
                        repaint(env, &text, focused);
                        if value.send(parse_value(&text)).is_err() {
                            break;
                        }
                    }
                    Event::Key { code: KeyCode::Backspace, .. }
                        if focused && !text.is_empty() =>
                    {
                        text.pop();
                        repaint(env, &text, focused);
                        if value.send(parse_value(&text)).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
