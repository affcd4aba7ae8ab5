//! Input Actor: Dedicated thread for polling terminal events.
//!
//! Runs in its own thread and uses crossterm's event polling to capture
//! keyboard, resize, and focus events. Converted events are handed off
//! synchronously to the multiplexer's fan-out; dropping the receiving side
//! (or calling [`InputActor::join`]) ends the thread, which closes the
//! event source and lets shutdown cascade to every widget.

use crate::event::{Event, KeyCode, KeyModifiers};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event as CtEvent, KeyEventKind, KeyModifiers as CtModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `sender` is the multiplexer's event source; `poll_timeout` bounds
    /// how long the thread waits for an event before checking for
    /// shutdown.
    ///
    /// # Panics
    /// Panics if the OS fails to spawn the input thread.
    pub fn spawn(sender: Sender<Event>, poll_timeout: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("volute-input".to_string())
            .spawn(move || {
                run_loop(&sender, &shutdown_clone, poll_timeout);
            })
            .expect("Failed to spawn input thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the input thread to shut down and wait for it to finish.
    ///
    /// The event source closes when the thread exits.
    pub fn join(mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Main input polling loop.
fn run_loop(sender: &Sender<Event>, shutdown: &Arc<AtomicBool>, poll_timeout: Duration) {
    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match event::poll(poll_timeout) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if let Some(converted) = convert_event(event) {
                        if sender.send(converted).is_err() {
                            // Receiver dropped, exit
                            break;
                        }
                    }
                }
                Err(e) => {
                    let _ = sender.send(Event::Error(e.to_string()));
                }
            },
            Ok(false) => {
                // No event, continue loop (will check shutdown)
            }
            Err(e) => {
                let _ = sender.send(Event::Error(e.to_string()));
            }
        }
    }
}

/// Convert a crossterm event to our [`Event`].
fn convert_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(key) => {
            // Only process key press events (not release or repeat)
            if key.kind != KeyEventKind::Press {
                return None;
            }
            let code = convert_key_code(key.code)?;
            Some(Event::Key {
                code,
                modifiers: convert_modifiers(key.modifiers),
            })
        }
        CtEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        CtEvent::FocusGained => Some(Event::FocusGained),
        CtEvent::FocusLost => Some(Event::FocusLost),
        _ => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    match code {
        event::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        event::KeyCode::Backspace => Some(KeyCode::Backspace),
        event::KeyCode::Enter => Some(KeyCode::Enter),
        event::KeyCode::Left => Some(KeyCode::Left),
        event::KeyCode::Right => Some(KeyCode::Right),
        event::KeyCode::Up => Some(KeyCode::Up),
        event::KeyCode::Down => Some(KeyCode::Down),
        event::KeyCode::Tab => Some(KeyCode::Tab),
        event::KeyCode::BackTab => Some(KeyCode::BackTab),
        event::KeyCode::Esc => Some(KeyCode::Esc),
        _ => None,
    }
}

fn convert_modifiers(modifiers: CtModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: modifiers.contains(CtModifiers::SHIFT),
        control: modifiers.contains(CtModifiers::CONTROL),
        alt: modifiers.contains(CtModifiers::ALT),
    }
}
