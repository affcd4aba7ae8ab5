//! Volute entry point: raw terminal in, calculator loop, restore on exit.

use std::io;
use std::process;
use std::time::Duration;

use crossbeam_channel::bounded;
use volute::terminal::Screen;
use volute::{app, InputActor};

fn main() {
    if let Err(err) = run() {
        eprintln!("volute: {err}");
        process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let screen = Screen::new()?;
    let (event_tx, event_rx) = bounded(0);
    let input = InputActor::spawn(event_tx, Duration::from_millis(10));

    app::run(screen, event_rx, move || input.join());
    Ok(())
}
