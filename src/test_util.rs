//! Shared test fixtures: an in-memory surface that records every flush.

use crate::buffer::{Buffer, Rgb};
use crate::layout::Rect;
use crate::mux::Surface;
use std::io;
use std::sync::{Arc, Mutex};

/// One recorded flush: the dirty region, its text, and the background of
/// its first cell (focused widgets paint a distinctive background).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flush {
    pub region: Rect,
    pub text: String,
    pub bg: Rgb,
}

/// In-memory surface for tests.
pub struct TestSurface {
    size: (u16, u16),
    flushes: Arc<Mutex<Vec<Flush>>>,
}

impl TestSurface {
    pub fn new(width: u16, height: u16) -> (Self, Arc<Mutex<Vec<Flush>>>) {
        let flushes = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                size: (width, height),
                flushes: Arc::clone(&flushes),
            },
            flushes,
        )
    }
}

impl Surface for TestSurface {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn flush(&mut self, buffer: &Buffer, region: Rect) -> io::Result<()> {
        let mut text = String::new();
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                text.push(buffer.get(x, y).unwrap().ch);
            }
        }
        let bg = buffer.get(region.x, region.y).unwrap().bg;
        self.flushes.lock().unwrap().push(Flush { region, text, bg });
        Ok(())
    }
}

/// Spin until `pred` holds over the recorded flushes (they arrive from the
/// serializing thread, not the test thread).
pub fn wait_for_flush<F>(flushes: &Arc<Mutex<Vec<Flush>>>, pred: F)
where
    F: Fn(&[Flush]) -> bool,
{
    for _ in 0..500 {
        if pred(&flushes.lock().unwrap()) {
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    panic!("expected flush never arrived");
}
