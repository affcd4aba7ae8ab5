//! Broadcast: one producer stream fanned out to many consumer streams.
//!
//! A `Broadcast` owns the receiving end of a source channel and delivers
//! every value, in source order, to every destination registered before
//! that value's delivery begins. Delivery is synchronous: each destination
//! send blocks until the consumer accepts, so a slow consumer back-pressures
//! the source producer. There is no buffering and no value is ever dropped
//! for a live destination.
//!
//! When the source disconnects, the delivery thread closes every
//! destination exactly once and exits; `wait` observes that.
//!
//! The calculator uses this twice: to share the displacement value with
//! every flow worker, and inside the multiplexer to fan input events out to
//! every widget environment.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Fan-out of one source channel to dynamically registered destinations.
pub struct Broadcast<T> {
    /// Destination senders, in registration order. Locked only for
    /// registration and for the duration of one value's delivery.
    destinations: Arc<Mutex<Vec<Sender<T>>>>,
    /// Handle to the delivery thread.
    handle: Option<JoinHandle<()>>,
}

impl<T: Clone + Send + 'static> Broadcast<T> {
    /// Start a delivery thread for `source`.
    ///
    /// The caller keeps the sending end of `source`; dropping it is the
    /// only shutdown signal.
    ///
    /// # Panics
    /// Panics if the OS fails to spawn the delivery thread.
    pub fn new(source: Receiver<T>) -> Self {
        let destinations: Arc<Mutex<Vec<Sender<T>>>> = Arc::new(Mutex::new(Vec::new()));
        let dests = Arc::clone(&destinations);

        let handle = thread::Builder::new()
            .name("volute-broadcast".to_string())
            .spawn(move || {
                for value in &source {
                    let mut dests = dests.lock().unwrap();
                    // A destination whose receiver is gone is pruned; for
                    // the rest, send blocks until the consumer accepts.
                    dests.retain(|dest| dest.send(value.clone()).is_ok());
                }
                // Source exhausted: drop every sender, closing each
                // destination exactly once.
                dests.lock().unwrap().clear();
            })
            .expect("Failed to spawn broadcast thread");

        Self {
            destinations,
            handle: Some(handle),
        }
    }

    /// Register a new destination and return its receiving end.
    ///
    /// The destination sees every value delivered after its registration.
    /// Registering after `wait` could have returned is a caller bug; the
    /// receiver would simply never close.
    pub fn add_destination(&self) -> Receiver<T> {
        let (tx, rx) = bounded(0);
        self.destinations.lock().unwrap().push(tx);
        rx
    }

    /// Block until the delivery thread has observed source exhaustion and
    /// closed every destination.
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_destinations_see_source_order() {
        let (tx, rx) = bounded(0);
        let bc = Broadcast::new(rx);

        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let dest = bc.add_destination();
                thread::spawn(move || dest.iter().collect::<Vec<u32>>())
            })
            .collect();

        for v in 0..50 {
            tx.send(v).unwrap();
        }
        drop(tx);
        bc.wait();

        let expected: Vec<u32> = (0..50).collect();
        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_wait_returns_and_destinations_close_once() {
        let (tx, rx) = bounded::<u32>(0);
        let bc = Broadcast::new(rx);
        let dest = bc.add_destination();

        drop(tx);
        bc.wait();

        assert!(dest.recv().is_err());
    }

    #[test]
    fn test_late_destination_misses_earlier_values() {
        let (tx, rx) = bounded(0);
        let bc = Broadcast::new(rx);
        let first = bc.add_destination();

        tx.send(1).unwrap();
        // Rendezvous channels: the value is fully delivered once the sole
        // destination has accepted it.
        assert_eq!(first.recv(), Ok(1));

        let second = bc.add_destination();
        let collector = thread::spawn(move || second.iter().collect::<Vec<u32>>());

        let drain = thread::spawn(move || first.iter().collect::<Vec<u32>>());
        tx.send(2).unwrap();
        tx.send(3).unwrap();
        drop(tx);
        bc.wait();

        assert_eq!(collector.join().unwrap(), vec![2, 3]);
        assert_eq!(drain.join().unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_dropped_destination_is_pruned() {
        let (tx, rx) = bounded(0);
        let bc = Broadcast::new(rx);

        let dead = bc.add_destination();
        let live = bc.add_destination();
        drop(dead);

        let collector = thread::spawn(move || live.iter().collect::<Vec<u32>>());
        for v in [7, 8, 9] {
            tx.send(v).unwrap();
        }
        drop(tx);
        bc.wait();

        assert_eq!(collector.join().unwrap(), vec![7, 8, 9]);
    }

    #[test]
    fn test_no_destinations_drains_source() {
        let (tx, rx) = bounded(0);
        let bc = Broadcast::new(rx);

        let producer = thread::spawn(move || {
            for v in 0..10 {
                tx.send(v).unwrap();
            }
        });

        producer.join().unwrap();
        bc.wait();
    }
}
