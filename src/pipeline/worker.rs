// src/pipeline/worker.rs
// =============================================================================
// One worker: take a URL, check it, count the outcome, repeat.
//
// A worker stops when the channel reports it is closed and empty. Every
// worker observes that exactly once, so no shutdown markers are needed and
// a blank line in the file is just another URL to check.
// =============================================================================

use tracing::debug;

use crate::channel::Receiver;
use crate::checker::{classify, Probe};
use crate::tally::Tally;

/// Drains `receiver` until it closes and returns how many URLs this worker
/// checked.
///
/// The receiver is taken by value so it is dropped when the worker stops;
/// once every worker is gone the producer's sends fail instead of blocking.
pub fn run_worker<P: Probe + ?Sized>(
    id: usize,
    receiver: Receiver<String>,
    probe: &P,
    tally: &Tally,
) -> usize {
    debug!(worker = id, "worker started");

    let mut processed = 0;
    while let Some(url) = receiver.recv() {
        tally.record(classify(probe, &url));
        processed += 1;
    }

    debug!(worker = id, processed, "channel closed, worker exiting");
    processed
}
