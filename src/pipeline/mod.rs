// src/pipeline/mod.rs
// =============================================================================
// Wires the producer, the work channel and the worker pool together.
//
//   file -> producer -> bounded channel -> N workers -> tally
//
// Everything runs inside one `std::thread::scope`: the producer and every
// worker are joined before `check_urls` returns, and a thread that panics is
// logged instead of being left behind.
// =============================================================================

mod producer;
mod worker;

pub use producer::{produce_from_path, produce_lines, ProducerReport};
pub use worker::run_worker;

use std::path::Path;
use std::thread;

use tracing::{error, info};

use crate::channel::bounded;
use crate::checker::Probe;
use crate::config::CheckConfig;
use crate::error::ConfigError;
use crate::tally::{Tally, TallySnapshot};

/// Summary of one run over a URL file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Final outcome counts
    pub tally: TallySnapshot,
    /// Lines the producer read and queued
    pub records_read: usize,
    /// Most URLs waiting in the channel at once (never above the capacity)
    pub peak_queue_len: usize,
}

/// Checks every URL in the file at `path` with `config.workers` threads.
///
/// Only an invalid `config` is an error. A missing or unreadable file is
/// logged and simply produces fewer (or zero) results.
pub fn check_urls<P: Probe>(
    path: &Path,
    config: &CheckConfig,
    probe: &P,
) -> Result<RunReport, ConfigError> {
    config.validate()?;

    info!(
        path = %path.display(),
        workers = config.workers,
        queue_capacity = config.queue_capacity,
        "starting URL check"
    );

    let tally = Tally::new();
    let (sender, receiver) = bounded::<String>(config.queue_capacity);

    let producer_report = thread::scope(|scope| {
        // A thread that fails to start drops its closure, and with it the
        // Sender or Receiver it owned, so the shutdown still happens
        let producer = thread::Builder::new()
            .name("producer".to_string())
            .spawn_scoped(scope, move || produce_from_path(path, sender))
            .map_err(|e| error!(error = %e, "could not start producer thread"))
            .ok();

        let workers: Vec<_> = (0..config.workers)
            .filter_map(|id| {
                let receiver = receiver.clone();
                let tally = &tally;
                thread::Builder::new()
                    .name(format!("worker-{id}"))
                    .spawn_scoped(scope, move || run_worker(id, receiver, probe, tally))
                    .map_err(|e| error!(worker = id, error = %e, "could not start worker thread"))
                    .ok()
                    .map(|handle| (id, handle))
            })
            .collect();
        // Only the workers may hold receivers, otherwise the producer could
        // block forever after they are all gone
        drop(receiver);

        let report = match producer.map(|handle| handle.join()) {
            Some(Ok(report)) => report,
            Some(Err(_)) => {
                error!("producer thread panicked");
                ProducerReport::default()
            }
            None => ProducerReport::default(),
        };

        for (id, handle) in workers {
            if handle.join().is_err() {
                error!(worker = id, "worker thread panicked");
            }
        }

        report
    });

    let tally = tally.snapshot();
    info!(
        records = producer_report.records,
        ok = tally.ok,
        error = tally.error,
        unknown = tally.unknown,
        "URL check finished"
    );

    Ok(RunReport {
        tally,
        records_read: producer_report.records,
        peak_queue_len: producer_report.peak_queue_len,
    })
}
