// src/tally.rs
// =============================================================================
// Running totals of outcomes, updated by every worker at once.
//
// Each counter is an atomic, so workers never take a lock to record a result.
// The orchestrator reads a snapshot once all workers have been joined.
// =============================================================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::checker::Outcome;

#[derive(Debug, Default)]
pub struct Tally {
    ok: AtomicU64,
    error: AtomicU64,
    unknown: AtomicU64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Ok => &self.ok,
            Outcome::Error => &self.error,
            Outcome::Unknown => &self.unknown,
        };
        // Joining the worker threads orders these before the final read
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            ok: self.ok.load(Ordering::Relaxed),
            error: self.error.load(Ordering::Relaxed),
            unknown: self.unknown.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of a [`Tally`], ready for printing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TallySnapshot {
    pub ok: u64,
    pub error: u64,
    pub unknown: u64,
}

impl TallySnapshot {
    pub fn total(&self) -> u64 {
        self.ok + self.error + self.unknown
    }
}

impl fmt::Display for TallySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} OK, {} Error, {} Unknown",
            self.ok, self.error, self.unknown
        )
    }
}
