// src/checker/outcome.rs
// =============================================================================
// Turns one probe attempt into one of three outcomes.
//
// HTTP status codes:
// - 200-399: Reachable (success or redirect)       -> Ok
// - anything else: Answered, but with a failure    -> Error
// - no status at all (timeout, DNS, bad URL, ...)  -> Unknown
//
// The actual network call sits behind the `Probe` trait so workers can be
// driven by a fake in tests and by `HttpProbe` for real.
// =============================================================================

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::ProbeError;

/// Result of checking a single URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Responded with a 2xx or 3xx status
    Ok,
    /// Responded with any other status (404, 500, ...)
    Error,
    /// Never got a status back
    Unknown,
}

impl Outcome {
    /// Classifies a status code the server actually sent.
    pub fn from_status(status: u16) -> Self {
        if (200..400).contains(&status) {
            Outcome::Ok
        } else {
            Outcome::Error
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Ok => "OK",
            Outcome::Error => "Error",
            Outcome::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Something that can ask whether a URL exists.
///
/// Implementations must be shareable between worker threads; they receive
/// no synchronization from the caller.
pub trait Probe: Send + Sync {
    /// Returns the response status code, or why no response arrived.
    fn probe(&self, url: &str) -> Result<u16, ProbeError>;
}

/// Probes `url` and classifies the result.
///
/// A failed probe is an `Unknown` outcome, not an error of the program, so
/// it is only logged at debug level.
pub fn classify<P: Probe + ?Sized>(probe: &P, url: &str) -> Outcome {
    match probe.probe(url) {
        Ok(status) => {
            let outcome = Outcome::from_status(status);
            debug!(url, status, %outcome, "probe answered");
            outcome
        }
        Err(e) => {
            debug!(url, reason = %e, "probe did not complete");
            Outcome::Unknown
        }
    }
}
