// src/checker/mod.rs
// =============================================================================
// This module contains all URL checking logic.
//
// Submodules:
// - outcome: The three possible outcomes and the Probe seam that feeds them
// - http: The real probe, a HEAD request with connect/read timeouts
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::classify()` instead of
// `checker::outcome::classify()`.
// =============================================================================

mod http;
mod outcome;

pub use http::HttpProbe;
pub use outcome::{classify, Outcome, Probe};
