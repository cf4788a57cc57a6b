//! url-sentinel: check a file of URLs with a bounded producer/worker pipeline.
//!
//! A single producer thread reads the file into a [`channel::bounded`]
//! channel, a fixed pool of worker threads probes each URL, and the outcomes
//! are counted in a shared [`tally::Tally`].

pub mod channel;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod tally;
