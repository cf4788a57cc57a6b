//! Error types for url-sentinel
//!
//! Nothing here is fatal to a run once it has started: probe errors become
//! `Unknown` outcomes and only bad configuration stops the program early.

use thiserror::Error;

/// Rejected run settings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No worker threads requested
    #[error("number of workers must be at least 1")]
    NoWorkers,

    /// A channel that can hold nothing would block the producer forever
    #[error("queue capacity must be at least 1")]
    ZeroQueueCapacity,
}

/// Why a probe could not produce a status code
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The line is not a URL at all (blank lines land here too)
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Parsed fine, but not something we can send a HEAD request to
    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    /// Connect or read bound exceeded
    #[error("request timed out")]
    Timeout,

    /// Host name did not resolve
    #[error("could not resolve hostname")]
    Dns,

    /// Refused, reset or otherwise unreachable
    #[error("connection failed")]
    Connect,

    /// Redirect loop or redirect limit hit
    #[error("too many redirects")]
    TooManyRedirects,

    /// Anything else the HTTP client reported
    #[error("request failed: {0}")]
    Request(String),
}
