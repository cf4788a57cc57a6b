// src/config.rs
// =============================================================================
// Run settings shared by the orchestrator and the HTTP probe.
//
// The two values the user must supply are the URL file and the worker count
// (see cli.rs). Everything else has a default matching the classic setup:
// a 16-slot queue and 2 second connect/read timeouts.
// =============================================================================

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_QUEUE_CAPACITY: usize = 16;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 2000;

/// Everything a check run needs besides the input path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Number of worker threads (parallelism)
    pub workers: usize,
    /// Maximum URLs waiting in the channel (backpressure bound)
    pub queue_capacity: usize,
    /// Bound on establishing a connection
    pub connect_timeout: Duration,
    /// Bound on waiting for the response once connected
    pub read_timeout: Duration,
}

impl CheckConfig {
    /// Settings for `workers` threads with every other value at its default.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    /// Upper bound on one whole probe: connecting plus reading the response.
    pub fn request_timeout(&self) -> Duration {
        self.connect_timeout + self.read_timeout
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::new(4);
        assert_eq!(config.workers, 4);
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.connect_timeout, Duration::from_millis(2000));
        assert_eq!(config.read_timeout, Duration::from_millis(2000));
        assert_eq!(config.request_timeout(), Duration::from_secs(4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_workers() {
        assert_eq!(CheckConfig::new(0).validate(), Err(ConfigError::NoWorkers));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = CheckConfig::new(2).with_queue_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroQueueCapacity));
    }

    #[test]
    fn test_custom_timeouts() {
        let config = CheckConfig::new(1)
            .with_timeouts(Duration::from_millis(100), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Duration::from_millis(350));
    }
}
