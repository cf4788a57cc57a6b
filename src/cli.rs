// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two positional arguments are required: the URL file and the number of
// workers. Everything else is an optional flag with a sensible default.
// If the positionals are missing or malformed, clap prints a usage message to
// stderr and exits before any thread is started.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::config::{
    CheckConfig, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_QUEUE_CAPACITY, DEFAULT_READ_TIMEOUT_MS,
};

// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "url-sentinel",
    version,
    about = "Check which URLs in a file are reachable, using a pool of worker threads",
    long_about = "url-sentinel reads one URL per line from a file and sends a HEAD request to each, \
                  spreading the work over NUMBER_OF_WORKERS threads. It prints how many URLs \
                  answered OK, how many answered with an error status, and how many could not be \
                  reached at all."
)]
pub struct Cli {
    /// File with one URL per line
    #[arg(value_name = "URLS_FILE")]
    pub urls_file: PathBuf,

    /// How many URLs to check in parallel (at least 1)
    #[arg(
        value_name = "NUMBER_OF_WORKERS",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub workers: usize,

    /// How many URLs may wait between the file reader and the workers
    #[arg(
        long,
        default_value_t = DEFAULT_QUEUE_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub queue_capacity: usize,

    /// Connection timeout per URL, in milliseconds
    #[arg(
        long,
        default_value_t = DEFAULT_CONNECT_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub connect_timeout_ms: u64,

    /// Response timeout per URL, in milliseconds
    #[arg(
        long,
        default_value_t = DEFAULT_READ_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub read_timeout_ms: u64,

    /// Print the summary as JSON instead of a text line
    #[arg(long)]
    pub json: bool,

    /// Log each URL and worker to stderr (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn check_config(&self) -> CheckConfig {
        CheckConfig::new(self.workers)
            .with_queue_capacity(self.queue_capacity)
            .with_timeouts(
                Duration::from_millis(self.connect_timeout_ms),
                Duration::from_millis(self.read_timeout_ms),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positionals_and_defaults() {
        let cli = Cli::try_parse_from(["url-sentinel", "urls.txt", "4"]).unwrap();
        assert_eq!(cli.urls_file, PathBuf::from("urls.txt"));
        assert!(!cli.json);
        assert_eq!(cli.check_config(), CheckConfig::new(4));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "url-sentinel",
            "urls.txt",
            "2",
            "--queue-capacity",
            "64",
            "--connect-timeout-ms",
            "500",
            "--read-timeout-ms",
            "750",
            "--json",
        ])
        .unwrap();

        let config = cli.check_config();
        assert!(cli.json);
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.connect_timeout, Duration::from_millis(500));
        assert_eq!(config.read_timeout, Duration::from_millis(750));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["url-sentinel"]).is_err());
        assert!(Cli::try_parse_from(["url-sentinel", "urls.txt"]).is_err());
        assert!(Cli::try_parse_from(["url-sentinel", "urls.txt", "0"]).is_err());
        assert!(Cli::try_parse_from(["url-sentinel", "urls.txt", "many"]).is_err());
        assert!(Cli::try_parse_from(["url-sentinel", "urls.txt", "2", "extra"]).is_err());
    }
}
