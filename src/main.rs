// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (bad arguments stop here)
// 2. Set up logging to stderr
// 3. Build the HTTP probe and run the producer/worker pipeline
// 4. Print the final tally on stdout
// 5. Exit with proper code (0 = run completed, 2 = error)
// =============================================================================

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method

use url_sentinel::checker::HttpProbe;
use url_sentinel::cli::Cli;
use url_sentinel::tally::TallySnapshot;
use url_sentinel::{logging, pipeline};

fn main() {
    // On missing or malformed arguments this prints usage to stderr and exits
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic. Unreachable URLs and unreadable files
// are not errors here; they only show up in the tally and the logs.
fn run(cli: &Cli) -> Result<()> {
    let config = cli.check_config();
    config.validate()?;

    let probe = HttpProbe::new(&config).context("failed to build HTTP client")?;
    let report = pipeline::check_urls(&cli.urls_file, &config, &probe)?;

    print_summary(&report.tally, cli.json)
}

// Prints the tally either as the summary line or as JSON
fn print_summary(tally: &TallySnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(tally)?);
    } else {
        println!("{}", tally);
    }
    Ok(())
}
