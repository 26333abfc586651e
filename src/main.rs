//! Apprig CLI - run your apps' build commands from one config file
//!
//! Entry point for the apprig command-line application.

use anyhow::Result;
use clap::Parser;

use apprig::cli::output::{display_error, OutputConfig};
use apprig::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber from the global flags
    let output_config = OutputConfig::new(cli.quiet, cli.verbose);
    output_config.init_tracing();

    // Run the command and handle errors
    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
