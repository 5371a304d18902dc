//! Crossbin CLI - cross-compiling build helper for Go modules
//!
//! Entry point for the crossbin command-line application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crossbin::cli::output::{display_error, OutputConfig};
use crossbin::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Apply output configuration globally
    let output_config = OutputConfig::new(cli.quiet, cli.json);
    output_config.apply_global();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
