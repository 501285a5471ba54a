//! md2backlog CLI - Markdown to Backlog notation converter.
//!
//! Reads Markdown from a file or stdin and writes Backlog notation to a file
//! or stdout.

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::ConvertArgs;
use output::Output;

/// Convert Markdown to Backlog notation.
#[derive(Parser)]
#[command(
    name = "md2backlog",
    version = concat!("version ", env!("CARGO_PKG_VERSION")),
    about
)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.convert.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    // stdout carries the converted document
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.convert.execute(&output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
