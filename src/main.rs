//! Binary entry point for the `lz4block` command-line tool.
//!
//! Parses arguments with `clap`, dispatches to [`lz4block::cli::commands::run`]
//! and maps any error chain to exit code 1.

use std::process::ExitCode;

use clap::Parser;
use lz4block::cli::args::Cli;
use lz4block::cli::commands::run;
use lz4block::cli::constants::COMPRESSOR_NAME;
use lz4block::displaylevel;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
            ExitCode::FAILURE
        }
    }
}
