//! Command-line argument definitions for the `lz4block` binary.
//!
//! Parsed with `clap` derive.  Every input is a single file holding (or
//! producing) one raw LZ4 block; there is no container format.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lz4block")]
#[command(about = "Compress and decompress raw LZ4 blocks")]
#[command(version)]
pub struct Cli {
    /// Decrease verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Increase verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a file as one LZ4 block
    Compress(CompressArgs),
    /// Decode one LZ4 block
    Decompress(DecompressArgs),
    /// Benchmark parallel block compression on a file
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Use the high-compression encoder
    #[arg(long)]
    pub hc: bool,

    /// HC chain walk depth (default: LZ4BLOCK_HC_ATTEMPTS or 256)
    #[arg(long, requires = "hc")]
    pub attempts: Option<usize>,

    /// Greedy encoder acceleration (higher is faster, larger)
    #[arg(long, default_value_t = crate::config::ACCELERATION_DEFAULT, conflicts_with = "hc")]
    pub acceleration: i32,

    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// Exact decoded size; without it the block is streamed
    #[arg(long)]
    pub size: Option<usize>,

    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Use the high-compression encoder
    #[arg(long)]
    pub hc: bool,

    /// Independent block size in bytes
    #[arg(long, default_value_t = crate::config::BLOCK_SIZE_DEFAULT)]
    pub block_size: usize,

    /// Worker threads (0 = one per CPU; default: LZ4BLOCK_NBWORKERS or 0)
    #[arg(long)]
    pub workers: Option<usize>,

    pub input: PathBuf,
}

impl Cli {
    /// Display level after applying `-q` / `-v` to the default of 2.
    pub fn display_level(&self) -> u32 {
        (2 + self.verbose as i64 - self.quiet as i64).clamp(0, 4) as u32
    }
}
