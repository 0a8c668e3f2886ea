//! Benchmark entry points.
//!
//! [`bench_file`] loads a file and hands it to [`bench_mem::bench_mem`],
//! which splits it into independent blocks and times parallel compression
//! and decompression.  [`BenchConfig`] selects the encoder, block size and
//! worker count.

pub mod bench_mem;
pub mod compress_strategy;
pub mod config;

pub use bench_mem::{bench_mem, BenchResult};
pub use config::BenchConfig;

use std::fs;
use std::io;
use std::path::Path;

/// Benchmark the contents of `path`.
pub fn bench_file(path: &Path, config: &BenchConfig) -> io::Result<BenchResult> {
    let data = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    bench_mem(&data, &name, config)
}
