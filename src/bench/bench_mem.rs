//! In-memory parallel benchmark.
//!
//! The input is split into independent blocks of `config.block_size` bytes.
//! Blocks are compressed in parallel on a dedicated rayon pool, each worker
//! task owning its own encoder context, then decompressed in parallel and
//! verified against the XXH64 checksum of the original input.

use std::io;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use xxhash_rust::xxh64::{xxh64, Xxh64};

use super::compress_strategy::build_strategy;
use super::config::{BenchConfig, MIN_BLOCK_SIZE};
use crate::block::decompress_api::decode_to_vec;
use crate::config::effective_workers;

/// Result of one [`bench_mem`] run.
#[derive(Debug, Clone)]
pub struct BenchResult {
    /// Total bytes in the source.
    pub src_size: usize,
    /// Total bytes over all compressed blocks.
    pub compressed_size: usize,
    pub nb_blocks: usize,
    /// `src_size / compressed_size`.
    pub ratio: f64,
    /// Compression throughput in MB/s.
    pub compress_speed_mb_s: f64,
    /// Decompression throughput in MB/s.
    pub decompress_speed_mb_s: f64,
    /// XXH64 (seed 0) of the source, confirmed on the decoded output.
    pub checksum: u64,
}

fn speed_mb_s(bytes: usize, elapsed: Duration) -> f64 {
    bytes as f64 / elapsed.as_secs_f64().max(1e-9) / 1_000_000.0
}

/// Compress, decompress and verify `src`.
///
/// # Errors
/// Fails if the worker pool cannot be built, a block does not compress into
/// its bound, a block fails to decode, or the decoded checksum differs.
pub fn bench_mem(src: &[u8], display_name: &str, config: &BenchConfig) -> io::Result<BenchResult> {
    let block_size = config.block_size.max(MIN_BLOCK_SIZE);
    let nb_workers = effective_workers(config.nb_workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(nb_workers)
        .build()
        .map_err(io::Error::other)?;

    let blocks: Vec<&[u8]> = if src.is_empty() {
        vec![src]
    } else {
        src.chunks(block_size).collect()
    };
    let crc_orig = xxh64(src, 0);

    // Gated on the config's own level, not the global one `displaylevel!`
    // reads: library callers set verbosity per run.
    if config.display_level >= 3 {
        eprintln!(
            "{display_name}: {} bytes in {} blocks of {} bytes, {} workers",
            src.len(),
            blocks.len(),
            block_size,
            nb_workers
        );
    }

    // ── Compression ──────────────────────────────────────────────────────────
    let c_start = Instant::now();
    let packed: Vec<io::Result<Vec<u8>>> = pool.install(|| {
        blocks
            .par_iter()
            .map_init(
                || build_strategy(config),
                |strategy, block| -> io::Result<Vec<u8>> {
                    let mut dst = Vec::new();
                    let n = strategy.compress_block(block, &mut dst);
                    if n == 0 {
                        return Err(io::Error::other("block compression failed"));
                    }
                    dst.truncate(n);
                    Ok(dst)
                },
            )
            .collect()
    });
    let c_elapsed = c_start.elapsed();
    let packed = packed.into_iter().collect::<io::Result<Vec<_>>>()?;
    let compressed_size: usize = packed.iter().map(Vec::len).sum();

    if config.display_level >= 4 {
        for (i, (block, p)) in blocks.iter().zip(&packed).enumerate() {
            eprintln!("  block {i:>5}: {:>10} -> {:>10}", block.len(), p.len());
        }
    }

    // ── Decompression ────────────────────────────────────────────────────────
    let d_start = Instant::now();
    let decoded: Vec<io::Result<Vec<u8>>> = pool.install(|| {
        blocks
            .par_iter()
            .zip(packed.par_iter())
            .map(|(block, p)| decode_to_vec(p, block.len()).map_err(io::Error::from))
            .collect()
    });
    let d_elapsed = d_start.elapsed();

    let mut hasher = Xxh64::new(0);
    for block in decoded {
        hasher.update(&block?);
    }
    let crc_check = hasher.digest();
    if crc_check != crc_orig {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{display_name}: decoded checksum {crc_check:016X} != original {crc_orig:016X}"),
        ));
    }

    let result = BenchResult {
        src_size: src.len(),
        compressed_size,
        nb_blocks: blocks.len(),
        ratio: src.len() as f64 / compressed_size as f64,
        compress_speed_mb_s: speed_mb_s(src.len(), c_elapsed),
        decompress_speed_mb_s: speed_mb_s(src.len(), d_elapsed),
        checksum: crc_orig,
    };

    if config.display_level >= 2 {
        // Keep the tail of long names, where the file name is.
        let name = if display_name.len() > 17 {
            let mut cut = display_name.len() - 17;
            while !display_name.is_char_boundary(cut) {
                cut += 1;
            }
            &display_name[cut..]
        } else {
            display_name
        };
        eprintln!(
            "{:>17} : {:>10} -> {:>10} ({:6.3}), {:8.1} MB/s, {:8.1} MB/s",
            name,
            result.src_size,
            result.compressed_size,
            result.ratio,
            result.compress_speed_mb_s,
            result.decompress_speed_mb_s
        );
    }

    Ok(result)
}
