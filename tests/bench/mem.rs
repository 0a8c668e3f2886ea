// Integration tests for bench/bench_mem.rs and bench::bench_file
//
//   - results are consistent across worker counts and block sizes
//   - the recorded checksum is XXH64 (seed 0) of the input
//   - tiny block sizes are raised to the minimum
//   - bench_file reports missing files as I/O errors

use std::fs;

use lz4block::bench::config::MIN_BLOCK_SIZE;
use lz4block::bench::{bench_file, bench_mem, BenchConfig};
use tempfile::TempDir;
use xxhash_rust::xxh64::xxh64;

fn silent() -> BenchConfig {
    let mut c = BenchConfig::default();
    c.set_notification_level(0);
    c
}

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| b"benchmark payload "[i % 18] ^ ((i / 4096) as u8 & 3)).collect()
}

#[test]
fn compressed_size_independent_of_worker_count() {
    let src = sample(200_000);
    let mut sizes = Vec::new();
    for workers in [1usize, 2, 4] {
        let mut c = silent();
        c.set_block_size(16 * 1024).set_nb_workers(workers);
        let r = bench_mem(&src, "sample", &c).unwrap();
        assert_eq!(r.nb_blocks, 13);
        assert_eq!(r.checksum, xxh64(&src, 0));
        sizes.push(r.compressed_size);
    }
    assert!(sizes.windows(2).all(|w| w[0] == w[1]), "sizes differ: {sizes:?}");
}

#[test]
fn hc_mode_roundtrips_with_similar_size() {
    let src = sample(100_000);
    let mut c = silent();
    c.set_block_size(32 * 1024);
    let greedy = bench_mem(&src, "greedy", &c).unwrap();
    c.set_hc(true);
    let hc = bench_mem(&src, "hc", &c).unwrap();
    assert!(hc.compressed_size <= greedy.compressed_size + greedy.compressed_size / 50);
    assert_eq!(hc.checksum, greedy.checksum);
    assert!(hc.compress_speed_mb_s > 0.0 && hc.decompress_speed_mb_s > 0.0);
}

#[test]
fn tiny_block_size_is_raised() {
    let src = sample(1_000);
    let mut c = silent();
    c.set_block_size(1);
    let r = bench_mem(&src, "tiny", &c).unwrap();
    assert_eq!(r.nb_blocks, src.len().div_ceil(MIN_BLOCK_SIZE));
}

#[test]
fn bench_file_reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("payload.bin");
    let src = sample(50_000);
    fs::write(&path, &src).unwrap();

    let r = bench_file(&path, &silent()).unwrap();
    assert_eq!(r.src_size, src.len());
    assert_eq!(r.nb_blocks, 1);

    let missing = dir.path().join("missing.bin");
    let err = bench_file(&missing, &silent()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
