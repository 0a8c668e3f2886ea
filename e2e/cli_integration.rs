// e2e/cli_integration.rs: CLI integration tests
//
// Runs the `lz4block` binary as a black box: compress / decompress round
// trips in both encoder modes, streamed and sized decoding, the benchmark
// subcommand, and exit codes on bad input.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn lz4block_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lz4block"))
}

/// Create a TempDir containing a ~20 KB text file.
fn make_temp_input() -> (TempDir, PathBuf, Vec<u8>) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "the quick brown fox jumps over the lazy dog\n".repeat(450).into_bytes();
    fs::write(&input_path, &content).unwrap();
    (dir, input_path, content)
}

// ── 1. Round trips ───────────────────────────────────────────────────────────

#[test]
fn compress_then_stream_decompress() {
    let (dir, input, content) = make_temp_input();
    let packed = dir.path().join("input.lz4");
    let restored = dir.path().join("restored.txt");

    let status = Command::new(lz4block_bin())
        .args(["-q", "compress"])
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(fs::metadata(&packed).unwrap().len() < content.len() as u64);

    let status = Command::new(lz4block_bin())
        .args(["-q", "decompress"])
        .arg(&packed)
        .arg(&restored)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&restored).unwrap(), content);
}

#[test]
fn hc_compress_then_sized_decompress() {
    let (dir, input, content) = make_temp_input();
    let packed = dir.path().join("input.lz4hc");
    let restored = dir.path().join("restored.txt");

    let status = Command::new(lz4block_bin())
        .args(["-q", "compress", "--hc", "--attempts", "64"])
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(lz4block_bin())
        .args(["-q", "decompress", "--size", &content.len().to_string()])
        .arg(&packed)
        .arg(&restored)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&restored).unwrap(), content);
}

#[test]
fn empty_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty");
    let packed = dir.path().join("empty.lz4");
    let restored = dir.path().join("restored");
    fs::write(&input, b"").unwrap();

    let status = Command::new(lz4block_bin())
        .args(["-q", "compress"])
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&packed).unwrap(), vec![0u8]);

    let status = Command::new(lz4block_bin())
        .args(["-q", "decompress"])
        .arg(&packed)
        .arg(&restored)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(fs::read(&restored).unwrap().is_empty());
}

// ── 2. Verbosity ─────────────────────────────────────────────────────────────

#[test]
fn default_level_reports_sizes() {
    let (dir, input, content) = make_temp_input();
    let packed = dir.path().join("out.lz4");
    let output = Command::new(lz4block_bin())
        .arg("compress")
        .arg(&input)
        .arg(&packed)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&content.len().to_string()), "stderr: {stderr}");
}

#[test]
fn quiet_is_silent() {
    let (dir, input, _) = make_temp_input();
    let packed = dir.path().join("out.lz4");
    let output = Command::new(lz4block_bin())
        .args(["-q", "compress"])
        .arg(&input)
        .arg(&packed)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

// ── 3. Benchmark ─────────────────────────────────────────────────────────────

#[test]
fn bench_subcommand_runs() {
    let (_dir, input, _) = make_temp_input();
    let status = Command::new(lz4block_bin())
        .args(["-q", "bench", "--block-size", "4096", "--workers", "2"])
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(lz4block_bin())
        .args(["-q", "bench", "--hc", "--block-size", "8192"])
        .arg(&input)
        .env("LZ4BLOCK_NBWORKERS", "1")
        .env("LZ4BLOCK_HC_ATTEMPTS", "16")
        .status()
        .unwrap();
    assert!(status.success());
}

// ── 4. Failures ──────────────────────────────────────────────────────────────

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(lz4block_bin())
        .arg("compress")
        .arg(dir.path().join("does-not-exist"))
        .arg(dir.path().join("out"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lz4block:"), "stderr: {stderr}");
}

#[test]
fn corrupt_block_fails() {
    let dir = TempDir::new().unwrap();
    let packed = dir.path().join("bad.lz4");
    // One literal, then an offset pointing before the start of output.
    fs::write(&packed, [0x10, b'a', 0x09, 0x00, 0x50, 1, 2, 3, 4, 5]).unwrap();

    for extra in [&[][..], &["--size", "20"][..]] {
        let status = Command::new(lz4block_bin())
            .args(["-q", "decompress"])
            .args(extra)
            .arg(&packed)
            .arg(dir.path().join("out"))
            .status()
            .unwrap();
        assert_eq!(status.code(), Some(1));
    }
}

#[test]
fn attempts_without_hc_is_a_usage_error() {
    let (dir, input, _) = make_temp_input();
    let status = Command::new(lz4block_bin())
        .args(["compress", "--attempts", "4"])
        .arg(&input)
        .arg(dir.path().join("out"))
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(2));
}
