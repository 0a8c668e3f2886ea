//! E2E Test Suite 01: Block One-Shot API
//!
//! Drives the greedy encoder and the one-shot decoder through the public
//! crate surface:
//! - encode / encode_fast / encode_range
//! - decode / decode_range / decode_to_vec
//! - maximum_output_length
//!
//! Every block produced here must decode back to its input and obey the
//! end-of-block rules of the LZ4 block format.

extern crate lz4block;

#[path = "support/block_shape.rs"]
mod block_shape;

use block_shape::{assert_block_shape, far_repeats};
use lz4block::block::{
    compress_block_to_vec, decode_range, decode_to_vec, encode_fast, encode_range,
    LZ4_ACCELERATION_MAX,
};
use lz4block::{decode, encode, maximum_output_length};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Deterministic xorshift noise.
fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut s = seed | 1;
    (0..len)
        .map(|_| {
            s ^= s << 13;
            s ^= s >> 7;
            s ^= s << 17;
            (s >> 24) as u8
        })
        .collect()
}

fn text(len: usize) -> Vec<u8> {
    b"It was the best of times, it was the worst of times, it was the age of wisdom. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn compress(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; maximum_output_length(src.len())];
    let n = encode(src, &mut dst);
    assert!(n > 0, "encode failed for {} bytes", src.len());
    dst.truncate(n);
    dst
}

fn roundtrip(src: &[u8]) {
    let packed = compress(src);
    let mut out = vec![0u8; src.len()];
    let n = decode(&packed, &mut out, true).expect("decode should succeed");
    assert_eq!(n, src.len());
    assert_eq!(out, src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: 1024 zero bytes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zeros_compress_far_below_input() {
    let src = vec![0u8; 1024];
    let packed = compress(&src);
    assert!(packed.len() < 32, "1024 zeros packed into {} bytes", packed.len());

    let out = decode_to_vec(&packed, 1024).unwrap();
    assert_eq!(out, src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: incompressible input becomes one literal run
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ten_random_bytes_are_one_literal_run() {
    let src = noise(10, 0xDEAD_BEEF);
    let packed = compress(&src);
    assert_eq!(packed.len(), 11);
    assert_eq!(packed[0], 0xA0);
    assert_eq!(&packed[1..], &src[..]);
}

#[test]
fn test_long_literal_run_uses_extension_bytes() {
    let src = noise(300, 42);
    let packed = compress(&src);
    // token + 300 - 15 = 285 = 255 + 30
    assert_eq!(packed[0] >> 4, 15);
    assert_eq!(packed[1], 255);
    assert_eq!(packed[2], 30);
    roundtrip(&src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: round trips across sizes and shapes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_is_single_zero_token() {
    let mut dst = [0xFFu8; 4];
    assert_eq!(encode(&[], &mut dst), 1);
    assert_eq!(dst[0], 0);

    let mut out = [0u8; 0];
    assert_eq!(decode(&dst[..1], &mut out, true).unwrap(), 0);
}

#[test]
fn test_roundtrip_small_sizes() {
    for len in [1usize, 4, 5, 12, 13, 14, 31, 64] {
        roundtrip(&noise(len, len as u64));
        roundtrip(&vec![b'z'; len]);
    }
}

#[test]
fn test_roundtrip_random_data() {
    roundtrip(&noise(10_000, 7));
}

#[test]
fn test_roundtrip_repetitive_text() {
    let src = text(50_000);
    let packed = compress(&src);
    assert!(packed.len() < src.len() / 10);
    roundtrip(&src);
}

#[test]
fn test_roundtrip_beyond_64k_window() {
    // Two copies of a 70 KiB noise block: the second copy is out of reach.
    let base = noise(70 * 1024, 99);
    let mut src = base.clone();
    src.extend_from_slice(&base);
    roundtrip(&src);

    let mixed: Vec<u8> = (0..300_000u32).map(|i| ((i / 7) % 251) as u8 ^ (i % 3) as u8).collect();
    roundtrip(&mixed);
}

#[test]
fn test_acceleration_range() {
    let src = text(20_000);
    for acc in [i32::MIN, -5, 0, 1, 2, 8, 100, LZ4_ACCELERATION_MAX, i32::MAX] {
        let mut dst = vec![0u8; maximum_output_length(src.len())];
        let n = encode_fast(&src, &mut dst, acc);
        assert!(n > 0);
        assert_eq!(decode_to_vec(&dst[..n], src.len()).unwrap(), src);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: block format rules
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_block_shape_rules() {
    for src in [text(5_000), noise(3_000, 3), vec![7u8; 2_000]] {
        assert_block_shape(&src, &compress(&src));
    }
}

#[test]
fn test_block_shape_rules_past_64k() {
    // 32-bit table entries: candidates older than the window must be skipped.
    for len in [70_000usize, 200_000] {
        let src = far_repeats(len, 21);
        let packed = compress(&src);
        assert_block_shape(&src, &packed);
        assert_eq!(decode_to_vec(&packed, len).unwrap(), src);
    }
    let src = text(200_000);
    assert_block_shape(&src, &compress(&src));
}

#[test]
fn test_output_never_exceeds_bound() {
    for len in [0usize, 1, 15, 16, 255, 270, 4096, 65_536] {
        let src = noise(len, 11);
        let packed = compress_block_to_vec(&src);
        assert!(packed.len() <= maximum_output_length(len));
    }
    assert_eq!(maximum_output_length(0), 16);
    assert_eq!(maximum_output_length(255), 255 + 1 + 16);
}

#[test]
fn test_encoding_is_deterministic() {
    let src = text(12_345);
    assert_eq!(compress(&src), compress(&src));
}

#[test]
fn test_too_small_destination_reports_zero() {
    let src = noise(1_000, 5);
    let mut dst = vec![0u8; 500];
    assert_eq!(encode(&src, &mut dst), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: offset/length forms
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_range_forms_roundtrip() {
    let payload = text(4_000);
    let mut src = vec![0xAAu8; 100];
    src.extend_from_slice(&payload);
    src.extend_from_slice(&[0xBB; 50]);

    let mut packed = vec![0u8; 16 + maximum_output_length(payload.len())];
    let cap = packed.len() - 16;
    let n = encode_range(&src, 100, payload.len(), &mut packed, 16, cap).unwrap();
    assert!(n > 0);

    let mut out = vec![0u8; payload.len() + 8];
    let got = decode_range(&packed, 16, n, &mut out, 8, payload.len(), true).unwrap();
    assert_eq!(got, payload.len());
    assert_eq!(&out[8..], &payload[..]);
    assert!(out[..8].iter().all(|&b| b == 0));
}

#[test]
fn test_decode_with_capacity_only() {
    let src = text(1_000);
    let packed = compress(&src);
    let mut out = vec![0u8; 2_000];
    let n = decode(&packed, &mut out, false).unwrap();
    assert_eq!(n, 1_000);
    assert_eq!(&out[..n], &src[..]);
}
