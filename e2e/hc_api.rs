//! E2E Test Suite 03: HC API
//!
//! Validates the hash-chain encoder through the public API:
//! - encode_hc / encode_hc_level / encode_hc_with_context / encode_hc_range
//! - interoperability with the greedy decoder path and the streaming decoder
//! - output never worse than the greedy encoder on compressible text

extern crate lz4block;

#[path = "support/block_shape.rs"]
mod block_shape;

use std::io::Read;

use block_shape::{assert_block_shape, far_repeats};

use lz4block::block::{compress_block_to_vec, decode_to_vec, LZ4_DISTANCE_MAX};
use lz4block::hc::{compress_hc_to_vec, encode_hc_level, encode_hc_range, encode_hc_with_context};
use lz4block::{encode_hc, maximum_output_length, HcContext, Lz4DecoderStream, Lz4Error};

fn prose(len: usize) -> Vec<u8> {
    const WORDS: [&str; 12] = [
        "compression", "block", "literal", "match", "offset", "token", "window", "hash", "chain",
        "sequence", "stream", "buffer",
    ];
    let mut out = Vec::with_capacity(len + 16);
    let mut x = 12_345u32;
    while out.len() < len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        out.extend_from_slice(WORDS[(x >> 16) as usize % WORDS.len()].as_bytes());
        out.push(if (x >> 8) % 9 == 0 { b'\n' } else { b' ' });
    }
    out.truncate(len);
    out
}

fn hc(src: &[u8], attempts: usize) -> Vec<u8> {
    let mut dst = vec![0u8; maximum_output_length(src.len())];
    let n = encode_hc_level(src, &mut dst, attempts);
    assert!(n > 0);
    dst.truncate(n);
    dst
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_roundtrip_various_sizes() {
    for len in [0usize, 1, 4, 12, 13, 100, 4_096, 65_536, 200_000] {
        let src = prose(len);
        let packed = compress_hc_to_vec(&src);
        assert!(packed.len() <= maximum_output_length(len));
        assert_eq!(decode_to_vec(&packed, len).unwrap(), src, "len {len}");
    }
}

#[test]
fn test_hc_zeros() {
    let src = vec![0u8; 1024];
    let packed = compress_hc_to_vec(&src);
    assert!(packed.len() < 32);
    assert_eq!(decode_to_vec(&packed, 1024).unwrap(), src);
}

#[test]
fn test_hc_short_input_is_literal_only() {
    let src = b"0123456789";
    let packed = compress_hc_to_vec(src);
    assert_eq!(packed.len(), 11);
    assert_eq!(packed[0], 0xA0);
}

#[test]
fn test_hc_streaming_decode() {
    let src = prose(90_000);
    let packed = compress_hc_to_vec(&src);
    let mut dec = Lz4DecoderStream::new(&packed[..], packed.len() as u64);
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, src);
}

#[test]
fn test_hc_block_shape_rules() {
    for src in [prose(5_000), far_repeats(3_000, 9), vec![0u8; 2_000], prose(200_000)] {
        for attempts in [1usize, 16, 4_096] {
            assert_block_shape(&src, &hc(&src, attempts));
        }
    }
}

#[test]
fn test_hc_block_shape_rules_past_64k() {
    // The chunk at 66,000 lies outside the window; the later copies do not.
    for len in [70_000usize, 200_000] {
        let src = far_repeats(len, 33);
        let packed = compress_hc_to_vec(&src);
        assert_block_shape(&src, &packed);
        assert!(packed.len() < src.len(), "in-window repeats were not found");
        assert_eq!(decode_to_vec(&packed, len).unwrap(), src);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: ratio
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hc_not_larger_than_greedy_on_text() {
    for len in [10_000usize, 100_000] {
        let src = prose(len);
        let greedy = compress_block_to_vec(&src);
        let high = compress_hc_to_vec(&src);
        assert!(
            high.len() <= greedy.len(),
            "hc {} > greedy {} for {} bytes",
            high.len(),
            greedy.len(),
            len
        );
    }
}

#[test]
fn test_more_attempts_do_not_hurt() {
    let src = prose(50_000);
    let shallow = hc(&src, 1);
    let deep = hc(&src, 1024);
    assert!(deep.len() <= shallow.len() + shallow.len() / 100);
    assert_eq!(decode_to_vec(&shallow, src.len()).unwrap(), src);
    assert_eq!(decode_to_vec(&deep, src.len()).unwrap(), src);
}

#[test]
fn test_far_repeat_found_within_window() {
    // A 1 KiB pattern repeated 60 KiB later must be found as a long match.
    let pattern = prose(1_024);
    let mut src = pattern.clone();
    let mut x = 77u32;
    for _ in 0..(60 * 1024) {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        src.push(x as u8);
    }
    src.extend_from_slice(&pattern);
    let packed = compress_hc_to_vec(&src);
    assert!(src.len() - 2 * pattern.len() < LZ4_DISTANCE_MAX);
    assert!(packed.len() < src.len() - 500);
    assert_eq!(decode_to_vec(&packed, src.len()).unwrap(), src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: context reuse and argument handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_context_reuse_is_deterministic() {
    let a = prose(30_000);
    let b: Vec<u8> = a.iter().rev().copied().collect();
    let mut ctx = HcContext::new();
    let mut d1 = vec![0u8; maximum_output_length(a.len())];
    let mut d2 = vec![0u8; maximum_output_length(a.len())];

    let n1 = encode_hc_with_context(&mut ctx, &a, &mut d1, 256);
    let _ = encode_hc_with_context(&mut ctx, &b, &mut d2, 256);
    let n2 = encode_hc_with_context(&mut ctx, &a, &mut d2, 256);
    assert_eq!(&d1[..n1], &d2[..n2]);

    let mut d3 = vec![0u8; maximum_output_length(a.len())];
    let n3 = encode_hc(&a, &mut d3);
    assert_eq!(&d1[..n1], &d3[..n3]);
}

#[test]
fn test_attempts_are_clamped() {
    let src = prose(5_000);
    assert_eq!(hc(&src, 0), hc(&src, 1));
    assert_eq!(hc(&src, usize::MAX), hc(&src, 65_536));
}

#[test]
fn test_hc_limited_output() {
    let src = prose(20_000);
    let full = compress_hc_to_vec(&src);

    let mut tight = vec![0u8; full.len() / 2];
    assert_eq!(encode_hc(&src, &mut tight), 0);

    let mut exact = vec![0u8; full.len()];
    let n = encode_hc(&src, &mut exact);
    assert_eq!(n, full.len());
    assert_eq!(exact, full);
}

#[test]
fn test_hc_range_bounds() {
    let src = prose(1_000);
    let mut dst = vec![0u8; 2_000];
    let err = encode_hc_range(&src, 900, 200, &mut dst, 0, 2_000).unwrap_err();
    assert!(matches!(err, Lz4Error::InvalidArgument(_)));

    let n = encode_hc_range(&src, 100, 800, &mut dst, 10, 1_500).unwrap();
    assert_eq!(decode_to_vec(&dst[10..10 + n], 800).unwrap(), &src[100..900]);
}
