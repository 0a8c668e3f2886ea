// Integration tests for hc/compress_hc.rs and hc/encode.rs
//
//   - compress_hash_chain() output decodes for inputs that stress the
//     m1/m2/m3 overlap handling
//   - encode_sequence() emits the documented token layout
//   - limited output never writes a partial block

use lz4block::block::compress::maximum_output_length;
use lz4block::block::decompress_api::decode_to_vec;
use lz4block::block::types::LimitedOutputDirective;
use lz4block::hc::compress_hc::compress_hash_chain;
use lz4block::hc::encode::{encode_sequence, Lz4HcError};
use lz4block::hc::types::{HcContext, LZ4HC_DEFAULT_ATTEMPTS};

fn hc(src: &[u8], attempts: usize) -> Vec<u8> {
    let mut ctx = HcContext::new();
    let mut dst = vec![0u8; maximum_output_length(src.len())];
    let n = compress_hash_chain(&mut ctx, src, &mut dst, attempts, LimitedOutputDirective::NotLimited);
    assert!(n > 0);
    dst.truncate(n);
    dst
}

/// Near-repeats with shifting boundaries: a candidate found at one position
/// is often beaten by one starting a few bytes later.
fn staggered(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(&b"ABCDEFGHIJKLMNOPQRSTUVWXYZ"[i % 7..]);
        out.extend_from_slice(&b"0123456789"[..(i % 10) + 1]);
        i += 1;
    }
    out.truncate(len);
    out
}

#[test]
fn staggered_repeats_roundtrip() {
    for len in [13usize, 50, 500, 5_000, 80_000] {
        let src = staggered(len);
        for attempts in [1usize, 8, LZ4HC_DEFAULT_ATTEMPTS] {
            let out = hc(&src, attempts);
            assert_eq!(decode_to_vec(&out, len).unwrap(), src, "len {len} attempts {attempts}");
        }
    }
}

#[test]
fn long_runs_roundtrip() {
    let mut src = Vec::new();
    for (byte, run) in [(b'a', 5usize), (b'b', 300), (b'c', 17), (b'a', 70_000), (b'z', 4)] {
        src.extend(std::iter::repeat(byte).take(run));
    }
    let out = hc(&src, LZ4HC_DEFAULT_ATTEMPTS);
    assert!(out.len() < 400);
    assert_eq!(decode_to_vec(&out, src.len()).unwrap(), src);
}

#[test]
fn encode_sequence_layout_with_long_literals() {
    let src: Vec<u8> = (0..64u8).collect();
    let mut dst = vec![0u8; 128];
    let (mut ip, mut op, mut anchor) = (20usize, 0usize, 0usize);
    encode_sequence(&src, &mut dst, &mut ip, &mut op, &mut anchor, 19, 16, LimitedOutputDirective::NotLimited)
        .unwrap();
    // 20 literals: nibble 15 + 5; match 19: nibble 15 + 0.
    assert_eq!(dst[0], 0xFF);
    assert_eq!(dst[1], 5);
    assert_eq!(&dst[2..22], &src[..20]);
    assert_eq!(&dst[22..24], &[16, 0]);
    assert_eq!(dst[24], 0);
    assert_eq!(op, 25);
    assert_eq!((ip, anchor), (39, 39));
}

#[test]
fn encode_sequence_refuses_to_overflow() {
    let src = vec![7u8; 64];
    let mut dst = vec![0u8; 10];
    let (mut ip, mut op, mut anchor) = (8usize, 0usize, 0usize);
    let err = encode_sequence(&src, &mut dst, &mut ip, &mut op, &mut anchor, 20, 1, LimitedOutputDirective::LimitedOutput)
        .unwrap_err();
    assert_eq!(err, Lz4HcError::OutputTooSmall);
}

#[test]
fn limited_output_fails_whole_block() {
    let src = staggered(10_000);
    let full = hc(&src, LZ4HC_DEFAULT_ATTEMPTS);
    let mut ctx = HcContext::new();
    let mut dst = vec![0u8; full.len() - 1];
    let n = compress_hash_chain(&mut ctx, &src, &mut dst, LZ4HC_DEFAULT_ATTEMPTS, LimitedOutputDirective::LimitedOutput);
    assert_eq!(n, 0);
}
