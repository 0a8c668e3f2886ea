// Integration tests for block/compress.rs: the greedy encoder
//
//   - maximum_output_length() worst-case formula and input ceiling
//   - encode_with_context() gives the same bytes as encode() on a dirty context
//   - both hash-table layouts (inputs below and above the 64 KiB limit)
//   - acceleration trades ratio for speed but always round-trips

use lz4block::block::compress::{
    encode, encode_fast, encode_with_context, maximum_output_length, LZ4_ACCELERATION_DEFAULT,
    LZ4_ACCELERATION_MAX,
};
use lz4block::block::decompress_api::decode_to_vec;
use lz4block::block::types::{CompressContext, LZ4_64KLIMIT, LZ4_MAX_INPUT_SIZE};

fn words(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut i = 0u32;
    while out.len() < len {
        out.extend_from_slice(format!("record-{:05} value={} ", i % 997, i % 13).as_bytes());
        i += 1;
    }
    out.truncate(len);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// maximum_output_length
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bound_formula() {
    assert_eq!(maximum_output_length(0), 16);
    assert_eq!(maximum_output_length(1), 17);
    assert_eq!(maximum_output_length(254), 270);
    assert_eq!(maximum_output_length(255), 272);
    assert_eq!(maximum_output_length(65_536), 65_536 + 257 + 16);
}

#[test]
fn bound_rejects_oversized_input() {
    assert!(maximum_output_length(LZ4_MAX_INPUT_SIZE) > LZ4_MAX_INPUT_SIZE);
    assert_eq!(maximum_output_length(LZ4_MAX_INPUT_SIZE + 1), 0);
}

#[test]
fn constants() {
    assert_eq!(LZ4_ACCELERATION_DEFAULT, 1);
    assert_eq!(LZ4_ACCELERATION_MAX, 65_537);
    assert_eq!(LZ4_MAX_INPUT_SIZE, 0x7E00_0000);
}

// ─────────────────────────────────────────────────────────────────────────────
// Context reuse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reused_context_matches_fresh_one() {
    let small = words(10_000);
    let large = words(LZ4_64KLIMIT + 5_000);

    let mut ctx = CompressContext::new();
    let mut a = vec![0u8; maximum_output_length(large.len())];
    let mut b = vec![0u8; maximum_output_length(large.len())];

    // Dirty the context with the other table layout first.
    let _ = encode_with_context(&mut ctx, &large, &mut a, 1);
    let n1 = encode_with_context(&mut ctx, &small, &mut a, 1);
    let n2 = encode(&small, &mut b);
    assert_eq!(&a[..n1], &b[..n2]);

    let _ = encode_with_context(&mut ctx, &small, &mut a, 1);
    let n1 = encode_with_context(&mut ctx, &large, &mut a, 1);
    let n2 = encode(&large, &mut b);
    assert_eq!(&a[..n1], &b[..n2]);
    assert_eq!(decode_to_vec(&a[..n1], large.len()).unwrap(), large);
}

// ─────────────────────────────────────────────────────────────────────────────
// Acceleration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn higher_acceleration_still_roundtrips() {
    let src = words(100_000);
    let mut sizes = Vec::new();
    for acc in [1, 4, 32, 1_000] {
        let mut dst = vec![0u8; maximum_output_length(src.len())];
        let n = encode_fast(&src, &mut dst, acc);
        assert!(n > 0 && n < src.len());
        assert_eq!(decode_to_vec(&dst[..n], src.len()).unwrap(), src);
        sizes.push(n);
    }
    // Acceleration 1 looks at every position, so it is never beaten badly.
    assert!(sizes[0] <= sizes[3]);
}

#[test]
fn out_of_range_acceleration_is_clamped() {
    let src = words(8_000);
    let mut d0 = vec![0u8; maximum_output_length(src.len())];
    let mut d1 = vec![0u8; maximum_output_length(src.len())];
    let n0 = encode_fast(&src, &mut d0, -7);
    let n1 = encode_fast(&src, &mut d1, LZ4_ACCELERATION_DEFAULT);
    assert_eq!(&d0[..n0], &d1[..n1]);
}
