//! E2E Test Suite 04: Error Handling
//!
//! Malformed blocks, undersized buffers and out-of-range windows must be
//! rejected with the right `Lz4Error` variant, never a panic.

extern crate lz4block;

use std::io;

use lz4block::block::{compress_block_to_vec, decode_range, decode_to_vec};
use lz4block::codec::{decode_block, BlockCodec};
use lz4block::{decode, encode, Lz4Error};

fn sample() -> Vec<u8> {
    b"error handling sample text, error handling sample text, repeated. ".repeat(40)
}

// ─────────────────────────────────────────────────────────────────────────────
// Corrupt blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_offset_beyond_output_is_corrupt() {
    // One literal, match 5 bytes back with only 1 byte decoded.
    let block = [0x10, b'a', 0x05, 0x00, 0x00];
    let mut out = [0u8; 32];
    assert_eq!(decode(&block, &mut out, false), Err(Lz4Error::CorruptInput));
}

#[test]
fn test_zero_offset_is_corrupt() {
    let block = [0x40, b'a', b'b', b'c', b'd', 0x00, 0x00, 0x50, 1, 2, 3, 4, 5];
    let mut out = [0u8; 64];
    assert_eq!(decode(&block, &mut out, false), Err(Lz4Error::CorruptInput));
}

#[test]
fn test_flipped_offset_in_real_block() {
    let src = sample();
    let mut packed = compress_block_to_vec(&src);
    // First sequence: token, literal length, literals, then the offset.
    let mut off_pos = 1;
    let mut lit = (packed[0] >> 4) as usize;
    if lit == 15 {
        loop {
            let b = packed[off_pos];
            off_pos += 1;
            lit += b as usize;
            if b != 255 {
                break;
            }
        }
    }
    off_pos += lit;
    packed[off_pos] = 0xFF;
    packed[off_pos + 1] = 0xFF;
    assert_eq!(decode_to_vec(&packed, src.len()), Err(Lz4Error::CorruptInput));
}

#[test]
fn test_truncated_block_is_corrupt() {
    let src = sample();
    let packed = compress_block_to_vec(&src);
    for cut in [1usize, 2, 3, 7, packed.len() / 2] {
        let r = decode_to_vec(&packed[..packed.len() - cut], src.len());
        assert!(r.is_err(), "cut {cut} decoded cleanly");
    }
}

#[test]
fn test_empty_source() {
    let mut out = [0u8; 8];
    assert_eq!(decode(&[], &mut out, true), Err(Lz4Error::CorruptInput));
    assert_eq!(decode(&[], &mut [], true), Ok(0));
}

#[test]
fn test_trailing_garbage_in_known_length_mode() {
    let src = sample();
    let mut packed = compress_block_to_vec(&src);
    packed.extend_from_slice(&[0xAB, 0xCD]);
    assert!(decode_to_vec(&packed, src.len()).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Capacity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_output_too_small() {
    let src = sample();
    let packed = compress_block_to_vec(&src);
    let mut out = vec![0u8; src.len() - 1];
    let err = decode(&packed, &mut out, false).unwrap_err();
    assert!(matches!(err, Lz4Error::CapacityExceeded | Lz4Error::CorruptInput));
}

#[test]
fn test_encoder_reports_zero_when_output_is_full() {
    let mut x = 0x2545_F491u32;
    let src: Vec<u8> = (0..2_000)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 11) as u8
        })
        .collect();
    let mut dst = vec![0u8; 100];
    assert_eq!(encode(&src, &mut dst), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_range_outside_buffer() {
    let packed = compress_block_to_vec(&sample());
    let mut out = vec![0u8; 100];
    let err = decode_range(&packed, 0, packed.len() + 1, &mut out, 0, 100, false).unwrap_err();
    assert!(matches!(err, Lz4Error::InvalidArgument(_)));
    let err = decode_range(&packed, 0, packed.len(), &mut out, 50, 51, false).unwrap_err();
    assert!(matches!(err, Lz4Error::InvalidArgument(_)));
    let err = decode_range(&packed, usize::MAX, 2, &mut out, 0, 1, false).unwrap_err();
    assert!(matches!(err, Lz4Error::InvalidArgument(_)));
}

#[test]
fn test_lzma_codec_is_rejected() {
    let err = BlockCodec::from_flags(0x41).unwrap_err();
    assert!(matches!(err, Lz4Error::InvalidArgument(_)));
}

#[test]
fn test_codec_size_mismatch() {
    let src = sample();
    let packed = compress_block_to_vec(&src);
    assert!(decode_block(BlockCodec::Lz4, &packed, src.len() + 1).is_err());
    assert!(decode_block(BlockCodec::Stored, &src, src.len() + 1).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// io::Error conversion
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_error_converts_to_io_error() {
    let e: io::Error = Lz4Error::CorruptInput.into();
    assert_eq!(e.kind(), io::ErrorKind::InvalidData);
    let e: io::Error = Lz4Error::InvalidArgument("bad".into()).into();
    assert_eq!(e.kind(), io::ErrorKind::InvalidInput);
    assert!(Lz4Error::CapacityExceeded.to_string().contains("capacity"));
}
