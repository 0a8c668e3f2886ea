// Integration tests for block/decompress_api.rs
//
// Hand-built blocks exercise the decoder paths the encoder never emits:
// overlapping copies at every small offset, long extension chains, and
// unknown-length decoding into an oversized buffer.

use lz4block::block::decompress_api::{decode, decode_range, decode_to_vec};
use lz4block::Lz4Error;

/// Build a block: `prefix` literals, one match, then `tail` literals.
fn block_with_match(prefix: &[u8], offset: u16, match_len: usize, tail: &[u8]) -> Vec<u8> {
    let mut b = Vec::new();
    let ml = match_len - 4;
    let lit_nib = prefix.len().min(15) as u8;
    let ml_nib = ml.min(15) as u8;
    b.push((lit_nib << 4) | ml_nib);
    if prefix.len() >= 15 {
        push_ext(&mut b, prefix.len() - 15);
    }
    b.extend_from_slice(prefix);
    b.extend_from_slice(&offset.to_le_bytes());
    if ml >= 15 {
        push_ext(&mut b, ml - 15);
    }
    b.push((tail.len().min(15) as u8) << 4);
    if tail.len() >= 15 {
        push_ext(&mut b, tail.len() - 15);
    }
    b.extend_from_slice(tail);
    b
}

fn push_ext(b: &mut Vec<u8>, mut n: usize) {
    while n >= 255 {
        b.push(255);
        n -= 255;
    }
    b.push(n as u8);
}

// Long enough that every match starts at least 12 bytes before the end.
const TAIL: &[u8] = b"XYZWVUTSRQPO";

#[test]
fn overlapping_copies_at_small_offsets() {
    let prefix = b"abcdefghijklmnop";
    for offset in 1..=16u16 {
        for match_len in [4usize, 5, 7, 8, 9, 15, 19, 20, 64, 300] {
            let block = block_with_match(prefix, offset, match_len, TAIL);
            let mut expected = prefix.to_vec();
            for _ in 0..match_len {
                expected.push(expected[expected.len() - offset as usize]);
            }
            expected.extend_from_slice(TAIL);
            let out = decode_to_vec(&block, expected.len())
                .unwrap_or_else(|e| panic!("offset {offset} len {match_len}: {e}"));
            assert_eq!(out, expected, "offset {offset} len {match_len}");
        }
    }
}

#[test]
fn long_extension_chains() {
    let prefix = vec![b'q'; 600];
    let block = block_with_match(&prefix, 1, 1_000, &[b'e'; 40]);
    let out = decode_to_vec(&block, 1_640).unwrap();
    assert!(out[..1_600].iter().all(|&b| b == b'q'));
    assert!(out[1_600..].iter().all(|&b| b == b'e'));
}

#[test]
fn unknown_length_into_large_buffer() {
    let block = block_with_match(b"hello ", 6, 12, b"world");
    let mut out = vec![0u8; 1_000];
    let n = decode(&block, &mut out, false).unwrap();
    assert_eq!(&out[..n], b"hello hello hello world");
}

#[test]
fn known_length_rejects_short_output() {
    let block = block_with_match(b"hello ", 6, 12, b"world");
    let mut out = vec![0u8; 24];
    assert_eq!(decode(&block, &mut out, true), Err(Lz4Error::CorruptInput));
}

#[test]
fn match_into_last_five_bytes_is_rejected() {
    // 8 literals, match of 4, no trailing literals: the match would end the block.
    let mut block = vec![0x80];
    block.extend_from_slice(b"abcdefgh");
    block.extend_from_slice(&[8, 0]);
    block.push(0x00);
    let mut out = vec![0u8; 12];
    assert!(decode(&block, &mut out, true).is_err());
}

#[test]
fn range_form_writes_only_its_window() {
    let block = block_with_match(b"ab", 2, 6, b"cdefghijklmn");
    let mut src = vec![0xEE; 3];
    src.extend_from_slice(&block);
    let mut out = vec![0x11u8; 34];
    let n = decode_range(&src, 3, block.len(), &mut out, 10, 20, true).unwrap();
    assert_eq!(n, 20);
    assert_eq!(&out[10..30], b"ababababcdefghijklmn");
    assert!(out[..10].iter().chain(&out[30..]).all(|&b| b == 0x11));
}
