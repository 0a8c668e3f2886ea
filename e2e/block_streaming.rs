//! E2E Test Suite 02: Streaming Block Decoder
//!
//! Exercises `Lz4DecoderStream` as a `std::io::Read` adapter:
//! - arbitrary read sizes, down to one byte per call
//! - sources that hand out one byte at a time
//! - bounded input length inside a larger stream
//! - truncated and corrupt blocks

extern crate lz4block;

use std::io::{self, Cursor, Read};

use lz4block::block::{compress_block_to_vec, decode_to_vec};
use lz4block::hc::compress_hc_to_vec;
use lz4block::Lz4DecoderStream;

fn corpus(len: usize) -> Vec<u8> {
    let words: [&[u8]; 6] = [b"alpha ", b"beta ", b"gamma ", b"delta ", b"epsilon ", b"zeta\n"];
    let mut out = Vec::with_capacity(len);
    let mut i = 0usize;
    while out.len() < len {
        let w = words[(i * 7 + i / 5) % words.len()];
        out.extend_from_slice(w);
        if i % 13 == 0 {
            out.extend_from_slice(&(i as u32).to_le_bytes());
        }
        i += 1;
    }
    out.truncate(len);
    out
}

/// A source that yields a single byte per `read` call.
struct ByteAtATime<'a>(&'a [u8]);

impl Read for ByteAtATime<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.0.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.0[0];
        self.0 = &self.0[1..];
        Ok(1)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: one byte per read
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_byte_reads_reproduce_input() {
    let src = corpus(40_000);
    let packed = compress_block_to_vec(&src);
    let mut dec = Lz4DecoderStream::new(Cursor::new(&packed), packed.len() as u64);

    let mut out = Vec::with_capacity(src.len());
    let mut byte = [0u8; 1];
    loop {
        match dec.read(&mut byte).unwrap() {
            0 => break,
            1 => out.push(byte[0]),
            n => panic!("read {n} bytes into a 1-byte buffer"),
        }
    }
    assert_eq!(out, src);
    assert!(dec.is_finished());
    assert_eq!(dec.total_out(), src.len() as u64);
}

#[test]
fn test_single_byte_reads_of_zero_run() {
    // One long distance-1 match, handed out one byte per call.
    let src = vec![0u8; 1024];
    for packed in [compress_block_to_vec(&src), compress_hc_to_vec(&src)] {
        let expected = decode_to_vec(&packed, 1024).unwrap();
        assert_eq!(expected, src);

        let mut dec = Lz4DecoderStream::new(Cursor::new(&packed), packed.len() as u64);
        let mut out = Vec::with_capacity(1024);
        let mut byte = [0u8; 1];
        loop {
            match dec.read(&mut byte).unwrap() {
                0 => break,
                1 => out.push(byte[0]),
                n => panic!("read {n} bytes into a 1-byte buffer"),
            }
        }
        assert_eq!(out, expected);
        assert!(dec.is_finished());
        assert_eq!(dec.total_out(), 1024);
    }
}

#[test]
fn test_byte_at_a_time_source() {
    let src = corpus(20_000);
    let packed = compress_hc_to_vec(&src);
    let mut dec = Lz4DecoderStream::unbounded(ByteAtATime(&packed));
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, src);
}

#[test]
fn test_varied_read_sizes() {
    let src = corpus(150_000);
    let packed = compress_block_to_vec(&src);
    let mut dec = Lz4DecoderStream::new(Cursor::new(&packed), packed.len() as u64);

    let sizes = [1usize, 3, 17, 128, 129, 4096, 70_000];
    let mut out = Vec::new();
    let mut buf = vec![0u8; 70_000];
    let mut k = 0;
    loop {
        let want = sizes[k % sizes.len()];
        k += 1;
        let n = dec.read(&mut buf[..want]).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: bounded input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_two_blocks_back_to_back() {
    let first = corpus(5_000);
    let second: Vec<u8> = corpus(9_000).into_iter().rev().collect();
    let a = compress_block_to_vec(&first);
    let b = compress_hc_to_vec(&second);

    let mut joined = a.clone();
    joined.extend_from_slice(&b);
    let mut cursor = Cursor::new(joined);

    let mut dec = Lz4DecoderStream::new(&mut cursor, a.len() as u64);
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, first);
    drop(dec);
    assert_eq!(cursor.position(), a.len() as u64);

    let mut dec = Lz4DecoderStream::new(&mut cursor, b.len() as u64);
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, second);
}

#[test]
fn test_empty_block_stream() {
    let mut dec = Lz4DecoderStream::unbounded(Cursor::new(vec![0u8]));
    let mut out = Vec::new();
    assert_eq!(dec.read_to_end(&mut out).unwrap(), 0);
    assert!(dec.is_finished());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: damaged input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_stream_reports_unexpected_eof() {
    // A noisy tail keeps the last literal run long, so the cut lands inside it.
    let mut src = corpus(10_000);
    let mut s = 0x9E37_79B9u32;
    for _ in 0..200 {
        s = s.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        src.push((s >> 24) as u8);
    }
    let packed = compress_block_to_vec(&src);
    let cut = &packed[..packed.len() - 20];

    let mut dec = Lz4DecoderStream::unbounded(Cursor::new(cut));
    let mut out = Vec::new();
    let err = dec.read_to_end(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert!(out.len() < src.len());
    assert_eq!(&out[..], &src[..out.len()]);

    // The failure sticks.
    let err = dec.read(&mut [0u8; 16]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn test_offset_before_start_is_invalid_data() {
    // One literal, then a match 5 bytes back.
    let block = [0x10, b'x', 0x05, 0x00, 0x00];
    let mut dec = Lz4DecoderStream::unbounded(Cursor::new(block));
    let mut out = Vec::new();
    let err = dec.read_to_end(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(out, b"x");
}

#[test]
fn test_into_inner_returns_source() {
    let src = corpus(1_000);
    let packed = compress_block_to_vec(&src);
    let len = packed.len() as u64;
    let mut dec = Lz4DecoderStream::new(Cursor::new(packed), len);
    io::copy(&mut dec, &mut io::sink()).unwrap();
    let cursor = dec.into_inner();
    assert_eq!(cursor.position(), len);
}
