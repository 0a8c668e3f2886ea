// Integration tests for block/stream.rs: Lz4DecoderStream
//
//   - output matches the one-shot decoder for every read size
//   - matches reaching back across the 64 KiB history ring
//   - interrupted reads from the source are retried
//   - reset() reuses one decoder for several blocks

use std::io::{self, Cursor, Read};

use lz4block::block::compress::compress_block_to_vec;
use lz4block::block::decompress_api::decode_to_vec;
use lz4block::block::stream::{Lz4DecoderStream, RING_SIZE};

fn data(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut x = 1u32;
    while out.len() < len {
        x = x.wrapping_mul(48_271) % 0x7FFF_FFFF;
        let run = 4 + (x % 40) as usize;
        let byte = b"acgt"[(x >> 8) as usize % 4];
        out.extend(std::iter::repeat(byte).take(run));
        out.extend_from_slice(&x.to_be_bytes());
    }
    out.truncate(len);
    out
}

/// Fails every other read with `Interrupted`.
struct Flaky<R> {
    inner: R,
    fail_next: bool,
}

impl<R: Read> Read for Flaky<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fail_next = !self.fail_next;
        if self.fail_next {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.inner.read(buf)
    }
}

#[test]
fn agrees_with_one_shot_decoder() {
    let src = data(100_000);
    let packed = compress_block_to_vec(&src);
    let expected = decode_to_vec(&packed, src.len()).unwrap();

    for chunk in [1usize, 2, 7, 64, 127, 128, 1_000, 65_536, 200_000] {
        let mut dec = Lz4DecoderStream::new(Cursor::new(&packed), packed.len() as u64);
        let mut out = Vec::new();
        let mut buf = vec![0u8; chunk];
        loop {
            let n = dec.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, expected, "chunk {chunk}");
    }
}

#[test]
fn matches_across_the_ring_boundary() {
    // Repeat a block at just under the maximum distance, several times over,
    // so copies wrap the history ring.
    let unit = data(RING_SIZE - 100);
    let mut src = Vec::new();
    for _ in 0..4 {
        src.extend_from_slice(&unit);
    }
    let packed = compress_block_to_vec(&src);
    assert!(packed.len() < src.len() / 2);

    let mut dec = Lz4DecoderStream::unbounded(Cursor::new(packed));
    let mut out = Vec::new();
    let mut buf = vec![0u8; 3_333];
    loop {
        let n = dec.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out.len(), src.len());
    assert_eq!(out, src);
}

#[test]
fn interrupted_source_reads_are_retried() {
    let src = data(30_000);
    let packed = compress_block_to_vec(&src);
    let len = packed.len() as u64;
    let flaky = Flaky { inner: Cursor::new(packed), fail_next: false };
    let mut dec = Lz4DecoderStream::new(flaky, len);
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, src);
}

#[test]
fn reset_between_blocks() {
    let a = data(5_000);
    let b = data(70_000);
    let pa = compress_block_to_vec(&a);
    let pb = compress_block_to_vec(&b);

    let mut dec = Lz4DecoderStream::new(Cursor::new(pa.clone()), pa.len() as u64);
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, a);
    assert_eq!(dec.total_out(), a.len() as u64);

    dec.reset(Cursor::new(pb.clone()), pb.len() as u64);
    assert_eq!(dec.total_out(), 0);
    assert!(!dec.is_finished());
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, b);
    assert!(dec.is_finished());
}

#[test]
fn finished_stream_keeps_returning_zero() {
    let packed = compress_block_to_vec(b"short input");
    let mut dec = Lz4DecoderStream::unbounded(&packed[..]);
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, b"short input");
    let mut buf = [0u8; 8];
    assert_eq!(dec.read(&mut buf).unwrap(), 0);
    assert_eq!(dec.read(&mut buf).unwrap(), 0);
}
