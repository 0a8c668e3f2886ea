//! Incremental LZ4 block decoder.
//!
//! [`Lz4DecoderStream`] wraps any [`Read`] source holding one LZ4 token stream
//! and implements [`Read`] itself: each call fills as much of the caller's
//! buffer as it can and resumes exactly where the previous call stopped, even
//! in the middle of a literal run or a match.
//!
//! Decoded history is kept in a 64 KiB ring buffer so back-references can
//! span read calls.  Input is pulled through a 128-byte read-ahead window and
//! never past the declared input length, so the source can be a sub-range of
//! a larger container stream.
//!
//! End of stream is the source running dry at a token boundary, or right
//! after a final literal run.  Running dry anywhere else is a truncated
//! stream: bytes already decoded are handed out, then every later call fails
//! with [`io::ErrorKind::UnexpectedEof`].  A back-reference of distance zero,
//! or reaching before the first decoded byte, fails with
//! [`io::ErrorKind::InvalidData`].  Both failures are sticky until
//! [`reset`](Lz4DecoderStream::reset).

use std::io::{self, Read};

use super::types::{MINMATCH, ML_BITS, ML_MASK, RUN_MASK};
use crate::error::Lz4Error;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// History ring size: one full LZ4 window.
pub const RING_SIZE: usize = 1 << 16;
const RING_MASK: usize = RING_SIZE - 1;

/// Input read-ahead window.
pub const IN_BUF_LEN: usize = 128;

// ─────────────────────────────────────────────────────────────────────────────
// Decoder state
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecodePhase {
    ReadToken,
    ReadExLiteralLength,
    CopyLiteral,
    ReadOffset,
    ReadExMatchLength,
    CopyMatch,
    Finished,
    Failed(io::ErrorKind),
}

/// Resumable decoder for a single LZ4 token stream.
pub struct Lz4DecoderStream<R> {
    input: R,
    /// Input bytes the decoder may still pull from `input`.
    remaining_input: u64,

    ring: Box<[u8]>,
    ring_pos: usize,

    in_buf: [u8; IN_BUF_LEN],
    in_pos: usize,
    in_end: usize,

    phase: DecodePhase,
    lit_len: usize,
    match_len: usize,
    match_dist: usize,
    offset_lo: Option<u8>,
    total_out: u64,

    /// I/O error hit after some bytes were already produced in the same call.
    pending_error: Option<io::Error>,
}

impl<R: Read> Lz4DecoderStream<R> {
    /// Decode from `input`, consuming at most `input_length` bytes of it.
    pub fn new(input: R, input_length: u64) -> Self {
        Self {
            input,
            remaining_input: input_length,
            ring: vec![0u8; RING_SIZE].into_boxed_slice(),
            ring_pos: 0,
            in_buf: [0u8; IN_BUF_LEN],
            in_pos: 0,
            in_end: 0,
            phase: DecodePhase::ReadToken,
            lit_len: 0,
            match_len: 0,
            match_dist: 0,
            offset_lo: None,
            total_out: 0,
            pending_error: None,
        }
    }

    /// Decode from `input` until it reports end of file.
    pub fn unbounded(input: R) -> Self {
        Self::new(input, u64::MAX)
    }

    /// Start over on a new stream, keeping the ring buffer allocation.
    pub fn reset(&mut self, input: R, input_length: u64) {
        self.input = input;
        self.remaining_input = input_length;
        self.ring_pos = 0;
        self.in_pos = 0;
        self.in_end = 0;
        self.phase = DecodePhase::ReadToken;
        self.lit_len = 0;
        self.match_len = 0;
        self.match_dist = 0;
        self.offset_lo = None;
        self.total_out = 0;
        self.pending_error = None;
    }

    /// Total bytes decoded since construction or the last reset.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// `true` once the stream ended cleanly.
    pub fn is_finished(&self) -> bool {
        self.phase == DecodePhase::Finished
    }

    pub fn get_ref(&self) -> &R {
        &self.input
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.input
    }

    pub fn into_inner(self) -> R {
        self.input
    }

    // ── Input side ───────────────────────────────────────────────────────────

    /// Refill the empty read-ahead window.  `Ok(false)` at end of input.
    fn fill_in_buf(&mut self) -> io::Result<bool> {
        debug_assert_eq!(self.in_pos, self.in_end);
        let want = (IN_BUF_LEN as u64).min(self.remaining_input) as usize;
        if want == 0 {
            return Ok(false);
        }
        let n = read_retrying(&mut self.input, &mut self.in_buf[..want])?;
        self.remaining_input -= n as u64;
        self.in_pos = 0;
        self.in_end = n;
        Ok(n > 0)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if self.in_pos == self.in_end && !self.fill_in_buf()? {
            return Ok(None);
        }
        let b = self.in_buf[self.in_pos];
        self.in_pos += 1;
        Ok(Some(b))
    }

    /// Copy up to `out.len()` literal bytes.  Large requests bypass the
    /// read-ahead window once it is drained.  `Ok(0)` at end of input.
    fn read_literals(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.in_pos == self.in_end {
            if out.len() >= IN_BUF_LEN {
                let want = (out.len() as u64).min(self.remaining_input) as usize;
                if want == 0 {
                    return Ok(0);
                }
                let n = read_retrying(&mut self.input, &mut out[..want])?;
                self.remaining_input -= n as u64;
                return Ok(n);
            }
            if !self.fill_in_buf()? {
                return Ok(0);
            }
        }
        let n = out.len().min(self.in_end - self.in_pos);
        out[..n].copy_from_slice(&self.in_buf[self.in_pos..self.in_pos + n]);
        self.in_pos += n;
        Ok(n)
    }

    // ── History side ─────────────────────────────────────────────────────────

    fn push_history(&mut self, mut data: &[u8]) {
        if data.len() > RING_SIZE {
            let skip = data.len() - RING_SIZE;
            self.ring_pos = (self.ring_pos + skip) & RING_MASK;
            data = &data[skip..];
        }
        while !data.is_empty() {
            let n = data.len().min(RING_SIZE - self.ring_pos);
            self.ring[self.ring_pos..self.ring_pos + n].copy_from_slice(&data[..n]);
            self.ring_pos = (self.ring_pos + n) & RING_MASK;
            data = &data[n..];
        }
    }

    /// Expand as much of the pending match as fits `out`.
    ///
    /// Each pass copies a span bounded by the match distance and by both
    /// ring wrap points, first inside the ring, then out to the caller.
    fn copy_match(&mut self, out: &mut [u8]) -> usize {
        let n = self.match_len.min(out.len());
        let mut done = 0;
        while done < n {
            let src = (self.ring_pos + RING_SIZE - self.match_dist) & RING_MASK;
            let chunk = (n - done)
                .min(self.match_dist)
                .min(RING_SIZE - src)
                .min(RING_SIZE - self.ring_pos);
            self.ring.copy_within(src..src + chunk, self.ring_pos);
            out[done..done + chunk].copy_from_slice(&self.ring[self.ring_pos..self.ring_pos + chunk]);
            self.ring_pos = (self.ring_pos + chunk) & RING_MASK;
            done += chunk;
        }
        self.match_len -= n;
        self.total_out += n as u64;
        n
    }

    // ── State machine ────────────────────────────────────────────────────────

    /// Record a sticky failure; `read` reports it once the bytes already
    /// produced in this call have been handed out.
    fn mark_failed(&mut self, kind: io::ErrorKind) {
        self.phase = DecodePhase::Failed(kind);
    }

    /// Run the phase machine until `out` is full, the stream ends, or it fails.
    fn decode_into(&mut self, out: &mut [u8], produced: &mut usize) -> io::Result<()> {
        loop {
            match self.phase {
                DecodePhase::ReadToken => {
                    if *produced == out.len() {
                        return Ok(());
                    }
                    let Some(token) = self.read_byte()? else {
                        self.phase = DecodePhase::Finished;
                        return Ok(());
                    };
                    self.lit_len = (token >> ML_BITS) as usize;
                    self.match_len = (token as usize & ML_MASK) + MINMATCH;
                    self.phase = if self.lit_len == RUN_MASK {
                        DecodePhase::ReadExLiteralLength
                    } else if self.lit_len != 0 {
                        DecodePhase::CopyLiteral
                    } else {
                        DecodePhase::ReadOffset
                    };
                }

                DecodePhase::ReadExLiteralLength => {
                    loop {
                        let Some(b) = self.read_byte()? else {
                            self.mark_failed(io::ErrorKind::UnexpectedEof);
                            return Ok(());
                        };
                        match self.lit_len.checked_add(b as usize) {
                            Some(len) => self.lit_len = len,
                            None => {
                                self.mark_failed(io::ErrorKind::InvalidData);
                                return Ok(());
                            }
                        }
                        if b != 255 {
                            break;
                        }
                    }
                    self.phase = DecodePhase::CopyLiteral;
                }

                DecodePhase::CopyLiteral => {
                    while self.lit_len > 0 {
                        if *produced == out.len() {
                            return Ok(());
                        }
                        let want = self.lit_len.min(out.len() - *produced);
                        let dst = &mut out[*produced..*produced + want];
                        let n = self.read_literals(dst)?;
                        if n == 0 {
                            self.mark_failed(io::ErrorKind::UnexpectedEof);
                            return Ok(());
                        }
                        self.push_history(&dst[..n]);
                        *produced += n;
                        self.lit_len -= n;
                        self.total_out += n as u64;
                    }
                    self.phase = DecodePhase::ReadOffset;
                }

                DecodePhase::ReadOffset => {
                    let lo = match self.offset_lo {
                        Some(lo) => lo,
                        None => {
                            // No offset after a literal run: that run was the last one.
                            let Some(lo) = self.read_byte()? else {
                                self.phase = DecodePhase::Finished;
                                return Ok(());
                            };
                            self.offset_lo = Some(lo);
                            lo
                        }
                    };
                    let Some(hi) = self.read_byte()? else {
                        self.mark_failed(io::ErrorKind::UnexpectedEof);
                        return Ok(());
                    };
                    self.offset_lo = None;
                    let dist = u16::from_le_bytes([lo, hi]) as usize;
                    if dist == 0 || dist as u64 > self.total_out {
                        self.mark_failed(io::ErrorKind::InvalidData);
                        return Ok(());
                    }
                    self.match_dist = dist;
                    self.phase = if self.match_len == ML_MASK + MINMATCH {
                        DecodePhase::ReadExMatchLength
                    } else {
                        DecodePhase::CopyMatch
                    };
                }

                DecodePhase::ReadExMatchLength => {
                    loop {
                        let Some(b) = self.read_byte()? else {
                            self.mark_failed(io::ErrorKind::UnexpectedEof);
                            return Ok(());
                        };
                        match self.match_len.checked_add(b as usize) {
                            Some(len) => self.match_len = len,
                            None => {
                                self.mark_failed(io::ErrorKind::InvalidData);
                                return Ok(());
                            }
                        }
                        if b != 255 {
                            break;
                        }
                    }
                    self.phase = DecodePhase::CopyMatch;
                }

                DecodePhase::CopyMatch => {
                    if self.match_len > 0 {
                        if *produced == out.len() {
                            return Ok(());
                        }
                        *produced += self.copy_match(&mut out[*produced..]);
                        continue;
                    }
                    self.phase = DecodePhase::ReadToken;
                }

                DecodePhase::Finished | DecodePhase::Failed(_) => return Ok(()),
            }
        }
    }
}

fn failure(kind: io::ErrorKind) -> io::Error {
    match kind {
        io::ErrorKind::UnexpectedEof => io::Error::new(kind, "truncated LZ4 block stream"),
        _ => io::Error::new(kind, Lz4Error::CorruptInput),
    }
}

fn read_retrying<R: Read>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match input.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            res => return res,
        }
    }
}

impl<R: Read> Read for Lz4DecoderStream<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }
        if let DecodePhase::Failed(kind) = self.phase {
            return Err(failure(kind));
        }
        if out.is_empty() {
            return Ok(0);
        }

        let mut produced = 0;
        match self.decode_into(out, &mut produced) {
            Ok(()) => {}
            Err(e) if produced > 0 => {
                self.pending_error = Some(e);
                return Ok(produced);
            }
            Err(e) => return Err(e),
        }

        if let DecodePhase::Failed(kind) = self.phase {
            if produced == 0 {
                return Err(failure(kind));
            }
        }
        Ok(produced)
    }
}
