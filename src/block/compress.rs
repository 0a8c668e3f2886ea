//! Greedy single-candidate LZ4 block encoder.
//!
//! | Function                    | Role                                              |
//! |-----------------------------|---------------------------------------------------|
//! | [`compress_generic`]        | Core loop over a fresh [`CompressContext`]        |
//! | [`encode_with_context`]     | Caller-owned context, explicit acceleration       |
//! | [`encode_fast`]             | Fresh context, explicit acceleration              |
//! | [`encode`]                  | Fresh context, default acceleration               |
//! | [`encode_range`]            | Offset/length form with argument validation      |
//! | [`maximum_output_length`]   | Worst-case compressed size                        |
//!
//! The encoder hashes the 4 bytes at each candidate position, keeps only the
//! most recent position per hash slot, and emits a literal run plus a match
//! for every verified candidate.  Positions without a match are skipped with
//! a stride that grows the longer the miss streak lasts.
//!
//! Running out of destination space is not an error: the encoders return 0
//! and the caller stores the block raw.

use super::types::{
    count, hash_position, read32, wild_copy, write_le16, CompressContext, LimitedOutputDirective,
    TableType, LASTLITERALS, LZ4_DISTANCE_MAX, LZ4_MAX_INPUT_SIZE, LZ4_MIN_LENGTH,
    LZ4_SKIP_TRIGGER, MFLIMIT, MINMATCH, ML_BITS, ML_MASK, RUN_MASK,
};
use crate::error::{check_range, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Default acceleration factor (1: try every position until misses pile up).
pub const LZ4_ACCELERATION_DEFAULT: i32 = 1;

/// Maximum allowed acceleration factor.
pub const LZ4_ACCELERATION_MAX: i32 = 65_537;

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for `input_len` bytes of input.
///
/// Returns 0 if `input_len` exceeds `LZ4_MAX_INPUT_SIZE`.
#[inline]
pub fn maximum_output_length(input_len: usize) -> usize {
    if input_len > LZ4_MAX_INPUT_SIZE {
        0
    } else {
        input_len + (input_len / 255) + 16
    }
}

#[inline(always)]
pub(crate) fn write_length_ext(dst: &mut [u8], op: &mut usize, mut len: usize) {
    while len >= 255 {
        dst[*op] = 255;
        *op += 1;
        len -= 255;
    }
    dst[*op] = len as u8;
    *op += 1;
}

// ─────────────────────────────────────────────────────────────────────────────
// Core compression loop
// ─────────────────────────────────────────────────────────────────────────────

/// Inner core of greedy block compression.
///
/// Preconditions: `ctx` holds a zeroed table for `table_type`,
/// `LZ4_MIN_LENGTH <= src.len() <= LZ4_MAX_INPUT_SIZE`, and with
/// `NotLimited` the destination is at least `maximum_output_length(src.len())`
/// bytes.
///
/// Returns the compressed size, or 0 when `LimitedOutput` runs out of room.
pub fn compress_generic(
    ctx: &mut CompressContext,
    src: &[u8],
    dst: &mut [u8],
    output_directive: LimitedOutputDirective,
    table_type: TableType,
    acceleration: i32,
) -> usize {
    let limited = output_directive == LimitedOutputDirective::LimitedOutput;
    let acceleration = acceleration.clamp(LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX) as u32;

    let iend = src.len();
    let olimit = dst.len();
    let mut ip: usize = 0;
    let mut anchor: usize = 0;
    let mut op: usize = 0;

    // ── Main compression body ────────────────────────────────────────────────
    // Breaking out of 'compress at any point skips to the trailing-literals
    // epilogue that follows, which encodes any remaining unmatched bytes.
    'compress: {
        // Input too small to compress, emit everything as literals.
        if iend < LZ4_MIN_LENGTH {
            break 'compress;
        }
        let mflimit_plus_one = iend - MFLIMIT + 1;
        let matchlimit = iend - LASTLITERALS;

        // ── First byte ───────────────────────────────────────────────────────
        let h = hash_position(src, ip, table_type);
        ctx.put_index(ip, h, table_type);
        ip += 1;
        let mut forward_h = hash_position(src, ip, table_type);

        // ── Main find-match / encode loop ────────────────────────────────────
        'main: loop {
            // ── Find a match ─────────────────────────────────────────────────
            let found = {
                let mut forward_ip = ip;
                let mut step: usize = 1;
                let mut search_match_nb: u32 = acceleration << LZ4_SKIP_TRIGGER;
                loop {
                    let h = forward_h;
                    let current = forward_ip;
                    let match_index = ctx.get_index(h, table_type);

                    ip = forward_ip;
                    forward_ip += step;
                    step = (search_match_nb >> LZ4_SKIP_TRIGGER) as usize;
                    search_match_nb += 1;

                    if forward_ip > mflimit_plus_one {
                        break 'compress; // not enough room for a match + trailing literals
                    }

                    forward_h = hash_position(src, forward_ip, table_type);
                    ctx.put_index(current, h, table_type);

                    debug_assert!(match_index < current);
                    // ByU16 inputs are shorter than the window, so only ByU32
                    // needs the distance check.
                    if table_type == TableType::ByU32 && match_index + LZ4_DISTANCE_MAX < current {
                        continue; // too far
                    }
                    if read32(src, match_index) == read32(src, ip) {
                        break match_index;
                    }
                }
            };
            let mut match_pos = found;

            // ── Catch up: extend match backwards past ip/anchor ──────────────
            while ip > anchor && match_pos > 0 && src[ip - 1] == src[match_pos - 1] {
                ip -= 1;
                match_pos -= 1;
            }

            // ── Encode literals ──────────────────────────────────────────────
            let mut token = op;
            {
                let lit_length = ip - anchor;
                op += 1; // reserve token byte

                if limited && op + lit_length + 2 + 1 + LASTLITERALS + lit_length / 255 > olimit {
                    return 0;
                }

                if lit_length >= RUN_MASK {
                    dst[token] = (RUN_MASK << ML_BITS) as u8;
                    write_length_ext(dst, &mut op, lit_length - RUN_MASK);
                } else {
                    dst[token] = (lit_length << ML_BITS) as u8;
                }

                // Copy literals (may overwrite up to 7 bytes past op + lit_length)
                op += wild_copy(src, anchor, dst, op, op + lit_length);
            }

            // ── Encode match, then opportunistically test the next position ──
            // If the bytes right after the current match also match, stay in
            // this inner loop, writing a zero-literal token and re-encoding
            // without going back to the find-match scan.
            'next_match: loop {
                // ── Encode match offset ───────────────────────────────────────
                write_le16(dst, op, (ip - match_pos) as u16);
                op += 2;

                // ── Encode match length ───────────────────────────────────────
                let mut match_code = count(src, ip + MINMATCH, match_pos + MINMATCH, matchlimit);
                ip += match_code + MINMATCH;

                if limited && op + 1 + LASTLITERALS + (match_code + 240) / 255 > olimit {
                    return 0;
                }

                if match_code >= ML_MASK {
                    dst[token] += ML_MASK as u8;
                    match_code -= ML_MASK;
                    while match_code >= 4 * 255 {
                        dst[op..op + 4].fill(255);
                        op += 4;
                        match_code -= 4 * 255;
                    }
                    write_length_ext(dst, &mut op, match_code);
                } else {
                    dst[token] += match_code as u8;
                }

                anchor = ip;

                // ── Test end of input chunk ───────────────────────────────────
                if ip >= mflimit_plus_one {
                    break 'compress; // too close to end for another match
                }

                // ── Fill hash table (ip-2) ────────────────────────────────────
                let h = hash_position(src, ip - 2, table_type);
                ctx.put_index(ip - 2, h, table_type);

                // ── Test next position: try immediate re-match ────────────────
                let h = hash_position(src, ip, table_type);
                let current = ip;
                let m_index = ctx.get_index(h, table_type);
                ctx.put_index(current, h, table_type);

                let dist_ok =
                    table_type == TableType::ByU16 || m_index + LZ4_DISTANCE_MAX >= current;
                if dist_ok && m_index < current && read32(src, m_index) == read32(src, ip) {
                    // Immediate match: emit a 0-literal sequence
                    token = op;
                    dst[op] = 0;
                    op += 1;
                    match_pos = m_index;
                    continue 'next_match;
                }

                // No immediate match: restart find-match from the next position.
                ip += 1;
                forward_h = hash_position(src, ip, table_type);
                continue 'main;
            }
        }
    }

    // ── Trailing-literals epilogue ───────────────────────────────────────────
    // Every block ends with a literal-only sequence, possibly empty.
    let last_run = iend - anchor;
    if limited && op + last_run + 1 + (last_run + 255 - RUN_MASK) / 255 > olimit {
        return 0;
    }
    if last_run >= RUN_MASK {
        dst[op] = (RUN_MASK << ML_BITS) as u8;
        op += 1;
        write_length_ext(dst, &mut op, last_run - RUN_MASK);
    } else {
        dst[op] = (last_run << ML_BITS) as u8;
        op += 1;
    }
    dst[op..op + last_run].copy_from_slice(&src[anchor..]);
    op + last_run
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot public API
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst` using a caller-owned context.
///
/// The context is reset on entry.  Returns the compressed size, or 0 when the
/// result does not fit `dst` (or `src` exceeds `LZ4_MAX_INPUT_SIZE`).  An
/// empty input encodes to the single byte `0x00`.
pub fn encode_with_context(
    ctx: &mut CompressContext,
    src: &[u8],
    dst: &mut [u8],
    acceleration: i32,
) -> usize {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        return 0;
    }
    if src.is_empty() {
        if dst.is_empty() {
            return 0;
        }
        dst[0] = 0;
        return 1;
    }

    let table_type = TableType::for_input_len(src.len());
    ctx.reset(table_type);
    let directive = if dst.len() >= maximum_output_length(src.len()) {
        LimitedOutputDirective::NotLimited
    } else {
        LimitedOutputDirective::LimitedOutput
    };
    compress_generic(ctx, src, dst, directive, table_type, acceleration)
}

/// Compress `src` into `dst` with the given acceleration (clamped to
/// `1..=LZ4_ACCELERATION_MAX`).
pub fn encode_fast(src: &[u8], dst: &mut [u8], acceleration: i32) -> usize {
    let mut ctx = CompressContext::new();
    encode_with_context(&mut ctx, src, dst, acceleration)
}

/// Compress `src` into `dst` with default settings.
///
/// Returns the compressed size, or 0 when it does not fit: retry with raw
/// storage.
pub fn encode(src: &[u8], dst: &mut [u8]) -> usize {
    encode_fast(src, dst, LZ4_ACCELERATION_DEFAULT)
}

/// Offset/length form of [`encode`]: compresses `src[src_offset..src_offset + src_length]`
/// into `dst[dst_offset..dst_offset + dst_capacity]`.
///
/// # Errors
/// [`Lz4Error::InvalidArgument`](crate::Lz4Error::InvalidArgument) when either
/// window falls outside its buffer.  `Ok(0)` still means "does not fit".
pub fn encode_range(
    src: &[u8],
    src_offset: usize,
    src_length: usize,
    dst: &mut [u8],
    dst_offset: usize,
    dst_capacity: usize,
) -> Result<usize> {
    let src_end = check_range("source", src.len(), src_offset, src_length)?;
    let dst_end = check_range("destination", dst.len(), dst_offset, dst_capacity)?;
    Ok(encode(&src[src_offset..src_end], &mut dst[dst_offset..dst_end]))
}

/// Compress `src` into a freshly allocated, exactly sized buffer.
pub fn compress_block_to_vec(src: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; maximum_output_length(src.len())];
    let n = encode(src, &mut out);
    out.truncate(n);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::decompress_api::decode_to_vec;

    #[test]
    fn bound_formula() {
        assert_eq!(maximum_output_length(0), 16);
        assert_eq!(maximum_output_length(255), 255 + 1 + 16);
        assert_eq!(maximum_output_length(LZ4_MAX_INPUT_SIZE + 1), 0);
    }

    #[test]
    fn empty_input_is_single_token() {
        let mut dst = [0xFFu8; 4];
        assert_eq!(encode(&[], &mut dst), 1);
        assert_eq!(dst[0], 0);
        assert_eq!(encode(&[], &mut []), 0);
    }

    #[test]
    fn short_input_is_pure_literals() {
        let src = b"0123456789AB"; // 12 bytes: below LZ4_MIN_LENGTH
        let out = compress_block_to_vec(src);
        assert_eq!(out.len(), src.len() + 1);
        assert_eq!(out[0], 0xC0);
        assert_eq!(&out[1..], src);
    }

    #[test]
    fn zeros_compress_to_one_long_match() {
        let src = vec![0u8; 1024];
        let out = compress_block_to_vec(&src);
        assert!(out.len() < 16, "got {} bytes", out.len());
        assert_eq!(decode_to_vec(&out, 1024).unwrap(), src);
    }

    #[test]
    fn limited_output_reports_no_fit() {
        let mut x: u32 = 0x1234_5678;
        let src: Vec<u8> = (0..4096)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                (x >> 24) as u8
            })
            .collect();
        let mut dst = vec![0u8; 100];
        assert_eq!(encode(&src, &mut dst), 0);
    }

    #[test]
    fn limited_output_exact_fit_succeeds() {
        let src: Vec<u8> = b"abcabcabcabcabcabcabcabcabcabc-tail-bytes".to_vec();
        let full = compress_block_to_vec(&src);
        let mut dst = vec![0u8; full.len()];
        assert_eq!(encode(&src, &mut dst), full.len());
        assert_eq!(dst, full);
        let mut short = vec![0u8; full.len() - 1];
        assert_eq!(encode(&src, &mut short), 0);
    }

    #[test]
    fn context_reuse_is_deterministic() {
        let mut ctx = CompressContext::new();
        let a: Vec<u8> = (0..70_000u32).map(|i| (i % 251) as u8).collect();
        let b = b"the quick brown fox jumps over the lazy dog, the quick brown fox".to_vec();
        let mut out1 = vec![0u8; maximum_output_length(a.len())];
        let mut out2 = vec![0u8; maximum_output_length(b.len())];
        let n_a = encode_with_context(&mut ctx, &a, &mut out1, 1);
        let n_b = encode_with_context(&mut ctx, &b, &mut out2, 1);
        assert_eq!(&out1[..n_a], compress_block_to_vec(&a).as_slice());
        assert_eq!(&out2[..n_b], compress_block_to_vec(&b).as_slice());
    }

    #[test]
    fn acceleration_is_clamped() {
        let src: Vec<u8> = b"hello hello hello hello hello hello".repeat(10);
        let mut dst = vec![0u8; maximum_output_length(src.len())];
        let n = encode_fast(&src, &mut dst, -5);
        assert_eq!(&dst[..n], compress_block_to_vec(&src).as_slice());
        let n = encode_fast(&src, &mut dst, i32::MAX);
        assert_eq!(decode_to_vec(&dst[..n], src.len()).unwrap(), src);
    }
}
