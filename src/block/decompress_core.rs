//! LZ4 block decompression core engine.
//!
//!   - `read_variable_length`: bounded length-extension decoder
//!   - [`decode_generic`]    : the security-critical decode loop
//!
//! # Security boundary
//!
//! This module is the **security-critical decompression path**.  Every input
//! read and output write is checked against the slice bounds before it
//! happens.  Malformed or truncated input returns an [`Lz4Error`]; it must
//! **never** panic.

use super::types::{
    match_copy, read_le16, wild_copy, LASTLITERALS, MFLIMIT, MINMATCH, ML_BITS, ML_MASK, RUN_MASK,
};
use crate::error::{Lz4Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// read_variable_length
// ─────────────────────────────────────────────────────────────────────────────

/// Read length-extension bytes starting at `*ip`.
///
/// Accumulates bytes until one below 255 is read.  Running into `ilimit`
/// before that terminator, or overflowing `usize`, is corruption.
#[inline(always)]
fn read_variable_length(src: &[u8], ip: &mut usize, ilimit: usize) -> Result<usize> {
    let mut length: usize = 0;
    loop {
        if *ip >= ilimit {
            return Err(Lz4Error::CorruptInput);
        }
        let s = src[*ip];
        *ip += 1;
        length = length.checked_add(s as usize).ok_or(Lz4Error::CorruptInput)?;
        if s != 255 {
            return Ok(length);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decode_generic
// ─────────────────────────────────────────────────────────────────────────────

/// Core LZ4 block decompression loop.
///
/// | Parameter             | Meaning                                          |
/// |-----------------------|--------------------------------------------------|
/// | `src`                 | The complete compressed block                    |
/// | `dst`                 | Output window; `dst.len()` is the capacity       |
/// | `known_output_length` | `true`: output must be exactly `dst.len()` bytes |
///
/// Returns the number of bytes written to `dst`.
///
/// Known-length mode also requires the block to consume all of `src`.
/// Unknown-length mode stops when the input ends exactly after a final
/// literal run.  Bytes of `dst` past the returned length are unspecified.
pub fn decode_generic(src: &[u8], dst: &mut [u8], known_output_length: bool) -> Result<usize> {
    let iend = src.len();
    let oend = dst.len();

    // ── Special cases ─────────────────────────────────────────────────────────
    if iend == 0 {
        return if known_output_length && oend != 0 {
            Err(Lz4Error::CorruptInput)
        } else {
            Ok(0)
        };
    }

    let mut ip: usize = 0;
    let mut op: usize = 0;

    // Final-sequence thresholds: a literal run ending past either of these
    // cannot be followed by a match.
    let oend_mflimit = oend.saturating_sub(MFLIMIT);
    let iend_lit = iend.saturating_sub(2 + 1 + LASTLITERALS);

    'decode: loop {
        // Every iteration starts with a new token byte.  Running out here
        // means the previous sequence ended on a match.
        if ip >= iend {
            return Err(Lz4Error::CorruptInput);
        }
        let token = src[ip];
        ip += 1;

        // ── Literals ──────────────────────────────────────────────────────────
        let mut lit_length = (token >> ML_BITS) as usize;
        if lit_length == RUN_MASK {
            lit_length += read_variable_length(src, &mut ip, iend)?;
        }

        let cpy = op.checked_add(lit_length).ok_or(Lz4Error::CorruptInput)?;
        let in_lit_end = ip.checked_add(lit_length).ok_or(Lz4Error::CorruptInput)?;

        if cpy > oend_mflimit || in_lit_end > iend_lit {
            // This must be the last sequence.
            if in_lit_end > iend {
                return Err(Lz4Error::CorruptInput);
            }
            if cpy > oend {
                return Err(Lz4Error::CapacityExceeded);
            }
            if in_lit_end != iend {
                // More input follows, but either it cannot hold another
                // sequence or the output window cannot hold a match.
                return Err(if in_lit_end <= iend_lit && !known_output_length {
                    Lz4Error::CapacityExceeded
                } else {
                    Lz4Error::CorruptInput
                });
            }
            dst[op..cpy].copy_from_slice(&src[ip..in_lit_end]);
            op = cpy;
            break 'decode;
        }

        // cpy <= oend - MFLIMIT and in_lit_end <= iend - 8: the wild copy's
        // 8-byte overrun stays inside both buffers.
        wild_copy(src, ip, dst, op, cpy);
        ip = in_lit_end;
        op = cpy;

        // ── Offset ────────────────────────────────────────────────────────────
        let offset = read_le16(src, ip) as usize;
        ip += 2;
        if offset == 0 || offset > op {
            return Err(Lz4Error::CorruptInput);
        }

        // ── Match length ──────────────────────────────────────────────────────
        let mut ml = (token as usize) & ML_MASK;
        if ml == ML_MASK {
            ml += read_variable_length(src, &mut ip, iend)?;
        }
        let match_length = ml.checked_add(MINMATCH).ok_or(Lz4Error::CorruptInput)?;
        let match_end = op.checked_add(match_length).ok_or(Lz4Error::CorruptInput)?;

        // The last LASTLITERALS bytes of a block are always literals.
        if match_end > oend.saturating_sub(LASTLITERALS) {
            return Err(if match_end > oend {
                Lz4Error::CapacityExceeded
            } else {
                Lz4Error::CorruptInput
            });
        }

        match_copy(dst, op, offset, match_end);
        op = match_end;
    }

    if known_output_length && op != oend {
        return Err(Lz4Error::CorruptInput);
    }
    Ok(op)
}
