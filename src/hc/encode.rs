//! HC sequence encoder.
//!
//! [`encode_sequence`] serialises one complete LZ4 sequence (literal run,
//! token byte, extended lengths, 16-bit offset) into the output buffer.
//! Called once per committed match during HC compression.

use crate::block::compress::write_length_ext;
use crate::block::types::{
    bulk_copy, write_le16, LimitedOutputDirective, LASTLITERALS, LZ4_DISTANCE_MAX, MINMATCH,
    ML_BITS, ML_MASK, RUN_MASK,
};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors produced by the HC sequence encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz4HcError {
    /// The output buffer does not have enough room for the encoded sequence.
    OutputTooSmall,
}

// ─────────────────────────────────────────────────────────────────────────────
// encode_sequence
// ─────────────────────────────────────────────────────────────────────────────

/// Encode the literals `src[*anchor..*ip]` followed by a match of
/// `match_length` bytes at distance `offset`.
///
/// | Parameter      | Description                              |
/// |----------------|------------------------------------------|
/// | `ip`           | Current read position in the input       |
/// | `op`           | Current write position in the output     |
/// | `anchor`       | Start of the pending literal run         |
/// | `match_length` | Length of the match (≥ `MINMATCH`)       |
/// | `offset`       | Back-reference distance (1..=65535)      |
/// | `limit`        | Whether to enforce output-buffer bounds  |
///
/// On success `*ip` moves past the match and `*anchor` follows it.
///
/// # Errors
///
/// `Lz4HcError::OutputTooSmall` when `limit` is `LimitedOutput` and the
/// sequence, plus room for a final literal run, would not fit `dst`.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn encode_sequence(
    src: &[u8],
    dst: &mut [u8],
    ip: &mut usize,
    op: &mut usize,
    anchor: &mut usize,
    match_length: usize,
    offset: usize,
    limit: LimitedOutputDirective,
) -> Result<(), Lz4HcError> {
    let oend = dst.len();
    let literal_length = *ip - *anchor;

    // Token byte is filled in below.
    let token = *op;
    *op += 1;

    // ── Literal run ──────────────────────────────────────────────────────────
    if limit == LimitedOutputDirective::LimitedOutput
        && *op + literal_length / 255 + literal_length + (2 + 1 + LASTLITERALS) > oend
    {
        return Err(Lz4HcError::OutputTooSmall);
    }

    let mut token_value = if literal_length >= RUN_MASK {
        write_length_ext(dst, op, literal_length - RUN_MASK);
        (RUN_MASK << ML_BITS) as u8
    } else {
        (literal_length << ML_BITS) as u8
    };

    bulk_copy(src, *anchor, dst, *op, literal_length);
    *op += literal_length;

    // ── Offset ───────────────────────────────────────────────────────────────
    debug_assert!(offset > 0 && offset <= LZ4_DISTANCE_MAX);
    write_le16(dst, *op, offset as u16);
    *op += 2;

    // ── Match length ─────────────────────────────────────────────────────────
    debug_assert!(match_length >= MINMATCH);
    let ml_remaining = match_length - MINMATCH;

    if limit == LimitedOutputDirective::LimitedOutput && *op + ml_remaining / 255 + (1 + LASTLITERALS) > oend {
        return Err(Lz4HcError::OutputTooSmall);
    }

    if ml_remaining >= ML_MASK {
        token_value += ML_MASK as u8;
        write_length_ext(dst, op, ml_remaining - ML_MASK);
    } else {
        token_value += ml_remaining as u8;
    }
    dst[token] = token_value;

    *ip += match_length;
    *anchor = *ip;

    Ok(())
}
