//! Public block-decoding API.
//!
//! Thin wrappers around [`decode_generic`]: slice form, offset/length form
//! (the shape a container format hands over), and an allocating form.

use super::decompress_core::decode_generic;
use crate::error::{check_range, Result};

// ─────────────────────────────────────────────────────────────────────────────
// One-shot API
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the complete compressed block `src` into `dst`.
///
/// With `known_output_length`, the block must decode to exactly `dst.len()`
/// bytes and consume all of `src`.  Otherwise `dst.len()` is only a capacity
/// and the number of bytes produced is returned.
///
/// # Errors
/// [`Lz4Error::CorruptInput`](crate::Lz4Error::CorruptInput) on malformed
/// data or a length mismatch, [`Lz4Error::CapacityExceeded`](crate::Lz4Error::CapacityExceeded)
/// when the output does not fit.
#[inline]
pub fn decode(src: &[u8], dst: &mut [u8], known_output_length: bool) -> Result<usize> {
    decode_generic(src, dst, known_output_length)
}

/// Offset/length form of [`decode`]: reads `src[src_offset..src_offset + src_length]`
/// and writes into `dst[dst_offset..dst_offset + dst_capacity]`.
///
/// # Errors
/// [`Lz4Error::InvalidArgument`](crate::Lz4Error::InvalidArgument) when either
/// window falls outside its buffer, then the same errors as [`decode`].
pub fn decode_range(
    src: &[u8],
    src_offset: usize,
    src_length: usize,
    dst: &mut [u8],
    dst_offset: usize,
    dst_capacity: usize,
    known_output_length: bool,
) -> Result<usize> {
    let src_end = check_range("source", src.len(), src_offset, src_length)?;
    let dst_end = check_range("destination", dst.len(), dst_offset, dst_capacity)?;
    decode_generic(
        &src[src_offset..src_end],
        &mut dst[dst_offset..dst_end],
        known_output_length,
    )
}

/// Decode `src` into a freshly allocated buffer of exactly `output_len` bytes.
pub fn decode_to_vec(src: &[u8], output_len: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; output_len];
    decode_generic(src, &mut out, true)?;
    Ok(out)
}
