//! LZ4 HC public API.
//!
//! | Function                    | Input / output                                |
//! |-----------------------------|-----------------------------------------------|
//! | [`encode_hc`]               | slices, default chain depth                   |
//! | [`encode_hc_level`]         | slices, explicit chain depth                  |
//! | [`encode_hc_with_context`]  | slices, caller-owned [`HcContext`]            |
//! | [`encode_hc_range`]         | offset/length windows into larger buffers     |
//! | [`compress_hc_to_vec`]      | allocating                                    |
//!
//! Every variant produces a standard LZ4 block that [`decode`](crate::block::decode)
//! reads.  A return value of 0 means the compressed form does not fit the
//! destination.

use super::compress_hc::compress_hash_chain;
use super::types::{HcContext, LZ4HC_DEFAULT_ATTEMPTS, LZ4HC_MAX_ATTEMPTS};
use crate::block::compress::maximum_output_length;
use crate::block::types::{LimitedOutputDirective, LZ4_MAX_INPUT_SIZE};
use crate::error::{check_range, Result};

/// HC-compress `src` into `dst` using a caller-owned context.
///
/// `max_attempts` is clamped to `1..=LZ4HC_MAX_ATTEMPTS`.  The context is
/// reset on entry.  An empty input encodes to the single byte `0x00`.
pub fn encode_hc_with_context(ctx: &mut HcContext, src: &[u8], dst: &mut [u8], max_attempts: usize) -> usize {
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

    ctx.reset();
    let limit = if dst.len() >= maximum_output_length(src.len()) {
        LimitedOutputDirective::NotLimited
    } else {
        LimitedOutputDirective::LimitedOutput
    };
    compress_hash_chain(ctx, src, dst, max_attempts.clamp(1, LZ4HC_MAX_ATTEMPTS), limit)
}

/// HC-compress with an explicit chain walk depth.
pub fn encode_hc_level(src: &[u8], dst: &mut [u8], max_attempts: usize) -> usize {
    let mut ctx = HcContext::new();
    encode_hc_with_context(&mut ctx, src, dst, max_attempts)
}

/// HC-compress `src` into `dst` with the default chain walk depth.
///
/// Same contract as [`encode`](crate::block::encode); the output is usually
/// smaller, at a higher CPU cost.
pub fn encode_hc(src: &[u8], dst: &mut [u8]) -> usize {
    encode_hc_level(src, dst, LZ4HC_DEFAULT_ATTEMPTS)
}

/// Offset/length form of [`encode_hc`].
///
/// # Errors
/// [`Lz4Error::InvalidArgument`](crate::Lz4Error::InvalidArgument) when either
/// window falls outside its buffer.  `Ok(0)` still means "does not fit".
pub fn encode_hc_range(
    src: &[u8],
    src_offset: usize,
    src_length: usize,
    dst: &mut [u8],
    dst_offset: usize,
    dst_capacity: usize,
) -> Result<usize> {
    let src_end = check_range("source", src.len(), src_offset, src_length)?;
    let dst_end = check_range("destination", dst.len(), dst_offset, dst_capacity)?;
    Ok(encode_hc(&src[src_offset..src_end], &mut dst[dst_offset..dst_end]))
}

/// HC-compress `src` into a freshly allocated, exactly sized buffer.
pub fn compress_hc_to_vec(src: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; maximum_output_length(src.len())];
    let n = encode_hc(src, &mut out);
    out.truncate(n);
    out
}
