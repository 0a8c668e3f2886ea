//! Compression strategy selection for the benchmark subsystem.
//!
//! | Type           | Encoder | Context owned         |
//! |----------------|---------|-----------------------|
//! | [`GreedyBlock`]| greedy  | [`CompressContext`]   |
//! | [`HcBlock`]    | HC      | [`HcContext`]         |
//!
//! Each benchmark worker task builds its own strategy, so contexts are never
//! shared between threads.

use crate::block::compress::{encode_with_context, maximum_output_length};
use crate::block::types::CompressContext;
use crate::hc::api::encode_hc_with_context;
use crate::hc::types::HcContext;

use super::config::BenchConfig;

// ── CompressionStrategy trait ─────────────────────────────────────────────────

/// A block encoder together with the tables it reuses between blocks.
pub trait CompressionStrategy: Send {
    /// Compress `src` into `dst`, growing `dst` to the worst-case bound first.
    /// Returns the number of compressed bytes.
    fn compress_block(&mut self, src: &[u8], dst: &mut Vec<u8>) -> usize;
}

/// Ensure `dst` can hold the worst-case output for `src_len` bytes.
#[inline]
fn ensure_dst_capacity(src_len: usize, dst: &mut Vec<u8>) {
    let bound = maximum_output_length(src_len);
    if dst.len() < bound {
        dst.resize(bound, 0u8);
    }
}

// ── Greedy ────────────────────────────────────────────────────────────────────

pub struct GreedyBlock {
    ctx: CompressContext,
    acceleration: i32,
}

impl GreedyBlock {
    pub fn new(acceleration: i32) -> Self {
        GreedyBlock { ctx: CompressContext::new(), acceleration }
    }
}

impl CompressionStrategy for GreedyBlock {
    fn compress_block(&mut self, src: &[u8], dst: &mut Vec<u8>) -> usize {
        ensure_dst_capacity(src.len(), dst);
        encode_with_context(&mut self.ctx, src, dst, self.acceleration)
    }
}

// ── HC ────────────────────────────────────────────────────────────────────────

pub struct HcBlock {
    ctx: HcContext,
    attempts: usize,
}

impl HcBlock {
    pub fn new(attempts: usize) -> Self {
        HcBlock { ctx: HcContext::new(), attempts }
    }
}

impl CompressionStrategy for HcBlock {
    fn compress_block(&mut self, src: &[u8], dst: &mut Vec<u8>) -> usize {
        ensure_dst_capacity(src.len(), dst);
        encode_hc_with_context(&mut self.ctx, src, dst, self.attempts)
    }
}

/// Strategy selected by `config`.
pub fn build_strategy(config: &BenchConfig) -> Box<dyn CompressionStrategy> {
    if config.hc {
        Box::new(HcBlock::new(config.hc_attempts))
    } else {
        Box::new(GreedyBlock::new(config.acceleration))
    }
}
