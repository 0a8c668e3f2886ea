// lz4block: LZ4 block codec with greedy and hash-chain encoders

pub mod error;
pub mod config;
pub mod block;
pub mod hc;
pub mod codec;
pub mod bench;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const LZ4BLOCK_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    LZ4BLOCK_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{decode, encode, maximum_output_length, CompressContext, Lz4DecoderStream};
pub use codec::BlockCodec;
pub use error::{Lz4Error, Result};
pub use hc::{encode_hc, HcContext};
