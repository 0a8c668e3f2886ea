//! LZ4 block compression and decompression.
//!
//! This module contains the core LZ4 block-format engine: the shared copy and
//! match-length primitives, the greedy encoder, the one-shot decoder and the
//! resumable streaming decoder.

pub mod compress;
pub mod decompress_api;
pub mod decompress_core;
pub mod stream;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{
    compress_block_to_vec, encode, encode_fast, encode_range, encode_with_context,
    maximum_output_length, LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX,
};
pub use decompress_api::{decode, decode_range, decode_to_vec};
pub use stream::Lz4DecoderStream;
pub use types::{CompressContext, LZ4_DISTANCE_MAX, LZ4_MAX_INPUT_SIZE};
