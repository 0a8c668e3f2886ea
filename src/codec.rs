//! Per-block codec selection.
//!
//! Container formats that carry LZ4 blocks tag each block with a small codec
//! id in the low six bits of a flags word, next to its compressed and
//! uncompressed sizes.  [`BlockCodec`] is that vocabulary for the codecs this
//! crate implements.  Id 1 (LZMA) is recognised but not supported.

use crate::block::compress::compress_block_to_vec;
use crate::block::decompress_api::decode_to_vec;
use crate::error::{Lz4Error, Result};
use crate::hc::compress_hc_to_vec;

/// Mask selecting the codec id from a block flags word.
pub const CODEC_FLAGS_MASK: u16 = 0x3F;

const CODEC_ID_LZMA: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockCodec {
    /// Raw bytes.
    Stored,
    /// LZ4 block, greedy encoder.
    Lz4,
    /// LZ4 block, HC encoder.  Decodes exactly like [`BlockCodec::Lz4`].
    Lz4Hc,
}

impl BlockCodec {
    /// Codec id as stored in the low bits of a block flags word.
    pub fn id(self) -> u16 {
        match self {
            BlockCodec::Stored => 0,
            BlockCodec::Lz4 => 2,
            BlockCodec::Lz4Hc => 3,
        }
    }

    /// Codec named by a block flags word.  Unknown ids mean raw storage.
    pub fn from_flags(flags: u16) -> Result<Self> {
        match flags & CODEC_FLAGS_MASK {
            2 => Ok(BlockCodec::Lz4),
            3 => Ok(BlockCodec::Lz4Hc),
            CODEC_ID_LZMA => Err(Lz4Error::InvalidArgument("LZMA blocks are not supported".into())),
            _ => Ok(BlockCodec::Stored),
        }
    }

    /// Whether the payload is an LZ4 token stream.
    pub fn is_lz4(self) -> bool {
        matches!(self, BlockCodec::Lz4 | BlockCodec::Lz4Hc)
    }
}

/// Encode `src` with `codec`, falling back to raw storage when compression
/// does not make the block smaller.
///
/// Returns the codec actually used along with the payload.
pub fn encode_block(codec: BlockCodec, src: &[u8]) -> (BlockCodec, Vec<u8>) {
    let packed = match codec {
        BlockCodec::Stored => return (BlockCodec::Stored, src.to_vec()),
        BlockCodec::Lz4 => compress_block_to_vec(src),
        BlockCodec::Lz4Hc => compress_hc_to_vec(src),
    };
    if packed.is_empty() || packed.len() >= src.len() {
        (BlockCodec::Stored, src.to_vec())
    } else {
        (codec, packed)
    }
}

/// Decode one block payload to exactly `uncompressed_size` bytes.
///
/// # Errors
/// [`Lz4Error::CorruptInput`] when a stored block's length disagrees with
/// `uncompressed_size`, otherwise the errors of [`decode`](crate::block::decode)
/// in known-length mode.
pub fn decode_block(codec: BlockCodec, src: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
    match codec {
        BlockCodec::Stored if src.len() == uncompressed_size => Ok(src.to_vec()),
        BlockCodec::Stored => Err(Lz4Error::CorruptInput),
        BlockCodec::Lz4 | BlockCodec::Lz4Hc => decode_to_vec(src, uncompressed_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_mapping() {
        assert_eq!(BlockCodec::from_flags(0x0000).unwrap(), BlockCodec::Stored);
        assert_eq!(BlockCodec::from_flags(0x0002).unwrap(), BlockCodec::Lz4);
        assert_eq!(BlockCodec::from_flags(0x0043).unwrap(), BlockCodec::Lz4Hc);
        assert_eq!(BlockCodec::from_flags(0x0007).unwrap(), BlockCodec::Stored);
        assert!(matches!(BlockCodec::from_flags(0x0041), Err(Lz4Error::InvalidArgument(_))));
        for codec in [BlockCodec::Stored, BlockCodec::Lz4, BlockCodec::Lz4Hc] {
            assert_eq!(BlockCodec::from_flags(codec.id()).unwrap(), codec);
        }
    }

    #[test]
    fn compressible_block_keeps_codec() {
        let src = b"block block block block block block block block".repeat(20);
        for codec in [BlockCodec::Lz4, BlockCodec::Lz4Hc] {
            let (used, payload) = encode_block(codec, &src);
            assert_eq!(used, codec);
            assert!(payload.len() < src.len());
            assert_eq!(decode_block(used, &payload, src.len()).unwrap(), src);
        }
    }

    #[test]
    fn incompressible_block_falls_back_to_stored() {
        let src: Vec<u8> = (0u8..10).map(|b| b.wrapping_mul(97) ^ 0x5A).collect();
        let (used, payload) = encode_block(BlockCodec::Lz4, &src);
        assert_eq!(used, BlockCodec::Stored);
        assert_eq!(payload, src);
        assert_eq!(decode_block(used, &payload, src.len()).unwrap(), src);
    }

    #[test]
    fn stored_length_mismatch() {
        assert_eq!(decode_block(BlockCodec::Stored, b"abc", 4), Err(Lz4Error::CorruptInput));
    }
}
