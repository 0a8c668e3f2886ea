//! Error taxonomy shared by every codec entry point.
//!
//! Encoders never return [`Lz4Error::CapacityExceeded`]: running out of
//! destination space is reported as a zero-length result so the caller can
//! store the block raw instead.  Decoders surface every failure as an error.

use std::io;

use thiserror::Error;

/// Errors produced by the block codec and the streaming decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Lz4Error {
    /// Malformed token stream: a back-reference before the start of output,
    /// input exhausted mid-sequence, or a length mismatch in known-length mode.
    #[error("corrupt LZ4 input")]
    CorruptInput,

    /// The decoded data does not fit the destination buffer.
    #[error("decoded data exceeds output capacity")]
    CapacityExceeded,

    /// Offset or length parameters outside the buffers they index.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Lz4Error>;

impl From<Lz4Error> for io::Error {
    fn from(err: Lz4Error) -> Self {
        let kind = match err {
            Lz4Error::InvalidArgument(_) => io::ErrorKind::InvalidInput,
            Lz4Error::CorruptInput | Lz4Error::CapacityExceeded => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

/// Validate an `(offset, length)` window into a buffer of `buf_len` bytes.
///
/// Returns the exclusive end of the window.
pub(crate) fn check_range(what: &str, buf_len: usize, offset: usize, length: usize) -> Result<usize> {
    let end = offset.checked_add(length).ok_or_else(|| {
        Lz4Error::InvalidArgument(format!("{what}: offset {offset} + length {length} overflows"))
    })?;
    if end > buf_len {
        return Err(Lz4Error::InvalidArgument(format!(
            "{what}: range {offset}..{end} exceeds buffer of {buf_len} bytes"
        )));
    }
    Ok(end)
}
