//! LZ4 HC (high-compression) block encoder.
//!
//! Produces the same block format as [`crate::block`], spending more time on
//! match search: a hash chain instead of a single-slot table, and lazy
//! parsing over up to three overlapping candidates.

pub mod api;
pub mod compress_hc;
pub mod encode;
pub mod search;
pub mod types;

// Re-export key public API items at the module level.
pub use api::{compress_hc_to_vec, encode_hc, encode_hc_level, encode_hc_range, encode_hc_with_context};
pub use types::{HcContext, LZ4HC_DEFAULT_ATTEMPTS, LZ4HC_MAX_ATTEMPTS};
