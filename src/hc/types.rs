//! HC compression constants, the hash-chain context, and match helpers.
//!
//!   - [`HcContext`] : caller-owned hash table + chain table
//!   - [`Match`]     : one candidate match (length, distance, backward extension)
//!   - [`hash_ptr`]  : 15-bit multiplicative hash of 4 input bytes
//!   - [`count_back`]: extend a match backwards

use crate::block::types as bt;

// ─────────────────────────────────────────────────────────────────────────────
// Table sizing
// ─────────────────────────────────────────────────────────────────────────────

pub const LZ4HC_DICTIONARY_LOGSIZE: u32 = 16;
/// Chain table length: one entry per slot in the 64 KB window.
pub const LZ4HC_MAXD: usize = 1 << LZ4HC_DICTIONARY_LOGSIZE; // 65536
pub const LZ4HC_MAXD_MASK: usize = LZ4HC_MAXD - 1;

pub const LZ4HC_HASH_LOG: u32 = 15;
/// Hash table entries (15-bit log → 32768 u32 slots).
pub const LZ4HC_HASHTABLESIZE: usize = 1 << LZ4HC_HASH_LOG; // 32768

/// Chain entry meaning "no predecessor within the window".
pub const CHAIN_SENTINEL: u16 = 0xFFFF;

/// Index of input position 0.  Keeps every real index above the zeroed hash
/// table entries and one full window above zero.
pub const HC_INDEX_BASE: u32 = 64 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Search parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Default number of chain candidates examined per search.
pub const LZ4HC_DEFAULT_ATTEMPTS: usize = 256;
/// Largest accepted chain walk depth.
pub const LZ4HC_MAX_ATTEMPTS: usize = 1 << 16;

/// Longest match kept whole when negotiating an overlap with the next one.
/// Equals `(ML_MASK - 1) + MINMATCH`: the longest length still encoded in the
/// token nibble alone.
pub const OPTIMAL_ML: usize = (bt::ML_MASK - 1) + bt::MINMATCH; // 18

// ─────────────────────────────────────────────────────────────────────────────
// Match
// ─────────────────────────────────────────────────────────────────────────────

/// One match candidate.
///
/// `back` counts bytes the match was extended backwards: the match really
/// starts `back` bytes before the searched position, and `len` includes them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Match {
    pub len: usize,
    pub off: usize,
    pub back: usize,
}

impl Match {
    pub const NONE: Match = Match { len: 0, off: 0, back: 0 };
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing and backward extension
// ─────────────────────────────────────────────────────────────────────────────

/// 4-byte Knuth-multiplicative hash: `(v * 2654435761) >> 17`.
#[inline(always)]
pub fn hash_ptr(buf: &[u8], pos: usize) -> usize {
    (bt::read32(buf, pos).wrapping_mul(2_654_435_761u32) >> (bt::MINMATCH as u32 * 8 - LZ4HC_HASH_LOG)) as usize
}

/// Count common bytes immediately before `ip` and `m`, stepping back no
/// further than `i_min` on the input side and `m_min` on the match side.
///
/// Returns how many bytes the match can be extended backwards.
#[inline]
pub fn count_back(buf: &[u8], ip: usize, m: usize, i_min: usize, m_min: usize) -> usize {
    debug_assert!(ip >= i_min && m >= m_min);
    let max_back = (ip - i_min).min(m - m_min);
    let mut back = 0;

    while max_back - back >= 4 {
        let v = bt::read32(buf, ip - back - 4) ^ bt::read32(buf, m - back - 4);
        if v != 0 {
            // Little-endian: the byte nearest `ip` sits in the high bits.
            return back + (v.leading_zeros() >> 3) as usize;
        }
        back += 4;
    }
    while back < max_back && buf[ip - back - 1] == buf[m - back - 1] {
        back += 1;
    }
    back
}

// ─────────────────────────────────────────────────────────────────────────────
// HC compression context
// ─────────────────────────────────────────────────────────────────────────────

/// Hash-chain tables for one HC compression at a time.
///
/// Indices stored in both tables are input positions plus [`HC_INDEX_BASE`].
/// A context can be reused across inputs; every compression resets it first.
pub struct HcContext {
    /// Hash of 4 bytes → most recent index with that hash.
    pub(crate) hash_table: Box<[u32]>,
    /// Distance back to the previous index with the same hash, by `index & LZ4HC_MAXD_MASK`.
    pub(crate) chain_table: Box<[u16]>,
    /// Positions below this index are already in the tables.
    pub(crate) next_to_update: u32,
}

impl HcContext {
    pub fn new() -> Self {
        Self {
            hash_table: vec![0u32; LZ4HC_HASHTABLESIZE].into_boxed_slice(),
            chain_table: vec![CHAIN_SENTINEL; LZ4HC_MAXD].into_boxed_slice(),
            next_to_update: HC_INDEX_BASE,
        }
    }

    /// Zero the hash table and fill the chain table with the sentinel.
    pub fn reset(&mut self) {
        self.hash_table.fill(0);
        self.chain_table.fill(CHAIN_SENTINEL);
        self.next_to_update = HC_INDEX_BASE;
    }
}

impl Default for HcContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_tables() {
        let ctx = HcContext::new();
        assert_eq!(ctx.hash_table.len(), 32_768);
        assert_eq!(ctx.chain_table.len(), 65_536);
        assert!(ctx.hash_table.iter().all(|&v| v == 0));
        assert!(ctx.chain_table.iter().all(|&v| v == CHAIN_SENTINEL));
        assert_eq!(ctx.next_to_update, HC_INDEX_BASE);
    }

    #[test]
    fn hash_fits_table() {
        let buf = [0xFFu8, 0xFE, 0xFD, 0xFC, 1, 2, 3, 4];
        for pos in 0..=4 {
            assert!(hash_ptr(&buf, pos) < LZ4HC_HASHTABLESIZE);
        }
    }

    #[test]
    fn count_back_stops_at_difference() {
        //                    0    1    2    3    4    5    6    7    8    9
        let buf = b"xabcdefQabcdef";
        // "abcdef" at 1 and 8; searching from the 'e's (5 and 12).
        assert_eq!(count_back(buf, 12, 5, 0, 0), 4);
        assert_eq!(count_back(buf, 12, 5, 10, 0), 2);
        assert_eq!(count_back(buf, 12, 5, 0, 4), 1);
    }

    #[test]
    fn count_back_long_run() {
        let buf = vec![7u8; 64];
        assert_eq!(count_back(&buf, 40, 20, 0, 0), 20);
        assert_eq!(count_back(&buf, 40, 20, 33, 0), 7);
    }

    #[test]
    fn optimal_ml_value() {
        assert_eq!(OPTIMAL_ML, 18);
    }
}
