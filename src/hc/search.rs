//! Match-finding core for the LZ4-HC compressor.
//!
//! 1. **Insertion** ([`insert`]): add every position in
//!    `[next_to_update, ip)` to the hash and chain tables, exactly once.
//! 2. **Match search** ([`get_wider_match`], [`find_best_match`]): walk the
//!    hash chain for the longest match, optionally extending candidates
//!    backwards.

use super::types::{count_back, hash_ptr, HcContext, Match, HC_INDEX_BASE, LZ4HC_MAXD_MASK};
use crate::block::types::{self as bt, LZ4_DISTANCE_MAX, MINMATCH};

/// Chain delta stored for `idx`.
#[inline(always)]
fn delta_next(chain_table: &[u16], idx: u32) -> u32 {
    chain_table[idx as usize & LZ4HC_MAXD_MASK] as u32
}

// ─────────────────────────────────────────────────────────────────────────────
// insert
// ─────────────────────────────────────────────────────────────────────────────

/// Fill hash and chain entries for all positions from `ctx.next_to_update`
/// up to (excluding) `ip`.
///
/// The high-water mark only moves forward, so a search behind an earlier one
/// inserts nothing.
#[inline]
pub fn insert(ctx: &mut HcContext, src: &[u8], ip: usize) {
    let target = ip as u32 + HC_INDEX_BASE;
    let mut idx = ctx.next_to_update;

    while idx < target {
        let h = hash_ptr(src, (idx - HC_INDEX_BASE) as usize);
        let delta = idx.wrapping_sub(ctx.hash_table[h]).min(LZ4_DISTANCE_MAX as u32);
        ctx.chain_table[idx as usize & LZ4HC_MAXD_MASK] = delta as u16;
        ctx.hash_table[h] = idx;
        idx += 1;
    }

    if target > ctx.next_to_update {
        ctx.next_to_update = target;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// get_wider_match
// ─────────────────────────────────────────────────────────────────────────────

/// Search the chain at `ip` for a match longer than `longest`.
///
/// Candidates may extend backwards down to `i_low_limit` (`<= ip`) and
/// forwards up to `i_high_limit`.  At most `max_attempts` chain entries are
/// examined; only a strictly longer candidate replaces the current best, so
/// among equal lengths the nearest wins.
///
/// Returns a [`Match`] whose `len` is still `longest` when nothing better was
/// found.  `src[ip..ip + 4]` must be readable.
pub fn get_wider_match(
    ctx: &mut HcContext,
    src: &[u8],
    ip: usize,
    i_low_limit: usize,
    i_high_limit: usize,
    longest: usize,
    max_attempts: usize,
) -> Match {
    debug_assert!(i_low_limit <= ip);
    debug_assert!(longest >= 1);

    let ip_index = ip as u32 + HC_INDEX_BASE;
    let lowest_match_index = if HC_INDEX_BASE + LZ4_DISTANCE_MAX as u32 + 1 > ip_index {
        HC_INDEX_BASE
    } else {
        ip_index - LZ4_DISTANCE_MAX as u32
    };
    let look_back_length = ip - i_low_limit;
    let pattern = bt::read32(src, ip);

    let mut best = Match { len: longest, off: 0, back: 0 };
    let mut nb_attempts = max_attempts;

    insert(ctx, src, ip);
    let mut match_index = ctx.hash_table[hash_ptr(src, ip)];

    while match_index >= lowest_match_index && nb_attempts > 0 {
        nb_attempts -= 1;

        // Entries ahead of `ip` come from an earlier, further-ahead search.
        if match_index < ip_index {
            let match_pos = (match_index - HC_INDEX_BASE) as usize;
            // Cheap 2-byte probe at the end of the span to beat before the full compare.
            let tail_ok = match_pos < look_back_length
                || bt::read_le16(src, i_low_limit + best.len - 1)
                    == bt::read_le16(src, match_pos - look_back_length + best.len - 1);
            if tail_ok && bt::read32(src, match_pos) == pattern {
                let back = if look_back_length != 0 {
                    count_back(src, ip, match_pos, i_low_limit, 0)
                } else {
                    0
                };
                let len = MINMATCH + bt::count(src, ip + MINMATCH, match_pos + MINMATCH, i_high_limit) + back;
                if len > best.len {
                    best = Match {
                        len,
                        off: (ip_index - match_index) as usize,
                        back,
                    };
                }
            }
        }

        let delta = delta_next(&ctx.chain_table, match_index);
        if delta == 0 || delta > match_index {
            break;
        }
        match_index -= delta;
    }

    best
}

/// Longest match starting exactly at `ip`, or a match with `len < MINMATCH`
/// when there is none.
#[inline]
pub fn find_best_match(
    ctx: &mut HcContext,
    src: &[u8],
    ip: usize,
    i_limit: usize,
    max_attempts: usize,
) -> Match {
    get_wider_match(ctx, src, ip, ip, i_limit, MINMATCH - 1, max_attempts)
}
