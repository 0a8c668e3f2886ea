//! HC main compression loop.
//!
//! [`compress_hash_chain`] is a lazy match selector that keeps up to three
//! overlapping candidate matches at a time.  After finding a match `m1` it
//! looks for a longer `m2` starting inside `m1`, then for an `m3` inside
//! `m2`, and only commits a sequence once the overlaps are settled:
//!
//! - no better `m2` → emit `m1`;
//! - `m2` starts fewer than 3 bytes after `m1` → drop `m1`, `m2` becomes `m1`;
//! - no better `m3` → trim `m1` to end where `m2` starts, emit both;
//! - `m3` leaves no room for `m2` → drop `m2`, continue with `m3`;
//! - otherwise emit (trimmed) `m1` and slide the window forward.
//!
//! Trimmed lengths are capped at [`OPTIMAL_ML`] when the next match starts
//! close by, so that every emitted match keeps at least `MINMATCH` bytes.

use super::encode::{encode_sequence, Lz4HcError};
use super::search::{find_best_match, get_wider_match};
use super::types::{HcContext, Match, OPTIMAL_ML};
use crate::block::compress::write_length_ext;
use crate::block::types::{
    LimitedOutputDirective, LASTLITERALS, LZ4_MIN_LENGTH, MFLIMIT, MINMATCH, ML_BITS, RUN_MASK,
};

// ─────────────────────────────────────────────────────────────────────────────
// SearchState
// ─────────────────────────────────────────────────────────────────────────────

/// Entry point for each iteration of the lookahead loop.
///
/// `S2` searches a new second candidate; `S3` keeps the current `m2` and
/// goes straight to searching the third.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SearchState {
    S2,
    S3,
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_hash_chain
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst` with the hash-chain parser.
///
/// `ctx` must be freshly reset.  With `NotLimited`, `dst` must hold at least
/// `maximum_output_length(src.len())` bytes.  Returns the compressed size, or
/// 0 when `LimitedOutput` runs out of room.
pub fn compress_hash_chain(
    ctx: &mut HcContext,
    src: &[u8],
    dst: &mut [u8],
    max_nb_attempts: usize,
    limit: LimitedOutputDirective,
) -> usize {
    match compress_sequences(ctx, src, dst, max_nb_attempts, limit) {
        Ok(n) => n,
        Err(Lz4HcError::OutputTooSmall) => 0,
    }
}

fn compress_sequences(
    ctx: &mut HcContext,
    src: &[u8],
    dst: &mut [u8],
    max_nb_attempts: usize,
    limit: LimitedOutputDirective,
) -> Result<usize, Lz4HcError> {
    let iend = src.len();
    let mut ip = 0usize;
    let mut anchor = 0usize;
    let mut op = 0usize;

    // Short inputs carry no matches; go straight to the final literal run.
    if iend >= LZ4_MIN_LENGTH {
        let mflimit = iend - MFLIMIT;
        let matchlimit = iend - LASTLITERALS;

        let mut start0;
        let mut start2 = 0usize;
        let mut start3 = 0usize;
        let mut m0;
        let mut m1;
        let mut m2 = Match::NONE;
        let mut m3;

        'compress_loop: while ip <= mflimit {
            m1 = find_best_match(ctx, src, ip, matchlimit, max_nb_attempts);
            if m1.len < MINMATCH {
                ip += 1;
                continue 'compress_loop;
            }

            start0 = ip;
            m0 = m1;
            let mut search_state = SearchState::S2;

            'search_loop: loop {
                if search_state == SearchState::S2 {
                    if ip + m1.len <= mflimit {
                        start2 = ip + m1.len - 2;
                        m2 = get_wider_match(ctx, src, start2, ip, matchlimit, m1.len, max_nb_attempts);
                        start2 -= m2.back;
                    } else {
                        m2 = Match::NONE;
                    }

                    if m2.len <= m1.len {
                        // No better match: emit m1.
                        encode_sequence(src, dst, &mut ip, &mut op, &mut anchor, m1.len, m1.off, limit)?;
                        continue 'compress_loop;
                    }

                    // m1 was replaced at least once; restore the original if
                    // m2 would squeeze in between.
                    if start0 < ip && start2 < ip + m0.len {
                        ip = start0;
                        m1 = m0;
                    }

                    if start2 - ip < 3 {
                        // m1 too short to be worth emitting: m2 takes its place.
                        ip = start2;
                        m1 = m2;
                        continue 'search_loop;
                    }
                }

                search_state = SearchState::S2;

                // Possibly shorten m1 so that m2 keeps a useful length after it.
                if start2 - ip < OPTIMAL_ML {
                    let new_ml = m1.len.min(OPTIMAL_ML).min(start2 - ip + m2.len - MINMATCH);
                    if new_ml > start2 - ip {
                        let correction = new_ml - (start2 - ip);
                        start2 += correction;
                        m2.len -= correction;
                    }
                }

                if start2 + m2.len <= mflimit {
                    start3 = start2 + m2.len - 3;
                    m3 = get_wider_match(ctx, src, start3, start2, matchlimit, m2.len, max_nb_attempts);
                    start3 -= m3.back;
                } else {
                    m3 = Match::NONE;
                }

                if m3.len <= m2.len {
                    // No better match: emit m1 (trimmed to end at m2) and m2.
                    if start2 < ip + m1.len {
                        m1.len = start2 - ip;
                    }
                    encode_sequence(src, dst, &mut ip, &mut op, &mut anchor, m1.len, m1.off, limit)?;
                    ip = start2;
                    encode_sequence(src, dst, &mut ip, &mut op, &mut anchor, m2.len, m2.off, limit)?;
                    continue 'compress_loop;
                }

                if start3 < ip + m1.len + 3 {
                    if start3 >= ip + m1.len {
                        // m1 can be written now; m2 is dropped and m3 becomes the new m1.
                        if start2 < ip + m1.len {
                            let correction = ip + m1.len - start2;
                            if m2.len < correction + MINMATCH {
                                start2 = start3;
                                m2 = m3;
                            } else {
                                start2 += correction;
                                m2.len -= correction;
                            }
                        }
                        encode_sequence(src, dst, &mut ip, &mut op, &mut anchor, m1.len, m1.off, limit)?;
                        ip = start3;
                        m1 = m3;
                        start0 = start2;
                        m0 = m2;
                        continue 'search_loop;
                    }
                    // m2 does not fit before m3: retry with m3 as the new m2.
                    start2 = start3;
                    m2 = m3;
                    search_state = SearchState::S3;
                    continue 'search_loop;
                }

                // Three ascending matches: emit m1, trimmed so m2 can follow.
                if start2 < ip + m1.len {
                    if start2 - ip < OPTIMAL_ML {
                        m1.len = m1.len.min(OPTIMAL_ML).min(start2 - ip + m2.len - MINMATCH);
                        if m1.len > start2 - ip {
                            let correction = m1.len - (start2 - ip);
                            start2 += correction;
                            m2.len -= correction;
                        }
                    } else {
                        m1.len = start2 - ip;
                    }
                }
                encode_sequence(src, dst, &mut ip, &mut op, &mut anchor, m1.len, m1.off, limit)?;

                // Slide the window: m2 → m1, m3 → m2, search a new m3.
                ip = start2;
                m1 = m2;
                start2 = start3;
                m2 = m3;
                search_state = SearchState::S3;
            }
        }
    }

    // ── Final literal run ────────────────────────────────────────────────────
    let last_run = iend - anchor;
    let total_size = 1 + (last_run + 255 - RUN_MASK) / 255 + last_run;
    if limit == LimitedOutputDirective::LimitedOutput && op + total_size > dst.len() {
        return Err(Lz4HcError::OutputTooSmall);
    }
    if last_run >= RUN_MASK {
        dst[op] = (RUN_MASK << ML_BITS) as u8;
        op += 1;
        write_length_ext(dst, &mut op, last_run - RUN_MASK);
    } else {
        dst[op] = (last_run << ML_BITS) as u8;
        op += 1;
    }
    dst[op..op + last_run].copy_from_slice(&src[anchor..]);
    Ok(op + last_run)
}
