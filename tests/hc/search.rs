// Integration tests for hc/search.rs
//
// Every match the chain walk reports must be real: the bytes at
// `ip - back` and `ip - back - off` agree for `len` bytes, the distance
// stays inside the window, and the match never crosses the search limits.

use lz4block::block::types::{LASTLITERALS, LZ4_DISTANCE_MAX, MINMATCH};
use lz4block::hc::search::{find_best_match, get_wider_match};
use lz4block::hc::types::HcContext;

fn text(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut i = 0u64;
    while out.len() < len {
        i = i.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        let word: &[u8] = match (i >> 60) % 5 {
            0 => b"lorem ",
            1 => b"ipsum ",
            2 => b"dolor ",
            3 => b"sit ",
            _ => b"amet, ",
        };
        out.extend_from_slice(word);
    }
    out.truncate(len);
    out
}

#[test]
fn reported_matches_are_genuine() {
    let src = text(20_000);
    let limit = src.len() - LASTLITERALS;
    let mut ctx = HcContext::new();
    let mut found = 0;
    let mut ip = 0;
    while ip + 12 <= src.len() {
        let m = find_best_match(&mut ctx, &src, ip, limit, 64);
        if m.len >= MINMATCH {
            found += 1;
            assert!(m.off >= 1 && m.off <= ip && m.off <= LZ4_DISTANCE_MAX);
            assert!(ip + m.len <= limit);
            assert_eq!(&src[ip..ip + m.len], &src[ip - m.off..ip - m.off + m.len]);
        }
        ip += 37;
    }
    assert!(found > 100, "only {found} matches in repetitive text");
}

#[test]
fn wider_matches_stay_within_limits() {
    let src = text(8_000);
    let limit = src.len() - LASTLITERALS;
    let mut ctx = HcContext::new();
    let mut ip = 64;
    while ip + 12 <= src.len() {
        let low = ip - 16;
        let m = get_wider_match(&mut ctx, &src, ip, low, limit, MINMATCH - 1, 128);
        if m.len >= MINMATCH {
            let start = ip - m.back;
            assert!(start >= low);
            assert!(start + m.len <= limit);
            assert!(m.off >= 1 && m.off <= start);
            assert_eq!(&src[start..start + m.len], &src[start - m.off..start - m.off + m.len]);
        }
        ip += 29;
    }
}

#[test]
fn window_limit_is_respected() {
    // The only earlier copy of the pattern sits beyond the window.
    let pattern = b"0123456789ABCDEFGHIJ";
    let mut src = pattern.to_vec();
    src.extend(std::iter::repeat(b'.').take(LZ4_DISTANCE_MAX));
    let ip = src.len();
    src.extend_from_slice(pattern);
    src.extend_from_slice(b"#####");
    let limit = src.len() - LASTLITERALS;

    let mut ctx = HcContext::new();
    let m = find_best_match(&mut ctx, &src, ip, limit, 256);
    assert!(m.len < MINMATCH || m.off <= LZ4_DISTANCE_MAX);
    assert!(m.len < pattern.len());
}
