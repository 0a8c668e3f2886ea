//! Benchmark input shared by the block and HC benches.
//!
//! Set `LZ4BLOCK_BENCH_FILE` to benchmark the first `size` bytes of a real
//! file (repeated if it is shorter); otherwise a synthetic mix of prose and
//! binary records is used.

/// `size` bytes of benchmark input.
pub fn input(size: usize) -> Vec<u8> {
    if let Ok(path) = std::env::var("LZ4BLOCK_BENCH_FILE") {
        if let Ok(buf) = std::fs::read(&path) {
            if !buf.is_empty() {
                return buf.iter().copied().cycle().take(size).collect();
            }
        }
    }
    synthetic(size)
}

fn synthetic(size: usize) -> Vec<u8> {
    const PROSE: &[u8] = b"It is a truth universally acknowledged, that a single man in \
        possession of a good fortune, must be in want of a wife. However little known \
        the feelings or views of such a man may be on his first entering a neighbourhood, \
        this truth is so well fixed in the minds of the surrounding families. ";

    let mut out = Vec::with_capacity(size + 64);
    let mut x = 0x243F_6A88u32;
    let mut i = 0usize;
    while out.len() < size {
        let start = (i * 31) % PROSE.len();
        let end = (start + 40 + i % 90).min(PROSE.len());
        out.extend_from_slice(&PROSE[start..end]);
        for _ in 0..(i % 5) {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            out.extend_from_slice(&x.to_le_bytes());
        }
        i += 1;
    }
    out.truncate(size);
    out
}
