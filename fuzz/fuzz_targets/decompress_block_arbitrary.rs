#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the one-shot decoder. Errors are expected;
    // panics and out-of-bounds writes are not.
    for cap in [0usize, 16, 4096, data.len(), data.len().saturating_mul(255).min(1 << 20)] {
        let mut dst = vec![0u8; cap];
        if let Ok(n) = lz4block::decode(data, &mut dst, false) {
            assert!(n <= cap);
        }
        let _ = lz4block::decode(data, &mut dst, true);
    }
});
