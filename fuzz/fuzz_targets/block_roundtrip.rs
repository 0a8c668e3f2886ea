#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Both encoders must produce blocks the one-shot decoder restores exactly.
    let greedy = lz4block::block::compress_block_to_vec(data);
    let high = lz4block::hc::compress_hc_to_vec(data);

    for (name, packed) in [("greedy", &greedy), ("hc", &high)] {
        assert!(!packed.is_empty(), "{name} encoder failed on {} bytes", data.len());
        assert!(packed.len() <= lz4block::maximum_output_length(data.len()));
        let recovered = lz4block::block::decode_to_vec(packed, data.len())
            .unwrap_or_else(|e| panic!("{name} block failed to decode: {e}"));
        assert_eq!(recovered, data, "{name} round-trip mismatch");
    }
});
