// Integration tests for bench/compress_strategy.rs

use lz4block::bench::compress_strategy::{build_strategy, CompressionStrategy, GreedyBlock, HcBlock};
use lz4block::bench::BenchConfig;
use lz4block::block::compress::maximum_output_length;
use lz4block::block::decompress_api::decode_to_vec;
use lz4block::hc::compress_hc_to_vec;

#[test]
fn strategies_reuse_their_context() {
    let blocks: Vec<Vec<u8>> = (0..5u8)
        .map(|k| (0..20_000u32).map(|i| ((i % (50 + k as u32)) as u8) ^ k).collect())
        .collect();

    let mut strategies: Vec<Box<dyn CompressionStrategy>> = vec![Box::new(GreedyBlock::new(1)), Box::new(HcBlock::new(64))];
    for s in strategies.iter_mut() {
        let mut dst = Vec::new();
        for block in &blocks {
            let n = s.compress_block(block, &mut dst);
            assert!(n > 0);
            assert_eq!(&decode_to_vec(&dst[..n], block.len()).unwrap(), block);
        }
    }
}

#[test]
fn hc_strategy_matches_one_shot_api() {
    let src = b"one shot and strategy agree, one shot and strategy agree".repeat(50);
    let mut cfg = BenchConfig::default();
    cfg.set_hc(true);
    let mut s = build_strategy(&cfg);
    let mut dst = Vec::new();
    let n = s.compress_block(&src, &mut dst);
    assert_eq!(&dst[..n], &compress_hc_to_vec(&src)[..]);
}

#[test]
fn dst_is_not_shrunk() {
    let mut s = GreedyBlock::new(1);
    let mut dst = vec![0u8; 10_000];
    let n = s.compress_block(b"tiny", &mut dst);
    assert_eq!(n, 5);
    assert_eq!(dst.len(), 10_000);
    assert!(dst.len() >= maximum_output_length(4));
}
