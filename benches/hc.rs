//! Criterion benchmarks for the HC block encoder.
//!
//! Run with:
//!   cargo bench --bench hc
//!
//! Optionally set LZ4BLOCK_BENCH_FILE for real-world input.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lz4block::block::maximum_output_length;
use lz4block::hc::{encode_hc_with_context, HcContext};

mod support;

fn bench_hc_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hc");

    let size = 262_144usize;
    let src = support::input(size);
    let mut ctx = HcContext::new();

    for &attempts in &[4usize, 16, 64, 256, 4096] {
        let mut dst = vec![0u8; maximum_output_length(size)];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encode_hc", attempts), &src, |b, src| {
            b.iter(|| encode_hc_with_context(&mut ctx, src, &mut dst, attempts))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hc_encode);
criterion_main!(benches);
