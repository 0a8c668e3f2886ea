//! Criterion benchmarks for the greedy block encoder and the decoders.
//!
//! Run with:
//!   cargo bench --bench block
//!
//! Optionally set LZ4BLOCK_BENCH_FILE to benchmark a real file instead of
//! synthetic input.

use std::io::Read;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lz4block::block::{decode, encode_fast, maximum_output_length, Lz4DecoderStream};

mod support;

fn bench_block_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("block");

    for &size in &[65_536usize, 1 << 20] {
        let src = support::input(size);
        let bound = maximum_output_length(size);

        // ── encode_fast with several acceleration factors ────────────────────
        for &acc in &[1i32, 4, 16] {
            let mut dst = vec![0u8; bound];
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new(format!("encode_acc{acc}"), size), &src, |b, src| {
                b.iter(|| encode_fast(src, &mut dst, acc))
            });
        }

        // ── one-shot and streaming decode of the same block ──────────────────
        let mut tmp = vec![0u8; bound];
        let n = encode_fast(&src, &mut tmp, 1);
        let packed = tmp[..n].to_vec();
        let mut out = vec![0u8; size];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("decode", size), &packed, |b, packed| {
            b.iter(|| decode(packed, &mut out, true).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("decode_stream_4k", size), &packed, |b, packed| {
            let mut buf = vec![0u8; 4096];
            b.iter(|| {
                let mut dec = Lz4DecoderStream::new(&packed[..], packed.len() as u64);
                let mut total = 0usize;
                loop {
                    let got = dec.read(&mut buf).unwrap();
                    if got == 0 {
                        break;
                    }
                    total += got;
                }
                total
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_encode_decode);
criterion_main!(benches);
