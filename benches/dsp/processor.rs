//! Benchmarks for the output stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr808_dsp::dsp::processor::{to_i16, Processor};

use crate::BLOCK_SIZES;

pub fn bench_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/processor");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 * 0.05).sin() * 1.2)
            .collect();
        let mut buffer = vec![0.0f32; size];
        let mut pcm = vec![0i16; size];

        // Gain only; saturation skipped
        let clean = Processor::new(0.8, 0.0);
        group.bench_with_input(BenchmarkId::new("gain", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = clean.process(black_box(x));
                }
                black_box(&buffer);
            })
        });

        // tanh per sample
        let driven = Processor::new(0.8, 4.0);
        group.bench_with_input(BenchmarkId::new("saturate", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = driven.process(black_box(x));
                }
                black_box(&buffer);
            })
        });

        group.bench_with_input(BenchmarkId::new("to_i16", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in pcm.iter_mut().zip(&input) {
                    *out = to_i16(black_box(x));
                }
                black_box(&pcm);
            })
        });
    }

    group.finish();
}
