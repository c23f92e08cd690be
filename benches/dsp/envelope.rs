//! Benchmarks for the time-based envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr808_dsp::dsp::Envelope;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Evaluated across attack and into decay
        let mut env = Envelope::percussive(SAMPLE_RATE, 5.0, 200.0);
        env.trigger(0);
        group.bench_with_input(BenchmarkId::new("value", size), &size, |b, _| {
            b.iter(|| {
                for (i, s) in buffer.iter_mut().enumerate() {
                    *s = env.value(black_box(i as u64));
                }
                black_box(&buffer);
            })
        });

        // Value plus the end-of-hit check every voice does per sample
        group.bench_with_input(BenchmarkId::new("value_and_finished", size), &size, |b, _| {
            b.iter(|| {
                let mut finished = false;
                for (i, s) in buffer.iter_mut().enumerate() {
                    let now = black_box(i as u64);
                    *s = env.value(now);
                    finished |= env.is_finished(now);
                }
                black_box(finished)
            })
        });
    }

    group.finish();
}
