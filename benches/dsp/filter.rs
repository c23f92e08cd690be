//! Benchmarks for the one-pole and resonant band-pass filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr808_dsp::dsp::{Filter, FilterType};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = vec![0.0f32; size];

        let kinds = [
            ("lowpass", FilterType::LowPass, Filter::lowpass(SAMPLE_RATE, 1_000.0)),
            ("highpass", FilterType::HighPass, Filter::highpass(SAMPLE_RATE, 1_000.0)),
            ("bandpass", FilterType::BandPass, Filter::bandpass(SAMPLE_RATE, 6_000.0, 1.5)),
        ];

        for (name, kind, mut filter) in kinds {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (out, &x) in buffer.iter_mut().zip(&input) {
                        *out = filter.process(kind, black_box(x));
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
