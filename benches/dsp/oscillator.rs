//! Benchmarks for the tone and noise sources.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr808_dsp::dsp::{BridgedTOscillator, InharmonicOscillator, Oscillator};
use tr808_dsp::voices::MetallicBank;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - sin() per sample
        let mut osc = Oscillator::new(SAMPLE_RATE).with_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = osc.sine();
                }
                black_box(&buffer);
            })
        });

        // Square - branch per sample
        let mut osc = Oscillator::new(SAMPLE_RATE).with_frequency(540.0);
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = osc.square();
                }
                black_box(&buffer);
            })
        });

        // Pink noise - LCG plus one-pole smoothing
        let mut osc = Oscillator::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("pink_noise", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = osc.pink_noise();
                }
                black_box(&buffer);
            })
        });

        // Bridged-T resonator, restruck each block so it never goes silent
        let mut bt = BridgedTOscillator::new(SAMPLE_RATE, 60.0, 500.0);
        group.bench_with_input(BenchmarkId::new("bridged_t", size), &size, |b, _| {
            b.iter(|| {
                bt.trigger();
                for s in buffer.iter_mut() {
                    *s = bt.generate();
                }
                black_box(&buffer);
            })
        });

        let mut rim = InharmonicOscillator::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("inharmonic", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = rim.generate();
                }
                black_box(&buffer);
            })
        });

        // Six squares - the cymbal and hat source
        let mut bank = MetallicBank::new(SAMPLE_RATE, 0.3);
        group.bench_with_input(BenchmarkId::new("metallic_bank", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = bank.generate();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
