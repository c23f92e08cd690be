//! Benchmarks for DSP primitives and drum-kit scenarios.
//!
//! Run with: cargo bench
//!
//! Reference deadlines at the default 32 768 Hz sample rate:
//!   - 64 samples   = 1.95ms
//!   - 128 samples  = 3.91ms
//!   - 256 samples  = 7.81ms
//!   - 512 samples  = 15.63ms
//!
//! Benchmark groups:
//!   - dsp/*        Primitives (oscillators, envelope, filter, processor)
//!   - scenarios/*  Single voices, the full kit and the sequenced engine

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

pub const SAMPLE_RATE: f32 = 32_768.0;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_envelope,
    dsp::bench_filter,
    dsp::bench_processor,
    scenarios::bench_voices,
    scenarios::bench_mix,
);
criterion_main!(benches);
