//! Benchmarks for individual voices.
//!
//! Each voice is retriggered whenever it goes idle so every iteration
//! measures a sounding voice rather than the idle early return.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr808_dsp::voices::{
    Clap, Conga, Cowbell, Cymbal, DrumVoice, HiHat, Kick, Maracas, Rimshot, Snare, Tom,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn boxed<V: DrumVoice + 'static>(voice: V) -> Box<dyn DrumVoice> {
    Box::new(voice)
}

fn render_sounding(voice: &mut dyn DrumVoice, buffer: &mut [f32]) {
    if !voice.is_active() {
        voice.trigger(1.0);
    }
    for s in buffer.iter_mut() {
        *s = voice.process();
    }
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut kit: Vec<(&str, Box<dyn DrumVoice>)> = vec![
            ("kick", boxed(Kick::new(SAMPLE_RATE))),
            ("snare", boxed(Snare::new(SAMPLE_RATE))),
            ("cymbal", boxed(Cymbal::new(SAMPLE_RATE))),
            ("hihat", boxed(HiHat::new(SAMPLE_RATE))),
            ("tom", boxed(Tom::new(SAMPLE_RATE))),
            ("conga", boxed(Conga::new(SAMPLE_RATE))),
            ("rimshot", boxed(Rimshot::new(SAMPLE_RATE))),
            ("maracas", boxed(Maracas::new(SAMPLE_RATE))),
            ("clap", boxed(Clap::new(SAMPLE_RATE))),
            ("cowbell", boxed(Cowbell::new(SAMPLE_RATE))),
        ];

        for (name, voice) in kit.iter_mut() {
            group.bench_with_input(BenchmarkId::new(*name, size), &size, |b, _| {
                b.iter(|| {
                    render_sounding(voice.as_mut(), black_box(&mut buffer));
                })
            });
        }

        // Saturation adds a tanh per sample
        let mut driven = Kick::new(SAMPLE_RATE);
        driven.set_saturation(4.0);
        group.bench_with_input(BenchmarkId::new("kick_saturated", size), &size, |b, _| {
            b.iter(|| {
                render_sounding(&mut driven, black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
