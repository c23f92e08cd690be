//! Benchmarks for the full kit.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tr808_dsp::sequencing::StepPattern;
use tr808_dsp::synth::{DrumEngine, NoMessages};
use tr808_dsp::{DrumKitConfig, DrumMachine, VoiceId};

use crate::BLOCK_SIZES;

/// Every step of every lane set, so voices are retriggered constantly.
fn busy_pattern() -> StepPattern {
    let mut pattern = StepPattern::new();
    for id in VoiceId::ALL {
        for step in 0..pattern.len() {
            // Steps are in range for a fresh pattern
            let _ = pattern.set_step(id, step, 100);
        }
    }
    pattern
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");
    let config = DrumKitConfig::default();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Idle kit: cost of ten early returns, master gain and clip
        let mut idle = DrumMachine::new(&config);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| idle.render_block(black_box(&mut buffer)))
        });

        // All ten voices sounding
        let mut full = DrumMachine::new(&config);
        group.bench_with_input(BenchmarkId::new("all_voices", size), &size, |b, _| {
            b.iter(|| {
                for id in VoiceId::ALL {
                    if !full.voice(id).is_active() {
                        full.trigger(id, 1.0);
                    }
                }
                full.render_block(black_box(&mut buffer));
            })
        });

        // Engine with control ticks and the sequencer firing every step
        let mut engine = DrumEngine::new(&config, NoMessages);
        engine.sequencer_mut().set_pattern(busy_pattern());
        engine.sequencer_mut().start();
        group.bench_with_input(BenchmarkId::new("engine_sequenced", size), &size, |b, _| {
            b.iter(|| engine.render_block(black_box(&mut buffer)))
        });
    }

    group.finish();
}
