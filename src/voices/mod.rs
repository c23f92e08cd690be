//! The ten drum voices.
//!
//! Each voice owns its oscillators, envelopes and filters by value and wires
//! them into the signal graph of the matching 808 circuit. They share a
//! small [`VoiceCore`] (sample clock, playing flag, velocity, output stage)
//! and the [`DrumVoice`] shape so the machine can drive them generically.
//!
//! # Example
//!
//! ```ignore
//! use tr808_dsp::voices::{DrumVoice, Kick};
//!
//! let mut kick = Kick::new(32_768.0);
//! kick.trigger(1.0);
//! while kick.is_active() {
//!     let sample = kick.process();
//!     // ...
//! }
//! ```

mod clap;
mod conga;
mod cowbell;
mod cymbal;
mod hihat;
mod kick;
mod maracas;
mod metal;
mod rimshot;
mod snare;
mod tom;

pub use clap::Clap;
pub use conga::Conga;
pub use cowbell::Cowbell;
pub use cymbal::Cymbal;
pub use hihat::HiHat;
pub use kick::Kick;
pub use maracas::Maracas;
pub use metal::{MetallicBank, METAL_FREQUENCIES};
pub use rimshot::Rimshot;
pub use snare::Snare;
pub use tom::Tom;

use crate::config::{clamp_param, SATURATION_RANGE, UNIT_RANGE};
use crate::dsp::Processor;
use crate::synth::ParamId;

/// State every voice carries regardless of its signal graph.
#[derive(Debug, Clone)]
pub struct VoiceCore {
    pub(crate) sample_rate: f32,
    pub(crate) now: u64,
    pub(crate) playing: bool,
    pub(crate) velocity: f32,
    pub(crate) processor: Processor,
    pub(crate) reset_filters: bool,
}

impl VoiceCore {
    pub fn new(sample_rate: f32, level: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1.0),
            now: 0,
            playing: false,
            velocity: 1.0,
            processor: Processor::new(clamp_param(level, &UNIT_RANGE, 1.0), 0.0),
            reset_filters: false,
        }
    }

    /// Enter the sounding state with a sanitized velocity.
    #[inline]
    pub(crate) fn start(&mut self, velocity: f32) {
        self.velocity = clamp_param(velocity, &UNIT_RANGE, 1.0);
        self.playing = true;
    }

    /// Current sample position; advances the clock by one.
    #[inline]
    pub(crate) fn tick(&mut self) -> u64 {
        let now = self.now;
        self.now += 1;
        now
    }

    /// Go idle once the controlling envelope reports it has finished.
    #[inline]
    pub(crate) fn settle(&mut self, finished: bool) {
        if finished {
            self.playing = false;
        }
    }

    /// Output stage: saturation, level, velocity.
    #[inline]
    pub(crate) fn output(&self, sample: f32) -> f32 {
        self.processor.process(sample) * self.velocity
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn level(&self) -> f32 {
        self.processor.gain()
    }
}

/// Common shape of the ten voices.
///
/// `process()` returns exactly 0.0 while a voice is idle. Triggering a
/// sounding voice restarts it; there is no polyphony within a voice.
pub trait DrumVoice: Send {
    fn core(&self) -> &VoiceCore;
    fn core_mut(&mut self) -> &mut VoiceCore;

    fn trigger(&mut self, velocity: f32);

    /// Advance one sample.
    fn process(&mut self) -> f32;

    /// Level of the envelope that decides when the voice goes idle.
    fn envelope_level(&self) -> f32;

    /// Voice-specific parameters. Returns `false` for parameters the voice
    /// does not have.
    fn set_param(&mut self, param: ParamId, value: f32) -> bool;

    /// Restart the voice's noise sources from `seed`.
    fn reseed(&mut self, _seed: u32) {}

    fn is_active(&self) -> bool {
        self.core().playing
    }

    fn set_level(&mut self, level: f32) {
        let level = clamp_param(level, &UNIT_RANGE, self.core().level());
        self.core_mut().processor.set_gain(level);
    }

    fn set_saturation(&mut self, amount: f32) {
        let amount = clamp_param(amount, &SATURATION_RANGE, 0.0);
        self.core_mut().processor.set_saturation(amount);
    }

    /// Zero filter state on every trigger.
    fn set_filter_reset(&mut self, enabled: bool) {
        self.core_mut().reset_filters = enabled;
    }

    /// Route any parameter: level and saturation are shared, the rest are
    /// voice-specific.
    fn apply_param(&mut self, param: ParamId, value: f32) -> bool {
        match param {
            ParamId::Level => {
                self.set_level(value);
                true
            }
            ParamId::Saturation => {
                self.set_saturation(value);
                true
            }
            _ => self.set_param(param, value),
        }
    }
}

/// Seed for the noise source of the voice at `index`, derived from the kit
/// seed so that voices do not share a sequence.
pub(crate) fn voice_seed(seed: u32, index: usize) -> u32 {
    seed.wrapping_add((index as u32).wrapping_mul(0x9E37_79B9))
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::DrumVoice;

    pub const SAMPLE_RATE: f32 = 32_768.0;

    /// Render until the voice goes idle or `limit` samples pass. Returns the
    /// number of samples rendered and the peak magnitude.
    pub fn run_to_idle(voice: &mut dyn DrumVoice, limit: usize) -> (usize, f32) {
        let mut peak = 0.0f32;
        for n in 0..limit {
            if !voice.is_active() {
                return (n, peak);
            }
            peak = peak.max(voice.process().abs());
        }
        (limit, peak)
    }

    /// Lifecycle every voice must satisfy.
    pub fn check_lifecycle(voice: &mut dyn DrumVoice, expected_len: usize) {
        assert!(!voice.is_active(), "voice must start idle");
        for _ in 0..64 {
            assert_eq!(voice.process(), 0.0, "idle voice must be silent");
        }

        voice.trigger(1.0);
        assert!(voice.is_active(), "voice must sound right after trigger");

        let (len, peak) = run_to_idle(voice, expected_len * 2 + 1_000);
        assert!(peak > 0.0, "voice produced no output");
        assert!(
            len <= expected_len + 1,
            "voice rang for {len} samples, expected at most {expected_len}"
        );
        assert!(!voice.is_active());
        assert_eq!(voice.process(), 0.0);
    }

    pub fn ms_to_samples(ms: f32) -> usize {
        (ms * SAMPLE_RATE / 1_000.0).ceil() as usize
    }
}
