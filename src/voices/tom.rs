//! Tom voice.
//!
//! A bridged-T body that bends downward while it rings, plus a little
//! low-passed pink noise for the skin. The body envelope decides when the
//! voice goes idle; the noise layer is cut with it.
//!
//! The bend multiplies the pitch by 0.95 over the length of the decay, so
//! every hit glides the same interval regardless of the decay setting. Each
//! trigger starts again from the tuned pitch.

use super::{DrumVoice, VoiceCore};
use crate::config::{clamp_param, TunedSettings, TOM_DECAY_RANGE, TOM_TUNING_RANGE};
use crate::dsp::{BridgedTOscillator, Envelope, Filter, Oscillator};
use crate::synth::ParamId;

const PITCH_BEND: f32 = 0.95;
const NOISE_AMPLITUDE: f32 = 0.1;
const NOISE_MIX: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Tom {
    core: VoiceCore,
    body: BridgedTOscillator,
    noise: Oscillator,
    noise_filter: Filter,
    tonal_env: Envelope,
    noise_env: Envelope,
    tuning_hz: f32,
    decay_ms: f32,
    current_hz: f32,
    bend_per_sample: f32,
}

impl Tom {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, &TunedSettings::tom())
    }

    pub fn with_settings(sample_rate: f32, settings: &TunedSettings) -> Self {
        let mut tom = Self {
            core: VoiceCore::new(sample_rate, settings.level),
            body: BridgedTOscillator::new(sample_rate, settings.tuning_hz, settings.decay_ms),
            noise: Oscillator::new(sample_rate).with_amplitude(NOISE_AMPLITUDE),
            noise_filter: Filter::lowpass(sample_rate, 500.0),
            tonal_env: Envelope::percussive(sample_rate, 0.5, settings.decay_ms),
            noise_env: Envelope::percussive(sample_rate, 1.0, 200.0),
            tuning_hz: 165.0,
            decay_ms: 400.0,
            current_hz: 165.0,
            bend_per_sample: 1.0,
        };
        tom.set_tuning(settings.tuning_hz);
        tom.set_decay(settings.decay_ms);
        tom
    }

    /// Pitch in Hz (120..=200).
    pub fn set_tuning(&mut self, tuning_hz: f32) {
        self.tuning_hz = clamp_param(tuning_hz, &TOM_TUNING_RANGE, self.tuning_hz);
        self.body.set_frequency(self.tuning_hz);
    }

    /// Body decay in milliseconds (200..=800).
    pub fn set_decay(&mut self, decay_ms: f32) {
        self.decay_ms = clamp_param(decay_ms, &TOM_DECAY_RANGE, self.decay_ms);
        self.tonal_env.set_decay(self.decay_ms);
        self.body.set_decay(self.decay_ms);

        let decay_samples = (self.decay_ms * self.core.sample_rate / 1_000.0).max(1.0);
        self.bend_per_sample = PITCH_BEND.powf(1.0 / decay_samples);
    }

    pub fn tuning(&self) -> f32 {
        self.tuning_hz
    }

    pub fn decay(&self) -> f32 {
        self.decay_ms
    }

    pub fn current_frequency(&self) -> f32 {
        self.current_hz
    }
}

impl DrumVoice for Tom {
    fn core(&self) -> &VoiceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VoiceCore {
        &mut self.core
    }

    fn trigger(&mut self, velocity: f32) {
        self.core.start(velocity);
        let now = self.core.now;
        self.current_hz = self.tuning_hz;
        self.body.set_frequency(self.current_hz);
        self.body.trigger();
        self.tonal_env.trigger(now);
        self.noise_env.trigger(now);

        if self.core.reset_filters {
            self.noise_filter.reset();
        }
    }

    fn process(&mut self) -> f32 {
        if !self.core.playing {
            return 0.0;
        }
        let now = self.core.tick();

        self.current_hz *= self.bend_per_sample;
        self.body.set_frequency(self.current_hz);

        let tonal = self.body.generate() * self.tonal_env.value(now);
        let skin = self.noise_filter.process_low_pass(self.noise.pink_noise());
        let noise = skin * self.noise_env.value(now) * NOISE_MIX;

        self.core.settle(self.tonal_env.is_finished(self.core.now));
        self.core.output(tonal + noise)
    }

    fn envelope_level(&self) -> f32 {
        self.tonal_env.value(self.core.now)
    }

    fn set_param(&mut self, param: ParamId, value: f32) -> bool {
        match param {
            ParamId::Tuning => self.set_tuning(value),
            ParamId::Decay => self.set_decay(value),
            _ => return false,
        }
        true
    }

    fn reseed(&mut self, seed: u32) {
        self.noise.reseed(seed);
    }
}
