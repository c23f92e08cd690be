//! Conga voice: a higher, shorter tom without the pitch bend.

use super::{DrumVoice, VoiceCore};
use crate::config::{clamp_param, TunedSettings, CONGA_DECAY_RANGE, CONGA_TUNING_RANGE};
use crate::dsp::{BridgedTOscillator, Envelope, Filter, Oscillator};
use crate::synth::ParamId;

const NOISE_AMPLITUDE: f32 = 0.1;
const NOISE_MIX: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Conga {
    core: VoiceCore,
    body: BridgedTOscillator,
    noise: Oscillator,
    noise_filter: Filter,
    tonal_env: Envelope,
    noise_env: Envelope,
    tuning_hz: f32,
    decay_ms: f32,
}

impl Conga {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, &TunedSettings::conga())
    }

    pub fn with_settings(sample_rate: f32, settings: &TunedSettings) -> Self {
        let mut conga = Self {
            core: VoiceCore::new(sample_rate, settings.level),
            body: BridgedTOscillator::new(sample_rate, settings.tuning_hz, settings.decay_ms),
            noise: Oscillator::new(sample_rate).with_amplitude(NOISE_AMPLITUDE),
            noise_filter: Filter::lowpass(sample_rate, 600.0),
            tonal_env: Envelope::percussive(sample_rate, 0.5, settings.decay_ms),
            noise_env: Envelope::percussive(sample_rate, 1.0, 180.0),
            tuning_hz: 370.0,
            decay_ms: 300.0,
        };
        conga.set_tuning(settings.tuning_hz);
        conga.set_decay(settings.decay_ms);
        conga
    }

    /// Pitch in Hz (250..=400).
    pub fn set_tuning(&mut self, tuning_hz: f32) {
        self.tuning_hz = clamp_param(tuning_hz, &CONGA_TUNING_RANGE, self.tuning_hz);
        self.body.set_frequency(self.tuning_hz);
    }

    /// Body decay in milliseconds (150..=600).
    pub fn set_decay(&mut self, decay_ms: f32) {
        self.decay_ms = clamp_param(decay_ms, &CONGA_DECAY_RANGE, self.decay_ms);
        self.tonal_env.set_decay(self.decay_ms);
        self.body.set_decay(self.decay_ms);
    }

    pub fn tuning(&self) -> f32 {
        self.tuning_hz
    }

    pub fn decay(&self) -> f32 {
        self.decay_ms
    }
}

impl DrumVoice for Conga {
    fn core(&self) -> &VoiceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VoiceCore {
        &mut self.core
    }

    fn trigger(&mut self, velocity: f32) {
        self.core.start(velocity);
        let now = self.core.now;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::test_util::{check_lifecycle, ms_to_samples, SAMPLE_RATE};

    #[test]
    fn lifecycle_follows_body() {
        let mut conga = Conga::new(SAMPLE_RATE);
        check_lifecycle(&mut conga, ms_to_samples(0.5) + ms_to_samples(300.0));
    }

    #[test]
    fn tuning_param_routes() {
        let mut conga = Conga::new(SAMPLE_RATE);
        assert!(conga.set_param(ParamId::Tuning, 300.0));
        assert_eq!(conga.tuning(), 300.0);
        assert!(!conga.set_param(ParamId::Tone, 0.5));
    }
}
