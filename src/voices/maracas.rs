//! Maracas voice: high-passed white noise under a fast envelope.

use super::{DrumVoice, VoiceCore};
use crate::dsp::{Envelope, Filter, Oscillator};
use crate::synth::ParamId;

#[derive(Debug, Clone)]
pub struct Maracas {
    core: VoiceCore,
    noise: Oscillator,
    highpass: Filter,
    env: Envelope,
}

impl Maracas {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_level(sample_rate, 0.7)
    }

    pub fn with_level(sample_rate: f32, level: f32) -> Self {
        Self {
            core: VoiceCore::new(sample_rate, level),
            noise: Oscillator::new(sample_rate).with_amplitude(0.5),
            highpass: Filter::highpass(sample_rate, 1_500.0),
            env: Envelope::percussive(sample_rate, 0.5, 30.0),
        }
    }
}

impl DrumVoice for Maracas {
    fn core(&self) -> &VoiceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VoiceCore {
        &mut self.core
    }

    fn trigger(&mut self, velocity: f32) {
        self.core.start(velocity);
        self.env.trigger(self.core.now);

        if self.core.reset_filters {
            self.highpass.reset();
        }
    }

    fn process(&mut self) -> f32 {
        if !self.core.playing {
            return 0.0;
        }
        let now = self.core.tick();

        let shaker = self.highpass.process_high_pass(self.noise.white_noise());
        let out = shaker * self.env.value(now);

        self.core.settle(self.env.is_finished(self.core.now));
        self.core.output(out)
    }

    fn envelope_level(&self) -> f32 {
        self.env.value(self.core.now)
    }

    fn set_param(&mut self, _param: ParamId, _value: f32) -> bool {
        false
    }

    fn reseed(&mut self, seed: u32) {
        self.noise.reseed(seed);
    }
}
