//! Cowbell voice.
//!
//! Two square waves a little under a fifth apart (800 and 540 Hz, mixed
//! 60/40), band-passed around 2 kHz and high-passed at 500 Hz.

use super::{DrumVoice, VoiceCore};
use crate::dsp::{Envelope, Filter, Oscillator};
use crate::synth::ParamId;

pub const COWBELL_FREQUENCIES: [f32; 2] = [800.0, 540.0];
const HIGH_MIX: f32 = 0.6;
const BAND_GAIN: f32 = 12.0;

#[derive(Debug, Clone)]
pub struct Cowbell {
    core: VoiceCore,
    high: Oscillator,
    low: Oscillator,
    band: Filter,
    highpass: Filter,
    env: Envelope,
}

impl Cowbell {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_level(sample_rate, 0.6)
    }

    pub fn with_level(sample_rate: f32, level: f32) -> Self {
        let [high, low] = COWBELL_FREQUENCIES;
        Self {
            core: VoiceCore::new(sample_rate, level),
            high: Oscillator::new(sample_rate).with_frequency(high),
            low: Oscillator::new(sample_rate).with_frequency(low),
            band: Filter::bandpass(sample_rate, 2_000.0, 1.0),
            highpass: Filter::highpass(sample_rate, 500.0),
            env: Envelope::percussive(sample_rate, 0.5, 80.0),
        }
    }
}

impl DrumVoice for Cowbell {
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
            self.band.reset();
            self.highpass.reset();
        }
    }

    fn process(&mut self) -> f32 {
        if !self.core.playing {
            return 0.0;
        }
        let now = self.core.tick();

        let mixed = HIGH_MIX * self.high.square() + (1.0 - HIGH_MIX) * self.low.square();
        let shaped = self
            .highpass
            .process_high_pass(BAND_GAIN * self.band.process_band_pass(mixed));
        let out = shaped * self.env.value(now);

        self.core.settle(self.env.is_finished(self.core.now));
        self.core.output(out)
    }

    fn envelope_level(&self) -> f32 {
        self.env.value(self.core.now)
    }

    fn set_param(&mut self, _param: ParamId, _value: f32) -> bool {
        false
    }
}
