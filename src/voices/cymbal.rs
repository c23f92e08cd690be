//! Cymbal voice.
//!
//! The metallic bank split through two band-passes (upper and lower
//! partials, weighted 0.7/0.3), high-passed at 2 kHz and shaped by one long
//! envelope. Tone moves both band-pass centres together.

use super::{DrumVoice, MetallicBank, VoiceCore};
use crate::config::{clamp_param, CymbalSettings, CYMBAL_DECAY_RANGE, UNIT_RANGE};
use crate::dsp::{Envelope, Filter};
use crate::synth::ParamId;

const BANK_AMPLITUDE: f32 = 0.3;
const BAND_Q: f32 = 1.5;
const HIGH_MIX: f32 = 0.7;
/// Makeup after the band-passes, which keep little of the bank's
/// sub-kilohertz energy.
const BAND_GAIN: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct Cymbal {
    core: VoiceCore,
    bank: MetallicBank,
    band_high: Filter,
    band_low: Filter,
    highpass: Filter,
    env: Envelope,
    decay_ms: f32,
    tone: f32,
}

impl Cymbal {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, &CymbalSettings::default())
    }

    pub fn with_settings(sample_rate: f32, settings: &CymbalSettings) -> Self {
        let mut cymbal = Self {
            core: VoiceCore::new(sample_rate, settings.level),
            bank: MetallicBank::new(sample_rate, BANK_AMPLITUDE),
            band_high: Filter::bandpass(sample_rate, 7_100.0, BAND_Q),
            band_low: Filter::bandpass(sample_rate, 3_440.0, BAND_Q),
            highpass: Filter::highpass(sample_rate, 2_000.0),
            env: Envelope::percussive(sample_rate, 1.0, settings.decay_ms),
            decay_ms: settings.decay_ms,
            tone: settings.tone,
        };
        cymbal.set_decay(settings.decay_ms);
        cymbal.set_tone(settings.tone);
        cymbal
    }

    /// Decay in milliseconds (500..=2000).
    pub fn set_decay(&mut self, decay_ms: f32) {
        self.decay_ms = clamp_param(decay_ms, &CYMBAL_DECAY_RANGE, self.decay_ms);
        self.env.set_decay(self.decay_ms);
    }

    /// Band centres: 5/2.5 kHz at 0.0 up to 9/4.5 kHz at 1.0.
    pub fn set_tone(&mut self, tone: f32) {
        self.tone = clamp_param(tone, &UNIT_RANGE, self.tone);
        self.band_high.set_cutoff(5_000.0 + self.tone * 4_000.0);
        self.band_low.set_cutoff(2_500.0 + self.tone * 2_000.0);
    }

    pub fn decay(&self) -> f32 {
        self.decay_ms
    }

    pub fn tone(&self) -> f32 {
        self.tone
    }
}

impl DrumVoice for Cymbal {
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
            self.band_high.reset();
            self.band_low.reset();
            self.highpass.reset();
        }
    }

    fn process(&mut self) -> f32 {
        if !self.core.playing {
            return 0.0;
        }
        let now = self.core.tick();

        let metal = self.bank.generate();
        let bands = BAND_GAIN
            * (HIGH_MIX * self.band_high.process_band_pass(metal)
                + (1.0 - HIGH_MIX) * self.band_low.process_band_pass(metal));
        let out = self.highpass.process_high_pass(bands) * self.env.value(now);

        self.core.settle(self.env.is_finished(self.core.now));
        self.core.output(out)
    }

    fn envelope_level(&self) -> f32 {
        self.env.value(self.core.now)
    }

    fn set_param(&mut self, param: ParamId, value: f32) -> bool {
        match param {
            ParamId::Decay => self.set_decay(value),
            ParamId::Tone => self.set_tone(value),
            _ => return false,
        }
        true
    }
}
