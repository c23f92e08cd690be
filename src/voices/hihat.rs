//! Hi-hat voice.
//!
//! Shares the cymbal's metallic bank at a lower level, through a single
//! band-pass and a 3 kHz high-pass. One voice covers both the closed and
//! open hat: the mode picks which decay the next hit uses, and an open hat
//! is choked by a closed hit because both are the same voice.

use super::{DrumVoice, MetallicBank, VoiceCore};
use crate::config::{clamp_param, HiHatSettings, HIHAT_DECAY_RANGE, UNIT_RANGE};
use crate::dsp::{Envelope, Filter};
use crate::synth::ParamId;

const BANK_AMPLITUDE: f32 = 0.2;
const BAND_Q: f32 = 1.5;
/// Makeup after the band-pass, which keeps little of the bank's
/// sub-kilohertz energy.
const BAND_GAIN: f32 = 32.0;

#[derive(Debug, Clone)]
pub struct HiHat {
    core: VoiceCore,
    bank: MetallicBank,
    band: Filter,
    highpass: Filter,
    env: Envelope,
    open: bool,
    closed_decay_ms: f32,
    open_decay_ms: f32,
    tone: f32,
}

impl HiHat {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, &HiHatSettings::default())
    }

    pub fn with_settings(sample_rate: f32, settings: &HiHatSettings) -> Self {
        let mut hat = Self {
            core: VoiceCore::new(sample_rate, settings.level),
            bank: MetallicBank::new(sample_rate, BANK_AMPLITUDE),
            band: Filter::bandpass(sample_rate, 8_000.0, BAND_Q),
            highpass: Filter::highpass(sample_rate, 3_000.0),
            env: Envelope::percussive(sample_rate, 0.5, settings.closed_decay_ms),
            open: false,
            closed_decay_ms: clamp_param(settings.closed_decay_ms, &HIHAT_DECAY_RANGE, 50.0),
            open_decay_ms: clamp_param(settings.open_decay_ms, &HIHAT_DECAY_RANGE, 200.0),
            tone: settings.tone,
        };
        hat.set_tone(settings.tone);
        hat.set_open(false);
        hat
    }

    /// Select open or closed for the next hit.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        let decay = if open {
            self.open_decay_ms
        } else {
            self.closed_decay_ms
        };
        self.env.set_decay(decay);
    }

    /// Decay of the current mode in milliseconds (20..=400).
    pub fn set_decay(&mut self, decay_ms: f32) {
        if self.open {
            self.open_decay_ms = clamp_param(decay_ms, &HIHAT_DECAY_RANGE, self.open_decay_ms);
        } else {
            self.closed_decay_ms = clamp_param(decay_ms, &HIHAT_DECAY_RANGE, self.closed_decay_ms);
        }
        self.set_open(self.open);
    }

    /// Band centre from 6 kHz (0.0) to 8.5 kHz (1.0).
    pub fn set_tone(&mut self, tone: f32) {
        self.tone = clamp_param(tone, &UNIT_RANGE, self.tone);
        self.band.set_cutoff(6_000.0 + self.tone * 2_500.0);
    }

    /// Hit in the given mode.
    pub fn trigger_with(&mut self, velocity: f32, open: bool) {
        self.set_open(open);
        self.trigger(velocity);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn decay(&self) -> f32 {
        if self.open {
            self.open_decay_ms
        } else {
            self.closed_decay_ms
        }
    }

    pub fn tone(&self) -> f32 {
        self.tone
    }
}

impl DrumVoice for HiHat {
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

        let metal = self.bank.generate();
        let band = BAND_GAIN * self.band.process_band_pass(metal);
        let out = self.highpass.process_high_pass(band) * self.env.value(now);

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
            ParamId::Open => self.set_open(value >= 0.5),
            _ => return false,
        }
        true
    }
}
