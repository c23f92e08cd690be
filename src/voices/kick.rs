//! Bass drum voice.
//!
//! A struck bridged-T resonator with a fast downward pitch sweep, smoothed by
//! a low-pass "tone" filter, over a fixed 50 Hz sine that adds sub weight.
//!
//! # Signal Flow
//!
//! ```text
//!   pitch env ──► BridgedT ──► × amp env ──► low-pass ──┐
//!                                                        ├──► processor
//!   50 Hz sine ─────────────► × amp env × 0.3 ───────────┘
//! ```
//!
//! The pitch jumps half an octave above the base within half a millisecond
//! and falls back to it over about 30 ms. Velocity raises the base pitch by
//! up to 20 Hz, so hard hits sound tighter as well as louder.

use super::{DrumVoice, VoiceCore};
use crate::config::{clamp_param, KickSettings, KICK_DECAY_RANGE, UNIT_RANGE};
use crate::dsp::{BridgedTOscillator, Envelope, Filter, Oscillator};
use crate::synth::ParamId;

const BASE_FREQUENCY: f32 = 60.0;
const VELOCITY_PITCH: f32 = 20.0;
const PITCH_DEPTH: f32 = 0.5;
const SUB_FREQUENCY: f32 = 50.0;
const SUB_MIX: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Kick {
    core: VoiceCore,
    resonator: BridgedTOscillator,
    sub: Oscillator,
    pitch_env: Envelope,
    amp_env: Envelope,
    tone_filter: Filter,
    base_frequency: f32,
    decay_ms: f32,
    tone: f32,
}

impl Kick {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, &KickSettings::default())
    }

    pub fn with_settings(sample_rate: f32, settings: &KickSettings) -> Self {
        let mut kick = Self {
            core: VoiceCore::new(sample_rate, settings.level),
            resonator: BridgedTOscillator::new(sample_rate, BASE_FREQUENCY, settings.decay_ms),
            sub: Oscillator::new(sample_rate).with_frequency(SUB_FREQUENCY),
            pitch_env: Envelope::percussive(sample_rate, 0.5, 30.0),
            amp_env: Envelope::percussive(sample_rate, 1.0, settings.decay_ms),
            tone_filter: Filter::lowpass(sample_rate, 200.0),
            base_frequency: BASE_FREQUENCY,
            decay_ms: settings.decay_ms,
            tone: settings.tone,
        };
        kick.set_decay(settings.decay_ms);
        kick.set_tone(settings.tone);
        kick
    }

    /// Amplitude decay in milliseconds (300..=1200).
    pub fn set_decay(&mut self, decay_ms: f32) {
        self.decay_ms = clamp_param(decay_ms, &KICK_DECAY_RANGE, self.decay_ms);
        self.amp_env.set_decay(self.decay_ms);
        self.resonator.set_decay(self.decay_ms);
    }

    /// Low-pass cutoff from 100 Hz (0.0) to 400 Hz (1.0).
    pub fn set_tone(&mut self, tone: f32) {
        self.tone = clamp_param(tone, &UNIT_RANGE, self.tone);
        self.tone_filter.set_cutoff(100.0 + self.tone * 300.0);
    }

    pub fn decay(&self) -> f32 {
        self.decay_ms
    }

    pub fn tone(&self) -> f32 {
        self.tone
    }
}

impl DrumVoice for Kick {
    fn core(&self) -> &VoiceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VoiceCore {
        &mut self.core
    }

    fn trigger(&mut self, velocity: f32) {
        self.core.start(velocity);
        self.base_frequency = BASE_FREQUENCY + VELOCITY_PITCH * self.core.velocity;

        let now = self.core.now;
        self.resonator.set_frequency(self.base_frequency);
        self.resonator.trigger();
        self.sub.reset_phase();
        self.pitch_env.trigger(now);
        self.amp_env.trigger(now);

        if self.core.reset_filters {
            self.tone_filter.reset();
        }
    }

    fn process(&mut self) -> f32 {
        if !self.core.playing {
            return 0.0;
        }
        let now = self.core.tick();

        // Sweeps down onto the base from above rather than dipping below it
        // and climbing back, which keeps the tuned pitch as the note's tail.
        let sweep = self.pitch_env.value(now);
        self.resonator
            .set_frequency(self.base_frequency * (1.0 + PITCH_DEPTH * sweep));

        let env = self.amp_env.value(now);
        let body = self.tone_filter.process_low_pass(self.resonator.generate() * env);
        let sub = self.sub.sine() * env * SUB_MIX;

        self.core.settle(self.amp_env.is_finished(self.core.now));
        self.core.output(body + sub)
    }

    fn envelope_level(&self) -> f32 {
        self.amp_env.value(self.core.now)
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
