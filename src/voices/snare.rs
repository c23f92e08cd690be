//! Snare drum voice.
//!
//! Two detuned bridged-T resonators give the drum head, high-passed white
//! noise gives the snare wires. Each layer has its own envelope; the noise
//! envelope's decay is the "snappy" control.
//!
//! ```text
//!   BridgedT (180 + 40·tone Hz) ─┐
//!                                ├─ ×0.5 ─► × tonal env ─┐
//!   BridgedT (160 + 40·tone Hz) ─┘                        ├──► processor
//!   white noise ─► high-pass 1 kHz ─► × noise env ────────┘
//! ```

use super::{DrumVoice, VoiceCore};
use crate::config::{clamp_param, SnareSettings, SNARE_DECAY_RANGE, UNIT_RANGE};
use crate::dsp::{BridgedTOscillator, Envelope, Filter, Oscillator};
use crate::synth::ParamId;

const NOISE_AMPLITUDE: f32 = 0.7;
const NOISE_CUTOFF: f32 = 1_000.0;

#[derive(Debug, Clone)]
pub struct Snare {
    core: VoiceCore,
    head_high: BridgedTOscillator,
    head_low: BridgedTOscillator,
    noise: Oscillator,
    noise_filter: Filter,
    tonal_env: Envelope,
    noise_env: Envelope,
    tone: f32,
    snappy: f32,
    decay_ms: f32,
}

impl Snare {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, &SnareSettings::default())
    }

    pub fn with_settings(sample_rate: f32, settings: &SnareSettings) -> Self {
        let mut snare = Self {
            core: VoiceCore::new(sample_rate, settings.level),
            head_high: BridgedTOscillator::new(sample_rate, 200.0, settings.decay_ms),
            head_low: BridgedTOscillator::new(sample_rate, 180.0, settings.decay_ms),
            noise: Oscillator::new(sample_rate).with_amplitude(NOISE_AMPLITUDE),
            noise_filter: Filter::highpass(sample_rate, NOISE_CUTOFF),
            tonal_env: Envelope::percussive(sample_rate, 0.1, settings.decay_ms),
            noise_env: Envelope::percussive(sample_rate, 0.1, 25.0),
            tone: settings.tone,
            snappy: settings.snappy,
            decay_ms: settings.decay_ms,
        };
        snare.set_tone(settings.tone);
        snare.set_snappy(settings.snappy);
        snare.set_decay(settings.decay_ms);
        snare
    }

    /// Head pitch: 180/160 Hz at 0.0 up to 220/200 Hz at 1.0.
    pub fn set_tone(&mut self, tone: f32) {
        self.tone = clamp_param(tone, &UNIT_RANGE, self.tone);
        self.head_high.set_frequency(180.0 + self.tone * 40.0);
        self.head_low.set_frequency(160.0 + self.tone * 40.0);
    }

    /// Noise decay from 10 ms (0.0) to 60 ms (1.0).
    pub fn set_snappy(&mut self, snappy: f32) {
        self.snappy = clamp_param(snappy, &UNIT_RANGE, self.snappy);
        self.noise_env.set_decay(10.0 + self.snappy * 50.0);
    }

    /// Head decay in milliseconds (20..=1000).
    pub fn set_decay(&mut self, decay_ms: f32) {
        self.decay_ms = clamp_param(decay_ms, &SNARE_DECAY_RANGE, self.decay_ms);
        self.tonal_env.set_decay(self.decay_ms);
        self.head_high.set_decay(self.decay_ms);
        self.head_low.set_decay(self.decay_ms);
    }

    pub fn tone(&self) -> f32 {
        self.tone
    }

    pub fn snappy(&self) -> f32 {
        self.snappy
    }

    pub fn decay(&self) -> f32 {
        self.decay_ms
    }
}

impl DrumVoice for Snare {
    fn core(&self) -> &VoiceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VoiceCore {
        &mut self.core
    }

    fn trigger(&mut self, velocity: f32) {
        self.core.start(velocity);
        let now = self.core.now;
        self.head_high.trigger();
        self.head_low.trigger();
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

        let head = (self.head_high.generate() + self.head_low.generate()) * 0.5;
        let tonal = head * self.tonal_env.value(now);

        let wires = self.noise_filter.process_high_pass(self.noise.white_noise());
        let noise = wires * self.noise_env.value(now);

        let later = self.core.now;
        self.core
            .settle(self.tonal_env.is_finished(later) && self.noise_env.is_finished(later));
        self.core.output(tonal + noise)
    }

    fn envelope_level(&self) -> f32 {
        let now = self.core.now;
        self.tonal_env.value(now).max(self.noise_env.value(now))
    }

    fn set_param(&mut self, param: ParamId, value: f32) -> bool {
        match param {
            ParamId::Tone => self.set_tone(value),
            ParamId::Snappy => self.set_snappy(value),
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
    use crate::voices::test_util::{check_lifecycle, ms_to_samples, run_to_idle, SAMPLE_RATE};

    #[test]
    fn lifecycle_follows_longer_envelope() {
        let mut snare = Snare::new(SAMPLE_RATE);
        check_lifecycle(&mut snare, ms_to_samples(0.1) + ms_to_samples(150.0));
    }

    #[test]
    fn snappy_stretches_noise_tail() {
        let mut tight = Snare::new(SAMPLE_RATE);
        let mut loose = Snare::new(SAMPLE_RATE);
        tight.set_decay(20.0);
        loose.set_decay(20.0);
        tight.set_snappy(0.0);
        loose.set_snappy(1.0);

        tight.trigger(1.0);
        loose.trigger(1.0);
        let (tight_len, _) = run_to_idle(&mut tight, 10_000);
        let (loose_len, _) = run_to_idle(&mut loose, 10_000);
        assert!(
            loose_len > tight_len,
            "snappy should lengthen the noise: tight={tight_len}, loose={loose_len}"
        );
    }

    #[test]
    fn same_seed_same_hit() {
        let mut a = Snare::new(SAMPLE_RATE);
        let mut b = Snare::new(SAMPLE_RATE);
        a.reseed(7);
        b.reseed(7);
        a.trigger(0.9);
        b.trigger(0.9);
        for _ in 0..1_000 {
            assert_eq!(a.process(), b.process());
        }
    }
}
