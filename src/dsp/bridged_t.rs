//! Bridged-T resonator model.
//!
//! The 808's tonal voices ring a bridged-T network that is struck by a short
//! pulse. The model here is a decaying sine whose pitch sags slightly while
//! it is loud, which is what gives the kick and toms their "boom":
//!
//!   sample = amp * sin(phase)
//!   phase += 2π * f * (1 - 0.1 * amp) / sr
//!   amp   *= 1 - decay_rate
//!
//! with `decay_rate = 1000 / (decay_ms * sr)`. Once `amp` falls below the
//! silence threshold it snaps to zero.

use std::f32::consts::TAU;

use crate::{MIN_FREQUENCY_HZ, MIN_TIME_MS, SILENCE_THRESHOLD};

/// How far the pitch sags at full amplitude.
const PITCH_SAG: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct BridgedTOscillator {
    sample_rate: f32,
    frequency: f32,
    decay_ms: f32,
    decay_rate: f32,
    amplitude: f32,
    phase: f32,
}

impl BridgedTOscillator {
    pub fn new(sample_rate: f32, frequency: f32, decay_ms: f32) -> Self {
        let mut bt = Self {
            sample_rate: sample_rate.max(1.0),
            frequency: 0.0,
            decay_ms: 0.0,
            decay_rate: 0.0,
            amplitude: 0.0,
            phase: 0.0,
        };
        bt.set_frequency(frequency);
        bt.set_decay(decay_ms);
        bt
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        if frequency.is_finite() {
            self.frequency = frequency.clamp(MIN_FREQUENCY_HZ, self.sample_rate * 0.5);
        }
    }

    pub fn set_decay(&mut self, decay_ms: f32) {
        if !decay_ms.is_finite() {
            return;
        }
        self.decay_ms = decay_ms.max(MIN_TIME_MS);
        self.decay_rate = (1_000.0 / (self.decay_ms * self.sample_rate)).min(1.0);
    }

    /// Strike the network: full amplitude from phase zero.
    pub fn trigger(&mut self) {
        self.amplitude = 1.0;
        self.phase = 0.0;
    }

    #[inline]
    pub fn generate(&mut self) -> f32 {
        if self.amplitude == 0.0 {
            return 0.0;
        }

        let sample = self.amplitude * self.phase.sin();

        let freq = self.frequency * (1.0 - PITCH_SAG * self.amplitude);
        self.phase += TAU * freq / self.sample_rate;
        if self.phase >= TAU {
            self.phase -= TAU;
        }

        self.amplitude *= 1.0 - self.decay_rate;
        if self.amplitude < SILENCE_THRESHOLD {
            self.amplitude = 0.0;
        }

        sample
    }

    pub fn reset(&mut self) {
        self.amplitude = 0.0;
        self.phase = 0.0;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 32_768.0;

    #[test]
    fn silent_until_triggered() {
        let mut bt = BridgedTOscillator::new(SAMPLE_RATE, 60.0, 500.0);
        for _ in 0..100 {
            assert_eq!(bt.generate(), 0.0);
        }
    }

    #[test]
    fn decay_rate_follows_decay_time() {
        let bt = BridgedTOscillator::new(SAMPLE_RATE, 60.0, 500.0);
        let expected = 1_000.0 / (500.0 * SAMPLE_RATE);
        assert!((bt.decay_rate() - expected).abs() < 1e-9);
    }

    #[test]
    fn amplitude_decays_geometrically() {
        let mut bt = BridgedTOscillator::new(SAMPLE_RATE, 100.0, 50.0);
        bt.trigger();
        bt.generate();
        let rate = bt.decay_rate();
        assert!((bt.amplitude() - (1.0 - rate)).abs() < 1e-6);

        let mut prev = bt.amplitude();
        for _ in 0..1_000 {
            bt.generate();
            assert!(bt.amplitude() <= prev);
            prev = bt.amplitude();
        }
    }

    #[test]
    fn snaps_to_silence() {
        let mut bt = BridgedTOscillator::new(SAMPLE_RATE, 100.0, 5.0);
        bt.trigger();
        for _ in 0..(SAMPLE_RATE as usize) {
            bt.generate();
        }
        assert_eq!(bt.amplitude(), 0.0);
        assert_eq!(bt.generate(), 0.0);
    }

    #[test]
    fn first_half_cycle_is_positive() {
        let mut bt = BridgedTOscillator::new(SAMPLE_RATE, 60.0, 500.0);
        bt.trigger();
        assert_eq!(bt.generate(), 0.0, "starts at phase zero");
        for _ in 0..100 {
            assert!(bt.generate() > 0.0);
        }
    }
}
