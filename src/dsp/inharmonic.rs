//! Two sines at a non-integer ratio, used for the rimshot's click.

use std::f32::consts::TAU;

use crate::MIN_FREQUENCY_HZ;

pub const DEFAULT_FREQ_1: f32 = 1_667.0;
pub const DEFAULT_FREQ_2: f32 = 455.0;

#[derive(Debug, Clone)]
pub struct InharmonicOscillator {
    sample_rate: f32,
    freq1: f32,
    freq2: f32,
    phase1: f32,
    phase2: f32,
    inc1: f32,
    inc2: f32,
    mix_ratio: f32,
}

impl InharmonicOscillator {
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            sample_rate: sample_rate.max(1.0),
            freq1: DEFAULT_FREQ_1,
            freq2: DEFAULT_FREQ_2,
            phase1: 0.0,
            phase2: 0.0,
            inc1: 0.0,
            inc2: 0.0,
            mix_ratio: 0.5,
        };
        osc.set_frequencies(DEFAULT_FREQ_1, DEFAULT_FREQ_2);
        osc
    }

    pub fn set_frequencies(&mut self, freq1: f32, freq2: f32) {
        let nyquist = self.sample_rate * 0.5;
        if freq1.is_finite() {
            self.freq1 = freq1.clamp(MIN_FREQUENCY_HZ, nyquist);
        }
        if freq2.is_finite() {
            self.freq2 = freq2.clamp(MIN_FREQUENCY_HZ, nyquist);
        }
        self.inc1 = TAU * self.freq1 / self.sample_rate;
        self.inc2 = TAU * self.freq2 / self.sample_rate;
    }

    /// Weight of the first sine. Clamped to [0, 1].
    pub fn set_mix_ratio(&mut self, ratio: f32) {
        if ratio.is_finite() {
            self.mix_ratio = ratio.clamp(0.0, 1.0);
        }
    }

    #[inline]
    pub fn generate(&mut self) -> f32 {
        let out = self.mix_ratio * self.phase1.sin() + (1.0 - self.mix_ratio) * self.phase2.sin();

        self.phase1 += self.inc1;
        if self.phase1 >= TAU {
            self.phase1 -= TAU;
        }
        self.phase2 += self.inc2;
        if self.phase2 >= TAU {
            self.phase2 -= TAU;
        }

        out
    }

    pub fn reset(&mut self) {
        self.phase1 = 0.0;
        self.phase2 = 0.0;
    }

    pub fn frequencies(&self) -> (f32, f32) {
        (self.freq1, self.freq2)
    }

    pub fn mix_ratio(&self) -> f32 {
        self.mix_ratio
    }
}
