//! One-pole and two-pole filters for shaping drum voices.

/*
Drum Filters
============

The kit needs three shapes, all cheap enough to run a dozen instances per
sample:

  Low-pass    one pole, smooths a signal toward its running average
  High-pass   one pole, keeps only what changes
  Band-pass   two poles, a resonator centered on the cutoff


One-Pole Coefficient
--------------------

Both one-pole shapes share a single coefficient derived from the cutoff:

    ω     = 2π * cutoff / sample_rate
    alpha = ω / (ω + 1)

  Low-pass:   y[n] = alpha * x[n] + (1 - alpha) * y[n-1]
  High-pass:  y[n] = alpha * (x[n] - x[n-1] + y[n-1])

A larger cutoff pushes alpha toward 1: the low-pass follows its input more
closely and the high-pass lets more of it through.


Two-Pole Resonator
------------------

The band-pass places a conjugate pole pair at the center frequency with a
radius set by the bandwidth:

    ω0    = 2π * cutoff / sample_rate
    r     = 1 - (ω0 / Q) / 2         (clamped to [0, 0.9995])
    gamma = -2 r cos ω0
    delta = r²
    beta  = (1 - r²) / 2

    y[n] = beta * (x[n] - x[n-2]) - gamma * y[n-1] - delta * y[n-2]

The zeros at DC and Nyquist (x[n] - x[n-2]) keep the response from passing
either end. The pole radius stays strictly below one so the recursion
always decays. A higher Q moves the poles closer to the unit circle and
narrows the peak.


State
-----

Delay registers persist across samples and across triggers. Calling
`reset()` zeroes them; voices do this on trigger only when configured to,
which is what gives a re-struck voice a clean start instead of the tail of
the previous hit.
*/

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pole radius ceiling for the band-pass resonator.
const MAX_POLE_RADIUS: f32 = 0.9995;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
}

#[derive(Debug, Clone)]
pub struct Filter {
    sample_rate: f32,
    cutoff_hz: f32,
    resonance: f32,

    // one-pole coefficient
    alpha: f32,

    // resonator coefficients
    beta: f32,
    gamma: f32,
    delta: f32,

    // delay registers
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Filter {
    /// A filter at 1 kHz with a resonance of 1.
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            sample_rate: sample_rate.max(1.0),
            cutoff_hz: 1_000.0,
            resonance: 1.0,
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
            delta: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        };
        filter.update_coefficients();
        filter
    }

    pub fn lowpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self::new(sample_rate);
        filter.set_cutoff(cutoff_hz);
        filter
    }

    pub fn highpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self::lowpass(sample_rate, cutoff_hz)
    }

    pub fn bandpass(sample_rate: f32, cutoff_hz: f32, q: f32) -> Self {
        let mut filter = Self::lowpass(sample_rate, cutoff_hz);
        filter.set_resonance(q);
        filter
    }

    /// Clamped to [1 Hz, 0.49 * sample_rate]. At rates too low for that
    /// range to exist the cutoff pins to 1 Hz.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        if !cutoff_hz.is_finite() {
            return;
        }
        let ceiling = (self.sample_rate * 0.49).max(1.0);
        self.cutoff_hz = cutoff_hz.clamp(1.0, ceiling);
        self.update_coefficients();
    }

    /// Band-pass Q. Clamped to [0.1, 50].
    pub fn set_resonance(&mut self, resonance: f32) {
        if !resonance.is_finite() {
            return;
        }
        self.resonance = resonance.clamp(0.1, 50.0);
        self.update_coefficients();
    }

    fn update_coefficients(&mut self) {
        let omega = TAU * self.cutoff_hz / self.sample_rate;
        self.alpha = omega / (omega + 1.0);

        let r = (1.0 - (omega / self.resonance) * 0.5).clamp(0.0, MAX_POLE_RADIUS);
        self.gamma = -2.0 * r * omega.cos();
        self.delta = r * r;
        self.beta = (1.0 - r * r) * 0.5;
    }

    #[inline]
    pub fn process_low_pass(&mut self, input: f32) -> f32 {
        let y = self.alpha * input + (1.0 - self.alpha) * self.y1;
        self.y1 = y;
        y
    }

    #[inline]
    pub fn process_high_pass(&mut self, input: f32) -> f32 {
        let y = self.alpha * (input - self.x1 + self.y1);
        self.x1 = input;
        self.y1 = y;
        y
    }

    #[inline]
    pub fn process_band_pass(&mut self, input: f32) -> f32 {
        let y = self.beta * (input - self.x2) - self.gamma * self.y1 - self.delta * self.y2;
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }

    #[inline]
    pub fn process(&mut self, kind: FilterType, input: f32) -> f32 {
        match kind {
            FilterType::LowPass => self.process_low_pass(input),
            FilterType::HighPass => self.process_high_pass(input),
            FilterType::BandPass => self.process_band_pass(input),
        }
    }

    /// Zero all delay registers.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// True when every delay register is zero.
    pub fn is_cleared(&self) -> bool {
        self.x1 == 0.0 && self.x2 == 0.0 && self.y1 == 0.0 && self.y2 == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 32_768.0;

    fn sine_rms(filter: &mut Filter, kind: FilterType, freq: f32) -> f32 {
        let n = 8_192;
        let settle = 2_048;
        let mut acc = 0.0f32;
        for i in 0..n {
            let x = (TAU * freq * i as f32 / SAMPLE_RATE).sin();
            let y = filter.process(kind, x);
            if i >= settle {
                acc += y * y;
            }
        }
        (acc / (n - settle) as f32).sqrt()
    }

    #[test]
    fn alpha_grows_with_cutoff() {
        let low = Filter::lowpass(SAMPLE_RATE, 100.0);
        let high = Filter::lowpass(SAMPLE_RATE, 5_000.0);
        assert!(low.alpha() < high.alpha());
        assert!(high.alpha() < 1.0);
    }

    #[test]
    fn low_pass_converges_to_dc() {
        let mut f = Filter::lowpass(SAMPLE_RATE, 200.0);
        let mut y = 0.0;
        for _ in 0..10_000 {
            y = f.process_low_pass(1.0);
        }
        assert!((y - 1.0).abs() < 1e-3, "DC should pass a low-pass, got {y}");
    }

    #[test]
    fn high_pass_rejects_dc() {
        let mut f = Filter::highpass(SAMPLE_RATE, 500.0);
        let mut y = 1.0;
        for _ in 0..10_000 {
            y = f.process_high_pass(1.0);
        }
        assert!(y.abs() < 1e-3, "DC should be removed by a high-pass, got {y}");
    }

    #[test]
    fn low_pass_attenuates_highs() {
        let mut pass = Filter::lowpass(SAMPLE_RATE, 300.0);
        let mut stop = Filter::lowpass(SAMPLE_RATE, 300.0);
        let low = sine_rms(&mut pass, FilterType::LowPass, 50.0);
        let high = sine_rms(&mut stop, FilterType::LowPass, 8_000.0);
        assert!(high < low * 0.2, "low={low}, high={high}");
    }

    #[test]
    fn band_pass_peaks_at_center() {
        let center = 4_000.0;
        let rms_at = |freq: f32| {
            let mut f = Filter::bandpass(SAMPLE_RATE, center, 5.0);
            sine_rms(&mut f, FilterType::BandPass, freq)
        };

        let at_center = rms_at(center);
        let below = rms_at(300.0);
        let above = rms_at(12_000.0);
        assert!(at_center > below * 3.0, "center={at_center}, below={below}");
        assert!(at_center > above * 3.0, "center={at_center}, above={above}");
    }

    #[test]
    fn band_pass_is_stable_at_extreme_settings() {
        let mut f = Filter::bandpass(SAMPLE_RATE, 20_000.0, 50.0);
        let mut peak = 0.0f32;
        for i in 0..20_000 {
            let x = if i % 7 == 0 { 1.0 } else { -0.5 };
            let y = f.process_band_pass(x);
            assert!(y.is_finite());
            peak = peak.max(y.abs());
        }
        assert!(peak < 100.0, "resonator blew up: peak {peak}");
    }

    #[test]
    fn cutoff_is_clamped() {
        let mut f = Filter::new(SAMPLE_RATE);
        f.set_cutoff(0.0);
        assert_eq!(f.cutoff(), 1.0);
        f.set_cutoff(1.0e6);
        assert!(f.cutoff() <= SAMPLE_RATE * 0.49);
        f.set_resonance(0.0);
        assert!(f.resonance() >= 0.1);
    }

    #[test]
    fn tiny_sample_rates_pin_the_cutoff() {
        for sr in [0.0, 1.0, 2.0] {
            let mut f = Filter::bandpass(sr, 8_000.0, 1.5);
            assert_eq!(f.cutoff(), 1.0);
            f.set_cutoff(500.0);
            assert_eq!(f.cutoff(), 1.0);
            for _ in 0..64 {
                assert!(f.process_band_pass(1.0).is_finite());
                assert!(f.process_high_pass(1.0).is_finite());
            }
        }
    }

    #[test]
    fn reset_clears_state() {
        let mut f = Filter::bandpass(SAMPLE_RATE, 2_000.0, 2.0);
        for _ in 0..64 {
            f.process_band_pass(0.7);
        }
        assert!(!f.is_cleared());
        f.reset();
        assert!(f.is_cleared());
        assert_eq!(f.process_band_pass(0.0), 0.0);
    }
}
