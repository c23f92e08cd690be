//! Phase-accumulator oscillator and noise sources.

/*
Phase Accumulator Oscillator
============================

Every tonal source in the kit is built on the same idea: keep a running
phase angle, add a fixed increment each sample, and read a waveform at that
angle.

    phase_increment = 2π * frequency / sample_rate
    phase           = (phase + phase_increment) mod 2π

The phase lives in radians and always stays in [0, 2π). The increment is
recomputed whenever the frequency changes, never per sample.

Waveforms
---------

  Sine      amplitude * sin(phase)
  Square    +amplitude for phase < π, -amplitude otherwise
  Saw       amplitude * (2 * phase / 2π - 1), a rising ramp

The square and saw are naive (not band-limited). At the kit's sample rate
the metallic voices want that grit: the aliasing is part of the sound.

Noise
-----

White noise comes from a 32-bit linear congruential generator:

    state = state * 1664525 + 1013904223   (mod 2^32)

The upper 16 bits are mapped to [-1, 1). The low bits of an LCG have very
short periods, so they are discarded.

Pink noise is approximated with a single smoothing pole on top of the
white source:

    y = 0.98 * y_prev + 0.02 * white

This tilts the spectrum downward. It is not a true 1/f slope, but it
is enough to give the tom and conga "air" a darker body.

The generator state is owned by the oscillator. Two oscillators seeded the
same way produce the same sequence, which keeps every render reproducible.
*/

use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MIN_FREQUENCY_HZ;

/// Seed used when no explicit noise seed is configured.
pub const DEFAULT_NOISE_SEED: u32 = 0x1234_5678;

/// Smoothing pole of the pink noise approximation.
const PINK_POLE: f32 = 0.98;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    WhiteNoise,
    PinkNoise,
}

/// Linear congruential white-noise source.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    state: u32,
}

impl NoiseGenerator {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next sample in [-1, 1).
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        (self.state >> 16) as f32 / 32_768.0 - 1.0
    }

    pub fn reseed(&mut self, seed: u32) {
        self.state = seed;
    }
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

#[derive(Debug, Clone)]
pub struct Oscillator {
    sample_rate: f32,
    frequency: f32,
    phase: f32,
    phase_increment: f32,
    amplitude: f32,
    noise: NoiseGenerator,
    pink_state: f32,
}

impl Oscillator {
    /// A 440 Hz oscillator at unit amplitude.
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            sample_rate: sample_rate.max(1.0),
            frequency: 440.0,
            phase: 0.0,
            phase_increment: 0.0,
            amplitude: 1.0,
            noise: NoiseGenerator::default(),
            pink_state: 0.0,
        };
        osc.set_frequency(440.0);
        osc
    }

    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.set_frequency(frequency);
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.set_amplitude(amplitude);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.noise.reseed(seed);
        self
    }

    /// Set the pitch in Hz. Clamped to (0, Nyquist].
    pub fn set_frequency(&mut self, frequency: f32) {
        let nyquist = self.sample_rate * 0.5;
        self.frequency = if frequency.is_finite() {
            frequency.clamp(MIN_FREQUENCY_HZ, nyquist)
        } else {
            MIN_FREQUENCY_HZ
        };
        self.phase_increment = TAU * self.frequency / self.sample_rate;
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = if amplitude.is_finite() { amplitude } else { 0.0 };
    }

    pub fn reseed(&mut self, seed: u32) {
        self.noise.reseed(seed);
        self.pink_state = 0.0;
    }

    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn advance(&mut self) {
        self.phase += self.phase_increment;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
    }

    #[inline]
    pub fn sine(&mut self) -> f32 {
        self.advance();
        self.amplitude * self.phase.sin()
    }

    #[inline]
    pub fn square(&mut self) -> f32 {
        self.advance();
        if self.phase < PI {
            self.amplitude
        } else {
            -self.amplitude
        }
    }

    #[inline]
    pub fn saw(&mut self) -> f32 {
        self.advance();
        self.amplitude * (2.0 * (self.phase / TAU) - 1.0)
    }

    #[inline]
    pub fn white_noise(&mut self) -> f32 {
        self.amplitude * self.noise.next_bipolar()
    }

    #[inline]
    pub fn pink_noise(&mut self) -> f32 {
        let white = self.noise.next_bipolar();
        self.pink_state = PINK_POLE * self.pink_state + (1.0 - PINK_POLE) * white;
        self.amplitude * self.pink_state
    }

    /// Generate one sample of the given waveform.
    #[inline]
    pub fn next(&mut self, waveform: Waveform) -> f32 {
        match waveform {
            Waveform::Sine => self.sine(),
            Waveform::Square => self.square(),
            Waveform::Saw => self.saw(),
            Waveform::WhiteNoise => self.white_noise(),
            Waveform::PinkNoise => self.pink_noise(),
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn phase_increment(&self) -> f32 {
        self.phase_increment
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}
