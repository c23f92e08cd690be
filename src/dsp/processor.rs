//! Output Stage
//!
//! Every voice ends in the same two steps: an optional saturation stage and
//! an output gain.
//!
//! # Saturation
//!
//! A scaled hyperbolic tangent:
//!   output = tanh(x * amount) / amount
//!
//! Dividing by `amount` keeps the small-signal gain at one, so turning the
//! knob up rounds the peaks without making quiet passages louder. An amount
//! of zero (or below) bypasses the stage entirely.
//!
//!   0.0     = Bypassed
//!   0.5-1   = Gentle warmth on the kick body
//!   2-5     = Audible drive
//!
//! # Conversion
//!
//! The mixed output is hard-clipped to [-1, 1] before conversion to 16-bit
//! PCM, which scales by 32767.

/// Saturation followed by gain.
#[derive(Debug, Clone, Copy)]
pub struct Processor {
    gain: f32,
    saturation: f32,
}

impl Default for Processor {
    fn default() -> Self {
        Self {
            gain: 1.0,
            saturation: 0.0,
        }
    }
}

impl Processor {
    pub fn new(gain: f32, saturation: f32) -> Self {
        let mut p = Self::default();
        p.set_gain(gain);
        p.set_saturation(saturation);
        p
    }

    pub fn set_gain(&mut self, gain: f32) {
        if gain.is_finite() {
            self.gain = gain.max(0.0);
        }
    }

    pub fn set_saturation(&mut self, amount: f32) {
        if amount.is_finite() {
            self.saturation = amount.max(0.0);
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    #[inline]
    pub fn process(&self, sample: f32) -> f32 {
        saturate(sample, self.saturation) * self.gain
    }
}

/// `tanh(x * amount) / amount`, or `x` unchanged when `amount <= 0`.
#[inline]
pub fn saturate(sample: f32, amount: f32) -> f32 {
    if amount <= 0.0 {
        sample
    } else {
        (sample * amount).tanh() / amount
    }
}

#[inline]
pub fn hard_clip(sample: f32, threshold: f32) -> f32 {
    sample.clamp(-threshold, threshold)
}

/// Clip to [-1, 1] and scale to 16-bit PCM.
#[inline]
pub fn to_i16(sample: f32) -> i16 {
    (hard_clip(sample, 1.0) * 32_767.0) as i16
}
