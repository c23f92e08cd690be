//! Kit configuration: sample rate, control rate and per-voice defaults.
//!
//! Everything here is read once when a [`DrumMachine`](crate::synth::DrumMachine)
//! or [`DrumEngine`](crate::synth::DrumEngine) is built. The ranges double as
//! the clamping bounds of the runtime setters on each voice.

use std::ops::RangeInclusive;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::DEFAULT_NOISE_SEED;
pub use crate::error::ConfigError;

pub const DEFAULT_SAMPLE_RATE: u32 = 32_768;
pub const DEFAULT_CONTROL_RATE: u32 = 256;

pub const SAMPLE_RATE_RANGE: RangeInclusive<u32> = 8_000..=192_000;
pub const CONTROL_RATE_RANGE: RangeInclusive<u32> = 32..=1_024;

pub const TEMPO_RANGE: RangeInclusive<f32> = 60.0..=200.0;
pub const UNIT_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const SATURATION_RANGE: RangeInclusive<f32> = 0.0..=10.0;

pub const KICK_DECAY_RANGE: RangeInclusive<f32> = 300.0..=1_200.0;
pub const SNARE_DECAY_RANGE: RangeInclusive<f32> = 20.0..=1_000.0;
pub const CYMBAL_DECAY_RANGE: RangeInclusive<f32> = 500.0..=2_000.0;
pub const HIHAT_DECAY_RANGE: RangeInclusive<f32> = 20.0..=400.0;
pub const TOM_TUNING_RANGE: RangeInclusive<f32> = 120.0..=200.0;
pub const TOM_DECAY_RANGE: RangeInclusive<f32> = 200.0..=800.0;
pub const CONGA_TUNING_RANGE: RangeInclusive<f32> = 250.0..=400.0;
pub const CONGA_DECAY_RANGE: RangeInclusive<f32> = 150.0..=600.0;

/// Clamp `value` into `range`, falling back to `fallback` when it is not a
/// finite number.
#[inline]
pub(crate) fn clamp_param(value: f32, range: &RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}

fn check(name: &'static str, value: f32, range: &RangeInclusive<f32>) -> Result<(), ConfigError> {
    if value.is_finite() && range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickSettings {
    pub decay_ms: f32,
    pub tone: f32,
    pub level: f32,
}

impl Default for KickSettings {
    fn default() -> Self {
        Self {
            decay_ms: 500.0,
            tone: 0.5,
            level: 0.8,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnareSettings {
    pub tone: f32,
    pub snappy: f32,
    pub decay_ms: f32,
    pub level: f32,
}

impl Default for SnareSettings {
    fn default() -> Self {
        Self {
            tone: 0.7,
            snappy: 0.8,
            decay_ms: 150.0,
            level: 0.6,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CymbalSettings {
    pub decay_ms: f32,
    pub tone: f32,
    pub level: f32,
}

impl Default for CymbalSettings {
    fn default() -> Self {
        Self {
            decay_ms: 800.0,
            tone: 0.6,
            level: 0.5,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HiHatSettings {
    pub closed_decay_ms: f32,
    pub open_decay_ms: f32,
    pub tone: f32,
    pub level: f32,
}

impl Default for HiHatSettings {
    fn default() -> Self {
        Self {
            closed_decay_ms: 50.0,
            open_decay_ms: 200.0,
            tone: 0.8,
            level: 0.4,
        }
    }
}

/// Tuned drum (tom or conga).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunedSettings {
    pub tuning_hz: f32,
    pub decay_ms: f32,
    pub level: f32,
}

impl TunedSettings {
    pub fn tom() -> Self {
        Self {
            tuning_hz: 165.0,
            decay_ms: 400.0,
            level: 0.7,
        }
    }

    pub fn conga() -> Self {
        Self {
            tuning_hz: 370.0,
            decay_ms: 300.0,
            level: 0.7,
        }
    }
}

/// Levels of the voices without further settings.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercussionLevels {
    pub rimshot: f32,
    pub maracas: f32,
    pub clap: f32,
    pub cowbell: f32,
}

impl Default for PercussionLevels {
    fn default() -> Self {
        Self {
            rimshot: 0.8,
            maracas: 0.7,
            clap: 0.9,
            cowbell: 0.6,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DrumKitConfig {
    pub sample_rate: u32,
    pub control_rate: u32,
    pub master_volume: f32,
    pub noise_seed: u32,
    /// Zero filter state on every trigger.
    pub reset_filters_on_trigger: bool,
    pub tempo_bpm: f32,

    pub kick: KickSettings,
    pub snare: SnareSettings,
    pub cymbal: CymbalSettings,
    pub hihat: HiHatSettings,
    pub tom: TunedSettings,
    pub conga: TunedSettings,
    pub levels: PercussionLevels,
}

impl Default for DrumKitConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            control_rate: DEFAULT_CONTROL_RATE,
            master_volume: 0.8,
            noise_seed: DEFAULT_NOISE_SEED,
            reset_filters_on_trigger: false,
            tempo_bpm: 120.0,
            kick: KickSettings::default(),
            snare: SnareSettings::default(),
            cymbal: CymbalSettings::default(),
            hihat: HiHatSettings::default(),
            tom: TunedSettings::tom(),
            conga: TunedSettings::conga(),
            levels: PercussionLevels::default(),
        }
    }
}

impl DrumKitConfig {
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn sample_rate_hz(&self) -> f32 {
        self.sample_rate as f32
    }

    /// Audio samples per control tick.
    pub fn control_period(&self) -> u32 {
        (self.sample_rate / self.control_rate.max(1)).max(1)
    }

    /// Check every value against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SAMPLE_RATE_RANGE.contains(&self.sample_rate) {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        if !CONTROL_RATE_RANGE.contains(&self.control_rate) || self.control_rate > self.sample_rate {
            return Err(ConfigError::ControlRate {
                rate: self.control_rate,
                sample_rate: self.sample_rate,
            });
        }

        check("master_volume", self.master_volume, &UNIT_RANGE)?;
        check("tempo_bpm", self.tempo_bpm, &TEMPO_RANGE)?;

        check("kick.decay_ms", self.kick.decay_ms, &KICK_DECAY_RANGE)?;
        check("kick.tone", self.kick.tone, &UNIT_RANGE)?;
        check("kick.level", self.kick.level, &UNIT_RANGE)?;

        check("snare.tone", self.snare.tone, &UNIT_RANGE)?;
        check("snare.snappy", self.snare.snappy, &UNIT_RANGE)?;
        check("snare.decay_ms", self.snare.decay_ms, &SNARE_DECAY_RANGE)?;
        check("snare.level", self.snare.level, &UNIT_RANGE)?;

        check("cymbal.decay_ms", self.cymbal.decay_ms, &CYMBAL_DECAY_RANGE)?;
        check("cymbal.tone", self.cymbal.tone, &UNIT_RANGE)?;
        check("cymbal.level", self.cymbal.level, &UNIT_RANGE)?;

        check("hihat.closed_decay_ms", self.hihat.closed_decay_ms, &HIHAT_DECAY_RANGE)?;
        check("hihat.open_decay_ms", self.hihat.open_decay_ms, &HIHAT_DECAY_RANGE)?;
        check("hihat.tone", self.hihat.tone, &UNIT_RANGE)?;
        check("hihat.level", self.hihat.level, &UNIT_RANGE)?;

        check("tom.tuning_hz", self.tom.tuning_hz, &TOM_TUNING_RANGE)?;
        check("tom.decay_ms", self.tom.decay_ms, &TOM_DECAY_RANGE)?;
        check("tom.level", self.tom.level, &UNIT_RANGE)?;

        check("conga.tuning_hz", self.conga.tuning_hz, &CONGA_TUNING_RANGE)?;
        check("conga.decay_ms", self.conga.decay_ms, &CONGA_DECAY_RANGE)?;
        check("conga.level", self.conga.level, &UNIT_RANGE)?;

        check("levels.rimshot", self.levels.rimshot, &UNIT_RANGE)?;
        check("levels.maracas", self.levels.maracas, &UNIT_RANGE)?;
        check("levels.clap", self.levels.clap, &UNIT_RANGE)?;
        check("levels.cowbell", self.levels.cowbell, &UNIT_RANGE)?;

        debug!(
            "kit config ok: {} Hz audio, {} Hz control, master {:.2}",
            self.sample_rate, self.control_rate, self.master_volume
        );
        Ok(())
    }
}
