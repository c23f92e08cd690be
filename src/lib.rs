//! TR-808 style drum synthesis.
//!
//! Ten analog voice models (kick, snare, cymbal, hi-hat, tom, conga,
//! rimshot, maracas, clap, cowbell) mixed into one realtime-safe stream.
//! The per-sample path never allocates, locks or logs.

pub mod config;
pub mod dsp;
pub mod error;
pub mod io;
pub mod sequencing; // Step patterns and tempo
pub mod synth; // Drum machine, control messages, engine
pub mod voices;

pub use config::DrumKitConfig;
pub use synth::{DrumMachine, ParamId, VoiceId};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Envelope and decay times are never shorter than this (milliseconds).
pub(crate) const MIN_TIME_MS: f32 = 0.05;

/// Lowest frequency any oscillator or filter is allowed to run at.
pub(crate) const MIN_FREQUENCY_HZ: f32 = 0.01;

/// Level at or below which a voice counts as silent.
pub const SILENCE_THRESHOLD: f32 = 0.001;
