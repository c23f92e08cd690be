//! Error types for the drum kit.
//!
//! Errors only exist on setup and control paths. The per-sample path never
//! fails: runtime setters clamp their input instead.

use thiserror::Error;

/// Invalid kit configuration, reported when an engine is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sample rate outside the supported range
    #[error("Sample rate {0} Hz is outside 8000..=192000")]
    SampleRate(u32),

    /// Control rate outside its range or faster than the audio rate
    #[error("Control rate {rate} Hz must be within 32..=1024 and not above the sample rate ({sample_rate} Hz)")]
    ControlRate { rate: u32, sample_rate: u32 },

    /// A parameter outside its documented range
    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Failure to hand a message to the audio side.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// The control queue is full; the audio side is not draining it
    #[error("Control queue is full")]
    QueueFull,
}

/// Bad step-pattern input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Step index past the end of the pattern
    #[error("Step {0} is out of range (patterns hold 16 steps)")]
    StepOutOfRange(usize),

    /// Pattern length outside 1..=16
    #[error("Pattern length {0} must be within 1..=16")]
    InvalidLength(usize),

    /// Unrecognized character in a lane string
    #[error("Unexpected '{ch}' at step {step} (use x, X, '.' or '-')")]
    InvalidStep { ch: char, step: usize },

    /// Lane string longer than a pattern
    #[error("Lane has {0} steps, at most 16 are allowed")]
    LaneTooLong(usize),
}
