//! Low-level DSP primitives the drum voices are built from.
//!
//! Every component is allocation-free and owned by value inside a voice.
//! They stay focused on the signal math; the voices decide how to wire them.

/// Decaying sine modeling the bridged-T resonator.
pub mod bridged_t;
/// Linear attack/decay/sustain/release envelope on a sample clock.
pub mod envelope;
/// One-pole low/high-pass and two-pole band-pass.
pub mod filter;
/// Two-sine inharmonic source.
pub mod inharmonic;
/// Oscillator waveforms and noise sources.
pub mod oscillator;
/// Saturation, gain and output conversion.
pub mod processor;

pub use bridged_t::BridgedTOscillator;
pub use envelope::{Envelope, EnvelopeState};
pub use filter::{Filter, FilterType};
pub use inharmonic::InharmonicOscillator;
pub use oscillator::{NoiseGenerator, Oscillator, Waveform};
pub use processor::Processor;
