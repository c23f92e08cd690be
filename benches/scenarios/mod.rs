//! Drum-kit scenario benchmarks.
//!
//! Whole voices, the ten-voice mix, and the engine with its sequencer and
//! control queue in the loop.

mod mix;
mod voices;

pub use mix::bench_mix;
pub use voices::bench_voices;
