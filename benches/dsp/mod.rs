//! Benchmarks for low-level DSP primitives.

mod envelope;
mod filter;
mod oscillator;
mod processor;

pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
pub use processor::bench_processor;
