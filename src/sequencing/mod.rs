pub mod pattern;
pub mod sequencer;

pub use pattern::{PatternError, StepPattern, STEPS};
pub use sequencer::StepSequencer;
