// Purpose: the drum machine and everything that drives it
// This layer sits above the voices: mixing, control messages, the engine

pub mod engine;
pub mod machine;
pub mod message;
pub mod params;

#[cfg(feature = "rtrb")]
pub use engine::{drum_kit, DrumController};
pub use engine::DrumEngine;
pub use machine::DrumMachine;
pub use message::{DrumMessage, MessageReceiver, NoMessages, SequencerCommand};
pub use params::{ParamId, VoiceId};
