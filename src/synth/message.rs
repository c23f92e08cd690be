#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::sequencing::StepPattern;
use crate::synth::{ParamId, VoiceId};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SequencerCommand {
    Start,
    Stop,
    SetTempo(f32),
}

/// Control messages handed from the control side to the audio side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrumMessage {
    Trigger { voice: VoiceId, velocity: f32 },
    TriggerHiHat { velocity: f32, open: bool },
    SetParam { voice: VoiceId, param: ParamId, value: f32 },
    SetMasterVolume(f32),
    Sequencer(SequencerCommand),
    SetPattern(StepPattern),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<DrumMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<DrumMessage> {
    fn pop(&mut self) -> Option<DrumMessage> {
        Consumer::pop(self).ok()
    }
}

/// Receiver that never yields a message, for engines driven only by the
/// sequencer or by direct calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMessages;

impl MessageReceiver for NoMessages {
    fn pop(&mut self) -> Option<DrumMessage> {
        None
    }
}
