//! State shared between the audio callback and the UI thread
//!
//! `PanelInit` is built once before the stream starts. `PanelUpdate` is
//! pushed from the audio callback, so it stays `Copy` and allocation-free.

use tr808_dsp::sequencing::StepPattern;
use tr808_dsp::synth::{DrumEngine, MessageReceiver};
use tr808_dsp::VoiceId;

/// Static state, known before playback starts
#[derive(Clone, Copy, Debug)]
pub struct PanelInit {
    pub sample_rate: f32,
    pub pattern: StepPattern,
    pub bpm: f32,
}

/// Snapshot of the engine taken at the end of each audio callback
#[derive(Clone, Copy, Debug)]
pub struct PanelUpdate {
    pub playing: bool,
    /// Step that fired last
    pub step: Option<usize>,
    pub tempo: f32,
    /// Envelope level per voice, indexed by `VoiceId::index`
    pub levels: [f32; VoiceId::COUNT],
    pub active_voices: usize,
}

impl PanelUpdate {
    pub fn idle(bpm: f32) -> Self {
        Self {
            playing: false,
            step: None,
            tempo: bpm,
            levels: [0.0; VoiceId::COUNT],
            active_voices: 0,
        }
    }

    pub fn capture<R: MessageReceiver>(engine: &DrumEngine<R>) -> Self {
        let machine = engine.machine();
        let sequencer = engine.sequencer();

        let mut levels = [0.0; VoiceId::COUNT];
        for id in VoiceId::ALL {
            levels[id.index()] = machine.voice(id).envelope_level();
        }

        Self {
            playing: sequencer.is_playing(),
            step: sequencer.current_step(),
            tempo: sequencer.tempo(),
            levels,
            active_voices: machine.active_voices(),
        }
    }
}
