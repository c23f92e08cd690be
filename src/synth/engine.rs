/*
Drum Engine
===========

The engine is the audio side of the kit. It owns the only `DrumMachine`, the
step sequencer and the receiving end of the control queue, and it is the
thing an audio callback pulls samples from.

Two Clocks
----------

    audio rate     one `next_sample()` per output sample (32 768 Hz default)
    control rate   one `control_tick()` every `sample_rate / control_rate`
                   samples (every 128 samples at the defaults)

On each control tick the engine drains every pending control message and
then advances the sequencer by one control period. Messages therefore land
with at most one control period of latency, and none of this work happens
on the other samples.

Control Handoff
---------------

    control thread                       audio thread
    ──────────────                       ────────────
    DrumController::trigger_voice ──►  [ rtrb SPSC ring ]  ──► DrumEngine
                                                              control_tick()

The ring buffer is wait-free on both ends. A full queue is reported to the
control side as `ControlError::QueueFull`; the audio side never blocks and
never sees an error.
*/

#[cfg(feature = "rtrb")]
use rtrb::{Producer, RingBuffer};

use crate::config::DrumKitConfig;
#[cfg(feature = "rtrb")]
use crate::config::ConfigError;
use crate::dsp::processor::to_i16;
#[cfg(feature = "rtrb")]
pub use crate::error::ControlError;
use crate::sequencing::{StepPattern, StepSequencer};
use crate::synth::message::{DrumMessage, MessageReceiver, SequencerCommand};
use crate::synth::{DrumMachine, ParamId, VoiceId};

/// Capacity of the control queue created by [`drum_kit`].
pub const CONTROL_QUEUE_CAPACITY: usize = 256;

pub struct DrumEngine<R: MessageReceiver> {
    machine: DrumMachine,
    sequencer: StepSequencer,
    rx: R,
    control_period: u32,
    control_counter: u32,
}

impl<R: MessageReceiver> DrumEngine<R> {
    /// Build an engine around `rx`. The config is used as given; call
    /// [`DrumKitConfig::validate`] first, or use [`drum_kit`].
    pub fn new(config: &DrumKitConfig, rx: R) -> Self {
        let machine = DrumMachine::new(config);
        let sequencer = StepSequencer::new(config.sample_rate_hz(), config.tempo_bpm)
            .with_pattern(StepPattern::basic_beat());

        Self {
            machine,
            sequencer,
            rx,
            control_period: config.control_period(),
            control_counter: 0,
        }
    }

    /// Pull one sample. Runs the control tick first when one is due.
    #[inline]
    pub fn next_sample_f32(&mut self) -> f32 {
        if self.control_counter == 0 {
            self.control_tick();
        }
        self.control_counter += 1;
        if self.control_counter >= self.control_period {
            self.control_counter = 0;
        }
        self.machine.process()
    }

    /// Pull one 16-bit sample.
    #[inline]
    pub fn next_sample(&mut self) -> i16 {
        to_i16(self.next_sample_f32())
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample_f32();
        }
    }

    pub fn render_block_i16(&mut self, out: &mut [i16]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Drain pending messages, then advance the sequencer by one control
    /// period.
    pub fn control_tick(&mut self) {
        while let Some(msg) = self.rx.pop() {
            self.apply(msg);
        }
        self.sequencer.advance(self.control_period, &mut self.machine);
    }

    fn apply(&mut self, msg: DrumMessage) {
        match msg {
            DrumMessage::Trigger { voice, velocity } => self.machine.trigger(voice, velocity),
            DrumMessage::TriggerHiHat { velocity, open } => {
                self.machine.trigger_hihat(velocity, open)
            }
            DrumMessage::SetParam {
                voice,
                param,
                value,
            } => {
                self.machine.set_param(voice, param, value);
            }
            DrumMessage::SetMasterVolume(volume) => self.machine.set_master_volume(volume),
            DrumMessage::Sequencer(SequencerCommand::Start) => self.sequencer.start(),
            DrumMessage::Sequencer(SequencerCommand::Stop) => self.sequencer.stop(),
            DrumMessage::Sequencer(SequencerCommand::SetTempo(bpm)) => {
                self.sequencer.set_tempo(bpm)
            }
            DrumMessage::SetPattern(pattern) => self.sequencer.set_pattern(pattern),
        }
    }

    pub fn machine(&self) -> &DrumMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut DrumMachine {
        &mut self.machine
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut StepSequencer {
        &mut self.sequencer
    }

    pub fn control_period(&self) -> u32 {
        self.control_period
    }
}

/// Control side of the kit: pushes messages to a [`DrumEngine`].
#[cfg(feature = "rtrb")]
pub struct DrumController {
    tx: Producer<DrumMessage>,
}

#[cfg(feature = "rtrb")]
impl DrumController {
    pub fn send(&mut self, msg: DrumMessage) -> Result<(), ControlError> {
        self.tx.push(msg).map_err(|_| ControlError::QueueFull)
    }

    pub fn trigger_voice(&mut self, voice: VoiceId, velocity: f32) -> Result<(), ControlError> {
        self.send(DrumMessage::Trigger { voice, velocity })
    }

    pub fn trigger_hihat(&mut self, velocity: f32, open: bool) -> Result<(), ControlError> {
        self.send(DrumMessage::TriggerHiHat { velocity, open })
    }

    pub fn set_voice_param(
        &mut self,
        voice: VoiceId,
        param: ParamId,
        value: f32,
    ) -> Result<(), ControlError> {
        self.send(DrumMessage::SetParam {
            voice,
            param,
            value,
        })
    }

    pub fn set_master_volume(&mut self, volume: f32) -> Result<(), ControlError> {
        self.send(DrumMessage::SetMasterVolume(volume))
    }

    pub fn start(&mut self) -> Result<(), ControlError> {
        self.send(DrumMessage::Sequencer(SequencerCommand::Start))
    }

    pub fn stop(&mut self) -> Result<(), ControlError> {
        self.send(DrumMessage::Sequencer(SequencerCommand::Stop))
    }

    pub fn set_tempo(&mut self, bpm: f32) -> Result<(), ControlError> {
        self.send(DrumMessage::Sequencer(SequencerCommand::SetTempo(bpm)))
    }

    pub fn set_pattern(&mut self, pattern: StepPattern) -> Result<(), ControlError> {
        self.send(DrumMessage::SetPattern(pattern))
    }

    /// Free slots in the queue.
    pub fn capacity_left(&self) -> usize {
        self.tx.slots()
    }
}

/// Validate `config` and build a connected engine/controller pair.
#[cfg(feature = "rtrb")]
pub fn drum_kit(
    config: &DrumKitConfig,
) -> Result<(DrumEngine<rtrb::Consumer<DrumMessage>>, DrumController), ConfigError> {
    config.validate()?;
    let (tx, rx) = RingBuffer::new(CONTROL_QUEUE_CAPACITY);
    let engine = DrumEngine::new(config, rx);
    log::info!(
        "drum kit ready: {} Hz, control every {} samples",
        config.sample_rate,
        engine.control_period()
    );
    Ok((engine, DrumController { tx }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::message::NoMessages;

    #[test]
    fn engine_without_messages_is_silent() {
        let mut engine = DrumEngine::new(&DrumKitConfig::default(), NoMessages);
        let mut block = [1i16; 512];
        engine.render_block_i16(&mut block);
        assert!(block.iter().all(|&s| s == 0));
    }

    #[test]
    fn sequencer_fires_on_control_tick() {
        let config = DrumKitConfig::default();
        let mut engine = DrumEngine::new(&config, NoMessages);

        engine.sequencer.start();
        let period = engine.control_period() as usize;
        for _ in 0..period + 1 {
            engine.next_sample_f32();
        }
        assert_eq!(engine.sequencer().current_step(), Some(0));
        assert!(engine.machine().voice(VoiceId::Kick).is_active());
    }
}
