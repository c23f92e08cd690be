//! Step sequencer - pattern playback on the control clock
//!
//! The sequencer is advanced by the engine once per control tick with the
//! number of audio samples that tick covers. Steps fire at the first control
//! tick at or after their due time, so timing resolution is one control
//! period (under 4 ms at the default rates).

use super::pattern::{StepPattern, FULL_VELOCITY};
use crate::config::{clamp_param, TEMPO_RANGE};
use crate::synth::{DrumMachine, VoiceId};

/// Velocity scale for hits on unaccented steps.
pub const UNACCENTED_SCALE: f32 = 0.8;

/// Sixteenth notes per beat.
const STEPS_PER_BEAT: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct StepSequencer {
    pattern: StepPattern,
    bpm: f32,
    sample_rate: f64,
    samples_per_step: f64,
    /// Samples left until the next step is due
    countdown: f64,
    /// Step that fires next
    next_step: usize,
    /// Step that fired last, for display
    current_step: Option<usize>,
    playing: bool,
}

impl StepSequencer {
    pub fn new(sample_rate: f32, bpm: f32) -> Self {
        let mut seq = Self {
            pattern: StepPattern::new(),
            bpm: 120.0,
            sample_rate: sample_rate.max(1.0) as f64,
            samples_per_step: 0.0,
            countdown: 0.0,
            next_step: 0,
            current_step: None,
            playing: false,
        };
        seq.set_tempo(bpm);
        seq
    }

    pub fn with_pattern(mut self, pattern: StepPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Tempo in BPM, clamped to 60..=200. Takes effect from the next step.
    pub fn set_tempo(&mut self, bpm: f32) {
        self.bpm = clamp_param(bpm, &TEMPO_RANGE, self.bpm);
        let steps_per_second = self.bpm as f64 / 60.0 * STEPS_PER_BEAT;
        self.samples_per_step = self.sample_rate / steps_per_second;
    }

    pub fn tempo(&self) -> f32 {
        self.bpm
    }

    pub fn samples_per_step(&self) -> f64 {
        self.samples_per_step
    }

    /// Swap the pattern without stopping. Playback wraps if the new pattern
    /// is shorter than the current position.
    pub fn set_pattern(&mut self, pattern: StepPattern) {
        self.pattern = pattern;
        if self.next_step >= self.pattern.len() {
            self.next_step = 0;
        }
    }

    pub fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    pub fn pattern_mut(&mut self) -> &mut StepPattern {
        &mut self.pattern
    }

    /// Play from step 0; the first step fires on the next advance.
    pub fn start(&mut self) {
        self.playing = true;
        self.next_step = 0;
        self.current_step = None;
        self.countdown = 0.0;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.current_step = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_step(&self) -> Option<usize> {
        self.current_step
    }

    /// Move the clock forward by `samples`, firing every step that is due.
    /// Returns the last step fired, if any.
    pub fn advance(&mut self, samples: u32, machine: &mut DrumMachine) -> Option<usize> {
        if !self.playing {
            return None;
        }

        let mut fired = None;
        while self.countdown <= 0.0 {
            let step = self.next_step;
            self.fire(step, machine);
            fired = Some(step);
            self.current_step = Some(step);
            self.next_step = (step + 1) % self.pattern.len().max(1);
            self.countdown += self.samples_per_step;
        }
        self.countdown -= samples as f64;
        fired
    }

    fn fire(&self, step: usize, machine: &mut DrumMachine) {
        let scale = if self.pattern.is_accented(step) {
            1.0
        } else {
            UNACCENTED_SCALE
        };

        for id in VoiceId::ALL {
            let velocity = self.pattern.velocity(id, step);
            if velocity == 0 {
                continue;
            }
            let velocity = velocity as f32 / FULL_VELOCITY as f32 * scale;
            match id {
                VoiceId::HiHat => machine.trigger_hihat(velocity, self.pattern.is_open_hat(step)),
                _ => machine.trigger(id, velocity),
            }
        }
    }
}
