/*
Step Patterns
=============

A pattern is one bar of 16 sixteenth-note steps, laid out the way the 808's
front panel shows it: one lane per voice, one column per step.

    BD  X . . . x . . . X . . . x . . .
    SD  . . . . X . . . . . . . X . . .
    HH  x . x . x . x . x . x . x . x .

Each cell holds a velocity (0-127, 0 is a rest). Two per-step flags sit
alongside the lanes:

  accent    the step plays at full velocity; unaccented hits are scaled
            down so the accent stands out
  open hat  a hi-hat hit on this step is an open hat

A pattern can be shorter than 16 steps; the sequencer wraps at `len()`.

Lane Strings
------------

`parse_lane` fills one lane from text:

    x   hit at the default velocity (100)
    X   full hit (127)
    .   rest
    -   rest

Spaces and '|' are ignored so lanes can be grouped by beat.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::error::PatternError;
use crate::synth::VoiceId;

pub const STEPS: usize = 16;
pub const DEFAULT_VELOCITY: u8 = 100;
pub const FULL_VELOCITY: u8 = 127;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPattern {
    lanes: [[u8; STEPS]; VoiceId::COUNT],
    accents: [bool; STEPS],
    open_hat: [bool; STEPS],
    length: usize,
}

impl Default for StepPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl StepPattern {
    /// An empty 16-step pattern.
    pub fn new() -> Self {
        Self {
            lanes: [[0; STEPS]; VoiceId::COUNT],
            accents: [false; STEPS],
            open_hat: [false; STEPS],
            length: STEPS,
        }
    }

    /// Four on the floor with backbeat snares and eighth-note hats.
    pub fn basic_beat() -> Self {
        let mut pattern = Self::new();
        let kicks = [(0, 127), (4, 100), (8, 110), (12, 95)];
        for (step, velocity) in kicks {
            pattern.lanes[VoiceId::Kick.index()][step] = velocity;
        }
        pattern.lanes[VoiceId::Snare.index()][4] = 110;
        pattern.lanes[VoiceId::Snare.index()][12] = 105;
        for step in (0..STEPS).step_by(2) {
            pattern.lanes[VoiceId::HiHat.index()][step] = 80;
        }
        pattern.accents[0] = true;
        pattern.accents[8] = true;
        pattern
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(|lane| lane[..self.length].iter().all(|&v| v == 0))
    }

    pub fn set_length(&mut self, length: usize) -> Result<(), PatternError> {
        if !(1..=STEPS).contains(&length) {
            return Err(PatternError::InvalidLength(length));
        }
        self.length = length;
        Ok(())
    }

    fn check_step(step: usize) -> Result<(), PatternError> {
        if step < STEPS {
            Ok(())
        } else {
            Err(PatternError::StepOutOfRange(step))
        }
    }

    /// Velocity 0-127 (clamped); 0 clears the step.
    pub fn set_step(&mut self, voice: VoiceId, step: usize, velocity: u8) -> Result<(), PatternError> {
        Self::check_step(step)?;
        self.lanes[voice.index()][step] = velocity.min(FULL_VELOCITY);
        Ok(())
    }

    /// Flip a step between a rest and a default hit.
    pub fn toggle_step(&mut self, voice: VoiceId, step: usize) -> Result<(), PatternError> {
        Self::check_step(step)?;
        let cell = &mut self.lanes[voice.index()][step];
        *cell = if *cell == 0 { DEFAULT_VELOCITY } else { 0 };
        Ok(())
    }

    pub fn set_accent(&mut self, step: usize, accent: bool) -> Result<(), PatternError> {
        Self::check_step(step)?;
        self.accents[step] = accent;
        Ok(())
    }

    pub fn set_open_hat(&mut self, step: usize, open: bool) -> Result<(), PatternError> {
        Self::check_step(step)?;
        self.open_hat[step] = open;
        Ok(())
    }

    /// Velocity at `step`, 0 for rests or steps past the end.
    pub fn velocity(&self, voice: VoiceId, step: usize) -> u8 {
        self.lanes[voice.index()].get(step).copied().unwrap_or(0)
    }

    pub fn is_accented(&self, step: usize) -> bool {
        self.accents.get(step).copied().unwrap_or(false)
    }

    pub fn is_open_hat(&self, step: usize) -> bool {
        self.open_hat.get(step).copied().unwrap_or(false)
    }

    pub fn clear(&mut self) {
        *self = Self {
            length: self.length,
            ..Self::new()
        };
    }

    /// Replace one lane from a lane string. Steps past the string are rests.
    pub fn parse_lane(&mut self, voice: VoiceId, text: &str) -> Result<(), PatternError> {
        let mut lane = [0u8; STEPS];
        let mut step = 0;

        for ch in text.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            if step >= STEPS {
                let total = text.chars().filter(|c| !c.is_whitespace() && *c != '|').count();
                return Err(PatternError::LaneTooLong(total));
            }
            lane[step] = match ch {
                'x' => DEFAULT_VELOCITY,
                'X' => FULL_VELOCITY,
                '.' | '-' => 0,
                _ => return Err(PatternError::InvalidStep { ch, step }),
            };
            step += 1;
        }

        self.lanes[voice.index()] = lane;
        log::debug!("parsed {} lane: {} steps", voice.name(), step);
        Ok(())
    }

    /// Render a lane back to text (`X` full, `x` other hits, `.` rests).
    pub fn lane_string(&self, voice: VoiceId) -> String {
        self.lanes[voice.index()][..self.length]
            .iter()
            .map(|&v| match v {
                0 => '.',
                FULL_VELOCITY => 'X',
                _ => 'x',
            })
            .collect()
    }
}
