use crate::{MIN_TIME_MS, SILENCE_THRESHOLD};

/*
Time-Based Linear Envelope
==========================

The drum envelopes are percussive: a short linear attack, a linear decay to
the sustain level, then a flat hold. Release exists but the kit rarely uses
it; the voices decay to a zero sustain and silence themselves.

Vocabulary
----------

  now         The owning voice's sample clock (samples since the voice was
              created). Every query takes the clock explicitly.

  marks       Absolute sample positions captured on trigger:
                start        when the hit began
                attack_end   start + attack length
                decay_end    attack_end + decay length

  level       The value at a given `now`. Computed on demand, never stored.


The Shape
---------

  Level
    1.0 ┐  ╱╲
        │ ╱  ╲
    S   │╱    ╲__________________
    0.0 └───────────────────────→ now
        start  attack_end  decay_end

    attack   level = elapsed / attack_len                   0 → 1
    decay    level = 1 - (1 - S) * (elapsed' / decay_len)   1 → S
    sustain  level = S

Why a Pure Function of Time
---------------------------

`value(now)` takes `&self`. Querying it once, twice or not at all in a given
sample leaves the envelope untouched, so a voice can read the same envelope
for its output and for its silence check without skewing either.

Lengths are captured at trigger time. Changing the decay while a hit rings
takes effect on the next trigger, matching how a knob turn on the hardware
is heard on the next note.

Release
-------

`release(now)` snapshots the current level and ramps it linearly to zero
over the release time, starting from wherever the envelope was.
*/

/// The stage of the envelope at a given point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // never triggered, or stopped
    Attack,  // ramping 0 → 1
    Decay,   // ramping 1 → sustain
    Sustain, // holding the sustain level
    Release, // ramping from the release snapshot → 0
}

#[derive(Debug, Clone)]
pub struct Envelope {
    sample_rate: f32,

    // Shape parameters (milliseconds / level)
    attack_ms: f32,
    decay_ms: f32,
    release_ms: f32,
    sustain_level: f32,

    // Marks captured on trigger
    active: bool,
    start: u64,
    attack_end: u64,
    decay_end: u64,
    attack_len: f32,
    decay_len: f32,

    // Release snapshot: (start sample, level at release, length in samples)
    release: Option<(u64, f32, f32)>,
}

impl Envelope {
    /// 1 ms attack, 100 ms decay, 0.7 sustain, 100 ms release.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1.0),
            attack_ms: 1.0,
            decay_ms: 100.0,
            release_ms: 100.0,
            sustain_level: 0.7,
            active: false,
            start: 0,
            attack_end: 0,
            decay_end: 0,
            attack_len: 1.0,
            decay_len: 1.0,
            release: None,
        }
    }

    /// Percussive shape: attack then decay to silence.
    pub fn percussive(sample_rate: f32, attack_ms: f32, decay_ms: f32) -> Self {
        let mut env = Self::new(sample_rate);
        env.set_attack(attack_ms);
        env.set_decay(decay_ms);
        env.set_sustain(0.0);
        env
    }

    pub fn set_attack(&mut self, time_ms: f32) {
        self.attack_ms = sanitize_time(time_ms, self.attack_ms);
    }

    pub fn set_decay(&mut self, time_ms: f32) {
        self.decay_ms = sanitize_time(time_ms, self.decay_ms);
    }

    pub fn set_release(&mut self, time_ms: f32) {
        self.release_ms = sanitize_time(time_ms, self.release_ms);
    }

    pub fn set_sustain(&mut self, level: f32) {
        if level.is_finite() {
            self.sustain_level = level.clamp(0.0, 1.0);
        }
    }

    #[inline]
    fn ms_to_samples(&self, time_ms: f32) -> f32 {
        (time_ms * self.sample_rate / 1_000.0).max(1.0)
    }

    /// Start a new hit at `now`. Restarts from zero regardless of stage.
    pub fn trigger(&mut self, now: u64) {
        self.attack_len = self.ms_to_samples(self.attack_ms);
        self.decay_len = self.ms_to_samples(self.decay_ms);

        self.active = true;
        self.start = now;
        self.attack_end = now + self.attack_len.ceil() as u64;
        self.decay_end = self.attack_end + self.decay_len.ceil() as u64;
        self.release = None;
    }

    /// Ramp from the current level down to zero over the release time.
    pub fn release(&mut self, now: u64) {
        if !self.active {
            return;
        }
        let level = self.value(now);
        let len = self.ms_to_samples(self.release_ms);
        self.release = Some((now, level, len));
    }

    /// Level at `now`. Pure: never changes the envelope.
    pub fn value(&self, now: u64) -> f32 {
        if !self.active {
            return 0.0;
        }

        if let Some((released_at, from, len)) = self.release {
            let elapsed = now.saturating_sub(released_at) as f32;
            return (from * (1.0 - elapsed / len)).max(0.0);
        }

        if now < self.attack_end {
            let elapsed = now.saturating_sub(self.start) as f32;
            (elapsed / self.attack_len).min(1.0)
        } else if now < self.decay_end {
            let elapsed = (now - self.attack_end) as f32;
            let progress = (elapsed / self.decay_len).min(1.0);
            1.0 - (1.0 - self.sustain_level) * progress
        } else {
            self.sustain_level
        }
    }

    pub fn state(&self, now: u64) -> EnvelopeState {
        if !self.active {
            EnvelopeState::Idle
        } else if self.release.is_some() {
            EnvelopeState::Release
        } else if now < self.attack_end {
            EnvelopeState::Attack
        } else if now < self.decay_end {
            EnvelopeState::Decay
        } else {
            EnvelopeState::Sustain
        }
    }

    /// Triggered and still above the silence threshold.
    pub fn is_note_active(&self, now: u64) -> bool {
        self.active && self.value(now) > SILENCE_THRESHOLD
    }

    /// Past the attack and at or below the silence threshold.
    ///
    /// The attack starts from zero, so the threshold alone would report a
    /// fresh hit as finished on its very first sample.
    pub fn is_finished(&self, now: u64) -> bool {
        if !self.active {
            return true;
        }
        let rising = self.release.is_none() && now < self.attack_end;
        !rising && self.value(now) <= SILENCE_THRESHOLD
    }

    /// Back to idle.
    pub fn reset(&mut self) {
        self.active = false;
        self.release = None;
    }

    pub fn attack(&self) -> f32 {
        self.attack_ms
    }

    pub fn decay(&self) -> f32 {
        self.decay_ms
    }

    pub fn sustain(&self) -> f32 {
        self.sustain_level
    }

    /// Total attack + decay length in samples as of the last trigger.
    pub fn length_samples(&self) -> u64 {
        self.decay_end.saturating_sub(self.start)
    }
}

fn sanitize_time(time_ms: f32, fallback: f32) -> f32 {
    if time_ms.is_finite() {
        time_ms.max(MIN_TIME_MS)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    #[test]
    fn idle_until_triggered() {
        let env = Envelope::percussive(SAMPLE_RATE, 1.0, 100.0);
        assert_eq!(env.value(0), 0.0);
        assert_eq!(env.value(500), 0.0);
        assert!(matches!(env.state(10), EnvelopeState::Idle));
        assert!(!env.is_note_active(10));
    }

    #[test]
    fn attack_is_non_decreasing() {
        let mut env = Envelope::percussive(SAMPLE_RATE, 50.0, 100.0);
        env.trigger(100);

        let mut prev = 0.0;
        for now in 100..150 {
            let level = env.value(now);
            assert!(level >= prev, "attack went down at {now}: {prev} -> {level}");
            prev = level;
        }
        assert!(env.value(150) > 0.99, "attack should reach full level");
    }

    #[test]
    fn decay_is_non_increasing_toward_sustain() {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_attack(5.0);
        env.set_decay(50.0);
        env.set_sustain(0.4);
        env.trigger(0);

        let mut prev = 1.0;
        for now in 5..80 {
            let level = env.value(now);
            assert!(level <= prev + 1e-6, "decay went up at {now}");
            assert!(level >= 0.4 - 1e-6);
            prev = level;
        }
        assert!(matches!(env.state(80), EnvelopeState::Sustain));
        assert!((env.value(1_000) - 0.4).abs() < 1e-6, "sustain should hold");
    }

    #[test]
    fn value_is_idempotent() {
        let mut env = Envelope::percussive(SAMPLE_RATE, 2.0, 30.0);
        env.trigger(0);
        for now in 0..40 {
            let a = env.value(now);
            let b = env.value(now);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn finished_only_after_attack() {
        let mut env = Envelope::percussive(SAMPLE_RATE, 5.0, 20.0);
        env.trigger(0);
        assert!(!env.is_finished(0), "fresh hit must not count as finished");
        assert!(!env.is_finished(10));
        assert!(env.is_finished(25));
        assert!(env.is_finished(10_000));
    }

    #[test]
    fn retrigger_restarts_from_zero() {
        let mut env = Envelope::percussive(SAMPLE_RATE, 10.0, 100.0);
        env.trigger(0);
        assert!(env.value(50) > 0.5);

        env.trigger(50);
        assert_eq!(env.value(50), 0.0);
        assert!(matches!(env.state(51), EnvelopeState::Attack));
    }

    #[test]
    fn release_ramps_to_zero_from_current_level() {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_attack(1.0);
        env.set_decay(10.0);
        env.set_sustain(0.5);
        env.set_release(20.0);
        env.trigger(0);

        env.release(100);
        assert!((env.value(100) - 0.5).abs() < 1e-6);
        assert!((env.value(110) - 0.25).abs() < 1e-6);
        assert_eq!(env.value(120), 0.0);
        assert!(matches!(env.state(105), EnvelopeState::Release));
        assert!(env.is_finished(120));
    }

    #[test]
    fn non_positive_times_are_clamped() {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_decay(0.0);
        assert!(env.decay() > 0.0);
        env.set_attack(-3.0);
        assert!(env.attack() > 0.0);
        env.set_decay(f32::INFINITY);
        assert!(env.decay().is_finite());

        env.trigger(0);
        for now in 0..10 {
            assert!(env.value(now).is_finite());
        }
    }
}
