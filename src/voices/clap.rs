//! Hand clap voice.
//!
//! Band-passed noise struck three times in quick succession, then left to
//! ring through a slower "reverb" envelope:
//!
//! ```text
//!   saw env    /\      /\      /\
//!             /  \    /  \    /  \
//!   reverb env                 /‾‾‾‾‾‾‾‾‾‾‾‾\_____
//!             0 ms    15 ms   30 ms
//! ```
//!
//! The bursts are scheduled on the voice's sample clock and fired from
//! `process()`, so `trigger()` returns immediately.

use super::{DrumVoice, VoiceCore};
use crate::dsp::{Envelope, Filter, Oscillator};
use crate::synth::ParamId;

/// Burst offsets from the trigger, in milliseconds.
const BURST_OFFSETS_MS: [f32; 3] = [0.0, 15.0, 30.0];
const REVERB_MIX: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct Clap {
    core: VoiceCore,
    noise: Oscillator,
    band: Filter,
    saw_env: Envelope,
    reverb_env: Envelope,
    burst_times: [u64; 3],
    next_burst: usize,
}

impl Clap {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_level(sample_rate, 0.9)
    }

    pub fn with_level(sample_rate: f32, level: f32) -> Self {
        Self {
            core: VoiceCore::new(sample_rate, level),
            noise: Oscillator::new(sample_rate).with_amplitude(0.8),
            band: Filter::bandpass(sample_rate, 1_000.0, 1.0),
            saw_env: Envelope::percussive(sample_rate, 1.0, 10.0),
            reverb_env: Envelope::percussive(sample_rate, 5.0, 100.0),
            burst_times: [0; 3],
            next_burst: BURST_OFFSETS_MS.len(),
        }
    }

    fn bursts_pending(&self) -> bool {
        self.next_burst < self.burst_times.len()
    }

    /// Fire every burst due at `now`. The last one also starts the tail.
    fn fire_bursts(&mut self, now: u64) {
        while self.bursts_pending() && now >= self.burst_times[self.next_burst] {
            self.saw_env.trigger(now);
            self.next_burst += 1;
            if !self.bursts_pending() {
                self.reverb_env.trigger(now);
            }
        }
    }
}

impl DrumVoice for Clap {
    fn core(&self) -> &VoiceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VoiceCore {
        &mut self.core
    }

    fn trigger(&mut self, velocity: f32) {
        self.core.start(velocity);
        let now = self.core.now;
        let sample_rate = self.core.sample_rate;
        self.burst_times = BURST_OFFSETS_MS.map(|ms| now + (ms * sample_rate / 1_000.0) as u64);
        self.next_burst = 0;
        self.reverb_env.reset();

        if self.core.reset_filters {
            self.band.reset();
        }
    }

    fn process(&mut self) -> f32 {
        if !self.core.playing {
            return 0.0;
        }
        let now = self.core.tick();
        self.fire_bursts(now);

        let noise = self.band.process_band_pass(self.noise.white_noise());
        let shape = self.saw_env.value(now) + REVERB_MIX * self.reverb_env.value(now);

        let later = self.core.now;
        let finished = !self.bursts_pending()
            && self.saw_env.is_finished(later)
            && self.reverb_env.is_finished(later);
        self.core.settle(finished);
        self.core.output(noise * shape)
    }

    fn envelope_level(&self) -> f32 {
        let now = self.core.now;
        self.saw_env.value(now) + REVERB_MIX * self.reverb_env.value(now)
    }

    fn set_param(&mut self, _param: ParamId, _value: f32) -> bool {
        false
    }

    fn reseed(&mut self, seed: u32) {
        self.noise.reseed(seed);
    }
}
