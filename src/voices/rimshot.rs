//! Rimshot voice.
//!
//! The inharmonic two-sine source through an 800 Hz high-pass, gated by a
//! 10 ms envelope. The phases restart on every hit so each click has the
//! same attack.

use super::{DrumVoice, VoiceCore};
use crate::dsp::{Envelope, Filter, InharmonicOscillator};
use crate::synth::ParamId;

#[derive(Debug, Clone)]
pub struct Rimshot {
    core: VoiceCore,
    source: InharmonicOscillator,
    highpass: Filter,
    env: Envelope,
}

impl Rimshot {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_level(sample_rate, 0.8)
    }

    pub fn with_level(sample_rate: f32, level: f32) -> Self {
        Self {
            core: VoiceCore::new(sample_rate, level),
            source: InharmonicOscillator::new(sample_rate),
            highpass: Filter::highpass(sample_rate, 800.0),
            env: Envelope::percussive(sample_rate, 1.0, 10.0),
        }
    }
}

impl DrumVoice for Rimshot {
    fn core(&self) -> &VoiceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VoiceCore {
        &mut self.core
    }

    fn trigger(&mut self, velocity: f32) {
        self.core.start(velocity);
        self.source.reset();
        self.env.trigger(self.core.now);

        if self.core.reset_filters {
            self.highpass.reset();
        }
    }

    fn process(&mut self) -> f32 {
        if !self.core.playing {
            return 0.0;
        }
        let now = self.core.tick();

        let click = self.highpass.process_high_pass(self.source.generate());
        let out = click * self.env.value(now);

        self.core.settle(self.env.is_finished(self.core.now));
        self.core.output(out)
    }

    fn envelope_level(&self) -> f32 {
        self.env.value(self.core.now)
    }

    fn set_param(&mut self, _param: ParamId, _value: f32) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::test_util::{check_lifecycle, ms_to_samples, SAMPLE_RATE};

    #[test]
    fn short_snap() {
        let mut rim = Rimshot::new(SAMPLE_RATE);
        check_lifecycle(&mut rim, ms_to_samples(1.0) + ms_to_samples(10.0));
    }

    #[test]
    fn hits_are_identical_with_reset_filters() {
        let mut rim = Rimshot::new(SAMPLE_RATE);
        rim.set_filter_reset(true);

        rim.trigger(1.0);
        let first: Vec<f32> = (0..200).map(|_| rim.process()).collect();
        rim.trigger(1.0);
        let second: Vec<f32> = (0..200).map(|_| rim.process()).collect();
        assert_eq!(first, second);
    }
}
