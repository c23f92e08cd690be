use crate::config::{clamp_param, DrumKitConfig, UNIT_RANGE};
use crate::dsp::processor::{hard_clip, to_i16};
use crate::synth::{ParamId, VoiceId};
use crate::voices::{
    voice_seed, Clap, Conga, Cowbell, Cymbal, DrumVoice, HiHat, Kick, Maracas, Rimshot, Snare,
    Tom,
};

/// Exactly one of each voice, summed into one stream.
///
/// `process()` is the whole audio-rate path: every voice advances one sample,
/// the sum is scaled by the master volume and hard-clipped to [-1, 1].
#[derive(Debug, Clone)]
pub struct DrumMachine {
    sample_rate: f32,
    master_volume: f32,

    kick: Kick,
    snare: Snare,
    cymbal: Cymbal,
    hihat: HiHat,
    tom: Tom,
    conga: Conga,
    rimshot: Rimshot,
    maracas: Maracas,
    clap: Clap,
    cowbell: Cowbell,
}

impl Default for DrumMachine {
    fn default() -> Self {
        Self::new(&DrumKitConfig::default())
    }
}

impl DrumMachine {
    /// Build the kit from `config`. Values are clamped, not validated; see
    /// [`DrumKitConfig::validate`] for strict checking.
    pub fn new(config: &DrumKitConfig) -> Self {
        let sr = config.sample_rate_hz().max(1.0);
        let levels = &config.levels;

        let mut machine = Self {
            sample_rate: sr,
            master_volume: 0.8,
            kick: Kick::with_settings(sr, &config.kick),
            snare: Snare::with_settings(sr, &config.snare),
            cymbal: Cymbal::with_settings(sr, &config.cymbal),
            hihat: HiHat::with_settings(sr, &config.hihat),
            tom: Tom::with_settings(sr, &config.tom),
            conga: Conga::with_settings(sr, &config.conga),
            rimshot: Rimshot::with_level(sr, levels.rimshot),
            maracas: Maracas::with_level(sr, levels.maracas),
            clap: Clap::with_level(sr, levels.clap),
            cowbell: Cowbell::with_level(sr, levels.cowbell),
        };

        machine.set_master_volume(config.master_volume);
        machine.reseed(config.noise_seed);
        machine.set_filter_reset(config.reset_filters_on_trigger);
        machine
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn voice(&self, id: VoiceId) -> &dyn DrumVoice {
        match id {
            VoiceId::Kick => &self.kick,
            VoiceId::Snare => &self.snare,
            VoiceId::Cymbal => &self.cymbal,
            VoiceId::HiHat => &self.hihat,
            VoiceId::Tom => &self.tom,
            VoiceId::Conga => &self.conga,
            VoiceId::Rimshot => &self.rimshot,
            VoiceId::Maracas => &self.maracas,
            VoiceId::Clap => &self.clap,
            VoiceId::Cowbell => &self.cowbell,
        }
    }

    pub fn voice_mut(&mut self, id: VoiceId) -> &mut dyn DrumVoice {
        match id {
            VoiceId::Kick => &mut self.kick,
            VoiceId::Snare => &mut self.snare,
            VoiceId::Cymbal => &mut self.cymbal,
            VoiceId::HiHat => &mut self.hihat,
            VoiceId::Tom => &mut self.tom,
            VoiceId::Conga => &mut self.conga,
            VoiceId::Rimshot => &mut self.rimshot,
            VoiceId::Maracas => &mut self.maracas,
            VoiceId::Clap => &mut self.clap,
            VoiceId::Cowbell => &mut self.cowbell,
        }
    }

    // Triggers ----------------------------------------------------------------

    pub fn trigger(&mut self, id: VoiceId, velocity: f32) {
        self.voice_mut(id).trigger(velocity);
    }

    pub fn trigger_kick(&mut self, velocity: f32) {
        self.kick.trigger(velocity);
    }

    pub fn trigger_snare(&mut self, velocity: f32) {
        self.snare.trigger(velocity);
    }

    pub fn trigger_cymbal(&mut self, velocity: f32) {
        self.cymbal.trigger(velocity);
    }

    pub fn trigger_hihat(&mut self, velocity: f32, open: bool) {
        self.hihat.trigger_with(velocity, open);
    }

    pub fn trigger_tom(&mut self, velocity: f32) {
        self.tom.trigger(velocity);
    }

    pub fn trigger_conga(&mut self, velocity: f32) {
        self.conga.trigger(velocity);
    }

    pub fn trigger_rimshot(&mut self, velocity: f32) {
        self.rimshot.trigger(velocity);
    }

    pub fn trigger_maracas(&mut self, velocity: f32) {
        self.maracas.trigger(velocity);
    }

    pub fn trigger_clap(&mut self, velocity: f32) {
        self.clap.trigger(velocity);
    }

    pub fn trigger_cowbell(&mut self, velocity: f32) {
        self.cowbell.trigger(velocity);
    }

    // Audio -------------------------------------------------------------------

    #[inline]
    pub fn process(&mut self) -> f32 {
        let mix = self.kick.process()
            + self.snare.process()
            + self.cymbal.process()
            + self.hihat.process()
            + self.tom.process()
            + self.conga.process()
            + self.rimshot.process()
            + self.maracas.process()
            + self.clap.process()
            + self.cowbell.process();

        hard_clip(mix * self.master_volume, 1.0)
    }

    /// One 16-bit PCM sample.
    #[inline]
    pub fn next_sample(&mut self) -> i16 {
        to_i16(self.process())
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.process();
        }
    }

    pub fn is_active(&self) -> bool {
        VoiceId::ALL.iter().any(|&id| self.voice(id).is_active())
    }

    pub fn active_voices(&self) -> usize {
        VoiceId::ALL
            .iter()
            .filter(|&&id| self.voice(id).is_active())
            .count()
    }

    // Parameters --------------------------------------------------------------

    /// Clamped to [0, 1].
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = clamp_param(volume, &UNIT_RANGE, self.master_volume);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Returns `false` when the voice has no such parameter.
    pub fn set_param(&mut self, id: VoiceId, param: ParamId, value: f32) -> bool {
        self.voice_mut(id).apply_param(param, value)
    }

    pub fn set_filter_reset(&mut self, enabled: bool) {
        for id in VoiceId::ALL {
            self.voice_mut(id).set_filter_reset(enabled);
        }
    }

    /// Restart every noise source from `seed`, salted per voice.
    pub fn reseed(&mut self, seed: u32) {
        for id in VoiceId::ALL {
            self.voice_mut(id).reseed(voice_seed(seed, id.index()));
        }
    }

    pub fn set_kick_decay(&mut self, decay_ms: f32) {
        self.kick.set_decay(decay_ms);
    }

    pub fn set_kick_tone(&mut self, tone: f32) {
        self.kick.set_tone(tone);
    }

    pub fn set_snare_tone(&mut self, tone: f32) {
        self.snare.set_tone(tone);
    }

    pub fn set_snare_snappy(&mut self, snappy: f32) {
        self.snare.set_snappy(snappy);
    }

    pub fn set_cymbal_decay(&mut self, decay_ms: f32) {
        self.cymbal.set_decay(decay_ms);
    }

    pub fn set_cymbal_tone(&mut self, tone: f32) {
        self.cymbal.set_tone(tone);
    }

    pub fn set_hihat_decay(&mut self, decay_ms: f32) {
        self.hihat.set_decay(decay_ms);
    }

    pub fn set_hihat_tone(&mut self, tone: f32) {
        self.hihat.set_tone(tone);
    }

    pub fn set_tom_tuning(&mut self, tuning_hz: f32) {
        self.tom.set_tuning(tuning_hz);
    }

    pub fn set_tom_decay(&mut self, decay_ms: f32) {
        self.tom.set_decay(decay_ms);
    }

    pub fn set_conga_tuning(&mut self, tuning_hz: f32) {
        self.conga.set_tuning(tuning_hz);
    }

    pub fn set_conga_decay(&mut self, decay_ms: f32) {
        self.conga.set_decay(decay_ms);
    }

    pub fn kick(&self) -> &Kick {
        &self.kick
    }

    pub fn hihat(&self) -> &HiHat {
        &self.hihat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_machine_is_silent() {
        let mut machine = DrumMachine::default();
        for _ in 0..256 {
            assert_eq!(machine.process(), 0.0);
        }
        assert_eq!(machine.next_sample(), 0);
        assert!(!machine.is_active());
    }

    #[test]
    fn master_volume_is_clamped() {
        let mut machine = DrumMachine::default();
        machine.set_master_volume(3.0);
        assert_eq!(machine.master_volume(), 1.0);
        machine.set_master_volume(-1.0);
        assert_eq!(machine.master_volume(), 0.0);
        machine.set_master_volume(f32::NAN);
        assert_eq!(machine.master_volume(), 0.0);
    }

    #[test]
    fn trigger_by_id_reaches_voice() {
        let mut machine = DrumMachine::default();
        for id in VoiceId::ALL {
            machine.trigger(id, 1.0);
            assert!(machine.voice(id).is_active(), "{} did not start", id.name());
        }
        assert_eq!(machine.active_voices(), VoiceId::COUNT);
    }

    #[test]
    fn set_param_reports_support() {
        let mut machine = DrumMachine::default();
        assert!(machine.set_param(VoiceId::Kick, ParamId::Decay, 900.0));
        assert_eq!(machine.kick().decay(), 900.0);
        assert!(machine.set_param(VoiceId::Cowbell, ParamId::Level, 0.2));
        assert!(!machine.set_param(VoiceId::Cowbell, ParamId::Tuning, 500.0));
        assert!(machine.set_param(VoiceId::HiHat, ParamId::Open, 1.0));
        assert!(machine.hihat().is_open());
    }

    #[test]
    fn degenerate_sample_rates_still_render() {
        for sample_rate in [0, 1, 2] {
            let config = DrumKitConfig {
                sample_rate,
                ..Default::default()
            };
            let mut machine = DrumMachine::new(&config);
            for id in VoiceId::ALL {
                machine.trigger(id, 1.0);
            }
            let mut block = vec![0.0; 256];
            machine.render_block(&mut block);
            assert!(block.iter().all(|s| (-1.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn same_seed_renders_identically() {
        let render = || {
            let mut machine = DrumMachine::default();
            machine.trigger_snare(1.0);
            machine.trigger_clap(1.0);
            let mut block = vec![0.0; 2_048];
            machine.render_block(&mut block);
            block
        };
        assert_eq!(render(), render());
    }
}
