use tr808_dsp::voices::{DrumVoice, Kick};
use tr808_dsp::{DrumKitConfig, DrumMachine, ParamId, VoiceId};

const SAMPLE_RATE: f32 = 32_768.0;
/// Longest possible hit at the default settings is the cymbal; 4 s covers it.
const RING_LIMIT: usize = 4 * 32_768;

fn render(machine: &mut DrumMachine, len: usize) -> Vec<f32> {
    let mut out = vec![0.0; len];
    machine.render_block(&mut out);
    out
}

#[test]
fn idle_kit_outputs_exact_zero() {
    let mut machine = DrumMachine::default();
    assert!(render(&mut machine, 4_096).iter().all(|&s| s == 0.0));
}

#[test]
fn every_voice_sounds_then_returns_to_silence() {
    for id in VoiceId::ALL {
        let mut machine = DrumMachine::default();
        machine.trigger(id, 1.0);
        assert!(machine.voice(id).is_active(), "{} inactive after trigger", id.name());

        let mut peak = 0.0f32;
        let mut len = 0;
        while machine.is_active() {
            peak = peak.max(machine.process().abs());
            len += 1;
            assert!(len < RING_LIMIT, "{} never went idle", id.name());
        }

        assert!(peak > 0.01, "{} peak {peak} too quiet", id.name());
        assert!(
            render(&mut machine, 512).iter().all(|&s| s == 0.0),
            "{} not silent once idle",
            id.name()
        );
    }
}

fn solo_peak(id: VoiceId, open_hat: bool) -> f32 {
    let mut machine = DrumMachine::default();
    if id == VoiceId::HiHat {
        machine.trigger_hihat(1.0, open_hat);
    } else {
        machine.trigger(id, 1.0);
    }
    render(&mut machine, RING_LIMIT)
        .iter()
        .fold(0.0f32, |peak, s| peak.max(s.abs()))
}

#[test]
fn metallic_voices_hold_their_own_against_the_kick() {
    let kick = solo_peak(VoiceId::Kick, false);
    let metallic = [
        ("cymbal", solo_peak(VoiceId::Cymbal, false)),
        ("closed hat", solo_peak(VoiceId::HiHat, false)),
        ("open hat", solo_peak(VoiceId::HiHat, true)),
        ("cowbell", solo_peak(VoiceId::Cowbell, false)),
    ];
    for (name, peak) in metallic {
        assert!(
            peak > kick / 8.0,
            "{name} peak {peak} buried under kick peak {kick}"
        );
        assert!(peak < kick, "{name} peak {peak} louder than kick {kick}");
    }
}

#[test]
fn full_kit_stays_in_range() {
    let mut machine = DrumMachine::default();
    machine.set_master_volume(1.0);
    for id in VoiceId::ALL {
        machine.set_param(id, ParamId::Level, 1.0);
        machine.set_param(id, ParamId::Saturation, 10.0);
        machine.trigger(id, 1.0);
    }
    let out = render(&mut machine, 16_384);
    assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    assert!(out.iter().any(|s| s.abs() > 0.1));
}

#[test]
fn kick_transient_swings_positive_first() {
    let mut machine = DrumMachine::default();
    machine.trigger_kick(1.0);
    let out = render(&mut machine, 500);

    let (max_at, _) = out
        .iter()
        .enumerate()
        .fold((0, f32::MIN), |acc, (i, &s)| if s > acc.1 { (i, s) } else { acc });
    let (min_at, min) = out
        .iter()
        .enumerate()
        .fold((0, f32::MAX), |acc, (i, &s)| if s < acc.1 { (i, s) } else { acc });

    assert!(min < 0.0, "kick body never swung negative");
    assert!(max_at < min_at);
    assert!(machine.voice(VoiceId::Kick).envelope_level() > 0.9);
}

#[test]
fn master_volume_scales_the_mix() {
    let hit = |volume: f32| {
        let mut machine = DrumMachine::default();
        machine.set_master_volume(volume);
        machine.trigger_kick(1.0);
        machine.trigger_snare(1.0);
        render(&mut machine, 2_048)
    };
    let full = hit(1.0);
    let half = hit(0.5);

    for (f, h) in full.iter().zip(&half) {
        if f.abs() < 1.0 {
            assert!((h - 0.5 * f).abs() < 1e-6);
        }
    }
}

#[test]
fn retrigger_restarts_the_voice() {
    let mut machine = DrumMachine::default();
    machine.trigger_cowbell(1.0);
    render(&mut machine, 1_500);
    let tail = machine.voice(VoiceId::Cowbell).envelope_level();

    machine.trigger_cowbell(1.0);
    render(&mut machine, 40);
    let fresh = machine.voice(VoiceId::Cowbell).envelope_level();
    assert!(fresh > tail, "retrigger level {fresh} not above tail {tail}");
}

#[test]
fn closed_hat_chokes_open_hat() {
    let mut machine = DrumMachine::default();
    machine.trigger_hihat(1.0, true);
    render(&mut machine, 2_000);
    machine.trigger_hihat(1.0, false);
    assert!(!machine.hihat().is_open());

    // The closed decay is far shorter than what remained of the open one
    let mut len = 0;
    while machine.voice(VoiceId::HiHat).is_active() {
        machine.process();
        len += 1;
    }
    assert!(len < (SAMPLE_RATE * 0.2) as usize);
}

#[test]
fn filter_reset_makes_retriggers_repeatable() {
    let first_hit = |kick: &mut Kick| -> Vec<f32> { (0..64).map(|_| kick.process()).collect() };

    let mut fresh = Kick::new(SAMPLE_RATE);
    fresh.trigger(1.0);
    let reference = first_hit(&mut fresh);

    let mut resetting = Kick::new(SAMPLE_RATE);
    resetting.set_filter_reset(true);
    resetting.trigger(1.0);
    (0..300).for_each(|_| {
        resetting.process();
    });
    resetting.trigger(1.0);
    let repeated = first_hit(&mut resetting);
    for (a, b) in reference.iter().zip(&repeated) {
        assert!((a - b).abs() < 1e-5);
    }

    let mut carrying = Kick::new(SAMPLE_RATE);
    carrying.trigger(1.0);
    (0..300).for_each(|_| {
        carrying.process();
    });
    carrying.trigger(1.0);
    let carried = first_hit(&mut carrying);
    assert!(reference
        .iter()
        .zip(&carried)
        .any(|(a, b)| (a - b).abs() > 1e-4));
}

#[test]
fn config_reaches_the_voices() {
    let mut config = DrumKitConfig::default();
    config.kick.decay_ms = 1_000.0;
    config.master_volume = 0.3;
    let machine = DrumMachine::new(&config);
    assert_eq!(machine.kick().decay(), 1_000.0);
    assert_eq!(machine.master_volume(), 0.3);
}

#[test]
fn different_seeds_give_different_noise() {
    let maracas = |seed: u32| {
        let config = DrumKitConfig {
            noise_seed: seed,
            ..Default::default()
        };
        let mut machine = DrumMachine::new(&config);
        machine.trigger_maracas(1.0);
        render(&mut machine, 256)
    };
    assert_eq!(maracas(7), maracas(7));
    assert_ne!(maracas(7), maracas(8));
}
