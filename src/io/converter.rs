use crate::io::midi::{MidiEvent, CC_VOLUME};
use crate::synth::{DrumMessage, VoiceId};

/// Where a GM percussion note lands in the kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrumTarget {
    Voice(VoiceId),
    HiHat { open: bool },
}

/// General MIDI percussion note to kit voice.
pub fn note_to_target(note: u8) -> Option<DrumTarget> {
    let target = match note {
        35 | 36 => DrumTarget::Voice(VoiceId::Kick),
        37 => DrumTarget::Voice(VoiceId::Rimshot),
        38 | 40 => DrumTarget::Voice(VoiceId::Snare),
        39 => DrumTarget::Voice(VoiceId::Clap),
        42 | 44 => DrumTarget::HiHat { open: false },
        46 => DrumTarget::HiHat { open: true },
        41 | 43 | 45 | 47 | 48 | 50 => DrumTarget::Voice(VoiceId::Tom),
        49 | 51 | 52 | 55 | 57 => DrumTarget::Voice(VoiceId::Cymbal),
        56 => DrumTarget::Voice(VoiceId::Cowbell),
        62..=64 => DrumTarget::Voice(VoiceId::Conga),
        70 | 82 => DrumTarget::Voice(VoiceId::Maracas),
        _ => return None,
    };
    Some(target)
}

/// Map a MIDI event on `channel_filter` to a control message.
///
/// Note-on with velocity 0 is a note-off and, like every note-off, is
/// ignored: drum voices decay on their own.
pub fn midi_to_drum(midi: MidiEvent, channel_filter: u8) -> Option<DrumMessage> {
    if midi.channel() != channel_filter {
        return None;
    }

    match midi {
        MidiEvent::NoteOn { key, velocity, .. } if velocity > 0 => {
            let velocity = velocity as f32 / 127.0;
            match note_to_target(key) {
                Some(DrumTarget::Voice(voice)) => Some(DrumMessage::Trigger { voice, velocity }),
                Some(DrumTarget::HiHat { open }) => {
                    Some(DrumMessage::TriggerHiHat { velocity, open })
                }
                None => {
                    log::debug!("no drum mapped to note {key}");
                    None
                }
            }
        }
        MidiEvent::ControlChange {
            controller: CC_VOLUME,
            value,
            ..
        } => Some(DrumMessage::SetMasterVolume(value as f32 / 127.0)),
        _ => None,
    }
}
