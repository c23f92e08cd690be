/// Channel-voice MIDI messages the kit reacts to. Channels are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
}

/// GM percussion channel (channel 10, 0-based).
pub const GM_DRUM_CHANNEL: u8 = 9;

/// Channel volume controller.
pub const CC_VOLUME: u8 = 7;

impl MidiEvent {
    /// Decode one complete message. Running status and system messages are
    /// not handled; transport framing belongs to the caller.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status & 0x80 == 0 {
            return None;
        }
        let channel = status & 0x0F;
        let data7 = |i: usize| data.get(i).copied().filter(|b| b & 0x80 == 0);

        match status & 0xF0 {
            0x80 => Some(MidiEvent::NoteOff {
                channel,
                key: data7(0)?,
                velocity: data7(1)?,
            }),
            0x90 => Some(MidiEvent::NoteOn {
                channel,
                key: data7(0)?,
                velocity: data7(1)?,
            }),
            0xB0 => Some(MidiEvent::ControlChange {
                channel,
                controller: data7(0)?,
                value: data7(1)?,
            }),
            0xC0 => Some(MidiEvent::ProgramChange {
                channel,
                program: data7(0)?,
            }),
            _ => None,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::ProgramChange { channel, .. } => channel,
        }
    }
}
