// Purpose - external interfaces: MIDI decoding and the GM drum map

pub mod converter;
pub mod midi;

pub use converter::{midi_to_drum, note_to_target, DrumTarget};
pub use midi::{MidiEvent, GM_DRUM_CHANNEL};
