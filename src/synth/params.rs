#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the ten drum voices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceId {
    Kick,
    Snare,
    Cymbal,
    HiHat,
    Tom,
    Conga,
    Rimshot,
    Maracas,
    Clap,
    Cowbell,
}

impl VoiceId {
    pub const COUNT: usize = 10;

    pub const ALL: [VoiceId; Self::COUNT] = [
        VoiceId::Kick,
        VoiceId::Snare,
        VoiceId::Cymbal,
        VoiceId::HiHat,
        VoiceId::Tom,
        VoiceId::Conga,
        VoiceId::Rimshot,
        VoiceId::Maracas,
        VoiceId::Clap,
        VoiceId::Cowbell,
    ];

    /// Position in [`VoiceId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            VoiceId::Kick => "Kick",
            VoiceId::Snare => "Snare",
            VoiceId::Cymbal => "Cymbal",
            VoiceId::HiHat => "Hi-Hat",
            VoiceId::Tom => "Tom",
            VoiceId::Conga => "Conga",
            VoiceId::Rimshot => "Rimshot",
            VoiceId::Maracas => "Maracas",
            VoiceId::Clap => "Clap",
            VoiceId::Cowbell => "Cowbell",
        }
    }

    /// Two-letter label used on the front panel.
    pub fn short_name(self) -> &'static str {
        match self {
            VoiceId::Kick => "BD",
            VoiceId::Snare => "SD",
            VoiceId::Cymbal => "CY",
            VoiceId::HiHat => "HH",
            VoiceId::Tom => "LT",
            VoiceId::Conga => "CG",
            VoiceId::Rimshot => "RS",
            VoiceId::Maracas => "MA",
            VoiceId::Clap => "CP",
            VoiceId::Cowbell => "CB",
        }
    }
}

/// A settable voice parameter.
///
/// Not every voice has every parameter; setting one a voice lacks is a no-op.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Output level, 0..=1
    Level,
    /// Main decay time in milliseconds
    Decay,
    /// Brightness, 0..=1
    Tone,
    /// Pitch in Hz (tom, conga)
    Tuning,
    /// Snare noise amount, 0..=1
    Snappy,
    /// Hi-hat open (>= 0.5) or closed
    Open,
    /// Soft-clip amount, 0 bypasses
    Saturation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for (i, id) in VoiceId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(VoiceId::from_index(i), Some(*id));
        }
        assert_eq!(VoiceId::from_index(VoiceId::COUNT), None);
    }
}
