use crate::dsp::Oscillator;

/// Square-wave frequencies of the 808's metallic source, in Hz.
///
/// The ratios are deliberately inharmonic; together they beat into the
/// clangorous body shared by the cymbal and hi-hats.
pub const METAL_FREQUENCIES: [f32; 6] = [800.0, 540.0, 522.7, 369.6, 304.4, 205.3];

/// Six free-running square oscillators, averaged.
#[derive(Debug, Clone)]
pub struct MetallicBank {
    oscillators: [Oscillator; 6],
}

impl MetallicBank {
    pub fn new(sample_rate: f32, amplitude: f32) -> Self {
        let oscillators = METAL_FREQUENCIES.map(|freq| {
            Oscillator::new(sample_rate)
                .with_frequency(freq)
                .with_amplitude(amplitude)
        });
        Self { oscillators }
    }

    #[inline]
    pub fn generate(&mut self) -> f32 {
        let mut sum = 0.0;
        for osc in self.oscillators.iter_mut() {
            sum += osc.square();
        }
        sum / self.oscillators.len() as f32
    }
}
