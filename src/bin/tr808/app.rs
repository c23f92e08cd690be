//! Audio setup: builds the kit, opens the output device, hands control to the UI.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use tr808_dsp::{config::DrumKitConfig, sequencing::StepPattern, synth::drum_kit, MAX_BLOCK_SIZE};

use super::ui::{PanelInit, PanelUpdate, UiApp};

/// Scope samples buffered between the audio and UI threads
const SCOPE_CAPACITY: usize = 8192;
const STATE_CAPACITY: usize = 64;

/// Application builder
pub struct Tr808 {
    bpm: f32,
    pattern: StepPattern,
}

impl Tr808 {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            pattern: StepPattern::basic_beat(),
        }
    }

    pub fn bpm(mut self, bpm: f32) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn pattern(mut self, pattern: StepPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Open the default output device and run until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0;
        let channels = stream_config.channels() as usize;

        let config = DrumKitConfig {
            sample_rate,
            tempo_bpm: self.bpm,
            ..Default::default()
        };
        let (mut engine, mut controller) =
            drum_kit(&config).wrap_err("invalid drum kit configuration")?;
        controller
            .set_pattern(self.pattern)
            .map_err(|e| eyre!("failed to load pattern: {e}"))?;

        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);
        let (mut state_tx, state_rx) = RingBuffer::<PanelUpdate>::new(STATE_CAPACITY);

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames];
                    engine.render_block(block);

                    // Mono to all channels
                    for (i, &s) in block.iter().enumerate() {
                        let offset = (frames_written + i) * channels;
                        data[offset..offset + channels].fill(s);
                        let _ = scope_tx.push(s);
                    }
                    frames_written += frames;
                }

                let _ = state_tx.push(PanelUpdate::capture(&engine));
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let init = PanelInit {
            sample_rate: sample_rate as f32,
            pattern: self.pattern,
            bpm: self.bpm,
        };
        let mut ui = UiApp::new(scope_rx, state_rx, controller, init);

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }
}

impl Default for Tr808 {
    fn default() -> Self {
        Self::new()
    }
}
