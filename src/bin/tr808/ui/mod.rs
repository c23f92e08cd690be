//! Terminal front panel for the drum kit
//!
//! Scope and spectrum of the live output, a step grid with playhead, and
//! keys for playing voices and editing the pattern. All control goes through
//! the kit's `DrumController`; the audio thread is never touched directly.

mod grid;
mod spectrum;
pub mod state;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use tr808_dsp::sequencing::{PatternError, StepPattern};
use tr808_dsp::synth::DrumController;
use tr808_dsp::VoiceId;

pub use state::{PanelInit, PanelUpdate};

use grid::{render_grid, Cursor};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Samples kept for the scope and the FFT
const VIS_BUFFER_SIZE: usize = 1024;
const TEMPO_STEP: f32 = 2.0;
const KEY_VELOCITY: f32 = 1.0;

pub struct UiApp {
    audio_rx: Consumer<f32>,
    state_rx: Consumer<PanelUpdate>,
    controller: DrumController,
    init: PanelInit,
    current: PanelUpdate,
    /// Pattern as edited here; pushed to the engine on every change
    pattern: StepPattern,
    cursor: Cursor,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    /// Last control error, shown in the help bar
    status: Option<String>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        state_rx: Consumer<PanelUpdate>,
        controller: DrumController,
        init: PanelInit,
    ) -> Self {
        Self {
            audio_rx,
            state_rx,
            controller,
            current: PanelUpdate::idle(init.bpm),
            pattern: init.pattern,
            cursor: Cursor::default(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, init.sample_rate),
            init,
            status: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Append new samples, keeping the last `VIS_BUFFER_SIZE`.
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }
        if let Ok(chunk) = self.audio_rx.read_chunk(available) {
            let (first, second) = chunk.as_slices();
            self.audio_buffer.extend_from_slice(first);
            self.audio_buffer.extend_from_slice(second);
            chunk.commit_all();
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    /// Keep only the latest snapshot.
    fn poll_state(&mut self) {
        while let Ok(update) = self.state_rx.pop() {
            self.current = update;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let result: Result<(), String> = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char(' ') => {
                let sent = if self.current.playing {
                    self.controller.stop()
                } else {
                    self.controller.start()
                };
                sent.map_err(|e| e.to_string())
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self
                .controller
                .set_tempo(self.current.tempo + TEMPO_STEP)
                .map_err(|e| e.to_string()),
            KeyCode::Char('-') => self
                .controller
                .set_tempo(self.current.tempo - TEMPO_STEP)
                .map_err(|e| e.to_string()),
            KeyCode::Char('o') => self
                .controller
                .trigger_hihat(KEY_VELOCITY, true)
                .map_err(|e| e.to_string()),
            KeyCode::Char(c @ '0'..='9') => self.trigger_pad(c).map_err(|e| e.to_string()),
            KeyCode::Up => {
                self.cursor.up();
                Ok(())
            }
            KeyCode::Down => {
                self.cursor.down();
                Ok(())
            }
            KeyCode::Left => {
                self.cursor.left();
                Ok(())
            }
            KeyCode::Right => {
                self.cursor.right();
                Ok(())
            }
            KeyCode::Enter | KeyCode::Char('x') => self.edit(|pattern, cursor| {
                pattern.toggle_step(cursor.voice(), cursor.step)
            }),
            KeyCode::Char('a') => self.edit(|pattern, cursor| {
                let accented = pattern.is_accented(cursor.step);
                pattern.set_accent(cursor.step, !accented)
            }),
            KeyCode::Char('h') => self.edit(|pattern, cursor| {
                let open = pattern.is_open_hat(cursor.step);
                pattern.set_open_hat(cursor.step, !open)
            }),
            KeyCode::Char('c') => self.edit(|pattern, _| {
                pattern.clear();
                Ok::<(), PatternError>(())
            }),
            _ => Ok(()),
        };

        self.status = result.err();
    }

    /// Keys 1-9 and 0 play the ten voices in panel order.
    fn trigger_pad(&mut self, key: char) -> Result<(), tr808_dsp::error::ControlError> {
        let index = match key.to_digit(10) {
            Some(0) => 9,
            Some(d) => d as usize - 1,
            None => return Ok(()),
        };
        match VoiceId::from_index(index) {
            Some(VoiceId::HiHat) => self.controller.trigger_hihat(KEY_VELOCITY, false),
            Some(voice) => self.controller.trigger_voice(voice, KEY_VELOCITY),
            None => Ok(()),
        }
    }

    /// Apply an edit to the local pattern and send the result.
    fn edit<F, E>(&mut self, f: F) -> Result<(), String>
    where
        F: FnOnce(&mut StepPattern, &Cursor) -> Result<(), E>,
        E: std::fmt::Display,
    {
        f(&mut self.pattern, &self.cursor).map_err(|e| e.to_string())?;
        self.controller
            .set_pattern(self.pattern)
            .map_err(|e| e.to_string())
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                         // Transport
                Constraint::Length(VoiceId::COUNT as u16 + 4), // Step grid
                Constraint::Min(8),                            // Scope + spectrum
                Constraint::Length(1),                         // Help
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(frame, chunks[0], &self.init, &self.current, &stats);

        let grid_block = Block::default().title(" Pattern ").borders(Borders::ALL);
        let grid_inner = grid_block.inner(chunks[1]);
        frame.render_widget(grid_block, chunks[1]);
        render_grid(frame, grid_inner, &self.pattern, &self.current, &self.cursor);

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        render_waveform(frame, scopes[0], &self.audio_buffer);
        render_spectrum(frame, scopes[1], &self.spectrum);

        let help = match &self.status {
            Some(err) => Paragraph::new(format!(" {err}")).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(
                " [1-0] Play  [O] Open hat  [Space] Start/Stop  [+/-] Tempo  \
                 [Arrows] Move  [Enter] Step  [A] Accent  [H] Open step  [C] Clear  [Q] Quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(help, chunks[3]);
    }
}
