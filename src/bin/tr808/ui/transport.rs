//! Transport bar - tempo, play state, step position and output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{PanelInit, PanelUpdate};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    init: &PanelInit,
    update: &PanelUpdate,
    stats: &AudioStats,
) {
    let block = Block::default().title(" tr808 ").borders(Borders::ALL);

    let (symbol, label, color) = if update.playing {
        ("▶", "Playing", Color::Green)
    } else {
        ("■", "Stopped", Color::Yellow)
    };

    // Steps are sixteenths: four per beat
    let position = match update.step {
        Some(step) => format!("Beat {} | Step {:2}  ", step / 4 + 1, step + 1),
        None => "Beat - | Step --  ".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", update.tempo),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{symbol} {label}  "), Style::default().fg(color)),
        Span::styled(position, Style::default().fg(Color::White)),
        Span::styled(
            format!("Voices: {}  ", update.active_voices),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz  ", init.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
