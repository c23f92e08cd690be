//! Step grid - one row per voice, one column per sixteenth, with playhead
//! and edit cursor

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use tr808_dsp::sequencing::{StepPattern, STEPS};
use tr808_dsp::VoiceId;

use super::PanelUpdate;

const LABEL_WIDTH: usize = 5;
/// Envelope level above which a voice label lights up
const LIT_LEVEL: f32 = 0.05;

/// Edit position in the grid
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub row: usize,
    pub step: usize,
}

impl Cursor {
    pub fn voice(&self) -> VoiceId {
        VoiceId::ALL[self.row]
    }

    pub fn up(&mut self) {
        self.row = self.row.checked_sub(1).unwrap_or(VoiceId::COUNT - 1);
    }

    pub fn down(&mut self) {
        self.row = (self.row + 1) % VoiceId::COUNT;
    }

    pub fn left(&mut self) {
        self.step = self.step.checked_sub(1).unwrap_or(STEPS - 1);
    }

    pub fn right(&mut self) {
        self.step = (self.step + 1) % STEPS;
    }
}

fn cell_glyph(velocity: u8) -> char {
    match velocity {
        0 => '·',
        1..=99 => '▒',
        _ => '█',
    }
}

pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    pattern: &StepPattern,
    update: &PanelUpdate,
    cursor: &Cursor,
) {
    if area.height < 3 || (area.width as usize) < LABEL_WIDTH + STEPS * 2 {
        return;
    }

    let mut lines = Vec::with_capacity(VoiceId::COUNT + 2);

    // Beat numbers over every fourth step, accents marked below them
    let mut header = " ".repeat(LABEL_WIDTH);
    for step in 0..STEPS {
        if step % 4 == 0 {
            header.push_str(&format!("{:<2}", step / 4 + 1));
        } else {
            header.push_str("  ");
        }
    }
    lines.push(Line::from(Span::styled(header, Style::default().fg(Color::DarkGray))));

    for id in VoiceId::ALL {
        let lit = update.levels[id.index()] > LIT_LEVEL;
        let mut spans = Vec::with_capacity(STEPS + 1);
        spans.push(Span::styled(
            format!("{:<width$}", id.short_name(), width = LABEL_WIDTH),
            Style::default().fg(if lit { Color::Yellow } else { Color::White }),
        ));

        for step in 0..STEPS {
            let in_pattern = step < pattern.len();
            let mut style = Style::default().fg(if !in_pattern {
                Color::Black
            } else if step / 4 % 2 == 0 {
                Color::Red
            } else {
                Color::LightRed
            });
            if update.step == Some(step) {
                style = style.bg(Color::DarkGray);
            }
            if cursor.row == id.index() && cursor.step == step {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let mut glyph = cell_glyph(pattern.velocity(id, step)).to_string();
            glyph.push(if id == VoiceId::HiHat && pattern.is_open_hat(step) {
                'o'
            } else {
                ' '
            });
            spans.push(Span::styled(glyph, style));
        }
        lines.push(Line::from(spans));
    }

    let mut accents = String::from("AC   ");
    for step in 0..STEPS {
        accents.push(if pattern.is_accented(step) { '^' } else { ' ' });
        accents.push(' ');
    }
    lines.push(Line::from(Span::styled(accents, Style::default().fg(Color::Magenta))));

    frame.render_widget(Paragraph::new(lines), area);
}
