//! Spectrum view
//!
//! Hann-windowed FFT of the scope buffer, sampled at log-spaced points from
//! 30 Hz (kick fundamentals) up to Nyquist (hat and cymbal sizzle). The
//! display falls back slowly so short hits stay readable.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

const SPECTRUM_POINTS: usize = 64;
const MIN_FREQ_HZ: f64 = 30.0;
const FLOOR_DB: f64 = -90.0;
/// dB the display drops per frame when the input goes quiet
const FALL_DB_PER_FRAME: f64 = 1.5;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin for each display point
    bin_indices: Vec<usize>,
    /// (log10 frequency, level in dB)
    points: Vec<(f64, f64)>,
    log_bounds: [f64; 2],
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        let denom = (fft_len - 1) as f32;
        let window: Vec<f32> = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).max(MIN_FREQ_HZ * 2.0);
        let lo = MIN_FREQ_HZ.log10();
        let hi = nyquist.log10();
        let last_bin = fft_len / 2 - 1;

        let mut bin_indices = Vec::with_capacity(SPECTRUM_POINTS);
        let mut points = Vec::with_capacity(SPECTRUM_POINTS);
        for i in 0..SPECTRUM_POINTS {
            let log_f = lo + (hi - lo) * i as f64 / (SPECTRUM_POINTS - 1) as f64;
            let freq = 10f64.powf(log_f);
            let bin = (freq * fft_len as f64 / sample_rate as f64).round() as usize;
            bin_indices.push(bin.clamp(1, last_bin.max(1)));
            points.push((log_f, FLOOR_DB));
        }

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bin_indices,
            points,
            log_bounds: [lo, hi],
        }
    }

    /// Analyse `buffer`; ignored unless it matches the FFT length.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        // Normalise so a full-scale sine reads near 0 dB
        let norm = 4.0 / (self.window.len() as f32).powi(2);
        for (point, &bin) in self.points.iter_mut().zip(&self.bin_indices) {
            let power = (self.scratch[bin].norm_sqr() * norm).max(1e-12);
            let db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
            point.1 = db.max(point.1 - FALL_DB_PER_FRAME);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn log_bounds(&self) -> [f64; 2] {
        self.log_bounds
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(analyzer.data());

    let [lo, hi] = analyzer.log_bounds();
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels(vec!["30", "1k", "10k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-90", "-45", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
