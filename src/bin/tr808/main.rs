//! tr808 - play the drum kit from the terminal
//!
//! Run with: cargo run --release

mod app;
mod ui;

use app::Tr808;
use log::LevelFilter;
use tr808_dsp::sequencing::StepPattern;
use tr808_dsp::VoiceId;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    let mut pattern = StepPattern::basic_beat();
    pattern.parse_lane(VoiceId::Clap, "........ ....x...")?;
    pattern.parse_lane(VoiceId::Cowbell, "...x.... ...x..x.")?;

    Tr808::new().bpm(120.0).pattern(pattern).run()
}
