//! click - terminal metronome
//!
//! Run with: cargo run

mod app;
mod ui;

use app::ClickApp;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    ClickApp::new().run()
}
