//! click - application wiring: audio stream, metronome driver, key handling

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

use clicktrack::metronome::{
    AccentPattern, Metronome, MetronomeHandle, DEFAULT_PATTERN_LENGTH,
};
use clicktrack::output::{ClickHandle, SharedClickMixer};
use clicktrack::MAX_BLOCK_SIZE;

use crate::ui;

/// Tempo bounds enforced by the UI; the scheduler itself does not validate.
pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 220;

/// Main application
pub struct ClickApp;

impl ClickApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        // The mixer moves into the audio callback; the handle stays here
        // and rides along with the metronome driver as its beat sink.
        let (mut mixer, click_tx) = SharedClickMixer::new(sample_rate);

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render =
                            (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                        let block = &mut render_buf[..frames_to_render];
                        mixer.render(block);

                        // Copy to output (mono to all channels)
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                },
                |err| eprintln!("Audio error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        let handle = MetronomeHandle::spawn(Metronome::new(), click_tx);

        let mut terminal = ratatui::init();
        let result = event_loop(&mut terminal, &handle, sample_rate);
        ratatui::restore();
        result
    }
}

impl Default for ClickApp {
    fn default() -> Self {
        Self::new()
    }
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    handle: &MetronomeHandle<ClickHandle>,
    sample_rate: f32,
) -> EyreResult<()> {
    loop {
        let snapshot = handle.snapshot();
        terminal.draw(|frame| ui::render(frame, &snapshot, sample_rate))?;

        // Non-blocking input poll, ~60fps. Held keys arrive as terminal
        // key-repeat events, which gives the press-and-hold tempo nudge.
        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char(' ') => {
                if handle.is_playing() {
                    handle.stop();
                } else {
                    handle.start();
                }
            }
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                let bpm = snapshot.tempo.saturating_add(1).min(MAX_BPM);
                if bpm != snapshot.tempo {
                    handle.set_tempo(bpm);
                }
            }
            KeyCode::Down | KeyCode::Char('-') => {
                let bpm = snapshot.tempo.saturating_sub(1).max(MIN_BPM);
                if bpm != snapshot.tempo {
                    handle.set_tempo(bpm);
                }
            }
            KeyCode::Char('p') => {
                let next = match snapshot.pattern {
                    AccentPattern::Single => AccentPattern::TwoSounds,
                    AccentPattern::TwoSounds => AccentPattern::NRepeat,
                    AccentPattern::NRepeat => {
                        // Leaving n-repeat resets the length to its default,
                        // mirroring the disabled length field.
                        handle.set_pattern_length(DEFAULT_PATTERN_LENGTH);
                        AccentPattern::Single
                    }
                };
                handle.set_pattern(next);
            }
            KeyCode::Char(']') if snapshot.pattern == AccentPattern::NRepeat => {
                handle.set_pattern_length(snapshot.pattern_length.saturating_add(1));
            }
            KeyCode::Char('[') if snapshot.pattern == AccentPattern::NRepeat => {
                handle.set_pattern_length(snapshot.pattern_length.saturating_sub(1).max(1));
            }
            _ => {}
        }
    }

    Ok(())
}
