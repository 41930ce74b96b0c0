//! Offline metronome render: drives the scheduler against a virtual clock
//! and bounces two seconds of click audio into a buffer. No audio device
//! needed.

use std::time::Duration;

use clicktrack::metronome::{AccentPattern, BeatSink, Metronome};
use clicktrack::output::ClickMixer;

const SAMPLE_RATE: f32 = 48_000.0;
const RENDER_SECONDS: f32 = 2.0;

/// Sink that remembers each beat so it can be placed in the bounce.
#[derive(Default)]
struct BounceSink {
    beats: Vec<(f32, Duration)>,
}

impl BeatSink for BounceSink {
    fn click(&mut self, frequency: f32, at: Duration) {
        self.beats.push((frequency, at));
    }
}

fn main() {
    println!("=== Offline Click Bounce ===\n");

    let mut metronome = Metronome::new();
    let mut sink = BounceSink::default();

    metronome.set_tempo(120, Duration::ZERO, &mut sink);
    metronome.set_pattern(AccentPattern::TwoSounds);
    metronome.start(Duration::ZERO, &mut sink);

    let end = Duration::from_secs_f32(RENDER_SECONDS);
    while let Some(deadline) = metronome.next_deadline() {
        if deadline >= end {
            break;
        }
        metronome.fire(deadline, &mut sink);
    }
    metronome.stop();

    // Place each beat at its onset sample and render the whole bounce.
    let total_samples = (RENDER_SECONDS * SAMPLE_RATE) as usize;
    let mut bounce = vec![0.0f32; total_samples];
    let mut mixer = ClickMixer::new(SAMPLE_RATE);

    let mut cursor = 0;
    for &(frequency, at) in &sink.beats {
        let onset = (at.as_secs_f32() * SAMPLE_RATE) as usize;
        if onset > cursor {
            mixer.render(&mut bounce[cursor..onset]);
            cursor = onset;
        }
        mixer.trigger(frequency);
    }
    mixer.render(&mut bounce[cursor..]);

    let peak = bounce.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    println!("Beats rendered: {}", sink.beats.len());
    for (i, &(frequency, at)) in sink.beats.iter().enumerate() {
        println!("  beat {} @ {:>4} ms  {:.0} Hz", i, at.as_millis(), frequency);
    }
    println!("\nPeak amplitude: {:.3}", peak);
}
