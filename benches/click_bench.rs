//! Benchmarks for the click DSP path and the scheduler cycle.
//!
//! Run with: cargo bench
//!
//! The DSP benchmarks measure per-block render cost to ensure the audio
//! callback meets real-time deadlines. Reference timing at 48kHz:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use clicktrack::dsp::{ExpDecay, SineOsc};
use clicktrack::metronome::{BeatSink, Metronome};
use clicktrack::output::ClickMixer;

/// Common buffer sizes used in audio applications.
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

const SAMPLE_RATE: f32 = 48_000.0;

fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut osc = SineOsc::new(SAMPLE_RATE, 1000.0);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("exp_decay", size), &size, |b, _| {
            b.iter(|| {
                // Fresh envelope per iteration so the ramp never runs dry.
                let mut env = ExpDecay::new(SAMPLE_RATE, 0.1, 0.001);
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("output/mixer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut mixer = ClickMixer::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("one_voice", size), &size, |b, _| {
            b.iter(|| {
                mixer.trigger(1000.0);
                mixer.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

struct NullSink;

impl BeatSink for NullSink {
    fn click(&mut self, _frequency: f32, _at: Duration) {}
}

fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("metronome/scheduler");

    group.bench_function("cycle_x100", |b| {
        b.iter(|| {
            let mut m = Metronome::new();
            let mut sink = NullSink;
            m.start(Duration::ZERO, &mut sink);
            for _ in 0..100 {
                let deadline = m.next_deadline().unwrap();
                m.fire(black_box(deadline), &mut sink);
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_oscillator,
    bench_envelope,
    bench_mixer,
    bench_scheduler,
);
criterion_main!(benches);
