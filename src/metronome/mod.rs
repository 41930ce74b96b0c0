//! Beat scheduling: tempo, transport state, and the accent-pattern counter.
//!
//! The [`Metronome`] is a plain state machine with no clock of its own.
//! Time enters through the `now` arguments, and "arm a one-shot timer" is
//! expressed as a stored deadline the caller is expected to honor. That
//! keeps the scheduling semantics fully deterministic under test; the
//! wall-clock thread that actually sleeps until deadlines lives in
//! [`driver`].
//!
//! The scheduling model is deliberately timer-driven rather than
//! audio-clock driven: each beat re-arms the next one relative to the time
//! the callback ran, so a late callback shifts every later beat. That drift
//! characteristic is part of the contract, not something this module tries
//! to correct.

/// Wall-clock driver thread and the thread-safe control handle.
pub mod driver;
/// Accent patterns and the frequency-selection rule.
pub mod pattern;

pub use driver::{MetronomeHandle, MetronomeSnapshot};
pub use pattern::AccentPattern;

use std::time::Duration;

/// Default tempo in beats per minute.
pub const DEFAULT_BPM: u32 = 60;
/// Default modulus for the n-repeat pattern.
pub const DEFAULT_PATTERN_LENGTH: u32 = 30;

/// Receiver for beat emissions.
///
/// Implemented by the audio-side click queue for playback and by recording
/// sinks in tests. `at` is the beat's onset time relative to the session
/// epoch; the realtime sink ignores it (a timer-driven beat sounds when it
/// fires), but trace tests assert on it.
pub trait BeatSink {
    fn click(&mut self, frequency: f32, at: Duration);
}

/// The beat scheduler.
///
/// Owns tempo, the playing flag, the beat counter, and the single armed
/// deadline. Exactly one deadline is outstanding while playing and none
/// while stopped; every operation that re-arms cancels first.
pub struct Metronome {
    tempo: u32,
    playing: bool,
    beat_count: u32,
    pattern: AccentPattern,
    pattern_length: u32,
    /// Deadline of the armed one-shot trigger, relative to the session
    /// epoch. `Some` if and only if `playing`.
    pending: Option<Duration>,
}

impl Metronome {
    pub fn new() -> Self {
        Self {
            tempo: DEFAULT_BPM,
            playing: false,
            beat_count: 0,
            pattern: AccentPattern::Single,
            pattern_length: DEFAULT_PATTERN_LENGTH,
            pending: None,
        }
    }

    /// Begin playback: emit beat 0 immediately and arm the next one.
    ///
    /// No-op when already playing.
    pub fn start(&mut self, now: Duration, sink: &mut impl BeatSink) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.beat_count = 0;
        self.run_cycle(now, sink);
    }

    /// Halt playback and cancel the armed trigger.
    ///
    /// No-op when already stopped. After this returns no further beats can
    /// fire until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.pending = None;
        self.playing = false;
    }

    /// Update the tempo.
    ///
    /// While playing this is an atomic stop-then-restart: the armed trigger
    /// is cancelled, the beat counter resets to 0, and a fresh cycle begins
    /// at the new interval (emitting a beat right away). Restarting from
    /// beat 0 on every tempo change reproduces the original behavior; a
    /// phase-preserving update would be smoother but would not match it.
    pub fn set_tempo(&mut self, bpm: u32, now: Duration, sink: &mut impl BeatSink) {
        self.tempo = bpm;
        if self.playing {
            self.stop();
            self.start(now, sink);
        }
    }

    /// Change the accent pattern. Takes effect on the next cycle; never
    /// resets the counter or restarts timing.
    pub fn set_pattern(&mut self, pattern: AccentPattern) {
        self.pattern = pattern;
    }

    /// Change the n-repeat modulus. Takes effect on subsequent beats.
    pub fn set_pattern_length(&mut self, length: u32) {
        self.pattern_length = length;
    }

    /// Timer callback entry: run one scheduling cycle.
    ///
    /// Ignored unless a trigger is armed, so a deadline cancelled by
    /// [`stop`](Self::stop) or [`set_tempo`](Self::set_tempo) can never
    /// produce a beat even if the driver already woke up for it.
    pub fn fire(&mut self, now: Duration, sink: &mut impl BeatSink) {
        if self.pending.is_none() {
            return;
        }
        self.run_cycle(now, sink);
    }

    /// One scheduling cycle: emit, count, wrap, re-arm.
    ///
    /// The ordering here is load-bearing: the frequency is selected from
    /// the counter *before* it increments, and the n-repeat wrap happens
    /// *after* the increment. See the trace tests for the consequences at
    /// the pattern-length boundary.
    fn run_cycle(&mut self, now: Duration, sink: &mut impl BeatSink) {
        let interval = self.interval();

        let frequency = self.pattern.frequency(self.beat_count, self.pattern_length);
        sink.click(frequency, now);

        self.beat_count += 1;
        if self.pattern == AccentPattern::NRepeat && self.beat_count >= self.pattern_length {
            self.beat_count = 0;
        }

        self.pending = Some(now + interval);
    }

    /// Time between beat onsets at the current tempo.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.tempo as f64)
    }

    /// Beat interval in milliseconds: `(60 / tempo) * 1000`.
    pub fn interval_ms(&self) -> f64 {
        (60.0 / self.tempo as f64) * 1000.0
    }

    /// Deadline of the armed trigger, if any. Drivers sleep until this.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    pub fn beat_count(&self) -> u32 {
        self.beat_count
    }

    pub fn pattern(&self) -> AccentPattern {
        self.pattern
    }

    pub fn pattern_length(&self) -> u32 {
        self.pattern_length
    }
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new()
    }
}
