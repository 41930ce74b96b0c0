//! Wall-clock driver: the one-shot timer primitive behind the scheduler.
//!
//! A dedicated thread sleeps on a condvar until the armed deadline, then
//! re-enters the scheduling cycle. Control methods mutate the scheduler
//! under the same mutex the waiter re-checks on wake, so cancelling a
//! deadline (stop, tempo change) and arming a new one is race-free: a
//! cancelled deadline can never produce a beat.
//!
//! The driver measures `now` against a session epoch captured at spawn
//! time. Beats therefore fire at "deadline or shortly after" wall-clock
//! time, and each cycle re-arms relative to when it actually ran; drift
//! accumulates the same way the timer-driven original drifts.

use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use super::{AccentPattern, BeatSink, Metronome};

/// Coherent view of scheduler state for display.
#[derive(Debug, Clone, Copy)]
pub struct MetronomeSnapshot {
    pub tempo: u32,
    pub playing: bool,
    pub beat_count: u32,
    pub pattern: AccentPattern,
    pub pattern_length: u32,
}

struct DriverState<S> {
    metronome: Metronome,
    sink: S,
    shutdown: bool,
}

struct Shared<S> {
    state: Mutex<DriverState<S>>,
    cv: Condvar,
    epoch: Instant,
}

/// Thread-safe control surface over a driven [`Metronome`].
///
/// Owns the timer thread; dropping the handle stops playback and joins it.
pub struct MetronomeHandle<S: BeatSink + Send + 'static> {
    shared: Arc<Shared<S>>,
    thread: Option<JoinHandle<()>>,
}

impl<S: BeatSink + Send + 'static> MetronomeHandle<S> {
    /// Spawn the timer thread and return the control handle.
    pub fn spawn(metronome: Metronome, sink: S) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(DriverState {
                metronome,
                sink,
                shutdown: false,
            }),
            cv: Condvar::new(),
            epoch: Instant::now(),
        });

        let thread_shared = shared.clone();
        let thread = thread::spawn(move || run_timer_loop(&thread_shared));

        Self {
            shared,
            thread: Some(thread),
        }
    }

    pub fn start(&self) {
        let mut state = self.shared.state.lock().unwrap();
        let now = self.shared.epoch.elapsed();
        let DriverState {
            metronome, sink, ..
        } = &mut *state;
        metronome.start(now, sink);
        self.shared.cv.notify_one();
    }

    pub fn stop(&self) {
        let mut state = self.shared.state.lock().unwrap();
        state.metronome.stop();
        self.shared.cv.notify_one();
    }

    /// Set the tempo. Callers clamp to the supported range; the scheduler
    /// itself accepts any positive BPM.
    pub fn set_tempo(&self, bpm: u32) {
        let mut state = self.shared.state.lock().unwrap();
        let now = self.shared.epoch.elapsed();
        let DriverState {
            metronome, sink, ..
        } = &mut *state;
        metronome.set_tempo(bpm, now, sink);
        self.shared.cv.notify_one();
    }

    pub fn set_pattern(&self, pattern: AccentPattern) {
        let mut state = self.shared.state.lock().unwrap();
        state.metronome.set_pattern(pattern);
        self.shared.cv.notify_one();
    }

    pub fn set_pattern_length(&self, length: u32) {
        let mut state = self.shared.state.lock().unwrap();
        state.metronome.set_pattern_length(length);
        self.shared.cv.notify_one();
    }

    pub fn is_playing(&self) -> bool {
        self.shared.state.lock().unwrap().metronome.is_playing()
    }

    pub fn snapshot(&self) -> MetronomeSnapshot {
        let state = self.shared.state.lock().unwrap();
        let m = &state.metronome;
        MetronomeSnapshot {
            tempo: m.tempo(),
            playing: m.is_playing(),
            beat_count: m.beat_count(),
            pattern: m.pattern(),
            pattern_length: m.pattern_length(),
        }
    }
}

impl<S: BeatSink + Send + 'static> Drop for MetronomeHandle<S> {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.metronome.stop();
            state.shutdown = true;
        }
        self.shared.cv.notify_one();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run_timer_loop<S: BeatSink + Send + 'static>(shared: &Shared<S>) {
    let mut guard = shared.state.lock().unwrap();
    loop {
        if guard.shutdown {
            break;
        }
        match guard.metronome.next_deadline() {
            // Paused: nothing armed, wait for a control change.
            None => {
                guard = shared.cv.wait(guard).unwrap();
            }
            Some(deadline) => {
                let now = shared.epoch.elapsed();
                if now >= deadline {
                    let DriverState {
                        metronome, sink, ..
                    } = &mut *guard;
                    metronome.fire(now, sink);
                } else {
                    let (g, _) = shared.cv.wait_timeout(guard, deadline - now).unwrap();
                    guard = g;
                }
            }
        }
    }
}
