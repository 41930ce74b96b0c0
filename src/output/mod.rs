//! Tone emission: click voices, the mixer that renders them, and the
//! lock-free trigger queue used to reach the audio callback.
//!
//! The mixer is designed to live inside the audio callback: triggering a
//! click reuses a small fixed-capacity voice pool, and with the `rtrb`
//! feature the control side pushes trigger commands through a ring buffer
//! instead of sharing a lock with the callback.

/// One-shot sine-burst click voice.
pub mod voice;

pub use voice::{ClickVoice, CLICK_FLOOR, CLICK_SECONDS};

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

#[cfg(feature = "rtrb")]
use crate::metronome::BeatSink;
#[cfg(feature = "rtrb")]
use std::time::Duration;

/// Most clicks that can sound at once. At the supported tempo range a
/// single voice is live at a time; the headroom absorbs restart bursts
/// (tempo changes emit immediately) without allocating.
pub const MAX_VOICES: usize = 8;

/// Trigger request travelling from the control side to the audio side.
#[derive(Debug, Clone, Copy)]
pub struct ClickCommand {
    pub frequency: f32,
}

/// Renders and mixes active click voices into mono f32 blocks.
pub struct ClickMixer {
    sample_rate: f32,
    voices: Vec<ClickVoice>,
}

impl ClickMixer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            voices: Vec::with_capacity(MAX_VOICES),
        }
    }

    /// Start a click at `frequency` on the next rendered sample.
    ///
    /// When the pool is full the oldest voice is dropped; it is the
    /// quietest one, already deep into its decay.
    pub fn trigger(&mut self, frequency: f32) {
        if self.voices.len() == MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(ClickVoice::new(self.sample_rate, frequency));
    }

    /// Render one mono block, dropping voices that finished inside it.
    pub fn render(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        for voice in self.voices.iter_mut() {
            voice.render_add(out);
        }
        self.voices.retain(ClickVoice::is_active);
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }
}

#[cfg(feature = "rtrb")]
const CLICK_QUEUE_SIZE: usize = 64;

/// Control-side sender half of the click queue.
#[cfg(feature = "rtrb")]
pub struct ClickHandle {
    tx: Producer<ClickCommand>,
}

#[cfg(feature = "rtrb")]
impl ClickHandle {
    /// Request a click. If the queue is full the trigger is dropped rather
    /// than blocking the caller.
    pub fn emit(&mut self, frequency: f32) {
        let _ = self.tx.push(ClickCommand { frequency });
    }
}

/// The scheduler emits straight into the queue. Onset time is ignored:
/// timer-driven beats sound when they fire.
#[cfg(feature = "rtrb")]
impl BeatSink for ClickHandle {
    fn click(&mut self, frequency: f32, _at: Duration) {
        self.emit(frequency);
    }
}

/// Mixer that drains a trigger queue before each render.
///
/// Lives on the audio thread while its [`ClickHandle`] stays with the
/// control thread, so the callback never touches a lock.
#[cfg(feature = "rtrb")]
pub struct SharedClickMixer {
    mixer: ClickMixer,
    rx: Consumer<ClickCommand>,
}

#[cfg(feature = "rtrb")]
impl SharedClickMixer {
    pub fn new(sample_rate: f32) -> (Self, ClickHandle) {
        let (tx, rx) = RingBuffer::<ClickCommand>::new(CLICK_QUEUE_SIZE);
        let node = Self {
            mixer: ClickMixer::new(sample_rate),
            rx,
        };
        (node, ClickHandle { tx })
    }

    pub fn render(&mut self, out: &mut [f32]) {
        while let Ok(cmd) = self.rx.pop() {
            self.mixer.trigger(cmd.frequency);
        }
        self.mixer.render(out);
    }
}
