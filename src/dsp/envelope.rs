/*
Exponential Decay Envelope
==========================

A one-shot gain ramp: full amplitude at onset, exponential decay toward a
small floor over a fixed window, then silence.

  Level
    1.0 ┐╲
        │ ╲
        │  ╲_
        │    ╲__
  floor │       ╲‾‾──___
    0.0 └────────────────┴──→ Time
        onset          window end

Exponential (rather than linear) decay matches how struck and plucked
sounds actually lose energy, which is why a simple sine pulse through this
envelope reads as a percussive "click" instead of a beep.

The Math
--------

An exponential ramp from 1.0 to `floor` over N samples is a per-sample
multiply by a constant ratio:

    ratio = floor^(1/N)
    level[n] = ratio^n        (so level[0] = 1.0, level[N] = floor)

One multiply per sample, no transcendentals in the loop. The level never
reaches zero on its own; the envelope instead reports inactive once the
window has elapsed and outputs hard zero from then on.
*/

pub struct ExpDecay {
    level: f32,
    ratio: f32,
    remaining: u32,
}

impl ExpDecay {
    /// Envelope decaying from 1.0 to `floor` over `seconds`.
    pub fn new(sample_rate: f32, seconds: f32, floor: f32) -> Self {
        let total = (seconds * sample_rate).round().max(1.0) as u32;
        Self {
            level: 1.0,
            ratio: floor.powf(1.0 / total as f32),
            remaining: total,
        }
    }

    /// Produce the gain for one sample and advance.
    ///
    /// The first call returns exactly 1.0 (full amplitude at onset).
    /// After the window has elapsed every call returns 0.0.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.remaining == 0 {
            return 0.0;
        }
        let gain = self.level;
        self.level *= self.ratio;
        self.remaining -= 1;
        gain
    }

    /// Fill a buffer with envelope values.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Returns true while the decay window has samples left.
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }
}
