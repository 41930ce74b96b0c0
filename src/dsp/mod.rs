//! Low-level DSP primitives used by the click voices.
//!
//! These components are allocation-free and realtime-safe, making them safe
//! to run inside the audio callback. They stay focused on the signal math;
//! voice lifetime and mixing live in the `output` module.

/// Exponential decay envelope generator.
pub mod envelope;
/// Sine oscillator.
pub mod oscillator;

pub use envelope::ExpDecay;
pub use oscillator::SineOsc;
