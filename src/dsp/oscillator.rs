use std::f32::consts::TAU;

/// Phase-accumulating sine oscillator.
///
/// The frequency is fixed at construction: a click voice lives for a single
/// 100 ms pulse, so there is no pitch modulation to track. Phase is wrapped
/// into `[0, TAU)` every sample to keep `sin()` accurate over long renders.
pub struct SineOsc {
    phase: f32,
    phase_inc: f32,
}

impl SineOsc {
    pub fn new(sample_rate: f32, frequency: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: TAU * frequency / sample_rate,
        }
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.phase.sin();
        self.phase += self.phase_inc;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        sample
    }

    /// Fill a buffer with oscillator output.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let frequency = 1_000.0;
        let mut osc = SineOsc::new(sample_rate, frequency);

        let mut buffer = vec![0.0f32; 128];
        osc.render(&mut buffer);

        // sample n should be sin(2pi f n / sr)
        let sample_index = 12;
        let expected = (TAU * frequency * sample_index as f32 / sample_rate).sin();
        let actual = buffer[sample_index];
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn starts_at_zero_crossing() {
        let mut osc = SineOsc::new(48_000.0, 800.0);
        assert_eq!(osc.next_sample(), 0.0);
    }

    #[test]
    fn phase_stays_bounded() {
        let mut osc = SineOsc::new(48_000.0, 1_000.0);
        let mut buffer = vec![0.0f32; 48_000];
        osc.render(&mut buffer);
        assert!(osc.phase < TAU);
        assert!(buffer.iter().all(|s| s.abs() <= 1.0));
    }
}
