use crate::dsp::{ExpDecay, SineOsc};

/// Audible length of one click, in seconds.
pub const CLICK_SECONDS: f32 = 0.1;
/// Gain the decay ramps down to by the end of the click window.
pub const CLICK_FLOOR: f32 = 0.001;

/// One-shot click voice: a sine burst through an exponential decay.
///
/// Starts at full amplitude on the first rendered sample and is spent after
/// 100 ms regardless of tempo. The supported tempo range tops out at 220
/// BPM (≈273 ms between beats), so consecutive voices never overlap in
/// normal use; the mixer still handles overlap by summing.
pub struct ClickVoice {
    osc: SineOsc,
    env: ExpDecay,
}

impl ClickVoice {
    pub fn new(sample_rate: f32, frequency: f32) -> Self {
        Self {
            osc: SineOsc::new(sample_rate, frequency),
            env: ExpDecay::new(sample_rate, CLICK_SECONDS, CLICK_FLOOR),
        }
    }

    /// Render into `out` additively (the mixer clears the buffer).
    pub fn render_add(&mut self, out: &mut [f32]) {
        if !self.env.is_active() {
            return;
        }
        for sample in out.iter_mut() {
            *sample += self.osc.next_sample() * self.env.next_sample();
        }
    }

    /// True while the voice still has samples to emit.
    pub fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn voice_is_spent_after_click_window() {
        let mut voice = ClickVoice::new(SAMPLE_RATE, 1000.0);
        let window = (CLICK_SECONDS * SAMPLE_RATE) as usize;

        let mut buffer = vec![0.0f32; window];
        voice.render_add(&mut buffer);

        assert!(!voice.is_active());
        assert!(buffer.iter().any(|s| s.abs() > 0.1), "click must be audible");
    }

    #[test]
    fn spent_voice_renders_nothing() {
        let mut voice = ClickVoice::new(SAMPLE_RATE, 800.0);
        let mut buffer = vec![0.0f32; (CLICK_SECONDS * SAMPLE_RATE) as usize + 64];
        voice.render_add(&mut buffer);

        let mut tail = vec![0.0f32; 64];
        voice.render_add(&mut tail);
        assert!(tail.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn amplitude_decays_across_the_window() {
        let mut voice = ClickVoice::new(SAMPLE_RATE, 1000.0);
        let window = (CLICK_SECONDS * SAMPLE_RATE) as usize;
        let mut buffer = vec![0.0f32; window];
        voice.render_add(&mut buffer);

        let head_peak = buffer[..window / 10]
            .iter()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()));
        let tail_peak = buffer[window - window / 10..]
            .iter()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()));

        assert!(head_peak > 0.5, "onset should be near full amplitude");
        assert!(tail_peak < 0.05, "tail should have decayed");
    }
}
