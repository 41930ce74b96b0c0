#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Frequency of an unaccented beat.
pub const PRIMARY_HZ: f32 = 1000.0;
/// Frequency of the alternate (accent) tone.
pub const SECONDARY_HZ: f32 = 800.0;

/// Rule mapping a beat's position to its tone frequency.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentPattern {
    /// Every beat at the primary pitch.
    Single,
    /// Alternate primary/secondary on even/odd beats.
    TwoSounds,
    /// Primary pitch while the counter is below the pattern length,
    /// secondary once it reaches it. The scheduler wraps the counter at the
    /// pattern length right after emitting, so in steady state the
    /// secondary pitch is only reachable when the length shrinks below a
    /// live counter.
    NRepeat,
}

impl AccentPattern {
    /// Select the frequency for the beat at `beat_count`.
    ///
    /// `pattern_length` is only consulted by [`AccentPattern::NRepeat`].
    pub fn frequency(self, beat_count: u32, pattern_length: u32) -> f32 {
        match self {
            AccentPattern::Single => PRIMARY_HZ,
            AccentPattern::TwoSounds => {
                if beat_count % 2 == 0 {
                    PRIMARY_HZ
                } else {
                    SECONDARY_HZ
                }
            }
            AccentPattern::NRepeat => {
                if beat_count < pattern_length {
                    PRIMARY_HZ
                } else {
                    SECONDARY_HZ
                }
            }
        }
    }

    /// Display name used by the UI.
    pub fn label(self) -> &'static str {
        match self {
            AccentPattern::Single => "single",
            AccentPattern::TwoSounds => "two sounds",
            AccentPattern::NRepeat => "n-repeat",
        }
    }
}
