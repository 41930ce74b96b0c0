pub mod dsp;
pub mod metronome; // Beat scheduling and accent patterns
pub mod output; // Click voices and mixing

pub const MAX_BLOCK_SIZE: usize = 2048;
