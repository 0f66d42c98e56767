#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

/// The periodic waveforms the generator can synthesize.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Pure tone, fundamental only.
    #[default]
    Sine,
    /// Linear ramp from -1 to +1 with a hard wrap. All harmonics.
    Sawtooth,
    /// +1 for the first half of the cycle, -1 for the second. Odd harmonics.
    Square,
    /// Linear rise then fall, continuous. Weak odd harmonics.
    Triangle,
}

impl Waveform {
    /// Evaluate one cycle at a normalized phase in [0, 1).
    ///
    /// Output is in [-1, 1]; the caller applies amplitude.
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
        }
    }
}
