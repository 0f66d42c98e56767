pub mod dsp; // Waveform synthesis primitives
pub mod error;
pub mod midi; // MIDI 2.0 resolution scaling and channel state
pub mod pipeline; // Frame-stepped stage orchestration

pub use error::{AudioError, AudioResult};

pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
pub const MAX_BLOCK_SIZE: usize = 1024;
pub const MIDI_CHANNELS: usize = 16;
