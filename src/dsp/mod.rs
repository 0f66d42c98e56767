//! Waveform synthesis primitives.
//!
//! Allocation-free and realtime-safe: `generate` writes into a
//! caller-supplied buffer and runs to completion on the caller's thread.

/// Buffer-filling waveform generator with an explicit lifecycle.
pub mod generator;
/// Waveform shapes evaluated at a normalized phase.
pub mod waveform;

pub use generator::WaveformGenerator;
pub use waveform::Waveform;
