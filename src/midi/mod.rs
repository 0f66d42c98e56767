//! MIDI message decoding, per-channel state, and MIDI 2.0 resolution scaling.

/// Per-channel message interpreter.
pub mod channel;
/// Raw message decoding into typed events.
pub mod event;
/// MIDI 2.0 bit-scaling algorithms (M2-115-U).
pub mod scaler;

pub use channel::{ChannelEvent, ChannelProcessor, ChannelState};
pub use event::{MidiEvent, RawMessage};
pub use scaler::{scale_mcm, scale_zero_ext};
