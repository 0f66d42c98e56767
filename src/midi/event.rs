#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A raw 3-byte MIDI channel message as it arrives off the wire.
///
/// Ephemeral: decoded and dropped within the call that processes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

/// A decoded MIDI channel message.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: u16 },
    Unsupported { status: u8 },
}

impl MidiEvent {
    /// Decode a raw message. Data bytes are masked to 7 bits; the channel is
    /// the low nibble of the status byte, so it is always in 0..16. A Note-On
    /// with velocity 0 decodes as a Note-Off (running-status convention).
    pub fn from_raw(raw: RawMessage) -> Self {
        let channel = raw.status & 0x0F;
        let data1 = raw.data1 & 0x7F;
        let data2 = raw.data2 & 0x7F;

        match raw.status & 0xF0 {
            0x90 if data2 > 0 => MidiEvent::NoteOn {
                channel,
                key: data1,
                velocity: data2,
            },
            0x90 | 0x80 => MidiEvent::NoteOff {
                channel,
                key: data1,
                velocity: data2,
            },
            0xB0 => MidiEvent::ControlChange {
                channel,
                controller: data1,
                value: data2,
            },
            // 14-bit value: data1 is the low 7 bits, data2 the high 7.
            0xE0 => MidiEvent::PitchBend {
                channel,
                value: ((data2 as u16) << 7) | data1 as u16,
            },
            _ => MidiEvent::Unsupported { status: raw.status },
        }
    }
}
