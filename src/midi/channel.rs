use log::{debug, trace};

use crate::error::{AudioError, AudioResult};
use crate::midi::event::{MidiEvent, RawMessage};
use crate::midi::scaler::scale_mcm;
use crate::MIDI_CHANNELS;

/// Per-channel voice and volume state.
///
/// The active-note count saturates at zero: stray Note-Offs on an idle
/// channel are a normal occurrence on real MIDI streams and must not
/// underflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelState {
    pub active_notes: u32,
    pub volume: f32,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            active_notes: 0,
            volume: 1.0,
        }
    }
}

/// What a processed message did, handed back to the caller so downstream
/// synthesis can pick up the rescaled velocity without the processor having
/// to know about it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelEvent {
    /// Note started; `velocity` is the 7-bit wire velocity rescaled to
    /// 16 bits with Min-Center-Max scaling.
    NoteOn { channel: u8, key: u8, velocity: u16 },
    NoteOff { channel: u8, key: u8 },
    /// Controller 7 (channel volume) was applied.
    Volume { channel: u8, volume: f32 },
    /// Any other controller; recorded but not interpreted here.
    Control { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: u16 },
    Unsupported { status: u8 },
}

/// Stateful interpreter for MIDI channel messages across all 16 channels.
///
/// One instance per pipeline; owned by whoever composes the pipeline and
/// driven synchronously from its frame loop. No internal locking, no global
/// state.
#[derive(Debug)]
pub struct ChannelProcessor {
    channels: [ChannelState; MIDI_CHANNELS],
    messages_processed: u64,
    unsupported_messages: u64,
    initialized: bool,
}

impl ChannelProcessor {
    pub fn new() -> Self {
        Self {
            channels: [ChannelState::default(); MIDI_CHANNELS],
            messages_processed: 0,
            unsupported_messages: 0,
            initialized: false,
        }
    }

    pub fn initialize(&mut self) -> AudioResult<()> {
        if self.initialized {
            return Err(AudioError::AlreadyInitialized);
        }

        self.channels = [ChannelState::default(); MIDI_CHANNELS];
        self.messages_processed = 0;
        self.unsupported_messages = 0;
        self.initialized = true;

        debug!("MIDI channel processor initialized ({MIDI_CHANNELS} channels)");
        Ok(())
    }

    /// Dispatch one 3-byte channel message.
    ///
    /// No format validation beyond bit masking: any byte values are accepted,
    /// and the channel index is always `status & 0x0F` so it cannot go out of
    /// range. Every accepted message bumps the processed counter, including
    /// kinds this core does not interpret.
    pub fn process_message(&mut self, status: u8, data1: u8, data2: u8) -> AudioResult<ChannelEvent> {
        if !self.initialized {
            return Err(AudioError::NotInitialized);
        }

        let event = MidiEvent::from_raw(RawMessage {
            status,
            data1,
            data2,
        });

        let outcome = match event {
            MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            } => {
                let state = &mut self.channels[channel as usize];
                state.active_notes += 1;

                let scaled = scale_mcm(velocity as u32, 7, 16)? as u16;
                trace!("note on ch {channel} key {key}: velocity {velocity} -> {scaled}");

                ChannelEvent::NoteOn {
                    channel,
                    key,
                    velocity: scaled,
                }
            }
            MidiEvent::NoteOff { channel, key, .. } => {
                let state = &mut self.channels[channel as usize];
                state.active_notes = state.active_notes.saturating_sub(1);
                trace!("note off ch {channel} key {key}");

                ChannelEvent::NoteOff { channel, key }
            }
            MidiEvent::ControlChange {
                channel,
                controller: 7,
                value,
            } => {
                let volume = value as f32 / 127.0;
                self.channels[channel as usize].volume = volume;
                debug!("ch {channel} volume set to {volume:.2}");

                ChannelEvent::Volume { channel, volume }
            }
            MidiEvent::ControlChange {
                channel,
                controller,
                value,
            } => {
                trace!("ch {channel} controller {controller} = {value} (ignored)");

                ChannelEvent::Control {
                    channel,
                    controller,
                    value,
                }
            }
            MidiEvent::PitchBend { channel, value } => {
                trace!("ch {channel} pitch bend {value}");

                ChannelEvent::PitchBend { channel, value }
            }
            MidiEvent::Unsupported { status } => {
                self.unsupported_messages += 1;
                trace!("unsupported message kind {status:#04x}");

                ChannelEvent::Unsupported { status }
            }
        };

        self.messages_processed += 1;
        Ok(outcome)
    }

    /// Pop and process every message queued by a producer thread.
    ///
    /// The queue is SPSC; this is the consumer end, called once per frame
    /// from the pipeline loop. Returns how many messages were handled.
    #[cfg(feature = "rtrb")]
    pub fn drain(&mut self, rx: &mut rtrb::Consumer<RawMessage>) -> AudioResult<usize> {
        let mut handled = 0;
        while let Ok(raw) = rx.pop() {
            self.process_message(raw.status, raw.data1, raw.data2)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Return all channels to their defaults and go back to idle. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        debug!(
            "MIDI channel processor shut down after {} messages ({} unsupported)",
            self.messages_processed, self.unsupported_messages
        );

        self.channels = [ChannelState::default(); MIDI_CHANNELS];
        self.initialized = false;
    }

    /// Exercise a Note-On/Note-Off pair and verify the velocity-scaling
    /// anchors. Leaves channel state as it found it.
    pub fn self_check(&mut self) -> bool {
        if !self.initialized {
            return false;
        }

        if scale_mcm(127, 7, 16) != Ok(65535) || scale_mcm(64, 7, 16) != Ok(32768) {
            return false;
        }

        let before = self.active_notes(0);

        match self.process_message(0x90, 60, 127) {
            Ok(ChannelEvent::NoteOn {
                velocity: 65535, ..
            }) => {}
            _ => return false,
        }
        if self.process_message(0x80, 60, 0).is_err() {
            return false;
        }

        self.active_notes(0) == before
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Active-note count for a channel. `channel` is masked to the low
    /// nibble, same as message dispatch.
    pub fn active_notes(&self, channel: u8) -> u32 {
        self.channels[(channel & 0x0F) as usize].active_notes
    }

    /// Current volume scalar for a channel, in [0.0, 1.0].
    pub fn volume(&self, channel: u8) -> f32 {
        self.channels[(channel & 0x0F) as usize].volume
    }

    pub fn messages_processed(&self) -> u64 {
        self.messages_processed
    }
}

impl Default for ChannelProcessor {
    fn default() -> Self {
        Self::new()
    }
}
