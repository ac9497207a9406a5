//! Downlink and uplink message types.
//!
//! The downlink carries one kind of message, a configure request owning the
//! whole [`ToneJob`]. The uplink carries [`ProgressReport`]s. Raw byte frames
//! can also cross the boundary; they are decoded through [`Message::decode`],
//! which validates the tag and every field before a typed message exists.

#[cfg(feature = "rtrb")]
use std::sync::Arc;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};
use thiserror::Error;

#[cfg(feature = "rtrb")]
use crate::baseband::stats::BasebandStats;
use crate::baseband::job::{ConfigureParams, SharedBlock, ToneDefinition, ToneJob};
use crate::{MAX_SYMBOLS, TONE_DEF_COUNT};

/// Wire tags. Anything else is rejected on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageId {
    TonesConfigure = 0x01,
}

impl TryFrom<u8> for MessageId {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(MessageId::TonesConfigure),
            other => Err(DecodeError::UnknownTag(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Latch a new job and start transmitting it.
    TonesConfigure(ToneJob),
}

// Frame layout (little endian):
//   0      tag
//   1..5   pre_silence      u32
//   5      symbol_count     u8
//   6..10  fm_delta         i32
//   10     audio_monitor    bool
//   11     dual_tone        bool
//   12..16 silence          u32
//   16..   tone table       32 x (delta u32, duration u32)
//   ..end  symbol stream    256 x u8
const TONE_TABLE_OFFSET: usize = 16;
const SYMBOLS_OFFSET: usize = TONE_TABLE_OFFSET + TONE_DEF_COUNT * 8;

/// Encoded size of every downlink frame.
pub const FRAME_LEN: usize = SYMBOLS_OFFSET + MAX_SYMBOLS;

/// A raw downlink frame.
pub type MessageFrame = [u8; FRAME_LEN];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame is {actual} bytes, expected {expected}")]
    Length { expected: usize, actual: usize },

    #[error("unknown message tag 0x{0:02x}")]
    UnknownTag(u8),

    #[error("invalid boolean 0x{value:02x} at offset {offset}")]
    InvalidBool { offset: usize, value: u8 },
}

impl Message {
    pub fn id(&self) -> MessageId {
        match self {
            Message::TonesConfigure(_) => MessageId::TonesConfigure,
        }
    }

    pub fn encode(&self) -> MessageFrame {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = self.id() as u8;

        match self {
            Message::TonesConfigure(job) => {
                let p = &job.params;
                frame[1..5].copy_from_slice(&p.pre_silence.to_le_bytes());
                frame[5] = p.symbol_count;
                frame[6..10].copy_from_slice(&p.fm_delta.to_le_bytes());
                frame[10] = p.audio_monitor as u8;
                frame[11] = p.dual_tone as u8;
                frame[12..16].copy_from_slice(&job.block.silence.to_le_bytes());

                for (i, def) in job.block.tone_defs.iter().enumerate() {
                    let at = TONE_TABLE_OFFSET + i * 8;
                    frame[at..at + 4].copy_from_slice(&def.delta.to_le_bytes());
                    frame[at + 4..at + 8].copy_from_slice(&def.duration.to_le_bytes());
                }
                frame[SYMBOLS_OFFSET..].copy_from_slice(&job.block.symbols);
            }
        }

        frame
    }

    pub fn decode(frame: &[u8]) -> Result<Self, DecodeError> {
        if frame.len() != FRAME_LEN {
            return Err(DecodeError::Length {
                expected: FRAME_LEN,
                actual: frame.len(),
            });
        }

        match MessageId::try_from(frame[0])? {
            MessageId::TonesConfigure => {
                let params = ConfigureParams {
                    pre_silence: read_u32(frame, 1),
                    symbol_count: frame[5],
                    fm_delta: read_u32(frame, 6) as i32,
                    audio_monitor: read_bool(frame, 10)?,
                    dual_tone: read_bool(frame, 11)?,
                };

                let mut block = SharedBlock {
                    silence: read_u32(frame, 12),
                    ..SharedBlock::default()
                };
                for (i, def) in block.tone_defs.iter_mut().enumerate() {
                    let at = TONE_TABLE_OFFSET + i * 8;
                    *def = ToneDefinition::new(read_u32(frame, at), read_u32(frame, at + 4));
                }
                block.symbols.copy_from_slice(&frame[SYMBOLS_OFFSET..]);

                Ok(Message::TonesConfigure(ToneJob { params, block }))
            }
        }
    }
}

impl TryFrom<&[u8]> for Message {
    type Error = DecodeError;

    fn try_from(frame: &[u8]) -> Result<Self, Self::Error> {
        Message::decode(frame)
    }
}

#[inline]
fn read_u32(frame: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([frame[at], frame[at + 1], frame[at + 2], frame[at + 3]])
}

#[inline]
fn read_bool(frame: &[u8], offset: usize) -> Result<bool, DecodeError> {
    match frame[offset] {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(DecodeError::InvalidBool { offset, value }),
    }
}

/// Uplink notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressReport {
    pub done: bool,
    /// Index into the symbol stream. Meaningful only while `done` is false.
    pub symbol_index: u32,
}

impl ProgressReport {
    pub const fn progress(symbol_index: u32) -> Self {
        Self { done: false, symbol_index }
    }

    pub const fn done(symbol_index: u32) -> Self {
        Self { done: true, symbol_index }
    }
}

/// Downlink source polled by the dispatcher between blocks.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<Message>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<Message> {
    fn pop(&mut self) -> Option<Message> {
        Consumer::pop(self).ok()
    }
}

/// Downlink of raw frames. Frames that fail to decode are dropped and counted.
#[cfg(feature = "rtrb")]
pub struct FrameReceiver {
    rx: Consumer<MessageFrame>,
    stats: Arc<BasebandStats>,
}

#[cfg(feature = "rtrb")]
impl FrameReceiver {
    pub fn new(rx: Consumer<MessageFrame>, stats: Arc<BasebandStats>) -> Self {
        Self { rx, stats }
    }
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for FrameReceiver {
    fn pop(&mut self) -> Option<Message> {
        let frame = self.rx.pop().ok()?;
        match Message::decode(&frame) {
            Ok(message) => Some(message),
            Err(_) => {
                self.stats.record_malformed_frame();
                None
            }
        }
    }
}

/// Uplink destination. `post` never blocks; it returns false if the report was dropped.
pub trait ProgressSink: Send {
    fn post(&mut self, report: ProgressReport) -> bool;
}

#[cfg(feature = "rtrb")]
impl ProgressSink for Producer<ProgressReport> {
    fn post(&mut self, report: ProgressReport) -> bool {
        self.push(report).is_ok()
    }
}
