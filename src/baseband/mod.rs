//! Realtime side of the transmit path.
//!
//! The application context builds a [`ToneJob`] and sends it down as a
//! [`Message`]. The [`EventDispatcher`] hands at most one message per block to
//! the processor, then asks it to fill the block. Progress flows back up as
//! [`ProgressReport`]s.

pub mod dispatcher;
pub mod job;
pub mod message;
pub mod stats;
pub mod tones;

pub use dispatcher::{Cadence, EventDispatcher};
pub use job::{ConfigureParams, JobError, SharedBlock, Symbol, ToneDefinition, ToneJob, ToneJobBuilder};
pub use message::{DecodeError, Message, MessageFrame, MessageId, MessageReceiver, ProgressReport, ProgressSink, FRAME_LEN};
#[cfg(feature = "rtrb")]
pub use message::FrameReceiver;
pub use stats::{BasebandStats, StatsSnapshot};
pub use tones::{ToneState, TonesProcessor};

use crate::dsp::IqSample;

/// A processor driven by the dispatcher once per sample block.
///
/// Both methods run on the realtime context: they must not block, allocate,
/// or take locks.
pub trait BasebandProcessor: Send {
    /// Fill `buffer` with the next block of baseband samples.
    fn execute(&mut self, buffer: &mut [IqSample]);

    /// Handle a downlink message delivered between blocks.
    fn on_message(&mut self, message: &Message);
}
