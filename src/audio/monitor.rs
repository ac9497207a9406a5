//! Audio monitor path
//!
//! The tone generator runs at the baseband rate. For local monitoring the
//! tone (before FM) is decimated by a fixed ratio, packed into fixed-size
//! frames, and each full frame is written to an [`AudioMonitor`] once.
//!
//!   1.536 MHz / 64 = 24 kHz monitor rate
//!   2048-sample block / 64 = one 32-sample frame per block

#[cfg(feature = "rtrb")]
use rtrb::Producer;

use crate::{AUDIO_DECIMATION, AUDIO_FRAME_LEN};

/// Scale from an 8-bit tone sample to 16-bit PCM.
const PCM_SCALE: i16 = 128;

/// One frame of monitor PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFrame {
    pub samples: [i16; AUDIO_FRAME_LEN],
}

impl Default for AudioFrame {
    fn default() -> Self {
        Self {
            samples: [0; AUDIO_FRAME_LEN],
        }
    }
}

/// Sink for monitor audio. Called from the realtime context.
pub trait AudioMonitor: Send {
    fn configure(&mut self, stereo: bool);
    fn write(&mut self, frame: &AudioFrame);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMonitor;

impl AudioMonitor for NullMonitor {
    fn configure(&mut self, _stereo: bool) {}
    fn write(&mut self, _frame: &AudioFrame) {}
}

/// Forwards monitor samples into a ring buffer for the host sound card.
///
/// Samples that do not fit are dropped.
#[cfg(feature = "rtrb")]
pub struct RingMonitor {
    tx: Producer<i16>,
    stereo: bool,
    dropped: u64,
}

#[cfg(feature = "rtrb")]
impl RingMonitor {
    pub fn new(tx: Producer<i16>) -> Self {
        Self {
            tx,
            stereo: false,
            dropped: 0,
        }
    }

    pub fn is_stereo(&self) -> bool {
        self.stereo
    }

    /// Samples lost to a full ring since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(feature = "rtrb")]
impl AudioMonitor for RingMonitor {
    fn configure(&mut self, stereo: bool) {
        self.stereo = stereo;
    }

    fn write(&mut self, frame: &AudioFrame) {
        let channels = if self.stereo { 2 } else { 1 };
        for &sample in &frame.samples {
            for _ in 0..channels {
                if self.tx.push(sample).is_err() {
                    self.dropped += 1;
                }
            }
        }
    }
}

/// Decimating tap between the tone generator and an [`AudioMonitor`].
#[derive(Debug, Clone, Default)]
pub struct MonitorTap {
    /// Tone samples to skip before the next one is kept.
    countdown: u32,
    frame: AudioFrame,
    cursor: usize,
}

impl MonitorTap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh frame; the next tone sample is kept.
    pub fn reset(&mut self) {
        self.countdown = 0;
        self.cursor = 0;
    }

    /// Offer one tone sample. Returns true if it was kept.
    ///
    /// When the frame fills it is written to `monitor` and a new frame begins.
    #[inline]
    pub fn push<A: AudioMonitor>(&mut self, tone: i8, monitor: &mut A) -> bool {
        if self.countdown > 0 {
            self.countdown -= 1;
            return false;
        }
        self.countdown = AUDIO_DECIMATION - 1;

        self.frame.samples[self.cursor] = tone as i16 * PCM_SCALE;
        self.cursor += 1;
        if self.cursor == AUDIO_FRAME_LEN {
            monitor.write(&self.frame);
            self.cursor = 0;
        }
        true
    }

    /// Samples waiting in the unfinished frame.
    pub fn pending(&self) -> usize {
        self.cursor
    }
}
