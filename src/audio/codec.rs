//! Audio codec control interface.
//!
//! The device driver (I2C register writes, reset timing) lives behind
//! [`Codec`]; this crate only decides *when* to call it.

use thiserror::Error;

use super::i2s::I2sError;

/// Headphone volume in centibels (tenths of a dB).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Volume(i32);

impl Volume {
    pub const fn centibel(cb: i32) -> Self {
        Self(cb)
    }

    pub const fn decibel(db: i32) -> Self {
        Self(db * 10)
    }

    pub const fn centibels(self) -> i32 {
        self.0
    }
}

/// Gain range reported by the codec, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRange {
    pub min: Volume,
    pub max: Volume,
}

impl VolumeRange {
    pub fn contains(&self, volume: Volume) -> bool {
        volume >= self.min && volume <= self.max
    }

    pub fn clamp(&self, volume: Volume) -> Volume {
        volume.clamp(self.min, self.max)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("volume {requested} cB outside {min}..={max} cB")]
    VolumeOutOfRange { requested: i32, min: i32, max: i32 },

    #[error("register {reg} out of range (codec has {count})")]
    RegisterOutOfRange { reg: usize, count: usize },

    #[error("codec bus error: {0}")]
    Bus(String),

    #[error(transparent)]
    I2s(#[from] I2sError),
}

pub trait Codec: Send {
    fn name(&self) -> &str;

    fn init(&mut self) -> Result<(), CodecError>;
    fn reset(&mut self) -> Result<(), CodecError>;

    fn headphone_enable(&mut self);
    fn headphone_disable(&mut self);
    fn headphone_gain_range(&self) -> VolumeRange;
    /// Called only with a volume inside [`Codec::headphone_gain_range`].
    fn set_headphone_volume(&mut self, volume: Volume) -> Result<(), CodecError>;

    fn microphone_enable(&mut self);
    fn microphone_disable(&mut self);

    /// Number of readable registers.
    fn reg_count(&self) -> usize;
    /// Width of one register in bits.
    fn reg_bits(&self) -> usize;
    /// Called only with `reg < reg_count()`.
    fn reg_read(&mut self, reg: usize) -> Result<u32, CodecError>;
}
