//! Generator configuration.
//!
//! One value object holds every tunable of the transmit path. The physical
//! units (Hz, ms) are converted to sample counts and phase increments here,
//! never inside the realtime code.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{dsp::nco, AUDIO_DECIMATION, BLOCK_SIZE, SAMPLE_RATE};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Baseband sample rate (Hz).
    pub sample_rate: u32,
    /// Complex samples per block.
    pub block_size: usize,
    /// Carrier deviation for a full-scale tone (Hz).
    pub fm_deviation_hz: u32,
    /// Feed the decimated tone to the audio monitor.
    pub audio_monitor: bool,
    /// Silence before the first symbol (ms).
    pub pre_silence_ms: u32,
    /// Length of a silence symbol (ms).
    pub symbol_silence_ms: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            block_size: BLOCK_SIZE,
            fm_deviation_hz: 5_000,
            audio_monitor: true,
            pre_silence_ms: 50,
            symbol_silence_ms: 50,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("sample rate must be non-zero")]
    ZeroSampleRate,

    #[error("block size {0} is not a non-zero multiple of the audio decimation ratio")]
    BadBlockSize(usize),

    #[error("deviation {deviation_hz} Hz exceeds Nyquist for {sample_rate} Hz")]
    DeviationTooLarge { deviation_hz: u32, sample_rate: u32 },
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if self.block_size == 0 || self.block_size % AUDIO_DECIMATION as usize != 0 {
            return Err(ConfigError::BadBlockSize(self.block_size));
        }
        if self.fm_deviation_hz >= self.sample_rate / 2 {
            return Err(ConfigError::DeviationTooLarge {
                deviation_hz: self.fm_deviation_hz,
                sample_rate: self.sample_rate,
            });
        }
        Ok(())
    }

    /// Time budget for one block: `block_size / sample_rate`.
    pub fn block_period(&self) -> Duration {
        let nanos = self.block_size as u64 * 1_000_000_000 / self.sample_rate.max(1) as u64;
        Duration::from_nanos(nanos)
    }

    /// FM phase increment per unit of tone amplitude.
    pub fn fm_delta(&self) -> i32 {
        nco::fm_delta(self.fm_deviation_hz, self.sample_rate)
    }

    pub fn samples_from_ms(&self, ms: u32) -> u32 {
        nco::samples_from_ms(ms, self.sample_rate)
    }

    pub fn pre_silence_samples(&self) -> u32 {
        self.samples_from_ms(self.pre_silence_ms)
    }

    pub fn symbol_silence_samples(&self) -> u32 {
        self.samples_from_ms(self.symbol_silence_ms)
    }

    /// Monitor sample rate after decimation.
    pub fn monitor_rate(&self) -> u32 {
        self.sample_rate / AUDIO_DECIMATION
    }
}
