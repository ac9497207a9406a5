//! Symbol-table generation.
//!
//! Turns a named modem (mark/space pair + baud rate) and a text message into
//! a [`ToneJob`]: a 32-entry tone table and the symbol stream that keys it.

pub mod dtmf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    baseband::job::{JobError, ToneDefinition, ToneJob},
    config::GeneratorConfig,
    dsp::nco::{nco_increment, symbol_duration},
};

/// Table entry keyed for a 0 bit.
pub const SPACE: u8 = 0;
/// Table entry keyed for a 1 bit.
pub const MARK: u8 = 1;

/// Symbols per character: start bit, eight data bits, stop bit.
const SYMBOLS_PER_CHAR: usize = 10;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    /// Audio frequency-shift keying
    Afsk,
    /// Frequency-shift keying
    Fsk,
    /// Phase-shift keying
    Psk,
    /// Tones placed as on a single-sideband voice channel (RTTY)
    Ssb,
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModemDef {
    pub name: &'static str,
    pub modulation: Modulation,
    pub mark_freq: u16,
    pub space_freq: u16,
    pub baudrate: u16,
}

pub const MODEM_DEFS: [ModemDef; 7] = [
    ModemDef { name: "Bell202", modulation: Modulation::Afsk, mark_freq: 1200, space_freq: 2200, baudrate: 1200 },
    ModemDef { name: "Bell103", modulation: Modulation::Afsk, mark_freq: 1270, space_freq: 1070, baudrate: 300 },
    ModemDef { name: "V21", modulation: Modulation::Afsk, mark_freq: 980, space_freq: 1180, baudrate: 300 },
    ModemDef { name: "V23 M1", modulation: Modulation::Afsk, mark_freq: 1300, space_freq: 1700, baudrate: 600 },
    ModemDef { name: "V23 M2", modulation: Modulation::Afsk, mark_freq: 1300, space_freq: 2100, baudrate: 1200 },
    ModemDef { name: "RTTY US", modulation: Modulation::Ssb, mark_freq: 2295, space_freq: 2125, baudrate: 45 },
    ModemDef { name: "RTTY EU", modulation: Modulation::Ssb, mark_freq: 2125, space_freq: 1955, baudrate: 45 },
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModemError {
    #[error("no modem named {0:?}")]
    UnknownModem(String),

    #[error("{0:?} modulation cannot be produced by the tone generator")]
    UnsupportedModulation(Modulation),

    #[error("message of {len} characters exceeds the {max}-character limit")]
    MessageTooLong { len: usize, max: usize },

    #[error("character {0:?} is not ASCII")]
    NonAscii(char),

    #[error("invalid DTMF key {0:?}")]
    InvalidDigit(char),

    #[error(transparent)]
    Job(#[from] JobError),
}

/// Look a modem up by name, ignoring case.
pub fn find(name: &str) -> Result<&'static ModemDef, ModemError> {
    MODEM_DEFS
        .iter()
        .find(|def| def.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ModemError::UnknownModem(name.to_string()))
}

/// Longest message that fits one job.
pub const fn max_message_len() -> usize {
    u8::MAX as usize / SYMBOLS_PER_CHAR
}

impl ModemDef {
    /// Space and mark table entries at `sample_rate`.
    pub fn tone_defs(&self, sample_rate: u32) -> (ToneDefinition, ToneDefinition) {
        let duration = symbol_duration(self.baudrate as u32, sample_rate);
        (
            ToneDefinition::new(nco_increment(self.space_freq as u32, sample_rate), duration),
            ToneDefinition::new(nco_increment(self.mark_freq as u32, sample_rate), duration),
        )
    }

    /// Build a job sending `message` as 8N1 characters.
    pub fn build_job(&self, message: &str, config: &GeneratorConfig) -> Result<ToneJob, ModemError> {
        if self.modulation == Modulation::Psk {
            return Err(ModemError::UnsupportedModulation(self.modulation));
        }

        let len = message.chars().count();
        if len > max_message_len() {
            return Err(ModemError::MessageTooLong {
                len,
                max: max_message_len(),
            });
        }

        let mut symbols = Vec::with_capacity(len * SYMBOLS_PER_CHAR);
        for c in message.chars() {
            if !c.is_ascii() {
                return Err(ModemError::NonAscii(c));
            }
            frame_byte(c as u8, &mut symbols);
        }

        let (space, mark) = self.tone_defs(config.sample_rate);
        let job = ToneJob::builder()
            .pre_silence(config.pre_silence_samples())
            .silence(config.symbol_silence_samples())
            .fm_delta(config.fm_delta())
            .audio_monitor(config.audio_monitor)
            .tone(SPACE as usize, space)
            .tone(MARK as usize, mark)
            .symbols(&symbols)
            .build()?;

        log::debug!(
            "{}: {} chars -> {} symbols, {} samples",
            self.name,
            len,
            job.params.symbol_count,
            job.total_samples()
        );
        Ok(job)
    }
}

/// Append one asynchronous-serial character: start bit, data LSB first, stop bit.
fn frame_byte(byte: u8, symbols: &mut Vec<u8>) {
    symbols.push(SPACE);
    for bit in 0..8 {
        symbols.push(if byte & (1 << bit) != 0 { MARK } else { SPACE });
    }
    symbols.push(MARK);
}
