//! Fixed-point conversions between physical units and oscillator settings.
//!
//! All rounding is round-half-up in integer arithmetic so the same inputs give
//! the same table on every host.

use super::sine::TABLE_CYCLE_BITS;

/// Phase increment for `freq_hz` at `sample_rate`
///
/// increment = round(freq · 2^32 / sample_rate), wrapped to 32 bits
#[inline]
pub fn nco_increment(freq_hz: u32, sample_rate: u32) -> u32 {
    let sample_rate = sample_rate.max(1) as u64;
    ((((freq_hz as u64) << 32) + sample_rate / 2) / sample_rate) as u32
}

/// Samples a symbol is held for at `baud`
///
/// duration = round(sample_rate / baud)
#[inline]
pub fn symbol_duration(baud: u32, sample_rate: u32) -> u32 {
    let baud = baud.max(1);
    (sample_rate + baud / 2) / baud
}

/// Samples in `ms` milliseconds, rounded.
#[inline]
pub fn samples_from_ms(ms: u32, sample_rate: u32) -> u32 {
    ((ms as u64 * sample_rate as u64 + 500) / 1000) as u32
}

/// FM phase increment per unit of tone amplitude.
///
/// The carrier is read through the sine table, which wraps every
/// 2^`TABLE_CYCLE_BITS` accumulator units (bits 25..18), not every 2^32. A full-scale
/// tone sample (±127) then advances the carrier by `deviation_hz` cycles per
/// second.
///
/// delta = round(round(deviation · 2^26 / sample_rate) / 127)
#[inline]
pub fn fm_delta(deviation_hz: u32, sample_rate: u32) -> i32 {
    let sample_rate = sample_rate.max(1) as u64;
    let full_scale = (((deviation_hz as u64) << TABLE_CYCLE_BITS) + sample_rate / 2) / sample_rate;
    ((full_scale + 63) / 127) as i32
}

/// Carrier frequency produced by a phase step of `step` accumulator units per
/// sample, in Hz.
#[inline]
pub fn table_step_hz(step: u64, sample_rate: u32) -> f64 {
    step as f64 * sample_rate as f64 / (1u64 << TABLE_CYCLE_BITS) as f64
}
