//! Low-level DSP primitives used by the tone generator.
//!
//! Everything here is allocation-free and integer-only so it can run inside
//! the realtime block callback without touching the FPU or the allocator.

/// Complex 8-bit baseband sample.
pub mod iq;
/// NCO increment and symbol duration helpers.
pub mod nco;
/// Signed 8-bit sine table and the accumulator-to-index mapping.
pub mod sine;

pub use iq::IqSample;
pub use sine::{sine_at, SINE_TABLE_I8};
