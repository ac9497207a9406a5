//! Sine wave lookup table for tone and carrier synthesis
//!
//! 256-entry table covering one full cycle, amplitude ±127.
//! Index 0 = 0°, 64 = 90°, 128 = 180°, 192 = 270°.
//!
//! The table is addressed by bits 25..18 of a 32-bit phase accumulator. The
//! mapping is part of the waveform contract: changing it changes every emitted
//! sample.

/// Number of entries in the sine table
pub const SINE_TABLE_LEN: usize = 256;

/// Accumulator bits that select a table entry.
pub const PHASE_INDEX_MASK: u32 = 0x03FC_0000;
/// Shift applied after masking to obtain the table index.
pub const PHASE_INDEX_SHIFT: u32 = 18;
/// Accumulator bits spanned by one full table cycle (index bits plus shift).
pub const TABLE_CYCLE_BITS: u32 = 8 + PHASE_INDEX_SHIFT;
/// Accumulator offset equal to a quarter cycle (90°) of the table.
pub const QUARTER_CYCLE: u32 = 64 << PHASE_INDEX_SHIFT;

/// Pre-computed `round(sin(2π·i/256) · 127)`
pub static SINE_TABLE_I8: [i8; SINE_TABLE_LEN] = [
    0, 3, 6, 9, 12, 16, 19, 22, 25, 28, 31, 34, 37, 40, 43, 46,
    49, 51, 54, 57, 60, 63, 65, 68, 71, 73, 76, 78, 81, 83, 85, 88,
    90, 92, 94, 96, 98, 100, 102, 104, 106, 107, 109, 111, 112, 113, 115, 116,
    117, 118, 120, 121, 122, 122, 123, 124, 125, 125, 126, 126, 126, 127, 127, 127,
    127, 127, 127, 127, 126, 126, 126, 125, 125, 124, 123, 122, 122, 121, 120, 118,
    117, 116, 115, 113, 112, 111, 109, 107, 106, 104, 102, 100, 98, 96, 94, 92,
    90, 88, 85, 83, 81, 78, 76, 73, 71, 68, 65, 63, 60, 57, 54, 51,
    49, 46, 43, 40, 37, 34, 31, 28, 25, 22, 19, 16, 12, 9, 6, 3,
    0, -3, -6, -9, -12, -16, -19, -22, -25, -28, -31, -34, -37, -40, -43, -46,
    -49, -51, -54, -57, -60, -63, -65, -68, -71, -73, -76, -78, -81, -83, -85, -88,
    -90, -92, -94, -96, -98, -100, -102, -104, -106, -107, -109, -111, -112, -113, -115, -116,
    -117, -118, -120, -121, -122, -122, -123, -124, -125, -125, -126, -126, -126, -127, -127, -127,
    -127, -127, -127, -127, -126, -126, -126, -125, -125, -124, -123, -122, -122, -121, -120, -118,
    -117, -116, -115, -113, -112, -111, -109, -107, -106, -104, -102, -100, -98, -96, -94, -92,
    -90, -88, -85, -83, -81, -78, -76, -73, -71, -68, -65, -63, -60, -57, -54, -51,
    -49, -46, -43, -40, -37, -34, -31, -28, -25, -22, -19, -16, -12, -9, -6, -3,
];

/// Table index selected by a phase accumulator value.
#[inline]
pub const fn phase_index(phase: u32) -> usize {
    ((phase & PHASE_INDEX_MASK) >> PHASE_INDEX_SHIFT) as usize
}

/// Sine value at an accumulator phase.
#[inline]
pub fn sine_at(phase: u32) -> i8 {
    SINE_TABLE_I8[phase_index(phase)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_cycle_wraps_index() {
        let cycle = 1u32 << TABLE_CYCLE_BITS;
        assert_eq!(phase_index(cycle - 1), SINE_TABLE_LEN - 1);
        assert_eq!(phase_index(cycle), 0);
        assert_eq!(QUARTER_CYCLE, cycle / 4);
    }

    #[test]
    fn test_table_cardinal_points() {
        assert_eq!(SINE_TABLE_I8[0], 0);
        assert_eq!(SINE_TABLE_I8[64], 127);
        assert_eq!(SINE_TABLE_I8[128], 0);
        assert_eq!(SINE_TABLE_I8[192], -127);
    }

    #[test]
    fn test_table_is_odd_symmetric() {
        for i in 1..SINE_TABLE_LEN {
            assert_eq!(SINE_TABLE_I8[i], -SINE_TABLE_I8[SINE_TABLE_LEN - i], "index {}", i);
        }
    }

    #[test]
    fn test_index_uses_bits_25_to_18() {
        assert_eq!(phase_index(0), 0);
        assert_eq!(phase_index(1 << 18), 1);
        assert_eq!(phase_index((1 << 18) - 1), 0);
        assert_eq!(phase_index(0xFF << 18), 255);
        // Bits above 25 wrap the table
        assert_eq!(phase_index(1 << 26), 0);
        assert_eq!(phase_index(0xFFFF_FFFF), 255);
    }

    #[test]
    fn test_quarter_cycle_offset() {
        assert_eq!(sine_at(QUARTER_CYCLE), 127);
        assert_eq!(sine_at(QUARTER_CYCLE.wrapping_mul(3)), -127);
    }
}
