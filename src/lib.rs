pub mod audio; // Monitor sink, codec and I2S control
pub mod baseband; // Realtime tone generator and its message protocol
pub mod config;
#[cfg(feature = "rtrb")]
pub mod control; // Application-side transmitter handle
pub mod dsp;
pub mod freqman;
pub mod modem; // Symbol-table generation

/// Baseband sample rate of the transmit path (Hz).
pub const SAMPLE_RATE: u32 = 1_536_000;
/// Complex samples per block delivered by the driver.
pub const BLOCK_SIZE: usize = 2048;
/// One audio monitor sample is kept for every `AUDIO_DECIMATION` tone samples.
pub const AUDIO_DECIMATION: u32 = 64;
/// Samples per audio monitor frame.
pub const AUDIO_FRAME_LEN: usize = BLOCK_SIZE / AUDIO_DECIMATION as usize;
/// Entries in a job's tone-definition table.
pub const TONE_DEF_COUNT: usize = 32;
/// Capacity of a job's symbol stream. `symbol_count` is a u8, so at most 255 are used.
pub const MAX_SYMBOLS: usize = 256;
/// Lowest symbol code that always means silence.
pub const SILENCE_CODE: u8 = TONE_DEF_COUNT as u8;
