//! DTMF dialing sequences.
//!
//! Each key is a row/column tone pair. Key `k` (position in [`KEYS`]) is
//! stored as table pair `(2k, 2k + 1)` and the job runs in dual-tone mode,
//! so the symbol code for a key is simply its index. Keys are separated by
//! silence symbols.

use crate::{
    baseband::job::{ToneDefinition, ToneJob},
    config::GeneratorConfig,
    dsp::nco::nco_increment,
    modem::ModemError,
    SILENCE_CODE,
};

/// Keypad in row-major order.
pub const KEYS: &str = "123A456B789C*0#D";

const ROW_FREQS: [u32; 4] = [697, 770, 852, 941];
const COL_FREQS: [u32; 4] = [1209, 1336, 1477, 1633];

/// Longest dial string that fits one job (key + gap per digit, no trailing gap).
pub const MAX_DIGITS: usize = (u8::MAX as usize + 1) / 2;

/// Symbol code of a key, if it is on the keypad.
pub fn key_code(key: char) -> Option<u8> {
    let key = key.to_ascii_uppercase();
    KEYS.chars().position(|k| k == key).map(|i| i as u8)
}

/// Row and column frequency of key code `code`.
pub fn key_freqs(code: u8) -> (u32, u32) {
    let code = code as usize;
    (ROW_FREQS[code / 4], COL_FREQS[code % 4])
}

/// Build a dual-tone job dialing `digits`.
pub fn build_job(
    digits: &str,
    tone_ms: u32,
    gap_ms: u32,
    config: &GeneratorConfig,
) -> Result<ToneJob, ModemError> {
    let len = digits.chars().count();
    if len > MAX_DIGITS {
        return Err(ModemError::MessageTooLong { len, max: MAX_DIGITS });
    }

    let mut symbols = Vec::with_capacity(len * 2);
    for (i, c) in digits.chars().enumerate() {
        let code = key_code(c).ok_or(ModemError::InvalidDigit(c))?;
        if i > 0 {
            symbols.push(SILENCE_CODE);
        }
        symbols.push(code);
    }

    let duration = config.samples_from_ms(tone_ms);
    let mut builder = ToneJob::builder()
        .dual_tone(true)
        .pre_silence(config.pre_silence_samples())
        .silence(config.samples_from_ms(gap_ms))
        .fm_delta(config.fm_delta())
        .audio_monitor(config.audio_monitor);

    // The 16 pairs fill all 32 entries, so entry `code` (whose delta marks the
    // key as a tone and whose duration times it) is always set as well.
    for code in 0..KEYS.len() as u8 {
        let (row, col) = key_freqs(code);
        let pair = code as usize * 2;
        builder = builder
            .tone(pair, ToneDefinition::new(nco_increment(row, config.sample_rate), duration))
            .tone(pair + 1, ToneDefinition::new(nco_increment(col, config.sample_rate), duration));
    }

    let job = builder.symbols(&symbols).build()?;
    log::debug!("DTMF {:?}: {} symbols", digits, job.params.symbol_count);
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseband::job::Symbol;

    #[test]
    fn test_key_layout() {
        assert_eq!(key_code('1'), Some(0));
        assert_eq!(key_code('d'), Some(15));
        assert_eq!(key_code('#'), Some(14));
        assert_eq!(key_code('x'), None);

        assert_eq!(key_freqs(key_code('5').unwrap()), (770, 1336));
        assert_eq!(key_freqs(key_code('*').unwrap()), (941, 1209));
    }

    #[test]
    fn test_job_layout() {
        let config = GeneratorConfig::default();
        let job = build_job("19#", 70, 30, &config).unwrap();

        assert!(job.params.dual_tone);
        assert_eq!(job.symbols(), &[0, SILENCE_CODE, 10, SILENCE_CODE, 14]);
        assert_eq!(job.block.silence, config.samples_from_ms(30));

        match job.block.classify(10, true) {
            Symbol::Tone { delta_a, delta_b, duration } => {
                assert_eq!(delta_a, nco_increment(852, config.sample_rate));
                assert_eq!(delta_b, nco_increment(1477, config.sample_rate));
                assert_eq!(duration, config.samples_from_ms(70));
            }
            other => panic!("expected tone, got {:?}", other),
        }
        assert_eq!(job.block.classify(SILENCE_CODE, true), Symbol::Silence);
    }

    #[test]
    fn test_every_key_is_a_timed_tone() {
        let config = GeneratorConfig::default();
        let job = build_job("0", 25, 10, &config).unwrap();
        let duration = config.samples_from_ms(25);

        for code in 0..KEYS.len() as u8 {
            let (row, col) = key_freqs(code);
            assert_eq!(
                job.block.classify(code, true),
                Symbol::Tone {
                    delta_a: nco_increment(row, config.sample_rate),
                    delta_b: nco_increment(col, config.sample_rate),
                    duration,
                },
                "key {}",
                code
            );
            assert_eq!(job.block.tone_defs[code as usize].duration, duration);
        }
    }

    #[test]
    fn test_invalid_digit() {
        let config = GeneratorConfig::default();
        assert_eq!(
            build_job("12x", 70, 30, &config),
            Err(ModemError::InvalidDigit('x'))
        );
    }

    #[test]
    fn test_digit_limit() {
        let config = GeneratorConfig::default();
        let digits = "1".repeat(MAX_DIGITS);
        assert_eq!(build_job(&digits, 70, 30, &config).unwrap().params.symbol_count, 255);
        assert!(build_job(&"1".repeat(MAX_DIGITS + 1), 70, 30, &config).is_err());
    }
}
