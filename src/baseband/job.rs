//! Tone job parameters and the shared configuration block.
//!
//! A job is built once on the application side and then moved, by value, to
//! the realtime side. Nothing in it is mutated after handoff.

use thiserror::Error;

use crate::{MAX_SYMBOLS, TONE_DEF_COUNT};

/// One entry of the tone table: an NCO increment and how long it is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToneDefinition {
    /// Phase increment per sample. Zero marks the entry as silent.
    pub delta: u32,
    /// Symbol length in samples.
    pub duration: u32,
}

impl ToneDefinition {
    pub const SILENT: Self = Self { delta: 0, duration: 0 };

    pub const fn new(delta: u32, duration: u32) -> Self {
        Self { delta, duration }
    }

    #[inline]
    pub fn is_silent(&self) -> bool {
        self.delta == 0
    }
}

/// Scalar fields carried by the configure message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigureParams {
    /// Zero samples emitted before the first symbol.
    pub pre_silence: u32,
    /// Symbols of the stream the generator consumes.
    pub symbol_count: u8,
    /// FM phase increment per unit of tone amplitude.
    pub fm_delta: i32,
    /// Feed the decimated tone to the audio monitor.
    pub audio_monitor: bool,
    /// Symbols select table pairs instead of single entries.
    pub dual_tone: bool,
}

/// Fixed-size region holding the tone table and symbol stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedBlock {
    pub tone_defs: [ToneDefinition; TONE_DEF_COUNT],
    /// Length in samples of a silence symbol.
    pub silence: u32,
    pub symbols: [u8; MAX_SYMBOLS],
}

impl Default for SharedBlock {
    fn default() -> Self {
        Self {
            tone_defs: [ToneDefinition::SILENT; TONE_DEF_COUNT],
            silence: 0,
            symbols: [0; MAX_SYMBOLS],
        }
    }
}

/// What a symbol code resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Silence,
    Tone {
        delta_a: u32,
        delta_b: u32,
        duration: u32,
    },
}

impl SharedBlock {
    /// Resolve a symbol code against the tone table.
    ///
    /// Entry `c` decides whether code `c` is a tone (non-zero delta) and how
    /// long it is held. Single-tone plays entry `c`; dual-tone plays the pair
    /// `(2c, 2c + 1)`, so codes 16 and up are silence there.
    #[inline]
    pub fn classify(&self, code: u8, dual_tone: bool) -> Symbol {
        let code = code as usize;
        let def = match self.tone_defs.get(code) {
            Some(def) if !def.is_silent() => def,
            _ => return Symbol::Silence,
        };

        if !dual_tone {
            return Symbol::Tone {
                delta_a: def.delta,
                delta_b: 0,
                duration: def.duration,
            };
        }

        match (self.tone_defs.get(code * 2), self.tone_defs.get(code * 2 + 1)) {
            (Some(a), Some(b)) => Symbol::Tone {
                delta_a: a.delta,
                delta_b: b.delta,
                duration: def.duration,
            },
            _ => Symbol::Silence,
        }
    }
}

/// A complete transmission: message parameters plus the shared block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToneJob {
    pub params: ConfigureParams,
    pub block: SharedBlock,
}

impl ToneJob {
    pub fn builder() -> ToneJobBuilder {
        ToneJobBuilder::default()
    }

    /// The part of the symbol stream the generator will consume.
    pub fn symbols(&self) -> &[u8] {
        &self.block.symbols[..self.params.symbol_count as usize]
    }

    /// Total samples the job emits, pre-silence included.
    pub fn total_samples(&self) -> u64 {
        let body: u64 = self
            .symbols()
            .iter()
            .map(|&code| match self.block.classify(code, self.params.dual_tone) {
                Symbol::Silence => self.block.silence as u64,
                Symbol::Tone { duration, .. } => duration as u64,
            })
            .sum();
        self.params.pre_silence as u64 + body
    }
}

/// Errors raised while assembling a job.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum JobError {
    #[error("symbol stream holds {count} symbols, at most {max} fit a job", max = u8::MAX)]
    TooManySymbols { count: usize },

    #[error("tone index {0} is outside the {max}-entry table", max = TONE_DEF_COUNT)]
    ToneIndexOutOfRange(usize),
}

/// Builder validating a job before it is handed to the realtime side.
#[derive(Debug, Clone, Default)]
pub struct ToneJobBuilder {
    job: ToneJob,
    symbol_len: usize,
    bad_tone_index: Option<usize>,
}

impl ToneJobBuilder {
    pub fn pre_silence(mut self, samples: u32) -> Self {
        self.job.params.pre_silence = samples;
        self
    }

    /// Length in samples of every silence symbol.
    pub fn silence(mut self, samples: u32) -> Self {
        self.job.block.silence = samples;
        self
    }

    pub fn fm_delta(mut self, fm_delta: i32) -> Self {
        self.job.params.fm_delta = fm_delta;
        self
    }

    pub fn audio_monitor(mut self, enabled: bool) -> Self {
        self.job.params.audio_monitor = enabled;
        self
    }

    pub fn dual_tone(mut self, enabled: bool) -> Self {
        self.job.params.dual_tone = enabled;
        self
    }

    /// Set table entry `index`.
    pub fn tone(mut self, index: usize, def: ToneDefinition) -> Self {
        match self.job.block.tone_defs.get_mut(index) {
            Some(slot) => *slot = def,
            None => {
                self.bad_tone_index.get_or_insert(index);
            }
        }
        self
    }

    pub fn symbols(mut self, symbols: &[u8]) -> Self {
        self.symbol_len = symbols.len();
        let n = symbols.len().min(MAX_SYMBOLS);
        self.job.block.symbols = [0; MAX_SYMBOLS];
        self.job.block.symbols[..n].copy_from_slice(&symbols[..n]);
        self
    }

    pub fn build(self) -> Result<ToneJob, JobError> {
        if let Some(index) = self.bad_tone_index {
            return Err(JobError::ToneIndexOutOfRange(index));
        }
        let symbol_count = u8::try_from(self.symbol_len)
            .map_err(|_| JobError::TooManySymbols { count: self.symbol_len })?;

        let mut job = self.job;
        job.params.symbol_count = symbol_count;
        Ok(job)
    }
}
