use std::sync::Arc;

use crate::{
    audio::monitor::{AudioMonitor, MonitorTap},
    baseband::{
        job::{Symbol, ToneJob},
        message::{Message, ProgressReport, ProgressSink},
        stats::BasebandStats,
        BasebandProcessor,
    },
    dsp::{
        sine::{sine_at, QUARTER_CYCLE},
        IqSample,
    },
};

/*
Tone Generator
==============

Synthesises FM-modulated tone sequences one baseband sample at a time.

A job is a stream of symbol codes. Each code resolves (through the job's
tone table) to either a tone held for `duration` samples or a silence held
for the job's silence length:

  symbols   [  0  ][ 1 ][   32 (silence)   ][ done ]
  samples   |-D0--|-D1-|------silence------|

Per sample:

  1. Silence pending  -> emit the zero sample. When silence ends, both tone
                         phases restart from zero.
  2. Symbol exhausted -> fetch the next code, report progress, classify it.
                         Past the end of the stream the job is done.
  3. Tone             -> NCO lookup (or two lookups halved and summed in
                         dual-tone mode), then FM: the tone sample scaled by
                         `fm_delta` is integrated into the carrier phase and
                         the carrier is read back as I = sin(phase),
                         Q = sin(phase + 90°).
  4. Monitor          -> the tone sample goes through the 1:64 decimating tap.

Consecutive tones share their phase accumulators (continuous phase keying).
Zero-length symbols emit nothing; the next symbol is fetched in the same slot.

State
-----

    Idle ──configure──▶ Silence/ActiveTone ◀──▶ (symbol boundary)
     ▲                                                │
     └──────────────── done reported ◀── stream end ──┘
*/

/// Where the generator is within its job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneState {
    /// No job latched. Every block is zero.
    Idle,
    /// Emitting zero samples (pre-silence or a silence symbol).
    Silence,
    /// Emitting a tone.
    ActiveTone,
    /// Current symbol finished; the next slot fetches a new one.
    SymbolBoundary,
}

pub struct TonesProcessor<P: ProgressSink, A: AudioMonitor> {
    // Latched job (private copy, never shared)
    job: ToneJob,
    configured: bool,

    // Symbol sequencing
    symbol_index: usize,
    sample_count: u32,  // tone samples left in the current symbol
    silence_count: u32, // zero samples left before the next symbol

    // Oscillators
    tone_a_delta: u32,
    tone_b_delta: u32,
    tone_a_phase: u32,
    tone_b_phase: u32,
    carrier_phase: u32,

    tap: MonitorTap,

    progress: P,
    monitor: A,
    stats: Arc<BasebandStats>,
}

impl<P: ProgressSink, A: AudioMonitor> TonesProcessor<P, A> {
    pub fn new(progress: P, monitor: A, stats: Arc<BasebandStats>) -> Self {
        Self {
            job: ToneJob::default(),
            configured: false,
            symbol_index: 0,
            sample_count: 0,
            silence_count: 0,
            tone_a_delta: 0,
            tone_b_delta: 0,
            tone_a_phase: 0,
            tone_b_phase: 0,
            carrier_phase: 0,
            tap: MonitorTap::new(),
            progress,
            monitor,
            stats,
        }
    }

    /// Latch `job` and start it from the first symbol.
    ///
    /// Ignored (and counted) while another job is still running; the running
    /// job is left untouched.
    pub fn configure(&mut self, job: &ToneJob) {
        if self.configured {
            self.stats.record_rejected_configure();
            return;
        }

        self.job = *job;

        self.symbol_index = 0;
        self.sample_count = 0;
        self.silence_count = job.params.pre_silence;
        self.tone_a_delta = 0;
        self.tone_b_delta = 0;
        self.tone_a_phase = 0;
        self.tone_b_phase = 0;
        self.carrier_phase = 0;
        self.tap.reset();

        if job.params.audio_monitor {
            self.monitor.configure(false);
        }

        self.configured = true;
        self.stats.record_job_started();
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Index of the next symbol to be fetched.
    pub fn symbol_index(&self) -> usize {
        self.symbol_index
    }

    pub fn state(&self) -> ToneState {
        if !self.configured {
            ToneState::Idle
        } else if self.silence_count > 0 {
            ToneState::Silence
        } else if self.sample_count > 0 {
            ToneState::ActiveTone
        } else {
            ToneState::SymbolBoundary
        }
    }

    pub fn monitor(&self) -> &A {
        &self.monitor
    }

    pub fn progress_sink(&self) -> &P {
        &self.progress
    }

    /// Fill a block. Zero-fills when idle and after the job ends mid-block.
    pub fn process_block(&mut self, buffer: &mut [IqSample]) {
        if !self.configured {
            buffer.fill(IqSample::ZERO);
            return;
        }

        let audio_out = self.job.params.audio_monitor;
        let mut slots = buffer.iter_mut();

        for slot in slots.by_ref() {
            match self.next_slot() {
                Some((sample, tone)) => {
                    *slot = sample;
                    if audio_out {
                        self.tap.push(tone, &mut self.monitor);
                    }
                }
                None => {
                    *slot = IqSample::ZERO;
                    break;
                }
            }
        }

        for slot in slots {
            *slot = IqSample::ZERO;
        }
    }

    /// Produce one slot: the baseband sample and the tone sample behind it.
    /// Returns `None` once the stream is exhausted.
    #[inline]
    fn next_slot(&mut self) -> Option<(IqSample, i8)> {
        if self.silence_count == 0 && self.sample_count == 0 && !self.advance_symbol() {
            return None;
        }

        if self.silence_count > 0 {
            self.silence_count -= 1;
            if self.silence_count == 0 {
                self.tone_a_phase = 0;
                self.tone_b_phase = 0;
            }
            return Some((IqSample::ZERO, 0));
        }

        self.sample_count -= 1;
        let tone = self.next_tone_sample();
        Some((self.modulate(tone), tone))
    }

    /// Fetch symbols until one has samples to emit.
    ///
    /// Returns false when the stream is exhausted; the job is then done.
    fn advance_symbol(&mut self) -> bool {
        while self.silence_count == 0 && self.sample_count == 0 {
            let index = self.symbol_index;

            if index >= self.job.params.symbol_count as usize {
                self.configured = false;
                self.report(ProgressReport::done(index as u32));
                self.stats.record_job_completed();
                return false;
            }

            self.report(ProgressReport::progress(index as u32));
            self.symbol_index += 1;

            let code = self.job.block.symbols[index];
            match self.job.block.classify(code, self.job.params.dual_tone) {
                Symbol::Silence => {
                    self.silence_count = self.job.block.silence;
                }
                Symbol::Tone {
                    delta_a,
                    delta_b,
                    duration,
                } => {
                    self.tone_a_delta = delta_a;
                    self.tone_b_delta = delta_b;
                    self.sample_count = duration;
                }
            }
        }
        true
    }

    /// Read the tone oscillator(s) and advance their phase.
    #[inline]
    fn next_tone_sample(&mut self) -> i8 {
        let sample = if self.job.params.dual_tone {
            // Halve each before summing so the pair cannot overflow
            (sine_at(self.tone_a_phase) >> 1) + (sine_at(self.tone_b_phase) >> 1)
        } else {
            sine_at(self.tone_a_phase)
        };

        self.tone_a_phase = self.tone_a_phase.wrapping_add(self.tone_a_delta);
        if self.job.params.dual_tone {
            self.tone_b_phase = self.tone_b_phase.wrapping_add(self.tone_b_delta);
        }
        sample
    }

    /// Frequency-modulate the carrier by one tone sample.
    #[inline]
    fn modulate(&mut self, tone: i8) -> IqSample {
        let delta = (tone as i32).wrapping_mul(self.job.params.fm_delta);
        self.carrier_phase = self.carrier_phase.wrapping_add(delta as u32);

        IqSample::new(
            sine_at(self.carrier_phase),
            sine_at(self.carrier_phase.wrapping_add(QUARTER_CYCLE)),
        )
    }

    #[inline]
    fn report(&mut self, report: ProgressReport) {
        if !self.progress.post(report) {
            self.stats.record_dropped_report();
        }
    }
}

impl<P: ProgressSink, A: AudioMonitor> BasebandProcessor for TonesProcessor<P, A> {
    fn execute(&mut self, buffer: &mut [IqSample]) {
        self.process_block(buffer);
    }

    fn on_message(&mut self, message: &Message) {
        match message {
            Message::TonesConfigure(job) => self.configure(job),
        }
    }
}
