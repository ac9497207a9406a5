//! Benchmarks for the tone generator.
//!
//! Run with: cargo bench
//!
//! One block is 2048 samples at 1.536 MHz, a deadline of 1.33ms. Every case
//! below must finish well inside that.
//!
//! Benchmark groups:
//!   - tones/steady     One long symbol, single and dual tone, monitor on/off
//!   - tones/boundaries A block made of short symbols

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use portatone::{
    audio::NullMonitor,
    baseband::{BasebandStats, ProgressReport, ProgressSink, ToneDefinition, ToneJob, TonesProcessor},
    config::GeneratorConfig,
    dsp::{nco::nco_increment, IqSample},
    BLOCK_SIZE, SAMPLE_RATE,
};

struct Discard;

impl ProgressSink for Discard {
    fn post(&mut self, _report: ProgressReport) -> bool {
        true
    }
}

fn processor(job: &ToneJob) -> TonesProcessor<Discard, NullMonitor> {
    let mut tones = TonesProcessor::new(Discard, NullMonitor, Arc::new(BasebandStats::new()));
    tones.configure(job);
    tones
}

fn steady_job(dual_tone: bool, audio_monitor: bool) -> ToneJob {
    let fm_delta = GeneratorConfig::default().fm_delta();
    ToneJob::builder()
        .dual_tone(dual_tone)
        .audio_monitor(audio_monitor)
        .fm_delta(fm_delta)
        .tone(0, ToneDefinition::new(nco_increment(1209, SAMPLE_RATE), u32::MAX))
        .tone(1, ToneDefinition::new(nco_increment(697, SAMPLE_RATE), u32::MAX))
        .symbols(&[0])
        .build()
        .unwrap()
}

fn bench_steady(c: &mut Criterion) {
    let mut group = c.benchmark_group("tones/steady");
    let mut block = vec![IqSample::ZERO; BLOCK_SIZE];

    for (name, dual_tone) in [("single", false), ("dual", true)] {
        for audio_monitor in [false, true] {
            let job = steady_job(dual_tone, audio_monitor);
            let mut tones = processor(&job);
            let id = BenchmarkId::new(name, if audio_monitor { "monitor" } else { "silent" });
            group.bench_function(id, |b| {
                b.iter(|| tones.process_block(black_box(&mut block)));
            });
        }
    }

    group.finish();
}

fn bench_boundaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("tones/boundaries");

    // 255 symbols of 8 samples: 2040 samples, the job ends inside one block
    let symbols: Vec<u8> = (0..255).map(|i| (i % 2) as u8).collect();
    let job = ToneJob::builder()
        .tone(0, ToneDefinition::new(nco_increment(1200, SAMPLE_RATE), 8))
        .tone(1, ToneDefinition::new(nco_increment(2200, SAMPLE_RATE), 8))
        .symbols(&symbols)
        .build()
        .unwrap();

    group.bench_function("afsk_8_samples", |b| {
        b.iter_batched_ref(
            || (processor(&job), vec![IqSample::ZERO; BLOCK_SIZE]),
            |(tones, block)| tones.process_block(black_box(block)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_steady, bench_boundaries);
criterion_main!(benches);
