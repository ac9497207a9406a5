//! Wiring: realtime baseband thread, monitor playback and the TUI

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use portatone::{
    audio::RingMonitor,
    baseband::{BasebandStats, Cadence, EventDispatcher, ToneJob, TonesProcessor},
    config::GeneratorConfig,
    control,
    dsp::IqSample,
};

use super::ui::UiApp;

/// Quarter of a second of monitor audio.
const MONITOR_RING_DIVISOR: u32 = 4;
/// Samples kept for the waveform view.
const VIS_RING_LEN: usize = 4096;

pub fn run(job: ToneJob, title: String, config: &GeneratorConfig) -> EyreResult<()> {
    let stats = Arc::new(BasebandStats::new());
    let (mut tx, end) = control::link(stats.clone());

    let monitor_rate = config.monitor_rate();
    let (monitor_tx, monitor_rx) =
        RingBuffer::<i16>::new((monitor_rate / MONITOR_RING_DIVISOR) as usize);
    let (vis_tx, vis_rx) = RingBuffer::<f32>::new(VIS_RING_LEN);

    let processor = TonesProcessor::new(end.uplink, RingMonitor::new(monitor_tx), stats.clone());
    let mut dispatcher = EventDispatcher::new(processor, end.downlink);

    // Realtime thread: one block per cadence tick
    let running = Arc::new(AtomicBool::new(true));
    let rt_running = running.clone();
    let period = config.block_period();
    let block_size = config.block_size;
    let baseband = thread::Builder::new()
        .name("baseband".into())
        .spawn(move || {
            let mut cadence = Cadence::new(period);
            let mut block = vec![IqSample::ZERO; block_size];
            while rt_running.load(Ordering::Relaxed) {
                cadence.wait();
                dispatcher.on_block(&mut block);
            }
            (cadence.overruns(), dispatcher.blocks_processed())
        })
        .wrap_err("failed to spawn baseband thread")?;

    let _stream = if config.audio_monitor {
        match start_playback(monitor_rx, vis_tx, monitor_rate) {
            Ok(stream) => Some(stream),
            Err(err) => {
                log::warn!("monitor playback unavailable: {err:#}");
                None
            }
        }
    } else {
        None
    };

    let total_symbols = job.params.symbol_count as u32;
    tx.start(job)?;

    let mut terminal = ratatui::init();
    let result = UiApp::new(tx, vis_rx, monitor_rate, title, total_symbols).run(&mut terminal);
    ratatui::restore();

    running.store(false, Ordering::Relaxed);
    let (overruns, blocks) = baseband
        .join()
        .map_err(|_| eyre!("baseband thread panicked"))?;

    let snapshot = stats.snapshot();
    log::info!("{} blocks, {} deadline overruns", blocks, overruns);
    if snapshot.has_anomalies() {
        log::warn!("baseband anomalies: {:?}", snapshot);
    }

    result
}

/// Play monitor PCM on the default output device.
///
/// The monitor runs at `monitor_rate`; each device frame holds the most
/// recent monitor sample, so the device may run at any rate.
fn start_playback(
    mut monitor_rx: Consumer<i16>,
    mut vis_tx: Producer<f32>,
    monitor_rate: u32,
) -> EyreResult<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let device_rate = config.sample_rate().0;
    let channels = config.channels() as usize;
    log::info!("monitor: {} Hz -> {} Hz, {} channels", monitor_rate, device_rate, channels);

    let step = monitor_rate as f64 / device_rate as f64;
    let mut phase = 1.0f64;
    let mut current = 0.0f32;

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            for frame in data.chunks_mut(channels) {
                phase += step;
                while phase >= 1.0 {
                    phase -= 1.0;
                    current = monitor_rx
                        .pop()
                        .map(|s| s as f32 / i16::MAX as f32)
                        .unwrap_or(0.0);
                    let _ = vis_tx.push(current);
                }
                frame.fill(current);
            }
        },
        |err| log::error!("audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}
