//! Application-side handle for the tone generator.
//!
//! A [`Transmitter`] sends one job at a time down the downlink ring and turns
//! the uplink reports back into [`TxEvent`]s. The realtime half of the link is
//! the [`BasebandEnd`] handed to the dispatcher thread.

use std::sync::Arc;

use rtrb::{Consumer, Producer, RingBuffer};
use thiserror::Error;

use crate::baseband::{BasebandStats, Message, ProgressReport, StatsSnapshot, ToneJob};
use crate::MAX_SYMBOLS;

/// Downlink slots. The dispatcher takes at most one message per block.
pub const DOWNLINK_CAPACITY: usize = 2;
/// Uplink slots: one report per symbol plus the final done report.
pub const UPLINK_CAPACITY: usize = MAX_SYMBOLS;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TxError {
    #[error("a job is already being transmitted")]
    Busy,

    #[error("downlink queue is full")]
    QueueFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxEvent {
    /// The generator started the symbol at this index.
    Progress(u32),
    /// The job finished after this many symbols.
    Done(u32),
}

/// Realtime end of the link.
pub struct BasebandEnd {
    pub downlink: Consumer<Message>,
    pub uplink: Producer<ProgressReport>,
}

pub struct Transmitter {
    tx: Producer<Message>,
    rx: Consumer<ProgressReport>,
    stats: Arc<BasebandStats>,
    busy: bool,
}

/// Build both rings and split them between the application and the realtime side.
pub fn link(stats: Arc<BasebandStats>) -> (Transmitter, BasebandEnd) {
    let (down_tx, down_rx) = RingBuffer::new(DOWNLINK_CAPACITY);
    let (up_tx, up_rx) = RingBuffer::new(UPLINK_CAPACITY);

    let transmitter = Transmitter {
        tx: down_tx,
        rx: up_rx,
        stats,
        busy: false,
    };
    let end = BasebandEnd {
        downlink: down_rx,
        uplink: up_tx,
    };
    (transmitter, end)
}

impl Transmitter {
    /// Queue `job` for transmission.
    pub fn start(&mut self, job: ToneJob) -> Result<(), TxError> {
        if self.busy {
            return Err(TxError::Busy);
        }
        let symbols = job.symbols().len();
        self.tx
            .push(Message::TonesConfigure(job))
            .map_err(|_| TxError::QueueFull)?;
        self.busy = true;
        log::info!("tx: job queued, {} symbols", symbols);
        Ok(())
    }

    /// Drain one pending report, if any.
    pub fn poll(&mut self) -> Option<TxEvent> {
        let report = self.rx.pop().ok()?;
        if report.done {
            self.busy = false;
            log::info!("tx: job done after {} symbols", report.symbol_index);
            Some(TxEvent::Done(report.symbol_index))
        } else {
            Some(TxEvent::Progress(report.symbol_index))
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseband::ToneDefinition;

    fn job() -> ToneJob {
        ToneJob::builder()
            .tone(0, ToneDefinition::new(1000, 4))
            .symbols(&[0, 0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_second_start_is_busy() {
        let (mut tx, _end) = link(Arc::new(BasebandStats::new()));
        tx.start(job()).unwrap();
        assert!(tx.is_busy());
        assert_eq!(tx.start(job()), Err(TxError::Busy));
    }

    #[test]
    fn test_done_clears_busy() {
        let (mut tx, mut end) = link(Arc::new(BasebandStats::new()));
        tx.start(job()).unwrap();

        end.uplink.push(ProgressReport::progress(0)).unwrap();
        end.uplink.push(ProgressReport::done(2)).unwrap();

        assert_eq!(tx.poll(), Some(TxEvent::Progress(0)));
        assert!(tx.is_busy());
        assert_eq!(tx.poll(), Some(TxEvent::Done(2)));
        assert!(!tx.is_busy());
        assert_eq!(tx.poll(), None);
        assert!(tx.start(job()).is_ok());
    }

    #[test]
    fn test_full_downlink_is_reported() {
        let (mut tx, mut end) = link(Arc::new(BasebandStats::new()));
        for _ in 0..DOWNLINK_CAPACITY {
            tx.start(job()).unwrap();
            tx.busy = false;
        }
        assert_eq!(tx.start(job()), Err(TxError::QueueFull));
        assert!(!tx.is_busy());

        assert!(end.downlink.pop().is_ok());
        assert!(tx.start(job()).is_ok());
    }
}
