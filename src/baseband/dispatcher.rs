//! Block-cadence driver for a [`BasebandProcessor`].
//!
//! The dispatcher is the only code that touches the processor. It serialises
//! message delivery and block processing, so `configure` can never overlap
//! `execute`.

use std::time::{Duration, Instant};

use crate::{
    baseband::{message::MessageReceiver, BasebandProcessor},
    dsp::IqSample,
};

pub struct EventDispatcher<P: BasebandProcessor, R: MessageReceiver> {
    processor: P,
    rx: R,
    blocks: u64,
}

impl<P: BasebandProcessor, R: MessageReceiver> EventDispatcher<P, R> {
    pub fn new(processor: P, rx: R) -> Self {
        Self {
            processor,
            rx,
            blocks: 0,
        }
    }

    /// Handle one arriving block.
    ///
    /// At most one queued downlink message is delivered first, then the
    /// processor fills `buffer`.
    pub fn on_block(&mut self, buffer: &mut [IqSample]) {
        if let Some(message) = self.rx.pop() {
            self.processor.on_message(&message);
        }

        self.processor.execute(buffer);
        self.blocks += 1;
    }

    pub fn blocks_processed(&self) -> u64 {
        self.blocks
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut P {
        &mut self.processor
    }
}

/// Fixed-period tick source standing in for block arrival.
///
/// Deadlines advance by exactly one period per tick, so a late tick does not
/// shift the ones after it.
pub struct Cadence {
    period: Duration,
    next: Instant,
    overruns: u64,
}

impl Cadence {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
            overruns: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleep until the next deadline. Returns false if it had already passed.
    pub fn wait(&mut self) -> bool {
        let now = Instant::now();
        let on_time = now <= self.next;

        if on_time {
            std::thread::sleep(self.next - now);
        } else {
            self.overruns += 1;
            // More than a full period behind: resync instead of bursting
            if now - self.next > self.period {
                self.next = now;
            }
        }

        self.next += self.period;
        on_time
    }

    /// Deadlines missed since creation.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}
