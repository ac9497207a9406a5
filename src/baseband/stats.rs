//! Counters shared between the realtime and application contexts.
//!
//! The realtime side never logs. Anything worth reporting is counted here
//! with relaxed atomics and read back by the control context.

use core::sync::atomic::{AtomicU32, Ordering};

pub struct BasebandStats {
    /// Progress reports lost because the uplink ring was full.
    dropped_reports: AtomicU32,
    /// Configure messages ignored because a job was still running.
    rejected_configures: AtomicU32,
    /// Downlink frames that failed validation.
    malformed_frames: AtomicU32,
    jobs_started: AtomicU32,
    jobs_completed: AtomicU32,
}

impl BasebandStats {
    pub const fn new() -> Self {
        Self {
            dropped_reports: AtomicU32::new(0),
            rejected_configures: AtomicU32::new(0),
            malformed_frames: AtomicU32::new(0),
            jobs_started: AtomicU32::new(0),
            jobs_completed: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn record_dropped_report(&self) {
        self.dropped_reports.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejected_configure(&self) {
        self.rejected_configures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_malformed_frame(&self) {
        self.malformed_frames.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_job_started(&self) {
        self.jobs_started.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_job_completed(&self) {
        self.jobs_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dropped_reports: self.dropped_reports.load(Ordering::Relaxed),
            rejected_configures: self.rejected_configures.load(Ordering::Relaxed),
            malformed_frames: self.malformed_frames.load(Ordering::Relaxed),
            jobs_started: self.jobs_started.load(Ordering::Relaxed),
            jobs_completed: self.jobs_completed.load(Ordering::Relaxed),
        }
    }
}

impl Default for BasebandStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub dropped_reports: u32,
    pub rejected_configures: u32,
    pub malformed_frames: u32,
    pub jobs_started: u32,
    pub jobs_completed: u32,
}

impl StatsSnapshot {
    /// True if anything went wrong on the realtime side.
    pub fn has_anomalies(&self) -> bool {
        self.dropped_reports > 0 || self.rejected_configures > 0 || self.malformed_frames > 0
    }
}
