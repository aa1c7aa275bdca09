//! Progress snapshots and the time gate that keeps them infrequent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Lower bound on elapsed time used when computing a rate.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

/// Point-in-time view of a running search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// Candidates hashed so far across all workers.
    pub attempts: u64,
    /// Size of the search space.
    pub total: u64,
    pub elapsed_secs: f64,
    /// Candidate the reporting worker was testing.
    pub current_candidate: String,
    /// Attempts per second since the search started.
    pub rate: f64,
    /// Worker that produced this snapshot.
    pub worker: usize,
}

impl ProgressSnapshot {
    pub fn new(
        attempts: u64,
        total: u64,
        elapsed: Duration,
        current_candidate: &str,
        worker: usize,
    ) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        Self {
            attempts,
            total,
            elapsed_secs,
            current_candidate: current_candidate.to_string(),
            rate: rate(attempts, elapsed_secs),
            worker,
        }
    }
}

pub fn rate(attempts: u64, elapsed_secs: f64) -> f64 {
    attempts as f64 / elapsed_secs.max(MIN_ELAPSED_SECS)
}

/// Shared gate deciding which worker may publish the next snapshot.
///
/// At most one caller wins per interval, no matter how many workers poll it.
#[derive(Debug)]
pub struct ReportGate {
    start: Instant,
    interval_ms: u64,
    next_due_ms: AtomicU64,
}

impl ReportGate {
    pub fn new(start: Instant, interval: Duration) -> Self {
        let interval_ms = interval.as_millis().min(u64::MAX as u128) as u64;
        Self {
            start,
            interval_ms,
            next_due_ms: AtomicU64::new(interval_ms),
        }
    }

    /// Returns the elapsed time if the caller won the current slot.
    pub fn try_acquire(&self) -> Option<Duration> {
        let elapsed = self.start.elapsed();
        let now_ms = elapsed.as_millis().min(u64::MAX as u128) as u64;
        let due = self.next_due_ms.load(Ordering::Relaxed);
        if now_ms < due {
            return None;
        }
        let next = now_ms.saturating_add(self.interval_ms);
        self.next_due_ms
            .compare_exchange(due, next, Ordering::AcqRel, Ordering::Relaxed)
            .ok()
            .map(|_| elapsed)
    }
}
