//! Parallel brute-force search over a [`SearchSpace`].
//!
//! Workers claim fixed-size chunks of the index space from a shared counter,
//! always in increasing order, and hash every candidate of the chunk. A
//! match lowers the shared best index with `fetch_min`; workers stop claiming
//! once chunks start at or past it and stop scanning inside a chunk once they
//! reach it. Every index below the final best index is therefore scanned, so
//! the reported match is the first one in enumeration order no matter which
//! worker saw its match first.
//!
//! Workers run on a dedicated rayon pool whose threads are joined before
//! [`Engine::search`] returns.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::candidate::SearchSpace;
use crate::config::EngineConfig;
use crate::params::SearchParameters;
use crate::progress::{ProgressSnapshot, ReportGate};
use crate::transform::{DigestTransform, SaltedSha256};
use crate::CrackError;

/// Candidates hashed between flushes of the shared attempt counter. The
/// progress clock is read at the same cadence.
const FLUSH_EVERY: u64 = 1024;

/// Sentinel for "no match yet". Never a valid index since the space holds at
/// most `u64::MAX` candidates.
const NO_MATCH: u64 = u64::MAX;

/// Terminal outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// `attempts` is the 1-based position of `candidate` in enumeration order.
    Found {
        candidate: String,
        attempts: u64,
        elapsed: Duration,
    },
    NotFound,
    Cancelled,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }

    pub fn candidate(&self) -> Option<&str> {
        match self {
            SearchResult::Found { candidate, .. } => Some(candidate),
            _ => None,
        }
    }
}

/// Search engine parameterised by the digest scheme.
#[derive(Debug, Clone)]
pub struct Engine<T = SaltedSha256> {
    config: EngineConfig,
    transform: T,
}

impl Engine<SaltedSha256> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_transform(config, SaltedSha256)
    }
}

impl Default for Engine<SaltedSha256> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<T: DigestTransform> Engine<T> {
    pub fn with_transform(config: EngineConfig, transform: T) -> Self {
        Self { config, transform }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check the configuration and derive the search space for `params`
    /// without starting any work.
    pub fn prepare(&self, params: &SearchParameters) -> Result<SearchSpace, CrackError> {
        self.config.validate()?;
        SearchSpace::new(params.alphabet(), params.length(), self.config.max_space)
    }

    /// Run a search to completion on the calling thread.
    ///
    /// `on_progress` is invoked on the calling thread with throttled
    /// snapshots while workers run. Returns once every worker has stopped.
    pub fn search<F>(
        &self,
        params: &SearchParameters,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<SearchResult, CrackError>
    where
        F: FnMut(&ProgressSnapshot),
    {
        let space = self.prepare(params)?;
        let chunk_size = self.config.chunk_size;
        let chunks = space.size().div_ceil(chunk_size);
        let workers = (self.config.workers as u64).min(chunks).max(1) as usize;

        info!(
            space = space.size(),
            length = space.length(),
            alphabet = space.alphabet().len(),
            workers,
            chunk_size,
            "starting search"
        );

        let started = Instant::now();
        let shared = Shared {
            space: &space,
            params,
            transform: &self.transform,
            cancel,
            chunk_size,
            next_chunk: AtomicU64::new(0),
            best: AtomicU64::new(NO_MATCH),
            attempts: AtomicU64::new(0),
            interrupted: AtomicBool::new(false),
            halted: AtomicBool::new(false),
            failure: Mutex::new(None),
            gate: ReportGate::new(started, self.config.progress_interval()),
        };

        let (tx, rx) = bounded::<ProgressSnapshot>(self.config.progress_capacity);
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("hashcracker-worker-{i}"))
            .build_scoped(
                |thread| thread.run(),
                |pool| {
                    pool.in_place_scope(|scope| {
                        for id in 0..workers {
                            let tx = tx.clone();
                            let shared = &shared;
                            scope.spawn(move |_| shared.run_worker(id, tx));
                        }
                        drop(tx);
                        // Ends once every worker has dropped its sender.
                        for snapshot in rx.iter() {
                            on_progress(&snapshot);
                        }
                    })
                },
            )
            .map_err(|e| CrackError::Internal(format!("failed to start worker pool: {e}")))?;

        let elapsed = started.elapsed();
        let hashes = shared.attempts.load(Ordering::Acquire);
        let interrupted = shared.interrupted.load(Ordering::Acquire);
        let best = shared.best.load(Ordering::Acquire);
        let failure = shared
            .failure
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(err) = failure {
            warn!(hashes, error = %err, "search aborted");
            return Err(err);
        }

        let result = if interrupted {
            SearchResult::Cancelled
        } else if best == NO_MATCH {
            SearchResult::NotFound
        } else {
            SearchResult::Found {
                candidate: space.decode(best)?,
                attempts: best + 1,
                elapsed,
            }
        };

        info!(
            outcome = outcome_name(&result),
            hashes,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );
        Ok(result)
    }
}

fn outcome_name(result: &SearchResult) -> &'static str {
    match result {
        SearchResult::Found { .. } => "found",
        SearchResult::NotFound => "not_found",
        SearchResult::Cancelled => "cancelled",
    }
}

/// State shared by all workers of one search.
struct Shared<'a, T> {
    space: &'a SearchSpace,
    params: &'a SearchParameters,
    transform: &'a T,
    cancel: &'a CancellationToken,
    chunk_size: u64,
    /// Next chunk number to hand out.
    next_chunk: AtomicU64,
    /// Smallest matching index seen so far.
    best: AtomicU64,
    /// Candidates hashed, flushed periodically by workers.
    attempts: AtomicU64,
    /// A worker stopped on cancellation while work remained.
    interrupted: AtomicBool,
    /// A worker failed; the others stop at their next chunk boundary.
    halted: AtomicBool,
    failure: Mutex<Option<CrackError>>,
    gate: ReportGate,
}

impl<T: DigestTransform> Shared<'_, T> {
    fn run_worker(&self, id: usize, tx: Sender<ProgressSnapshot>) {
        debug!(worker = id, "worker started");
        match self.scan(id, &tx) {
            Ok(hashes) => debug!(worker = id, hashes, "worker stopped"),
            Err(err) => {
                warn!(worker = id, error = %err, "worker failed");
                self.fail(err);
            }
        }
    }

    fn fail(&self, err: CrackError) {
        self.halted.store(true, Ordering::Release);
        let mut slot = self
            .failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.is_none() {
            *slot = Some(CrackError::Worker(err.to_string()));
        }
    }

    /// Claim and scan chunks until the space is exhausted, a smaller match
    /// makes further work pointless, or the search is stopped. Returns the
    /// number of candidates this worker hashed.
    fn scan(&self, id: usize, tx: &Sender<ProgressSnapshot>) -> Result<u64, CrackError> {
        let size = self.space.size();
        let target = self.params.target();
        let salt = self.params.salt();
        let mut cursor = self.space.cursor(0)?;
        let mut hashes = 0u64;
        let mut pending = 0u64;

        'claim: loop {
            if self.halted.load(Ordering::Acquire) {
                break;
            }
            let chunk = self.next_chunk.fetch_add(1, Ordering::Relaxed);
            let start = match chunk.checked_mul(self.chunk_size) {
                Some(start) if start < size => start,
                _ => break,
            };
            if start >= self.best.load(Ordering::Acquire) {
                break;
            }
            if self.cancel.is_cancelled() {
                self.interrupted.store(true, Ordering::Release);
                break;
            }

            let end = start.saturating_add(self.chunk_size).min(size);
            cursor.seek(start)?;
            for index in start..end {
                if self.cancel.is_cancelled() {
                    self.interrupted.store(true, Ordering::Release);
                    break 'claim;
                }
                if index >= self.best.load(Ordering::Relaxed) {
                    break;
                }

                let digest = self.transform.digest(cursor.as_str(), salt);
                hashes += 1;
                pending += 1;

                if digest == *target {
                    self.best.fetch_min(index, Ordering::AcqRel);
                    debug!(worker = id, index, "match");
                    break;
                }

                if pending >= FLUSH_EVERY {
                    self.attempts.fetch_add(pending, Ordering::Relaxed);
                    pending = 0;
                    self.report(id, cursor.as_str(), tx);
                }
                cursor.advance();
            }
        }

        self.attempts.fetch_add(pending, Ordering::Release);
        Ok(hashes)
    }

    /// Publish a snapshot if this worker wins the current report slot. Never
    /// blocks: a full channel drops the snapshot.
    fn report(&self, id: usize, candidate: &str, tx: &Sender<ProgressSnapshot>) {
        if let Some(elapsed) = self.gate.try_acquire() {
            let snapshot = ProgressSnapshot::new(
                self.attempts.load(Ordering::Relaxed),
                self.space.size(),
                elapsed,
                candidate,
                id,
            );
            let _ = tx.try_send(snapshot);
        }
    }
}
