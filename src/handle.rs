//! Asynchronous entry point: run a search on its own thread and observe it
//! through an event stream.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver};

use crate::cancel::CancellationToken;
use crate::config::EngineConfig;
use crate::engine::{Engine, SearchResult};
use crate::params::SearchParameters;
use crate::progress::ProgressSnapshot;
use crate::transform::DigestTransform;
use crate::CrackError;

/// Event stream item. A search emits any number of `Progress` events
/// followed by exactly one `Finished`.
#[derive(Debug)]
pub enum SearchEvent {
    Progress(ProgressSnapshot),
    Finished(Result<SearchResult, CrackError>),
}

/// Running search. Dropping the handle cancels the search and waits for it
/// to stop.
#[derive(Debug)]
pub struct SearchHandle {
    cancel: CancellationToken,
    events: Receiver<SearchEvent>,
    thread: Option<JoinHandle<()>>,
}

/// Validate `params` and start searching with the default digest scheme.
pub fn start_search(
    params: SearchParameters,
    config: EngineConfig,
) -> Result<SearchHandle, CrackError> {
    Engine::new(config).start(params)
}

impl<T: DigestTransform + 'static> Engine<T> {
    /// Validate `params` and start the search on a background thread.
    ///
    /// Invalid parameters or configuration are reported here, before any
    /// thread is spawned.
    pub fn start(self, params: SearchParameters) -> Result<SearchHandle, CrackError> {
        self.prepare(&params)?;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let (tx, rx) = bounded(self.config().progress_capacity);

        let thread = thread::Builder::new()
            .name("hashcracker-search".into())
            .spawn(move || {
                let result = self.search(&params, &token, |snapshot| {
                    let _ = tx.try_send(SearchEvent::Progress(snapshot.clone()));
                });
                // The receiver may already be gone; nothing left to tell.
                let _ = tx.send(SearchEvent::Finished(result));
            })?;

        Ok(SearchHandle {
            cancel,
            events: rx,
            thread: Some(thread),
        })
    }
}

impl SearchHandle {
    /// Ask the search to stop. The terminal event will be `Cancelled` unless
    /// the search already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Raw event stream.
    pub fn events(&self) -> &Receiver<SearchEvent> {
        &self.events
    }

    /// Block until the search ends, discarding progress.
    pub fn wait(self) -> Result<SearchResult, CrackError> {
        self.wait_with(|_| {})
    }

    /// Block until the search ends, passing progress snapshots to
    /// `on_progress`.
    pub fn wait_with<F>(mut self, mut on_progress: F) -> Result<SearchResult, CrackError>
    where
        F: FnMut(&ProgressSnapshot),
    {
        let mut outcome = None;
        for event in self.events.iter() {
            match event {
                SearchEvent::Progress(snapshot) => on_progress(&snapshot),
                SearchEvent::Finished(result) => {
                    outcome = Some(result);
                    break;
                }
            }
        }
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| CrackError::Internal("search thread panicked".into()))?;
        }
        outcome.unwrap_or_else(|| {
            Err(CrackError::Internal(
                "search thread exited without a result".into(),
            ))
        })
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.cancel.cancel();
            // Keep draining so a blocked final send can complete.
            while !thread.is_finished() {
                let _ = self.events.recv_timeout(Duration::from_millis(10));
            }
            let _ = thread.join();
        }
    }
}
