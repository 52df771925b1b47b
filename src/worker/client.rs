//! Client adapter used by an interactive input loop.
//!
//! The client is the only owner of the worker's channels. Toggling
//! spellchecking goes through [`SpellcheckClient::enable`] and
//! [`SpellcheckClient::disable`], and a request is only sent while the worker
//! is `Ready`. Requests take `&mut self`, so at most one is ever in flight and
//! replies arrive in submission order.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::config::SpellConfig;
use crate::error::{Result, SpellError};
use crate::worker::message::{SuggestionRequest, SuggestionResponse};
use crate::worker::service::{SpellcheckWorker, WorkerHandle};
use crate::worker::state::WorkerState;

/// Controller for a background spellcheck worker.
///
/// Dropping the client signals the worker to shut down.
#[derive(Debug)]
pub struct SpellcheckClient {
    config: SpellConfig,
    worker: Option<WorkerHandle>,
    workers_started: usize,
}

impl SpellcheckClient {
    /// Create a client with spellchecking off.
    pub fn new(config: SpellConfig) -> Self {
        SpellcheckClient {
            config,
            worker: None,
            workers_started: 0,
        }
    }

    pub fn config(&self) -> &SpellConfig {
        &self.config
    }

    /// Turn spellchecking on, optionally with a new dictionary path.
    ///
    /// Starts a worker only when none is running; otherwise the call is a
    /// no-op and `dictionary` is ignored. Waits up to the startup timeout for
    /// the dictionary load and returns the resulting state. `Stopped` means no
    /// dictionary could be loaded and spellchecking stays off.
    pub fn enable(&mut self, dictionary: Option<PathBuf>) -> Result<WorkerState> {
        if let Some(worker) = &self.worker {
            let state = worker.state();
            if matches!(state, WorkerState::Loading | WorkerState::Ready) {
                debug!("spellcheck worker already {state}");
                return Ok(state);
            }
        }

        if let Some(path) = dictionary {
            self.config.dictionary_path = Some(path);
        }

        // Any previous worker is stopped or stopping; let it go
        self.worker = None;

        let worker = SpellcheckWorker::spawn(&self.config)?;
        self.workers_started += 1;

        let state = worker.wait_until_settled(self.config.startup_timeout());
        match state {
            WorkerState::Ready => info!("spellchecking enabled"),
            WorkerState::Stopped => {
                warn!("no dictionary found, specify one to use spellchecking")
            }
            other => warn!("spellcheck worker is {other} after startup wait"),
        }

        self.worker = Some(worker);
        Ok(state)
    }

    /// Turn spellchecking off and wait for the worker to exit.
    pub fn disable(&mut self) -> Result<()> {
        match self.worker.as_mut() {
            Some(worker) => {
                worker.shutdown()?;
                info!("spellchecking disabled");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Stop the worker for good. Same as [`disable`](Self::disable).
    pub fn shutdown(&mut self) -> Result<()> {
        self.disable()
    }

    /// Current worker state; `Uninitialized` if spellchecking was never enabled.
    pub fn state(&self) -> WorkerState {
        self.worker
            .as_ref()
            .map_or(WorkerState::Uninitialized, WorkerHandle::state)
    }

    /// Whether requests will currently be sent to a worker.
    pub fn is_enabled(&self) -> bool {
        self.state().is_ready()
    }

    /// Number of worker threads this client has started.
    pub fn workers_started(&self) -> usize {
        self.workers_started
    }

    /// Get suggestions for a batch of words.
    ///
    /// Returns an empty response without contacting the worker unless it is
    /// `Ready`. Errors are recoverable and mean "no suggestions" (see
    /// [`SpellError::is_recoverable`]). A reply timeout leaves the worker
    /// running; a worker that has gone away is shut down.
    pub fn check_words<S: AsRef<str>>(&mut self, words: &[S]) -> Result<SuggestionResponse> {
        let request = SuggestionRequest::new(words.iter().map(|w| w.as_ref().to_string()));
        self.submit(request)
    }

    /// Check one line of user text.
    ///
    /// Lines shorter than `min_line_length` characters are not sent.
    pub fn check_line(&mut self, line: &str) -> Result<SuggestionResponse> {
        if line.chars().count() < self.config.min_line_length {
            return Ok(SuggestionResponse::empty());
        }
        self.submit(SuggestionRequest::from_line(line))
    }

    fn submit(&mut self, request: SuggestionRequest) -> Result<SuggestionResponse> {
        let Some(worker) = self.worker.as_mut() else {
            return Ok(SuggestionResponse::empty());
        };
        if !worker.state().is_ready() || request.is_empty() {
            return Ok(SuggestionResponse::empty());
        }

        match worker.submit(request, self.config.reply_timeout()) {
            Ok(response) => Ok(response),
            Err(e @ SpellError::Timeout(_)) => {
                warn!("spellcheck reply is late, skipping this line: {e}");
                Err(e)
            }
            Err(e) => {
                warn!("spellcheck worker is gone, disabling spellchecking: {e}");
                worker.signal_shutdown();
                Err(e)
            }
        }
    }
}
