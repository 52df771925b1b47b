//! The spellcheck worker thread and its handle.
//!
//! The worker owns its dictionary outright; nothing else touches it, so no
//! locking is needed around lookups. Communication uses three channels:
//!
//! - a request queue and a response queue, each holding a single message,
//! - a shutdown channel that is never sent on; dropping its sender wakes the
//!   worker,
//! - an exit channel whose sender lives on the worker thread, so a handle can
//!   tell the thread is gone without blocking on it.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, after, bounded, never, select};
use log::{debug, info, warn};

use crate::config::SpellConfig;
use crate::error::{Result, SpellError};
use crate::spelling::dictionary::Dictionary;
use crate::spelling::suggest::{SuggestionConfig, SuggestionEngine};
use crate::worker::message::{SuggestionRequest, SuggestionResponse};
use crate::worker::state::{StateCell, WorkerState};

/// Load the configured dictionary, falling back once to the system word list.
///
/// Only a missing primary file triggers the fallback. Any other failure, or a
/// missing fallback, is returned to the caller.
pub fn load_dictionary(config: &SpellConfig) -> Result<Dictionary> {
    let primary = config
        .dictionary_path
        .as_deref()
        .unwrap_or(config.fallback_path.as_path());

    let dictionary = match Dictionary::load_from_file(primary) {
        Ok(dictionary) => dictionary,
        Err(e) if e.is_not_found() && primary != config.fallback_path => {
            warn!(
                "dictionary file {} not found, trying default {}",
                primary.display(),
                config.fallback_path.display()
            );
            Dictionary::load_from_file(&config.fallback_path)?
        }
        Err(e) => return Err(e),
    };

    if config.skip_blank_lines {
        Ok(dictionary.without_blank_entries())
    } else {
        Ok(dictionary)
    }
}

/// Service loop run on the worker thread.
pub struct SpellcheckWorker {
    engine: SuggestionEngine,
    requests: Receiver<SuggestionRequest>,
    responses: Sender<SuggestionResponse>,
    shutdown: Receiver<()>,
    state: StateCell,
}

impl SpellcheckWorker {
    /// Start a worker thread for `config` and return its handle.
    ///
    /// The dictionary is loaded on the new thread. Use
    /// [`WorkerHandle::wait_until_settled`] to learn whether it became ready.
    pub fn spawn(config: &SpellConfig) -> Result<WorkerHandle> {
        config.validate()?;

        let (request_tx, request_rx) = bounded(1);
        let (response_tx, response_rx) = bounded(1);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
        let (exited_tx, exited_rx) = bounded::<()>(0);
        let (startup_tx, startup_rx) = bounded(1);

        let state = StateCell::new();
        let thread_state = state.clone();
        let config = config.clone();

        let thread = thread::Builder::new()
            .name("spellcheck-worker".to_string())
            .spawn(move || {
                // Disconnects the exit channel however this thread ends
                let _exited = exited_tx;

                thread_state.transition(WorkerState::Loading);
                let dictionary = match load_dictionary(&config) {
                    Ok(dictionary) => dictionary,
                    Err(e) => {
                        warn!("spellchecking disabled: {e}");
                        thread_state.transition(WorkerState::Stopped);
                        let _ = startup_tx.send(WorkerState::Stopped);
                        return;
                    }
                };
                info!("spellcheck worker ready with {} words", dictionary.len());

                let engine = SuggestionEngine::with_config(
                    dictionary,
                    SuggestionConfig {
                        max_suggestions: config.max_suggestions,
                        strategy: config.selection,
                    },
                );
                let worker = SpellcheckWorker {
                    engine,
                    requests: request_rx,
                    responses: response_tx,
                    shutdown: shutdown_rx,
                    state: thread_state,
                };

                worker.state.transition(WorkerState::Ready);
                let _ = startup_tx.send(worker.state.get());
                drop(startup_tx);

                worker.run();
            })
            .map_err(SpellError::ThreadSpawn)?;

        Ok(WorkerHandle {
            requests: request_tx,
            responses: response_rx,
            shutdown: Some(shutdown_tx),
            exited: exited_rx,
            startup: startup_rx,
            state,
            thread: Some(thread),
            awaiting_reply: false,
        })
    }

    /// Serve requests until shutdown is signalled or the request queue closes.
    pub fn run(self) {
        loop {
            select! {
                recv(self.requests) -> msg => match msg {
                    Ok(request) => {
                        if !self.handle(request) {
                            break;
                        }
                    }
                    Err(_) => {
                        debug!("request channel closed");
                        break;
                    }
                },
                recv(self.shutdown) -> _ => {
                    debug!("shutdown signal received");
                    break;
                }
            }
        }

        self.state.transition(WorkerState::ShuttingDown);
        self.state.transition(WorkerState::Stopped);
        info!("spellcheck worker stopped");
    }

    /// Answer one request. Returns false when the loop should exit.
    fn handle(&self, request: SuggestionRequest) -> bool {
        let started = Instant::now();
        let response = SuggestionResponse::new(self.engine.suggest_batch(&request.words));
        debug!(
            "checked {} words, {} suggestions in {:?}",
            request.words.len(),
            response.len(),
            started.elapsed()
        );

        select! {
            send(self.responses, response) -> res => {
                if res.is_err() {
                    debug!("response channel closed");
                    return false;
                }
                true
            }
            recv(self.shutdown) -> _ => {
                debug!("shutdown signal received while replying");
                false
            }
        }
    }
}

/// Owning handle to a running worker thread.
///
/// Dropping the handle signals shutdown without waiting for the thread.
#[derive(Debug)]
pub struct WorkerHandle {
    requests: Sender<SuggestionRequest>,
    responses: Receiver<SuggestionResponse>,
    shutdown: Option<Sender<()>>,
    exited: Receiver<()>,
    startup: Receiver<WorkerState>,
    state: StateCell,
    thread: Option<thread::JoinHandle<()>>,
    // A request was sent whose reply has not been read yet
    awaiting_reply: bool,
}

impl WorkerHandle {
    /// Current worker state.
    pub fn state(&self) -> WorkerState {
        self.state.get()
    }

    /// Block until the dictionary load has finished or `timeout` elapses.
    ///
    /// Returns `Ready` or `Stopped` once the load outcome is known, otherwise
    /// the state at the time the wait gave up.
    pub fn wait_until_settled(&self, timeout: Duration) -> WorkerState {
        let state = self.state.get();
        if !state.is_starting() {
            return state;
        }

        match self.startup.recv_timeout(timeout) {
            Ok(state) => state,
            Err(RecvTimeoutError::Timeout) => {
                warn!("dictionary still loading after {timeout:?}");
                self.state.get()
            }
            Err(RecvTimeoutError::Disconnected) => self.state.get(),
        }
    }

    /// Send one batch and wait for its reply.
    ///
    /// With no `timeout` this is a plain rendezvous: it returns when the worker
    /// answers, or with [`SpellError::ChannelClosed`] once the worker has exited.
    /// With a timeout it may also fail with [`SpellError::Timeout`]. The worker
    /// keeps running in that case, and its late reply is discarded by the next
    /// call before a new request is sent, so replies always pair with their
    /// own request.
    pub fn submit(
        &mut self,
        request: SuggestionRequest,
        timeout: Option<Duration>,
    ) -> Result<SuggestionResponse> {
        let deadline = timeout.map_or_else(never, after);

        if self.awaiting_reply {
            select! {
                recv(self.responses) -> msg => {
                    msg.map_err(|_| SpellError::channel_closed("worker exited without replying"))?;
                    debug!("discarded late reply to an earlier request");
                    self.awaiting_reply = false;
                }
                recv(self.exited) -> _ => {
                    return Err(SpellError::channel_closed("worker exited"));
                }
                recv(deadline) -> _ => {
                    return Err(SpellError::timeout(
                        "worker is still busy with an earlier request",
                    ));
                }
            }
        }

        select! {
            send(self.requests, request) -> res => {
                res.map_err(|_| SpellError::channel_closed("worker is not accepting requests"))?;
            }
            recv(self.exited) -> _ => {
                return Err(SpellError::channel_closed(
                    "worker exited before accepting the request",
                ));
            }
            recv(deadline) -> _ => {
                return Err(SpellError::timeout("request not accepted in time"));
            }
        }
        self.awaiting_reply = true;

        let reply = select! {
            recv(self.responses) -> msg => {
                msg.map_err(|_| SpellError::channel_closed("worker exited without replying"))
            }
            recv(self.exited) -> _ => {
                // A reply sent just before exit is still valid
                self.responses
                    .try_recv()
                    .map_err(|_| SpellError::channel_closed("worker exited without replying"))
            }
            recv(deadline) -> _ => {
                return Err(SpellError::timeout("no reply in time"));
            }
        };
        self.awaiting_reply = false;
        reply
    }

    /// Ask the worker to stop without waiting for it.
    pub fn signal_shutdown(&mut self) {
        if self.shutdown.take().is_some() {
            if matches!(self.state.get(), WorkerState::Loading | WorkerState::Ready) {
                self.state.transition(WorkerState::ShuttingDown);
            }
            debug!("shutdown signalled");
        }
    }

    /// Signal shutdown and wait for the worker thread to exit.
    pub fn shutdown(&mut self) -> Result<()> {
        self.signal_shutdown();
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| SpellError::ThreadJoin("spellcheck worker panicked".to_string()))?;
        }
        Ok(())
    }

    /// Whether the worker thread has exited.
    pub fn has_exited(&self) -> bool {
        self.thread.as_ref().is_none_or(|thread| thread.is_finished())
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}
