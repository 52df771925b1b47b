//! Lifecycle state of a spellcheck worker.
//!
//! ```text
//! Uninitialized -> Loading -> Ready -> ShuttingDown -> Stopped
//!                     |                                   ^
//!                     +-----------------------------------+
//! ```
//!
//! A worker whose dictionary cannot be loaded goes straight from `Loading`
//! to `Stopped` and never accepts requests.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// State of a spellcheck worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    /// Created, thread not started yet.
    Uninitialized,
    /// Reading the dictionary.
    Loading,
    /// Serving requests.
    Ready,
    /// Shutdown signalled, loop exiting.
    ShuttingDown,
    /// Loop exited. Terminal.
    Stopped,
}

impl WorkerState {
    pub fn is_ready(self) -> bool {
        self == WorkerState::Ready
    }

    pub fn is_terminal(self) -> bool {
        self == WorkerState::Stopped
    }

    /// Whether the worker has not finished starting up.
    pub fn is_starting(self) -> bool {
        matches!(self, WorkerState::Uninitialized | WorkerState::Loading)
    }

    pub fn can_transition_to(self, next: WorkerState) -> bool {
        use WorkerState::*;
        matches!(
            (self, next),
            (Uninitialized, Loading)
                | (Uninitialized, Stopped)
                | (Loading, Ready)
                | (Loading, ShuttingDown)
                | (Loading, Stopped)
                | (Ready, ShuttingDown)
                | (ShuttingDown, Stopped)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkerState::Uninitialized => "uninitialized",
            WorkerState::Loading => "loading",
            WorkerState::Ready => "ready",
            WorkerState::ShuttingDown => "shutting_down",
            WorkerState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worker state shared between the worker thread and its handle.
#[derive(Debug, Clone)]
pub struct StateCell {
    inner: Arc<RwLock<WorkerState>>,
}

impl StateCell {
    pub fn new() -> Self {
        StateCell {
            inner: Arc::new(RwLock::new(WorkerState::Uninitialized)),
        }
    }

    pub fn get(&self) -> WorkerState {
        *self.inner.read()
    }

    /// Move to `next` if the transition is legal. Returns whether the state changed.
    pub fn transition(&self, next: WorkerState) -> bool {
        let mut state = self.inner.write();
        if *state == next {
            return false;
        }
        if !state.can_transition_to(next) {
            warn!("ignoring worker state transition {} -> {}", *state, next);
            return false;
        }
        debug!("worker state {} -> {}", *state, next);
        *state = next;
        true
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}
