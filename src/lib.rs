//! # Spellkeeper
//!
//! A spelling-suggestion engine that runs on a background thread.
//!
//! ## Features
//!
//! - Newline-delimited word list dictionaries with a system fallback
//! - Unicode-aware Levenshtein distance
//! - Deterministic top-K suggestion selection
//! - A single-slot request/reply worker with prompt shutdown
//! - A client adapter that never blocks on a stopped worker

pub mod cli;
pub mod config;
pub mod error;
pub mod spelling;
pub mod worker;

pub mod prelude {
    pub use crate::config::SpellConfig;
    pub use crate::error::{Result, SpellError};
    pub use crate::spelling::{Dictionary, SelectionStrategy, SuggestionEngine, suggest};
    pub use crate::worker::{SpellcheckClient, SuggestionResponse, WorkerState};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
