//! Background spellcheck worker.
//!
//! A single thread owns the dictionary and answers suggestion requests so the
//! caller's input loop never runs the distance computation itself. The
//! [`SpellcheckClient`] is the entry point for callers; [`SpellcheckWorker`]
//! and [`WorkerHandle`] are the lower-level pieces it is built from.
//!
//! ```no_run
//! use spellkeeper::config::SpellConfig;
//! use spellkeeper::worker::{SpellcheckClient, WorkerState};
//!
//! # fn main() -> spellkeeper::error::Result<()> {
//! let mut client = SpellcheckClient::new(SpellConfig::default());
//! if client.enable(Some("words.txt".into()))? == WorkerState::Ready {
//!     let response = client.check_line("teh quick brwn fox")?;
//!     println!("{:?}", response.suggestions);
//! }
//! client.shutdown()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod message;
pub mod service;
pub mod state;

pub use client::SpellcheckClient;
pub use message::{SuggestionRequest, SuggestionResponse};
pub use service::{SpellcheckWorker, WorkerHandle, load_dictionary};
pub use state::{StateCell, WorkerState};
