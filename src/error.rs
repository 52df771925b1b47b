//! Error types for the Spellkeeper library.
//!
//! All errors are represented by the [`SpellError`] enum. Only dictionary
//! loading and channel failures are surfaced as errors; an empty or
//! whitespace-only word is not an error and simply yields no suggestions.
//!
//! # Examples
//!
//! ```
//! use spellkeeper::error::{SpellError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpellError::invalid_config("reply timeout must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Spellkeeper operations.
#[derive(Error, Debug)]
pub enum SpellError {
    /// I/O errors outside of dictionary loading
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The dictionary file does not exist
    #[error("Dictionary not found: {}", .0.display())]
    DictionaryNotFound(PathBuf),

    /// The dictionary file exists but could not be read
    #[error("Failed to load dictionary {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The worker went away while a request was outstanding
    #[error("Spellcheck channel closed: {0}")]
    ChannelClosed(String),

    /// A reply did not arrive in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker thread could not be started
    #[error("Failed to spawn worker thread: {0}")]
    ThreadSpawn(#[source] io::Error),

    /// The worker thread panicked
    #[error("Thread join error: {0}")]
    ThreadJoin(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type alias for operations that may fail with SpellError.
pub type Result<T> = std::result::Result<T, SpellError>;

impl SpellError {
    /// Classify an I/O error raised while opening or reading a dictionary.
    pub fn from_load<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            SpellError::DictionaryNotFound(path)
        } else {
            SpellError::Load { path, source }
        }
    }

    /// Create a new channel closed error.
    pub fn channel_closed<S: Into<String>>(msg: S) -> Self {
        SpellError::ChannelClosed(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        SpellError::Timeout(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpellError::InvalidConfig(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        SpellError::InvalidOperation(msg.into())
    }

    /// Whether this is the "not found" condition that allows a fallback load.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SpellError::DictionaryNotFound(_))
    }

    /// Whether the caller should treat this as "no suggestions" rather than abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SpellError::ChannelClosed(_) | SpellError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SpellError::invalid_config("bad timeout");
        assert_eq!(error.to_string(), "Invalid configuration: bad timeout");

        let error = SpellError::channel_closed("worker exited");
        assert_eq!(error.to_string(), "Spellcheck channel closed: worker exited");
        assert!(error.is_recoverable());

        let error = SpellError::ThreadSpawn(io::Error::other("no threads left"));
        assert_eq!(error.to_string(), "Failed to spawn worker thread: no threads left");
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_load_error_classification() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let error = SpellError::from_load("/nope/words", missing);
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Dictionary not found: /nope/words");

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = SpellError::from_load("/root/words", denied);
        assert!(!error.is_not_found());
        match error {
            SpellError::Load { path, .. } => assert_eq!(path, PathBuf::from("/root/words")),
            _ => panic!("Expected Load variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe");
        let spell_error = SpellError::from(io_error);

        match spell_error {
            SpellError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
