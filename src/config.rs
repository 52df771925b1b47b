//! Configuration for the spellcheck worker and its client.
//!
//! Configuration can be built in code with the `with_*` setters or read from a
//! JSON file. Every field has a default, so a file only needs to name the
//! settings it overrides:
//!
//! ```
//! use spellkeeper::config::SpellConfig;
//!
//! let config = SpellConfig::from_json_str(r#"{ "max_suggestions": 5 }"#).unwrap();
//! assert_eq!(config.max_suggestions, 5);
//! assert_eq!(config.min_line_length, 3);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellError};
use crate::spelling::suggest::SelectionStrategy;

/// Dictionary location found on most Unix systems.
pub const DEFAULT_FALLBACK_DICTIONARY: &str = "/usr/share/dict/words";

/// Settings shared by the worker and the client adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    /// Dictionary requested by the user.
    pub dictionary_path: Option<PathBuf>,

    /// Dictionary tried once when the requested one does not exist.
    pub fallback_path: PathBuf,

    /// Maximum suggestions returned for each misspelled word.
    pub max_suggestions: usize,

    /// Lines shorter than this are not sent to the worker.
    pub min_line_length: usize,

    /// Optional bound on waiting for a reply. `None` waits until the worker
    /// answers or exits.
    pub reply_timeout_ms: Option<u64>,

    /// How long `enable` waits for the dictionary load to finish.
    pub startup_timeout_ms: u64,

    /// Top-K selection algorithm.
    pub selection: SelectionStrategy,

    /// Drop blank dictionary lines at load time.
    pub skip_blank_lines: bool,
}

impl Default for SpellConfig {
    fn default() -> Self {
        SpellConfig {
            dictionary_path: None,
            fallback_path: PathBuf::from(DEFAULT_FALLBACK_DICTIONARY),
            max_suggestions: 3,
            min_line_length: 3,
            reply_timeout_ms: None,
            startup_timeout_ms: 30_000,
            selection: SelectionStrategy::default(),
            skip_blank_lines: false,
        }
    }
}

impl SpellConfig {
    /// Read a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Parse a JSON configuration string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SpellConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.reply_timeout_ms == Some(0) {
            return Err(SpellError::invalid_config(
                "reply_timeout_ms must be greater than zero",
            ));
        }
        if self.startup_timeout_ms == 0 {
            return Err(SpellError::invalid_config(
                "startup_timeout_ms must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn with_dictionary<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.dictionary_path = Some(path.into());
        self
    }

    pub fn with_fallback<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.fallback_path = path.into();
        self
    }

    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn with_min_line_length(mut self, min_line_length: usize) -> Self {
        self.min_line_length = min_line_length;
        self
    }

    /// Bound reply waits. Rounded up to whole milliseconds.
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout_ms = Some(whole_millis(timeout));
        self
    }

    /// Bound the startup wait. Rounded up to whole milliseconds.
    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout_ms = whole_millis(timeout);
        self
    }

    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    /// Reply timeout as a [`Duration`], if one is set.
    pub fn reply_timeout(&self) -> Option<Duration> {
        self.reply_timeout_ms.map(Duration::from_millis)
    }

    /// Startup timeout as a [`Duration`].
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }
}

// Never zero, so a tiny duration still passes validation.
fn whole_millis(duration: Duration) -> u64 {
    let millis = duration.as_nanos().div_ceil(1_000_000).max(1);
    u64::try_from(millis).unwrap_or(u64::MAX)
}
