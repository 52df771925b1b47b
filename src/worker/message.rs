//! Request and response types exchanged with the spellcheck worker.

use serde::{Deserialize, Serialize};

/// A batch of words to check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub words: Vec<String>,
}

impl SuggestionRequest {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SuggestionRequest {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a line of text on whitespace.
    pub fn from_line(line: &str) -> Self {
        Self::new(line.split_whitespace())
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Suggestions for every misspelled word of a request, flattened in input order.
///
/// An empty response means "no suggestions".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<String>,
}

impl SuggestionResponse {
    pub fn new(suggestions: Vec<String>) -> Self {
        SuggestionResponse { suggestions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.suggestions.iter()
    }
}
