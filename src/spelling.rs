//! Dictionary, edit distance and top-K suggestion selection.
//!
//! These pieces are pure and synchronous; the [`crate::worker`] module runs
//! them on a background thread.

pub mod dictionary;
pub mod levenshtein;
pub mod suggest;

pub use dictionary::Dictionary;
pub use levenshtein::{LevenshteinMatcher, levenshtein_distance, levenshtein_distance_threshold};
pub use suggest::{
    SelectionStrategy, Suggestion, SuggestionConfig, SuggestionEngine, needs_correction, rank,
    suggest, suggest_with,
};
