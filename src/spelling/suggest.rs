//! Spelling suggestion selection.
//!
//! Given a word that is not in the dictionary, pick the `k` dictionary entries
//! closest to it by edit distance. Ties are broken by the position of an
//! entry's first occurrence in the dictionary, so results are reproducible for
//! a given word list.

use std::collections::BinaryHeap;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::spelling::dictionary::Dictionary;
use crate::spelling::levenshtein::LevenshteinMatcher;

/// A suggested word together with its edit distance from the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word, trimmed of surrounding whitespace.
    pub word: String,
    /// Edit distance from the original word.
    pub distance: usize,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new<S: Into<String>>(word: S, distance: usize) -> Self {
        Suggestion {
            word: word.into(),
            distance,
        }
    }
}

/// Algorithm used to select the top `k` candidates.
///
/// Both strategies return the same words in the same order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    /// Scan the whole dictionary once per suggestion, taking the closest
    /// entry not chosen yet. Costs `k` full scans.
    Rescan,
    /// Scan once, keeping the best `k` in a bounded heap and skipping
    /// entries that cannot beat the current worst.
    #[default]
    Heap,
}

/// Configuration for suggestion generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Maximum number of suggestions to return per word.
    pub max_suggestions: usize,
    /// Top-K selection algorithm.
    pub strategy: SelectionStrategy,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_suggestions: 3,
            strategy: SelectionStrategy::default(),
        }
    }
}

/// Whether `word` should be corrected at all.
///
/// Empty and whitespace-only words never need correcting, nor do words that
/// appear verbatim in the dictionary.
pub fn needs_correction(word: &str, dictionary: &Dictionary) -> bool {
    !word.trim().is_empty() && !dictionary.contains(word)
}

/// Up to `k` corrections for `word`, closest first.
pub fn suggest(word: &str, dictionary: &Dictionary, k: usize) -> Vec<String> {
    suggest_with(word, dictionary, k, SelectionStrategy::default())
}

/// Like [`suggest`] with an explicit selection strategy.
pub fn suggest_with(
    word: &str,
    dictionary: &Dictionary,
    k: usize,
    strategy: SelectionStrategy,
) -> Vec<String> {
    rank(word, dictionary, k, strategy)
        .into_iter()
        .map(|suggestion| suggestion.word)
        .collect()
}

/// Up to `k` corrections for `word` with their distances, closest first.
pub fn rank(
    word: &str,
    dictionary: &Dictionary,
    k: usize,
    strategy: SelectionStrategy,
) -> Vec<Suggestion> {
    if k == 0 || !needs_correction(word, dictionary) {
        return Vec::new();
    }

    let matcher = LevenshteinMatcher::new(word);
    match strategy {
        SelectionStrategy::Rescan => select_by_rescan(&matcher, dictionary, k),
        SelectionStrategy::Heap => select_with_heap(&matcher, dictionary, k),
    }
}

// Blank entries are never offered as corrections.
fn is_blank(entry: &str) -> bool {
    entry.trim().is_empty()
}

fn select_by_rescan(
    matcher: &LevenshteinMatcher,
    dictionary: &Dictionary,
    k: usize,
) -> Vec<Suggestion> {
    let mut chosen: AHashSet<&str> = AHashSet::new();
    let mut suggestions = Vec::with_capacity(k.min(dictionary.len()));

    for _ in 0..k {
        let mut best: Option<(&str, usize)> = None;

        for entry in dictionary {
            if is_blank(entry) || chosen.contains(entry.as_str()) {
                continue;
            }
            let distance = matcher.distance(entry);
            // Strict comparison keeps the first entry among equals
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((entry, distance));
            }
        }

        match best {
            Some((entry, distance)) => {
                chosen.insert(entry);
                suggestions.push(Suggestion::new(entry.trim(), distance));
            }
            None => break,
        }
    }

    suggestions
}

fn select_with_heap(
    matcher: &LevenshteinMatcher,
    dictionary: &Dictionary,
    k: usize,
) -> Vec<Suggestion> {
    let words = dictionary.words();
    let mut seen: AHashSet<&str> = AHashSet::new();
    // Max-heap on (distance, first index): the root is the current worst keeper.
    let mut heap: BinaryHeap<(usize, usize)> = BinaryHeap::with_capacity(k.min(words.len()) + 1);

    for (index, entry) in words.iter().enumerate() {
        if is_blank(entry) || !seen.insert(entry.as_str()) {
            continue;
        }

        let distance = match heap.peek() {
            Some(&(worst, _)) if heap.len() >= k => {
                // A later entry must be strictly closer to displace the worst
                if worst == 0 {
                    continue;
                }
                match matcher.distance_threshold(entry, worst - 1) {
                    Some(distance) => distance,
                    None => continue,
                }
            }
            _ => matcher.distance(entry),
        };

        heap.push((distance, index));
        if heap.len() > k {
            heap.pop();
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|(distance, index)| Suggestion::new(words[index].trim(), distance))
        .collect()
}

/// Suggestion engine that owns a dictionary.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    dictionary: Dictionary,
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create a new suggestion engine with the given dictionary.
    pub fn new(dictionary: Dictionary) -> Self {
        SuggestionEngine {
            dictionary,
            config: SuggestionConfig::default(),
        }
    }

    /// Create a new suggestion engine with custom configuration.
    pub fn with_config(dictionary: Dictionary, config: SuggestionConfig) -> Self {
        SuggestionEngine { dictionary, config }
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Check if a word exists in the dictionary.
    pub fn is_correct(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    /// Corrections for a single word.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        suggest_with(
            word,
            &self.dictionary,
            self.config.max_suggestions,
            self.config.strategy,
        )
    }

    /// Corrections for a single word with distances.
    pub fn ranked(&self, word: &str) -> Vec<Suggestion> {
        rank(
            word,
            &self.dictionary,
            self.config.max_suggestions,
            self.config.strategy,
        )
    }

    /// Corrections for every word, concatenated in input order.
    pub fn suggest_batch<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        words
            .iter()
            .flat_map(|word| self.suggest(word.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [SelectionStrategy; 2] = [SelectionStrategy::Rescan, SelectionStrategy::Heap];

    fn planets() -> Dictionary {
        Dictionary::from_words(["jupiter", "neptune", "earth", "hello", "something", "random"])
    }

    #[test]
    fn test_cello_suggestions() {
        for strategy in STRATEGIES {
            let suggestions = rank("cello", &planets(), 3, strategy);

            assert_eq!(
                suggestions,
                vec![
                    Suggestion::new("hello", 1),
                    // earth and random tie at 5; earth comes first in the list
                    Suggestion::new("earth", 5),
                    Suggestion::new("random", 5),
                ],
                "{strategy:?}"
            );
        }
    }

    #[test]
    fn test_known_word_needs_no_suggestions() {
        for strategy in STRATEGIES {
            assert!(suggest_with("hello", &planets(), 3, strategy).is_empty());
        }
    }

    #[test]
    fn test_blank_input_needs_no_suggestions() {
        for word in ["", " ", "\t", "   "] {
            assert!(suggest(word, &planets(), 3).is_empty());
        }
    }

    #[test]
    fn test_empty_dictionary() {
        let empty = Dictionary::new();
        for strategy in STRATEGIES {
            assert!(suggest_with("anything", &empty, 3, strategy).is_empty());
            assert!(suggest_with("", &empty, 0, strategy).is_empty());
        }
    }

    #[test]
    fn test_zero_k() {
        assert!(suggest("cello", &planets(), 0).is_empty());
    }

    #[test]
    fn test_k_larger_than_dictionary() {
        let dict = Dictionary::from_words(["apple", "apply", "apple"]);
        for strategy in STRATEGIES {
            let suggestions = suggest_with("appel", &dict, 10, strategy);
            assert_eq!(suggestions, vec!["apple", "apply"], "{strategy:?}");
        }
    }

    #[test]
    fn test_blank_entries_never_suggested() {
        let dict = Dictionary::from_words(["", "  ", "ab"]);
        for strategy in STRATEGIES {
            assert_eq!(suggest_with("x", &dict, 3, strategy), vec!["ab"]);
        }
    }

    #[test]
    fn test_suggestions_are_trimmed() {
        // Distance is measured on the raw entry: " hello " is 3 away, "cellar" 2
        let dict = Dictionary::from_words([" hello ", "cellar"]);
        for strategy in STRATEGIES {
            assert_eq!(
                suggest_with("cello", &dict, 2, strategy),
                vec!["cellar", "hello"],
                "{strategy:?}"
            );
        }
    }

    #[test]
    fn test_case_sensitive_membership() {
        let dict = Dictionary::from_words(["Hello"]);
        assert_eq!(suggest("hello", &dict, 1), vec!["Hello"]);
    }

    #[test]
    fn test_engine_batch_is_flattened_in_order() {
        let engine = SuggestionEngine::with_config(
            planets(),
            SuggestionConfig {
                max_suggestions: 1,
                strategy: SelectionStrategy::Heap,
            },
        );

        let batch = engine.suggest_batch(&["cello", "hello", "nepture", " "]);
        assert_eq!(batch, vec!["hello", "neptune"]);
        assert!(engine.is_correct("earth"));
        assert_eq!(engine.ranked("erth"), vec![Suggestion::new("earth", 1)]);
    }
}
