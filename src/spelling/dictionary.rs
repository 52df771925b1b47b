//! Word list storage for spelling suggestions.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use ahash::AHashSet;
use log::debug;

use crate::error::{Result, SpellError};

/// An ordered list of known-correct words.
///
/// Entries are kept exactly as loaded: case-sensitive, duplicates allowed,
/// blank lines preserved unless removed with [`Dictionary::without_blank_entries`].
/// Iteration order is the load order, which the suggestion selector relies on
/// for tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Dictionary { words: Vec::new() }
    }

    /// Build a dictionary from words in the given order.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dictionary {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a dictionary from a text file with one word per line.
    ///
    /// A missing file returns [`SpellError::DictionaryNotFound`] so the caller
    /// can try another location; other failures return [`SpellError::Load`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SpellError::from_load(path, e))?;
        let dictionary = Self::load_from_reader(file).map_err(|e| match e {
            SpellError::Io(source) => SpellError::from_load(path, source),
            other => other,
        })?;

        debug!(
            "loaded {} dictionary entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Load newline-delimited words from any reader.
    ///
    /// `\n` and `\r\n` terminators are stripped. Empty lines become empty entries.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut words = Vec::new();
        for line in BufReader::new(reader).lines() {
            let mut line = line?;
            if line.ends_with('\r') {
                line.pop();
            }
            words.push(line);
        }

        Ok(Dictionary { words })
    }

    /// Remove entries that are empty or whitespace only.
    pub fn without_blank_entries(mut self) -> Self {
        self.words.retain(|word| !word.trim().is_empty());
        self
    }

    /// Check if a word exists in the dictionary. Case-sensitive.
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Iterate the entries in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }

    /// All entries in load order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of entries, counting duplicates and blank lines.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of distinct entries.
    pub fn distinct_count(&self) -> usize {
        self.words.iter().collect::<AHashSet<_>>().len()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
