//! Command line argument parsing for the Spellkeeper CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::SpellConfig;
use crate::error::Result;
use crate::spelling::suggest::SelectionStrategy;

/// Spellkeeper - background spelling suggestions
#[derive(Parser, Debug, Clone)]
#[command(name = "spellkeeper")]
#[command(about = "Spelling suggestions from a background worker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Spellkeeper Contributors")]
#[command(long_about = None)]
pub struct SpellkeeperArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Dictionary file, one word per line
    #[arg(short, long, value_name = "DICTIONARY", env = "SPELLKEEPER_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Dictionary used when the requested one does not exist
    #[arg(long, value_name = "DICTIONARY")]
    pub fallback: Option<PathBuf>,

    /// Maximum suggestions per misspelled word
    #[arg(short = 'k', long)]
    pub max_suggestions: Option<usize>,

    /// Top-K selection algorithm
    #[arg(long)]
    pub selection: Option<SelectionArg>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpellkeeperArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Build the worker configuration: file (or defaults), then flags.
    pub fn spell_config(&self) -> Result<SpellConfig> {
        let mut config = match &self.config {
            Some(path) => SpellConfig::from_file(path)?,
            None => SpellConfig::default(),
        };

        if let Some(dictionary) = &self.dictionary {
            config.dictionary_path = Some(dictionary.clone());
        }
        if let Some(fallback) = &self.fallback {
            config.fallback_path = fallback.clone();
        }
        if let Some(max_suggestions) = self.max_suggestions {
            config.max_suggestions = max_suggestions;
        }
        if let Some(selection) = self.selection {
            config.selection = selection.into();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Suggest corrections for words
    Suggest(SuggestArgs),

    /// Print the edit distance between two words
    Distance(DistanceArgs),

    /// Check every line of a text file
    Check(CheckArgs),

    /// Interactive line-by-line checking
    Repl(ReplArgs),
}

/// Arguments for suggesting corrections
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Words to check
    #[arg(value_name = "WORDS", required = true)]
    pub words: Vec<String>,
}

/// Arguments for the distance command
#[derive(Parser, Debug, Clone)]
pub struct DistanceArgs {
    #[arg(value_name = "A")]
    pub a: String,

    #[arg(value_name = "B")]
    pub b: String,
}

/// Arguments for checking a file
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Text file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Minimum line length worth checking
    #[arg(long)]
    pub min_line_length: Option<usize>,
}

/// Arguments for the interactive session
#[derive(Parser, Debug, Clone)]
pub struct ReplArgs {
    /// Start with spellchecking on
    #[arg(long)]
    pub spellcheck: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Selection strategies accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionArg {
    /// Full dictionary scan per suggestion
    Rescan,
    /// Single pass with a bounded heap
    Heap,
}

impl From<SelectionArg> for SelectionStrategy {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Rescan => SelectionStrategy::Rescan,
            SelectionArg::Heap => SelectionStrategy::Heap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suggest() {
        let args = SpellkeeperArgs::try_parse_from([
            "spellkeeper",
            "-d",
            "/tmp/words",
            "-k",
            "5",
            "--selection",
            "rescan",
            "suggest",
            "cello",
            "wrld",
        ])
        .unwrap();

        match &args.command {
            Command::Suggest(suggest) => assert_eq!(suggest.words, vec!["cello", "wrld"]),
            other => panic!("Expected suggest command, got {other:?}"),
        }

        let config = args.spell_config().unwrap();
        assert_eq!(config.dictionary_path, Some(PathBuf::from("/tmp/words")));
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.selection, SelectionStrategy::Rescan);
    }

    #[test]
    fn test_verbosity() {
        let args = SpellkeeperArgs::try_parse_from(["spellkeeper", "-vv", "distance", "a", "b"])
            .unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            SpellkeeperArgs::try_parse_from(["spellkeeper", "-q", "-v", "distance", "a", "b"])
                .unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_suggest_requires_words() {
        assert!(SpellkeeperArgs::try_parse_from(["spellkeeper", "suggest"]).is_err());
    }

    #[test]
    fn test_repl_starts_with_spellcheck_off() {
        let args = SpellkeeperArgs::try_parse_from(["spellkeeper", "repl"]).unwrap();
        assert!(matches!(args.command, Command::Repl(ReplArgs { spellcheck: false })));

        let args = SpellkeeperArgs::try_parse_from(["spellkeeper", "repl", "--spellcheck"]).unwrap();
        assert!(matches!(args.command, Command::Repl(ReplArgs { spellcheck: true })));
    }
}
