//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpellkeeperArgs};
use crate::error::Result;

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

/// Suggestions for one word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSuggestions {
    pub word: String,
    pub suggestions: Vec<String>,
}

/// Result structure for the suggest command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResults {
    pub results: Vec<WordSuggestions>,
    pub duration_ms: u64,
}

impl HumanOutput for SuggestResults {
    fn render_human(&self) -> String {
        self.results
            .iter()
            .map(|result| format!("{}: {}", result.word, format_corrections(&result.suggestions)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result structure for the distance command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub a: String,
    pub b: String,
    pub distance: usize,
}

impl HumanOutput for DistanceResult {
    fn render_human(&self) -> String {
        format!("{} -> {}: {}", self.a, self.b, self.distance)
    }
}

/// Suggestions for one line of a checked file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineReport {
    pub line: usize,
    pub text: String,
    pub suggestions: Vec<String>,
}

/// Result structure for the check command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResults {
    pub file: String,
    pub lines_checked: usize,
    pub reports: Vec<LineReport>,
    pub duration_ms: u64,
}

impl HumanOutput for CheckResults {
    fn render_human(&self) -> String {
        if self.reports.is_empty() {
            return format!("{}: no suggestions", self.file);
        }
        self.reports
            .iter()
            .map(|report| {
                format!(
                    "{}:{}: {}",
                    self.file,
                    report.line,
                    format_corrections(&report.suggestions)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render suggestions as `corrections: 1:foo 2:bar`, or `no suggestions`.
pub fn format_corrections(suggestions: &[String]) -> String {
    let numbered: Vec<String> = suggestions
        .iter()
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, s)| format!("{}:{}", i + 1, s))
        .collect();

    if numbered.is_empty() {
        "no suggestions".to_string()
    } else {
        format!("corrections: {}", numbered.join(" "))
    }
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &SpellkeeperArgs,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args.output_format, args.pretty, args.verbosity())
}

/// Write a result to any writer.
pub fn write_result<W: Write, T: Serialize + HumanOutput>(
    out: &mut W,
    message: &str,
    result: &T,
    format: OutputFormat,
    pretty: bool,
    verbosity: u8,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if verbosity > 1 {
                writeln!(out, "{message}")?;
            }
            writeln!(out, "{}", result.render_human())?;
        }
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_corrections() {
        let suggestions = vec!["hello".to_string(), "".to_string(), "earth".to_string()];
        assert_eq!(format_corrections(&suggestions), "corrections: 1:hello 2:earth");
        assert_eq!(format_corrections(&[]), "no suggestions");
    }

    #[test]
    fn test_write_json_result() {
        let result = DistanceResult {
            a: "hello".to_string(),
            b: "cello".to_string(),
            distance: 1,
        };

        let mut out = Vec::new();
        write_result(&mut out, "Distance", &result, OutputFormat::Json, false, 1).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"a\":\"hello\",\"b\":\"cello\",\"distance\":1}\n"
        );
    }

    #[test]
    fn test_write_human_result() {
        let result = SuggestResults {
            results: vec![WordSuggestions {
                word: "cello".to_string(),
                suggestions: vec!["hello".to_string()],
            }],
            duration_ms: 0,
        };

        let mut out = Vec::new();
        write_result(&mut out, "Suggestions", &result, OutputFormat::Human, false, 1).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cello: corrections: 1:hello\n");
    }
}
