//! Command implementations for the Spellkeeper CLI.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SpellError};
use crate::spelling::levenshtein::levenshtein_distance;
use crate::worker::{SpellcheckClient, SuggestionResponse, WorkerState};

/// Execute a CLI command.
pub fn execute_command(args: SpellkeeperArgs) -> Result<()> {
    match &args.command {
        Command::Suggest(suggest_args) => suggest_words(suggest_args, &args),
        Command::Distance(distance_args) => show_distance(distance_args, &args),
        Command::Check(check_args) => check_file(check_args, &args),
        Command::Repl(repl_args) => start_repl(repl_args, &args),
    }
}

/// Start a client and require a ready worker.
fn ready_client(cli_args: &SpellkeeperArgs) -> Result<SpellcheckClient> {
    let mut client = SpellcheckClient::new(cli_args.spell_config()?);
    match client.enable(None)? {
        WorkerState::Ready => Ok(client),
        state => Err(SpellError::invalid_operation(format!(
            "no usable dictionary, spellcheck worker is {state}"
        ))),
    }
}

/// Treat a vanished or slow worker as "no suggestions".
fn or_no_suggestions(result: Result<SuggestionResponse>) -> Result<SuggestionResponse> {
    match result {
        Err(e) if e.is_recoverable() => {
            warn!("{e}");
            Ok(SuggestionResponse::empty())
        }
        other => other,
    }
}

/// Suggest corrections for each word on the command line.
fn suggest_words(args: &SuggestArgs, cli_args: &SpellkeeperArgs) -> Result<()> {
    let start = Instant::now();
    let mut client = ready_client(cli_args)?;

    let mut results = Vec::with_capacity(args.words.len());
    for word in &args.words {
        let response = or_no_suggestions(client.check_words(&[word.as_str()]))?;
        results.push(WordSuggestions {
            word: word.clone(),
            suggestions: response.suggestions,
        });
    }
    client.shutdown()?;

    output_result(
        "Suggestions",
        &SuggestResults {
            results,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Print the edit distance between two words.
fn show_distance(args: &DistanceArgs, cli_args: &SpellkeeperArgs) -> Result<()> {
    output_result(
        "Edit distance",
        &DistanceResult {
            a: args.a.clone(),
            b: args.b.clone(),
            distance: levenshtein_distance(&args.a, &args.b),
        },
        cli_args,
    )
}

/// Check every line of a file through the worker.
fn check_file(args: &CheckArgs, cli_args: &SpellkeeperArgs) -> Result<()> {
    let start = Instant::now();
    let mut config = cli_args.spell_config()?;
    if let Some(min_line_length) = args.min_line_length {
        config.min_line_length = min_line_length;
    }

    let mut client = SpellcheckClient::new(config);
    if client.enable(None)? != WorkerState::Ready {
        return Err(SpellError::invalid_operation("no usable dictionary"));
    }

    if cli_args.verbosity() > 1 {
        println!("Checking: {}", args.file.display());
    }

    let reader = BufReader::new(File::open(&args.file)?);
    let mut reports = Vec::new();
    let mut lines_checked = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        lines_checked += 1;
        let response = or_no_suggestions(client.check_line(&line))?;
        if !response.is_empty() {
            reports.push(LineReport {
                line: index + 1,
                text: line,
                suggestions: response.suggestions,
            });
        }
    }
    client.shutdown()?;

    output_result(
        "Check results",
        &CheckResults {
            file: args.file.display().to_string(),
            lines_checked,
            reports,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Run the interactive session on stdin/stdout.
fn start_repl(args: &ReplArgs, cli_args: &SpellkeeperArgs) -> Result<()> {
    let mut client = SpellcheckClient::new(cli_args.spell_config()?);
    if args.spellcheck {
        let state = client.enable(None)?;
        if let Some(notice) = enable_notice(state) {
            eprintln!("{notice}");
        }
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_repl(&mut client, stdin.lock(), stdout.lock())?;
    client.shutdown()
}

/// Commands understood by the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `.p on [path]`
    SpellOn(Option<PathBuf>),
    /// `.p off`
    SpellOff,
    /// `.i`
    Status,
    /// `.h`
    Help,
    /// `.q`
    Quit,
    /// Anything else starting with `.`
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line as a command. Lines not starting with `.` are text.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix('.')?;
        let mut parts = rest.split_whitespace();

        let command = match (parts.next(), parts.next(), parts.next()) {
            (Some("q"), None, _) => ReplCommand::Quit,
            (Some("h"), None, _) => ReplCommand::Help,
            (Some("i"), None, _) => ReplCommand::Status,
            (Some("p"), Some("on"), path) => ReplCommand::SpellOn(path.map(PathBuf::from)),
            (Some("p"), Some("off"), None) => ReplCommand::SpellOff,
            _ => ReplCommand::Unknown(line.trim().to_string()),
        };
        Some(command)
    }
}

const HELP: &str = "\
.p on [path]\tTurn spellchecking on
.p off\t\tTurn spellchecking off
.i\t\tSpellcheck status
.h\t\tHelp
.q\t\tQuit";

/// Message shown when turning spellchecking on did not work.
fn enable_notice(state: WorkerState) -> Option<&'static str> {
    (state == WorkerState::Stopped)
        .then_some("default dictionary not found. Please specify a dictionary to use spellchecking")
}

/// Read lines from `input`, sending text lines to the worker and handling commands.
pub fn run_repl<R: BufRead, W: Write>(
    client: &mut SpellcheckClient,
    input: R,
    mut output: W,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;

        match ReplCommand::parse(&line) {
            Some(ReplCommand::Quit) => break,
            Some(ReplCommand::Help) => writeln!(output, "{HELP}")?,
            Some(ReplCommand::Status) => writeln!(output, "spellcheck: {}", client.state())?,
            Some(ReplCommand::SpellOn(path)) => {
                let state = client.enable(path)?;
                if let Some(notice) = enable_notice(state) {
                    writeln!(output, "{notice}")?;
                }
                writeln!(output, "spellcheck: {state}")?;
            }
            Some(ReplCommand::SpellOff) => {
                client.disable()?;
                writeln!(output, "spellcheck: off")?;
            }
            Some(ReplCommand::Unknown(command)) => {
                writeln!(output, "unknown command {command}, .h for help")?
            }
            None => {
                if !client.is_enabled() {
                    continue;
                }
                // Short lines and correct text print nothing
                let response = or_no_suggestions(client.check_line(&line))?;
                if !response.is_empty() {
                    writeln!(output, "{}", format_corrections(&response.suggestions))?;
                }
            }
        }
        output.flush()?;
    }

    info!("session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpellConfig;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn word_file(words: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for word in words {
            writeln!(file, "{word}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_repl_commands() {
        assert_eq!(ReplCommand::parse(".q"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse(" .p off "), Some(ReplCommand::SpellOff));
        assert_eq!(ReplCommand::parse(".p on"), Some(ReplCommand::SpellOn(None)));
        assert_eq!(
            ReplCommand::parse(".p on /tmp/words"),
            Some(ReplCommand::SpellOn(Some(PathBuf::from("/tmp/words"))))
        );
        assert_eq!(
            ReplCommand::parse(".p maybe"),
            Some(ReplCommand::Unknown(".p maybe".to_string()))
        );
        assert_eq!(ReplCommand::parse("plain text"), None);
    }

    #[test]
    fn test_repl_session() {
        let words = word_file(&["jupiter", "neptune", "earth", "hello", "something", "random"]);
        let mut client = SpellcheckClient::new(SpellConfig::default());

        let input = format!(
            ".p on {}\ncello\nhello\nab\n.p off\ncello\n.i\n.q\nnever read\n",
            words.path().display()
        );
        let mut output = Vec::new();
        run_repl(&mut client, Cursor::new(input), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "spellcheck: ready\n\
             corrections: 1:hello 2:earth 3:random\n\
             spellcheck: off\n\
             spellcheck: stopped\n"
        );
    }

    #[test]
    fn test_enable_notice_only_when_stopped() {
        assert!(enable_notice(WorkerState::Stopped).is_some());
        // Still loading is not the same as having no dictionary
        assert_eq!(enable_notice(WorkerState::Loading), None);
        assert_eq!(enable_notice(WorkerState::Ready), None);
    }

    #[test]
    fn test_repl_missing_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let config = SpellConfig::default().with_fallback(dir.path().join("missing"));
        let mut client = SpellcheckClient::new(config);

        let input = ".p on\ncello\n.q\n";
        let mut output = Vec::new();
        run_repl(&mut client, Cursor::new(input), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "default dictionary not found. Please specify a dictionary to use spellchecking\n\
             spellcheck: stopped\n"
        );
    }

    #[test]
    fn test_recoverable_errors_become_no_suggestions() {
        let response = or_no_suggestions(Err(SpellError::timeout("late"))).unwrap();
        assert!(response.is_empty());

        let response = or_no_suggestions(Err(SpellError::channel_closed("gone"))).unwrap();
        assert!(response.is_empty());

        let result = or_no_suggestions(Err(SpellError::invalid_operation("bad")));
        assert!(matches!(result, Err(SpellError::InvalidOperation(_))));
    }
}
