/// Error-collection formatting: human-readable and JSON modes.
///
/// - **Human mode** (default): one line per validation error, then a summary
///   line, all to stderr. The `[E]` tag is colored unless `--no-color` is
///   set, `NO_COLOR` is present, or stderr is not a TTY.
/// - **JSON mode**: the filing API's `{"errors": [...]}` document, one line,
///   to stdout. Nothing else is written to stdout.
///
/// Quiet mode drops the human summary; verbose mode adds timing.
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use accval_core::{Errors, SubmissionKind, ValidationError};

use crate::OutputFormat;

/// Returns `true` if ANSI color codes should be emitted to stderr.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

/// Formatter settings derived from the global CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    pub colors: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl FormatterConfig {
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

/// Writes one validation error as a human-readable line.
///
/// Format: `[E] incorrect_total  $.stocks.current_period.total`
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_error_human<W: Write>(
    writer: &mut W,
    error: &ValidationError,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let code = error.error.code();
    if config.colors {
        writeln!(
            writer,
            "{ANSI_RED}[E]{ANSI_RESET} {code}  {}",
            error.location
        )
    } else {
        writeln!(writer, "[E] {code}  {}", error.location)
    }
}

/// Writes the summary line: `stocks: 2 errors` or `stocks: valid`.
///
/// Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    kind: SubmissionKind,
    count: usize,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    if count == 0 {
        if config.colors {
            writeln!(writer, "{kind}: {ANSI_GREEN}valid{ANSI_RESET}")
        } else {
            writeln!(writer, "{kind}: valid")
        }
    } else {
        writeln!(
            writer,
            "{kind}: {count} {}",
            pluralize(count, "error", "errors")
        )
    }
}

/// Writes timing information in verbose mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing_human<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

/// Writes the error collection as a single-line JSON document.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_errors_json<W: Write>(writer: &mut W, errors: &Errors) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, errors)?;
    writeln!(writer)
}

/// Writes a validation outcome in the requested format: human output goes
/// to `err_out`, JSON to `out`.
///
/// # Errors
///
/// Returns an error only if writing fails.
pub fn write_report<O: Write, E: Write>(
    out: &mut O,
    err_out: &mut E,
    kind: SubmissionKind,
    errors: &Errors,
    format: OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => {
            for error in errors {
                write_error_human(err_out, error, config)?;
            }
            write_summary_human(err_out, kind, errors.len(), config)
        }
        OutputFormat::Json => write_errors_json(out, errors),
    }
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use accval_core::{ErrorKey, JsonPath, NoteKind};

    use super::*;

    fn plain() -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet: false,
            verbose: false,
        }
    }

    fn stocks() -> SubmissionKind {
        SubmissionKind::Note(NoteKind::Stocks)
    }

    fn two_errors() -> Errors {
        let mut errors = Errors::new();
        errors.push(
            ErrorKey::IncorrectTotal,
            JsonPath::root("stocks").field("current_period").field("total"),
        );
        errors.push(
            ErrorKey::UnexpectedData,
            JsonPath::root("stocks").field("previous_period"),
        );
        errors
    }

    fn render(errors: &Errors, format: OutputFormat, config: &FormatterConfig) -> (String, String) {
        let mut out = Vec::new();
        let mut err_out = Vec::new();
        write_report(&mut out, &mut err_out, stocks(), errors, format, config).expect("write");
        (
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err_out).expect("utf8"),
        )
    }

    #[test]
    fn human_mode_writes_one_line_per_error_and_a_summary() {
        let (out, err_out) = render(&two_errors(), OutputFormat::Human, &plain());
        assert!(out.is_empty());
        let lines: Vec<&str> = err_out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[E] incorrect_total  $.stocks.current_period.total",
                "[E] unexpected_data  $.stocks.previous_period",
                "stocks: 2 errors",
            ]
        );
    }

    #[test]
    fn human_mode_reports_valid_submission() {
        let (_, err_out) = render(&Errors::new(), OutputFormat::Human, &plain());
        assert_eq!(err_out, "stocks: valid\n");
    }

    #[test]
    fn quiet_mode_drops_summary_but_keeps_errors() {
        let config = FormatterConfig {
            quiet: true,
            ..plain()
        };
        let (_, err_out) = render(&two_errors(), OutputFormat::Human, &config);
        assert_eq!(err_out.lines().count(), 2);
        assert!(!err_out.contains("stocks:"));
    }

    #[test]
    fn colored_tag_is_wrapped_in_ansi_codes() {
        let config = FormatterConfig {
            colors: true,
            ..plain()
        };
        let (_, err_out) = render(&two_errors(), OutputFormat::Human, &config);
        assert!(err_out.starts_with("\x1b[31m[E]\x1b[0m incorrect_total"));
    }

    #[test]
    fn json_mode_writes_error_document_to_stdout_only() {
        let (out, err_out) = render(&two_errors(), OutputFormat::Json, &plain());
        assert!(err_out.is_empty());
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        let errors = value["errors"].as_array().expect("errors array");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["error"], "incorrect_total");
        assert_eq!(errors[0]["location_type"], "json-path");
        assert_eq!(errors[1]["location"], "$.stocks.previous_period");
    }

    #[test]
    fn timing_only_in_verbose_mode() {
        let mut buf = Vec::new();
        write_timing_human(&mut buf, "validated", Duration::from_millis(12), &plain())
            .expect("write");
        assert!(buf.is_empty());

        let verbose = FormatterConfig {
            verbose: true,
            ..plain()
        };
        write_timing_human(&mut buf, "validated", Duration::from_millis(12), &verbose)
            .expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "validated in 12ms\n");
    }
}
