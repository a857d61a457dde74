//! Implementation of `accval validate --kind <kind> --context <file> <FILE>`.
//!
//! Parses the submitted body by kind, loads the transaction identity and the
//! sibling data fixture from the context file, runs the validation engine
//! and reports the error collection.
//!
//! Exit codes:
//! - 0 = valid (empty error collection)
//! - 1 = validation errors
//! - 2 = unreadable or unparsable input, or unknown kind
//! - 3 = sibling data could not be fetched, or engine misconfigured
use std::error::Error as _;
use std::time::{Duration, Instant};

use accval_core::{
    DataError, DeadlineGateway, EngineError, GatewayConfig, GrossProfitConvention, StaticGateway,
    Submission, SubmissionKind, TransactionContext, ValidationConfig, ValidationEngine,
};
use serde::Deserialize;

use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_errors_json, write_report, write_timing_human};

/// The `--context` file: which filing the submission belongs to, and the
/// sibling data the validators may look up.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextFile {
    pub transaction: TransactionContext,
    #[serde(default)]
    pub gateway: StaticGateway,
}

/// Engine settings taken from the `validate` flags.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub gateway_timeout: Duration,
    pub max_text_length: Option<usize>,
    pub gross_profit: GrossProfitConvention,
}

impl ValidateOptions {
    fn validation_config(&self) -> ValidationConfig {
        let defaults = ValidationConfig::default();
        ValidationConfig {
            max_text_length: self.max_text_length.unwrap_or(defaults.max_text_length),
            gross_profit_convention: self.gross_profit,
            ..defaults
        }
    }
}

/// Output settings taken from the global flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// Runs the `validate` command over already-read `body` and `context` text.
///
/// # Errors
///
/// - [`CliError::UnknownKind`] / [`CliError::ParseFailed`]: nothing was
///   validated.
/// - [`CliError::ValidationErrors`]: the collection was printed and is not
///   empty.
/// - [`CliError::DataFetch`] / [`CliError::Configuration`]: the engine could
///   not reach a verdict.
pub fn run(
    kind: &str,
    body: &str,
    context: &str,
    options: &ValidateOptions,
    output: OutputOptions,
) -> Result<(), CliError> {
    let kind: SubmissionKind = kind.parse().map_err(|_| CliError::UnknownKind {
        kind: kind.to_owned(),
    })?;
    let submission =
        Submission::from_json(kind, body).map_err(|e| parse_failed("submission", &e))?;
    let context: ContextFile =
        serde_json::from_str(context).map_err(|e| parse_failed("context", &e))?;

    let engine = ValidationEngine::new(options.validation_config())?;
    let gateway = DeadlineGateway::new(
        context.gateway,
        GatewayConfig {
            call_timeout: options.gateway_timeout,
            ..GatewayConfig::default()
        },
    );

    let fmt_config = FormatterConfig::from_flags(output.no_color, output.quiet, output.verbose);
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err_out = stderr.lock();

    let started = Instant::now();
    let errors = match engine.validate(&submission, &context.transaction, &gateway) {
        Ok(errors) => errors,
        Err(EngineError::Data(err)) => {
            tracing::warn!(%kind, error = %err, "validation aborted");
            if output.format == OutputFormat::Json {
                write_errors_json(&mut out, &err.to_service_errors())
                    .map_err(|e| write_failed("stdout", &e))?;
            }
            return Err(CliError::DataFetch {
                detail: data_error_detail(&err),
            });
        }
        Err(EngineError::Registry(err)) => return Err(err.into()),
    };

    write_timing_human(&mut err_out, "validated", started.elapsed(), &fmt_config)
        .map_err(|e| write_failed("stderr", &e))?;
    write_report(
        &mut out,
        &mut err_out,
        kind,
        &errors,
        output.format,
        &fmt_config,
    )
    .map_err(|e| write_failed("output", &e))?;

    if errors.has_errors() {
        Err(CliError::ValidationErrors {
            count: errors.len(),
        })
    } else {
        Ok(())
    }
}

fn parse_failed(what: &'static str, e: &serde_json::Error) -> CliError {
    CliError::ParseFailed {
        what,
        detail: format!("line {}, column {}: {e}", e.line(), e.column()),
    }
}

fn write_failed(target: &str, e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: target.to_owned(),
        detail: e.to_string(),
    }
}

/// The error message followed by its source chain.
fn data_error_detail(err: &DataError) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
