/// Errors of the `accval` binary and their exit codes.
///
/// [`CliError`] is the top-level error type for the `accval` binary. Every
/// variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - **1**: the submission was validated and has one or more errors.
/// - **2**: input failure. The body or context could not be read or parsed,
///   or the kind is unknown. Nothing was validated.
/// - **3**: validation could not run because sibling data could not be
///   fetched or the engine is misconfigured.
use std::fmt;
use std::path::PathBuf;

use accval_core::RegistryError;

/// All error conditions that the `accval` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// The body or context file does not exist.
    FileNotFound { path: PathBuf },

    /// The body or context file is not readable by this process.
    PermissionDenied { path: PathBuf },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        limit: u64,
        /// Known for disk files only.
        actual: Option<u64>,
    },

    /// The body or context is not UTF-8 text.
    InvalidUtf8 {
        source: String,
        /// Offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// Reading the piped body failed.
    StdinReadError { detail: String },

    /// Any other I/O error.
    IoError { source: String, detail: String },

    /// The submission body or the context file is not the expected JSON.
    ParseFailed {
        /// `"submission"` or `"context"`.
        what: &'static str,
        detail: String,
    },

    /// `--kind` names no known note or resource.
    UnknownKind { kind: String },

    // --- Exit code 1 ---
    /// The submission has validation errors. They have already been printed.
    ValidationErrors { count: usize },

    // --- Exit code 3 ---
    /// A sibling-data lookup failed, so no verdict was reached.
    DataFetch { detail: String },

    /// The validator registries could not be built.
    Configuration { detail: String },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. }
            | Self::UnknownKind { .. } => 2,

            Self::ValidationErrors { .. } => 1,

            Self::DataFetch { .. } | Self::Configuration { .. } => 3,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::ParseFailed { what, detail } => {
                format!("error: invalid {what} JSON: {detail}")
            }
            Self::UnknownKind { kind } => {
                format!("error: unknown kind {kind:?} (run `accval kinds` for the list)")
            }
            Self::ValidationErrors { count } => {
                format!("error: submission has {count} validation error(s)")
            }
            Self::DataFetch { detail } => {
                format!("error: validation could not run: {detail}")
            }
            Self::Configuration { detail } => {
                format!("error: engine configuration: {detail}")
            }
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        Self::Configuration {
            detail: err.to_string(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}
