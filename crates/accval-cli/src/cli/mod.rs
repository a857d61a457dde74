//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use accval_core::GrossProfitConvention;
use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` writes one line per error, plus a summary, to stderr. `Json`
/// writes the `{"errors": [...]}` document to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// The filing API's JSON error document.
    Json,
}

/// How gross profit relates turnover to cost of sales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GrossProfit {
    /// `gross_profit_or_loss = turnover - cost_of_sales` (default).
    Less,
    /// `gross_profit_or_loss = turnover + cost_of_sales`, for filings that
    /// carry cost of sales as a negative figure.
    Plus,
}

impl From<GrossProfit> for GrossProfitConvention {
    fn from(value: GrossProfit) -> Self {
        match value {
            GrossProfit::Less => GrossProfitConvention::TurnoverLessCostOfSales,
            GrossProfit::Plus => GrossProfitConvention::TurnoverPlusCostOfSales,
        }
    }
}

/// All top-level subcommands exposed by the `accval` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Validate a submitted note or accounts resource.
    Validate {
        /// Path to the submitted JSON body, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Kind of the submitted body, e.g. `stocks` or `current-period`
        /// (see `accval kinds`).
        #[arg(long, short = 'k', value_name = "KIND")]
        kind: String,
        /// JSON file holding the transaction identity and the sibling data
        /// the validators read: `{"transaction": {...}, "gateway": {...}}`.
        #[arg(long, short = 'c', value_name = "CONTEXT")]
        context: PathBuf,
        /// Upper bound on each sibling-data lookup, in milliseconds.
        #[arg(
            long,
            env = "ACCVAL_GATEWAY_TIMEOUT_MS",
            default_value = "5000",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        gateway_timeout_ms: u64,
        /// Maximum length, in characters, of free-text fields.
        #[arg(long, env = "ACCVAL_MAX_TEXT_LENGTH")]
        max_text_length: Option<usize>,
        /// Gross profit convention: less (default) or plus.
        #[arg(long, default_value = "less")]
        gross_profit: GrossProfit,
    },

    /// List every note and resource kind that can be validated.
    Kinds,
}

/// Root CLI struct for the `accval` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "accval",
    version,
    about = "Company accounts submission validator",
    long_about = "Validates a small-full company accounts submission (a note or an\n\
                  accounts resource) against the rest of its filing and prints the\n\
                  filing API's error collection."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress the summary line (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log engine activity and timing to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `ACCVAL_MAX_FILE_SIZE` environment variable.
    /// Default: 16777216 (16 MiB).
    #[arg(
        long,
        global = true,
        env = "ACCVAL_MAX_FILE_SIZE",
        default_value = "16777216"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}
