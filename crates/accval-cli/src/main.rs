mod cli;
mod cmd;
mod error;
mod format;
mod io;

use std::time::Duration;

use clap::Parser as _;
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};
use cmd::validate::{OutputOptions, ValidateOptions};
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    if let Err(err) = run(&cli) {
        // The error collection has already been reported.
        if !matches!(err, CliError::ValidationErrors { .. }) {
            eprintln!("{err}");
        }
        std::process::exit(err.exit_code());
    }
}

/// Installs a stderr fmt subscriber filtered by `RUST_LOG`, defaulting to
/// `warn` (or `debug` with `--verbose`).
fn init_tracing(verbose: bool, no_color: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(format::colors_enabled(no_color))
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let output = OutputOptions {
        format: cli.format,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };
    match &cli.command {
        Command::Validate {
            file,
            kind,
            context,
            gateway_timeout_ms,
            max_text_length,
            gross_profit,
        } => {
            let body = io::read_input(file, cli.max_file_size)?;
            let context = io::read_file(context, cli.max_file_size)?;
            let options = ValidateOptions {
                gateway_timeout: Duration::from_millis(*gateway_timeout_ms),
                max_text_length: *max_text_length,
                gross_profit: (*gross_profit).into(),
            };
            cmd::validate::run(kind, &body, &context, &options, output)
        }
        Command::Kinds => cmd::kinds::run(cli.format),
    }
}
