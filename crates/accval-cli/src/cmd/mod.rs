/// Command module for the `accval` CLI.
///
/// Each submodule implements one subcommand. Its `run` function takes the
/// parsed arguments and returns `Ok(())` on success or a
/// [`crate::error::CliError`] on failure.
pub mod kinds;
pub mod validate;
