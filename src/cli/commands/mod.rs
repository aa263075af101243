//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod validate;

use crate::cli::args::Cli;
use crate::error::LintError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), LintError> {
    if let Some(shell) = cli.completions {
        completions::run(shell);
        return Ok(());
    }
    validate::run(cli)
}
