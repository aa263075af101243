//! Bundle validation command
//!
//! Resolves the bundle directory, runs the validator, writes the rendered
//! report to stdout and turns a failing report into an error.

use std::io::Write;
use std::path::PathBuf;

use crate::bundle::{Validator, ValidatorOptions};
use crate::cli::args::{Cli, OutputFormat};
use crate::error::LintError;
use crate::render;

/// Validate the bundle named on the command line.
///
/// # Errors
///
/// Returns [`LintError::ValidationFailed`] if the report does not pass,
/// [`LintError::BundlePath`] if no bundle was given and the executable's
/// directory cannot be determined, or an I/O error if stdout cannot be
/// written. A nonexistent bundle directory is not an error here; the
/// report records the missing configuration files.
pub fn run(cli: &Cli) -> Result<(), LintError> {
    let bundle = match &cli.bundle {
        Some(path) => path.clone(),
        None => default_bundle_path()?,
    };
    if !bundle.is_dir() {
        tracing::warn!(bundle = %bundle.display(), "bundle directory does not exist");
    }

    let mut options = ValidatorOptions {
        report_unknown_fields: !cli.no_unknown_fields,
        ..ValidatorOptions::default()
    };
    if let Some(max) = cli.max_config_size {
        options.max_config_size = max;
    }

    tracing::info!(bundle = %bundle.display(), strict = cli.strict, "validating bundle");
    let report = Validator::with_options(bundle, options).validate_all();

    let rendered = match cli.format {
        OutputFormat::Human => render::human(&report, cli.strict),
        OutputFormat::Json => render::json(&report, cli.strict)? + "\n",
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if report.passes(cli.strict) {
        Ok(())
    } else {
        Err(LintError::ValidationFailed {
            errors: report.errors.len(),
            warnings: report.warnings.len(),
        })
    }
}

/// Directory containing the running executable.
fn default_bundle_path() -> Result<PathBuf, LintError> {
    let exe = std::env::current_exe().map_err(|e| LintError::BundlePath {
        reason: e.to_string(),
    })?;
    exe.parent()
        .map(std::path::Path::to_path_buf)
        .ok_or_else(|| LintError::BundlePath {
            reason: format!("{} has no parent directory", exe.display()),
        })
}
