//! CLI argument definitions
//!
//! Clap derive structs for `avatar-lint` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Validate an avatar overlay configuration bundle.
///
/// Checks the JSON syntax and fields of `face/config.json`,
/// `mode/config.json` and every `mode/<name>/config.json`, and that every
/// image they reference exists. Exits 0 when no errors were found.
#[derive(Parser, Debug)]
#[command(name = "avatar-lint", author, version, about)]
pub struct Cli {
    /// Avatar bundle directory [default: directory containing this executable].
    pub bundle: Option<PathBuf>,

    /// Report format written to stdout.
    #[arg(short, long, default_value = "human", env = "AVATAR_LINT_FORMAT")]
    pub format: OutputFormat,

    /// Treat warnings as errors for the exit status.
    #[arg(long)]
    pub strict: bool,

    /// Do not warn about fields the bundle schema does not know.
    #[arg(long)]
    pub no_unknown_fields: bool,

    /// Maximum size of a single config.json in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_config_size: Option<u64>,

    /// Print a shell completion script and exit.
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control for logs.
    #[arg(long, default_value = "auto", global = true, env = "AVATAR_LINT_COLOR")]
    pub color: ColorChoice,
}

impl Cli {
    /// Log format matching the report format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        match self.format {
            OutputFormat::Human => LogFormat::Human,
            OutputFormat::Json => LogFormat::Json,
        }
    }
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for the validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
