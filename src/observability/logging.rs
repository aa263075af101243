//! Logging initialization for `avatar-lint`.
//!
//! Validation progress (one event per step, a span per mode) is emitted with
//! `tracing` under the `avatar_lint` target and written to stderr, leaving
//! stdout to the report. `-v` raises only this crate's level; dependencies
//! stay at `warn`. `AVATAR_LINT_LOG_LEVEL` replaces the whole filter.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_LEVEL_ENV: &str = "AVATAR_LINT_LOG_LEVEL";

/// Log output format, chosen to match the report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line events without timestamps.
    #[default]
    Human,
    /// One flattened JSON object per event, with the current mode span.
    Json,
}

/// Filter directive for a `-v` count.
///
/// Zero keeps everything at `warn`, which silences step progress. Each `-v`
/// raises the `avatar_lint` target by one level (info, debug, trace).
#[must_use]
pub fn filter_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".to_owned(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,avatar_lint={level}")
}

fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)))
}

fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Installs the global subscriber on stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = build_filter(verbosity);

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .compact()
                .without_time()
                .with_target(false)
                .with_ansi(use_ansi(color))
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
