//! Error types for `avatar-lint`
//!
//! Bundle problems are never errors in this sense: they are collected as
//! [`ValidationIssue`](crate::bundle::report::ValidationIssue)s. The types
//! here cover the few failures that stop the process before or after a
//! validation run, and map them onto exit codes.

use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `avatar-lint`.
pub struct ExitCode;

impl ExitCode {
    /// Validation passed (warnings permitted unless `--strict`)
    pub const SUCCESS: i32 = 0;

    /// Validation produced at least one error
    pub const VALIDATION_FAILED: i32 = 1;

    /// Usage error (clap's own exit status for bad arguments)
    pub const USAGE_ERROR: i32 = 2;

    /// I/O error (bundle path could not be resolved, stdout closed)
    pub const IO_ERROR: i32 = 3;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Process-level failure of an `avatar-lint` invocation.
#[derive(Debug, Error)]
pub enum LintError {
    /// The bundle directory could not be determined.
    #[error("cannot resolve bundle path: {reason}")]
    BundlePath {
        /// Why resolution failed
        reason: String,
    },

    /// Validation completed and the report did not pass.
    #[error("validation failed: {errors} error(s), {warnings} warning(s)")]
    ValidationFailed {
        /// Number of errors in the report
        errors: usize,
        /// Number of warnings in the report
        warnings: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LintError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed { .. } => ExitCode::VALIDATION_FAILED,
            Self::BundlePath { .. } | Self::Io(_) | Self::Json(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `avatar-lint` operations.
pub type Result<T> = std::result::Result<T, LintError>;

// ============================================================================
// Tests
// ============================================================================
