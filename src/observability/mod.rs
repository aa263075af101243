//! Observability module
//!
//! Logging initialisation. Logs go to stderr; stdout carries only the
//! validation report.

pub mod logging;

pub use logging::{LogFormat, init_logging};
