//! Command-line interface for `avatar-lint`.

pub mod args;
pub mod commands;
