//! `avatar-lint` - validator for avatar overlay configuration bundles
//!
//! This library checks a bundle's face, mode index and per-mode JSON
//! documents and the image assets they reference, and renders the findings
//! for humans or machines.

pub mod bundle;
pub mod cli;
pub mod error;
pub mod observability;
pub mod render;
