//! Avatar bundle validation.
//!
//! Loads the bundle's JSON documents, checks them against their schemas and
//! checks that every referenced asset exists, producing a
//! [`ValidationReport`].

pub mod loader;
pub mod report;
pub mod schema;
pub mod validation;

pub use loader::{Document, ValidatorOptions, load_json};
pub use report::{Checked, IssueCode, Severity, ValidationIssue, ValidationReport};
pub use schema::{DocumentSchema, Field, FieldKind, FieldSpec, Hand};
pub use validation::Validator;
