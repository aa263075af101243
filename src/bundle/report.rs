//! Validation results.
//!
//! Every problem found in a bundle becomes a [`ValidationIssue`] carrying a
//! stable [`IssueCode`]. The code alone decides whether the issue is an error
//! or a warning, so the error/warning policy lives in one `match`.
//!
//! Validation steps return their findings as a [`Checked`] value; the
//! orchestrator folds those into a single [`ValidationReport`].

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Severity & Codes
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Structural or mandatory-asset problem; fails validation.
    Error,
    /// Missing optional asset or suspicious configuration.
    Warning,
}

impl Severity {
    /// Lowercase label used in rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable identifier of a validation issue.
///
/// Serialized in `SCREAMING_SNAKE_CASE`; these names are part of the JSON
/// output contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// A configuration file does not exist.
    FileNotFound,
    /// A configuration file exceeds the size limit.
    FileTooLarge,
    /// A configuration file could not be read or parsed as JSON.
    InvalidJson,
    /// A configuration document's root is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    MissingField,
    /// A field is present with the wrong JSON type.
    WrongType,
    /// `HotKey` and `FaceImageName` have different lengths.
    LengthMismatch,
    /// A face expression image is missing.
    MissingFaceImage,
    /// A mode directory listed in the mode index is missing.
    MissingModeDir,
    /// A mode background image is missing.
    MissingBackground,
    /// A hand image directory is missing.
    MissingHandDir,
    /// A hand "up" image is missing.
    MissingHandUpImage,
    /// The keys image directory is missing.
    MissingKeysDir,
    /// A hand animation frame is missing.
    MissingHandFrame,
    /// A key image is missing.
    MissingKeyImage,
    /// `KeyUse` and `KeysImageName` have different lengths.
    KeyBindingMismatch,
    /// A keys group lacks `KeysImageName` or `KeyUse`, so no key image loads.
    IncompleteKeysGroup,
    /// A field name is not part of the document schema.
    UnknownField,
}

impl IssueCode {
    /// Severity implied by this code.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::MissingHandFrame
            | Self::MissingKeyImage
            | Self::KeyBindingMismatch
            | Self::IncompleteKeysGroup
            | Self::UnknownField => Severity::Warning,
            Self::FileNotFound
            | Self::FileTooLarge
            | Self::InvalidJson
            | Self::NotAnObject
            | Self::MissingField
            | Self::WrongType
            | Self::LengthMismatch
            | Self::MissingFaceImage
            | Self::MissingModeDir
            | Self::MissingBackground
            | Self::MissingHandDir
            | Self::MissingHandUpImage
            | Self::MissingKeysDir => Severity::Error,
        }
    }

    /// Stable string form, identical to the serialized name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotAnObject => "NOT_AN_OBJECT",
            Self::MissingField => "MISSING_FIELD",
            Self::WrongType => "WRONG_TYPE",
            Self::LengthMismatch => "LENGTH_MISMATCH",
            Self::MissingFaceImage => "MISSING_FACE_IMAGE",
            Self::MissingModeDir => "MISSING_MODE_DIR",
            Self::MissingBackground => "MISSING_BACKGROUND",
            Self::MissingHandDir => "MISSING_HAND_DIR",
            Self::MissingHandUpImage => "MISSING_HAND_UP_IMAGE",
            Self::MissingKeysDir => "MISSING_KEYS_DIR",
            Self::MissingHandFrame => "MISSING_HAND_FRAME",
            Self::MissingKeyImage => "MISSING_KEY_IMAGE",
            Self::KeyBindingMismatch => "KEY_BINDING_MISMATCH",
            Self::IncompleteKeysGroup => "INCOMPLETE_KEYS_GROUP",
            Self::UnknownField => "UNKNOWN_FIELD",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Issues
// ============================================================================

/// A single problem found while validating a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Stable identifier of the problem.
    pub code: IssueCode,
    /// Derived from `code`; kept on the issue for serialization.
    pub severity: Severity,
    /// Bundle-relative document and field, e.g. `mode/keyboard/config.json#KeysImagePath`.
    pub location: String,
    /// Human-readable description.
    pub message: String,
    /// File-system path the issue refers to, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ValidationIssue {
    /// Creates an issue; severity follows from `code`.
    #[must_use]
    pub fn new(code: IssueCode, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            location: location.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Attaches the file-system path the issue refers to.
    #[must_use]
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Returns `true` for error-severity issues.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {}",
            self.severity, self.code, self.message, self.location
        )
    }
}

// ============================================================================
// Step Results
// ============================================================================

/// Outcome of one validation step: its return value plus everything it found.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Checked<T> {
    /// The step's return value.
    pub value: T,
    /// Issues found, in detection order.
    pub issues: Vec<ValidationIssue>,
    /// Informational progress lines, in order.
    pub notes: Vec<String>,
}

impl<T> Checked<T> {
    /// Wraps a value with no findings.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            issues: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Records an issue.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Records every issue yielded by `issues` (an `Option` works too).
    pub fn push_all(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    /// Records an informational line.
    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    /// Moves another step's findings into this one and returns its value.
    pub fn absorb<U>(&mut self, other: Checked<U>) -> U {
        self.issues.extend(other.issues);
        self.notes.extend(other.notes);
        other.value
    }

    /// Replaces the value, keeping the findings.
    pub fn finish<U>(self, value: U) -> Checked<U> {
        Checked {
            value,
            issues: self.issues,
            notes: self.notes,
        }
    }

    /// Number of error-severity issues.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }

    /// Number of warning-severity issues.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }
}

// ============================================================================
// Report
// ============================================================================

/// Result of validating a whole bundle.
///
/// Built once per run, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Bundle root that was validated.
    pub base_path: PathBuf,
    /// Errors, in detection order.
    pub errors: Vec<ValidationIssue>,
    /// Warnings, in detection order.
    pub warnings: Vec<ValidationIssue>,
    /// Per-step informational lines, in order.
    pub notes: Vec<String>,
}

impl ValidationReport {
    /// Creates an empty report for `base_path`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Folds a step's findings into the report and returns its value.
    pub fn merge<T>(&mut self, checked: Checked<T>) -> T {
        for issue in checked.issues {
            match issue.severity {
                Severity::Error => self.errors.push(issue),
                Severity::Warning => self.warnings.push(issue),
            }
        }
        self.notes.extend(checked.notes);
        checked.value
    }

    /// Returns `true` if validation passed (no errors; warnings allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Pass/fail under the given strictness; strict mode also fails on warnings.
    #[must_use]
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid() && (!strict || self.warnings.is_empty())
    }

    /// Iterates over errors then warnings carrying `code`.
    pub fn with_code(&self, code: IssueCode) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(move |i| i.code == code)
    }
}

// ============================================================================
// Tests
// ============================================================================
