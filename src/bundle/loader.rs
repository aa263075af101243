//! Bundle document loader.
//!
//! Loading never fails with an `Err`: a missing, oversized, unreadable or
//! malformed file becomes exactly one error-severity issue and the caller
//! receives `None`, so every check that depends on that document is skipped
//! instead of producing cascading issues.
//!
//! Pipeline:
//! 1. Existence and size limit
//! 2. UTF-8 read (a leading BOM is stripped)
//! 3. JSON parsing
//! 4. Top-level object check

use crate::bundle::report::{Checked, IssueCode, ValidationIssue};
use crate::bundle::schema::{DocumentSchema, Field, FieldSpec, json_type_name};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

// ============================================================================
// Options
// ============================================================================

/// Options for a validation run.
#[derive(Debug, Clone)]
pub struct ValidatorOptions {
    /// Maximum size of a single `config.json` in bytes.
    pub max_config_size: u64,

    /// Report fields that no schema knows about.
    pub report_unknown_fields: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_config_size: env_or("AVATAR_LINT_MAX_CONFIG_SIZE", 1024 * 1024),
            report_unknown_fields: true,
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A parsed configuration document whose root is a JSON object.
#[derive(Debug, Clone)]
pub struct Document {
    /// Bundle-relative name, e.g. `mode/keyboard/config.json`.
    label: String,
    /// Path the document was read from.
    path: PathBuf,
    fields: Map<String, Value>,
}

impl Document {
    /// Bundle-relative name of the document.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Path the document was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location string for an issue about `field`.
    #[must_use]
    pub fn location(&self, field: &str) -> String {
        format!("{}#{field}", self.label)
    }

    /// Reads a field, distinguishing absent from wrongly typed.
    ///
    /// `null` counts as absent for optional fields and as a type mismatch
    /// for required ones.
    pub fn field<T: DeserializeOwned>(&self, spec: FieldSpec) -> Field<T> {
        let Some(value) = self.fields.get(spec.name) else {
            return Field::Absent;
        };
        if value.is_null() && !spec.required {
            return Field::Absent;
        }
        if !spec.kind.matches(value) {
            return Field::WrongType {
                expected: spec.kind.describe(),
                found: json_type_name(value),
            };
        }
        match T::deserialize(value) {
            Ok(parsed) => Field::Present(parsed),
            Err(_) => Field::WrongType {
                expected: spec.kind.describe(),
                found: json_type_name(value),
            },
        }
    }

    /// Issue for a field that is absent or wrongly typed, if any.
    #[must_use]
    pub fn field_issue<T>(&self, spec: FieldSpec, field: &Field<T>) -> Option<ValidationIssue> {
        match field {
            Field::Present(_) => None,
            Field::Absent => Some(
                ValidationIssue::new(
                    IssueCode::MissingField,
                    self.location(spec.name),
                    format!("{}: missing required field '{}'", self.label, spec.name),
                )
                .with_path(&self.path),
            ),
            Field::WrongType { expected, found } => Some(
                ValidationIssue::new(
                    IssueCode::WrongType,
                    self.location(spec.name),
                    format!(
                        "{}: field '{}' must be {expected}, found {found}",
                        self.label, spec.name
                    ),
                )
                .with_path(&self.path),
            ),
        }
    }

    /// Warnings for every key `schema` does not know, sorted by key.
    #[must_use]
    pub fn unknown_fields(&self, schema: &DocumentSchema) -> Vec<ValidationIssue> {
        self.fields
            .keys()
            .filter(|key| !schema.is_known(key))
            .map(|key| {
                let message = schema.suggest(key).map_or_else(
                    || format!("{}: unknown field '{key}'", self.label),
                    |known| format!("{}: unknown field '{key}' (did you mean '{known}'?)", self.label),
                );
                ValidationIssue::new(IssueCode::UnknownField, self.location(key), message)
                    .with_path(&self.path)
            })
            .collect()
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Loads and parses a configuration document.
///
/// Records exactly one error and returns `None` if the file is missing,
/// larger than `options.max_config_size`, unreadable, not JSON, or not a
/// JSON object.
pub fn load_json(path: &Path, label: &str, options: &ValidatorOptions) -> Checked<Option<Document>> {
    let mut checked = Checked::new(None);

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err)
            if matches!(
                err.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
            ) =>
        {
            checked.push(
                ValidationIssue::new(
                    IssueCode::FileNotFound,
                    label,
                    format!("file not found: {}", path.display()),
                )
                .with_path(path),
            );
            return checked;
        }
        Err(err) => {
            checked.push(unreadable(path, label, &err));
            return checked;
        }
    };

    if metadata.is_file() && metadata.len() > options.max_config_size {
        checked.push(
            ValidationIssue::new(
                IssueCode::FileTooLarge,
                label,
                format!(
                    "{} is {} bytes, limit is {} bytes",
                    path.display(),
                    metadata.len(),
                    options.max_config_size
                ),
            )
            .with_path(path),
        );
        return checked;
    }

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            checked.push(unreadable(path, label, &err));
            return checked;
        }
    };

    tracing::debug!(file = %path.display(), bytes = raw.len(), "read configuration");
    parse_document(&raw, path, label)
}

/// Parses already-read document text.
///
/// Same contract as [`load_json`] minus the file-system stage.
pub fn parse_document(raw: &str, path: &Path, label: &str) -> Checked<Option<Document>> {
    let mut checked = Checked::new(None);
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let root: Value = match serde_json::from_str(raw) {
        Ok(root) => root,
        Err(err) => {
            checked.push(
                ValidationIssue::new(
                    IssueCode::InvalidJson,
                    label,
                    format!("invalid JSON in {}: {err}", path.display()),
                )
                .with_path(path),
            );
            return checked;
        }
    };

    match root {
        Value::Object(fields) => checked.finish(Some(Document {
            label: label.to_string(),
            path: path.to_path_buf(),
            fields,
        })),
        other => {
            checked.push(
                ValidationIssue::new(
                    IssueCode::NotAnObject,
                    label,
                    format!(
                        "{} must contain a JSON object, found {}",
                        path.display(),
                        json_type_name(&other)
                    ),
                )
                .with_path(path),
            );
            checked
        }
    }
}

fn unreadable(path: &Path, label: &str, err: &std::io::Error) -> ValidationIssue {
    ValidationIssue::new(
        IssueCode::InvalidJson,
        label,
        format!("cannot read {}: {err}", path.display()),
    )
    .with_path(path)
}

/// Reads an environment variable and parses it, falling back to a default.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::schema::{FACE_SCHEMA, HOT_KEY, KEYS_IMAGE_PATH, MODE_SCHEMA};

    fn parse(raw: &str) -> Checked<Option<Document>> {
        parse_document(raw, Path::new("/b/face/config.json"), "face/config.json")
    }

    #[test]
    fn parses_object() {
        let checked = parse(r#"{"HotKey": ["1"], "FaceImageName": ["a.png"]}"#);
        assert!(checked.issues.is_empty());
        let doc = checked.value.unwrap();
        assert_eq!(doc.label(), "face/config.json");
        assert_eq!(doc.field::<Vec<String>>(HOT_KEY), Field::Present(vec!["1".to_string()]));
    }

    #[test]
    fn trailing_comma_is_one_error() {
        let checked = parse(r#"{"HotKey": ["1"],}"#);
        assert!(checked.value.is_none());
        assert_eq!(checked.issues.len(), 1);
        assert_eq!(checked.issues[0].code, IssueCode::InvalidJson);
        assert!(checked.issues[0].message.contains("/b/face/config.json"));
        assert_eq!(checked.issues[0].location, "face/config.json");
    }

    #[test]
    fn bom_is_tolerated() {
        let checked = parse("\u{feff}{\"HotKey\": []}");
        assert!(checked.value.is_some());
    }

    #[test]
    fn non_object_root_rejected() {
        let checked = parse("[1, 2]");
        assert!(checked.value.is_none());
        assert_eq!(checked.issues[0].code, IssueCode::NotAnObject);
    }

    #[test]
    fn wrong_type_is_not_missing() {
        let doc = parse(r#"{"HotKey": "1"}"#).value.unwrap();
        let field = doc.field::<Vec<String>>(HOT_KEY);
        assert!(matches!(field, Field::WrongType { found: "a string", .. }));
        let issue = doc.field_issue(HOT_KEY, &field).unwrap();
        assert_eq!(issue.code, IssueCode::WrongType);
        assert_eq!(issue.location, "face/config.json#HotKey");
    }

    #[test]
    fn null_optional_is_absent_null_required_is_wrong_type() {
        let doc = parse(r#"{"HotKey": null, "KeysImagePath": null}"#).value.unwrap();
        assert!(doc.field::<String>(KEYS_IMAGE_PATH).is_absent());
        assert!(matches!(
            doc.field::<Vec<String>>(HOT_KEY),
            Field::WrongType { found: "null", .. }
        ));
    }

    #[test]
    fn unknown_fields_with_suggestion() {
        let doc = parse(r#"{"HotKey": [], "FaceImageNames": [], "Extra": 1}"#).value.unwrap();
        let issues = doc.unknown_fields(&FACE_SCHEMA);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.code == IssueCode::UnknownField));
        assert!(issues.iter().any(|i| i.message.contains("did you mean 'FaceImageName'")));
        assert!(doc.unknown_fields(&MODE_SCHEMA).len() >= 2);
    }

    #[test]
    fn missing_file_is_one_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let checked = load_json(&path, "face/config.json", &ValidatorOptions::default());
        assert!(checked.value.is_none());
        assert_eq!(checked.issues.len(), 1);
        assert_eq!(checked.issues[0].code, IssueCode::FileNotFound);
    }

    #[test]
    fn path_below_a_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bundle");
        std::fs::write(&file, b"x").unwrap();
        let path = file.join("face").join("config.json");
        let checked = load_json(&path, "face/config.json", &ValidatorOptions::default());
        assert!(checked.value.is_none());
        assert_eq!(checked.issues.len(), 1);
        assert_eq!(checked.issues[0].code, IssueCode::FileNotFound);
    }

    #[test]
    fn oversized_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"ModelPath": ["keyboard"]}"#).unwrap();
        let options = ValidatorOptions {
            max_config_size: 4,
            ..ValidatorOptions::default()
        };
        let checked = load_json(&path, "mode/config.json", &options);
        assert!(checked.value.is_none());
        assert_eq!(checked.issues[0].code, IssueCode::FileTooLarge);
    }

    #[test]
    fn invalid_utf8_is_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, b"\x00\x01\xff\xfe").unwrap();
        let checked = load_json(&path, "mode/config.json", &ValidatorOptions::default());
        assert_eq!(checked.issues.len(), 1);
        assert_eq!(checked.issues[0].code, IssueCode::InvalidJson);
    }
}
