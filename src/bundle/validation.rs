//! Bundle validation.
//!
//! Walks the fixed bundle layout in a single pass: face configuration, mode
//! index, then every listed mode in index order. Each step returns its
//! findings as a [`Checked`] value which [`Validator::validate_all`] merges
//! into one [`ValidationReport`]; the validator itself holds no mutable state,
//! so repeated runs over an unchanged bundle produce identical reports.
//!
//! Short-circuiting differs per step and is part of the observable
//! behaviour:
//! - face: a missing field or a length mismatch stops the step before any
//!   image is checked;
//! - mode: missing background or model fields do not stop the step; hand
//!   and key groups are still checked.

use crate::bundle::loader::{Document, ValidatorOptions, load_json};
use crate::bundle::report::{Checked, IssueCode, ValidationIssue, ValidationReport};
use crate::bundle::schema::{
    BACKGROUND_FIELDS, DocumentSchema, FACE_IMAGE_NAME, FACE_SCHEMA, Field, FieldSpec, HOT_KEY,
    Hand, KEY_USE, KEYS_IMAGE_NAME, KEYS_IMAGE_PATH, MODE_INDEX_SCHEMA, MODE_SCHEMA, MODEL_FIELDS,
    MODEL_PATH,
};

use std::path::{Path, PathBuf};

/// Bundle validator.
#[derive(Debug, Clone)]
pub struct Validator {
    base_path: PathBuf,
    options: ValidatorOptions,
}

impl Validator {
    /// Creates a validator for the bundle rooted at `base_path`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::with_options(base_path, ValidatorOptions::default())
    }

    /// Creates a validator with explicit options.
    #[must_use]
    pub fn with_options(base_path: impl Into<PathBuf>, options: ValidatorOptions) -> Self {
        Self {
            base_path: base_path.into(),
            options,
        }
    }

    /// Bundle root.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Loads a bundle document by its bundle-relative label.
    ///
    /// On success also reports unknown fields against `schema` (when
    /// enabled). On failure the single load error is the only issue.
    pub fn load_json(&self, label: &str, schema: &DocumentSchema) -> Checked<Option<Document>> {
        let path = label
            .split('/')
            .fold(self.base_path.clone(), |acc, part| acc.join(part));
        let mut checked = load_json(&path, label, &self.options);
        if self.options.report_unknown_fields {
            if let Some(doc) = &checked.value {
                let unknown = doc.unknown_fields(schema);
                checked.push_all(unknown);
            }
        }
        checked
    }

    // ========================================================================
    // face/config.json
    // ========================================================================

    /// Validates `face/config.json` and the face images it references.
    ///
    /// Returns `false` if the document cannot be loaded, a required field is
    /// missing, or the hot key and image lists differ in length. Missing
    /// image files are reported but do not make this return `false`.
    pub fn validate_face_config(&self) -> Checked<bool> {
        let mut checked = Checked::new(false);
        checked.note("validating face configuration");
        tracing::debug!("validating face configuration");

        let Some(doc) = checked.absorb(self.load_json("face/config.json", &FACE_SCHEMA)) else {
            return checked;
        };

        let hot_keys = doc.field::<Vec<String>>(HOT_KEY);
        if let Some(issue) = doc.field_issue(HOT_KEY, &hot_keys) {
            checked.push(issue);
            return checked;
        }
        let images = doc.field::<Vec<String>>(FACE_IMAGE_NAME);
        if let Some(issue) = doc.field_issue(FACE_IMAGE_NAME, &images) {
            checked.push(issue);
            return checked;
        }
        let (Field::Present(hot_keys), Field::Present(images)) = (hot_keys, images) else {
            return checked;
        };

        if hot_keys.len() != images.len() {
            checked.push(
                ValidationIssue::new(
                    IssueCode::LengthMismatch,
                    doc.label(),
                    format!(
                        "{}: HotKey count ({}) != FaceImageName count ({})",
                        doc.label(),
                        hot_keys.len(),
                        images.len()
                    ),
                )
                .with_path(doc.path()),
            );
            return checked;
        }

        let face_dir = self.base_path.join("face");
        for image in &images {
            let image_path = face_dir.join(image);
            if !image_path.is_file() {
                checked.push(
                    ValidationIssue::new(
                        IssueCode::MissingFaceImage,
                        doc.location(FACE_IMAGE_NAME.name),
                        format!("missing face image: {}", image_path.display()),
                    )
                    .with_path(&image_path),
                );
            }
        }

        tracing::info!(expressions = hot_keys.len(), "face configuration checked");
        checked.note(format!("face config: {} expressions", hot_keys.len()));
        checked.finish(true)
    }

    // ========================================================================
    // mode/config.json
    // ========================================================================

    /// Validates `mode/config.json` and returns the listed mode names.
    ///
    /// Returns an empty list when the document cannot be loaded or lacks
    /// `ModelPath`; no mode is validated in that case.
    pub fn validate_mode_list(&self) -> Checked<Vec<String>> {
        let mut checked = Checked::new(Vec::new());
        checked.note("validating mode list");
        tracing::debug!("validating mode list");

        let Some(doc) = checked.absorb(self.load_json("mode/config.json", &MODE_INDEX_SCHEMA))
        else {
            return checked;
        };

        let modes = match doc.field::<Vec<String>>(MODEL_PATH) {
            Field::Present(modes) => modes,
            field => {
                if let Some(issue) = doc.field_issue(MODEL_PATH, &field) {
                    checked.push(issue);
                }
                return checked;
            }
        };

        tracing::info!(count = modes.len(), "mode list checked");
        checked.note(format!("found {} modes: {}", modes.len(), modes.join(", ")));
        checked.finish(modes)
    }

    // ========================================================================
    // mode/<name>/config.json
    // ========================================================================

    /// Validates one mode directory and its configuration.
    ///
    /// Returns `false` only when the mode directory or its `config.json` is
    /// missing or unloadable; every other problem is reported as an issue
    /// and the step still returns `true`.
    pub fn validate_mode_config(&self, name: &str) -> Checked<bool> {
        let mut checked = Checked::new(false);
        checked.note(format!("validating mode '{name}'"));
        let _span = tracing::debug_span!("mode", %name).entered();

        let mode_dir = self.base_path.join("mode").join(name);
        let label = format!("mode/{name}/config.json");
        if !mode_dir.is_dir() {
            checked.push(
                ValidationIssue::new(
                    IssueCode::MissingModeDir,
                    format!("mode/config.json#{}", MODEL_PATH.name),
                    format!("mode directory not found: {}", mode_dir.display()),
                )
                .with_path(&mode_dir),
            );
            return checked;
        }

        let Some(doc) = checked.absorb(self.load_json(&label, &MODE_SCHEMA)) else {
            return checked;
        };

        // Missing backgrounds do not stop the remaining checks.
        let backgrounds: Vec<_> = BACKGROUND_FIELDS
            .iter()
            .map(|spec| (*spec, doc.field::<String>(*spec)))
            .collect();
        for (spec, field) in &backgrounds {
            if let Some(issue) = doc.field_issue(*spec, field) {
                checked.push(issue);
            }
        }
        for (spec, field) in &backgrounds {
            if let Some(file) = field.present() {
                let background = mode_dir.join(file);
                if !background.is_file() {
                    checked.push(
                        ValidationIssue::new(
                            IssueCode::MissingBackground,
                            doc.location(spec.name),
                            format!("missing background: {}", background.display()),
                        )
                        .with_path(&background),
                    );
                }
            }
        }

        for spec in MODEL_FIELDS {
            let field = doc.field::<serde_json::Value>(spec);
            checked.push_all(doc.field_issue(spec, &field));
        }

        for hand in Hand::ALL {
            let hand_checked = check_hand(&doc, &mode_dir, hand);
            checked.absorb(hand_checked);
        }
        let keys_checked = check_keys(&doc, &mode_dir);
        checked.absorb(keys_checked);

        tracing::info!(
            errors = checked.error_count(),
            warnings = checked.warning_count(),
            "mode checked"
        );
        checked.note(format!("mode '{name}' checked"));
        checked.finish(true)
    }

    // ========================================================================
    // Whole bundle
    // ========================================================================

    /// Validates the whole bundle: face, mode list, then every listed mode.
    ///
    /// Always runs to completion. The report passes iff it has no errors.
    #[must_use]
    pub fn validate_all(&self) -> ValidationReport {
        let _span = tracing::info_span!("validate", bundle = %self.base_path.display()).entered();
        let mut report = ValidationReport::new(&self.base_path);

        report.merge(self.validate_face_config());
        let modes = report.merge(self.validate_mode_list());
        for mode in &modes {
            report.merge(self.validate_mode_config(mode));
        }

        tracing::info!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validation complete"
        );
        report
    }
}

// ============================================================================
// Optional Groups
// ============================================================================

/// Checks one hand group; does nothing unless its image path is set.
fn check_hand(doc: &Document, mode_dir: &Path, hand: Hand) -> Checked<()> {
    let mut checked = Checked::new(());
    let Some(hand_dir) = group_dir(doc, mode_dir, hand.image_path(), &mut checked) else {
        return checked;
    };

    let up = doc.field::<String>(hand.up_image());
    let frames = doc.field::<Vec<String>>(hand.frames());
    checked.push_all(wrong_type_issue(doc, hand.up_image(), &up));
    checked.push_all(wrong_type_issue(doc, hand.frames(), &frames));

    if !hand_dir.is_dir() {
        checked.push(
            ValidationIssue::new(
                IssueCode::MissingHandDir,
                doc.location(hand.image_path().name),
                format!("missing {} directory: {}", hand.label(), hand_dir.display()),
            )
            .with_path(&hand_dir),
        );
        return checked;
    }

    if let Some(up_name) = up.present() {
        let up_image = hand_dir.join(up_name);
        if !up_image.is_file() {
            checked.push(
                ValidationIssue::new(
                    IssueCode::MissingHandUpImage,
                    doc.location(hand.up_image().name),
                    format!("missing {} up image: {}", hand.label(), up_image.display()),
                )
                .with_path(&up_image),
            );
        }
    }

    for frame in frames.present().into_iter().flatten() {
        let frame_path = hand_dir.join(frame);
        if !frame_path.is_file() {
            checked.push(
                ValidationIssue::new(
                    IssueCode::MissingHandFrame,
                    doc.location(hand.frames().name),
                    format!("missing {} frame: {}", hand.label(), frame_path.display()),
                )
                .with_path(&frame_path),
            );
        }
    }

    checked
}

/// Checks the keys group; does nothing unless `KeysImagePath` is set.
fn check_keys(doc: &Document, mode_dir: &Path) -> Checked<()> {
    let mut checked = Checked::new(());
    let Some(keys_dir) = group_dir(doc, mode_dir, KEYS_IMAGE_PATH, &mut checked) else {
        return checked;
    };

    let images = doc.field::<Vec<String>>(KEYS_IMAGE_NAME);
    let bindings = doc.field::<Vec<String>>(KEY_USE);
    checked.push_all(wrong_type_issue(doc, KEYS_IMAGE_NAME, &images));
    checked.push_all(wrong_type_issue(doc, KEY_USE, &bindings));

    // The host loads key images only when both lists are present.
    for (spec, absent) in [
        (KEYS_IMAGE_NAME, images.is_absent()),
        (KEY_USE, bindings.is_absent()),
    ] {
        if absent {
            checked.push(
                ValidationIssue::new(
                    IssueCode::IncompleteKeysGroup,
                    doc.location(spec.name),
                    format!(
                        "{}: {} is set but {} is missing; no key images will be loaded",
                        doc.label(),
                        KEYS_IMAGE_PATH.name,
                        spec.name
                    ),
                )
                .with_path(doc.path()),
            );
        }
    }

    // The host pairs KeyUse[i] with KeysImageName[i] and drops the rest.
    if let (Some(images), Some(bindings)) = (images.present(), bindings.present()) {
        if images.len() != bindings.len() {
            checked.push(
                ValidationIssue::new(
                    IssueCode::KeyBindingMismatch,
                    doc.location(KEY_USE.name),
                    format!(
                        "{}: KeyUse count ({}) != KeysImageName count ({}); unpaired entries are ignored",
                        doc.label(),
                        bindings.len(),
                        images.len()
                    ),
                )
                .with_path(doc.path()),
            );
        }
    }

    if !keys_dir.is_dir() {
        checked.push(
            ValidationIssue::new(
                IssueCode::MissingKeysDir,
                doc.location(KEYS_IMAGE_PATH.name),
                format!("missing keys directory: {}", keys_dir.display()),
            )
            .with_path(&keys_dir),
        );
        return checked;
    }

    for image in images.present().into_iter().flatten() {
        let image_path = keys_dir.join(image);
        if !image_path.is_file() {
            checked.push(
                ValidationIssue::new(
                    IssueCode::MissingKeyImage,
                    doc.location(KEYS_IMAGE_NAME.name),
                    format!("missing key image: {}", image_path.display()),
                )
                .with_path(&image_path),
            );
        }
    }

    checked
}

/// Resolves the subdirectory named by an optional path field.
///
/// `None` when the field is absent, empty, or wrongly typed (the latter is
/// recorded).
fn group_dir(
    doc: &Document,
    mode_dir: &Path,
    spec: FieldSpec,
    checked: &mut Checked<()>,
) -> Option<PathBuf> {
    match doc.field::<String>(spec) {
        Field::Present(dir) if !dir.is_empty() => Some(mode_dir.join(dir)),
        Field::Present(_) | Field::Absent => None,
        wrong @ Field::WrongType { .. } => {
            checked.push_all(doc.field_issue(spec, &wrong));
            None
        }
    }
}

/// Issue for a wrongly typed field; absent fields are fine.
fn wrong_type_issue<T>(doc: &Document, spec: FieldSpec, field: &Field<T>) -> Option<ValidationIssue> {
    match field {
        Field::WrongType { .. } => doc.field_issue(spec, field),
        Field::Absent | Field::Present(_) => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
