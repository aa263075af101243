//! Bundle document schema.
//!
//! The three document kinds of an avatar bundle are described by static
//! [`DocumentSchema`] tables. Each field carries its expected JSON shape and
//! whether it is required, so a field can be reported as absent or as having
//! the wrong type, rather than both collapsing into "missing".
//!
//! Layout, relative to the bundle root:
//!
//! ```text
//! face/config.json          HotKey[], FaceImageName[]
//! mode/config.json          ModelPath[]
//! mode/<name>/config.json   BackgroundImageName, CatBackgroundImageName,
//!                           {Left,Right}Hand{ImagePath,UpImageName,ImageName[]},
//!                           KeysImagePath, KeysImageName[], KeyUse[],
//!                           HasModel, ModelHas{Left,Right}HandModel (booleans),
//!                           CatModelPath, Model{Left,Right}HandModelPath
//! ```

use serde_json::Value;

// ============================================================================
// Field Descriptions
// ============================================================================

/// Expected JSON shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON array whose elements are all strings.
    StringList,
    /// A JSON boolean.
    Bool,
}

impl FieldKind {
    /// Returns `true` if `value` has this shape.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Self::Bool => value.is_boolean(),
        }
    }

    /// Description used in type-mismatch messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::StringList => "an array of strings",
            Self::Bool => "a boolean",
        }
    }
}

/// Describes the JSON type of `value` for diagnostics.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(items) if items.iter().all(Value::is_string) => "an array of strings",
        Value::Array(_) => "an array with non-string elements",
        Value::Object(_) => "an object",
    }
}

/// One named field of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON key.
    pub name: &'static str,
    /// Expected shape.
    pub kind: FieldKind,
    /// Whether the document is incomplete without it.
    pub required: bool,
}

impl FieldSpec {
    /// A field the document must contain.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// A field the document may omit.
    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// The set of fields a document kind may contain.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSchema {
    /// Every field the document may contain.
    pub fields: &'static [FieldSpec],
}

impl DocumentSchema {
    /// Returns `true` if `name` is a field of this document kind.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Suggest a known field name for a misspelt one.
    ///
    /// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
    #[must_use]
    pub fn suggest(&self, unknown: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .map(|f| f.name)
            .map(|name| (name, strsim::damerau_levenshtein(unknown, name)))
            .filter(|(_, dist)| *dist <= 3)
            .min_by_key(|(_, dist)| *dist)
            .map(|(name, _)| name)
    }
}

// ============================================================================
// face/config.json
// ============================================================================

/// Ordered hot key identifiers.
pub const HOT_KEY: FieldSpec = FieldSpec::required("HotKey", FieldKind::StringList);
/// Ordered face image filenames, parallel to [`HOT_KEY`].
pub const FACE_IMAGE_NAME: FieldSpec = FieldSpec::required("FaceImageName", FieldKind::StringList);

/// Schema of `face/config.json`.
pub const FACE_SCHEMA: DocumentSchema = DocumentSchema {
    fields: &[HOT_KEY, FACE_IMAGE_NAME],
};

// ============================================================================
// mode/config.json
// ============================================================================

/// Ordered mode names, each a subdirectory of `mode/`.
pub const MODEL_PATH: FieldSpec = FieldSpec::required("ModelPath", FieldKind::StringList);

/// Schema of `mode/config.json`.
pub const MODE_INDEX_SCHEMA: DocumentSchema = DocumentSchema {
    fields: &[MODEL_PATH],
};

// ============================================================================
// mode/<name>/config.json
// ============================================================================

pub const BACKGROUND_IMAGE_NAME: FieldSpec =
    FieldSpec::required("BackgroundImageName", FieldKind::String);
pub const CAT_BACKGROUND_IMAGE_NAME: FieldSpec =
    FieldSpec::required("CatBackgroundImageName", FieldKind::String);

pub const LEFT_HAND_IMAGE_PATH: FieldSpec =
    FieldSpec::optional("LeftHandImagePath", FieldKind::String);
pub const LEFT_HAND_UP_IMAGE_NAME: FieldSpec =
    FieldSpec::optional("LeftHandUpImageName", FieldKind::String);
pub const LEFT_HAND_IMAGE_NAME: FieldSpec =
    FieldSpec::optional("LeftHandImageName", FieldKind::StringList);

pub const RIGHT_HAND_IMAGE_PATH: FieldSpec =
    FieldSpec::optional("RightHandImagePath", FieldKind::String);
pub const RIGHT_HAND_UP_IMAGE_NAME: FieldSpec =
    FieldSpec::optional("RightHandUpImageName", FieldKind::String);
pub const RIGHT_HAND_IMAGE_NAME: FieldSpec =
    FieldSpec::optional("RightHandImageName", FieldKind::StringList);

pub const KEYS_IMAGE_PATH: FieldSpec = FieldSpec::optional("KeysImagePath", FieldKind::String);
pub const KEYS_IMAGE_NAME: FieldSpec = FieldSpec::optional("KeysImageName", FieldKind::StringList);
/// Key identifiers paired by index with [`KEYS_IMAGE_NAME`].
pub const KEY_USE: FieldSpec = FieldSpec::optional("KeyUse", FieldKind::StringList);

/// Background fields every mode must declare, in check order.
pub const BACKGROUND_FIELDS: [FieldSpec; 2] = [BACKGROUND_IMAGE_NAME, CAT_BACKGROUND_IMAGE_NAME];

// The host refuses to load a mode whose config lacks one of the flags below
// or gives any of these fields the wrong type. Model files are not checked.

pub const HAS_MODEL: FieldSpec = FieldSpec::required("HasModel", FieldKind::Bool);
pub const CAT_MODEL_PATH: FieldSpec = FieldSpec::optional("CatModelPath", FieldKind::String);
pub const MODEL_HAS_LEFT_HAND_MODEL: FieldSpec =
    FieldSpec::required("ModelHasLeftHandModel", FieldKind::Bool);
pub const MODEL_LEFT_HAND_MODEL_PATH: FieldSpec =
    FieldSpec::optional("ModelLeftHandModelPath", FieldKind::String);
pub const MODEL_HAS_RIGHT_HAND_MODEL: FieldSpec =
    FieldSpec::required("ModelHasRightHandModel", FieldKind::Bool);
pub const MODEL_RIGHT_HAND_MODEL_PATH: FieldSpec =
    FieldSpec::optional("ModelRightHandModelPath", FieldKind::String);

/// Model fields, type-checked only, in check order.
pub const MODEL_FIELDS: [FieldSpec; 6] = [
    HAS_MODEL,
    CAT_MODEL_PATH,
    MODEL_HAS_LEFT_HAND_MODEL,
    MODEL_LEFT_HAND_MODEL_PATH,
    MODEL_HAS_RIGHT_HAND_MODEL,
    MODEL_RIGHT_HAND_MODEL_PATH,
];

/// Schema of `mode/<name>/config.json`.
pub const MODE_SCHEMA: DocumentSchema = DocumentSchema {
    fields: &[
        BACKGROUND_IMAGE_NAME,
        CAT_BACKGROUND_IMAGE_NAME,
        LEFT_HAND_IMAGE_PATH,
        LEFT_HAND_UP_IMAGE_NAME,
        LEFT_HAND_IMAGE_NAME,
        RIGHT_HAND_IMAGE_PATH,
        RIGHT_HAND_UP_IMAGE_NAME,
        RIGHT_HAND_IMAGE_NAME,
        KEYS_IMAGE_PATH,
        KEYS_IMAGE_NAME,
        KEY_USE,
        HAS_MODEL,
        CAT_MODEL_PATH,
        MODEL_HAS_LEFT_HAND_MODEL,
        MODEL_LEFT_HAND_MODEL_PATH,
        MODEL_HAS_RIGHT_HAND_MODEL,
        MODEL_RIGHT_HAND_MODEL_PATH,
    ],
};

/// One of the two hand slots of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Both hands, in check order.
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    /// Field-name prefix, also used as the hand's display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "LeftHand",
            Self::Right => "RightHand",
        }
    }

    /// Image subdirectory field.
    #[must_use]
    pub const fn image_path(self) -> FieldSpec {
        match self {
            Self::Left => LEFT_HAND_IMAGE_PATH,
            Self::Right => RIGHT_HAND_IMAGE_PATH,
        }
    }

    /// Resting ("up") image field.
    #[must_use]
    pub const fn up_image(self) -> FieldSpec {
        match self {
            Self::Left => LEFT_HAND_UP_IMAGE_NAME,
            Self::Right => RIGHT_HAND_UP_IMAGE_NAME,
        }
    }

    /// Animation frame list field.
    #[must_use]
    pub const fn frames(self) -> FieldSpec {
        match self {
            Self::Left => LEFT_HAND_IMAGE_NAME,
            Self::Right => RIGHT_HAND_IMAGE_NAME,
        }
    }
}

// ============================================================================
// Field Values
// ============================================================================

/// Value of one field as found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The key is not present (or is `null` on an optional field).
    Absent,
    /// The key is present but its value has the wrong shape.
    WrongType {
        /// Expected shape, e.g. "an array of strings".
        expected: &'static str,
        /// What was found instead.
        found: &'static str,
    },
    /// The key is present with a well-typed value.
    Present(T),
}

impl<T> Field<T> {
    /// The value, when present and well-typed.
    #[must_use]
    pub const fn present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::WrongType { .. } => None,
        }
    }

    /// Returns `true` if the key is absent.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}
