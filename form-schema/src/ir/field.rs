//! Field descriptor definitions.
//!
//! A [`FieldDescriptor`] is the derived metadata for one form field: what it
//! is ([`FieldKind`]), what it points to ([`Reference`]), whether it is
//! required, its label and its validators.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::document::ModelSchema;
use super::validation::Validators;

/// Keyword kinds passed through verbatim from the TypeScript type system.
const KEYWORD_KINDS: &[&str] = &[
    "any",
    "unknown",
    "bigint",
    "symbol",
    "void",
    "undefined",
    "null",
    "never",
    "intrinsic",
];

/// The structural tag of a field.
///
/// Serialized as its plain string form (`"string"`, `"array"`, ...).
/// Keywords without a dedicated variant (`any`, `bigint`, `null`, ...) are
/// carried as [`FieldKind::Keyword`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Email,
    Url,
    Array,
    Object,
    Enum,
    Unknown,
    Keyword(String),
}

impl FieldKind {
    /// The string form used in the schema document.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Email => "email",
            Self::Url => "url",
            Self::Array => "array",
            Self::Object => "object",
            Self::Enum => "enum",
            Self::Unknown => "unknown",
            Self::Keyword(name) => name,
        }
    }

    /// Whether fields of this kind carry a reference.
    pub fn takes_reference(&self) -> bool {
        matches!(self, Self::Array | Self::Object | Self::Enum)
    }

    /// Whether `name` is a kind name rather than a model or enum name.
    ///
    /// Array references hold either an element kind (`"string"`) or the name
    /// of a model/enum; this tells the two apart.
    pub fn is_kind_name(name: &str) -> bool {
        !matches!(FieldKind::from(name), FieldKind::Keyword(_)) || KEYWORD_KINDS.contains(&name)
    }
}

impl From<&str> for FieldKind {
    fn from(value: &str) -> Self {
        match value {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "email" => Self::Email,
            "url" => Self::Url,
            "array" => Self::Array,
            "object" => Self::Object,
            "enum" => Self::Enum,
            "unknown" => Self::Unknown,
            other => Self::Keyword(other.to_string()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Keyword(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an array, object or enum field points to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    /// A model or enum name, or an array element kind.
    Name(String),

    /// A nested array element descriptor.
    Field(Box<FieldDescriptor>),

    /// An inline anonymous shape.
    Shape(ModelSchema),
}

impl Reference {
    /// Create a name reference.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// The referenced name, if this is a name reference.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for Reference {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<FieldDescriptor> for Reference {
    fn from(value: FieldDescriptor) -> Self {
        Self::Field(Box::new(value))
    }
}

fn default_required() -> bool {
    true
}

/// Derived metadata for one form field.
///
/// Invariant: `reference` is set if and only if `kind` takes a reference
/// (array, object, enum). The constructors and [`FieldDescriptor::override_kind`]
/// keep it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Structural tag
    pub kind: FieldKind,

    /// Referenced model, enum, element kind or inline shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,

    /// Negation of the property's optional marker
    #[serde(default = "default_required")]
    pub required: bool,

    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Validation constraints
    #[serde(default, skip_serializing_if = "Validators::is_empty")]
    pub validators: Validators,
}

impl FieldDescriptor {
    fn with_parts(kind: FieldKind, reference: Option<Reference>) -> Self {
        Self {
            kind,
            reference,
            required: true,
            label: None,
            validators: Validators::default(),
        }
    }

    /// Create a descriptor for a kind that carries no reference.
    ///
    /// A reference-taking kind gets an empty inline shape so the invariant
    /// holds.
    pub fn leaf(kind: FieldKind) -> Self {
        if kind.takes_reference() {
            return Self::with_parts(kind, Some(Reference::Shape(ModelSchema::new())));
        }
        Self::with_parts(kind, None)
    }

    /// Create an array descriptor over the given element.
    pub fn array(element: impl Into<Reference>) -> Self {
        Self::with_parts(FieldKind::Array, Some(element.into()))
    }

    /// Create an object descriptor pointing at a model name or inline shape.
    pub fn object(target: impl Into<Reference>) -> Self {
        Self::with_parts(FieldKind::Object, Some(target.into()))
    }

    /// Create an enum descriptor pointing at an enum name.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::with_parts(FieldKind::Enum, Some(Reference::Name(name.into())))
    }

    /// Set the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the validators.
    pub fn with_validators(mut self, validators: Validators) -> Self {
        self.validators = validators;
        self
    }

    /// Replace the kind, dropping the reference when the new kind has none.
    pub fn override_kind(&mut self, kind: FieldKind) {
        if !kind.takes_reference() {
            self.reference = None;
        } else if self.reference.is_none() {
            self.reference = Some(Reference::Shape(ModelSchema::new()));
        }
        self.kind = kind;
    }

    /// Check the reference invariant, recursively.
    pub fn is_consistent(&self) -> bool {
        if self.kind.takes_reference() != self.reference.is_some() {
            return false;
        }
        match &self.reference {
            Some(Reference::Field(inner)) => inner.is_consistent(),
            Some(Reference::Shape(shape)) => shape.values().all(FieldDescriptor::is_consistent),
            _ => true,
        }
    }

    /// Collect the model and enum names this descriptor points at.
    ///
    /// Array element kinds (`"string"`) are not names and are skipped.
    pub fn referenced_names(&self, out: &mut Vec<String>) {
        match &self.reference {
            Some(Reference::Name(name)) => {
                let is_element_kind = self.kind == FieldKind::Array && FieldKind::is_kind_name(name);
                if !is_element_kind && !out.contains(name) {
                    out.push(name.clone());
                }
            }
            Some(Reference::Field(inner)) => inner.referenced_names(out),
            Some(Reference::Shape(shape)) => {
                for field in shape.values() {
                    field.referenced_names(out);
                }
            }
            None => {}
        }
    }
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        Self::leaf(FieldKind::Unknown)
    }
}
