//! Validator definitions.
//!
//! Validators are the client-side constraints attached to a field, sourced
//! from field-kind type parameters (`StringField<2, 40>`) or from decorator
//! annotations (`@MinLength(2)`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal validator value.
///
/// Numbers are stored as [`serde_json::Number`] so integral values stay
/// integral through a JSON round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidatorValue {
    /// Numeric constraint, e.g. `min: 0`
    Number(serde_json::Number),

    /// Textual constraint, e.g. `pattern: "^[a-z]+$"`
    Text(String),

    /// Boolean flag
    Flag(bool),
}

impl ValidatorValue {
    /// Build a numeric value, keeping integral floats as integers.
    ///
    /// Returns `None` for NaN and infinities, which JSON cannot carry.
    pub fn number(value: f64) -> Option<Self> {
        if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            return Some(Self::Number(serde_json::Number::from(value as i64)));
        }
        serde_json::Number::from_f64(value).map(Self::Number)
    }

    /// Get the text value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the flag value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ValidatorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ValidatorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ValidatorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ValidatorValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for ValidatorValue {
    fn from(value: i64) -> Self {
        Self::Number(serde_json::Number::from(value))
    }
}

/// The closed set of validator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    Min,
    Max,
    MinLength,
    MaxLength,
    Pattern,
    Message,
}

impl ValidatorKind {
    /// All validator kinds, in serialization order.
    pub const ALL: [ValidatorKind; 6] = [
        ValidatorKind::Min,
        ValidatorKind::Max,
        ValidatorKind::MinLength,
        ValidatorKind::MaxLength,
        ValidatorKind::Pattern,
        ValidatorKind::Message,
    ];

    /// The JSON key for this validator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Pattern => "pattern",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial mapping of validator kind to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validators {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<ValidatorValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<ValidatorValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<ValidatorValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<ValidatorValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<ValidatorValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ValidatorValue>,
}

impl Validators {
    /// Create an empty validator set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no validator is set.
    pub fn is_empty(&self) -> bool {
        ValidatorKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }

    /// Get the value for a validator kind.
    pub fn get(&self, kind: ValidatorKind) -> Option<&ValidatorValue> {
        self.slot(kind).as_ref()
    }

    /// Set the value for a validator kind, replacing any previous value.
    pub fn set(&mut self, kind: ValidatorKind, value: ValidatorValue) {
        *self.slot_mut(kind) = Some(value);
    }

    /// Set the value if one is given; `None` leaves the slot untouched.
    pub fn set_opt(&mut self, kind: ValidatorKind, value: Option<ValidatorValue>) {
        if let Some(value) = value {
            self.set(kind, value);
        }
    }

    /// Builder-style [`Validators::set`].
    pub fn with(mut self, kind: ValidatorKind, value: impl Into<ValidatorValue>) -> Self {
        self.set(kind, value.into());
        self
    }

    /// Merge `other` into `self`; keys set in `other` win.
    pub fn merge(&mut self, other: &Validators) {
        for kind in ValidatorKind::ALL {
            if let Some(value) = other.get(kind) {
                self.set(kind, value.clone());
            }
        }
    }

    /// Iterate over the set validators in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (ValidatorKind, &ValidatorValue)> {
        ValidatorKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|value| (kind, value)))
    }

    fn slot(&self, kind: ValidatorKind) -> &Option<ValidatorValue> {
        match kind {
            ValidatorKind::Min => &self.min,
            ValidatorKind::Max => &self.max,
            ValidatorKind::MinLength => &self.min_length,
            ValidatorKind::MaxLength => &self.max_length,
            ValidatorKind::Pattern => &self.pattern,
            ValidatorKind::Message => &self.message,
        }
    }

    fn slot_mut(&mut self, kind: ValidatorKind) -> &mut Option<ValidatorValue> {
        match kind {
            ValidatorKind::Min => &mut self.min,
            ValidatorKind::Max => &mut self.max,
            ValidatorKind::MinLength => &mut self.min_length,
            ValidatorKind::MaxLength => &mut self.max_length,
            ValidatorKind::Pattern => &mut self.pattern,
            ValidatorKind::Message => &mut self.message,
        }
    }
}
