//! The root schema document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::field::FieldDescriptor;
use crate::error::SchemaResult;

/// Field name to descriptor, in declaration order.
pub type ModelSchema = IndexMap<String, FieldDescriptor>;

/// Enum values, in declaration order.
pub type EnumSchema = Vec<String>;

/// The output of a parse: every model and enum reachable from the root file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchemaDocument {
    /// Named models
    #[serde(default)]
    pub models: IndexMap<String, ModelSchema>,

    /// Named enums
    #[serde(default)]
    pub enums: IndexMap<String, EnumSchema>,
}

impl FormSchemaDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a model by name.
    pub fn model(&self, name: &str) -> Option<&ModelSchema> {
        self.models.get(name)
    }

    /// Look up an enum's values by name.
    pub fn enum_values(&self, name: &str) -> Option<&EnumSchema> {
        self.enums.get(name)
    }

    /// Whether a model or enum with this name exists.
    pub fn defines(&self, name: &str) -> bool {
        self.models.contains_key(name) || self.enums.contains_key(name)
    }

    /// Whether the document holds no models and no enums.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.enums.is_empty()
    }

    /// Names referenced by some field but defined nowhere in the document.
    ///
    /// Returned in order of first appearance.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut referenced = Vec::new();
        for model in self.models.values() {
            for field in model.values() {
                field.referenced_names(&mut referenced);
            }
        }
        referenced.retain(|name| !self.defines(name));
        referenced
    }

    /// Serialize to pretty-printed JSON (two-space indent).
    pub fn to_json_pretty(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Names a model's fields point at, in order of first appearance.
pub fn model_references(model: &ModelSchema) -> Vec<String> {
    let mut names = Vec::new();
    for field in model.values() {
        field.referenced_names(&mut names);
    }
    names
}
