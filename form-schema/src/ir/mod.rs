//! Schema document data model.
//!
//! These are the serializable structures the engine produces and the
//! form-rendering layer consumes: field descriptors grouped into models,
//! enum value lists, and the document that holds both.

pub mod document;
pub mod field;
pub mod validation;

pub use document::{EnumSchema, FormSchemaDocument, ModelSchema};
pub use field::{FieldDescriptor, FieldKind, Reference};
pub use validation::{ValidatorKind, ValidatorValue, Validators};
