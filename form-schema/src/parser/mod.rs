//! Schema derivation from TypeScript syntax trees.
//!
//! The [`SchemaResolver`] holds the state of one file's pass. Its behavior
//! is split by concern:
//!
//! - `classify`: keyword, array and parenthesized type nodes
//! - `reference`: named type references (enum, field kind, model)
//! - `field_kinds`: the `StringField`/`NumberField`/`EmailField`/`StructField` handlers
//! - `literal`: type-literal and class bodies to models
//! - `annotations`: decorator and comment metadata
//! - `naming`: names for inferred models
//! - `module`: the top-level declaration walk
//! - `imports`: import tables and cross-file resolution

pub mod annotations;
pub mod classify;
pub mod field_kinds;
pub mod imports;
pub mod literal;
pub mod module;
pub mod naming;
pub mod reference;
pub mod resolver;

pub use annotations::{Annotation, FieldOverrides};
pub use imports::{ImportEntry, ImportTable, ImportedName};
pub use resolver::SchemaResolver;
