//! Per-file resolution state.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use swc_common::comments::{Comment, Comments, SingleThreadedComments};
use swc_common::BytePos;
use swc_ecma_ast::TsType;

use crate::ir::{EnumSchema, FieldDescriptor, FormSchemaDocument, ModelSchema};
use crate::parser::imports::ImportTable;
use crate::registry::TypeNodeKind;
use crate::SchemaParser;

/// Resolution state for one file.
///
/// A resolver is created per file and per parse. It accumulates the file's
/// models and enums, its import table, and the names its declarations
/// reserve. Nested resolvers are created for imported files, one level
/// deeper.
pub struct SchemaResolver<'a> {
    pub(crate) parser: &'a SchemaParser,
    pub(crate) file: PathBuf,
    pub(crate) depth: usize,
    pub(crate) comments: SingleThreadedComments,
    pub(crate) document: FormSchemaDocument,
    pub(crate) imports: ImportTable,
    pub(crate) declared: HashSet<String>,
}

impl<'a> SchemaResolver<'a> {
    pub(crate) fn new(parser: &'a SchemaParser, file: PathBuf, depth: usize) -> Self {
        Self {
            parser,
            file,
            depth,
            comments: SingleThreadedComments::default(),
            document: FormSchemaDocument::new(),
            imports: ImportTable::default(),
            declared: HashSet::new(),
        }
    }

    /// The file being resolved.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Cross-file nesting depth (0 for the root file).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The models and enums accumulated so far.
    pub fn document(&self) -> &FormSchemaDocument {
        &self.document
    }

    /// The file's import table.
    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    /// Whether `name` is a registered enum.
    pub fn is_enum(&self, name: &str) -> bool {
        self.document.enums.contains_key(name)
    }

    /// Register a model under `name`.
    pub fn register_model(&mut self, name: impl Into<String>, model: ModelSchema) {
        self.document.models.insert(name.into(), model);
    }

    /// Register an enum under `name`.
    pub fn register_enum(&mut self, name: impl Into<String>, values: EnumSchema) {
        self.document.enums.insert(name.into(), values);
    }

    /// Classify a type node through the type-handler registry.
    ///
    /// `property` is the enclosing property name, used to name inferred
    /// models. Kinds without a handler yield `None`.
    pub fn resolve_type(&mut self, ty: &TsType, property: Option<&str>) -> Option<FieldDescriptor> {
        let kind = TypeNodeKind::of(ty);
        let parser = self.parser;
        match parser.type_handlers().get(kind) {
            Some(handler) => handler(self, ty, property),
            None => {
                tracing::debug!(
                    kind = %kind,
                    property = property.unwrap_or_default(),
                    "No handler for type node"
                );
                None
            }
        }
    }

    /// Register an inferred model and return the name it was stored under.
    ///
    /// Declared names and enum names are never taken. A model already
    /// registered under the name is reused when its shape is identical;
    /// otherwise the name gets a numeric suffix (`Address2`, `Address3`, ...).
    pub fn register_inferred(&mut self, base: &str, model: ModelSchema) -> String {
        let mut candidate = base.to_string();
        let mut suffix = 2;
        loop {
            let taken = self.declared.contains(&candidate) || self.is_enum(&candidate);
            if !taken {
                match self.document.models.get(&candidate) {
                    None => {
                        self.document.models.insert(candidate.clone(), model);
                        return candidate;
                    }
                    Some(existing) if *existing == model => return candidate,
                    Some(_) => {}
                }
            }
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
    }

    /// Comments attached before `pos`.
    pub(crate) fn leading_comments(&self, pos: BytePos) -> Vec<Comment> {
        self.comments.get_leading(pos).unwrap_or_default()
    }

    /// Finish and return the accumulated document.
    pub fn into_document(self) -> FormSchemaDocument {
        self.document
    }
}
