//! # form-schema
//!
//! Derive serializable form schemas from TypeScript declarations.
//!
//! A TypeScript file of enums, type aliases, interfaces and classes becomes
//! a [`FormSchemaDocument`]: named models (field name to
//! [`FieldDescriptor`]) and named enums (value lists). A form-rendering
//! layer consumes the document to draw and validate forms.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use form_schema::SchemaParser;
//!
//! let doc = SchemaParser::default().parse_source(r#"
//!     enum Role { ADMIN, USER }
//!
//!     type User = {
//!         name: StringField<2, 40>;
//!         age?: number;
//!         role: Role;
//!         addresses: { street: string }[];
//!     };
//! "#)?;
//!
//! println!("{}", doc.to_json_pretty()?);
//! ```
//!
//! ## Field Metadata
//!
//! | Source | Effect |
//! |--------|--------|
//! | `StringField<minLength, maxLength, pattern, message, label>` | string with validators |
//! | `NumberField<min, max, message, label>` | number with validators |
//! | `EmailField<message, label>` | email |
//! | `StructField<{ ... }, message, label>` | object with an inline shape |
//! | `@Min(n)`, `@Max(n)`, `@MinLength(n)`, `@MaxLength(n)`, `@Length(min, max)` | validators |
//! | `@Pattern(re)`, `@Message(text)` | validators |
//! | `@IsEmail()`, `@IsUrl()` | kind override |
//! | `@Required()`, `@Label(text)` | required flag, label |
//!
//! Decorators work on class properties. The same `@Name(args)` forms are
//! read from leading comments on any property.
//!
//! ## Errors
//!
//! Unrecognized constructs are skipped and unresolvable references are left
//! dangling, both logged through `tracing`. Only a root file without any
//! declarations fails the parse ([`SchemaError::NoDeclarations`]).

pub mod error;
pub mod ir;
pub mod options;
pub mod parser;
pub mod registry;
pub mod source;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use error::{SchemaError, SchemaResult};
pub use ir::{
    EnumSchema, FieldDescriptor, FieldKind, FormSchemaDocument, ModelSchema, Reference,
    ValidatorKind, ValidatorValue, Validators,
};
pub use options::ParserOptions;
pub use registry::{FieldKindRegistry, TypeHandlerRegistry, TypeNodeKind};
pub use source::{FsLoader, MemoryLoader, ParsedModule, SourceLoader, SourceParser};

use parser::imports::{normalize_path, ImportSession};
use parser::SchemaResolver;

/// Virtual file name of inline sources.
const INLINE_SOURCE_NAME: &str = "inline.ts";

/// Entry point: parses a root file (and what it imports) into a schema
/// document.
///
/// A parser is cheap to clone; clones share the dispatch registries. Each
/// call to [`parse_file`](Self::parse_file) or
/// [`parse_source`](Self::parse_source) runs with fresh state.
#[derive(Clone)]
pub struct SchemaParser {
    options: ParserOptions,
    type_handlers: Arc<TypeHandlerRegistry>,
    field_kinds: Arc<FieldKindRegistry>,
    loader: Arc<dyn SourceLoader>,
}

impl SchemaParser {
    /// Create a parser reading from the file system.
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            type_handlers: Arc::new(TypeHandlerRegistry::new()),
            field_kinds: Arc::new(FieldKindRegistry::new()),
            loader: Arc::new(FsLoader),
        }
    }

    /// Read sources through `loader` instead of the file system.
    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Replace the type-node handlers.
    pub fn with_type_handlers(mut self, registry: TypeHandlerRegistry) -> Self {
        self.type_handlers = Arc::new(registry);
        self
    }

    /// Replace the field-kind handlers.
    pub fn with_field_kinds(mut self, registry: FieldKindRegistry) -> Self {
        self.field_kinds = Arc::new(registry);
        self
    }

    /// The parser options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The type-node handlers.
    pub fn type_handlers(&self) -> &TypeHandlerRegistry {
        &self.type_handlers
    }

    /// The field-kind handlers.
    pub fn field_kinds(&self) -> &FieldKindRegistry {
        &self.field_kinds
    }

    /// Parse a root file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> SchemaResult<FormSchemaDocument> {
        let path = normalize_path(path.as_ref());
        self.run(path, |source, path| source.parse_file(path))
    }

    /// Parse inline source text.
    ///
    /// Relative imports resolve against `base_dir` (default: the working
    /// directory).
    pub fn parse_source(&self, text: &str) -> SchemaResult<FormSchemaDocument> {
        let base = self
            .options
            .base_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = normalize_path(&base.join(INLINE_SOURCE_NAME));
        self.run(path, |source, path| source.parse(text, path))
    }

    fn run<F>(&self, path: PathBuf, parse: F) -> SchemaResult<FormSchemaDocument>
    where
        F: FnOnce(&SourceParser, &Path) -> SchemaResult<ParsedModule>,
    {
        let mut session = ImportSession::new(SourceParser::new(
            Arc::clone(&self.loader),
            self.options.decorators,
        ));
        let mut resolver = SchemaResolver::new(self, path.clone(), 0);

        let declarations = match parse(&session.source, &path) {
            Ok(parsed) => resolver.walk(&parsed),
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Failed to parse schema file");
                0
            }
        };

        if declarations == 0 {
            return Err(SchemaError::no_declarations(path));
        }

        session.enter(&path);
        resolver.resolve_imports(&mut session);
        Ok(resolver.into_document())
    }
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl std::fmt::Debug for SchemaParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaParser")
            .field("options", &self.options)
            .field("type_handlers", &self.type_handlers)
            .field("field_kinds", &self.field_kinds)
            .finish_non_exhaustive()
    }
}

/// Parse a root file with default options.
pub fn parse_file(path: impl AsRef<Path>) -> SchemaResult<FormSchemaDocument> {
    SchemaParser::default().parse_file(path)
}

/// Parse inline source text with default options.
pub fn parse_source(text: &str) -> SchemaResult<FormSchemaDocument> {
    SchemaParser::default().parse_source(text)
}
