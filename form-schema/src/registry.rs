//! Dispatch tables for type resolution.
//!
//! Two read-only tables drive the resolver:
//!
//! - [`TypeHandlerRegistry`] maps a type-node kind (keyword, array, type
//!   reference, ...) to the handler that classifies it. Kinds without a
//!   handler yield no field.
//! - [`FieldKindRegistry`] maps a generic alias name (`StringField`,
//!   `NumberField`, ...) to the handler that turns its type parameters into
//!   a constrained field.
//!
//! Both are built once per [`SchemaParser`](crate::SchemaParser), can be
//! inspected, and can be extended with [`register`](TypeHandlerRegistry::register)
//! before parsing.

use std::collections::HashMap;
use std::fmt;

use swc_ecma_ast::TsType;

use crate::ir::FieldDescriptor;
use crate::parser::{classify, field_kinds, SchemaResolver};

/// Classifies a type node. The name is the enclosing property, if any.
pub type TypeHandler =
    fn(&mut SchemaResolver<'_>, &TsType, Option<&str>) -> Option<FieldDescriptor>;

/// Builds a constrained field from a generic alias's type parameters.
pub type FieldKindHandler = fn(&mut SchemaResolver<'_>, &[Box<TsType>]) -> FieldDescriptor;

/// Kind tag of a type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeNodeKind {
    Keyword,
    Array,
    Reference,
    Parenthesized,
    TypeLiteral,
    Literal,
    Union,
    Tuple,
    Other,
}

impl TypeNodeKind {
    /// Tag a type node.
    pub fn of(ty: &TsType) -> Self {
        match ty {
            TsType::TsKeywordType(_) => Self::Keyword,
            TsType::TsArrayType(_) => Self::Array,
            TsType::TsTypeRef(_) => Self::Reference,
            TsType::TsParenthesizedType(_) => Self::Parenthesized,
            TsType::TsTypeLit(_) => Self::TypeLiteral,
            TsType::TsLitType(_) => Self::Literal,
            TsType::TsUnionOrIntersectionType(_) => Self::Union,
            TsType::TsTupleType(_) => Self::Tuple,
            _ => Self::Other,
        }
    }

    /// Display name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Array => "array",
            Self::Reference => "type-reference",
            Self::Parenthesized => "parenthesized",
            Self::TypeLiteral => "type-literal",
            Self::Literal => "literal",
            Self::Union => "union",
            Self::Tuple => "tuple",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TypeNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-node kind to handler.
#[derive(Clone)]
pub struct TypeHandlerRegistry {
    handlers: HashMap<TypeNodeKind, TypeHandler>,
}

impl TypeHandlerRegistry {
    /// Create a registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in handlers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(TypeNodeKind::Keyword, classify::keyword_handler);
        registry.register(TypeNodeKind::Array, classify::array_handler);
        registry.register(TypeNodeKind::Reference, classify::reference_handler);
        registry.register(TypeNodeKind::Parenthesized, classify::parenthesized_handler);
        registry
    }

    /// Register a handler, replacing any existing one for the kind.
    pub fn register(&mut self, kind: TypeNodeKind, handler: TypeHandler) {
        self.handlers.insert(kind, handler);
    }

    /// Get the handler for a kind.
    pub fn get(&self, kind: TypeNodeKind) -> Option<TypeHandler> {
        self.handlers.get(&kind).copied()
    }

    /// Whether a handler exists for a kind.
    pub fn contains(&self, kind: TypeNodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// The kinds with a handler.
    pub fn kinds(&self) -> Vec<TypeNodeKind> {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }
}

impl Default for TypeHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Generic alias name to field-kind handler.
#[derive(Clone)]
pub struct FieldKindRegistry {
    handlers: HashMap<String, FieldKindHandler>,
}

impl FieldKindRegistry {
    /// Create a registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with `StringField`, `NumberField`, `EmailField`
    /// and `StructField`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("StringField", field_kinds::string_field);
        registry.register("NumberField", field_kinds::number_field);
        registry.register("EmailField", field_kinds::email_field);
        registry.register("StructField", field_kinds::struct_field);
        registry
    }

    /// Register a handler under an alias name.
    pub fn register(&mut self, name: impl Into<String>, handler: FieldKindHandler) {
        self.handlers.insert(name.into(), handler);
    }

    /// Get the handler for an alias name.
    pub fn get(&self, name: &str) -> Option<FieldKindHandler> {
        self.handlers.get(name).copied()
    }

    /// Whether a handler exists for an alias name.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// The registered alias names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FieldKindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldKindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldKindRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
