//! Named type reference resolution.

use swc_ecma_ast::{TsEntityName, TsTypeRef};

use crate::ir::{FieldDescriptor, FieldKind};
use crate::parser::SchemaResolver;

impl SchemaResolver<'_> {
    /// Resolve a named type reference.
    ///
    /// In priority order:
    /// 1. a registered enum gives `{kind: "enum", reference: name}`
    /// 2. a registered field kind (`StringField<...>`, ...) gives its handler's field
    /// 3. anything else is an opaque model reference `{kind: "object", reference: name}`,
    ///    left for later resolution in this file or through its imports
    ///
    /// Qualified names (`ns.Type`) give `{kind: "unknown"}`.
    pub fn resolve_type_ref(&mut self, type_ref: &TsTypeRef) -> FieldDescriptor {
        let TsEntityName::Ident(ident) = &type_ref.type_name else {
            tracing::debug!(file = %self.file.display(), "Qualified type reference not supported");
            return FieldDescriptor::leaf(FieldKind::Unknown);
        };
        let name = ident.sym.to_string();

        if self.is_enum(&name) {
            return FieldDescriptor::enumeration(name);
        }

        let parser = self.parser;
        if let Some(handler) = parser.field_kinds().get(&name) {
            let params = type_ref
                .type_params
                .as_ref()
                .map(|instantiation| instantiation.params.as_slice())
                .unwrap_or_default();
            return handler(self, params);
        }

        FieldDescriptor::object(name)
    }
}
