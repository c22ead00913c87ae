//! Classifiers for keyword, array and parenthesized type nodes.
//!
//! The `*_handler` functions are the built-in entries of the
//! [`TypeHandlerRegistry`](crate::registry::TypeHandlerRegistry).

use swc_ecma_ast::{TsKeywordTypeKind, TsType};

use crate::ir::{FieldDescriptor, FieldKind, Reference};
use crate::parser::naming;
use crate::parser::SchemaResolver;
use crate::registry::TypeNodeKind;

/// Map a TypeScript keyword to its field kind.
pub fn keyword_kind(kind: TsKeywordTypeKind) -> FieldKind {
    match kind {
        TsKeywordTypeKind::TsStringKeyword => FieldKind::String,
        TsKeywordTypeKind::TsNumberKeyword => FieldKind::Number,
        TsKeywordTypeKind::TsBooleanKeyword => FieldKind::Boolean,
        TsKeywordTypeKind::TsObjectKeyword => FieldKind::Object,
        TsKeywordTypeKind::TsUnknownKeyword => FieldKind::Unknown,
        TsKeywordTypeKind::TsAnyKeyword => FieldKind::Keyword("any".into()),
        TsKeywordTypeKind::TsBigIntKeyword => FieldKind::Keyword("bigint".into()),
        TsKeywordTypeKind::TsSymbolKeyword => FieldKind::Keyword("symbol".into()),
        TsKeywordTypeKind::TsVoidKeyword => FieldKind::Keyword("void".into()),
        TsKeywordTypeKind::TsUndefinedKeyword => FieldKind::Keyword("undefined".into()),
        TsKeywordTypeKind::TsNullKeyword => FieldKind::Keyword("null".into()),
        TsKeywordTypeKind::TsNeverKeyword => FieldKind::Keyword("never".into()),
        TsKeywordTypeKind::TsIntrinsicKeyword => FieldKind::Keyword("intrinsic".into()),
    }
}

/// Strip any number of enclosing parentheses.
pub fn unwrap_parens(ty: &TsType) -> &TsType {
    match ty {
        TsType::TsParenthesizedType(paren) => unwrap_parens(&paren.type_ann),
        other => other,
    }
}

pub(crate) fn keyword_handler(
    _resolver: &mut SchemaResolver<'_>,
    ty: &TsType,
    _property: Option<&str>,
) -> Option<FieldDescriptor> {
    let TsType::TsKeywordType(keyword) = ty else {
        return None;
    };
    Some(FieldDescriptor::leaf(keyword_kind(keyword.kind)))
}

pub(crate) fn array_handler(
    resolver: &mut SchemaResolver<'_>,
    ty: &TsType,
    property: Option<&str>,
) -> Option<FieldDescriptor> {
    let TsType::TsArrayType(array) = ty else {
        return None;
    };
    Some(resolver.classify_array(&array.elem_type, property))
}

pub(crate) fn reference_handler(
    resolver: &mut SchemaResolver<'_>,
    ty: &TsType,
    _property: Option<&str>,
) -> Option<FieldDescriptor> {
    let TsType::TsTypeRef(type_ref) = ty else {
        return None;
    };
    Some(resolver.resolve_type_ref(type_ref))
}

pub(crate) fn parenthesized_handler(
    resolver: &mut SchemaResolver<'_>,
    ty: &TsType,
    property: Option<&str>,
) -> Option<FieldDescriptor> {
    let TsType::TsParenthesizedType(paren) = ty else {
        return None;
    };
    resolver.resolve_type(&paren.type_ann, property)
}

impl SchemaResolver<'_> {
    /// Classify an array from its element type.
    ///
    /// - named reference: the resolved reference, or its kind when it has none
    /// - keyword: the keyword kind
    /// - array: a nested array descriptor
    /// - inline object shape: a model inferred from `property`, referenced by name
    ///
    /// Other element types give `"unknown"`.
    pub fn classify_array(&mut self, element: &TsType, property: Option<&str>) -> FieldDescriptor {
        let reference = match unwrap_parens(element) {
            TsType::TsTypeRef(type_ref) => {
                let resolved = self.resolve_type_ref(type_ref);
                match resolved.reference {
                    Some(reference) => reference,
                    None => Reference::Name(resolved.kind.to_string()),
                }
            }
            TsType::TsKeywordType(keyword) => {
                Reference::Name(keyword_kind(keyword.kind).to_string())
            }
            TsType::TsArrayType(inner) => {
                Reference::from(self.classify_array(&inner.elem_type, property))
            }
            TsType::TsTypeLit(literal) => {
                let base = naming::inferred_model_name(property, self.document.models.len());
                let model = self.resolve_type_literal(&literal.members);
                Reference::Name(self.register_inferred(&base, model))
            }
            other => {
                tracing::debug!(
                    kind = %TypeNodeKind::of(other),
                    property = property.unwrap_or_default(),
                    "Array element type not recognized"
                );
                Reference::Name(FieldKind::Unknown.to_string())
            }
        };
        FieldDescriptor::array(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemaParser;
    use std::path::{Path, PathBuf};
    use swc_ecma_ast::{Decl, ModuleItem, Stmt};

    /// Parse `type T = <ty>;` and classify `<ty>` as property `property`.
    fn classify(ty: &str, property: Option<&str>) -> (Option<FieldDescriptor>, crate::ir::FormSchemaDocument) {
        let parser = SchemaParser::default();
        let parsed = crate::source::SourceParser::default()
            .parse(&format!("type T = {};", ty), Path::new("t.ts"))
            .unwrap();
        let ModuleItem::Stmt(Stmt::Decl(Decl::TsTypeAlias(alias))) = &parsed.module.body[0] else {
            panic!("expected alias");
        };
        let mut resolver = SchemaResolver::new(&parser, PathBuf::from("t.ts"), 0);
        let field = resolver.resolve_type(&alias.type_ann, property);
        (field, resolver.into_document())
    }

    #[test]
    fn test_keywords_pass_through() {
        for keyword in ["string", "number", "boolean", "any", "bigint", "null", "undefined"] {
            let (field, _) = classify(keyword, None);
            let field = field.unwrap();
            assert_eq!(field.kind.as_str(), keyword);
            assert!(field.reference.is_none());
        }
    }

    #[test]
    fn test_object_keyword_has_empty_shape() {
        let (field, _) = classify("object", None);
        let field = field.unwrap();
        assert_eq!(field.kind, FieldKind::Object);
        assert!(field.is_consistent());
    }

    #[test]
    fn test_array_of_keyword() {
        let (field, _) = classify("string[]", Some("tags"));
        assert_eq!(field, Some(FieldDescriptor::array("string")));
    }

    #[test]
    fn test_nested_arrays() {
        let (field, _) = classify("number[][][]", Some("grid"));
        let expected = FieldDescriptor::array(FieldDescriptor::array(FieldDescriptor::array("number")));
        assert_eq!(field, Some(expected));
    }

    #[test]
    fn test_parenthesized_element() {
        let (field, _) = classify("(boolean)[]", None);
        assert_eq!(field, Some(FieldDescriptor::array("boolean")));
    }

    #[test]
    fn test_array_of_model_reference() {
        let (field, _) = classify("Post[]", Some("posts"));
        assert_eq!(field, Some(FieldDescriptor::array("Post")));
    }

    #[test]
    fn test_array_of_field_kind_uses_kind() {
        let (field, _) = classify("StringField<1, 10>[]", Some("names"));
        assert_eq!(field, Some(FieldDescriptor::array("string")));
    }

    #[test]
    fn test_array_of_inline_shape_infers_model() {
        let (field, doc) = classify("{ street: string }[]", Some("addresses"));
        assert_eq!(field, Some(FieldDescriptor::array("Address")));
        let model = doc.model("Address").unwrap();
        assert_eq!(model["street"], FieldDescriptor::leaf(FieldKind::String));
    }

    #[test]
    fn test_array_of_inline_shape_without_property() {
        let (field, doc) = classify("{ street: string }[]", None);
        assert_eq!(field, Some(FieldDescriptor::array("Inferred0")));
        assert!(doc.model("Inferred0").is_some());
    }

    #[test]
    fn test_array_of_union_is_unknown() {
        let (field, _) = classify("(string | number)[]", None);
        assert_eq!(field, Some(FieldDescriptor::array("unknown")));
    }

    #[test]
    fn test_unregistered_kind_yields_nothing() {
        let (field, _) = classify("string | number", None);
        assert!(field.is_none());
        let (field, _) = classify("'a'", None);
        assert!(field.is_none());
    }
}
