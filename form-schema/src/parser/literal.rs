//! Object shapes to models.
//!
//! Type literals, interface bodies and class bodies all become a
//! [`ModelSchema`]: one field per simple, named, annotated property. Any
//! other member is skipped, as is a property whose type yields no field.

use swc_common::BytePos;
use swc_ecma_ast::{ClassMember, Expr, Lit, PropName, TsType, TsTypeElement};

use crate::ir::{FieldDescriptor, ModelSchema};
use crate::parser::annotations::{self, Annotation, FieldOverrides};
use crate::parser::SchemaResolver;

/// Name of a type-literal or interface property key.
fn expr_key(key: &Expr) -> Option<String> {
    match key {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string()),
        _ => None,
    }
}

/// Name of a class property key.
fn prop_key(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string()),
        _ => None,
    }
}

impl SchemaResolver<'_> {
    /// Resolve type-literal or interface members.
    pub fn resolve_type_literal(&mut self, members: &[TsTypeElement]) -> ModelSchema {
        let mut model = ModelSchema::new();
        for member in members {
            let TsTypeElement::TsPropertySignature(prop) = member else {
                tracing::debug!(file = %self.file.display(), "Skipping non-property member");
                continue;
            };
            if prop.computed {
                continue;
            }
            let Some(name) = expr_key(&prop.key) else {
                continue;
            };
            let Some(type_ann) = &prop.type_ann else {
                continue;
            };

            let annotations = self.comment_annotations(prop.span.lo);
            if let Some(field) =
                self.resolve_member(&name, &type_ann.type_ann, prop.optional, &annotations)
            {
                model.insert(name, field);
            }
        }
        model
    }

    /// Resolve class members.
    ///
    /// Only instance properties count. Comment annotations fold before
    /// decorators.
    pub fn resolve_class_body(&mut self, members: &[ClassMember]) -> ModelSchema {
        let mut model = ModelSchema::new();
        for member in members {
            let ClassMember::ClassProp(prop) = member else {
                continue;
            };
            if prop.is_static {
                continue;
            }
            let Some(name) = prop_key(&prop.key) else {
                continue;
            };
            let Some(type_ann) = &prop.type_ann else {
                continue;
            };

            let start = prop
                .decorators
                .first()
                .map_or(prop.span.lo, |decorator| decorator.span.lo.min(prop.span.lo));
            let mut annotations = self.comment_annotations(start);
            annotations.extend(prop.decorators.iter().filter_map(Annotation::from_decorator));

            if let Some(field) =
                self.resolve_member(&name, &type_ann.type_ann, prop.is_optional, &annotations)
            {
                model.insert(name, field);
            }
        }
        model
    }

    fn resolve_member(
        &mut self,
        name: &str,
        ty: &TsType,
        optional: bool,
        annotations: &[Annotation],
    ) -> Option<FieldDescriptor> {
        let Some(mut field) = self.resolve_type(ty, Some(name)) else {
            tracing::debug!(property = name, "Property type yields no field");
            return None;
        };
        field.required = !optional;
        FieldOverrides::fold(annotations).apply_to(&mut field);
        Some(field)
    }

    fn comment_annotations(&self, pos: BytePos) -> Vec<Annotation> {
        if !self.parser.options().comment_annotations {
            return Vec::new();
        }
        self.leading_comments(pos)
            .iter()
            .flat_map(|comment| annotations::parse_comment(&comment.text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::{FieldDescriptor, FieldKind, ValidatorValue};
    use crate::{ParserOptions, SchemaParser};

    #[test]
    fn test_optional_and_required() {
        let doc = SchemaParser::default()
            .parse_source("type User = { name: string; age?: number };")
            .unwrap();
        let user = doc.model("User").unwrap();
        assert!(user["name"].required);
        assert!(!user["age"].required);
    }

    #[test]
    fn test_skips_methods_and_untyped_members() {
        let doc = SchemaParser::default()
            .parse_source(
                "type User = { name: string; greet(): void; [key: string]: any; loose };",
            )
            .unwrap();
        let user = doc.model("User").unwrap();
        assert_eq!(user.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_string_literal_keys() {
        let doc = SchemaParser::default()
            .parse_source("type User = { 'first-name': string };")
            .unwrap();
        assert!(doc.model("User").unwrap().contains_key("first-name"));
    }

    #[test]
    fn test_unhandled_property_type_is_omitted() {
        let doc = SchemaParser::default()
            .parse_source("type User = { name: string; mode: 'a' | 'b'; nested: { x: string } };")
            .unwrap();
        let user = doc.model("User").unwrap();
        assert_eq!(user.len(), 1);
    }

    #[test]
    fn test_class_members() {
        let source = r#"
            class User {
                static count: number;
                #secret: string;
                name: string;
                nickname?: string;
                greet(): string { return this.name; }
            }
        "#;
        let doc = SchemaParser::default().parse_source(source).unwrap();
        let user = doc.model("User").unwrap();
        assert_eq!(user.keys().collect::<Vec<_>>(), vec!["name", "nickname"]);
        assert!(!user["nickname"].required);
    }

    #[test]
    fn test_class_decorators() {
        let source = r#"
            class User {
                @IsEmail()
                @Message('Invalid email')
                @Label('Email')
                email: string;

                @Required()
                bio?: string;
            }
        "#;
        let doc = SchemaParser::default().parse_source(source).unwrap();
        let user = doc.model("User").unwrap();
        assert_eq!(user["email"].kind, FieldKind::Email);
        assert_eq!(user["email"].label.as_deref(), Some("Email"));
        assert_eq!(
            user["email"].validators.message,
            Some(ValidatorValue::from("Invalid email"))
        );
        assert!(user["bio"].required);
    }

    #[test]
    fn test_comment_annotations_on_type_literal() {
        let source = r#"
            type User = {
                // @MinLength(2) @Label('Name')
                name: string;
                /** @IsUrl() */
                homepage?: string;
            };
        "#;
        let doc = SchemaParser::default().parse_source(source).unwrap();
        let user = doc.model("User").unwrap();
        assert_eq!(user["name"].label.as_deref(), Some("Name"));
        assert_eq!(user["name"].validators.min_length, Some(ValidatorValue::from(2)));
        assert_eq!(user["homepage"].kind, FieldKind::Url);
    }

    #[test]
    fn test_decorators_override_comment_annotations() {
        let source = r#"
            class User {
                // @Label('From comment') @Min(1)
                @Label('From decorator')
                age: number;
            }
        "#;
        let doc = SchemaParser::default().parse_source(source).unwrap();
        let age = &doc.model("User").unwrap()["age"];
        assert_eq!(age.label.as_deref(), Some("From decorator"));
        assert_eq!(age.validators.min, Some(ValidatorValue::from(1)));
    }

    #[test]
    fn test_comment_annotations_can_be_disabled() {
        let parser = SchemaParser::new(ParserOptions::default().with_comment_annotations(false));
        let doc = parser
            .parse_source("type User = {\n  // @Label('Name')\n  name: string;\n};")
            .unwrap();
        assert_eq!(
            doc.model("User").unwrap()["name"],
            FieldDescriptor::leaf(FieldKind::String)
        );
    }
}
