//! Built-in field kinds.
//!
//! Generic aliases that carry validation parameters positionally:
//!
//! | Alias | Parameters |
//! |-------|------------|
//! | `StringField` | minLength, maxLength, pattern, message, label |
//! | `NumberField` | min, max, message, label |
//! | `EmailField` | message, label |
//! | `StructField` | shape, message, label |
//!
//! Only literal parameters are read; any other parameter leaves its slot
//! empty.

use swc_ecma_ast::{TsEntityName, TsLit, TsType};

use crate::ir::{FieldDescriptor, FieldKind, ModelSchema, Reference, ValidatorKind, ValidatorValue, Validators};
use crate::parser::SchemaResolver;

/// Read the literal at `index`, if present.
fn literal_param(params: &[Box<TsType>], index: usize) -> Option<ValidatorValue> {
    let param = params.get(index)?;
    let TsType::TsLitType(literal) = &**param else {
        tracing::debug!(position = index, "Skipping non-literal field parameter");
        return None;
    };
    match &literal.lit {
        TsLit::Number(n) => ValidatorValue::number(n.value),
        TsLit::Str(s) => Some(ValidatorValue::Text(s.value.to_string())),
        TsLit::Bool(b) => Some(ValidatorValue::Flag(b.value)),
        _ => None,
    }
}

fn label_param(params: &[Box<TsType>], index: usize) -> Option<String> {
    literal_param(params, index).map(|value| match value {
        ValidatorValue::Text(text) => text,
        other => other.to_string(),
    })
}

fn field_with(kind: FieldKind, validators: Validators, label: Option<String>) -> FieldDescriptor {
    let mut field = FieldDescriptor::leaf(kind).with_validators(validators);
    field.label = label;
    field
}

/// `StringField<minLength, maxLength, pattern, message, label>`
pub fn string_field(_resolver: &mut SchemaResolver<'_>, params: &[Box<TsType>]) -> FieldDescriptor {
    let mut validators = Validators::new();
    validators.set_opt(ValidatorKind::MinLength, literal_param(params, 0));
    validators.set_opt(ValidatorKind::MaxLength, literal_param(params, 1));
    validators.set_opt(ValidatorKind::Pattern, literal_param(params, 2));
    validators.set_opt(ValidatorKind::Message, literal_param(params, 3));
    field_with(FieldKind::String, validators, label_param(params, 4))
}

/// `NumberField<min, max, message, label>`
pub fn number_field(_resolver: &mut SchemaResolver<'_>, params: &[Box<TsType>]) -> FieldDescriptor {
    let mut validators = Validators::new();
    validators.set_opt(ValidatorKind::Min, literal_param(params, 0));
    validators.set_opt(ValidatorKind::Max, literal_param(params, 1));
    validators.set_opt(ValidatorKind::Message, literal_param(params, 2));
    field_with(FieldKind::Number, validators, label_param(params, 3))
}

/// `EmailField<message, label>`
pub fn email_field(_resolver: &mut SchemaResolver<'_>, params: &[Box<TsType>]) -> FieldDescriptor {
    let mut validators = Validators::new();
    validators.set_opt(ValidatorKind::Message, literal_param(params, 0));
    field_with(FieldKind::Email, validators, label_param(params, 1))
}

/// `StructField<shape, message, label>`
///
/// An inline shape becomes the reference; a named type is referenced by
/// name. Without a shape the reference is an empty shape.
pub fn struct_field(resolver: &mut SchemaResolver<'_>, params: &[Box<TsType>]) -> FieldDescriptor {
    let target = match params.first().map(|param| &**param) {
        Some(TsType::TsTypeLit(literal)) => {
            Reference::Shape(resolver.resolve_type_literal(&literal.members))
        }
        Some(TsType::TsTypeRef(type_ref)) => match &type_ref.type_name {
            TsEntityName::Ident(ident) => Reference::Name(ident.sym.to_string()),
            _ => Reference::Shape(ModelSchema::new()),
        },
        _ => Reference::Shape(ModelSchema::new()),
    };

    let mut validators = Validators::new();
    validators.set_opt(ValidatorKind::Message, literal_param(params, 1));

    let mut field = FieldDescriptor::object(target).with_validators(validators);
    field.label = label_param(params, 2);
    field
}
