//! Property-based tests for form-schema.
//!
//! Properties tested:
//! - Property 1: Keyword Classification
//! - Property 2: Nested Array Depth
//! - Property 3: Optional Marker Determines Required
//! - Property 4: Enum Declaration Order
//! - Property 5: JSON Round-Trip
//! - Property 6: Reference Invariant

use proptest::prelude::*;

use form_schema::{FieldDescriptor, FieldKind, FormSchemaDocument, SchemaParser, ValidatorValue};

// =============================================================================
// Generators for property tests
// =============================================================================

const KEYWORDS: &[&str] = &[
    "string", "number", "boolean", "any", "bigint", "symbol", "null", "undefined", "never",
    "void",
];

/// Generate a property name that cannot collide with a keyword.
fn arb_property() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}".prop_map(|s| format!("f_{}", s))
}

/// Generate distinct property names with optional markers.
fn arb_properties() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::btree_map(arb_property(), any::<bool>(), 1..8)
        .prop_map(|fields| fields.into_iter().collect())
}

/// Generate distinct enum member names, shuffled.
fn arb_members() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("M[A-Z0-9]{0,6}", 1..8)
        .prop_map(|members| members.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Generate a property type expression.
fn arb_type() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(KEYWORDS).prop_map(str::to_string),
        (0u32..1000, 0u32..1000).prop_map(|(a, b)| format!("StringField<{}, {}>", a, b)),
        (0u32..1000, "[a-z ]{0,12}").prop_map(|(a, m)| format!("NumberField<{}, 1000, '{}'>", a, m)),
        Just("EmailField<'Invalid email', 'Email'>".to_string()),
        Just("Role".to_string()),
        Just("Role[]".to_string()),
        Just("Other".to_string()),
        Just("string[][]".to_string()),
        Just("{ street: string; zip?: number }[]".to_string()),
        Just("StructField<{ line: string }, 'Required'>".to_string()),
    ]
}

fn model_source(name: &str, fields: &[(String, bool)], ty: &str) -> String {
    let body: Vec<String> = fields
        .iter()
        .map(|(field, optional)| format!("{}{}: {};", field, if *optional { "?" } else { "" }, ty))
        .collect();
    format!("type {} = {{ {} }};", name, body.join(" "))
}

fn parse(source: &str) -> FormSchemaDocument {
    SchemaParser::default().parse_source(source).unwrap()
}

// =============================================================================
// Property 1: Keyword Classification
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_keyword_classification(keyword in prop::sample::select(KEYWORDS), name in arb_property()) {
        let doc = parse(&format!("type T = {{ {}: {} }};", name, keyword));
        let field = &doc.model("T").unwrap()[name.as_str()];

        prop_assert_eq!(field.kind.as_str(), keyword);
        prop_assert!(field.reference.is_none());
    }
}

// =============================================================================
// Property 2: Nested Array Depth
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_nested_array_depth(depth in 1usize..7, keyword in prop::sample::select(KEYWORDS)) {
        let ty = format!("{}{}", keyword, "[]".repeat(depth));
        let doc = parse(&format!("type T = {{ x: {} }};", ty));

        let mut expected = FieldDescriptor::array(keyword);
        for _ in 1..depth {
            expected = FieldDescriptor::array(expected);
        }
        prop_assert_eq!(&doc.model("T").unwrap()["x"], &expected);
    }
}

// =============================================================================
// Property 3: Optional Marker Determines Required
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_optional_marker_determines_required(
        fields in arb_properties(),
        ty in arb_type(),
    ) {
        let source = format!("enum Role {{ A, B }}\n{}", model_source("T", &fields, &ty));
        let doc = parse(&source);
        let model = doc.model("T").unwrap();

        prop_assert_eq!(model.len(), fields.len());
        for (name, optional) in &fields {
            prop_assert_eq!(model[name.as_str()].required, !optional);
        }
    }
}

// =============================================================================
// Property 4: Enum Declaration Order
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_enum_order(members in arb_members(), enum_first in any::<bool>()) {
        let declaration = format!("enum Kind {{ {} }}", members.join(", "));
        let model = "type U = { kind: Kind };";
        let source = if enum_first {
            format!("{}\n{}", declaration, model)
        } else {
            format!("{}\n{}", model, declaration)
        };

        let doc = parse(&source);
        prop_assert_eq!(doc.enum_values("Kind").unwrap(), &members);
        prop_assert_eq!(&doc.model("U").unwrap()["kind"], &FieldDescriptor::enumeration("Kind"));
    }
}

// =============================================================================
// Property 5: JSON Round-Trip
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_json_round_trip(fields in arb_properties(), ty in arb_type()) {
        let source = format!("enum Role {{ A, B }}\n{}", model_source("T", &fields, &ty));
        let doc = parse(&source);

        let json = doc.to_json_pretty().unwrap();
        let back = FormSchemaDocument::from_json(&json).unwrap();
        prop_assert_eq!(back, doc);
    }

    #[test]
    fn prop_numeric_validators_stay_integers(min in 0u32..100_000, max in 0u32..100_000) {
        let doc = parse(&format!("type T = {{ x: NumberField<{}, {}> }};", min, max));
        let json = doc.to_json().unwrap();

        let back = FormSchemaDocument::from_json(&json).unwrap();
        let field = &back.model("T").unwrap()["x"];
        prop_assert_eq!(field.validators.min.clone(), Some(ValidatorValue::from(i64::from(min))));
        prop_assert_eq!(field.validators.max.clone(), Some(ValidatorValue::from(i64::from(max))));
        prop_assert!(!json.contains(".0"));
    }
}

// =============================================================================
// Property 6: Reference Invariant
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_reference_invariant(fields in arb_properties(), ty in arb_type()) {
        let source = format!("enum Role {{ A, B }}\n{}", model_source("T", &fields, &ty));
        let doc = parse(&source);

        for model in doc.models.values() {
            for field in model.values() {
                prop_assert!(field.is_consistent());
                prop_assert_eq!(
                    field.reference.is_some(),
                    matches!(field.kind, FieldKind::Array | FieldKind::Object | FieldKind::Enum)
                );
            }
        }
    }
}
