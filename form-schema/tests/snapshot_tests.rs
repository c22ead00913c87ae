//! Snapshot tests for generated form schema documents.
//!
//! Run `cargo insta review` to review and accept snapshot changes.

use std::path::PathBuf;

use form_schema::SchemaParser;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn snapshot_user_schema() {
    let doc = SchemaParser::default()
        .parse_file(fixtures_path().join("user.ts"))
        .unwrap();
    let json = doc.to_json_pretty().unwrap();

    insta::assert_snapshot!("user_schema", json);
}

#[test]
fn snapshot_enum_and_model_inline() {
    let doc = SchemaParser::default()
        .parse_source("enum Role { ADMIN, USER }\ntype U = { role: Role; tags?: string[] };")
        .unwrap();

    insta::assert_snapshot!(doc.to_json_pretty().unwrap(), @r#"
    {
      "models": {
        "U": {
          "role": {
            "kind": "enum",
            "reference": "Role",
            "required": true
          },
          "tags": {
            "kind": "array",
            "reference": "string",
            "required": false
          }
        }
      },
      "enums": {
        "Role": [
          "ADMIN",
          "USER"
        ]
      }
    }
    "#);
}
