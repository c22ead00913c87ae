//! Schema compilation.
//!
//! Runs the schema engine on the root file and renders the document as JSON.

use std::path::Path;

use form_schema::{FormSchemaDocument, SchemaParser};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// A compiled schema document and its rendered JSON.
#[derive(Debug, Clone)]
pub struct CompiledOutput {
    /// The schema document.
    pub document: FormSchemaDocument,

    /// JSON text to write.
    pub content: String,
}

impl CompiledOutput {
    /// Number of models in the document.
    pub fn model_count(&self) -> usize {
        self.document.models.len()
    }

    /// Number of enums in the document.
    pub fn enum_count(&self) -> usize {
        self.document.enums.len()
    }

    /// References left unresolved.
    pub fn dangling(&self) -> Vec<String> {
        self.document.dangling_references()
    }
}

/// Compiles TypeScript files into schema documents.
#[derive(Debug, Clone)]
pub struct SchemaCompiler {
    parser: SchemaParser,
    pretty: bool,
}

impl SchemaCompiler {
    /// Create a compiler from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            parser: SchemaParser::new(config.parser.clone()),
            pretty: config.output.pretty,
        }
    }

    /// Compile the root file at `input`.
    pub fn compile(&self, input: &Path) -> CliResult<CompiledOutput> {
        let document = self.parser.parse_file(input)?;
        let content = if self.pretty {
            let mut json = document.to_json_pretty()?;
            json.push('\n');
            json
        } else {
            document.to_json()?
        };

        Ok(CompiledOutput { document, content })
    }

    /// Compare a compiled document with an existing JSON file's content.
    ///
    /// Formatting is ignored. Content that is not valid JSON is out of date.
    pub fn is_up_to_date(output: &CompiledOutput, existing: &str) -> bool {
        let Ok(existing) = serde_json::from_str::<serde_json::Value>(existing) else {
            return false;
        };
        serde_json::to_value(&output.document).is_ok_and(|current| current == existing)
    }

    /// Compile `input` and compare it with the schema file at `schema_path`.
    pub fn check(&self, input: &Path, schema_path: &Path) -> CliResult<()> {
        if !schema_path.exists() {
            return Err(CliError::Validation(format!(
                "Schema file not found: {}",
                schema_path.display()
            )));
        }

        let existing = std::fs::read_to_string(schema_path)?;
        let output = self.compile(input)?;

        if Self::is_up_to_date(&output, &existing) {
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} is out of date",
                schema_path.display()
            )))
        }
    }
}
