//! Error types for the schema engine.
//!
//! Most problems the engine meets are not errors at all: unrecognized
//! declarations, members and type nodes are skipped, and unresolvable
//! references are left dangling. The variants here cover the few cases
//! that are reported to a caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Main error type for the schema engine.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Failed to read a source file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TypeScript parser rejected the source.
    #[error("Syntax error in {file}:{line}:{column}: {message}")]
    Syntax {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The root file holds no enum, type alias, interface or class declarations.
    #[error("No type, interface, class or enum declarations found in {file}")]
    NoDeclarations { file: PathBuf },

    /// JSON (de)serialization of a schema document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    /// Create a syntax error with location information.
    pub fn syntax(file: PathBuf, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            file,
            line,
            column,
            message: message.into(),
        }
    }

    /// Create an IO error for the given path.
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }

    /// Create a no declarations error.
    pub fn no_declarations(file: PathBuf) -> Self {
        Self::NoDeclarations { file }
    }
}
