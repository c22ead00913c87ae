//! Parser configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default cross-file recursion bound.
pub const DEFAULT_MAX_IMPORT_DEPTH: usize = 5;

/// Options controlling one schema parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Enable decorator syntax in the source parser.
    pub decorators: bool,

    /// Read `@Name(args)` annotations from leading comments.
    pub comment_annotations: bool,

    /// Maximum depth of nested cross-file resolution.
    pub max_import_depth: usize,

    /// Directory relative imports of inline sources resolve against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            decorators: true,
            comment_annotations: true,
            max_import_depth: DEFAULT_MAX_IMPORT_DEPTH,
            base_dir: None,
        }
    }
}

impl ParserOptions {
    /// Set the cross-file recursion bound.
    pub fn with_max_import_depth(mut self, depth: usize) -> Self {
        self.max_import_depth = depth;
        self
    }

    /// Set the base directory for inline sources.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Enable or disable comment annotations.
    pub fn with_comment_annotations(mut self, enabled: bool) -> Self {
        self.comment_annotations = enabled;
        self
    }
}
