//! TypeScript source loading and parsing.
//!
//! This is the boundary to the external parser: [`SourceParser`] turns
//! source text or a file into a [`ParsedModule`] (swc syntax tree plus the
//! leading-comment store used for comment annotations). File reads go
//! through a [`SourceLoader`] so the engine can run over in-memory sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use swc_common::comments::SingleThreadedComments;
use swc_common::{sync::Lrc, FileName, SourceMap, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};

use crate::error::{SchemaError, SchemaResult};

/// Reads source files.
pub trait SourceLoader: Send + Sync {
    /// Read a file's contents.
    fn read(&self, path: &Path) -> std::io::Result<String>;

    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// Reads from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn read(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Serves sources from memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn insert(&mut self, path: impl AsRef<Path>, source: impl Into<String>) {
        self.files
            .insert(crate::parser::imports::normalize_path(path.as_ref()), source.into());
    }

    /// Builder-style [`MemoryLoader::insert`].
    pub fn with_file(mut self, path: impl AsRef<Path>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn read(&self, path: &Path) -> std::io::Result<String> {
        self.files
            .get(&crate::parser::imports::normalize_path(path))
            .cloned()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                )
            })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .contains_key(&crate::parser::imports::normalize_path(path))
    }
}

/// A parsed source file.
pub struct ParsedModule {
    /// The syntax tree
    pub module: Module,

    /// Comments collected while lexing
    pub comments: SingleThreadedComments,

    /// Path the source was read from (or the virtual path of inline source)
    pub path: PathBuf,
}

impl std::fmt::Debug for ParsedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedModule")
            .field("path", &self.path)
            .field("items", &self.module.body.len())
            .finish()
    }
}

/// Parses TypeScript sources with swc.
///
/// One parser (and one source map) serves a whole top-level parse,
/// including every file reached through imports.
pub struct SourceParser {
    source_map: Lrc<SourceMap>,
    loader: Arc<dyn SourceLoader>,
    decorators: bool,
}

impl SourceParser {
    /// Create a parser reading files through `loader`.
    pub fn new(loader: Arc<dyn SourceLoader>, decorators: bool) -> Self {
        Self {
            source_map: Lrc::new(SourceMap::default()),
            loader,
            decorators,
        }
    }

    /// Create a parser over the file system with decorators enabled.
    pub fn with_fs() -> Self {
        Self::new(Arc::new(FsLoader), true)
    }

    /// The loader used for file reads.
    pub fn loader(&self) -> &dyn SourceLoader {
        self.loader.as_ref()
    }

    /// Read and parse a file.
    pub fn parse_file(&self, path: &Path) -> SchemaResult<ParsedModule> {
        let source = self
            .loader
            .read(path)
            .map_err(|e| SchemaError::io(path.to_path_buf(), e))?;
        self.parse(&source, path)
    }

    /// Parse source text; `path` names it in errors and selects `.tsx`.
    pub fn parse(&self, source: &str, path: &Path) -> SchemaResult<ParsedModule> {
        let file_name: Lrc<FileName> = FileName::Real(path.to_path_buf()).into();
        let fm = self.source_map.new_source_file(file_name, source.to_string());

        let is_tsx = path.extension().and_then(|e| e.to_str()) == Some("tsx");
        let syntax = Syntax::Typescript(TsSyntax {
            tsx: is_tsx,
            decorators: self.decorators,
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let (result, recovered) = {
            let lexer = Lexer::new(
                syntax,
                Default::default(),
                StringInput::from(&*fm),
                Some(&comments),
            );
            let mut parser = Parser::new_from(lexer);
            let result = parser.parse_module();
            (result, parser.take_errors())
        };

        let module = result.map_err(|e| self.syntax_error(path, &e))?;

        for error in &recovered {
            let loc = self.source_map.lookup_char_pos(error.span().lo);
            tracing::debug!(
                file = %path.display(),
                line = loc.line,
                message = %error.kind().msg(),
                "Recovered from syntax error"
            );
        }

        Ok(ParsedModule {
            module,
            comments,
            path: path.to_path_buf(),
        })
    }

    fn syntax_error(&self, path: &Path, error: &swc_ecma_parser::error::Error) -> SchemaError {
        let loc = self.source_map.lookup_char_pos(error.span().lo);
        SchemaError::syntax(
            path.to_path_buf(),
            loc.line,
            loc.col.0 + 1,
            error.kind().msg(),
        )
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::with_fs()
    }
}
