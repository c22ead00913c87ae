//! Import tables and cross-file reference resolution.
//!
//! After a file's local pass, any reference naming neither a local model nor
//! a local enum is looked up in the file's import table. The imported file
//! is parsed by a nested resolver one level deeper, and the requested
//! definition (plus the models it depends on) is adopted into the current
//! document.
//!
//! Resolution is sequential and bounded three ways:
//! - depth: nesting beyond `max_import_depth` stops with a warning
//! - in-progress files: a file is never re-entered while it is resolving
//! - cache: a finished file is reused while it was resolved at the same or a
//!   shallower depth than the one it is reached at again
//!
//! Every miss is logged and leaves the reference dangling.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use swc_ecma_ast::{ImportSpecifier, Module, ModuleDecl, ModuleExportName, ModuleItem};

use crate::ir::document::model_references;
use crate::ir::{FieldDescriptor, FieldKind, FormSchemaDocument, Reference};
use crate::parser::SchemaResolver;
use crate::source::{SourceLoader, SourceParser};

/// Extensions tried for an import specifier without one.
const CANDIDATE_SUFFIXES: &[&str] = &[".ts", ".tsx", ".d.ts", "/index.ts", "/index.tsx"];

/// Which export an import binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedName {
    /// `import { Name }` or `import { Name as Local }`
    Named(String),

    /// `import Local from '...'`
    Default,
}

/// One imported local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    /// Module specifier as written, e.g. `./address`
    pub source: String,

    /// The export it binds
    pub imported: ImportedName,
}

/// Local name to import entry for one file.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    entries: HashMap<String, ImportEntry>,
}

impl ImportTable {
    /// Collect the named and default imports of a module.
    ///
    /// Namespace imports are not recorded; qualified references through
    /// them are not resolved.
    pub fn from_module(module: &Module) -> Self {
        let mut entries = HashMap::new();
        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                continue;
            };
            let source = import.src.value.to_string();
            for specifier in &import.specifiers {
                match specifier {
                    ImportSpecifier::Named(named) => {
                        let local = named.local.sym.to_string();
                        let imported = match &named.imported {
                            Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                            Some(ModuleExportName::Str(s)) => s.value.to_string(),
                            None => local.clone(),
                        };
                        entries.insert(
                            local,
                            ImportEntry {
                                source: source.clone(),
                                imported: ImportedName::Named(imported),
                            },
                        );
                    }
                    ImportSpecifier::Default(default) => {
                        entries.insert(
                            default.local.sym.to_string(),
                            ImportEntry {
                                source: source.clone(),
                                imported: ImportedName::Default,
                            },
                        );
                    }
                    ImportSpecifier::Namespace(_) => {}
                }
            }
        }
        Self { entries }
    }

    /// Look up a local name.
    pub fn get(&self, local: &str) -> Option<&ImportEntry> {
        self.entries.get(local)
    }

    /// Number of imported names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is imported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lexically normalize a path: drop `.` and fold `..` into its parent.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Locate the file a relative specifier refers to.
///
/// Only `./` and `../` specifiers resolve. The path is tried as written,
/// with `.js` mapped to `.ts`, and then with each candidate suffix.
pub fn resolve_specifier(from: &Path, specifier: &str, loader: &dyn SourceLoader) -> Option<PathBuf> {
    if !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return None;
    }

    let dir = from.parent().unwrap_or_else(|| Path::new(""));
    let base = normalize_path(&dir.join(specifier));

    let mut candidates = vec![base.clone()];
    if base.extension().is_some_and(|ext| ext == "js") {
        candidates.push(base.with_extension("ts"));
    }
    for suffix in CANDIDATE_SUFFIXES {
        let mut path = OsString::from(base.as_os_str());
        path.push(suffix);
        candidates.push(PathBuf::from(path));
    }

    candidates.into_iter().find(|candidate| loader.exists(candidate))
}

/// Shared state of one top-level parse.
pub(crate) struct ImportSession {
    pub(crate) source: SourceParser,
    in_progress: HashSet<PathBuf>,
    /// Finished files with the depth they were resolved at
    cache: HashMap<PathBuf, (usize, FormSchemaDocument)>,
}

impl ImportSession {
    pub(crate) fn new(source: SourceParser) -> Self {
        Self {
            source,
            in_progress: HashSet::new(),
            cache: HashMap::new(),
        }
    }

    /// Mark a file as resolving.
    pub(crate) fn enter(&mut self, path: &Path) {
        self.in_progress.insert(path.to_path_buf());
    }

    fn leave(&mut self, path: &Path, depth: usize, document: FormSchemaDocument) {
        self.in_progress.remove(path);
        self.cache.insert(path.to_path_buf(), (depth, document));
    }
}

impl SchemaResolver<'_> {
    /// Resolve dangling references through the import table.
    ///
    /// Each dangling name is attempted once, in order of first appearance.
    /// Adopted models can introduce further dangling names, which are
    /// attempted in turn.
    pub(crate) fn resolve_imports(&mut self, session: &mut ImportSession) {
        let mut attempted = HashSet::new();
        loop {
            let next = self
                .document
                .dangling_references()
                .into_iter()
                .find(|name| !attempted.contains(name));
            let Some(name) = next else {
                break;
            };
            attempted.insert(name.clone());
            self.resolve_import(&name, session);
        }
    }

    fn resolve_import(&mut self, name: &str, session: &mut ImportSession) {
        let Some(entry) = self.imports.get(name).cloned() else {
            tracing::warn!(
                file = %self.file.display(),
                reference = name,
                "Unresolved reference is neither declared nor imported"
            );
            return;
        };

        let max_depth = self.parser.options().max_import_depth;
        if self.depth >= max_depth {
            tracing::warn!(
                file = %self.file.display(),
                reference = name,
                max_depth,
                "Import depth exceeded, leaving reference unresolved"
            );
            return;
        }

        let Some(path) = resolve_specifier(&self.file, &entry.source, session.source.loader())
        else {
            tracing::warn!(
                file = %self.file.display(),
                reference = name,
                specifier = %entry.source,
                "Cannot locate imported module"
            );
            return;
        };

        let Some(imported) = self.load_imported(&path, session) else {
            return;
        };

        let export_name = match &entry.imported {
            ImportedName::Named(imported) => imported.as_str(),
            ImportedName::Default => name,
        };
        if !self.adopt(name, export_name, &imported) {
            tracing::warn!(
                file = %self.file.display(),
                reference = name,
                module = %path.display(),
                "Imported module does not declare the referenced name"
            );
        }
    }

    /// Parse and resolve an imported file, or reuse its cached result.
    ///
    /// A cached result built deeper than `self.depth + 1` may have had its
    /// own imports cut off by the depth bound, so it is resolved again.
    fn load_imported(&self, path: &Path, session: &mut ImportSession) -> Option<FormSchemaDocument> {
        let depth = self.depth + 1;
        if let Some((cached_depth, document)) = session.cache.get(path) {
            if *cached_depth <= depth {
                return Some(document.clone());
            }
            tracing::debug!(
                module = %path.display(),
                cached_depth,
                depth,
                "Re-resolving module reached at a shallower depth"
            );
        }
        if session.in_progress.contains(path) {
            tracing::debug!(module = %path.display(), "Import cycle, module already resolving");
            return None;
        }

        let parsed = match session.source.parse_file(path) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(module = %path.display(), error = %e, "Failed to parse imported module");
                return None;
            }
        };

        session.enter(path);
        let mut nested = SchemaResolver::new(self.parser, path.to_path_buf(), depth);
        nested.walk(&parsed);
        nested.resolve_imports(session);
        let document = nested.into_document();
        session.leave(path, depth, document.clone());
        Some(document)
    }

    /// Copy `export_name` from `imported` under the name `local`.
    ///
    /// Models it references that `imported` defines come along under their
    /// own names. Returns `false` when `imported` defines no such name.
    fn adopt(&mut self, local: &str, export_name: &str, imported: &FormSchemaDocument) -> bool {
        if let Some(values) = imported.enum_values(export_name) {
            self.adopt_enum(local, values.clone());
            return true;
        }

        let Some(model) = imported.model(export_name) else {
            return false;
        };
        self.document.models.insert(local.to_string(), model.clone());

        let mut pending = model_references(model);
        while let Some(dependency) = pending.pop() {
            if self.document.defines(&dependency) {
                if imported.defines(&dependency)
                    && !same_definition(&self.document, imported, &dependency)
                {
                    tracing::warn!(
                        file = %self.file.display(),
                        reference = %dependency,
                        adopted = local,
                        "Adopted model depends on a name defined differently here, keeping the local definition"
                    );
                }
                continue;
            }
            if let Some(values) = imported.enum_values(&dependency) {
                self.adopt_enum(&dependency, values.clone());
            } else if let Some(model) = imported.model(&dependency) {
                self.document.models.insert(dependency.clone(), model.clone());
                pending.extend(model_references(model));
            }
        }
        true
    }

    /// Register an adopted enum and retarget object references to it.
    fn adopt_enum(&mut self, name: &str, values: Vec<String>) {
        self.document.enums.insert(name.to_string(), values);
        for model in self.document.models.values_mut() {
            for field in model.values_mut() {
                retarget_enum(field, name);
            }
        }
    }
}

/// Whether `name` is the same model or enum in both documents.
fn same_definition(local: &FormSchemaDocument, imported: &FormSchemaDocument, name: &str) -> bool {
    local.model(name) == imported.model(name) && local.enum_values(name) == imported.enum_values(name)
}

/// Turn `{kind: "object", reference: name}` into an enum reference.
fn retarget_enum(field: &mut FieldDescriptor, name: &str) {
    let targets_name = field.reference.as_ref().and_then(Reference::as_name) == Some(name);
    if field.kind == FieldKind::Object && targets_name {
        field.kind = FieldKind::Enum;
        return;
    }
    match &mut field.reference {
        Some(Reference::Field(inner)) => retarget_enum(inner, name),
        Some(Reference::Shape(shape)) => {
            for inner in shape.values_mut() {
                retarget_enum(inner, name);
            }
        }
        _ => {}
    }
}
