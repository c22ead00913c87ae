//! Top-level declaration walk.
//!
//! One file is processed in a fixed order: imports, then enums, then
//! models (type aliases of object shapes, interfaces and classes). Enums go
//! first so references to them resolve as enums wherever they are declared
//! in the file.

use swc_ecma_ast::{
    Class, ClassExpr, Decl, DefaultDecl, Expr, Lit, Module, ModuleDecl, ModuleItem, Stmt, TsEnumDecl,
    TsEnumMemberId, TsInterfaceDecl, TsType, TsTypeAliasDecl,
};

use crate::ir::EnumSchema;
use crate::parser::classify::unwrap_parens;
use crate::parser::imports::ImportTable;
use crate::parser::SchemaResolver;
use crate::source::ParsedModule;

/// A top-level declaration the walker understands.
enum Declaration<'m> {
    Enum(&'m TsEnumDecl),
    Alias(&'m TsTypeAliasDecl),
    Interface(&'m TsInterfaceDecl),
    Class { name: String, class: &'m Class },
}

impl Declaration<'_> {
    fn name(&self) -> String {
        match self {
            Self::Enum(decl) => decl.id.sym.to_string(),
            Self::Alias(decl) => decl.id.sym.to_string(),
            Self::Interface(decl) => decl.id.sym.to_string(),
            Self::Class { name, .. } => name.clone(),
        }
    }
}

/// Collect declarations, including those inside export statements.
fn collect_declarations(module: &Module) -> Vec<Declaration<'_>> {
    let mut declarations = Vec::new();
    for item in &module.body {
        match item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => push_decl(decl, &mut declarations),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                push_decl(&export.decl, &mut declarations)
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => match &export.decl {
                DefaultDecl::Class(ClassExpr {
                    ident: Some(ident),
                    class,
                    ..
                }) => declarations.push(Declaration::Class {
                    name: ident.sym.to_string(),
                    class,
                }),
                DefaultDecl::TsInterfaceDecl(decl) => {
                    declarations.push(Declaration::Interface(decl))
                }
                _ => {}
            },
            _ => {}
        }
    }
    declarations
}

fn push_decl<'m>(decl: &'m Decl, declarations: &mut Vec<Declaration<'m>>) {
    match decl {
        Decl::TsEnum(decl) => declarations.push(Declaration::Enum(decl)),
        Decl::TsTypeAlias(decl) => declarations.push(Declaration::Alias(decl)),
        Decl::TsInterface(decl) => declarations.push(Declaration::Interface(decl)),
        Decl::Class(decl) => declarations.push(Declaration::Class {
            name: decl.ident.sym.to_string(),
            class: &decl.class,
        }),
        _ => {}
    }
}

/// Enum values in declaration order.
///
/// A string initializer gives the value; otherwise the member name is used.
pub fn enum_values(decl: &TsEnumDecl) -> EnumSchema {
    decl.members
        .iter()
        .map(|member| {
            if let Some(Expr::Lit(Lit::Str(value))) = member.init.as_deref() {
                return value.value.to_string();
            }
            match &member.id {
                TsEnumMemberId::Ident(ident) => ident.sym.to_string(),
                TsEnumMemberId::Str(s) => s.value.to_string(),
            }
        })
        .collect()
}

impl SchemaResolver<'_> {
    /// Walk a parsed file, registering its enums and models.
    ///
    /// Returns the number of enum, type alias, interface and class
    /// declarations found.
    pub fn walk(&mut self, parsed: &ParsedModule) -> usize {
        self.comments = parsed.comments.clone();
        self.imports = ImportTable::from_module(&parsed.module);

        let declarations = collect_declarations(&parsed.module);
        self.declared.extend(declarations.iter().map(Declaration::name));

        for declaration in &declarations {
            if let Declaration::Enum(decl) = declaration {
                self.register_enum(decl.id.sym.to_string(), enum_values(decl));
            }
        }

        for declaration in &declarations {
            match declaration {
                Declaration::Enum(_) => {}
                Declaration::Alias(decl) => self.walk_alias(decl),
                Declaration::Interface(decl) => {
                    let model = self.resolve_type_literal(&decl.body.body);
                    self.register_model(decl.id.sym.to_string(), model);
                }
                Declaration::Class { name, class } => {
                    let model = self.resolve_class_body(&class.body);
                    self.register_model(name.clone(), model);
                }
            }
        }

        tracing::info!(
            file = %self.file.display(),
            declarations = declarations.len(),
            models = self.document.models.len(),
            enums = self.document.enums.len(),
            imports = self.imports.len(),
            "Walked schema file"
        );

        declarations.len()
    }

    fn walk_alias(&mut self, decl: &TsTypeAliasDecl) {
        let name = decl.id.sym.to_string();
        match unwrap_parens(&decl.type_ann) {
            TsType::TsTypeLit(literal) => {
                let model = self.resolve_type_literal(&literal.members);
                self.register_model(name, model);
            }
            _ => tracing::debug!(alias = %name, "Skipping type alias that is not an object shape"),
        }
    }
}
