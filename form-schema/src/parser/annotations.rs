//! Decorator and comment annotation extraction.
//!
//! Per-property metadata comes in two syntactic forms that fold the same
//! way:
//!
//! ```text
//! class User {
//!   @MinLength(2) @Label('Name')
//!   name: string;
//! }
//!
//! type User = {
//!   // @MinLength(2) @Label('Name')
//!   name: string;
//! };
//! ```
//!
//! Both become a list of [`Annotation`]s, folded in declaration order into a
//! single [`FieldOverrides`]. Validators, label and required are
//! last-write-wins; the kind override is first-write-wins.

use std::sync::LazyLock;

use regex::Regex;
use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{CallExpr, Callee, Decorator, Expr, Lit, UnaryExpr, UnaryOp};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::ir::{FieldDescriptor, FieldKind, ValidatorKind, ValidatorValue, Validators};

/// `@Name` not preceded by a word character (so `user@example.com` is not
/// an annotation).
static ANNOTATION_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w.@])@([A-Za-z_][A-Za-z0-9_]*)"));

/// One annotation with literal arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Decorator name, e.g. `MinLength`
    pub name: String,

    /// Literal arguments in order
    pub args: Vec<ValidatorValue>,
}

impl Annotation {
    /// Create an annotation.
    pub fn new(name: impl Into<String>, args: Vec<ValidatorValue>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Read a decorator.
    ///
    /// Accepts `@Name(...)` with an identifier callee and bare `@Name`.
    /// Returns `None` when any argument is not a literal, which skips this
    /// decorator only.
    pub fn from_decorator(decorator: &Decorator) -> Option<Self> {
        match &*decorator.expr {
            Expr::Ident(ident) => Some(Self::new(ident.sym.to_string(), Vec::new())),
            Expr::Call(call) => Self::from_call(call),
            _ => None,
        }
    }

    /// Read a call `Name(arg, ...)` whose arguments are all literals.
    fn from_call(call: &CallExpr) -> Option<Self> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let Expr::Ident(ident) = &**callee else {
            tracing::debug!("Skipping decorator with non-identifier callee");
            return None;
        };
        let name = ident.sym.to_string();

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            let value = if arg.spread.is_some() {
                None
            } else {
                expr_literal(&arg.expr)
            };
            match value {
                Some(value) => args.push(value),
                None => {
                    tracing::debug!(
                        decorator = %name,
                        "Skipping decorator with non-literal argument"
                    );
                    return None;
                }
            }
        }
        Some(Self::new(name, args))
    }

    fn arg(&self, index: usize) -> Option<&ValidatorValue> {
        self.args.get(index)
    }
}

/// Convert a literal expression into a value.
///
/// Strings, numbers (including negated numbers), booleans and regex
/// literals (their pattern text) are literals.
pub fn expr_literal(expr: &Expr) -> Option<ValidatorValue> {
    match expr {
        Expr::Lit(Lit::Str(s)) => Some(ValidatorValue::Text(s.value.to_string())),
        Expr::Lit(Lit::Num(n)) => ValidatorValue::number(n.value),
        Expr::Lit(Lit::Bool(b)) => Some(ValidatorValue::Flag(b.value)),
        Expr::Lit(Lit::Regex(r)) => Some(ValidatorValue::Text(r.exp.to_string())),
        Expr::Unary(UnaryExpr {
            op: UnaryOp::Minus,
            arg,
            ..
        }) => match &**arg {
            Expr::Lit(Lit::Num(n)) => ValidatorValue::number(-n.value),
            _ => None,
        },
        Expr::Paren(paren) => expr_literal(&paren.expr),
        _ => None,
    }
}

/// Extract annotations from the text of one comment.
///
/// `@Name(args)` is read with the same expression grammar as a decorator,
/// so quoting, escapes and regex literals behave identically in both forms.
pub fn parse_comment(text: &str) -> Vec<Annotation> {
    let pattern = match &*ANNOTATION_PATTERN {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!(error = %e, "Annotation pattern failed to compile");
            return Vec::new();
        }
    };

    let mut annotations = Vec::new();
    for captures in pattern.captures_iter(text) {
        let Some(name) = captures.get(1) else {
            continue;
        };

        if !text[name.end()..].trim_start().starts_with('(') {
            annotations.push(Annotation::new(name.as_str(), Vec::new()));
            continue;
        }

        match parse_call(&text[name.start()..]) {
            Some(call) => {
                if let Some(annotation) = Annotation::from_call(&call) {
                    annotations.push(annotation);
                }
            }
            None => {
                tracing::debug!(annotation = name.as_str(), "Unterminated annotation arguments")
            }
        }
    }
    annotations
}

/// Parse the shortest prefix of `text` that is a complete call expression.
///
/// Each `)` is tried as the end of the call in turn; the first prefix that
/// parses cleanly into a call spanning all of it is the matching one.
fn parse_call(text: &str) -> Option<CallExpr> {
    text.match_indices(')')
        .find_map(|(index, _)| parse_call_exact(&text[..=index]))
}

fn parse_call_exact(source: &str) -> Option<CallExpr> {
    let start = BytePos(1);
    let end = BytePos(1 + u32::try_from(source.len()).ok()?);

    let mut parser = Parser::new(
        Syntax::Typescript(TsSyntax::default()),
        StringInput::new(source, start, end),
        None,
    );
    let expr = parser.parse_expr().ok()?;
    if !parser.take_errors().is_empty() || expr.span().hi != end {
        return None;
    }

    match *expr {
        Expr::Call(call) => Some(call),
        _ => None,
    }
}

/// The folded result of a property's annotations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOverrides {
    /// Kind set by a type decorator
    pub kind: Option<FieldKind>,

    /// Explicit required flag
    pub required: Option<bool>,

    /// Label
    pub label: Option<String>,

    /// Validators
    pub validators: Validators,
}

impl FieldOverrides {
    /// Fold annotations in declaration order.
    pub fn fold(annotations: &[Annotation]) -> Self {
        let mut overrides = Self::default();
        for annotation in annotations {
            overrides.apply(annotation);
        }
        overrides
    }

    fn apply(&mut self, annotation: &Annotation) {
        let validator = match annotation.name.as_str() {
            "Min" => Some(ValidatorKind::Min),
            "Max" => Some(ValidatorKind::Max),
            "MinLength" => Some(ValidatorKind::MinLength),
            "MaxLength" => Some(ValidatorKind::MaxLength),
            "Pattern" => Some(ValidatorKind::Pattern),
            "Message" => Some(ValidatorKind::Message),
            _ => None,
        };

        if let Some(kind) = validator {
            match annotation.arg(0) {
                Some(value) => self.validators.set(kind, value.clone()),
                None => tracing::debug!(
                    annotation = %annotation.name,
                    "Skipping validator annotation without argument"
                ),
            }
            return;
        }

        match annotation.name.as_str() {
            "Length" => {
                self.validators
                    .set_opt(ValidatorKind::MinLength, annotation.arg(0).cloned());
                self.validators
                    .set_opt(ValidatorKind::MaxLength, annotation.arg(1).cloned());
            }
            "IsEmail" => self.set_kind(FieldKind::Email),
            "IsUrl" | "IsURL" => self.set_kind(FieldKind::Url),
            "Required" => {
                self.required = Some(annotation.arg(0).and_then(ValidatorValue::as_bool).unwrap_or(true));
            }
            "Label" => match annotation.arg(0) {
                Some(ValidatorValue::Text(label)) => self.label = Some(label.clone()),
                Some(other) => self.label = Some(other.to_string()),
                None => tracing::debug!("Skipping Label annotation without argument"),
            },
            _ => {}
        }
    }

    fn set_kind(&mut self, kind: FieldKind) {
        if self.kind.is_none() {
            self.kind = Some(kind);
        }
    }

    /// Merge the overrides into a structurally derived field.
    pub fn apply_to(&self, field: &mut FieldDescriptor) {
        if let Some(kind) = &self.kind {
            field.override_kind(kind.clone());
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(label) = &self.label {
            field.label = Some(label.clone());
        }
        field.validators.merge(&self.validators);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceParser;
    use std::path::Path;
    use swc_ecma_ast::{ClassMember, Decl, ModuleItem, Stmt};

    fn decorators_of(source: &str) -> Vec<Option<Annotation>> {
        let parsed = SourceParser::default()
            .parse(source, Path::new("test.ts"))
            .unwrap();
        let ModuleItem::Stmt(Stmt::Decl(Decl::Class(class))) = &parsed.module.body[0] else {
            panic!("expected a class");
        };
        let ClassMember::ClassProp(prop) = &class.class.body[0] else {
            panic!("expected a property");
        };
        prop.decorators.iter().map(Annotation::from_decorator).collect()
    }

    #[test]
    fn test_decorator_literals() {
        let annotations = decorators_of(
            "class A { @Min(-5) @Pattern(/^a+$/) @Label('Age') @Required(false) @IsEmail x: number; }",
        );
        assert_eq!(
            annotations,
            vec![
                Some(Annotation::new("Min", vec![ValidatorValue::from(-5)])),
                Some(Annotation::new("Pattern", vec![ValidatorValue::from("^a+$")])),
                Some(Annotation::new("Label", vec![ValidatorValue::from("Age")])),
                Some(Annotation::new("Required", vec![ValidatorValue::from(false)])),
                Some(Annotation::new("IsEmail", vec![])),
            ]
        );
    }

    #[test]
    fn test_non_literal_decorator_skipped() {
        let annotations =
            decorators_of("class A { @MinLength(LIMIT) @MaxLength(10) name: string; }");
        assert_eq!(annotations[0], None);
        assert_eq!(
            annotations[1],
            Some(Annotation::new("MaxLength", vec![ValidatorValue::from(10)]))
        );
    }

    #[test]
    fn test_parse_comment_annotations() {
        let annotations =
            parse_comment(" @MinLength(2) @Label('Full name') @Pattern(\"^[A-Z]\") contact me at a@b.com");
        assert_eq!(
            annotations,
            vec![
                Annotation::new("MinLength", vec![ValidatorValue::from(2)]),
                Annotation::new("Label", vec![ValidatorValue::from("Full name")]),
                Annotation::new("Pattern", vec![ValidatorValue::from("^[A-Z]")]),
            ]
        );
    }

    #[test]
    fn test_parse_comment_multiple_arguments() {
        let annotations = parse_comment("* @Length(2, 40)\n * @Message('a, b')\n * @IsEmail()");
        assert_eq!(
            annotations,
            vec![
                Annotation::new("Length", vec![ValidatorValue::from(2), ValidatorValue::from(40)]),
                Annotation::new("Message", vec![ValidatorValue::from("a, b")]),
                Annotation::new("IsEmail", vec![]),
            ]
        );
    }

    #[test]
    fn test_parse_comment_regex_argument() {
        let annotations = parse_comment("@Pattern(/^(a|b),c$/)");
        assert_eq!(
            annotations,
            vec![Annotation::new("Pattern", vec![ValidatorValue::from("^(a|b),c$")])]
        );
    }

    #[test]
    fn test_parse_comment_skips_non_literal() {
        assert!(parse_comment("@Min(LIMIT)").is_empty());
        assert!(parse_comment("@Min(3").is_empty());
        assert!(parse_comment("@Message('a' + 'b')").is_empty());
    }

    #[test]
    fn test_parse_comment_escaped_patterns() {
        let expected = vec![Annotation::new("Pattern", vec![ValidatorValue::from(r"^\d+$")])];
        assert_eq!(parse_comment(r"@Pattern('^\\d+$')"), expected);
        assert_eq!(parse_comment(r#"@Pattern("^\\d+$")"#), expected);
        assert_eq!(
            parse_comment(r"@Message('it\'s (required)')"),
            vec![Annotation::new("Message", vec![ValidatorValue::from("it's (required)")])]
        );
    }

    #[test]
    fn test_comment_and_decorator_read_arguments_alike() {
        for args in [r"'^\\d+$'", r#""^\d+$""#, "/^a\\/b$/", "-3", "'a, b'"] {
            let from_comment = parse_comment(&format!("@Pattern({args})"));
            let from_decorator =
                decorators_of(&format!("class A {{ @Pattern({args}) x: string; }}"));
            assert_eq!(from_comment.len(), 1, "{args}");
            assert_eq!(Some(from_comment[0].clone()), from_decorator[0], "{args}");
        }
    }

    #[test]
    fn test_fold_last_write_wins_for_validators() {
        let overrides = FieldOverrides::fold(&[
            Annotation::new("Min", vec![ValidatorValue::from(1)]),
            Annotation::new("Label", vec![ValidatorValue::from("First")]),
            Annotation::new("Min", vec![ValidatorValue::from(3)]),
            Annotation::new("Label", vec![ValidatorValue::from("Second")]),
        ]);
        assert_eq!(overrides.validators.min, Some(ValidatorValue::from(3)));
        assert_eq!(overrides.label.as_deref(), Some("Second"));
    }

    #[test]
    fn test_fold_first_write_wins_for_kind() {
        let overrides = FieldOverrides::fold(&[
            Annotation::new("IsUrl", vec![]),
            Annotation::new("IsEmail", vec![]),
        ]);
        assert_eq!(overrides.kind, Some(FieldKind::Url));
    }

    #[test]
    fn test_fold_length_and_required() {
        let overrides = FieldOverrides::fold(&[
            Annotation::new("Length", vec![ValidatorValue::from(2), ValidatorValue::from(8)]),
            Annotation::new("Required", vec![]),
            Annotation::new("Unknown", vec![ValidatorValue::from(1)]),
        ]);
        assert_eq!(overrides.validators.min_length, Some(ValidatorValue::from(2)));
        assert_eq!(overrides.validators.max_length, Some(ValidatorValue::from(8)));
        assert_eq!(overrides.required, Some(true));
        assert!(overrides.kind.is_none());
    }

    #[test]
    fn test_apply_keeps_structural_kind_without_type_decorator() {
        let mut field = FieldDescriptor::leaf(FieldKind::String);
        FieldOverrides::fold(&[Annotation::new("MinLength", vec![ValidatorValue::from(2)])])
            .apply_to(&mut field);
        assert_eq!(field.kind, FieldKind::String);
        assert_eq!(field.validators.min_length, Some(ValidatorValue::from(2)));
    }

    #[test]
    fn test_apply_type_decorator_drops_reference() {
        let mut field = FieldDescriptor::object("Contact");
        FieldOverrides::fold(&[Annotation::new("IsEmail", vec![])]).apply_to(&mut field);
        assert_eq!(field.kind, FieldKind::Email);
        assert!(field.reference.is_none());
    }
}
