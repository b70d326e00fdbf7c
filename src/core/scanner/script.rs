//! Script parsing and `$t` call collection via swc.
//!
//! Modules and standalone template expressions both go through the same
//! visitor; the callee rule is a bare `$t` identifier or a member access
//! whose property is named exactly `$t`, with a literal string first
//! argument. Computed and templated arguments are deliberately not
//! extracted.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::{CallExpr, Callee, Expr, ImportDecl, Lit, MemberProp, Module};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

/// Keys and import specifiers found in one module.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectedCalls {
    pub keys: Vec<String>,
    pub imports: Vec<String>,
}

/// Class-style components lean on decorators; plain JS parses fine under the
/// TypeScript syntax as well.
fn syntax() -> Syntax {
    Syntax::Typescript(TsSyntax {
        decorators: true,
        ..Default::default()
    })
}

/// Parse a module-level script and collect `$t` calls and import sources in
/// one traversal.
pub fn collect(source: &str, file_path: &Path) -> Result<CollectedCalls> {
    let module = parse_module(source, file_path)?;
    let mut visitor = TranslationCallVisitor::default();
    module.visit_with(&mut visitor);
    Ok(CollectedCalls {
        keys: visitor.keys,
        imports: visitor.imports,
    })
}

fn parse_module(source: &str, file_path: &Path) -> Result<Module> {
    GLOBALS.set(&Globals::new(), || {
        let source_map: Arc<SourceMap> = Arc::default();
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), source.to_string());
        let mut parser = Parser::new(syntax(), StringInput::from(&*source_file), None);
        parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse script {}: {:?}", file_path.display(), e))
    })
}

/// Keys referenced inside a standalone template expression. Expressions that
/// do not parse contribute nothing.
pub fn keys_in_expression(expression: &str) -> Vec<String> {
    // Parenthesizing makes object literals and other statement-ambiguous
    // forms parse as a lone expression statement.
    let wrapped = format!("({});", expression);
    match parse_module(&wrapped, Path::new("template-expression")) {
        Ok(module) => {
            let mut visitor = TranslationCallVisitor::default();
            module.visit_with(&mut visitor);
            visitor.keys
        }
        Err(_) => Vec::new(),
    }
}

/// Collects `$t("key")` literals and import specifiers in one AST pass.
#[derive(Debug, Default)]
struct TranslationCallVisitor {
    keys: Vec<String>,
    imports: Vec<String>,
}

impl Visit for TranslationCallVisitor {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(key) = translation_key(node) {
            self.keys.push(key);
        }
        node.visit_children_with(self);
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if let Some(src) = node.src.value.as_str() {
            self.imports.push(src.to_string());
        }
    }
}

fn translation_key(node: &CallExpr) -> Option<String> {
    let Callee::Expr(callee) = &node.callee else {
        return None;
    };
    let is_translation = match &**callee {
        Expr::Ident(ident) => ident.sym.as_str() == "$t",
        Expr::Member(member) => {
            matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == "$t")
        }
        _ => false,
    };
    if !is_translation {
        return None;
    }

    let arg = node.args.first()?;
    if arg.spread.is_some() {
        return None;
    }
    match &*arg.expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        _ => None,
    }
}
