//! Finds translation function calls in JS/TS source with swc.

use std::{collections::HashSet, path::Path, sync::Arc};

use anyhow::{Result, anyhow};
use swc_common::{FileName, FilePathMapping, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::{CallExpr, Callee, Expr, Lit, Module};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use super::CallSite;
use crate::issues::{SourceContext, SourceLocation};

pub struct ParsedFile {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Parse one source file. `.ts`-family files are parsed without JSX so that
/// angle-bracket casts still work; everything else is parsed as TSX.
pub fn parse_source(code: String, file_path: &str) -> Result<ParsedFile> {
    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::new(FilePathMapping::empty()));
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: !is_plain_typescript(file_path),
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse source: {:?}", e))?;

        Ok(ParsedFile { module, source_map })
    })
}

fn is_plain_typescript(file_path: &str) -> bool {
    matches!(
        Path::new(file_path).extension().and_then(|e| e.to_str()),
        Some("ts" | "mts" | "cts")
    )
}

/// Every call to one of `functions` in `parsed`, in source order.
pub fn extract_call_sites(
    parsed: &ParsedFile,
    file_path: &str,
    functions: &HashSet<String>,
) -> Vec<CallSite> {
    let mut finder = CallSiteFinder {
        source_map: &parsed.source_map,
        file_path,
        functions,
        calls: Vec::new(),
    };
    parsed.module.visit_with(&mut finder);
    finder.calls
}

struct CallSiteFinder<'a> {
    source_map: &'a SourceMap,
    file_path: &'a str,
    functions: &'a HashSet<String>,
    calls: Vec<CallSite>,
}

impl Visit for CallSiteFinder<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(expr) = &node.callee
            && let Expr::Ident(ident) = &**expr
            && self.functions.contains(ident.sym.as_str())
        {
            let loc = self.source_map.lookup_char_pos(node.span.lo);
            let source_line = loc.file.get_line(loc.line - 1).map(|cow| cow.to_string());

            let key = node
                .args
                .first()
                .filter(|arg| arg.spread.is_none())
                .and_then(|arg| literal_key(&arg.expr));

            self.calls.push(CallSite {
                key,
                context: SourceContext::new(
                    SourceLocation::new(self.file_path, loc.line, loc.col_display + 1),
                    source_line,
                ),
            });
        }
        node.visit_children_with(self);
    }
}

fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_paren(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_paren(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_paren(&ts_sat.expr),
        _ => expr,
    }
}

/// String literal or substitution-free template literal.
fn literal_key(expr: &Expr) -> Option<String> {
    match unwrap_paren(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}
