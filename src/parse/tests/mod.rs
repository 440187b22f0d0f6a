mod expr;
mod stmt;

use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::parse;
use crate::symbol::ScopeRef;
use crate::symbol::Var;
use crate::symbol::VarKind;
use crate::symbol::VarRef;
use crate::Ast;
use ahash::HashMap;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use serde_json::Value;

pub fn parse_ok(source: &str) -> Ast {
  let (ast, err) = parse(source);
  if let Some(err) = err {
    panic!("unexpected error in {source:?}: {err:?}");
  };
  ast
}

pub fn parse_err(source: &str) -> (Ast, SyntaxError) {
  let (ast, err) = parse(source);
  match err {
    Some(err) => (ast, err),
    None => panic!("expected an error in {source:?}"),
  }
}

pub fn err_type(source: &str) -> SyntaxErrorType {
  parse_err(source).1.typ
}

/// The i-th top-level statement as JSON; `Node` serializes as its syntax
/// alone, so shapes are easy to assert on.
pub fn stmt_json(source: &str, i: usize) -> Value {
  let ast = parse_ok(source);
  serde_json::to_value(&ast.module).unwrap()["body"][i].clone()
}

/// The expression of the first top-level statement, which must be an
/// expression statement.
pub fn expr_json(source: &str) -> Value {
  let stmt = stmt_json(source, 0);
  assert_eq!(stmt["$t"], "Expr", "not an expression statement: {stmt}");
  stmt["expr"].clone()
}

pub fn module_scope(ast: &Ast) -> ScopeRef {
  ast.module.stx.scope
}

pub fn declared(ast: &Ast, scope: ScopeRef, name: &str) -> VarRef {
  *ast
    .symbols
    .scope(scope)
    .declared
    .iter()
    .find(|&&v| ast.symbols.name(v) == name)
    .unwrap_or_else(|| panic!("{name} is not declared in {scope:?}"))
}

pub fn declared_var<'a>(ast: &'a Ast, scope: ScopeRef, name: &str) -> &'a Var {
  let v = declared(ast, scope, name);
  ast.symbols.var(v)
}

pub fn undeclared(ast: &Ast, scope: ScopeRef, name: &str) -> VarRef {
  *ast
    .symbols
    .scope(scope)
    .undeclared
    .iter()
    .find(|&&v| ast.symbols.name(v) == name)
    .unwrap_or_else(|| panic!("{name} has no undeclared entry in {scope:?}"))
}

#[test]
fn var_use_counts() {
  let ast = parse_ok("var a = 1; a + a;");
  let a = declared_var(&ast, module_scope(&ast), "a");
  assert_eq!(a.kind, VarKind::Var);
  assert_eq!(a.uses, 3);
}

#[test]
fn let_shadows_in_block() {
  let ast = parse_ok("let a; { let a; a; } a;");
  let outer = declared(&ast, module_scope(&ast), "a");
  let Stmt::Block(block) = &*ast.module.stx.body[1].stx else {
    panic!("expected a block");
  };
  let inner = declared(&ast, block.stx.scope, "a");
  assert_ne!(ast.symbols.resolve(outer), ast.symbols.resolve(inner));
  assert_eq!(ast.symbols.var(outer).uses, 2);
  assert_eq!(ast.symbols.var(inner).uses, 2);
}

#[test]
fn unresolved_name_is_implicit_global() {
  let ast = parse_ok("a + b(a);");
  let module = module_scope(&ast);
  assert!(ast.symbols.scope(module).declared.is_empty());
  let a = undeclared(&ast, module, "a");
  assert_eq!(ast.symbols.var(a).kind, VarKind::Undeclared);
  assert_eq!(ast.symbols.var(a).uses, 2);
  assert_eq!(ast.symbols.var(undeclared(&ast, module, "b")).uses, 1);
}

#[test]
fn var_hoists_out_of_blocks() {
  let ast = parse_ok("{ { var a; } } a;");
  let a = declared_var(&ast, module_scope(&ast), "a");
  assert_eq!(a.kind, VarKind::Var);
  assert_eq!(a.uses, 2);
}

#[test]
fn use_before_var_declaration_is_same_variable() {
  let ast = parse_ok("a; var a;");
  let a = declared_var(&ast, module_scope(&ast), "a");
  assert_eq!(a.kind, VarKind::Var);
  assert_eq!(a.uses, 2);
  assert!(ast.symbols.scope(module_scope(&ast)).undeclared.is_empty());
}

#[test]
fn conflicting_redeclarations() {
  assert_eq!(err_type("let a; let a;"), SyntaxErrorType::DuplicateDeclaration);
  assert_eq!(err_type("let a; var a;"), SyntaxErrorType::DuplicateDeclaration);
  assert_eq!(err_type("var a; const a = 1;"), SyntaxErrorType::DuplicateDeclaration);
  parse_ok("var a; var a;");
  parse_ok("let a; { let a; }");
}

#[test]
fn function_declaration_name() {
  let ast = parse_ok("function f() {} f();");
  let f = declared_var(&ast, module_scope(&ast), "f");
  assert_eq!(f.kind, VarKind::Function);
  assert_eq!(f.uses, 2);
}

#[test]
fn function_expression_name_is_inner_only() {
  let ast = parse_ok("(function f() { f(); });");
  let module = module_scope(&ast);
  assert!(ast.symbols.scope(module).declared.is_empty());
  assert!(ast.symbols.scope(module).undeclared.is_empty());
  let Stmt::Expr(stmt) = &*ast.module.stx.body[0].stx else {
    panic!("expected an expression statement");
  };
  let Expr::Group(group) = &*stmt.stx.expr.stx else {
    panic!("expected a group");
  };
  let Expr::Func(func) = &*group.stx.expression.stx else {
    panic!("expected a function expression");
  };
  let f = declared_var(&ast, func.stx.func.stx.scope, "f");
  assert_eq!(f.kind, VarKind::Expr);
  assert_eq!(f.uses, 2);
}

#[test]
fn catch_binding_is_scoped_to_catch() {
  let ast = parse_ok("try {} catch (e) { e; }");
  let module = module_scope(&ast);
  assert!(ast.symbols.scope(module).undeclared.is_empty());
  let Stmt::Try(stmt) = &*ast.module.stx.body[0].stx else {
    panic!("expected a try statement");
  };
  let catch = stmt.stx.catch.as_ref().unwrap();
  let e = declared_var(&ast, catch.stx.scope, "e");
  assert_eq!(e.kind, VarKind::Argument);
  assert_eq!(e.uses, 2);
}

#[test]
fn parameter_default_does_not_see_body_var() {
  let ast = parse_ok("function f(a = b) { var b; }");
  let module = module_scope(&ast);
  let Stmt::FunctionDecl(decl) = &*ast.module.stx.body[0].stx else {
    panic!("expected a function declaration");
  };
  let scope = decl.stx.function.stx.scope;
  let body_b = declared(&ast, scope, "b");
  assert_eq!(ast.symbols.var(body_b).kind, VarKind::Var);
  // The `b` in the default escaped to module scope as a distinct variable.
  let default_b = undeclared(&ast, module, "b");
  assert_ne!(ast.symbols.resolve(default_b), ast.symbols.resolve(body_b));
}

#[test]
fn rejected_arrow_speculation_restores_uses() {
  let ast = parse_ok("(a, b); a;");
  let module = module_scope(&ast);
  assert!(ast.symbols.scope(module).declared.is_empty());
  assert_eq!(ast.symbols.var(undeclared(&ast, module, "a")).uses, 2);
  assert_eq!(ast.symbols.var(undeclared(&ast, module, "b")).uses, 1);
}

#[test]
fn speculative_parameter_entangled_with_outer_binding() {
  let ast = parse_ok("let a; (a, b) => a + b; a;");
  let module = module_scope(&ast);
  let outer = declared_var(&ast, module, "a");
  // Declaration plus the trailing statement; the arrow's `a` is its own
  // parameter.
  assert_eq!(outer.uses, 2);
  assert!(ast.symbols.scope(module).undeclared.is_empty());
}

// Counts every AST site that resolves to a variable. Var.uses must agree
// with the tree exactly, declarations included.
#[derive(Default, Visitor)]
#[visitor(IdExpr(enter), IdPat(enter), ClassOrFuncName(enter))]
struct UseCounter {
  counts: HashMap<VarRef, u32>,
}

impl UseCounter {
  fn enter_id_expr(&mut self, e: &IdExpr) {
    *self.counts.entry(e.var).or_insert(0) += 1;
  }

  fn enter_id_pat(&mut self, p: &IdPat) {
    *self.counts.entry(p.var).or_insert(0) += 1;
  }

  fn enter_class_or_func_name(&mut self, n: &ClassOrFuncName) {
    *self.counts.entry(n.var).or_insert(0) += 1;
  }
}

#[test]
fn use_counts_match_tree_sites() {
  let ast = parse_ok(
    r#"
import { z } from "mod";
let a = 1;
a + a;
const f = x => x + a;
function g(b, ...rest) {
  var c = b + z;
  return c + rest.length;
}
(function h() { h(); });
class K extends g {
  m() { return a + this.n; }
}
for (let i = 0; i < a; i++) f(i);
try { g(); } catch (e) { f(e); }
({ p: a, q, ...g });
const [d = a, ...e2] = f;
"#,
  );
  let mut counter = UseCounter::default();
  ast.module.drive(&mut counter);
  let mut totals: HashMap<VarRef, u32> = HashMap::default();
  for (v, n) in counter.counts {
    *totals.entry(ast.symbols.resolve(v)).or_insert(0) += n;
  }
  assert!(!totals.is_empty());
  for (v, n) in totals {
    assert_eq!(
      ast.symbols.var(v).uses,
      n,
      "site count mismatch for {}",
      ast.symbols.name(v)
    );
  }
}
