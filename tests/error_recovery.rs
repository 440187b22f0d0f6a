use scope_js::ast::stmt::Stmt;
use scope_js::error::SyntaxErrorType;
use scope_js::parse;
use scope_js::symbol::VarKind;

#[test]
fn only_the_first_error_is_reported() {
  let source = "let a = ;\nlet b = ;\n";
  let (ast, err) = parse(source);
  let err = err.unwrap();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("expression"));
  assert_eq!(&source[err.loc.0..err.loc.1], ";");
  assert!(err.loc.0 < source.find('\n').unwrap());
  // Parsing stopped at the error; the second declaration never happened.
  assert_eq!(ast.module.stx.body.len(), 1);
}

#[test]
fn the_partial_tree_remains_navigable() {
  let (ast, err) = parse("function f(a) { return a; }\nf(;\n");
  assert!(err.is_some());
  let Stmt::FunctionDecl(decl) = &*ast.module.stx.body[0].stx else {
    panic!("expected a function declaration");
  };
  assert_eq!(decl.stx.function.stx.parameters.len(), 1);
  let module = ast.module.stx.scope;
  let f = ast
    .symbols
    .scope(module)
    .declared
    .iter()
    .copied()
    .find(|&v| ast.symbols.name(v) == "f")
    .unwrap();
  assert_eq!(ast.symbols.var(f).kind, VarKind::Function);
}

#[test]
fn lexer_errors_surface_as_syntax_errors() {
  let (_, err) = parse("let s = \"abc;\n");
  assert_eq!(err.unwrap().typ, SyntaxErrorType::LexError);

  let (_, err) = parse("let r = /ab\n/;");
  assert_eq!(err.unwrap().typ, SyntaxErrorType::LexError);
}

#[test]
fn statements_after_redeclarations_are_not_parsed() {
  let (ast, err) = parse("let a; let a; let b;");
  assert_eq!(err.unwrap().typ, SyntaxErrorType::DuplicateDeclaration);
  // The second `a` still produced a declarator node.
  assert_eq!(ast.module.stx.body.len(), 2);
}
