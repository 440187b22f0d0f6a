use super::*;
use crate::token::TT;

#[test]
fn var_declaration_lists() {
  let s = stmt_json("var a = 1, b;", 0);
  assert_eq!(s["$t"], "VarDecl");
  assert_eq!(s["mode"], "Var");
  let declarators = s["declarators"].as_array().unwrap();
  assert_eq!(declarators.len(), 2);
  assert_eq!(declarators[0]["pattern"]["pat"]["$t"], "Id");
  assert!(declarators[0]["initializer"].is_object());
  assert_eq!(declarators[1]["initializer"], Value::Null);

  let s = stmt_json("const {a, b: [c]} = d;", 0);
  assert_eq!(s["mode"], "Const");
  assert_eq!(s["declarators"][0]["pattern"]["pat"]["$t"], "Obj");
}

#[test]
fn let_is_a_declaration_only_before_a_binding() {
  let s = stmt_json("let a = 1;", 0);
  assert_eq!(s["$t"], "VarDecl");
  assert_eq!(s["mode"], "Let");

  // Plain identifier use.
  let s = stmt_json("let = 1;", 0);
  assert_eq!(s["$t"], "Expr");
  assert_eq!(s["expr"]["operator"], "Assignment");

  let s = stmt_json("let.a();", 0);
  assert_eq!(s["$t"], "Expr");
  assert_eq!(s["expr"]["$t"], "Call");
}

#[test]
fn if_with_else_chain() {
  let s = stmt_json("if (a) b; else if (c) d; else e;", 0);
  assert_eq!(s["$t"], "If");
  assert_eq!(s["alternate"]["$t"], "If");
  assert_eq!(s["alternate"]["alternate"]["$t"], "Expr");
}

#[test]
fn while_and_do_while() {
  let s = stmt_json("while (a) b;", 0);
  assert_eq!(s["$t"], "While");
  let s = stmt_json("do a; while (b);", 0);
  assert_eq!(s["$t"], "DoWhile");
  assert_eq!(s["body"]["$t"], "Expr");
}

#[test]
fn for_triple() {
  let ast = parse_ok("for (let i = 0; i < n; i++) f(i);");
  let m = serde_json::to_value(&ast.module).unwrap();
  let s = &m["body"][0];
  assert_eq!(s["$t"], "ForTriple");
  assert_eq!(s["init"]["Decl"]["mode"], "Let");
  assert!(s["cond"].is_object());
  assert_eq!(s["post"]["$t"], "UnaryPostfix");

  // The head's binding is scoped to the statement, visible in the body.
  let Stmt::ForTriple(stmt) = &*ast.module.stx.body[0].stx else {
    panic!("expected a for statement");
  };
  let i = declared_var(&ast, stmt.stx.scope, "i");
  assert_eq!(i.kind, VarKind::Lexical);
  assert_eq!(i.uses, 4);
  assert!(ast.symbols.scope(module_scope(&ast)).declared.is_empty());

  let s = stmt_json("for (;;) ;", 0);
  assert_eq!(s["init"], "None");
  assert_eq!(s["cond"], Value::Null);
  assert_eq!(s["post"], Value::Null);
  assert_eq!(s["body"]["$t"], "Empty");
}

#[test]
fn in_suppression_stops_at_function_boundaries() {
  // `in` inside a function or arrow body is relational again, even when the
  // body sits in a for-head initializer.
  let s = stmt_json("for (var x = function() { return a in b; }();;) ;", 0);
  assert_eq!(s["$t"], "ForTriple");
  let init = &s["init"]["Decl"]["declarators"][0]["initializer"];
  assert_eq!(init["$t"], "Call");
  assert_eq!(init["callee"]["$t"], "Func");
  let ret = &init["callee"]["func"]["body"]["Block"][0];
  assert_eq!(ret["$t"], "Return");
  assert_eq!(ret["value"]["operator"], "In");

  let s = stmt_json("for (var f = () => a in b;;) ;", 0);
  let body = &s["init"]["Decl"]["declarators"][0]["initializer"]["func"]["body"];
  assert_eq!(body["Expression"]["operator"], "In");

  // The head itself still treats `in` as the for-in separator.
  let s = stmt_json("for (a in b) ;", 0);
  assert_eq!(s["$t"], "ForIn");
}

#[test]
fn for_in_and_for_of() {
  let s = stmt_json("for (const k in o) k;", 0);
  assert_eq!(s["$t"], "ForIn");
  assert_eq!(s["lhs"]["Decl"][0], "Const");
  assert_eq!(s["lhs"]["Decl"][1]["pat"]["$t"], "Id");

  let s = stmt_json("for (a of b) a;", 0);
  assert_eq!(s["$t"], "ForOf");
  assert_eq!(s["await_"], false);
  assert_eq!(s["lhs"]["Assign"]["$t"], "Id");

  let s = stmt_json("for (const [a, b] of c) a;", 0);
  assert_eq!(s["lhs"]["Decl"][1]["pat"]["$t"], "Arr");

  // `in` inside the rhs of a head belongs to the expression, not the loop.
  let s = stmt_json("for (a of b in c) a;", 0);
  assert_eq!(s["rhs"]["operator"], "In");

  assert_eq!(
    err_type("for (let a = 1 of b) a;"),
    SyntaxErrorType::ExpectedSyntax("single binding without initializer")
  );
  assert_eq!(
    err_type("for (let a, b in c) a;"),
    SyntaxErrorType::ExpectedSyntax("single binding without initializer")
  );
}

#[test]
fn for_await() {
  let ast = parse_ok("async function f() { for await (const x of y) x; }");
  let m = serde_json::to_value(&ast.module).unwrap();
  let s = &m["body"][0]["function"]["body"]["Block"][0];
  assert_eq!(s["$t"], "ForOf");
  assert_eq!(s["await_"], true);

  assert_eq!(
    err_type("async function f() { for await (a in b) a; }"),
    SyntaxErrorType::ExpectedSyntax("for await over an async iterable")
  );
  assert_eq!(
    err_type("async function f() { for await (;;) ; }"),
    SyntaxErrorType::ExpectedSyntax("for await over an async iterable")
  );
}

#[test]
fn switch_branches_share_one_scope() {
  let ast = parse_ok("switch (a) { case 1: let x = 2; break; case 2: x; default: x; }");
  let Stmt::Switch(stmt) = &*ast.module.stx.body[0].stx else {
    panic!("expected a switch statement");
  };
  assert_eq!(stmt.stx.branches.len(), 3);
  assert!(stmt.stx.branches[2].stx.case.is_none());
  let x = declared_var(&ast, stmt.stx.scope, "x");
  assert_eq!(x.uses, 3);
}

#[test]
fn try_catch_finally() {
  let s = stmt_json("try { a; } catch { b; } finally { c; }", 0);
  assert_eq!(s["$t"], "Try");
  assert_eq!(s["catch"]["parameter"], Value::Null);
  assert!(s["finally"].is_object());

  let s = stmt_json("try { a; } catch (e) { b; }", 0);
  assert_eq!(s["catch"]["parameter"]["pat"]["$t"], "Id");
  assert_eq!(s["finally"], Value::Null);

  assert_eq!(
    err_type("try { a; }"),
    SyntaxErrorType::RequiredTokenNotFound(TT::KeywordCatch)
  );
}

#[test]
fn labels_break_and_continue() {
  let s = stmt_json("outer: for (;;) { break outer; continue outer; }", 0);
  assert_eq!(s["$t"], "Label");
  assert_eq!(s["name"], "outer");
  let body = &s["statement"]["body"]["body"];
  assert_eq!(body[0]["$t"], "Break");
  assert_eq!(body[0]["label"], "outer");
  assert_eq!(body[1]["$t"], "Continue");
  assert_eq!(body[1]["label"], "outer");

  // A line terminator ends the label-less form.
  let ast = parse_ok("for (;;) { break\nouter; }");
  let m = serde_json::to_value(&ast.module).unwrap();
  assert_eq!(m["body"][0]["body"]["body"][0]["label"], Value::Null);
}

#[test]
fn contextual_keywords_label_statements_outside_their_contexts() {
  let s = stmt_json("yield: 1;", 0);
  assert_eq!(s["$t"], "Label");
  assert_eq!(s["name"], "yield");

  let s = stmt_json("yield: for (;;) { break yield; continue yield; }", 0);
  let body = &s["statement"]["body"]["body"];
  assert_eq!(body[0]["$t"], "Break");
  assert_eq!(body[0]["label"], "yield");
  assert_eq!(body[1]["label"], "yield");

  let s = stmt_json("await: while (a) break await;", 0);
  assert_eq!(s["name"], "await");
  assert_eq!(s["statement"]["body"]["label"], "await");

  // Inside a generator, `yield` is an expression again and cannot label.
  assert_eq!(
    err_type("function* g() { yield: 1; }"),
    SyntaxErrorType::ExpectedSyntax("semicolon")
  );
}

#[test]
fn return_value_stops_at_a_line_terminator() {
  let ast = parse_ok("function f() { return\n1; }");
  let m = serde_json::to_value(&ast.module).unwrap();
  let body = &m["body"][0]["function"]["body"]["Block"];
  assert_eq!(body[0]["$t"], "Return");
  assert_eq!(body[0]["value"], Value::Null);
  assert_eq!(body[1]["$t"], "Expr");

  let ast = parse_ok("function f() { return 1; }");
  let m = serde_json::to_value(&ast.module).unwrap();
  assert_eq!(m["body"][0]["function"]["body"]["Block"][0]["value"]["value"], "1");
}

#[test]
fn throw_requires_a_value_on_the_same_line() {
  let s = stmt_json("throw a;", 0);
  assert_eq!(s["$t"], "Throw");
  assert_eq!(
    err_type("throw\na;"),
    SyntaxErrorType::ExpectedSyntax("value after throw")
  );
}

#[test]
fn automatic_semicolon_insertion() {
  assert_eq!(err_type("a b;"), SyntaxErrorType::ExpectedSyntax("semicolon"));
  // A line terminator, a closing brace, or the end of input all terminate.
  let ast = parse_ok("a\nb");
  assert_eq!(ast.module.stx.body.len(), 2);
  parse_ok("{ a }");
  parse_ok("a");
}

#[test]
fn with_and_debugger() {
  let s = stmt_json("with (a) b;", 0);
  assert_eq!(s["$t"], "With");
  let s = stmt_json("debugger;", 0);
  assert_eq!(s["$t"], "Debugger");
}

#[test]
fn import_statement_forms() {
  let s = stmt_json("import \"m\";", 0);
  assert_eq!(s["$t"], "Import");
  assert_eq!(s["module"], "m");
  assert_eq!(s["default"], Value::Null);
  assert_eq!(s["names"], Value::Null);

  let s = stmt_json("import a from \"m\";", 0);
  assert_eq!(s["default"]["pat"]["$t"], "Id");

  let s = stmt_json("import * as ns from \"m\";", 0);
  assert!(s["names"].get("All").is_some());

  let s = stmt_json("import a, {b, c as d, default as e, \"f\" as g} from \"m\";", 0);
  let names = s["names"]["Specific"].as_array().unwrap();
  assert_eq!(names.len(), 4);
  assert_eq!(names[0]["importable"], serde_json::json!({ "Ident": "b" }));
  assert_eq!(names[1]["importable"], serde_json::json!({ "Ident": "c" }));
  assert_eq!(names[2]["importable"], serde_json::json!({ "Ident": "default" }));
  assert_eq!(names[3]["importable"], serde_json::json!({ "Str": "f" }));
}

#[test]
fn import_bindings_are_lexical() {
  let ast = parse_ok("import a, {b as c} from \"m\"; a(c);");
  let module = module_scope(&ast);
  assert_eq!(declared_var(&ast, module, "a").kind, VarKind::Lexical);
  let c = declared_var(&ast, module, "c");
  assert_eq!(c.kind, VarKind::Lexical);
  assert_eq!(c.uses, 2);
  // The importable name `b` is not a variable.
  assert!(ast
    .symbols
    .scope(module)
    .undeclared
    .iter()
    .all(|&v| ast.symbols.name(v) != "b"));
}

#[test]
fn export_statement_forms() {
  let s = stmt_json("export {a, b as c};", 0);
  assert_eq!(s["$t"], "ExportList");
  assert_eq!(s["from"], Value::Null);
  let names = s["names"]["Specific"].as_array().unwrap();
  assert_eq!(names[0]["alias"], Value::Null);
  assert_eq!(names[1]["alias"], serde_json::json!({ "Ident": "c" }));

  let s = stmt_json("export {default as a} from \"m\";", 0);
  assert_eq!(s["from"], "m");

  let s = stmt_json("export * from \"m\";", 0);
  assert_eq!(s["names"]["All"], Value::Null);
  let s = stmt_json("export * as ns from \"m\";", 0);
  assert_eq!(s["names"]["All"], "ns");

  let s = stmt_json("export var a = 1;", 0);
  assert_eq!(s["$t"], "VarDecl");
  assert_eq!(s["export"], true);

  let s = stmt_json("export function f() {}", 0);
  assert_eq!(s["$t"], "FunctionDecl");
  assert_eq!(s["export"], true);
  assert_eq!(s["export_default"], false);

  let s = stmt_json("export default function () {}", 0);
  assert_eq!(s["$t"], "FunctionDecl");
  assert_eq!(s["export_default"], true);
  assert_eq!(s["name"], Value::Null);

  let s = stmt_json("export default async function f() {}", 0);
  assert_eq!(s["function"]["async_"], true);

  let s = stmt_json("export default a + 1;", 0);
  assert_eq!(s["$t"], "ExportDefaultExpr");
  assert_eq!(s["expression"]["operator"], "Addition");

  let s = stmt_json("export class A {}", 0);
  assert_eq!(s["$t"], "ClassDecl");
  assert_eq!(s["export"], true);
}

#[test]
fn exported_names_are_not_variable_uses() {
  let ast = parse_ok("let a; export {a};");
  assert_eq!(declared_var(&ast, module_scope(&ast), "a").uses, 1);
}

#[test]
fn class_declarations() {
  let ast = parse_ok(
    "class A extends B { constructor() {} static m(x) {} get p() {} q = 1; static r; }",
  );
  let m = serde_json::to_value(&ast.module).unwrap();
  let s = &m["body"][0];
  assert_eq!(s["$t"], "ClassDecl");
  assert_eq!(s["extends"]["$t"], "Id");
  let members = s["members"].as_array().unwrap();
  assert_eq!(members.len(), 5);
  assert_eq!(members[0]["key"]["Direct"]["key"], "constructor");
  assert!(members[0]["val"].get("Method").is_some());
  assert_eq!(members[1]["static_"], true);
  assert!(members[2]["val"].get("Getter").is_some());
  assert!(members[3]["val"].get("Prop").is_some());
  assert_eq!(members[4]["static_"], true);
  assert_eq!(members[4]["val"]["Prop"], Value::Null);

  assert_eq!(declared_var(&ast, module_scope(&ast), "A").kind, VarKind::Lexical);
}

#[test]
fn declarations_need_a_name_outside_default_exports() {
  assert_eq!(
    err_type("function () {} a;"),
    SyntaxErrorType::ExpectedSyntax("function name")
  );
  assert_eq!(err_type("class {} a;"), SyntaxErrorType::ExpectedSyntax("class name"));
  parse_ok("export default function () {}");
  parse_ok("export default class {}");
}

#[test]
fn declarations_are_rejected_in_single_statement_positions() {
  assert_eq!(err_type("if (a) function f() {}"), SyntaxErrorType::UnexpectedToken);
  assert_eq!(err_type("while (a) class B {}"), SyntaxErrorType::UnexpectedToken);
}

#[test]
fn first_error_wins_and_the_tree_stays_navigable() {
  let (ast, err) = parse_err("let a = ;\nlet b = 2;");
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("expression"));
  // The declaration up to the error is kept; nothing after it is parsed.
  let m = serde_json::to_value(&ast.module).unwrap();
  assert_eq!(m["body"][0]["$t"], "VarDecl");
  assert_eq!(m["body"][0]["declarators"][0]["initializer"]["$t"], "LitNull");
  let a = declared_var(&ast, module_scope(&ast), "a");
  assert_eq!(a.kind, VarKind::Lexical);
}

#[test]
fn unexpected_end_of_input() {
  assert_eq!(err_type("if ("), SyntaxErrorType::UnexpectedEnd);
  assert_eq!(err_type("a."), SyntaxErrorType::UnexpectedEnd);
  assert_eq!(err_type("{"), SyntaxErrorType::RequiredTokenNotFound(TT::BraceClose));
}

#[test]
fn error_location_points_at_the_offending_token() {
  let source = "let a = 1;\nlet b = ;\n";
  let (_, err) = parse_err(source);
  assert_eq!(&source[err.loc.0..err.loc.1], ";");
  assert_eq!(err.actual_token, Some(TT::Semicolon));
}
