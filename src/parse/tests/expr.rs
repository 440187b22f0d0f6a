use super::*;
use crate::token::TT;

#[test]
fn multiplication_binds_tighter_than_addition() {
  let e = expr_json("1 + 2 * 3;");
  assert_eq!(e["$t"], "Binary");
  assert_eq!(e["operator"], "Addition");
  assert_eq!(e["left"]["value"], "1");
  assert_eq!(e["right"]["operator"], "Multiplication");
}

#[test]
fn exponentiation_is_right_associative() {
  let e = expr_json("2 ** 3 ** 4;");
  assert_eq!(e["operator"], "Exponentiation");
  assert_eq!(e["left"]["value"], "2");
  assert_eq!(e["right"]["operator"], "Exponentiation");
}

#[test]
fn unary_operand_cannot_take_exponentiation() {
  assert_eq!(err_type("-2 ** 3;"), SyntaxErrorType::UnexpectedToken);
  let e = expr_json("(-2) ** 3;");
  assert_eq!(e["operator"], "Exponentiation");
  assert_eq!(e["left"]["$t"], "Group");
}

#[test]
fn nullish_coalescing_must_be_parenthesized_against_logical() {
  assert_eq!(err_type("a && b ?? c;"), SyntaxErrorType::UnexpectedToken);
  assert_eq!(err_type("a ?? b || c;"), SyntaxErrorType::UnexpectedToken);
  let e = expr_json("(a && b) ?? c;");
  assert_eq!(e["operator"], "NullishCoalescing");
  let e = expr_json("a ?? b ?? c;");
  assert_eq!(e["operator"], "NullishCoalescing");
  assert_eq!(e["left"]["operator"], "NullishCoalescing");
}

#[test]
fn assignment_is_right_associative() {
  let e = expr_json("a = b = c;");
  assert_eq!(e["operator"], "Assignment");
  assert_eq!(e["right"]["operator"], "Assignment");
  let e = expr_json("a += 1;");
  assert_eq!(e["operator"], "AssignmentAddition");
}

#[test]
fn assignment_target_must_be_valid() {
  assert_eq!(err_type("a + b = c;"), SyntaxErrorType::InvalidAssignmentTarget);
  assert_eq!(err_type("f() = 1;"), SyntaxErrorType::InvalidAssignmentTarget);
  // Destructuring shapes are fine.
  let e = expr_json("[a, b] = c;");
  assert_eq!(e["operator"], "Assignment");
  assert_eq!(e["left"]["$t"], "LitArr");
}

#[test]
fn conditional() {
  let e = expr_json("a ? b = 1 : c;");
  assert_eq!(e["$t"], "Cond");
  assert_eq!(e["consequent"]["operator"], "Assignment");
}

#[test]
fn member_and_call_chains() {
  let e = expr_json("a.b.c(1)(2)[d];");
  assert_eq!(e["$t"], "ComputedMember");
  let call2 = &e["object"];
  assert_eq!(call2["$t"], "Call");
  assert_eq!(call2["callee"]["$t"], "Call");
  assert_eq!(call2["callee"]["callee"]["$t"], "Member");
  assert_eq!(call2["callee"]["callee"]["right"], "c");
}

#[test]
fn optional_chaining() {
  let e = expr_json("a?.b;");
  assert_eq!(e["$t"], "Member");
  assert_eq!(e["optional_chaining"], true);
  let e = expr_json("a?.[b];");
  assert_eq!(e["$t"], "ComputedMember");
  assert_eq!(e["optional_chaining"], true);
  let e = expr_json("a?.(b);");
  assert_eq!(e["$t"], "Call");
  assert_eq!(e["optional_chaining"], true);
  // Plain accesses may continue the chain.
  let e = expr_json("a?.b.c;");
  assert_eq!(e["$t"], "Member");
  assert_eq!(e["optional_chaining"], false);
  assert_eq!(e["left"]["optional_chaining"], true);
}

#[test]
fn postfix_operator_does_not_cross_a_line_terminator() {
  let ast = parse_ok("a\n++b;");
  let m = serde_json::to_value(&ast.module).unwrap();
  assert_eq!(m["body"].as_array().unwrap().len(), 2);
  assert_eq!(m["body"][0]["expr"]["$t"], "Id");
  assert_eq!(m["body"][1]["expr"]["$t"], "Unary");
  assert_eq!(m["body"][1]["expr"]["operator"], "PrefixIncrement");

  let e = expr_json("a++;");
  assert_eq!(e["$t"], "UnaryPostfix");
  assert_eq!(e["operator"], "PostfixIncrement");
}

#[test]
fn new_with_and_without_arguments() {
  let e = expr_json("new a.b();");
  assert_eq!(e["$t"], "New");
  assert_eq!(e["callee"]["$t"], "Member");
  assert_eq!(e["arguments"], serde_json::json!([]));

  let e = expr_json("new a;");
  assert_eq!(e["arguments"], Value::Null);

  // The argument list binds to `new`; a second list is a call of the result.
  let e = expr_json("new a()(b);");
  assert_eq!(e["$t"], "Call");
  assert_eq!(e["callee"]["$t"], "New");
}

#[test]
fn new_target_and_import_meta() {
  let ast = parse_ok("function f() { return new.target; }");
  let m = serde_json::to_value(&ast.module).unwrap();
  assert_eq!(m["body"][0]["function"]["body"]["Block"][0]["value"]["$t"], "NewTarget");
  assert_eq!(err_type("new.other;"), SyntaxErrorType::ExpectedSyntax("new.target"));

  let e = expr_json("import.meta.url;");
  assert_eq!(e["$t"], "Member");
  assert_eq!(e["right"], "url");
  assert_eq!(e["left"]["$t"], "ImportMeta");
}

#[test]
fn dynamic_import_is_an_expression() {
  let e = expr_json("import(\"m\");");
  assert_eq!(e["$t"], "Import");
  assert_eq!(e["module"]["value"], "m");
  // A trailing comma is allowed.
  let e = expr_json("import(\"m\",);");
  assert_eq!(e["$t"], "Import");
}

#[test]
fn call_arguments_with_spread() {
  let e = expr_json("f(a, ...b);");
  assert_eq!(e["arguments"][0]["spread"], false);
  assert_eq!(e["arguments"][1]["spread"], true);
}

#[test]
fn slash_at_operand_position_is_a_regex() {
  let e = expr_json("/abc/g;");
  assert_eq!(e["$t"], "LitRegex");
  assert_eq!(e["value"], "/abc/g");
  let e = expr_json("a / b;");
  assert_eq!(e["operator"], "Division");
  let e = expr_json("a + /b/.test(c);");
  assert_eq!(e["right"]["callee"]["left"]["$t"], "LitRegex");
}

#[test]
fn template_literals() {
  let e = expr_json("`a${b}c`;");
  assert_eq!(e["$t"], "LitTemplate");
  assert_eq!(e["parts"][0], serde_json::json!({ "String": "a" }));
  assert_eq!(e["parts"][1]["Substitution"]["$t"], "Id");
  assert_eq!(e["parts"][2], serde_json::json!({ "String": "c" }));

  let e = expr_json("`plain`;");
  assert_eq!(e["parts"][0], serde_json::json!({ "String": "plain" }));

  let e = expr_json("t`x${y}`;");
  assert_eq!(e["$t"], "TaggedTemplate");
  assert_eq!(e["function"]["$t"], "Id");
}

#[test]
fn array_literal_elisions() {
  let e = expr_json("[, a, , b, ,];");
  let elements = e["elements"].as_array().unwrap();
  assert_eq!(elements.len(), 5);
  assert_eq!(elements[0], "Empty");
  assert!(elements[1].get("Single").is_some());
  assert_eq!(elements[2], "Empty");
  assert!(elements[3].get("Single").is_some());
  assert_eq!(elements[4], "Empty");

  let e = expr_json("[a, b];");
  assert_eq!(e["elements"].as_array().unwrap().len(), 2);

  let e = expr_json("[...a, b];");
  assert!(e["elements"][0].get("Rest").is_some());
  assert!(e["elements"][1].get("Single").is_some());
}

#[test]
fn object_literal_member_forms() {
  let e = expr_json("({a: 1, b, async c() {}, get d() {}, set e(v) {}, [f]: 2, ...g});");
  assert_eq!(e["$t"], "Group");
  let members = e["expression"]["members"].as_array().unwrap();
  assert_eq!(members.len(), 7);
  assert_eq!(members[0]["typ"]["Valued"]["key"]["Direct"]["key"], "a");
  assert!(members[0]["typ"]["Valued"]["val"].get("Prop").is_some());
  assert!(members[1]["typ"].get("Shorthand").is_some());
  assert_eq!(members[2]["typ"]["Valued"]["val"]["Method"]["func"]["async_"], true);
  assert!(members[3]["typ"]["Valued"]["val"].get("Getter").is_some());
  assert!(members[4]["typ"]["Valued"]["val"].get("Setter").is_some());
  assert!(members[5]["typ"]["Valued"]["key"].get("Computed").is_some());
  assert!(members[6]["typ"].get("Rest").is_some());
}

#[test]
fn keyword_and_literal_property_keys() {
  let e = expr_json("({if: 1, \"two\": 2, 3: 3});");
  let members = e["expression"]["members"].as_array().unwrap();
  assert_eq!(members[0]["typ"]["Valued"]["key"]["Direct"]["key"], "if");
  assert_eq!(members[1]["typ"]["Valued"]["key"]["Direct"]["key"], "two");
  assert_eq!(members[2]["typ"]["Valued"]["key"]["Direct"]["key"], "3");
}

#[test]
fn accessor_arity_is_checked() {
  assert_eq!(
    err_type("({get a(b) {}});"),
    SyntaxErrorType::ExpectedSyntax("getter without parameters")
  );
  assert_eq!(
    err_type("({set a() {}});"),
    SyntaxErrorType::ExpectedSyntax("setter with a single parameter")
  );
  assert_eq!(
    err_type("({set a(...b) {}});"),
    SyntaxErrorType::ExpectedSyntax("setter with a single parameter")
  );
}

#[test]
fn arrow_function_parameter_lists() {
  let e = expr_json("(a, b) => a;");
  assert_eq!(e["$t"], "ArrowFunc");
  assert_eq!(e["func"]["arrow"], true);
  assert_eq!(e["func"]["async_"], false);
  let params = e["func"]["parameters"].as_array().unwrap();
  assert_eq!(params.len(), 2);
  assert_eq!(params[0]["pattern"]["pat"]["$t"], "Id");
  assert!(e["func"]["body"].get("Expression").is_some());

  let e = expr_json("(a = 1, [b], {c}) => a;");
  let params = e["func"]["parameters"].as_array().unwrap();
  assert!(params[0]["default_value"].is_object());
  assert_eq!(params[1]["pattern"]["pat"]["$t"], "Arr");
  assert_eq!(params[2]["pattern"]["pat"]["$t"], "Obj");

  let e = expr_json("(a, ...r) => r;");
  let params = e["func"]["parameters"].as_array().unwrap();
  assert_eq!(params[1]["rest"], true);

  let e = expr_json("() => ({});");
  assert_eq!(e["func"]["parameters"], serde_json::json!([]));
}

#[test]
fn single_identifier_arrow() {
  let ast = parse_ok("x => x + 1;");
  let e = expr_json("x => x + 1;");
  assert_eq!(e["$t"], "ArrowFunc");
  assert_eq!(e["func"]["parameters"].as_array().unwrap().len(), 1);
  // The identifier became the parameter, not a free use.
  assert!(ast.symbols.scope(module_scope(&ast)).undeclared.is_empty());
}

#[test]
fn async_arrows_and_async_as_a_name() {
  let e = expr_json("async x => x;");
  assert_eq!(e["$t"], "ArrowFunc");
  assert_eq!(e["func"]["async_"], true);

  let e = expr_json("async (a, b) => a;");
  assert_eq!(e["func"]["async_"], true);
  assert_eq!(e["func"]["parameters"].as_array().unwrap().len(), 2);

  let e = expr_json("(async function f() {});");
  assert_eq!(e["expression"]["$t"], "Func");
  assert_eq!(e["expression"]["func"]["async_"], true);

  // With a line terminator in between, `async` is just a name.
  let ast = parse_ok("async\nx;");
  let m = serde_json::to_value(&ast.module).unwrap();
  assert_eq!(m["body"][0]["expr"]["$t"], "Id");
  assert_eq!(ast.symbols.var(undeclared(&ast, module_scope(&ast), "async")).uses, 1);

  assert_eq!(
    err_type("async await => 1;"),
    SyntaxErrorType::ExpectedSyntax("arrow function parameter")
  );
}

#[test]
fn rejected_arrow_speculation_yields_a_group() {
  let e = expr_json("(a, b);");
  assert_eq!(e["$t"], "Group");
  assert_eq!(e["expression"]["operator"], "Comma");

  let e = expr_json("(a = 1);");
  assert_eq!(e["$t"], "Group");
  assert_eq!(e["expression"]["operator"], "Assignment");
}

#[test]
fn invalid_arrow_parameters() {
  assert_eq!(err_type("(a.b) => c;"), SyntaxErrorType::InvalidArrowParameters);
  assert_eq!(err_type("(a + b) => c;"), SyntaxErrorType::InvalidArrowParameters);
  assert_eq!(
    err_type("();"),
    SyntaxErrorType::RequiredTokenNotFound(TT::EqualsChevronRight)
  );
  assert_eq!(
    err_type("(...a);"),
    SyntaxErrorType::RequiredTokenNotFound(TT::EqualsChevronRight)
  );
  assert_eq!(
    err_type("(a, b)\n=> c;"),
    SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters
  );
}

#[test]
fn yield_inside_and_outside_generators() {
  let ast = parse_ok("function* g() { yield; yield a; yield* b; }");
  let m = serde_json::to_value(&ast.module).unwrap();
  let body = &m["body"][0]["function"]["body"]["Block"];
  assert_eq!(body[0]["expr"]["$t"], "Yield");
  assert_eq!(body[0]["expr"]["argument"], Value::Null);
  assert_eq!(body[1]["expr"]["argument"]["$t"], "Id");
  assert_eq!(body[2]["expr"]["delegate"], true);

  // Outside a generator, `yield` is an ordinary identifier.
  let e = expr_json("yield + 1;");
  assert_eq!(e["operator"], "Addition");
  assert_eq!(e["left"]["$t"], "Id");
}

#[test]
fn await_inside_and_outside_async() {
  let ast = parse_ok("async function f() { await a; }");
  let m = serde_json::to_value(&ast.module).unwrap();
  let e = &m["body"][0]["function"]["body"]["Block"][0]["expr"];
  assert_eq!(e["$t"], "Unary");
  assert_eq!(e["operator"], "Await");

  let ast = parse_ok("await;");
  assert_eq!(ast.symbols.var(undeclared(&ast, module_scope(&ast), "await")).uses, 1);
}

#[test]
fn super_requires_a_property_or_call() {
  parse_ok("class A extends B { m() { super.m(); } }");
  assert_eq!(err_type("super;"), SyntaxErrorType::ExpectedSyntax("super property or call"));
}

#[test]
fn function_and_class_expressions() {
  let e = expr_json("(function () {});");
  assert_eq!(e["expression"]["$t"], "Func");
  assert_eq!(e["expression"]["name"], Value::Null);

  let e = expr_json("(class A extends B {});");
  assert_eq!(e["expression"]["$t"], "Class");
  assert_eq!(e["expression"]["extends"]["$t"], "Id");
}

#[test]
fn in_operator_outside_for_heads() {
  let e = expr_json("a in b;");
  assert_eq!(e["operator"], "In");
}
