#![cfg(test)]

use crate::lex::Lexer;
use crate::token::TokenSource;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lexer.next();
    assert_eq!(t.typ, expected, "in {:?}", code);
  }
  let t = lexer.next();
  assert_eq!(EOF, t.typ);
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass]);
  check("instanceof", [KeywordInstanceof]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("classes", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Dot, LiteralNumber]);
  check(". 929.2.", [Dot, LiteralNumber, Dot]);
  check(".929.2..", [LiteralNumber, LiteralNumber, Dot, Dot]);
  check(".929. 2..", [LiteralNumber, Dot, LiteralNumber, Dot]);
  check("?.929", [Question, LiteralNumber]);
  check("?..929", [QuestionDot, LiteralNumber]);
  check("?...929", [QuestionDot, Dot, LiteralNumber]);
  check("?...929.", [QuestionDot, Dot, LiteralNumber, Dot]);
}

#[test]
fn test_lex_literal_bigints() {
  check("1n", [LiteralBigInt]);
  check("929n", [LiteralBigInt]);
  check("0x800faceb00cn", [LiteralBigInt]);
  check("0b110101010n", [LiteralBigInt]);
  check("0o12077n", [LiteralBigInt]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check("'hello world\n'", [Invalid]);
}

#[test]
fn test_lex_templates() {
  check("`hello`", [LiteralTemplate]);
  check("`a${b}c`", [
    LiteralTemplateStart,
    Identifier,
    LiteralTemplateEnd,
  ]);
  check("`a${b}${c}d`", [
    LiteralTemplateStart,
    Identifier,
    LiteralTemplateMiddle,
    Identifier,
    LiteralTemplateEnd,
  ]);
  // Braces nested inside a substitution don't end it.
  check("`${ {a: {}} }`", [
    LiteralTemplateStart,
    BraceOpen,
    Identifier,
    Colon,
    BraceOpen,
    BraceClose,
    BraceClose,
    LiteralTemplateEnd,
  ]);
  check("`${`x${y}`}`", [
    LiteralTemplateStart,
    LiteralTemplateStart,
    Identifier,
    LiteralTemplateEnd,
    LiteralTemplateEnd,
  ]);
}

#[test]
fn test_lex_line_terminator_flag() {
  let mut lexer = Lexer::new("a\nb /* x\ny */ c d");
  assert!(!lexer.next().preceded_by_line_terminator);
  assert!(lexer.next().preceded_by_line_terminator);
  assert!(lexer.next().preceded_by_line_terminator);
  assert!(!lexer.next().preceded_by_line_terminator);
}

#[test]
fn test_relex_regex() {
  let mut lexer = Lexer::new("/a[/]b/g + 1");
  let t = lexer.next();
  assert_eq!(t.typ, Slash);
  let t = lexer.relex_regex(t.loc.0);
  assert_eq!(t.typ, LiteralRegex);
  assert_eq!(lexer.str(t.loc), "/a[/]b/g");
  assert_eq!(lexer.next().typ, Plus);
  assert_eq!(lexer.next().typ, LiteralNumber);
}

#[test]
fn test_lex_import_statement() {
  check("import * as a from \"./a\";", [
    KeywordImport,
    Asterisk,
    KeywordAs,
    Identifier,
    KeywordFrom,
    LiteralString,
    Semicolon,
  ]);
}
