use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the parser.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  DuplicateDeclaration,
  ExpectedSyntax(&'static str),
  InvalidArrowParameters,
  InvalidAssignmentTarget,
  LexError,
  LineTerminatorAfterArrowFunctionParameters,
  RequiredTokenNotFound(TT),
  UnexpectedEnd,
  UnexpectedToken,
}

/// The first syntax error encountered during a parse. `loc` is a byte-offset
/// range into the source; `actual_token` is the token the parser was looking
/// at when it gave up, if any.
#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} [token={:?}]", self.typ.message(), self.actual_token)
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

impl SyntaxErrorType {
  /// Human-readable message describing this syntax error.
  pub fn message(&self) -> String {
    match self {
      SyntaxErrorType::DuplicateDeclaration => "duplicate declaration".into(),
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {}", expected),
      SyntaxErrorType::InvalidArrowParameters => "invalid arrow function parameters".into(),
      SyntaxErrorType::InvalidAssignmentTarget => "invalid assignment target".into(),
      SyntaxErrorType::LexError => "invalid token".into(),
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        "line terminator not allowed after arrow function parameters".into()
      }
      SyntaxErrorType::RequiredTokenNotFound(token) => format!("expected token {:?}", token),
      SyntaxErrorType::UnexpectedEnd => "unexpected end of input".into(),
      SyntaxErrorType::UnexpectedToken => "unexpected token".into(),
    }
  }
}
