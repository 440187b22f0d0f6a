use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::symbol::ScopeRef;
use crate::symbol::SymbolTable;
use crate::symbol::VarKind;
use crate::symbol::VarRef;
use crate::token::Token;
use crate::token::TokenSource;
use crate::token::TT;

pub mod class_or_object;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod operator;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

// The parser pulls tokens one at a time and never buffers or rewinds; the
// grammar's ambiguities are handled by speculative scope bookkeeping
// (assume_arrow_func) and the lexer's relex_regex, not by backtracking.
//
// We extend this struct with added methods in the various submodules, instead of simply using free
// functions and passing `&mut Parser` around, for several reasons:
// - More lifetime elision is available for `self` than if it was just another reference parameter.
// - Don't need to import each function.
// - For general consistency; if there's no reason why it should be a free function (e.g. more than
//   one ambiguous base type), it should be a method.
pub struct Parser<T: TokenSource> {
  source: T,
  // The current (not yet consumed) token. Once a syntax error has been
  // recorded this is frozen to TT::EOF so that every production unwinds.
  tok: Token,
  // End offset of the most recently consumed token; used to close node locs.
  prev_end: usize,
  table: SymbolTable,
  scope: ScopeRef,
  // Suppresses the `in` operator while parsing a `for (...)` head.
  in_for: bool,
  // Whether the innermost function is async/a generator; decides whether
  // `await`/`yield` are operators or identifiers. Saved and restored around
  // every function boundary.
  async_: bool,
  generator: bool,
  // Set while speculatively parsing a parenthesized expression that may turn
  // out to be an arrow parameter list. Bare identifiers in binding positions
  // are then declared as arguments of the speculative scope, and any
  // construct that cannot appear in a parameter list clears the flag.
  assume_arrow_func: bool,
  error: Option<SyntaxError>,
}

impl<T: TokenSource> Parser<T> {
  pub fn new(mut source: T) -> Parser<T> {
    let tok = source.next();
    let mut table = SymbolTable::new();
    let scope = table.create_scope(None, true);
    let mut p = Parser {
      source,
      tok,
      prev_end: 0,
      table,
      scope,
      in_for: false,
      async_: false,
      generator: false,
      assume_arrow_func: false,
      error: None,
    };
    if p.tok.typ == TT::Invalid {
      let err = p.tok.error(SyntaxErrorType::LexError);
      p.fail(err);
    };
    p
  }

  /// The symbol table and the first error, ending this parse.
  pub fn finish(self) -> (SymbolTable, Option<SyntaxError>) {
    (self.table, self.error)
  }

  fn tt(&self) -> TT {
    self.tok.typ
  }

  fn loc(&self) -> Loc {
    self.tok.loc
  }

  /// Consumes and returns the current token.
  fn next(&mut self) -> Token {
    let t = self.tok.clone();
    self.prev_end = t.loc.1;
    if t.typ != TT::EOF {
      self.tok = self.source.next();
      if self.tok.typ == TT::Invalid {
        let err = self.tok.error(SyntaxErrorType::LexError);
        self.fail(err);
      };
    };
    t
  }

  /// Records the first error and freezes the token stream, so that every
  /// in-flight production unwinds off the synthetic EOF.
  pub fn fail(&mut self, err: SyntaxError) {
    if self.error.is_none() {
      self.error = Some(err);
    };
    self.tok.typ = TT::EOF;
  }

  fn err_unexpected(&mut self) {
    let typ = if self.tok.typ == TT::EOF {
      SyntaxErrorType::UnexpectedEnd
    } else {
      SyntaxErrorType::UnexpectedToken
    };
    let err = self.tok.error(typ);
    self.fail(err);
  }

  fn err_expected(&mut self, expected: &'static str) {
    let typ = if self.tok.typ == TT::EOF {
      SyntaxErrorType::UnexpectedEnd
    } else {
      SyntaxErrorType::ExpectedSyntax(expected)
    };
    let err = self.tok.error(typ);
    self.fail(err);
  }

  fn at(&self, typ: TT) -> bool {
    self.tok.typ == typ
  }

  /// Consumes the current token if it matches.
  fn eat(&mut self, typ: TT) -> bool {
    if self.tok.typ == typ {
      self.next();
      true
    } else {
      false
    }
  }

  /// Consumes the current token, which must match, or fails.
  fn require(&mut self, typ: TT) -> Token {
    if self.tok.typ == typ {
      self.next()
    } else {
      let err = self.tok.error(SyntaxErrorType::RequiredTokenNotFound(typ));
      self.fail(err);
      self.tok.clone()
    }
  }

  pub fn str(&self, loc: Loc) -> &str {
    self.source.str(loc)
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  /// Start offset of the current token; pair with [`Parser::since`].
  fn start(&self) -> usize {
    self.tok.loc.0
  }

  /// The range from `start` through the last consumed token.
  fn since(&self, start: usize) -> Loc {
    Loc(start, self.prev_end.max(start))
  }

  fn enter_scope(&mut self, is_func: bool) -> ScopeRef {
    let scope = self.table.create_scope(Some(self.scope), is_func);
    self.scope = scope;
    scope
  }

  fn exit_scope(&mut self) {
    self.table.hoist_undeclared(self.scope);
    self.scope = self.table.scope(self.scope).parent.unwrap();
  }

  /// Declares the name at `loc` in the current scope. A conflicting
  /// redeclaration records the error; a detached entry keeps the tree
  /// navigable.
  fn declare_name(&mut self, kind: VarKind, loc: Loc) -> VarRef {
    let name = self.string(loc);
    match self.table.declare(self.scope, kind, &name) {
      Some(v) => v,
      None => {
        self.fail(loc.error(SyntaxErrorType::DuplicateDeclaration, None));
        self.table.add_var(kind, name)
      }
    }
  }

  /// Records a use of the name at `loc` in the current scope.
  fn use_name(&mut self, loc: Loc) -> VarRef {
    let name = self.string(loc);
    self.table.use_var(self.scope, &name)
  }

  /// Whether `tt` can reference a variable here; `yield`/`await` qualify
  /// outside generator/async functions respectively.
  fn is_identifier_reference(&self, tt: TT) -> bool {
    tt.is_identifier()
      || tt == TT::KeywordYield && !self.generator
      || tt == TT::KeywordAwait && !self.async_
  }
}
