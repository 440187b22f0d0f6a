use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::ast::stx::Module;
use crate::loc::Loc;
use crate::parse::Parser;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// Parses an entire module. Always returns a Module, even after a syntax
  /// error; parsing stops at the first error and the remaining statements are
  /// simply absent.
  pub fn parse_module(&mut self) -> Node<Module> {
    let scope = self.scope;
    let mut body: Vec<Node<Stmt>> = Vec::new();
    while !self.at(TT::EOF) {
      let stmt = match self.tt() {
        TT::KeywordImport => self.parse_import_stmt(),
        TT::KeywordExport => self.parse_export_stmt(),
        _ => self.parse_stmt(true),
      };
      body.push(stmt);
    }
    let end = self.prev_end;
    Node::new(Loc(0, end), Module { scope, body })
  }
}
