use ast::node::Node;
use ast::stx::Module;
use error::SyntaxError;
use lex::Lexer;
use parse::Parser;
use symbol::SymbolTable;
use token::TokenSource;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod operator;
pub mod parse;
pub mod symbol;
pub mod token;

/// A parsed module together with its resolved symbols.
pub struct Ast {
  pub symbols: SymbolTable,
  pub module: Node<Module>,
}

/// Parses a module from source text. On a syntax error, the error is returned
/// alongside the partial tree parsed up to that point; the module and its
/// scopes are always navigable.
pub fn parse(source: &str) -> (Ast, Option<SyntaxError>) {
  parse_with(Lexer::new(source))
}

/// Parses a module from any token source.
pub fn parse_with<T: TokenSource>(source: T) -> (Ast, Option<SyntaxError>) {
  let mut parser = Parser::new(source);
  let module = parser.parse_module();
  let (symbols, error) = parser.finish();
  (Ast { symbols, module }, error)
}
