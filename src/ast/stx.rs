use super::node::Node;
use super::stmt::Stmt;
use crate::symbol::ScopeRef;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// The root of a parse. Undeclared entries remaining in `scope` after parsing
// are implicit globals.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Module {
  #[drive(skip)]
  pub scope: ScopeRef,
  pub body: Vec<Node<Stmt>>,
}
