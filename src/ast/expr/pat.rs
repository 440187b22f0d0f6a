use derive_more::derive::From;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use crate::ast::{class_or_object::ClassOrObjKey, node::Node};
use crate::symbol::VarRef;

use super::Expr;

#[derive(Debug, Drive, DriveMut, From, Serialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(ArrPat),
  Id(IdPat),
  Obj(ObjPat),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPat {
  // Elisions leave holes: `[a, , b]`.
  pub elements: Vec<Option<ArrPatElem>>,
  // The rest target may itself be a pattern: `[...[a, b]]`.
  pub rest: Option<Node<Pat>>,
}

// Not really a pattern but functions similarly so kept here in pat.rs.
// This exists as a separate AST node type for easy replacement when minifying.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrFuncName {
  #[drive(skip)]
  pub var: VarRef,
}

// A binding of a variable; the name lives in the symbol table.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub var: VarRef,
}

// For an object pattern, `...` must be followed by an identifier.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
  pub rest: Option<Node<IdPat>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPatProp {
  pub key: ClassOrObjKey,
  // If `shorthand`, `key` is Direct and `target` is an IdPat of the same
  // name. This way there is always a pattern that can be visited, instead of
  // also having to consider the key as a binding if shorthand.
  pub target: Node<Pat>,
  #[drive(skip)]
  pub shorthand: bool,
  pub default_value: Option<Node<Expr>>,
}
