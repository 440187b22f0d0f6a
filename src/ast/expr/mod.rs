pub mod lit;
pub mod pat;

use derive_more::derive::{From, TryInto};
use derive_visitor::{Drive, DriveMut};
use lit::{
  LitArrExpr, LitBigIntExpr, LitBoolExpr, LitNullExpr, LitNumExpr, LitObjExpr, LitRegexExpr,
  LitStrExpr, LitTemplateExpr, LitTemplatePart,
};
use pat::ClassOrFuncName;
use serde::Serialize;

use crate::operator::OperatorName;
use crate::symbol::VarRef;

use super::{class_or_object::ClassMember, func::Func, node::Node};

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Group(Node<GroupExpr>),
  Id(Node<IdExpr>),
  Import(Node<ImportExpr>),
  ImportMeta(Node<ImportMeta>),
  Member(Node<MemberExpr>),
  New(Node<NewExpr>),
  NewTarget(Node<NewTarget>),
  Super(Node<SuperExpr>),
  TaggedTemplate(Node<TaggedTemplateExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),
  Yield(Node<YieldExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBigInt(Node<LitBigIntExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  LitTemplate(Node<LitTemplateExpr>),
}

impl Expr {
  /// Whether this expression may syntactically appear on the left of an
  /// assignment operator. Array and object literals qualify as destructuring
  /// targets.
  pub fn is_valid_assignment_target(&self) -> bool {
    matches!(
      self,
      Expr::Id(_)
        | Expr::Member(_)
        | Expr::ComputedMember(_)
        | Expr::Group(_)
        | Expr::LitArr(_)
        | Expr::LitObj(_)
    )
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallArg {
  #[drive(skip)]
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ComputedMemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncExpr {
  // Declared inside the function's own scope, visible only there.
  pub name: Option<Node<ClassOrFuncName>>,
  pub func: Node<Func>,
}

// A parenthesized expression. Kept as its own node so that a rejected arrow
// parameter list keeps its source shape.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct GroupExpr {
  pub expression: Node<Expr>,
}

// A usage of a variable; the name lives in the symbol table.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub var: VarRef,
}

// `import(module)`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportExpr {
  pub module: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportMeta {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub left: Node<Expr>,
  // Dedicated string instead of IdExpr: a member name is not a variable usage.
  #[drive(skip)]
  pub right: String,
}

// `new` with the argument list distinguished: `new a` has no list, `new a()`
// has an empty one.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NewExpr {
  pub callee: Node<Expr>,
  pub arguments: Option<Vec<Node<CallArg>>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NewTarget {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SuperExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ThisExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TaggedTemplateExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub function: Node<Expr>,
  pub parts: Vec<LitTemplatePart>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryPostfixExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct YieldExpr {
  #[drive(skip)]
  pub delegate: bool,
  pub argument: Option<Node<Expr>>,
}
