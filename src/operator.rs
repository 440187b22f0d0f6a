use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  NullishCoalescing,
  OptionalChainingCall,
  OptionalChainingComputedMemberAccess,
  OptionalChainingMemberAccess,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
  YieldDelegated,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    use OperatorName::*;
    matches!(
      self,
      Assignment
        | AssignmentAddition
        | AssignmentBitwiseAnd
        | AssignmentBitwiseLeftShift
        | AssignmentBitwiseOr
        | AssignmentBitwiseRightShift
        | AssignmentBitwiseUnsignedRightShift
        | AssignmentBitwiseXor
        | AssignmentDivision
        | AssignmentExponentiation
        | AssignmentLogicalAnd
        | AssignmentLogicalOr
        | AssignmentMultiplication
        | AssignmentNullishCoalescing
        | AssignmentRemainder
        | AssignmentSubtraction
    )
  }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

pub struct Operator {
  pub name: OperatorName,
  pub precedence: u8,
  pub associativity: Associativity,
}

/// Minimum precedence admitting every expression, including comma sequences.
pub const PREC_EXPR: u8 = 1;
/// Minimum precedence admitting assignment expressions (and `yield`) but not
/// comma sequences. This is the level of list elements, arguments, and
/// initializers.
pub const PREC_ASSIGN: u8 = 3;

const PREC_CONDITIONAL: u8 = 4;
pub const PREC_COALESCE: u8 = 5;
pub const PREC_BITWISE_OR: u8 = 8;
pub const PREC_UNARY: u8 = 17;
pub const PREC_POSTFIX: u8 = 18;
// Call/new level; `new` without arguments resolves at this level so a later
// argument list cannot attach to it.
pub const PREC_LHS: u8 = 19;
pub const PREC_MEMBER: u8 = 20;
// Not a real operator level: the left-operand rank of a primary expression,
// above every operator. The suffix loop tracks the rank of what it has built
// so far to reject operands that cannot take a given operator (`yield`, arrow
// functions).
pub const PREC_PRIMARY: u8 = 21;

pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let defs: &[(OperatorName, u8, Associativity)] = &[
    (Comma, PREC_EXPR, Left),
    (Yield, PREC_ASSIGN, Right),
    (YieldDelegated, PREC_ASSIGN, Right),
    (Assignment, PREC_ASSIGN, Right),
    (AssignmentAddition, PREC_ASSIGN, Right),
    (AssignmentBitwiseAnd, PREC_ASSIGN, Right),
    (AssignmentBitwiseLeftShift, PREC_ASSIGN, Right),
    (AssignmentBitwiseOr, PREC_ASSIGN, Right),
    (AssignmentBitwiseRightShift, PREC_ASSIGN, Right),
    (AssignmentBitwiseUnsignedRightShift, PREC_ASSIGN, Right),
    (AssignmentBitwiseXor, PREC_ASSIGN, Right),
    (AssignmentDivision, PREC_ASSIGN, Right),
    (AssignmentExponentiation, PREC_ASSIGN, Right),
    (AssignmentLogicalAnd, PREC_ASSIGN, Right),
    (AssignmentLogicalOr, PREC_ASSIGN, Right),
    (AssignmentMultiplication, PREC_ASSIGN, Right),
    (AssignmentNullishCoalescing, PREC_ASSIGN, Right),
    (AssignmentRemainder, PREC_ASSIGN, Right),
    (AssignmentSubtraction, PREC_ASSIGN, Right),
    (Conditional, PREC_CONDITIONAL, Right),
    (NullishCoalescing, PREC_COALESCE, Left),
    (LogicalOr, 6, Left),
    (LogicalAnd, 7, Left),
    (BitwiseOr, PREC_BITWISE_OR, Left),
    (BitwiseXor, 9, Left),
    (BitwiseAnd, 10, Left),
    (Equality, 11, Left),
    (Inequality, 11, Left),
    (StrictEquality, 11, Left),
    (StrictInequality, 11, Left),
    (GreaterThan, 12, Left),
    (GreaterThanOrEqual, 12, Left),
    (In, 12, Left),
    (Instanceof, 12, Left),
    (LessThan, 12, Left),
    (LessThanOrEqual, 12, Left),
    (BitwiseLeftShift, 13, Left),
    (BitwiseRightShift, 13, Left),
    (BitwiseUnsignedRightShift, 13, Left),
    (Addition, 14, Left),
    (Subtraction, 14, Left),
    (Division, 15, Left),
    (Multiplication, 15, Left),
    (Remainder, 15, Left),
    (Exponentiation, 16, Right),
    (Await, PREC_UNARY, Right),
    (BitwiseNot, PREC_UNARY, Right),
    (Delete, PREC_UNARY, Right),
    (LogicalNot, PREC_UNARY, Right),
    (PrefixDecrement, PREC_UNARY, Right),
    (PrefixIncrement, PREC_UNARY, Right),
    (Typeof, PREC_UNARY, Right),
    (UnaryNegation, PREC_UNARY, Right),
    (UnaryPlus, PREC_UNARY, Right),
    (Void, PREC_UNARY, Right),
    (PostfixDecrement, PREC_POSTFIX, Left),
    (PostfixIncrement, PREC_POSTFIX, Left),
    (New, PREC_LHS, Right),
    (Call, PREC_MEMBER, Left),
    (ComputedMemberAccess, PREC_MEMBER, Left),
    (MemberAccess, PREC_MEMBER, Left),
    (OptionalChainingCall, PREC_MEMBER, Left),
    (OptionalChainingComputedMemberAccess, PREC_MEMBER, Left),
    (OptionalChainingMemberAccess, PREC_MEMBER, Left),
  ];
  let mut map = HashMap::<OperatorName, Operator>::new();
  for &(name, precedence, associativity) in defs {
    map.insert(name, Operator {
      name,
      precedence,
      associativity,
    });
  }
  map
});
