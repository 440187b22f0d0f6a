use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::operator::PREC_ASSIGN;
use crate::parse::Parser;
use crate::symbol::VarKind;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// Parses a binding: an identifier, array pattern, or object pattern,
  /// declaring every bound name with `kind`.
  pub fn parse_binding_pat(&mut self, kind: VarKind) -> Node<Pat> {
    let start = self.start();
    if self.is_identifier_reference(self.tt()) {
      let t = self.next();
      let var = self.declare_name(kind, t.loc);
      return Node::new(t.loc, Pat::Id(IdPat { var }));
    };
    match self.tt() {
      TT::BracketOpen => {
        self.next();
        let mut elements = Vec::new();
        let mut rest = None;
        // A leading comma is an elision: `[, a]`.
        if self.at(TT::Comma) {
          elements.push(None);
        };
        while !self.at(TT::BracketClose) && !self.at(TT::EOF) {
          while self.eat(TT::Comma) {
            if self.at(TT::Comma) {
              elements.push(None);
            };
          }
          if self.eat(TT::DotDotDot) {
            // The rest target may itself be a pattern and must come last.
            rest = Some(self.parse_binding_pat(kind));
            break;
          };
          if self.at(TT::BracketClose) {
            break;
          };
          let (target, default_value) = self.parse_binding_elem(kind);
          elements.push(Some(ArrPatElem {
            target,
            default_value,
          }));
          if !self.at(TT::Comma) && !self.at(TT::BracketClose) {
            break;
          };
        }
        self.require(TT::BracketClose);
        Node::new(self.since(start), Pat::Arr(ArrPat { elements, rest }))
      }
      TT::BraceOpen => {
        self.next();
        let mut properties = Vec::new();
        let mut rest = None;
        while !self.at(TT::BraceClose) && !self.at(TT::EOF) {
          if self.eat(TT::DotDotDot) {
            // A rest property must be a plain identifier, and must come last.
            if !self.is_identifier_reference(self.tt()) {
              self.err_expected("rest binding identifier");
              break;
            };
            let t = self.next();
            let var = self.declare_name(kind, t.loc);
            rest = Some(Node::new(t.loc, IdPat { var }));
            break;
          };
          let prop_start = self.start();
          let prop = if self.is_identifier_reference(self.tt()) {
            let t = self.next();
            let key = ClassOrObjKey::Direct(Node::new(t.loc, ClassOrObjMemberDirectKey {
              key: self.string(t.loc),
              tt: t.typ,
            }));
            if self.eat(TT::Colon) {
              let (target, default_value) = self.parse_binding_elem(kind);
              ObjPatProp {
                key,
                target,
                shorthand: false,
                default_value,
              }
            } else {
              // Single name binding, with an optional default.
              let var = self.declare_name(kind, t.loc);
              let target = Node::new(t.loc, Pat::Id(IdPat { var }));
              let default_value = if self.eat(TT::Equals) {
                Some(self.parse_expr(PREC_ASSIGN))
              } else {
                None
              };
              ObjPatProp {
                key,
                target,
                shorthand: true,
                default_value,
              }
            }
          } else {
            let key = self.parse_class_or_obj_key();
            self.require(TT::Colon);
            let (target, default_value) = self.parse_binding_elem(kind);
            ObjPatProp {
              key,
              target,
              shorthand: false,
              default_value,
            }
          };
          properties.push(Node::new(self.since(prop_start), prop));
          if !self.eat(TT::Comma) && !self.at(TT::BraceClose) {
            break;
          };
        }
        self.require(TT::BraceClose);
        Node::new(self.since(start), Pat::Obj(ObjPat { properties, rest }))
      }
      _ => {
        self.err_expected("binding");
        self.placeholder_pat()
      }
    }
  }

  /// A binding with an optional `= default` initializer.
  pub fn parse_binding_elem(&mut self, kind: VarKind) -> (Node<Pat>, Option<Node<Expr>>) {
    let target = self.parse_binding_pat(kind);
    let default_value = if self.eat(TT::Equals) {
      Some(self.parse_expr(PREC_ASSIGN))
    } else {
      None
    };
    (target, default_value)
  }

  pub(in crate::parse) fn placeholder_pat(&mut self) -> Node<Pat> {
    let var = self.table.add_var(VarKind::Undeclared, String::new());
    Node::new(Loc(self.prev_end, self.prev_end), Pat::Id(IdPat { var }))
  }

  /// Converts one item of a speculatively parsed parenthesized expression
  /// into an arrow parameter once `=>` is confirmed. This cannot fail for
  /// anything parsed while `assume_arrow_func` stayed set, as only
  /// binding-compatible forms keep the flag.
  pub fn expr_to_param(&mut self, expr: Node<Expr>) -> Node<ParamDecl> {
    let loc = expr.loc;
    let (pat, default_value) = self.expr_to_binding_elem(expr);
    let pattern = pat.wrap(|pat| PatDecl { pat });
    Node::new(loc, ParamDecl {
      rest: false,
      pattern,
      default_value,
    })
  }

  /// Splits `target = default` into the target and the default.
  fn expr_to_binding_elem(&mut self, expr: Node<Expr>) -> (Node<Pat>, Option<Node<Expr>>) {
    let loc = expr.loc;
    match *expr.stx {
      Expr::Binary(b) if b.stx.operator == OperatorName::Assignment => {
        let BinaryExpr { left, right, .. } = *b.stx;
        (self.expr_to_binding(left), Some(right))
      }
      stx => (self.expr_to_binding(Node::new(loc, stx)), None),
    }
  }

  // The identifiers were already declared as arguments of the speculative
  // scope while parsing, so this only restructures nodes; every IdExpr
  // becomes an IdPat carrying the same variable.
  fn expr_to_binding(&mut self, expr: Node<Expr>) -> Node<Pat> {
    let loc = expr.loc;
    match *expr.stx {
      Expr::Id(id) => Node::new(loc, Pat::Id(IdPat { var: id.stx.var })),
      Expr::LitArr(arr) => {
        let mut elements = Vec::new();
        let mut rest = None;
        for elem in arr.stx.elements {
          match elem {
            LitArrElem::Single(value) => {
              let (target, default_value) = self.expr_to_binding_elem(value);
              elements.push(Some(ArrPatElem {
                target,
                default_value,
              }));
            }
            LitArrElem::Rest(value) => {
              rest = Some(self.expr_to_binding(value));
              break;
            }
            LitArrElem::Empty => elements.push(None),
          };
        }
        Node::new(loc, Pat::Arr(ArrPat { elements, rest }))
      }
      Expr::LitObj(obj) => {
        let mut properties = Vec::new();
        let mut rest = None;
        for member in obj.stx.members {
          let member_loc = member.loc;
          match member.stx.typ {
            ObjMemberType::Valued { key, val } => match val {
              ClassOrObjVal::Prop(Some(value)) => {
                let (target, default_value) = self.expr_to_binding_elem(value);
                properties.push(Node::new(member_loc, ObjPatProp {
                  key,
                  target,
                  shorthand: false,
                  default_value,
                }));
              }
              _ => {
                self.fail(member_loc.error(SyntaxErrorType::InvalidArrowParameters, None));
              }
            },
            ObjMemberType::Shorthand { id, default_value } => {
              let id_loc = id.loc;
              let var = id.stx.var;
              let key = ClassOrObjKey::Direct(Node::new(id_loc, ClassOrObjMemberDirectKey {
                key: self.table.name(var).to_string(),
                tt: TT::Identifier,
              }));
              let target = Node::new(id_loc, Pat::Id(IdPat { var }));
              properties.push(Node::new(member_loc, ObjPatProp {
                key,
                target,
                shorthand: true,
                default_value,
              }));
            }
            ObjMemberType::Rest { val } => {
              let val_loc = val.loc;
              match *val.stx {
                Expr::Id(id) => rest = Some(Node::new(val_loc, IdPat { var: id.stx.var })),
                _ => self.fail(val_loc.error(SyntaxErrorType::InvalidArrowParameters, None)),
              };
              break;
            }
          };
        }
        Node::new(loc, Pat::Obj(ObjPat { properties, rest }))
      }
      _ => {
        self.fail(loc.error(SyntaxErrorType::InvalidArrowParameters, None));
        self.placeholder_pat()
      }
    }
  }
}
