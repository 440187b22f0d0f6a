pub mod lit;
pub mod pat;

use crate::ast::expr::lit::LitBigIntExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::LitTemplateExpr;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::GroupExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::ImportExpr;
use crate::ast::expr::ImportMeta;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::NewTarget;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TaggedTemplateExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::expr::YieldExpr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::PREC_ASSIGN;
use crate::operator::PREC_BITWISE_OR;
use crate::operator::PREC_COALESCE;
use crate::operator::PREC_EXPR;
use crate::operator::PREC_LHS;
use crate::operator::PREC_MEMBER;
use crate::operator::PREC_POSTFIX;
use crate::operator::PREC_PRIMARY;
use crate::operator::PREC_UNARY;
use crate::parse::operator::MULTARY_OPERATOR_MAPPING;
use crate::parse::operator::UNARY_OPERATOR_MAPPING;
use crate::parse::Parser;
use crate::symbol::VarKind;
use crate::token::Token;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// Zero-width `null` standing in for an expression that failed to parse, so
  /// the tree stays navigable after an error.
  pub(in crate::parse) fn placeholder_expr(&mut self) -> Node<Expr> {
    let loc = Loc(self.prev_end, self.prev_end);
    Node::new(loc, LitNullExpr {}).wrap(Expr::from)
  }

  /// A `/` or `/=` at operand position cannot be a division; ask the lexer to
  /// re-read it as a regex literal.
  fn relex_regex_operand(&mut self) {
    let preceded_by_line_terminator = self.tok.preceded_by_line_terminator;
    self.tok = self.source.relex_regex(self.tok.loc.0);
    self.tok.preceded_by_line_terminator = preceded_by_line_terminator;
    if self.tok.typ == TT::Invalid {
      let err = self.tok.error(SyntaxErrorType::LexError);
      self.fail(err);
    };
  }

  /// Parses an expression using only operators of precedence `min_prec` or
  /// tighter.
  pub fn parse_expr(&mut self, min_prec: u8) -> Node<Expr> {
    if self.at(TT::Slash) || self.at(TT::SlashEquals) {
      self.relex_regex_operand();
    };
    let start = self.start();

    if self.tt().is_identifier() && !self.at(TT::KeywordAsync) {
      let t = self.next();
      return self.parse_identifier_expr(t, min_prec);
    };

    let (left, prec_left): (Node<Expr>, u8) = match self.tt() {
      TT::LiteralNumber => {
        let t = self.next();
        let value = self.string(t.loc);
        (
          Node::new(t.loc, LitNumExpr { value }).wrap(Expr::from),
          PREC_PRIMARY,
        )
      }
      TT::LiteralBigInt => {
        let t = self.next();
        let value = self.string(t.loc);
        (
          Node::new(t.loc, LitBigIntExpr { value }).wrap(Expr::from),
          PREC_PRIMARY,
        )
      }
      TT::LiteralString => {
        let t = self.next();
        let value = self.delimited_text(t.loc, 1, 1);
        (
          Node::new(t.loc, LitStrExpr { value }).wrap(Expr::from),
          PREC_PRIMARY,
        )
      }
      TT::LiteralTrue | TT::LiteralFalse => {
        let t = self.next();
        let value = t.typ == TT::LiteralTrue;
        (
          Node::new(t.loc, LitBoolExpr { value }).wrap(Expr::from),
          PREC_PRIMARY,
        )
      }
      TT::LiteralNull => {
        let t = self.next();
        (Node::new(t.loc, LitNullExpr {}).wrap(Expr::from), PREC_PRIMARY)
      }
      TT::LiteralRegex => {
        let t = self.next();
        let value = self.string(t.loc);
        (
          Node::new(t.loc, LitRegexExpr { value }).wrap(Expr::from),
          PREC_PRIMARY,
        )
      }
      TT::KeywordThis => {
        let t = self.next();
        (Node::new(t.loc, ThisExpr {}).wrap(Expr::from), PREC_PRIMARY)
      }
      TT::BracketOpen => (self.parse_lit_arr().wrap(Expr::from), PREC_PRIMARY),
      TT::BraceOpen => (self.parse_lit_obj().wrap(Expr::from), PREC_PRIMARY),
      TT::LiteralTemplate | TT::LiteralTemplateStart => {
        let parts = self.parse_template_parts();
        (
          Node::new(self.since(start), LitTemplateExpr { parts }).wrap(Expr::from),
          PREC_PRIMARY,
        )
      }
      TT::ParenthesisOpen => {
        if PREC_ASSIGN < min_prec {
          // An arrow function could not appear here, so this must be a
          // parenthesized expression.
          self.next();
          let expression = self.parse_expr(PREC_EXPR);
          self.require(TT::ParenthesisClose);
          (
            Node::new(self.since(start), GroupExpr { expression }).wrap(Expr::from),
            PREC_PRIMARY,
          )
        } else {
          return self.parse_paren_or_arrow(min_prec);
        }
      }
      TT::Exclamation
      | TT::Tilde
      | TT::Plus
      | TT::Hyphen
      | TT::KeywordTypeof
      | TT::KeywordVoid
      | TT::KeywordDelete => {
        if PREC_UNARY < min_prec {
          self.err_unexpected();
          return self.placeholder_expr();
        };
        let t = self.next();
        let operator = UNARY_OPERATOR_MAPPING[&t.typ].name;
        let argument = self.parse_expr(PREC_UNARY);
        (
          Node::new(self.since(start), UnaryExpr { operator, argument }).wrap(Expr::from),
          PREC_UNARY,
        )
      }
      TT::PlusPlus | TT::HyphenHyphen => {
        if PREC_POSTFIX < min_prec {
          self.err_unexpected();
          return self.placeholder_expr();
        };
        let t = self.next();
        let operator = UNARY_OPERATOR_MAPPING[&t.typ].name;
        let argument = self.parse_expr(PREC_UNARY);
        (
          Node::new(self.since(start), UnaryExpr { operator, argument }).wrap(Expr::from),
          PREC_UNARY,
        )
      }
      TT::KeywordAwait => {
        if self.async_ && min_prec <= PREC_UNARY {
          self.next();
          let argument = self.parse_expr(PREC_UNARY);
          (
            Node::new(self.since(start), UnaryExpr {
              operator: OperatorName::Await,
              argument,
            })
            .wrap(Expr::from),
            PREC_UNARY,
          )
        } else if self.async_ {
          self.err_unexpected();
          return self.placeholder_expr();
        } else {
          // Outside async contexts `await` is an ordinary identifier.
          let t = self.next();
          return self.parse_identifier_expr(t, min_prec);
        }
      }
      TT::KeywordYield => {
        if self.generator && min_prec <= PREC_ASSIGN {
          self.next();
          let mut delegate = false;
          let mut argument = None;
          if !self.tok.preceded_by_line_terminator {
            delegate = self.eat(TT::Asterisk);
            if delegate || self.can_start_expr() {
              argument = Some(self.parse_expr(PREC_ASSIGN));
            };
          };
          (
            Node::new(self.since(start), YieldExpr { delegate, argument }).wrap(Expr::from),
            PREC_ASSIGN,
          )
        } else if self.generator {
          self.err_unexpected();
          return self.placeholder_expr();
        } else {
          let t = self.next();
          return self.parse_identifier_expr(t, min_prec);
        }
      }
      TT::KeywordAsync => {
        let t = self.next();
        return self.parse_async_expr(min_prec, t);
      }
      TT::KeywordNew => {
        self.next();
        if self.eat(TT::Dot) {
          if self.at(TT::Identifier) && self.str(self.loc()) == "target" {
            self.next();
            (
              Node::new(self.since(start), NewTarget {}).wrap(Expr::from),
              PREC_MEMBER,
            )
          } else {
            self.err_expected("new.target");
            return self.placeholder_expr();
          }
        } else {
          // The callee stops before any argument list, so a `(` afterwards
          // belongs to this `new`.
          let callee = self.parse_expr(PREC_MEMBER);
          let (arguments, prec) = if self.at(TT::ParenthesisOpen) {
            (Some(self.parse_call_args()), PREC_MEMBER)
          } else {
            (None, PREC_LHS)
          };
          (
            Node::new(self.since(start), NewExpr { callee, arguments }).wrap(Expr::from),
            prec,
          )
        }
      }
      TT::KeywordImport => {
        self.next();
        let (left, prec_left) = self.parse_import_expr_tail(start);
        return self.parse_expr_suffix(left, prec_left, min_prec);
      }
      TT::KeywordSuper => {
        let t = self.next();
        if !matches!(self.tt(), TT::Dot | TT::BracketOpen | TT::ParenthesisOpen) {
          self.err_expected("super property or call");
          return self.placeholder_expr();
        };
        (Node::new(t.loc, SuperExpr {}).wrap(Expr::from), PREC_LHS)
      }
      TT::KeywordFunction => {
        let (name, func) = self.parse_func(false, true);
        (
          Node::new(self.since(start), FuncExpr { name, func }).wrap(Expr::from),
          PREC_PRIMARY,
        )
      }
      TT::KeywordClass => {
        let (name, extends, members) = self.parse_class_parts(true);
        (
          Node::new(self.since(start), ClassExpr {
            name,
            extends,
            members,
          })
          .wrap(Expr::from),
          PREC_PRIMARY,
        )
      }
      _ => {
        self.err_expected("expression");
        return self.placeholder_expr();
      }
    };
    self.parse_expr_suffix(left, prec_left, min_prec)
  }

  /// Continues `left` with member accesses, calls, and binary operators.
  /// `prec_left` is the precedence rank `left` resolved at, which gates which
  /// suffixes may legally attach to it.
  pub(in crate::parse) fn parse_expr_suffix(
    &mut self,
    mut left: Node<Expr>,
    mut prec_left: u8,
    min_prec: u8,
  ) -> Node<Expr> {
    let start = left.loc.0;
    loop {
      match self.tt() {
        TT::Dot => {
          if prec_left < PREC_LHS {
            self.err_unexpected();
            return left;
          };
          self.next();
          if !self.tt().is_identifier_name() {
            self.err_expected("member name");
            return left;
          };
          let t = self.next();
          let right = self.string(t.loc);
          left = Node::new(self.since(start), MemberExpr {
            optional_chaining: false,
            left,
            right,
          })
          .wrap(Expr::from);
          prec_left = PREC_MEMBER;
        }
        TT::BracketOpen => {
          if prec_left < PREC_LHS {
            self.err_unexpected();
            return left;
          };
          self.next();
          let member = self.parse_expr(PREC_EXPR);
          self.require(TT::BracketClose);
          left = Node::new(self.since(start), ComputedMemberExpr {
            optional_chaining: false,
            object: left,
            member,
          })
          .wrap(Expr::from);
          prec_left = PREC_MEMBER;
        }
        TT::ParenthesisOpen => {
          if PREC_LHS < min_prec {
            return left;
          };
          if prec_left < PREC_LHS {
            self.err_unexpected();
            return left;
          };
          let arguments = self.parse_call_args();
          left = Node::new(self.since(start), CallExpr {
            optional_chaining: false,
            callee: left,
            arguments,
          })
          .wrap(Expr::from);
          prec_left = PREC_LHS;
        }
        TT::LiteralTemplate | TT::LiteralTemplateStart => {
          if prec_left < PREC_LHS {
            self.err_unexpected();
            return left;
          };
          let parts = self.parse_template_parts();
          left = Node::new(self.since(start), TaggedTemplateExpr {
            optional_chaining: false,
            function: left,
            parts,
          })
          .wrap(Expr::from);
          prec_left = PREC_MEMBER;
        }
        TT::QuestionDot => {
          if PREC_LHS < min_prec {
            return left;
          };
          self.next();
          match self.tt() {
            TT::LiteralTemplate | TT::LiteralTemplateStart => {
              let parts = self.parse_template_parts();
              left = Node::new(self.since(start), TaggedTemplateExpr {
                optional_chaining: true,
                function: left,
                parts,
              })
              .wrap(Expr::from);
            }
            tt if tt.is_identifier_name() => {
              let t = self.next();
              let right = self.string(t.loc);
              left = Node::new(self.since(start), MemberExpr {
                optional_chaining: true,
                left,
                right,
              })
              .wrap(Expr::from);
            }
            _ => {
              self.err_expected("member name");
              return left;
            }
          };
          prec_left = PREC_LHS;
        }
        TT::QuestionDotBracketOpen => {
          if PREC_LHS < min_prec {
            return left;
          };
          self.next();
          let member = self.parse_expr(PREC_EXPR);
          self.require(TT::BracketClose);
          left = Node::new(self.since(start), ComputedMemberExpr {
            optional_chaining: true,
            object: left,
            member,
          })
          .wrap(Expr::from);
          prec_left = PREC_LHS;
        }
        TT::QuestionDotParenthesisOpen => {
          if PREC_LHS < min_prec {
            return left;
          };
          let arguments = self.parse_call_args();
          left = Node::new(self.since(start), CallExpr {
            optional_chaining: true,
            callee: left,
            arguments,
          })
          .wrap(Expr::from);
          prec_left = PREC_LHS;
        }
        TT::PlusPlus | TT::HyphenHyphen => {
          if self.tok.preceded_by_line_terminator || PREC_POSTFIX < min_prec {
            return left;
          };
          if prec_left < PREC_LHS {
            self.err_unexpected();
            return left;
          };
          let t = self.next();
          let operator = if t.typ == TT::PlusPlus {
            OperatorName::PostfixIncrement
          } else {
            OperatorName::PostfixDecrement
          };
          left = Node::new(self.since(start), UnaryPostfixExpr {
            operator,
            argument: left,
          })
          .wrap(Expr::from);
          prec_left = PREC_POSTFIX;
        }
        TT::Question => {
          if PREC_ASSIGN < min_prec {
            return left;
          };
          if prec_left < PREC_COALESCE {
            self.err_unexpected();
            return left;
          };
          self.next();
          let consequent = self.parse_expr(PREC_ASSIGN);
          self.require(TT::Colon);
          let alternate = self.parse_expr(PREC_ASSIGN);
          left = Node::new(self.since(start), CondExpr {
            test: left,
            consequent,
            alternate,
          })
          .wrap(Expr::from);
          prec_left = PREC_ASSIGN;
        }
        TT::EqualsChevronRight => {
          if PREC_ASSIGN < min_prec {
            return left;
          };
          let Expr::Id(id) = &*left.stx else {
            let err = self.tok.error(SyntaxErrorType::InvalidArrowParameters);
            self.fail(err);
            return left;
          };
          if prec_left < PREC_PRIMARY {
            self.err_unexpected();
            return left;
          };
          let var = id.stx.var;
          left = self.parse_identifier_arrow_func(var, left.loc);
          prec_left = PREC_ASSIGN;
        }
        tt => {
          let Some(op) = MULTARY_OPERATOR_MAPPING.get(&tt) else {
            return left;
          };
          if op.precedence < min_prec {
            return left;
          };
          if tt == TT::KeywordIn && self.in_for {
            // The `in` belongs to the enclosing `for` head.
            return left;
          };
          if op.name.is_assignment() {
            if !left.stx.is_valid_assignment_target() {
              let err = left.loc.error(SyntaxErrorType::InvalidAssignmentTarget, None);
              self.fail(err);
              return left;
            };
          } else if op.name == OperatorName::NullishCoalescing {
            // `a && b ?? c` must be parenthesized.
            if prec_left < PREC_BITWISE_OR && prec_left != PREC_COALESCE {
              self.err_unexpected();
              return left;
            };
          } else if op.name == OperatorName::Exponentiation {
            // An unparenthesized unary operand cannot take `**`.
            if prec_left < PREC_POSTFIX {
              self.err_unexpected();
              return left;
            };
          } else if prec_left < op.precedence {
            self.err_unexpected();
            return left;
          };
          self.next();
          let next_min = match op.associativity {
            Associativity::Left => op.precedence + 1,
            Associativity::Right => op.precedence,
          };
          let right = self.parse_expr(next_min);
          left = Node::new(self.since(start), BinaryExpr {
            operator: op.name,
            left,
            right,
          })
          .wrap(Expr::from);
          prec_left = op.precedence;
        }
      };
    }
  }

  /// Continues an already-consumed identifier token as an expression.
  pub(in crate::parse) fn parse_identifier_expr(&mut self, t: Token, min_prec: u8) -> Node<Expr> {
    let var = self.use_name(t.loc);
    let left = Node::new(t.loc, IdExpr { var }).wrap(Expr::from);
    self.parse_expr_suffix(left, PREC_PRIMARY, min_prec)
  }

  /// Whether the current token could begin an expression operand; used to
  /// decide if `yield` has an argument.
  fn can_start_expr(&self) -> bool {
    !matches!(
      self.tt(),
      TT::EOF
        | TT::Semicolon
        | TT::Comma
        | TT::Colon
        | TT::ParenthesisClose
        | TT::BracketClose
        | TT::BraceClose
        | TT::LiteralTemplateMiddle
        | TT::LiteralTemplateEnd
    )
  }

  /// `import.meta` or `import(module)`; the `import` keyword has already been
  /// consumed.
  pub(in crate::parse) fn parse_import_expr_tail(&mut self, start: usize) -> (Node<Expr>, u8) {
    if self.eat(TT::Dot) {
      if self.at(TT::Identifier) && self.str(self.loc()) == "meta" {
        self.next();
        (
          Node::new(self.since(start), ImportMeta {}).wrap(Expr::from),
          PREC_MEMBER,
        )
      } else {
        self.err_expected("import.meta");
        (self.placeholder_expr(), PREC_PRIMARY)
      }
    } else {
      self.require(TT::ParenthesisOpen);
      let module = self.parse_expr(PREC_ASSIGN);
      self.eat(TT::Comma);
      self.require(TT::ParenthesisClose);
      (
        Node::new(self.since(start), ImportExpr { module }).wrap(Expr::from),
        PREC_LHS,
      )
    }
  }

  /// Argument list of a call or `new`; the current token is the opening `(`,
  /// possibly as part of `?.(`.
  pub(in crate::parse) fn parse_call_args(&mut self) -> Vec<Node<CallArg>> {
    self.next();
    let mut args = Vec::new();
    while !self.at(TT::ParenthesisClose) && !self.at(TT::EOF) {
      let start = self.start();
      let spread = self.eat(TT::DotDotDot);
      let value = self.parse_expr(PREC_ASSIGN);
      args.push(Node::new(self.since(start), CallArg { spread, value }));
      if !self.eat(TT::Comma) {
        break;
      };
    }
    self.require(TT::ParenthesisClose);
    args
  }

  /// An assignment-level expression that may also turn out to be an arrow
  /// function parameter. While `assume_arrow_func` holds, a bare identifier
  /// followed by `=` `,` `)` `}` `]` is declared as an argument of the
  /// speculative scope; anything that rules an arrow out clears the flag.
  pub(in crate::parse) fn parse_assignment_or_param(&mut self) -> Node<Expr> {
    if self.assume_arrow_func && self.tt().is_identifier() {
      let t = self.next();
      if matches!(
        self.tt(),
        TT::Equals | TT::Comma | TT::ParenthesisClose | TT::BraceClose | TT::BracketClose
      ) {
        let var = self.declare_name(VarKind::Argument, t.loc);
        let left = Node::new(t.loc, IdExpr { var }).wrap(Expr::from);
        return self.parse_expr_suffix(left, PREC_PRIMARY, PREC_ASSIGN);
      };
      self.assume_arrow_func = false;
      if t.typ == TT::KeywordAsync {
        return self.parse_async_expr(PREC_ASSIGN, t);
      };
      return self.parse_identifier_expr(t, PREC_ASSIGN);
    };
    if !self.at(TT::BracketOpen) && !self.at(TT::BraceOpen) {
      self.assume_arrow_func = false;
    };
    self.parse_expr(PREC_ASSIGN)
  }

  /// Everything after an already-consumed `async` token: an async function
  /// expression, an async arrow function, or a plain use of the name `async`.
  pub(in crate::parse) fn parse_async_expr(&mut self, min_prec: u8, async_tok: Token) -> Node<Expr> {
    let start = async_tok.loc.0;
    let (left, prec_left) = if !self.tok.preceded_by_line_terminator && self.at(TT::KeywordFunction)
    {
      let (name, func) = self.parse_func(true, true);
      (
        Node::new(self.since(start), FuncExpr { name, func }).wrap(Expr::from),
        PREC_PRIMARY,
      )
    } else if !self.tok.preceded_by_line_terminator
      && min_prec <= PREC_ASSIGN
      && (self.at(TT::ParenthesisOpen)
        || self.tt().is_identifier()
        || !self.generator && self.at(TT::KeywordYield)
        || self.at(TT::KeywordAwait))
    {
      if self.at(TT::KeywordAwait) {
        // `async await => …` is never valid.
        self.err_expected("arrow function parameter");
        return self.placeholder_expr();
      };
      (self.parse_async_arrow_func(start), PREC_ASSIGN)
    } else {
      let var = self.use_name(async_tok.loc);
      (
        Node::new(async_tok.loc, IdExpr { var }).wrap(Expr::from),
        PREC_PRIMARY,
      )
    };
    self.parse_expr_suffix(left, prec_left, min_prec)
  }

  /// `(…)` at assignment level: either an arrow function's parameter list or
  /// a parenthesized expression. Parses the contents as expressions while
  /// speculatively declaring plausible bindings, then commits one way or the
  /// other on whether `=>` follows the `)`.
  fn parse_paren_or_arrow(&mut self, min_prec: u8) -> Node<Expr> {
    let start = self.start();
    self.next();
    let scope = self.enter_scope(true);
    let parent_assume = std::mem::replace(&mut self.assume_arrow_func, true);

    let mut list: Vec<Node<Expr>> = Vec::new();
    let mut rest: Option<(usize, Node<Pat>)> = None;
    while !self.at(TT::ParenthesisClose) && !self.at(TT::EOF) {
      if self.at(TT::DotDotDot) && self.assume_arrow_func {
        let rest_start = self.start();
        self.next();
        rest = Some((rest_start, self.parse_binding_pat(VarKind::Argument)));
        break;
      };
      list.push(self.parse_assignment_or_param());
      if !self.eat(TT::Comma) {
        break;
      };
    }
    self.require(TT::ParenthesisClose);

    if self.at(TT::EqualsChevronRight) && self.assume_arrow_func {
      let parent_async = std::mem::replace(&mut self.async_, false);
      let parent_generator = std::mem::replace(&mut self.generator, false);
      let parent_in_for = std::mem::replace(&mut self.in_for, false);
      self.assume_arrow_func = parent_assume;
      let mut parameters = Vec::new();
      for item in list {
        parameters.push(self.expr_to_param(item));
      }
      if let Some((rest_start, pat)) = rest {
        let pattern = pat.wrap(|pat| PatDecl { pat });
        parameters.push(Node::new(Loc(rest_start, pattern.loc.1), ParamDecl {
          rest: true,
          pattern,
          default_value: None,
        }));
      };
      let body = self.parse_arrow_body();
      self.async_ = parent_async;
      self.generator = parent_generator;
      self.in_for = parent_in_for;
      self.exit_scope();
      let loc = self.since(start);
      let func = Node::new(loc, Func {
        arrow: true,
        async_: false,
        generator: false,
        scope,
        parameters,
        body,
      });
      let left = Node::new(loc, ArrowFuncExpr { func }).wrap(Expr::from);
      self.parse_expr_suffix(left, PREC_ASSIGN, min_prec)
    } else if list.is_empty() || rest.is_some() {
      // `()` and rest elements only exist in parameter lists.
      self.assume_arrow_func = parent_assume;
      self.exit_scope();
      self.table.undeclare_scope(scope);
      let err = self
        .tok
        .error(SyntaxErrorType::RequiredTokenNotFound(TT::EqualsChevronRight));
      self.fail(err);
      self.placeholder_expr()
    } else {
      // Reject the speculation: demote the would-be parameters to uses of the
      // enclosing scopes.
      self.assume_arrow_func = parent_assume;
      self.exit_scope();
      self.table.undeclare_scope(scope);
      let mut iter = list.into_iter();
      let mut expression = iter.next().unwrap();
      for item in iter {
        let loc = Loc(expression.loc.0, item.loc.1);
        expression = Node::new(loc, BinaryExpr {
          operator: OperatorName::Comma,
          left: expression,
          right: item,
        })
        .wrap(Expr::from);
      }
      let left = Node::new(self.since(start), GroupExpr { expression }).wrap(Expr::from);
      self.parse_expr_suffix(left, PREC_PRIMARY, min_prec)
    }
  }
}
