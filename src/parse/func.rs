use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::operator::PREC_ASSIGN;
use crate::parse::Parser;
use crate::symbol::VarKind;
use crate::symbol::VarRef;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// Parses `(params)`, declaring each binding as an argument of the current
  /// function scope. Marks the scope once the list closes, so that later
  /// `var`s with the same name stay distinct from parameters.
  pub(in crate::parse) fn parse_func_params(&mut self) -> Vec<Node<ParamDecl>> {
    let mut parameters = Vec::new();
    self.require(TT::ParenthesisOpen);
    while !self.at(TT::ParenthesisClose) && !self.at(TT::EOF) {
      let start = self.start();
      if self.eat(TT::DotDotDot) {
        let pattern = self
          .parse_binding_pat(VarKind::Argument)
          .wrap(|pat| PatDecl { pat });
        parameters.push(Node::new(self.since(start), ParamDecl {
          rest: true,
          pattern,
          default_value: None,
        }));
        break;
      };
      let (pat, default_value) = self.parse_binding_elem(VarKind::Argument);
      let pattern = pat.wrap(|pat| PatDecl { pat });
      parameters.push(Node::new(self.since(start), ParamDecl {
        rest: false,
        pattern,
        default_value,
      }));
      if !self.eat(TT::Comma) {
        break;
      };
    }
    self.require(TT::ParenthesisClose);
    self.table.mark_arguments(self.scope);
    parameters
  }

  /// `{ stmts }` directly under a function scope; no separate block scope is
  /// created, so parameters and body share one scope.
  pub(in crate::parse) fn parse_func_body_block(&mut self) -> FuncBody {
    let assume = std::mem::replace(&mut self.assume_arrow_func, false);
    let mut body = Vec::new();
    self.require(TT::BraceOpen);
    while !self.at(TT::BraceClose) && !self.at(TT::EOF) {
      body.push(self.parse_stmt(true));
    }
    self.require(TT::BraceClose);
    self.assume_arrow_func = assume;
    FuncBody::Block(body)
  }

  /// A `function` declaration or expression; the current token is `function`
  /// and any `async` prefix has already been consumed. For declarations the
  /// returned name is declared in the enclosing scope; for expressions it is
  /// only visible inside the function itself.
  pub(in crate::parse) fn parse_func(
    &mut self,
    async_: bool,
    in_expr: bool,
  ) -> (Option<Node<ClassOrFuncName>>, Node<Func>) {
    let start = self.start();
    self.next();
    let generator = self.eat(TT::Asterisk);
    let mut name_tok = None;
    if self.is_identifier_reference(self.tt()) {
      name_tok = Some(self.next());
    } else if !self.at(TT::ParenthesisOpen) {
      self.err_expected("function name or parameter list");
    };
    let mut name = None;
    if let Some(t) = &name_tok {
      if !in_expr {
        let var = self.declare_name(VarKind::Function, t.loc);
        name = Some(Node::new(t.loc, ClassOrFuncName { var }));
      };
    };
    let scope = self.enter_scope(true);
    let parent_async = std::mem::replace(&mut self.async_, async_);
    let parent_generator = std::mem::replace(&mut self.generator, generator);
    let parent_in_for = std::mem::replace(&mut self.in_for, false);
    if let Some(t) = &name_tok {
      if in_expr {
        let var = self.declare_name(VarKind::Expr, t.loc);
        name = Some(Node::new(t.loc, ClassOrFuncName { var }));
      };
    };
    let parameters = self.parse_func_params();
    let body = self.parse_func_body_block();
    self.async_ = parent_async;
    self.generator = parent_generator;
    self.in_for = parent_in_for;
    self.exit_scope();
    let func = Node::new(self.since(start), Func {
      arrow: false,
      async_,
      generator,
      scope,
      parameters,
      body,
    });
    (name, func)
  }

  /// The body of a method, with its own function scope and async/generator
  /// context. The current token is the opening `(` of the parameter list.
  pub(in crate::parse) fn parse_method_func(
    &mut self,
    async_: bool,
    generator: bool,
    start: usize,
  ) -> Node<Func> {
    let scope = self.enter_scope(true);
    let parent_async = std::mem::replace(&mut self.async_, async_);
    let parent_generator = std::mem::replace(&mut self.generator, generator);
    let parent_in_for = std::mem::replace(&mut self.in_for, false);
    let parameters = self.parse_func_params();
    let body = self.parse_func_body_block();
    self.async_ = parent_async;
    self.generator = parent_generator;
    self.in_for = parent_in_for;
    self.exit_scope();
    Node::new(self.since(start), Func {
      arrow: false,
      async_,
      generator,
      scope,
      parameters,
      body,
    })
  }

  /// The `=> body` of an arrow function, which is also the commit point of
  /// the parameter speculation: a missing arrow here is fatal.
  pub(in crate::parse) fn parse_arrow_body(&mut self) -> FuncBody {
    if !self.at(TT::EqualsChevronRight) {
      let err = self
        .tok
        .error(SyntaxErrorType::RequiredTokenNotFound(TT::EqualsChevronRight));
      self.fail(err);
      return FuncBody::Block(Vec::new());
    };
    if self.tok.preceded_by_line_terminator {
      let err = self
        .tok
        .error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters);
      self.fail(err);
      return FuncBody::Block(Vec::new());
    };
    self.next();
    self.table.mark_arguments(self.scope);
    if self.at(TT::BraceOpen) {
      self.parse_func_body_block()
    } else {
      let assume = std::mem::replace(&mut self.assume_arrow_func, false);
      let expr = self.parse_expr(PREC_ASSIGN);
      self.assume_arrow_func = assume;
      FuncBody::Expression(expr)
    }
  }

  /// `async x => …` or `async (…) => …`; `async` has already been consumed
  /// and the next token is known to start a parameter list.
  pub(in crate::parse) fn parse_async_arrow_func(&mut self, start: usize) -> Node<Expr> {
    let scope = self.enter_scope(true);
    let parent_async = std::mem::replace(&mut self.async_, true);
    let parent_generator = std::mem::replace(&mut self.generator, false);
    let parent_in_for = std::mem::replace(&mut self.in_for, false);
    let parameters = if self.at(TT::ParenthesisOpen) {
      self.parse_func_params()
    } else {
      let t = self.next();
      let var = self.declare_name(VarKind::Argument, t.loc);
      let pattern = Node::new(t.loc, Pat::Id(IdPat { var })).wrap(|pat| PatDecl { pat });
      vec![Node::new(t.loc, ParamDecl {
        rest: false,
        pattern,
        default_value: None,
      })]
    };
    let body = self.parse_arrow_body();
    self.async_ = parent_async;
    self.generator = parent_generator;
    self.in_for = parent_in_for;
    self.exit_scope();
    let loc = self.since(start);
    let func = Node::new(loc, Func {
      arrow: true,
      async_: true,
      generator: false,
      scope,
      parameters,
      body,
    });
    Node::new(loc, ArrowFuncExpr { func }).wrap(Expr::from)
  }

  /// `x => …` where the identifier has already been parsed as an expression
  /// use; the use is rebound as the sole parameter of the new arrow scope.
  pub(in crate::parse) fn parse_identifier_arrow_func(
    &mut self,
    var: VarRef,
    id_loc: Loc,
  ) -> Node<Expr> {
    let scope = self.enter_scope(true);
    let parent_async = std::mem::replace(&mut self.async_, false);
    let parent_generator = std::mem::replace(&mut self.generator, false);
    let parent_in_for = std::mem::replace(&mut self.in_for, false);
    let var = self.table.rebind_as_argument(scope, var);
    let pattern = Node::new(id_loc, Pat::Id(IdPat { var })).wrap(|pat| PatDecl { pat });
    let parameters = vec![Node::new(id_loc, ParamDecl {
      rest: false,
      pattern,
      default_value: None,
    })];
    let body = self.parse_arrow_body();
    self.async_ = parent_async;
    self.generator = parent_generator;
    self.in_for = parent_in_for;
    self.exit_scope();
    let loc = self.since(id_loc.0);
    let func = Node::new(loc, Func {
      arrow: true,
      async_: false,
      generator: false,
      scope,
      parameters,
      body,
    });
    Node::new(loc, ArrowFuncExpr { func }).wrap(Expr::from)
  }
}
