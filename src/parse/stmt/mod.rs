pub mod decl;

use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::operator::PREC_ASSIGN;
use crate::operator::PREC_EXPR;
use crate::parse::Parser;
use crate::symbol::VarKind;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// Automatic semicolon insertion: a statement may end here only at a
  /// line terminator, `;`, `}`, or the end of input.
  pub(in crate::parse) fn asi(&mut self) {
    if !self.tok.preceded_by_line_terminator
      && !matches!(self.tt(), TT::Semicolon | TT::BraceClose | TT::EOF)
    {
      self.err_expected("semicolon");
    };
  }

  pub fn parse_stmt(&mut self, allow_decl: bool) -> Node<Stmt> {
    let stmt = self.parse_stmt_inner(allow_decl);
    self.eat(TT::Semicolon);
    stmt
  }

  fn parse_stmt_inner(&mut self, allow_decl: bool) -> Node<Stmt> {
    let start = self.start();
    match self.tt() {
      TT::BraceOpen => self.parse_block_stmt().wrap(Stmt::from),
      TT::Semicolon => Node::new(self.loc(), EmptyStmt {}).wrap(Stmt::from),
      TT::KeywordVar => {
        self.next();
        let decl = self.parse_var_decl_tail(VarDeclMode::Var, false, start);
        self.asi();
        decl.wrap(Stmt::from)
      }
      TT::KeywordConst => {
        self.next();
        let decl = self.parse_var_decl_tail(VarDeclMode::Const, false, start);
        self.asi();
        decl.wrap(Stmt::from)
      }
      TT::KeywordLet => {
        // `let` only starts a declaration when a binding follows; otherwise
        // it is an ordinary identifier expression.
        let t = self.next();
        if allow_decl
          && (self.is_identifier_reference(self.tt())
            || self.at(TT::BracketOpen)
            || self.at(TT::BraceOpen))
        {
          let decl = self.parse_var_decl_tail(VarDeclMode::Let, false, start);
          self.asi();
          decl.wrap(Stmt::from)
        } else {
          let expr = self.parse_identifier_expr(t, PREC_EXPR);
          self.asi();
          Node::new(self.since(start), ExprStmt { expr }).wrap(Stmt::from)
        }
      }
      TT::KeywordFunction => {
        if !allow_decl {
          self.err_unexpected();
        };
        self.parse_func_decl(false, false, false, start).wrap(Stmt::from)
      }
      TT::KeywordClass => {
        if !allow_decl {
          self.err_unexpected();
        };
        self.parse_class_decl(false, false, start).wrap(Stmt::from)
      }
      TT::KeywordAsync => {
        let t = self.next();
        if self.at(TT::KeywordFunction) && !self.tok.preceded_by_line_terminator {
          if !allow_decl {
            self.err_unexpected();
          };
          self.parse_func_decl(true, false, false, start).wrap(Stmt::from)
        } else {
          let expr = self.parse_async_expr(PREC_EXPR, t);
          self.asi();
          Node::new(self.since(start), ExprStmt { expr }).wrap(Stmt::from)
        }
      }
      TT::KeywordIf => {
        self.next();
        self.require(TT::ParenthesisOpen);
        let test = self.parse_expr(PREC_EXPR);
        self.require(TT::ParenthesisClose);
        let consequent = self.parse_stmt(false);
        let alternate = if self.eat(TT::KeywordElse) {
          Some(self.parse_stmt(false))
        } else {
          None
        };
        Node::new(self.since(start), IfStmt {
          test,
          consequent,
          alternate,
        })
        .wrap(Stmt::from)
      }
      TT::KeywordWhile => {
        self.next();
        self.require(TT::ParenthesisOpen);
        let condition = self.parse_expr(PREC_EXPR);
        self.require(TT::ParenthesisClose);
        let body = self.parse_stmt(false);
        Node::new(self.since(start), WhileStmt { condition, body }).wrap(Stmt::from)
      }
      TT::KeywordDo => {
        self.next();
        let body = self.parse_stmt(false);
        self.require(TT::KeywordWhile);
        self.require(TT::ParenthesisOpen);
        let condition = self.parse_expr(PREC_EXPR);
        self.require(TT::ParenthesisClose);
        Node::new(self.since(start), DoWhileStmt { condition, body }).wrap(Stmt::from)
      }
      TT::KeywordFor => self.parse_for_stmt(),
      TT::KeywordSwitch => {
        self.next();
        self.require(TT::ParenthesisOpen);
        let test = self.parse_expr(PREC_EXPR);
        self.require(TT::ParenthesisClose);
        let scope = self.enter_scope(false);
        self.require(TT::BraceOpen);
        let mut branches = Vec::new();
        loop {
          match self.tt() {
            TT::EOF => {
              self.err_expected("switch clause");
              break;
            }
            TT::BraceClose => {
              self.next();
              break;
            }
            _ => {
              let clause_start = self.start();
              let case = if self.eat(TT::KeywordCase) {
                Some(self.parse_expr(PREC_EXPR))
              } else if self.eat(TT::KeywordDefault) {
                None
              } else {
                self.err_expected("case or default clause");
                break;
              };
              self.require(TT::Colon);
              let mut body = Vec::new();
              while !matches!(
                self.tt(),
                TT::KeywordCase | TT::KeywordDefault | TT::BraceClose | TT::EOF
              ) {
                body.push(self.parse_stmt(true));
              }
              branches.push(Node::new(self.since(clause_start), SwitchBranch { case, body }));
            }
          };
        }
        self.exit_scope();
        Node::new(self.since(start), SwitchStmt {
          scope,
          test,
          branches,
        })
        .wrap(Stmt::from)
      }
      TT::KeywordTry => {
        self.next();
        let wrapped = self.parse_block_stmt();
        let mut catch = None;
        if self.at(TT::KeywordCatch) {
          let catch_start = self.start();
          self.next();
          // The catch scope starts at the parameter, not the braces.
          let scope = self.enter_scope(false);
          let parameter = if self.eat(TT::ParenthesisOpen) {
            let pat = self.parse_binding_pat(VarKind::Argument);
            self.require(TT::ParenthesisClose);
            Some(pat.wrap(|pat| PatDecl { pat }))
          } else {
            None
          };
          let mut body = Vec::new();
          self.require(TT::BraceOpen);
          while !self.at(TT::BraceClose) && !self.at(TT::EOF) {
            body.push(self.parse_stmt(true));
          }
          self.require(TT::BraceClose);
          self.exit_scope();
          catch = Some(Node::new(self.since(catch_start), CatchBlock {
            scope,
            parameter,
            body,
          }));
        };
        let finally = if self.eat(TT::KeywordFinally) {
          Some(self.parse_block_stmt())
        } else {
          None
        };
        if catch.is_none() && finally.is_none() {
          let err = self
            .tok
            .error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordCatch));
          self.fail(err);
        };
        Node::new(self.since(start), TryStmt {
          wrapped,
          catch,
          finally,
        })
        .wrap(Stmt::from)
      }
      TT::KeywordReturn => {
        self.next();
        let value = if self.tok.preceded_by_line_terminator
          || matches!(self.tt(), TT::Semicolon | TT::BraceClose | TT::EOF)
        {
          None
        } else {
          Some(self.parse_expr(PREC_EXPR))
        };
        self.asi();
        Node::new(self.since(start), ReturnStmt { value }).wrap(Stmt::from)
      }
      TT::KeywordThrow => {
        self.next();
        if self.tok.preceded_by_line_terminator {
          // A line terminator here makes the statement `throw;`, which is
          // never valid.
          self.err_expected("value after throw");
          return Node::new(self.since(start), ThrowStmt {
            value: self.placeholder_expr(),
          })
          .wrap(Stmt::from);
        };
        let value = self.parse_expr(PREC_EXPR);
        self.asi();
        Node::new(self.since(start), ThrowStmt { value }).wrap(Stmt::from)
      }
      TT::KeywordBreak => {
        self.next();
        let label = if !self.tok.preceded_by_line_terminator
          && self.is_identifier_reference(self.tt())
        {
          let t = self.next();
          Some(self.string(t.loc))
        } else {
          None
        };
        self.asi();
        Node::new(self.since(start), BreakStmt { label }).wrap(Stmt::from)
      }
      TT::KeywordContinue => {
        self.next();
        let label = if !self.tok.preceded_by_line_terminator
          && self.is_identifier_reference(self.tt())
        {
          let t = self.next();
          Some(self.string(t.loc))
        } else {
          None
        };
        self.asi();
        Node::new(self.since(start), ContinueStmt { label }).wrap(Stmt::from)
      }
      TT::KeywordWith => {
        self.next();
        self.require(TT::ParenthesisOpen);
        let object = self.parse_expr(PREC_EXPR);
        self.require(TT::ParenthesisClose);
        let body = self.parse_stmt(false);
        Node::new(self.since(start), WithStmt { object, body }).wrap(Stmt::from)
      }
      TT::KeywordDebugger => {
        self.next();
        self.asi();
        Node::new(self.since(start), DebuggerStmt {}).wrap(Stmt::from)
      }
      TT::KeywordImport => {
        // `import(…)` and `import.meta` in statement position.
        self.next();
        let (left, prec_left) = self.parse_import_expr_tail(start);
        let expr = self.parse_expr_suffix(left, prec_left, PREC_EXPR);
        self.asi();
        Node::new(self.since(start), ExprStmt { expr }).wrap(Stmt::from)
      }
      TT::EOF => {
        self.err_unexpected();
        Node::new(self.loc(), EmptyStmt {}).wrap(Stmt::from)
      }
      tt if self.is_identifier_reference(tt) => {
        let t = self.next();
        if self.eat(TT::Colon) {
          let name = self.string(t.loc);
          let statement = self.parse_stmt(true);
          Node::new(self.since(start), LabelStmt { name, statement }).wrap(Stmt::from)
        } else {
          let expr = self.parse_identifier_expr(t, PREC_EXPR);
          self.asi();
          Node::new(self.since(start), ExprStmt { expr }).wrap(Stmt::from)
        }
      }
      _ => {
        let expr = self.parse_expr(PREC_EXPR);
        self.asi();
        Node::new(self.since(start), ExprStmt { expr }).wrap(Stmt::from)
      }
    }
  }

  /// `{ … }` with its own block scope.
  pub(in crate::parse) fn parse_block_stmt(&mut self) -> Node<BlockStmt> {
    let start = self.start();
    let scope = self.enter_scope(false);
    self.require(TT::BraceOpen);
    let mut body = Vec::new();
    while !self.at(TT::BraceClose) && !self.at(TT::EOF) {
      body.push(self.parse_stmt(true));
    }
    self.require(TT::BraceClose);
    self.exit_scope();
    Node::new(self.since(start), BlockStmt { scope, body })
  }

  /// All three `for` forms. One scope covers the head and the body, so a
  /// `let`/`const` in the head is visible in the body but nowhere else.
  fn parse_for_stmt(&mut self) -> Node<Stmt> {
    let start = self.start();
    self.next();
    let await_ = self.async_ && self.eat(TT::KeywordAwait);
    let scope = self.enter_scope(false);
    self.require(TT::ParenthesisOpen);

    enum Head {
      None,
      Expr(Node<Expr>),
      Decl(Node<VarDecl>),
    }

    let head = match self.tt() {
      TT::Semicolon => Head::None,
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst => {
        let mode = match self.tt() {
          TT::KeywordVar => VarDeclMode::Var,
          TT::KeywordLet => VarDeclMode::Let,
          _ => VarDeclMode::Const,
        };
        let decl_start = self.start();
        self.next();
        self.in_for = true;
        let decl = self.parse_var_decl_tail(mode, false, decl_start);
        self.in_for = false;
        Head::Decl(decl)
      }
      _ => {
        self.in_for = true;
        let expr = self.parse_expr(PREC_EXPR);
        self.in_for = false;
        Head::Expr(expr)
      }
    };

    let stmt = if self.at(TT::KeywordIn) || self.at(TT::KeywordOf) {
      let of = self.at(TT::KeywordOf);
      self.next();
      if await_ && !of {
        self.err_expected("for await over an async iterable");
      };
      let lhs = match head {
        Head::Decl(mut decl) => {
          // The iteration target must be a single binding without an
          // initializer.
          if decl.stx.declarators.len() != 1 || decl.stx.declarators[0].initializer.is_some() {
            self.err_expected("single binding without initializer");
          };
          let mode = decl.stx.mode;
          match decl.stx.declarators.pop() {
            Some(d) => ForInOfLhs::Decl((mode, d.pattern)),
            None => ForInOfLhs::Assign(self.placeholder_expr()),
          }
        }
        Head::Expr(expr) => {
          if !expr.stx.is_valid_assignment_target() {
            let err = expr.loc.error(SyntaxErrorType::InvalidAssignmentTarget, None);
            self.fail(err);
          };
          ForInOfLhs::Assign(expr)
        }
        Head::None => {
          self.err_expected("iteration target");
          ForInOfLhs::Assign(self.placeholder_expr())
        }
      };
      let rhs = if of {
        self.parse_expr(PREC_ASSIGN)
      } else {
        self.parse_expr(PREC_EXPR)
      };
      self.require(TT::ParenthesisClose);
      let body = self.parse_stmt(false);
      if of {
        Node::new(self.since(start), ForOfStmt {
          scope,
          await_,
          lhs,
          rhs,
          body,
        })
        .wrap(Stmt::from)
      } else {
        Node::new(self.since(start), ForInStmt {
          scope,
          lhs,
          rhs,
          body,
        })
        .wrap(Stmt::from)
      }
    } else {
      if await_ {
        self.err_expected("for await over an async iterable");
      };
      let init = match head {
        Head::None => ForTripleStmtInit::None,
        Head::Expr(expr) => ForTripleStmtInit::Expr(expr),
        Head::Decl(decl) => ForTripleStmtInit::Decl(decl),
      };
      self.require(TT::Semicolon);
      let cond = if self.at(TT::Semicolon) {
        None
      } else {
        Some(self.parse_expr(PREC_EXPR))
      };
      self.require(TT::Semicolon);
      let post = if self.at(TT::ParenthesisClose) {
        None
      } else {
        Some(self.parse_expr(PREC_EXPR))
      };
      self.require(TT::ParenthesisClose);
      let body = self.parse_stmt(false);
      Node::new(self.since(start), ForTripleStmt {
        scope,
        init,
        cond,
        post,
        body,
      })
      .wrap(Stmt::from)
    };
    self.exit_scope();
    stmt
  }
}
