use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::Pat;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportName;
use crate::ast::import_export::ImportNames;
use crate::ast::import_export::ModuleExportImportName;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::ExportDefaultExprStmt;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ImportStmt;
use crate::ast::stmt::Stmt;
use crate::operator::PREC_ASSIGN;
use crate::operator::PREC_EXPR;
use crate::parse::Parser;
use crate::symbol::VarKind;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// An identifier bound by an import, declared lexically in the module
  /// scope.
  fn parse_import_binding(&mut self) -> Node<PatDecl> {
    if !self.is_identifier_reference(self.tt()) {
      self.err_expected("import binding");
      return self.placeholder_pat().wrap(|pat| PatDecl { pat });
    };
    let t = self.next();
    let var = self.declare_name(VarKind::Lexical, t.loc);
    Node::new(t.loc, Pat::Id(IdPat { var })).wrap(|pat| PatDecl { pat })
  }

  /// An importable or exportable name: an identifier-like word or a string.
  fn parse_module_name(&mut self) -> ModuleExportImportName {
    if self.at(TT::LiteralString) {
      let t = self.next();
      ModuleExportImportName::Str(self.delimited_text(t.loc, 1, 1))
    } else if self.tt().is_identifier_name() {
      let t = self.next();
      ModuleExportImportName::Ident(self.string(t.loc))
    } else {
      self.err_expected("importable name");
      ModuleExportImportName::Ident(String::new())
    }
  }

  /// `* as ns` or `{a, b as c, "d" as e}` after `import` or the default
  /// binding's comma.
  fn parse_import_names(&mut self) -> ImportNames {
    if self.eat(TT::Asterisk) {
      self.require(TT::KeywordAs);
      ImportNames::All(self.parse_import_binding())
    } else {
      self.require(TT::BraceOpen);
      let mut names = Vec::new();
      while !self.at(TT::BraceClose) && !self.at(TT::EOF) {
        let start = self.start();
        // A plain identifier with no `as` is both the importable name and
        // the binding.
        let (importable, alias) =
          if self.is_identifier_reference(self.tt()) && !self.at(TT::KeywordAs) {
            let t = self.next();
            let importable = ModuleExportImportName::Ident(self.string(t.loc));
            if self.eat(TT::KeywordAs) {
              (importable, self.parse_import_binding())
            } else {
              let var = self.declare_name(VarKind::Lexical, t.loc);
              let alias = Node::new(t.loc, Pat::Id(IdPat { var })).wrap(|pat| PatDecl { pat });
              (importable, alias)
            }
          } else {
            let importable = self.parse_module_name();
            self.require(TT::KeywordAs);
            (importable, self.parse_import_binding())
          };
        names.push(Node::new(self.since(start), ImportName { importable, alias }));
        if !self.eat(TT::Comma) {
          break;
        };
      }
      self.require(TT::BraceClose);
      ImportNames::Specific(names)
    }
  }

  /// An `import` statement at module level. `import(…)` and `import.meta`
  /// are redirected to an expression statement.
  pub(in crate::parse) fn parse_import_stmt(&mut self) -> Node<Stmt> {
    let start = self.start();
    self.next();
    if self.at(TT::ParenthesisOpen) || self.at(TT::Dot) {
      let (left, prec_left) = self.parse_import_expr_tail(start);
      let expr = self.parse_expr_suffix(left, prec_left, PREC_EXPR);
      self.asi();
      self.eat(TT::Semicolon);
      return Node::new(self.since(start), ExprStmt { expr }).wrap(Stmt::from);
    };
    if self.at(TT::LiteralString) {
      // A bare side-effect import.
      let t = self.next();
      let module = self.delimited_text(t.loc, 1, 1);
      self.asi();
      self.eat(TT::Semicolon);
      return Node::new(self.since(start), ImportStmt {
        default: None,
        names: None,
        module,
      })
      .wrap(Stmt::from);
    };
    let mut default = None;
    let names;
    if self.is_identifier_reference(self.tt()) {
      default = Some(self.parse_import_binding());
      names = if self.eat(TT::Comma) {
        Some(self.parse_import_names())
      } else {
        None
      };
    } else {
      names = Some(self.parse_import_names());
    };
    self.require(TT::KeywordFrom);
    let module = if self.at(TT::LiteralString) {
      let t = self.next();
      self.delimited_text(t.loc, 1, 1)
    } else {
      self.err_expected("module specifier");
      String::new()
    };
    self.asi();
    self.eat(TT::Semicolon);
    Node::new(self.since(start), ImportStmt {
      default,
      names,
      module,
    })
    .wrap(Stmt::from)
  }

  /// An `export` statement at module level.
  pub(in crate::parse) fn parse_export_stmt(&mut self) -> Node<Stmt> {
    let start = self.start();
    self.next();
    match self.tt() {
      TT::Asterisk => {
        self.next();
        let alias = if self.eat(TT::KeywordAs) {
          match self.parse_module_name() {
            ModuleExportImportName::Ident(name) | ModuleExportImportName::Str(name) => Some(name),
          }
        } else {
          None
        };
        self.require(TT::KeywordFrom);
        let from = if self.at(TT::LiteralString) {
          let t = self.next();
          Some(self.delimited_text(t.loc, 1, 1))
        } else {
          self.err_expected("module specifier");
          None
        };
        self.asi();
        self.eat(TT::Semicolon);
        Node::new(self.since(start), ExportListStmt {
          names: ExportNames::All(alias),
          from,
        })
        .wrap(Stmt::from)
      }
      TT::BraceOpen => {
        self.next();
        let mut names = Vec::new();
        while !self.at(TT::BraceClose) && !self.at(TT::EOF) {
          let name_start = self.start();
          let exportable = self.parse_module_name();
          let alias = if self.eat(TT::KeywordAs) {
            Some(self.parse_module_name())
          } else {
            None
          };
          names.push(Node::new(self.since(name_start), ExportName {
            exportable,
            alias,
          }));
          if !self.eat(TT::Comma) {
            break;
          };
        }
        self.require(TT::BraceClose);
        let from = if self.eat(TT::KeywordFrom) {
          if self.at(TT::LiteralString) {
            let t = self.next();
            Some(self.delimited_text(t.loc, 1, 1))
          } else {
            self.err_expected("module specifier");
            None
          }
        } else {
          None
        };
        self.asi();
        self.eat(TT::Semicolon);
        Node::new(self.since(start), ExportListStmt {
          names: ExportNames::Specific(names),
          from,
        })
        .wrap(Stmt::from)
      }
      TT::KeywordVar => {
        self.next();
        let decl = self.parse_var_decl_tail(VarDeclMode::Var, true, start);
        self.asi();
        self.eat(TT::Semicolon);
        decl.wrap(Stmt::from)
      }
      TT::KeywordLet => {
        self.next();
        let decl = self.parse_var_decl_tail(VarDeclMode::Let, true, start);
        self.asi();
        self.eat(TT::Semicolon);
        decl.wrap(Stmt::from)
      }
      TT::KeywordConst => {
        self.next();
        let decl = self.parse_var_decl_tail(VarDeclMode::Const, true, start);
        self.asi();
        self.eat(TT::Semicolon);
        decl.wrap(Stmt::from)
      }
      TT::KeywordFunction => self.parse_func_decl(false, true, false, start).wrap(Stmt::from),
      TT::KeywordClass => self.parse_class_decl(true, false, start).wrap(Stmt::from),
      TT::KeywordAsync => {
        self.next();
        if !self.at(TT::KeywordFunction) || self.tok.preceded_by_line_terminator {
          self.err_expected("async function declaration");
        };
        self.parse_func_decl(true, true, false, start).wrap(Stmt::from)
      }
      TT::KeywordDefault => {
        self.next();
        match self.tt() {
          TT::KeywordFunction => self
            .parse_func_decl(false, true, true, start)
            .wrap(Stmt::from),
          TT::KeywordClass => self.parse_class_decl(true, true, start).wrap(Stmt::from),
          TT::KeywordAsync => {
            // `async function` is the declaration form; anything else after
            // `async` is an expression.
            let t = self.next();
            if self.at(TT::KeywordFunction) && !self.tok.preceded_by_line_terminator {
              self.parse_func_decl(true, true, true, start).wrap(Stmt::from)
            } else {
              let left = self.parse_async_expr(PREC_ASSIGN, t);
              self.asi();
              self.eat(TT::Semicolon);
              Node::new(self.since(start), ExportDefaultExprStmt { expression: left })
                .wrap(Stmt::from)
            }
          }
          _ => {
            let expression = self.parse_expr(PREC_ASSIGN);
            self.asi();
            self.eat(TT::Semicolon);
            Node::new(self.since(start), ExportDefaultExprStmt { expression }).wrap(Stmt::from)
          }
        }
      }
      _ => {
        self.err_expected("exportable declaration");
        Node::new(self.since(start), ExportListStmt {
          names: ExportNames::Specific(Vec::new()),
          from: None,
        })
        .wrap(Stmt::from)
      }
    }
  }
}
