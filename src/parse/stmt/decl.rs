use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::parse::Parser;
use crate::symbol::VarKind;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// The declarators of a `var`/`let`/`const` statement; the mode keyword has
  /// already been consumed. Inside a `for` head the caller suppresses `in`
  /// operators in initializers.
  pub(in crate::parse) fn parse_var_decl_tail(
    &mut self,
    mode: VarDeclMode,
    export: bool,
    start: usize,
  ) -> Node<VarDecl> {
    let kind = match mode {
      VarDeclMode::Var => VarKind::Var,
      VarDeclMode::Let | VarDeclMode::Const => VarKind::Lexical,
    };
    let mut declarators = Vec::new();
    loop {
      let (pat, initializer) = self.parse_binding_elem(kind);
      let pattern = pat.wrap(|pat| PatDecl { pat });
      declarators.push(VarDeclarator {
        pattern,
        initializer,
      });
      if !self.eat(TT::Comma) {
        break;
      };
    }
    Node::new(self.since(start), VarDecl {
      export,
      mode,
      declarators,
    })
  }

  /// A `function` declaration; the current token is `function` and any
  /// `async`/`export` prefix has already been consumed.
  pub(in crate::parse) fn parse_func_decl(
    &mut self,
    async_: bool,
    export: bool,
    export_default: bool,
    start: usize,
  ) -> Node<FuncDecl> {
    let (name, function) = self.parse_func(async_, false);
    if name.is_none() && !export_default {
      self.err_expected("function name");
    };
    Node::new(self.since(start), FuncDecl {
      export,
      export_default,
      name,
      function,
    })
  }

  /// A `class` declaration; the current token is `class` and any `export`
  /// prefix has already been consumed.
  pub(in crate::parse) fn parse_class_decl(
    &mut self,
    export: bool,
    export_default: bool,
    start: usize,
  ) -> Node<ClassDecl> {
    let (name, extends, members) = self.parse_class_parts(false);
    if name.is_none() && !export_default {
      self.err_expected("class name");
    };
    Node::new(self.since(start), ClassDecl {
      export,
      export_default,
      name,
      extends,
      members,
    })
  }
}
