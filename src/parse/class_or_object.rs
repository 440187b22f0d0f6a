use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjGetter;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjMethod;
use crate::ast::class_or_object::ClassOrObjSetter;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::operator::PREC_ASSIGN;
use crate::operator::PREC_LHS;
use crate::parse::Parser;
use crate::symbol::VarKind;
use crate::token::Token;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// A property key: computed, identifier-like word, string, or number.
  pub(in crate::parse) fn parse_class_or_obj_key(&mut self) -> ClassOrObjKey {
    if self.eat(TT::BracketOpen) {
      let expr = self.parse_expr(PREC_ASSIGN);
      self.require(TT::BracketClose);
      return ClassOrObjKey::Computed(expr);
    };
    let t = self.tok.clone();
    let key = match t.typ {
      typ if typ.is_identifier_name() => self.string(t.loc),
      TT::LiteralString => self.delimited_text(t.loc, 1, 1),
      TT::LiteralNumber | TT::LiteralBigInt => self.string(t.loc),
      _ => {
        self.err_expected("property key");
        return ClassOrObjKey::Direct(Node::new(t.loc, ClassOrObjMemberDirectKey {
          key: String::new(),
          tt: TT::Invalid,
        }));
      }
    };
    self.next();
    ClassOrObjKey::Direct(Node::new(t.loc, ClassOrObjMemberDirectKey { key, tt: t.typ }))
  }

  fn direct_key(&self, t: &Token) -> ClassOrObjKey {
    ClassOrObjKey::Direct(Node::new(t.loc, ClassOrObjMemberDirectKey {
      key: self.string(t.loc),
      tt: t.typ,
    }))
  }

  /// A method/getter/setter value once the parameter list's `(` has been
  /// reached, with arity checks for accessors.
  fn parse_method_val(
    &mut self,
    async_: bool,
    generator: bool,
    get: bool,
    set: bool,
    start: usize,
  ) -> ClassOrObjVal {
    let func = self.parse_method_func(async_, generator, start);
    if get {
      if !func.stx.parameters.is_empty() {
        let err = func
          .loc
          .error(SyntaxErrorType::ExpectedSyntax("getter without parameters"), None);
        self.fail(err);
      };
      let loc = func.loc;
      ClassOrObjVal::Getter(Node::new(loc, ClassOrObjGetter { func }))
    } else if set {
      let valid = func.stx.parameters.len() == 1 && {
        let p = &func.stx.parameters[0];
        !p.stx.rest && p.stx.default_value.is_none()
      };
      if !valid {
        let err = func
          .loc
          .error(SyntaxErrorType::ExpectedSyntax("setter with a single parameter"), None);
        self.fail(err);
      };
      let loc = func.loc;
      ClassOrObjVal::Setter(Node::new(loc, ClassOrObjSetter { func }))
    } else {
      let loc = func.loc;
      ClassOrObjVal::Method(Node::new(loc, ClassOrObjMethod { func }))
    }
  }

  /// One member of an object literal. While the literal might still be an
  /// arrow parameter list, shorthand names are declared speculatively rather
  /// than used.
  pub(in crate::parse) fn parse_obj_member(&mut self) -> Node<ObjMember> {
    let start = self.start();
    if self.eat(TT::DotDotDot) {
      let val = self.parse_assignment_or_param();
      if !self.at(TT::BraceClose) {
        // A rest anywhere but last rules out a destructuring pattern.
        self.assume_arrow_func = false;
      };
      return Node::new(self.since(start), ObjMember {
        typ: ObjMemberType::Rest { val },
      });
    };

    let mut async_ = false;
    let mut generator = false;
    let mut get = false;
    let mut set = false;
    // A consumed `async`/`get`/`set` that may still turn out to be the key
    // itself, as in `{async: 1}` or `{get() {}}`.
    let mut prefix: Option<Token> = None;
    let mut key_forced = None;
    match self.tt() {
      TT::Asterisk => {
        self.next();
        generator = true;
      }
      TT::KeywordAsync => {
        let t = self.next();
        if !self.tok.preceded_by_line_terminator {
          async_ = true;
          if self.eat(TT::Asterisk) {
            generator = true;
          } else {
            prefix = Some(t);
          };
        } else {
          // `async` followed by a line terminator can only be the key.
          key_forced = Some(self.direct_key(&t));
        };
      }
      TT::KeywordGet => {
        let t = self.next();
        get = true;
        prefix = Some(t);
      }
      TT::KeywordSet => {
        let t = self.next();
        set = true;
        prefix = Some(t);
      }
      _ => {}
    };

    let key = if let Some(key) = key_forced {
      async_ = false;
      key
    } else if prefix.is_some()
      && matches!(
        self.tt(),
        TT::Equals | TT::Comma | TT::BraceClose | TT::Colon | TT::ParenthesisOpen
      ) {
      // The prefix word was the key all along.
      let t = prefix.take().unwrap();
      async_ = false;
      get = false;
      set = false;
      self.direct_key(&t)
    } else {
      self.parse_class_or_obj_key()
    };

    let typ = if self.at(TT::ParenthesisOpen) {
      let val = self.parse_method_val(async_, generator, get, set, start);
      self.assume_arrow_func = false;
      ObjMemberType::Valued { key, val }
    } else if self.eat(TT::Colon) {
      let value = self.parse_assignment_or_param();
      ObjMemberType::Valued {
        key,
        val: ClassOrObjVal::Prop(Some(value)),
      }
    } else {
      match &key {
        ClassOrObjKey::Direct(k)
          if self.is_identifier_reference(k.stx.tt) && !async_ && !generator && !get && !set =>
        {
          let loc = k.loc;
          let var = if self.assume_arrow_func {
            self.declare_name(VarKind::Argument, loc)
          } else {
            self.use_name(loc)
          };
          let id = Node::new(loc, IdExpr { var });
          let default_value = if self.eat(TT::Equals) {
            Some(self.parse_expr(PREC_ASSIGN))
          } else {
            None
          };
          ObjMemberType::Shorthand { id, default_value }
        }
        _ => {
          self.err_expected("object member value");
          ObjMemberType::Valued {
            key,
            val: ClassOrObjVal::Prop(None),
          }
        }
      }
    };
    Node::new(self.since(start), ObjMember { typ })
  }

  /// One member of a class body: a method, accessor, or field.
  fn parse_class_member(&mut self) -> Node<ClassMember> {
    let start = self.start();
    let mut static_ = false;
    let mut async_ = false;
    let mut generator = false;
    let mut get = false;
    let mut set = false;
    // The most recent modifier word, which may still turn out to be the key
    // itself, as in `static() {}` or `get = 1`.
    let mut prefix: Option<Token> = None;
    let mut prefix_is_static = false;
    if self.at(TT::KeywordStatic) {
      let t = self.next();
      static_ = true;
      prefix = Some(t);
      prefix_is_static = true;
    };
    match self.tt() {
      TT::Asterisk => {
        self.next();
        generator = true;
        prefix = None;
      }
      TT::KeywordAsync => {
        let t = self.next();
        prefix = Some(t);
        prefix_is_static = false;
        if !self.tok.preceded_by_line_terminator {
          async_ = true;
          if self.eat(TT::Asterisk) {
            generator = true;
            prefix = None;
          };
        };
      }
      TT::KeywordGet => {
        let t = self.next();
        get = true;
        prefix = Some(t);
        prefix_is_static = false;
      }
      TT::KeywordSet => {
        let t = self.next();
        set = true;
        prefix = Some(t);
        prefix_is_static = false;
      }
      _ => {}
    };

    let key = if prefix.is_some() && self.at(TT::ParenthesisOpen) {
      let t = prefix.take().unwrap();
      if async_ || get || set {
        async_ = false;
        get = false;
        set = false;
      } else if prefix_is_static {
        static_ = false;
      };
      self.direct_key(&t)
    } else {
      self.parse_class_or_obj_key()
    };

    let val = if self.at(TT::ParenthesisOpen) {
      self.parse_method_val(async_, generator, get, set, start)
    } else if async_ || generator || get || set {
      self.err_expected("method parameter list");
      ClassOrObjVal::Prop(None)
    } else {
      // A field, with an optional initializer.
      let value = if self.eat(TT::Equals) {
        Some(self.parse_expr(PREC_ASSIGN))
      } else {
        None
      };
      ClassOrObjVal::Prop(value)
    };
    Node::new(self.since(start), ClassMember { key, static_, val })
  }

  /// Everything after the `class` keyword: optional name, optional `extends`
  /// clause, and the member list. A declaration's name is declared lexically
  /// in the enclosing scope; an expression's name is visible only within.
  pub(in crate::parse) fn parse_class_parts(
    &mut self,
    in_expr: bool,
  ) -> (
    Option<Node<ClassOrFuncName>>,
    Option<Node<Expr>>,
    Vec<Node<ClassMember>>,
  ) {
    self.next();
    let mut name = None;
    if self.is_identifier_reference(self.tt()) && !self.at(TT::KeywordExtends) {
      let t = self.next();
      let var = if in_expr {
        self.table.add_var(VarKind::Expr, self.string(t.loc))
      } else {
        self.declare_name(VarKind::Lexical, t.loc)
      };
      name = Some(Node::new(t.loc, ClassOrFuncName { var }));
    };
    let extends = if self.eat(TT::KeywordExtends) {
      Some(self.parse_expr(PREC_LHS))
    } else {
      None
    };
    self.require(TT::BraceOpen);
    let mut members = Vec::new();
    loop {
      match self.tt() {
        TT::EOF => {
          self.err_expected("class member");
          break;
        }
        TT::Semicolon => {
          self.next();
        }
        TT::BraceClose => {
          self.next();
          break;
        }
        _ => members.push(self.parse_class_member()),
      };
    }
    (name, extends, members)
  }
}
