use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::node::Node;
use crate::loc::Loc;
use crate::operator::PREC_EXPR;
use crate::parse::Parser;
use crate::token::TokenSource;
use crate::token::TT;

impl<T: TokenSource> Parser<T> {
  /// The text of a literal token with `front` and `back` delimiter bytes
  /// stripped.
  pub(in crate::parse) fn delimited_text(&self, loc: Loc, front: usize, back: usize) -> String {
    self.string(Loc(loc.0 + front, loc.1 - back))
  }

  /// `[…]`; the current token is the opening bracket. Elisions become
  /// `LitArrElem::Empty` entries, one per hole.
  pub(in crate::parse) fn parse_lit_arr(&mut self) -> Node<LitArrExpr> {
    let start = self.start();
    self.next();
    let mut elements = Vec::new();
    let mut prev_comma = true;
    loop {
      match self.tt() {
        TT::EOF => {
          self.err_expected("array element");
          break;
        }
        TT::BracketClose => {
          self.next();
          break;
        }
        TT::Comma => {
          if prev_comma {
            elements.push(LitArrElem::Empty);
          };
          prev_comma = true;
          self.next();
        }
        _ => {
          let spread = self.eat(TT::DotDotDot);
          let value = self.parse_assignment_or_param();
          elements.push(if spread {
            LitArrElem::Rest(value)
          } else {
            LitArrElem::Single(value)
          });
          prev_comma = false;
          if spread && !self.at(TT::BracketClose) {
            // A spread anywhere but last rules out a destructuring pattern.
            self.assume_arrow_func = false;
          };
          if !self.at(TT::Comma) && !self.at(TT::BracketClose) {
            self.err_expected("comma or closing bracket");
            break;
          };
        }
      };
    }
    Node::new(self.since(start), LitArrExpr { elements })
  }

  /// `{…}` as an expression; the current token is the opening brace.
  pub(in crate::parse) fn parse_lit_obj(&mut self) -> Node<LitObjExpr> {
    let start = self.start();
    self.next();
    let mut members = Vec::new();
    loop {
      match self.tt() {
        TT::EOF => {
          self.err_expected("object member");
          break;
        }
        TT::BraceClose => {
          self.next();
          break;
        }
        _ => {
          members.push(self.parse_obj_member());
          if !self.eat(TT::Comma) && !self.at(TT::BraceClose) {
            self.err_expected("comma or closing brace");
            break;
          };
        }
      };
    }
    Node::new(self.since(start), LitObjExpr { members })
  }

  /// The parts of a template literal; the current token is either a
  /// substitution-free template or the head before the first `${`.
  pub(in crate::parse) fn parse_template_parts(&mut self) -> Vec<LitTemplatePart> {
    let mut parts = Vec::new();
    if self.at(TT::LiteralTemplate) {
      let t = self.next();
      parts.push(LitTemplatePart::String(self.delimited_text(t.loc, 1, 1)));
      return parts;
    };
    let t = self.next();
    debug_assert_eq!(t.typ, TT::LiteralTemplateStart);
    parts.push(LitTemplatePart::String(self.delimited_text(t.loc, 1, 2)));
    loop {
      parts.push(LitTemplatePart::Substitution(self.parse_expr(PREC_EXPR)));
      match self.tt() {
        TT::LiteralTemplateMiddle => {
          let t = self.next();
          parts.push(LitTemplatePart::String(self.delimited_text(t.loc, 1, 2)));
        }
        TT::LiteralTemplateEnd => {
          let t = self.next();
          parts.push(LitTemplatePart::String(self.delimited_text(t.loc, 1, 1)));
          break;
        }
        _ => {
          self.err_expected("template literal continuation");
          break;
        }
      };
    }
    parts
  }
}
