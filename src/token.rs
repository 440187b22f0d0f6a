use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::lex::KEYWORDS_MAPPING;
use crate::loc::Loc;
use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than using and handling Option everywhere.
  EOF,
  // Special token used to represent invalid source code. Easier than having to propagate SyntaxError from the lexer level.
  Invalid,
  // These are only used by lexer.
  CommentMultiline,
  CommentMultilineEnd,
  CommentSingle,
  LineTerminator,
  LiteralNumberBin,
  LiteralNumberHex,
  LiteralNumberOct,
  Whitespace,

  Ampersand,
  AmpersandAmpersand,
  AmpersandAmpersandEquals,
  AmpersandEquals,
  Asterisk,
  AsteriskAsterisk,
  AsteriskAsteriskEquals,
  AsteriskEquals,
  Bar,
  BarBar,
  BarBarEquals,
  BarEquals,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  Caret,
  CaretEquals,
  ChevronLeft,
  ChevronLeftChevronLeft,
  ChevronLeftChevronLeftEquals,
  ChevronLeftEquals,
  ChevronRight,
  ChevronRightChevronRight,
  ChevronRightChevronRightChevronRight,
  ChevronRightChevronRightChevronRightEquals,
  ChevronRightChevronRightEquals,
  ChevronRightEquals,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  EqualsEquals,
  EqualsEqualsEquals,
  Exclamation,
  ExclamationEquals,
  ExclamationEqualsEquals,
  Hyphen,
  HyphenEquals,
  HyphenHyphen,
  Identifier,
  KeywordAs,
  KeywordAsync,
  KeywordAwait,
  KeywordBreak,
  KeywordCase,
  KeywordCatch,
  KeywordClass,
  KeywordConst,
  KeywordContinue,
  KeywordDebugger,
  KeywordDefault,
  KeywordDelete,
  KeywordDo,
  KeywordElse,
  KeywordExport,
  KeywordExtends,
  KeywordFinally,
  KeywordFor,
  KeywordFrom,
  KeywordFunction,
  KeywordGet,
  KeywordIf,
  KeywordImport,
  KeywordIn,
  KeywordInstanceof,
  KeywordLet,
  KeywordNew,
  KeywordOf,
  KeywordReturn,
  KeywordSet,
  KeywordStatic,
  KeywordSuper,
  KeywordSwitch,
  KeywordThis,
  KeywordThrow,
  KeywordTry,
  KeywordTypeof,
  KeywordVar,
  KeywordVoid,
  KeywordWhile,
  KeywordWith,
  KeywordYield,
  LiteralBigInt,
  LiteralFalse,
  LiteralNull,
  LiteralNumber,
  LiteralRegex,
  LiteralString,
  // `...` with no substitutions.
  LiteralTemplate,
  // `...${
  LiteralTemplateStart,
  // }...${
  LiteralTemplateMiddle,
  // }...`
  LiteralTemplateEnd,
  LiteralTrue,
  ParenthesisClose,
  ParenthesisOpen,
  Percent,
  PercentEquals,
  Plus,
  PlusEquals,
  PlusPlus,
  Question,
  QuestionDot,
  QuestionDotBracketOpen,
  QuestionDotParenthesisOpen,
  QuestionQuestion,
  QuestionQuestionEquals,
  Semicolon,
  Slash,
  SlashEquals,
  Tilde,
}

impl TT {
  // Whether this token can always be used where an identifier reference or
  // binding name is expected. `yield`/`await` are contextual and handled by
  // the parser against its generator/async flags.
  pub fn is_identifier(self) -> bool {
    self == TT::Identifier || UNRESERVED_KEYWORDS.contains(&self)
  }

  // Whether this token can be used as a property or member name (after `.`,
  // or as a non-computed key). Every keyword qualifies.
  pub fn is_identifier_name(self) -> bool {
    self == TT::Identifier
      || matches!(self, TT::LiteralTrue | TT::LiteralFalse | TT::LiteralNull)
      || KEYWORDS_MAPPING.contains_key(&self)
  }
}

// These can be used as parameter and variable names.
pub static UNRESERVED_KEYWORDS: Lazy<HashSet<TT>> = Lazy::new(|| {
  let mut set = HashSet::<TT>::new();
  set.insert(TT::KeywordAs);
  set.insert(TT::KeywordAsync);
  set.insert(TT::KeywordFrom);
  set.insert(TT::KeywordGet);
  set.insert(TT::KeywordLet);
  set.insert(TT::KeywordOf);
  set.insert(TT::KeywordSet);
  set.insert(TT::KeywordStatic);
  set
});

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  // Whether one or more whitespace characters appear immediately before this token, and at least
  // one of those whitespace characters is a line terminator.
  pub preceded_by_line_terminator: bool,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}

/// Producer of the token stream consumed by the parser.
///
/// The parser pulls tokens strictly forwards, one at a time. The sole
/// re-read it ever requests is [`TokenSource::relex_regex`], issued when a
/// token starting with `/` arrives where an expression operand is expected.
/// Terminal conditions are in-band: [`TT::EOF`] once the source is
/// exhausted (repeatable), [`TT::Invalid`] for a malformed token.
pub trait TokenSource {
  /// Produces the next token, skipping whitespace and comments. Line
  /// terminators crossed while skipping are reported on the returned token.
  fn next(&mut self) -> Token;

  /// Re-lexes from `start` (the start offset of the token just produced,
  /// which must begin with `/`) as a regular expression literal. Subsequent
  /// `next` calls continue after the re-lexed token.
  fn relex_regex(&mut self, start: usize) -> Token;

  /// The full range of the underlying source.
  fn source_range(&self) -> Loc;

  /// The source text at `loc`.
  fn str(&self, loc: Loc) -> &str;
}
