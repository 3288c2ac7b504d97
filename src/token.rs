use std::fmt::{self, Display, Formatter};

/// A half-open `[start, end)` range locating a token or substring inside
/// the normalized input string.
///
/// All spans produced by this crate point into the *normalized* text (see
/// [`normalize`](fn.normalize.html)), never into the caller's raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first character of the lexeme.
    pub start: usize,
    /// Offset one past the last character of the lexeme.
    pub end: usize,
}

impl Span {
    /// Create a span from its two offsets.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Get the substring of `source` this span covers.
    #[must_use]
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Possible tokens to find in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal, integer or decimal
    Literal,
    /// Left parenthesis
    OpenParen,
    /// Right parenthesis
    CloseParen,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `!`
    Bang,
    /// The `abs` keyword
    Abs,
    /// The `floor` keyword
    Floor,
    /// The `ceil` keyword
    Ceil,
}

impl TokenKind {
    /// Human readable name for this token kind, used in error messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Literal => "a numeric literal",
            Self::OpenParen => "'('",
            Self::CloseParen => "')'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Caret => "'^'",
            Self::Bang => "'!'",
            Self::Abs => "'abs'",
            Self::Floor => "'floor'",
            Self::Ceil => "'ceil'",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(self.describe())
    }
}

/// A token together with the span of its lexeme in the normalized input.
///
/// The lexeme itself is not stored; it is recovered by slicing the
/// normalized source with [`Span::lexeme`](struct.Span.html#method.lexeme).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    /// What was recognized at this position
    pub kind: TokenKind,
    /// Where it was recognized
    pub span: Span,
}

impl Token {
    /// Create a token from its kind and offsets.
    #[must_use]
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Token {
            kind,
            span: Span::new(start, end),
        }
    }
}
