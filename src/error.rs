use crate::token::Span;
use std::error;
use std::fmt::{self, Display, Formatter};

/// The closed set of failure kinds this crate can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexer found a run of characters it does not recognize
    UnknownToken,
    /// The input string was empty
    EmptyExpression,
    /// A literal token could not be converted to a number
    InvalidLiteral,
    /// A required token was missing
    ExpectedToken,
    /// A token was found where none was allowed
    UnexpectedToken,
    /// A token that cannot start an atom was found where one was expected
    InvalidExpr,
    /// Division with a zero divisor
    DivisionByZero,
    /// An arithmetic step left the finite range
    OverflowUnderflow,
    /// An operand outside the domain of its operator
    UnexpectedValue,
}

impl ErrorKind {
    /// Short lowercase name of the error kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownToken => "unknown token",
            Self::EmptyExpression => "empty expression",
            Self::InvalidLiteral => "invalid literal",
            Self::ExpectedToken => "expected token",
            Self::UnexpectedToken => "unexpected token",
            Self::InvalidExpr => "invalid expression",
            Self::DivisionByZero => "division by zero",
            Self::OverflowUnderflow => "overflow or underflow",
            Self::UnexpectedValue => "unexpected value",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

/// The source text an error points into, together with the offending span.
///
/// `source` is the *normalized* expression (whitespace runs collapsed), the
/// same string every token span refers to, carried verbatim so the caret
/// diagnostic can be reproduced without access to the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// The normalized expression text
    pub source: String,
    /// The offending substring within `source`
    pub span: Span,
}

/// Error type for the abacus crate.
///
/// Rendering is the `Display` impl: errors without a context print as
/// `error: <message>`; errors with one add the source line and a caret
/// line aligned under the offending substring.
///
/// ```
/// let err = abacus::eval("1 + 1p").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "error: unknown symbol found\n1 + 1p\n     ^"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Option<Context>,
}

impl Error {
    /// An error with no specific offending substring.
    #[must_use]
    pub fn plain<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Error {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// An error pinpointing `span` inside `source`.
    #[must_use]
    pub fn located<S: Into<String>>(kind: ErrorKind, message: S, source: &str, span: Span) -> Self {
        Error {
            kind,
            message: message.into(),
            context: Some(Context {
                source: source.to_owned(),
                span,
            }),
        }
    }

    /// Which kind of failure this is.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending span in the normalized source, if the error has one.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        self.context.as_ref().map(|ctx| ctx.span)
    }

    /// The normalized source text the span points into, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.context.as_ref().map(|ctx| ctx.source.as_str())
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        let ctx = match self.context {
            Some(ref ctx) => ctx,
            None => return write!(fmt, "error: {}", self.message),
        };

        // Column arithmetic is done in characters, not bytes, so the caret
        // stays aligned when the unknown run is not ASCII.
        let columns = ctx.source[..ctx.span.start].chars().count();
        let width = ctx.span.lexeme(&ctx.source).chars().count().max(1);
        let spaces = " ".repeat(columns);
        let marks = "~".repeat(width - 1);
        write!(
            fmt,
            "error: {}\n{}\n{}^{}",
            self.message, ctx.source, spaces, marks
        )
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_errors_render_one_line() {
        let err = Error::plain(ErrorKind::EmptyExpression, "insert at least one character");
        assert_eq!(err.kind(), ErrorKind::EmptyExpression);
        assert_eq!(err.span(), None);
        assert_eq!(err.to_string(), "error: insert at least one character");
    }

    #[test]
    fn located_errors_render_a_caret_line() {
        let err = Error::located(
            ErrorKind::DivisionByZero,
            "division by zero",
            "10 / 0",
            Span::new(3, 4),
        );
        assert_eq!(err.span(), Some(Span::new(3, 4)));
        assert_eq!(err.to_string(), "error: division by zero\n10 / 0\n   ^");
    }

    #[test]
    fn wide_spans_are_underlined_with_tildes() {
        let err = Error::located(
            ErrorKind::UnknownToken,
            "unknown symbol found",
            "1 + what",
            Span::new(4, 8),
        );
        assert_eq!(
            err.to_string(),
            "error: unknown symbol found\n1 + what\n    ^~~~"
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(ErrorKind::UnknownToken.to_string(), "unknown token");
        assert_eq!(ErrorKind::OverflowUnderflow.to_string(), "overflow or underflow");
    }
}
