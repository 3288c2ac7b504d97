use crate::ast::{Ast, BinaryOp, UnaryOp};
use crate::error::{Error, ErrorKind};
use crate::token::{Span, Token, TokenKind};
use libm::pow;
use std::iter::Peekable;
use std::vec::IntoIter;

/// Longest accepted literal lexeme, in characters.
const MAX_LITERAL_LEN: usize = 20;

/// Recursive descent parser over a token sequence.
///
/// Grammar, lowest precedence first, one token of lookahead, with `+ - * /`
/// and `^` left-associative:
///
/// ```text
/// EXPR      := MULDIV (('+' | '-') MULDIV)*
/// MULDIV    := EXPONENT (('*' | '/') EXPONENT)*
/// EXPONENT  := SIGN ('^' SIGN)*
/// SIGN      := '-'? FACTORIAL
/// FACTORIAL := ATOM '!'?
/// ATOM      := ('abs' | 'floor' | 'ceil') SIGN | LITERAL | '(' EXPR ')'
/// ```
///
/// Unary minus binds looser than factorial, so `-5!` is `-(5!)`, and the
/// right side of `^` is one more `SIGN`, so `2^3^2` is `(2^3)^2` and
/// `2^-5` parses (and is rejected later, during evaluation).
///
/// Tokens are consumed strictly left to right and never re-read; the first
/// syntax error aborts the parse with no recovery.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Peekable<IntoIter<Token>>,
}

impl<'a> Parser<'a> {
    /// Create a parser over `tokens`, with `source` being the normalized
    /// text the token spans point into.
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Parser {
        Parser {
            source,
            tokens: tokens.into_iter().peekable(),
        }
    }

    /// Parse a complete expression, consuming the parser.
    ///
    /// Fails with `UnexpectedToken` if tokens are left over once a full
    /// expression has been parsed.
    pub fn parse(mut self) -> Result<Ast, Error> {
        let ast = self.expr()?;

        if let Some(&token) = self.tokens.peek() {
            return Err(Error::located(
                ErrorKind::UnexpectedToken,
                "unexpected token after a complete expression",
                self.source,
                token.span,
            ));
        }
        Ok(ast)
    }

    fn expr(&mut self) -> Result<Ast, Error> {
        let mut node = self.mul_div()?;
        while let Some(token) = self.eat_one_of(&[TokenKind::Plus, TokenKind::Minus]) {
            let op = if token.kind == TokenKind::Plus {
                BinaryOp::Add
            } else {
                BinaryOp::Sub
            };
            let right = self.mul_div()?;
            node = Ast::binary(op, token.span, node, right);
        }
        Ok(node)
    }

    fn mul_div(&mut self) -> Result<Ast, Error> {
        let mut node = self.exponent()?;
        while let Some(token) = self.eat_one_of(&[TokenKind::Star, TokenKind::Slash]) {
            let op = if token.kind == TokenKind::Star {
                BinaryOp::Mul
            } else {
                BinaryOp::Div
            };
            let right = self.exponent()?;
            node = Ast::binary(op, token.span, node, right);
        }
        Ok(node)
    }

    fn exponent(&mut self) -> Result<Ast, Error> {
        let mut node = self.sign()?;
        while let Some(token) = self.eat(TokenKind::Caret) {
            let right = self.sign()?;
            node = Ast::binary(BinaryOp::Pow, token.span, node, right);
        }
        Ok(node)
    }

    fn sign(&mut self) -> Result<Ast, Error> {
        if let Some(token) = self.eat(TokenKind::Minus) {
            let operand = self.factorial()?;
            return Ok(Ast::unary(UnaryOp::Neg, token.span, operand));
        }
        self.factorial()
    }

    fn factorial(&mut self) -> Result<Ast, Error> {
        let node = self.atom()?;
        if let Some(token) = self.eat(TokenKind::Bang) {
            return Ok(Ast::unary(UnaryOp::Factorial, token.span, node));
        }
        Ok(node)
    }

    fn atom(&mut self) -> Result<Ast, Error> {
        let token = match self.tokens.next() {
            Some(token) => token,
            None => {
                return Err(Error::located(
                    ErrorKind::ExpectedToken,
                    "expected a token, found end of expression",
                    self.source,
                    self.end_span(),
                ));
            }
        };

        match token.kind {
            TokenKind::Literal => self.literal(token),
            TokenKind::OpenParen => {
                let node = self.expr()?;
                if self.eat(TokenKind::CloseParen).is_none() {
                    return Err(Error::located(
                        ErrorKind::ExpectedToken,
                        "expected a closing parenthesis ')'",
                        self.source,
                        token.span,
                    ));
                }
                Ok(node)
            }
            TokenKind::Abs => self.function(UnaryOp::Abs, token.span),
            TokenKind::Floor => self.function(UnaryOp::Floor, token.span),
            TokenKind::Ceil => self.function(UnaryOp::Ceil, token.span),
            _ => Err(Error::located(
                ErrorKind::InvalidExpr,
                "expected a literal, a function name or '('",
                self.source,
                token.span,
            )),
        }
    }

    fn function(&mut self, op: UnaryOp, span: Span) -> Result<Ast, Error> {
        let operand = self.sign()?;
        Ok(Ast::unary(op, span, operand))
    }

    fn literal(&self, token: Token) -> Result<Ast, Error> {
        match convert_literal(token.span.lexeme(self.source)) {
            Some(value) => Ok(Ast::Value(value)),
            None => Err(Error::located(
                ErrorKind::InvalidLiteral,
                "invalid numeric literal",
                self.source,
                token.span,
            )),
        }
    }

    /// Pop the next token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        match self.tokens.peek().copied() {
            Some(token) if token.kind == kind => self.tokens.next(),
            _ => None,
        }
    }

    /// Pop the next token if its kind is one of `kinds`.
    fn eat_one_of(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        match self.tokens.peek().copied() {
            Some(token) if kinds.contains(&token.kind) => self.tokens.next(),
            _ => None,
        }
    }

    /// Span of the last character of the input, used when the token stream
    /// runs out early.
    fn end_span(&self) -> Span {
        let start = self
            .source
            .char_indices()
            .next_back()
            .map_or(0, |(offset, _)| offset);
        Span::new(start, self.source.len())
    }
}

/// Convert a literal lexeme to its numeric value.
///
/// The lexeme is split at the decimal point; each side is accumulated as
/// `value * 10 + digit` and the fractional part is scaled down by
/// `10^len`. A dotted literal needs at least one fractional digit, a
/// dotless one at least one integer digit, and anything other than ASCII
/// digits (or a lexeme longer than `MAX_LITERAL_LEN`) invalidates it.
fn convert_literal(text: &str) -> Option<f64> {
    if text.is_empty() || text.chars().count() > MAX_LITERAL_LEN {
        return None;
    }

    let mut parts = text.splitn(2, '.');
    let integer = parts.next().unwrap_or("");
    let fraction = parts.next();

    let mut value = 0.0;
    for c in integer.chars() {
        let digit = c.to_digit(10)?;
        value = value * 10.0 + f64::from(digit);
    }

    match fraction {
        Some(fraction) => {
            if fraction.is_empty() {
                return None;
            }
            let mut part = 0.0;
            for c in fraction.chars() {
                let digit = c.to_digit(10)?;
                part = part * 10.0 + f64::from(digit);
            }
            #[allow(clippy::cast_precision_loss)]
            let scale = pow(10.0, fraction.len() as f64);
            value += part / scale;
        }
        None => {
            if integer.is_empty() {
                return None;
            }
        }
    }

    Some(value)
}
