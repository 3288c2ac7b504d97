use crate::error::{Error, ErrorKind};
use crate::token::{Span, Token, TokenKind};
use crate::util::KEYWORDS;
use std::iter::Peekable;
use std::str::CharIndices;

/// Collapse every run of whitespace in `input` into a single space.
///
/// Tokenization and every diagnostic span are relative to the string this
/// function returns, so the same raw input always produces the same spans.
///
/// # Examples
///
/// ```
/// # use abacus::normalize;
/// assert_eq!(normalize("1  +\t\t2"), "1 + 2");
/// assert_eq!(normalize("1 + 2"), "1 + 2");
/// ```
#[must_use]
pub fn normalize(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_whitespace = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                output.push(' ');
            }
            in_whitespace = true;
        } else {
            output.push(c);
            in_whitespace = false;
        }
    }
    return output;
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    source: &'a str,
    input: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`, which should already be normalized.
    pub fn new(source: &'a str) -> Lexer {
        Lexer {
            source,
            input: source.char_indices().peekable(),
        }
    }

    /// Scan the whole input into a token sequence.
    ///
    /// Fails with `EmptyExpression` on empty input and with `UnknownToken`
    /// on the first unrecognized run of characters; no partial token list
    /// is ever returned.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, Error> {
        if self.source.is_empty() {
            return Err(Error::plain(
                ErrorKind::EmptyExpression,
                "insert at least one character",
            ));
        }

        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        while let Some(&(_, c)) = self.input.peek() {
            if c.is_whitespace() {
                self.input.next();
            } else {
                break;
            }
        }

        let (start, c) = match self.input.next() {
            Some(pair) => pair,
            None => return Ok(None),
        };

        let token = match c {
            '0'..='9' | '.' => {
                // Maximal run of digits and dots; whether it forms a valid
                // number is decided during literal conversion.
                let end = self.eat_while(|c| c.is_ascii_digit() || c == '.');
                Token::new(TokenKind::Literal, start, end)
            }
            '(' => Token::new(TokenKind::OpenParen, start, start + 1),
            ')' => Token::new(TokenKind::CloseParen, start, start + 1),
            '+' => Token::new(TokenKind::Plus, start, start + 1),
            '-' => Token::new(TokenKind::Minus, start, start + 1),
            '^' => Token::new(TokenKind::Caret, start, start + 1),
            '*' => Token::new(TokenKind::Star, start, start + 1),
            '/' => Token::new(TokenKind::Slash, start, start + 1),
            '!' => Token::new(TokenKind::Bang, start, start + 1),
            c if c.is_ascii_alphabetic() => {
                let end = self.eat_while(|c| c.is_ascii_alphanumeric());
                let word = &self.source[start..end];
                match KEYWORDS.get(word) {
                    Some(&kind) => Token::new(kind, start, end),
                    None => return Err(self.unknown_token(start, end)),
                }
            }
            _ => {
                let end = self.eat_while(|c| !is_token_start(c));
                return Err(self.unknown_token(start, end));
            }
        };
        Ok(Some(token))
    }

    fn unknown_token(&self, start: usize, end: usize) -> Error {
        Error::located(
            ErrorKind::UnknownToken,
            "unknown symbol found",
            self.source,
            Span::new(start, end),
        )
    }

    /// Consume characters while `pred` holds and return the offset of the
    /// first character left unconsumed.
    fn eat_while<F: Fn(char) -> bool>(&mut self, pred: F) -> usize {
        while let Some(&(_, c)) = self.input.peek() {
            if pred(c) {
                self.input.next();
            } else {
                break;
            }
        }
        self.input.peek().map_or(self.source.len(), |&(i, _)| i)
    }
}

/// Check if `c` can appear at the first character of some token, used to
/// delimit the span of an unrecognized run.
fn is_token_start(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_ascii_alphabetic()
        || c.is_whitespace()
        || matches!(c, '.' | '(' | ')' | '+' | '-' | '^' | '*' | '/' | '!')
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn kinds(input: &str) -> Result<Vec<TokenKind>, Error> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(tokens.into_iter().map(|t| t.kind).collect())
    }

    #[test_case("2 + 2" => Ok(vec![TokenKind::Literal, TokenKind::Plus, TokenKind::Literal]) ; "addition is scanned properly")]
    #[test_case("2+2" => Ok(vec![TokenKind::Literal, TokenKind::Plus, TokenKind::Literal]) ; "spaces are optional")]
    #[test_case("(1.5)" => Ok(vec![TokenKind::OpenParen, TokenKind::Literal, TokenKind::CloseParen]) ; "parens and decimals")]
    #[test_case("5!" => Ok(vec![TokenKind::Literal, TokenKind::Bang]) ; "factorial")]
    #[test_case("2^3/4*5" => Ok(vec![TokenKind::Literal, TokenKind::Caret, TokenKind::Literal, TokenKind::Slash, TokenKind::Literal, TokenKind::Star, TokenKind::Literal]) ; "all binary operators")]
    #[test_case("abs floor ceil" => Ok(vec![TokenKind::Abs, TokenKind::Floor, TokenKind::Ceil]) ; "keywords")]
    fn scan(input: &str) -> Result<Vec<TokenKind>, Error> {
        kinds(input)
    }

    #[test]
    fn empty_input() {
        let err = Lexer::new("").tokenize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyExpression);
        assert_eq!(err.span(), None);
    }

    #[test]
    fn spans_are_cumulative() {
        let tokens = Lexer::new("10 + 2.5").tokenize().unwrap();
        let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![Span::new(0, 2), Span::new(3, 4), Span::new(5, 8)]
        );
        assert_eq!(spans[2].lexeme("10 + 2.5"), "2.5");
    }

    #[test]
    fn unknown_word_is_located() {
        let err = Lexer::new("1 + 1p").tokenize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownToken);
        assert_eq!(err.span(), Some(Span::new(5, 6)));
    }

    #[test]
    fn unknown_symbol_run_is_located_as_one_error() {
        let err = Lexer::new("1 @#$ 2").tokenize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownToken);
        assert_eq!(err.span(), Some(Span::new(2, 5)));
    }

    #[test]
    fn unknown_keyword_covers_the_whole_word() {
        let err = Lexer::new("sin(1)").tokenize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownToken);
        assert_eq!(err.span(), Some(Span::new(0, 3)));
    }

    #[test_case("1  +  2" => "1 + 2" ; "space runs collapse")]
    #[test_case("1\t+\t\t2" => "1 + 2" ; "tab runs collapse")]
    #[test_case(" 1 " => " 1 " ; "single separators are kept")]
    #[test_case("" => "" ; "empty stays empty")]
    fn normalization(input: &str) -> String {
        normalize(input)
    }
}
