#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::float_cmp
)]

//! Abacus, a crate for evaluating arithmetic expressions embedded in
//! strings, with caret-accurate error diagnostics.
//!
//! The easiest way to use this crate is the [`eval`](fn.eval.html)
//! function:
//!
//! ```
//! assert_eq!(abacus::eval("3 + 5 * 2"), Ok(13.0));
//! assert_eq!(abacus::eval("(5 + 3)! / 2!"), Ok(20160.0));
//! ```
//!
//! Failures carry the offending substring and its position in the input,
//! and render as a caret diagnostic through `Display`:
//!
//! ```
//! let err = abacus::eval("1 + 1p").unwrap_err();
//! assert_eq!(err.to_string(), "error: unknown symbol found\n1 + 1p\n     ^");
//! ```
//!
//! Parsing can be separated from evaluation with the
//! [`Expr`](struct.Expr.html) type:
//!
//! ```
//! use abacus::Expr;
//!
//! let expr = Expr::parse("(3 + 1)! - 2 ^ 3").unwrap();
//! assert_eq!(expr.eval(), Ok(16.0));
//! ```
//!
//! # Language definition
//!
//! The language implemented by abacus can contain the following elements:
//!
//! - integer and decimal literal values: `42`, `2.5`, `.5` (no exponent
//!   notation, at most 20 characters per literal);
//! - left and right parenthesis;
//! - mathematical operators: `+` for addition, `-` for subtraction (and
//!   unary negation), `*` for multiplication, `/` for division, `^` for
//!   exponentiation and the postfix `!` for factorial;
//! - the unary functions `abs`, `floor` and `ceil`, applied to the value
//!   that follows them: `abs(-3)`, `floor 2.7`.
//!
//! Any other symbol is rejected with an `UnknownToken` error.
//!
//! Operators follow the usual precedence; `+ - * /` and `^` associate to
//! the left, unary minus binds looser than `!` (so `-5!` is `-(5!)`), and
//! the right side of `^` cannot itself contain a `^` without parentheses.
//!
//! # Arithmetic rules
//!
//! All arithmetic is `f64`, but no non-finite value ever escapes: any step
//! that overflows to infinity (or would produce a NaN) fails with
//! `OverflowUnderflow`, a zero divisor fails with `DivisionByZero`, and
//! `^`/`!` reject operands outside their domain with `UnexpectedValue`
//! (negative or fractional exponents, negative factorial operands).
//! Comparisons against zero and one use an absolute tolerance of `1e-12`
//! to absorb the rounding noise of decimal literal reconstruction.
//!
//! # Technical details
//!
//! abacus is an AST interpreter: the input is normalized (whitespace runs
//! collapsed), tokenized, parsed by recursive descent with one token of
//! lookahead, and the resulting tree is evaluated in a single depth-first,
//! left-to-right, fail-fast walk. Each call to `eval` is independent and
//! holds no state; recursion depth is bounded only by the nesting of the
//! input, so callers accepting untrusted input should cap its length.

#[macro_use]
extern crate lazy_static;

mod ast;
mod error;
mod expr;
mod lexer;
mod parser;
mod token;
mod util;

pub use ast::{Ast, BinaryOp, UnaryOp};
pub use error::{Context, Error, ErrorKind};
pub use expr::{eval, Expr};
pub use lexer::{normalize, Lexer};
pub use parser::Parser;
pub use token::{Span, Token, TokenKind};
pub use util::{
    equal, is_integer, is_zero, remove_decimal_part, safe_add, safe_div, safe_mul, safe_sub,
    EPSILON,
};
