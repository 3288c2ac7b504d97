use crate::ast::Ast;
use crate::lexer::{normalize, Lexer};
use crate::parser::Parser;
use crate::Error;

/// Evaluate a single expression from `input`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// tokenizing, parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// # use abacus::eval;
/// assert_eq!(eval("45 - 2^3"), Ok(37.0));
/// assert_eq!(eval("(3 + 1)! - 2 ^ 3"), Ok(16.0));
/// assert!(eval("10 / 0").is_err());
/// ```
pub fn eval(input: &str) -> Result<f64, Error> {
    Expr::parse(input).and_then(|expr| expr.eval())
}

/// A parsed mathematical expression.
///
/// Parsing and evaluation can be separated, which also gives access to the
/// normalized source text and the expression tree.
///
/// # Examples
/// ```
/// # use abacus::Expr;
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.eval(), Ok(13.0));
///
/// let expr = Expr::parse("2  *\t3").unwrap();
/// assert_eq!(expr.source(), "2 * 3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    source: String,
    ast: Ast,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// The input is normalized (whitespace runs collapsed to single
    /// spaces) before tokenizing; every span in a returned error refers to
    /// the normalized text.
    ///
    /// # Examples
    /// ```
    /// # use abacus::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3eff + 5 * 2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let source = normalize(expression);
        let tokens = Lexer::new(&source).tokenize()?;
        let ast = Parser::new(&source, tokens).parse()?;
        Ok(Expr { source, ast })
    }

    /// Evaluate the expression.
    ///
    /// # Examples
    ///
    /// ```
    /// # use abacus::Expr;
    /// let expr = Expr::parse("(5 + 3)! / 2!").unwrap();
    /// assert_eq!(expr.eval(), Ok(20160.0));
    /// ```
    pub fn eval(&self) -> Result<f64, Error> {
        self.ast.eval(&self.source)
    }

    /// The normalized source text all spans refer to.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression tree.
    #[must_use]
    pub fn ast(&self) -> &Ast {
        &self.ast
    }
}
