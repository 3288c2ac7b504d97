use crate::error::{Error, ErrorKind};
use crate::token::Span;
use crate::util;
use libm::{ceil, fabs, floor};

/// Operators taking a single operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Unary minus
    Neg,
    /// `!`
    Factorial,
    /// `abs`
    Abs,
    /// `floor`
    Floor,
    /// `ceil`
    Ceil,
}

/// Operators taking two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

/// Ast nodes for the expressions.
///
/// Each operator node owns its children and carries the span of the token
/// that introduced it, so evaluation failures can point at the operator in
/// the normalized source. The tree is built bottom-up by the parser and is
/// never mutated or shared afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// A constant value
    Value(f64),
    /// An operator applied to one operand
    Unary {
        /// Which operator
        op: UnaryOp,
        /// Span of the operator token
        span: Span,
        /// The operand subtree
        operand: Box<Ast>,
    },
    /// `left <op> right`
    Binary {
        /// Which operator
        op: BinaryOp,
        /// Span of the operator token
        span: Span,
        /// The left operand subtree
        left: Box<Ast>,
        /// The right operand subtree
        right: Box<Ast>,
    },
}

impl Ast {
    /// Build a unary node.
    #[must_use]
    pub fn unary(op: UnaryOp, span: Span, operand: Ast) -> Self {
        Ast::Unary {
            op,
            span,
            operand: Box::new(operand),
        }
    }

    /// Build a binary node.
    #[must_use]
    pub fn binary(op: BinaryOp, span: Span, left: Ast, right: Ast) -> Self {
        Ast::Binary {
            op,
            span,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluate the tree in a single depth-first walk.
    ///
    /// Operands are evaluated left to right and the first failure is
    /// returned as-is: after a left operand fails, the right operand is
    /// never evaluated. `source` is the normalized text the node spans
    /// refer to, used to build located errors.
    pub fn eval(&self, source: &str) -> Result<f64, Error> {
        match *self {
            Ast::Value(value) => Ok(value),
            Ast::Unary {
                op,
                span,
                ref operand,
            } => {
                let value = operand.eval(source)?;
                apply_unary(op, span, value, source)
            }
            Ast::Binary {
                op,
                span,
                ref left,
                ref right,
            } => {
                let left = left.eval(source)?;
                let right = right.eval(source)?;
                apply_binary(op, span, left, right, source)
            }
        }
    }

    /// If the node is a constant, get `Some(constant)`. Else, get `None`.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        if let Self::Value(value) = *self {
            Some(value)
        } else {
            None
        }
    }
}

fn apply_unary(op: UnaryOp, span: Span, value: f64, source: &str) -> Result<f64, Error> {
    match op {
        UnaryOp::Neg => Ok(-value),
        UnaryOp::Abs => Ok(fabs(value)),
        UnaryOp::Floor => Ok(floor(value)),
        UnaryOp::Ceil => Ok(ceil(value)),
        UnaryOp::Factorial => factorial(value, span, source),
    }
}

fn apply_binary(op: BinaryOp, span: Span, left: f64, right: f64, source: &str) -> Result<f64, Error> {
    let result = match op {
        BinaryOp::Add => util::safe_add(left, right),
        BinaryOp::Sub => util::safe_sub(left, right),
        BinaryOp::Mul => util::safe_mul(left, right),
        BinaryOp::Div => {
            if util::is_zero(right) {
                return Err(Error::located(
                    ErrorKind::DivisionByZero,
                    "division by zero",
                    source,
                    span,
                ));
            }
            util::safe_div(left, right)
        }
        BinaryOp::Pow => return pow(left, right, span, source),
    };
    result.ok_or_else(|| overflow(span, source))
}

/// Exponentiation by repeated multiplication.
///
/// Only non-negative integral exponents are admitted. A base of zero or
/// one short-circuits to 1, zero base included: `0^5` evaluates to 1 here.
fn pow(base: f64, exponent: f64, span: Span, source: &str) -> Result<f64, Error> {
    if exponent < 0.0 || !util::is_integer(exponent) {
        return Err(Error::located(
            ErrorKind::UnexpectedValue,
            "exponent must be a non-negative integer",
            source,
            span,
        ));
    }

    if util::is_zero(base) || util::equal(base, 1.0) {
        return Ok(1.0);
    }

    #[allow(clippy::cast_possible_truncation)]
    let times = util::remove_decimal_part(exponent) as u64;
    let mut result = 1.0;
    for _ in 0..times {
        result = util::safe_mul(result, base).ok_or_else(|| overflow(span, source))?;
    }
    Ok(result)
}

/// Factorial of a rounded non-negative operand.
fn factorial(value: f64, span: Span, source: &str) -> Result<f64, Error> {
    if value < 0.0 {
        return Err(Error::located(
            ErrorKind::UnexpectedValue,
            "factorial of a negative value",
            source,
            span,
        ));
    }

    let mut n = util::remove_decimal_part(value);
    let mut result = 1.0;
    while n > 1.0 {
        result = util::safe_mul(result, n).ok_or_else(|| overflow(span, source))?;
        n -= 1.0;
    }
    Ok(result)
}

fn overflow(span: Span, source: &str) -> Error {
    Error::located(
        ErrorKind::OverflowUnderflow,
        "arithmetic overflow",
        source,
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(0, 1)
    }

    #[test]
    fn values_evaluate_to_themselves() {
        assert_eq!(Ast::Value(3.5).eval(""), Ok(3.5));
        assert_eq!(Ast::Value(3.5).value(), Some(3.5));
    }

    #[test]
    fn binary_arithmetic() {
        let node = Ast::binary(BinaryOp::Add, span(), Ast::Value(2.0), Ast::Value(3.0));
        assert_eq!(node.eval("2+3"), Ok(5.0));

        let node = Ast::binary(BinaryOp::Pow, span(), Ast::Value(2.0), Ast::Value(10.0));
        assert_eq!(node.eval("2^10"), Ok(1024.0));
    }

    #[test]
    fn division_by_zero_points_at_the_operator() {
        let node = Ast::binary(BinaryOp::Div, Span::new(3, 4), Ast::Value(10.0), Ast::Value(0.0));
        let err = node.eval("10 / 0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
        assert_eq!(err.span(), Some(Span::new(3, 4)));
    }

    #[test]
    fn zero_or_one_base_short_circuits() {
        let zero = Ast::binary(BinaryOp::Pow, span(), Ast::Value(0.0), Ast::Value(5.0));
        assert_eq!(zero.eval("0^5"), Ok(1.0));

        let one = Ast::binary(BinaryOp::Pow, span(), Ast::Value(1.0), Ast::Value(200.0));
        assert_eq!(one.eval("1^200"), Ok(1.0));
    }

    #[test]
    fn factorial_rounds_fractional_operands() {
        let node = Ast::unary(UnaryOp::Factorial, span(), Ast::Value(4.4));
        assert_eq!(node.eval("4.4!"), Ok(24.0));
    }

    #[test]
    fn left_failure_wins_over_right_failure() {
        // 1/0 on the left, (-1)! on the right: both would fail on their
        // own, the reported error must be the left one.
        let left = Ast::binary(
            BinaryOp::Div,
            Span::new(1, 2),
            Ast::Value(1.0),
            Ast::Value(0.0),
        );
        let right = Ast::unary(UnaryOp::Factorial, Span::new(10, 11), Ast::Value(-1.0));
        let node = Ast::binary(BinaryOp::Add, Span::new(5, 6), left, right);
        let err = node.eval("1/0 + (-1)!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
        assert_eq!(err.span(), Some(Span::new(1, 2)));
    }

    #[test]
    fn overflow_surfaces_on_the_first_unsafe_multiplication() {
        let node = Ast::unary(UnaryOp::Factorial, span(), Ast::Value(10_000_000.0));
        let err = node.eval("10000000!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OverflowUnderflow);
    }
}
