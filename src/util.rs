use crate::token::TokenKind;
use hashbrown::HashMap;
use libm::{fabs, round};

/// Absolute tolerance used by every floating point comparison in this
/// crate. Decimal literals are reconstructed digit by digit, so results
/// carry a little binary rounding noise that exact equality would trip on.
pub const EPSILON: f64 = 1e-12;

lazy_static! {
    /// Keywords recognized by the lexer as unary function names.
    pub static ref KEYWORDS: HashMap<String, TokenKind> = {
        let mut map = HashMap::<String, TokenKind>::new();
        map.insert("abs".into(), TokenKind::Abs);
        map.insert("floor".into(), TokenKind::Floor);
        map.insert("ceil".into(), TokenKind::Ceil);
        map.shrink_to_fit();
        map
    };
}

/// Check if `a` and `b` are equal within [`EPSILON`](constant.EPSILON.html).
#[must_use]
pub fn equal(a: f64, b: f64) -> bool {
    return fabs(a - b) < EPSILON;
}

/// Check if `x` is zero within [`EPSILON`](constant.EPSILON.html).
#[must_use]
pub fn is_zero(x: f64) -> bool {
    return equal(x, 0.0);
}

/// Check if `x` holds an integral value, up to the comparison tolerance.
#[must_use]
pub fn is_integer(x: f64) -> bool {
    return equal(x, round(x));
}

/// Round `x` to the nearest integral value.
#[must_use]
pub fn remove_decimal_part(x: f64) -> f64 {
    return round(x);
}

/// `None` when the raw operation left the finite range.
fn checked(x: f64) -> Option<f64> {
    if x.is_finite() {
        Some(x)
    } else {
        None
    }
}

/// Add `a` and `b`, detecting overflow to infinity.
#[must_use]
pub fn safe_add(a: f64, b: f64) -> Option<f64> {
    checked(a + b)
}

/// Subtract `b` from `a`, detecting overflow to infinity.
#[must_use]
pub fn safe_sub(a: f64, b: f64) -> Option<f64> {
    checked(a - b)
}

/// Multiply `a` by `b`, detecting overflow to infinity.
#[must_use]
pub fn safe_mul(a: f64, b: f64) -> Option<f64> {
    checked(a * b)
}

/// Divide `a` by `b`, detecting overflow and the `0/0` NaN case.
#[must_use]
pub fn safe_div(a: f64, b: f64) -> Option<f64> {
    checked(a / b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1.0, 1.0 => true ; "identical values are equal")]
    #[test_case(0.1 + 0.2, 0.3 => true ; "rounding noise is absorbed")]
    #[test_case(1.0, 1.0 + 1e-9 => false ; "distinct values are not equal")]
    fn tolerant_equality(a: f64, b: f64) -> bool {
        equal(a, b)
    }

    #[test]
    fn zero_and_integer_checks() {
        assert!(is_zero(0.0));
        assert!(is_zero(-0.0));
        assert!(is_zero(1e-13));
        assert!(!is_zero(1e-6));

        assert!(is_integer(3.0));
        assert!(is_integer(-7.0));
        assert!(is_integer(2.0 + 1e-13));
        assert!(!is_integer(2.5));
    }

    #[test]
    fn rounding() {
        assert_eq!(remove_decimal_part(2.4), 2.0);
        assert_eq!(remove_decimal_part(2.6), 3.0);
        assert_eq!(remove_decimal_part(-2.6), -3.0);
    }

    #[test]
    fn safe_ops_pass_finite_results_through() {
        assert_eq!(safe_add(2.0, 3.0), Some(5.0));
        assert_eq!(safe_sub(2.0, 3.0), Some(-1.0));
        assert_eq!(safe_mul(2.0, 3.0), Some(6.0));
        assert_eq!(safe_div(6.0, 3.0), Some(2.0));
    }

    #[test]
    fn safe_ops_reject_non_finite_results() {
        assert_eq!(safe_add(f64::MAX, f64::MAX), None);
        assert_eq!(safe_sub(-f64::MAX, f64::MAX), None);
        assert_eq!(safe_mul(1e300, 1e300), None);
        assert_eq!(safe_div(1e300, 1e-300), None);
        assert_eq!(safe_div(0.0, 0.0), None);
    }

    #[test]
    fn keywords() {
        assert_eq!(KEYWORDS.get("abs"), Some(&TokenKind::Abs));
        assert_eq!(KEYWORDS.get("floor"), Some(&TokenKind::Floor));
        assert_eq!(KEYWORDS.get("ceil"), Some(&TokenKind::Ceil));
        assert_eq!(KEYWORDS.get("sin"), None);
    }
}
