use crate::consts::ROOT_TOLERANCE;
use crate::numerical::{fmt::FormatOptions, Number};
use crate::primitive::{complex, float, PRECISION};
use crate::symbolic::SymExpr;
use rug::Float;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// The value of a variable in a [`Solution`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionValue {
    /// A number, exact or approximate.
    Number(Number),

    /// An expression in variables the solution leaves free, such as `x = 1/y`.
    Expr(SymExpr),
}

impl SolutionValue {
    /// If the value is a number, returns it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            Self::Expr(_) => None,
        }
    }

    /// Formats the value, applying the given options to numbers.
    pub fn fmt_with(&self, options: FormatOptions) -> impl Display + '_ {
        SolutionValueFormatter { value: self, options }
    }

    /// Returns true if the two values are the same, up to [`ROOT_TOLERANCE`] for approximate
    /// numbers.
    pub(super) fn approx_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => numbers_close(a, b),
            (Self::Expr(a), Self::Expr(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }

    fn order(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => number_order(a, b),
            (Self::Number(_), Self::Expr(_)) => Ordering::Less,
            (Self::Expr(_), Self::Number(_)) => Ordering::Greater,
            (Self::Expr(a), Self::Expr(b)) => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl Display for SolutionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fmt_with(FormatOptions::default()))
    }
}

struct SolutionValueFormatter<'a> {
    value: &'a SolutionValue,
    options: FormatOptions,
}

impl Display for SolutionValueFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.value {
            SolutionValue::Number(n) => write!(f, "{}", n.fmt(self.options)),
            SolutionValue::Expr(expr) => write!(f, "{}", expr.fmt_with(self.options)),
        }
    }
}

/// One solution of a system: a value for each variable the solution determines.
///
/// Variables are listed in the order they were given to the solver. A variable without a value
/// is unassigned in this solution and may take any value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution {
    bindings: Vec<(String, SolutionValue)>,
}

impl Solution {
    /// Creates a solution from its bindings, ordered by variable.
    pub fn new(bindings: Vec<(String, SolutionValue)>) -> Self {
        Self { bindings }
    }

    /// Returns the value of the given variable, or [`None`] if it is unassigned.
    pub fn get(&self, name: &str) -> Option<&SolutionValue> {
        self.bindings.iter()
            .find(|(var, _)| var == name)
            .map(|(_, value)| value)
    }

    /// Returns the assigned variables and their values.
    pub fn bindings(&self) -> &[(String, SolutionValue)] {
        &self.bindings
    }

    /// Returns true if no variable is assigned.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns true if both solutions assign the same variables to the same values.
    pub(super) fn approx_eq(&self, other: &Self) -> bool {
        self.bindings.len() == other.bindings.len()
            && self.bindings.iter().zip(&other.bindings)
                .all(|((a_var, a), (b_var, b))| a_var == b_var && a.approx_eq(b))
    }

    /// Orders solutions by the values of the given variables in turn. Numbers sort before
    /// expressions, which sort before unassigned variables.
    pub(super) fn order(&self, other: &Self, variables: &[String]) -> Ordering {
        for var in variables {
            let ordering = match (self.get(var), other.get(var)) {
                (Some(a), Some(b)) => a.order(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Returns true if the distance between two numbers is negligible relative to their size.
pub(super) fn numbers_close(a: &Number, b: &Number) -> bool {
    if let (Number::Rational(a), Number::Rational(b)) = (a, b) {
        return a == b;
    }
    let (a, b) = (a.to_complex(), b.to_complex());
    let distance = Float::with_val(PRECISION, complex(&a - &b).abs_ref());
    let scale = Float::with_val(PRECISION, a.abs_ref()).max(&float(1));
    distance <= Float::with_val(PRECISION, &scale * &*ROOT_TOLERANCE)
}

/// Orders numbers by real part, then by imaginary part.
pub(super) fn number_order(a: &Number, b: &Number) -> Ordering {
    if let (Number::Rational(a), Number::Rational(b)) = (a, b) {
        return a.cmp(b);
    }
    a.real_part().total_cmp(&b.real_part())
        .then_with(|| a.imag_part().total_cmp(&b.imag_part()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::rational;
    use pretty_assertions::assert_eq;
    use rug::ops::Pow;

    fn exact(n: i32) -> SolutionValue {
        SolutionValue::Number(Number::Rational(rational(n)))
    }

    #[test]
    fn lookup() {
        let solution = Solution::new(vec![("x".to_string(), exact(2))]);
        assert_eq!(solution.get("x"), Some(&exact(2)));
        assert_eq!(solution.get("y"), None);
    }

    #[test]
    fn ordering() {
        let vars = ["x".to_string(), "y".to_string()];
        let a = Solution::new(vec![("x".to_string(), exact(-1)), ("y".to_string(), exact(5))]);
        let b = Solution::new(vec![("x".to_string(), exact(1)), ("y".to_string(), exact(0))]);
        let c = Solution::new(vec![("x".to_string(), exact(1))]);
        assert_eq!(a.order(&b, &vars), Ordering::Less);
        assert_eq!(b.order(&c, &vars), Ordering::Less);
        assert_eq!(c.order(&c, &vars), Ordering::Equal);
    }

    #[test]
    fn approximate_equality() {
        let tiny = float(10).pow(-50);
        let a = Number::Complex(complex((float(2), float(0))));
        let b = Number::Complex(complex((Float::with_val(PRECISION, 2 + &tiny), float(0))));
        assert!(numbers_close(&a, &b));
        assert!(!numbers_close(&a, &Number::Rational(rational(3))));
    }
}
