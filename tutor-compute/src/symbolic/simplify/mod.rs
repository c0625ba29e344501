//! Simplification of expressions into a rational normal form.
//!
//! An expression is simplified by expanding it into a quotient of two polynomials (see
//! [`RationalFunction`]), cancelling the factors the two share, and printing the result with the
//! terms in descending order. For example, `x*(x + 2) - 2*x` simplifies to `x**2`, and
//! `(x**2 - 1)/(x - 1)` simplifies to `x + 1`.
//!
//! Floats are converted to the exact fractions they represent, and roots of rational numbers are
//! evaluated when the result is rational. Everything that can't be expanded, such as function
//! calls, is kept as an opaque atom with simplified arguments.

pub mod step;

use crate::error::Error;
use step::Step;
use super::{rational::RationalFunction, StepCollector, SymExpr};

/// Base implementation of the simplification algorithm.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Result<SymExpr, Error> {
    let rf = RationalFunction::from_expr(expr, step_collector)?;
    Ok(rf.normalize(step_collector).to_expr())
}

/// Simplify the given expression.
pub fn simplify(expr: &SymExpr) -> Result<SymExpr, Error> {
    simplify_with(expr, &mut ())
}

/// Simplify the given expression. The steps taken by the simplifier will also be collected and
/// returned, with consecutive repeats of the same step merged.
pub fn simplify_with_steps(expr: &SymExpr) -> Result<(SymExpr, Vec<Step>), Error> {
    let mut steps = Vec::new();
    let expr = simplify_with(expr, &mut steps)?;
    steps.dedup();
    Ok((expr, steps))
}

#[cfg(test)]
mod tests {
    use crate::error::kind::{DegreeLimit, DivisionByZero};
    use pretty_assertions::assert_eq;
    use tutor_parser::parser::{ast::Expr as AstExpr, Parser};
    use super::*;

    fn parse(source: &str) -> SymExpr {
        SymExpr::from(Parser::new(source).try_parse_full::<AstExpr>().unwrap())
    }

    fn simplified(source: &str) -> String {
        simplify(&parse(source)).unwrap().to_string()
    }

    #[test]
    fn combine_like_terms() {
        let (expr, steps) = simplify_with_steps(&parse("x + x + x")).unwrap();
        assert_eq!(expr.to_string(), "3*x");
        assert!(steps.contains(&Step::CombineLikeTerms));

        assert_eq!(simplified("2*x + 3 - 7"), "2*x - 4");
        assert_eq!(simplified("x - x"), "0");
    }

    #[test]
    fn already_simplified() {
        assert_eq!(simplified("x - 4"), "x - 4");
        assert_eq!(simplified("x**2 + 1"), "x**2 + 1");
        assert_eq!(simplified("x - 2*y - 4"), "x - 2*y - 4");
    }

    #[test]
    fn expand_products_and_powers() {
        let (expr, steps) = simplify_with_steps(&parse("(x + 1)**2")).unwrap();
        assert_eq!(expr.to_string(), "x**2 + 2*x + 1");
        assert!(steps.contains(&Step::ExpandPower));

        let (expr, steps) = simplify_with_steps(&parse("x*(x - 2) + 2*x")).unwrap();
        assert_eq!(expr.to_string(), "x**2");
        assert!(steps.contains(&Step::DistributiveProperty));
    }

    #[test]
    fn cancel_fractions() {
        let (expr, steps) = simplify_with_steps(&parse("(x**2 - 1)/(x - 1)")).unwrap();
        assert_eq!(expr.to_string(), "x + 1");
        assert!(steps.contains(&Step::CancelFactors));

        assert_eq!(simplified("1/x + 1/y"), "(x + y)/(x*y)");
        assert_eq!(simplified("x/2 + x/3"), "5*x/6");
    }

    #[test]
    fn decimals_become_fractions() {
        let (expr, steps) = simplify_with_steps(&parse("0.5*x - 1.25")).unwrap();
        assert_eq!(expr.to_string(), "x/2 - 5/4");
        assert_eq!(steps.first(), Some(&Step::ExactDecimal));
    }

    #[test]
    fn roots_and_imaginary_unit() {
        assert_eq!(simplified("sqrt(4) + 8**(1/3)"), "4");
        assert_eq!(simplified("sqrt(-9)"), "3*I");
        assert_eq!(simplified("I**2 + 1"), "0");
        assert_eq!(simplified("sqrt(2)*sqrt(2)"), "2");
        assert_eq!(simplified("(1 + sqrt(3))**2"), "2*sqrt(3) + 4");
    }

    #[test]
    fn large_powers_stay_unexpanded() {
        assert_eq!(simplified("(x + 1)**30"), "(x + 1)**30");
    }

    #[test]
    fn huge_exponents_stay_unexpanded() {
        assert_eq!(simplified("x**2000000000 - 1"), "x**2000000000 - 1");
        assert_eq!(simplified("I**2000000001"), "I");

        // the exponents multiply past u32::MAX if expanded
        let nested = simplified("(x**2000000000)**3");
        assert!(nested.contains("2000000000"));
        assert!(!nested.contains("1705032704"));
    }

    #[test]
    fn product_above_degree_limit() {
        assert_eq!(simplified("x**200*x**56"), "x**256");
        let err = simplify(&parse("x**200*x**200")).unwrap_err();
        assert!(err.is::<DegreeLimit>());
    }

    #[test]
    fn division_by_zero() {
        let err = simplify(&parse("x/(2 - 2)")).unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }
}
