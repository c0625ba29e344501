//! Factoring of expressions over the rational numbers.
//!
//! The expression is first brought into the rational normal form used by
//! [`simplify`](super::simplify), and the numerator and denominator are then factored separately.
//! A polynomial is split into:
//!
//! - its rational content, with the sign of the leading term (`-2x - 4 = -2(x + 2)`),
//! - the common monomial of its terms (`x^3 + x = x(x^2 + 1)`),
//! - for polynomials in a single variable, linear factors from its rational roots, with
//!   multiplicity (`x^2 - 2x + 1 = (x - 1)^2`),
//! - differences of two squares (`x^2 - y^2 = (x - y)(x + y)`), factored again recursively.
//!
//! Whatever is left is kept whole. The factors are ordered by degree, then by number of terms,
//! then by their coefficients from the leading term down, so `x^2 - 1` factors as
//! `(x - 1)*(x + 1)`.

pub mod step;

use crate::error::Error;
use rug::{Integer, Rational};
use std::cmp::Ordering;
use step::Step;
use super::polynomial::{Indeterminate, Monomial, Polynomial, UniPoly};
use super::rational::{exact_root, RationalFunction};
use super::{StepCollector, SymExpr};

type Poly = Polynomial<Rational>;

/// A polynomial written as `content * factor_1^m_1 * factor_2^m_2 * ...`.
///
/// Every factor has integer coefficients with no common divisor and a positive leading
/// coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    /// The rational content.
    pub content: Rational,

    /// The factors and their multiplicities.
    pub factors: Vec<(Poly, u32)>,
}

impl Factorization {
    /// Factors a polynomial.
    pub fn new(poly: &Poly, steps: &mut dyn StepCollector<Step>) -> Self {
        if poly.is_zero() {
            return Self { content: Rational::new(), factors: Vec::new() };
        }

        let content = content(poly);
        if content != 1 && !poly.is_constant() {
            steps.push(Step::ExtractContent);
        }
        let mut primitive = poly.scale(&content.clone().recip());
        let mut factors = Vec::new();

        let monomial = primitive.monomial_gcd();
        if !monomial.is_one() {
            steps.push(Step::ExtractCommonMonomial);
            primitive = primitive.div_monomial(&monomial);
            for (var, exp) in monomial.factors() {
                factors.push((Poly::var(var.clone()), *exp));
            }
        }

        split(primitive, 1, &mut factors, steps);

        let mut merged: Vec<(Poly, u32)> = Vec::with_capacity(factors.len());
        for (factor, multiplicity) in factors {
            match merged.iter_mut().find(|(existing, _)| *existing == factor) {
                Some((_, existing)) => *existing += multiplicity,
                None => merged.push((factor, multiplicity)),
            }
        }
        merged.sort_by(|(a, _), (b, _)| factor_order(a, b));

        Self { content, factors: merged }
    }

    /// Converts the factorization into an expression.
    pub fn to_expr(&self) -> SymExpr {
        let factors = self.factors.iter()
            .map(|(factor, multiplicity)| {
                let base = factor.to_expr();
                if *multiplicity == 1 {
                    base
                } else {
                    base.pow(SymExpr::int(*multiplicity))
                }
            })
            .collect::<Vec<_>>();

        if factors.is_empty() {
            return SymExpr::rational(&self.content);
        }

        let product = SymExpr::Mul(factors).downgrade();
        if self.content == 1 {
            product
        } else if self.content == -1 {
            -product
        } else {
            SymExpr::rational(&self.content) * product
        }
    }
}

/// Base implementation of the factoring algorithm.
pub fn factor_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Result<SymExpr, Error> {
    let rf = RationalFunction::from_expr(expr, &mut ())?.normalize(&mut ());
    let num = Factorization::new(&rf.num, step_collector).to_expr();
    if rf.den.as_constant().is_some_and(|c| c == 1) {
        return Ok(num);
    }
    let den = Factorization::new(&rf.den, step_collector).to_expr();
    Ok(num * den.recip())
}

/// Factor the given expression.
pub fn factor(expr: &SymExpr) -> Result<SymExpr, Error> {
    factor_with(expr, &mut ())
}

/// Factor the given expression. The steps taken will also be collected and returned, without
/// repeats.
pub fn factor_with_steps(expr: &SymExpr) -> Result<(SymExpr, Vec<Step>), Error> {
    let mut steps = Vec::new();
    let expr = factor_with(expr, &mut steps)?;
    let mut unique = Vec::with_capacity(steps.len());
    for step in steps {
        if !unique.contains(&step) {
            unique.push(step);
        }
    }
    Ok((expr, unique))
}

/// Returns the rational content of a nonzero polynomial: the greatest common divisor of the
/// numerators over the least common multiple of the denominators, with the sign of the leading
/// coefficient.
fn content(poly: &Poly) -> Rational {
    let mut gcd = Integer::new();
    let mut lcm = Integer::from(1);
    for (_, c) in poly.terms() {
        gcd.gcd_mut(c.numer());
        lcm.lcm_mut(c.denom());
    }
    let content = Rational::from((gcd, lcm));
    if poly.leading_coefficient().cmp0() == Ordering::Less {
        -content
    } else {
        content
    }
}

/// Splits a primitive polynomial with no common monomial into factors, each raised to
/// `multiplicity` times its own multiplicity.
fn split(poly: Poly, multiplicity: u32, factors: &mut Vec<(Poly, u32)>, steps: &mut dyn StepCollector<Step>) {
    if poly.is_constant() {
        return;
    }

    let vars = poly.indeterminates();
    let univariate = match (vars.len(), vars.iter().next()) {
        (1, Some(var)) => UniPoly::from_polynomial(&poly, var).map(|uni| (var.clone(), uni)),
        _ => None,
    };
    let Some((var, uni)) = univariate else {
        split_squares(poly, multiplicity, factors, steps);
        return;
    };

    for (part, part_multiplicity) in uni.square_free_parts() {
        let multiplicity = multiplicity * part_multiplicity;
        let roots = part.rational_roots();
        let mut rest = part;
        if !roots.is_empty() {
            steps.push(Step::LinearFactors);
        }
        for root in roots {
            factors.push((linear_factor(&var, &root), multiplicity));
            if let Some(quotient) = rest.div_exact(&UniPoly::new(vec![-root, Rational::from(1)])) {
                rest = quotient;
            }
        }

        if rest.degree() > 0 {
            let primitive = UniPoly::new(rest.integer_coefficients().into_iter().map(Rational::from).collect());
            split_squares(primitive.to_polynomial(&var), multiplicity, factors, steps);
        }
    }
}

/// Factors a difference of two squares, or keeps the polynomial whole.
fn split_squares(poly: Poly, multiplicity: u32, factors: &mut Vec<(Poly, u32)>, steps: &mut dyn StepCollector<Step>) {
    match difference_of_squares(&poly) {
        Some((a, b)) => {
            steps.push(Step::DifferenceOfSquares);
            split(a.sub(&b), multiplicity, factors, steps);
            split(a.add(&b), multiplicity, factors, steps);
        },
        None => factors.push((poly, multiplicity)),
    }
}

/// The factor `q*var - p` for the root `p/q`.
fn linear_factor(var: &Indeterminate, root: &Rational) -> Poly {
    Poly::var(var.clone())
        .scale(&Rational::from(root.denom().clone()))
        .sub(&Poly::constant(Rational::from(root.numer().clone())))
}

/// If the polynomial is `a^2 - b^2` for monomials `a` and `b`, returns `(a, b)`.
fn difference_of_squares(poly: &Poly) -> Option<(Poly, Poly)> {
    if poly.len() != 2 {
        return None;
    }

    let mut terms = poly.terms().rev();
    let (leading_monomial, leading_c) = terms.next()?;
    let (other_monomial, other_c) = terms.next()?;
    if leading_c.cmp0() != Ordering::Greater || other_c.cmp0() != Ordering::Less {
        return None;
    }

    let a = Poly::term(monomial_sqrt(leading_monomial)?, exact_root(leading_c, 2)?);
    let b = Poly::term(monomial_sqrt(other_monomial)?, exact_root(&Rational::from(-other_c), 2)?);
    Some((a, b))
}

fn monomial_sqrt(monomial: &Monomial) -> Option<Monomial> {
    monomial.factors().iter().try_fold(Monomial::one(), |root, (var, exp)| {
        (exp % 2 == 0).then(|| root.mul(&Monomial::var(var.clone(), exp / 2)))
    })
}

/// Orders factors by total degree, then by number of terms, then term by term from the leading
/// term down, with larger monomials and then smaller coefficients first.
fn factor_order(a: &Poly, b: &Poly) -> Ordering {
    a.total_degree().cmp(&b.total_degree())
        .then_with(|| a.len().cmp(&b.len()))
        .then_with(|| {
            for ((a_monomial, a_c), (b_monomial, b_c)) in a.terms().rev().zip(b.terms().rev()) {
                let ordering = b_monomial.cmp(a_monomial).then_with(|| a_c.cmp(b_c));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tutor_parser::parser::{ast::Expr as AstExpr, Parser};
    use super::*;

    fn parse(source: &str) -> SymExpr {
        SymExpr::from(Parser::new(source).try_parse_full::<AstExpr>().unwrap())
    }

    fn factored(source: &str) -> String {
        factor(&parse(source)).unwrap().to_string()
    }

    #[test]
    fn content_and_sign() {
        let (expr, steps) = factor_with_steps(&parse("2*x - 4")).unwrap();
        assert_eq!(expr.to_string(), "2*(x - 2)");
        assert_eq!(steps, vec![Step::ExtractContent, Step::LinearFactors]);

        assert_eq!(factored("x/2 - 1"), "(x - 2)/2");
        assert_eq!(factored("-x - 1"), "-(x + 1)");
        assert_eq!(factored("6"), "6");
        assert_eq!(factored("x - x"), "0");
    }

    #[test]
    fn common_monomial() {
        assert_eq!(factored("x**2 + x"), "x*(x + 1)");
        assert_eq!(factored("x**3*y + x*y"), "x*y*(x**2 + 1)");
    }

    #[test]
    fn rational_roots() {
        assert_eq!(factored("x**2 - 1"), "(x - 1)*(x + 1)");
        assert_eq!(factored("x**2 - 2*x + 1"), "(x - 1)**2");
        assert_eq!(factored("6*x**2 - 5*x + 1"), "(2*x - 1)*(3*x - 1)");
        assert_eq!(factored("x**3 - 4*x"), "x*(x - 2)*(x + 2)");
        assert_eq!(factored("2*x**2 - 8"), "2*(x - 2)*(x + 2)");
    }

    #[test]
    fn difference_of_squares() {
        let (expr, steps) = factor_with_steps(&parse("x**2 - y**2")).unwrap();
        assert_eq!(expr.to_string(), "(x - y)*(x + y)");
        assert_eq!(steps, vec![Step::DifferenceOfSquares]);

        assert_eq!(factored("x**4 - 4"), "(x**2 - 2)*(x**2 + 2)");
        assert_eq!(factored("x**4 - 1"), "(x - 1)*(x + 1)*(x**2 + 1)");
    }

    #[test]
    fn irreducible() {
        let (expr, steps) = factor_with_steps(&parse("x**2 + 1")).unwrap();
        assert_eq!(expr.to_string(), "x**2 + 1");
        assert!(steps.is_empty());

        assert_eq!(factored("x - 4"), "x - 4");
        assert_eq!(factored("x + y"), "x + y");
    }

    #[test]
    fn huge_degree() {
        let (expr, steps) = factor_with_steps(&parse("x**2000000000 - 1")).unwrap();
        assert_eq!(expr.to_string(), "x**2000000000 - 1");
        assert_eq!(steps, vec![Step::LinearFactors]);
    }

    #[test]
    fn above_dense_degree_limit() {
        // x^1000 - 1 is split by differences of squares until x^250 - 1 is small enough for roots
        let x = Indeterminate::symbol("x");
        let one = Poly::constant(Rational::from(1));
        let power = |exp| Poly::term(Monomial::var(x.clone(), exp), Rational::from(1));
        let factorization = Factorization::new(&power(1000).sub(&one), &mut ());

        assert_eq!(factorization.content, 1);
        assert_eq!(factorization.factors.len(), 5);
        assert_eq!(factorization.factors.first(), Some(&(Poly::var(x.clone()).sub(&one), 1)));
        assert_eq!(factorization.factors.last(), Some(&(power(500).add(&one), 1)));
    }

    #[test]
    fn quotient() {
        assert_eq!(factored("(x**2 - 1)/(x**2 + 2*x)"), "(x - 1)*(x + 1)/(x*(x + 2))");
        assert_eq!(factored("1/(x**2 + 2*x + 1)"), "1/(x + 1)**2");
    }
}
