//! Elimination of a variable shared by two polynomials.
//!
//! The resultant of `p` and `q` with respect to `x` is a polynomial in the remaining variables
//! that vanishes exactly where `p` and `q` have a common root in `x` (or both leading
//! coefficients vanish). It is the determinant of the Sylvester matrix of the two polynomials,
//! computed here with fraction-free Gaussian elimination (the Bareiss algorithm), so every
//! entry stays a polynomial.

use crate::numerical::Number;
use crate::symbolic::polynomial::{Coefficient, Indeterminate, Polynomial};

type Poly = Polynomial<Number>;

/// The largest Sylvester matrix the solver builds.
const MAX_SYLVESTER_SIZE: usize = 12;

/// Returns the resultant of `p` and `q` with respect to `var`, or [`None`] if the polynomials
/// are too large or an intermediate division is not exact.
///
/// Both polynomials must contain `var`.
pub(super) fn resultant(p: &Poly, q: &Poly, var: &Indeterminate) -> Option<Poly> {
    let p_coeffs = p.coefficients_in(var);
    let q_coeffs = q.coefficients_in(var);
    let (m, n) = (p_coeffs.len() - 1, q_coeffs.len() - 1);
    let size = m + n;
    if m == 0 || n == 0 || size > MAX_SYLVESTER_SIZE {
        return None;
    }

    // n shifted rows of p's coefficients, then m shifted rows of q's, highest power first
    let mut matrix = vec![vec![Poly::zero(); size]; size];
    for row in 0..n {
        for (k, c) in p_coeffs.iter().rev().enumerate() {
            matrix[row][row + k] = c.clone();
        }
    }
    for row in 0..m {
        for (k, c) in q_coeffs.iter().rev().enumerate() {
            matrix[n + row][row + k] = c.clone();
        }
    }

    determinant(matrix)
}

/// Computes the determinant of a square matrix of polynomials with the Bareiss algorithm.
fn determinant(mut matrix: Vec<Vec<Poly>>) -> Option<Poly> {
    let size = matrix.len();
    let mut negate = false;
    let mut previous = Poly::constant(Number::one());

    for k in 0..size.saturating_sub(1) {
        if matrix[k][k].is_zero() {
            let pivot_row = (k + 1..size).find(|&row| !matrix[row][k].is_zero())?;
            matrix.swap(k, pivot_row);
            negate = !negate;
        }

        for i in k + 1..size {
            for j in k + 1..size {
                let numerator = matrix[i][j].mul(&matrix[k][k])
                    .sub(&matrix[i][k].mul(&matrix[k][j]));
                matrix[i][j] = match previous.as_constant() {
                    Some(c) => numerator.scale(&Number::one().quotient(&c)?),
                    None => numerator.div_exact(&previous)?,
                };
            }
        }
        previous = matrix[k][k].clone();
    }

    let det = matrix.get(size.checked_sub(1)?)?.get(size - 1)?.clone();
    Some(if negate { det.neg() } else { det })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::rational;
    use pretty_assertions::assert_eq;

    fn var(name: &str) -> Poly {
        Poly::var(Indeterminate::symbol(name))
    }

    fn constant(n: i32) -> Poly {
        Poly::constant(Number::Rational(rational(n)))
    }

    #[test]
    fn eliminate_linear() {
        // x + y - 1 and x - y: the resultant in x is -(2y - 1) up to sign
        let (x, y) = (var("x"), var("y"));
        let p = x.add(&y).sub(&constant(1));
        let q = x.sub(&y);
        let res = resultant(&p, &q, &Indeterminate::symbol("x")).unwrap();
        assert_eq!(res.to_expr().to_string(), "-2*y + 1");
    }

    #[test]
    fn eliminate_circle_and_hyperbola() {
        // x*y - 2 and x^2 + y^2 - 5
        let (x, y) = (var("x"), var("y"));
        let p = x.mul(&y).sub(&constant(2));
        let q = x.mul(&x).add(&y.mul(&y)).sub(&constant(5));
        let res = resultant(&p, &q, &Indeterminate::symbol("x")).unwrap();
        assert_eq!(res.to_expr().to_string(), "y**4 - 5*y**2 + 4");
    }

    #[test]
    fn determinant_with_row_swap() {
        let matrix = vec![
            vec![constant(0), constant(1)],
            vec![constant(1), constant(0)],
        ];
        assert_eq!(determinant(matrix), Some(constant(-1)));
    }
}
