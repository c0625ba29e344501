//! Roots of polynomials in one variable.
//!
//! Polynomials with rational coefficients are split into square-free parts, and the rational
//! roots of each part are found exactly. What remains is solved numerically: with the quadratic
//! formula for degree two, and with the Durand-Kerner method otherwise. Polynomials with
//! approximate coefficients are always solved numerically.

use crate::error::Error;
use crate::numerical::Number;
use crate::primitive::{complex, float, PRECISION};
use crate::symbolic::polynomial::UniPoly;
use rug::{ops::Pow, Complex, Float, Rational};
use super::budget::Tracker;
use super::solution::{number_order, numbers_close};

/// The maximum number of Durand-Kerner iterations.
const MAX_ITERATIONS: usize = 500;

/// Returns the distinct roots of `sum(coeffs[k] * x^k)`, ordered by real part, then by imaginary
/// part. A constant polynomial has no roots.
pub(super) fn roots(coeffs: &[Number], tracker: &Tracker) -> Result<Vec<Number>, Error> {
    let mut coeffs = coeffs.to_vec();
    while coeffs.last().is_some_and(Number::is_zero) {
        coeffs.pop();
    }

    let mut roots = Vec::new();
    let low_zeros = coeffs.iter().take_while(|c| c.is_zero()).count();
    if low_zeros > 0 && low_zeros < coeffs.len() {
        roots.push(Number::Rational(Rational::new()));
        coeffs.drain(..low_zeros);
    }

    if coeffs.len() > 1 {
        let exact = coeffs.iter()
            .map(|c| match c {
                Number::Rational(r) => Some(r.clone()),
                Number::Complex(_) => None,
            })
            .collect::<Option<Vec<_>>>();
        match exact {
            Some(exact) => exact_roots(&UniPoly::new(exact), &mut roots, tracker)?,
            None => {
                let coeffs = coeffs.iter().map(Number::to_complex).collect::<Vec<_>>();
                numeric_roots(&coeffs, &mut roots, tracker)?;
            },
        }
    }

    let mut unique: Vec<Number> = Vec::with_capacity(roots.len());
    for root in roots {
        let root = root.clean();
        if !unique.iter().any(|existing| numbers_close(existing, &root)) {
            unique.push(root);
        }
    }
    unique.sort_by(number_order);
    Ok(unique)
}

fn exact_roots(poly: &UniPoly, roots: &mut Vec<Number>, tracker: &Tracker) -> Result<(), Error> {
    for (part, _) in poly.square_free_parts() {
        let mut rest = part.clone();
        for root in part.rational_roots() {
            if let Some(quotient) = rest.div_exact(&UniPoly::new(vec![Rational::from(-&root), Rational::from(1)])) {
                rest = quotient;
            }
            roots.push(Number::Rational(root));
        }

        if rest.degree() > 0 {
            let coeffs = rest.coeffs().iter().map(complex).collect::<Vec<_>>();
            numeric_roots(&coeffs, roots, tracker)?;
        }
    }
    Ok(())
}

fn numeric_roots(coeffs: &[Complex], roots: &mut Vec<Number>, tracker: &Tracker) -> Result<(), Error> {
    match coeffs {
        [] | [_] => {},
        [c, b] => roots.push(Number::Complex(complex(-c) / b)),
        [c, b, a] => {
            // quadratic formula
            let discriminant: Complex = complex(b * b) - complex(a * c) * 4;
            let root = discriminant.sqrt();
            let neg_b = complex(-b);
            let two_a = complex(a * 2);
            roots.push(Number::Complex(complex(&neg_b - &root) / &two_a));
            roots.push(Number::Complex(complex(&neg_b + &root) / &two_a));
        },
        _ => roots.extend(durand_kerner(coeffs, tracker)?.into_iter().map(Number::Complex)),
    }
    Ok(())
}

/// Evaluates `sum(coeffs[k] * x^k)` with Horner's scheme.
fn horner(coeffs: &[Complex], x: &Complex) -> Complex {
    let mut acc = complex(0);
    for c in coeffs.iter().rev() {
        acc *= x;
        acc += c;
    }
    acc
}

/// Finds all roots of a polynomial of degree three or more at once, by the Durand-Kerner
/// (Weierstrass) iteration.
fn durand_kerner(coeffs: &[Complex], tracker: &Tracker) -> Result<Vec<Complex>, Error> {
    let degree = coeffs.len() - 1;
    let leading = &coeffs[degree];
    let monic = coeffs.iter().map(|c| complex(c / leading)).collect::<Vec<_>>();

    // powers of a point that is neither real nor a root of unity
    let seed = complex((0.4, 0.9));
    let mut guesses = Vec::with_capacity(degree);
    let mut power = complex(1);
    for _ in 0..degree {
        guesses.push(power.clone());
        power *= &seed;
    }

    let tolerance = float(10).pow(-100);
    for _ in 0..MAX_ITERATIONS {
        tracker.check_time()?;

        let mut largest_step = float(0);
        for i in 0..degree {
            let mut denominator = complex(1);
            for (j, other) in guesses.iter().enumerate() {
                if i != j {
                    denominator *= complex(&guesses[i] - other);
                }
            }
            if denominator.is_zero() {
                continue;
            }

            let step = horner(&monic, &guesses[i]) / denominator;
            let size = Float::with_val(PRECISION, step.abs_ref());
            if size > largest_step {
                largest_step = size;
            }
            guesses[i] -= &step;
        }

        if largest_step < tolerance {
            break;
        }
    }

    Ok(guesses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::budget::SolveBudget;
    use crate::primitive::rational;
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;

    fn exact(coeffs: &[i32]) -> Vec<Number> {
        coeffs.iter().map(|&c| Number::Rational(rational(c))).collect()
    }

    fn tracker() -> Tracker {
        Tracker::new(SolveBudget::default())
    }

    #[test]
    fn rational_roots() {
        // x^2 - 3x + 2
        let found = roots(&exact(&[2, -3, 1]), &tracker()).unwrap();
        assert_eq!(found, exact(&[1, 2]));

        // x^3 (x - 1)^2
        let found = roots(&exact(&[0, 0, 0, 1, -2, 1]), &tracker()).unwrap();
        assert_eq!(found, exact(&[0, 1]));
    }

    #[test]
    fn constant_has_no_roots() {
        assert!(roots(&exact(&[5]), &tracker()).unwrap().is_empty());
        assert!(roots(&exact(&[]), &tracker()).unwrap().is_empty());
    }

    #[test]
    fn complex_pair() {
        // x^2 + 1
        let found = roots(&exact(&[1, 0, 1]), &tracker()).unwrap();
        assert_eq!(found.len(), 2);
        assert_float_absolute_eq!(found[0].real_part().to_f64(), 0.0);
        assert_float_absolute_eq!(found[0].imag_part().to_f64(), -1.0);
        assert_float_absolute_eq!(found[1].imag_part().to_f64(), 1.0);
    }

    #[test]
    fn irrational_quadratic() {
        // 2x^2 - 1
        let found = roots(&exact(&[-1, 0, 2]), &tracker()).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(Number::is_real));
        assert_float_absolute_eq!(found[0].real_part().to_f64(), -0.5f64.sqrt());
        assert_float_absolute_eq!(found[1].real_part().to_f64(), 0.5f64.sqrt());
    }

    #[test]
    fn cubic() {
        // x^3 - 2
        let found = roots(&exact(&[-2, 0, 0, 1]), &tracker()).unwrap();
        assert_eq!(found.len(), 3);
        let real = found.iter().filter(|root| root.is_real()).collect::<Vec<_>>();
        assert_eq!(real.len(), 1);
        assert_float_absolute_eq!(real[0].real_part().to_f64(), 2f64.cbrt());

        let coeffs = [complex(-2), complex(0), complex(0), complex(1)];
        for root in &found {
            let value = horner(&coeffs, &root.to_complex());
            assert!(Float::with_val(PRECISION, value.abs_ref()) < 1e-50);
        }
    }

    #[test]
    fn complex_coefficients() {
        // x - i
        let coeffs = [Number::Complex(complex((0, -1))), Number::Rational(rational(1))];
        let found = roots(&coeffs, &tracker()).unwrap();
        assert_eq!(found.len(), 1);
        assert_float_absolute_eq!(found[0].imag_part().to_f64(), 1.0);
    }
}
