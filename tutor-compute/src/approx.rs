use rug::{Float, Integer, Rational};
use std::cmp::Ordering;
use super::primitive::float;

/// Computes the [`Rational`] from the continued fraction form of a float.
fn rational_from_continued_fraction(continued_fraction_form: &[Integer]) -> Rational {
    let mut rational = Rational::new();
    for (i, integer) in continued_fraction_form.iter().rev().enumerate() {
        if i == 0 {
            if integer.cmp0() == Ordering::Equal {
                continue;
            }
            rational += Rational::from((Integer::from(1), integer.clone()));
        } else {
            rational = (rational + integer).recip();
        }
    }

    if rational.cmp0() == Ordering::Equal {
        rational
    } else {
        rational.recip()
    }
}

/// Approximates the given float as a rational fraction.
///
/// This function applies the continued fraction algorithm to the given float until the error is
/// less than `1e-60`. Decimal literals like `0.1` are not exactly representable in binary, but
/// the continued fraction recovers the intended fraction `1/10`.
///
/// Non-finite floats approximate to zero.
pub fn approximate_rational(n: &Float) -> Rational {
    if !n.is_finite() {
        return Rational::new();
    }

    let orig = n;

    let mut continued_fraction_form = Vec::new();
    let mut n = n.clone();
    loop {
        let (integer, fractional) = n.trunc_fract(float(0));
        let Some(integer) = integer.to_integer() else {
            break;
        };
        continued_fraction_form.push(integer);

        // check how close we are to the original number
        let rational = rational_from_continued_fraction(&continued_fraction_form);
        let error = float(orig - rational).abs();

        if fractional.is_zero() || error < 1e-60 || continued_fraction_form.len() > 256 {
            break;
        }

        n = fractional.recip();
    }

    rational_from_continued_fraction(&continued_fraction_form)
}

#[cfg(test)]
mod tests {
    use crate::primitive::float_from_str;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exact_binary_fraction() {
        assert_eq!(approximate_rational(&float_from_str("2.25")), Rational::from((9, 4)));
    }

    #[test]
    fn decimal_tenth() {
        assert_eq!(approximate_rational(&float_from_str("0.1")), Rational::from((1, 10)));
    }

    #[test]
    fn negative_decimal() {
        assert_eq!(approximate_rational(&-float_from_str("1.5")), Rational::from((-3, 2)));
    }

    #[test]
    fn integer_valued() {
        assert_eq!(approximate_rational(&float(7)), Rational::from(7));
    }
}
