use crate::{consts::ZERO_TOLERANCE, primitive::{complex, float, PRECISION}};
use crate::symbolic::SymExpr;
use rug::{ops::Pow, Complex, Float, Rational};
use std::cmp::Ordering;

/// A number that is exact when possible.
///
/// Arithmetic between two [`Number::Rational`]s stays exact. As soon as a computation involves an
/// irrational or complex value, the result is a [`Number::Complex`] computed with
/// [`PRECISION`] bits.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// An exact rational number.
    Rational(Rational),

    /// An approximate complex number.
    Complex(Complex),
}

impl Number {
    /// Returns true if the number is zero. Approximate numbers are compared against
    /// [`ZERO_TOLERANCE`].
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Rational(r) => r.cmp0() == Ordering::Equal,
            Self::Complex(c) => self.magnitude() < *ZERO_TOLERANCE
                || (c.real().is_zero() && c.imag().is_zero()),
        }
    }

    /// Returns true if the number is exactly one.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Rational(r) if *r == 1)
    }

    /// Returns the number as a [`Complex`].
    pub fn to_complex(&self) -> Complex {
        match self {
            Self::Rational(r) => complex(r),
            Self::Complex(c) => c.clone(),
        }
    }

    /// Returns true if the number has no imaginary part.
    pub fn is_real(&self) -> bool {
        match self {
            Self::Rational(_) => true,
            Self::Complex(c) => {
                let imag = c.imag().clone().abs();
                imag.is_zero() || imag < *ZERO_TOLERANCE
            },
        }
    }

    /// Returns the real part of the number.
    pub fn real_part(&self) -> Float {
        match self {
            Self::Rational(r) => float(r),
            Self::Complex(c) => c.real().clone(),
        }
    }

    /// Returns the imaginary part of the number.
    pub fn imag_part(&self) -> Float {
        match self {
            Self::Rational(_) => float(0),
            Self::Complex(c) => c.imag().clone(),
        }
    }

    /// Drops the imaginary part of the number. Exact numbers are returned unchanged.
    pub fn to_real(&self) -> Self {
        match self {
            Self::Rational(_) => self.clone(),
            Self::Complex(c) => Self::Complex(complex(c.real())),
        }
    }

    /// Returns the absolute value of the number.
    pub fn magnitude(&self) -> Float {
        match self {
            Self::Rational(r) => float(r.clone().abs()),
            Self::Complex(c) => Float::with_val(PRECISION, c.abs_ref()),
        }
    }

    /// Sets real and imaginary parts that are negligible relative to the magnitude of the number
    /// to exactly zero.
    pub fn clean(self) -> Self {
        match self {
            Self::Rational(_) => self,
            Self::Complex(c) => Self::Complex(clean_complex(c)),
        }
    }

    /// Returns `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Self::Rational(Rational::from(lhs + rhs)),
            (lhs, rhs) => Self::Complex(complex(&lhs.to_complex() + &rhs.to_complex())),
        }
    }

    /// Returns `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Self::Rational(Rational::from(lhs - rhs)),
            (lhs, rhs) => Self::Complex(complex(&lhs.to_complex() - &rhs.to_complex())),
        }
    }

    /// Returns `self * rhs`.
    pub fn mul(&self, rhs: &Self) -> Self {
        match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Self::Rational(Rational::from(lhs * rhs)),
            (lhs, rhs) => Self::Complex(complex(&lhs.to_complex() * &rhs.to_complex())),
        }
    }

    /// Returns `self / rhs`, or [`None`] if `rhs` is zero.
    pub fn div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(match (self, rhs) {
            (Self::Rational(lhs), Self::Rational(rhs)) => Self::Rational(Rational::from(lhs / rhs)),
            (lhs, rhs) => Self::Complex(complex(&lhs.to_complex() / &rhs.to_complex())),
        })
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(Rational::from(-r)),
            Self::Complex(c) => Self::Complex(complex(-c)),
        }
    }

    /// Returns `self^exp`.
    pub fn pow(&self, exp: u32) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(r.clone().pow(exp)),
            Self::Complex(c) => Self::Complex(c.clone().pow(exp)),
        }
    }

    /// Converts the number into an expression. Rationals stay exact, and approximate numbers
    /// become floats, with the imaginary part multiplied by `I`.
    pub fn to_expr(&self) -> SymExpr {
        match self {
            Self::Rational(r) => SymExpr::rational(r),
            Self::Complex(c) => {
                let c = clean_complex(c.clone());
                let (re, im) = c.into_real_imag();
                let real = SymExpr::Primary(crate::symbolic::Primary::Float(re.clone()));
                if im.is_zero() {
                    return real;
                }
                let imag = SymExpr::Mul(vec![
                    SymExpr::Primary(crate::symbolic::Primary::Float(im)),
                    SymExpr::symbol("I"),
                ]);
                if re.is_zero() {
                    imag
                } else {
                    real + imag
                }
            },
        }
    }
}

/// Zeroes parts of a complex number that are negligible relative to its magnitude.
pub fn clean_complex(c: Complex) -> Complex {
    let magnitude = Float::with_val(PRECISION, c.abs_ref());
    let threshold = if magnitude > 1 {
        Float::with_val(PRECISION, &magnitude * &*ZERO_TOLERANCE)
    } else {
        ZERO_TOLERANCE.clone()
    };
    let (mut re, mut im) = c.into_real_imag();
    if re.clone().abs() < threshold {
        re = float(0);
    }
    if im.clone().abs() < threshold {
        im = float(0);
    }
    complex((re, im))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::rational;

    #[test]
    fn exact_arithmetic() {
        let a = Number::Rational(rational((1, 3)));
        let b = Number::Rational(rational((2, 3)));
        assert_eq!(a.add(&b), Number::Rational(rational(1)));
        assert_eq!(a.div(&b), Some(Number::Rational(rational((1, 2)))));
        assert_eq!(a.div(&Number::Rational(rational(0))), None);
    }

    #[test]
    fn complex_cleaning() {
        let tiny = Float::with_val(PRECISION, 10).pow(-80);
        let n = Number::Complex(complex((float(2), tiny))).clean();
        assert!(n.is_real());
        assert_eq!(n.real_part(), 2);
    }

    #[test]
    fn imaginary_unit_squared() {
        let i = Number::Complex(complex((0, 1)));
        let square = i.mul(&i).clean();
        assert!(square.is_real());
        assert_eq!(square.real_part(), -1);
    }

    #[test]
    fn real_part_only() {
        let n = Number::Complex(complex((1.5, 2))).to_real();
        assert!(n.is_real());
        assert_eq!(n.real_part(), 1.5);

        let exact = Number::Rational(rational((1, 3)));
        assert_eq!(exact.to_real(), exact);
    }
}
