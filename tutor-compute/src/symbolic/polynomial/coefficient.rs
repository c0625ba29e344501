use crate::numerical::Number;
use crate::symbolic::SymExpr;
use rug::Rational;
use std::cmp::Ordering;
use std::fmt::Debug;

/// The operations a polynomial needs from its coefficients.
pub trait Coefficient: Clone + Debug + PartialEq {
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Converts an exact rational number into a coefficient.
    fn from_rational(r: &Rational) -> Self;

    /// Returns true if the coefficient is zero.
    fn is_zero(&self) -> bool;

    /// Returns true if the coefficient is exactly one.
    fn is_one(&self) -> bool;

    fn plus(&self, rhs: &Self) -> Self;

    fn minus(&self, rhs: &Self) -> Self;

    fn times(&self, rhs: &Self) -> Self;

    /// Returns `self / rhs`, or [`None`] if `rhs` is zero.
    fn quotient(&self, rhs: &Self) -> Option<Self>;

    fn negate(&self) -> Self;

    /// Returns the coefficient as an expression.
    fn to_expr(&self) -> SymExpr;
}

impl Coefficient for Rational {
    fn zero() -> Self {
        Rational::new()
    }

    fn one() -> Self {
        Rational::from(1)
    }

    fn from_rational(r: &Rational) -> Self {
        r.clone()
    }

    fn is_zero(&self) -> bool {
        self.cmp0() == Ordering::Equal
    }

    fn is_one(&self) -> bool {
        *self == 1
    }

    fn plus(&self, rhs: &Self) -> Self {
        Rational::from(self + rhs)
    }

    fn minus(&self, rhs: &Self) -> Self {
        Rational::from(self - rhs)
    }

    fn times(&self, rhs: &Self) -> Self {
        Rational::from(self * rhs)
    }

    fn quotient(&self, rhs: &Self) -> Option<Self> {
        (!Coefficient::is_zero(rhs)).then(|| Rational::from(self / rhs))
    }

    fn negate(&self) -> Self {
        Rational::from(-self)
    }

    fn to_expr(&self) -> SymExpr {
        SymExpr::rational(self)
    }
}

impl Coefficient for Number {
    fn zero() -> Self {
        Number::Rational(Rational::new())
    }

    fn one() -> Self {
        Number::Rational(Rational::from(1))
    }

    fn from_rational(r: &Rational) -> Self {
        Number::Rational(r.clone())
    }

    fn is_zero(&self) -> bool {
        Number::is_zero(self)
    }

    fn is_one(&self) -> bool {
        Number::is_one(self)
    }

    fn plus(&self, rhs: &Self) -> Self {
        self.add(rhs)
    }

    fn minus(&self, rhs: &Self) -> Self {
        self.sub(rhs)
    }

    fn times(&self, rhs: &Self) -> Self {
        self.mul(rhs)
    }

    fn quotient(&self, rhs: &Self) -> Option<Self> {
        self.div(rhs)
    }

    fn negate(&self) -> Self {
        self.neg()
    }

    fn to_expr(&self) -> SymExpr {
        Number::to_expr(self)
    }
}
