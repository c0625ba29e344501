//! Rational functions: quotients of two polynomials with rational coefficients.
//!
//! [`RationalFunction::from_expr`] is where expressions are expanded. Sums and products are
//! multiplied out, integer powers are expanded, and anything that is not a polynomial operation
//! (function calls, powers with symbolic exponents, irrational roots) becomes an opaque
//! [`Atom`] with simplified contents.

use crate::approx::approximate_rational;
use crate::error::{kind::{DegreeLimit, DivisionByZero, ExpansionLimit}, Error};
use rug::{ops::Pow, Integer, Rational};
use std::cmp::Ordering;
use super::polynomial::{Atom, Coefficient, Indeterminate, Polynomial, UniPoly, MAX_DEGREE};
use super::simplify::step::Step;
use super::{Primary, StepCollector, SymExpr};

/// The maximum number of terms any intermediate polynomial may have.
pub const MAX_TERMS: usize = 2048;

/// Integer powers of sums with an exponent above this are left unexpanded.
pub const MAX_EXPAND_EXPONENT: u32 = 24;

/// Integer powers of constants are left unexpanded when the result would need more bits than this.
const MAX_POWER_BITS: u64 = 1 << 16;

type Poly = Polynomial<Rational>;

/// A quotient `num / den` of two polynomials.
///
/// After [`RationalFunction::normalize`], the denominator has integer coefficients with no common
/// factor and a positive leading coefficient, and a constant denominator is always `1`.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalFunction {
    /// The numerator.
    pub num: Poly,

    /// The denominator. Never zero.
    pub den: Poly,
}

impl RationalFunction {
    /// The constant `c`.
    pub fn constant(c: Rational) -> Self {
        Self::from_poly(Poly::constant(c))
    }

    /// The polynomial `poly`, over a denominator of one.
    pub fn from_poly(poly: Poly) -> Self {
        Self { num: poly, den: Poly::constant(Rational::from(1)) }
    }

    /// An opaque expression treated as a single variable.
    pub fn atom(expr: SymExpr) -> Self {
        Self::from_poly(Poly::var(Indeterminate::Atom(Atom::new(expr))))
    }

    /// Returns true if the function is zero.
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Returns true if the function is the constant one.
    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c == 1)
    }

    /// If the function is a constant, returns it.
    pub fn as_constant(&self) -> Option<Rational> {
        let num = self.num.as_constant()?;
        let den = self.den.as_constant()?;
        num.quotient(&den)
    }

    /// Returns true if the numerator has more than one term.
    fn is_sum(&self) -> bool {
        self.num.len() > 1
    }

    /// The larger of the total degrees of the numerator and denominator.
    fn total_degree(&self) -> u32 {
        self.num.total_degree().max(self.den.total_degree())
    }

    /// The largest base-2 logarithm, rounded down, of a coefficient's numerator or denominator.
    fn coefficient_bits(&self) -> u32 {
        self.num.terms()
            .chain(self.den.terms())
            .map(|(_, c)| c.numer().significant_bits().max(c.denom().significant_bits()).saturating_sub(1))
            .max()
            .unwrap_or(0)
    }

    fn check_size(self) -> Result<Self, Error> {
        if self.num.len() > MAX_TERMS || self.den.len() > MAX_TERMS {
            Err(Error::unspanned(ExpansionLimit { limit: MAX_TERMS }))
        } else if self.total_degree() > MAX_DEGREE {
            Err(Error::unspanned(DegreeLimit { limit: MAX_DEGREE }))
        } else {
            Ok(self)
        }
    }

    /// Returns `self + rhs`, normalized.
    pub fn add(&self, rhs: &Self, steps: &mut dyn StepCollector<Step>) -> Result<Self, Error> {
        let sum = if self.den == rhs.den {
            Self { num: self.num.add(&rhs.num), den: self.den.clone() }
        } else {
            steps.push(Step::CommonDenominator);
            Self {
                num: self.num.mul(&rhs.den).add(&rhs.num.mul(&self.den)),
                den: self.den.mul(&rhs.den),
            }
        };
        Ok(sum.check_size()?.normalize(steps))
    }

    /// Returns `self * rhs`, normalized.
    pub fn mul(&self, rhs: &Self, steps: &mut dyn StepCollector<Step>) -> Result<Self, Error> {
        if (self.is_sum() && !rhs.is_one()) || (rhs.is_sum() && !self.is_one()) {
            steps.push(Step::DistributiveProperty);
        }
        let product = Self {
            num: self.num.mul(&rhs.num),
            den: self.den.mul(&rhs.den),
        };
        Ok(product.check_size()?.normalize(steps))
    }

    /// Returns `1 / self`.
    pub fn recip(&self) -> Result<Self, Error> {
        if self.is_zero() {
            return Err(Error::unspanned(DivisionByZero));
        }
        Ok(Self { num: self.den.clone(), den: self.num.clone() }.normalize(&mut ()))
    }

    /// Returns `self^exp`, normalized.
    pub fn pow(&self, exp: u32) -> Result<Self, Error> {
        if !self.is_sum() && self.den.len() <= 1 {
            let degree = u64::from(self.total_degree()) * u64::from(exp);
            if degree > u64::from(MAX_DEGREE) {
                return Err(Error::unspanned(DegreeLimit { limit: MAX_DEGREE }));
            }
            return Ok(Self { num: self.num.pow(exp), den: self.den.pow(exp) }.normalize(&mut ()));
        }

        let mut result = Self::constant(Rational::from(1));
        for _ in 0..exp {
            result = Self {
                num: result.num.mul(&self.num),
                den: result.den.mul(&self.den),
            }.check_size()?;
        }
        Ok(result.normalize(&mut ()))
    }

    /// Cancels common factors of the numerator and denominator, and scales both so that the
    /// denominator has integer coefficients with no common factor and a positive leading
    /// coefficient.
    pub fn normalize(mut self, steps: &mut dyn StepCollector<Step>) -> Self {
        if self.num.is_zero() {
            return Self::constant(Rational::new());
        }
        if let Some(den) = self.den.as_constant() {
            return match Rational::from(1).quotient(&den) {
                Some(inverse) => Self::from_poly(self.num.scale(&inverse)),
                None => self,
            };
        }

        let mut cancelled = false;

        // common monomial factors, like `x` in `x^2 / (x*y)`
        let monomial = self.num.monomial_gcd().gcd(&self.den.monomial_gcd());
        if !monomial.is_one() {
            self.num = self.num.div_monomial(&monomial);
            self.den = self.den.div_monomial(&monomial);
            cancelled = true;
        }

        if let Some(quotient) = self.num.div_exact(&self.den) {
            self.num = quotient;
            self.den = Poly::constant(Rational::from(1));
            cancelled = true;
        } else if let Some(gcd) = univariate_gcd(&self.num, &self.den) {
            if let (Some(num), Some(den)) = (self.num.div_exact(&gcd), self.den.div_exact(&gcd)) {
                self.num = num;
                self.den = den;
                cancelled = true;
            }
        }

        if cancelled {
            steps.push(Step::CancelFactors);
        }

        if let Some(den) = self.den.as_constant() {
            return match Rational::from(1).quotient(&den) {
                Some(inverse) => Self::from_poly(self.num.scale(&inverse)),
                None => self,
            };
        }

        // clear fractions, then divide out the common integer content
        let mut lcm = Integer::from(1);
        let mut content = Integer::new();
        for (_, c) in self.num.terms().chain(self.den.terms()) {
            lcm.lcm_mut(c.denom());
        }
        for (_, c) in self.num.terms().chain(self.den.terms()) {
            content.gcd_mut(&(Integer::from(c.numer() * &lcm) / c.denom()));
        }
        let mut scale = Rational::from((lcm, content.max(Integer::from(1))));
        if self.den.leading_coefficient().cmp0() == Ordering::Less {
            scale = -scale;
        }

        Self {
            num: self.num.scale(&scale),
            den: self.den.scale(&scale),
        }
    }

    /// Converts the function back into an expression.
    pub fn to_expr(&self) -> SymExpr {
        if self.den.as_constant().is_some_and(|c| c == 1) {
            self.num.to_expr()
        } else {
            self.num.to_expr() * self.den.to_expr().recip()
        }
    }

    /// Converts an expression into a normalized rational function, recording the rewrites that
    /// were needed.
    pub fn from_expr(expr: &SymExpr, steps: &mut dyn StepCollector<Step>) -> Result<Self, Error> {
        match expr {
            SymExpr::Primary(Primary::Integer(n)) => Ok(Self::constant(Rational::from(n))),
            SymExpr::Primary(Primary::Float(n)) => {
                steps.push(Step::ExactDecimal);
                Ok(Self::constant(approximate_rational(n)))
            },
            SymExpr::Primary(Primary::Symbol(name)) => {
                Ok(Self::from_poly(Poly::var(Indeterminate::symbol(name.clone()))))
            },
            SymExpr::Primary(Primary::Call(name, args)) => Self::from_call(name, args, steps),
            SymExpr::Add(terms) => {
                let mut sum = Self::constant(Rational::new());
                let mut term_count = 0;
                for term in terms {
                    let term = Self::from_expr(term, steps)?;
                    term_count += term.num.len();
                    sum = sum.add(&term, steps)?;
                }
                if sum.num.len() < term_count {
                    steps.push(Step::CombineLikeTerms);
                }
                Ok(sum)
            },
            SymExpr::Mul(factors) => {
                let mut product = Self::constant(Rational::from(1));
                for factor in factors {
                    let factor = Self::from_expr(factor, steps)?;
                    product = product.mul(&factor, steps)?;
                }
                Ok(product)
            },
            SymExpr::Exp(base, exp) => Self::from_power(base, exp, steps),
        }
    }

    fn from_call(name: &str, args: &[SymExpr], steps: &mut dyn StepCollector<Step>) -> Result<Self, Error> {
        let args = args.iter()
            .map(|arg| Self::from_expr(arg, steps).map(|arg| arg.to_expr()))
            .collect::<Result<Vec<_>, _>>()?;

        if let ("sqrt", [arg]) = (name, args.as_slice()) {
            if let Some(value) = Self::from_expr(arg, &mut ())?.as_constant() {
                if let Some(root) = exact_root(&value, 2) {
                    steps.push(Step::EvaluateRoot);
                    return Ok(Self::constant(root));
                }
                if let Some(root) = exact_root(&Rational::from(-&value), 2) {
                    // sqrt(-a) = sqrt(a) * I
                    steps.push(Step::EvaluateRoot);
                    return Ok(Self::from_poly(Poly::var(Indeterminate::symbol("I")).scale(&root)));
                }
            }
        }

        Ok(Self::atom(SymExpr::call(name, args)))
    }

    fn from_power(base: &SymExpr, exp: &SymExpr, steps: &mut dyn StepCollector<Step>) -> Result<Self, Error> {
        let exponent = Self::from_expr(exp, steps)?;
        let base_rf = Self::from_expr(base, steps)?;
        let Some(exponent_value) = exponent.as_constant() else {
            return Ok(Self::atom(base_rf.to_expr().pow(exponent.to_expr())));
        };

        if *exponent_value.denom() == 1 {
            let Some(k) = exponent_value.numer().to_i32() else {
                return Ok(Self::atom(base_rf.to_expr().pow(exponent.to_expr())));
            };
            if k == 0 {
                return Ok(Self::constant(Rational::from(1)));
            }

            let is_imaginary_unit = base.as_symbol() == Some("I");
            // I**4 = 1
            let magnitude = if is_imaginary_unit { k.unsigned_abs() % 4 } else { k.unsigned_abs() };
            let is_monomial = base_rf.num.len() <= 1 && base_rf.den.len() <= 1;
            let too_large = u64::from(base_rf.total_degree()) * u64::from(magnitude) > u64::from(MAX_DEGREE)
                || u64::from(base_rf.coefficient_bits()) * u64::from(magnitude) > MAX_POWER_BITS;
            if too_large || (magnitude > MAX_EXPAND_EXPONENT && !is_monomial) {
                return Ok(Self::atom(base_rf.to_expr().pow(SymExpr::int(k))));
            }
            if k.unsigned_abs() >= 2 {
                if is_imaginary_unit {
                    steps.push(Step::ReduceImaginaryUnit);
                } else if !is_monomial {
                    steps.push(Step::ExpandPower);
                }
            }

            let powered = base_rf.pow(magnitude)?;
            return if k < 0 { powered.recip() } else { Ok(powered) };
        }

        // rational exponent p/q of a rational base
        if let (Some(base_value), Some(q)) = (base_rf.as_constant(), exponent_value.denom().to_u32()) {
            let p = exponent_value.numer();
            if base_value.cmp0() == Ordering::Equal {
                return if p.cmp0() == Ordering::Greater {
                    Ok(Self::constant(Rational::new()))
                } else {
                    Err(Error::unspanned(DivisionByZero))
                };
            }
            if let (Some(root), Some(p)) = (exact_root(&base_value, q), p.to_i32()) {
                steps.push(Step::EvaluateRoot);
                return Ok(Self::constant(root.pow(p)));
            }
        }

        Ok(Self::atom(base_rf.to_expr().pow(exponent.to_expr())))
    }
}

/// If both polynomials are univariate in the same variable, returns their greatest common
/// divisor when it is not constant.
fn univariate_gcd(num: &Poly, den: &Poly) -> Option<Poly> {
    let vars = den.indeterminates();
    if vars.len() != 1 || num.indeterminates() != vars {
        return None;
    }
    let var = vars.into_iter().next()?;
    let gcd = UniPoly::from_polynomial(num, &var)?.gcd(&UniPoly::from_polynomial(den, &var)?);
    (gcd.degree() > 0).then(|| gcd.to_polynomial(&var))
}

/// Returns the `q`th root of `r` if it is rational.
pub fn exact_root(r: &Rational, q: u32) -> Option<Rational> {
    if q == 0 {
        return None;
    }
    if r.cmp0() == Ordering::Less {
        if q % 2 == 0 {
            return None;
        }
        return exact_root(&Rational::from(-r), q).map(|root| -root);
    }

    let root_of = |n: &Integer| {
        let root = Integer::from(n.root_ref(q));
        (root.clone().pow(q) == *n).then_some(root)
    };
    Some(Rational::from((root_of(r.numer())?, root_of(r.denom())?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_roots() {
        assert_eq!(exact_root(&Rational::from((4, 9)), 2), Some(Rational::from((2, 3))));
        assert_eq!(exact_root(&Rational::from(-8), 3), Some(Rational::from(-2)));
        assert_eq!(exact_root(&Rational::from(-4), 2), None);
        assert_eq!(exact_root(&Rational::from(2), 2), None);
    }

    #[test]
    fn normalized_denominator() {
        let x = Poly::var(Indeterminate::symbol("x"));
        let rf = RationalFunction {
            num: Poly::constant(Rational::from(3)),
            den: x.scale(&Rational::from(-6)),
        }.normalize(&mut ());
        assert_eq!(rf.to_expr().to_string(), "-1/(2*x)");
    }
}
