//! Sparse multivariate polynomials.
//!
//! A [`Polynomial`] maps [`Monomial`]s to nonzero coefficients. The coefficient type is generic:
//! the simplifier works over exact [`Rational`](rug::Rational)s, and the solver works over
//! [`Number`](crate::numerical::Number)s once constants like `pi` have been evaluated.
//!
//! Terms are stored in lexicographic monomial order, so the leading term is the last entry.

pub mod coefficient;
pub mod monomial;
pub mod univariate;

pub use coefficient::Coefficient;
pub use monomial::{Atom, Indeterminate, Monomial};
pub use univariate::UniPoly;

use crate::symbolic::SymExpr;
use std::collections::{BTreeMap, BTreeSet};

/// The maximum number of reduction steps [`Polynomial::div_exact`] performs before giving up.
const MAX_DIVISION_STEPS: usize = 4096;

/// The highest total degree a polynomial built from an expression may have. Dense univariate
/// algorithms refuse polynomials above it.
pub const MAX_DEGREE: u32 = 256;

/// A polynomial in any number of [`Indeterminate`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<C> {
    terms: BTreeMap<Monomial, C>,
}

impl<C: Coefficient> Default for Polynomial<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: Coefficient> Polynomial<C> {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { terms: BTreeMap::new() }
    }

    /// The constant polynomial `c`.
    pub fn constant(c: C) -> Self {
        Self::term(Monomial::one(), c)
    }

    /// The polynomial `var`.
    pub fn var(var: Indeterminate) -> Self {
        Self::term(Monomial::var(var, 1), C::one())
    }

    /// The polynomial with the single term `c * monomial`.
    pub fn term(monomial: Monomial, c: C) -> Self {
        let mut poly = Self::zero();
        poly.add_term(monomial, c);
        poly
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the polynomial has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the terms in ascending monomial order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &C)> {
        self.terms.iter()
    }

    /// Returns the coefficient of the given monomial.
    pub fn coefficient(&self, monomial: &Monomial) -> C {
        self.terms.get(monomial).cloned().unwrap_or_else(C::zero)
    }

    /// Adds `c * monomial` to the polynomial.
    ///
    /// Powers of the imaginary unit `I` are reduced using `I^2 = -1`, and powers of square roots
    /// of rational numbers are reduced likewise.
    pub fn add_term(&mut self, monomial: Monomial, c: C) {
        let (monomial, c) = reduce_squares(monomial, c);
        if c.is_zero() {
            return;
        }

        match self.terms.get_mut(&monomial) {
            Some(existing) => {
                let sum = existing.plus(&c);
                if sum.is_zero() {
                    self.terms.remove(&monomial);
                } else {
                    *existing = sum;
                }
            },
            None => {
                self.terms.insert(monomial, c);
            },
        }
    }

    /// Returns `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        let mut sum = self.clone();
        for (monomial, c) in &rhs.terms {
            sum.add_term(monomial.clone(), c.clone());
        }
        sum
    }

    /// Returns `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        let mut diff = self.clone();
        for (monomial, c) in &rhs.terms {
            diff.add_term(monomial.clone(), c.negate());
        }
        diff
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        self.map_coefficients(|c| c.negate())
    }

    /// Returns `self * rhs`.
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut product = Self::zero();
        for (lhs_monomial, lhs_c) in &self.terms {
            for (rhs_monomial, rhs_c) in &rhs.terms {
                product.add_term(lhs_monomial.mul(rhs_monomial), lhs_c.times(rhs_c));
            }
        }
        product
    }

    /// Returns `self * c`.
    pub fn scale(&self, c: &C) -> Self {
        let mut scaled = Self::zero();
        for (monomial, coeff) in &self.terms {
            scaled.add_term(monomial.clone(), coeff.times(c));
        }
        scaled
    }

    /// Returns `self * monomial`.
    pub fn mul_monomial(&self, monomial: &Monomial) -> Self {
        let mut product = Self::zero();
        for (m, c) in &self.terms {
            product.add_term(m.mul(monomial), c.clone());
        }
        product
    }

    /// Returns `self^exp` by repeated squaring.
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut result = Self::constant(C::one());
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// If the polynomial is a constant, returns it.
    pub fn as_constant(&self) -> Option<C> {
        match self.terms.len() {
            0 => Some(C::zero()),
            1 => self.terms.get(&Monomial::one()).cloned(),
            _ => None,
        }
    }

    /// Returns true if the polynomial is a constant.
    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    /// Returns the leading term in lexicographic order.
    pub fn leading_term(&self) -> Option<(&Monomial, &C)> {
        self.terms.iter().next_back()
    }

    /// Returns the coefficient of the leading term, or zero.
    pub fn leading_coefficient(&self) -> C {
        self.leading_term().map(|(_, c)| c.clone()).unwrap_or_else(C::zero)
    }

    /// Returns the highest power of `var` in the polynomial.
    pub fn degree_in(&self, var: &Indeterminate) -> u32 {
        self.terms.keys().map(|m| m.degree_in(var)).max().unwrap_or(0)
    }

    /// Returns the highest total degree of any term.
    pub fn total_degree(&self) -> u32 {
        self.terms.keys().map(Monomial::total_degree).max().unwrap_or(0)
    }

    /// Returns the indeterminates that appear in the polynomial.
    pub fn indeterminates(&self) -> BTreeSet<Indeterminate> {
        self.terms.keys()
            .flat_map(|m| m.factors().iter().map(|(var, _)| var.clone()))
            .collect()
    }

    /// Returns true if `var` appears in the polynomial.
    pub fn contains(&self, var: &Indeterminate) -> bool {
        self.terms.keys().any(|m| m.degree_in(var) > 0)
    }

    /// Returns true if any atom of the polynomial satisfies the predicate.
    pub fn any_atom(&self, mut predicate: impl FnMut(&Atom) -> bool) -> bool {
        self.indeterminates().iter().any(|var| match var {
            Indeterminate::Atom(atom) => predicate(atom),
            Indeterminate::Symbol(_) => false,
        })
    }

    /// Writes the polynomial as `sum(c_k * var^k)`, returning the coefficients `c_k`, which do
    /// not contain `var`, indexed by `k`.
    pub fn coefficients_in(&self, var: &Indeterminate) -> Vec<Self> {
        let mut coefficients = vec![Self::zero(); self.degree_in(var) as usize + 1];
        for (monomial, c) in &self.terms {
            let (rest, exp) = monomial.remove(var);
            coefficients[exp as usize].add_term(rest, c.clone());
        }
        coefficients
    }

    /// The inverse of [`Polynomial::coefficients_in`].
    pub fn from_coefficients_in(var: &Indeterminate, coefficients: &[Self]) -> Self {
        let mut poly = Self::zero();
        for (exp, c) in coefficients.iter().enumerate() {
            poly = poly.add(&c.mul_monomial(&Monomial::var(var.clone(), exp as u32)));
        }
        poly
    }

    /// Replaces `var` with `value`.
    pub fn substitute(&self, var: &Indeterminate, value: &Self) -> Self {
        if !self.contains(var) {
            return self.clone();
        }

        // Horner's scheme over the coefficients in `var`
        let coefficients = self.coefficients_in(var);
        let mut result = Self::zero();
        for c in coefficients.iter().rev() {
            result = result.mul(value).add(c);
        }
        result
    }

    /// Returns the greatest common divisor of all the monomials of the polynomial.
    pub fn monomial_gcd(&self) -> Monomial {
        let mut iter = self.terms.keys();
        match iter.next() {
            Some(first) => iter.fold(first.clone(), |gcd, m| gcd.gcd(m)),
            None => Monomial::one(),
        }
    }

    /// Divides every monomial by `divisor`, which must divide all of them.
    pub fn div_monomial(&self, divisor: &Monomial) -> Self {
        let mut quotient = Self::zero();
        for (monomial, c) in &self.terms {
            if let Some(m) = monomial.div(divisor) {
                quotient.add_term(m, c.clone());
            }
        }
        quotient
    }

    /// Returns `self / divisor` if `divisor` divides `self` exactly.
    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (divisor_monomial, divisor_c) = divisor.leading_term()?;
        let mut remainder = self.clone();
        let mut quotient = Self::zero();

        for _ in 0..MAX_DIVISION_STEPS {
            let Some((monomial, c)) = remainder.leading_term() else {
                return Some(quotient);
            };
            let factor_monomial = monomial.div(divisor_monomial)?;
            let factor_c = c.quotient(divisor_c)?;
            let factor = Self::term(factor_monomial, factor_c);
            remainder = remainder.sub(&factor.mul(divisor));
            quotient = quotient.add(&factor);
        }

        None
    }

    /// Applies `f` to every coefficient.
    pub fn map_coefficients<D: Coefficient>(&self, mut f: impl FnMut(&C) -> D) -> Polynomial<D> {
        let mut mapped = Polynomial::zero();
        for (monomial, c) in &self.terms {
            mapped.add_term(monomial.clone(), f(c));
        }
        mapped
    }

    /// Converts the polynomial into an expression, with the terms in descending order.
    pub fn to_expr(&self) -> SymExpr {
        let terms = self.terms.iter()
            .rev()
            .map(|(monomial, c)| term_expr(monomial, c))
            .collect();
        SymExpr::Add(terms).downgrade()
    }
}

/// Converts a single term into an expression, such as `3*x**2` or `-y`.
fn term_expr<C: Coefficient>(monomial: &Monomial, c: &C) -> SymExpr {
    let factors = monomial.to_exprs();
    if factors.is_empty() {
        return c.to_expr();
    }

    let product = SymExpr::Mul(factors).downgrade();
    if c.is_one() {
        product
    } else if c.negate().is_one() {
        -product
    } else {
        c.to_expr() * product
    }
}

/// Rewrites powers of indeterminates with a known rational square, such as `I^3 = -I` and
/// `sqrt(2)^2 = 2`.
fn reduce_squares<C: Coefficient>(monomial: Monomial, mut c: C) -> (Monomial, C) {
    let mut reduced = Monomial::one();
    for (var, exp) in monomial.factors() {
        match var.square() {
            Some(square) if *exp >= 2 => {
                let factor = C::from_rational(&square);
                for _ in 0..exp / 2 {
                    c = c.times(&factor);
                }
                reduced = reduced.mul(&Monomial::var(var.clone(), exp % 2));
            },
            _ => reduced = reduced.mul(&Monomial::var(var.clone(), *exp)),
        }
    }
    (reduced, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rug::Rational;

    fn var(name: &str) -> Polynomial<Rational> {
        Polynomial::var(Indeterminate::symbol(name))
    }

    fn constant(n: i32) -> Polynomial<Rational> {
        Polynomial::constant(Rational::from(n))
    }

    #[test]
    fn expand_product() {
        // (x + 1)(x - 1) = x^2 - 1
        let x = var("x");
        let product = x.add(&constant(1)).mul(&x.sub(&constant(1)));
        assert_eq!(product.to_expr().to_string(), "x**2 - 1");
    }

    #[test]
    fn descending_lex_order() {
        let (x, y) = (var("x"), var("y"));
        let poly = constant(-7).add(&y.scale(&Rational::from(3))).add(&x.scale(&Rational::from(2)));
        assert_eq!(poly.to_expr().to_string(), "2*x + 3*y - 7");
    }

    #[test]
    fn rational_coefficients() {
        let x = var("x");
        let poly = x.scale(&Rational::from((1, 2))).sub(&constant(1));
        assert_eq!(poly.to_expr().to_string(), "x/2 - 1");
    }

    #[test]
    fn imaginary_unit() {
        let i = var("I");
        assert_eq!(i.mul(&i), constant(-1));
        assert_eq!(i.pow(3), i.neg());
    }

    #[test]
    fn square_roots() {
        let sqrt2 = Polynomial::<Rational>::var(Indeterminate::Atom(Atom::new(SymExpr::call("sqrt", vec![SymExpr::int(2)]))));
        let sum = sqrt2.add(&constant(1));
        assert_eq!(sum.mul(&sum).to_expr().to_string(), "2*sqrt(2) + 3");
    }

    #[test]
    fn exact_division() {
        let (x, y) = (var("x"), var("y"));
        let dividend = x.mul(&x).sub(&y.mul(&y));
        let divisor = x.sub(&y);
        assert_eq!(dividend.div_exact(&divisor), Some(x.add(&y)));
        assert_eq!(dividend.div_exact(&x), None);
    }

    #[test]
    fn substitution() {
        let (x, y) = (var("x"), var("y"));
        let poly = x.mul(&x).add(&y);
        let result = poly.substitute(&Indeterminate::symbol("x"), &y.add(&constant(1)));
        assert_eq!(result.to_expr().to_string(), "y**2 + 3*y + 1");
    }
}
