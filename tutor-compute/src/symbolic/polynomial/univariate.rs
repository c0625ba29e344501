use rug::{Integer, Rational};
use std::cmp::Ordering;
use super::{Indeterminate, Monomial, Polynomial, MAX_DEGREE};

/// Rational root enumeration is skipped when a coefficient exceeds this magnitude, since the
/// number of candidate divisors becomes impractical.
const MAX_ROOT_CANDIDATE_COEFFICIENT: u64 = 1_000_000_000_000;

/// A dense polynomial in a single variable with rational coefficients.
///
/// The coefficients are stored from the constant term upwards, and the last coefficient is never
/// zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniPoly {
    coeffs: Vec<Rational>,
}

impl UniPoly {
    /// Creates a polynomial from coefficients listed from the constant term upwards.
    pub fn new(coeffs: Vec<Rational>) -> Self {
        let mut poly = Self { coeffs };
        poly.trim();
        poly
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self { coeffs: vec![Rational::from(1)] }
    }

    /// Converts a [`Polynomial`] into a [`UniPoly`] in `var`, if `var` is its only indeterminate
    /// and its degree is at most [`MAX_DEGREE`].
    pub fn from_polynomial(poly: &Polynomial<Rational>, var: &Indeterminate) -> Option<Self> {
        let degree = poly.degree_in(var);
        if degree > MAX_DEGREE {
            return None;
        }
        let mut coeffs = vec![Rational::new(); degree as usize + 1];
        for (monomial, c) in poly.terms() {
            let (rest, exp) = monomial.remove(var);
            if !rest.is_one() {
                return None;
            }
            coeffs[exp as usize] = c.clone();
        }
        Some(Self::new(coeffs))
    }

    /// Converts the polynomial back into a [`Polynomial`] in `var`.
    pub fn to_polynomial(&self, var: &Indeterminate) -> Polynomial<Rational> {
        let mut poly = Polynomial::zero();
        for (exp, c) in self.coeffs.iter().enumerate() {
            poly.add_term(Monomial::var(var.clone(), exp as u32), c.clone());
        }
        poly
    }

    fn trim(&mut self) {
        while self.coeffs.last().is_some_and(|c| c.cmp0() == Ordering::Equal) {
            self.coeffs.pop();
        }
    }

    /// Returns the coefficients from the constant term upwards.
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Returns the leading coefficient, or zero.
    pub fn leading_coefficient(&self) -> Rational {
        self.coeffs.last().cloned().unwrap_or_default()
    }

    /// Returns the polynomial divided by its leading coefficient.
    pub fn monic(&self) -> Self {
        match self.coeffs.last() {
            Some(lc) => Self::new(self.coeffs.iter().map(|c| Rational::from(c / lc)).collect()),
            None => self.clone(),
        }
    }

    /// Evaluates the polynomial at `x`.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs.iter()
            .rev()
            .fold(Rational::new(), |acc, c| acc * x + c)
    }

    /// Returns the derivative of the polynomial.
    pub fn derivative(&self) -> Self {
        Self::new(self.coeffs.iter()
            .enumerate()
            .skip(1)
            .map(|(exp, c)| Rational::from(c * exp as u32))
            .collect())
    }

    fn sub(&self, rhs: &Self) -> Self {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Self::new((0..len)
            .map(|i| {
                let lhs = self.coeffs.get(i).cloned().unwrap_or_default();
                match rhs.coeffs.get(i) {
                    Some(rhs) => lhs - rhs,
                    None => lhs,
                }
            })
            .collect())
    }

    fn mul(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![Rational::new(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += Rational::from(a * b);
            }
        }
        Self::new(coeffs)
    }

    /// Returns the quotient and remainder of `self / divisor`, or [`None`] if `divisor` is zero.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_lc = divisor.coeffs.last()?;
        let divisor_degree = divisor.degree();
        let mut remainder = self.clone();
        let mut quotient = vec![Rational::new(); self.coeffs.len().saturating_sub(divisor_degree).max(1)];

        while !remainder.is_zero() && remainder.degree() >= divisor_degree {
            let shift = remainder.degree() - divisor_degree;
            let c = Rational::from(&remainder.leading_coefficient() / divisor_lc);
            let mut term = vec![Rational::new(); shift + 1];
            term[shift] = c.clone();
            quotient[shift] += c;
            remainder = remainder.sub(&divisor.mul(&Self::new(term)));
        }

        Some((Self::new(quotient), remainder))
    }

    /// Returns `self / divisor` if the division is exact.
    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (quotient, remainder) = self.div_rem(divisor)?;
        remainder.is_zero().then_some(quotient)
    }

    /// Returns the monic greatest common divisor of two polynomials.
    pub fn gcd(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let remainder = match a.div_rem(&b) {
                Some((_, remainder)) => remainder,
                None => break,
            };
            a = b;
            b = remainder;
        }
        a.monic()
    }

    /// Splits the polynomial into square-free parts, returning each part with its multiplicity.
    ///
    /// The product of `part^multiplicity` over all parts equals the monic form of the
    /// polynomial. Constant polynomials have no parts.
    pub fn square_free_parts(&self) -> Vec<(Self, u32)> {
        if self.degree() == 0 {
            return Vec::new();
        }

        // Yun's algorithm
        let mut parts = Vec::new();
        let f = self.monic();
        let derivative = f.derivative();
        let a = f.gcd(&derivative);
        let mut b = f.div_exact(&a).unwrap_or_else(Self::one);
        let c = derivative.div_exact(&a).unwrap_or_else(Self::zero);
        let mut d = c.sub(&b.derivative());
        let mut multiplicity = 1;

        while b.degree() > 0 {
            let a = b.gcd(&d);
            b = b.div_exact(&a).unwrap_or_else(Self::one);
            let c = d.div_exact(&a).unwrap_or_else(Self::zero);
            if a.degree() > 0 {
                parts.push((a, multiplicity));
            }
            d = c.sub(&b.derivative());
            multiplicity += 1;
        }

        parts
    }

    /// Returns the coefficients scaled to integers with no common factor.
    pub fn integer_coefficients(&self) -> Vec<Integer> {
        let mut lcm = Integer::from(1);
        for c in &self.coeffs {
            lcm.lcm_mut(c.denom());
        }
        let mut ints: Vec<Integer> = self.coeffs.iter()
            .map(|c| Integer::from(c.numer() * Integer::from(&lcm / c.denom())))
            .collect();
        let mut content = Integer::new();
        for n in &ints {
            content.gcd_mut(n);
        }
        if content > 1 {
            for n in &mut ints {
                n.div_exact_mut(&content);
            }
        }
        ints
    }

    /// Returns the distinct rational roots of the polynomial, in ascending order.
    ///
    /// Candidates `p/q` come from the rational root theorem. Enumeration is skipped when the
    /// constant or leading coefficient is too large to factor quickly.
    pub fn rational_roots(&self) -> Vec<Rational> {
        let mut roots = Vec::new();
        if self.degree() == 0 {
            return roots;
        }

        let ints = self.integer_coefficients();
        let low_zeros = ints.iter().take_while(|n| n.cmp0() == Ordering::Equal).count();
        if low_zeros > 0 {
            roots.push(Rational::new());
        }

        let trailing = &ints[low_zeros];
        let leading = &ints[ints.len() - 1];
        if trailing.clone().abs() > MAX_ROOT_CANDIDATE_COEFFICIENT
            || leading.clone().abs() > MAX_ROOT_CANDIDATE_COEFFICIENT
        {
            return roots;
        }

        let reduced = Self::new(self.coeffs[low_zeros..].to_vec());
        for p in divisors(trailing) {
            for q in divisors(leading) {
                for sign in [1, -1] {
                    let candidate = Rational::from((Integer::from(&p * sign), q.clone()));
                    if !roots.contains(&candidate) && reduced.eval(&candidate).cmp0() == Ordering::Equal {
                        roots.push(candidate);
                    }
                }
            }
        }

        roots.sort();
        roots
    }
}

/// Returns the positive divisors of `n`, in ascending order.
fn divisors(n: &Integer) -> Vec<Integer> {
    let n = n.clone().abs();
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = Integer::from(1);
    while Integer::from(&d * &d) <= n {
        if n.is_divisible(&d) {
            let pair = Integer::from(&n / &d);
            if pair != d {
                large.push(pair);
            }
            small.push(d.clone());
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn poly(coeffs: &[i32]) -> UniPoly {
        UniPoly::new(coeffs.iter().map(|&c| Rational::from(c)).collect())
    }

    #[test]
    fn rational_roots_of_quadratic() {
        // 2x^2 - 3x + 1 = (2x - 1)(x - 1)
        let roots = poly(&[1, -3, 2]).rational_roots();
        assert_eq!(roots, vec![Rational::from((1, 2)), Rational::from(1)]);
    }

    #[test]
    fn rational_roots_with_zero() {
        // x^3 - 4x
        let roots = poly(&[0, -4, 0, 1]).rational_roots();
        assert_eq!(roots, vec![Rational::from(-2), Rational::from(0), Rational::from(2)]);
    }

    #[test]
    fn no_rational_roots() {
        assert!(poly(&[-2, 0, 1]).rational_roots().is_empty());
    }

    #[test]
    fn gcd_of_polynomials() {
        // gcd(x^2 - 1, x^2 + 2x + 1) = x + 1
        assert_eq!(poly(&[-1, 0, 1]).gcd(&poly(&[1, 2, 1])), poly(&[1, 1]));
    }

    #[test]
    fn square_free_parts() {
        // (x - 1)^2 (x + 2) = x^3 - 3x + 2
        let parts = poly(&[2, -3, 0, 1]).square_free_parts();
        assert_eq!(parts, vec![(poly(&[2, 1]), 1), (poly(&[-1, 1]), 2)]);
    }

    #[test]
    fn dense_form_refused_above_degree_limit() {
        let x = Indeterminate::symbol("x");
        let one = Polynomial::constant(Rational::from(1));
        let at_limit = Polynomial::term(Monomial::var(x.clone(), MAX_DEGREE), Rational::from(1)).sub(&one);
        let above = Polynomial::term(Monomial::var(x.clone(), 2_000_000_000), Rational::from(1)).sub(&one);

        assert_eq!(UniPoly::from_polynomial(&at_limit, &x).map(|uni| uni.degree()), Some(MAX_DEGREE as usize));
        assert_eq!(UniPoly::from_polynomial(&above, &x), None);
    }

    #[test]
    fn divisors_in_order() {
        let divs = divisors(&Integer::from(12));
        assert_eq!(divs, [1, 2, 3, 4, 6, 12].map(Integer::from).to_vec());
    }
}
