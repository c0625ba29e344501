use crate::symbolic::{Primary, SymExpr};
use rug::Rational;
use std::cmp::Ordering;

/// An expression that is treated as a single variable of a polynomial, such as `sqrt(2)` or
/// `sin(x)`.
///
/// Atoms are identified by their printed form.
#[derive(Debug, Clone)]
pub struct Atom {
    /// The printed form of the expression.
    pub key: String,

    /// The expression itself.
    pub expr: SymExpr,
}

impl Atom {
    /// Creates an atom for the given expression.
    pub fn new(expr: SymExpr) -> Self {
        Self { key: expr.to_string(), expr }
    }
}

/// A variable of a polynomial.
#[derive(Debug, Clone)]
pub enum Indeterminate {
    /// A symbol, such as `x`.
    Symbol(String),

    /// Any other expression that could not be expanded further.
    Atom(Atom),
}

impl Indeterminate {
    /// Creates a symbol indeterminate.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Returns the name of the symbol, or the printed form of the atom.
    pub fn key(&self) -> &str {
        match self {
            Self::Symbol(name) => name,
            Self::Atom(atom) => &atom.key,
        }
    }

    /// Returns the indeterminate as an expression.
    pub fn to_expr(&self) -> SymExpr {
        match self {
            Self::Symbol(name) => SymExpr::symbol(name.clone()),
            Self::Atom(atom) => atom.expr.clone(),
        }
    }

    /// If the square of this indeterminate is a rational number, returns it. This is the case for
    /// the imaginary unit `I` and for square roots of rational numbers.
    pub fn square(&self) -> Option<Rational> {
        match self {
            Self::Symbol(name) => (name == "I").then(|| Rational::from(-1)),
            Self::Atom(atom) => match &atom.expr {
                SymExpr::Primary(Primary::Call(name, args)) if name == "sqrt" && args.len() == 1 => {
                    args[0].as_rational()
                },
                _ => None,
            },
        }
    }

    /// Returns true if this is the symbol with the given name.
    pub fn is_symbol(&self, name: &str) -> bool {
        matches!(self, Self::Symbol(sym) if sym == name)
    }
}

impl PartialEq for Indeterminate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Indeterminate {}

impl PartialOrd for Indeterminate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Symbols sort before atoms. Within each kind, indeterminates sort by name.
impl Ord for Indeterminate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Symbol(lhs), Self::Symbol(rhs)) => lhs.cmp(rhs),
            (Self::Symbol(_), Self::Atom(_)) => Ordering::Less,
            (Self::Atom(_), Self::Symbol(_)) => Ordering::Greater,
            (Self::Atom(lhs), Self::Atom(rhs)) => lhs.key.cmp(&rhs.key),
        }
    }
}

/// A product of indeterminates raised to positive powers, such as `x^2*y`.
///
/// The factors are kept sorted by indeterminate, and every exponent is nonzero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Monomial(Vec<(Indeterminate, u32)>);

impl Monomial {
    /// The monomial `1`.
    pub fn one() -> Self {
        Self(Vec::new())
    }

    /// The monomial `var^exp`.
    pub fn var(var: Indeterminate, exp: u32) -> Self {
        if exp == 0 {
            Self::one()
        } else {
            Self(vec![(var, exp)])
        }
    }

    /// Returns true if this is the monomial `1`.
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the factors of the monomial.
    pub fn factors(&self) -> &[(Indeterminate, u32)] {
        &self.0
    }

    /// Returns the exponent of the given indeterminate in this monomial.
    pub fn degree_in(&self, var: &Indeterminate) -> u32 {
        self.0.iter()
            .find(|(v, _)| v == var)
            .map(|(_, exp)| *exp)
            .unwrap_or(0)
    }

    /// Returns the sum of the exponents.
    pub fn total_degree(&self) -> u32 {
        self.0.iter().map(|(_, exp)| exp).sum()
    }

    /// Returns the product of two monomials.
    pub fn mul(&self, other: &Self) -> Self {
        let mut factors = self.0.clone();
        for (var, exp) in &other.0 {
            match factors.binary_search_by(|(v, _)| v.cmp(var)) {
                Ok(i) => factors[i].1 += exp,
                Err(i) => factors.insert(i, (var.clone(), *exp)),
            }
        }
        Self(factors)
    }

    /// Returns `self / other`, or [`None`] if `other` does not divide `self`.
    pub fn div(&self, other: &Self) -> Option<Self> {
        let mut factors = self.0.clone();
        for (var, exp) in &other.0 {
            let i = factors.binary_search_by(|(v, _)| v.cmp(var)).ok()?;
            match factors[i].1.cmp(exp) {
                Ordering::Less => return None,
                Ordering::Equal => {
                    factors.remove(i);
                },
                Ordering::Greater => factors[i].1 -= exp,
            }
        }
        Some(Self(factors))
    }

    /// Returns the greatest common divisor of two monomials.
    pub fn gcd(&self, other: &Self) -> Self {
        Self(self.0.iter()
            .filter_map(|(var, exp)| {
                let other_exp = other.degree_in(var);
                (other_exp > 0).then(|| (var.clone(), (*exp).min(other_exp)))
            })
            .collect())
    }

    /// Removes the given indeterminate, returning the remaining monomial and the removed
    /// exponent.
    pub fn remove(&self, var: &Indeterminate) -> (Self, u32) {
        let mut factors = self.0.clone();
        match factors.iter().position(|(v, _)| v == var) {
            Some(i) => {
                let (_, exp) = factors.remove(i);
                (Self(factors), exp)
            },
            None => (Self(factors), 0),
        }
    }

    /// Returns the monomial with the exponent of the given indeterminate replaced.
    pub fn with_degree(&self, var: &Indeterminate, exp: u32) -> Self {
        let (rest, _) = self.remove(var);
        rest.mul(&Self::var(var.clone(), exp))
    }

    /// Returns the factors of the monomial as expressions, in sorted order.
    pub fn to_exprs(&self) -> Vec<SymExpr> {
        self.0.iter()
            .map(|(var, exp)| {
                if *exp == 1 {
                    var.to_expr()
                } else {
                    var.to_expr().pow(SymExpr::int(*exp))
                }
            })
            .collect()
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic order: the exponents of the smallest indeterminate are compared first, so
/// `x > y` and `x*y > x`.
impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        let (mut lhs, mut rhs) = (self.0.iter(), other.0.iter());
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some((lhs_var, lhs_exp)), Some((rhs_var, rhs_exp))) => {
                    match lhs_var.cmp(rhs_var) {
                        // `self` has a variable that `other` raises to the power 0
                        Ordering::Less => return Ordering::Greater,
                        Ordering::Greater => return Ordering::Less,
                        Ordering::Equal => match lhs_exp.cmp(rhs_exp) {
                            Ordering::Equal => {},
                            ord => return ord,
                        },
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Indeterminate {
        Indeterminate::symbol("x")
    }

    fn y() -> Indeterminate {
        Indeterminate::symbol("y")
    }

    #[test]
    fn lex_order() {
        let x1 = Monomial::var(x(), 1);
        let y1 = Monomial::var(y(), 1);
        let xy = x1.mul(&y1);
        let y3 = Monomial::var(y(), 3);

        assert!(x1 > y1);
        assert!(xy > x1);
        assert!(x1 > y3);
        assert!(y1 > Monomial::one());
    }

    #[test]
    fn division_and_gcd() {
        let x2y = Monomial::var(x(), 2).mul(&Monomial::var(y(), 1));
        let xy2 = Monomial::var(x(), 1).mul(&Monomial::var(y(), 2));
        let xy = Monomial::var(x(), 1).mul(&Monomial::var(y(), 1));

        assert_eq!(x2y.gcd(&xy2), xy);
        assert_eq!(x2y.div(&xy), Some(Monomial::var(x(), 1)));
        assert_eq!(x2y.div(&xy2), None);
    }
}
