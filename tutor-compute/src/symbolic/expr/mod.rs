//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](tutor_parser::parser::ast::Expr) type from `tutor_parser` is a recursive `enum`
//! that mirrors the syntax the user typed. It's convenient for parsing, but not so much for
//! algebraic manipulation.
//!
//! This module defines [`SymExpr`], which recursively flattens the AST into lists of terms and
//! factors. Subtraction becomes addition of a negated term, and division becomes multiplication
//! by a power of `-1`. No other rewriting happens during conversion: `x + x` stays two terms, so
//! that the printed form of a fresh [`SymExpr`] stays close to what was typed.
//!
//! # Strict equality
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**:
//! two expressions are strictly equal if they have the same shape and strictly equal children,
//! where the terms of a sum and the factors of a product may appear in any order. `x + 1` and
//! `1 + x` are strictly equal, but `2*x` and `x + x` are not.

mod fmt;

pub use fmt::ExprFormatter;

use crate::primitive::{float_from_str, int, int_from_str};
use rug::{Float, Integer, Rational};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg};
use tutor_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};

/// Names that denote constants rather than variables: `pi`, Euler's number `E`, and the
/// imaginary unit `I`.
pub const CONSTANTS: [&str; 3] = ["pi", "E", "I"];

/// Returns true if the given symbol name denotes a constant.
pub fn is_constant_name(name: &str) -> bool {
    CONSTANTS.contains(&name)
}

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable or named constant, such as `x`, `y`, or `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `log(x, 2)`.
    Call(String, Vec<SymExpr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module never
/// produces non-normal [`Float`]s (such as `NaN`).
impl Eq for Primary {}

/// A mathematical expression with information about its terms and factors.
///
/// This type **flattens** out the tree structure of the AST. For example, the expression
/// `x + (y + z)` is represented as a single [`SymExpr::Add`] node with _three_ children, `x`,
/// `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates an integer expression.
    pub fn int<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Integer(int(n)))
    }

    /// Creates a symbol expression.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a function call expression.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates the expression for an exact rational number: an integer, or `numer * denom^-1`,
    /// where a numerator of one is left out.
    pub fn rational(value: &Rational) -> Self {
        let (numer, denom) = (value.numer(), value.denom());
        if *denom == 1 {
            Self::Primary(Primary::Integer(numer.clone()))
        } else if *numer == 1 {
            Self::Primary(Primary::Integer(denom.clone())).recip()
        } else {
            Self::Mul(vec![
                Self::Primary(Primary::Integer(numer.clone())),
                Self::Primary(Primary::Integer(denom.clone())).recip(),
            ])
        }
    }

    /// Returns `self^-1`. No simplification is done.
    pub fn recip(self) -> Self {
        Self::Exp(Box::new(self), Box::new(Self::int(-1)))
    }

    /// Returns `self^exp`. No simplification is done.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns the square root of this expression, written as a call to `sqrt`.
    pub fn sqrt(self) -> Self {
        Self::call("sqrt", vec![self])
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is an integer or a fraction of integers in the form produced by
    /// [`SymExpr::rational`], returns its value.
    pub fn as_rational(&self) -> Option<Rational> {
        let recip = |expr: &SymExpr| match expr {
            Self::Exp(base, exp) if exp.as_integer().is_some_and(|n| *n == -1) => {
                base.as_integer().filter(|n| n.cmp0() != std::cmp::Ordering::Equal).cloned()
            },
            _ => None,
        };

        match self {
            Self::Primary(Primary::Integer(n)) => Some(Rational::from(n)),
            Self::Exp(..) => recip(self).map(|d| Rational::from((Integer::from(1), d))),
            Self::Mul(factors) => match factors.as_slice() {
                [Self::Primary(Primary::Integer(n)), d] => {
                    recip(d).map(|d| Rational::from((n.clone(), d)))
                },
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is the integer zero.
    pub fn is_zero(&self) -> bool {
        self.as_integer().is_some_and(|n| n.is_zero())
    }

    /// Returns true if the expression is an integer or a float.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_) | Primary::Float(_)))
    }

    /// Returns true if the expression is a negative integer or a negative float.
    pub fn is_negative_number(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => *n < 0,
            Self::Primary(Primary::Float(n)) => n.is_sign_negative() && !n.is_zero(),
            _ => false,
        }
    }

    /// If the expression is a negative integer power, such as `x^-2`, returns the magnitude of
    /// the exponent.
    pub fn negative_exponent(&self) -> Option<Integer> {
        match self {
            Self::Exp(_, exp) => exp.as_integer().filter(|n| **n < 0).map(|n| -n.clone()),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in a [`SymExpr::Add`] with zero / one term, or a
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the integer 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::int(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::int(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns the free variables of the expression, in order of first appearance from left to
    /// right. Named constants and function names are not variables.
    pub fn free_symbols(&self) -> Vec<String> {
        let mut symbols = Vec::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, symbols: &mut Vec<String>) {
        match self {
            Self::Primary(Primary::Symbol(name)) => {
                if !is_constant_name(name) && !symbols.contains(name) {
                    symbols.push(name.clone());
                }
            },
            Self::Primary(Primary::Call(_, args)) => {
                args.iter().for_each(|arg| arg.collect_symbols(symbols));
            },
            Self::Primary(_) => {},
            Self::Add(children) | Self::Mul(children) => {
                children.iter().for_each(|child| child.collect_symbols(symbols));
            },
            Self::Exp(base, exp) => {
                base.collect_symbols(symbols);
                exp.collect_symbols(symbols);
            },
        }
    }

    /// Returns true if the expression contains any free variable.
    pub fn has_free_symbols(&self) -> bool {
        !self.free_symbols().is_empty()
    }

    /// Returns a copy of the expression with every occurrence of the symbol `name` replaced by
    /// `value`. No simplification is done.
    pub fn substitute(&self, name: &str, value: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(sym)) if sym == name => value.clone(),
            Self::Primary(Primary::Call(func, args)) => Self::Primary(Primary::Call(
                func.clone(),
                args.iter().map(|arg| arg.substitute(name, value)).collect(),
            )),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => terms.iter()
                .map(|term| term.substitute(name, value))
                .fold(Self::Add(Vec::new()), |acc, term| acc + term)
                .downgrade(),
            Self::Mul(factors) => factors.iter()
                .map(|factor| factor.substitute(name, value))
                .fold(Self::Mul(Vec::new()), |acc, factor| acc * factor)
                .downgrade(),
            Self::Exp(base, exp) => Self::Exp(
                Box::new(base.substitute(name, value)),
                Box::new(exp.substitute(name, value)),
            ),
        }
    }

    /// Returns a formatter that prints the expression with the given number format applied to
    /// its floating-point numbers.
    pub fn fmt_with(&self, options: crate::numerical::fmt::FormatOptions) -> ExprFormatter<'_> {
        ExprFormatter { expr: self, options: Some(options) }
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
                    && rhs.iter().all(|rhs| lhs.contains(rhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => Self::Primary(Primary::Integer(int_from_str(&int.value))),
                Literal::Float(float) => Self::Primary(Primary::Float(float_from_str(&float.value))),
                Literal::Symbol(sym) => Self::Primary(Primary::Symbol(sym.name)),
            },
            AstExpr::Paren(paren) => Self::from(*paren.expr),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                Self::Primary(Primary::Call(call.name.name, args))
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                // treat this as -1 * operand
                UnaryOpKind::Neg => Self::from(*unary.operand).neg(),
                UnaryOpKind::Pos => Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let (lhs, rhs) = (Self::from(*bin.lhs), Self::from(*bin.rhs));
                match bin.op.kind {
                    BinOpKind::Exp => Self::Exp(Box::new(lhs), Box::new(rhs)),
                    // `+` and `*` flatten nested sums / products of the same kind
                    BinOpKind::Mul => lhs * rhs,
                    // treat this as lhs * rhs^-1
                    BinOpKind::Div => lhs * rhs.recip(),
                    BinOpKind::Add => lhs + rhs,
                    // treat this as lhs + -1 * rhs
                    BinOpKind::Sub => lhs + rhs.neg(),
                }
            },
        }
    }
}

/// Adds two [`SymExpr`]s together, flattening sums so that the terms keep their order. No
/// simplification is done.
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), rhs) => {
                terms.push(rhs);
                Self::Add(terms)
            },
            (lhs, Self::Add(mut terms)) => {
                terms.insert(0, lhs);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two [`SymExpr`]s together, flattening products so that the factors keep their
/// order. No simplification is done.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), rhs) => {
                factors.push(rhs);
                Self::Mul(factors)
            },
            (lhs, Self::Mul(mut factors)) => {
                factors.insert(0, lhs);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Negates the expression. Numbers are negated directly, and a product with a leading number has
/// that number negated; anything else is multiplied by `-1`.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(n)) => Self::Primary(Primary::Integer(-n)),
            Self::Primary(Primary::Float(n)) => Self::Primary(Primary::Float(-n)),
            Self::Mul(mut factors) => match factors.first_mut() {
                Some(Self::Primary(Primary::Integer(n))) => {
                    *n = -std::mem::take(n);
                    if *n == 1 && factors.len() > 1 {
                        factors.remove(0);
                    }
                    Self::Mul(factors).downgrade()
                },
                Some(Self::Primary(Primary::Float(n))) => {
                    *n = -n.clone();
                    Self::Mul(factors)
                },
                _ => {
                    factors.insert(0, Self::int(-1));
                    Self::Mul(factors)
                },
            },
            expr => Self::Mul(vec![Self::int(-1), expr]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tutor_parser::parser::Parser;

    fn parse(source: &str) -> SymExpr {
        SymExpr::from(Parser::new(source).try_parse_full::<AstExpr>().unwrap())
    }

    #[test]
    fn flatten_sum() {
        let expr = parse("x + (y + z) - 2");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::symbol("y"),
            SymExpr::symbol("z"),
            SymExpr::int(-2),
        ]));
    }

    #[test]
    fn flatten_product_with_division() {
        let expr = parse("2 * x / y");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::int(2),
            SymExpr::symbol("x"),
            SymExpr::symbol("y").recip(),
        ]));
    }

    #[test]
    fn negate_product() {
        assert_eq!(parse("-(2*x)"), SymExpr::Mul(vec![SymExpr::int(-2), SymExpr::symbol("x")]));
        assert_eq!(parse("-(-1*x)"), SymExpr::symbol("x"));
        assert_eq!(parse("-(x*y)"), SymExpr::Mul(vec![
            SymExpr::int(-1),
            SymExpr::symbol("x"),
            SymExpr::symbol("y"),
        ]));
    }

    #[test]
    fn strict_equality_ignores_order() {
        assert_eq!(parse("x + 1"), parse("1 + x"));
        assert_ne!(parse("2*x"), parse("x + x"));
    }

    #[test]
    fn free_symbols_in_order() {
        let expr = parse("y*sin(x) + pi*z - I*y");
        assert_eq!(expr.free_symbols(), vec!["y", "x", "z"]);
    }

    #[test]
    fn substitute_symbol() {
        let expr = parse("x**2 + y").substitute("x", &parse("y + 1"));
        assert_eq!(expr.to_string(), "(y + 1)**2 + y");
    }
}
