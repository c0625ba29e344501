//! Printing of [`SymExpr`]s.
//!
//! Sums are printed with `+` and `-` between terms, products with `*`, and powers with `**`.
//! Factors raised to a negative integer power are moved to a denominator, so `x * 2^-1` prints as
//! `x/2`.

use crate::numerical::fmt::{float::fmt_float, FormatOptions};
use std::fmt::{self, Display, Formatter};
use super::{Primary, SymExpr};

/// Formats a [`SymExpr`], optionally applying a number format to its floating-point numbers.
///
/// Created by [`SymExpr::fmt_with`]. The plain [`Display`] implementation of [`SymExpr`] prints
/// floats in their shortest exact form.
#[derive(Debug, Clone, Copy)]
pub struct ExprFormatter<'a> {
    pub(super) expr: &'a SymExpr,
    pub(super) options: Option<FormatOptions>,
}

impl Display for ExprFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Printer { options: self.options.as_ref() }.expr(f, self.expr)
    }
}

impl Display for SymExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Printer { options: None }.expr(f, self)
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Printer { options: None }.primary(f, self)
    }
}

/// Splits a term into its sign and magnitude. `-2*x` is returned as `(true, 2*x)`.
fn split_sign(term: &SymExpr) -> (bool, SymExpr) {
    match term {
        expr if expr.is_negative_number() => (true, -expr.clone()),
        SymExpr::Mul(factors) if factors.first().is_some_and(SymExpr::is_negative_number) => {
            (true, -term.clone())
        },
        _ => (false, term.clone()),
    }
}

struct Printer<'o> {
    options: Option<&'o FormatOptions>,
}

impl Printer<'_> {
    fn expr(&self, f: &mut Formatter<'_>, expr: &SymExpr) -> fmt::Result {
        match expr {
            SymExpr::Primary(primary) => self.primary(f, primary),
            SymExpr::Add(terms) => self.sum(f, terms),
            SymExpr::Mul(factors) => self.product(f, factors),
            SymExpr::Exp(..) if expr.negative_exponent().is_some() => {
                self.product(f, std::slice::from_ref(expr))
            },
            SymExpr::Exp(base, exp) => self.power(f, base, exp),
        }
    }

    fn primary(&self, f: &mut Formatter<'_>, primary: &Primary) -> fmt::Result {
        match primary {
            Primary::Integer(n) => write!(f, "{}", n),
            Primary::Float(n) => match self.options {
                Some(options) => fmt_float(f, n, options),
                None => {
                    let value = n.to_f64();
                    if value.is_finite() && value.fract() == 0.0 {
                        write!(f, "{:.1}", value)
                    } else {
                        write!(f, "{}", value)
                    }
                },
            },
            Primary::Symbol(name) => write!(f, "{}", name),
            Primary::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    self.expr(f, arg)?;
                    for arg in iter {
                        write!(f, ", ")?;
                        self.expr(f, arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }

    fn sum(&self, f: &mut Formatter<'_>, terms: &[SymExpr]) -> fmt::Result {
        if terms.is_empty() {
            return write!(f, "0");
        }

        for (i, term) in terms.iter().enumerate() {
            let (negative, magnitude) = split_sign(term);
            match (i, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {},
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }

            if matches!(magnitude, SymExpr::Add(_)) {
                write!(f, "(")?;
                self.expr(f, &magnitude)?;
                write!(f, ")")?;
            } else {
                self.expr(f, &magnitude)?;
            }
        }
        Ok(())
    }

    /// Writes one factor of a product, parenthesizing it where needed.
    fn factor(&self, f: &mut Formatter<'_>, factor: &SymExpr, leading: bool) -> fmt::Result {
        let parens = match factor {
            SymExpr::Add(_) | SymExpr::Mul(_) => true,
            expr => !leading && expr.is_negative_number(),
        };
        if parens {
            write!(f, "(")?;
            self.expr(f, factor)?;
            write!(f, ")")
        } else {
            self.expr(f, factor)
        }
    }

    fn product(&self, f: &mut Formatter<'_>, factors: &[SymExpr]) -> fmt::Result {
        if factors.is_empty() {
            return write!(f, "1");
        }

        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for factor in factors {
            match (factor, factor.negative_exponent()) {
                (SymExpr::Exp(base, _), Some(exp)) => {
                    if exp == 1 {
                        denominator.push((**base).clone());
                    } else {
                        denominator.push((**base).clone().pow(SymExpr::Primary(Primary::Integer(exp))));
                    }
                },
                _ => numerator.push(factor),
            }
        }

        // a leading -1 becomes a sign
        let mut numerator = numerator.as_slice();
        if let Some((first, rest)) = numerator.split_first() {
            if first.as_integer().is_some_and(|n| *n == -1) && !(rest.is_empty() && denominator.is_empty()) {
                write!(f, "-")?;
                numerator = rest;
            }
        }

        if numerator.is_empty() {
            write!(f, "1")?;
        } else {
            for (i, factor) in numerator.iter().enumerate() {
                if i > 0 {
                    write!(f, "*")?;
                }
                self.factor(f, factor, i == 0)?;
            }
        }

        if denominator.is_empty() {
            return Ok(());
        }

        write!(f, "/")?;
        if let [single] = denominator.as_slice() {
            if matches!(single, SymExpr::Primary(_) | SymExpr::Exp(..)) && !single.is_negative_number() {
                self.expr(f, single)
            } else {
                write!(f, "(")?;
                self.expr(f, single)?;
                write!(f, ")")
            }
        } else {
            write!(f, "(")?;
            for (i, factor) in denominator.iter().enumerate() {
                if i > 0 {
                    write!(f, "*")?;
                }
                self.factor(f, factor, i == 0)?;
            }
            write!(f, ")")
        }
    }

    fn power(&self, f: &mut Formatter<'_>, base: &SymExpr, exp: &SymExpr) -> fmt::Result {
        let base_parens = matches!(base, SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..))
            || base.is_negative_number();
        if base_parens {
            write!(f, "(")?;
            self.expr(f, base)?;
            write!(f, ")")?;
        } else {
            self.expr(f, base)?;
        }

        write!(f, "**")?;

        let exp_plain = match exp {
            SymExpr::Primary(Primary::Symbol(_) | Primary::Call(..)) => true,
            expr => expr.is_number() && !expr.is_negative_number(),
        };
        if exp_plain {
            self.expr(f, exp)
        } else {
            write!(f, "(")?;
            self.expr(f, exp)?;
            write!(f, ")")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tutor_parser::parser::{ast::Expr as AstExpr, Parser};

    fn display(source: &str) -> String {
        SymExpr::from(Parser::new(source).try_parse_full::<AstExpr>().unwrap()).to_string()
    }

    #[test]
    fn sums() {
        assert_eq!(display("x + 2"), "x + 2");
        assert_eq!(display("x - 2"), "x - 2");
        assert_eq!(display("-x + y"), "-x + y");
        assert_eq!(display("x - (y + 1)"), "x - (y + 1)");
        assert_eq!(display("2*x + 3*y - 7"), "2*x + 3*y - 7");
    }

    #[test]
    fn products() {
        assert_eq!(display("2 * x"), "2*x");
        assert_eq!(display("x * -2"), "x*(-2)");
        assert_eq!(display("(x + 1) * (x - 1)"), "(x + 1)*(x - 1)");
        assert_eq!(display("-(x*y)"), "-x*y");
    }

    #[test]
    fn fractions() {
        assert_eq!(display("x / 2"), "x/2");
        assert_eq!(display("1 / x"), "1/x");
        assert_eq!(display("(x - 2) / 2"), "(x - 2)/2");
        assert_eq!(display("x / (y + 1)"), "x/(y + 1)");
        assert_eq!(display("x / (2*y)"), "x/(2*y)");
        assert_eq!(display("-(1/x)"), "-1/x");
    }

    #[test]
    fn powers() {
        assert_eq!(display("x^2"), "x**2");
        assert_eq!(display("(x + 1)**2"), "(x + 1)**2");
        assert_eq!(display("x**(1/2)"), "x**(1/2)");
        assert_eq!(display("(-2)**x"), "(-2)**x");
        assert_eq!(display("2**x**y"), "2**(x**y)");
    }

    #[test]
    fn floats_and_calls() {
        assert_eq!(display("2.5*x"), "2.5*x");
        assert_eq!(display("3."), "3.0");
        assert_eq!(display("sqrt(x + 1)"), "sqrt(x + 1)");
    }
}
