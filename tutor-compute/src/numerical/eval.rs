//! Numerical evaluation of [`SymExpr`]s.

use crate::consts::{E, I, PI};
use crate::error::{kind::{DivisionByZero, UnboundSymbol, Undefined, UnknownFunction, WrongArgumentCount}, Error};
use crate::primitive::complex;
use crate::symbolic::{Primary, SymExpr};
use levenshtein::levenshtein;
use rug::{ops::Pow, Complex};
use std::collections::HashMap;

/// The functions understood by [`eval`], with the number of arguments each takes.
pub const FUNCTIONS: [(&str, usize); 14] = [
    ("sqrt", 1),
    ("exp", 1),
    ("log", 1),
    ("ln", 1),
    ("sin", 1),
    ("cos", 1),
    ("tan", 1),
    ("asin", 1),
    ("acos", 1),
    ("atan", 1),
    ("sinh", 1),
    ("cosh", 1),
    ("tanh", 1),
    ("abs", 1),
];

/// Returns the names of known functions with a name similar to the given name.
pub fn similar_functions(name: &str) -> Vec<String> {
    FUNCTIONS.iter()
        .filter(|(n, _)| levenshtein(n, name) < 2)
        .map(|(n, _)| n.to_string())
        .collect()
}

/// Evaluates the expression to a complex number, with the given values for its symbols.
///
/// The constants `pi`, `E`, and `I` always have their usual values. A symbol that is neither a
/// constant nor bound results in an [`UnboundSymbol`] error.
pub fn eval(expr: &SymExpr, bindings: &HashMap<String, Complex>) -> Result<Complex, Error> {
    let value = match expr {
        SymExpr::Primary(primary) => eval_primary(primary, bindings)?,
        SymExpr::Add(terms) => {
            let mut sum = complex(0);
            for term in terms {
                sum += eval(term, bindings)?;
            }
            sum
        },
        SymExpr::Mul(factors) => {
            let mut product = complex(1);
            for factor in factors {
                product *= eval(factor, bindings)?;
            }
            product
        },
        SymExpr::Exp(base, exp) => {
            let base_value = eval(base, bindings)?;
            if let Some(n) = exp.as_integer().and_then(|n| n.to_i32()) {
                if base_value.is_zero() && n < 0 {
                    return Err(Error::unspanned(DivisionByZero));
                }
                base_value.pow(n)
            } else {
                let exp_value = eval(exp, bindings)?;
                if base_value.is_zero() {
                    if exp_value.real().is_sign_negative() && !exp_value.real().is_zero() {
                        return Err(Error::unspanned(DivisionByZero));
                    }
                    complex(0)
                } else {
                    base_value.pow(&exp_value)
                }
            }
        },
    };

    if value.real().is_finite() && value.imag().is_finite() {
        Ok(value)
    } else {
        Err(Error::unspanned(Undefined { expr: expr.to_string() }))
    }
}

fn eval_primary(primary: &Primary, bindings: &HashMap<String, Complex>) -> Result<Complex, Error> {
    Ok(match primary {
        Primary::Integer(n) => complex(n),
        Primary::Float(n) => complex(n),
        Primary::Symbol(name) => match name.as_str() {
            "pi" => complex(&*PI),
            "E" => complex(&*E),
            "I" => I.clone(),
            _ => bindings.get(name)
                .cloned()
                .ok_or_else(|| Error::unspanned(UnboundSymbol { name: name.clone() }))?,
        },
        Primary::Call(name, args) => {
            let Some((_, expected)) = FUNCTIONS.iter().find(|(n, _)| *n == name.as_str()) else {
                return Err(Error::unspanned(UnknownFunction {
                    name: name.clone(),
                    suggestions: similar_functions(name),
                }));
            };
            if args.len() != *expected {
                return Err(Error::unspanned(WrongArgumentCount {
                    name: name.clone(),
                    expected: *expected,
                    given: args.len(),
                }));
            }

            let arg = eval(&args[0], bindings)?;
            match name.as_str() {
                "sqrt" => arg.sqrt(),
                "exp" => arg.exp(),
                "log" | "ln" => {
                    if arg.is_zero() {
                        return Err(Error::unspanned(Undefined { expr: primary.to_string() }));
                    }
                    arg.ln()
                },
                "sin" => arg.sin(),
                "cos" => arg.cos(),
                "tan" => arg.tan(),
                "asin" => arg.asin(),
                "acos" => arg.acos(),
                "atan" => arg.atan(),
                "sinh" => arg.sinh(),
                "cosh" => arg.cosh(),
                "tanh" => arg.tanh(),
                _ => arg.abs(),
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use tutor_parser::parser::{ast::Expr as AstExpr, Parser};

    fn eval_str(source: &str) -> Result<Complex, Error> {
        let expr = SymExpr::from(Parser::new(source).try_parse_full::<AstExpr>().unwrap());
        let bindings = HashMap::from([("x".to_string(), complex(2))]);
        eval(&expr, &bindings)
    }

    #[test]
    fn arithmetic() {
        let value = eval_str("3*x**2 - 1/x").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 11.5);
        assert_float_absolute_eq!(value.imag().to_f64(), 0.0);
    }

    #[test]
    fn constants_and_functions() {
        let value = eval_str("cos(pi) + sqrt(-4)").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), -1.0);
        assert_float_absolute_eq!(value.imag().to_f64(), 2.0);

        let value = eval_str("E**(I*pi)").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), -1.0);
        assert_float_absolute_eq!(value.imag().to_f64(), 0.0);
    }

    #[test]
    fn unknown_function_suggestions() {
        let err = eval_str("sqr(x)").unwrap_err();
        let kind = err.downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(kind.suggestions, vec!["sqrt".to_string()]);
    }

    #[test]
    fn division_by_zero() {
        assert!(eval_str("1/(x - 2)").unwrap_err().is::<DivisionByZero>());
    }

    #[test]
    fn unbound_symbol() {
        assert!(eval_str("y + 1").unwrap_err().is::<UnboundSymbol>());
    }
}
