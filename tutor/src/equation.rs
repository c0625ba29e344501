use std::fmt::{self, Display, Formatter};
use tutor_compute::symbolic::SymExpr;
use tutor_parser::parser::{ast::Expr as AstExpr, Parser};
use super::error::TutorError;

/// An equation asserting that two expressions are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// The left-hand side.
    pub lhs: SymExpr,

    /// The right-hand side.
    pub rhs: SymExpr,
}

impl Equation {
    /// Parses one line of input. The line is split at its first `=`; a line without one is an
    /// expression that equals zero.
    ///
    /// `line` is the 1-based line number, used in error messages.
    pub fn parse(line: usize, text: &str) -> Result<Self, TutorError> {
        match text.split_once('=') {
            Some((lhs, rhs)) => Ok(Self {
                lhs: parse_side(line, lhs)?,
                rhs: parse_side(line, rhs)?,
            }),
            None => Ok(Self {
                lhs: parse_side(line, text)?,
                rhs: SymExpr::int(0),
            }),
        }
    }

    /// Returns `lhs - rhs`, the expression that must vanish.
    ///
    /// No simplification is done, except that a side that is literally `0` is dropped, so the
    /// equation `x - 4 = 0` becomes `x - 4` rather than `x - 4 - 0`.
    pub fn difference(&self) -> SymExpr {
        if self.rhs.is_zero() {
            self.lhs.clone()
        } else if self.lhs.is_zero() {
            -self.rhs.clone()
        } else {
            self.lhs.clone() + -self.rhs.clone()
        }
    }

    /// Returns the free variables of both sides, left side first, each listed once.
    pub fn free_symbols(&self) -> Vec<String> {
        let mut symbols = self.lhs.free_symbols();
        for symbol in self.rhs.free_symbols() {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        symbols
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

fn parse_side(line: usize, text: &str) -> Result<SymExpr, TutorError> {
    Parser::new(text)
        .try_parse_full::<AstExpr>()
        .map(SymExpr::from)
        .map_err(|error| TutorError::Parse { line, source_text: text.to_string(), error })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn split_at_first_equals() {
        let eq = Equation::parse(1, "x - 2*y = 4").unwrap();
        assert_eq!(eq.to_string(), "x - 2*y = 4");
        assert_eq!(eq.difference().to_string(), "x - 2*y - 4");
    }

    #[test]
    fn expression_equals_zero() {
        let eq = Equation::parse(1, "x**2 + 1").unwrap();
        assert_eq!(eq.to_string(), "x**2 + 1 = 0");
        assert_eq!(eq.difference().to_string(), "x**2 + 1");

        let eq = Equation::parse(1, "0 = x + 1").unwrap();
        assert_eq!(eq.difference().to_string(), "-(x + 1)");
    }

    #[test]
    fn variables_left_side_first() {
        let eq = Equation::parse(1, "y + x = z*x").unwrap();
        assert_eq!(eq.free_symbols(), vec!["y", "x", "z"]);

        let eq = Equation::parse(1, "2*pi*r = 1").unwrap();
        assert_eq!(eq.free_symbols(), vec!["r"]);
    }

    #[test]
    fn parse_errors() {
        let err = Equation::parse(3, "x +* 2").unwrap_err();
        assert!(matches!(err, TutorError::Parse { line: 3, .. }));

        // only the first `=` separates the sides
        assert!(Equation::parse(1, "x = y = 2").is_err());
        assert!(Equation::parse(1, "x =").is_err());
    }
}
