use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::{Error, kind},
    token::op::BinOp,
    Associativity,
    Parse,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Parses an expression using precedence climbing. Only operators with a precedence of at
    /// least `min` are consumed at this level; the rest are left to the caller.
    pub(crate) fn parse_expr(input: &mut Parser, min: Precedence) -> Result<Expr, Error> {
        let mut lhs = Unary::parse_or_lower(input)?;

        while let Ok(op) = input.try_parse_with_fn(|input| {
            let op = BinOp::parse(input)?;
            if op.precedence() >= min {
                Ok(op)
            } else {
                Err(input.error(kind::NonFatal))
            }
        }) {
            let next_min = match op.associativity() {
                Associativity::Left => op.precedence().next(),
                Associativity::Right => op.precedence(),
            };
            let rhs = Self::parse_expr(input, next_min)?;
            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Self {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}
