use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    token::op::UnaryOp,
    Parser,
};
use std::{fmt, ops::Range};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Parses a unary expression, or a primary expression if there is no leading sign.
    ///
    /// The operand of a sign extends over any following power, so `-x**2` is `-(x**2)`.
    pub(crate) fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.try_parse::<UnaryOp>() {
            Ok(op) => {
                let operand = Binary::parse_expr(input, op.precedence())?;
                let span = op.span.start..operand.span().end;
                Ok(Expr::Unary(Self { operand: Box::new(operand), op, span }))
            },
            Err(_) => Expr::parse_primary(input),
        }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}
