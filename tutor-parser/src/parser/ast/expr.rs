use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::{Literal, LitSym}, paren::Paren, unary::Unary},
        error::{Error, kind},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// Represents any expression that can appear on one side of an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
    Unary(Unary),
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span.clone(),
            Expr::Call(call) => call.span.clone(),
            Expr::Unary(unary) => unary.span.clone(),
            Expr::Binary(binary) => binary.span.clone(),
        }
    }

    /// Returns the innermost expression, removing any surrounding parentheses.
    pub fn innermost(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = &paren.expr;
        }
        expr
    }

    /// Parses a primary expression: a literal, a function call, or a parenthesized expression.
    pub(crate) fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        let Some(token) = input.peek_token().cloned() else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match token.kind {
            TokenKind::Name => {
                let name = input.try_parse::<LitSym>()?;
                if input.peek_token().is_some_and(|token| token.kind == TokenKind::OpenParen) {
                    Call::parse_args(input, name).map(Expr::Call)
                } else {
                    Ok(Expr::Literal(Literal::Symbol(name)))
                }
            },
            TokenKind::Int | TokenKind::Float => input.try_parse::<Literal>().map(Expr::Literal),
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Expr::Paren),
            TokenKind::CloseParen => {
                Err(Error::new(vec![token.span], kind::UnclosedParenthesis { opening: false }))
            },
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Name,
                    TokenKind::OpenParen,
                ],
                found,
            })),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        Binary::parse_expr(input, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
