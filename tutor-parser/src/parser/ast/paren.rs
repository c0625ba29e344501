use crate::{
    parser::{ast::expr::Expr, error::{Error, kind}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from, including both
    /// parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Parses the remainder of a parenthesized sequence after the opening parenthesis (at
    /// `open_span`) was consumed, returning the comma-separated expressions inside and the span
    /// of the closing parenthesis.
    pub(crate) fn parse_contents(
        input: &mut Parser,
        open_span: Range<usize>,
        allow_commas: bool,
    ) -> Result<(Vec<Expr>, Range<usize>), Error> {
        if let Some(token) = input.peek_token() {
            if token.kind == TokenKind::CloseParen {
                let span = open_span.start..token.span.end;
                return Err(Error::new(vec![span], kind::EmptyParenthesis));
            }
        }

        let mut exprs = vec![input.try_parse::<Expr>()?];
        loop {
            let token = match input.next_token() {
                Ok(token) => token,
                Err(_) => return Err(Error::new(vec![open_span], kind::UnclosedParenthesis { opening: true })),
            };

            match token.kind {
                TokenKind::CloseParen => return Ok((exprs, token.span)),
                TokenKind::Comma if allow_commas => exprs.push(input.try_parse::<Expr>()?),
                other if other.starts_operand() => {
                    return Err(Error::new(vec![token.span], kind::MissingOperator));
                },
                found => {
                    let expected: &'static [TokenKind] = if allow_commas {
                        &[TokenKind::Comma, TokenKind::CloseParen]
                    } else {
                        &[TokenKind::CloseParen]
                    };
                    return Err(Error::new(vec![token.span], kind::UnexpectedToken { expected, found }));
                },
            }
        }
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.next_token()?;
        if open.kind != TokenKind::OpenParen {
            return Err(Error::new(vec![open.span], kind::UnexpectedToken {
                expected: &[TokenKind::OpenParen],
                found: open.kind,
            }));
        }

        let (mut exprs, close_span) = Self::parse_contents(input, open.span.clone(), false)?;
        let expr = exprs.remove(0);
        Ok(Self {
            expr: Box::new(expr),
            span: open.span.start..close_span.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
