pub mod ast;
pub mod error;
pub mod token;

use error::{Error, kind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;
use tutor_error::ErrorKind;

/// A high-level parser for algebraic expressions. This is the type to use to parse an arbitrary
/// piece of text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Advances the cursor past any whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(|token| token.is_whitespace()) {
            self.cursor += 1;
        }
    }

    /// Returns the next non-whitespace token without consuming it.
    pub fn peek_token(&mut self) -> Option<&Token<'source>> {
        self.skip_whitespace();
        self.tokens.get(self.cursor)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(kind::UnexpectedEof)),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        match self.peek_token().map(|token| token.kind) {
            None => Ok(value),
            Some(kind) if kind.starts_operand() => Err(self.error(kind::MissingOperator)),
            Some(TokenKind::CloseParen) => Err(self.error(kind::UnclosedParenthesis { opening: false })),
            Some(_) => Err(self.error(kind::ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence. Parsing at this level accepts every operator.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`).
    Term,

    /// Precedence of multiplication (`*`) and division (`/`).
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`**` or `^`).
    Exp,
}

impl Precedence {
    /// Returns the next-highest precedence level, or itself when already at the highest level.
    pub fn next(self) -> Self {
        match self {
            Self::Any => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Neg,
            Self::Neg | Self::Exp => Self::Exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{Binary, Call, Expr, Literal, LitSym, Paren, Unary};
    use pretty_assertions::assert_eq;
    use token::op::{BinOpKind, UnaryOpKind};

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    fn parse_err(source: &str) -> Error {
        Parser::new(source).try_parse_full::<Expr>().unwrap_err()
    }

    #[test]
    fn literal_symbol() {
        assert_eq!(parse("  x  "), Expr::Literal(Literal::Symbol(LitSym {
            name: "x".to_string(),
            span: 2..3,
        })));
    }

    #[test]
    fn precedence_climbing() {
        assert_eq!(parse("1 + 2 * 3 ** 4").to_string(), "1 + 2 * 3 ** 4");
        let Expr::Binary(Binary { op, rhs, .. }) = parse("1 + 2 * 3") else {
            panic!("expected a binary expression");
        };
        assert_eq!(op.kind, BinOpKind::Add);
        assert!(matches!(*rhs, Expr::Binary(Binary { ref op, .. }) if op.kind == BinOpKind::Mul));
    }

    #[test]
    fn left_associative_subtraction() {
        let Expr::Binary(Binary { lhs, op, .. }) = parse("a - b - c") else {
            panic!("expected a binary expression");
        };
        assert_eq!(op.kind, BinOpKind::Sub);
        assert_eq!(lhs.to_string(), "a - b");
    }

    #[test]
    fn right_associative_power() {
        let Expr::Binary(Binary { lhs, rhs, .. }) = parse("2 ^ 3 ** x") else {
            panic!("expected a binary expression");
        };
        assert_eq!(lhs.to_string(), "2");
        assert_eq!(rhs.to_string(), "3 ** x");
    }

    #[test]
    fn negation_binds_looser_than_power() {
        let Expr::Unary(Unary { operand, op, .. }) = parse("-x**2") else {
            panic!("expected a unary expression");
        };
        assert_eq!(op.kind, UnaryOpKind::Neg);
        assert_eq!(operand.to_string(), "x ** 2");
    }

    #[test]
    fn signed_exponent() {
        let Expr::Binary(Binary { rhs, .. }) = parse("2**-x") else {
            panic!("expected a binary expression");
        };
        assert!(matches!(*rhs, Expr::Unary(_)));
    }

    #[test]
    fn call_with_arguments() {
        let Expr::Call(Call { name, args, .. }) = parse("log(x + 1, 2)") else {
            panic!("expected a call");
        };
        assert_eq!(name.name, "log");
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].to_string(), "x + 1");
    }

    #[test]
    fn parenthesized() {
        let Expr::Binary(Binary { lhs, .. }) = parse("(x + 1) * 2") else {
            panic!("expected a binary expression");
        };
        assert!(matches!(*lhs, Expr::Paren(Paren { .. })));
    }

    #[test]
    fn doubled_operator() {
        let err = parse_err("x +* 2");
        assert!(err.is::<kind::UnexpectedToken>());
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn implicit_multiplication_is_rejected() {
        let err = parse_err("2x");
        assert!(err.is::<kind::MissingOperator>());
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn dangling_operator() {
        assert!(parse_err("x -").is::<kind::UnexpectedEof>());
        assert!(parse_err("").is::<kind::UnexpectedEof>());
    }

    #[test]
    fn unbalanced_parentheses() {
        let opening = parse_err("(x + 1");
        assert_eq!(
            opening.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: true }),
        );
        assert_eq!(opening.spans, vec![0..1]);

        let closing = parse_err("x + 1)");
        assert_eq!(
            closing.downcast_ref::<kind::UnclosedParenthesis>(),
            Some(&kind::UnclosedParenthesis { opening: false }),
        );
    }

    #[test]
    fn empty_parentheses() {
        assert!(parse_err("()").is::<kind::EmptyParenthesis>());
        assert!(parse_err("f()").is::<kind::EmptyParenthesis>());
    }

    #[test]
    fn stray_character() {
        let err = parse_err("x $ 2");
        assert!(err.is::<kind::ExpectedEof>());
    }
}
