use ariadne::Fmt;
use tutor_attrs::ErrorKind;
use tutor_error::EXPR;
use crate::tokenizer::TokenKind;

/// An intentionally useless error, used while backtracking. It contains no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// The end of the input was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the input was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// Two operands were written next to each other without an operator in between.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator between these terms",
    labels = ["an operator is needed before this"],
    help = format!("multiplication must be written explicitly, for example: {}", "2*x".fg(EXPR)),
)]
pub struct MissingOperator;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {}", describe(*found)),
    labels = [format!(
        "expected {}",
        expected.iter().map(|kind| describe(*kind)).collect::<Vec<_>>().join(" or "),
    )],
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A human-readable description of a token kind, used in error messages.
fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Whitespace => "whitespace",
        TokenKind::Add => "`+`",
        TokenKind::Sub => "`-`",
        TokenKind::Mul => "`*`",
        TokenKind::Div => "`/`",
        TokenKind::Exp => "`**`",
        TokenKind::Assign => "`=`",
        TokenKind::Name => "name",
        TokenKind::Comma => "`,`",
        TokenKind::OpenParen => "`(`",
        TokenKind::CloseParen => "`)`",
        TokenKind::Int => "integer",
        TokenKind::Float => "decimal number",
        TokenKind::Symbol => "character",
    }
}
