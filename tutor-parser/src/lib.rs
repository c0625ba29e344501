//! Tokenizer and parser for the expressions that make up one side of an equation.
//!
//! The accepted syntax is the familiar calculator syntax: numbers, variable names, the four
//! arithmetic operators, powers written as `**` or `^`, parentheses, and function calls such as
//! `sqrt(x)`. Multiplication must always be written explicitly.
//!
//! ```
//! use tutor_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("3*x**2 - 1");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "3 * x ** 2 - 1");
//! ```

pub mod parser;
pub mod tokenizer;
