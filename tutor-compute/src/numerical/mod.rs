//! Numerical evaluation of constant expressions and formatting of the resulting numbers.

pub mod eval;
pub mod fmt;
pub mod number;

pub use eval::eval;
pub use number::Number;
