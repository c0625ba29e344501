//! Errors produced while manipulating or evaluating expressions.
//!
//! These errors usually do not point at source code (the expressions involved were produced by
//! earlier rewrites), so they are created with [`Error::unspanned`].

pub mod kind;

pub use tutor_error::Error;
