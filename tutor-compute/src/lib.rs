//! Algebra engine behind the math tutor.
//!
//! The [`symbolic`] module holds the expression type used throughout the workspace, together
//! with the three operations the tutor performs on an equation: [`simplify`], [`factor`] and
//! [`solve`]. The [`numerical`] module evaluates constant expressions and formats the resulting
//! numbers.
//!
//! [`simplify`]: symbolic::simplify::simplify
//! [`factor`]: symbolic::factor::factor
//! [`solve`]: symbolic::solve::solve

pub mod approx;
pub mod consts;
pub mod error;
pub mod numerical;
pub mod primitive;
pub mod symbolic;
