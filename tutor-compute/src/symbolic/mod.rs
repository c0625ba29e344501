//! Symbolic manipulation of algebraic expressions.

pub mod expr;
pub mod factor;
pub mod polynomial;
pub mod rational;
pub mod simplify;
pub mod solve;
pub mod step_collector;

pub use expr::{Primary, SymExpr};
pub use step_collector::StepCollector;
