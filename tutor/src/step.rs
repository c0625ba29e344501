#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tutor_compute::symbolic::SymExpr;
use super::equation::Equation;
use super::error::TutorError;

/// One entry of the explanation: a rewrite of an equation, and a hint about why it helps.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// What was done, such as `Factored: x**2 - 1 → (x - 1)*(x + 1) = 0`.
    pub description: String,

    /// A short explanation for the learner. Empty for error steps.
    pub hint: String,
}

impl Step {
    /// The equation was simplified into `simplified = 0`.
    pub fn simplified(equation: &Equation, simplified: &SymExpr) -> Self {
        Self {
            description: format!("Simplified: {} → {} = 0", equation, simplified),
            hint: "We simplified the equation to make it easier to solve.".to_string(),
        }
    }

    /// The expression `before` was factored into `factored`.
    pub fn factored(before: &SymExpr, factored: &SymExpr) -> Self {
        Self {
            description: format!("Factored: {} → {} = 0", before, factored),
            hint: "We factored the expression to find the roots more easily.".to_string(),
        }
    }

    /// Stands in for the steps when no equation could be rewritten.
    pub fn placeholder() -> Self {
        Self {
            description: "No intermediate steps available".to_string(),
            hint: "This equation is already simple or cannot be factored further.".to_string(),
        }
    }

    /// Reports an error that stopped the explanation.
    pub fn error(error: &TutorError) -> Self {
        Self {
            description: format!("Error: {}", error),
            hint: String::new(),
        }
    }
}
