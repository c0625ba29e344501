use std::fmt::{Display, Formatter};

/// Possible factoring steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `2x - 4 = 2(x - 2)`
    /// `-x - 1 = -(x + 1)`
    ExtractContent,

    /// `x^2 + x = x(x + 1)`
    ExtractCommonMonomial,

    /// `x^2 - 3x + 2 = (x - 1)(x - 2)`
    LinearFactors,

    /// `a^2 - b^2 = (a - b)(a + b)`
    DifferenceOfSquares,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            Self::ExtractContent => "factor out the common number",
            Self::ExtractCommonMonomial => "factor out the common variables",
            Self::LinearFactors => "factor using the rational roots",
            Self::DifferenceOfSquares => "factor a difference of two squares",
        };
        write!(f, "{}", description)
    }
}
