use std::fmt::{Display, Formatter};

/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0.25 = 1/4`
    ExactDecimal,

    /// `a+a = 2a`
    /// `2a+3a = 5a`
    /// `a-a = 0`
    CombineLikeTerms,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a+b)^2 = a^2 + 2*a*b + b^2`
    ExpandPower,

    /// `a/b + c/d = (a*d + b*c)/(b*d)`
    CommonDenominator,

    /// `(a*b)/(a*c) = b/c`
    CancelFactors,

    /// `sqrt(4) = 2`
    /// `8^(1/3) = 2`
    EvaluateRoot,

    /// `i^2 = -1`
    ReduceImaginaryUnit,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            Self::ExactDecimal => "write the decimal as an exact fraction",
            Self::CombineLikeTerms => "combine like terms",
            Self::DistributiveProperty => "apply the distributive property",
            Self::ExpandPower => "expand the power",
            Self::CommonDenominator => "rewrite over a common denominator",
            Self::CancelFactors => "cancel common factors",
            Self::EvaluateRoot => "evaluate the root",
            Self::ReduceImaginaryUnit => "use i^2 = -1",
        };
        write!(f, "{}", description)
    }
}
