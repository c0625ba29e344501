use ariadne::Fmt;
use tutor_attrs::ErrorKind;
use tutor_error::EXPR;

/// An expression divides by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this expression is zero"],
)]
pub struct DivisionByZero;

/// The function does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this function"],
    help = if self.suggestions.is_empty() {
        "the available functions are sqrt, exp, log, ln, sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, and abs".to_string()
    } else {
        format!(
            "did you mean {}?",
            self.suggestions
                .iter()
                .map(|name| format!("`{}`", name.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(" or "),
        )
    },
)]
pub struct UnknownFunction {
    /// The name of the function that was called.
    pub name: String,

    /// Names of existing functions that are spelled similarly.
    pub suggestions: Vec<String>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "the `{}` function takes {} argument{}, but {} were given",
        self.name,
        self.expected,
        if self.expected == 1 { "" } else { "s" },
        self.given,
    ),
    labels = ["this function call"],
)]
pub struct WrongArgumentCount {
    /// The name of the function that was called.
    pub name: String,

    /// The number of arguments the function takes.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A symbol has no value during numerical evaluation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", self.name),
    labels = ["this symbol"],
)]
pub struct UnboundSymbol {
    /// The name of the symbol.
    pub name: String,
}

/// Numerical evaluation produced an infinite or undefined value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is undefined", self.expr),
    labels = ["this expression"],
)]
pub struct Undefined {
    /// The expression that could not be evaluated, in printed form.
    pub expr: String,
}

/// Expanding an expression would produce too many terms.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expanding this expression produces more than {} terms", self.limit),
    labels = ["this expression"],
    help = "try writing the equation in a smaller form",
)]
pub struct ExpansionLimit {
    /// The maximum number of terms allowed.
    pub limit: usize,
}

/// A product of polynomials has a degree that is too high.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("multiplying out this expression produces a degree higher than {}", self.limit),
    labels = ["this expression"],
    help = "try writing the equation in a smaller form",
)]
pub struct DegreeLimit {
    /// The maximum total degree allowed.
    pub limit: u32,
}

/// The solver ran out of time.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("solving took longer than {:.1} seconds", self.seconds),
    labels = ["this system"],
    help = "try a smaller system of equations",
)]
pub struct SolveTimeout {
    /// The time limit, in seconds.
    pub seconds: f64,
}

/// The solver explored too many solution branches.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the system has more than {} solution branches", self.limit),
    labels = ["this system"],
    help = "try a smaller system of equations",
)]
pub struct BranchLimit {
    /// The maximum number of branches allowed.
    pub limit: usize,
}

/// The solver needed too many elimination steps.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("solving needed more than {} elimination steps", self.limit),
    labels = ["this system"],
    help = "try a smaller system of equations",
)]
pub struct DepthLimit {
    /// The maximum number of elimination steps allowed.
    pub limit: usize,
}
