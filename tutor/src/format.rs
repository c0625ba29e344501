//! Display of the solutions of a system.
//!
//! Each solution is written as a block:
//!
//! ```text
//! Solution 1:
//! x = 1.333
//! y = -1.333
//! ```
//!
//! with one line per variable, in the order the variables were first seen, and blocks
//! separated by a blank line.

use tutor_compute::symbolic::solve::{Solution, SolutionValue};
use super::options::TutorOptions;
use super::variables::VariableSet;

/// Displayed when the system has no variables to show.
pub const NO_SOLUTIONS: &str = "No solutions found.";

/// What is shown for one variable of one solution.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    /// The solution leaves the variable free.
    Unassigned,

    /// The value is complex and only real values are shown.
    Filtered,

    /// The value to show.
    Value(SolutionValue),
}

impl DisplayValue {
    /// Decides what to show for `var` in the given solution.
    ///
    /// In real-only mode, numbers with a nonzero imaginary part are filtered out, and the real
    /// part of the rest is shown. Symbolic values can't be classified and are always shown.
    pub fn new(solution: &Solution, var: &str, real_only: bool) -> Self {
        match solution.get(var) {
            None => Self::Unassigned,
            Some(SolutionValue::Number(n)) if real_only => {
                if n.is_real() {
                    Self::Value(SolutionValue::Number(n.to_real()))
                } else {
                    Self::Filtered
                }
            },
            Some(value) => Self::Value(value.clone()),
        }
    }

    /// Renders the value with the given options.
    pub fn render(&self, options: &TutorOptions) -> String {
        match self {
            Self::Unassigned | Self::Filtered => options.placeholder.clone(),
            Self::Value(value) => value.fmt_with(options.format_options()).to_string(),
        }
    }
}

/// Formats the solutions of a system.
///
/// Without solutions, every variable is shown with the placeholder, as it is when the system
/// could not be solved at all.
pub fn display_solutions(solutions: &[Solution], variables: &VariableSet, options: &TutorOptions) -> String {
    if solutions.is_empty() || variables.is_empty() {
        return display_unsolved(variables, options);
    }

    solutions.iter()
        .enumerate()
        .map(|(idx, solution)| {
            let mut block = vec![format!("Solution {}:", idx + 1)];
            block.extend(variables.iter().map(|var| {
                let value = DisplayValue::new(solution, var, options.real_only);
                format!("{} = {}", var, value.render(options))
            }));
            block.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Shows every variable with the placeholder, or [`NO_SOLUTIONS`] if there are none.
pub fn display_unsolved(variables: &VariableSet, options: &TutorOptions) -> String {
    if variables.is_empty() {
        return NO_SOLUTIONS.to_string();
    }

    variables.iter()
        .map(|var| format!("{} = {}", var, options.placeholder))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tutor_compute::numerical::Number;
    use tutor_compute::primitive::{complex, rational};
    use tutor_compute::symbolic::SymExpr;
    use super::*;
    use super::super::options::TutorOptionsBuilder;

    fn variables(names: &[&str]) -> VariableSet {
        let mut vars = VariableSet::new();
        vars.extend(names.iter().map(|name| name.to_string()));
        vars
    }

    fn exact(n: (i32, i32)) -> SolutionValue {
        SolutionValue::Number(Number::Rational(rational(n)))
    }

    fn approx(re: f64, im: f64) -> SolutionValue {
        SolutionValue::Number(Number::Complex(complex((re, im))))
    }

    #[test]
    fn blocks() {
        let solutions = vec![
            Solution::new(vec![("x".to_string(), exact((-1, 2)))]),
            Solution::new(vec![("x".to_string(), exact((7, 1))), ("y".to_string(), exact((1, 3)))]),
        ];
        let display = display_solutions(&solutions, &variables(&["x", "y"]), &TutorOptions::default());
        assert_eq!(display, "Solution 1:\nx = -0.5000\ny = __\n\nSolution 2:\nx = 7.000\ny = 0.3333");
    }

    #[test]
    fn real_only_filter() {
        let solution = Solution::new(vec![
            ("x".to_string(), approx(1.5, 2.0)),
            ("y".to_string(), approx(-2.0, 0.0)),
        ]);
        let real_only = TutorOptionsBuilder::new().real_only(true).build();
        let display = display_solutions(&[solution.clone()], &variables(&["x", "y"]), &real_only);
        assert_eq!(display, "Solution 1:\nx = __\ny = -2.000");

        let display = display_solutions(&[solution], &variables(&["x", "y"]), &TutorOptions::default());
        assert_eq!(display, "Solution 1:\nx = 1.500 + 2.000i\ny = -2.000");
    }

    #[test]
    fn symbolic_values_are_shown() {
        let solution = Solution::new(vec![
            ("x".to_string(), SolutionValue::Expr(SymExpr::symbol("y").recip())),
        ]);
        let real_only = TutorOptionsBuilder::new().real_only(true).build();
        let display = display_solutions(&[solution], &variables(&["x", "y"]), &real_only);
        assert_eq!(display, "Solution 1:\nx = 1/y\ny = __");
    }

    #[test]
    fn unsolved() {
        let options = TutorOptionsBuilder::new().placeholder("?").build();
        assert_eq!(display_solutions(&[], &variables(&["a", "b"]), &options), "a = ?\nb = ?");
        assert_eq!(display_solutions(&[], &variables(&[]), &options), NO_SOLUTIONS);
        assert_eq!(display_solutions(&[Solution::default()], &variables(&[]), &options), NO_SOLUTIONS);
    }
}
