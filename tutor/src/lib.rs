//! A math tutor that explains how to solve small systems of algebraic equations.
//!
//! The input is a block of text with one equation per line, such as:
//!
//! ```text
//! x + y = 0
//! x - 2*y = 4
//! ```
//!
//! Each equation is simplified and then factored, and every rewrite that changes the equation is
//! recorded as a [`Step`] with a hint for the learner. The rewritten system is then solved for
//! all of its variables, and the solutions are formatted with four significant digits:
//!
//! ```
//! let (steps, solutions) = tutor::solve_system("x + y = 0\nx - 2*y = 4", false);
//! assert_eq!(steps[0].description, "No intermediate steps available");
//! assert_eq!(solutions, "Solution 1:\nx = 1.333\ny = -1.333");
//! ```
//!
//! Errors never escape: malformed input produces a single error step, and the solution display
//! falls back to placeholders for the variables that were found.

pub mod equation;
pub mod error;
pub mod format;
pub mod options;
pub mod step;
pub mod variables;

use equation::Equation;
use error::TutorError;
use log::{debug, trace};
use options::TutorOptions;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tutor_compute::symbolic::{factor::factor_with_steps, simplify::simplify_with_steps, solve::solve, SymExpr};
use variables::VariableSet;

pub use options::TutorOptionsBuilder;
pub use step::Step;

/// The explanation of a system of equations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Explanation {
    /// The rewrites applied to the equations, in order. Never empty.
    pub steps: Vec<Step>,

    /// The formatted solutions. Never empty.
    pub solution_display: String,
}

/// Explains and solves the system of equations in `text`, one equation per line.
///
/// If `real_only` is true, solutions with a nonzero imaginary part are hidden.
pub fn solve_system(text: &str, real_only: bool) -> (Vec<Step>, String) {
    let options = TutorOptionsBuilder::new().real_only(real_only).build();
    let Explanation { steps, solution_display } = explain(text, &options);
    (steps, solution_display)
}

/// Explains and solves the system of equations in `text` with the given options.
pub fn explain(text: &str, options: &TutorOptions) -> Explanation {
    explain_with_error(text, options).0
}

/// Like [`explain`], but also returns the error that the explanation's error step describes.
pub fn explain_with_error(text: &str, options: &TutorOptions) -> (Explanation, Option<TutorError>) {
    let mut variables = VariableSet::new();
    match try_explain(text, options, &mut variables) {
        Ok(explanation) => (explanation, None),
        Err(err) => {
            debug!("explanation failed: {}", err);
            let explanation = Explanation {
                steps: vec![Step::error(&err)],
                solution_display: format::display_unsolved(&variables, options),
            };
            (explanation, Some(err))
        },
    }
}

/// Parses every non-blank line of the input. Variables are added to `variables` as each line is
/// parsed, so that they are known even if a later line fails.
pub fn parse_system(text: &str, variables: &mut VariableSet) -> Result<Vec<Equation>, TutorError> {
    let mut equations = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let equation = Equation::parse(idx + 1, line)?;
        variables.extend(equation.free_symbols());
        equations.push(equation);
    }
    Ok(equations)
}

/// Simplifies and factors one equation, returning the expression that must vanish.
fn rewrite(equation: &Equation, steps: &mut Vec<Step>) -> Result<SymExpr, TutorError> {
    let raw = equation.difference();
    let (simplified, rules) = simplify_with_steps(&raw)?;
    for rule in &rules {
        trace!("simplify `{}`: {}", raw, rule);
    }
    let simplified_changed = simplified.to_string() != raw.to_string();
    if simplified_changed {
        steps.push(Step::simplified(equation, &simplified));
    }

    let (factored, rules) = factor_with_steps(&simplified)?;
    for rule in &rules {
        trace!("factor `{}`: {}", simplified, rule);
    }
    if factored.to_string() != simplified.to_string() {
        steps.push(Step::factored(&simplified, &factored));
        Ok(factored)
    } else if simplified_changed {
        Ok(simplified)
    } else {
        Ok(raw)
    }
}

fn try_explain(text: &str, options: &TutorOptions, variables: &mut VariableSet) -> Result<Explanation, TutorError> {
    let equations = parse_system(text, variables)?;
    debug!("parsed {} equations in {} variables", equations.len(), variables.len());

    let mut steps = Vec::new();
    let rewritten = equations.iter()
        .map(|equation| rewrite(equation, &mut steps))
        .collect::<Result<Vec<_>, _>>()?;
    if steps.is_empty() {
        steps.push(Step::placeholder());
    }
    debug!("recorded {} steps", steps.len());

    let solutions = if rewritten.is_empty() {
        Vec::new()
    } else {
        solve(&rewritten, variables.as_slice(), options.budget)?
    };
    debug!("found {} solutions", solutions.len());

    Ok(Explanation {
        steps,
        solution_display: format::display_solutions(&solutions, variables, options),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tutor_compute::symbolic::solve::SolveBudget;
    use super::*;

    fn descriptions(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|step| step.description.as_str()).collect()
    }

    #[test]
    fn single_equation() {
        let (steps, display) = solve_system("x - 4 = 0", false);
        assert_eq!(steps, vec![Step::placeholder()]);
        assert_eq!(display, "Solution 1:\nx = 4.000");
    }

    #[test]
    fn linear_system() {
        let (steps, display) = solve_system("x + y = 0\nx - 2*y = 4", true);
        assert_eq!(descriptions(&steps), vec!["No intermediate steps available"]);
        assert_eq!(display, "Solution 1:\nx = 1.333\ny = -1.333");
    }

    #[test]
    fn simplify_and_factor_steps() {
        let (steps, display) = solve_system("x + x = 4", false);
        assert_eq!(descriptions(&steps), vec![
            "Simplified: x + x = 4 → 2*x - 4 = 0",
            "Factored: 2*x - 4 → 2*(x - 2) = 0",
        ]);
        assert_eq!(steps[0].hint, "We simplified the equation to make it easier to solve.");
        assert_eq!(steps[1].hint, "We factored the expression to find the roots more easily.");
        assert_eq!(display, "Solution 1:\nx = 2.000");
    }

    #[test]
    fn steps_follow_equation_order() {
        let (steps, display) = solve_system("x + x = 4\ny**2 = 9", false);
        assert_eq!(descriptions(&steps), vec![
            "Simplified: x + x = 4 → 2*x - 4 = 0",
            "Factored: 2*x - 4 → 2*(x - 2) = 0",
            "Factored: y**2 - 9 → (y - 3)*(y + 3) = 0",
        ]);
        assert_eq!(display.matches("Solution").count(), 2);

        let (steps, _) = solve_system("y**2 = 9\nx + x = 4", false);
        assert_eq!(descriptions(&steps), vec![
            "Factored: y**2 - 9 → (y - 3)*(y + 3) = 0",
            "Simplified: x + x = 4 → 2*x - 4 = 0",
            "Factored: 2*x - 4 → 2*(x - 2) = 0",
        ]);
    }

    #[test]
    fn factor_only() {
        let (steps, display) = solve_system("x**2 - 1", false);
        assert_eq!(descriptions(&steps), vec!["Factored: x**2 - 1 → (x - 1)*(x + 1) = 0"]);
        assert_eq!(display, "Solution 1:\nx = -1.000\n\nSolution 2:\nx = 1.000");
    }

    #[test]
    fn real_only_hides_complex_roots() {
        let (_, display) = solve_system("x**2 + 1 = 0", true);
        assert_eq!(display, "Solution 1:\nx = __\n\nSolution 2:\nx = __");

        let (_, display) = solve_system("x**2 + 1 = 0", false);
        assert_eq!(display, "Solution 1:\nx = -1.000i\n\nSolution 2:\nx = 1.000i");
    }

    #[test]
    fn blank_lines_are_ignored() {
        let (_, display) = solve_system("\n  \nx - 4 = 0\n\n", false);
        assert_eq!(display, "Solution 1:\nx = 4.000");
    }

    #[test]
    fn malformed_input() {
        let (steps, display) = solve_system("x +* 2", false);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].description.starts_with("Error: "));
        assert_eq!(steps[0].hint, "");
        assert_eq!(display, "No solutions found.");
    }

    #[test]
    fn error_keeps_collected_variables() {
        let (steps, display) = solve_system("x + y = 1\ny = (2", false);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].description.contains("line 2"));
        assert_eq!(display, "x = __\ny = __");
    }

    #[test]
    fn algebra_error() {
        let (steps, display) = solve_system("x = 1/0", false);
        assert_eq!(descriptions(&steps), vec!["Error: division by zero"]);
        assert_eq!(display, "x = __");
    }

    #[test]
    fn error_is_returned_alongside_explanation() {
        let options = TutorOptions::default();
        let (explanation, err) = explain_with_error("x = 1\n2*x = (3", &options);
        assert!(matches!(err, Some(TutorError::Parse { line: 2, .. })));
        assert_eq!(explanation, explain("x = 1\n2*x = (3", &options));

        let (_, err) = explain_with_error("x = 1", &options);
        assert!(err.is_none());
    }

    #[test]
    fn huge_degrees_degrade() {
        let (steps, display) = solve_system("x**2000000000 - 1 = 0", false);
        assert_eq!(steps.len(), 1);
        assert!(display.contains("x = "));

        let (steps, display) = solve_system("x**200*x**200 = 1", false);
        assert_eq!(descriptions(&steps), vec!["Error: multiplying out this expression produces a degree higher than 256"]);
        assert_eq!(display, "x = __");
    }

    #[test]
    fn empty_input() {
        let (steps, display) = solve_system("", false);
        assert_eq!(steps, vec![Step::placeholder()]);
        assert_eq!(display, "No solutions found.");
    }

    #[test]
    fn no_solutions() {
        let (_, display) = solve_system("x + 1 = x", false);
        assert_eq!(display, "x = __");
    }

    #[test]
    fn free_variable() {
        let (_, display) = solve_system("x + y = 1", false);
        assert_eq!(display, "Solution 1:\nx = -y + 1\ny = __");
    }

    #[test]
    fn variable_order_is_first_seen() {
        let (_, display) = solve_system("y = 2\nx = y + 1", false);
        assert_eq!(display, "Solution 1:\ny = 2.000\nx = 3.000");
    }

    #[test]
    fn budget_exhaustion_degrades() {
        let options = TutorOptionsBuilder::new()
            .budget(SolveBudget { max_branches: 1, ..SolveBudget::default() })
            .build();
        let explanation = explain("x**2 - 1", &options);
        assert_eq!(explanation.steps.len(), 1);
        assert!(explanation.steps[0].description.starts_with("Error: "));
        assert_eq!(explanation.solution_display, "x = __");
    }

    #[test]
    fn repeatable() {
        let text = "x**2 + y**2 = 5\nx*y = 2";
        assert_eq!(solve_system(text, true), solve_system(text, true));
        let (_, display) = solve_system(text, true);
        assert_eq!(display.matches("Solution").count(), 4);
    }
}
