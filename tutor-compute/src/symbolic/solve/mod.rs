//! Solving systems of polynomial equations.
//!
//! Each equation is converted into a [`RationalFunction`]: its numerator must vanish and its
//! denominator must not. The numerators are then reduced one variable at a time, exploring one
//! branch per root whenever a polynomial in a single variable is solved:
//!
//! 1. Polynomials that became zero are dropped. A nonzero constant means the branch has no
//!    solution.
//! 2. A variable that appears linearly with a constant coefficient is substituted away.
//! 3. A polynomial in a single variable is solved, exactly where possible (see [`roots`]).
//! 4. A variable shared by several polynomials is eliminated with resultants. The polynomial
//!    used for elimination is set aside and solved once the rest of the system is, and the
//!    polynomials it replaced are checked against the final solution.
//! 5. A variable that appears in a single polynomial, to degree one or two, is solved in terms
//!    of the other variables.
//!
//! If none of these apply, the system has no closed form that this solver can find, and no
//! solutions are returned.

mod budget;
mod resultant;
mod roots;
mod solution;

pub use budget::SolveBudget;
pub use solution::{Solution, SolutionValue};

use budget::Tracker;
use crate::consts::{E, I, PI};
use crate::error::Error;
use crate::numerical::{eval, Number};
use crate::primitive::complex;
use log::{debug, trace};
use rug::{Complex, Rational};
use std::collections::HashMap;
use super::polynomial::{Coefficient, Indeterminate, Monomial, Polynomial};
use super::rational::RationalFunction;
use super::simplify::simplify;
use super::{Primary, SymExpr};

type Poly = Polynomial<Number>;

/// The value a branch has assigned to a variable.
#[derive(Debug, Clone)]
enum Binding {
    /// A polynomial in the variables that are not yet bound.
    Value(Poly),

    /// An expression in variables the branch leaves free.
    Expr(SymExpr),
}

/// What a single step did to a branch.
enum Progress {
    /// The branch changed and should be stepped again.
    Continue,

    /// The branch split into one branch per root.
    Split(Vec<Branch>),

    /// The branch has no solution.
    Dead,

    /// Every polynomial of the branch has been solved.
    Done,

    /// No step applies to the branch.
    NoClosedForm,
}

/// One branch of the search for solutions.
#[derive(Debug, Clone, Default)]
struct Branch {
    /// Polynomials that must vanish.
    polys: Vec<Poly>,

    /// Polynomials set aside after eliminating one of their variables.
    held: Vec<Poly>,

    /// Polynomials replaced by resultants, which the solution must still satisfy.
    checks: Vec<Poly>,

    /// Denominators that must not vanish.
    nonzero: Vec<Poly>,

    /// Values assigned so far, in order of assignment.
    bindings: Vec<(String, Binding)>,

    /// The number of elimination steps taken.
    depth: usize,
}

impl Branch {
    fn step(&mut self, variables: &[String], tracker: &mut Tracker) -> Result<Progress, Error> {
        tracker.check_depth(self.depth)?;

        self.polys.retain(|poly| !poly.is_zero());
        self.held.retain(|poly| !poly.is_zero());
        self.checks.retain(|poly| !poly.is_zero());
        if self.polys.iter().chain(&self.held).chain(&self.checks).any(Poly::is_constant)
            || self.nonzero.iter().any(Poly::is_zero)
        {
            return Ok(Progress::Dead);
        }

        if self.polys.is_empty() {
            return Ok(match self.held.pop() {
                Some(poly) => {
                    self.polys.push(poly);
                    Progress::Continue
                },
                None => Progress::Done,
            });
        }

        let linear = variables.iter().find_map(|name| {
            let var = Indeterminate::symbol(name.as_str());
            self.polys.iter()
                .enumerate()
                .find_map(|(index, poly)| linear_solution(poly, &var).map(|value| (name, index, value)))
        });
        if let Some((name, index, value)) = linear {
            trace!("substitute {} = {}", name, value.to_expr());
            self.polys.remove(index);
            self.bind_value(name, value);
            self.depth += 1;
            return Ok(Progress::Continue);
        }

        if let Some((index, name)) = self.univariate(variables) {
            let poly = self.polys.remove(index);
            let var = Indeterminate::symbol(name.as_str());
            let coeffs = poly.coefficients_in(&var)
                .iter()
                .map(|c| c.as_constant().unwrap_or_else(Number::zero))
                .collect::<Vec<_>>();
            let roots = roots::roots(&coeffs, tracker)?;
            trace!("{} has {} roots in {}", poly.to_expr(), roots.len(), name);
            tracker.split(roots.len())?;

            let children = roots.into_iter()
                .map(|root| {
                    let mut child = self.clone();
                    child.bind_value(&name, Poly::constant(root));
                    child.depth += 1;
                    child
                })
                .collect();
            return Ok(Progress::Split(children));
        }

        for name in variables {
            let var = Indeterminate::symbol(name.as_str());
            let containing = self.containing(&var);
            let Some(&pivot_index) = containing.iter().min_by_key(|&&i| self.polys[i].degree_in(&var)) else {
                continue;
            };
            if containing.len() < 2 {
                continue;
            }

            let pivot = self.polys[pivot_index].clone();
            let mut eliminated = Vec::with_capacity(containing.len() - 1);
            for &index in containing.iter().filter(|&&index| index != pivot_index) {
                match resultant::resultant(&pivot, &self.polys[index], &var) {
                    Some(res) => eliminated.push((index, res)),
                    None => return Ok(Progress::NoClosedForm),
                }
            }

            trace!("eliminate {} using {}", name, pivot.to_expr());
            for (index, res) in eliminated {
                let replaced = std::mem::replace(&mut self.polys[index], res);
                self.checks.push(replaced);
            }
            self.polys.remove(pivot_index);
            self.held.push(pivot);
            self.depth += 1;
            return Ok(Progress::Continue);
        }

        for name in variables {
            let var = Indeterminate::symbol(name.as_str());
            let containing = self.containing(&var);
            let [index] = containing.as_slice() else {
                continue;
            };
            if self.held.iter().chain(&self.checks).any(|poly| poly.contains(&var)) {
                continue;
            }

            let coeffs = self.polys[*index].coefficients_in(&var);
            match coeffs.as_slice() {
                [c0, c1] => {
                    let value = linear_expr(c0, c1);
                    trace!("solve for {} = {}", name, value);
                    self.nonzero.push(c1.clone());
                    self.polys.remove(*index);
                    self.bindings.push((name.clone(), Binding::Expr(value)));
                    self.depth += 1;
                    return Ok(Progress::Continue);
                },
                [c0, c1, c2] if c2.is_constant() => {
                    tracker.split(2)?;
                    self.polys.remove(*index);
                    let children = quadratic_exprs(c0, c1, c2)
                        .into_iter()
                        .map(|value| {
                            trace!("solve for {} = {}", name, value);
                            let mut child = self.clone();
                            child.bindings.push((name.clone(), Binding::Expr(value)));
                            child.depth += 1;
                            child
                        })
                        .collect();
                    return Ok(Progress::Split(children));
                },
                _ => {},
            }
        }

        Ok(Progress::NoClosedForm)
    }

    /// Returns the indices of the polynomials containing `var`.
    fn containing(&self, var: &Indeterminate) -> Vec<usize> {
        self.polys.iter()
            .enumerate()
            .filter(|(_, poly)| poly.contains(var))
            .map(|(index, _)| index)
            .collect()
    }

    /// Finds the lowest-degree polynomial whose only indeterminate is one of the variables.
    fn univariate(&self, variables: &[String]) -> Option<(usize, String)> {
        self.polys.iter()
            .enumerate()
            .filter_map(|(index, poly)| {
                let vars = poly.indeterminates();
                match vars.iter().next() {
                    Some(var @ Indeterminate::Symbol(name)) if vars.len() == 1 && variables.contains(name) => {
                        Some((index, name.clone(), poly.degree_in(var)))
                    },
                    _ => None,
                }
            })
            .min_by_key(|(_, _, degree)| *degree)
            .map(|(index, name, _)| (index, name))
    }

    /// Assigns `value` to the variable `name`, substituting it everywhere.
    fn bind_value(&mut self, name: &str, value: Poly) {
        let var = Indeterminate::symbol(name);
        let polys = self.polys.iter_mut()
            .chain(self.held.iter_mut())
            .chain(self.checks.iter_mut())
            .chain(self.nonzero.iter_mut());
        for poly in polys {
            *poly = poly.substitute(&var, &value);
        }

        let value_expr = value.to_expr();
        for (_, binding) in &mut self.bindings {
            match binding {
                Binding::Value(poly) => *poly = poly.substitute(&var, &value),
                Binding::Expr(expr) => *expr = expr.substitute(name, &value_expr),
            }
        }
        self.bindings.push((name.to_string(), Binding::Value(value)));
    }

    /// Resolves the bindings of a finished branch into a [`Solution`], or returns [`None`] if
    /// the values make a denominator vanish or fail a check.
    fn finish(self, variables: &[String]) -> Option<Solution> {
        // later bindings never refer to earlier ones
        let mut resolved: Vec<(String, SolutionValue)> = Vec::with_capacity(self.bindings.len());
        for (name, binding) in self.bindings.into_iter().rev() {
            let mut expr = match binding {
                Binding::Value(poly) => match poly.as_constant() {
                    Some(n) => {
                        resolved.push((name, SolutionValue::Number(n.clean())));
                        continue;
                    },
                    None => poly.to_expr(),
                },
                Binding::Expr(expr) => expr,
            };
            for (other, value) in &resolved {
                let value = match value {
                    SolutionValue::Number(n) => n.to_expr(),
                    SolutionValue::Expr(expr) => expr.clone(),
                };
                expr = expr.substitute(other, &value);
            }
            resolved.push((name, resolve_expr(expr)?));
        }

        let values = resolved.iter()
            .filter_map(|(name, value)| Some((name.clone(), value.as_number()?.to_complex())))
            .collect::<HashMap<_, _>>();
        let vanishes = |poly: &Poly| eval(&poly.to_expr(), &values)
            .ok()
            .map(|value| Number::Complex(value).is_zero());
        if self.checks.iter().any(|check| vanishes(check) == Some(false))
            || self.nonzero.iter().any(|den| vanishes(den) == Some(true))
        {
            return None;
        }

        let bindings = variables.iter()
            .filter_map(|name| {
                let (_, value) = resolved.iter().find(|(var, _)| var == name)?;
                Some((name.clone(), value.clone()))
            })
            .collect();
        Some(Solution::new(bindings))
    }
}

/// If `var` appears linearly in `poly` with a constant coefficient, returns the value of `var`
/// that makes `poly` vanish.
fn linear_solution(poly: &Poly, var: &Indeterminate) -> Option<Poly> {
    if poly.degree_in(var) != 1 {
        return None;
    }
    let coeffs = poly.coefficients_in(var);
    let inverse = Number::one().quotient(&coeffs[1].as_constant()?)?;
    Some(coeffs[0].scale(&inverse.neg()))
}

/// Returns `-c0 / c1` as a simplified expression.
fn linear_expr(c0: &Poly, c1: &Poly) -> SymExpr {
    match (exact(c0), exact(c1)) {
        (Some(num), Some(den)) => RationalFunction { num: num.neg(), den }
            .normalize(&mut ())
            .to_expr(),
        _ => -c0.to_expr() * c1.to_expr().recip(),
    }
}

/// Returns both roots `(-b ± sqrt(b^2 - 4ac)) / 2a` of `a*x^2 + b*x + c`.
fn quadratic_exprs(c: &Poly, b: &Poly, a: &Poly) -> [SymExpr; 2] {
    let four = Number::Rational(Rational::from(4));
    let two = Number::Rational(Rational::from(2));
    let discriminant = b.mul(b).sub(&a.mul(c).scale(&four));
    let all_exact = [a, b, c].iter().all(|poly| exact(poly).is_some());

    let root = |sign: bool| {
        let sqrt = discriminant.to_expr().sqrt();
        let numerator = b.neg().to_expr() + if sign { sqrt } else { -sqrt };
        let expr = numerator * a.scale(&two).to_expr().recip();
        if all_exact {
            simplify(&expr).unwrap_or(expr)
        } else {
            expr
        }
    };
    [root(false), root(true)]
}

/// Converts a polynomial with only exact coefficients into a rational polynomial.
fn exact(poly: &Poly) -> Option<Polynomial<Rational>> {
    let mut exact = Polynomial::zero();
    for (monomial, c) in poly.terms() {
        match c {
            Number::Rational(r) => exact.add_term(monomial.clone(), r.clone()),
            Number::Complex(_) => return None,
        }
    }
    Some(exact)
}

/// Evaluates an expression without free variables into a number, exactly if possible. Returns
/// [`None`] if it is undefined.
fn resolve_expr(expr: SymExpr) -> Option<SolutionValue> {
    if expr.has_free_symbols() {
        return Some(SolutionValue::Expr(simplify(&expr).unwrap_or(expr)));
    }

    if !contains_float(&expr) {
        let exact = RationalFunction::from_expr(&expr, &mut ()).ok()?.as_constant();
        if let Some(exact) = exact {
            return Some(SolutionValue::Number(Number::Rational(exact)));
        }
    }
    let value = eval(&expr, &HashMap::new()).ok()?;
    Some(SolutionValue::Number(Number::Complex(value).clean()))
}

fn contains_float(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Float(_)) => true,
        SymExpr::Primary(Primary::Call(_, args)) => args.iter().any(contains_float),
        SymExpr::Primary(_) => false,
        SymExpr::Add(children) | SymExpr::Mul(children) => children.iter().any(contains_float),
        SymExpr::Exp(base, exp) => contains_float(base) || contains_float(exp),
    }
}

/// The value of a named constant.
fn constant_value(name: &str) -> Option<Complex> {
    match name {
        "pi" => Some(complex(&*PI)),
        "E" => Some(complex(&*E)),
        "I" => Some(I.clone()),
        _ => None,
    }
}

/// Converts a rational polynomial into a polynomial in the variables, evaluating constants and
/// atoms without variables. Symbols that are not variables are kept as parameters.
///
/// Returns [`None`] if a variable appears inside an atom, such as `sin(x)`.
fn lift(poly: &Polynomial<Rational>, variables: &[String]) -> Result<Option<Poly>, Error> {
    let mut lifted = Poly::zero();
    for (monomial, c) in poly.terms() {
        let mut term = Poly::constant(Number::Rational(c.clone()));
        for (var, exp) in monomial.factors() {
            let value = match var {
                Indeterminate::Symbol(name) if variables.contains(name) => None,
                Indeterminate::Symbol(name) => constant_value(name),
                Indeterminate::Atom(atom) => {
                    let symbols = atom.expr.free_symbols();
                    if symbols.iter().any(|symbol| variables.contains(symbol)) {
                        return Ok(None);
                    }
                    if symbols.is_empty() {
                        Some(eval(&atom.expr, &HashMap::new())?)
                    } else {
                        None
                    }
                },
            };
            term = match value {
                Some(value) => term.scale(&Number::Complex(value).pow(*exp)),
                None => term.mul_monomial(&Monomial::var(var.clone(), *exp)),
            };
        }
        lifted = lifted.add(&term);
    }
    Ok(Some(lifted))
}

/// Solves the system of equations `equations[i] = 0` for the given variables.
///
/// Solutions are ordered by the values of the variables, in order. Variables a solution leaves
/// free are unassigned in it. If the system has no closed-form solution, an empty list is
/// returned; errors are reserved for invalid expressions and exceeding the [`SolveBudget`].
pub fn solve(equations: &[SymExpr], variables: &[String], budget: SolveBudget) -> Result<Vec<Solution>, Error> {
    debug!("solving {} equations for {:?}", equations.len(), variables);

    let mut root = Branch::default();
    for equation in equations {
        let rf = RationalFunction::from_expr(equation, &mut ())?.normalize(&mut ());
        let Some(num) = lift(&rf.num, variables)? else {
            debug!("`{}` is not a polynomial in the variables", equation);
            return Ok(Vec::new());
        };
        root.polys.push(num);

        if !rf.den.is_constant() {
            let Some(den) = lift(&rf.den, variables)? else {
                debug!("`{}` is not a polynomial in the variables", equation);
                return Ok(Vec::new());
            };
            root.nonzero.push(den);
        }
    }

    let mut tracker = Tracker::new(budget);
    let mut stack = vec![root];
    let mut solutions: Vec<Solution> = Vec::new();
    while let Some(mut branch) = stack.pop() {
        tracker.check_time()?;
        match branch.step(variables, &mut tracker)? {
            Progress::Continue => stack.push(branch),
            Progress::Split(children) => stack.extend(children.into_iter().rev()),
            Progress::Dead => {},
            Progress::Done => {
                if let Some(solution) = branch.finish(variables) {
                    if !solutions.iter().any(|existing| existing.approx_eq(&solution)) {
                        solutions.push(solution);
                    }
                }
            },
            Progress::NoClosedForm => {
                debug!("no closed form");
                return Ok(Vec::new());
            },
        }
    }

    solutions.sort_by(|a, b| a.order(b, variables));
    debug!("found {} solutions", solutions.len());
    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::BranchLimit;
    use crate::primitive::rational;
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use tutor_parser::parser::{ast::Expr as AstExpr, Parser};

    fn parse(source: &str) -> SymExpr {
        SymExpr::from(Parser::new(source).try_parse_full::<AstExpr>().unwrap())
    }

    fn solve_str(equations: &[&str], variables: &[&str]) -> Vec<Solution> {
        let equations = equations.iter().map(|eq| parse(eq)).collect::<Vec<_>>();
        let variables = variables.iter().map(|var| var.to_string()).collect::<Vec<_>>();
        solve(&equations, &variables, SolveBudget::default()).unwrap()
    }

    fn exact(n: i32, d: i32) -> Option<SolutionValue> {
        Some(SolutionValue::Number(Number::Rational(rational((n, d)))))
    }

    #[test]
    fn single_linear() {
        let solutions = solve_str(&["x - 4"], &["x"]);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("x").cloned(), exact(4, 1));
    }

    #[test]
    fn linear_system() {
        let solutions = solve_str(&["x + y", "x - 2*y - 4"], &["x", "y"]);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("x").cloned(), exact(4, 3));
        assert_eq!(solutions[0].get("y").cloned(), exact(-4, 3));
    }

    #[test]
    fn quadratic() {
        let solutions = solve_str(&["x**2 - 4"], &["x"]);
        let values = solutions.iter().map(|s| s.get("x").cloned()).collect::<Vec<_>>();
        assert_eq!(values, vec![exact(-2, 1), exact(2, 1)]);
    }

    #[test]
    fn complex_roots() {
        let solutions = solve_str(&["x**2 + 1"], &["x"]);
        assert_eq!(solutions.len(), 2);
        let imag = solutions.iter()
            .map(|s| s.get("x").and_then(SolutionValue::as_number).unwrap().imag_part().to_f64())
            .collect::<Vec<_>>();
        assert_float_absolute_eq!(imag[0], -1.0);
        assert_float_absolute_eq!(imag[1], 1.0);
    }

    #[test]
    fn nonlinear_system() {
        let solutions = solve_str(&["x**2 + y**2 - 5", "x*y - 2"], &["x", "y"]);
        let pairs = solutions.iter()
            .map(|s| (s.get("x").cloned(), s.get("y").cloned()))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![
            (exact(-2, 1), exact(-1, 1)),
            (exact(-1, 1), exact(-2, 1)),
            (exact(1, 1), exact(2, 1)),
            (exact(2, 1), exact(1, 1)),
        ]);
    }

    #[test]
    fn inconsistent() {
        assert!(solve_str(&["x + 1", "x + 2"], &["x"]).is_empty());
        assert!(solve_str(&["1/x"], &["x"]).is_empty());
    }

    #[test]
    fn no_constraints() {
        let solutions = solve_str(&["x - x"], &["x"]);
        assert_eq!(solutions, vec![Solution::default()]);
    }

    #[test]
    fn underdetermined() {
        let solutions = solve_str(&["x + y - 1"], &["x", "y"]);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("x").map(ToString::to_string), Some("-y + 1".to_string()));
        assert_eq!(solutions[0].get("y"), None);

        let solutions = solve_str(&["x*y - 1"], &["x", "y"]);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("x").map(ToString::to_string), Some("1/y".to_string()));
    }

    #[test]
    fn denominators() {
        let solutions = solve_str(&["x/(x - 1)"], &["x"]);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].get("x").cloned(), exact(0, 1));
    }

    #[test]
    fn constants() {
        let solutions = solve_str(&["x - pi"], &["x"]);
        let x = solutions[0].get("x").and_then(SolutionValue::as_number).unwrap();
        assert_float_absolute_eq!(x.real_part().to_f64(), std::f64::consts::PI);
    }

    #[test]
    fn no_closed_form() {
        assert!(solve_str(&["sin(x) - 1"], &["x"]).is_empty());
    }

    #[test]
    fn branch_limit() {
        let equations = [parse("x**5 - 1")];
        let budget = SolveBudget { max_branches: 3, ..SolveBudget::default() };
        let err = solve(&equations, &["x".to_string()], budget).unwrap_err();
        assert!(err.is::<BranchLimit>());
    }
}
