//! Limits on the work the solver may do.

use crate::error::{kind::{BranchLimit, DepthLimit, SolveTimeout}, Error};
use log::warn;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Budget for solving a system of equations.
///
/// Every root of a polynomial the solver branches on starts a new branch, and every elimination
/// step within a branch counts towards its depth. Running out of either, or out of time, stops
/// the solver with an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveBudget {
    /// Maximum number of branches that can be explored.
    pub max_branches: usize,

    /// Maximum number of elimination steps within one branch.
    pub max_depth: usize,

    /// Maximum time to spend solving, or [`None`] for no limit.
    pub timeout: Option<Duration>,
}

impl Default for SolveBudget {
    fn default() -> Self {
        Self {
            max_branches: 64,
            max_depth: 32,
            timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl SolveBudget {
    /// A budget with no time limit.
    pub fn without_timeout(self) -> Self {
        Self { timeout: None, ..self }
    }
}

/// Tracks the budget spent while solving one system.
#[derive(Debug)]
pub(super) struct Tracker {
    budget: SolveBudget,
    start: Instant,
    branches: usize,
}

impl Tracker {
    pub fn new(budget: SolveBudget) -> Self {
        Self { budget, start: Instant::now(), branches: 1 }
    }

    /// Returns an error if the time limit has passed.
    pub fn check_time(&self) -> Result<(), Error> {
        match self.budget.timeout {
            Some(timeout) if self.start.elapsed() > timeout => {
                warn!("solver stopped after {:?}", timeout);
                Err(Error::unspanned(SolveTimeout { seconds: timeout.as_secs_f64() }))
            },
            _ => Ok(()),
        }
    }

    /// Records that a branch split into `count` branches.
    pub fn split(&mut self, count: usize) -> Result<(), Error> {
        self.branches += count.saturating_sub(1);
        if self.branches > self.budget.max_branches {
            warn!("solver stopped after {} branches", self.budget.max_branches);
            return Err(Error::unspanned(BranchLimit { limit: self.budget.max_branches }));
        }
        Ok(())
    }

    /// Returns an error if a branch has taken more elimination steps than allowed.
    pub fn check_depth(&self, depth: usize) -> Result<(), Error> {
        if depth > self.budget.max_depth {
            warn!("solver stopped after {} elimination steps", self.budget.max_depth);
            return Err(Error::unspanned(DepthLimit { limit: self.budget.max_depth }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget() {
        let budget = SolveBudget::default();
        assert_eq!(budget.max_branches, 64);
        assert_eq!(budget.max_depth, 32);
        assert_eq!(budget.timeout, Some(Duration::from_secs(10)));
        assert_eq!(budget.without_timeout().timeout, None);
    }

    #[test]
    fn branch_limit() {
        let mut tracker = Tracker::new(SolveBudget { max_branches: 4, ..SolveBudget::default() });
        assert!(tracker.split(2).is_ok());
        assert!(tracker.split(3).is_ok());
        let err = tracker.split(2).unwrap_err();
        assert!(err.is::<BranchLimit>());
    }

    #[test]
    fn depth_limit() {
        let tracker = Tracker::new(SolveBudget { max_depth: 2, ..SolveBudget::default() });
        assert!(tracker.check_depth(2).is_ok());
        assert!(tracker.check_depth(3).unwrap_err().is::<DepthLimit>());
    }

    #[test]
    fn timeout() {
        let tracker = Tracker::new(SolveBudget { timeout: Some(Duration::ZERO), ..SolveBudget::default() });
        std::thread::sleep(Duration::from_millis(2));
        assert!(tracker.check_time().unwrap_err().is::<SolveTimeout>());
    }
}
