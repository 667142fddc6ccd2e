//! Branch-and-bound search.
//!
//! The [`Solver`] is the entry point. It seeds an incumbent bound from the
//! naive independent-service cost and runs a depth-first
//! [`BranchAndBound`] over the slot and depot variables:
//!
//! 1. propagate the constraint store to a fixpoint, backtracking on conflict;
//! 2. prune when the lower bound of the partial assignment reaches the bound;
//! 3. otherwise branch on the unfixed variable with the smallest domain,
//!    trying its values in ascending place order with absent last.
//!
//! A complete feasible assignment cheaper than the bound becomes the new
//! incumbent. The search can be stopped cooperatively by [`SearchLimits`].

mod engine;
mod heuristics;
mod incumbent;
mod limits;
#[cfg(feature = "parallel")]
mod parallel;
mod solver;

pub use engine::BranchAndBound;
pub use heuristics::select_variable;
pub use incumbent::{Incumbent, LocalIncumbent, SharedIncumbent};
pub use limits::SearchLimits;
pub use solver::Solver;

use serde::{Deserialize, Serialize};

use crate::models::Solution;

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The search space was exhausted; the solution is optimal.
    Optimal,
    /// The search was stopped early; the solution may be suboptimal.
    Feasible,
    /// The search space was exhausted without a solution.
    Infeasible,
    /// The search was stopped before any solution was found.
    Cancelled,
}

/// Search counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes expanded.
    pub nodes: u64,
    /// Nodes refuted by propagation or the final check.
    pub failures: u64,
    /// Nodes cut off by the bound.
    pub pruned: u64,
    /// Improving solutions found.
    pub solutions: u64,
    /// Wall-clock time of the whole solve.
    pub elapsed_ms: u64,
}

impl SearchStats {
    /// Adds another worker's counters to these (elapsed time excluded).
    pub fn absorb(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.failures += other.failures;
        self.pruned += other.pruned;
        self.solutions += other.solutions;
    }
}

/// Result of a solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResult {
    /// How the search ended.
    pub status: SolveStatus,
    /// Best solution found, if any.
    pub solution: Option<Solution>,
    /// Search counters.
    pub stats: SearchStats,
    /// Cost of the independent-service solution.
    pub naive_bound: u64,
}

impl SolveResult {
    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolveStatus::Optimal | SolveStatus::Feasible)
    }

    /// Whether the solution is proven optimal.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Whether the search stopped early, so a better solution may exist.
    pub fn is_possibly_suboptimal(&self) -> bool {
        matches!(self.status, SolveStatus::Feasible | SolveStatus::Cancelled)
    }

    /// Cost of the solution found.
    pub fn cost(&self) -> Option<u64> {
        self.solution.as_ref().map(Solution::cost)
    }
}
