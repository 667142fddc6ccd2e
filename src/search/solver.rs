//! Solver entry point.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::engine::BranchAndBound;
use super::incumbent::LocalIncumbent;
use super::limits::SearchLimits;
use super::{SearchStats, SolveResult, SolveStatus};
use crate::config::SolverConfig;
use crate::constructive::{independent_service, nearest_neighbor_service};
use crate::evaluation::RouteEvaluator;
use crate::models::{Instance, Solution};
use crate::propagation::{ConstraintStore, SearchContext};

/// Finds a solution of minimum cost.
///
/// # Examples
///
/// ```
/// use u_splitroute::config::SolverConfig;
/// use u_splitroute::models::{Instance, Truck};
/// use u_splitroute::search::{Solver, SolveStatus};
///
/// // A = 0, A1 = 1, B = 2, B1 = 3. A1 is next to warehouse B.
/// let instance = Instance::from_rows(1, &[
///     vec![0, 100, 100, 50],
///     vec![100, 0, 5, 50],
///     vec![100, 5, 0, 50],
///     vec![50, 50, 50, 0],
/// ]).expect("valid instance");
///
/// let result = Solver::new(SolverConfig::default()).solve(&instance);
/// assert_eq!(result.status, SolveStatus::Optimal);
/// assert_eq!(result.naive_bound, 200);
///
/// let solution = result.solution.expect("feasible");
/// assert_eq!(solution.cost(), 105);
/// assert!(solution.depot().is_some());
/// ```
pub struct Solver {
    config: SolverConfig,
    store: ConstraintStore,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            store: ConstraintStore::new(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves an instance to optimality, or until a configured limit.
    pub fn solve(&self, instance: &Instance) -> SolveResult {
        self.solve_with_cancel(instance, None)
    }

    /// Solves with an optional cancellation flag.
    ///
    /// When the flag is set to `true` the search stops at the next node and
    /// returns the best solution found so far.
    pub fn solve_with_cancel(
        &self,
        instance: &Instance,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SolveResult {
        let start = Instant::now();
        let naive_bound = RouteEvaluator::new(instance).naive_bound();
        let ceiling = self
            .config
            .upper_bound
            .map_or(naive_bound, |bound| bound.min(naive_bound));
        let limits = SearchLimits::from_config(&self.config, start, cancel);
        let incumbent = self.initial_incumbent(instance, ceiling);

        let (best, mut stats, complete) = self.search(instance, &limits, incumbent);
        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        let status = match (complete, best.is_some()) {
            (true, true) => SolveStatus::Optimal,
            (true, false) => SolveStatus::Infeasible,
            (false, true) => SolveStatus::Feasible,
            (false, false) => SolveStatus::Cancelled,
        };
        let result = SolveResult {
            status,
            solution: best,
            stats,
            naive_bound,
        };
        info!(
            status = ?result.status,
            cost = ?result.cost(),
            naive_bound,
            nodes = result.stats.nodes,
            elapsed_ms = result.stats.elapsed_ms,
            "solve finished"
        );
        result
    }

    /// Accepts any solution costing at most `ceiling`, or seeds the
    /// incumbent with a constructive solution when warm start is enabled.
    fn initial_incumbent(&self, instance: &Instance, ceiling: u64) -> LocalIncumbent {
        if self.config.warm_start {
            let seed = [independent_service(instance), nearest_neighbor_service(instance)]
                .into_iter()
                .filter(|solution| solution.cost() <= ceiling)
                .min_by_key(Solution::cost);
            if let Some(solution) = seed {
                return LocalIncumbent::with_solution(solution);
            }
        }
        LocalIncumbent::new(ceiling.saturating_add(1))
    }

    #[cfg(feature = "parallel")]
    fn search(
        &self,
        instance: &Instance,
        limits: &SearchLimits,
        incumbent: LocalIncumbent,
    ) -> (Option<Solution>, SearchStats, bool) {
        if self.config.num_workers > 1 {
            return super::parallel::search(
                instance,
                &self.store,
                limits,
                incumbent,
                self.config.num_workers,
            );
        }
        self.search_sequential(instance, limits, incumbent)
    }

    #[cfg(not(feature = "parallel"))]
    fn search(
        &self,
        instance: &Instance,
        limits: &SearchLimits,
        incumbent: LocalIncumbent,
    ) -> (Option<Solution>, SearchStats, bool) {
        self.search_sequential(instance, limits, incumbent)
    }

    fn search_sequential(
        &self,
        instance: &Instance,
        limits: &SearchLimits,
        incumbent: LocalIncumbent,
    ) -> (Option<Solution>, SearchStats, bool) {
        let mut ctx = SearchContext::new(*instance.registry());
        let mut engine = BranchAndBound::new(instance, &self.store, limits, incumbent);
        let complete = engine.run(&mut ctx);
        let (incumbent, stats) = engine.into_parts();
        (incumbent.into_best(), stats, complete)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
