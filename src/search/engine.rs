//! Depth-first branch-and-bound.

use tracing::{debug, trace};

use super::heuristics::select_variable;
use super::incumbent::Incumbent;
use super::limits::SearchLimits;
use super::SearchStats;
use crate::evaluation::RouteEvaluator;
use crate::models::Instance;
use crate::propagation::{CheckStatus, ConstraintStore, SearchContext, Var};

/// Explores the assignments below a search state.
///
/// Each node propagates the constraint store, compares the lower bound of
/// the partial assignment against the incumbent and, unless pruned,
/// branches on [`select_variable`]. Values are tried in [`Domain::iter`]
/// order. All changes made below a node are rewound before returning.
///
/// [`Domain::iter`]: crate::propagation::Domain::iter
pub struct BranchAndBound<'a, I: Incumbent> {
    store: &'a ConstraintStore,
    evaluator: RouteEvaluator<'a>,
    limits: &'a SearchLimits,
    incumbent: I,
    stats: SearchStats,
    stopped: bool,
}

impl<'a, I: Incumbent> BranchAndBound<'a, I> {
    pub fn new(
        instance: &'a Instance,
        store: &'a ConstraintStore,
        limits: &'a SearchLimits,
        incumbent: I,
    ) -> Self {
        Self {
            store,
            evaluator: RouteEvaluator::new(instance),
            limits,
            incumbent,
            stats: SearchStats::default(),
            stopped: false,
        }
    }

    /// Searches the subtree rooted at `ctx`, leaving `ctx` as it was.
    ///
    /// Returns `true` if the subtree was fully explored, `false` if a limit
    /// stopped the search.
    pub fn run(&mut self, ctx: &mut SearchContext) -> bool {
        ctx.checkpoint();
        self.descend(ctx);
        ctx.rewind();
        !self.stopped
    }

    pub fn incumbent(&self) -> &I {
        &self.incumbent
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Whether a limit stopped the search.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn into_parts(self) -> (I, SearchStats) {
        (self.incumbent, self.stats)
    }

    fn descend(&mut self, ctx: &mut SearchContext) {
        if self.limits.should_stop(self.stats.nodes) {
            self.stopped = true;
            return;
        }
        self.stats.nodes += 1;

        if self.store.propagate(ctx).is_err() {
            self.stats.failures += 1;
            return;
        }

        let bound = self.incumbent.bound();
        let lower = self.evaluator.lower_bound(ctx);
        if lower >= bound {
            self.stats.pruned += 1;
            trace!(lower, bound, depth = ctx.depth(), "pruned by bound");
            return;
        }

        let Some(var) = select_variable(ctx) else {
            self.leaf(ctx);
            return;
        };

        for value in ctx.domain(var).iter() {
            ctx.checkpoint();
            if ctx.fix(var, value).is_ok() {
                self.descend(ctx);
            }
            ctx.rewind();
            if self.stopped {
                return;
            }
        }
    }

    fn leaf(&mut self, ctx: &SearchContext) {
        if self.store.check(ctx) != CheckStatus::Satisfied {
            self.stats.failures += 1;
            return;
        }
        let depot = ctx.fixed(Var::Depot).flatten();
        let solution = self.evaluator.solution(ctx.paths(), depot);
        let cost = solution.cost();
        if cost < self.incumbent.bound() && self.incumbent.offer(solution) {
            self.stats.solutions += 1;
            debug!(cost, nodes = self.stats.nodes, "new incumbent");
        }
    }
}
