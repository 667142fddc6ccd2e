//! Multi-worker search over the depot choices.
//!
//! After root propagation, each remaining depot value roots an independent
//! subtree. Subtrees are searched by a rayon pool; workers share one
//! incumbent and read its bound at every node.

use rayon::prelude::*;
use tracing::debug;

use super::engine::BranchAndBound;
use super::incumbent::{LocalIncumbent, SharedIncumbent};
use super::limits::SearchLimits;
use super::SearchStats;
use crate::models::{Instance, Solution};
use crate::propagation::{ConstraintStore, SearchContext, Value, Var};

pub(crate) fn search(
    instance: &Instance,
    store: &ConstraintStore,
    limits: &SearchLimits,
    incumbent: LocalIncumbent,
    num_workers: usize,
) -> (Option<Solution>, SearchStats, bool) {
    let shared = SharedIncumbent::from_local(incumbent);
    let mut root = SearchContext::new(*instance.registry());
    let mut stats = SearchStats {
        nodes: 1,
        ..SearchStats::default()
    };
    if store.propagate(&mut root).is_err() {
        stats.failures += 1;
        return (shared.best(), stats, true);
    }

    let depots: Vec<_> = root.depot().iter().collect();
    debug!(subtrees = depots.len(), num_workers, "parallel search");

    let run_subtree = |depot: Value| {
        let mut ctx = root.clone();
        let mut engine = BranchAndBound::new(instance, store, limits, shared.clone());
        let complete = ctx.fix(Var::Depot, depot).is_err() || engine.run(&mut ctx);
        let (_, stats) = engine.into_parts();
        (stats, complete)
    };

    let outcomes: Vec<(SearchStats, bool)> =
        match rayon::ThreadPoolBuilder::new().num_threads(num_workers).build() {
            Ok(pool) => pool.install(|| depots.par_iter().map(|&d| run_subtree(d)).collect()),
            Err(err) => {
                debug!(%err, "thread pool unavailable, searching sequentially");
                depots.iter().map(|&d| run_subtree(d)).collect()
            }
        };

    let mut complete = true;
    for (worker, done) in &outcomes {
        stats.absorb(worker);
        complete &= *done;
    }
    (shared.best(), stats, complete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random_instance;
    use crate::search::Incumbent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parallel_matches_sequential() {
        let store = ConstraintStore::new();
        let limits = SearchLimits::none();
        for seed in 0..4 {
            let instance =
                random_instance(2, 100, &mut StdRng::seed_from_u64(seed)).expect("valid");
            let bound = crate::evaluation::RouteEvaluator::new(&instance).naive_bound() + 1;

            let mut ctx = SearchContext::new(*instance.registry());
            let mut engine =
                BranchAndBound::new(&instance, &store, &limits, LocalIncumbent::new(bound));
            assert!(engine.run(&mut ctx));
            let expected = engine.incumbent().bound();

            let (best, _, complete) =
                search(&instance, &store, &limits, LocalIncumbent::new(bound), 3);
            assert!(complete);
            assert_eq!(best.map(|s| s.cost()), Some(expected));
        }
    }
}
