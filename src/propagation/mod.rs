//! Constraint store: the feasibility rules of the routing model.
//!
//! Each rule is a [`Propagator`] that can both *check* a (partial) state
//! and *propagate*, i.e. remove candidate values that cannot be part of
//! any feasible completion. The [`ConstraintStore`] runs all propagators to
//! a fixpoint and reports a [`Conflict`] as soon as one of them finds the
//! state infeasible.
//!
//! | propagator                | rule                                                      |
//! |---------------------------|-----------------------------------------------------------|
//! | [`SentinelConsistency`]   | absent slots form a suffix; paths have length ≥ 2        |
//! | [`Endpoints`]             | a path starts and ends at its own warehouse               |
//! | [`WarehouseCardinality`]  | own warehouse twice; other warehouse once iff it is the depot |
//! | [`CustomerCoverage`]      | each customer served once; the depot customer by both    |
//! | [`DepotPrecedence`]       | only own customers before the depot visit                 |
//! | [`DepotNecessity`]        | a depot exists iff some truck serves a foreign customer   |
//! | [`LengthIdentity`]        | `len(A) + len(B) = 4 + 2n + [depot]` (redundant)          |

mod cardinality;
mod context;
mod coverage;
mod domain;
mod endpoint;
mod length;
mod necessity;
mod precedence;
mod sentinel;

pub use cardinality::WarehouseCardinality;
pub use context::{SearchContext, Var};
pub use coverage::CustomerCoverage;
pub use domain::{Domain, Value};
pub use endpoint::Endpoints;
pub use length::LengthIdentity;
pub use necessity::DepotNecessity;
pub use precedence::DepotPrecedence;
pub use sentinel::SentinelConsistency;

/// The current state admits no feasible completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

/// Outcome of checking one rule against a (partial) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Holds, whatever the remaining variables become.
    Satisfied,
    /// Cannot hold in any completion.
    Violated,
    /// Depends on variables that are not fixed yet.
    Undetermined,
}

impl CheckStatus {
    /// Conjunction: `Violated` dominates, then `Undetermined`.
    pub fn and(self, other: CheckStatus) -> CheckStatus {
        use CheckStatus::*;
        match (self, other) {
            (Violated, _) | (_, Violated) => Violated,
            (Undetermined, _) | (_, Undetermined) => Undetermined,
            (Satisfied, Satisfied) => Satisfied,
        }
    }
}

/// A feasibility rule.
///
/// `propagate` must be sound: it may only remove values that appear in no
/// feasible completion of the current state. `check` must be exact on
/// complete states.
pub trait Propagator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Evaluates the rule on the fixed part of the state.
    fn check(&self, ctx: &SearchContext) -> CheckStatus;

    /// Removes unsupported values.
    fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict>;
}

/// All rules of the model, run together.
///
/// # Examples
///
/// ```
/// use u_splitroute::models::{PlaceRegistry, Truck};
/// use u_splitroute::propagation::{ConstraintStore, SearchContext, Var};
///
/// let registry = PlaceRegistry::new(1).expect("valid size");
/// let store = ConstraintStore::new();
/// let mut ctx = SearchContext::new(registry);
///
/// store.propagate(&mut ctx).expect("root is feasible");
/// // Slot 0 always holds the truck's own warehouse.
/// assert_eq!(ctx.fixed(Var::Slot(Truck::B, 0)), Some(Some(registry.warehouse(Truck::B))));
/// ```
pub struct ConstraintStore {
    propagators: Vec<Box<dyn Propagator>>,
}

impl ConstraintStore {
    /// The full rule set of the model.
    pub fn new() -> Self {
        Self::with_propagators(vec![
            Box::new(SentinelConsistency),
            Box::new(Endpoints),
            Box::new(WarehouseCardinality),
            Box::new(CustomerCoverage),
            Box::new(DepotNecessity),
            Box::new(DepotPrecedence),
            Box::new(LengthIdentity),
        ])
    }

    /// A store running only the given rules.
    pub fn with_propagators(propagators: Vec<Box<dyn Propagator>>) -> Self {
        Self { propagators }
    }

    pub fn len(&self) -> usize {
        self.propagators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.propagators.is_empty()
    }

    /// Runs every propagator until no domain changes, then checks every
    /// rule. Leaves the context partially pruned on conflict; callers
    /// rewind.
    pub fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict> {
        loop {
            let before = ctx.revision();
            for propagator in &self.propagators {
                propagator.propagate(ctx)?;
            }
            if ctx.revision() == before {
                break;
            }
        }
        match self.check(ctx) {
            CheckStatus::Violated => Err(Conflict),
            _ => Ok(()),
        }
    }

    /// Conjunction of every rule's check.
    pub fn check(&self, ctx: &SearchContext) -> CheckStatus {
        let mut status = CheckStatus::Satisfied;
        for propagator in &self.propagators {
            let s = propagator.check(ctx);
            if s == CheckStatus::Violated {
                tracing::trace!(rule = propagator.name(), "check violated");
                return s;
            }
            status = status.and(s);
        }
        status
    }
}

impl Default for ConstraintStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::{Place, PlaceRegistry, Truck};

    /// Fixes every variable of a context to the given complete assignment.
    pub(crate) fn complete(
        registry: PlaceRegistry,
        path_a: &[usize],
        path_b: &[usize],
        depot: Option<usize>,
    ) -> SearchContext {
        let mut ctx = SearchContext::new(registry);
        for (truck, path) in [(Truck::A, path_a), (Truck::B, path_b)] {
            for slot in 0..ctx.max_path_length() {
                let value = path.get(slot).map(|&id| Place::new(id as u8));
                ctx.fix(Var::Slot(truck, slot), value).expect("in domain");
            }
        }
        ctx.fix(Var::Depot, depot.map(|id| Place::new(id as u8)))
            .expect("in domain");
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::complete;
    use super::*;
    use crate::models::{Place, PlaceRegistry, Truck};

    fn registry() -> PlaceRegistry {
        PlaceRegistry::new(1).expect("valid")
    }

    #[test]
    fn test_check_status_and() {
        use CheckStatus::*;
        assert_eq!(Satisfied.and(Satisfied), Satisfied);
        assert_eq!(Satisfied.and(Undetermined), Undetermined);
        assert_eq!(Undetermined.and(Violated), Violated);
    }

    #[test]
    fn test_independent_service_satisfies_all() {
        // A = 0, a1 = 1, B = 2, b1 = 3
        let ctx = complete(registry(), &[0, 1, 0], &[2, 3, 2], None);
        assert_eq!(ConstraintStore::new().check(&ctx), CheckStatus::Satisfied);
    }

    #[test]
    fn test_exchange_at_customer_satisfies_all() {
        let ctx = complete(registry(), &[0, 3, 0], &[2, 3, 1, 2], Some(3));
        assert_eq!(ConstraintStore::new().check(&ctx), CheckStatus::Satisfied);
    }

    #[test]
    fn test_foreign_customer_before_depot_violated() {
        let ctx = complete(registry(), &[0, 3, 0], &[2, 1, 3, 2], Some(3));
        assert_eq!(ConstraintStore::new().check(&ctx), CheckStatus::Violated);
    }

    #[test]
    fn test_root_propagation() {
        let r = registry();
        let store = ConstraintStore::new();
        let mut ctx = SearchContext::new(r);
        store.propagate(&mut ctx).expect("feasible");
        for truck in Truck::ALL {
            assert_eq!(
                ctx.fixed(Var::Slot(truck, 0)),
                Some(Some(r.warehouse(truck)))
            );
            assert!(!ctx.slot(truck, 1).contains_absent());
        }
        assert_eq!(store.check(&ctx), CheckStatus::Undetermined);
    }

    #[test]
    fn test_propagation_detects_forced_conflict() {
        let r = registry();
        let store = ConstraintStore::new();
        let mut ctx = SearchContext::new(r);
        // No depot, yet truck B starts by serving A's customer.
        ctx.fix(Var::Depot, None).expect("in domain");
        ctx.fix(Var::Slot(Truck::B, 1), Some(Place::new(1)))
            .expect("in domain");
        assert_eq!(store.propagate(&mut ctx), Err(Conflict));
    }

    #[test]
    fn test_no_depot_keeps_trucks_home() {
        let r = registry();
        let store = ConstraintStore::new();
        let mut ctx = SearchContext::new(r);
        ctx.fix(Var::Depot, None).expect("in domain");
        store.propagate(&mut ctx).expect("feasible");
        for slot in 0..ctx.max_path_length() {
            let a = ctx.slot(Truck::A, slot);
            let b = ctx.slot(Truck::B, slot);
            assert!(!a.contains(Some(Place::new(2))) && !a.contains(Some(Place::new(3))));
            assert!(!b.contains(Some(Place::new(0))) && !b.contains(Some(Place::new(1))));
        }
    }

    #[test]
    fn test_propagation_completes_forced_paths() {
        let r = registry();
        let store = ConstraintStore::new();
        let mut ctx = SearchContext::new(r);
        ctx.fix(Var::Depot, None).expect("in domain");
        ctx.fix(Var::Slot(Truck::A, 1), Some(Place::new(1)))
            .expect("in domain");
        ctx.fix(Var::Slot(Truck::B, 1), Some(Place::new(3)))
            .expect("in domain");
        store.propagate(&mut ctx).expect("feasible");
        assert!(ctx.is_complete());
        assert_eq!(
            ctx.paths().visits(Truck::A),
            vec![Place::new(0), Place::new(1), Place::new(0)]
        );
        assert_eq!(
            ctx.paths().visits(Truck::B),
            vec![Place::new(2), Place::new(3), Place::new(2)]
        );
        assert_eq!(store.check(&ctx), CheckStatus::Satisfied);
    }
}
