//! Redundant path length identity.

use super::{CheckStatus, Conflict, Propagator, SearchContext, Var};
use crate::models::Truck;

/// `len(A) + len(B) = 4 + 2n + [depot present]`.
///
/// Implied by the other rules; it only prunes earlier.
pub struct LengthIdentity;

impl LengthIdentity {
    fn base(ctx: &SearchContext) -> usize {
        4 + 2 * ctx.registry().customers_per_warehouse()
    }

    /// Path length of a truck whose slots are all fixed.
    fn fixed_length(ctx: &SearchContext, truck: Truck) -> Option<usize> {
        let (lo, hi) = ctx.length_bounds(truck);
        (lo == hi).then_some(lo)
    }
}

impl Propagator for LengthIdentity {
    fn name(&self) -> &'static str {
        "length-identity"
    }

    fn check(&self, ctx: &SearchContext) -> CheckStatus {
        let base = Self::base(ctx);
        let depot = ctx.depot();
        let t_min = base + usize::from(!depot.contains_absent());
        let t_max = base + usize::from(depot.has_places());
        let (lo_a, hi_a) = ctx.length_bounds(Truck::A);
        let (lo_b, hi_b) = ctx.length_bounds(Truck::B);
        if lo_a + lo_b > t_max || hi_a + hi_b < t_min {
            return CheckStatus::Violated;
        }
        match (
            Self::fixed_length(ctx, Truck::A),
            Self::fixed_length(ctx, Truck::B),
            ctx.fixed(Var::Depot),
        ) {
            (Some(a), Some(b), Some(d)) if a + b == base + usize::from(d.is_some()) => {
                CheckStatus::Satisfied
            }
            (Some(_), Some(_), Some(_)) => CheckStatus::Violated,
            _ => CheckStatus::Undetermined,
        }
    }

    fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict> {
        let base = Self::base(ctx);
        let m = ctx.max_path_length();
        let depot = ctx.depot();
        let t_min = base + usize::from(!depot.contains_absent());
        let t_max = base + usize::from(depot.has_places());

        for truck in Truck::ALL {
            let (lo_other, hi_other) = ctx.length_bounds(truck.other());
            let need = t_min.saturating_sub(hi_other);
            if need > m {
                return Err(Conflict);
            }
            for slot in 0..need {
                ctx.remove(Var::Slot(truck, slot), None)?;
            }
            let allow = t_max.saturating_sub(lo_other);
            for slot in allow..m {
                ctx.fix(Var::Slot(truck, slot), None)?;
            }
        }

        let (lo_a, hi_a) = ctx.length_bounds(Truck::A);
        let (lo_b, hi_b) = ctx.length_bounds(Truck::B);
        if lo_a + lo_b > base {
            ctx.remove(Var::Depot, None)?;
        }
        if hi_a + hi_b <= base {
            ctx.fix(Var::Depot, None)?;
        }
        Ok(())
    }
}
