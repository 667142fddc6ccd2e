//! Warehouse occurrence counts.

use super::{CheckStatus, Conflict, Propagator, SearchContext, Var};
use crate::models::Truck;

/// Own warehouse exactly twice per path; the other warehouse once if it is
/// the depot and never otherwise.
pub struct WarehouseCardinality;

impl Propagator for WarehouseCardinality {
    fn name(&self) -> &'static str {
        "warehouse-cardinality"
    }

    fn check(&self, ctx: &SearchContext) -> CheckStatus {
        let registry = *ctx.registry();
        let depot = ctx.fixed(Var::Depot);
        let mut status = CheckStatus::Satisfied;
        for truck in Truck::ALL {
            let home = registry.warehouse(truck);
            let foreign = registry.warehouse(truck.other());
            let own = ctx.paths().count(truck, home);
            let visits = ctx.paths().count(truck, foreign);
            if own > 2 || visits > 1 {
                return CheckStatus::Violated;
            }
            match depot {
                Some(d) if d != Some(foreign) && visits > 0 => return CheckStatus::Violated,
                Some(d)
                    if d == Some(foreign)
                        && ctx.candidates(truck, Some(foreign)).next().is_none() =>
                {
                    return CheckStatus::Violated
                }
                _ => {}
            }
            let settled = (0..ctx.max_path_length()).all(|slot| ctx.slot(truck, slot).is_fixed());
            if !settled || depot.is_none() {
                status = CheckStatus::Undetermined;
            } else if own != 2 || visits != usize::from(depot == Some(Some(foreign))) {
                return CheckStatus::Violated;
            }
        }
        status
    }

    fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict> {
        let registry = *ctx.registry();
        for truck in Truck::ALL {
            let home = Some(registry.warehouse(truck));
            match ctx.paths().count(truck, registry.warehouse(truck)) {
                0 | 1 => {}
                2 => ctx.clear_unfixed(truck, home)?,
                _ => return Err(Conflict),
            }

            let foreign = Some(registry.warehouse(truck.other()));
            let fixed = ctx.paths().count(truck, registry.warehouse(truck.other()));
            if fixed > 1 {
                return Err(Conflict);
            }
            if fixed == 1 {
                ctx.fix(Var::Depot, foreign)?;
                ctx.clear_unfixed(truck, foreign)?;
            }
            if !ctx.depot().contains(foreign) {
                ctx.forbid(truck, foreign)?;
            }
            let (first, only) = {
                let mut candidates = ctx.candidates(truck, foreign);
                let first = candidates.next();
                (first, first.filter(|_| candidates.next().is_none()))
            };
            match first {
                None => ctx.remove(Var::Depot, foreign)?,
                Some(_) if ctx.fixed(Var::Depot) == Some(foreign) => {
                    if let Some(slot) = only {
                        ctx.fix(Var::Slot(truck, slot), foreign)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}
