//! A depot exists exactly when goods cross between warehouses.

use super::{CheckStatus, Conflict, Domain, Propagator, SearchContext, Var};
use crate::models::{PlaceRegistry, Truck};

/// `Depot = Absent` iff no truck serves a customer of the other warehouse.
pub struct DepotNecessity;

fn foreign_customers(registry: &PlaceRegistry, truck: Truck) -> Domain {
    Domain::places(registry.customers(truck.other()))
}

/// `(fixed, possible)` cross deliveries: slots fixed to a foreign customer,
/// and slots that may still hold one.
fn cross_deliveries(ctx: &SearchContext) -> (usize, usize) {
    let registry = *ctx.registry();
    let mut fixed = 0;
    let mut possible = 0;
    for truck in Truck::ALL {
        let foreign = foreign_customers(&registry, truck);
        for slot in 0..ctx.max_path_length() {
            let d = ctx.slot(truck, slot);
            if d.intersects(foreign) {
                possible += 1;
                if d.is_fixed() {
                    fixed += 1;
                }
            }
        }
    }
    (fixed, possible)
}

impl Propagator for DepotNecessity {
    fn name(&self) -> &'static str {
        "depot-necessity"
    }

    fn check(&self, ctx: &SearchContext) -> CheckStatus {
        let (fixed, possible) = cross_deliveries(ctx);
        match ctx.fixed(Var::Depot) {
            Some(None) if fixed > 0 => CheckStatus::Violated,
            Some(Some(_)) if possible == 0 => CheckStatus::Violated,
            Some(None) if possible == 0 => CheckStatus::Satisfied,
            Some(Some(_)) if fixed > 0 => CheckStatus::Satisfied,
            _ => CheckStatus::Undetermined,
        }
    }

    fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict> {
        let (fixed, possible) = cross_deliveries(ctx);
        if fixed > 0 {
            ctx.remove(Var::Depot, None)?;
        }
        if possible == 0 {
            ctx.fix(Var::Depot, None)?;
        }
        if ctx.depot() == Domain::ABSENT {
            let registry = *ctx.registry();
            for truck in Truck::ALL {
                let foreign = foreign_customers(&registry, truck);
                for slot in 0..ctx.max_path_length() {
                    ctx.exclude(Var::Slot(truck, slot), foreign)?;
                }
            }
        }
        Ok(())
    }
}
