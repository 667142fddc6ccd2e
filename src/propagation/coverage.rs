//! Every customer is served exactly once.

use super::{CheckStatus, Conflict, Propagator, SearchContext, Var};
use crate::models::Truck;

/// A customer that is not the depot appears exactly once across both
/// paths; the depot customer appears exactly once in each path.
pub struct CustomerCoverage;

impl Propagator for CustomerCoverage {
    fn name(&self) -> &'static str {
        "customer-coverage"
    }

    fn check(&self, ctx: &SearchContext) -> CheckStatus {
        let registry = *ctx.registry();
        let depot = ctx.fixed(Var::Depot);
        let mut status = CheckStatus::Satisfied;
        for customer in registry.all_customers() {
            let value = Some(customer);
            let fixed = Truck::ALL.map(|t| ctx.paths().count(t, customer));
            let possible = Truck::ALL.map(|t| ctx.candidates(t, value).count());
            if fixed.iter().any(|&c| c > 1) || possible.iter().sum::<usize>() == 0 {
                return CheckStatus::Violated;
            }
            let settled = fixed == possible;
            match depot {
                Some(d) if d == value => {
                    if possible.contains(&0) {
                        return CheckStatus::Violated;
                    }
                    if !settled {
                        status = CheckStatus::Undetermined;
                    }
                }
                Some(_) => {
                    if fixed[0] + fixed[1] > 1 {
                        return CheckStatus::Violated;
                    }
                    if !settled {
                        status = CheckStatus::Undetermined;
                    }
                }
                None => status = CheckStatus::Undetermined,
            }
        }
        status
    }

    fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict> {
        let registry = *ctx.registry();
        for customer in registry.all_customers() {
            let value = Some(customer);
            for truck in Truck::ALL {
                match ctx.paths().count(truck, customer) {
                    0 => {}
                    1 => ctx.clear_unfixed(truck, value)?,
                    _ => return Err(Conflict),
                }
            }

            let fixed = Truck::ALL.map(|t| ctx.paths().count(t, customer));
            let possible = Truck::ALL.map(|t| ctx.candidates(t, value).count());
            if possible[0] + possible[1] == 0 {
                return Err(Conflict);
            }
            // Being the depot requires a visit from both trucks.
            if possible.contains(&0) {
                ctx.remove(Var::Depot, value)?;
            }
            if fixed == [1, 1] {
                ctx.fix(Var::Depot, value)?;
            }

            let depot = ctx.depot();
            if depot.value() == Some(value) {
                for truck in Truck::ALL {
                    if fixed[truck.index()] == 0 {
                        fix_single_candidate(ctx, truck, value)?;
                    }
                }
            } else if !depot.contains(value) {
                match fixed[0] + fixed[1] {
                    0 => {
                        if possible[0] + possible[1] == 1 {
                            let truck = if possible[0] == 1 { Truck::A } else { Truck::B };
                            fix_single_candidate(ctx, truck, value)?;
                        }
                    }
                    1 => {
                        let idle = if fixed[0] == 1 { Truck::B } else { Truck::A };
                        ctx.forbid(idle, value)?;
                    }
                    _ => return Err(Conflict),
                }
            }
        }
        Ok(())
    }
}

/// Fixes the only slot of `truck` that can still hold `value`.
fn fix_single_candidate(
    ctx: &mut SearchContext,
    truck: Truck,
    value: super::Value,
) -> Result<(), Conflict> {
    let first_two = {
        let mut candidates = ctx.candidates(truck, value);
        (candidates.next(), candidates.next())
    };
    match first_two {
        (None, _) => Err(Conflict),
        (Some(slot), None) => ctx.fix(Var::Slot(truck, slot), value),
        _ => Ok(()),
    }
}
