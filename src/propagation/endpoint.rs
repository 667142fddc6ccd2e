//! Paths start and end at the truck's own warehouse.

use super::{CheckStatus, Conflict, Domain, Propagator, SearchContext, Var};
use crate::models::Truck;

/// Slot 0 and slot `PathLength - 1` hold the truck's own warehouse, and the
/// warehouse appears nowhere in between.
///
/// The warehouse at slot `i >= 1` marks the end of the path, so it is
/// allowed exactly where the next slot may be absent.
pub struct Endpoints;

impl Propagator for Endpoints {
    fn name(&self) -> &'static str {
        "endpoints"
    }

    fn check(&self, ctx: &SearchContext) -> CheckStatus {
        let m = ctx.max_path_length();
        let mut status = CheckStatus::Satisfied;
        for truck in Truck::ALL {
            let home = Some(ctx.registry().warehouse(truck));
            match ctx.fixed(Var::Slot(truck, 0)) {
                Some(value) if value != home => return CheckStatus::Violated,
                None => status = CheckStatus::Undetermined,
                _ => {}
            }
            for slot in 1..m {
                let here = ctx.fixed(Var::Slot(truck, slot));
                let next = if slot + 1 < m {
                    ctx.fixed(Var::Slot(truck, slot + 1))
                } else {
                    Some(None)
                };
                match (here, next) {
                    (Some(Some(p)), Some(None)) if Some(p) != home => {
                        return CheckStatus::Violated
                    }
                    (Some(h), Some(Some(_))) if h == home => return CheckStatus::Violated,
                    (None, _) | (_, None) => status = CheckStatus::Undetermined,
                    _ => {}
                }
            }
        }
        status
    }

    fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict> {
        let m = ctx.max_path_length();
        for truck in Truck::ALL {
            let home = Some(ctx.registry().warehouse(truck));
            ctx.fix(Var::Slot(truck, 0), home)?;
            ctx.restrict(
                Var::Slot(truck, m - 1),
                Domain::singleton(home).with_absent(),
            )?;
            for slot in 1..m - 1 {
                let var = Var::Slot(truck, slot);
                let next = Var::Slot(truck, slot + 1);
                if !ctx.domain(next).contains_absent() {
                    ctx.remove(var, home)?;
                }
                let here = ctx.domain(var);
                if here == Domain::singleton(home) {
                    ctx.fix(next, None)?;
                } else if ctx.domain(next) == Domain::ABSENT && !here.contains_absent() {
                    ctx.fix(var, home)?;
                }
                let here = ctx.domain(var);
                if !here.contains(home) && !here.contains_absent() {
                    ctx.remove(next, None)?;
                }
            }
        }
        Ok(())
    }
}
