//! Goods picked up at the depot can only be delivered after the visit.

use super::{CheckStatus, Conflict, Domain, Propagator, SearchContext, Var};
use crate::models::Truck;

/// For every slot `i` of a truck holding the depot, slots `1..i` hold
/// customers of the truck's own warehouse.
///
/// An absent depot matches no slot.
pub struct DepotPrecedence;

impl DepotPrecedence {
    /// First slot `>= 1` that can no longer hold an own customer. No depot
    /// visit can happen after it.
    fn barrier(ctx: &SearchContext, truck: Truck, own: Domain) -> usize {
        (1..ctx.max_path_length())
            .find(|&slot| !ctx.slot(truck, slot).intersects(own))
            .unwrap_or(ctx.max_path_length())
    }
}

impl Propagator for DepotPrecedence {
    fn name(&self) -> &'static str {
        "depot-precedence"
    }

    fn check(&self, ctx: &SearchContext) -> CheckStatus {
        let depot = match ctx.fixed(Var::Depot) {
            Some(Some(depot)) => depot,
            Some(None) => return CheckStatus::Satisfied,
            None => return CheckStatus::Undetermined,
        };
        let registry = *ctx.registry();
        let mut status = CheckStatus::Satisfied;
        for truck in Truck::ALL {
            let own = Domain::places(registry.customers(truck));
            for slot in 1..ctx.max_path_length() {
                match ctx.fixed(Var::Slot(truck, slot)) {
                    Some(Some(p)) if p == depot => {
                        for before in 1..slot {
                            let d = ctx.slot(truck, before);
                            if !d.intersects(own) {
                                return CheckStatus::Violated;
                            }
                            if d.difference(own).has_places() || d.contains_absent() {
                                status = CheckStatus::Undetermined;
                            }
                        }
                    }
                    None if ctx.slot(truck, slot).contains(Some(depot)) => {
                        status = CheckStatus::Undetermined;
                    }
                    _ => {}
                }
            }
        }
        status
    }

    fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict> {
        let registry = *ctx.registry();
        let m = ctx.max_path_length();
        for truck in Truck::ALL {
            let own = Domain::places(registry.customers(truck));
            let barrier = Self::barrier(ctx, truck, own);
            match ctx.fixed(Var::Depot) {
                Some(Some(depot)) => {
                    let value = Some(depot);
                    for slot in (barrier + 1)..m {
                        ctx.remove(Var::Slot(truck, slot), value)?;
                    }
                    let visits: Vec<usize> = ctx
                        .candidates(truck, value)
                        .filter(|&slot| slot >= 1 && ctx.slot(truck, slot).is_fixed())
                        .collect();
                    if let Some(&last) = visits.last() {
                        for slot in 1..last {
                            ctx.restrict(Var::Slot(truck, slot), own)?;
                        }
                    }
                }
                Some(None) => {}
                None => {
                    let depot = ctx.depot();
                    for candidate in depot.iter_places() {
                        let value = Some(candidate);
                        let late = ((barrier + 1)..m)
                            .any(|slot| ctx.slot(truck, slot) == Domain::singleton(value));
                        if late {
                            ctx.remove(Var::Depot, value)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Place, PlaceRegistry};
    use crate::propagation::test_support::complete;

    fn registry() -> PlaceRegistry {
        PlaceRegistry::new(2).expect("valid")
    }

    // A = 0, A1 = 1, A2 = 2, B = 3, B1 = 4, B2 = 5

    #[test]
    fn test_slots_before_depot_are_own_customers() {
        let mut c = SearchContext::new(registry());
        c.fix(Var::Depot, Some(Place::new(4))).expect("in domain");
        c.fix(Var::Slot(Truck::A, 3), Some(Place::new(4)))
            .expect("in domain");
        DepotPrecedence.propagate(&mut c).expect("feasible");
        let own = Domain::places([Place::new(1), Place::new(2)]);
        assert_eq!(c.slot(Truck::A, 1), own);
        assert_eq!(c.slot(Truck::A, 2), own);
        assert!(c.slot(Truck::A, 4).size() > 2);
    }

    #[test]
    fn test_no_depot_after_foreign_stop() {
        let mut c = SearchContext::new(registry());
        c.fix(Var::Depot, Some(Place::new(1))).expect("in domain");
        c.fix(Var::Slot(Truck::B, 2), Some(Place::new(2)))
            .expect("in domain");
        DepotPrecedence.propagate(&mut c).expect("feasible");
        for slot in 3..c.max_path_length() {
            assert!(!c.slot(Truck::B, slot).contains(Some(Place::new(1))));
        }
        assert!(c.slot(Truck::B, 1).contains(Some(Place::new(1))));
    }

    #[test]
    fn test_late_visit_rules_out_depot_candidate() {
        let mut c = SearchContext::new(registry());
        c.fix(Var::Slot(Truck::A, 1), Some(Place::new(5)))
            .expect("in domain");
        c.fix(Var::Slot(Truck::A, 2), Some(Place::new(4)))
            .expect("in domain");
        DepotPrecedence.propagate(&mut c).expect("feasible");
        assert!(!c.depot().contains(Some(Place::new(4))));
        assert!(c.depot().contains(Some(Place::new(5))));
    }

    #[test]
    fn test_own_warehouse_depot_keeps_truck_home() {
        let mut c = SearchContext::new(registry());
        c.fix(Var::Depot, Some(Place::new(0))).expect("in domain");
        c.fix(Var::Slot(Truck::A, 3), Some(Place::new(0)))
            .expect("in domain");
        DepotPrecedence.propagate(&mut c).expect("feasible");
        let own = Domain::places([Place::new(1), Place::new(2)]);
        assert_eq!(c.slot(Truck::A, 1), own);
        assert_eq!(c.slot(Truck::A, 2), own);
    }

    #[test]
    fn test_check() {
        let r = registry();
        let ok = complete(r, &[0, 1, 4, 2, 0], &[3, 4, 5, 3], Some(4));
        assert_eq!(DepotPrecedence.check(&ok), CheckStatus::Satisfied);

        let early = complete(r, &[0, 5, 4, 1, 2, 0], &[3, 4, 3], Some(4));
        assert_eq!(DepotPrecedence.check(&early), CheckStatus::Violated);

        let none = complete(r, &[0, 1, 2, 0], &[3, 4, 5, 3], None);
        assert_eq!(DepotPrecedence.check(&none), CheckStatus::Satisfied);
    }
}
