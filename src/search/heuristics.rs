//! Branching heuristics.

use crate::models::Truck;
use crate::propagation::{SearchContext, Var};

/// Picks the unfixed variable with the smallest domain.
///
/// Ties go to the first variable in positional order: truck A's slots,
/// truck B's slots, then the depot. Returns `None` when every variable is
/// fixed.
pub fn select_variable(ctx: &SearchContext) -> Option<Var> {
    let slots = Truck::ALL
        .into_iter()
        .flat_map(|truck| (0..ctx.max_path_length()).map(move |slot| Var::Slot(truck, slot)));
    let mut best: Option<(Var, usize)> = None;
    for var in slots.chain(std::iter::once(Var::Depot)) {
        let size = ctx.domain(var).size();
        if size <= 1 {
            continue;
        }
        match best {
            Some((_, smallest)) if smallest <= size => {}
            _ => best = Some((var, size)),
        }
    }
    best.map(|(var, _)| var)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Place, PlaceRegistry};
    use crate::propagation::Domain;

    fn ctx() -> SearchContext {
        SearchContext::new(PlaceRegistry::new(1).expect("valid"))
    }

    #[test]
    fn test_first_position_wins_ties() {
        let c = ctx();
        assert_eq!(select_variable(&c), Some(Var::Slot(Truck::A, 0)));
    }

    #[test]
    fn test_smallest_domain_wins() {
        let mut c = ctx();
        c.restrict(
            Var::Slot(Truck::B, 3),
            Domain::places([Place::new(1), Place::new(2)]),
        )
        .expect("in domain");
        assert_eq!(select_variable(&c), Some(Var::Slot(Truck::B, 3)));

        c.restrict(Var::Depot, Domain::singleton(Some(Place::new(3))).with_absent())
            .expect("in domain");
        // Depot has size 2 as well but comes later.
        assert_eq!(select_variable(&c), Some(Var::Slot(Truck::B, 3)));
    }

    #[test]
    fn test_fixed_variables_are_skipped() {
        let mut c = ctx();
        for truck in Truck::ALL {
            for slot in 0..c.max_path_length() {
                c.fix(Var::Slot(truck, slot), None).expect("in domain");
            }
        }
        assert_eq!(select_variable(&c), Some(Var::Depot));
        c.fix(Var::Depot, None).expect("in domain");
        assert_eq!(select_variable(&c), None);
    }
}
