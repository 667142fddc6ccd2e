//! Search state shared by the propagators and the search engine.
//!
//! Every domain change is recorded on a trail so that the search can undo
//! all changes made below a decision point in one [`rewind`](SearchContext::rewind).
//! When a slot domain shrinks to a single place, the place is assigned in
//! the [`PathState`], keeping the cardinality counts in step with the
//! domains; rewinding retracts it again.

use super::{Conflict, Domain, Value};
use crate::models::{PathState, PlaceRegistry, Truck};

/// A decision variable: one path slot, or the depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Var {
    /// Slot `index` (0-based) of a truck's path.
    Slot(Truck, usize),
    /// The exchange place.
    Depot,
}

#[derive(Debug, Clone, Copy)]
enum TrailEntry {
    Domain { var: Var, previous: Domain },
    Assign { truck: Truck, slot: usize },
}

/// Domains of all variables, the derived paths, and the undo trail.
///
/// # Examples
///
/// ```
/// use u_splitroute::models::{Place, PlaceRegistry, Truck};
/// use u_splitroute::propagation::{SearchContext, Var};
///
/// let registry = PlaceRegistry::new(1).expect("valid size");
/// let mut ctx = SearchContext::new(registry);
///
/// ctx.checkpoint();
/// ctx.fix(Var::Slot(Truck::B, 1), Some(Place::new(3))).expect("in domain");
/// assert_eq!(ctx.paths().count(Truck::B, Place::new(3)), 1);
///
/// ctx.rewind();
/// assert_eq!(ctx.paths().count(Truck::B, Place::new(3)), 0);
/// assert_eq!(ctx.fixed(Var::Slot(Truck::B, 1)), None);
/// ```
#[derive(Debug, Clone)]
pub struct SearchContext {
    registry: PlaceRegistry,
    slots: [Vec<Domain>; 2],
    depot: Domain,
    paths: PathState,
    trail: Vec<TrailEntry>,
    checkpoints: Vec<usize>,
    revision: u64,
}

impl SearchContext {
    /// Creates the root state: every variable may take every value.
    pub fn new(registry: PlaceRegistry) -> Self {
        let full = Domain::full(registry.num_places());
        let slots = vec![full; registry.max_path_length()];
        Self {
            registry,
            slots: [slots.clone(), slots],
            depot: full,
            paths: PathState::new(&registry),
            trail: Vec::with_capacity(256),
            checkpoints: Vec::with_capacity(2 * registry.max_path_length() + 1),
            revision: 0,
        }
    }

    pub fn registry(&self) -> &PlaceRegistry {
        &self.registry
    }

    /// Number of slots per truck.
    pub fn max_path_length(&self) -> usize {
        self.slots[0].len()
    }

    /// The assigned places and their counts.
    pub fn paths(&self) -> &PathState {
        &self.paths
    }

    pub fn domain(&self, var: Var) -> Domain {
        match var {
            Var::Slot(truck, slot) => self.slots[truck.index()][slot],
            Var::Depot => self.depot,
        }
    }

    pub fn slot(&self, truck: Truck, slot: usize) -> Domain {
        self.slots[truck.index()][slot]
    }

    pub fn depot(&self) -> Domain {
        self.depot
    }

    /// The value of a variable, if its domain is a singleton.
    pub fn fixed(&self, var: Var) -> Option<Value> {
        self.domain(var).value()
    }

    /// Returns `true` once every variable has a single value.
    pub fn is_complete(&self) -> bool {
        self.depot.is_fixed() && self.slots.iter().flatten().all(|d| d.is_fixed())
    }

    /// Incremented on every domain change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces a domain. An empty domain is a conflict and leaves the
    /// state unchanged.
    pub fn set(&mut self, var: Var, domain: Domain) -> Result<(), Conflict> {
        let previous = self.domain(var);
        if domain == previous {
            return Ok(());
        }
        if domain.is_empty() {
            return Err(Conflict);
        }
        self.trail.push(TrailEntry::Domain { var, previous });
        self.revision += 1;
        match var {
            Var::Slot(truck, slot) => {
                self.slots[truck.index()][slot] = domain;
                if let Some(Some(place)) = domain.value() {
                    self.paths.assign(truck, slot, place);
                    self.trail.push(TrailEntry::Assign { truck, slot });
                }
            }
            Var::Depot => self.depot = domain,
        }
        Ok(())
    }

    /// Keeps only the values also in `allowed`.
    pub fn restrict(&mut self, var: Var, allowed: Domain) -> Result<(), Conflict> {
        self.set(var, self.domain(var).intersect(allowed))
    }

    /// Removes the values in `excluded`.
    pub fn exclude(&mut self, var: Var, excluded: Domain) -> Result<(), Conflict> {
        self.set(var, self.domain(var).difference(excluded))
    }

    pub fn remove(&mut self, var: Var, value: Value) -> Result<(), Conflict> {
        self.set(var, self.domain(var).without(value))
    }

    pub fn fix(&mut self, var: Var, value: Value) -> Result<(), Conflict> {
        self.restrict(var, Domain::singleton(value))
    }

    /// Slots of `truck` whose domain still contains `value`.
    pub fn candidates(&self, truck: Truck, value: Value) -> impl Iterator<Item = usize> + '_ {
        self.slots[truck.index()]
            .iter()
            .enumerate()
            .filter(move |(_, d)| d.contains(value))
            .map(|(i, _)| i)
    }

    /// Removes `value` from every slot of `truck` not already fixed to it.
    pub fn clear_unfixed(&mut self, truck: Truck, value: Value) -> Result<(), Conflict> {
        for slot in 0..self.max_path_length() {
            let d = self.slot(truck, slot);
            if d.contains(value) && !d.is_fixed() {
                self.remove(Var::Slot(truck, slot), value)?;
            }
        }
        Ok(())
    }

    /// Removes `value` from every slot of `truck`.
    pub fn forbid(&mut self, truck: Truck, value: Value) -> Result<(), Conflict> {
        for slot in 0..self.max_path_length() {
            self.remove(Var::Slot(truck, slot), value)?;
        }
        Ok(())
    }

    /// Bounds `(lo, hi)` on a truck's path length implied by the slot
    /// domains: slots before `lo` are certainly present, slot `hi` (if any)
    /// is certainly absent.
    pub fn length_bounds(&self, truck: Truck) -> (usize, usize) {
        let slots = &self.slots[truck.index()];
        let m = slots.len();
        let lo = slots.iter().position(|d| d.contains_absent()).unwrap_or(m);
        let hi = slots.iter().position(|&d| d == Domain::ABSENT).unwrap_or(m);
        (lo, hi)
    }

    /// Records a point the state can be rewound to.
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(self.trail.len());
    }

    /// Undoes every change since the most recent checkpoint.
    ///
    /// Returns `false` if there was no checkpoint.
    pub fn rewind(&mut self) -> bool {
        let Some(mark) = self.checkpoints.pop() else {
            return false;
        };
        while self.trail.len() > mark {
            match self.trail.pop() {
                Some(TrailEntry::Domain { var, previous }) => match var {
                    Var::Slot(truck, slot) => self.slots[truck.index()][slot] = previous,
                    Var::Depot => self.depot = previous,
                },
                Some(TrailEntry::Assign { truck, slot }) => self.paths.retract(truck, slot),
                None => break,
            }
        }
        self.revision += 1;
        true
    }

    /// Depth of nested checkpoints.
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Place;

    fn ctx() -> SearchContext {
        SearchContext::new(PlaceRegistry::new(1).expect("valid"))
    }

    #[test]
    fn test_root_domains() {
        let c = ctx();
        assert_eq!(c.max_path_length(), 5);
        assert_eq!(c.depot().size(), 5);
        assert_eq!(c.slot(Truck::A, 4).size(), 5);
        assert!(!c.is_complete());
        assert_eq!(c.length_bounds(Truck::A), (0, 5));
    }

    #[test]
    fn test_empty_domain_is_conflict() {
        let mut c = ctx();
        let before = c.revision();
        assert_eq!(c.set(Var::Depot, Domain::EMPTY), Err(Conflict));
        assert_eq!(c.revision(), before);
        assert_eq!(c.depot().size(), 5);

        c.fix(Var::Depot, None).expect("absent allowed");
        assert_eq!(c.fix(Var::Depot, Some(Place::new(1))), Err(Conflict));
    }

    #[test]
    fn test_fixing_assigns_path() {
        let mut c = ctx();
        c.fix(Var::Slot(Truck::A, 2), Some(Place::new(3)))
            .expect("in domain");
        assert_eq!(c.paths().slot(Truck::A, 2), Some(Place::new(3)));
        assert_eq!(c.paths().count(Truck::A, Place::new(3)), 1);

        c.fix(Var::Slot(Truck::A, 4), None).expect("absent allowed");
        assert_eq!(c.paths().slot(Truck::A, 4), None);
        assert_eq!(c.length_bounds(Truck::A), (0, 4));
    }

    #[test]
    fn test_nested_rewind() {
        let mut c = ctx();
        c.checkpoint();
        c.remove(Var::Depot, None).expect("non-empty");
        c.checkpoint();
        c.fix(Var::Slot(Truck::B, 1), Some(Place::new(1)))
            .expect("in domain");
        c.fix(Var::Depot, Some(Place::new(1))).expect("in domain");
        assert_eq!(c.depth(), 2);

        assert!(c.rewind());
        assert_eq!(c.paths().count(Truck::B, Place::new(1)), 0);
        assert_eq!(c.depot().size(), 4);
        assert!(!c.depot().contains_absent());

        assert!(c.rewind());
        assert_eq!(c.depot().size(), 5);
        assert!(!c.rewind());
    }

    #[test]
    fn test_clear_unfixed_keeps_fixed_slot() {
        let mut c = ctx();
        let p = Some(Place::new(1));
        c.fix(Var::Slot(Truck::A, 1), p).expect("in domain");
        c.clear_unfixed(Truck::A, p).expect("no conflict");
        assert_eq!(c.candidates(Truck::A, p).collect::<Vec<_>>(), vec![1]);
        assert_eq!(c.forbid(Truck::A, p), Err(Conflict));
    }

    #[test]
    fn test_complete() {
        let mut c = ctx();
        for truck in Truck::ALL {
            for slot in 0..c.max_path_length() {
                c.fix(Var::Slot(truck, slot), None).expect("absent allowed");
            }
        }
        assert!(!c.is_complete());
        c.fix(Var::Depot, None).expect("absent allowed");
        assert!(c.is_complete());
    }
}
