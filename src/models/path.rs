//! Per-truck path slots and the cardinality tracker.

use super::{Place, PlaceRegistry, Truck};

/// The slot assignments of both trucks, with per-place occurrence counts.
///
/// Each truck owns `max_path_length` slots. A slot holds `Some(place)` once
/// a place has been assigned to it and `None` otherwise; `None` is both
/// "not decided yet" and "absent" here, and never contributes to a count.
///
/// Counts are kept in step with the slots by [`assign`](Self::assign) and
/// [`retract`](Self::retract), so `count(truck, place)` is always the number
/// of slots of `truck` holding `place`.
///
/// # Examples
///
/// ```
/// use u_splitroute::models::{PathState, PlaceRegistry, Truck};
///
/// let registry = PlaceRegistry::new(1).expect("valid size");
/// let home = registry.warehouse(Truck::A);
/// let mut paths = PathState::new(&registry);
///
/// paths.assign(Truck::A, 0, home);
/// paths.assign(Truck::A, 1, home);
/// assert_eq!(paths.count(Truck::A, home), 2);
/// assert_eq!(paths.len(Truck::A), 2);
///
/// paths.retract(Truck::A, 1);
/// assert_eq!(paths.count(Truck::A, home), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    slots: [Vec<Option<Place>>; 2],
    counts: [Vec<u8>; 2],
}

impl PathState {
    /// Creates empty paths sized for the registry.
    pub fn new(registry: &PlaceRegistry) -> Self {
        let slots = registry.max_path_length();
        let places = registry.num_places();
        Self {
            slots: [vec![None; slots], vec![None; slots]],
            counts: [vec![0; places], vec![0; places]],
        }
    }

    /// Assigns `place` to a slot, replacing whatever the slot held.
    pub fn assign(&mut self, truck: Truck, slot: usize, place: Place) {
        self.retract(truck, slot);
        let t = truck.index();
        self.slots[t][slot] = Some(place);
        self.counts[t][place.index()] += 1;
    }

    /// Clears a slot.
    pub fn retract(&mut self, truck: Truck, slot: usize) {
        let t = truck.index();
        if let Some(old) = self.slots[t][slot].take() {
            self.counts[t][old.index()] -= 1;
        }
    }

    /// The place held by a slot, if any.
    pub fn slot(&self, truck: Truck, slot: usize) -> Option<Place> {
        self.slots[truck.index()][slot]
    }

    /// All slots of a truck.
    pub fn slots(&self, truck: Truck) -> &[Option<Place>] {
        &self.slots[truck.index()]
    }

    /// Number of slots of `truck` holding `place`.
    pub fn count(&self, truck: Truck, place: Place) -> usize {
        self.counts[truck.index()][place.index()] as usize
    }

    /// Current path length: one past the last assigned slot.
    pub fn len(&self, truck: Truck) -> usize {
        self.slots(truck)
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + 1)
    }

    /// Returns `true` if no slot of `truck` is assigned.
    pub fn is_empty(&self, truck: Truck) -> bool {
        self.len(truck) == 0
    }

    /// The assigned places of a truck, in slot order.
    pub fn visits(&self, truck: Truck) -> Vec<Place> {
        self.slots(truck).iter().flatten().copied().collect()
    }
}
