//! Candidate-value domains for path slots and the depot.

use std::fmt;

use crate::models::Place;

/// A value a slot or the depot can take. `None` is "absent".
pub type Value = Option<Place>;

const ABSENT_BIT: u32 = 1 << 31;

/// A set of candidate values, stored as a bitset over place ids plus one
/// bit for absent.
///
/// Iteration yields places in ascending id order and absent last, which is
/// the value order the search tries them in.
///
/// # Examples
///
/// ```
/// use u_splitroute::models::Place;
/// use u_splitroute::propagation::Domain;
///
/// let d = Domain::places([Place::new(2), Place::new(0)]).with_absent();
/// assert_eq!(d.size(), 3);
/// let order: Vec<_> = d.iter().collect();
/// assert_eq!(order, vec![Some(Place::new(0)), Some(Place::new(2)), None]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Domain(u32);

impl Domain {
    /// No candidates left.
    pub const EMPTY: Domain = Domain(0);

    /// Only "absent".
    pub const ABSENT: Domain = Domain(ABSENT_BIT);

    /// Every place of a universe with `num_places` places, plus absent.
    pub fn full(num_places: usize) -> Self {
        Domain(((1u32 << num_places) - 1) | ABSENT_BIT)
    }

    /// The given places, without absent.
    pub fn places(places: impl IntoIterator<Item = Place>) -> Self {
        Domain(places.into_iter().fold(0, |bits, p| bits | (1 << p.index())))
    }

    /// A domain holding exactly one value.
    pub fn singleton(value: Value) -> Self {
        Domain(Self::bit(value))
    }

    fn bit(value: Value) -> u32 {
        match value {
            Some(place) => 1 << place.index(),
            None => ABSENT_BIT,
        }
    }

    /// Returns `true` if `value` is still a candidate.
    pub fn contains(self, value: Value) -> bool {
        self.0 & Self::bit(value) != 0
    }

    /// Returns `true` if absent is still a candidate.
    pub fn contains_absent(self) -> bool {
        self.0 & ABSENT_BIT != 0
    }

    /// Returns `true` if at least one place (not absent) remains.
    pub fn has_places(self) -> bool {
        self.0 & !ABSENT_BIT != 0
    }

    /// Number of remaining values, absent included.
    pub fn size(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if no value remains.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if exactly one value remains.
    pub fn is_fixed(self) -> bool {
        self.size() == 1
    }

    /// The single remaining value, if the domain is fixed.
    pub fn value(self) -> Option<Value> {
        if !self.is_fixed() {
            None
        } else if self.contains_absent() {
            Some(None)
        } else {
            Some(Some(Place::new(self.0.trailing_zeros() as u8)))
        }
    }

    /// This domain with `value` removed.
    pub fn without(self, value: Value) -> Self {
        Domain(self.0 & !Self::bit(value))
    }

    /// This domain with absent added.
    pub fn with_absent(self) -> Self {
        Domain(self.0 | ABSENT_BIT)
    }

    /// Values present in both domains.
    pub fn intersect(self, other: Domain) -> Self {
        Domain(self.0 & other.0)
    }

    /// Values of `self` that are not in `other`.
    pub fn difference(self, other: Domain) -> Self {
        Domain(self.0 & !other.0)
    }

    /// Values present in either domain.
    pub fn union(self, other: Domain) -> Self {
        Domain(self.0 | other.0)
    }

    /// Returns `true` if the two domains share a value.
    pub fn intersects(self, other: Domain) -> bool {
        self.0 & other.0 != 0
    }

    /// Places in ascending id order.
    pub fn iter_places(self) -> impl Iterator<Item = Place> {
        let mut bits = self.0 & !ABSENT_BIT;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let id = bits.trailing_zeros();
            bits &= bits - 1;
            Some(Place::new(id as u8))
        })
    }

    /// All values: places ascending, then absent.
    pub fn iter(self) -> impl Iterator<Item = Value> {
        self.iter_places()
            .map(Some)
            .chain(self.contains_absent().then_some(None))
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for place in self.iter_places() {
            set.entry(&place.index());
        }
        if self.contains_absent() {
            set.entry(&"absent");
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full() {
        let d = Domain::full(4);
        assert_eq!(d.size(), 5);
        assert!(d.contains_absent());
        assert!(d.contains(Some(Place::new(3))));
        assert!(!d.contains(Some(Place::new(4))));
    }

    #[test]
    fn test_singleton_value() {
        let p = Place::new(5);
        assert_eq!(Domain::singleton(Some(p)).value(), Some(Some(p)));
        assert_eq!(Domain::ABSENT.value(), Some(None));
        assert_eq!(Domain::full(2).value(), None);
        assert_eq!(Domain::EMPTY.value(), None);
    }

    #[test]
    fn test_set_operations() {
        let a = Domain::places([Place::new(0), Place::new(1), Place::new(2)]);
        let b = Domain::places([Place::new(1)]).with_absent();
        assert_eq!(a.intersect(b), Domain::places([Place::new(1)]));
        assert_eq!(a.difference(b), Domain::places([Place::new(0), Place::new(2)]));
        assert_eq!(a.union(b).size(), 4);
        assert!(a.intersects(b));
        assert!(!a.intersects(Domain::ABSENT));
        assert_eq!(b.without(None), Domain::places([Place::new(1)]));
        assert!(!Domain::ABSENT.has_places());
        assert!(b.has_places());
    }

    #[test]
    fn test_iteration_order() {
        let d = Domain::full(3);
        let values: Vec<Value> = d.iter().collect();
        assert_eq!(
            values,
            vec![
                Some(Place::new(0)),
                Some(Place::new(1)),
                Some(Place::new(2)),
                None
            ]
        );
        assert_eq!(Domain::EMPTY.iter().count(), 0);
    }

    #[test]
    fn test_debug() {
        let d = Domain::places([Place::new(1), Place::new(3)]).with_absent();
        assert_eq!(format!("{d:?}"), "{1, 3, \"absent\"}");
    }
}
