//! A finished truck route.

use serde::{Deserialize, Serialize};

use super::{Place, Truck};

/// The visiting sequence of one truck, from its warehouse back to it.
///
/// # Examples
///
/// ```
/// use u_splitroute::models::{Place, Route, Truck};
///
/// let route = Route::new(Truck::A, vec![Place::new(0), Place::new(1), Place::new(0)], 12);
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.distance(), 12);
/// assert!(route.visits(Place::new(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    truck: Truck,
    places: Vec<Place>,
    distance: u64,
}

impl Route {
    /// Creates a route from its places (warehouse first and last) and distance.
    pub fn new(truck: Truck, places: Vec<Place>, distance: u64) -> Self {
        Self {
            truck,
            places,
            distance,
        }
    }

    /// The truck driving this route.
    pub fn truck(&self) -> Truck {
        self.truck
    }

    /// The places in visiting order, including both warehouse endpoints.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Path length: number of slots used, endpoints included.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Returns `true` if the route has no places at all.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Round-trip distance.
    pub fn distance(&self) -> u64 {
        self.distance
    }

    /// Returns `true` if the route passes through `place`.
    pub fn visits(&self, place: Place) -> bool {
        self.places.contains(&place)
    }

    /// Number of times the route passes through `place`.
    pub fn occurrences(&self, place: Place) -> usize {
        self.places.iter().filter(|&&p| p == place).count()
    }

    /// Slot index of the first visit of `place`.
    pub fn position(&self, place: Place) -> Option<usize> {
        self.places.iter().position(|&p| p == place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_accessors() {
        let home = Place::new(3);
        let r = Route::new(
            Truck::B,
            vec![home, Place::new(4), Place::new(1), home],
            40,
        );
        assert_eq!(r.truck(), Truck::B);
        assert_eq!(r.len(), 4);
        assert!(!r.is_empty());
        assert_eq!(r.occurrences(home), 2);
        assert_eq!(r.position(Place::new(1)), Some(2));
        assert_eq!(r.position(Place::new(2)), None);
    }

    #[test]
    fn test_trivial_route() {
        let home = Place::new(0);
        let r = Route::new(Truck::A, vec![home, home], 0);
        assert_eq!(r.len(), 2);
        assert_eq!(r.distance(), 0);
        assert!(!r.visits(Place::new(1)));
    }
}
