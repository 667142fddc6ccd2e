//! Complete solutions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Place, PlaceRegistry, Route, Truck};

/// A complete assignment of the depot and both truck routes.
///
/// The cost is the longer of the two round trips.
///
/// # Examples
///
/// ```
/// use u_splitroute::models::{Place, Route, Solution, Truck};
///
/// let a = Route::new(Truck::A, vec![Place::new(0), Place::new(1), Place::new(0)], 20);
/// let b = Route::new(Truck::B, vec![Place::new(2), Place::new(3), Place::new(2)], 14);
/// let sol = Solution::new(None, a, b);
/// assert_eq!(sol.cost(), 20);
/// assert_eq!(sol.depot(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    depot: Option<Place>,
    routes: [Route; 2],
}

impl Solution {
    /// Creates a solution from the depot choice and the two routes.
    pub fn new(depot: Option<Place>, route_a: Route, route_b: Route) -> Self {
        Self {
            depot,
            routes: [route_a, route_b],
        }
    }

    /// The exchange place, or `None` if the trucks never meet.
    pub fn depot(&self) -> Option<Place> {
        self.depot
    }

    /// The route of one truck.
    pub fn route(&self, truck: Truck) -> &Route {
        &self.routes[truck.index()]
    }

    /// Both routes, truck A first.
    pub fn routes(&self) -> &[Route; 2] {
        &self.routes
    }

    /// Objective value: the longer round trip.
    pub fn cost(&self) -> u64 {
        self.routes.iter().map(Route::distance).max().unwrap_or(0)
    }

    /// Sum of both path lengths.
    pub fn total_path_length(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Renders the solution with place labels from `registry`.
    pub fn display<'a>(&'a self, registry: &'a PlaceRegistry) -> SolutionDisplay<'a> {
        SolutionDisplay {
            solution: self,
            registry,
        }
    }
}

/// Human-readable rendering of a [`Solution`], see [`Solution::display`].
pub struct SolutionDisplay<'a> {
    solution: &'a Solution,
    registry: &'a PlaceRegistry,
}

impl SolutionDisplay<'_> {
    fn label(&self, place: Place) -> String {
        if self.registry.contains(place) {
            self.registry.label(place)
        } else {
            format!("?{place}")
        }
    }
}

impl fmt::Display for SolutionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for route in self.solution.routes() {
            let labels: Vec<String> = route
                .places()
                .iter()
                .map(|&p| self.label(p))
                .collect();
            writeln!(
                f,
                "truck {} (distance {}): {}",
                route.truck(),
                route.distance(),
                labels.join(" -> ")
            )?;
        }
        match self.solution.depot() {
            Some(depot) => write!(f, "depot: {}", self.label(depot)),
            None => write!(f, "depot: none"),
        }
    }
}
