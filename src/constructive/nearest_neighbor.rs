//! Nearest-neighbor independent service.
//!
//! Each truck starts at its warehouse and repeatedly drives to the nearest
//! own customer it has not served yet, then returns home. No depot is used.
//!
//! # Complexity
//!
//! O(n²) per truck, where n = customers per warehouse.

use crate::evaluation::RouteEvaluator;
use crate::models::{Instance, Place, Solution, Truck};

/// Constructs a depot-free solution with greedy nearest-neighbor tours.
///
/// Ties are broken by the smaller place id.
///
/// # Examples
///
/// ```
/// use u_splitroute::constructive::{independent_service, nearest_neighbor_service};
/// use u_splitroute::distance::DistanceMatrix;
/// use u_splitroute::models::{Instance, PlaceRegistry};
///
/// // Warehouse A at x=0 with customers at x=3, 1, 2; B far away.
/// let dm = DistanceMatrix::from_coordinates(&[
///     (0, 0), (3, 0), (1, 0), (2, 0),
///     (100, 0), (101, 0), (102, 0), (103, 0),
/// ]);
/// let registry = PlaceRegistry::new(3).expect("valid size");
/// let instance = Instance::new(registry, dm).expect("valid instance");
///
/// assert_eq!(nearest_neighbor_service(&instance).cost(), 6);
/// assert_eq!(independent_service(&instance).cost(), 8);
/// ```
pub fn nearest_neighbor_service(instance: &Instance) -> Solution {
    let evaluator = RouteEvaluator::new(instance);
    let [a, b] = Truck::ALL.map(|truck| {
        let places = greedy_tour(instance, truck);
        evaluator.build_route(truck, places)
    });
    Solution::new(None, a, b)
}

fn greedy_tour(instance: &Instance, truck: Truck) -> Vec<Place> {
    let registry = instance.registry();
    let home = registry.warehouse(truck);
    let mut remaining: Vec<Place> = registry.customers(truck).collect();
    let mut tour = Vec::with_capacity(remaining.len() + 2);
    tour.push(home);
    let mut current = home;

    while !remaining.is_empty() {
        let mut best = 0;
        for i in 1..remaining.len() {
            if instance.distance(current, remaining[i])
                < instance.distance(current, remaining[best])
            {
                best = i;
            }
        }
        current = remaining.remove(best);
        tour.push(current);
    }

    tour.push(home);
    tour
}
