//! Independent-service baseline.

use crate::evaluation::RouteEvaluator;
use crate::models::{Instance, Solution, Truck};

/// Builds the solution in which each truck visits its own customers in
/// ascending order and no depot is used.
///
/// Its cost is the naive upper bound of the instance.
///
/// # Examples
///
/// ```
/// use u_splitroute::constructive::independent_service;
/// use u_splitroute::models::Instance;
///
/// let instance = Instance::from_rows(1, &[
///     vec![0, 10, 100, 100],
///     vec![10, 0, 100, 100],
///     vec![100, 100, 0, 7],
///     vec![100, 100, 7, 0],
/// ]).expect("valid instance");
///
/// let solution = independent_service(&instance);
/// assert_eq!(solution.depot(), None);
/// assert_eq!(solution.cost(), 20);
/// ```
pub fn independent_service(instance: &Instance) -> Solution {
    let evaluator = RouteEvaluator::new(instance);
    let [a, b] = Truck::ALL.map(|truck| evaluator.naive_tour(truck));
    Solution::new(None, a, b)
}
