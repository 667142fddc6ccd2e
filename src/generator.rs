//! Seeded random instances.
//!
//! Places are scattered uniformly over a square grid and distances are the
//! rounded Euclidean distances between them, so generated instances are
//! symmetric and satisfy the triangle inequality up to rounding.

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::ConfigError;
use crate::models::{Instance, PlaceRegistry};

/// Builds a random instance with `customers_per_warehouse` customers per
/// warehouse on a `grid × grid` square.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_splitroute::generator::random_instance;
///
/// let a = random_instance(2, 100, &mut StdRng::seed_from_u64(42)).expect("valid");
/// let b = random_instance(2, 100, &mut StdRng::seed_from_u64(42)).expect("valid");
/// assert_eq!(a, b);
/// assert_eq!(a.registry().num_places(), 6);
/// ```
pub fn random_instance<R: Rng + ?Sized>(
    customers_per_warehouse: usize,
    grid: i64,
    rng: &mut R,
) -> Result<Instance, ConfigError> {
    let registry = PlaceRegistry::new(customers_per_warehouse)?;
    let side = grid.max(1);
    let points: Vec<(i64, i64)> = (0..registry.num_places())
        .map(|_| (rng.random_range(0..side), rng.random_range(0..side)))
        .collect();
    Instance::new(registry, DistanceMatrix::from_coordinates(&points))
}
