//! Problem instance.

use super::{Place, PlaceRegistry};
use crate::distance::DistanceMatrix;
use crate::error::ConfigError;

/// A validated problem instance: the place layout and the distances
/// between every pair of places.
///
/// Immutable for the duration of a solve.
///
/// # Examples
///
/// ```
/// use u_splitroute::models::{Instance, Place};
///
/// let instance = Instance::from_rows(1, &[
///     vec![0, 10, 100, 100],
///     vec![10, 0, 100, 100],
///     vec![100, 100, 0, 7],
///     vec![100, 100, 7, 0],
/// ]).expect("valid instance");
/// assert_eq!(instance.distance(Place::new(2), Place::new(3)), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    registry: PlaceRegistry,
    distances: DistanceMatrix,
}

impl Instance {
    /// Combines a registry and a matrix of matching size.
    ///
    /// Every route length, plus one for the strict incumbent bound, must
    /// fit in a `u64`.
    pub fn new(registry: PlaceRegistry, distances: DistanceMatrix) -> Result<Self, ConfigError> {
        if distances.size() != registry.num_places() {
            return Err(ConfigError::WrongSize {
                actual: distances.size(),
                expected: registry.num_places(),
                customers_per_warehouse: registry.customers_per_warehouse(),
            });
        }
        let legs = registry.max_path_length() - 1;
        if !distances
            .max_walk_distance(legs)
            .is_some_and(|longest| longest < u64::MAX)
        {
            return Err(ConfigError::DistanceOverflow {
                max_distance: distances.max_distance(),
                legs,
            });
        }
        Ok(Self {
            registry,
            distances,
        })
    }

    /// Validates raw configuration values and builds an instance.
    pub fn from_rows(
        customers_per_warehouse: usize,
        rows: &[Vec<i64>],
    ) -> Result<Self, ConfigError> {
        let registry = PlaceRegistry::new(customers_per_warehouse)?;
        if rows.len() != registry.num_places() {
            return Err(ConfigError::WrongSize {
                actual: rows.len(),
                expected: registry.num_places(),
                customers_per_warehouse,
            });
        }
        let distances = DistanceMatrix::from_rows(rows)?;
        Self::new(registry, distances)
    }

    /// The place layout.
    pub fn registry(&self) -> &PlaceRegistry {
        &self.registry
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between two places.
    pub fn distance(&self, from: Place, to: Place) -> u64 {
        self.distances.get(from.index(), to.index())
    }
}
