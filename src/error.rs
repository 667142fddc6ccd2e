//! Configuration errors.

use thiserror::Error;

/// An instance or configuration that cannot be solved as given.
///
/// These are reported before any search starts. Infeasibility and
/// cancellation are not errors; they are reported through
/// [`SolveStatus`](crate::search::SolveStatus).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Customers per warehouse outside the supported range.
    #[error("customers per warehouse must be in [{min}, {max}], got {actual}")]
    CustomersOutOfRange {
        actual: usize,
        min: usize,
        max: usize,
    },

    /// The distance matrix has the wrong number of rows for the instance.
    #[error(
        "distance matrix has {actual} rows, expected {expected} for {customers_per_warehouse} customers per warehouse"
    )]
    WrongSize {
        actual: usize,
        expected: usize,
        customers_per_warehouse: usize,
    },

    /// A row of the distance matrix has the wrong length.
    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A negative off-diagonal distance.
    #[error("negative distance {value} from place {from} to place {to}")]
    NegativeDistance { from: usize, to: usize, value: i64 },

    /// Distances so large that the length of a route could overflow.
    #[error("distance {max_distance} is too large for routes of up to {legs} legs")]
    DistanceOverflow { max_distance: u64, legs: usize },

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}
