//! Domain model types for the two-warehouse routing problem.
//!
//! Places and their partition between the two warehouses, the trucks, the
//! slot-based path representation used during search, and the finished
//! routes and solutions handed back to callers.

mod instance;
mod path;
mod place;
mod route;
mod solution;
mod truck;

pub use instance::Instance;
pub use path::PathState;
pub use place::{
    Place, PlaceKind, PlaceRegistry, MAX_CUSTOMERS_PER_WAREHOUSE, MIN_CUSTOMERS_PER_WAREHOUSE,
    MIN_PATH_LENGTH,
};
pub use route::Route;
pub use solution::{Solution, SolutionDisplay};
pub use truck::Truck;
