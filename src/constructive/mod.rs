//! Constructive solutions without a depot.
//!
//! Both trucks serve only their own customers, so every solution built here
//! is feasible. They serve as a baseline and as an optional warm start for
//! the search.
//!
//! - [`independent_service`] — customers in ascending id order (the naive bound)
//! - [`nearest_neighbor_service`] — greedy nearest-neighbor order per truck, O(n²)

mod naive;
mod nearest_neighbor;

pub use naive::independent_service;
pub use nearest_neighbor::nearest_neighbor_service;
