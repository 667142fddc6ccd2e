//! # u-splitroute
//!
//! Exact solver for the two-warehouse split-delivery routing problem.
//!
//! Two warehouses, A and B, each own a disjoint set of customers and one
//! truck. Every truck leaves its warehouse, visits some places and returns.
//! The trucks may exchange goods once, at a shared depot place, after which
//! each may serve the other warehouse's customers. The objective is to
//! minimize the longer of the two round trips.
//!
//! ## Modules
//!
//! - [`models`] — Places, trucks, the per-truck path representation, routes and solutions
//! - [`distance`] — Integer distance matrix
//! - [`evaluation`] — Round-trip distances, naive upper bound, partial lower bounds
//! - [`constructive`] — Independent-service baseline solution
//! - [`propagation`] — Domains, trail and the feasibility propagators
//! - [`search`] — Branch-and-bound search engine and solver entry point
//! - [`config`] — Problem and solver configuration
//! - [`generator`] — Seeded random instances for tests and benchmarks
//!
//! ## Example
//!
//! ```
//! use u_splitroute::config::{ProblemConfig, SolverConfig};
//! use u_splitroute::search::{Solver, SolveStatus};
//!
//! let config = ProblemConfig::from_json(r#"{
//!     "customers_per_warehouse": 1,
//!     "distances": [
//!         [0, 10, 100, 100],
//!         [10, 0, 100, 100],
//!         [100, 100, 0, 7],
//!         [100, 100, 7, 0]
//!     ]
//! }"#).expect("valid json");
//! let instance = config.into_instance().expect("valid instance");
//!
//! let result = Solver::new(SolverConfig::default()).solve(&instance);
//! assert_eq!(result.status, SolveStatus::Optimal);
//! assert_eq!(result.cost(), Some(20));
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod models;
pub mod propagation;
pub mod search;
