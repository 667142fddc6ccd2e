//! Problem and solver configuration.
//!
//! [`ProblemConfig`] is the raw input as read from a document; it is
//! validated into an [`Instance`] before solving. [`SolverConfig`] holds the
//! parameters that control the search.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Instance;

/// Raw problem input: customers per warehouse and the distance matrix.
///
/// Places are numbered warehouse A, A's customers, warehouse B, B's
/// customers; the matrix is indexed in that order.
///
/// # Examples
///
/// ```
/// use u_splitroute::config::ProblemConfig;
///
/// let config = ProblemConfig::from_json(
///     r#"{"customers_per_warehouse": 1, "distances": [[0,1,2,3],[1,0,1,2],[2,1,0,1],[3,2,1,0]]}"#,
/// ).expect("valid json");
/// let instance = config.into_instance().expect("valid instance");
/// assert_eq!(instance.registry().num_places(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemConfig {
    /// Customers owned by each warehouse, in `[1, 6]`.
    pub customers_per_warehouse: usize,
    /// Square matrix of nonnegative distances, one row per place.
    pub distances: Vec<Vec<i64>>,
}

impl ProblemConfig {
    /// Creates a configuration from its parts without validating it.
    pub fn new(customers_per_warehouse: usize, distances: Vec<Vec<i64>>) -> Self {
        Self {
            customers_per_warehouse,
            distances,
        }
    }

    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the configuration and builds the instance.
    pub fn into_instance(self) -> Result<Instance, ConfigError> {
        Instance::from_rows(self.customers_per_warehouse, &self.distances)
    }
}

/// Configuration for the branch-and-bound solver.
///
/// Every limit is optional; without limits the search runs to completion
/// and the result is proven optimal.
///
/// # Defaults
///
/// ```
/// use u_splitroute::config::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.time_limit_ms, None);
/// assert_eq!(config.num_workers, 1);
/// assert!(!config.warm_start);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_splitroute::config::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_time_limit_ms(500)
///     .with_node_limit(100_000)
///     .with_upper_bound(250);
/// assert_eq!(config.node_limit, Some(100_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock budget in milliseconds.
    pub time_limit_ms: Option<u64>,

    /// Maximum number of search nodes to expand (per worker).
    pub node_limit: Option<u64>,

    /// Replaces the naive bound when smaller. Solutions costing more are
    /// never reported; a value below the optimum makes the instance
    /// infeasible.
    pub upper_bound: Option<u64>,

    /// Seeds the incumbent with the better of the depot-free constructive
    /// solutions instead of starting from the bare naive bound.
    pub warm_start: bool,

    /// Number of search workers. Values above 1 only take effect with the
    /// `parallel` feature.
    pub num_workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: None,
            node_limit: None,
            upper_bound: None,
            warm_start: false,
            num_workers: 1,
        }
    }
}

impl SolverConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    pub fn with_upper_bound(mut self, bound: u64) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    pub fn with_warm_start(mut self, enabled: bool) -> Self {
        self.warm_start = enabled;
        self
    }

    /// Sets the worker count (at least 1).
    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n.max(1);
        self
    }
}
