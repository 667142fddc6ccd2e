//! Cooperative stop conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::SolverConfig;

/// Conditions under which the search stops before exhausting the tree.
///
/// Consulted once per node, between branch decisions.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    deadline: Option<Instant>,
    node_limit: Option<u64>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    /// No limits: the search runs to completion.
    pub fn none() -> Self {
        Self::default()
    }

    /// Limits taken from a solver configuration, measured from `start`.
    pub fn from_config(
        config: &SolverConfig,
        start: Instant,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            deadline: config
                .time_limit_ms
                .and_then(|ms| start.checked_add(Duration::from_millis(ms))),
            node_limit: config.node_limit,
            cancel,
        }
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Returns `true` if the search must stop after `nodes` expansions.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.node_limit.is_some_and(|limit| nodes >= limit) {
            return true;
        }
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
