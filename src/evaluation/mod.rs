//! Objective evaluation: round-trip distances, the naive upper bound and
//! lower bounds on partial assignments.

mod evaluator;

pub use evaluator::RouteEvaluator;
