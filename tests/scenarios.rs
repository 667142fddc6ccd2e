//! End-to-end scenarios with one customer per warehouse.
//!
//! Places: A = 0, A1 = 1, B = 2, B1 = 3.

use u_splitroute::config::{ProblemConfig, SolverConfig};
use u_splitroute::models::{Place, Truck};
use u_splitroute::search::{SolveResult, SolveStatus, Solver};

fn solve_json(json: &str, config: SolverConfig) -> (ProblemConfig, SolveResult) {
    let problem = ProblemConfig::from_json(json).expect("valid json");
    let instance = problem.clone().into_instance().expect("valid instance");
    (problem, Solver::new(config).solve(&instance))
}

const SEPARATE: &str = r#"{
    "customers_per_warehouse": 1,
    "distances": [
        [0, 12, 300, 300],
        [12, 0, 300, 300],
        [300, 300, 0, 9],
        [300, 300, 9, 0]
    ]
}"#;

const EXCHANGE: &str = r#"{
    "customers_per_warehouse": 1,
    "distances": [
        [0, 100, 100, 50],
        [100, 0, 5, 50],
        [100, 5, 0, 50],
        [50, 50, 50, 0]
    ]
}"#;

#[test]
fn test_expensive_crossing_serves_independently() {
    let (_, result) = solve_json(SEPARATE, SolverConfig::default());
    assert_eq!(result.status, SolveStatus::Optimal);
    let solution = result.solution.expect("solution");
    assert_eq!(solution.depot(), None);
    assert_eq!(solution.cost(), (2 * 12u64).max(2 * 9));
    assert_eq!(
        solution.route(Truck::A).places(),
        &[Place::new(0), Place::new(1), Place::new(0)]
    );
    assert_eq!(
        solution.route(Truck::B).places(),
        &[Place::new(2), Place::new(3), Place::new(2)]
    );
    assert_eq!(result.naive_bound, 24);
}

#[test]
fn test_cheap_crossing_uses_depot() {
    init_tracing();
    let (problem, result) = solve_json(EXCHANGE, SolverConfig::default());
    assert_eq!(result.status, SolveStatus::Optimal);
    let solution = result.solution.expect("solution");
    assert!(solution.cost() < result.naive_bound);

    let depot = solution.depot().expect("depot");
    for truck in Truck::ALL {
        assert_eq!(solution.route(truck).occurrences(depot), 1);
    }
    assert_eq!(solution.cost(), 105);
    assert_eq!(problem.customers_per_warehouse, 1);
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_report_text() {
    init_tracing();
    let problem = ProblemConfig::from_json(EXCHANGE).expect("valid json");
    let instance = problem.into_instance().expect("valid instance");
    let result = Solver::default().solve(&instance);
    let text = result
        .solution
        .as_ref()
        .expect("solution")
        .display(instance.registry())
        .to_string();
    assert_eq!(
        text,
        "truck A (distance 100): A -> B1 -> A\n\
         truck B (distance 105): B -> B1 -> A1 -> B\n\
         depot: B1"
    );
}

#[test]
fn test_result_serializes() {
    let (_, result) = solve_json(SEPARATE, SolverConfig::default());
    let value = serde_json::to_value(&result).expect("serializable");
    assert_eq!(value["status"], "Optimal");
    assert_eq!(value["naive_bound"], 24);
    assert!(value["solution"]["depot"].is_null());
}

#[test]
fn test_idempotent() {
    let (_, first) = solve_json(EXCHANGE, SolverConfig::default());
    for _ in 0..3 {
        let (_, again) = solve_json(EXCHANGE, SolverConfig::default());
        assert_eq!(again.cost(), first.cost());
        assert_eq!(again.solution, first.solution);
        assert_eq!(again.stats.nodes, first.stats.nodes);
    }
}

#[test]
fn test_tighter_bound_keeps_optimum() {
    let (_, plain) = solve_json(EXCHANGE, SolverConfig::default());
    let (_, tight) = solve_json(EXCHANGE, SolverConfig::default().with_upper_bound(150));
    assert_eq!(tight.status, SolveStatus::Optimal);
    assert_eq!(tight.cost(), plain.cost());
    assert!(tight.stats.nodes <= plain.stats.nodes);
}

#[test]
fn test_config_errors_before_search() {
    let err = ProblemConfig::from_json(
        r#"{"customers_per_warehouse": 1, "distances": [[0, 1, 2], [1, 0, 2], [2, 2, 0]]}"#,
    )
    .expect("valid json")
    .into_instance()
    .unwrap_err();
    assert!(err.to_string().contains("expected 4"));

    let err = ProblemConfig::from_json(
        r#"{"customers_per_warehouse": 1, "distances": [[0, 1, 2, 3], [1, 0, 2], [2, 2, 0, 1], [3, 2, 1, 0]]}"#,
    )
    .expect("valid json")
    .into_instance()
    .unwrap_err();
    assert!(err.to_string().contains("row 1"));
}
