//! The best solution found so far and the bound it implies.

use std::sync::{Arc, Mutex, PoisonError};

use crate::models::Solution;

/// Holds the incumbent solution.
///
/// A solution is accepted only if it costs strictly less than
/// [`bound`](Incumbent::bound); accepting it lowers the bound to its cost.
pub trait Incumbent {
    /// Exclusive upper limit on the cost of acceptable solutions.
    fn bound(&self) -> u64;

    /// Offers a solution. Returns `true` if it became the incumbent.
    fn offer(&mut self, solution: Solution) -> bool;
}

#[derive(Debug, Clone)]
struct State {
    bound: u64,
    best: Option<Solution>,
}

impl State {
    fn offer(&mut self, solution: Solution) -> bool {
        if solution.cost() >= self.bound {
            return false;
        }
        self.bound = solution.cost();
        self.best = Some(solution);
        true
    }
}

/// Incumbent owned by a single search.
#[derive(Debug, Clone)]
pub struct LocalIncumbent {
    state: State,
}

impl LocalIncumbent {
    /// Starts without a solution; only costs below `bound` are accepted.
    pub fn new(bound: u64) -> Self {
        Self {
            state: State { bound, best: None },
        }
    }

    /// Starts from a known solution.
    pub fn with_solution(solution: Solution) -> Self {
        Self {
            state: State {
                bound: solution.cost(),
                best: Some(solution),
            },
        }
    }

    pub fn best(&self) -> Option<&Solution> {
        self.state.best.as_ref()
    }

    pub fn into_best(self) -> Option<Solution> {
        self.state.best
    }
}

impl Incumbent for LocalIncumbent {
    fn bound(&self) -> u64 {
        self.state.bound
    }

    fn offer(&mut self, solution: Solution) -> bool {
        self.state.offer(solution)
    }
}

/// Incumbent shared between search workers.
///
/// Clones refer to the same state. Every read takes the lock, so workers
/// always see the latest bound.
#[derive(Debug, Clone)]
pub struct SharedIncumbent {
    state: Arc<Mutex<State>>,
}

impl SharedIncumbent {
    pub fn new(bound: u64) -> Self {
        Self::from_local(LocalIncumbent::new(bound))
    }

    /// Shares a local incumbent.
    pub fn from_local(local: LocalIncumbent) -> Self {
        Self {
            state: Arc::new(Mutex::new(local.state)),
        }
    }

    /// A copy of the current best solution.
    pub fn best(&self) -> Option<Solution> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .best
            .clone()
    }
}

impl Incumbent for SharedIncumbent {
    fn bound(&self) -> u64 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).bound
    }

    fn offer(&mut self, solution: Solution) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .offer(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Place, Route, Truck};

    fn solution(distance_a: u64, distance_b: u64) -> Solution {
        let a = Route::new(Truck::A, vec![Place::new(0), Place::new(0)], distance_a);
        let b = Route::new(Truck::B, vec![Place::new(2), Place::new(2)], distance_b);
        Solution::new(None, a, b)
    }

    #[test]
    fn test_local_accepts_strictly_better() {
        let mut inc = LocalIncumbent::new(11);
        assert!(!inc.offer(solution(11, 3)));
        assert!(inc.offer(solution(10, 3)));
        assert_eq!(inc.bound(), 10);
        assert!(!inc.offer(solution(4, 10)));
        assert!(inc.offer(solution(4, 9)));
        assert_eq!(inc.best().map(Solution::cost), Some(9));
    }

    #[test]
    fn test_with_solution_sets_bound() {
        let inc = LocalIncumbent::with_solution(solution(7, 5));
        assert_eq!(inc.bound(), 7);
        assert!(inc.into_best().is_some());
    }

    #[test]
    fn test_shared_clones_see_updates() {
        let mut a = SharedIncumbent::new(100);
        let b = a.clone();
        assert!(a.offer(solution(40, 50)));
        assert_eq!(b.bound(), 50);
        assert_eq!(b.best().map(|s| s.cost()), Some(50));
    }
}
