//! Reference model shared by the integration tests.
//!
//! Checks complete assignments directly against the routing rules and
//! enumerates every assignment of small instances, independently of the
//! propagators.

#![allow(dead_code)]

use u_splitroute::models::{Instance, Solution, Truck};

/// A complete assignment as plain place ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub depot: Option<usize>,
    pub paths: [Vec<usize>; 2],
}

impl Candidate {
    pub fn from_solution(solution: &Solution) -> Self {
        let ids = |truck| {
            solution
                .route(truck)
                .places()
                .iter()
                .map(|p| p.index())
                .collect()
        };
        Self {
            depot: solution.depot().map(|p| p.index()),
            paths: [ids(Truck::A), ids(Truck::B)],
        }
    }
}

fn warehouse(n: usize, truck: usize) -> usize {
    truck * (n + 1)
}

fn owner(n: usize, place: usize) -> usize {
    place / (n + 1)
}

fn is_warehouse(n: usize, place: usize) -> bool {
    place % (n + 1) == 0
}

fn count(path: &[usize], place: usize) -> usize {
    path.iter().filter(|&&p| p == place).count()
}

/// Checks every rule of the model on a complete assignment.
pub fn is_feasible(n: usize, c: &Candidate) -> bool {
    let places = 2 * (n + 1);
    for truck in 0..2 {
        let path = &c.paths[truck];
        let home = warehouse(n, truck);
        let foreign = warehouse(n, 1 - truck);
        if path.len() < 2 || path.len() > places + 1 {
            return false;
        }
        if path[0] != home || path[path.len() - 1] != home || count(path, home) != 2 {
            return false;
        }
        if count(path, foreign) != usize::from(c.depot == Some(foreign)) {
            return false;
        }
        if let Some(depot) = c.depot {
            for (i, &p) in path.iter().enumerate() {
                if p == depot {
                    let early = &path[1..i.max(1)];
                    if early.iter().any(|&q| is_warehouse(n, q) || owner(n, q) != truck) {
                        return false;
                    }
                }
            }
        }
    }
    for p in (0..places).filter(|&p| !is_warehouse(n, p)) {
        let (a, b) = (count(&c.paths[0], p), count(&c.paths[1], p));
        if c.depot == Some(p) {
            if a != 1 || b != 1 {
                return false;
            }
        } else if a + b != 1 {
            return false;
        }
    }
    let crossing = (0..2).any(|truck| {
        c.paths[truck]
            .iter()
            .any(|&p| !is_warehouse(n, p) && owner(n, p) != truck)
    });
    crossing == c.depot.is_some()
}

pub fn path_distance(instance: &Instance, path: &[usize]) -> u64 {
    path.windows(2)
        .map(|w| instance.distances().get(w[0], w[1]))
        .sum()
}

pub fn cost(instance: &Instance, c: &Candidate) -> u64 {
    path_distance(instance, &c.paths[0]).max(path_distance(instance, &c.paths[1]))
}

fn extend(prefix: &mut Vec<usize>, pool: &[usize], home: usize, out: &mut Vec<Vec<usize>>) {
    let mut path = prefix.clone();
    path.push(home);
    out.push(path);
    for &p in pool {
        if !prefix.contains(&p) {
            prefix.push(p);
            extend(prefix, pool, home, out);
            prefix.pop();
        }
    }
}

/// Every path of a truck that visits each non-home place at most once.
pub fn truck_paths(n: usize, truck: usize) -> Vec<Vec<usize>> {
    let home = warehouse(n, truck);
    let pool: Vec<usize> = (0..2 * (n + 1)).filter(|&p| p != home).collect();
    let mut out = Vec::new();
    extend(&mut vec![home], &pool, home, &mut out);
    out
}

/// Optimal cost by exhaustive enumeration, or `None` if infeasible.
pub fn brute_force_optimum(instance: &Instance) -> Option<u64> {
    let n = instance.registry().customers_per_warehouse();
    let paths_a = truck_paths(n, 0);
    let paths_b = truck_paths(n, 1);
    let depots: Vec<Option<usize>> = std::iter::once(None)
        .chain((0..2 * (n + 1)).map(Some))
        .collect();

    let mut best: Option<u64> = None;
    for a in &paths_a {
        let da = path_distance(instance, a);
        for b in &paths_b {
            let c = da.max(path_distance(instance, b));
            if best.is_some_and(|best| c >= best) {
                continue;
            }
            for &depot in &depots {
                let candidate = Candidate {
                    depot,
                    paths: [a.clone(), b.clone()],
                };
                if is_feasible(n, &candidate) {
                    best = Some(c);
                    break;
                }
            }
        }
    }
    best
}
