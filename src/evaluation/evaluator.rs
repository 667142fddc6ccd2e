//! Route evaluator for the max-distance objective.

use crate::models::{Instance, PathState, Place, Route, Solution, Truck};
use crate::propagation::{Domain, SearchContext};

/// Computes round-trip distances and bounds on the objective.
///
/// A truck's distance is the sum of the distances between consecutive
/// places of its path; the cost of a solution is the larger of the two.
///
/// # Examples
///
/// ```
/// use u_splitroute::evaluation::RouteEvaluator;
/// use u_splitroute::models::{Instance, Place, Truck};
///
/// let instance = Instance::from_rows(1, &[
///     vec![0, 10, 100, 100],
///     vec![10, 0, 100, 100],
///     vec![100, 100, 0, 7],
///     vec![100, 100, 7, 0],
/// ]).expect("valid instance");
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let route = evaluator.naive_tour(Truck::B);
/// assert_eq!(route.places(), &[Place::new(2), Place::new(3), Place::new(2)]);
/// assert_eq!(route.distance(), 14);
/// assert_eq!(evaluator.naive_bound(), 20);
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
    /// Cheapest distance into each place from any other place.
    cheapest_arrival: Vec<u64>,
}

/// What the fixed slots of one truck already commit it to.
struct Commitments {
    fixed_edges: u64,
    placed: Domain,
    reachable: Domain,
    closed: bool,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        let registry = instance.registry();
        let cheapest_arrival = registry
            .places()
            .map(|to| {
                registry
                    .places()
                    .filter(|&from| from != to)
                    .map(|from| instance.distance(from, to))
                    .min()
                    .unwrap_or(0)
            })
            .collect();
        Self {
            instance,
            cheapest_arrival,
        }
    }

    /// Sum of the distances along a sequence of places.
    pub fn path_distance(&self, places: &[Place]) -> u64 {
        places.windows(2).fold(0u64, |total, pair| {
            total.saturating_add(self.instance.distance(pair[0], pair[1]))
        })
    }

    /// Builds a route and computes its distance.
    pub fn build_route(&self, truck: Truck, places: Vec<Place>) -> Route {
        let distance = self.path_distance(&places);
        Route::new(truck, places, distance)
    }

    /// Builds the solution described by fully assigned paths.
    pub fn solution(&self, paths: &PathState, depot: Option<Place>) -> Solution {
        let [a, b] = Truck::ALL.map(|truck| self.build_route(truck, paths.visits(truck)));
        Solution::new(depot, a, b)
    }

    /// Recomputes the cost of a solution from the distance matrix.
    pub fn evaluate(&self, solution: &Solution) -> u64 {
        solution
            .routes()
            .iter()
            .map(|route| self.path_distance(route.places()))
            .max()
            .unwrap_or(0)
    }

    /// The independent-service tour: own warehouse, own customers in
    /// ascending order, own warehouse.
    pub fn naive_tour(&self, truck: Truck) -> Route {
        let registry = self.instance.registry();
        let home = registry.warehouse(truck);
        let places = std::iter::once(home)
            .chain(registry.customers(truck))
            .chain(std::iter::once(home))
            .collect();
        self.build_route(truck, places)
    }

    /// Cost of both trucks serving only their own customers.
    ///
    /// Every optimal solution costs at most this much.
    pub fn naive_bound(&self) -> u64 {
        Truck::ALL
            .iter()
            .map(|&truck| self.naive_tour(truck).distance())
            .max()
            .unwrap_or(0)
    }

    /// Lower bound on the cost of any completion of a partial assignment.
    ///
    /// Combines three relaxations, each a valid bound on its own:
    ///
    /// - per truck, the cheapest edge into every slot that is certainly
    ///   present ([`truck_lower_bound`](Self::truck_lower_bound));
    /// - per truck, the edges into its fixed slots plus the cheapest
    ///   arrival at every customer only that truck can still serve, and at
    ///   its warehouse when the truck must still come home;
    /// - half the same quantity summed over both trucks, where every
    ///   customer not yet placed anywhere contributes its cheapest arrival.
    ///
    /// A customer not fixed in any slot of a path must occupy one of its
    /// open slots, and distinct customers occupy distinct slots, so none
    /// of these arrivals is counted twice.
    pub fn lower_bound(&self, ctx: &SearchContext) -> u64 {
        let registry = self.instance.registry();
        let commitments = Truck::ALL.map(|truck| self.commitments(ctx, truck));
        let depot = ctx.depot().value().flatten();

        let mut busy = Truck::ALL.map(|truck| {
            let home = Some(registry.warehouse(truck));
            commitments[truck.index()].placed.without(home).has_places()
        });
        let mut forced = [0u64; 2];
        let mut unplaced = 0u64;
        for customer in registry.all_customers() {
            let arrival = self.arrival(customer);
            let value = Some(customer);
            let required: usize = if depot == Some(customer) { 2 } else { 1 };
            let placed = commitments
                .iter()
                .filter(|c| c.placed.contains(value))
                .count();
            let missing = required.saturating_sub(placed) as u64;
            unplaced = unplaced.saturating_add(arrival.saturating_mul(missing));

            for truck in Truck::ALL {
                let i = truck.index();
                if commitments[i].placed.contains(value) {
                    continue;
                }
                let other = &commitments[truck.other().index()];
                if depot == Some(customer) || !other.reachable.contains(value) {
                    forced[i] = forced[i].saturating_add(arrival);
                    busy[i] = true;
                }
            }
        }

        let mut total = unplaced;
        let mut best = 0u64;
        for truck in Truck::ALL {
            let i = truck.index();
            let own = &commitments[i];
            let closing = if busy[i] && !own.closed {
                self.arrival(registry.warehouse(truck))
            } else {
                0
            };
            total = total.saturating_add(own.fixed_edges).saturating_add(closing);
            let committed = own
                .fixed_edges
                .saturating_add(forced[i])
                .saturating_add(closing);
            best = best
                .max(committed)
                .max(self.truck_lower_bound(ctx, truck));
        }
        best.max(total.div_ceil(2))
    }

    /// Lower bound on one truck's round-trip distance.
    ///
    /// Counts the cheapest possible distance of every edge whose target
    /// slot is certainly present.
    pub fn truck_lower_bound(&self, ctx: &SearchContext, truck: Truck) -> u64 {
        let mut total = 0u64;
        for slot in 1..ctx.max_path_length() {
            let to = ctx.slot(truck, slot);
            if to.contains_absent() {
                continue;
            }
            total = total.saturating_add(self.cheapest_edge(ctx.slot(truck, slot - 1), to));
        }
        total
    }

    fn commitments(&self, ctx: &SearchContext, truck: Truck) -> Commitments {
        let home = self.instance.registry().warehouse(truck);
        let mut commitments = Commitments {
            fixed_edges: 0,
            placed: Domain::EMPTY,
            reachable: Domain::EMPTY,
            closed: false,
        };
        for slot in 0..ctx.max_path_length() {
            let domain = ctx.slot(truck, slot);
            commitments.reachable = commitments.reachable.union(domain);
            let Some(Some(place)) = domain.value() else {
                continue;
            };
            commitments.placed = commitments.placed.union(domain);
            if slot > 0 {
                let edge = self.cheapest_edge(ctx.slot(truck, slot - 1), domain);
                commitments.fixed_edges = commitments.fixed_edges.saturating_add(edge);
                commitments.closed |= place == home;
            }
        }
        commitments
    }

    fn arrival(&self, place: Place) -> u64 {
        self.cheapest_arrival[place.index()]
    }

    fn cheapest_edge(&self, from: Domain, to: Domain) -> u64 {
        from.iter_places()
            .flat_map(|a| to.iter_places().map(move |b| (a, b)))
            .map(|(a, b)| self.instance.distance(a, b))
            .min()
            .unwrap_or(0)
    }
}
