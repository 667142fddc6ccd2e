//! Place registry: warehouses, customers and the customer partition.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Truck;
use crate::error::ConfigError;

/// Smallest supported number of customers per warehouse.
pub const MIN_CUSTOMERS_PER_WAREHOUSE: usize = 1;

/// Largest supported number of customers per warehouse.
pub const MAX_CUSTOMERS_PER_WAREHOUSE: usize = 6;

/// Shortest possible path: a truck that leaves and immediately returns.
pub const MIN_PATH_LENGTH: usize = 2;

/// Identifier of a warehouse or customer.
///
/// Ids are dense and 0-based; they index rows and columns of the
/// [`DistanceMatrix`](crate::distance::DistanceMatrix).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Place(u8);

impl Place {
    /// Creates a place from its id.
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The numeric id, usable as a matrix index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a place is and which warehouse it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceKind {
    WarehouseA,
    WarehouseB,
    CustomerOfA,
    CustomerOfB,
}

impl PlaceKind {
    /// The warehouse (and truck) this place belongs to.
    pub fn owner(self) -> Truck {
        match self {
            PlaceKind::WarehouseA | PlaceKind::CustomerOfA => Truck::A,
            PlaceKind::WarehouseB | PlaceKind::CustomerOfB => Truck::B,
        }
    }

    /// Returns `true` for the two warehouses.
    pub fn is_warehouse(self) -> bool {
        matches!(self, PlaceKind::WarehouseA | PlaceKind::WarehouseB)
    }
}

/// Enumerates the places of an instance.
///
/// With `n` customers per warehouse the layout is:
///
/// | ids              | kind          |
/// |------------------|---------------|
/// | `0`              | warehouse A   |
/// | `1..=n`          | customers of A|
/// | `n+1`            | warehouse B   |
/// | `n+2..=2n+1`     | customers of B|
///
/// # Examples
///
/// ```
/// use u_splitroute::models::{PlaceKind, PlaceRegistry, Truck};
///
/// let registry = PlaceRegistry::new(2).expect("valid size");
/// assert_eq!(registry.num_places(), 6);
/// assert_eq!(registry.max_path_length(), 7);
/// assert_eq!(registry.warehouse(Truck::B).index(), 3);
/// assert_eq!(registry.kind(registry.warehouse(Truck::A)), PlaceKind::WarehouseA);
/// assert_eq!(registry.label(registry.customers(Truck::B).last().unwrap()), "B2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRegistry")]
pub struct PlaceRegistry {
    customers_per_warehouse: usize,
}

/// Unvalidated serialized form of a [`PlaceRegistry`].
#[derive(Deserialize)]
struct RawRegistry {
    customers_per_warehouse: usize,
}

impl TryFrom<RawRegistry> for PlaceRegistry {
    type Error = ConfigError;

    fn try_from(raw: RawRegistry) -> Result<Self, Self::Error> {
        Self::new(raw.customers_per_warehouse)
    }
}

impl PlaceRegistry {
    /// Creates a registry for the given number of customers per warehouse.
    pub fn new(customers_per_warehouse: usize) -> Result<Self, ConfigError> {
        if !(MIN_CUSTOMERS_PER_WAREHOUSE..=MAX_CUSTOMERS_PER_WAREHOUSE)
            .contains(&customers_per_warehouse)
        {
            return Err(ConfigError::CustomersOutOfRange {
                actual: customers_per_warehouse,
                min: MIN_CUSTOMERS_PER_WAREHOUSE,
                max: MAX_CUSTOMERS_PER_WAREHOUSE,
            });
        }
        Ok(Self {
            customers_per_warehouse,
        })
    }

    /// Customers owned by each warehouse.
    pub fn customers_per_warehouse(&self) -> usize {
        self.customers_per_warehouse
    }

    /// Total number of places, `2 * (customers_per_warehouse + 1)`.
    pub fn num_places(&self) -> usize {
        2 * (self.customers_per_warehouse + 1)
    }

    /// Number of path slots per truck, `num_places + 1`.
    pub fn max_path_length(&self) -> usize {
        self.num_places() + 1
    }

    /// The warehouse a truck starts from and returns to.
    pub fn warehouse(&self, truck: Truck) -> Place {
        match truck {
            Truck::A => Place::new(0),
            Truck::B => Place::new((self.customers_per_warehouse + 1) as u8),
        }
    }

    /// Customers owned by a truck's warehouse, in ascending id order.
    pub fn customers(&self, truck: Truck) -> impl Iterator<Item = Place> {
        let first = self.warehouse(truck).index() + 1;
        (first..first + self.customers_per_warehouse).map(|id| Place::new(id as u8))
    }

    /// Customers of both warehouses, in ascending id order.
    pub fn all_customers(&self) -> impl Iterator<Item = Place> {
        self.customers(Truck::A).chain(self.customers(Truck::B))
    }

    /// All places, in ascending id order.
    pub fn places(&self) -> impl Iterator<Item = Place> {
        (0..self.num_places()).map(|id| Place::new(id as u8))
    }

    /// Returns `true` if `place` is one of this registry's places.
    pub fn contains(&self, place: Place) -> bool {
        place.index() < self.num_places()
    }

    /// Classifies a place.
    ///
    /// # Panics
    ///
    /// Panics if `place` is not part of this registry.
    pub fn kind(&self, place: Place) -> PlaceKind {
        let id = place.index();
        let b = self.warehouse(Truck::B).index();
        assert!(id < self.num_places(), "place {id} out of range");
        if id == 0 {
            PlaceKind::WarehouseA
        } else if id < b {
            PlaceKind::CustomerOfA
        } else if id == b {
            PlaceKind::WarehouseB
        } else {
            PlaceKind::CustomerOfB
        }
    }

    /// The warehouse a place belongs to.
    pub fn owner(&self, place: Place) -> Truck {
        self.kind(place).owner()
    }

    /// Returns `true` if `place` is a customer (of either warehouse).
    pub fn is_customer(&self, place: Place) -> bool {
        !self.kind(place).is_warehouse()
    }

    /// Human-readable label: `A`, `A1`, …, `B`, `B1`, ….
    pub fn label(&self, place: Place) -> String {
        let owner = self.owner(place);
        let offset = place.index() - self.warehouse(owner).index();
        if offset == 0 {
            owner.to_string()
        } else {
            format!("{owner}{offset}")
        }
    }
}
