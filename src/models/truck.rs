//! The two trucks and their warehouses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two trucks. Each truck belongs to the warehouse of the same name.
///
/// # Examples
///
/// ```
/// use u_splitroute::models::Truck;
///
/// assert_eq!(Truck::A.other(), Truck::B);
/// assert_eq!(Truck::B.index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Truck {
    /// Truck of warehouse A.
    A,
    /// Truck of warehouse B.
    B,
}

impl Truck {
    /// Both trucks, in positional order.
    pub const ALL: [Truck; 2] = [Truck::A, Truck::B];

    /// The other truck.
    pub fn other(self) -> Self {
        match self {
            Truck::A => Truck::B,
            Truck::B => Truck::A,
        }
    }

    /// Position of this truck in per-truck arrays.
    pub fn index(self) -> usize {
        match self {
            Truck::A => 0,
            Truck::B => 1,
        }
    }
}

impl fmt::Display for Truck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truck::A => f.write_str("A"),
            Truck::B => f.write_str("B"),
        }
    }
}
