//! Dense integer distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A dense n×n matrix of nonnegative integer distances, row-major.
///
/// Diagonal entries are ignored: they are stored as zero whatever the
/// input says, since a truck never travels from a place to itself except
/// on the trivial `[warehouse, warehouse]` tour.
///
/// # Examples
///
/// ```
/// use u_splitroute::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[vec![9, 5], vec![5, 9]]).expect("valid");
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.get(1, 1), 0);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<u64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Builds a matrix from explicit rows, validating shape and sign.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, ConfigError> {
        let size = rows.len();
        let mut dm = Self::new(size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ConfigError::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: size,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                if value < 0 {
                    return Err(ConfigError::NegativeDistance {
                        from: i,
                        to: j,
                        value,
                    });
                }
                dm.set(i, j, value as u64);
            }
        }
        Ok(dm)
    }

    /// Creates a distance matrix from a flat row-major grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<u64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        let mut dm = Self { data, size };
        for i in 0..size {
            dm.set(i, i, 0);
        }
        Some(dm)
    }

    /// Euclidean distances between integer grid points, rounded to the
    /// nearest integer.
    pub fn from_coordinates(points: &[(i64, i64)]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = (points[i].0 - points[j].0) as f64;
                let dy = (points[i].1 - points[j].1) as f64;
                let d = dx.hypot(dy).round() as u64;
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: u64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `d(i, j) == d(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Largest entry.
    pub fn max_distance(&self) -> u64 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Upper bound on the length of any walk of `legs` legs, or `None` if
    /// it does not fit in a `u64`.
    pub fn max_walk_distance(&self, legs: usize) -> Option<u64> {
        self.max_distance().checked_mul(u64::try_from(legs).ok()?)
    }
}
