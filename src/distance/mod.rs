//! Distance matrix.

mod matrix;

pub use matrix::DistanceMatrix;
