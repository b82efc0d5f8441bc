//! Clustering traits.

use crate::error::Result;
use crate::matrix::DistanceMatrix;

/// Label assigned to points that belong to no cluster.
pub const NOISE: i32 = -1;

/// Check if a label represents noise.
pub fn is_noise(label: i32) -> bool {
    label < 0
}

/// Trait for clustering algorithms that consume a precomputed distance matrix.
pub trait PrecomputedClustering {
    /// Fit the model to pairwise distances and return cluster assignments.
    ///
    /// Returns one label per row: a non-negative cluster id, or [`NOISE`].
    fn fit_predict(&self, distances: &DistanceMatrix) -> Result<Vec<i32>>;
}
