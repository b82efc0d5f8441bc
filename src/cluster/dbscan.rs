//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups points by neighborhood density. Unlike k-means, it:
//!
//! - Automatically determines the number of clusters
//! - Identifies noise points (outliers)
//! - Only needs pairwise distances, never coordinates
//!
//! The last property is what makes it fit layout clustering: documents have no
//! vector embedding, only a pairwise distance `1 - similarity`.
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors.
//! - **MinPts**: Minimum neighborhood size (the point itself included) for a
//!   point to be "core".
//! - **Core point**: Has at least MinPts points within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. Compute every point's ε-neighborhood and mark core points.
//! 2. Visit points in input order. Each unlabeled core point seeds a new
//!    cluster, which grows breadth-first through ε-neighborhoods of core
//!    points. Border points join the first cluster that reaches them.
//! 3. Anything left unlabeled is noise.
//!
//! Cluster ids are therefore numbered by their lowest-index core point, which
//! makes labels stable for a given input ordering.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) neighborhood queries over a precomputed matrix.
//! - **Space**: O(n²) worst case for neighborhoods.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use super::traits::{PrecomputedClustering, NOISE};
use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use std::collections::VecDeque;

/// DBSCAN over a precomputed distance matrix.
#[derive(Debug, Clone)]
pub struct Dbscan {
    /// Epsilon: maximum distance for neighborhood.
    eps: f64,
    /// Minimum neighborhood size for core point classification.
    min_samples: usize,
}

/// Full output of a DBSCAN run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbscanFit {
    /// One label per point, [`NOISE`] for outliers.
    pub labels: Vec<i32>,
    /// Indices of core points, ascending.
    pub core_samples: Vec<usize>,
    /// Number of clusters found.
    pub n_clusters: usize,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `eps` - Maximum distance between two points to be neighbors.
    /// * `min_samples` - Minimum neighborhood size, the point itself included.
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set minimum neighborhood size for core classification.
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Neighborhood radius.
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Minimum neighborhood size.
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Reject parameters that would make results meaningless.
    pub fn validate(&self) -> Result<()> {
        validate_params(self.eps, self.min_samples)
    }

    /// Run DBSCAN, returning labels plus core samples.
    pub fn fit(&self, distances: &DistanceMatrix) -> Result<DbscanFit> {
        self.validate()?;

        let n = distances.len();
        let neighborhoods: Vec<Vec<usize>> =
            (0..n).map(|i| distances.neighbors(i, self.eps)).collect();
        let is_core: Vec<bool> = neighborhoods
            .iter()
            .map(|nb| nb.len() >= self.min_samples)
            .collect();

        let mut labels = vec![NOISE; n];
        let mut cluster_id: i32 = 0;

        for seed in 0..n {
            if labels[seed] != NOISE || !is_core[seed] {
                continue;
            }

            labels[seed] = cluster_id;
            let mut queue: VecDeque<usize> = neighborhoods[seed].iter().copied().collect();

            while let Some(idx) = queue.pop_front() {
                if labels[idx] != NOISE {
                    continue;
                }
                labels[idx] = cluster_id;

                // Only core points extend the cluster; border points stop here.
                if is_core[idx] {
                    queue.extend(
                        neighborhoods[idx]
                            .iter()
                            .copied()
                            .filter(|&nn| labels[nn] == NOISE),
                    );
                }
            }

            cluster_id += 1;
        }

        let core_samples = (0..n).filter(|&i| is_core[i]).collect();

        Ok(DbscanFit {
            labels,
            core_samples,
            n_clusters: cluster_id as usize,
        })
    }
}

impl Default for Dbscan {
    fn default() -> Self {
        Self::new(0.05, 2)
    }
}

impl PrecomputedClustering for Dbscan {
    fn fit_predict(&self, distances: &DistanceMatrix) -> Result<Vec<i32>> {
        Ok(self.fit(distances)?.labels)
    }
}

pub(crate) fn validate_params(eps: f64, min_samples: usize) -> Result<()> {
    if !eps.is_finite() || eps < 0.0 {
        return Err(Error::InvalidParameter {
            name: "eps",
            message: "must be a finite non-negative number",
        });
    }

    if min_samples == 0 {
        return Err(Error::InvalidParameter {
            name: "min_samples",
            message: "must be at least 1",
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::is_noise;
    use ndarray::Array2;

    /// Distance matrix for points on a line.
    fn line(points: &[f64]) -> DistanceMatrix {
        let n = points.len();
        let values = Array2::from_shape_fn((n, n), |(i, j)| (points[i] - points[j]).abs());
        DistanceMatrix::from_array(values).unwrap()
    }

    #[test]
    fn test_dbscan_two_clusters() {
        let d = line(&[0.0, 0.01, 0.02, 0.5, 0.51, 0.52]);
        let labels = Dbscan::new(0.05, 2).fit_predict(&d).unwrap();

        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
        assert!(labels.iter().all(|&l| !is_noise(l)));
    }

    #[test]
    fn test_dbscan_with_noise() {
        let d = line(&[0.0, 0.01, 0.02, 0.9]);
        let fit = Dbscan::new(0.05, 2).fit(&d).unwrap();

        assert_eq!(fit.labels, vec![0, 0, 0, NOISE]);
        assert_eq!(fit.n_clusters, 1);
        assert_eq!(fit.core_samples, vec![0, 1, 2]);
    }

    #[test]
    fn test_dbscan_border_point() {
        // Points 1 and 2 are core with min_samples=3; 0 and 3 are borders.
        let d = line(&[0.0, 0.04, 0.08, 0.12]);
        let fit = Dbscan::new(0.05, 3).fit(&d).unwrap();

        assert_eq!(fit.core_samples, vec![1, 2]);
        assert_eq!(fit.labels, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_dbscan_border_does_not_bridge() {
        // 0.07 is within eps of both groups but is not core itself,
        // so it joins the first group and the groups stay apart.
        let d = line(&[0.0, 0.01, 0.02, 0.03, 0.07, 0.11, 0.12, 0.13, 0.14]);
        let fit = Dbscan::new(0.045, 4).fit(&d).unwrap();

        assert!(!fit.core_samples.contains(&4));
        assert_eq!(fit.n_clusters, 2);
        assert_eq!(fit.labels, vec![0, 0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_dbscan_all_noise() {
        let d = line(&[0.0, 1.0, 2.0, 3.0]);
        let labels = Dbscan::new(0.5, 2).fit_predict(&d).unwrap();
        assert!(labels.iter().all(|&l| l == NOISE));
    }

    #[test]
    fn test_dbscan_chain() {
        // Chain of points - DBSCAN should connect them
        let points: Vec<f64> = (0..10).map(|i| i as f64 * 0.03).collect();
        let labels = Dbscan::new(0.05, 2).fit_predict(&line(&points)).unwrap();
        assert!(labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_dbscan_single_point() {
        let d = line(&[0.0]);
        assert_eq!(Dbscan::default().fit_predict(&d).unwrap(), vec![NOISE]);
        // A point is its own neighbor, so min_samples=1 makes it a cluster.
        assert_eq!(Dbscan::new(0.05, 1).fit_predict(&d).unwrap(), vec![0]);
    }

    #[test]
    fn test_dbscan_empty() {
        let d = DistanceMatrix::from_array(Array2::zeros((0, 0))).unwrap();
        let fit = Dbscan::default().fit(&d).unwrap();
        assert!(fit.labels.is_empty());
        assert_eq!(fit.n_clusters, 0);
    }

    #[test]
    fn test_dbscan_eps_boundary_inclusive() {
        let d = line(&[0.0, 0.25]);
        let labels = Dbscan::new(0.25, 2).fit_predict(&d).unwrap();
        assert_eq!(labels, vec![0, 0]);
    }

    #[test]
    fn test_dbscan_invalid_params() {
        let d = line(&[0.0, 0.1]);

        assert!(Dbscan::new(-0.1, 2).fit_predict(&d).is_err());
        assert!(Dbscan::new(f64::NAN, 2).fit_predict(&d).is_err());
        assert!(Dbscan::new(f64::INFINITY, 2).fit_predict(&d).is_err());
        assert!(Dbscan::new(0.05, 0).fit_predict(&d).is_err());
        // Zero radius is allowed.
        assert!(Dbscan::new(0.0, 2).fit_predict(&d).is_ok());
    }

    #[test]
    fn test_dbscan_builder() {
        let dbscan = Dbscan::default().with_eps(0.2).with_min_samples(3);
        assert_eq!(dbscan.eps(), 0.2);
        assert_eq!(dbscan.min_samples(), 3);

        // Two points can never reach three neighbors.
        let labels = dbscan.fit_predict(&line(&[0.0, 0.1])).unwrap();
        assert_eq!(labels, vec![NOISE, NOISE]);
        let labels = dbscan.with_min_samples(2).fit_predict(&line(&[0.0, 0.1])).unwrap();
        assert_eq!(labels, vec![0, 0]);
    }

    #[test]
    fn test_dbscan_labels_stable() {
        let d = line(&[0.5, 0.0, 0.51, 0.01]);
        let dbscan = Dbscan::default();
        let first = dbscan.fit_predict(&d).unwrap();
        assert_eq!(first, vec![0, 1, 0, 1]);
        assert_eq!(dbscan.fit_predict(&d).unwrap(), first);
    }
}
