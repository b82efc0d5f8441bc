//! Clustering evaluation metrics.
//!
//! The pipeline never computes these itself. They exist to judge layout
//! clusterings against known page sources (which site a page came from).
//!
//! # Metrics Overview
//!
//! | Metric | Range | Best | Properties |
//! |--------|-------|------|------------|
//! | [`purity`] | [0, 1] | 1 | Simple, biased toward many clusters |
//! | [`cluster_purities`] | [0, 1] each | 1 | Per cluster, noise excluded |
//! | [`ari`] | [-1, 1] | 1 | Adjusted Rand Index, label-permutation invariant |
//! | [`noise_ratio`] | [0, 1] | 0 | Fraction of documents left unclustered |
//!
//! [`ari`] is also the right tool for comparing two runs: identical
//! memberships score 1 regardless of how cluster ids were numbered.
//!
//! # Example
//!
//! ```rust
//! use shapeclust::metrics::{ari, min_cluster_purity, noise_ratio};
//!
//! let labels = [0, 0, 1, 1, -1];
//! let sources = [0, 0, 1, 1, 1];
//!
//! assert_eq!(min_cluster_purity(&labels, &sources), Some(1.0));
//! assert!((noise_ratio(&labels) - 0.2).abs() < 1e-12);
//! assert!((ari(&labels, &[5, 5, 7, 7, -1]) - 1.0).abs() < 1e-12);
//! ```
//!
//! # References
//!
//! - Hubert & Arabie (1985). "Comparing partitions" (ARI)

use crate::cluster::{is_noise, regroup_indices};
use crate::matrix::SimilarityMatrix;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Number of distinct non-noise labels.
pub fn n_clusters(labels: &[i32]) -> usize {
    labels
        .iter()
        .filter(|&&l| !is_noise(l))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Fraction of labels that are noise. Returns 0 for empty input.
pub fn noise_ratio(labels: &[i32]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let noise = labels.iter().filter(|&&l| is_noise(l)).count();
    noise as f64 / labels.len() as f64
}

/// Purity of clustering with respect to ground truth.
///
/// For each cluster, find the most common ground truth label.
/// Purity is the fraction of correctly assigned points.
///
/// Note: Purity increases with more clusters and is 1.0 when each point
/// is its own cluster. Use with caution. Noise is treated as a label here;
/// see [`cluster_purities`] to exclude it.
pub fn purity<P, T>(pred: &[P], truth: &[T]) -> f64
where
    P: Eq + Hash + Copy,
    T: Eq + Hash + Copy,
{
    if pred.len() != truth.len() || pred.is_empty() {
        return 0.0;
    }

    let n = pred.len();
    let (joint, _) = build_contingency_table(pred, truth);

    // For each predicted cluster, find max overlap with any true class
    let mut cluster_maxes: HashMap<P, usize> = HashMap::new();

    for (&(p, _), &count) in &joint {
        let current_max = cluster_maxes.entry(p).or_insert(0);
        *current_max = (*current_max).max(count);
    }

    let correct: usize = cluster_maxes.values().sum();
    correct as f64 / n as f64
}

/// Majority-source fraction of each cluster, by ascending label.
///
/// Noise documents are ignored. Returns an empty list on length mismatch.
pub fn cluster_purities<T>(labels: &[i32], sources: &[T]) -> Vec<(i32, f64)>
where
    T: Eq + Hash + Copy,
{
    if labels.len() != sources.len() {
        return Vec::new();
    }

    regroup_indices(labels)
        .into_iter()
        .map(|members| {
            let mut counts: HashMap<T, usize> = HashMap::new();
            for &idx in &members {
                *counts.entry(sources[idx]).or_insert(0) += 1;
            }
            let majority = counts.values().copied().max().unwrap_or(0);
            (labels[members[0]], majority as f64 / members.len() as f64)
        })
        .collect()
}

/// Lowest per-cluster purity, or `None` when there are no clusters.
pub fn min_cluster_purity<T>(labels: &[i32], sources: &[T]) -> Option<f64>
where
    T: Eq + Hash + Copy,
{
    cluster_purities(labels, sources)
        .into_iter()
        .map(|(_, p)| p)
        .reduce(f64::min)
}

/// Adjusted Rand Index between two clusterings.
///
/// ARI is the corrected-for-chance version of the Rand Index.
/// A value of 0 indicates random clustering, 1 indicates perfect agreement.
///
/// # Returns
///
/// ARI score in [-1, 1]. Higher is better. 0 = random, 1 = perfect.
pub fn ari<P, T>(pred: &[P], truth: &[T]) -> f64
where
    P: Eq + Hash + Copy,
    T: Eq + Hash + Copy,
{
    if pred.len() != truth.len() || pred.is_empty() {
        return 0.0;
    }

    let (joint, n) = build_contingency_table(pred, truth);

    // Row sums (a_i) and column sums (b_j)
    let mut row_sums: HashMap<P, usize> = HashMap::new();
    let mut col_sums: HashMap<T, usize> = HashMap::new();

    for (&(p, t), &count) in &joint {
        *row_sums.entry(p).or_insert(0) += count;
        *col_sums.entry(t).or_insert(0) += count;
    }

    // Sum of C(n_ij, 2)
    let sum_comb_ij: f64 = joint.values().map(|&c| comb2(c) as f64).sum();

    // Sum of C(a_i, 2) and C(b_j, 2)
    let sum_comb_a: f64 = row_sums.values().map(|&a| comb2(a) as f64).sum();
    let sum_comb_b: f64 = col_sums.values().map(|&b| comb2(b) as f64).sum();

    let comb_n = comb2(n) as f64;
    if comb_n == 0.0 {
        return 1.0;
    }

    // ARI = (index - expected) / (max - expected)
    let expected = sum_comb_a * sum_comb_b / comb_n;
    let max_index = (sum_comb_a + sum_comb_b) / 2.0;

    let denom = max_index - expected;
    if denom.abs() < 1e-10 {
        return 1.0; // Perfect agreement when both clusterings are identical
    }

    (sum_comb_ij - expected) / denom
}

/// Intra-cluster similarity summary for one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSimilarity {
    /// Cluster label.
    pub label: i32,
    /// Number of member documents.
    pub size: usize,
    /// Mean pairwise similarity between members (1.0 for singletons).
    pub mean: f64,
    /// Lowest pairwise similarity between members.
    pub min: f64,
    /// Highest pairwise similarity between members.
    pub max: f64,
}

/// Pairwise similarity statistics inside each cluster, by ascending label.
///
/// Labels beyond the matrix bounds are skipped.
pub fn cluster_similarity_stats(
    labels: &[i32],
    similarity: &SimilarityMatrix,
) -> Vec<ClusterSimilarity> {
    let labels = &labels[..labels.len().min(similarity.len())];

    regroup_indices(labels)
        .into_iter()
        .map(|members| {
            let mut sum = 0.0;
            let mut count = 0usize;
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;

            for (pos, &i) in members.iter().enumerate() {
                for &j in &members[pos + 1..] {
                    let s = similarity.get(i, j).unwrap_or(0.0);
                    sum += s;
                    count += 1;
                    min = min.min(s);
                    max = max.max(s);
                }
            }

            let (mean, min, max) = if count == 0 {
                (1.0, 1.0, 1.0)
            } else {
                (sum / count as f64, min, max)
            };

            ClusterSimilarity {
                label: labels[members[0]],
                size: members.len(),
                mean,
                min,
                max,
            }
        })
        .collect()
}

// Helper functions

fn build_contingency_table<P, T>(pred: &[P], truth: &[T]) -> (HashMap<(P, T), usize>, usize)
where
    P: Eq + Hash + Copy,
    T: Eq + Hash + Copy,
{
    let mut table = HashMap::new();
    for (&p, &t) in pred.iter().zip(truth.iter()) {
        *table.entry((p, t)).or_insert(0) += 1;
    }
    (table, pred.len())
}

fn comb2(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}
