//! Pairwise similarity and distance matrices.
//!
//! Building the matrix is the O(n²) part of the pipeline. Each upper-triangle
//! pair `(i, j)` depends only on two read-only [`LayerFeatures`], so pairs are
//! fanned out to a `rayon` pool (feature `parallel`). Workers return
//! `(i, j, value)` triples and the matrix is written by the caller thread.

use crate::dom::LayerFeatures;
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::similarity::{comparison_depth, similarity_with, Aggregation};
use ndarray::Array2;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Symmetric N×N similarity matrix with unit diagonal and entries in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    values: Array2<f64>,
}

/// Distance matrix derived as `1 - similarity`, clipped to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Build with default settings (mean aggregation, no progress).
    pub fn build(features: &[LayerFeatures]) -> Result<Self> {
        MatrixBuilder::new().build(features)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    /// Check if the matrix is 0×0.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Similarity between documents `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get((i, j)).copied()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Convert to a distance matrix.
    pub fn to_distance(&self) -> DistanceMatrix {
        DistanceMatrix {
            values: self.values.mapv(|s| (1.0 - s).clamp(0.0, 1.0)),
        }
    }
}

impl DistanceMatrix {
    /// Wrap a precomputed square distance array.
    ///
    /// Entries are not rescaled; the caller is responsible for their meaning.
    pub fn from_array(values: Array2<f64>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows != cols {
            return Err(Error::DimensionMismatch {
                expected: rows,
                found: cols,
            });
        }
        Ok(Self { values })
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    /// Check if the matrix is 0×0.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distance between documents `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get((i, j)).copied()
    }

    /// Indices within `eps` of document `i`, including `i` itself.
    pub fn neighbors(&self, i: usize, eps: f64) -> Vec<usize> {
        self.values
            .row(i)
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d <= eps)
            .map(|(j, _)| j)
            .collect()
    }
}

/// Configures how a [`SimilarityMatrix`] is built.
#[derive(Debug, Clone, Default)]
pub struct MatrixBuilder<'a> {
    aggregation: Aggregation,
    parallel: bool,
    show_progress: bool,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> MatrixBuilder<'a> {
    /// Sequential builder with mean aggregation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set per-layer aggregation.
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Fan pairs out to the `rayon` pool. Ignored without the `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Emit progress events.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Abort with [`Error::Cancelled`] once `flag` is set.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Compute the full similarity matrix.
    pub fn build(&self, features: &[LayerFeatures]) -> Result<SimilarityMatrix> {
        let n = features.len();
        let max_layers: Vec<usize> = features.iter().map(LayerFeatures::max_width_layer).collect();

        let mut values = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            values[[i, i]] = 1.0;
        }

        for (i, j, sim) in self.pair_values(features, &max_layers)? {
            values[[i, j]] = sim;
            values[[j, i]] = sim;
        }

        Ok(SimilarityMatrix { values })
    }

    fn pair(&self, features: &[LayerFeatures], max_layers: &[usize], i: usize, j: usize) -> f64 {
        let depth = comparison_depth(max_layers[i], max_layers[j]);
        similarity_with(&features[i], &features[j], depth, self.aggregation)
    }

    fn check_cancel(&self) -> Result<()> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    fn pair_values(
        &self,
        features: &[LayerFeatures],
        max_layers: &[usize],
    ) -> Result<Vec<(usize, usize, f64)>> {
        let n = features.len();

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                let pairs: Vec<(usize, usize)> = (0..n)
                    .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
                    .collect();
                let progress = Progress::new("similarity pairs", pairs.len(), self.show_progress);
                return pairs
                    .into_par_iter()
                    .map(|(i, j)| {
                        self.check_cancel()?;
                        let sim = self.pair(features, max_layers, i, j);
                        progress.tick();
                        Ok((i, j, sim))
                    })
                    .collect();
            }
        }

        let progress = Progress::new("similarity rows", n, self.show_progress);
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                self.check_cancel()?;
                out.push((i, j, self.pair(features, max_layers, i, j)));
            }
            progress.tick();
        }
        Ok(out)
    }
}
