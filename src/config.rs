//! Pipeline configuration.

use crate::cluster::validate_params;
use crate::error::Result;
use crate::similarity::Aggregation;

/// Parameters for [`cluster_html_layouts`](crate::cluster_html_layouts).
///
/// `eps` is a distance radius on `1 - similarity`, so `eps = 0.05` means two
/// pages are neighbors when their layout similarity is at least 0.95.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    /// DBSCAN neighborhood radius (default: 0.05).
    pub eps: f64,
    /// DBSCAN minimum neighborhood size, the document itself included (default: 2).
    pub min_samples: usize,
    /// Emit `info` progress events (default: false).
    pub show_progress: bool,
    /// How per-layer similarities are combined (default: mean).
    pub aggregation: Aggregation,
    /// Use the `rayon` pool when the `parallel` feature is enabled (default: true).
    pub parallel: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            eps: 0.05,
            min_samples: 2,
            show_progress: false,
            aggregation: Aggregation::Mean,
            parallel: true,
        }
    }
}

impl ClusterConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neighborhood radius.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set the minimum neighborhood size.
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Enable or disable progress events.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Set per-layer aggregation.
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Enable or disable parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check parameters. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        validate_params(self.eps, self.min_samples)
    }
}
