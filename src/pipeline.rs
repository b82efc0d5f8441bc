//! End-to-end layout clustering.
//!
//! ```text
//! HTML ─► TagTree ─► LayerFeatures ─► SimilarityMatrix ─► 1 - s ─► DBSCAN ─► regroup
//!         (per doc, parallel)         (per pair, parallel)
//! ```
//!
//! The pipeline is a pure function of its inputs: no state survives a call.

use crate::cluster::{is_noise, regroup, Dbscan, PrecomputedClustering};
use crate::config::ClusterConfig;
use crate::dom::LayerFeatures;
use crate::error::{Error, Result};
use crate::matrix::{DistanceMatrix, MatrixBuilder, SimilarityMatrix};
use crate::progress::Progress;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of clustering a batch of documents.
///
/// `clusters` borrows from the input batch; it is a view, not a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutClustering<'a> {
    /// One label per input document: cluster id, or `-1` for noise.
    pub labels: Vec<i32>,
    /// Pairwise layout similarity, symmetric with unit diagonal.
    pub similarity: SimilarityMatrix,
    /// `1 - similarity`, the input that was clustered.
    pub distance: DistanceMatrix,
    /// Documents grouped by ascending label, noise excluded.
    pub clusters: Vec<Vec<&'a str>>,
}

impl LayoutClustering<'_> {
    /// Number of clusters (noise excluded).
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Indices of documents labeled as noise.
    pub fn noise_indices(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| is_noise(l))
            .map(|(i, _)| i)
            .collect()
    }

    /// Fraction of documents labeled as noise (0 for an empty batch).
    pub fn noise_ratio(&self) -> f64 {
        crate::metrics::noise_ratio(&self.labels)
    }
}

/// Cluster HTML documents by DOM layout.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `config` is invalid; this is checked before
/// any work, including for an empty batch.
///
/// # Example
///
/// ```rust
/// use shapeclust::{cluster_html_layouts, ClusterConfig};
///
/// let page = "<html><body><ul><li>a</li><li>b</li><li>c</li></ul></body></html>";
/// let table = "<html><body><table><tr><td>x</td><td>y</td><td>z</td></tr></table></body></html>";
/// let docs = [page, page, table];
///
/// let result = cluster_html_layouts(&docs, &ClusterConfig::default()).unwrap();
/// assert_eq!(result.labels, vec![0, 0, -1]);
/// assert_eq!(result.clusters, vec![vec![page, page]]);
/// ```
pub fn cluster_html_layouts<'a, S>(
    docs: &'a [S],
    config: &ClusterConfig,
) -> Result<LayoutClustering<'a>>
where
    S: AsRef<str> + Sync,
{
    run(docs, config, None)
}

/// Like [`cluster_html_layouts`], but stops with [`Error::Cancelled`] once
/// `cancel` is set. A cancelled run never returns partial results.
pub fn cluster_html_layouts_with_cancel<'a, S>(
    docs: &'a [S],
    config: &ClusterConfig,
    cancel: &AtomicBool,
) -> Result<LayoutClustering<'a>>
where
    S: AsRef<str> + Sync,
{
    run(docs, config, Some(cancel))
}

/// Extract layer features for every document, in input order.
pub fn extract_features<S>(docs: &[S], config: &ClusterConfig) -> Result<Vec<LayerFeatures>>
where
    S: AsRef<str> + Sync,
{
    extract(docs, config, None)
}

fn run<'a, S>(
    docs: &'a [S],
    config: &ClusterConfig,
    cancel: Option<&AtomicBool>,
) -> Result<LayoutClustering<'a>>
where
    S: AsRef<str> + Sync,
{
    config.validate()?;

    let n = docs.len();
    tracing::debug!(
        documents = n,
        pairs = n * n.saturating_sub(1) / 2,
        eps = config.eps,
        min_samples = config.min_samples,
        "clustering html layouts"
    );
    if config.show_progress {
        tracing::info!("clustering {n} html documents");
    }

    let features = extract(docs, config, cancel)?;

    let mut builder = MatrixBuilder::new()
        .with_aggregation(config.aggregation)
        .with_parallel(config.parallel)
        .with_progress(config.show_progress);
    if let Some(flag) = cancel {
        builder = builder.with_cancel(flag);
    }
    let similarity = builder.build(&features)?;
    let distance = similarity.to_distance();

    let labels = Dbscan::new(config.eps, config.min_samples).fit_predict(&distance)?;

    let texts: Vec<&'a str> = docs.iter().map(|doc| doc.as_ref()).collect();
    let clusters: Vec<Vec<&'a str>> = regroup(&texts, &labels)?
        .into_iter()
        .map(|group| group.into_iter().copied().collect())
        .collect();

    let n_noise = labels.iter().filter(|&&l| is_noise(l)).count();
    tracing::debug!(clusters = clusters.len(), noise = n_noise, "clustering finished");
    if config.show_progress {
        tracing::info!("clusters={} noise={}", clusters.len(), n_noise);
    }

    Ok(LayoutClustering {
        labels,
        similarity,
        distance,
        clusters,
    })
}

fn extract<S>(
    docs: &[S],
    config: &ClusterConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<LayerFeatures>>
where
    S: AsRef<str> + Sync,
{
    let progress = Progress::new("feature extraction", docs.len(), config.show_progress);
    let one = |doc: &S| -> Result<LayerFeatures> {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(Error::Cancelled);
        }
        let features = LayerFeatures::from_html(doc.as_ref());
        progress.tick();
        Ok(features)
    };

    #[cfg(feature = "parallel")]
    {
        if config.parallel {
            return docs.par_iter().map(one).collect();
        }
    }

    docs.iter().map(one).collect()
}
