//! # shapeclust
//!
//! Group HTML documents that share a structural template (pages rendered from
//! the same site layout), judging purely on DOM shape.
//!
//! ```text
//! raw HTML ─► TagTree ─► LayerFeatures ─► max-width layer
//!                              │
//!                              ▼
//!          pairwise layer-wise cosine ─► SimilarityMatrix ─► DBSCAN ─► clusters
//! ```
//!
//! The single entry point is [`cluster_html_layouts`]. Every stage is also
//! public for callers that want features, matrices or labels on their own.
//!
//! **Default build** runs per-document extraction and pairwise similarity on a
//! `rayon` pool (feature `parallel`). Progress and diagnostics go through
//! `tracing`; install a subscriber to see them.

pub mod cluster;
pub mod config;
pub mod dom;
/// Error types used across `shapeclust`.
pub mod error;
pub mod matrix;
pub mod metrics;
pub mod pipeline;
mod progress;
pub mod similarity;


pub use cluster::{regroup, Dbscan, DbscanFit, PrecomputedClustering, NOISE};
pub use config::ClusterConfig;
pub use dom::{LayerCounts, LayerFeatures, TagNode, TagTree};
pub use error::{Error, Result};
pub use matrix::{DistanceMatrix, MatrixBuilder, SimilarityMatrix};
pub use pipeline::{
    cluster_html_layouts, cluster_html_layouts_with_cancel, extract_features, LayoutClustering,
};
pub use similarity::{comparison_depth, layer_similarity, similarity, similarity_with, Aggregation};
