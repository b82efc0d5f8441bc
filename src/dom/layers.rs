//! Per-depth tag histograms.

use super::tree::TagTree;
use std::collections::HashMap;

/// Tag name -> number of elements with that tag at one depth.
pub type LayerCounts = HashMap<String, usize>;

/// Tag counts for every layer of a document, indexed by depth.
///
/// Layers are contiguous: if layer `L` exists, so does every layer below it,
/// and each existing layer has at least one element. The sum of counts at
/// layer `L` equals the number of elements at depth `L` of the source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerFeatures {
    layers: Vec<LayerCounts>,
}

impl LayerFeatures {
    /// Extract layer features from a tag tree.
    ///
    /// The whole tree is captured; comparisons limit depth later.
    pub fn from_tree(tree: &TagTree) -> Self {
        let mut layers = vec![LayerCounts::new(); tree.n_layers()];
        for node in tree.iter() {
            *layers[node.depth].entry(node.tag.clone()).or_insert(0) += 1;
        }
        Self { layers }
    }

    /// Parse an HTML document and extract its layer features.
    pub fn from_html(html: &str) -> Self {
        Self::from_tree(&TagTree::parse(html))
    }

    /// Build features directly from `(tag, count)` pairs per layer.
    ///
    /// Repeated tags within a layer are summed. Zero counts and empty layers
    /// are dropped, and everything after the first empty layer is ignored so
    /// the contiguity invariant holds.
    pub fn from_layers<I, L, S>(layers: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut out = Vec::new();
        for layer in layers {
            let mut counts = LayerCounts::new();
            for (tag, count) in layer {
                if count > 0 {
                    *counts.entry(tag.into()).or_insert(0) += count;
                }
            }
            if counts.is_empty() {
                break;
            }
            out.push(counts);
        }
        Self { layers: out }
    }

    /// Tag counts at a depth, if the document reaches it.
    pub fn layer(&self, depth: usize) -> Option<&LayerCounts> {
        self.layers.get(depth)
    }

    /// Number of layers.
    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    /// Check if no layers were extracted.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total element count at a depth (0 beyond the deepest layer).
    pub fn width(&self, depth: usize) -> usize {
        self.layers.get(depth).map_or(0, |counts| counts.values().sum())
    }

    /// Width of every layer, shallowest first.
    pub fn widths(&self) -> Vec<usize> {
        self.layers.iter().map(|counts| counts.values().sum()).collect()
    }

    /// Total number of elements in the document.
    pub fn total_nodes(&self) -> usize {
        self.widths().into_iter().sum()
    }

    /// Depth of the widest layer.
    ///
    /// Ties go to the shallowest layer. Returns 0 for empty features.
    pub fn max_width_layer(&self) -> usize {
        let mut best = 0;
        let mut best_width = 0;
        for (depth, width) in self.widths().into_iter().enumerate() {
            if width > best_width {
                best = depth;
                best_width = width;
            }
        }
        best
    }
}
