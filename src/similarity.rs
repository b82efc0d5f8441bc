//! Layer-wise cosine similarity between two documents.
//!
//! # The Metric
//!
//! Each layer of a document is a sparse vector over tag names. Two documents
//! are compared layer by layer, from the root down to a comparison depth `D`:
//!
//! ```text
//! s_L = cos(a_L, b_L) = (a_L · b_L) / (‖a_L‖ ‖b_L‖)      L = 0..=D
//! sim(a, b) = Σ w_L s_L / Σ w_L
//! ```
//!
//! With [`Aggregation::Mean`] every layer has weight 1, so neither page's
//! arbitrary depth dominates. [`Aggregation::WidthWeighted`] weights a layer
//! by the number of elements both pages have there, which favors the
//! repeating content grid.
//!
//! A layer that either document does not reach scores 0, penalizing depth
//! mismatch. An all-zero vector also scores 0.
//!
//! # Comparison Depth
//!
//! Pages from different templates have their diagnostic structure at
//! different depths. A pair is compared down to the truncated mean of the two
//! pages' max-width layers (see [`comparison_depth`]).

use crate::dom::{LayerCounts, LayerFeatures};

/// How per-layer similarities are combined into one score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Aggregation {
    /// Arithmetic mean across compared layers.
    #[default]
    Mean,
    /// Mean weighted by the combined width of each layer in both documents.
    WidthWeighted,
}

/// Comparison depth for a pair: `(a + b) / 2`, halves rounded down.
pub fn comparison_depth(max_width_a: usize, max_width_b: usize) -> usize {
    (max_width_a + max_width_b) / 2
}

/// Cosine similarity of two tag-count vectors.
///
/// Tags missing from one side count as 0. Returns 0 if either vector is
/// all-zero.
pub fn layer_similarity(a: &LayerCounts, b: &LayerCounts) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    // Integer accumulation keeps the result exact and order-independent.
    let dot: u64 = small
        .iter()
        .filter_map(|(tag, &x)| large.get(tag).map(|&y| (x as u64) * (y as u64)))
        .sum();
    let norm_a = squared_norm(a);
    let norm_b = squared_norm(b);

    if norm_a == 0 || norm_b == 0 {
        return 0.0;
    }

    let cos = dot as f64 / ((norm_a as f64) * (norm_b as f64)).sqrt();
    cos.clamp(0.0, 1.0)
}

/// Similarity of two documents over layers `0..=depth`, averaged.
pub fn similarity(a: &LayerFeatures, b: &LayerFeatures, depth: usize) -> f64 {
    similarity_with(a, b, depth, Aggregation::Mean)
}

/// Similarity of two documents over layers `0..=depth` with a chosen aggregation.
///
/// The result is clamped to `[0, 1]`.
pub fn similarity_with(
    a: &LayerFeatures,
    b: &LayerFeatures,
    depth: usize,
    aggregation: Aggregation,
) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for layer in 0..=depth {
        let score = match (a.layer(layer), b.layer(layer)) {
            (Some(la), Some(lb)) => layer_similarity(la, lb),
            _ => 0.0,
        };
        let weight = match aggregation {
            Aggregation::Mean => 1.0,
            Aggregation::WidthWeighted => (a.width(layer) + b.width(layer)) as f64,
        };
        weighted += weight * score;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return 0.0;
    }
    (weighted / total_weight).clamp(0.0, 1.0)
}

/// Similarity of a pair at the depth derived from their max-width layers.
pub fn pair_similarity(a: &LayerFeatures, b: &LayerFeatures, aggregation: Aggregation) -> f64 {
    let depth = comparison_depth(a.max_width_layer(), b.max_width_layer());
    similarity_with(a, b, depth, aggregation)
}

fn squared_norm(counts: &LayerCounts) -> u64 {
    counts.values().map(|&c| (c as u64) * (c as u64)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counts(pairs: &[(&str, usize)]) -> LayerCounts {
        pairs.iter().map(|&(t, c)| (t.to_string(), c)).collect()
    }

    #[test]
    fn test_comparison_depth_rounds_half_down() {
        assert_eq!(comparison_depth(4, 4), 4);
        assert_eq!(comparison_depth(3, 4), 3);
        assert_eq!(comparison_depth(4, 3), 3);
        assert_eq!(comparison_depth(0, 1), 0);
        assert_eq!(comparison_depth(2, 8), 5);
        assert_eq!(comparison_depth(0, 0), 0);
    }

    #[test]
    fn test_pair_similarity_truncates_depth() {
        let list = LayerFeatures::from_html("<ul><li></li><li></li><li></li></ul>");
        let nested = LayerFeatures::from_html(
            "<ul><li><span></span><span></span></li><li><span></span><span></span></li>\
             <li><span></span><span></span></li></ul>",
        );
        assert_eq!(list.max_width_layer(), 3);
        assert_eq!(nested.max_width_layer(), 4);

        // Depth 3 stops above the span layer that only `nested` has.
        assert_eq!(pair_similarity(&list, &nested, Aggregation::Mean), 1.0);
        assert!((similarity(&list, &nested, 4) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_layer_similarity_identical_is_one() {
        let a = counts(&[("div", 3), ("span", 7), ("a", 2)]);
        assert_eq!(layer_similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_layer_similarity_scale_invariant() {
        let a = counts(&[("li", 2), ("a", 1)]);
        let b = counts(&[("li", 20), ("a", 10)]);
        assert!((layer_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_layer_similarity_disjoint_is_zero() {
        let a = counts(&[("li", 4)]);
        let b = counts(&[("td", 4)]);
        assert_eq!(layer_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_layer_similarity_zero_vector() {
        let a = counts(&[]);
        let b = counts(&[("td", 4)]);
        assert_eq!(layer_similarity(&a, &b), 0.0);
        assert_eq!(layer_similarity(&a, &a), 0.0);
    }

    #[test]
    fn test_layer_similarity_known_value() {
        // (1,1) vs (1,0): cos = 1/sqrt(2)
        let a = counts(&[("div", 1), ("p", 1)]);
        let b = counts(&[("div", 1)]);
        let expected = 1.0 / 2f64.sqrt();
        assert!((layer_similarity(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_missing_layers_penalized() {
        let shallow = LayerFeatures::from_layers(vec![vec![("html", 1)], vec![("body", 1)]]);
        let deep = LayerFeatures::from_layers(vec![
            vec![("html", 1)],
            vec![("body", 1)],
            vec![("div", 1)],
            vec![("p", 1)],
        ]);
        // Layers 0 and 1 match, layers 2 and 3 are missing from `shallow`.
        assert!((similarity(&shallow, &deep, 3) - 0.5).abs() < 1e-12);
        assert_eq!(similarity(&shallow, &deep, 1), 1.0);
    }

    #[test]
    fn test_width_weighted_aggregation() {
        let a = LayerFeatures::from_layers(vec![vec![("html", 1)], vec![("li", 9)]]);
        let b = LayerFeatures::from_layers(vec![vec![("html", 1)], vec![("td", 9)]]);
        // Mean: (1 + 0) / 2; weighted: (2*1 + 18*0) / 20.
        assert!((similarity_with(&a, &b, 1, Aggregation::Mean) - 0.5).abs() < 1e-12);
        assert!((similarity_with(&a, &b, 1, Aggregation::WidthWeighted) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_empty_features() {
        let empty = LayerFeatures::default();
        assert_eq!(similarity(&empty, &empty, 0), 0.0);
        assert_eq!(
            similarity_with(&empty, &empty, 2, Aggregation::WidthWeighted),
            0.0
        );
    }

    #[test]
    fn test_pair_similarity_from_html() {
        let a = LayerFeatures::from_html("<body><ul><li></li><li></li><li></li></ul></body>");
        let b = LayerFeatures::from_html("<body><ul><li></li><li></li><li></li><li></li></ul></body>");
        let c = LayerFeatures::from_html("<body><table><tr><td></td><td></td><td></td></tr></table></body>");

        let ab = pair_similarity(&a, &b, Aggregation::Mean);
        let ac = pair_similarity(&a, &c, Aggregation::Mean);
        assert_eq!(ab, 1.0);
        assert!(ac < 0.7, "list vs table too similar: {ac}");
    }

    fn arb_features() -> impl Strategy<Value = LayerFeatures> {
        const TAGS: [&str; 5] = ["div", "span", "a", "li", "p"];
        prop::collection::vec(prop::collection::vec((0usize..5, 1usize..6), 1..4), 1..6).prop_map(
            |layers| {
                LayerFeatures::from_layers(
                    layers
                        .into_iter()
                        .map(|layer| layer.into_iter().map(|(t, c)| (TAGS[t], c))),
                )
            },
        )
    }

    proptest! {
        #[test]
        fn prop_similarity_symmetric_and_bounded(
            a in arb_features(),
            b in arb_features(),
            depth in 0usize..8,
        ) {
            for agg in [Aggregation::Mean, Aggregation::WidthWeighted] {
                let ab = similarity_with(&a, &b, depth, agg);
                let ba = similarity_with(&b, &a, depth, agg);
                prop_assert_eq!(ab, ba);
                prop_assert!((0.0..=1.0).contains(&ab));
            }
        }

        #[test]
        fn prop_self_similarity_is_one(a in arb_features()) {
            let depth = a.max_width_layer();
            prop_assert_eq!(similarity(&a, &a, depth), 1.0);
            prop_assert_eq!(similarity_with(&a, &a, depth, Aggregation::WidthWeighted), 1.0);
        }
    }
}
