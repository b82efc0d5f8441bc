//! Reshape an input list by cluster label.

use super::traits::is_noise;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Indices of each cluster, ordered by ascending label.
///
/// Noise labels are skipped. Indices within a group keep input order.
pub fn regroup_indices(labels: &[i32]) -> Vec<Vec<usize>> {
    let mut by_label: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        if !is_noise(label) {
            by_label.entry(label).or_default().push(idx);
        }
    }
    by_label.into_values().collect()
}

/// Group borrowed items by cluster label, dropping noise.
///
/// One group per distinct non-negative label, sorted ascending; each group
/// keeps the items in input order.
pub fn regroup<'a, T>(items: &'a [T], labels: &[i32]) -> Result<Vec<Vec<&'a T>>> {
    if items.len() != labels.len() {
        return Err(Error::DimensionMismatch {
            expected: items.len(),
            found: labels.len(),
        });
    }

    Ok(regroup_indices(labels)
        .into_iter()
        .map(|group| group.into_iter().map(|idx| &items[idx]).collect())
        .collect())
}
