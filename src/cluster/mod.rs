//! Density-based clustering over precomputed distances.
//!
//! Layout clustering has no natural vector space and no known number of
//! templates, so the clusterer must:
//!
//! - work from pairwise distances alone
//! - discover the number of clusters
//! - leave one-off pages unassigned rather than force them into a group
//!
//! [`Dbscan`] meets all three. Its labels are `i32`: a non-negative cluster id
//! or [`NOISE`] (`-1`). [`regroup`] turns labels back into groups of the
//! caller's items.
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::array;
//! use shapeclust::cluster::{regroup, Dbscan, PrecomputedClustering, NOISE};
//! use shapeclust::DistanceMatrix;
//!
//! let distances = DistanceMatrix::from_array(array![
//!     [0.0, 0.01, 0.9],
//!     [0.01, 0.0, 0.9],
//!     [0.9, 0.9, 0.0],
//! ])
//! .unwrap();
//!
//! let labels = Dbscan::new(0.05, 2).fit_predict(&distances).unwrap();
//! assert_eq!(labels, vec![0, 0, NOISE]);
//!
//! let pages = ["a.html", "b.html", "c.html"];
//! let groups = regroup(&pages, &labels).unwrap();
//! assert_eq!(groups, vec![vec![&"a.html", &"b.html"]]);
//! ```

mod dbscan;
mod regroup;
mod traits;

pub use dbscan::{Dbscan, DbscanFit};
pub(crate) use dbscan::validate_params;
pub use regroup::{regroup, regroup_indices};
pub use traits::{is_noise, PrecomputedClustering, NOISE};
