//! DOM shape extraction.
//!
//! Layout clustering never looks at text, attributes, or styles. A document is
//! reduced to the multiset of element tags found at each depth:
//!
//! ```text
//! depth 0 │ html
//! depth 1 │ head body
//! depth 2 │ title meta div div div
//! depth 3 │ nav ul p
//! depth 4 │ a a a li li li li li ...
//! ```
//!
//! - [`TagTree`]: element-only tree parsed with a lenient HTML5 parser.
//! - [`LayerFeatures`]: per-depth tag counts, plus the "max-width layer"
//!   (the depth with the most elements), which usually holds a page's
//!   repeating content grid.

mod layers;
mod tree;

pub use layers::{LayerCounts, LayerFeatures};
pub use tree::{TagNode, TagTree};
