//! Ordered containers built on a left-leaning red-black tree.
//!
//! [`tree`] is the engine; [`set`] layers a heterogeneous set on top of it.

pub use heteroset as set;
pub use llrb_tree as tree;

pub use heteroset::{HeteroSet, disjoint, heteroset, intersect};
pub use llrb_tree::{CheckMode, LlrbTree, Order, TreeConfig, TreeError};
