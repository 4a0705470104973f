//! # llrb_tree - ordered container engine
//!
//! A left-leaning red-black tree keyed by a caller-supplied total order.
//!
//! Modules:
//! - `compare` for the comparator contract
//! - `tree` for insert, delete, lookup and validation
//! - `traverse` for the four lazy traversal orders
//! - `config` for optional post-mutation invariant checking

mod compare;
mod config;
mod error;
mod node;
mod traverse;
mod tree;

pub use compare::{Compare, NaturalOrder};
pub use config::{CheckMode, TreeConfig};
pub use error::{ConfigError, ConfigResult, TreeError, TreeResult};
pub use traverse::{Order, Traversal};
pub use tree::{LlrbTree, Lookup, TreeStats, height_bound};
