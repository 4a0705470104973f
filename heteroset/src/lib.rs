//! # heteroset - sets over many element types
//!
//! A [`HeteroSet`] stores values of any number of distinct types in one
//! ordered collection. Values of different types are ordered by their
//! [`TypeKey`]; values of one type by that type's own [`Element::less`].
//!
//! ```
//! use heteroset::{heteroset, intersect};
//!
//! let a = heteroset![1i64, 2i64, "two"];
//! let b = heteroset![2.0f64, "two"];
//! assert_eq!(a.cardinality(), 3);
//! assert!(a.has(&"two"));
//! assert!(!a.has(&2i32));
//! assert!(intersect(&a, &b));
//! ```

mod element;
mod order;
mod set;

pub use element::{AnyElement, Element, TypeKey};
pub use order::{BoxedElement, TypeBandOrder, compare_elements};
pub use set::{HeteroSet, Iter, disjoint, intersect};

pub use llrb_tree::{CheckMode, Order, TreeConfig};
