use std::fmt;
use std::iter::FusedIterator;

use llrb_tree::{LlrbTree, Order, Traversal, TreeConfig};
use tracing::debug;

use crate::element::{AnyElement, Element};
use crate::order::{BoxedElement, TypeBandOrder, compare_elements};

/// A set whose members may be of any number of different [`Element`] types.
///
/// Members are kept in one left-leaning red-black tree ordered first by
/// type key and then by each type's own `less`, so iteration yields every
/// member of one type as a contiguous ascending run.
pub struct HeteroSet {
    tree: LlrbTree<BoxedElement, TypeBandOrder>,
}

impl HeteroSet {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            tree: LlrbTree::with_comparator(TypeBandOrder).with_config(config),
        }
    }

    pub fn config(&self) -> TreeConfig {
        self.tree.config()
    }

    /// Adds `value`; a member equal to it leaves the set unchanged.
    pub fn add<V: Element>(&mut self, value: V) {
        self.insert(value);
    }

    /// Adds `value`, returning whether it was not already a member.
    pub fn insert<V: Element>(&mut self, value: V) -> bool {
        self.insert_boxed(Box::new(value))
    }

    pub fn insert_boxed(&mut self, value: BoxedElement) -> bool {
        self.tree.insert(value)
    }

    pub fn has(&self, value: &dyn AnyElement) -> bool {
        self.tree
            .find_by(|stored| compare_elements(value, stored.as_ref()))
    }

    /// Same as [`HeteroSet::has`], named after the std collections.
    #[inline]
    pub fn contains(&self, value: &dyn AnyElement) -> bool {
        self.has(value)
    }

    /// Removes `value`, returning whether it was a member.
    pub fn remove(&mut self, value: &dyn AnyElement) -> bool {
        if self.cardinality() == 0 {
            debug!(type_key = %value.type_key(), "remove on empty set skipped");
            return false;
        }
        matches!(
            self.tree
                .delete_by(|stored| compare_elements(value, stored.as_ref())),
            Ok(true)
        )
    }

    /// Number of members, kept up to date by every mutation.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Members in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        self.traverse(Order::InOrder)
    }

    pub fn traverse(&self, order: Order) -> Iter<'_> {
        Iter {
            inner: self.tree.iter_order(order),
        }
    }

    /// Whether `self` and `other` share at least one member.
    pub fn intersects(&self, other: &HeteroSet) -> bool {
        intersect(self, other)
    }

    pub fn is_disjoint(&self, other: &HeteroSet) -> bool {
        disjoint(self, other)
    }
}

impl Default for HeteroSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `a` and `b` share at least one member. Walks the smaller set and
/// stops at the first member found in the other.
pub fn intersect(a: &HeteroSet, b: &HeteroSet) -> bool {
    let (small, large) = if a.cardinality() <= b.cardinality() {
        (a, b)
    } else {
        (b, a)
    };
    small.iter().any(|value| large.has(value))
}

/// Whether `a` and `b` have no member in common.
pub fn disjoint(a: &HeteroSet, b: &HeteroSet) -> bool {
    let (small, large) = if a.cardinality() <= b.cardinality() {
        (a, b)
    } else {
        (b, a)
    };
    small.iter().all(|value| !large.has(value))
}

impl Extend<BoxedElement> for HeteroSet {
    fn extend<I: IntoIterator<Item = BoxedElement>>(&mut self, iter: I) {
        for value in iter {
            self.insert_boxed(value);
        }
    }
}

impl FromIterator<BoxedElement> for HeteroSet {
    fn from_iter<I: IntoIterator<Item = BoxedElement>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a HeteroSet {
    type Item = &'a dyn AnyElement;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for HeteroSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the members of a [`HeteroSet`].
pub struct Iter<'a> {
    inner: Traversal<'a, BoxedElement>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a dyn AnyElement;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|value| &**value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Builds a [`HeteroSet`] from a list of elements; duplicates collapse.
#[macro_export]
macro_rules! heteroset {
    () => {
        $crate::HeteroSet::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut set = $crate::HeteroSet::new();
        $(set.add($value);)+
        set
    }};
}
