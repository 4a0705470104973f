use std::cmp::Ordering;

/// Three-way comparator used to order the items of a tree.
///
/// Implementations must be a strict weak ordering: antisymmetric,
/// transitive, and with incomparability acting as equivalence. Items that
/// compare `Equal` are the same stored key. An inconsistent comparator
/// scrambles the order of the tree but never its memory safety.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders items by their own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Compare<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
