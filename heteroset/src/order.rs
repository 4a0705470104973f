use std::cmp::Ordering;

use llrb_tree::Compare;

use crate::element::AnyElement;

pub type BoxedElement = Box<dyn AnyElement>;

/// Orders two elements of possibly different types.
///
/// Different type keys decide the result on their own; the elements' own
/// `less` is only consulted when both share one concrete type, and two
/// values neither of which is less than the other compare `Equal`.
pub fn compare_elements(a: &dyn AnyElement, b: &dyn AnyElement) -> Ordering {
    match a.type_key().cmp(&b.type_key()) {
        Ordering::Equal => {}
        ord => return ord,
    }

    // Two distinct types registered under one key still get separate bands.
    let (a_id, b_id) = (a.as_any().type_id(), b.as_any().type_id());
    if a_id != b_id {
        return a_id.cmp(&b_id);
    }

    if a.less_than(b) {
        Ordering::Less
    } else if b.less_than(a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Tree comparator grouping elements into one contiguous band per type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeBandOrder;

impl Compare<BoxedElement> for TypeBandOrder {
    #[inline]
    fn compare(&self, a: &BoxedElement, b: &BoxedElement) -> Ordering {
        compare_elements(a.as_ref(), b.as_ref())
    }
}
