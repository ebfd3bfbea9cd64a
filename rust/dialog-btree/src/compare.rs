use std::cmp::Ordering;

/// A total order over keys of type `Key`.
///
/// A [`BTree`](crate::BTree) consults its comparator for every key
/// comparison, so the comparator must be consistent for the lifetime of the
/// tree. Any `Fn(&Key, &Key) -> Ordering` closure is a comparator.
pub trait Comparator<Key: ?Sized> {
    /// Compares two keys.
    fn compare(&self, left: &Key, right: &Key) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<Key> Comparator<Key> for NaturalOrder
where
    Key: Ord + ?Sized,
{
    fn compare(&self, left: &Key, right: &Key) -> Ordering {
        left.cmp(right)
    }
}

impl<Key, F> Comparator<Key> for F
where
    Key: ?Sized,
    F: Fn(&Key, &Key) -> Ordering,
{
    fn compare(&self, left: &Key, right: &Key) -> Ordering {
        self(left, right)
    }
}
