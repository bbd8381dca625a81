use core::cmp::Ordering;

/// A strict total order over keys.
///
/// The same order is used to sort entries during bulk loading and to navigate the tree
/// afterwards, so it must stay consistent for the lifetime of the tree.
///
/// Closures work directly:
///
/// ```
/// use bulk_btree::{BTree, Config};
///
/// let tree = BTree::build_by([(1, 'a'), (2, 'b'), (3, 'c')], Config::new(2, 0), |a: &i32, b: &i32| b.cmp(a)).unwrap();
/// assert_eq!(tree.get(&2), Some(&'b'));
/// ```
pub trait KeyOrder<K> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: Ord> KeyOrder<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K, F> KeyOrder<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
