use core::cmp::Ordering;

use alloc::vec::Vec;

use super::handle::Handle;
use crate::Error;
use crate::order::KeyOrder;

/// A key paired with its value, stored inline in the owning node.
pub(crate) struct Cell<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Cell<K, V> {
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// A bounded, ordered run of cells plus the links around it.
///
/// Internal nodes hold exactly one more child than cells: `children[i]` is the left child of
/// cell `i` and `children[i + 1]` its right child, so neighbouring cells share the child
/// between them. Leaves hold no children at all.
pub(crate) struct Node<K, V> {
    cells: Vec<Cell<K, V>>,
    children: Vec<Handle>,
    // Non-owning; `None` for the root.
    parent: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// Creates an empty node with room for `cells` cells, and for their children unless it is a
    /// leaf.
    pub(crate) fn try_with_capacity(cells: usize, leaf: bool) -> Result<Self, Error> {
        let mut node = Self::from_parts(Vec::new(), Vec::new());
        node.cells.try_reserve_exact(cells)?;
        if !leaf {
            node.children.try_reserve_exact(cells + 1)?;
        }
        Ok(node)
    }

    pub(crate) const fn from_parts(cells: Vec<Cell<K, V>>, children: Vec<Handle>) -> Self {
        Self {
            cells,
            children,
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub(crate) fn cell(&self, index: usize) -> &Cell<K, V> {
        &self.cells[index]
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell<K, V> {
        &mut self.cells[index]
    }

    pub(crate) fn cells(&self) -> &[Cell<K, V>] {
        &self.cells
    }

    pub(crate) fn children(&self) -> &[Handle] {
        &self.children
    }

    #[inline]
    pub(crate) fn left_child(&self, index: usize) -> Option<Handle> {
        self.children.get(index).copied()
    }

    #[inline]
    pub(crate) fn right_child(&self, index: usize) -> Option<Handle> {
        self.children.get(index + 1).copied()
    }

    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Makes room for `additional` more cells, and as many children in an internal node.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.cells.try_reserve(additional)?;
        if !self.is_leaf() {
            self.children.try_reserve(additional)?;
        }
        Ok(())
    }

    /// Appends a cell during bulk loading.
    pub(crate) fn push(&mut self, cell: Cell<K, V>) {
        self.cells.push(cell);
    }

    /// Appends a child link during bulk loading.
    pub(crate) fn push_child(&mut self, child: Handle) {
        self.children.push(child);
    }

    /// Searches for `key`. `Ok(i)` is a hit, `Err(i)` the position it would be inserted at,
    /// which is also the index of the child covering it.
    #[inline]
    pub(crate) fn search<O: KeyOrder<K>>(&self, key: &K, order: &O) -> Result<usize, usize> {
        self.cells.binary_search_by(|cell| order.compare(&cell.key, key))
    }

    /// Inserts `cell` at `index` in a leaf.
    pub(crate) fn insert(&mut self, index: usize, cell: Cell<K, V>) {
        debug_assert!(self.is_leaf());
        self.cells.insert(index, cell);
    }

    /// Inserts a separator at `index` whose child slot used to hold a single node that has now
    /// been split into `left` and `right`.
    pub(crate) fn insert_separator(&mut self, index: usize, cell: Cell<K, V>, left: Handle, right: Handle) {
        self.cells.insert(index, cell);
        self.children[index] = left;
        self.children.insert(index + 1, right);
    }

    /// Splits an overfull node around cell `min_size`, moving the upper half into `right`.
    ///
    /// Both halves receive `min_size` cells; the middle cell is returned as the separator.
    /// Children are divided so that each half keeps the links between its own cells. `right`
    /// must be empty and already hold room for its half, so the split itself never allocates.
    pub(crate) fn split(mut self, min_size: usize, mut right: Self) -> (Self, Cell<K, V>, Self) {
        debug_assert_eq!(self.cells.len(), 2 * min_size + 1);
        debug_assert!(right.cells.is_empty() && right.children.is_empty());

        right.cells.extend(self.cells.drain(min_size + 1..));
        let separator = self.cells.pop().expect("`Node::split()` - buffer is empty!");
        if !self.is_leaf() {
            right.children.extend(self.children.drain(min_size + 1..));
        }

        let left = Self::from_parts(self.cells, self.children);
        (left, separator, right)
    }

    /// Consumes the node, returning its cells and child links.
    pub(crate) fn into_parts(self) -> (Vec<Cell<K, V>>, Vec<Handle>) {
        (self.cells, self.children)
    }
}

/// Compares the first key of a node against `key`, for checking child placement.
pub(crate) fn first_key_cmp<K, V, O: KeyOrder<K>>(node: &Node<K, V>, key: &K, order: &O) -> Option<Ordering> {
    node.cells.first().map(|cell| order.compare(&cell.key, key))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::order::Natural;
    use alloc::vec;

    fn leaf(keys: &[i32]) -> Node<i32, i32> {
        let mut node = Node::try_with_capacity(keys.len(), true).unwrap();
        for &key in keys {
            node.push(Cell::new(key, key * 10));
        }
        node
    }

    fn keys(node: &Node<i32, i32>) -> Vec<i32> {
        node.cells().iter().map(|cell| cell.key).collect()
    }

    #[test]
    fn search_reports_hit_or_insertion_point() {
        let node = leaf(&[10, 20, 30]);
        assert_eq!(node.search(&20, &Natural), Ok(1));
        assert_eq!(node.search(&5, &Natural), Err(0));
        assert_eq!(node.search(&25, &Natural), Err(2));
        assert_eq!(node.search(&35, &Natural), Err(3));
    }

    #[test]
    fn leaf_split_balances_halves() {
        let node = leaf(&[1, 2, 3, 4, 5]);
        let (left, separator, right) = node.split(2, Node::try_with_capacity(2, true).unwrap());
        assert_eq!(keys(&left), vec![1, 2]);
        assert_eq!(separator.key, 3);
        assert_eq!(separator.value, 30);
        assert_eq!(keys(&right), vec![4, 5]);
        assert!(left.is_leaf() && right.is_leaf());
    }

    #[test]
    fn internal_split_divides_children() {
        let mut node = leaf(&[10, 20, 30]);
        for index in 0..4 {
            node.push_child(Handle::new(index, 0));
        }
        let (left, separator, right) = node.split(1, Node::try_with_capacity(1, false).unwrap());
        assert_eq!(keys(&left), vec![10]);
        assert_eq!(separator.key, 20);
        assert_eq!(keys(&right), vec![30]);
        assert_eq!(left.children(), &[Handle::new(0, 0), Handle::new(1, 0)]);
        assert_eq!(right.children(), &[Handle::new(2, 0), Handle::new(3, 0)]);
    }

    #[test]
    fn oversized_reservation_is_an_error() {
        let result = Node::<u64, u64>::try_with_capacity(usize::MAX / 4, true);
        assert!(matches!(result, Err(Error::AllocationFailed(_))));
    }

    #[test]
    fn adjacent_cells_share_children() {
        let mut node = leaf(&[10, 20]);
        for index in 0..3 {
            node.push_child(Handle::new(index, 0));
        }
        assert_eq!(node.right_child(0), node.left_child(1));
        assert_eq!(node.right_child(1), Some(Handle::new(2, 0)));
    }

    #[test]
    fn separator_replaces_split_child() {
        let mut node = leaf(&[10, 30]);
        for index in 0..3 {
            node.push_child(Handle::new(index, 0));
        }
        let (left, right) = (Handle::new(7, 0), Handle::new(8, 0));
        node.insert_separator(1, Cell::new(20, 200), left, right);
        assert_eq!(keys(&node), vec![10, 20, 30]);
        assert_eq!(node.children(), &[Handle::new(0, 0), left, right, Handle::new(2, 0)]);
    }
}
