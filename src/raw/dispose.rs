use log::debug;
use smallvec::SmallVec;

use super::handle::Handle;
use super::raw_btree::RawBTree;

/// What [`BTree::dispose`](crate::BTree::dispose) released.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Released {
    /// Nodes removed from the arena.
    pub nodes: usize,
    /// Entries handed back to the caller.
    pub entries: usize,
}

/// Pending subtrees. A node contributes at most `2 * min_size + 1` children, so the stack
/// stays proportional to height times node width.
type Stack = SmallVec<[Handle; 32]>;

impl<K, V, O> RawBTree<K, V, O> {
    /// Tears the tree down, visiting every node exactly once and passing every entry to
    /// `release`.
    pub(crate) fn dispose_with<F>(mut self, mut release: F) -> Released
    where
        F: FnMut(K, V),
    {
        let mut released = Released::default();
        let mut stack: Stack = SmallVec::new();
        stack.push(self.root);

        while let Some(handle) = stack.pop() {
            let (cells, children) = self.nodes.take(handle).into_parts();
            let last = cells.len().checked_sub(1);
            for (index, cell) in cells.into_iter().enumerate() {
                // Every child is the left child of one cell, except the last cell's right
                // child; following right children elsewhere would reach a subtree twice.
                if let Some(&left) = children.get(index) {
                    stack.push(left);
                }
                if Some(index) == last
                    && let Some(&right) = children.get(index + 1)
                {
                    stack.push(right);
                }
                release(cell.key, cell.value);
                released.entries += 1;
            }
            released.nodes += 1;
        }

        debug_assert!(self.nodes.is_empty(), "`RawBTree::dispose_with()` - unreachable nodes left behind");
        debug_assert_eq!(released.entries, self.len);
        debug!("disposed {} nodes, {} entries", released.nodes, released.entries);
        released
    }
}
