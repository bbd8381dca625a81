use alloc::vec::Vec;

use super::NodeId;
use crate::raw::Node;

/// A read-only view of one node.
///
/// # Examples
///
/// ```
/// use bulk_btree::{BTree, Config};
///
/// let tree = BTree::build((1..=25).map(|k| (k, ())), Config::new(4, 1)).unwrap();
/// let root = tree.node(tree.root()).unwrap();
/// assert!(!root.is_leaf());
/// assert_eq!(root.keys().copied().collect::<Vec<_>>(), [8, 16, 21]);
///
/// let first = tree.node(root.children().next().unwrap()).unwrap();
/// assert_eq!(first.parent(), Some(tree.root()));
/// assert_eq!(first.len(), 7);
/// ```
pub struct NodeRef<'a, K, V> {
    pub(crate) id: NodeId,
    pub(crate) node: &'a Node<K, V>,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.node.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node.len() == 0
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// The parent node, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.node.parent().map(NodeId)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &'a K> + use<'a, K, V> {
        self.node.cells().iter().map(|cell| &cell.key)
    }

    /// The cell at `index`.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<(&'a K, &'a V)> {
        self.node.cells().get(index).map(|cell| (&cell.key, &cell.value))
    }

    /// Child links, left to right. Empty for a leaf, otherwise one more than [`len`](Self::len).
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeId> + use<'a, K, V> {
        self.node.children().iter().copied().map(NodeId)
    }

    /// Left child of cell `index`.
    #[must_use]
    pub fn left_child(&self, index: usize) -> Option<NodeId> {
        (index < self.len()).then(|| self.node.left_child(index)).flatten().map(NodeId)
    }

    /// Right child of cell `index`; the same node as the left child of cell `index + 1`.
    #[must_use]
    pub fn right_child(&self, index: usize) -> Option<NodeId> {
        (index < self.len()).then(|| self.node.right_child(index)).flatten().map(NodeId)
    }
}

/// Node sizes level by level, as reported by [`BTree::shape`](crate::BTree::shape).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Shape {
    /// Cell counts per node, root level first, each level left to right.
    pub levels: Vec<Vec<usize>>,
}

impl Shape {
    /// Number of levels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Node sizes on the leaf level.
    #[must_use]
    pub fn leaves(&self) -> &[usize] {
        self.levels.last().map(Vec::as_slice).unwrap_or_default()
    }
}
