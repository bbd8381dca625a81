use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use crate::Config;

/// The arena-backed B-tree behind [`BTree`](crate::BTree).
///
/// The arena exclusively owns every node. Child links and parent links are both plain
/// handles; only the child links describe ownership, and traversals never follow parents
/// downwards.
pub(crate) struct RawBTree<K, V, O> {
    /// Arena storing all tree nodes.
    pub(super) nodes: Arena<Node<K, V>>,
    /// Handle to the root node. An empty tree has an empty root leaf.
    pub(super) root: Handle,
    /// Total number of cells in the tree.
    pub(super) len: usize,
    pub(super) config: Config,
    pub(super) order: O,
}

impl<K, V, O> RawBTree<K, V, O> {
    pub(crate) const fn root(&self) -> Handle {
        self.root
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) const fn order(&self) -> &O {
        &self.order
    }

    pub(crate) const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node if `handle` still refers to a live node.
    pub(crate) fn try_node(&self, handle: Handle) -> Option<&Node<K, V>> {
        self.nodes.try_get(handle)
    }

    pub(crate) fn try_node_mut(&mut self, handle: Handle) -> Option<&mut Node<K, V>> {
        self.nodes.try_get_mut(handle)
    }

    /// Number of levels, counting the root. All leaves sit at this depth.
    pub(crate) fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let Some(child) = self.nodes.get(current).left_child(0) {
            current = child;
            height += 1;
        }
        height
    }

    /// Node sizes level by level, root first, left to right.
    pub(crate) fn level_sizes(&self) -> Vec<Vec<usize>> {
        let mut levels = Vec::new();
        let mut frontier = alloc::vec![self.root];
        while !frontier.is_empty() {
            levels.push(frontier.iter().map(|&h| self.nodes.get(h).len()).collect());
            frontier = frontier.iter().flat_map(|&h| self.nodes.get(h).children().iter().copied()).collect();
        }
        levels
    }

    /// Points every child of `parent` back at it.
    pub(super) fn adopt_children(&mut self, parent: Handle) {
        for index in 0..self.nodes.get(parent).children().len() {
            let child = self.nodes.get(parent).children()[index];
            self.nodes.get_mut(child).set_parent(Some(parent));
        }
    }
}
