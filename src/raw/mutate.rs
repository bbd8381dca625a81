use log::{debug, trace};
use smallvec::SmallVec;

use super::handle::Handle;
use super::node::{Cell, Node};
use super::raw_btree::RawBTree;
use crate::Error;
use crate::btree::{Location, Mode};
use crate::order::KeyOrder;

/// A split waiting to be recorded in the parent: the node that used to fill a child slot and
/// the two nodes replacing it.
struct Split {
    old: Handle,
    left: Handle,
    right: Handle,
}

/// Everything an insert may allocate, set aside before the tree is touched.
struct Reservation<K, V> {
    /// Empty upper halves for the nodes that will split, the leaf's last.
    halves: SmallVec<[Node<K, V>; 8]>,
    /// A new root, if the split cascade reaches the old one.
    root: Option<Node<K, V>>,
}

impl<K, V, O: KeyOrder<K>> RawBTree<K, V, O> {
    /// Overwrites the value stored under `key`, returning the previous one.
    ///
    /// Keys, links and shape are untouched.
    pub(crate) fn replace(&mut self, key: &K, value: V) -> Result<V, Error> {
        let (node, index) = self.search(key).ok_or(Error::NotFound)?;
        Ok(core::mem::replace(&mut self.nodes.get_mut(node).cell_mut(index).value, value))
    }

    /// Inserts `key`, or replaces its value if it is already present.
    ///
    /// A full leaf is split around its middle cell and the separator is pushed into the parent,
    /// which may split in turn. A root split grows the tree by one level.
    pub(crate) fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        let leaf = match self.locate(&key, Mode::Insert) {
            Location::Found(cell) => {
                let slot = &mut self.nodes.get_mut(cell.node.0).cell_mut(cell.index).value;
                return Ok(Some(core::mem::replace(slot, value)));
            }
            Location::InsertAt(leaf) => leaf.0,
            Location::NotFound => unreachable!("insert-mode search always ends at a leaf"),
        };

        let reservation = self.reserve_insert(leaf)?;
        self.insert_cell(leaf, Cell::new(key, value), reservation);
        self.len += 1;
        Ok(None)
    }

    /// Walks up from `leaf` through the full nodes an insert would split and reserves the cells,
    /// nodes and arena slots the cascade needs. On error the tree is unchanged.
    fn reserve_insert(&mut self, leaf: Handle) -> Result<Reservation<K, V>, Error> {
        let min_size = self.config.min_size();
        let max_cells = self.config.max_cells();
        let mut halves = SmallVec::new();
        let mut root = None;

        let mut current = Some(leaf);
        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            // Room for the incoming cell, or for a separator and its right child.
            node.try_reserve(1)?;
            if node.len() < max_cells {
                break;
            }
            let is_leaf = node.is_leaf();
            current = node.parent();
            halves.push(Node::try_with_capacity(min_size, is_leaf)?);
            if current.is_none() {
                root = Some(Node::try_with_capacity(1, false)?);
            }
        }

        // Each split releases the node it replaces before allocating the two halves.
        self.nodes.try_reserve(halves.len() + usize::from(root.is_some()))?;
        halves.reverse();
        Ok(Reservation { halves, root })
    }

    /// Inserts `cell` into `target`, cascading splits upward until a node has room. Every
    /// allocation was made by [`reserve_insert`](Self::reserve_insert).
    fn insert_cell(&mut self, mut target: Handle, mut cell: Cell<K, V>, mut reservation: Reservation<K, V>) {
        let min_size = self.config.min_size();
        let max_cells = self.config.max_cells();
        let mut split: Option<Split> = None;

        loop {
            let node = self.nodes.get_mut(target);
            let index = match node.search(&cell.key, &self.order) {
                Err(index) => index,
                Ok(_) => unreachable!("separator keys are unique within a tree"),
            };
            match split.take() {
                Some(Split { old, left, right }) => {
                    debug_assert_eq!(node.left_child(index), Some(old));
                    node.insert_separator(index, cell, left, right);
                }
                None => node.insert(index, cell),
            }

            if node.len() <= max_cells {
                debug_assert!(reservation.halves.is_empty() && reservation.root.is_none());
                return;
            }

            // The node now holds the 2 * min_size + 1 cell buffer.
            let parent = node.parent();
            let half = reservation.halves.pop().expect("`RawBTree::insert_cell()` - split was not reserved!");
            let (left, separator, right) = self.split_node(target, min_size, half);
            trace!("split node {:?} into {:?} and {:?}", target, left, right);

            match parent {
                Some(parent) => {
                    split = Some(Split {
                        old: target,
                        left,
                        right,
                    });
                    target = parent;
                    cell = separator;
                }
                None => {
                    let root = reservation.root.take().expect("`RawBTree::insert_cell()` - root was not reserved!");
                    self.grow_root(root, separator, left, right);
                    return;
                }
            }
        }
    }

    /// Replaces the overfull node at `handle` with two fresh nodes, returning them with the
    /// separator between them. `handle` is stale afterwards.
    fn split_node(&mut self, handle: Handle, min_size: usize, half: Node<K, V>) -> (Handle, Cell<K, V>, Handle) {
        let node = self.nodes.take(handle);
        let parent = node.parent();
        let (mut left, separator, mut right) = node.split(min_size, half);
        left.set_parent(parent);
        right.set_parent(parent);

        let left = self.alloc_reserved(left);
        let right = self.alloc_reserved(right);
        self.adopt_children(left);
        self.adopt_children(right);
        (left, separator, right)
    }

    /// Puts `root`, holding only `separator`, above `left` and `right`.
    fn grow_root(&mut self, mut root: Node<K, V>, separator: Cell<K, V>, left: Handle, right: Handle) {
        root.push_child(left);
        root.push_child(right);
        root.push(separator);
        let root = self.alloc_reserved(root);
        self.adopt_children(root);
        self.root = root;
        debug!("root split, height now {}", self.height());
    }

    fn alloc_reserved(&mut self, node: Node<K, V>) -> Handle {
        match self.nodes.try_alloc(node) {
            Ok(handle) => handle,
            Err(err) => panic!("`RawBTree::alloc_reserved()` - reserved slot unavailable: {err}"),
        }
    }
}
