use alloc::vec::Vec;
use core::fmt;

use crate::order::{KeyOrder, Natural};
use crate::raw::{RawBTree, Released};
use crate::{Config, Error};

mod location;
mod node_ref;

pub use location::{CellRef, Location, Mode, NodeId};
pub use node_ref::{NodeRef, Shape};

/// An ordered index over key/value entries, bulk loaded from a batch and grown by insertion.
///
/// Every node except the root holds between `min_size` and `2 * min_size` cells, and all
/// leaves sit at the same depth. Bulk loading packs nodes to `2 * min_size - slack` cells so
/// that later inserts have room before a node has to split; inserts never borrow from a
/// sibling, a full node is always split.
///
/// Keys are ordered by a [`KeyOrder`], [`Natural`] (the key's [`Ord`]) unless another order
/// is given to [`build_by`](Self::build_by).
///
/// # Examples
///
/// ```
/// use bulk_btree::{BTree, Config};
///
/// let mut tree = BTree::build([(3, "c"), (1, "a"), (2, "b")], Config::new(2, 1)).unwrap();
/// assert_eq!(tree.get(&2), Some(&"b"));
///
/// assert_eq!(tree.replace(&2, "B"), Ok("b"));
/// assert_eq!(tree.insert(4, "d"), None);
/// assert_eq!(tree.len(), 4);
///
/// let released = tree.dispose();
/// assert_eq!(released.entries, 4);
/// ```
///
/// # Concurrency
///
/// The tree has no internal synchronisation. Mutation takes `&mut self`, so the borrow checker
/// already keeps readers away from a tree that is being rewritten in place.
pub struct BTree<K, V, O = Natural> {
    raw: RawBTree<K, V, O>,
}

impl<K: Ord, V> BTree<K, V, Natural> {
    /// Bulk loads `entries` in their natural order.
    ///
    /// # Errors
    ///
    /// Fails on an invalid `config` before anything is allocated, on duplicate keys under
    /// [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject), and when allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use bulk_btree::{BTree, Config, Error};
    ///
    /// let tree = BTree::build((1..=25).map(|k| (k, k * k)), Config::new(4, 1)).unwrap();
    /// assert_eq!(tree.shape().levels, [vec![3], vec![7, 7, 4, 4]]);
    ///
    /// let err = BTree::build([(1, ())], Config::new(1, 2)).unwrap_err();
    /// assert!(err.is_config());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n log n) for the sort, O(n) for packing.
    pub fn build<I>(entries: I, config: Config) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::build_by(entries, config, Natural)
    }

    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Fails if `config` is invalid.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::build(Vec::new(), config)
    }
}

impl<K, V, O: KeyOrder<K>> BTree<K, V, O> {
    /// Bulk loads `entries` ordered by `order`.
    ///
    /// # Errors
    ///
    /// See [`build`](BTree::build).
    pub fn build_by<I>(entries: I, config: Config, order: O) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        config.validate()?;
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        Ok(Self {
            raw: RawBTree::build(entries, config, order)?,
        })
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.raw.get(key)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.get_key_value(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.raw.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key).is_some()
    }

    /// Replaces the value stored under `key`, returning the old one.
    ///
    /// Only the value changes; the tree's shape and every other entry are untouched.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `key` is absent.
    pub fn replace(&mut self, key: &K, value: V) -> Result<V, Error> {
        self.raw.replace(key, value)
    }

    /// Inserts an entry, returning the previous value if `key` was already present.
    ///
    /// When the target leaf is full it is split around its middle cell and the middle cell
    /// moves up into the parent, which may split in turn. If the root splits, a new root is
    /// created and the tree grows by one level; [`root`](Self::root) changes accordingly.
    ///
    /// # Panics
    ///
    /// Panics if the node arena cannot grow. Use [`try_insert`](Self::try_insert) to handle
    /// that case.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.try_insert(key, value) {
            Ok(old) => old,
            Err(err) => panic!("`BTree::insert()` - {err}"),
        }
    }

    /// Like [`insert`](Self::insert), but reports allocation failure instead of panicking.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityExceeded`] or [`Error::AllocationFailed`]. Everything the insert needs is
    /// reserved up front, so on error the tree is exactly as it was.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        self.raw.try_insert(key, value)
    }

    /// Searches from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use bulk_btree::{BTree, Config, Location, Mode};
    ///
    /// let tree = BTree::build((0..10).map(|k| (k * 2, ())), Config::new(2, 0)).unwrap();
    /// assert!(matches!(tree.locate(&4, Mode::Lookup), Location::Found(_)));
    /// assert_eq!(tree.locate(&5, Mode::Lookup), Location::NotFound);
    ///
    /// let Location::InsertAt(leaf) = tree.locate(&5, Mode::Insert) else { unreachable!() };
    /// assert!(tree.node(leaf).unwrap().is_leaf());
    /// ```
    #[must_use]
    pub fn locate(&self, key: &K, mode: Mode) -> Location {
        self.raw.locate(key, mode)
    }

    /// Searches the subtree below `start`.
    ///
    /// # Errors
    ///
    /// [`Error::StaleHandle`] if `start` no longer names a node of this tree.
    pub fn locate_from(&self, start: NodeId, key: &K, mode: Mode) -> Result<Location, Error> {
        self.raw.try_node(start.0).ok_or(Error::StaleHandle)?;
        Ok(self.raw.locate_from(start.0, key, mode))
    }
}

impl<K, V, O> BTree<K, V, O> {
    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        self.raw.config()
    }

    #[must_use]
    pub const fn order(&self) -> &O {
        self.raw.order()
    }

    /// The current root. Inserting may replace it.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(self.raw.root())
    }

    /// Number of levels; a tree holding only a root leaf has height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.raw.node_count()
    }

    /// Node sizes per level.
    #[must_use]
    pub fn shape(&self) -> Shape {
        Shape {
            levels: self.raw.level_sizes(),
        }
    }

    /// Looks up a node by id.
    ///
    /// # Errors
    ///
    /// [`Error::StaleHandle`] if the node has been released.
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_, K, V>, Error> {
        let node = self.raw.try_node(id.0).ok_or(Error::StaleHandle)?;
        Ok(NodeRef { id, node })
    }

    /// Returns the entry stored in `cell`.
    ///
    /// # Errors
    ///
    /// [`Error::StaleHandle`] if the node has been released, [`Error::NotFound`] if the index is
    /// past its end.
    pub fn cell(&self, cell: CellRef) -> Result<(&K, &V), Error> {
        self.node(cell.node)?.cell(cell.index).ok_or(Error::NotFound)
    }

    /// Returns a mutable reference to the value stored in `cell`.
    ///
    /// # Errors
    ///
    /// See [`cell`](Self::cell).
    pub fn cell_value_mut(&mut self, cell: CellRef) -> Result<&mut V, Error> {
        let node = self.raw.try_node_mut(cell.node.0).ok_or(Error::StaleHandle)?;
        if cell.index >= node.len() {
            return Err(Error::NotFound);
        }
        Ok(&mut node.cell_mut(cell.index).value)
    }

    /// Releases every node, dropping all entries.
    ///
    /// Consuming the tree makes any later use of it a compile error.
    pub fn dispose(self) -> Released {
        self.dispose_with(|_, _| {})
    }

    /// Releases every node, handing each entry to `release` first.
    ///
    /// Entries arrive in no particular order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bulk_btree::{BTree, Config};
    ///
    /// let tree = BTree::build((0..100).map(|k| (k, k)), Config::new(3, 1)).unwrap();
    /// let nodes = tree.node_count();
    /// let mut sum = 0;
    /// let released = tree.dispose_with(|_, value| sum += value);
    /// assert_eq!(sum, 4950);
    /// assert_eq!(released.nodes, nodes);
    /// ```
    pub fn dispose_with<F>(self, release: F) -> Released
    where
        F: FnMut(K, V),
    {
        self.raw.dispose_with(release)
    }
}

impl<K, V, O> fmt::Debug for BTree<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("len", &self.len())
            .field("height", &self.height())
            .field("config", self.config())
            .finish_non_exhaustive()
    }
}
