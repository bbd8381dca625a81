use crate::raw::Handle;

/// Identifies a node of one [`BTree`](crate::BTree).
///
/// Ids are generational: once the node is released, for example because a split replaced it
/// with two new nodes, every lookup through the old id fails with
/// [`Error::StaleHandle`](crate::Error::StaleHandle) instead of reaching whatever now occupies
/// its storage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) Handle);

/// A cell position: the node holding it and its index within that node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CellRef {
    pub node: NodeId,
    pub index: usize,
}

/// What [`BTree::locate`](crate::BTree::locate) is looking for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Report [`Location::NotFound`] for a missing key.
    Lookup,
    /// Report the leaf a missing key would be inserted into.
    Insert,
}

/// Result of a search.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Location {
    /// The key is stored in this cell.
    Found(CellRef),
    /// The key is missing and belongs in this leaf. Only produced in [`Mode::Insert`].
    InsertAt(NodeId),
    /// The key is missing.
    NotFound,
}
