use super::handle::Handle;
use super::raw_btree::RawBTree;
use crate::btree::{CellRef, Location, Mode, NodeId};
use crate::order::KeyOrder;

impl<K, V, O: KeyOrder<K>> RawBTree<K, V, O> {
    /// Walks down from `start` looking for `key`.
    ///
    /// Within a node the first cell not less than `key` decides: an equal key is a hit, a
    /// greater key sends the search into that cell's left child, and running off the end sends
    /// it into the last cell's right child. With nowhere left to go the search ends at a leaf.
    pub(crate) fn locate_from(&self, start: Handle, key: &K, mode: Mode) -> Location {
        let mut current = start;
        loop {
            let node = self.nodes.get(current);
            match node.search(key, &self.order) {
                Ok(index) => {
                    return Location::Found(CellRef {
                        node: NodeId(current),
                        index,
                    });
                }
                // `children[index]` is the left child of cell `index`, or the right child of the
                // last cell when `index == len`.
                Err(index) => match node.left_child(index) {
                    Some(child) => current = child,
                    None if mode == Mode::Insert => return Location::InsertAt(NodeId(current)),
                    None => return Location::NotFound,
                },
            }
        }
    }

    pub(crate) fn locate(&self, key: &K, mode: Mode) -> Location {
        self.locate_from(self.root, key, mode)
    }

    /// Returns the node and cell index holding `key`.
    pub(crate) fn search(&self, key: &K) -> Option<(Handle, usize)> {
        match self.locate(key, Mode::Lookup) {
            Location::Found(cell) => Some((cell.node.0, cell.index)),
            Location::InsertAt(_) | Location::NotFound => None,
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        let (node, index) = self.search(key)?;
        Some(&self.nodes.get(node).cell(index).value)
    }

    pub(crate) fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let (node, index) = self.search(key)?;
        let cell = self.nodes.get(node).cell(index);
        Some((&cell.key, &cell.value))
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (node, index) = self.search(key)?;
        Some(&mut self.nodes.get_mut(node).cell_mut(index).value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Config;
    use crate::order::Natural;
    use alloc::vec::Vec;

    fn tree() -> RawBTree<i32, i32, Natural> {
        let entries: Vec<_> = (1..=25).map(|k| (k * 2, k)).collect();
        RawBTree::build(entries, Config::new(2, 0), Natural).unwrap()
    }

    #[test]
    fn finds_keys_in_leaves_and_internal_nodes() {
        let tree = tree();
        let root = tree.nodes.get(tree.root());
        let separator = &root.cell(0).key;
        match tree.locate(separator, Mode::Lookup) {
            Location::Found(cell) => {
                assert_eq!(cell.node, NodeId(tree.root()));
                assert_eq!(cell.index, 0);
            }
            other => panic!("expected a hit, got {other:?}"),
        }
        assert_eq!(tree.get(&2), Some(&1));
        assert_eq!(tree.get(&50), Some(&25));
    }

    #[test]
    fn missing_key_in_lookup_mode() {
        let tree = tree();
        assert_eq!(tree.locate(&7, Mode::Lookup), Location::NotFound);
        assert_eq!(tree.locate(&0, Mode::Lookup), Location::NotFound);
        assert_eq!(tree.locate(&99, Mode::Lookup), Location::NotFound);
    }

    #[test]
    fn missing_key_in_insert_mode_names_a_leaf() {
        let tree = tree();
        for key in [0, 7, 99] {
            match tree.locate(&key, Mode::Insert) {
                Location::InsertAt(leaf) => assert!(tree.nodes.get(leaf.0).is_leaf()),
                other => panic!("expected a leaf for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn search_can_start_below_the_root() {
        let tree = tree();
        let left = tree.nodes.get(tree.root()).left_child(0).unwrap();
        assert!(matches!(tree.locate_from(left, &2, Mode::Lookup), Location::Found(_)));
        assert_eq!(tree.locate_from(left, &50, Mode::Lookup), Location::NotFound);
    }
}
