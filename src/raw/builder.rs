use alloc::vec::Vec;

use log::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Cell, Node, first_key_cmp};
use super::raw_btree::RawBTree;
use crate::order::KeyOrder;
use crate::{Config, DuplicatePolicy, Error};

/// How one level of a bulk load is cut into nodes.
///
/// Every node below `border` receives `divider - 1` cells, after which one entry is promoted
/// as a separator. The tail from `border` on forms a single node, or, when it would exceed the
/// node capacity, two nodes of similar size around `tail_cut`.
///
/// # Examples
///
/// ```
/// use bulk_btree::{Config, LevelPlan};
///
/// let plan = LevelPlan::new(25, &Config::new(4, 1));
/// assert_eq!(plan.nodes_on_level, 3);
/// assert_eq!(plan.border, 16);
/// assert_eq!(plan.remainder, 9);
/// assert_eq!(plan.tail_cut, Some(20));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LevelPlan {
    /// Entries on this level, separators included.
    pub count: usize,
    /// Entries consumed per packed node, separator included.
    pub divider: usize,
    /// `count / divider`.
    pub nodes_on_level: usize,
    /// Index below which nodes are packed to exactly `divider - 1` cells.
    pub border: usize,
    /// Entries from `border` to the end of the level.
    pub remainder: usize,
    /// Index of the separator that balances the last two nodes, if the tail needs one.
    pub tail_cut: Option<usize>,
}

impl LevelPlan {
    /// Plans a level of `count` entries. `config` must already be valid.
    #[must_use]
    pub const fn new(count: usize, config: &Config) -> Self {
        let divider = config.divider();
        let nodes_on_level = count / divider;
        let border = nodes_on_level.saturating_sub(1) * divider;
        let remainder = count - border;
        let tail_cut = if remainder <= config.max_cells() {
            None
        } else {
            Some(border + remainder / 2)
        };
        Self {
            count,
            divider,
            nodes_on_level,
            border,
            remainder,
            tail_cut,
        }
    }

    /// Returns `true` if the entry at `index` is promoted to the level above.
    #[inline]
    #[must_use]
    pub const fn is_cut(&self, index: usize) -> bool {
        if index < self.border {
            (index + 1) % self.divider == 0
        } else {
            matches!(self.tail_cut, Some(cut) if cut == index)
        }
    }
}

impl<K, V, O: KeyOrder<K>> RawBTree<K, V, O> {
    /// Builds a height-balanced tree from `entries`, one level per pass, bottom-up.
    pub(crate) fn build(mut entries: Vec<(K, V)>, config: Config, order: O) -> Result<Self, Error> {
        config.validate()?;

        entries.sort_by(|a, b| order.compare(&a.0, &b.0));
        resolve_duplicates(&mut entries, config.duplicate_policy(), &order)?;

        let len = entries.len();
        debug!(
            "bulk load: {} entries, min_size {}, slack {}, divider {}",
            len,
            config.min_size(),
            config.slack(),
            config.divider()
        );

        // A lower bound: every node holds at most `max_cells` entries.
        let mut nodes = Arena::with_capacity(len / config.max_cells() + 1)?;
        let mut level: Vec<Cell<K, V>> = Vec::new();
        level.try_reserve_exact(len)?;
        level.extend(entries.into_iter().map(|(key, value)| Cell::new(key, value)));

        let mut children: Vec<Handle> = Vec::new();
        let mut depth = 0usize;
        let root = loop {
            let plan = LevelPlan::new(level.len(), &config);
            let (separators, produced) = pack_level(&mut nodes, level, &children, &plan, &config, &order)?;
            trace!(
                "level {}: {} entries, {} nodes, {} separators, border {}, tail cut {:?}",
                depth,
                plan.count,
                produced.len(),
                separators.len(),
                plan.border,
                plan.tail_cut
            );

            if separators.is_empty() {
                debug_assert_eq!(produced.len(), 1);
                break produced[0];
            }
            level = separators;
            children = produced;
            depth += 1;
        };

        let tree = Self {
            nodes,
            root,
            len,
            config,
            order,
        };
        debug!("bulk load finished: height {}, {} nodes", depth + 1, tree.nodes.len());
        Ok(tree)
    }
}

/// Sorted-order duplicate handling.
fn resolve_duplicates<K, V, O: KeyOrder<K>>(
    entries: &mut Vec<(K, V)>,
    policy: DuplicatePolicy,
    order: &O,
) -> Result<(), Error> {
    match policy {
        DuplicatePolicy::Reject => {
            if let Some(position) = entries.windows(2).position(|pair| order.compare(&pair[0].0, &pair[1].0).is_eq()) {
                return Err(Error::DuplicateKey { position: position + 1 });
            }
        }
        // `sort_by` is stable, so the first of each run came first in the input.
        DuplicatePolicy::KeepFirst => entries.dedup_by(|later, kept| order.compare(&later.0, &kept.0).is_eq()),
        DuplicatePolicy::KeepLast => entries.dedup_by(|later, kept| {
            let equal = order.compare(&later.0, &kept.0).is_eq();
            if equal {
                core::mem::swap(later, kept);
            }
            equal
        }),
    }
    Ok(())
}

/// Packs one level into nodes, returning the separators promoted to the next level and the
/// handles of the nodes produced, left to right.
///
/// On every level above the leaves, `children` holds the previous level's nodes: exactly one
/// more than there are entries in `level`.
fn pack_level<K, V, O: KeyOrder<K>>(
    nodes: &mut Arena<Node<K, V>>,
    level: Vec<Cell<K, V>>,
    children: &[Handle],
    plan: &LevelPlan,
    config: &Config,
    order: &O,
) -> Result<(Vec<Cell<K, V>>, Vec<Handle>), Error> {
    let leaf = children.is_empty();
    debug_assert!(leaf || children.len() == plan.count + 1);

    let mut separators = Vec::new();
    separators.try_reserve_exact(plan.nodes_on_level + 1)?;
    let mut produced = Vec::new();
    produced.try_reserve_exact(plan.nodes_on_level + 2)?;

    let mut open: Option<Node<K, V>> = None;
    let mut next_child = 0usize;

    for (index, cell) in level.into_iter().enumerate() {
        if plan.is_cut(index) {
            if let Some(node) = open.take() {
                produced.push(close_node(nodes, node)?);
            }
            separators.push(cell);
            // The child right of the separator starts the next node.
            continue;
        }

        let mut node = match open.take() {
            Some(node) => node,
            // Never more than what is left on this level.
            None => Node::try_with_capacity(config.max_cells().min(plan.count - index), leaf)?,
        };
        if !leaf {
            if node.len() == 0 {
                node.push_child(children[next_child]);
                next_child += 1;
            }
            let right = children[next_child];
            debug_assert!(first_key_cmp(nodes.get(right), &cell.key, order).is_none_or(|ord| ord.is_gt()));
            node.push_child(right);
            next_child += 1;
        }
        node.push(cell);
        open = Some(node);
    }

    match open {
        Some(node) => produced.push(close_node(nodes, node)?),
        // An empty input still gets a root.
        None if produced.is_empty() => produced.push(nodes.try_alloc(Node::try_with_capacity(0, true)?)?),
        None => {}
    }

    debug_assert_eq!(produced.len(), separators.len() + 1);
    Ok((separators, produced))
}

/// Moves a finished node into the arena and points its children back at it.
fn close_node<K, V>(nodes: &mut Arena<Node<K, V>>, node: Node<K, V>) -> Result<Handle, Error> {
    let handle = nodes.try_alloc(node)?;
    for index in 0..nodes.get(handle).children().len() {
        let child = nodes.get(handle).children()[index];
        nodes.get_mut(child).set_parent(Some(handle));
    }
    Ok(handle)
}
