//! An arena-backed B-tree with slack-reserving bulk loading.
//!
//! [`BTree`] is meant to sit inside a larger system as its ordered-index core. It is built in
//! one pass per level from a batch of entries, then supports point lookup, in-place value
//! replacement and single-key insertion.
//!
//! # Example
//!
//! ```
//! use bulk_btree::{BTree, Config};
//!
//! // Nodes hold 4..=8 cells; bulk loading leaves one free slot in each packed node.
//! let mut index = BTree::build((1..=25).map(|k| (k, k * 100)), Config::new(4, 1)).unwrap();
//! assert_eq!(index.height(), 2);
//! assert_eq!(index.get(&9), Some(&900));
//!
//! index.replace(&9, 7).unwrap();
//! assert_eq!(index.get(&9), Some(&7));
//!
//! index.insert(26, 2600);
//! assert!(index.contains_key(&26));
//!
//! let released = index.dispose();
//! assert_eq!(released.entries, 26);
//! ```
//!
//! # Implementation
//!
//! All nodes live in a single arena and refer to each other through generational handles.
//! Child links own their subtree, parent links do not, and a cell's right child is the same
//! node as the next cell's left child. A handle whose node has been released, for example by a
//! split, is detected as stale rather than silently reaching recycled storage.
//!
//! - **Bulk loading** sorts the batch, then packs each level left to right, cutting one entry
//!   out as a separator after every `2 * min_size - slack` cells. The last two nodes of a level
//!   are balanced against each other when the tail would not fit in one node.
//! - **Insertion** always splits a full node around its middle cell and pushes the middle cell
//!   into the parent, cascading upward; a root split adds a new root.
//! - **Search, cascade and disposal** are loops, so stack use does not depend on the tree.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod config;
mod error;
mod order;
mod raw;

pub mod btree;

pub use btree::{BTree, CellRef, Location, Mode, NodeId, NodeRef, Shape};
pub use config::{Config, DuplicatePolicy};
pub use error::Error;
pub use order::{KeyOrder, Natural};
pub use raw::{LevelPlan, Released};
