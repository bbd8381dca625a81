mod arena;
mod builder;
mod dispose;
mod handle;
mod mutate;
mod navigate;
mod node;
mod raw_btree;

pub use builder::LevelPlan;
pub use dispose::Released;
pub(crate) use handle::Handle;
pub(crate) use node::{Cell, Node};
pub(crate) use raw_btree::RawBTree;
