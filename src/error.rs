use alloc::collections::TryReserveError;

/// Errors returned by [`BTree`](crate::BTree) construction, lookup and mutation.
///
/// Configuration problems are reported by [`BTree::build`](crate::BTree::build) before any
/// node is allocated. [`Error::NotFound`] is an expected outcome of [`replace`](crate::BTree::replace)
/// and is never fatal.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// `min_size` was zero, or so large that a node's split buffer cannot be sized.
    #[error("min_size must be at least 1 and 2 * min_size + 1 must fit in usize, got {0}")]
    InvalidMinSize(usize),

    /// The bulk-load reserve is larger than the minimum node size.
    #[error("slack ({slack}) must not exceed min_size ({min_size})")]
    SlackExceedsMinSize { slack: usize, min_size: usize },

    /// Two entries compared equal during a bulk load with [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
    #[error("duplicate key at sorted position {position}")]
    DuplicateKey { position: usize },

    /// No entry with the requested key exists.
    #[error("key not found")]
    NotFound,

    /// A [`NodeId`](crate::NodeId) referred to a node that has since been released.
    #[error("node handle is stale")]
    StaleHandle,

    /// The node arena has run out of handle space.
    #[error("node arena is at maximum capacity ({max})")]
    CapacityExceeded { max: usize },

    /// The allocator could not satisfy a reservation.
    #[error("allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),
}

impl Error {
    /// Returns `true` for errors caused by an invalid [`Config`](crate::Config).
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::InvalidMinSize(_) | Self::SlackExceedsMinSize { .. })
    }
}
