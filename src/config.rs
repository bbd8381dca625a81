use crate::Error;

/// How [`BTree::build`](crate::BTree::build) treats entries whose keys compare equal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DuplicatePolicy {
    /// Fail with [`Error::DuplicateKey`].
    #[default]
    Reject,
    /// Keep the entry that came first in the input.
    KeepFirst,
    /// Keep the entry that came last in the input.
    KeepLast,
}

/// Shape parameters fixed when a tree is built.
///
/// # Examples
///
/// ```
/// use bulk_btree::{Config, DuplicatePolicy};
///
/// let config = Config::new(4, 1).duplicates(DuplicatePolicy::KeepLast);
/// assert_eq!(config.max_cells(), 8);
/// assert_eq!(config.divider(), 8);
/// assert!(config.validate().is_ok());
///
/// assert!(Config::new(2, 3).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Config {
    min_size: usize,
    slack: usize,
    duplicates: DuplicatePolicy,
}

impl Config {
    /// Creates a configuration. Nothing is checked until [`validate`](Self::validate).
    #[must_use]
    pub const fn new(min_size: usize, slack: usize) -> Self {
        Self {
            min_size,
            slack,
            duplicates: DuplicatePolicy::Reject,
        }
    }

    /// Sets the duplicate-key policy used by bulk loading.
    #[must_use]
    pub const fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Minimum number of cells in a non-root node.
    #[must_use]
    pub const fn min_size(&self) -> usize {
        self.min_size
    }

    /// Cells each bulk-loaded node keeps free for later inserts.
    #[must_use]
    pub const fn slack(&self) -> usize {
        self.slack
    }

    /// How bulk loading treats equal keys.
    #[must_use]
    pub const fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Maximum number of cells in any settled node.
    #[must_use]
    pub const fn max_cells(&self) -> usize {
        2 * self.min_size
    }

    /// Entries consumed per bulk-loaded node, including the separator cut after it.
    #[must_use]
    pub const fn divider(&self) -> usize {
        2 * self.min_size - self.slack + 1
    }

    /// Checks that `min_size >= 1` and `slack <= min_size`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMinSize`] or [`Error::SlackExceedsMinSize`].
    pub const fn validate(&self) -> Result<(), Error> {
        if self.min_size == 0 {
            return Err(Error::InvalidMinSize(self.min_size));
        }
        // The split buffer holds 2 * min_size + 1 cells.
        match self.min_size.checked_mul(2) {
            Some(max) if max < usize::MAX => {}
            _ => return Err(Error::InvalidMinSize(self.min_size)),
        }
        if self.slack > self.min_size {
            return Err(Error::SlackExceedsMinSize {
                slack: self.slack,
                min_size: self.min_size,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(32, 0)
    }
}
