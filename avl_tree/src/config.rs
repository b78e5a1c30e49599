/// What [`BalancedTree::insert`](crate::BalancedTree::insert) does with a key
/// that is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Leave the tree untouched and report that nothing was inserted.
    #[default]
    Reject,
    /// Attach another node with the same key below the existing one, on its
    /// left side. Search only ever finds one of the equal nodes, and after
    /// rotations an equal key may end up in the right subtree as well.
    Shadow,
}

/// Construction time switches of a [`BalancedTree`](crate::BalancedTree).
///
/// Both balancing passes are independent: switching insertion balancing off
/// while keeping deletion balancing on is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Restore the AVL property on the path of every insertion.
    pub insertion_balancing: bool,
    /// Restore the AVL property on the path of every removal.
    pub deletion_balancing: bool,
    /// Handling of keys that are inserted while already present.
    pub duplicates: DuplicatePolicy,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            insertion_balancing: true,
            deletion_balancing: true,
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

impl TreeConfig {
    /// Configuration of a plain, never rebalanced, binary search tree.
    pub const fn unbalanced() -> Self {
        Self {
            insertion_balancing: false,
            deletion_balancing: false,
            duplicates: DuplicatePolicy::Reject,
        }
    }

    #[must_use]
    pub fn with_insertion_balancing(mut self, enabled: bool) -> Self {
        self.insertion_balancing = enabled;
        self
    }

    #[must_use]
    pub fn with_deletion_balancing(mut self, enabled: bool) -> Self {
        self.deletion_balancing = enabled;
        self
    }

    #[must_use]
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Returns `true` if both balancing passes are on, which is when the tree
    /// is guaranteed to stay height balanced.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.insertion_balancing && self.deletion_balancing
    }
}
