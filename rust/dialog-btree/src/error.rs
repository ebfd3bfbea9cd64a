use thiserror::Error;

/// Errors that can occur when working with a [`BTree`](crate::BTree).
///
/// Looking up or deleting an absent key is not an error; those operations
/// return `None`. Likewise [`BTree::insert`](crate::BTree::insert) reports a
/// duplicate key by returning `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogBTreeError {
    /// The tree was configured with parameters that cannot describe a valid
    /// B-Tree.
    #[error("Invalid tree configuration: {0}")]
    InvalidConfiguration(String),

    /// The tree no longer satisfies one of its structural invariants.
    #[error("Tree invariant violated: {0}")]
    InvariantViolation(String),
}
