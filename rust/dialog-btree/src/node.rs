use crate::{Comparator, Entry};

/// The outcome of searching a single node for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    /// The key is held by the entry at this index.
    Occupied(usize),
    /// The key is absent from the node. The index is where it would be
    /// inserted, which for an internal node is also the index of the child
    /// whose key range brackets it.
    Vacant(usize),
}

/// A tree node holding sorted entries and, if internal, one more child than
/// it has entries.
///
/// A node is a leaf iff it has no children. Each node exclusively owns its
/// children.
#[derive(Clone, Debug)]
pub struct Node<Key, Value> {
    pub(crate) entries: Vec<Entry<Key, Value>>,
    pub(crate) children: Vec<Box<Node<Key, Value>>>,
}

impl<Key, Value> Node<Key, Value> {
    /// Creates an empty leaf.
    pub(crate) fn empty() -> Self {
        Self {
            entries: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a node from already-ordered parts.
    pub(crate) fn from_parts(
        entries: Vec<Entry<Key, Value>>,
        children: Vec<Box<Node<Key, Value>>>,
    ) -> Self {
        debug_assert!(children.is_empty() || children.len() == entries.len() + 1);
        Self { entries, children }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The number of entries held directly by this node.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this node holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries of this node in ascending key order.
    pub fn entries(&self) -> &[Entry<Key, Value>] {
        &self.entries
    }

    /// The children of this node, left to right. Empty for a leaf.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &Node<Key, Value>> {
        self.children.iter().map(|child| child.as_ref())
    }

    /// Returns the child at `index`.
    ///
    /// Panics if this node is a leaf; asking a leaf for a child is a bug in
    /// the caller's maintenance logic.
    pub(crate) fn child_at(&self, index: usize) -> &Node<Key, Value> {
        assert!(!self.is_leaf(), "Attempted to access a child of a leaf node");
        &self.children[index]
    }

    /// Mutable counterpart of [`Node::child_at`].
    pub(crate) fn child_at_mut(&mut self, index: usize) -> &mut Node<Key, Value> {
        assert!(!self.is_leaf(), "Attempted to access a child of a leaf node");
        &mut self.children[index]
    }

    /// Binary-searches this node's entries for `key`.
    pub(crate) fn search<Compare>(&self, key: &Key, comparator: &Compare) -> Slot
    where
        Compare: Comparator<Key>,
    {
        match self
            .entries
            .binary_search_by(|entry| comparator.compare(&entry.key, key))
        {
            Ok(index) => Slot::Occupied(index),
            Err(index) => Slot::Vacant(index),
        }
    }
}
