use std::{
    fmt::{Debug, Display},
    io::Write,
    mem,
};

use tracing::{debug, warn};

use crate::{
    Collision, Comparator, Degree, DialogBTreeError, Entry, Insertion, NaturalOrder, Node, Slot,
    TreeShaper, TreeWalker,
};

/// An in-memory ordered map backed by a B-Tree of fixed minimum degree.
///
/// Every node other than the root holds between `t - 1` and `2t - 1`
/// entries, where `t` is the tree's [`Degree`]. All leaves sit at the same
/// depth, so lookups, insertions and deletions touch `O(log n)` nodes.
///
/// Keys are ordered by a [`Comparator`], which defaults to the key type's
/// [`Ord`] implementation ([`NaturalOrder`]).
///
/// Both [`BTree::insert`] and [`BTree::put`] split full nodes on the way
/// down, so an insertion never has to revisit a node it has already passed.
/// They differ only in how they treat a key that is already present:
/// `insert` leaves the tree untouched and reports `false`, while `put`
/// overwrites the value and returns the previous one.
#[derive(Clone)]
pub struct BTree<Key, Value, Compare = NaturalOrder> {
    root: Box<Node<Key, Value>>,
    degree: Degree,
    comparator: Compare,
    len: usize,
}

impl<Key, Value> BTree<Key, Value>
where
    Key: Ord,
{
    /// Creates a new, empty [`BTree`] with minimum degree `degree`, ordering
    /// keys by their [`Ord`] implementation.
    ///
    /// Fails with [`DialogBTreeError::InvalidConfiguration`] if `degree` is
    /// less than two.
    pub fn new(degree: usize) -> Result<Self, DialogBTreeError> {
        Self::with_comparator(degree, NaturalOrder)
    }
}

impl<Key, Value> Default for BTree<Key, Value>
where
    Key: Ord,
{
    fn default() -> Self {
        Self::from_degree(Degree::default(), NaturalOrder)
    }
}

impl<Key, Value, Compare> BTree<Key, Value, Compare>
where
    Compare: Comparator<Key>,
{
    /// Creates a new, empty [`BTree`] with minimum degree `degree`, ordering
    /// keys with `comparator`.
    pub fn with_comparator(degree: usize, comparator: Compare) -> Result<Self, DialogBTreeError> {
        Ok(Self::from_degree(Degree::new(degree)?, comparator))
    }

    /// Creates a new, empty [`BTree`] from an already validated [`Degree`].
    pub fn from_degree(degree: Degree, comparator: Compare) -> Self {
        Self {
            root: Box::new(Node::empty()),
            degree,
            comparator,
            len: 0,
        }
    }

    /// The minimum degree of this tree.
    pub fn degree(&self) -> Degree {
        self.degree
    }

    /// The number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node of the tree. An empty tree has an empty leaf root.
    pub fn root(&self) -> &Node<Key, Value> {
        &self.root
    }

    /// The number of levels in the tree, counting the root.
    pub fn height(&self) -> usize {
        self.walker().height()
    }

    /// Retrieves the value associated with `key`.
    ///
    /// Returns `None` if the key is not present.
    pub fn search(&self, key: &Key) -> Option<&Value> {
        self.walker().search(key).map(|entry| &entry.value)
    }

    /// Retrieves a mutable reference to the value associated with `key`.
    pub fn search_mut(&mut self, key: &Key) -> Option<&mut Value> {
        let mut node = &mut *self.root;

        loop {
            match node.search(key, &self.comparator) {
                Slot::Occupied(index) => return Some(&mut node.entries[index].value),
                Slot::Vacant(_) if node.is_leaf() => return None,
                Slot::Vacant(index) => node = node.child_at_mut(index),
            }
        }
    }

    /// Whether the tree holds an entry for `key`.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.walker().search(key).is_some()
    }

    /// Inserts a `key`/`value` pair, unless `key` is already present.
    ///
    /// Returns `true` if the entry was inserted. If the key already exists,
    /// the existing value is kept and `false` is returned.
    pub fn insert(&mut self, key: Key, value: Value) -> bool {
        match self.insert_entry(Entry::new(key, value), Collision::Reject) {
            Insertion::Inserted => true,
            Insertion::Rejected => {
                debug!(entries = self.len, "Rejected insertion of duplicate key");
                false
            }
            Insertion::Replaced(_) => false,
        }
    }

    /// Inserts a `key`/`value` pair, replacing the value of an existing
    /// entry with the same key.
    ///
    /// Returns the previous value if the key was already present.
    pub fn put(&mut self, key: Key, value: Value) -> Option<Value> {
        match self.insert_entry(Entry::new(key, value), Collision::Replace) {
            Insertion::Replaced(previous) => Some(previous),
            Insertion::Inserted | Insertion::Rejected => None,
        }
    }

    /// Removes the entry for `key` from the tree and returns it.
    ///
    /// If the key is not present the tree is left exactly as it was, both in
    /// content and in shape, and `None` is returned.
    pub fn delete(&mut self, key: &Key) -> Option<Entry<Key, Value>> {
        if !self.contains_key(key) {
            return None;
        }

        let shaper = TreeShaper::new(self.degree, &self.comparator);
        let removed = shaper.delete(&mut self.root, key);

        if shaper.shrink(&mut self.root) {
            debug!(height = self.walker().height(), "Collapsed empty root");
        }

        if removed.is_some() {
            self.len -= 1;
        }

        removed
    }

    /// Removes every entry, leaving an empty leaf root.
    pub fn clear(&mut self) {
        self.root = Box::new(Node::empty());
        self.len = 0;
    }

    /// The entries of the tree in level order: one vector per depth, each
    /// listing that level's entries from left to right.
    pub fn levels(&self) -> Vec<Vec<&Entry<Key, Value>>> {
        self.walker().levels()
    }

    /// Checks every structural invariant of the tree.
    ///
    /// This walks the whole tree and is meant for diagnostics and tests; a
    /// correctly functioning tree always passes.
    pub fn verify(&self) -> Result<(), DialogBTreeError> {
        self.walker().verify(self.degree, self.len)
    }

    fn insert_entry(&mut self, entry: Entry<Key, Value>, collision: Collision) -> Insertion<Value> {
        // An existing key never reshapes the tree; only new keys split on the way down.
        match collision {
            Collision::Reject if self.contains_key(&entry.key) => return Insertion::Rejected,
            Collision::Replace => {
                if let Some(existing) = self.search_mut(&entry.key) {
                    return Insertion::Replaced(mem::replace(existing, entry.value));
                }
            }
            Collision::Reject => {}
        }

        let shaper = TreeShaper::new(self.degree, &self.comparator);

        if shaper.is_full(&self.root) {
            shaper.grow(&mut self.root);
            debug!(height = self.walker().height(), "Split full root");
        }

        let insertion = shaper.insert(&mut self.root, entry, collision);

        if matches!(insertion, Insertion::Inserted) {
            self.len += 1;
        }

        insertion
    }

    fn walker(&self) -> TreeWalker<'_, Key, Value, Compare> {
        TreeWalker::new(&self.root, &self.comparator)
    }
}

impl<Key, Value, Compare> BTree<Key, Value, Compare>
where
    Key: Display,
    Value: Display,
    Compare: Comparator<Key>,
{
    /// Writes the tree in level order to `sink`, one level per line, each
    /// entry rendered as `key:value` and followed by a space.
    pub fn write_levels<W>(&self, sink: &mut W) -> std::io::Result<()>
    where
        W: Write,
    {
        for level in self.levels() {
            for entry in level {
                write!(sink, "{entry} ")?;
            }
            writeln!(sink)?;
        }

        Ok(())
    }

    /// Prints the tree in level order to standard output.
    ///
    /// See [`BTree::write_levels`] for the format.
    pub fn output(&self) {
        let mut stdout = std::io::stdout().lock();

        if let Err(error) = self.write_levels(&mut stdout) {
            warn!(%error, "Failed to write tree to standard output");
        }
    }
}

impl<Key, Value, Compare> Debug for BTree<Key, Value, Compare>
where
    Compare: Comparator<Key>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BTree")
            .field("degree", &self.degree)
            .field("len", &self.len)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}
