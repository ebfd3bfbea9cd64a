use std::{cmp::Ordering, collections::VecDeque};

use crate::{Comparator, Degree, DialogBTreeError, Entry, Node, Slot};

/// A read-only traversal mechanism for walking through a tree.
pub struct TreeWalker<'a, Key, Value, Compare> {
    root: &'a Node<Key, Value>,
    comparator: &'a Compare,
}

impl<'a, Key, Value, Compare> TreeWalker<'a, Key, Value, Compare>
where
    Compare: Comparator<Key>,
{
    /// Creates a new [`TreeWalker`] starting at `root`.
    pub fn new(root: &'a Node<Key, Value>, comparator: &'a Compare) -> Self {
        Self { root, comparator }
    }

    /// Finds the entry for `key`.
    ///
    /// At each node the entries are binary-searched; a miss in an internal
    /// node continues in the child whose key range brackets `key`, and a miss
    /// in a leaf means the key is absent.
    pub fn search(&self, key: &Key) -> Option<&'a Entry<Key, Value>> {
        let mut node = self.root;

        loop {
            match node.search(key, self.comparator) {
                Slot::Occupied(index) => return node.entries.get(index),
                Slot::Vacant(_) if node.is_leaf() => return None,
                Slot::Vacant(index) => node = node.child_at(index),
            }
        }
    }

    /// Collects the entries of every node, grouped by depth, visiting each
    /// level left to right.
    pub fn levels(&self) -> Vec<Vec<&'a Entry<Key, Value>>> {
        let mut levels: Vec<Vec<&'a Entry<Key, Value>>> = Vec::new();
        let mut queue = VecDeque::from([(self.root, 0usize)]);

        while let Some((node, depth)) = queue.pop_front() {
            if levels.len() == depth {
                levels.push(Vec::new());
            }
            levels[depth].extend(node.entries.iter());
            queue.extend(node.children().map(|child| (child, depth + 1)));
        }

        levels
    }

    /// The number of levels in the tree. A tree holding a single leaf has a
    /// height of one.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self.root;

        while let Some(child) = node.children().next() {
            node = child;
            height += 1;
        }

        height
    }

    /// Checks every structural invariant of the tree, returning the first
    /// violation found.
    ///
    /// `expected_entries` is the number of entries the tree believes it
    /// holds.
    pub fn verify(&self, degree: Degree, expected_entries: usize) -> Result<(), DialogBTreeError> {
        let mut audit = Audit {
            degree,
            leaf_depth: None,
            entries: 0,
        };

        self.verify_node(self.root, 0, None, None, &mut audit)?;

        if audit.entries != expected_entries {
            return Err(DialogBTreeError::InvariantViolation(format!(
                "Tree reports {expected_entries} entries but holds {}",
                audit.entries
            )));
        }

        Ok(())
    }

    fn verify_node(
        &self,
        node: &'a Node<Key, Value>,
        depth: usize,
        lower: Option<&'a Key>,
        upper: Option<&'a Key>,
        audit: &mut Audit,
    ) -> Result<(), DialogBTreeError> {
        let count = node.len();
        let minimum = if depth == 0 {
            usize::from(!node.is_leaf())
        } else {
            audit.degree.min_entries()
        };

        if count < minimum || count > audit.degree.max_entries() {
            return Err(DialogBTreeError::InvariantViolation(format!(
                "Node at depth {depth} holds {count} entries; expected between {minimum} and {}",
                audit.degree.max_entries()
            )));
        }

        for pair in node.entries.windows(2) {
            if self.comparator.compare(&pair[0].key, &pair[1].key) != Ordering::Less {
                return Err(DialogBTreeError::InvariantViolation(format!(
                    "Entries of node at depth {depth} are not strictly ascending"
                )));
            }
        }

        let first = node.entries.first().map(|entry| &entry.key);
        let last = node.entries.last().map(|entry| &entry.key);

        if let (Some(lower), Some(first)) = (lower, first) {
            if self.comparator.compare(lower, first) != Ordering::Less {
                return Err(DialogBTreeError::InvariantViolation(format!(
                    "Node at depth {depth} holds a key at or below its lower separator"
                )));
            }
        }

        if let (Some(upper), Some(last)) = (upper, last) {
            if self.comparator.compare(last, upper) != Ordering::Less {
                return Err(DialogBTreeError::InvariantViolation(format!(
                    "Node at depth {depth} holds a key at or above its upper separator"
                )));
            }
        }

        audit.entries += count;

        if node.is_leaf() {
            return match audit.leaf_depth {
                Some(leaf_depth) if leaf_depth != depth => {
                    Err(DialogBTreeError::InvariantViolation(format!(
                        "Found a leaf at depth {depth}; other leaves are at depth {leaf_depth}"
                    )))
                }
                Some(_) => Ok(()),
                None => {
                    audit.leaf_depth = Some(depth);
                    Ok(())
                }
            };
        }

        if node.children.len() != count + 1 {
            return Err(DialogBTreeError::InvariantViolation(format!(
                "Internal node at depth {depth} holds {count} entries but {} children",
                node.children.len()
            )));
        }

        for (index, child) in node.children().enumerate() {
            let child_lower = match index {
                0 => lower,
                _ => Some(&node.entries[index - 1].key),
            };
            let child_upper = node.entries.get(index).map(|entry| &entry.key).or(upper);

            self.verify_node(child, depth + 1, child_lower, child_upper, audit)?;
        }

        Ok(())
    }
}

struct Audit {
    degree: Degree,
    leaf_depth: Option<usize>,
    entries: usize,
}
