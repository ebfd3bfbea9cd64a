//! Tree construction and modification logic.
//!
//! This module contains [`TreeShaper`], which encapsulates every operation
//! that changes the shape of a [`BTree`](crate::BTree): splitting full nodes
//! on the way down during insertion, and rotating or merging minimal nodes on
//! the way down during deletion. The read-only traversals live in the
//! walker module.
//!
//! Every descent performed here is top-down and single-pass. Before the
//! shaper enters a child it makes sure that the child can absorb the change
//! (a non-full child for insertion, a child with at least `t` entries for
//! deletion), so no node ever has to be repaired on the way back up.

use std::{cmp::Ordering, mem};

use tracing::trace;

use crate::{Comparator, Degree, Entry, Node, Slot};

/// How an insertion treats a key that is already present in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    /// Leave the existing entry untouched.
    Reject,
    /// Overwrite the existing entry's value.
    Replace,
}

/// The outcome of inserting an entry.
#[derive(Debug, PartialEq, Eq)]
pub enum Insertion<Value> {
    /// The key was new and the entry was added.
    Inserted,
    /// The key was already present and the entry was discarded.
    Rejected,
    /// The key was already present; holds the value it used to map to.
    Replaced(Value),
}

/// Handles the structural maintenance of a tree with a fixed [`Degree`].
///
/// A [`TreeShaper`] borrows the comparator of the tree it works on and is
/// cheap to construct, so the tree creates one per mutation.
pub struct TreeShaper<'a, Compare> {
    degree: Degree,
    comparator: &'a Compare,
}

impl<'a, Compare> TreeShaper<'a, Compare> {
    /// Creates a new [`TreeShaper`] for nodes of the given degree.
    pub fn new(degree: Degree, comparator: &'a Compare) -> Self {
        Self { degree, comparator }
    }

    /// Whether `node` holds the maximum number of entries.
    pub fn is_full<Key, Value>(&self, node: &Node<Key, Value>) -> bool {
        node.len() == self.degree.max_entries()
    }

    /// Grows the tree by one level: the current root becomes the only child
    /// of a new, empty root, and is then split against it.
    ///
    /// The root must be full.
    pub fn grow<Key, Value>(&self, root: &mut Box<Node<Key, Value>>) {
        let old_root = mem::replace(root, Box::new(Node::empty()));
        root.children.push(old_root);
        self.split_child(root, 0);
    }

    /// Replaces an entry-less internal root with its only child, shrinking
    /// the tree by one level.
    ///
    /// Returns `true` if the tree shrank.
    pub fn shrink<Key, Value>(&self, root: &mut Box<Node<Key, Value>>) -> bool {
        if !root.is_empty() || root.is_leaf() {
            return false;
        }

        match root.children.pop() {
            Some(child) => {
                *root = child;
                true
            }
            None => false,
        }
    }

    /// Splits the full child at `index` of `parent`.
    ///
    /// The child keeps its lower `t - 1` entries (and `t` children), a new
    /// right sibling receives the upper `t - 1` entries (and `t` children),
    /// and the median entry moves up into `parent` at `index`.
    ///
    /// Panics if the child is not full; splitting any other node would break
    /// the occupancy invariant.
    pub fn split_child<Key, Value>(&self, parent: &mut Node<Key, Value>, index: usize) {
        let t = self.degree.get();

        let (median, sibling) = {
            let child = parent.child_at_mut(index);
            assert_eq!(
                child.len(),
                self.degree.max_entries(),
                "Attempted to split a node that has not reached the maximum entry count"
            );

            let entries = child.entries.split_off(t);
            let children = if child.is_leaf() {
                Vec::new()
            } else {
                child.children.split_off(t)
            };
            let median = child.entries.remove(t - 1);

            (median, Node::from_parts(entries, children))
        };

        parent.entries.insert(index, median);
        parent.children.insert(index + 1, Box::new(sibling));

        trace!(index, degree = t, "Split full child");
    }

    /// Merges the child at `index + 1` of `parent` into the child at `index`,
    /// pulling the separating entry down between them.
    ///
    /// Both children are expected to hold `t - 1` entries, so the merged node
    /// is full.
    pub fn merge_children<Key, Value>(&self, parent: &mut Node<Key, Value>, index: usize) {
        assert!(
            index + 1 < parent.children.len(),
            "Attempted to merge a child that has no right sibling"
        );

        let right = parent.children.remove(index + 1);
        let separator = parent.entries.remove(index);
        let Node { entries, children } = *right;

        let left = parent.child_at_mut(index);
        left.entries.push(separator);
        left.entries.extend(entries);
        left.children.extend(children);

        debug_assert!(left.len() <= self.degree.max_entries());
        trace!(index, entries = left.len(), "Merged children");
    }

    /// Moves one entry from the right sibling of the child at `index` up into
    /// `parent`, and the displaced separator down into the child. The
    /// sibling's first child, if any, moves along with it.
    pub fn rotate_from_right<Key, Value>(&self, parent: &mut Node<Key, Value>, index: usize) {
        let (left, right) = parent.children.split_at_mut(index + 1);
        let child = &mut left[index];
        let sibling = &mut right[0];

        assert!(
            sibling.len() > self.degree.min_entries(),
            "Attempted to rotate from a sibling with the minimum entry count"
        );

        let borrowed = sibling.entries.remove(0);
        let separator = mem::replace(&mut parent.entries[index], borrowed);
        child.entries.push(separator);

        if !sibling.is_leaf() {
            child.children.push(sibling.children.remove(0));
        }

        trace!(index, "Rotated entry from right sibling");
    }

    /// Moves one entry from the left sibling of the child at `index` up into
    /// `parent`, and the displaced separator down into the child. The
    /// sibling's last child, if any, moves along with it.
    pub fn rotate_from_left<Key, Value>(&self, parent: &mut Node<Key, Value>, index: usize) {
        let (left, right) = parent.children.split_at_mut(index);
        let sibling = &mut left[index - 1];
        let child = &mut right[0];

        assert!(
            sibling.len() > self.degree.min_entries(),
            "Attempted to rotate from a sibling with the minimum entry count"
        );

        let last = sibling.len() - 1;
        let borrowed = sibling.entries.remove(last);
        let separator = mem::replace(&mut parent.entries[index - 1], borrowed);
        child.entries.insert(0, separator);

        if let Some(grandchild) = sibling.children.pop() {
            child.children.insert(0, grandchild);
        }

        trace!(index, "Rotated entry from left sibling");
    }

    /// Makes sure the child at `index` of `parent` holds at least `t`
    /// entries, so that it can lose one.
    ///
    /// Prefers rotating from the right sibling, then from the left sibling,
    /// and falls back to merging with the right sibling (or the left one for
    /// the last child). Returns the index of the child that now covers the
    /// original child's key range.
    fn reinforce<Key, Value>(&self, parent: &mut Node<Key, Value>, index: usize) -> usize {
        let t = self.degree.get();

        if parent.child_at(index).len() >= t {
            return index;
        }

        let has_right = index < parent.len();
        let has_left = index > 0;

        if has_right && parent.child_at(index + 1).len() >= t {
            self.rotate_from_right(parent, index);
            index
        } else if has_left && parent.child_at(index - 1).len() >= t {
            self.rotate_from_left(parent, index);
            index
        } else if has_right {
            self.merge_children(parent, index);
            index
        } else {
            self.merge_children(parent, index - 1);
            index - 1
        }
    }
}

impl<'a, Compare> TreeShaper<'a, Compare> {
    /// Inserts `entry` into the subtree rooted at `node`.
    ///
    /// `node` must not be full. Any full child is split before the descent
    /// enters it, so the precondition holds at every level.
    pub fn insert<Key, Value>(
        &self,
        node: &mut Node<Key, Value>,
        entry: Entry<Key, Value>,
        collision: Collision,
    ) -> Insertion<Value>
    where
        Compare: Comparator<Key>,
    {
        debug_assert!(!self.is_full(node));

        match node.search(&entry.key, self.comparator) {
            Slot::Occupied(index) => Self::collide(&mut node.entries[index], entry, collision),
            Slot::Vacant(index) if node.is_leaf() => {
                node.entries.insert(index, entry);
                Insertion::Inserted
            }
            Slot::Vacant(mut index) => {
                if self.is_full(node.child_at(index)) {
                    self.split_child(node, index);

                    // The promoted median may be the key itself, or the key
                    // may now belong to the new right sibling
                    match self
                        .comparator
                        .compare(&entry.key, &node.entries[index].key)
                    {
                        Ordering::Less => {}
                        Ordering::Equal => {
                            return Self::collide(&mut node.entries[index], entry, collision);
                        }
                        Ordering::Greater => index += 1,
                    }
                }

                self.insert(node.child_at_mut(index), entry, collision)
            }
        }
    }

    /// Removes the entry for `key` from the subtree rooted at `node`.
    ///
    /// Unless `node` is the root, it must hold at least `t` entries. Every
    /// child is reinforced to `t` entries before the descent enters it.
    pub fn delete<Key, Value>(
        &self,
        node: &mut Node<Key, Value>,
        key: &Key,
    ) -> Option<Entry<Key, Value>>
    where
        Compare: Comparator<Key>,
    {
        let t = self.degree.get();

        match node.search(key, self.comparator) {
            Slot::Occupied(index) if node.is_leaf() => Some(node.entries.remove(index)),
            Slot::Occupied(index) => {
                if node.child_at(index).len() >= t {
                    let predecessor = self.delete_last(node.child_at_mut(index));
                    Some(mem::replace(&mut node.entries[index], predecessor))
                } else if node.child_at(index + 1).len() >= t {
                    let successor = self.delete_first(node.child_at_mut(index + 1));
                    Some(mem::replace(&mut node.entries[index], successor))
                } else {
                    self.merge_children(node, index);
                    self.delete(node.child_at_mut(index), key)
                }
            }
            Slot::Vacant(_) if node.is_leaf() => None,
            Slot::Vacant(index) => {
                let index = self.reinforce(node, index);
                self.delete(node.child_at_mut(index), key)
            }
        }
    }

    /// Removes and returns the greatest entry of the subtree rooted at
    /// `node`, which must hold at least `t` entries.
    fn delete_last<Key, Value>(&self, node: &mut Node<Key, Value>) -> Entry<Key, Value> {
        if node.is_leaf() {
            let last = node.len() - 1;
            return node.entries.remove(last);
        }

        let index = self.reinforce(node, node.len());
        self.delete_last(node.child_at_mut(index))
    }

    /// Removes and returns the least entry of the subtree rooted at `node`,
    /// which must hold at least `t` entries.
    fn delete_first<Key, Value>(&self, node: &mut Node<Key, Value>) -> Entry<Key, Value> {
        if node.is_leaf() {
            return node.entries.remove(0);
        }

        let index = self.reinforce(node, 0);
        self.delete_first(node.child_at_mut(index))
    }

    fn collide<Key, Value>(
        existing: &mut Entry<Key, Value>,
        entry: Entry<Key, Value>,
        collision: Collision,
    ) -> Insertion<Value> {
        match collision {
            Collision::Reject => Insertion::Rejected,
            Collision::Replace => Insertion::Replaced(mem::replace(&mut existing.value, entry.value)),
        }
    }
}
