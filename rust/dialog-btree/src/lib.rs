#![deny(missing_docs)]

//! An in-memory B-Tree implementation.
//!
//! This crate provides [`BTree`], an ordered key-value map built from
//! fixed-fanout nodes. The fanout is governed by a minimum [`Degree`] `t`:
//! every node except the root holds between `t - 1` and `2t - 1` entries, and
//! all leaves sit at the same depth.
//!
//! The tree is maintained with single-pass, top-down algorithms:
//!
//! 1. **Insertion** splits any full node before descending into it, so the
//!    node that finally receives the new entry always has room for it. When
//!    the root itself is full the tree grows by one level.
//!
//! 2. **Deletion** makes sure any node it descends into holds at least `t`
//!    entries, borrowing an entry from a sibling (a rotation) or merging with
//!    a sibling when neither can spare one. When the root runs out of entries
//!    the tree shrinks by one level.
//!
//! Basic usage:
//!
//! ```
//! use dialog_btree::BTree;
//!
//! let mut tree = BTree::<u32, &str>::new(3).unwrap();
//!
//! // `insert` refuses to overwrite an existing key
//! assert!(tree.insert(1, "one"));
//! assert!(!tree.insert(1, "uno"));
//!
//! // `put` overwrites, returning the previous value
//! assert_eq!(tree.put(1, "uno"), Some("one"));
//! assert_eq!(tree.search(&1), Some(&"uno"));
//!
//! // `delete` hands back the removed entry
//! let removed = tree.delete(&1).unwrap();
//! assert_eq!(removed.into_pair(), (1, "uno"));
//! assert_eq!(tree.search(&1), None);
//! ```
//!
//! Ordering keys with a custom comparator:
//!
//! ```
//! use dialog_btree::BTree;
//!
//! let descending = |left: &u32, right: &u32| right.cmp(left);
//! let mut tree = BTree::with_comparator(2, descending).unwrap();
//!
//! for i in 0..10u32 {
//!     tree.insert(i, i * i);
//! }
//!
//! assert_eq!(tree.search(&7), Some(&49));
//! assert!(tree.verify().is_ok());
//! ```
//!
//! Inspecting the shape of a tree:
//!
//! ```
//! use dialog_btree::BTree;
//!
//! let mut tree = BTree::<char, char>::new(2).unwrap();
//!
//! for key in ['A', 'B', 'C', 'D'] {
//!     tree.insert(key, key);
//! }
//!
//! let mut dump = Vec::new();
//! tree.write_levels(&mut dump).unwrap();
//!
//! assert_eq!(String::from_utf8(dump).unwrap(), "B:B \nA:A C:C D:D \n");
//! ```

mod degree;
pub use degree::*;

mod compare;
pub use compare::*;

mod entry;
pub use entry::*;

mod node;
pub use node::*;

mod shaper;
pub(crate) use shaper::*;

mod walker;
pub(crate) use walker::*;

mod tree;
pub use tree::*;

mod error;
pub use error::*;
