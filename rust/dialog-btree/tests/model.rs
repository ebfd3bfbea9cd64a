use dialog_btree::{BTree, Entry};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// The number of operations to perform in each proptest case.
const OPERATIONS: usize = 2_000;

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i16, i32),
    Put(i16, i32),
    Delete(i16),
    Search(i16),
}

/// Keys come from a narrow range so that operations frequently collide.
fn key_strategy() -> impl Strategy<Value = i16> {
    -300i16..300i16
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        3 => (key_strategy(), any::<i32>()).prop_map(|(key, value)| MapOp::Insert(key, value)),
        2 => (key_strategy(), any::<i32>()).prop_map(|(key, value)| MapOp::Put(key, value)),
        3 => key_strategy().prop_map(MapOp::Delete),
        1 => key_strategy().prop_map(MapOp::Search),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replays a random sequence of operations on both a [`BTree`] and a
    /// [`BTreeMap`], asserting identical results at every step and a valid
    /// tree shape at the end.
    #[test]
    fn tree_ops_match_btreemap(
        degree in 2usize..8,
        ops in proptest::collection::vec(map_op_strategy(), OPERATIONS)
    ) {
        let mut tree = BTree::<i16, i32>::new(degree).unwrap();
        let mut model = BTreeMap::new();

        for op in &ops {
            match *op {
                MapOp::Insert(key, value) => {
                    let expected = !model.contains_key(&key);
                    if expected {
                        model.insert(key, value);
                    }
                    prop_assert_eq!(tree.insert(key, value), expected, "insert({}, {})", key, value);
                }
                MapOp::Put(key, value) => {
                    prop_assert_eq!(tree.put(key, value), model.insert(key, value), "put({}, {})", key, value);
                }
                MapOp::Delete(key) => {
                    prop_assert_eq!(
                        tree.delete(&key),
                        model.remove(&key).map(|value| Entry::new(key, value)),
                        "delete({})",
                        key
                    );
                }
                MapOp::Search(key) => {
                    prop_assert_eq!(tree.search(&key), model.get(&key), "search({})", key);
                }
            }
        }

        prop_assert_eq!(tree.len(), model.len());
        prop_assert!(tree.verify().is_ok(), "{:?}", tree.verify());

        for (key, value) in &model {
            prop_assert_eq!(tree.search(key), Some(value));
        }
    }

    /// Every prefix of an insertion sequence leaves a valid tree behind.
    #[test]
    fn insertions_preserve_invariants(
        degree in 2usize..6,
        keys in proptest::collection::vec(any::<u16>(), 0..500)
    ) {
        let mut tree = BTree::<u16, ()>::new(degree).unwrap();

        for key in keys {
            tree.put(key, ());
            prop_assert!(tree.verify().is_ok(), "{:?}", tree.verify());
        }
    }
}
