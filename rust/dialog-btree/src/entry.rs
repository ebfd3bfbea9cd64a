use std::fmt::Display;

/// A key-value pair stored in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<Key, Value> {
    /// The key for this entry.
    pub key: Key,
    /// The value associated with the key.
    pub value: Value,
}

impl<Key, Value> Entry<Key, Value> {
    /// Create a new [`Entry`].
    pub fn new(key: Key, value: Value) -> Self {
        Entry { key, value }
    }

    /// Splits the entry into its key and value.
    pub fn into_pair(self) -> (Key, Value) {
        (self.key, self.value)
    }
}

impl<Key, Value> Display for Entry<Key, Value>
where
    Key: Display,
    Value: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}
