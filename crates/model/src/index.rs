//! Keyed index: the lookup-or-create primitive behind entity deduplication.

use std::hash::Hash;

use indexmap::IndexMap;

/// An insertion-ordered mapping from a dedup key to a stable 1-based id.
///
/// Resolving a key that already exists returns the existing id; otherwise
/// the next sequential id is allocated. Iteration follows insertion order,
/// so exports stay deterministic and ids never depend on hash order.
#[derive(Debug, Clone, Default)]
pub struct KeyedIndex<K> {
    ids: IndexMap<K, i64>,
}

impl<K: Eq + Hash> KeyedIndex<K> {
    pub fn new() -> Self {
        Self { ids: IndexMap::new() }
    }

    /// Look up the id for `key`, allocating the next sequential id if the
    /// key is new. Returns `(id, created)`.
    pub fn get_or_insert(&mut self, key: K) -> (i64, bool) {
        if let Some(id) = self.ids.get(&key) {
            return (*id, false);
        }
        let id = self.ids.len() as i64 + 1;
        self.ids.insert(key, id);
        (id, true)
    }

    /// Whether `id` has been allocated by this index.
    pub fn contains_id(&self, id: i64) -> bool {
        id >= 1 && id <= self.ids.len() as i64
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate `(key, id)` pairs in insertion (= id) order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> {
        self.ids.iter().map(|(key, id)| (key, *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_or_create_is_idempotent() {
        let mut index = KeyedIndex::new();
        let (first, created) = index.get_or_insert("Dallin H. Oaks".to_string());
        assert!(created);
        let (second, created) = index.get_or_insert("Dallin H. Oaks".to_string());
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_ids_are_sequential_in_insertion_order() {
        let mut index = KeyedIndex::new();
        assert_eq!(index.get_or_insert("a"), (1, true));
        assert_eq!(index.get_or_insert("b"), (2, true));
        assert_eq!(index.get_or_insert("a"), (1, false));
        assert_eq!(index.get_or_insert("c"), (3, true));
        let keys: Vec<_> = index.iter().collect();
        assert_eq!(keys, vec![(&"a", 1), (&"b", 2), (&"c", 3)]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut index = KeyedIndex::new();
        let (a, _) = index.get_or_insert("Relief Society");
        let (b, _) = index.get_or_insert("relief society");
        assert_ne!(a, b);
    }
}
