//! Standard-style access to any [`Map`]: iteration, cloned key/value lists and a
//! cursor that can remove the entry it points at

use std::fmt;

use crate::hash_map::Map;

/// Adapter presenting a [`Map`] the way std collections are consumed
#[derive(Debug)]
pub struct MapView<'m, M> {
    /// The map every call goes through
    map: &'m mut M,
}

impl<'m, M: Map> MapView<'m, M> {
    /// Wraps `map`
    pub fn new(map: &'m mut M) -> Self {
        Self { map }
    }

    /// Number of pairs in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the map holds no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the value mapped to `key`
    pub fn get(&self, key: &M::Key) -> Option<&M::Value> {
        self.map.get(key)
    }

    /// Returns true if `key` is present
    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.map.contains_key(key)
    }

    /// Maps `key` to `value`, returning the previous value
    pub fn insert(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        self.map.insert(key, value)
    }

    /// Removes `key`, returning its value
    pub fn remove(&mut self, key: &M::Key) -> Option<M::Value> {
        self.map.remove(key)
    }

    /// Removes every pair
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over the pairs in storage order
    pub fn iter(&self) -> M::Iter<'_> {
        self.map.iter()
    }

    /// Returns the keys of the map as a Vec
    pub fn keys(&self) -> Vec<M::Key>
    where
        M::Key: Clone,
    {
        self.map.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Returns the values of the map as a Vec
    pub fn values(&self) -> Vec<M::Value>
    where
        M::Value: Clone,
    {
        self.map.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Starts a cursor over the keys present right now.
    ///
    /// ```rust
    /// use probing_hashmap::{MapView, ProbingTable};
    ///
    /// let mut table: ProbingTable<u32, u32> = (0..10).map(|i| (i, i)).collect();
    /// let mut view = MapView::new(&mut table);
    ///
    /// let mut cursor = view.cursor();
    /// while let Some((key, _)) = cursor.next_entry() {
    ///     if key % 2 == 0 {
    ///         cursor.remove();
    ///     }
    /// }
    ///
    /// assert_eq!(table.len(), 5);
    /// ```
    pub fn cursor(&mut self) -> Cursor<'_, M>
    where
        M::Key: Clone,
    {
        let keys = self.keys();
        Cursor { map: &mut *self.map, keys: keys.into_iter(), current: None }
    }

    /// Keeps only the pairs for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        M::Key: Clone,
        F: FnMut(&M::Key, &M::Value) -> bool,
    {
        let mut cursor = self.cursor();
        while let Some((key, value)) = cursor.next_entry() {
            if !keep(key, value) {
                cursor.remove();
            }
        }
    }
}

impl<M: Map> Extend<(M::Key, M::Value)> for MapView<'_, M> {
    fn extend<T: IntoIterator<Item = (M::Key, M::Value)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.map.insert(k, v);
        }
    }
}

/// Walks a snapshot of the keys of a map and can remove the current one.
///
/// Removal goes through [`Map::remove`], so the table may rehash underneath
/// without the cursor skipping or repeating a key.
pub struct Cursor<'v, M: Map> {
    /// The map removals are applied to
    map: &'v mut M,
    /// Keys not visited yet
    keys: std::vec::IntoIter<M::Key>,
    /// Key returned by the last call to `next_entry`
    current: Option<M::Key>,
}

impl<M: Map> fmt::Debug for Cursor<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("remaining", &self.keys.len())
            .field("positioned", &self.current.is_some())
            .finish_non_exhaustive()
    }
}

impl<M: Map> Cursor<'_, M> {
    /// Advances to the next pair
    pub fn next_entry(&mut self) -> Option<(&M::Key, &M::Value)> {
        self.current = Some(self.keys.next()?);
        let key = self.current.as_ref()?;
        self.map.get(key).map(|value| (key, value))
    }

    /// Removes the pair last returned by [`next_entry`](Self::next_entry).
    ///
    /// Returns `None` if there is no current pair or it was already removed.
    pub fn remove(&mut self) -> Option<M::Value> {
        let key = self.current.take()?;
        self.map.remove(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HashMap, ProbingTable, Strategy};

    #[test]
    fn test_keys_and_values() {
        let mut map = HashMap::new(Strategy::Probing);
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map.insert("c".to_string(), 3);

        let view = map.view();
        let mut keys = view.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = view.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_forwarding() {
        let mut table: ProbingTable<&str, i32> = ProbingTable::new();
        let mut view = MapView::new(&mut table);

        assert!(view.is_empty());
        assert_eq!(view.insert("a", 1), None);
        assert_eq!(view.insert("a", 2), Some(1));
        assert!(view.contains_key(&"a"));
        assert_eq!(view.get(&"a"), Some(&2));
        assert_eq!(view.remove(&"a"), Some(2));
        assert!(!view.contains_key(&"a"));

        view.extend([("b", 3), ("c", 4)]);
        assert_eq!(view.iter().count(), 2);
        view.clear();
        assert!(view.is_empty());
    }

    #[test]
    fn test_cursor_removes_current() {
        let mut table: ProbingTable<u32, u32> = (0..100).map(|i| (i, i * 3)).collect();
        let mut view = MapView::new(&mut table);

        let mut visited = 0;
        let mut cursor = view.cursor();
        while let Some((key, value)) = cursor.next_entry().map(|(k, v)| (*k, *v)) {
            assert_eq!(value, key * 3);
            visited += 1;
            if key % 3 == 0 {
                assert_eq!(cursor.remove(), Some(value));
            }
        }

        assert_eq!(visited, 100);
        assert_eq!(table.len(), 66);
        assert!(table.iter().all(|(k, _)| k % 3 != 0));
        assert!(table.validate());
    }

    #[test]
    fn test_cursor_remove_without_position() {
        let mut table: ProbingTable<u32, u32> = (0..3).map(|i| (i, i)).collect();
        let mut view = MapView::new(&mut table);
        let mut cursor = view.cursor();

        assert_eq!(cursor.remove(), None);
        let (key, _) = cursor.next_entry().map(|(k, v)| (*k, *v)).unwrap();
        assert_eq!(cursor.remove(), Some(key));
        assert_eq!(cursor.remove(), None);
    }

    #[test]
    fn test_cursor_survives_shrink() {
        let config = crate::TableConfig::builder().minimum_capacity(8).build().unwrap();
        let mut table = ProbingTable::with_config(0, config);
        for i in 0..500_u32 {
            table.insert(i, i);
        }
        let grown = table.capacity();

        MapView::new(&mut table).retain(|k, _| *k < 10);

        assert!(table.capacity() < grown);
        assert_eq!(table.len(), 10);
        for i in 0..10 {
            assert_eq!(table.get(&i), Some(&i));
        }
        assert!(table.validate());
    }
}
