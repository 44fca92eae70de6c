use std::{fmt, hash::Hash};

use crate::{
    map_view::MapView,
    probing_table::{self, ProbingTable},
};

/// Associative container holding each key at most once.
///
/// Every table strategy implements this trait; [`HashMap`] forwards to it and
/// [`MapView`] is written purely against it.
pub trait Map {
    /// Type of the keys
    type Key;
    /// Type of the values
    type Value;
    /// Iterator over the key-value pairs
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// Maps `key` to `value`, returning the value previously mapped to `key`
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    /// Returns the value mapped to `key`
    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Removes `key`, returning the value it was mapped to
    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;

    /// Removes every pair
    fn clear(&mut self);

    /// Returns true if `key` is mapped to a value
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    /// Number of pairs in the map
    fn len(&self) -> usize;

    /// Returns true if the map holds no pairs
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks the structural invariants of the map
    fn validate(&self) -> bool;

    /// Iterates over the pairs in storage order
    fn iter(&self) -> Self::Iter<'_>;
}

impl<K, V> Map for ProbingTable<K, V>
where
    K: Eq + Hash,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = probing_table::Iter<'a, K, V>
    where
        Self: 'a;

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Self::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn validate(&self) -> bool {
        Self::validate(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        Self::iter(self)
    }
}

/// Table strategy backing a [`HashMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Open addressing with linear probing, see [`ProbingTable`]
    #[default]
    Probing,
}

/// The live table behind a [`HashMap`]
#[derive(Debug, Clone)]
enum Backend<K, V> {
    /// Linear probing table
    Probing(ProbingTable<K, V>),
}

/// A map whose storage strategy is chosen at construction.
///
/// ```rust
/// use probing_hashmap::{HashMap, Map, Strategy};
///
/// let mut map = HashMap::with_capacity(Strategy::Probing, 2);
/// map.insert("John Doe", 33);
/// map.insert("Jane Doe", 23);
///
/// assert_eq!(map.get(&"John Doe"), Some(&33));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct HashMap<K, V> {
    /// Table every call is forwarded to
    backend: Backend<K, V>,
}

impl<K, V> HashMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates a map with the default capacity of the strategy
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        let backend = match strategy {
            Strategy::Probing => Backend::Probing(ProbingTable::new()),
        };
        Self { backend }
    }

    /// Creates a map sized for `capacity` entries
    #[must_use]
    pub fn with_capacity(strategy: Strategy, capacity: usize) -> Self {
        let backend = match strategy {
            Strategy::Probing => Backend::Probing(ProbingTable::with_capacity(capacity)),
        };
        Self { backend }
    }

    /// Returns the strategy the map was built with
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        match self.backend {
            Backend::Probing(_) => Strategy::Probing,
        }
    }

    /// Exposes the map through the iteration adapter
    pub fn view(&mut self) -> MapView<'_, Self> {
        MapView::new(self)
    }
}

impl<K, V> Map for HashMap<K, V>
where
    K: Eq + Hash,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = probing_table::Iter<'a, K, V>
    where
        Self: 'a;

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.backend {
            Backend::Probing(table) => table.insert(key, value),
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        match &self.backend {
            Backend::Probing(table) => table.get(key),
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.backend {
            Backend::Probing(table) => table.remove(key),
        }
    }

    fn clear(&mut self) {
        match &mut self.backend {
            Backend::Probing(table) => table.clear(),
        }
    }

    fn len(&self) -> usize {
        match &self.backend {
            Backend::Probing(table) => table.len(),
        }
    }

    fn validate(&self) -> bool {
        match &self.backend {
            Backend::Probing(table) => table.validate(),
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        match &self.backend {
            Backend::Probing(table) => table.iter(),
        }
    }
}

impl<K, V: fmt::Display> fmt::Display for HashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.backend {
            Backend::Probing(table) => fmt::Display::fmt(table, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_creation_without_size() {
        let mut map = HashMap::new(Strategy::Probing);
        map.insert("John Doe".to_string(), 33);
        map.insert("Jane Doe".to_string(), 23);

        assert_eq!(map.get(&"John Doe".to_string()), Some(&33));
        assert_eq!(map.get(&"Jane Doe".to_string()), Some(&23));
        assert_eq!(map.len(), 2);
        assert_eq!(map.strategy(), Strategy::Probing);
    }

    #[test]
    fn test_map_creation_with_size() {
        let mut map = HashMap::with_capacity(Strategy::default(), 2);
        map.insert("John Doe", 33);
        map.insert("Jane Doe", 23);

        assert_eq!(map.get(&"John Doe"), Some(&33));
        assert_eq!(map.get(&"Jane Doe"), Some(&23));
        assert_eq!(map.get(&"Dmytro Kytsmen"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_map_removal() {
        let mut map = HashMap::with_capacity(Strategy::Probing, 2);
        map.insert("John Doe", 33);
        map.insert("Jane Doe", 23);

        assert_eq!(map.remove(&"John Doe"), Some(33));
        assert_eq!(map.get(&"John Doe"), None);
        assert!(!map.contains_key(&"John Doe"));
        assert_eq!(map.get(&"Jane Doe"), Some(&23));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove(&"Dmytro Kytsmen"), None);
    }

    #[test]
    fn test_map_for_put() {
        let mut map: HashMap<Option<&str>, Option<i32>> =
            HashMap::with_capacity(Strategy::Probing, 2);
        assert_eq!(map.insert(None, None), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_clear_and_validate() {
        let mut map = HashMap::new(Strategy::Probing);
        for i in 0..100 {
            map.insert(i, i.to_string());
        }
        assert!(map.validate());
        assert_eq!(map.iter().count(), 100);

        map.clear();
        assert!(map.is_empty());
        assert!(map.validate());
    }

    #[test]
    fn test_display_forwards_to_table() {
        let mut map = HashMap::new(Strategy::Probing);
        map.insert(7_u8, 70);

        let rendered = map.to_string();
        assert!(rendered.ends_with("=70, "));
    }
}
