use std::{
    borrow::Borrow,
    collections::{HashSet, hash_map::DefaultHasher},
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    mem,
};

use log::{debug, trace};

use crate::config::TableConfig;

/// Largest power of two a `usize` can hold
const MAX_CAPACITY: usize = 1 << (usize::BITS - 1);

/// A key-value pair stored in a slot
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

/// Outcome of walking the probe sequence of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key lives in this slot
    Occupied(usize),
    /// The key is absent and this is the first empty slot of its sequence
    Vacant(usize),
    /// Every slot was examined without finding the key or an empty slot
    Full,
}

/// A hash table using open addressing with linear probing.
///
/// Entries live directly in a power-of-two slot array. A key starts probing at
/// `hash(key) mod capacity` and walks forward one slot at a time, wrapping at the
/// end. The table doubles once the number of entries reaches
/// `capacity × load_factor` and shrinks by the configured divisor when removals
/// leave it sparse. Removal shifts the rest of the cluster backwards, so no
/// tombstones are kept.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ProbingTable<K, V> {
    /// The slots storing the key-value pairs
    slots: Box<[Option<Entry<K, V>>]>,
    /// Current number of occupied slots
    len: usize,
    /// Sizing parameters fixed at construction
    config: TableConfig,
}

impl<K, V> Default for ProbingTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ProbingTable<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ProbingTable<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> ProbingTable<K, V>
where
    K: Eq + Hash,
{
    /// Creates a table sized for the default minimum capacity (2048 slots)
    #[must_use]
    pub fn new() -> Self {
        let config = TableConfig::default();
        Self::with_config(config.minimum_capacity(), config)
    }

    /// Creates a table with `2 × capacity` slots, rounded up to a power of two and
    /// never below the default minimum capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(capacity, TableConfig::default())
    }

    /// Creates a table with `2 × capacity` slots using the given parameters
    #[must_use]
    pub fn with_config(capacity: usize, config: TableConfig) -> Self {
        let capacity = capacity
            .saturating_mul(2)
            .checked_next_power_of_two()
            .unwrap_or(MAX_CAPACITY)
            .max(config.minimum_capacity());

        Self { slots: empty_slots(capacity), len: 0, config }
    }

    /// Computes the hash for a key
    fn hash<Q: ?Sized + Hash>(key: &Q) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Gets the probe start slot for a key
    #[allow(clippy::cast_possible_truncation)]
    fn index_of<Q: ?Sized + Hash>(&self, key: &Q) -> usize {
        (Self::hash(key) as usize) & self.slots.len().saturating_sub(1)
    }

    /// Returns the slot after `index`, wrapping to the start of the table
    fn next_index(&self, index: usize) -> usize {
        let next = index.saturating_add(1);
        if next >= self.slots.len() { 0 } else { next }
    }

    /// Walks the probe sequence of `key` until it finds the key or an empty slot
    fn probe<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut index = self.index_of(key);

        for _ in 0..self.slots.len() {
            match self.slots.get(index) {
                None => return Probe::Full,
                Some(None) => return Probe::Vacant(index),
                Some(Some(entry)) if entry.key.borrow() == key => return Probe::Occupied(index),
                Some(Some(_)) => {}
            }
            index = self.next_index(index);
        }

        Probe::Full
    }

    /// Inserts a key-value pair, returning the value previously stored for the key
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.probe(&key) {
            Probe::Occupied(index) => self
                .slots
                .get_mut(index)
                .and_then(Option::as_mut)
                .map(|entry| mem::replace(&mut entry.value, value)),
            Probe::Vacant(index) => {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Some(Entry { key, value });
                    self.len = self.len.saturating_add(1);
                }
                if self.len >= self.config.grow_threshold(self.slots.len()) {
                    self.grow();
                }
                None
            }
            // Only reachable if the grow threshold let the table fill up
            Probe::Full => {
                self.grow();
                self.insert(key, value)
            }
        }
    }

    /// Retrieve a value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.probe(key) {
            Probe::Occupied(index) => {
                self.slots.get(index).and_then(Option::as_ref).map(|entry| &entry.value)
            }
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.probe(key) {
            Probe::Occupied(index) => {
                self.slots.get_mut(index).and_then(Option::as_mut).map(|entry| &mut entry.value)
            }
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns true if the table holds the given key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes a key from the table, returning the value it was mapped to
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Probe::Occupied(index) = self.probe(key) else {
            return None;
        };
        let entry = self.slots.get_mut(index).and_then(Option::take)?;
        self.len = self.len.saturating_sub(1);
        self.close_gap(index);

        if let Some(capacity) = self.config.shrink_target(self.len, self.slots.len()) {
            self.rebuild(capacity);
        }

        Some(entry.value)
    }

    /// Moves the entries following `hole` back so every probe sequence that
    /// crossed it stays unbroken
    fn close_gap(&mut self, hole: usize) {
        let mut hole = hole;
        let mut index = self.next_index(hole);

        while let Some(Some(entry)) = self.slots.get(index) {
            let home = self.index_of(&entry.key);
            // The entry must stay if its home lies cyclically in (hole, index]
            let stays = if hole <= index {
                hole < home && home <= index
            } else {
                hole < home || home <= index
            };

            if !stays {
                let moved = self.slots.get_mut(index).and_then(Option::take);
                if let Some(slot) = self.slots.get_mut(hole) {
                    *slot = moved;
                }
                trace!("Shifted entry from slot {index} back to slot {hole}");
                hole = index;
            }
            index = self.next_index(index);
        }
    }

    /// Doubles the capacity
    fn grow(&mut self) {
        let capacity = self.slots.len().checked_mul(2).unwrap_or(MAX_CAPACITY);
        self.rebuild(capacity);
    }

    /// Reallocates the slots at `capacity` and re-places every entry in slot order
    fn rebuild(&mut self, capacity: usize) {
        debug!(
            "Rebuilding probing table: {} -> {} slots, {} entries",
            self.slots.len(),
            capacity,
            self.len
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        self.len = 0;

        for entry in old_slots.into_vec().into_iter().flatten() {
            self.place(entry);
        }
    }

    /// Puts an entry whose key is known to be absent into the first empty slot
    /// of its probe sequence
    fn place(&mut self, entry: Entry<K, V>) {
        let mut index = self.index_of(&entry.key);

        for _ in 0..self.slots.len() {
            if let Some(slot) = self.slots.get_mut(index) {
                if slot.is_none() {
                    *slot = Some(entry);
                    self.len = self.len.saturating_add(1);
                    return;
                }
            }
            index = self.next_index(index);
        }
    }

    /// Returns the number of slots a lookup for `key` examines
    #[allow(clippy::arithmetic_side_effects)]
    pub fn probe_count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let start = self.index_of(key);
        let capacity = self.slots.len();

        match self.probe(key) {
            Probe::Occupied(end) | Probe::Vacant(end) => {
                end.wrapping_sub(start).wrapping_add(capacity) % capacity.max(1) + 1
            }
            Probe::Full => capacity,
        }
    }

    /// Checks the structural invariants of the table.
    ///
    /// Fails if a key is stored twice, if the number of distinct keys differs
    /// from [`len`](Self::len), or if an entry cannot be reached from its probe
    /// start slot.
    #[must_use]
    pub fn validate(&self) -> bool {
        if !self.slots.len().is_power_of_two() {
            return false;
        }

        let mut keys = HashSet::with_capacity(self.len);
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = slot else {
                continue;
            };
            if !keys.insert(&entry.key) {
                return false;
            }
            if self.probe(&entry.key) != Probe::Occupied(index) {
                return false;
            }
        }

        keys.len() == self.len
    }
}

impl<K, V> ProbingTable<K, V> {
    /// Returns the number of elements in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the parameters the table was created with
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Empties every slot; the capacity is kept
    pub fn clear(&mut self) {
        self.slots.fill_with(|| None);
        self.len = 0;
    }

    /// Returns an iterator over the key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter(), remaining: self.len }
    }

    /// Renders every occupied slot as `slot=value, ` in slot order
    #[must_use]
    pub fn render(&self) -> String
    where
        V: fmt::Display,
    {
        self.to_string()
    }
}

impl<K, V: fmt::Display> fmt::Display for ProbingTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(entry) = slot {
                write!(f, "{index}={}, ", entry.value)?;
            }
        }
        Ok(())
    }
}

impl<'a, K, V> IntoIterator for &'a ProbingTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Box<[Option<Entry<K, V>>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Iterator over the key-value pairs of a [`ProbingTable`]
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Slots not visited yet
    slots: std::slice::Iter<'a, Option<Entry<K, V>>>,
    /// Occupied slots not yielded yet
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Option::as_ref)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
