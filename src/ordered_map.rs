//! The [`OrderedMap`] container: a `Vec<(K, V)>` in insertion order plus a
//! hash index from each key to its position in that vector.

use core::borrow::Borrow;
use core::fmt::{self, Debug};
use core::hash::Hash;
use core::mem;
use core::ops::{Index, IndexMut};

use alloc::vec::Vec;

#[cfg(not(feature = "no_std_support"))]
use std::collections::hash_map::{Entry, HashMap};

#[cfg(feature = "no_std_support")]
use hashbrown::hash_map::{Entry, HashMap};

use crate::error::{MapError, Result};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::{debug, trace};

/// A map that iterates in the order keys were first inserted.
///
/// Entries are stored contiguously, so they can also be addressed by
/// position (`0..len()`). Positions act as handles: [`insert`](Self::insert)
/// and [`find`](Self::find) return them, and [`erase_at`](Self::erase_at) and
/// [`get_index`](Self::get_index) consume them.
///
/// A position stays valid until the next structural change. `erase`,
/// `erase_at`, `remove_if`, `retain`, `pop_back` and `clear` may move or drop
/// entries. Inserting never moves an existing entry.
///
/// Inserting a key that is already present leaves the stored value alone. A
/// key that is erased and inserted again goes to the end, like any new key.
///
/// Each key is stored twice, once with its value and once in the index, so
/// operations that add keys require `K: Clone`.
pub struct OrderedMap<K, V> {
  /// Entries in insertion order.
  entries: Vec<(K, V)>,
  /// Position of every key in `entries`.
  index: HashMap<K, usize>,
}

impl<K, V> OrderedMap<K, V> {
  /// Creates a new, empty `OrderedMap`.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let map: OrderedMap<u32, String> = OrderedMap::new();
  /// assert!(map.is_empty());
  /// ```
  pub fn new() -> Self {
    OrderedMap {
      entries: Vec::new(),
      index: HashMap::new(),
    }
  }

  /// Creates a new, empty `OrderedMap` that can hold at least `capacity`
  /// entries without reallocating.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let map: OrderedMap<u32, u32> = OrderedMap::with_capacity(16);
  /// assert!(map.capacity() >= 16);
  /// ```
  pub fn with_capacity(capacity: usize) -> Self {
    OrderedMap {
      entries: Vec::with_capacity(capacity),
      index: HashMap::with_capacity(capacity),
    }
  }

  /// Returns the number of entries the map can hold without reallocating.
  pub fn capacity(&self) -> usize {
    self.entries.capacity().min(self.index.capacity())
  }

  /// Returns the number of entries in the map.
  #[inline]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` if the map holds no entries.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Returns an iterator over `(&K, &V)` in insertion order.
  ///
  /// The iterator is double-ended; call `.rev()` to walk from the most
  /// recently inserted entry back to the oldest.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let map: OrderedMap<_, _> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
  /// let keys: Vec<_> = map.iter().rev().map(|(k, _)| *k).collect();
  /// assert_eq!(keys, [3, 2, 1]);
  /// ```
  pub fn iter(&self) -> Iter<'_, K, V> {
    Iter { inner: self.entries.iter() }
  }

  /// Returns an iterator over `(&K, &mut V)` in insertion order.
  pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
    IterMut { inner: self.entries.iter_mut() }
  }

  /// Returns an iterator over the keys in insertion order.
  pub fn keys(&self) -> Keys<'_, K, V> {
    Keys { inner: self.entries.iter() }
  }

  /// Returns an iterator over the values in insertion order.
  pub fn values(&self) -> Values<'_, K, V> {
    Values { inner: self.entries.iter() }
  }

  /// Returns a mutable iterator over the values in insertion order.
  pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
    ValuesMut { inner: self.entries.iter_mut() }
  }

  /// Returns the entry at `position`, or `None` if it is past the end.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// map.insert("x", 10);
  /// map.insert("y", 20);
  /// assert_eq!(map.get_index(1), Some((&"y", &20)));
  /// assert_eq!(map.get_index(2), None);
  /// ```
  pub fn get_index(&self, position: usize) -> Option<(&K, &V)> {
    self.entries.get(position).map(|(k, v)| (k, v))
  }

  /// Returns the entry at `position` with a mutable value.
  pub fn get_index_mut(&mut self, position: usize) -> Option<(&K, &mut V)> {
    self.entries.get_mut(position).map(|(k, v)| (&*k, v))
  }

  /// Returns the oldest entry.
  pub fn front(&self) -> Option<(&K, &V)> {
    self.entries.first().map(|(k, v)| (k, v))
  }

  /// Returns the most recently inserted entry.
  pub fn back(&self) -> Option<(&K, &V)> {
    self.entries.last().map(|(k, v)| (k, v))
  }

  /// Returns the entries as a slice, in insertion order.
  pub fn as_entries(&self) -> &[(K, V)] {
    &self.entries
  }

  /// Removes every entry. The allocated capacity is kept.
  pub fn clear(&mut self) {
    self.entries.clear();
    self.index.clear();
  }

  /// Removes every entry and returns them in insertion order, leaving the
  /// map empty.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// map.insert('b', 1);
  /// map.insert('a', 2);
  /// assert_eq!(map.take_entries(), vec![('b', 1), ('a', 2)]);
  /// assert!(map.is_empty());
  /// ```
  pub fn take_entries(&mut self) -> Vec<(K, V)> {
    self.index.clear();
    mem::take(&mut self.entries)
  }

  /// Consumes the map and returns its entries in insertion order.
  pub fn into_entries(self) -> Vec<(K, V)> {
    self.entries
  }
}

impl<K, V> OrderedMap<K, V>
where
  K: Hash + Eq,
{
  /// Reserves room for at least `additional` more entries.
  pub fn reserve(&mut self, additional: usize) {
    self.entries.reserve(additional);
    self.index.reserve(additional);
  }

  /// Shrinks the entry storage and the index as much as possible.
  pub fn shrink_to_fit(&mut self) {
    self.entries.shrink_to_fit();
    self.index.shrink_to_fit();
  }

  /// Returns the position of `key`, or `None` if it is not present.
  ///
  /// The lookup goes through the index and never scans the entries.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// map.insert(7, "seven");
  /// map.insert(3, "three");
  /// assert_eq!(map.find(&3), Some(1));
  /// assert_eq!(map.find(&4), None);
  /// ```
  pub fn find<Q>(&self, key: &Q) -> Option<usize>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.index.get(key).copied()
  }

  /// Returns `true` if the map contains `key`.
  pub fn contains_key<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.index.contains_key(key)
  }

  /// Returns the number of entries stored under `key`, which is 0 or 1.
  pub fn count<Q>(&self, key: &Q) -> usize
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    usize::from(self.contains_key(key))
  }

  /// Returns a reference to the value stored under `key`.
  pub fn get<Q>(&self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let position = self.find(key)?;
    Some(&self.entries[position].1)
  }

  /// Returns a mutable reference to the value stored under `key`.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// map.insert("hits", 1);
  /// if let Some(hits) = map.get_mut("hits") {
  ///     *hits += 1;
  /// }
  /// assert_eq!(map["hits"], 2);
  /// ```
  pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let position = self.find(key)?;
    Some(&mut self.entries[position].1)
  }

  /// Returns the stored key and its value.
  pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let position = self.find(key)?;
    self.get_index(position)
  }

  /// Checked counterpart of `map[key]`.
  ///
  /// # Errors
  ///
  /// Returns [`MapError::KeyNotFound`] if `key` is not present.
  pub fn at<Q>(&self, key: &Q) -> Result<&V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.get(key).ok_or(MapError::KeyNotFound)
  }

  /// Checked counterpart of `map[key] = value`.
  ///
  /// # Errors
  ///
  /// Returns [`MapError::KeyNotFound`] if `key` is not present.
  pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.get_mut(key).ok_or(MapError::KeyNotFound)
  }

  /// Returns a copy of the value stored under `key`, or `V::default()` when
  /// the key is absent. The map is not modified either way.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// map.insert("a", 5);
  /// assert_eq!(map.lookup("a"), 5);
  /// assert_eq!(map.lookup("b"), 0);
  /// assert_eq!(map.len(), 1);
  /// ```
  pub fn lookup<Q>(&self, key: &Q) -> V
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    V: Clone + Default,
  {
    self.get(key).cloned().unwrap_or_default()
  }

  /// Removes the most recently inserted entry and returns it, or returns
  /// `None` without touching the map if it is empty.
  ///
  /// No other entry changes position.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// map.insert(1, 2);
  /// map.insert(4, 5);
  /// assert_eq!(map.pop_back(), Some((4, 5)));
  /// assert_eq!(map.len(), 1);
  /// assert_eq!(map[&1], 2);
  /// ```
  pub fn pop_back(&mut self) -> Option<(K, V)> {
    let (key, value) = self.entries.pop()?;
    self.index.remove(&key);
    Some((key, value))
  }

  /// Like [`pop_back`](Self::pop_back), but reports an empty map as an error.
  ///
  /// # Errors
  ///
  /// Returns [`MapError::Empty`] if there is nothing to pop.
  pub fn try_pop_back(&mut self) -> Result<(K, V)> {
    self.pop_back().ok_or(MapError::Empty)
  }

  /// Removes the entry at `position` and returns it.
  ///
  /// Every later entry moves down by one position and its index slot is
  /// rewritten, so this costs O(n) in the worst case. Positions obtained
  /// before the call are no longer valid afterwards.
  ///
  /// # Errors
  ///
  /// Returns [`MapError::PositionOutOfBounds`] and leaves the map unchanged
  /// if `position >= len()`.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// map.insert(1, 2);
  /// map.insert(3, 4);
  /// map.insert(5, 6);
  /// let position = map.find(&1).unwrap();
  /// assert_eq!(map.erase_at(position), Ok((1, 2)));
  /// assert_eq!(map.find(&3), Some(0));
  /// assert_eq!(map.find(&5), Some(1));
  /// assert!(map.erase_at(2).is_err());
  /// ```
  pub fn erase_at(&mut self, position: usize) -> Result<(K, V)> {
    let len = self.entries.len();
    if position >= len {
      return Err(MapError::PositionOutOfBounds { position, len });
    }

    let (key, value) = self.entries.remove(position);
    self.index.remove(&key);
    if position < self.entries.len() {
      debug!(
        "orderedmap: erase at {} shifted {} entries",
        position,
        self.entries.len() - position
      );
    }
    self.reindex_from(position);
    Ok((key, value))
  }

  /// Removes `key` and returns how many entries were removed (0 or 1).
  ///
  /// Erasing an absent key is not an error; it returns 0 and changes nothing.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// map.insert(5, 6);
  /// assert_eq!(map.erase(&79), 0);
  /// assert_eq!(map.erase(&5), 1);
  /// assert!(map.is_empty());
  /// ```
  pub fn erase<Q>(&mut self, key: &Q) -> usize
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.remove_entry(key).map_or(0, |_| 1)
  }

  /// Removes `key` and returns its value.
  pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.remove_entry(key).map(|(_, value)| value)
  }

  /// Removes `key` and returns the stored key together with its value.
  pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let position = self.find(key)?;
    self.erase_at(position).ok()
  }

  /// Removes every entry for which `predicate` returns `true`.
  ///
  /// Survivors keep their relative order and are packed to the front in a
  /// single pass. The predicate is evaluated for every entry before anything
  /// is removed, so a panicking predicate leaves the map untouched.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map: OrderedMap<_, _> = (1..=6).map(|k| (k, k + 10)).collect();
  /// map.remove_if(|_, v| v % 2 == 1);
  /// let kept: Vec<_> = map.into_iter().collect();
  /// assert_eq!(kept, [(2, 12), (4, 14), (6, 16)]);
  /// ```
  pub fn remove_if<F>(&mut self, mut predicate: F)
  where
    F: FnMut(&K, &V) -> bool,
  {
    let doomed: Vec<bool> = self.entries.iter().map(|(k, v)| predicate(k, v)).collect();
    self.compact(&doomed);
  }

  /// Keeps only the entries for which `keep` returns `true`.
  ///
  /// This is the complement of [`remove_if`](Self::remove_if), with mutable
  /// access to each value while deciding.
  pub fn retain<F>(&mut self, mut keep: F)
  where
    F: FnMut(&K, &mut V) -> bool,
  {
    let doomed: Vec<bool> = self.entries.iter_mut().map(|(k, v)| !keep(k, v)).collect();
    self.compact(&doomed);
  }

  /// Drops every entry whose flag in `doomed` is set, then repairs the
  /// positions of the entries that moved.
  fn compact(&mut self, doomed: &[bool]) {
    let first = match doomed.iter().position(|&d| d) {
      Some(first) => first,
      None => return,
    };

    let before = self.entries.len();
    let index = &mut self.index;
    let mut flags = doomed.iter();
    self.entries.retain(|(key, _)| {
      let gone = flags.next().copied().unwrap_or(false);
      if gone {
        index.remove(key);
      }
      !gone
    });
    debug!(
      "orderedmap: removed {} of {} entries",
      before - self.entries.len(),
      before
    );
    self.reindex_from(first);
  }

  /// Points the index at the current position of every entry from `start`
  /// onwards.
  fn reindex_from(&mut self, start: usize) {
    for (position, (key, _)) in self.entries.iter().enumerate().skip(start) {
      if let Some(slot) = self.index.get_mut(key) {
        *slot = position;
      }
    }
    trace!("orderedmap: reindexed positions {}..{}", start, self.entries.len());
  }

  /// Asserts that the index and the entries describe the same map: equal
  /// lengths, and every entry's key indexed at exactly its position.
  #[cfg(test)]
  pub(crate) fn assert_consistent(&self)
  where
    K: Debug,
  {
    assert_eq!(
      self.index.len(),
      self.entries.len(),
      "OrderedMap: index holds {} keys for {} entries",
      self.index.len(),
      self.entries.len()
    );
    for (position, (key, _)) in self.entries.iter().enumerate() {
      assert_eq!(
        self.index.get(key),
        Some(&position),
        "OrderedMap: key {:?} is not indexed at its position",
        key
      );
    }
  }
}

impl<K, V> OrderedMap<K, V>
where
  K: Hash + Eq + Clone,
{
  /// Inserts `key` with `value` unless the key is already present.
  ///
  /// Returns the position of the entry for `key` and whether a new entry was
  /// created. When the key already exists nothing changes: the stored value is
  /// kept, `value` is dropped, and the existing position is returned with
  /// `false`. Otherwise the pair is appended at the end.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut map = OrderedMap::new();
  /// assert_eq!(map.insert(1, 2), (0, true));
  /// assert_eq!(map.insert(1, 3), (0, false));
  /// assert_eq!(map[&1], 2);
  /// assert_eq!(map.insert(4, 5), (1, true));
  /// ```
  pub fn insert(&mut self, key: K, value: V) -> (usize, bool) {
    match self.index.entry(key) {
      Entry::Occupied(slot) => {
        trace!("orderedmap: duplicate insert ignored at {}", slot.get());
        (*slot.get(), false)
      }
      Entry::Vacant(slot) => {
        let position = self.entries.len();
        self.entries.push((slot.key().clone(), value));
        slot.insert(position);
        (position, true)
      }
    }
  }

  /// Inserts `key` with `value`, overwriting the value if the key is already
  /// present. An overwritten entry keeps its position.
  ///
  /// Returns the position of the entry and whether it was newly created.
  pub fn insert_or_assign(&mut self, key: K, value: V) -> (usize, bool) {
    match self.index.entry(key) {
      Entry::Occupied(slot) => {
        let position = *slot.get();
        self.entries[position].1 = value;
        (position, false)
      }
      Entry::Vacant(slot) => {
        let position = self.entries.len();
        self.entries.push((slot.key().clone(), value));
        slot.insert(position);
        (position, true)
      }
    }
  }

  /// Returns the value stored under `key`, inserting `make()` at the end
  /// first if the key is absent.
  pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
  where
    F: FnOnce() -> V,
  {
    let position = match self.index.entry(key) {
      Entry::Occupied(slot) => *slot.get(),
      Entry::Vacant(slot) => {
        let position = self.entries.len();
        self.entries.push((slot.key().clone(), make()));
        slot.insert(position);
        position
      }
    };
    &mut self.entries[position].1
  }

  /// Returns the value stored under `key`, inserting `V::default()` first if
  /// the key is absent.
  ///
  /// Indexing with `map[key]` never inserts; this is the explicit way to get
  /// insert-on-access behaviour.
  ///
  /// # Examples
  ///
  /// ```
  /// use orderedmap::OrderedMap;
  /// let mut words: OrderedMap<&str, usize> = OrderedMap::new();
  /// for w in "the cat saw the dog".split(' ') {
  ///     *words.get_or_insert_default(w) += 1;
  /// }
  /// let counts: Vec<_> = words.iter().map(|(w, n)| (*w, *n)).collect();
  /// assert_eq!(counts, [("the", 2), ("cat", 1), ("saw", 1), ("dog", 1)]);
  /// ```
  pub fn get_or_insert_default(&mut self, key: K) -> &mut V
  where
    V: Default,
  {
    self.get_or_insert_with(key, V::default)
  }
}

/// Implements immutable indexing (`map[&key]`).
///
/// # Panics
///
/// Panics if `key` is not present. For non-panicking access, use
/// [`get`](OrderedMap::get) or [`at`](OrderedMap::at).
impl<K, V, Q> Index<&Q> for OrderedMap<K, V>
where
  K: Hash + Eq + Borrow<Q>,
  Q: Hash + Eq + ?Sized,
{
  type Output = V;

  #[inline]
  fn index(&self, key: &Q) -> &Self::Output {
    match self.get(key) {
      Some(value) => value,
      None => panic!("OrderedMap: key not found"),
    }
  }
}

/// Implements mutable indexing (`map[&key] = value`) for keys that already
/// exist. The entry keeps its position.
///
/// # Panics
///
/// Panics if `key` is not present. Indexing never inserts; use
/// [`get_or_insert_default`](OrderedMap::get_or_insert_default) for that.
impl<K, V, Q> IndexMut<&Q> for OrderedMap<K, V>
where
  K: Hash + Eq + Borrow<Q>,
  Q: Hash + Eq + ?Sized,
{
  #[inline]
  fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
    match self.get_mut(key) {
      Some(value) => value,
      None => panic!("OrderedMap: key not found for mutable access"),
    }
  }
}

impl<K: Debug, V: Debug> Debug for OrderedMap<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.iter()).finish()
  }
}

impl<K, V> Default for OrderedMap<K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K: Clone, V: Clone> Clone for OrderedMap<K, V> {
  fn clone(&self) -> Self {
    OrderedMap {
      entries: self.entries.clone(),
      index: self.index.clone(),
    }
  }
}

/// Two maps are equal when they hold the same entries in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
  fn eq(&self, other: &Self) -> bool {
    self.entries == other.entries
  }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

/// Collects pairs in order. As with [`insert`](OrderedMap::insert), the
/// first occurrence of a key wins.
impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = OrderedMap::new();
    map.extend(iter);
    map
  }
}

impl<K: Hash + Eq + Clone, V> Extend<(K, V)> for OrderedMap<K, V> {
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    let iter = iter.into_iter();
    self.reserve(iter.size_hint().0);
    for (key, value) in iter {
      self.insert(key, value);
    }
  }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
  type Item = (K, V);
  type IntoIter = IntoIter<K, V>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    IntoIter { inner: self.entries.into_iter() }
  }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
  type Item = (&'a K, &'a V);
  type IntoIter = Iter<'a, K, V>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedMap<K, V> {
  type Item = (&'a K, &'a mut V);
  type IntoIter = IterMut<'a, K, V>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter_mut()
  }
}

// --- Tests ---
#[cfg(test)]
mod tests {
  use super::*;
  use alloc::format;
  use alloc::string::{String, ToString};
  use alloc::vec;

  #[test]
  fn test_new_empty_len() {
    let map: OrderedMap<i32, i32> = OrderedMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert!(map.front().is_none());
    assert!(map.back().is_none());
    map.assert_consistent();
  }

  #[test]
  fn test_with_capacity() {
    let mut map: OrderedMap<u64, f64> = OrderedMap::with_capacity(10);
    assert!(map.is_empty());
    assert!(map.capacity() >= 10);
    map.reserve(32);
    assert!(map.capacity() >= 32);
  }

  #[test]
  fn test_insert_appends_and_indexes() {
    let mut map = OrderedMap::new();
    assert_eq!(map.insert("hello", 1), (0, true));
    assert_eq!(map.insert("world", 2), (1, true));
    assert_eq!(map.len(), 2);
    assert_eq!(map.index.get("hello"), Some(&0));
    assert_eq!(map.index.get("world"), Some(&1));
    assert_eq!(map.get_index(0), Some((&"hello", &1)));
    map.assert_consistent();
  }

  #[test]
  fn test_insert_duplicate_keeps_original() {
    let mut map = OrderedMap::new();
    map.insert(1, "first".to_string());
    map.insert(2, "second".to_string());
    let (position, inserted) = map.insert(1, "again".to_string());
    assert_eq!(position, 0);
    assert!(!inserted);
    assert_eq!(map[&1], "first");
    assert_eq!(map.len(), 2);
    map.assert_consistent();
  }

  #[test]
  fn test_insert_or_assign_overwrites_in_place() {
    let mut map = OrderedMap::new();
    map.insert('a', 1);
    map.insert('b', 2);
    assert_eq!(map.insert_or_assign('a', 10), (0, false));
    assert_eq!(map.insert_or_assign('c', 3), (2, true));
    assert_eq!(map.as_entries(), &[('a', 10), ('b', 2), ('c', 3)]);
    map.assert_consistent();
  }

  #[test]
  fn test_find_and_lookups() {
    let mut map = OrderedMap::new();
    map.insert(String::from("k1"), 5);
    map.insert(String::from("k2"), 6);

    assert_eq!(map.find("k2"), Some(1));
    assert_eq!(map.find("nope"), None);
    assert!(map.contains_key("k1"));
    assert_eq!(map.count("k1"), 1);
    assert_eq!(map.count("nope"), 0);
    assert_eq!(map.get("k1"), Some(&5));
    assert_eq!(map.get_key_value("k2"), Some((&String::from("k2"), &6)));
    assert_eq!(map.at("k1"), Ok(&5));
    assert_eq!(map.at("nope"), Err(MapError::KeyNotFound));
    assert_eq!(map.lookup("nope"), 0);
  }

  #[test]
  fn test_index_mut_overwrites_without_moving() {
    let mut map = OrderedMap::new();
    map.insert(1, 100);
    map.insert(2, 200);
    map[&1] += 1;
    *map.at_mut(&2).unwrap() = 7;
    assert_eq!(map.as_entries(), &[(1, 101), (2, 7)]);
    assert_eq!(map.at_mut(&3), Err(MapError::KeyNotFound));
    map.assert_consistent();
  }

  #[test]
  #[should_panic(expected = "OrderedMap: key not found")]
  fn test_index_panic_missing() {
    let mut map = OrderedMap::new();
    map.insert(1, 2);
    let _ = map[&2];
  }

  #[test]
  #[should_panic(expected = "OrderedMap: key not found for mutable access")]
  fn test_index_mut_panic_missing() {
    let mut map: OrderedMap<i32, i32> = OrderedMap::new();
    map[&9] = 1;
  }

  #[test]
  fn test_pop_back() {
    let mut map = OrderedMap::new();
    map.insert(1, 'a');
    map.insert(2, 'b');
    assert_eq!(map.pop_back(), Some((2, 'b')));
    assert_eq!(map.find(&2), None);
    assert_eq!(map.find(&1), Some(0));
    map.assert_consistent();

    assert_eq!(map.try_pop_back(), Ok((1, 'a')));
    assert_eq!(map.pop_back(), None);
    assert_eq!(map.try_pop_back(), Err(MapError::Empty));
    map.assert_consistent();
  }

  #[test]
  fn test_erase_at_shifts_index() {
    let mut map: OrderedMap<_, _> = (0..5).map(|k| (k, k * 10)).collect();
    assert_eq!(map.erase_at(1), Ok((1, 10)));
    assert_eq!(map.find(&0), Some(0));
    assert_eq!(map.find(&2), Some(1));
    assert_eq!(map.find(&3), Some(2));
    assert_eq!(map.find(&4), Some(3));
    map.assert_consistent();

    assert_eq!(map.erase_at(3), Ok((4, 40)));
    assert_eq!(map.erase_at(0), Ok((0, 0)));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
    map.assert_consistent();
  }

  #[test]
  fn test_erase_at_out_of_bounds_is_noop() {
    let mut map = OrderedMap::new();
    map.insert(1, 1);
    assert_eq!(
      map.erase_at(1),
      Err(MapError::PositionOutOfBounds { position: 1, len: 1 })
    );
    assert_eq!(map.len(), 1);
    map.assert_consistent();
  }

  #[test]
  fn test_remove_variants() {
    let mut map = OrderedMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);
    assert_eq!(map.remove("b"), Some(2));
    assert_eq!(map.remove("b"), None);
    assert_eq!(map.remove_entry("a"), Some(("a", 1)));
    assert_eq!(map.erase("zzz"), 0);
    assert_eq!(map.find("c"), Some(0));
    map.assert_consistent();
  }

  #[test]
  fn test_reinsert_after_erase_goes_to_end() {
    let mut map = OrderedMap::new();
    map.insert(1, ());
    map.insert(2, ());
    map.insert(3, ());
    map.erase(&1);
    assert_eq!(map.insert(1, ()), (2, true));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 3, 1]);
    map.assert_consistent();
  }

  #[test]
  fn test_remove_if_nothing_matches() {
    let mut map: OrderedMap<_, _> = (0..4).map(|k| (k, k)).collect();
    map.remove_if(|_, _| false);
    assert_eq!(map.len(), 4);
    map.remove_if(|_, _| true);
    assert!(map.is_empty());
    map.assert_consistent();
  }

  #[test]
  fn test_retain_with_mutation() {
    let mut map: OrderedMap<_, _> = (1..=5).map(|k| (k, k)).collect();
    map.retain(|k, v| {
      *v *= 100;
      k % 2 == 1
    });
    assert_eq!(map.as_entries(), &[(1, 100), (3, 300), (5, 500)]);
    assert_eq!(map.find(&5), Some(2));
    map.assert_consistent();
  }

  #[test]
  fn test_get_or_insert() {
    let mut map: OrderedMap<&str, Vec<u8>> = OrderedMap::new();
    map.get_or_insert_default("x").push(1);
    map.get_or_insert_default("x").push(2);
    map.get_or_insert_with("y", || vec![9]).push(3);
    assert_eq!(map["x"], vec![1, 2]);
    assert_eq!(map["y"], vec![9, 3]);
    assert_eq!(map.find("y"), Some(1));
    map.assert_consistent();
  }

  #[test]
  fn test_take_entries_and_clear() {
    let mut map: OrderedMap<_, _> = (0..3).map(|k| (k, k)).collect();
    let entries = map.take_entries();
    assert_eq!(entries, vec![(0, 0), (1, 1), (2, 2)]);
    assert!(map.is_empty());
    map.assert_consistent();

    map.insert(7, 7);
    assert_eq!(map.find(&7), Some(0));
    map.clear();
    assert!(map.is_empty());
    assert!(!map.contains_key(&7));
    map.assert_consistent();
  }

  #[test]
  fn test_positional_access() {
    let mut map: OrderedMap<_, _> = vec![('x', 1), ('y', 2), ('z', 3)].into_iter().collect();
    assert_eq!(map.front(), Some((&'x', &1)));
    assert_eq!(map.back(), Some((&'z', &3)));
    if let Some((key, value)) = map.get_index_mut(1) {
      assert_eq!(*key, 'y');
      *value = 20;
    }
    assert!(map.get_index_mut(3).is_none());
    map.erase(&'z');
    map.shrink_to_fit();
    assert_eq!(map.into_entries(), vec![('x', 1), ('y', 20)]);
  }

  #[test]
  fn test_from_iter_first_wins() {
    let map: OrderedMap<_, _> = vec![(1, "a"), (2, "b"), (1, "c")].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map[&1], "a");
    map.assert_consistent();
  }

  #[test]
  fn test_equality_is_order_sensitive() {
    let a: OrderedMap<_, _> = vec![(1, 1), (2, 2)].into_iter().collect();
    let b: OrderedMap<_, _> = vec![(2, 2), (1, 1)].into_iter().collect();
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    a.clone().assert_consistent();
  }

  #[test]
  fn test_debug_format() {
    let mut map = OrderedMap::new();
    map.insert("b", 2);
    map.insert("a", 1);
    assert_eq!(format!("{:?}", map), "{\"b\": 2, \"a\": 1}");

    let empty_map: OrderedMap<i32, i32> = OrderedMap::default();
    assert_eq!(format!("{:?}", empty_map), "{}");
  }
}
