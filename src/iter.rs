//! Iterators over an [`OrderedMap`](crate::OrderedMap).
//!
//! Every iterator walks the live entry storage in insertion order and is
//! double-ended, so `.rev()` walks it from the newest entry back to the oldest.
//! The borrow an iterator holds keeps the map from being restructured while
//! it is in use.

use core::iter::FusedIterator;
use core::slice;

use alloc::vec;

/// An iterator over the entries of an `OrderedMap`, yielding `(&K, &V)`.
///
/// Created by [`OrderedMap::iter`](crate::OrderedMap::iter).
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
  pub(crate) inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
  type Item = (&'a K, &'a V);

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(k, v)| (k, v))
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(k, v)| (k, v))
  }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of an `OrderedMap`, yielding `(&K, &mut V)`.
///
/// Keys are handed out by shared reference only, so iteration can rewrite
/// values but never reorder or duplicate keys.
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
  pub(crate) inner: slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
  type Item = (&'a K, &'a mut V);

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(k, v)| (&*k, v))
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(k, v)| (&*k, v))
  }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator that consumes an `OrderedMap` and yields `(K, V)` in insertion order.
///
/// This struct is created by the `into_iter` method on [`OrderedMap`](crate::OrderedMap).
#[derive(Debug)]
pub struct IntoIter<K, V> {
  pub(crate) inner: vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
  type Item = (K, V);

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back()
  }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over the keys of an `OrderedMap`, in insertion order.
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
  pub(crate) inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
  type Item = &'a K;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(k, _)| k)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(k, _)| k)
  }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an `OrderedMap`, in insertion order.
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
  pub(crate) inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
  type Item = &'a V;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(_, v)| v)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(_, v)| v)
  }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of an `OrderedMap`, in insertion order.
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
  pub(crate) inner: slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
  type Item = &'a mut V;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(_, v)| v)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(_, v)| v)
  }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
