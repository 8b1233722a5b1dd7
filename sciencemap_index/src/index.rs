// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

use crate::backend::Backend;
use crate::backends::KdTree;
use crate::types::{Aabb2D, Entry, Hit};

/// Static keyed point index over a pluggable [`Backend`].
///
/// `Index` validates queries before they reach the backend:
/// - a non-finite query position finds nothing;
/// - a negative or `NaN` radius finds nothing;
/// - an infinite radius is unbounded.
pub struct Index<K, B = KdTree<K>> {
    backend: B,
    _key: PhantomData<K>,
}

impl<K, B: Default> Default for Index<K, B> {
    fn default() -> Self {
        Self {
            backend: B::default(),
            _key: PhantomData,
        }
    }
}

impl<K, B: Debug> Debug for Index<K, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Index")
            .field("backend", &self.backend)
            .finish()
    }
}

impl<K: Ord + Copy, B: Backend<K> + Default> Index<K, B> {
    /// Builds an index from entries.
    pub fn build<I: IntoIterator<Item = Entry<K>>>(entries: I) -> Self {
        let mut backend = B::default();
        backend.build(entries.into_iter().collect::<Vec<_>>());
        Self {
            backend,
            _key: PhantomData,
        }
    }
}

impl<K: Ord + Copy, B: Backend<K>> Index<K, B> {
    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Returns a reference to the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Entry closest to `(x, y)` within `radius` (inclusive).
    #[must_use]
    pub fn nearest(&self, x: f64, y: f64, radius: f64) -> Option<Hit<K>> {
        if !(x.is_finite() && y.is_finite()) || radius.is_nan() || radius < 0.0 {
            return None;
        }
        self.backend.nearest(x, y, radius * radius)
    }

    /// Keys of entries inside `rect`, bounds included. Order is unspecified.
    #[must_use]
    pub fn query_rect(&self, rect: Aabb2D) -> Vec<K> {
        self.backend.query_rect(rect).collect()
    }

    /// Visit entries inside `rect`, bounds included.
    pub fn visit_rect<F: FnMut(&Entry<K>)>(&self, rect: Aabb2D, f: F) {
        self.backend.visit_rect(rect, f);
    }
}

#[cfg(test)]
mod tests {
    use super::Index;
    use crate::{Entry, FlatVec};

    fn three() -> [Entry<u32>; 3] {
        [
            Entry::new(1, 0.0, 0.0),
            Entry::new(2, 3.0, 4.0),
            Entry::new(3, -6.0, 8.0),
        ]
    }

    #[test]
    fn guards_reject_bad_queries() {
        let idx: Index<u32> = Index::build(three());
        assert!(idx.nearest(f64::NAN, 0.0, 10.0).is_none());
        assert!(idx.nearest(0.0, f64::INFINITY, 10.0).is_none());
        assert!(idx.nearest(0.0, 0.0, -1.0).is_none());
        assert!(idx.nearest(0.0, 0.0, f64::NAN).is_none());
    }

    #[test]
    fn infinite_radius_is_unbounded() {
        let idx: Index<u32, FlatVec<u32>> = Index::build(three());
        let hit = idx.nearest(-100.0, 100.0, f64::INFINITY).unwrap();
        assert_eq!(hit.key, 3);
    }

    #[test]
    fn zero_radius_matches_exact_position() {
        let idx: Index<u32> = Index::build(three());
        assert_eq!(idx.nearest(3.0, 4.0, 0.0).map(|h| h.key), Some(2));
        assert!(idx.nearest(3.0, 4.1, 0.0).is_none());
    }
}
