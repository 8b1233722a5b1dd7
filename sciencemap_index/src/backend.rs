// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for static point indexing implementations.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::types::{Aabb2D, Entry, Hit};

/// Spatial backend abstraction used by [`Index`](crate::Index).
///
/// Backends are built once from a batch of entries and are read-only
/// afterwards. Entries with non-finite coordinates are skipped at build time.
pub trait Backend<K: Ord + Copy> {
    /// Replace the contents with `entries`.
    fn build(&mut self, entries: Vec<Entry<K>>);

    /// Number of indexed entries.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry closest to `(x, y)` whose squared distance is at most `max_dist_sq`.
    ///
    /// Equidistant entries resolve to the lowest key.
    fn nearest(&self, x: f64, y: f64, max_dist_sq: f64) -> Option<Hit<K>>;

    /// Visit entries inside `rect`, bounds included. Order is unspecified.
    fn visit_rect<F: FnMut(&Entry<K>)>(&self, rect: Aabb2D, f: F);

    /// Query keys inside `rect`. Default: collects `visit_rect`.
    fn query_rect<'a>(&'a self, rect: Aabb2D) -> Box<dyn Iterator<Item = K> + 'a>
    where
        K: 'a,
    {
        let mut out = Vec::new();
        self.visit_rect(rect, |e| out.push(e.key));
        Box::new(out.into_iter())
    }
}
