// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; the reference for correctness.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, Entry, Hit};

/// Flat vector backend with linear scans.
pub struct FlatVec<K> {
    entries: Vec<Entry<K>>,
}

impl<K> Default for FlatVec<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K> Debug for FlatVec<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<K: Ord + Copy> Backend<K> for FlatVec<K> {
    fn build(&mut self, mut entries: Vec<Entry<K>>) {
        entries.retain(Entry::is_finite);
        self.entries = entries;
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn nearest(&self, x: f64, y: f64, max_dist_sq: f64) -> Option<Hit<K>> {
        let mut best = None;
        for e in &self.entries {
            let d = e.distance_sq(x, y);
            if d <= max_dist_sq {
                Hit::offer(&mut best, e.key, d);
            }
        }
        best
    }

    fn visit_rect<F: FnMut(&Entry<K>)>(&self, rect: Aabb2D, mut f: F) {
        for e in &self.entries {
            if rect.contains_point(e.x, e.y) {
                f(e);
            }
        }
    }
}
