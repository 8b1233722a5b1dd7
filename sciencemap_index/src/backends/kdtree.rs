// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Implicit, balanced 2D k-d tree.
//!
//! Entries are stored in a single vector arranged so that every subrange
//! `[lo, hi)` has its splitting entry at `mid = (lo + hi) / 2`: everything in
//! `[lo, mid)` is `<=` the split coordinate and everything in `(mid, hi)` is
//! `>=` it. The split axis alternates with depth, starting with x. No node
//! allocations are made; traversal uses a small inline stack.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::{Aabb2D, Entry, Hit};

/// Subranges at most this long are scanned linearly.
const LEAF_SIZE: usize = 8;

/// Balanced 2D tree over static points.
pub struct KdTree<K> {
    entries: Vec<Entry<K>>,
}

impl<K> Default for KdTree<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K> Debug for KdTree<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
struct Span {
    lo: usize,
    hi: usize,
    depth: u32,
    /// Lower bound of the squared distance from the query to this subrange.
    bound: f64,
}

#[inline]
fn coord<K>(e: &Entry<K>, depth: u32) -> f64 {
    if depth % 2 == 0 { e.x } else { e.y }
}

fn partition<K>(entries: &mut [Entry<K>], depth: u32) {
    if entries.len() <= LEAF_SIZE {
        return;
    }
    let mid = entries.len() / 2;
    entries.select_nth_unstable_by(mid, |a, b| {
        coord(a, depth)
            .partial_cmp(&coord(b, depth))
            .unwrap_or(Ordering::Equal)
    });
    let (left, rest) = entries.split_at_mut(mid);
    partition(left, depth + 1);
    partition(&mut rest[1..], depth + 1);
}

impl<K: Ord + Copy> Backend<K> for KdTree<K> {
    fn build(&mut self, mut entries: Vec<Entry<K>>) {
        entries.retain(Entry::is_finite);
        partition(&mut entries, 0);
        self.entries = entries;
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn nearest(&self, x: f64, y: f64, max_dist_sq: f64) -> Option<Hit<K>> {
        let mut best: Option<Hit<K>> = None;
        let limit = |best: &Option<Hit<K>>| best.map_or(max_dist_sq, |b| b.distance_sq);

        let mut stack: SmallVec<[Span; 32]> = SmallVec::new();
        stack.push(Span {
            lo: 0,
            hi: self.entries.len(),
            depth: 0,
            bound: 0.0,
        });

        while let Some(span) = stack.pop() {
            // Equal bounds are not pruned so that lower-keyed ties are still found.
            if span.bound > limit(&best) {
                continue;
            }
            let slice = &self.entries[span.lo..span.hi];
            if slice.len() <= LEAF_SIZE {
                for e in slice {
                    let d = e.distance_sq(x, y);
                    if d <= max_dist_sq {
                        Hit::offer(&mut best, e.key, d);
                    }
                }
                continue;
            }

            let mid = span.lo + slice.len() / 2;
            let split = &self.entries[mid];
            let d = split.distance_sq(x, y);
            if d <= max_dist_sq {
                Hit::offer(&mut best, split.key, d);
            }

            let q = if span.depth % 2 == 0 { x } else { y };
            let diff = q - coord(split, span.depth);
            let left = Span {
                lo: span.lo,
                hi: mid,
                depth: span.depth + 1,
                bound: span.bound,
            };
            let right = Span {
                lo: mid + 1,
                hi: span.hi,
                depth: span.depth + 1,
                bound: span.bound,
            };
            let (near, mut far) = if diff < 0.0 {
                (left, right)
            } else {
                (right, left)
            };
            far.bound = far.bound.max(diff * diff);
            // Near side is popped first.
            stack.push(far);
            stack.push(near);
        }
        best
    }

    fn visit_rect<F: FnMut(&Entry<K>)>(&self, rect: Aabb2D, mut f: F) {
        if rect.is_empty() {
            return;
        }
        let mut stack: SmallVec<[(usize, usize, u32); 32]> = SmallVec::new();
        stack.push((0, self.entries.len(), 0));
        while let Some((lo, hi, depth)) = stack.pop() {
            let slice = &self.entries[lo..hi];
            if slice.len() <= LEAF_SIZE {
                for e in slice {
                    if rect.contains_point(e.x, e.y) {
                        f(e);
                    }
                }
                continue;
            }
            let mid = lo + slice.len() / 2;
            let split = &self.entries[mid];
            if rect.contains_point(split.x, split.y) {
                f(split);
            }
            let c = coord(split, depth);
            let (min, max) = if depth % 2 == 0 {
                (rect.min_x, rect.max_x)
            } else {
                (rect.min_y, rect.max_y)
            };
            if min <= c {
                stack.push((lo, mid, depth + 1));
            }
            if max >= c {
                stack.push((mid + 1, hi, depth + 1));
            }
        }
    }
}
