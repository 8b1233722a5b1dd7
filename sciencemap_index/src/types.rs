// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry, hit and rectangle types shared by all backends.

/// Axis-aligned rectangle with inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2D {
    /// Minimum x.
    pub min_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
}

impl Aabb2D {
    /// Creates a rectangle from two corners in any order.
    #[must_use]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Creates a rectangle from its origin and size.
    #[must_use]
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Returns `true` if the point lies inside, bounds included.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Returns `true` if any bound is NaN or the rectangle is inverted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }
}

/// A keyed position stored in a backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry<K> {
    /// Caller key; also the tie-breaker for equidistant entries (lower wins).
    pub key: K,
    /// Data-space x.
    pub x: f64,
    /// Data-space y.
    pub y: f64,
}

impl<K> Entry<K> {
    /// Creates an entry.
    #[must_use]
    pub const fn new(key: K, x: f64, y: f64) -> Self {
        Self { key, x, y }
    }

    /// Squared distance to `(x, y)`.
    #[inline]
    #[must_use]
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Result of a nearest query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<K> {
    /// Key of the nearest entry.
    pub key: K,
    /// Squared distance from the query position.
    pub distance_sq: f64,
}

impl<K: Ord + Copy> Hit<K> {
    /// Replaces `best` with `(key, d)` if it is strictly closer, or equally close
    /// with a lower key.
    #[inline]
    pub(crate) fn offer(best: &mut Option<Self>, key: K, d: f64) {
        let better = match best {
            None => true,
            Some(b) => d < b.distance_sq || (d == b.distance_sq && key < b.key),
        };
        if better {
            *best = Some(Self {
                key,
                distance_sq: d,
            });
        }
    }
}
