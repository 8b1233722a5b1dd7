// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt::Debug;

use sciencemap_points::{Point, PointId, PointSet};

use crate::backend::Backend;
use crate::backends::KdTree;
use crate::index::Index;
use crate::types::{Aabb2D, Entry};

/// Key stored per point: ordering by id first gives the lowest-id tie-break,
/// the slot resolves the hit back into the set.
pub type PointKey = (PointId, usize);

/// Nearest-point lookup over a loaded [`PointSet`].
///
/// Built once per session; immutable afterwards. Queries return references
/// into the shared set.
pub struct SpatialIndex<B = KdTree<PointKey>> {
    points: PointSet,
    index: Index<PointKey, B>,
}

impl<B: Debug> Debug for SpatialIndex<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("points", &self.points.len())
            .field("index", &self.index)
            .finish()
    }
}

impl<B: Backend<PointKey> + Default> Default for SpatialIndex<B> {
    fn default() -> Self {
        Self::build(PointSet::default())
    }
}

impl<B: Backend<PointKey> + Default> SpatialIndex<B> {
    /// Builds the index over every point of `points`.
    ///
    /// Points with non-finite coordinates are not indexed.
    #[must_use]
    pub fn build(points: PointSet) -> Self {
        let entries: Vec<Entry<PointKey>> = points
            .iter()
            .enumerate()
            .map(|(slot, p)| Entry::new((p.id, slot), p.x, p.y))
            .collect();
        let index = Index::build(entries);
        tracing::debug!(
            points = points.len(),
            indexed = index.len(),
            "spatial index built"
        );
        Self { points, index }
    }
}

impl<B: Backend<PointKey>> SpatialIndex<B> {
    /// The indexed set.
    #[must_use]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Point with minimal Euclidean distance to `(x, y)` among points within
    /// `radius`, bounds included.
    ///
    /// Ties resolve to the lowest id. Returns `None` if the index is empty,
    /// nothing is in range, the query position is non-finite, or `radius` is
    /// negative or `NaN`.
    #[must_use]
    pub fn find_nearest(&self, x: f64, y: f64, radius: f64) -> Option<&Point> {
        self.points.get(self.find_nearest_slot(x, y, radius)?)
    }

    /// Like [`SpatialIndex::find_nearest`], returning the slot of the point in
    /// [`SpatialIndex::points`].
    #[must_use]
    pub fn find_nearest_slot(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
        self.index.nearest(x, y, radius).map(|hit| hit.key.1)
    }

    /// Points inside `rect`, bounds included, in slot order.
    #[must_use]
    pub fn query_rect(&self, rect: Aabb2D) -> Vec<&Point> {
        let mut slots: Vec<usize> = Vec::new();
        self.index.visit_rect(rect, |e| slots.push(e.key.1));
        slots.sort_unstable();
        slots.into_iter().filter_map(|s| self.points.get(s)).collect()
    }
}
