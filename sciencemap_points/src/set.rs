// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Deref;

use crate::point::{Point, PointId};

/// Immutable, shared collection of loaded points.
///
/// Cloning a `PointSet` only bumps a reference count, so the spatial index,
/// the pipeline and the host can all hold the same session data. Points are
/// addressed by *slot* (their position in the set); slots are stable for the
/// lifetime of the set.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: Arc<[Point]>,
}

impl PointSet {
    /// Wraps already-validated points.
    ///
    /// No filtering or reordering happens here; use
    /// [`PointLoader`](crate::PointLoader) for ingestion.
    #[must_use]
    pub fn from_vec(points: Vec<Point>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Returns the points as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Returns the slot of the point with the given id, if present.
    ///
    /// This is a linear scan; callers that resolve ids in bulk should build
    /// their own map.
    #[must_use]
    pub fn slot_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    /// Returns `true` if both sets share the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }
}

impl Deref for PointSet {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.points
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self::from_vec(points)
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
