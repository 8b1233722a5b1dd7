// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use crate::category::Category;

/// Stable identifier of a cluster point.
///
/// Ids are unique within a [`PointSet`](crate::PointSet) and survive for the
/// whole session. They key on-screen shapes during reconciliation and break
/// ties in nearest-point queries (lower id wins).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PointId(pub u32);

impl PointId {
    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque per-cluster payload carried along for the detail panels.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Growth rating of the cluster (0 to 100 in the source data).
    pub growth_rating: f64,
    /// Key concept ids, resolved through a [`ConceptTable`](crate::ConceptTable).
    pub key_concepts: Vec<u32>,
}

/// One research cluster on the map.
///
/// Points are immutable once loaded. Coordinates live in data space; the
/// view crate maps them to screen space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Stable identifier.
    pub id: PointId,
    /// Data-space X coordinate.
    pub x: f64,
    /// Data-space Y coordinate (up is positive).
    pub y: f64,
    /// Significance of the point; selects the visual tier and wins truncation.
    pub weight: u32,
    /// Cluster category.
    pub category: Category,
    /// Detail payload.
    pub metadata: Metadata,
}

impl Point {
    /// Creates a point with zero weight, the default category and empty metadata.
    #[must_use]
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id: PointId(id),
            x,
            y,
            weight: 0,
            category: Category::default(),
            metadata: Metadata::default(),
        }
    }

    /// Returns this point with the given weight.
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Returns this point with the given category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Returns this point with the given metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns `true` if both coordinates are finite.
    ///
    /// Rows whose numeric fields failed to parse arrive as `NaN` and are
    /// excluded from indexing and rendering.
    #[must_use]
    pub fn has_finite_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared Euclidean distance from this point to `(x, y)`.
    #[must_use]
    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}
