// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point as ScreenPoint;
use sciencemap_lod::Glyph;
use sciencemap_points::{Category, PointId};

/// Screen-space description of one visible point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    /// Point id; the reconciliation key.
    pub id: PointId,
    /// Centre in screen pixels.
    pub position: ScreenPoint,
    /// Glyph from the size tier of the point.
    pub glyph: Glyph,
    /// Marker area for hosts that draw sized markers instead of glyphs.
    pub area: f64,
    /// Category, for colouring.
    pub category: Category,
    /// Number of recent articles.
    pub weight: u32,
}
