// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use sciencemap_view2d::ScaleManager;

/// Zoom-dependent marker area for scatter-style rendering.
///
/// `area = clamp(base * clamp(k, min_zoom, max_zoom) * weight / weight_unit, min_area, max_area)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSizing {
    /// Area of a point with `weight == weight_unit` at `k == 1`.
    pub base: f64,
    /// Weight that maps to `base`.
    pub weight_unit: f64,
    /// Zoom factor below which markers stop shrinking.
    pub min_zoom: f64,
    /// Zoom factor above which markers stop growing.
    pub max_zoom: f64,
    /// Smallest marker area.
    pub min_area: f64,
    /// Largest marker area.
    pub max_area: f64,
}

impl Default for PointSizing {
    fn default() -> Self {
        Self {
            base: 1000.0,
            weight_unit: 1000.0,
            min_zoom: 0.5,
            max_zoom: 3.0,
            min_area: 100.0,
            max_area: 10_000.0,
        }
    }
}

impl PointSizing {
    /// Marker area in square pixels for a point of `weight` at zoom `k`.
    #[must_use]
    pub fn area(&self, weight: u32, k: f64) -> f64 {
        let k = if k.is_finite() { k } else { 1.0 };
        let zoom = k.max(self.min_zoom).min(self.max_zoom);
        let raw = self.base * zoom * f64::from(weight) / self.weight_unit;
        raw.max(self.min_area).min(self.max_area)
    }
}

/// Foreground viewBox mirroring the active domains.
///
/// The foreground artwork uses y-down coordinates, so the box starts at
/// `-y0 - height` where `y0` is the start of the y domain.
#[must_use]
pub fn foreground_view_box(scales: &ScaleManager) -> Rect {
    let x = scales.x_scale().domain();
    let y = scales.y_scale().domain();
    let width = x.end - x.start;
    let height = y.end - y.start;
    Rect::from_origin_size((x.start, -y.start - height), (width, height))
}

#[cfg(test)]
mod tests {
    use sciencemap_view2d::{ScaleManager, ZoomTransform};

    use super::{PointSizing, foreground_view_box};

    #[test]
    fn area_clamps_zoom_and_result() {
        let s = PointSizing::default();
        assert_eq!(s.area(1000, 1.0), 1000.0);
        assert_eq!(s.area(1000, 10.0), 3000.0);
        assert_eq!(s.area(1000, 0.1), 500.0);
        assert_eq!(s.area(10, 1.0), 100.0);
        assert_eq!(s.area(100_000, 3.0), 10_000.0);
    }

    #[test]
    fn view_box_mirrors_domains() {
        let mut scales = ScaleManager::new(200.0, 100.0);
        let r = foreground_view_box(&scales);
        assert_eq!(
            (r.x0, r.y0, r.width(), r.height()),
            (-100.0, -50.0, 200.0, 100.0)
        );

        // Pan so the view shows data y in [0, 100].
        scales.apply_transform(ZoomTransform::new(0.0, 50.0, 1.0));
        let r = foreground_view_box(&scales);
        assert!((r.y0 + 100.0).abs() < 1e-9);
        assert!((r.height() - 100.0).abs() < 1e-9);
    }
}
