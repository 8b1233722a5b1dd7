// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::scale::LinearScale;
use crate::transform::ZoomTransform;

/// Default lower zoom limit.
pub const DEFAULT_MIN_ZOOM: f64 = 0.8;
/// Default upper zoom limit.
pub const DEFAULT_MAX_ZOOM: f64 = 1000.0;

/// Zoom and pan constraints of a [`ScaleManager`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewConfig {
    /// Lower zoom limit.
    pub min_zoom: f64,
    /// Upper zoom limit.
    pub max_zoom: f64,
    /// Optional data-space rectangle the view must stay inside.
    pub pan_extent: Option<Rect>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            pan_extent: None,
        }
    }
}

impl ViewConfig {
    /// Sets the zoom limits.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Sets the pan extent.
    #[must_use]
    pub fn with_pan_extent(mut self, extent: Option<Rect>) -> Self {
        self.pan_extent = extent;
        self
    }
}

/// Owner of the data/screen scales of one chart.
///
/// `ScaleManager` keeps two pairs of [`LinearScale`]s:
/// - the *original* scales, derived only from the viewport size, with the data
///   origin in the middle of the view and one data unit per pixel;
/// - the *active* scales, whose domains are the original domains seen through
///   the current [`ZoomTransform`].
///
/// Every mutating method leaves both pairs consistent before returning, so a
/// domain is never observed with a stale range.
#[derive(Clone, Debug)]
pub struct ScaleManager {
    size: Size,
    x_original: LinearScale,
    y_original: LinearScale,
    x: LinearScale,
    y: LinearScale,
    transform: ZoomTransform,
    min_zoom: f64,
    max_zoom: f64,
    pan_extent: Option<Rect>,
}

impl Default for ScaleManager {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl ScaleManager {
    /// Creates a manager for a `width` x `height` viewport with the identity transform.
    ///
    /// Zoom is clamped to `[0.8, 1000]` by default.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let mut manager = Self {
            size: Size::ZERO,
            x_original: LinearScale::default(),
            y_original: LinearScale::default(),
            x: LinearScale::default(),
            y: LinearScale::default(),
            transform: ZoomTransform::IDENTITY,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            pan_extent: None,
        };
        manager.set_viewport_size(width, height);
        manager
    }

    /// Creates a manager and applies `config`.
    #[must_use]
    pub fn with_config(width: f64, height: f64, config: &ViewConfig) -> Self {
        let mut manager = Self::new(width, height);
        manager.apply_config(config);
        manager
    }

    /// Applies zoom limits and pan extent from `config`.
    pub fn apply_config(&mut self, config: &ViewConfig) {
        self.set_zoom_limits(config.min_zoom, config.max_zoom);
        self.set_pan_extent(config.pan_extent);
    }

    /// Returns the viewport size in pixels.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.size
    }

    /// Returns `true` if the viewport has zero area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Returns the active x scale.
    #[must_use]
    pub fn x_scale(&self) -> &LinearScale {
        &self.x
    }

    /// Returns the active y scale.
    #[must_use]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    /// Returns the transform currently applied (after clamping).
    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// Returns the current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.transform.k
    }

    /// Returns the `(min, max)` zoom limits.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current transform is clamped into the new range. Limits that are not
    /// finite and positive are ignored and the previous limits are kept.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(min_zoom) || !usable(max_zoom) {
            tracing::warn!(min_zoom, max_zoom, "ignoring invalid zoom limits");
            return;
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        let current = self.transform;
        self.transform = self.constrain(ZoomTransform {
            k: current.k.max(min_zoom).min(max_zoom),
            ..current
        });
        self.rebuild_active();
    }

    /// Returns the data-space pan extent, if any.
    #[must_use]
    pub fn pan_extent(&self) -> Option<Rect> {
        self.pan_extent
    }

    /// Constrains panning so the visible data rectangle stays inside `extent`.
    ///
    /// When the view is larger than the extent along an axis, the view is
    /// centred on the extent along that axis. `None` removes the constraint.
    pub fn set_pan_extent(&mut self, extent: Option<Rect>) {
        self.pan_extent = extent.map(|r| r.abs());
        self.transform = self.constrain(self.transform);
        self.rebuild_active();
    }

    /// Recomputes the original scales for a new viewport size.
    ///
    /// The original domains are `[-w/2, w/2]` and `[-h/2, h/2]`; the ranges are
    /// `[0, w]` and `[h, 0]` (screen y grows downwards, data y upwards). The
    /// active domains are re-derived from the *current* transform. Negative or
    /// non-finite sizes are treated as zero.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        self.size = Size::new(width, height);
        self.x_original = LinearScale::new(-width * 0.5..width * 0.5, 0.0..width);
        self.y_original = LinearScale::new(-height * 0.5..height * 0.5, height..0.0);
        self.x.set_range(0.0..width);
        self.y.set_range(height..0.0);
        self.rebuild_active();
    }

    /// Resizes the viewport while keeping the data-space centre and zoom factor.
    ///
    /// Returns `true` if the size changed.
    pub fn resize_preserving_center(&mut self, width: f64, height: f64) -> bool {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        if self.size == Size::new(width, height) {
            return false;
        }
        let center_before = self.data_center();
        self.set_viewport_size(width, height);
        let center_after = self.data_center();
        let shifted = self.shifted(
            self.transform,
            center_before.x - center_after.x,
            center_before.y - center_after.y,
        );
        self.transform = self.constrain(shifted);
        self.rebuild_active();
        true
    }

    /// Returns `transform` with `k` clamped to the zoom limits and the pan
    /// extent applied.
    #[must_use]
    pub fn clamp_transform(&self, transform: ZoomTransform) -> ZoomTransform {
        let clamped = ZoomTransform {
            k: transform.k.max(self.min_zoom).min(self.max_zoom),
            ..transform
        };
        self.constrain(clamped)
    }

    /// Applies a zoom/pan transform.
    ///
    /// Out-of-range scale factors are clamped; invalid transforms (non-finite
    /// components or a non-positive scale) are ignored. Returns `true` if the
    /// effective transform changed.
    pub fn apply_transform(&mut self, transform: ZoomTransform) -> bool {
        if !transform.is_valid() {
            tracing::warn!(?transform, "ignoring invalid zoom transform");
            return false;
        }
        let clamped = self.clamp_transform(transform);
        if clamped == self.transform {
            return false;
        }
        self.transform = clamped;
        self.rebuild_active();
        true
    }

    /// Converts a data-space point into screen coordinates.
    #[must_use]
    pub fn to_screen(&self, x: f64, y: f64) -> Point {
        Point::new(self.x.map(x), self.y.map(y))
    }

    /// Converts a screen point into data-space coordinates.
    #[must_use]
    pub fn to_data(&self, sx: f64, sy: f64) -> Point {
        Point::new(self.x.invert(sx), self.y.invert(sy))
    }

    /// Returns the visible data-space rectangle (min corner to max corner).
    #[must_use]
    pub fn visible_data_rect(&self) -> Rect {
        let (x0, x1) = self.x.domain_bounds();
        let (y0, y1) = self.y.domain_bounds();
        Rect::new(x0, y0, x1, y1)
    }

    /// Data units covered by one screen pixel at the current zoom.
    ///
    /// For a degenerate viewport this falls back to `1 / k`.
    #[must_use]
    pub fn data_units_per_pixel(&self) -> f64 {
        if self.is_degenerate() {
            return 1.0 / self.transform.k;
        }
        self.x.units_per_pixel()
    }

    /// Transform that zooms by `factor` about `anchor` (screen coordinates).
    ///
    /// The data point under `anchor` stays under it as far as the zoom limits
    /// allow. The result is not applied; pass it to
    /// [`ScaleManager::apply_transform`].
    #[must_use]
    pub fn zoomed_about(&self, anchor: Point, factor: f64) -> ZoomTransform {
        if !(factor > 0.0 && factor.is_finite()) {
            return self.transform;
        }
        let t = self.transform;
        let k = (t.k * factor).max(self.min_zoom).min(self.max_zoom);
        // Untransformed position under the anchor must map back to the anchor.
        let ux = t.invert_x(anchor.x);
        let uy = t.invert_y(anchor.y);
        ZoomTransform::new(anchor.x - ux * k, anchor.y - uy * k, k)
    }

    /// Transform that pans the view by `delta` screen pixels.
    ///
    /// The result is not applied; pass it to [`ScaleManager::apply_transform`].
    #[must_use]
    pub fn panned_by(&self, delta: Vec2) -> ZoomTransform {
        let t = self.transform;
        ZoomTransform::new(t.x + delta.x, t.y + delta.y, t.k)
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ScaleManagerDebugInfo {
        ScaleManagerDebugInfo {
            viewport: self.size,
            transform: self.transform,
            visible_data_rect: self.visible_data_rect(),
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            pan_extent: self.pan_extent,
        }
    }

    fn data_center(&self) -> Point {
        self.to_data(self.size.width * 0.5, self.size.height * 0.5)
    }

    fn rebuild_active(&mut self) {
        self.x.set_domain(self.transform.rescale_x(&self.x_original));
        self.y.set_domain(self.transform.rescale_y(&self.y_original));
    }

    /// Moves the visible domain by `(dx, dy)` data units.
    fn shifted(&self, t: ZoomTransform, dx: f64, dy: f64) -> ZoomTransform {
        // The visible domain at pixel r is original.invert((r - t) / k); moving it
        // by `d` data units needs a translation change of `-d * k / slope`.
        let tx = match self.x_original.inverse_slope() {
            Some(s) if s != 0.0 && dx != 0.0 => t.x - dx * t.k / s,
            _ => t.x,
        };
        let ty = match self.y_original.inverse_slope() {
            Some(s) if s != 0.0 && dy != 0.0 => t.y - dy * t.k / s,
            _ => t.y,
        };
        ZoomTransform::new(tx, ty, t.k)
    }

    fn constrain(&self, t: ZoomTransform) -> ZoomTransform {
        let Some(extent) = self.pan_extent else {
            return t;
        };
        if self.is_degenerate() {
            return t;
        }
        let x_domain = t.rescale_x(&self.x_original);
        let y_domain = t.rescale_y(&self.y_original);
        let dx = axis_correction(x_domain.start, x_domain.end, extent.x0, extent.x1);
        let dy = axis_correction(y_domain.start, y_domain.end, extent.y0, extent.y1);
        self.shifted(t, dx, dy)
    }
}

/// Data-space shift that brings `[a, b]` inside `[e0, e1]`, or centres it on
/// the extent if it does not fit.
fn axis_correction(a: f64, b: f64, e0: f64, e1: f64) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi - lo >= e1 - e0 {
        (e0 + e1) * 0.5 - (lo + hi) * 0.5
    } else if lo < e0 {
        e0 - lo
    } else if hi > e1 {
        e1 - hi
    } else {
        0.0
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Debug snapshot of a [`ScaleManager`] state.
#[derive(Clone, Copy, Debug)]
pub struct ScaleManagerDebugInfo {
    /// Viewport size in pixels.
    pub viewport: Size,
    /// Applied transform.
    pub transform: ZoomTransform,
    /// Visible data-space rectangle.
    pub visible_data_rect: Rect,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Optional data-space pan extent.
    pub pan_extent: Option<Rect>,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::{ScaleManager, ViewConfig};
    use crate::ZoomTransform;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    struct Rng(u64);

    impl Rng {
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }
        fn next_f64(&mut self) -> f64 {
            let v = self.next_u64() >> 11;
            (v as f64) / ((1_u64 << 53) as f64)
        }
    }

    #[test]
    fn viewport_size_centres_origin_and_flips_y() {
        let m = ScaleManager::new(800.0, 600.0);
        let s = m.to_screen(0.0, 0.0);
        assert!(close(s.x, 400.0) && close(s.y, 300.0));
        // Data up is screen up.
        let top = m.to_screen(0.0, 300.0);
        assert!(close(top.y, 0.0));
        assert_eq!(m.x_scale().range(), 0.0..800.0);
        assert_eq!(m.y_scale().range(), 600.0..0.0);
    }

    #[test]
    fn round_trip_under_zoom_and_pan() {
        let mut m = ScaleManager::new(1024.0, 768.0);
        m.apply_transform(ZoomTransform::new(-137.5, 42.0, 7.25));
        for &(x, y) in &[(0.0, 0.0), (12.5, -3.0), (-70.0, 51.0)] {
            let s = m.to_screen(x, y);
            let back = m.to_data(s.x, s.y);
            assert!(close(back.x, x) && close(back.y, y));
        }
    }

    #[test]
    fn round_trip_for_random_sizes_and_transforms() {
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        for _ in 0..500 {
            let w = 1.0 + rng.next_f64() * 2000.0;
            let h = 1.0 + rng.next_f64() * 2000.0;
            let mut m = ScaleManager::new(w, h);
            let u = rng.next_f64();
            let k = 0.8 + u * u * 999.2;
            let t = ZoomTransform::new(
                (rng.next_f64() - 0.5) * 2.0 * w * k,
                (rng.next_f64() - 0.5) * 2.0 * h * k,
                k,
            );
            m.apply_transform(t);
            let visible = m.visible_data_rect();
            for _ in 0..20 {
                let x = visible.x0 + rng.next_f64() * visible.width();
                let y = visible.y0 + rng.next_f64() * visible.height();
                let s = m.to_screen(x, y);
                let back = m.to_data(s.x, s.y);
                assert!(
                    (back.x - x).abs() < 1e-6 && (back.y - y).abs() < 1e-6,
                    "({x}, {y}) came back as {back:?} at {w}x{h} {t:?}"
                );
            }
        }
    }

    #[test]
    fn zoom_below_minimum_matches_minimum() {
        let (min_zoom, max_zoom) = ScaleManager::new(1.0, 1.0).zoom_limits();
        let mut at_min = ScaleManager::new(640.0, 480.0);
        at_min.apply_transform(ZoomTransform::new(12.0, -8.0, min_zoom));
        for &k in &[0.5, 0.1, 1e-6] {
            let mut m = ScaleManager::new(640.0, 480.0);
            m.apply_transform(ZoomTransform::new(12.0, -8.0, k));
            assert_eq!(m.x_scale().domain(), at_min.x_scale().domain());
            assert_eq!(m.y_scale().domain(), at_min.y_scale().domain());
        }

        // Visible width shrinks with k and stops changing at the limits.
        let mut previous = f64::INFINITY;
        for &k in &[0.1, min_zoom, 1.0, 10.0, 100.0, max_zoom, 5000.0] {
            let mut m = ScaleManager::new(640.0, 480.0);
            m.apply_transform(ZoomTransform::new(0.0, 0.0, k));
            let width = m.visible_data_rect().width();
            assert!(width <= previous, "width grew at k = {k}");
            previous = width;
        }
    }

    #[test]
    fn invalid_zoom_limits_are_ignored() {
        let mut m = ScaleManager::new(100.0, 100.0);
        m.set_zoom_limits(f64::NAN, 10.0);
        assert_eq!(m.zoom_limits(), (0.8, 1000.0));
        m.set_zoom_limits(0.0, 10.0);
        m.set_zoom_limits(1.0, f64::INFINITY);
        m.set_zoom_limits(-2.0, 3.0);
        assert_eq!(m.zoom_limits(), (0.8, 1000.0));

        m.set_zoom_limits(20.0, 2.0);
        assert_eq!(m.zoom_limits(), (2.0, 20.0));
        assert!(close(m.zoom(), 2.0));

        let config = ViewConfig::default().with_zoom_limits(f64::NAN, f64::NAN);
        let mut m = ScaleManager::with_config(100.0, 100.0, &config);
        assert_eq!(m.zoom_limits(), (0.8, 1000.0));
        m.apply_transform(ZoomTransform::new(0.0, 0.0, 0.01));
        assert!(close(m.zoom(), 0.8));
    }

    #[test]
    fn out_of_range_zoom_is_clamped() {
        let mut a = ScaleManager::new(500.0, 500.0);
        let mut b = ScaleManager::new(500.0, 500.0);
        a.apply_transform(ZoomTransform::new(10.0, -20.0, 5000.0));
        b.apply_transform(ZoomTransform::new(10.0, -20.0, 1000.0));
        assert_eq!(a.x_scale().domain(), b.x_scale().domain());
        assert_eq!(a.y_scale().domain(), b.y_scale().domain());

        a.apply_transform(ZoomTransform::new(0.0, 0.0, 0.01));
        assert!(close(a.zoom(), 0.8));
    }

    #[test]
    fn invalid_transforms_are_ignored() {
        let mut m = ScaleManager::new(100.0, 100.0);
        assert!(!m.apply_transform(ZoomTransform::new(0.0, 0.0, -1.0)));
        assert!(!m.apply_transform(ZoomTransform::new(f64::NAN, 0.0, 2.0)));
        assert_eq!(m.transform(), ZoomTransform::IDENTITY);
    }

    #[test]
    fn unchanged_transform_reports_no_change() {
        let mut m = ScaleManager::new(100.0, 100.0);
        let t = ZoomTransform::new(3.0, 4.0, 2.0);
        assert!(m.apply_transform(t));
        assert!(!m.apply_transform(t));
    }

    #[test]
    fn resize_preserves_center_and_zoom() {
        let mut m = ScaleManager::new(800.0, 600.0);
        m.apply_transform(ZoomTransform::new(-250.0, 130.0, 3.0));
        let center = m.to_data(400.0, 300.0);
        assert!(m.resize_preserving_center(1200.0, 500.0));
        let after = m.to_data(600.0, 250.0);
        assert!(close(center.x, after.x));
        assert!(close(center.y, after.y));
        assert!(close(m.zoom(), 3.0));
    }

    #[test]
    fn zero_area_viewport_degrades_without_nan() {
        let mut m = ScaleManager::new(0.0, 0.0);
        assert!(m.is_degenerate());
        m.apply_transform(ZoomTransform::new(5.0, 5.0, 2.0));
        let s = m.to_screen(10.0, 10.0);
        let d = m.to_data(10.0, 10.0);
        assert!(s.x.is_finite() && s.y.is_finite());
        assert!(d.x.is_finite() && d.y.is_finite());
        assert!(close(m.data_units_per_pixel(), 0.5));
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut m = ScaleManager::new(800.0, 600.0);
        let anchor = Point::new(200.0, 450.0);
        let before = m.to_data(anchor.x, anchor.y);
        let t = m.zoomed_about(anchor, 4.0);
        m.apply_transform(t);
        let after = m.to_data(anchor.x, anchor.y);
        assert!(close(before.x, after.x) && close(before.y, after.y));
        assert!(close(m.data_units_per_pixel(), 0.25));
    }

    #[test]
    fn pan_moves_content_with_pointer() {
        let mut m = ScaleManager::new(800.0, 600.0);
        let before = m.to_screen(10.0, 10.0);
        let t = m.panned_by(Vec2::new(15.0, -5.0));
        m.apply_transform(t);
        let after = m.to_screen(10.0, 10.0);
        assert!(close(after.x - before.x, 15.0));
        assert!(close(after.y - before.y, -5.0));
    }

    #[test]
    fn pan_extent_keeps_view_inside() {
        let mut m = ScaleManager::new(100.0, 100.0);
        m.set_pan_extent(Some(Rect::new(-500.0, -500.0, 500.0, 500.0)));
        m.apply_transform(ZoomTransform::new(-10_000.0, 10_000.0, 1.0));
        let r = m.visible_data_rect();
        assert!(r.x0 >= -500.0 - 1e-9 && r.x1 <= 500.0 + 1e-9);
        assert!(r.y0 >= -500.0 - 1e-9 && r.y1 <= 500.0 + 1e-9);
    }

    #[test]
    fn pan_extent_smaller_than_view_centres() {
        let mut m = ScaleManager::new(100.0, 100.0);
        m.set_pan_extent(Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
        let r = m.visible_data_rect();
        assert!(close(r.center().x, 15.0));
        assert!(close(r.center().y, 15.0));
    }

    #[test]
    fn config_applies_limits_and_extent() {
        let config = ViewConfig::default()
            .with_zoom_limits(2.0, 8.0)
            .with_pan_extent(Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)));
        let m = ScaleManager::with_config(100.0, 100.0, &config);
        assert_eq!(m.zoom_limits(), (2.0, 8.0));
        assert!(close(m.zoom(), 2.0));
        let r = m.visible_data_rect();
        assert!(r.x0 >= -1e-9 && r.y0 >= -1e-9);
    }

    #[test]
    fn zoom_limits_are_normalized_and_reclamp() {
        let mut m = ScaleManager::new(100.0, 100.0);
        m.apply_transform(ZoomTransform::new(0.0, 0.0, 50.0));
        m.set_zoom_limits(10.0, 1.0);
        assert_eq!(m.zoom_limits(), (1.0, 10.0));
        assert!(close(m.zoom(), 10.0));
        let info = m.debug_info();
        assert!(info.min_zoom <= info.max_zoom);
    }
}
