// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use sciencemap_points::Point;
use sciencemap_view2d::LinearScale;

/// Points inside the visible domains, heaviest first, at most `max_count`.
///
/// - Domain bounds are inclusive; a `NaN` coordinate is never visible.
/// - Equal weights keep their input order, so truncation is stable across
///   calls with the same inputs.
/// - A degenerate scale (zero-length domain or range) yields nothing.
#[must_use]
pub fn visible_points<'a>(
    points: &'a [Point],
    x_scale: &LinearScale,
    y_scale: &LinearScale,
    max_count: usize,
) -> Vec<&'a Point> {
    if max_count == 0 || x_scale.is_degenerate() || y_scale.is_degenerate() {
        return Vec::new();
    }
    let mut visible: Vec<&Point> = points
        .iter()
        .filter(|p| x_scale.domain_contains(p.x) && y_scale.domain_contains(p.y))
        .collect();
    visible.sort_by(|a, b| b.weight.cmp(&a.weight));
    visible.truncate(max_count);
    visible
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use sciencemap_points::Point;
    use sciencemap_view2d::LinearScale;

    use super::visible_points;

    fn scales() -> (LinearScale, LinearScale) {
        (
            LinearScale::new(-10.0..10.0, 0.0..200.0),
            LinearScale::new(-10.0..10.0, 200.0..0.0),
        )
    }

    #[test]
    fn filters_inclusive_and_orders_by_weight() {
        let (x, y) = scales();
        let points = vec![
            Point::new(1, 10.0, -10.0).with_weight(1),
            Point::new(2, 10.5, 0.0).with_weight(100),
            Point::new(3, 0.0, f64::NAN).with_weight(100),
            Point::new(4, 0.0, 0.0).with_weight(50),
        ];
        let ids: Vec<u32> = visible_points(&points, &x, &y, 10)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![4, 1]);
    }

    #[test]
    fn truncation_is_stable_for_equal_weights() {
        let (x, y) = scales();
        let points: Vec<Point> = (0..20)
            .map(|i| Point::new(i, 0.0, 0.0).with_weight(if i % 2 == 0 { 5 } else { 7 }))
            .collect();
        let first: Vec<u32> = visible_points(&points, &x, &y, 12)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(first, vec![1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 0, 2]);
        let again: Vec<u32> = visible_points(&points, &x, &y, 12)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(first, again);
    }

    #[test]
    fn degenerate_viewport_is_empty() {
        let x = LinearScale::new(0.0..0.0, 0.0..0.0);
        let y = LinearScale::new(0.0..0.0, 0.0..0.0);
        let points = vec![Point::new(1, 0.0, 0.0)];
        assert!(visible_points(&points, &x, &y, 10).is_empty());
    }
}
