// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Linear mapping from a data-space *domain* to a screen-space *range*.
///
/// Both intervals may be reversed (`start > end`); the y axis of a science
/// map uses a reversed range so that data-up is screen-up.
///
/// Degenerate intervals never divide by zero: a zero-length domain maps every
/// value to the middle of the range, and a zero-length range inverts every
/// pixel to the middle of the domain.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
    domain: Range<f64>,
    range: Range<f64>,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new(0.0..1.0, 0.0..1.0)
    }
}

impl LinearScale {
    /// Creates a scale from a domain and a range.
    #[must_use]
    pub fn new(domain: Range<f64>, range: Range<f64>) -> Self {
        Self { domain, range }
    }

    /// Returns the current data-space domain.
    #[must_use]
    pub fn domain(&self) -> Range<f64> {
        self.domain.clone()
    }

    /// Returns the current screen-space range.
    #[must_use]
    pub fn range(&self) -> Range<f64> {
        self.range.clone()
    }

    /// Replaces the domain.
    pub fn set_domain(&mut self, domain: Range<f64>) {
        self.domain = domain;
    }

    /// Replaces the range.
    pub fn set_range(&mut self, range: Range<f64>) {
        self.range = range;
    }

    /// Maps a data value to screen space.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        let d = self.domain.end - self.domain.start;
        if d == 0.0 {
            return (self.range.start + self.range.end) * 0.5;
        }
        let t = (value - self.domain.start) / d;
        self.range.start + t * (self.range.end - self.range.start)
    }

    /// Maps a screen value back to data space.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let r = self.range.end - self.range.start;
        if r == 0.0 {
            return (self.domain.start + self.domain.end) * 0.5;
        }
        let t = (pixel - self.range.start) / r;
        self.domain.start + t * (self.domain.end - self.domain.start)
    }

    /// Returns the domain as `(min, max)` regardless of its orientation.
    #[must_use]
    pub fn domain_bounds(&self) -> (f64, f64) {
        ordered(self.domain.start, self.domain.end)
    }

    /// Returns the range as `(min, max)` regardless of its orientation.
    #[must_use]
    pub fn range_bounds(&self) -> (f64, f64) {
        ordered(self.range.start, self.range.end)
    }

    /// Returns `true` if `value` lies inside the domain, bounds included.
    ///
    /// `NaN` is never contained.
    #[must_use]
    pub fn domain_contains(&self, value: f64) -> bool {
        let (lo, hi) = self.domain_bounds();
        lo <= value && value <= hi
    }

    /// Returns `true` if either interval has zero length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.domain.end == self.domain.start || self.range.end == self.range.start
    }

    /// Data units covered by one screen pixel.
    ///
    /// Returns `0.0` for a degenerate range.
    #[must_use]
    pub fn units_per_pixel(&self) -> f64 {
        let r = (self.range.end - self.range.start).abs();
        if r == 0.0 {
            return 0.0;
        }
        (self.domain.end - self.domain.start).abs() / r
    }

    /// Signed ratio `domain length / range length`, or `None` if the range is degenerate.
    pub(crate) fn inverse_slope(&self) -> Option<f64> {
        let r = self.range.end - self.range.start;
        (r != 0.0).then(|| (self.domain.end - self.domain.start) / r)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn map_and_invert_are_inverse() {
        let s = LinearScale::new(-400.0..400.0, 0.0..800.0);
        assert!((s.map(0.0) - 400.0).abs() < 1e-12);
        assert!((s.invert(s.map(123.25)) - 123.25).abs() < 1e-9);
    }

    #[test]
    fn reversed_range_flips_axis() {
        let s = LinearScale::new(-300.0..300.0, 600.0..0.0);
        assert!((s.map(300.0) - 0.0).abs() < 1e-12);
        assert!((s.map(-300.0) - 600.0).abs() < 1e-12);
        assert_eq!(s.range_bounds(), (0.0, 600.0));
    }

    #[test]
    fn degenerate_intervals_do_not_divide_by_zero() {
        let s = LinearScale::new(0.0..0.0, 0.0..0.0);
        assert!(s.is_degenerate());
        assert_eq!(s.map(5.0), 0.0);
        assert_eq!(s.invert(5.0), 0.0);
        assert_eq!(s.units_per_pixel(), 0.0);
    }

    #[test]
    fn contains_is_inclusive_and_rejects_nan() {
        let s = LinearScale::new(10.0..-10.0, 0.0..100.0);
        assert!(s.domain_contains(10.0));
        assert!(s.domain_contains(-10.0));
        assert!(!s.domain_contains(10.000_001));
        assert!(!s.domain_contains(f64::NAN));
    }
}
