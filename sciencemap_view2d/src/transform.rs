// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::scale::LinearScale;

/// Pan/zoom state: a translation in screen pixels and a uniform scale factor.
///
/// A screen position `p` of the untransformed view is moved to `p * k + t`.
/// Rescaling a scale with a transform yields the domain that is visible once
/// the transform is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomTransform {
    /// Horizontal translation in pixels.
    pub x: f64,
    /// Vertical translation in pixels.
    pub y: f64,
    /// Scale factor.
    pub k: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    /// No translation, unit scale.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    /// Creates a transform from a translation and a scale factor.
    #[must_use]
    pub const fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    /// Returns `true` if all components are finite and `k` is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.k.is_finite() && self.k > 0.0
    }

    /// Applies the transform to a horizontal screen coordinate.
    #[must_use]
    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.k + self.x
    }

    /// Applies the transform to a vertical screen coordinate.
    #[must_use]
    pub fn apply_y(&self, y: f64) -> f64 {
        y * self.k + self.y
    }

    /// Inverse of [`ZoomTransform::apply_x`].
    #[must_use]
    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    /// Inverse of [`ZoomTransform::apply_y`].
    #[must_use]
    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Domain visible through `scale` once this transform is applied on the x axis.
    #[must_use]
    pub fn rescale_x(&self, scale: &LinearScale) -> Range<f64> {
        let r = scale.range();
        scale.invert(self.invert_x(r.start))..scale.invert(self.invert_x(r.end))
    }

    /// Domain visible through `scale` once this transform is applied on the y axis.
    #[must_use]
    pub fn rescale_y(&self, scale: &LinearScale) -> Range<f64> {
        let r = scale.range();
        scale.invert(self.invert_y(r.start))..scale.invert(self.invert_y(r.end))
    }
}
