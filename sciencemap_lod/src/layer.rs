// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Foreground layers and their zoom-dependent opacity ramps.

use alloc::string::String;
use alloc::vec::Vec;

/// A foreground layer that fades in and out with zoom.
///
/// Opacity is a trapezoid over the zoom factor `k`:
///
/// ```text
///   1 |        ____________
///     |       /            \
///   0 |______/              \______
///        start  start+r  stop-r  stop
/// ```
///
/// Intervals are closed on the side facing the plateau, so `k == start` and
/// `k == stop` are fully transparent and `k == start + radius` is opaque.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    /// Display name (matches the host element identifier by convention).
    pub name: String,
    /// Zoom factor at which the layer starts fading in.
    pub start: f64,
    /// Zoom factor at which the layer has fully faded out.
    pub stop: f64,
    /// Width of each ramp. Zero, negative or non-finite means hard edges.
    pub radius: f64,
}

impl Layer {
    /// Creates a layer.
    #[must_use]
    pub fn new(name: impl Into<String>, start: f64, stop: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            start,
            stop,
            radius,
        }
    }

    /// Opacity in `[0, 1]` at zoom factor `k`.
    ///
    /// `k` is assumed valid; see [`layer_opacity`] for the guarded version.
    #[must_use]
    pub fn opacity_at(&self, k: f64) -> f64 {
        let r = self.radius;
        if !(r.is_finite() && r > 0.0) {
            return if self.start < k && k < self.stop {
                1.0
            } else {
                0.0
            };
        }
        let up = if self.start.is_finite() {
            (k - self.start) / r
        } else if self.start < k {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
        let down = if self.stop.is_finite() {
            (self.stop - k) / r
        } else if k < self.stop {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
        up.min(down).clamp(0.0, 1.0)
    }
}

/// Opacity of every layer at zoom factor `k`, in layer order.
///
/// Returns `None` when `k` is not a positive finite number; callers must keep
/// whatever opacities they applied last.
#[must_use]
pub fn layer_opacity(layers: &[Layer], k: f64) -> Option<Vec<f64>> {
    if !(k.is_finite() && k > 0.0) {
        return None;
    }
    Some(layers.iter().map(|l| l.opacity_at(k)).collect())
}

/// Ordered set of foreground layers.
///
/// The default stack has three layers that appear at increasing zoom and
/// never fade out:
///
/// | layer | start | radius |
/// |---|---|---|
/// | `layer0` | `-inf` | hard edge |
/// | `layer1` | `0.8` | `0.8` |
/// | `layer2` | `3.2` | `3.2` |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl Default for LayerStack {
    fn default() -> Self {
        let layers = alloc::vec![
            Layer::new(
                "layer0",
                f64::NEG_INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
            ),
            Layer::new("layer1", 0.8, f64::INFINITY, 0.8),
            Layer::new("layer2", 3.2, f64::INFINITY, 3.2),
        ];
        Self::new(layers)
    }
}

impl LayerStack {
    /// Creates a stack from layers in display order.
    #[must_use]
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// The layers in order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the stack has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Opacity of every layer at zoom factor `k`. See [`layer_opacity`].
    #[must_use]
    pub fn opacity(&self, k: f64) -> Option<Vec<f64>> {
        layer_opacity(&self.layers, k)
    }

    /// Pairs layers with host elements.
    ///
    /// Host elements are matched to layers by sorting their stable identifier
    /// strings: entry `i` of the result is the index (into `ids`) of the
    /// element that shows layer `i`. Surplus elements are left out.
    #[must_use]
    pub fn ordered<S: AsRef<str>>(&self, ids: &[S]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..ids.len()).collect();
        order.sort_by(|&a, &b| ids[a].as_ref().cmp(ids[b].as_ref()));
        order.truncate(self.layers.len());
        order
    }
}
