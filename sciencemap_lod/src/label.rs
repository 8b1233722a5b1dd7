// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Foreground labels: text extraction, zoom-scaled fonts and screen placement.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use sciencemap_view2d::ScaleManager;

/// Zoom-dependent label font scaling.
///
/// When enabled, the font size is `base * sqrt(clamp(k * factor, min, max))`,
/// so labels grow with zoom but slower than the map itself.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelScaling {
    /// Scale fonts with zoom at all.
    pub enabled: bool,
    /// Multiplier applied to `k`.
    pub factor: f64,
    /// Lower clamp of the scaled zoom.
    pub min: f64,
    /// Upper clamp of the scaled zoom.
    pub max: f64,
}

impl Default for LabelScaling {
    fn default() -> Self {
        Self {
            enabled: true,
            factor: 1.0,
            min: 1.0,
            max: 4.0,
        }
    }
}

impl LabelScaling {
    /// Font size for a label whose unscaled size is `base` pixels.
    #[must_use]
    pub fn font_size(&self, base: f64, k: f64) -> f64 {
        if !self.enabled || !k.is_finite() {
            return base;
        }
        // A NaN bound collapses the range onto the other bound.
        let lo = self.min.min(self.max);
        let hi = self.min.max(self.max);
        base * libm::sqrt((k * self.factor).max(lo).min(hi))
    }
}

/// Text of a label taken from a foreground element.
///
/// Elements carry their label in an editor-provided label attribute, falling
/// back to their id. Only text that starts with `#` is a label; the `#` is
/// stripped. Anything else yields an empty label.
#[must_use]
pub fn label_text<'a>(editor_label: Option<&'a str>, id: &'a str) -> &'a str {
    editor_label.unwrap_or(id).strip_prefix('#').unwrap_or("")
}

/// A foreground label anchored in data space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    /// Display text.
    pub text: String,
    /// Anchor x in data space.
    pub x: f64,
    /// Anchor y in foreground (y-down) coordinates; the data-space y is `-y`.
    pub y: f64,
    /// Index of the owning layer in the [`LayerStack`](crate::LayerStack).
    pub layer: usize,
    /// Unscaled font size in pixels.
    pub base_font_size: f64,
}

impl Label {
    /// Default unscaled font size in pixels.
    pub const DEFAULT_FONT_SIZE: f64 = 12.0;

    /// Creates a label at `(x, y)` (foreground coordinates).
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, layer: usize) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            layer,
            base_font_size: Self::DEFAULT_FONT_SIZE,
        }
    }

    /// Creates a label anchored at the centre of an element's bounding box.
    #[must_use]
    pub fn from_bounds(text: impl Into<String>, bounds: Rect, layer: usize) -> Self {
        let c = bounds.center();
        Self::new(text, c.x, c.y, layer)
    }

    /// Sets the unscaled font size.
    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.base_font_size = size;
        self
    }
}

/// Where and how to show one label for the current view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    /// Screen position of the anchor.
    pub position: Point,
    /// Font size in pixels.
    pub font_size: f64,
    /// Opacity of the owning layer.
    pub opacity: f64,
    /// Whether the label is displayed at all (`opacity > 0`).
    pub visible: bool,
}

/// Places every label for the current scales and layer opacities.
///
/// Labels referring to a layer outside `opacities` are hidden.
#[must_use]
pub fn place_labels(
    labels: &[Label],
    scales: &ScaleManager,
    opacities: &[f64],
    scaling: &LabelScaling,
) -> Vec<LabelPlacement> {
    let k = scales.zoom();
    labels
        .iter()
        .map(|label| {
            let opacity = opacities.get(label.layer).copied().unwrap_or(0.0);
            LabelPlacement {
                position: scales.to_screen(label.x, -label.y),
                font_size: scaling.font_size(label.base_font_size, k),
                opacity,
                visible: opacity > 0.0,
            }
        })
        .collect()
}
