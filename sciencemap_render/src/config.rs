// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use sciencemap_lod::{LabelScaling, LayerStack, PointSizing, TierTable};
use sciencemap_view2d::ViewConfig;

/// Tuning of a [`RenderPipeline`](crate::RenderPipeline).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    /// Zoom limits and pan extent.
    pub view: ViewConfig,
    /// Maximum number of shapes on screen.
    pub max_visible: usize,
    /// Pick radius in screen pixels.
    pub pick_radius_px: f64,
    /// Weight to glyph breakpoints.
    pub tiers: TierTable,
    /// Foreground layers.
    pub layers: LayerStack,
    /// Label font scaling.
    pub label_scaling: LabelScaling,
    /// Marker area rule.
    pub sizing: PointSizing,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            max_visible: 20_000,
            pick_radius_px: 5.0,
            tiers: TierTable::default(),
            layers: LayerStack::default(),
            label_scaling: LabelScaling::default(),
            sizing: PointSizing::default(),
        }
    }
}

impl PipelineConfig {
    /// Sets the view constraints.
    #[must_use]
    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Sets the maximum number of shapes on screen.
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible;
        self
    }

    /// Sets the pick radius in screen pixels.
    #[must_use]
    pub fn with_pick_radius_px(mut self, radius: f64) -> Self {
        self.pick_radius_px = radius;
        self
    }

    /// Sets the glyph tiers.
    #[must_use]
    pub fn with_tiers(mut self, tiers: TierTable) -> Self {
        self.tiers = tiers;
        self
    }

    /// Sets the foreground layers.
    #[must_use]
    pub fn with_layers(mut self, layers: LayerStack) -> Self {
        self.layers = layers;
        self
    }

    /// Sets the label font scaling.
    #[must_use]
    pub fn with_label_scaling(mut self, scaling: LabelScaling) -> Self {
        self.label_scaling = scaling;
        self
    }

    /// Sets the marker area rule.
    #[must_use]
    pub fn with_sizing(mut self, sizing: PointSizing) -> Self {
        self.sizing = sizing;
        self
    }
}
