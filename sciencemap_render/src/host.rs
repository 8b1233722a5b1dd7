// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits implemented by the embedding application.

use kurbo::{Point as ScreenPoint, Rect};
use sciencemap_dirty::FrameToken;
use sciencemap_lod::LabelPlacement;
use sciencemap_points::{Point, PointId};

use crate::shape::Shape;

/// Receiver of keyed shape changes.
///
/// Every call refers to a shape by its point id; the pipeline guarantees
/// `update` and `remove` only for ids previously passed to `create` and not
/// removed since.
pub trait ShapeSink {
    /// A point entered the visible set.
    fn create(&mut self, shape: &Shape);

    /// A point stayed visible; its shape was recomputed.
    fn update(&mut self, shape: &Shape);

    /// A point left the visible set.
    fn remove(&mut self, id: PointId);
}

/// A foreground layer element owned by the host.
pub trait LayerElement {
    /// Stable identifier used to pair elements with layers (sorted order).
    fn id(&self) -> &str;

    /// Sets the element opacity in `[0, 1]`.
    fn set_opacity(&mut self, opacity: f64);

    /// Shows or hides the element.
    fn set_visible(&mut self, visible: bool);
}

/// Rendering host: shapes, foreground layers, labels and frame scheduling.
pub trait Host: ShapeSink {
    /// Foreground layer element type.
    type Layer: LayerElement;

    /// Asks for a callback on the next animation frame.
    ///
    /// The returned token is passed back to
    /// [`RenderPipeline::on_frame`](crate::RenderPipeline::on_frame).
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraws a frame request.
    fn cancel_frame(&mut self, token: FrameToken);

    /// Foreground layer elements, in any order.
    fn layers_mut(&mut self) -> &mut [Self::Layer];

    /// Positions the label at `index` (as passed to
    /// [`RenderPipeline::set_labels`](crate::RenderPipeline::set_labels)).
    fn place_label(&mut self, index: usize, placement: &LabelPlacement);

    /// Sets the viewBox of the foreground artwork.
    fn set_foreground_view_box(&mut self, view_box: Rect);
}

/// Hover annotation.
pub trait AnnotationPanel {
    /// Shows `point` anchored at a screen position.
    fn show(&mut self, point: &Point, anchor: ScreenPoint);

    /// Hides the annotation.
    fn hide(&mut self);
}

/// Detail panel opened on click.
pub trait ArticlePanel {
    /// Opens the panel for `point`.
    fn show(&mut self, point: &Point);

    /// Closes the panel.
    fn hide(&mut self);
}
