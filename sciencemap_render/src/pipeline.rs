// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Point as ScreenPoint;
use sciencemap_dirty::{Channel, ChannelSet, FrameToken, RedrawScheduler};
use sciencemap_index::SpatialIndex;
use sciencemap_lod::{Label, foreground_view_box, place_labels, visible_points};
use sciencemap_points::{ConceptTable, LoadError, Point, PointDetails, PointId, PointLoader};
use sciencemap_view2d::{ScaleManager, ZoomTransform};

use crate::config::PipelineConfig;
use crate::host::{AnnotationPanel, ArticlePanel, Host, LayerElement};
use crate::reconcile::{ReconcileStats, Reconciler};
use crate::shape::Shape;

/// Summary of the last rendered frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames rendered so far.
    pub frames: u64,
    /// Points in the visible set of the last frame that touched positions.
    pub visible: usize,
    /// Reconciliation counts of that frame.
    pub reconcile: ReconcileStats,
}

/// Event-driven owner of the map view.
///
/// The pipeline wires a [`ScaleManager`], a [`SpatialIndex`] and the
/// level-of-detail rules to a [`Host`] and two panels:
///
/// - State-changing events ([`on_zoom`](Self::on_zoom),
///   [`on_resize`](Self::on_resize), [`on_batch`](Self::on_batch),
///   [`set_labels`](Self::set_labels)) update scales immediately and request
///   at most one animation frame.
/// - [`on_frame`](Self::on_frame) does the actual work: visible set,
///   reconciliation, layer opacities, labels and the foreground viewBox.
/// - Pointer events query the index directly and notify the panels.
///
/// Nothing is drawn until loading completes; scale and opacity changes made
/// before that are kept and applied by the first frame.
#[derive(Debug)]
pub struct RenderPipeline<H, A, P> {
    host: H,
    annotation: A,
    article: P,
    config: PipelineConfig,
    scales: ScaleManager,
    loader: PointLoader,
    index: Option<SpatialIndex>,
    concepts: ConceptTable,
    reconciler: Reconciler,
    scheduler: RedrawScheduler,
    opacities: Vec<f64>,
    layer_order: Vec<usize>,
    labels: Vec<Label>,
    pointer: Option<ScreenPoint>,
    hovered: Option<usize>,
    stats: RenderStats,
}

impl<H, A, P> RenderPipeline<H, A, P>
where
    H: Host,
    A: AnnotationPanel,
    P: ArticlePanel,
{
    /// Creates a pipeline with an empty, zero-sized view.
    ///
    /// Host layer elements are paired with configured layers by sorted id
    /// here; call [`on_resize`](Self::on_resize) with the real viewport size
    /// before the first frame.
    pub fn new(mut host: H, annotation: A, article: P, config: PipelineConfig) -> Self {
        let scales = ScaleManager::with_config(0.0, 0.0, &config.view);
        let layer_order = {
            let ids: Vec<&str> = host.layers_mut().iter().map(|layer| layer.id()).collect();
            config.layers.ordered(&ids)
        };
        let opacities = config
            .layers
            .opacity(scales.zoom())
            .unwrap_or_else(|| alloc::vec![0.0; config.layers.len()]);
        Self {
            host,
            annotation,
            article,
            config,
            scales,
            loader: PointLoader::new(),
            index: None,
            concepts: ConceptTable::new(),
            reconciler: Reconciler::new(),
            scheduler: RedrawScheduler::new(),
            opacities,
            layer_order,
            labels: Vec::new(),
            pointer: None,
            hovered: None,
            stats: RenderStats::default(),
        }
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The annotation panel.
    #[must_use]
    pub fn annotation(&self) -> &A {
        &self.annotation
    }

    /// The article panel.
    #[must_use]
    pub fn article(&self) -> &P {
        &self.article
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The current scales.
    #[must_use]
    pub fn scales(&self) -> &ScaleManager {
        &self.scales
    }

    /// Current layer opacities, in layer order.
    #[must_use]
    pub fn opacities(&self) -> &[f64] {
        &self.opacities
    }

    /// Summary of the last rendered frame.
    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Returns `true` once the point set has been published.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    /// The loaded points, in weight order.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        self.index.as_ref().map(|idx| idx.points().as_slice())
    }

    /// Returns `true` if a shape for `id` is on screen.
    #[must_use]
    pub fn is_on_screen(&self, id: PointId) -> bool {
        self.reconciler.contains(id)
    }

    /// Returns `true` if a frame has been requested and not rendered yet.
    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// The point under the pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&Point> {
        point_at(&self.index, self.hovered)
    }

    /// Replaces the key-concept table used by [`details`](Self::details).
    pub fn set_concepts(&mut self, concepts: ConceptTable) {
        self.concepts = concepts;
    }

    /// Detail content of a point, resolved against the concept table.
    #[must_use]
    pub fn details(&self, point: &Point) -> PointDetails<'_> {
        PointDetails::new(point, &self.concepts)
    }

    /// Feeds one batch of point rows.
    ///
    /// Rows are buffered until `done`; then the set is published, the index
    /// built and the first full render scheduled.
    pub fn on_batch<I>(&mut self, items: I, done: bool) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = Point>,
    {
        if let Some(points) = self.loader.on_batch(items, done)? {
            self.index = Some(SpatialIndex::build(points));
            self.invalidate(ChannelSet::FULL_REDRAW);
        }
        Ok(())
    }

    /// Applies a zoom/pan transform from the gesture recognizer.
    ///
    /// Returns `false` (and schedules nothing) if the clamped transform equals
    /// the current one or the transform is invalid.
    pub fn on_zoom(&mut self, transform: ZoomTransform) -> bool {
        if !self.scales.apply_transform(transform) {
            return false;
        }
        match self.config.layers.opacity(self.scales.zoom()) {
            Some(opacities) => self.opacities = opacities,
            None => {
                tracing::warn!(
                    k = self.scales.zoom(),
                    "invalid zoom factor for layer opacity; keeping previous opacities"
                );
            }
        }
        self.invalidate(Channel::POSITIONS | Channel::OPACITY | Channel::ANNOTATION);
        true
    }

    /// Updates the viewport size, keeping the data-space centre and zoom.
    pub fn on_resize(&mut self, width: f64, height: f64) -> bool {
        if !self.scales.resize_preserving_center(width, height) {
            return false;
        }
        self.invalidate(Channel::POSITIONS | Channel::ANNOTATION);
        true
    }

    /// Hover picking at a screen position.
    ///
    /// The pick radius is constant on screen. The annotation panel is shown
    /// when the hovered point changes and hidden when nothing is in range.
    pub fn on_pointer_move(&mut self, sx: f64, sy: f64) -> Option<PointId> {
        self.pointer = Some(ScreenPoint::new(sx, sy));
        let found = self.pick(sx, sy);
        tracing::trace!(sx, sy, slot = ?found, "pointer pick");
        if found == self.hovered {
            return self.hovered().map(|p| p.id);
        }
        self.hovered = found;
        match point_at(&self.index, found) {
            Some(point) => {
                let anchor = self.scales.to_screen(point.x, point.y);
                self.annotation.show(point, anchor);
                Some(point.id)
            }
            None => {
                self.annotation.hide();
                None
            }
        }
    }

    /// Opens the article panel for the hovered point, or closes it.
    ///
    /// Without a hovered point the last pointer position is queried again.
    pub fn on_pointer_click(&mut self) -> Option<PointId> {
        let slot = self
            .hovered
            .or_else(|| self.pointer.and_then(|p| self.pick(p.x, p.y)));
        match point_at(&self.index, slot) {
            Some(point) => {
                self.article.show(point);
                Some(point.id)
            }
            None => {
                self.article.hide();
                None
            }
        }
    }

    /// Replaces the foreground labels and schedules their placement.
    pub fn set_labels(&mut self, labels: Vec<Label>) {
        self.labels = labels;
        self.invalidate(Channel::POSITIONS.into_set());
    }

    /// Withdraws a pending frame request, if any.
    ///
    /// Changes made so far are not lost: they are rendered by the frame the
    /// next state change requests, or by [`resume_frames`](Self::resume_frames).
    pub fn cancel_pending_frame(&mut self) {
        if let Some(token) = self.scheduler.cancel() {
            self.host.cancel_frame(token);
        }
    }

    /// Requests a frame for work left over by
    /// [`cancel_pending_frame`](Self::cancel_pending_frame).
    ///
    /// Returns `true` if a frame was requested.
    pub fn resume_frames(&mut self) -> bool {
        let host = &mut self.host;
        self.scheduler.resume(|| host.request_frame())
    }

    /// Animation-frame callback.
    ///
    /// Renders everything invalidated since the previous frame. Returns
    /// `false` for a stale token.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        let Some(dirty) = self.scheduler.begin_frame(token) else {
            return false;
        };
        self.render(dirty);
        true
    }

    fn render(&mut self, dirty: ChannelSet) {
        self.stats.frames += 1;

        if dirty.contains(Channel::POSITIONS) {
            if let Some(index) = &self.index {
                let k = self.scales.zoom();
                let visible = visible_points(
                    index.points(),
                    self.scales.x_scale(),
                    self.scales.y_scale(),
                    self.config.max_visible,
                );
                let shapes: Vec<Shape> = visible
                    .iter()
                    .map(|p| Shape {
                        id: p.id,
                        position: self.scales.to_screen(p.x, p.y),
                        glyph: self.config.tiers.classify(p.weight).glyph,
                        area: self.config.sizing.area(p.weight, k),
                        category: p.category,
                        weight: p.weight,
                    })
                    .collect();
                self.stats.visible = shapes.len();
                self.stats.reconcile = self.reconciler.reconcile(shapes, &mut self.host);
            }
            self.host
                .set_foreground_view_box(foreground_view_box(&self.scales));
        }

        if dirty.contains(Channel::OPACITY) {
            let layers = self.host.layers_mut();
            for (&element, &opacity) in self.layer_order.iter().zip(&self.opacities) {
                if let Some(layer) = layers.get_mut(element) {
                    layer.set_opacity(opacity);
                    layer.set_visible(opacity > 0.0);
                }
            }
        }

        if (dirty.contains(Channel::POSITIONS) || dirty.contains(Channel::OPACITY))
            && !self.labels.is_empty()
        {
            let placements = place_labels(
                &self.labels,
                &self.scales,
                &self.opacities,
                &self.config.label_scaling,
            );
            for (i, placement) in placements.iter().enumerate() {
                self.host.place_label(i, placement);
            }
        }

        if dirty.contains(Channel::ANNOTATION) {
            self.refresh_hover();
        }

        tracing::debug!(
            frame = self.stats.frames,
            channels = ?dirty,
            visible = self.stats.visible,
            created = self.stats.reconcile.created,
            updated = self.stats.reconcile.updated,
            removed = self.stats.reconcile.removed,
            "rendered frame"
        );
    }

    /// Re-picks under the last pointer position after the view moved.
    ///
    /// A point still under the pointer is re-anchored; one that moved away
    /// hides the annotation (or hands it to the point now under the pointer).
    fn refresh_hover(&mut self) {
        let found = self.pointer.and_then(|p| self.pick(p.x, p.y));
        let changed = found != self.hovered;
        self.hovered = found;
        match point_at(&self.index, found) {
            Some(point) => {
                let anchor = self.scales.to_screen(point.x, point.y);
                self.annotation.show(point, anchor);
            }
            None if changed => self.annotation.hide(),
            None => {}
        }
    }

    fn invalidate(&mut self, channels: ChannelSet) {
        let host = &mut self.host;
        self.scheduler.invalidate(channels, || host.request_frame());
    }

    fn pick(&self, sx: f64, sy: f64) -> Option<usize> {
        let index = self.index.as_ref()?;
        let data = self.scales.to_data(sx, sy);
        let radius = self.config.pick_radius_px * self.scales.data_units_per_pixel();
        index.find_nearest_slot(data.x, data.y, radius)
    }
}

fn point_at(index: &Option<SpatialIndex>, slot: Option<usize>) -> Option<&Point> {
    index.as_ref()?.points().get(slot?)
}
