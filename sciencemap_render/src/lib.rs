// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Science Map Render: the event-driven core of the map view.
//!
//! [`RenderPipeline`] receives input events (zoom transforms, resizes,
//! pointer moves and clicks, data batches, animation frames) and drives an
//! embedding application through a few collaborator traits:
//!
//! - [`Host`] (a [`ShapeSink`]): keyed shape create/update/remove, foreground
//!   [`LayerElement`]s, label placement, the foreground viewBox and frame
//!   requests.
//! - [`AnnotationPanel`]: hover annotation.
//! - [`ArticlePanel`]: click-through detail panel.
//!
//! The rendering technology is entirely up to the host; shapes arrive as
//! screen-space [`Shape`] descriptions.
//!
//! ## Event flow
//!
//! ```text
//! on_zoom / on_resize ──► ScaleManager ──► invalidate ──► request_frame (once)
//!                                                            │
//! on_frame(token) ◄──────────────────────────────────────────┘
//!   ├─ visible set ──► Reconciler ──► create / update / remove
//!   ├─ layer opacities ──► LayerElement
//!   ├─ labels ──► place_label
//!   └─ viewBox ──► set_foreground_view_box
//!
//! on_pointer_move ──► SpatialIndex ──► AnnotationPanel
//! on_pointer_click ──► ArticlePanel
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod host;
mod pipeline;
mod reconcile;
mod shape;

pub use config::PipelineConfig;
pub use host::{AnnotationPanel, ArticlePanel, Host, LayerElement, ShapeSink};
pub use pipeline::{RenderPipeline, RenderStats};
pub use reconcile::{ReconcileStats, Reconciler};
pub use shape::Shape;

pub use sciencemap_dirty::FrameToken;
