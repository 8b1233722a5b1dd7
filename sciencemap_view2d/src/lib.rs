// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Science Map View 2D: data/screen scales for a zoomable scatter view.
//!
//! This crate models the mapping between the data space of a point cloud and
//! the pixels of the viewport that shows it:
//! - [`LinearScale`]: a domain to range mapping with degenerate-safe inversion.
//! - [`ZoomTransform`]: pan/zoom state as produced by a gesture recognizer.
//! - [`ScaleManager`]: the pair of original scales (fixed per viewport size)
//!   and active scales (original seen through the transform), with zoom
//!   clamping, an optional pan extent and resize handling.
//!
//! It does **not** interpret input events. Callers translate wheel, drag or
//! pinch gestures into [`ZoomTransform`]s (see [`ScaleManager::zoomed_about`]
//! and [`ScaleManager::panned_by`]) and hand them to
//! [`ScaleManager::apply_transform`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use sciencemap_view2d::ScaleManager;
//!
//! let mut scales = ScaleManager::new(800.0, 600.0);
//!
//! // Zoom 4x about the pointer.
//! let t = scales.zoomed_about(Point::new(200.0, 150.0), 4.0);
//! scales.apply_transform(t);
//!
//! // Data y grows upwards while screen y grows downwards.
//! let screen = scales.to_screen(0.0, 10.0);
//! let data = scales.to_data(screen.x, screen.y);
//! assert!((data.y - 10.0).abs() < 1e-9);
//!
//! // Visible region for culling.
//! let visible = scales.visible_data_rect();
//! assert!(visible.width() < 800.0);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform; both axes share the factor `k`.
//! - The original domains put the data origin in the middle of the viewport
//!   with one data unit per pixel at `k = 1`.
//! - Resizing keeps the data point at the centre of the view and the zoom
//!   factor.
//!
//! This crate is `no_std`.

#![no_std]

mod manager;
mod scale;
mod transform;

pub use manager::{
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, ScaleManager, ScaleManagerDebugInfo, ViewConfig,
};
pub use scale::LinearScale;
pub use transform::ZoomTransform;
