// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Science Map LOD: what to show at the current zoom, and how.
//!
//! Every function here is a pure derivation from the current scales and zoom
//! factor; nothing is cached between frames.
//!
//! - [`layer_opacity`] / [`LayerStack`]: trapezoidal fade ramps for the
//!   foreground label layers.
//! - [`visible_points`]: the in-view subset, heaviest first, truncated.
//! - [`TierTable`]: breakpoint lookup from a point weight to its [`Glyph`].
//! - [`LabelScaling`] / [`place_labels`]: zoom-scaled label fonts and screen
//!   anchors.
//! - [`PointSizing`]: zoom-dependent marker areas.
//! - [`foreground_view_box`]: the viewBox that keeps foreground artwork
//!   aligned with the points.
//!
//! ## Minimal example
//!
//! ```rust
//! use sciencemap_lod::{LayerStack, TierTable, visible_points};
//! use sciencemap_points::Point;
//! use sciencemap_view2d::ScaleManager;
//!
//! let scales = ScaleManager::new(800.0, 600.0);
//! let points = [
//!     Point::new(1, 0.0, 0.0).with_weight(40),
//!     Point::new(2, 10.0, 10.0).with_weight(4_000),
//!     Point::new(3, 5_000.0, 0.0).with_weight(9_000),
//! ];
//!
//! let visible = visible_points(&points, scales.x_scale(), scales.y_scale(), 100);
//! assert_eq!(visible.len(), 2);
//! assert_eq!(visible[0].id.get(), 2);
//!
//! let tiers = TierTable::default();
//! assert_eq!(tiers.tier_index(visible[1].weight), 0);
//!
//! let opacity = LayerStack::default().opacity(scales.zoom()).unwrap();
//! assert_eq!(opacity[0], 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod label;
mod layer;
mod sizing;
mod tier;
mod visible;

pub use label::{Label, LabelPlacement, LabelScaling, label_text, place_labels};
pub use layer::{Layer, LayerStack, layer_opacity};
pub use sizing::{PointSizing, foreground_view_box};
pub use tier::{Glyph, GlyphCircle, TierSpec, TierTable, TierTableError};
pub use visible::visible_points;
