// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Science Map Index: static nearest-point lookup for picking.
//!
//! Pointer picking on a map with tens of thousands of points needs the
//! closest point to the cursor within a small, screen-constant radius, many
//! times per second. This crate provides:
//! - [`SpatialIndex`]: built once over a [`PointSet`](sciencemap_points::PointSet),
//!   answering [`SpatialIndex::find_nearest`] and [`SpatialIndex::query_rect`].
//! - [`Index`]: the keyed, query-validating wrapper it is built on.
//! - [`Backend`]: the pluggable storage trait, with [`KdTree`] (default) and
//!   [`FlatVec`] (linear scan, the correctness reference).
//!
//! Equidistant candidates always resolve to the lowest key, so repeated
//! queries are stable regardless of backend.
//!
//! ## Minimal example
//!
//! ```rust
//! use sciencemap_index::SpatialIndex;
//! use sciencemap_points::{Point, PointSet};
//!
//! let points: PointSet = [
//!     Point::new(1, 0.0, 0.0),
//!     Point::new(2, 10.0, 0.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let index: SpatialIndex = SpatialIndex::build(points);
//! assert_eq!(index.find_nearest(8.0, 1.0, 5.0).map(|p| p.id.get()), Some(2));
//! assert!(index.find_nearest(5.0, 50.0, 5.0).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
mod backends;
mod index;
mod spatial;
mod types;

pub use backend::Backend;
pub use backends::{FlatVec, KdTree};
pub use index::Index;
pub use spatial::{PointKey, SpatialIndex};
pub use types::{Aabb2D, Entry, Hit};
