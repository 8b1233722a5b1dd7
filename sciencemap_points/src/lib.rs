// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Science Map Points: the point data model shared by every other crate.
//!
//! A science map is a large, static cloud of research-cluster points. This
//! crate owns the types that describe one such point and the collection they
//! live in once loading is finished:
//!
//! - [`Point`] / [`PointId`]: one cluster with a data-space position, a
//!   `weight` (number of recent articles) that drives its visual size, a
//!   [`Category`] and opaque [`Metadata`].
//! - [`PointSet`]: an immutable, cheaply clonable collection built once per
//!   session.
//! - [`PointLoader`]: buffers incrementally delivered batches and only hands
//!   out a [`PointSet`] when the completion signal arrives.
//! - [`PointDetails`] / [`ConceptTable`]: the content shown by annotation and
//!   article panels for a resolved point.
//!
//! ## Minimal example
//!
//! ```rust
//! use sciencemap_points::{Point, PointLoader};
//!
//! let mut loader = PointLoader::new();
//!
//! // First batch: nothing is published yet.
//! let first = loader
//!     .on_batch([Point::new(1, 0.0, 0.0).with_weight(10)], false)
//!     .unwrap();
//! assert!(first.is_none());
//!
//! // Completion: rows with unusable coordinates are dropped here.
//! let set = loader
//!     .on_batch(
//!         [
//!             Point::new(2, 1.0, 1.0).with_weight(500),
//!             Point::new(3, f64::NAN, 1.0),
//!         ],
//!         true,
//!     )
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(set.len(), 2);
//! // Heaviest clusters come first.
//! assert_eq!(set[0].id.get(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod category;
mod details;
mod loader;
mod point;
mod set;

pub use category::Category;
pub use details::{ConceptTable, GrowthClass, PointDetails, VolumeClass};
pub use loader::{LoadError, LoadState, PointLoader};
pub use point::{Metadata, Point, PointId};
pub use set::PointSet;
