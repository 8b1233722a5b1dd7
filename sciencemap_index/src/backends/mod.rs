// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in backends.

mod flatvec;
mod kdtree;

pub use flatvec::FlatVec;
pub use kdtree::KdTree;
