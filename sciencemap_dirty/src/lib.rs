// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Science Map Dirty: invalidation channels and redraw coalescing.
//!
//! Pointer and zoom events arrive far more often than the display refreshes.
//! This crate lets event handlers record *what* changed and guarantees that
//! at most one render happens per animation frame:
//!
//! - **Channels** ([`Channel`], [`ChannelSet`]): the invalidation domains of
//!   the map view (positions, opacity, annotation).
//! - **Scheduler** ([`RedrawScheduler`], [`FrameToken`]): one pending frame
//!   request at a time; later changes are absorbed into it and stale frame
//!   callbacks are ignored.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod channel;
mod scheduler;

pub use channel::{Channel, ChannelSet, ChannelSetIter};
pub use scheduler::{FrameToken, RedrawScheduler, SchedulerStats};
