// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-frame-at-a-time redraw scheduling.

use core::fmt;

use crate::channel::ChannelSet;

/// Handle of an animation-frame request, issued by the host.
///
/// Tokens are compared for equality only; a frame callback carrying a token
/// other than the pending one is stale.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Wraps a host-issued request id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the host-issued request id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for FrameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameToken({})", self.0)
    }
}

/// Counters describing how invalidations were coalesced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Frames requested from the host.
    pub requested: u64,
    /// Invalidations merged into an already pending frame.
    pub absorbed: u64,
    /// Frames that rendered.
    pub rendered: u64,
    /// Frame callbacks ignored because their token was not pending.
    pub stale: u64,
    /// Pending frames withdrawn.
    pub cancelled: u64,
}

/// Coalesces state changes into at most one pending animation frame.
///
/// - The first invalidation while idle requests a frame from the host.
/// - Later invalidations are absorbed: their channels are merged into the
///   pending frame and no further request is made.
/// - A frame callback renders only if its token is the pending one; the
///   scheduler is then idle again.
///
/// # Example
///
/// ```
/// use sciencemap_dirty::{Channel, FrameToken, RedrawScheduler};
///
/// let mut scheduler = RedrawScheduler::new();
/// let mut next = 0;
/// let mut request = || {
///     next += 1;
///     FrameToken::new(next)
/// };
///
/// assert!(scheduler.invalidate(Channel::POSITIONS.into_set(), &mut request));
/// // Absorbed: no second request.
/// assert!(!scheduler.invalidate(Channel::OPACITY.into_set(), &mut request));
///
/// let dirty = scheduler.begin_frame(FrameToken::new(1)).unwrap();
/// assert_eq!(dirty, Channel::POSITIONS | Channel::OPACITY);
/// assert!(!scheduler.is_pending());
/// ```
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: Option<FrameToken>,
    dirty: ChannelSet,
    stats: SchedulerStats,
}

impl RedrawScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a frame has been requested and not yet rendered.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Token of the pending frame, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Channels accumulated for the pending frame.
    #[must_use]
    pub fn dirty(&self) -> ChannelSet {
        self.dirty
    }

    /// Coalescing counters.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Marks `channels` dirty, calling `request` if no frame is pending.
    ///
    /// Returns `true` if a new frame was requested. An empty set is a no-op.
    pub fn invalidate<F>(&mut self, channels: ChannelSet, request: F) -> bool
    where
        F: FnOnce() -> FrameToken,
    {
        if channels.is_empty() {
            return false;
        }
        self.dirty |= channels;
        if self.pending.is_some() {
            self.stats.absorbed += 1;
            return false;
        }
        let token = request();
        self.pending = Some(token);
        self.stats.requested += 1;
        true
    }

    /// Starts rendering the frame identified by `token`.
    ///
    /// Returns the accumulated channels and clears them, or `None` if `token`
    /// is stale (already rendered, cancelled or never issued).
    pub fn begin_frame(&mut self, token: FrameToken) -> Option<ChannelSet> {
        if self.pending != Some(token) {
            self.stats.stale += 1;
            tracing::trace!(?token, pending = ?self.pending, "ignoring stale frame");
            return None;
        }
        self.pending = None;
        self.stats.rendered += 1;
        Some(core::mem::take(&mut self.dirty))
    }

    /// Withdraws the pending frame.
    ///
    /// Accumulated channels are kept: the next [`invalidate`](Self::invalidate)
    /// or [`resume`](Self::resume) requests a frame that carries them.
    /// Returns the token the host should cancel, if one was pending.
    pub fn cancel(&mut self) -> Option<FrameToken> {
        let token = self.pending.take()?;
        self.stats.cancelled += 1;
        Some(token)
    }

    /// Requests a frame for channels left over by [`cancel`](Self::cancel).
    ///
    /// Returns `true` if a frame was requested; does nothing when a frame is
    /// already pending or nothing is dirty.
    pub fn resume<F>(&mut self, request: F) -> bool
    where
        F: FnOnce() -> FrameToken,
    {
        if self.pending.is_some() || self.dirty.is_empty() {
            return false;
        }
        self.pending = Some(request());
        self.stats.requested += 1;
        true
    }
}
