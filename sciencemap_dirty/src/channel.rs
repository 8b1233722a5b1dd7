// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Channel and channel set types naming what a redraw has to refresh.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// Identifies an invalidation domain of the map view.
///
/// A channel is a lightweight handle (a single `u8`). State changes mark the
/// channels they affect; the frame that finally renders receives the union of
/// everything marked since the previous frame.
///
/// # Example
///
/// ```
/// use sciencemap_dirty::Channel;
///
/// assert_ne!(Channel::POSITIONS, Channel::OPACITY);
/// assert_eq!(Channel::new(5).index(), 5);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Scales changed: shape positions, visible set, labels and viewBox.
    pub const POSITIONS: Self = Self(0);
    /// Zoom factor changed: layer and label opacities.
    pub const OPACITY: Self = Self(1);
    /// Hovered point changed or must be re-anchored.
    pub const ANNOTATION: Self = Self(2);

    /// Creates a channel with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 64`, as [`ChannelSet`] only supports 64 channels.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 64, "Channel index must be less than 64");
        Self(index)
    }

    /// Returns the index of this channel.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Converts this channel into a single-element [`ChannelSet`].
    #[must_use]
    pub const fn into_set(self) -> ChannelSet {
        ChannelSet(1_u64 << self.0)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::POSITIONS => f.write_str("Channel::POSITIONS"),
            Self::OPACITY => f.write_str("Channel::OPACITY"),
            Self::ANNOTATION => f.write_str("Channel::ANNOTATION"),
            Self(i) => f.debug_tuple("Channel").field(&i).finish(),
        }
    }
}

/// A compact bitfield of up to 64 channels.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ChannelSet(u64);

impl ChannelSet {
    /// An empty channel set.
    pub const EMPTY: Self = Self(0);

    /// Every channel a full redraw refreshes.
    pub const FULL_REDRAW: Self = Self(
        Channel::POSITIONS.into_set().0
            | Channel::OPACITY.into_set().0
            | Channel::ANNOTATION.into_set().0,
    );

    /// Returns `true` if this set contains no channels.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this set contains the given channel.
    #[must_use]
    pub const fn contains(self, channel: Channel) -> bool {
        (self.0 & (1_u64 << channel.0)) != 0
    }

    /// Inserts a channel into the set.
    pub fn insert(&mut self, channel: Channel) {
        self.0 |= 1_u64 << channel.0;
    }

    /// Returns the number of channels in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns an iterator over the channels in this set, lowest index first.
    #[must_use]
    pub const fn iter(self) -> ChannelSetIter {
        ChannelSetIter { bits: self.0 }
    }
}

impl fmt::Debug for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for ChannelSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Channel> for ChannelSet {
    type Output = Self;

    fn bitor(self, rhs: Channel) -> Self::Output {
        self | rhs.into_set()
    }
}

impl BitOr for Channel {
    type Output = ChannelSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.into_set() | rhs.into_set()
    }
}

impl BitOrAssign for ChannelSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        channel.into_set()
    }
}

impl IntoIterator for ChannelSet {
    type Item = Channel;
    type IntoIter = ChannelSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the channels in a [`ChannelSet`].
#[derive(Clone, Debug)]
pub struct ChannelSetIter {
    bits: u64,
}

impl Iterator for ChannelSetIter {
    type Item = Channel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation, reason = "trailing_zeros <= 63")]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(Channel(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for ChannelSetIter {}
