// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weight-to-glyph classification.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// One circle of a point glyph, centred on the point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphCircle {
    /// Radius in pixels.
    pub radius: f64,
    /// Filled with the stroke colour (`true`) or with the background (`false`).
    pub filled: bool,
}

/// Marker drawn for a point: an outer ring and an optional inner circle.
///
/// Glyphs are sized in screen pixels and do not scale with zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    /// Outer ring.
    pub outer: GlyphCircle,
    /// Inner ring or dot.
    pub inner: Option<GlyphCircle>,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl Glyph {
    /// A single hollow ring.
    #[must_use]
    pub const fn ring(radius: f64) -> Self {
        Self {
            outer: GlyphCircle {
                radius,
                filled: false,
            },
            inner: None,
            stroke_width: 1.0,
        }
    }

    /// A hollow ring around a filled dot.
    #[must_use]
    pub const fn ring_with_dot(radius: f64, dot: f64) -> Self {
        Self {
            inner: Some(GlyphCircle {
                radius: dot,
                filled: true,
            }),
            ..Self::ring(radius)
        }
    }

    /// Two concentric hollow rings.
    #[must_use]
    pub const fn double_ring(radius: f64, inner: f64) -> Self {
        Self {
            inner: Some(GlyphCircle {
                radius: inner,
                filled: false,
            }),
            ..Self::ring(radius)
        }
    }

    /// Number of circles drawn.
    #[must_use]
    pub fn circle_count(&self) -> usize {
        1 + usize::from(self.inner.is_some())
    }
}

/// Glyph drawn for one size tier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierSpec {
    /// Glyph drawn for points in the tier.
    pub glyph: Glyph,
}

impl TierSpec {
    /// Creates a tier drawn with `glyph`.
    #[must_use]
    pub const fn new(glyph: Glyph) -> Self {
        Self { glyph }
    }
}

/// Error returned when a [`TierTable`] is constructed from invalid breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierTableError {
    /// No tiers were given.
    Empty,
    /// A threshold is `NaN`.
    NanThreshold {
        /// Position of the offending tier.
        index: usize,
    },
    /// Thresholds are not strictly increasing.
    NotAscending {
        /// Position of the first tier not above its predecessor.
        index: usize,
    },
}

impl fmt::Display for TierTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("tier table has no tiers"),
            Self::NanThreshold { index } => write!(f, "tier {index} has a NaN threshold"),
            Self::NotAscending { index } => {
                write!(f, "tier {index} threshold is not above the previous one")
            }
        }
    }
}

impl core::error::Error for TierTableError {}

/// Sorted breakpoint table mapping a point weight to a [`TierSpec`].
///
/// A weight belongs to the first tier whose threshold it does not exceed
/// (`weight <= threshold`). Weights above every threshold fall into the last
/// tier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<(f64, TierSpec)>", into = "Vec<(f64, TierSpec)>")
)]
pub struct TierTable {
    tiers: Vec<(f64, TierSpec)>,
}

impl Default for TierTable {
    /// Five tiers at `50 / 200 / 500 / 1000 / inf` recent articles.
    fn default() -> Self {
        Self {
            tiers: vec![
                (50.0, TierSpec::new(Glyph::ring(3.0))),
                (200.0, TierSpec::new(Glyph::ring(4.0))),
                (500.0, TierSpec::new(Glyph::ring_with_dot(5.0, 2.0))),
                (1000.0, TierSpec::new(Glyph::double_ring(6.0, 3.0))),
                (f64::INFINITY, TierSpec::new(Glyph::ring_with_dot(7.0, 4.0))),
            ],
        }
    }
}

impl TierTable {
    /// Creates a table from `(threshold, spec)` pairs in ascending threshold order.
    pub fn new(tiers: Vec<(f64, TierSpec)>) -> Result<Self, TierTableError> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }
        for (index, (threshold, _)) in tiers.iter().enumerate() {
            if threshold.is_nan() {
                return Err(TierTableError::NanThreshold { index });
            }
            if index > 0 && tiers[index - 1].0 >= *threshold {
                return Err(TierTableError::NotAscending { index });
            }
        }
        Ok(Self { tiers })
    }

    /// The `(threshold, spec)` pairs.
    #[must_use]
    pub fn tiers(&self) -> &[(f64, TierSpec)] {
        &self.tiers
    }

    /// Index of the tier a weight falls into.
    #[must_use]
    pub fn tier_index(&self, weight: u32) -> usize {
        let w = f64::from(weight);
        let i = self.tiers.partition_point(|(threshold, _)| w > *threshold);
        i.min(self.tiers.len() - 1)
    }

    /// Spec of the tier a weight falls into.
    #[must_use]
    pub fn classify(&self, weight: u32) -> &TierSpec {
        &self.tiers[self.tier_index(weight)].1
    }
}

impl TryFrom<Vec<(f64, TierSpec)>> for TierTable {
    type Error = TierTableError;

    fn try_from(tiers: Vec<(f64, TierSpec)>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<(f64, TierSpec)> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{Glyph, TierSpec, TierTable, TierTableError};

    #[test]
    fn default_breakpoints_are_inclusive() {
        let table = TierTable::default();
        assert_eq!(table.tier_index(0), 0);
        assert_eq!(table.tier_index(50), 0);
        assert_eq!(table.tier_index(51), 1);
        assert_eq!(table.tier_index(200), 1);
        assert_eq!(table.tier_index(500), 2);
        assert_eq!(table.tier_index(1000), 3);
        assert_eq!(table.tier_index(1001), 4);
        assert_eq!(table.classify(1001).glyph, Glyph::ring_with_dot(7.0, 4.0));
        assert_eq!(table.classify(700).glyph.circle_count(), 2);
    }

    #[test]
    fn weights_above_every_threshold_use_last_tier() {
        let spec = TierSpec {
            glyph: Glyph::ring(1.0),
        };
        let big = TierSpec {
            glyph: Glyph::ring(9.0),
        };
        let table = TierTable::new(vec![(10.0, spec), (20.0, big)]).unwrap();
        assert_eq!(table.tier_index(u32::MAX), 1);
        assert_eq!(table.classify(21).glyph.outer.radius, 9.0);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let spec = TierSpec {
            glyph: Glyph::ring(1.0),
        };
        assert_eq!(TierTable::new(vec![]), Err(TierTableError::Empty));
        assert_eq!(
            TierTable::new(vec![(10.0, spec), (10.0, spec)]),
            Err(TierTableError::NotAscending { index: 1 })
        );
        assert_eq!(
            TierTable::new(vec![(f64::NAN, spec)]),
            Err(TierTableError::NanThreshold { index: 0 })
        );
    }
}
