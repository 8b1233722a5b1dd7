// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Research-field category of a cluster.
///
/// The map ships with eleven categories. Ids outside that list are kept as-is
/// but have no display name or colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Category(pub u8);

const NAMES: [&str; 11] = [
    "biology",
    "chemistry",
    "computer science",
    "earth science",
    "engineering",
    "humanities",
    "materials science",
    "mathematics",
    "medicine",
    "physics",
    "social science",
];

const ALPHA: f32 = 0.75;

const PALETTE: [[f32; 4]; 11] = [
    [0.875, 0.125, 0.125, ALPHA],
    [0.875, 0.5341, 0.125, ALPHA],
    [0.8068, 0.875, 0.125, ALPHA],
    [0.3977, 0.875, 0.125, ALPHA],
    [0.125, 0.875, 0.2614, ALPHA],
    [0.125, 0.875, 0.6705, ALPHA],
    [0.125, 0.6705, 0.875, ALPHA],
    [0.125, 0.2614, 0.875, ALPHA],
    [0.3977, 0.125, 0.875, ALPHA],
    [0.8068, 0.125, 0.875, ALPHA],
    [0.875, 0.125, 0.5341, ALPHA],
];

impl Category {
    /// Number of known categories.
    pub const COUNT: usize = NAMES.len();

    /// Returns the raw category id.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns `true` if this id names one of the known categories.
    #[must_use]
    pub const fn is_known(self) -> bool {
        (self.0 as usize) < Self::COUNT
    }

    /// Display name, or `None` for unknown ids.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        NAMES.get(self.0 as usize).copied()
    }

    /// Straight-alpha RGBA fill colour, or `None` for unknown ids.
    #[must_use]
    pub fn color(self) -> Option<[f32; 4]> {
        PALETTE.get(self.0 as usize).copied()
    }

    /// Iterates all known categories in id order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}
