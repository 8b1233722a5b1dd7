// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detail content for annotation and article panels.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::point::{Point, PointId};

/// Lookup from key-concept id to its display text.
#[derive(Clone, Debug, Default)]
pub struct ConceptTable {
    concepts: HashMap<u32, String>,
}

impl ConceptTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a concept.
    pub fn insert(&mut self, id: u32, text: impl Into<String>) {
        self.concepts.insert(id, text.into());
    }

    /// Returns the text of a concept.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&str> {
        self.concepts.get(&id).map(String::as_str)
    }

    /// Number of concepts in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns `true` if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for ConceptTable {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        Self {
            concepts: iter.into_iter().map(|(id, s)| (id, s.into())).collect(),
        }
    }
}

/// How many recent articles a cluster has, bucketed for highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeClass {
    /// 100 articles or fewer.
    Few,
    /// Between the two thresholds.
    Normal,
    /// 1000 articles or more.
    Many,
}

/// Growth highlighting bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthClass {
    /// Below 80.
    Normal,
    /// 80 or above.
    High,
}

const FEW_ARTICLES: u32 = 100;
const MANY_ARTICLES: u32 = 1000;
const HIGH_GROWTH: f64 = 80.0;

/// Resolved content describing one point.
///
/// Panels render this however they like; the struct only carries data.
#[derive(Clone, Debug, PartialEq)]
pub struct PointDetails<'a> {
    /// Point id.
    pub id: PointId,
    /// Category display name, if the category is known.
    pub category: Option<&'static str>,
    /// Number of recent articles.
    pub articles: u32,
    /// Highlight bucket for `articles`.
    pub volume: VolumeClass,
    /// Growth rating.
    pub growth_rating: f64,
    /// Highlight bucket for `growth_rating`.
    pub growth: GrowthClass,
    /// Key concept texts; ids missing from the table are skipped.
    pub key_concepts: Vec<&'a str>,
}

impl<'a> PointDetails<'a> {
    /// Resolves the details of `point` against `concepts`.
    #[must_use]
    pub fn new(point: &Point, concepts: &'a ConceptTable) -> Self {
        let volume = if point.weight <= FEW_ARTICLES {
            VolumeClass::Few
        } else if point.weight >= MANY_ARTICLES {
            VolumeClass::Many
        } else {
            VolumeClass::Normal
        };
        let growth_rating = point.metadata.growth_rating;
        let growth = if growth_rating >= HIGH_GROWTH {
            GrowthClass::High
        } else {
            GrowthClass::Normal
        };
        Self {
            id: point.id,
            category: point.category.name(),
            articles: point.weight,
            volume,
            growth_rating,
            growth,
            key_concepts: point
                .metadata
                .key_concepts
                .iter()
                .filter_map(|&id| concepts.get(id))
                .collect(),
        }
    }
}
