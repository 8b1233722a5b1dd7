// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buffered loading: rows arrive in batches, the set is published once.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

use crate::point::{Point, PointId};
use crate::set::PointSet;

/// Progress of a [`PointLoader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Batches are being buffered; nothing has been published.
    Loading {
        /// Batches received so far.
        batches: usize,
        /// Rows buffered so far.
        rows: usize,
    },
    /// The completion signal arrived and the set was published.
    Complete {
        /// Points in the published set.
        points: usize,
        /// Rows dropped at ingestion (non-finite coordinates or duplicate ids).
        rejected: usize,
    },
}

/// Error returned by [`PointLoader::on_batch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// A batch arrived after the completion signal.
    AlreadyComplete,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyComplete => f.write_str("point batch received after loading completed"),
        }
    }
}

impl core::error::Error for LoadError {}

/// Accumulates streamed point batches until a completion signal.
///
/// The loader is the ingestion boundary of the system:
/// - Rows with non-finite coordinates (unparsable numeric fields) are dropped.
/// - Duplicate ids keep their first occurrence.
/// - The published [`PointSet`] is ordered by weight, heaviest first; rows of
///   equal weight keep their arrival order.
///
/// Nothing is published before `done`, so consumers never see partial data.
#[derive(Debug)]
pub struct PointLoader {
    buffer: Vec<Point>,
    batches: usize,
    state: LoadState,
}

impl Default for PointLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PointLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            batches: 0,
            state: LoadState::Loading {
                batches: 0,
                rows: 0,
            },
        }
    }

    /// Returns the current progress.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Returns `true` once the completion signal has been processed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.state, LoadState::Complete { .. })
    }

    /// Buffers one batch of rows.
    ///
    /// Returns `Ok(Some(set))` exactly once, for the batch carrying
    /// `done == true`, and `Ok(None)` for every batch before it.
    pub fn on_batch<I>(&mut self, items: I, done: bool) -> Result<Option<PointSet>, LoadError>
    where
        I: IntoIterator<Item = Point>,
    {
        if self.is_complete() {
            tracing::warn!("dropping point batch received after completion");
            return Err(LoadError::AlreadyComplete);
        }

        self.buffer.extend(items);
        self.batches += 1;

        if !done {
            self.state = LoadState::Loading {
                batches: self.batches,
                rows: self.buffer.len(),
            };
            return Ok(None);
        }

        let rows = core::mem::take(&mut self.buffer);
        let received = rows.len();
        let mut seen: HashSet<PointId> = HashSet::with_capacity(received);
        let mut non_finite = 0_usize;
        let mut duplicates = 0_usize;
        let mut points: Vec<Point> = Vec::with_capacity(received);
        for point in rows {
            if !point.has_finite_position() {
                non_finite += 1;
                continue;
            }
            if !seen.insert(point.id) {
                duplicates += 1;
                continue;
            }
            points.push(point);
        }

        if non_finite > 0 {
            tracing::warn!(
                rows = non_finite,
                "dropped rows with non-finite coordinates"
            );
        }
        if duplicates > 0 {
            tracing::warn!(rows = duplicates, "dropped rows with duplicate ids");
        }

        // Stable: equal weights keep arrival order.
        points.sort_by(|a, b| b.weight.cmp(&a.weight));

        self.state = LoadState::Complete {
            points: points.len(),
            rejected: non_finite + duplicates,
        };
        tracing::debug!(
            batches = self.batches,
            points = points.len(),
            rejected = non_finite + duplicates,
            "point loading complete"
        );
        Ok(Some(PointSet::from_vec(points)))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{LoadError, LoadState, PointLoader};
    use crate::Point;

    #[test]
    fn nothing_is_published_before_done() {
        let mut loader = PointLoader::new();
        let out = loader
            .on_batch(
                vec![Point::new(1, 0.0, 0.0), Point::new(2, 1.0, 1.0)],
                false,
            )
            .unwrap();
        assert!(out.is_none());
        assert_eq!(
            loader.state(),
            LoadState::Loading {
                batches: 1,
                rows: 2
            }
        );
        assert!(!loader.is_complete());
    }

    #[test]
    fn done_publishes_filtered_sorted_set() {
        let mut loader = PointLoader::new();
        loader
            .on_batch(
                vec![
                    Point::new(1, 0.0, 0.0).with_weight(10),
                    Point::new(2, f64::NAN, 0.0).with_weight(999),
                ],
                false,
            )
            .unwrap();
        let set = loader
            .on_batch(
                vec![
                    Point::new(3, 2.0, 2.0).with_weight(50),
                    Point::new(4, 3.0, 3.0).with_weight(10),
                ],
                true,
            )
            .unwrap()
            .unwrap();

        let ids: Vec<u32> = set.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3, 1, 4]);
        assert_eq!(
            loader.state(),
            LoadState::Complete {
                points: 3,
                rejected: 1
            }
        );
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut loader = PointLoader::new();
        let set = loader
            .on_batch(
                vec![
                    Point::new(1, 0.0, 0.0).with_weight(5),
                    Point::new(1, 9.0, 9.0).with_weight(500),
                ],
                true,
            )
            .unwrap()
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].x, 0.0);
    }

    #[test]
    fn batches_after_completion_are_rejected() {
        let mut loader = PointLoader::new();
        loader.on_batch(Vec::new(), true).unwrap();
        let err = loader
            .on_batch(vec![Point::new(1, 0.0, 0.0)], false)
            .unwrap_err();
        assert_eq!(err, LoadError::AlreadyComplete);
    }

    #[test]
    fn empty_completion_yields_empty_set() {
        let mut loader = PointLoader::new();
        let set = loader.on_batch(Vec::new(), true).unwrap().unwrap();
        assert!(set.is_empty());
    }
}
