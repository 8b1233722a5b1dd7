// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed enter/update/exit reconciliation of on-screen shapes.

use alloc::vec::Vec;

use hashbrown::HashMap;
use sciencemap_points::PointId;

use crate::host::ShapeSink;
use crate::shape::Shape;

/// Counts of one reconciliation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Shapes created (ids new to the screen).
    pub created: usize,
    /// Shapes updated (ids that stayed).
    pub updated: usize,
    /// Shapes removed (ids that left).
    pub removed: usize,
}

/// Tracks which shapes are on screen and diffs them against the next set.
///
/// For a previous id set `A` and a new id set `B`, one pass creates
/// `|B \ A|` shapes, updates `|A ∩ B|` and removes `|A \ B|`. Duplicate ids in
/// the input collapse to their first occurrence.
#[derive(Debug, Default)]
pub struct Reconciler {
    live: HashMap<PointId, Shape>,
}

impl Reconciler {
    /// Creates a reconciler with nothing on screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes on screen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if nothing is on screen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Returns `true` if a shape with `id` is on screen.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.live.contains_key(&id)
    }

    /// The on-screen shape for `id`.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&Shape> {
        self.live.get(&id)
    }

    /// Brings the screen in line with `shapes`.
    ///
    /// Creates and updates are issued in input order, then removals in
    /// ascending id order.
    pub fn reconcile<S, I>(&mut self, shapes: I, sink: &mut S) -> ReconcileStats
    where
        S: ShapeSink + ?Sized,
        I: IntoIterator<Item = Shape>,
    {
        let mut previous = core::mem::take(&mut self.live);
        let mut stats = ReconcileStats::default();
        for shape in shapes {
            if self.live.contains_key(&shape.id) {
                continue;
            }
            if previous.remove(&shape.id).is_some() {
                sink.update(&shape);
                stats.updated += 1;
            } else {
                sink.create(&shape);
                stats.created += 1;
            }
            self.live.insert(shape.id, shape);
        }

        let mut gone: Vec<PointId> = previous.into_keys().collect();
        gone.sort_unstable();
        for id in gone {
            sink.remove(id);
            stats.removed += 1;
        }
        stats
    }

    /// Removes every shape from the screen.
    pub fn clear<S: ShapeSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        self.reconcile(core::iter::empty(), sink).removed
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;

    use kurbo::Point as ScreenPoint;
    use sciencemap_lod::Glyph;
    use sciencemap_points::{Category, PointId};

    use super::{ReconcileStats, Reconciler};
    use crate::{Shape, ShapeSink};

    #[derive(Default)]
    struct Log {
        calls: Vec<(char, u32)>,
    }

    impl ShapeSink for Log {
        fn create(&mut self, shape: &Shape) {
            self.calls.push(('c', shape.id.get()));
        }
        fn update(&mut self, shape: &Shape) {
            self.calls.push(('u', shape.id.get()));
        }
        fn remove(&mut self, id: PointId) {
            self.calls.push(('r', id.get()));
        }
    }

    fn shapes(ids: &[u32]) -> Vec<Shape> {
        ids.iter()
            .map(|&id| Shape {
                id: PointId(id),
                position: ScreenPoint::ZERO,
                glyph: Glyph::ring(3.0),
                area: 100.0,
                category: Category(0),
                weight: 1,
            })
            .collect()
    }

    #[test]
    fn counts_are_set_differences() {
        let mut r = Reconciler::new();
        let mut log = Log::default();
        let first = r.reconcile(shapes(&[1, 2, 3]), &mut log);
        assert_eq!(
            first,
            ReconcileStats {
                created: 3,
                updated: 0,
                removed: 0
            }
        );
        let second = r.reconcile(shapes(&[2, 3, 4, 5]), &mut log);
        assert_eq!(
            second,
            ReconcileStats {
                created: 2,
                updated: 2,
                removed: 1
            }
        );
        assert_eq!(r.len(), 4);
        assert!(!r.contains(PointId(1)));
    }

    #[test]
    fn sequential_sets_follow_set_differences() {
        let steps: [&[u32]; 3] = [&[1, 2, 3, 4], &[3, 4, 5, 6], &[1, 4, 6, 7, 8]];
        let mut r = Reconciler::new();
        let mut log = Log::default();
        let mut previous = BTreeSet::new();
        for ids in steps {
            let next: BTreeSet<u32> = ids.iter().copied().collect();
            let stats = r.reconcile(shapes(ids), &mut log);
            let expected = ReconcileStats {
                created: next.difference(&previous).count(),
                updated: next.intersection(&previous).count(),
                removed: previous.difference(&next).count(),
            };
            assert_eq!(stats, expected, "step to {ids:?}");
            assert_eq!(r.len(), next.len());
            previous = next;
        }
        // B to C in numbers: 1, 7, 8 enter; 4, 6 stay; 3, 5 leave.
        let tail = &log.calls[log.calls.len() - 7..];
        assert_eq!(tail[..4], [('c', 1), ('u', 4), ('u', 6), ('c', 7)]);
        assert_eq!(tail[4..], [('c', 8), ('r', 3), ('r', 5)]);
    }

    #[test]
    fn duplicates_collapse() {
        let mut r = Reconciler::new();
        let mut log = Log::default();
        let stats = r.reconcile(shapes(&[7, 7, 8, 7]), &mut log);
        assert_eq!(stats.created, 2);
        assert_eq!(r.len(), 2);
        assert_eq!(log.calls, [('c', 7), ('c', 8)]);
    }

    #[test]
    fn removals_are_ordered_and_clear_empties() {
        let mut r = Reconciler::new();
        let mut log = Log::default();
        r.reconcile(shapes(&[9, 4, 6]), &mut log);
        log.calls.clear();
        assert_eq!(r.clear(&mut log), 3);
        assert_eq!(log.calls, [('r', 4), ('r', 6), ('r', 9)]);
        assert!(r.is_empty());
    }
}
