// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sciencemap_index::{Aabb2D, Entry, FlatVec, Index, KdTree, SpatialIndex};
use sciencemap_points::{Point, PointSet};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Points spread over `[-1000, 1000]²`, heaviest first.
fn gen_points(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    let mut points: Vec<Point> = (0..count)
        .map(|i| {
            let x = rng.next_f64() * 2000.0 - 1000.0;
            let y = rng.next_f64() * 2000.0 - 1000.0;
            let weight = (rng.next_u64() % 5000) as u32;
            Point::new(i as u32, x, y).with_weight(weight)
        })
        .collect();
    points.sort_by(|a, b| b.weight.cmp(&a.weight));
    points
}

fn gen_queries(count: usize) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * 2200.0 - 1100.0;
            let y = rng.next_f64() * 2200.0 - 1100.0;
            (x, y)
        })
        .collect()
}

fn entries(points: &[Point]) -> Vec<Entry<u32>> {
    points
        .iter()
        .map(|p| Entry::new(p.id.get(), p.x, p.y))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_points(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("KdTree", n), |b| {
            b.iter(|| Index::<u32, KdTree<u32>>::build(entries(black_box(&points))));
        });
        group.bench_function(BenchmarkId::new("SpatialIndex", n), |b| {
            b.iter(|| SpatialIndex::build(PointSet::from_vec(black_box(points.clone()))));
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let queries = gen_queries(1_000);
    let mut group = c.benchmark_group("nearest");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_points(n);
        let tree = Index::<u32, KdTree<u32>>::build(entries(&points));
        let flat = Index::<u32, FlatVec<u32>>::build(entries(&points));
        group.throughput(Throughput::Elements(queries.len() as u64));
        for &radius in &[5.0f64, 50.0] {
            group.bench_function(BenchmarkId::new(format!("KdTree/r{radius}"), n), |b| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for &(x, y) in &queries {
                        hits += usize::from(tree.nearest(x, y, radius).is_some());
                    }
                    black_box(hits)
                });
            });
            // The linear scan is only interesting as a baseline at small sizes.
            if n <= 10_000 {
                group.bench_function(BenchmarkId::new(format!("FlatVec/r{radius}"), n), |b| {
                    b.iter(|| {
                        let mut hits = 0usize;
                        for &(x, y) in &queries {
                            hits += usize::from(flat.nearest(x, y, radius).is_some());
                        }
                        black_box(hits)
                    });
                });
            }
        }
    }
    group.finish();
}

fn bench_query_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_rect");
    let points = gen_points(100_000);
    let tree = Index::<u32, KdTree<u32>>::build(entries(&points));
    for &half in &[25.0f64, 250.0] {
        let rect = Aabb2D::new(-half, -half, half, half);
        group.bench_function(BenchmarkId::new("KdTree", half as u32), |b| {
            b.iter(|| black_box(tree.query_rect(black_box(rect))).len());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_nearest, bench_query_rect);
criterion_main!(benches);
