// Copyright 2025 the Science Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point as ScreenPoint;
use sciencemap_lod::{LayerStack, PointSizing, TierTable, visible_points};
use sciencemap_points::Point;
use sciencemap_view2d::ScaleManager;

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

/// Clustered points, like research topics around discipline centres.
fn gen_clustered(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<(f64, f64)> = (0..n_clusters)
        .map(|_| {
            let x = rng.next_f64() * 2000.0 - 1000.0;
            let y = rng.next_f64() * 2000.0 - 1000.0;
            (x, y)
        })
        .collect();
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            let weight = (rng.next_u64() % 3000) as u32;
            let id = out.len() as u32;
            out.push(Point::new(id, cx + dx, cy + dy).with_weight(weight));
        }
    }
    out.sort_by(|a, b| b.weight.cmp(&a.weight));
    out
}

fn bench_visible_set(c: &mut Criterion) {
    let points = gen_clustered(200, 500, 150.0);
    let mut group = c.benchmark_group("visible_points");
    group.throughput(Throughput::Elements(points.len() as u64));
    for &zoom in &[1.0f64, 8.0, 64.0] {
        let mut scales = ScaleManager::new(1280.0, 800.0);
        let t = scales.zoomed_about(ScreenPoint::new(640.0, 400.0), zoom);
        scales.apply_transform(t);
        group.bench_function(BenchmarkId::new("k", zoom as u32), |b| {
            b.iter(|| {
                visible_points(
                    black_box(&points),
                    scales.x_scale(),
                    scales.y_scale(),
                    20_000,
                )
                .len()
            });
        });
    }
    group.finish();
}

fn bench_frame_attributes(c: &mut Criterion) {
    let points = gen_clustered(40, 500, 150.0);
    let tiers = TierTable::default();
    let sizing = PointSizing::default();
    let layers = LayerStack::default();
    c.bench_function("frame_attributes/20000", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for p in black_box(&points) {
                total += sizing.area(p.weight, 2.0);
                total += tiers.classify(p.weight).glyph.outer.radius;
            }
            total += layers.opacity(2.0).map_or(0.0, |o| o.iter().sum());
            black_box(total)
        });
    });
}

criterion_group!(benches, bench_visible_set, bench_frame_attributes);
criterion_main!(benches);
