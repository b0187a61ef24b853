#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for scatter figure synthesis.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_plotspec::prelude::*;

fn scatter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter_figure");
    let viewer = ViewerState::rectilinear(AxisState::new("x", 0.0, 1e5), AxisState::new("y", -1.0, 1.0));
    let style = StyleContext::light();

    for size in [100, 1_000, 10_000, 100_000] {
        let x: Vec<f64> = (0..size).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let data = Arc::new(DataTable::new("bench").with_numeric("x", &x).with_numeric("y", &y));

        let fixed = vec![LayerState::new(1, data.clone())];
        group.bench_with_input(BenchmarkId::new("fixed", size), &size, |b, _| {
            b.iter(|| scatter2d_figure(black_box(&viewer), black_box(&fixed), &style, CanvasSize::default()).unwrap());
        });

        let linear = vec![LayerState::new(1, data).with_color_mode(ColorMode::linear(
            "y",
            Colormap::viridis(),
            -1.0,
            1.0,
        ))];
        group.bench_with_input(BenchmarkId::new("linear_color", size), &size, |b, _| {
            b.iter(|| scatter2d_figure(black_box(&viewer), black_box(&linear), &style, CanvasSize::default()).unwrap());
        });
    }

    group.finish();
}

fn json_benchmark(c: &mut Criterion) {
    let viewer = ViewerState::rectilinear(AxisState::new("x", 0.0, 1e4), AxisState::new("y", 0.0, 1e4));
    let x: Vec<f64> = (0..10_000).map(f64::from).collect();
    let data = Arc::new(DataTable::new("bench").with_numeric("x", &x).with_numeric("y", &x));
    let figure = scatter2d_figure(&viewer, &[LayerState::new(1, data)], &StyleContext::light(), CanvasSize::default())
        .unwrap();

    c.bench_function("figure_to_json_10k", |b| b.iter(|| black_box(&figure).to_json().unwrap()));
}

criterion_group!(benches, scatter_benchmark, json_benchmark);
criterion_main!(benches);
