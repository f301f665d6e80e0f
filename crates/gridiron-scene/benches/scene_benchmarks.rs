//! Scene construction and SVG encoding benchmarks.
//!
//! A full play of tracking data is roughly 300-700 samples, so compass
//! scaling is measured across that range and a little beyond.
//!
//! Run with: `cargo bench --bench scene_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gridiron_scene::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn compass_input(count: usize) -> Vec<CompassInputPoint> {
    (0..count)
        .map(|i| {
            let i = i as f64;
            CompassInputPoint::new(i * 0.37, (i * 0.11).sin().abs() * 9.0)
        })
        .collect()
}

fn full_field_spec() -> FieldDiagramSpec {
    FieldDiagramSpec {
        highlight_line: true,
        highlight_line_position: 35.0,
        treat_fifty_as_line_of_scrimmage: true,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_field_render(c: &mut Criterion) {
    let spec = full_field_spec();
    c.bench_function("field_render_all_overlays", |b| {
        b.iter(|| black_box(FieldRenderer::render(black_box(&spec))));
    });
}

fn bench_compass_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("compass_scaling");
    for count in [100usize, 500, 1_000, 5_000] {
        let points = compass_input(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| black_box(render_compass(black_box(points), None)));
        });
    }
    group.finish();
}

fn bench_svg_encode(c: &mut Criterion) {
    let writer = SvgWriter::new();
    let field = FieldRenderer::render(&full_field_spec());
    let compass = render_compass(&compass_input(500), None).expect("non-empty input");

    c.bench_function("svg_field", |b| {
        b.iter(|| black_box(writer.render(black_box(&field))));
    });
    c.bench_function("svg_compass_500", |b| {
        b.iter(|| black_box(writer.render(black_box(&compass))));
    });
}

fn bench_scene_fingerprint(c: &mut Criterion) {
    let compass = render_compass(&compass_input(1_000), None).expect("non-empty input");
    c.bench_function("fingerprint_compass_1k", |b| {
        b.iter(|| black_box(compass.fingerprint()));
    });
}

// ---------------------------------------------------------------------------
// Criterion groups and main
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_field_render,
    bench_compass_scaling,
    bench_svg_encode,
    bench_scene_fingerprint,
);
criterion_main!(benches);
