//! Criterion benchmarks for sprep critical paths
//!
//! Benchmarks the operations that dominate run time:
//! - Swirl: per-pixel polar remap
//! - Burst: a full frame (three swirls, hole, drops)
//! - Transform: `transform` attribute parsing
//! - Flatten: path sampling and SVG rewriting
//! - Spritesheet: frame stacking

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgba, RgbaImage};
use sprep::burst::{render_burst, BurstConfig};
use sprep::spritesheet::{stack_frames, SheetFrame};
use sprep::svg::{flatten_svg_str, parse_path_data, parse_transform, FlattenOptions, Matrix};
use sprep::swirl::{swirl_once, swirl_three_centers};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Radial gradient bubble of `size` x `size`
fn make_bubble(size: u32) -> RgbaImage {
    let c = size as f64 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let d = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt() / c;
        let a = if d <= 1.0 { (255.0 * (1.0 - d * 0.5)) as u8 } else { 0 };
        Rgba([180, 210, 255, a])
    })
}

/// SVG document with `n` transformed ellipses and paths
fn make_svg(n: usize) -> String {
    let mut svg = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg">"#);
    for i in 0..n {
        svg.push_str(&format!(
            r#"<ellipse cx="{i}" cy="{i}" rx="12" ry="6" transform="rotate({i} 50 50)"/>"#
        ));
        svg.push_str(&format!(
            r#"<path d="M0 0 C 10 20 30 20 40 0 A 5 5 0 0 1 50 10 Z" transform="translate({i}, 3) scale(1.5)"/>"#
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn make_frames(count: usize, size: u32) -> Vec<SheetFrame> {
    (0..count)
        .map(|i| SheetFrame {
            name: format!("{:03}.png", i),
            image: RgbaImage::from_pixel(size, size, Rgba([i as u8, 0, 0, 255])),
        })
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_swirl(c: &mut Criterion) {
    let mut group = c.benchmark_group("swirl");

    for size in [64u32, 128, 256].iter() {
        let bubble = make_bubble(*size);
        let center = (*size as f64 / 2.0, *size as f64 / 2.0);

        group.throughput(Throughput::Elements((*size * *size) as u64));
        group.bench_with_input(BenchmarkId::new("swirl_once", size), &bubble, |b, img| {
            b.iter(|| swirl_once(black_box(img), center, black_box(1.28)))
        });
        group.bench_with_input(BenchmarkId::new("three_centers", size), &bubble, |b, img| {
            b.iter(|| swirl_three_centers(black_box(img), 5, 10, black_box(1.28)))
        });
    }

    group.finish();
}

fn bench_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("burst");
    group.sample_size(20);

    let bubble = make_bubble(128);
    let config = BurstConfig::default();
    group.bench_function("render_10_frames_128", |b| {
        b.iter(|| render_burst(black_box(&bubble), black_box(&config)))
    });

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    let inputs = [
        ("translate", "translate(10, 20)"),
        ("rotate_about", "rotate(45 50 50)"),
        ("chain", "translate(10,20) rotate(30) scale(2 0.5) skewX(10) matrix(1 0 0 1 3 4)"),
    ];
    for (name, value) in inputs.iter() {
        group.bench_with_input(BenchmarkId::new("parse", name), value, |b, v| {
            b.iter(|| parse_transform(black_box(v)))
        });
    }

    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    let d = "M0 0 C 10 20 30 20 40 0 S 70 -20 80 0 Q 90 10 100 0 T 120 0 A 10 5 30 1 0 140 10 Z";
    group.bench_function("parse_path_data", |b| b.iter(|| parse_path_data(black_box(d))));

    let path = parse_path_data(d).expect("benchmark path data parses");
    let matrix = Matrix::rotate_about(30.0, 50.0, 50.0);
    group.bench_function("sample_transform_20", |b| {
        b.iter(|| {
            let mut lines = black_box(&path).sample(20);
            for line in &mut lines {
                line.transform(&matrix);
            }
            lines
        })
    });

    let options = FlattenOptions::default();
    for count in [10usize, 100].iter() {
        let svg = make_svg(*count);
        group.throughput(Throughput::Elements(*count as u64 * 2));
        group.bench_with_input(BenchmarkId::new("document", count), &svg, |b, svg| {
            b.iter(|| flatten_svg_str(black_box(svg), &options))
        });
    }

    group.finish();
}

fn bench_spritesheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("spritesheet");

    for count in [10usize, 50, 200].iter() {
        let frames = make_frames(*count, 32);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("stack_32x32", count), &frames, |b, frames| {
            b.iter(|| stack_frames(black_box(frames)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_swirl,
    bench_burst,
    bench_transform,
    bench_flatten,
    bench_spritesheet
);

criterion_main!(benches);
