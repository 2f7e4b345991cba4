//! Performance benchmarks for iconfont-picker.
//!
//! Run with: cargo bench
//!
//! Target performance:
//! - Extraction over a full Font Awesome sized stylesheet: < 20ms
//! - Search over the extracted set: < 5ms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use iconfont_picker::core::{extract_icons, search};
use iconfont_picker::LibraryRegistry;

/// Synthetic stylesheet shaped like Font Awesome's all.css.
fn font_awesome_css(icons: usize) -> String {
    let mut css = String::from(
        "/*! Font Awesome Free */\n.fa{font-family:var(--fa-style-family)}\n\
         @font-face{font-family:\"Font Awesome 6 Free\";src:url(fa-solid-900.woff2)}\n",
    );
    for i in 0..icons {
        css.push_str(&format!(".fa-icon-{}:before{{content:\"\\f{:03x}\"}}\n", i, i));
        if i % 10 == 0 {
            css.push_str(&format!(".fa-solid.fa-solid-icon-{}::before{{content:\"x\"}}\n", i));
        }
    }
    css
}

/// Benchmark extraction at different stylesheet sizes.
fn bench_extraction(c: &mut Criterion) {
    let fa = LibraryRegistry::builtin().first();
    let mut group = c.benchmark_group("extract_icons");

    for size in [100, 1000, 2000] {
        let css = font_awesome_css(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &css, |b, css| {
            b.iter(|| black_box(extract_icons(black_box(css), fa)))
        });
    }

    group.finish();
}

/// Benchmark URL and body detection.
fn bench_detection(c: &mut Criterion) {
    let registry = LibraryRegistry::builtin();
    let css = font_awesome_css(1000);

    let mut group = c.benchmark_group("detect_library");

    group.bench_function("url_match", |b| {
        b.iter(|| {
            black_box(registry.detect_library(
                black_box("https://use.fontawesome.com/releases/v6.4.0/css/all.css"),
                None,
            ))
        })
    });

    group.bench_function("body_fallback", |b| {
        b.iter(|| {
            black_box(registry.detect_library(
                black_box("https://ds.example.gov/assets/icons.css"),
                Some(&css),
            ))
        })
    });

    group.finish();
}

/// Benchmark substring and fuzzy search over the extracted set.
fn bench_search(c: &mut Criterion) {
    let registry = LibraryRegistry::builtin();
    let icons = extract_icons(&font_awesome_css(2000), registry.first());

    let queries = ["icon", "1", "icon-150", "solid"];

    let mut group = c.benchmark_group("search");

    for query in queries {
        group.bench_with_input(BenchmarkId::new("substring", query), &query, |b, query| {
            b.iter(|| {
                black_box(search::filter_by_name(
                    icons.iter().map(String::as_str),
                    query,
                    registry,
                ))
            })
        });

        group.bench_with_input(BenchmarkId::new("fuzzy", query), &query, |b, query| {
            b.iter(|| {
                black_box(search::rank(
                    icons.iter().map(String::as_str),
                    query,
                    registry,
                    50,
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_detection, bench_search);
criterion_main!(benches);
