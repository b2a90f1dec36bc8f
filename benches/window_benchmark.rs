//! Window calculation benchmarks.
//!
//! The window is recomputed on every scroll event, so this is the hot path
//! of the list. Covers the pure computation, the memoized calculator and a
//! full scroll event through the list with the in-memory surface.
//!
//! Run with: cargo bench --bench window_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rowscope::model::LineStore;
use rowscope::surface::Document;
use rowscope::window::{compute_window, Geometry, ScrollInput, WindowCalculator, WindowParams};
use rowscope::{ListParams, VirtualList};
use std::time::Instant;

const ROW_HEIGHT: f64 = 20.0;
const VIEW_HEIGHT: f64 = 800.0;

fn bench_compute_window(c: &mut Criterion) {
    let params = WindowParams::default();
    let mut group = c.benchmark_group("compute_window");

    for rows in [1_000usize, 100_000, 1_000_000] {
        let geometry = Geometry::new(ROW_HEIGHT, rows, VIEW_HEIGHT);
        let max = geometry.max_scroll_top(&params);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &geometry, |b, geometry| {
            let mut top = 0.0;
            b.iter(|| {
                top = (top + 137.0) % max;
                black_box(compute_window(black_box(top), geometry, &params))
            });
        });
    }

    group.finish();
}

fn bench_memoized_calculator(c: &mut Criterion) {
    let params = WindowParams::default();
    let geometry = Geometry::new(ROW_HEIGHT, 100_000, VIEW_HEIGHT);
    let mut calculator = WindowCalculator::new(params);
    calculator.calculate(40_000.0, &geometry, false);

    c.bench_function("calculator_unchanged_inputs", |b| {
        b.iter(|| black_box(calculator.calculate(black_box(40_000.0), &geometry, false)));
    });
}

fn bench_scroll_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_event");

    for rows in [10_000usize, 1_000_000] {
        let lines =
            LineStore::from_lines((0..rows).map(|i| format!("{i:>7} GET /api/items/{i} 200")))
                .into_shared();
        let document = Document::new();
        let surface = document.mount(lines, ROW_HEIGHT);
        let mut list = VirtualList::new(
            surface,
            document.selection(),
            ListParams::default(),
            VIEW_HEIGHT,
        );
        list.update(false);
        let max = list.scroll_state().scroll_height - VIEW_HEIGHT;

        group.bench_function(BenchmarkId::from_parameter(rows), |b| {
            let mut top = 15.0;
            b.iter(|| {
                top = (top + 397.0) % max;
                let input = ScrollInput {
                    scroll_top: top,
                    scroll_left: 0.0,
                    scroll_height: max + VIEW_HEIGHT,
                    client_height: VIEW_HEIGHT,
                };
                black_box(list.on_scroll(input, Instant::now()))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_window,
    bench_memoized_calculator,
    bench_scroll_event
);
criterion_main!(benches);
