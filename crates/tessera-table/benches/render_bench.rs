//! Benchmarks for table layout and rendering.
//!
//! Run with: cargo bench -p tessera-table

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tessera_table::{Cell, ColumnMetrics, Grid, Row, Table};

// =============================================================================
// Test Data
// =============================================================================

fn plain_table(rows: usize, columns: usize) -> Table {
    Table::new((0..rows).map(|r| {
        Row::new((0..columns).map(|c| format!("cell {r}:{c}")))
    }))
    .header((0..columns).map(|c| format!("column {c}")).collect::<Vec<_>>())
    .border(true)
}

fn wrapped_table(rows: usize) -> Table {
    Table::new((0..rows).map(|r| {
        [
            format!("row {r}"),
            "the quick brown fox jumps over the lazy dog".repeat(2),
            format!("\x1b[32mstyled {r} text that also wraps\x1b[39m"),
        ]
    }))
    .max_col_width(16)
    .border(true)
}

/// Alternating merged rows: one cell across every column, then a partial merge.
fn spanned_table(rows: usize) -> Table {
    Table::new((0..rows).map(|r| {
        if r % 2 == 0 {
            Row::new([Cell::new(format!("merged heading {r}")).col_span(4)])
        } else {
            Row::new([
                Cell::new(format!("row {r}")),
                Cell::new("a"),
                Cell::new("b").col_span(2),
            ])
        }
    }))
    .border(true)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for rows in [10, 100, 1000] {
        let plain = plain_table(rows, 5);
        group.bench_with_input(BenchmarkId::new("plain", rows), &plain, |b, table| {
            b.iter(|| black_box(table.render()))
        });

        let wrapped = wrapped_table(rows);
        group.bench_with_input(BenchmarkId::new("wrapped", rows), &wrapped, |b, table| {
            b.iter(|| black_box(table.render()))
        });

        let spanned = spanned_table(rows);
        group.bench_with_input(BenchmarkId::new("spanned", rows), &spanned, |b, table| {
            b.iter(|| black_box(table.render()))
        });
    }

    group.finish();
}

fn bench_layout_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_phases");
    let table = wrapped_table(500);

    group.bench_function("expand", |b| b.iter(|| black_box(Grid::expand(&table))));

    let grid = Grid::expand(&table);
    group.bench_function("size_columns", |b| {
        b.iter(|| black_box(ColumnMetrics::compute(&grid, table.settings(), true)))
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_layout_phases);
criterion_main!(benches);
