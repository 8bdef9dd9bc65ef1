use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use glpk_core::{BoundKind, ColumnKind, Direction, ProblemData, SolveOptions};

/// A banded problem: row i touches columns i..i+5
fn banded(n: usize) -> ProblemData {
    let mut row_indices = Vec::with_capacity(5 * n);
    let mut col_indices = Vec::with_capacity(5 * n);
    let mut values = Vec::with_capacity(5 * n);
    for row in 0..n {
        for col in row..(row + 5).min(n) {
            row_indices.push(row);
            col_indices.push(col);
            values.push(1. + (row + col) as f64 / n as f64);
        }
    }
    ProblemData {
        direction: Direction::Minimize,
        objective: (0..n).map(|j| 1. + j as f64 % 7.).collect(),
        row_indices,
        col_indices,
        values,
        column_kinds: vec![ColumnKind::Continuous; n],
        column_lower: vec![0.; n],
        column_upper: vec![f64::INFINITY; n],
        row_lower: vec![1.; n],
        row_upper: vec![f64::INFINITY; n],
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let data = banded(100_000);
    c.bench_function("validate a 100_000 x 100_000 banded problem", |b| {
        b.iter(|| black_box(&data).validate().unwrap())
    });

    c.bench_function("classify 1M bound pairs", |b| {
        b.iter(|| {
            (0..1_000_000)
                .map(|i| {
                    let lower = if i % 3 == 0 { f64::NEG_INFINITY } else { 0. };
                    let upper = if i % 5 == 0 { f64::INFINITY } else { 1. };
                    BoundKind::classify(black_box(lower), black_box(upper)).code()
                })
                .sum::<i32>()
        })
    });

    if glpk_core::library_version().is_ok() {
        let data = banded(2_000);
        c.bench_function("load and solve a 2000 x 2000 banded problem", |b| {
            b.iter(|| {
                let mut problem = glpk_core::load_problem(&data).unwrap();
                problem.solve(&SolveOptions::default()).unwrap().objective_value
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
