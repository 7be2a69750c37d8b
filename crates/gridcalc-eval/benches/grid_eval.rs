use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gridcalc_common::{CellCoord, CellValue, FormulaExpr, Operator};
use gridcalc_eval::{EvalConfig, Evaluator, Grid, render_grid};

/// `n` x 4 grid: two number columns, a sum of them, and a formula that
/// reads the sum of the row above.
fn build_grid(n: u32) -> Grid {
    Grid::from_rows((0..n).map(|r| {
        vec![
            CellValue::Integer(r as i64),
            CellValue::Double(r as f64 * 0.5),
            FormulaExpr::CoordCoord {
                row1: r,
                col1: 0,
                row2: r,
                col2: 1,
                op: Operator::Add,
            }
            .into(),
            FormulaExpr::LitCoord {
                lit: 2.0,
                row: r.saturating_sub(1),
                col: 2,
                op: Operator::Mul,
                lit_is_left: true,
            }
            .into(),
        ]
    }))
}

/// Single column where each cell adds one to the cell below it.
fn build_chain(n: u32) -> Grid {
    Grid::from_rows((0..n).map(|r| {
        let cell = if r + 1 == n {
            CellValue::Integer(0)
        } else {
            FormulaExpr::LitCoord {
                lit: 1.0,
                row: r + 1,
                col: 0,
                op: Operator::Add,
                lit_is_left: false,
            }
            .into()
        };
        vec![cell]
    }))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("RenderGrid");
    for n in [100u32, 1000, 5000] {
        let grid = build_grid(n);
        group.bench_with_input(BenchmarkId::new("Rows", n), &grid, |b, grid| {
            b.iter(|| render_grid(black_box(grid), EvalConfig::default()))
        });
    }
    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("NestedChain");
    for depth in [8u32, 32, 64] {
        let grid = build_chain(depth);
        let config = EvalConfig::default().with_max_depth(depth as usize);
        group.bench_with_input(BenchmarkId::new("Depth", depth), &grid, |b, grid| {
            b.iter(|| {
                Evaluator::with_config(black_box(grid), config).evaluate_cell(CellCoord::new(0, 0))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render, bench_chain);
criterion_main!(benches);
