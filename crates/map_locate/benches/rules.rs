use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::DVec2;
use map_locate::prelude::{run_plan, Axis, GeoGrid, Plan, Polyline, Rule};

const GRID_SIDES: [usize; 3] = [32, 100, 200];

fn berlin_plan() -> Plan {
    let river = Polyline::try_new(vec![
        DVec2::new(13.20, 52.53),
        DVec2::new(13.40, 52.52),
        DVec2::new(13.45, 52.50),
        DVec2::new(13.60, 52.45),
    ])
    .expect("valid polyline");

    Plan::new()
        .with_rule(Rule::near_polyline("river", river, 0.0, 2730.0 / 2.0))
        .with_rule(
            Rule::near_point("gate", DVec2::new(13.377689, 52.516288), 4700.0, 3877.0)
                .expect("valid targets"),
        )
}

fn grid(side: usize) -> GeoGrid {
    GeoGrid::new(
        Axis::new(52.0, 53.0, side),
        Axis::new(12.8, 14.2, side),
    )
}

fn rule_evaluation_benches(c: &mut Criterion) {
    let plan = berlin_plan();

    let mut group = c.benchmark_group("rules/evaluate");
    for &side in &GRID_SIDES {
        let grid = grid(side);
        group.throughput(Throughput::Elements((grid.len() * plan.rules.len()) as u64));

        for rule in &plan.rules {
            group.bench_with_input(
                BenchmarkId::new(rule.id.clone(), side),
                &side,
                |b, _| {
                    b.iter(|| {
                        let field = rule.evaluate(black_box(grid.points()));
                        black_box(field.len());
                    });
                },
            );
        }
    }
    group.finish();
}

fn plan_run_benches(c: &mut Criterion) {
    let plan = berlin_plan();

    let mut group = c.benchmark_group("rules/run_plan");
    for &side in &GRID_SIDES {
        let grid = grid(side);
        group.throughput(Throughput::Elements(grid.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                let result = run_plan(black_box(&plan), black_box(&grid)).expect("plan runs");
                black_box(result.combined.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, rule_evaluation_benches, plan_run_benches);
criterion_main!(benches);
