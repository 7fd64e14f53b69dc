mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reward_scatter::prelude::*;

const SLOT_COUNTS: [usize; 3] = [32, 256, 1024];

fn make_plans(total_slots: usize) -> Vec<PlanItem> {
    let quantity = (total_slots / 8).max(1) as u32;
    vec![
        PlanItem::new(ItemId(1), quantity)
            .with_rule(DistributionRule::new().with_shape(-0.5, 4.0)),
        PlanItem::new(ItemId(2), quantity)
            .with_rule(DistributionRule::new().with_peaks(6.0, 2)),
        PlanItem::new(ItemId(3), quantity)
            .with_rule(DistributionRule::new().with_min_distance(2)),
    ]
}

fn schedule_build_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule/build");

    for &total_slots in &SLOT_COUNTS {
        let plans = make_plans(total_slots);
        let requested: u32 = plans.iter().map(|p| p.quantity).sum();
        group.throughput(common::elements_throughput(requested as usize));

        let mut rng = StdRng::seed_from_u64(0xC0FFEE ^ total_slots as u64);
        group.bench_with_input(
            BenchmarkId::from_parameter(total_slots),
            &total_slots,
            |b, _| {
                b.iter(|| {
                    let schedule = build_schedule(total_slots, &plans, &mut rng);
                    black_box(schedule.occupied_count());
                });
            },
        );
    }

    group.finish();
}

fn schedule_constrained_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule/build_constrained");

    // Spacing tight enough to force regular relaxation.
    for &total_slots in &[64usize, 512] {
        let plans = vec![PlanItem::new(ItemId(7), (total_slots / 4) as u32)
            .with_rule(DistributionRule::new().with_min_distance(8).with_peaks(4.0, 1))];
        group.throughput(common::elements_throughput(total_slots / 4));

        let mut rng = StdRng::seed_from_u64(0xBADC0DE ^ total_slots as u64);
        group.bench_with_input(
            BenchmarkId::from_parameter(total_slots),
            &total_slots,
            |b, _| {
                b.iter(|| {
                    let schedule = build_schedule(total_slots, &plans, &mut rng);
                    black_box(schedule.occupied_count());
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = schedule_build_benches, schedule_constrained_benches
}
criterion_main!(benches);
