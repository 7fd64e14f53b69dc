use rand::rngs::StdRng;
use rand::SeedableRng;
use reward_scatter::prelude::*;
use reward_scatter_examples::{init_tracing, item_labels, render_schedule};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let total_slots = 36;
    let labels = item_labels(&[ItemId(1)]);
    let runner = ScheduleRunner::try_new(ScheduleConfig::default())?;

    // Feasible spacing first, then a window too tight for the distance so
    // the scheduler has to relax.
    for (name, rule) in [
        (
            "feasible spacing (distance 4)",
            DistributionRule::new().with_min_distance(4),
        ),
        (
            "infeasible spacing (6 units, distance 8, 12-slot window)",
            DistributionRule::new().with_window(0, Some(11)).with_min_distance(8),
        ),
    ] {
        let plans = vec![PlanItem::new(ItemId(1), 6).with_rule(rule)];

        let mut rng = StdRng::seed_from_u64(13);
        let mut sink = VecSink::new();
        let schedule = runner.run_with_events(total_slots, &plans, &mut rng, &mut sink);

        let relaxations = sink
            .as_slice()
            .iter()
            .filter(|e| matches!(e, ScheduleEvent::ConstraintsRelaxed { .. }))
            .count();

        println!("{name}");
        println!("{}", render_schedule(&schedule, &labels));
        println!("relaxations: {relaxations}\n");
    }

    Ok(())
}
