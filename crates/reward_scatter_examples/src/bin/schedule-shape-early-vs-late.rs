use rand::rngs::StdRng;
use rand::SeedableRng;
use reward_scatter::prelude::*;
use reward_scatter_examples::{init_tracing, item_labels, render_schedule};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let total_slots = 40;
    let labels = item_labels(&[ItemId(1)]);
    let runner = ScheduleRunner::try_new(ScheduleConfig::default())?;

    // Same concentration, opposite bias: mass shifts from the front of the
    // sequence to the back.
    for (name, mean) in [("early (mean = -0.8)", -0.8), ("late (mean = 0.8)", 0.8)] {
        let plans = vec![PlanItem::new(ItemId(1), 12)
            .with_rule(DistributionRule::new().with_shape(mean, 6.0))];

        let mut rng = StdRng::seed_from_u64(7);
        let schedule = runner.run(total_slots, &plans, &mut rng);

        println!("{name}");
        println!("{}\n", render_schedule(&schedule, &labels));
    }

    Ok(())
}
