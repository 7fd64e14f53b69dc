use rand::rngs::StdRng;
use rand::SeedableRng;
use reward_scatter::prelude::*;
use reward_scatter_examples::{init_tracing, item_labels, render_schedule};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // 30 exploration slots, one plan with no bias and no constraints.
    let total_slots = 30;
    let plans = vec![PlanItem::new(ItemId(1), 8)];

    let runner = ScheduleRunner::try_new(ScheduleConfig::default())?;
    let mut rng = StdRng::seed_from_u64(seed_for_location(2025, 1));
    let schedule = runner.run(total_slots, &plans, &mut rng);

    let labels = item_labels(&[ItemId(1)]);
    println!("{}", render_schedule(&schedule, &labels));
    println!(
        "placed {} of 8 units over {} slots",
        schedule.total_quantity_of(ItemId(1)),
        total_slots
    );

    Ok(())
}
