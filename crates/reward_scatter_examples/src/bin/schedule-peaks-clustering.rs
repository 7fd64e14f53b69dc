use rand::rngs::StdRng;
use rand::SeedableRng;
use reward_scatter::prelude::*;
use reward_scatter_examples::{init_tracing, item_labels, render_schedule};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let total_slots = 48;
    let labels = item_labels(&[ItemId(1)]);
    let runner = ScheduleRunner::try_new(ScheduleConfig::default())?;

    for (name, rule) in [
        ("no peaks", DistributionRule::new()),
        // 16 units / capacity 4 => 4 designated peak slots.
        ("boosted peaks", DistributionRule::new().with_peaks(10.0, 4)),
    ] {
        let plans = vec![PlanItem::new(ItemId(1), 16).with_rule(rule)];

        let mut rng = StdRng::seed_from_u64(99);
        let mut sink = VecSink::new();
        let schedule = runner.run_with_events(total_slots, &plans, &mut rng, &mut sink);

        println!("{name}");
        println!("{}", render_schedule(&schedule, &labels));
        for event in sink.as_slice() {
            if let ScheduleEvent::PeaksDesignated { slots, .. } = event {
                println!("peaks at {slots:?}");
            }
        }
        println!();
    }

    Ok(())
}
