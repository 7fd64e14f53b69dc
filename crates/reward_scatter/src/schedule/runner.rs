//! High-level runner for building per-slot reward schedules from plans.
use std::collections::HashMap;

use rand::RngCore;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::sampling::{pick_distinct_weighted, pick_weighted_index};
use crate::schedule::events::{EventSink, ScheduleEvent, ScheduleEventKind};
use crate::schedule::plan::PlanItem;
use crate::schedule::Schedule;
use crate::shape::{normalized_position, shape_weight};

/// Configuration for building a schedule.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Placement attempts allowed per plan, as a multiple of its quantity.
    /// The cap bounds termination under adversarial constraint combinations;
    /// plans that hit it under-deliver instead of looping.
    pub attempt_factor: u32,
    /// Floor applied to shape output so no window slot is permanently
    /// excluded by the shape alone.
    pub weight_floor: f32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            attempt_factor: 20,
            weight_floor: 1e-6,
        }
    }
}

impl ScheduleConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-plan attempt cap multiplier.
    pub fn with_attempt_factor(mut self, attempt_factor: u32) -> Self {
        self.attempt_factor = attempt_factor;
        self
    }

    /// Sets the shape weight floor.
    pub fn with_weight_floor(mut self, weight_floor: f32) -> Self {
        self.weight_floor = weight_floor;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.attempt_factor == 0 {
            return Err(Error::InvalidConfig("attempt_factor must be >= 1".into()));
        }
        if !self.weight_floor.is_finite() || self.weight_floor <= 0.0 {
            return Err(Error::InvalidConfig(
                "weight_floor must be finite and > 0".into(),
            ));
        }

        Ok(())
    }
}

/// Builds schedules from plans under a fixed configuration.
pub struct ScheduleRunner {
    /// Configuration applied to every run.
    pub config: ScheduleConfig,
}

impl ScheduleRunner {
    pub fn try_new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn new(config: ScheduleConfig) -> Self {
        debug_assert!(config.attempt_factor >= 1, "attempt_factor must be >= 1");
        debug_assert!(
            config.weight_floor.is_finite() && config.weight_floor > 0.0,
            "weight_floor must be finite and > 0"
        );

        Self { config }
    }

    /// Builds a schedule for the given plans, in caller order.
    pub fn run<R: RngCore>(&self, total_slots: usize, plans: &[PlanItem], rng: &mut R) -> Schedule {
        build_schedule_with_events(total_slots, plans, &self.config, rng, &mut ())
    }

    pub fn run_with_events<R: RngCore>(
        &self,
        total_slots: usize,
        plans: &[PlanItem],
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Schedule {
        build_schedule_with_events(total_slots, plans, &self.config, rng, sink)
    }
}

/// Builds a schedule under the default configuration.
///
/// Plans claim slots in the order supplied: earlier plans constrain later
/// ones. A fixed `(total_slots, plans, seed)` triple always reproduces the
/// identical schedule.
pub fn build_schedule<R: RngCore>(
    total_slots: usize,
    plans: &[PlanItem],
    rng: &mut R,
) -> Schedule {
    build_schedule_with_events(total_slots, plans, &ScheduleConfig::default(), rng, &mut ())
}

/// Builds a schedule, emitting [`ScheduleEvent`]s to `sink` along the way.
pub fn build_schedule_with_events<R: RngCore>(
    total_slots: usize,
    plans: &[PlanItem],
    config: &ScheduleConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Schedule {
    if sink.wants(ScheduleEventKind::RunStarted) {
        sink.send(ScheduleEvent::RunStarted {
            total_slots,
            plan_count: plans.len(),
        });
    }

    let mut schedule = Schedule::empty(total_slots);

    if total_slots == 0 {
        if sink.wants(ScheduleEventKind::RunFinished) {
            sink.send(ScheduleEvent::RunFinished {
                placed_total: 0,
                requested_total: plans.iter().map(|p| p.quantity).sum(),
            });
        }
        return schedule;
    }

    if plans.is_empty() {
        warn!("Schedule has no plans; every slot stays empty.");
        if sink.wants(ScheduleEventKind::Warning) {
            sink.send(ScheduleEvent::Warning {
                context: "run".into(),
                message: "Schedule has no plans; every slot stays empty".into(),
            });
        }
    }

    let mut placed_total = 0u32;
    for (plan_index, plan) in plans.iter().enumerate() {
        info!(
            "Plan {}: item {:?} | quantity {}.",
            plan_index, plan.item, plan.quantity
        );
        placed_total += place_plan(&mut schedule, plan_index, plan, config, rng, sink);
    }

    if sink.wants(ScheduleEventKind::RunFinished) {
        sink.send(ScheduleEvent::RunFinished {
            placed_total,
            requested_total: plans.iter().map(|p| p.quantity).sum(),
        });
    }

    schedule
}

/// Places one plan's units into the schedule, returning how many landed.
fn place_plan<R: RngCore>(
    schedule: &mut Schedule,
    plan_index: usize,
    plan: &PlanItem,
    config: &ScheduleConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> u32 {
    let rule = &plan.rule;

    if plan.quantity == 0 {
        warn!("Plan {} has zero quantity; skipping.", plan_index);
        if sink.wants(ScheduleEventKind::Warning) {
            sink.send(ScheduleEvent::Warning {
                context: format!("plan:{plan_index}"),
                message: "Plan has zero quantity; skipping".into(),
            });
        }
        return 0;
    }

    let Some((start, end)) = rule.resolve_window(schedule.len()) else {
        warn!("Plan {} has no placement window; skipping.", plan_index);
        if sink.wants(ScheduleEventKind::Warning) {
            sink.send(ScheduleEvent::Warning {
                context: format!("plan:{plan_index}"),
                message: "Plan has no placement window; skipping".into(),
            });
        }
        return 0;
    };
    let window_len = end - start + 1;

    if sink.wants(ScheduleEventKind::PlanStarted) {
        sink.send(ScheduleEvent::PlanStarted {
            index: plan_index,
            item: plan.item,
            quantity: plan.quantity,
            window: (start, end),
        });
    }

    // Shape weights over the window; floored so the shape alone never
    // excludes a slot.
    let weights_base: Vec<f32> = (0..window_len)
        .map(|j| {
            let p = normalized_position(j, window_len);
            shape_weight(p, rule.mean, rule.kappa).max(config.weight_floor)
        })
        .collect();

    // Peak designation: K distinct slots drawn over the base weights, each
    // with a hard unit capacity.
    let mut peak_capacity: HashMap<usize, u32> = HashMap::new();
    if rule.peaks_enabled() {
        let k = ((plan.quantity / rule.peak_max_per_slot).max(1) as usize).min(window_len);
        let peaks = pick_distinct_weighted(&weights_base, k, rng);
        for offset in &peaks {
            peak_capacity.insert(start + offset, rule.peak_max_per_slot);
        }
        if sink.wants(ScheduleEventKind::PeaksDesignated) {
            sink.send(ScheduleEvent::PeaksDesignated {
                index: plan_index,
                item: plan.item,
                slots: peaks.iter().map(|offset| start + offset).collect(),
            });
        }
    }

    let mut used_slots: Vec<usize> = Vec::new();
    let mut weights_now = vec![0.0f32; window_len];
    let mut remaining = plan.quantity;
    let max_attempts = plan.quantity as u64 * config.attempt_factor as u64;
    let mut attempts = 0u64;

    while remaining > 0 && attempts < max_attempts {
        attempts += 1;

        let mut sum = 0.0f32;
        for (j, weight) in weights_now.iter_mut().enumerate() {
            let slot = start + j;
            *weight = 0.0;

            if rule.min_distance_between_same > 0
                && used_slots
                    .iter()
                    .any(|&used| used.abs_diff(slot) < rule.min_distance_between_same)
            {
                continue;
            }
            if occupied_by_other(schedule, slot, plan) {
                continue;
            }

            *weight = match peak_capacity.get(&slot) {
                Some(0) => 0.0,
                Some(_) => weights_base[j] * (1.0 + rule.peak_boost),
                None => weights_base[j],
            }
            .max(0.0);
            sum += *weight;
        }

        // All candidates blocked: drop the distance and peak constraints and
        // fall back to a uniform draw over slots not claimed by another item.
        let mut relaxed = false;
        if sum <= 0.0 {
            sum = 0.0;
            for (j, weight) in weights_now.iter_mut().enumerate() {
                let slot = start + j;
                *weight = if occupied_by_other(schedule, slot, plan) {
                    0.0
                } else {
                    1.0
                };
                sum += *weight;
            }
            if sum <= 0.0 {
                break;
            }
            relaxed = true;
            if sink.wants(ScheduleEventKind::ConstraintsRelaxed) {
                sink.send(ScheduleEvent::ConstraintsRelaxed {
                    index: plan_index,
                    item: plan.item,
                    remaining,
                });
            }
        }

        let Some(pick) = pick_weighted_index(&weights_now, sum, rng) else {
            break;
        };
        let slot = start + pick;

        let entry = schedule.slot_mut(slot);
        match entry.item {
            None => {
                entry.item = Some(plan.item);
                entry.quantity = 1;
            }
            Some(_) => {
                // Same item by construction; a foreign slot carries zero weight.
                entry.quantity += 1;
            }
        }

        used_slots.push(slot);
        remaining -= 1;

        if let Some(capacity) = peak_capacity.get_mut(&slot) {
            *capacity = capacity.saturating_sub(1);
        }

        if sink.wants(ScheduleEventKind::UnitPlaced) {
            sink.send(ScheduleEvent::UnitPlaced {
                index: plan_index,
                item: plan.item,
                slot,
                relaxed,
            });
        }
    }

    let placed = plan.quantity - remaining;
    if remaining > 0 {
        warn!(
            "Plan {} under-delivered: {} of {} units placed.",
            plan_index, placed, plan.quantity
        );
        if sink.wants(ScheduleEventKind::Warning) {
            sink.send(ScheduleEvent::Warning {
                context: format!("plan:{plan_index}"),
                message: format!(
                    "Plan under-delivered: {} of {} units placed",
                    placed, plan.quantity
                ),
            });
        }
    }

    if sink.wants(ScheduleEventKind::PlanFinished) {
        sink.send(ScheduleEvent::PlanFinished {
            index: plan_index,
            item: plan.item,
            placed,
            undelivered: remaining,
        });
    }

    placed
}

#[inline]
fn occupied_by_other(schedule: &Schedule, slot: usize, plan: &PlanItem) -> bool {
    matches!(
        schedule.get(slot).and_then(|entry| entry.item),
        Some(item) if item != plan.item
    )
}
