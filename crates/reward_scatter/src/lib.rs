#![forbid(unsafe_code)]
//! reward_scatter: Deterministic per-slot reward scheduling for exploration-style gameplay.
//!
//! Modules:
//! - shape: unimodal density shaping over a placement window
//! - sampling: weighted index draws (single and without replacement)
//! - schedule: plans, rules, runner, events, and the resulting per-slot schedule
//!
//! For examples and docs, see README and docs.rs.
pub mod error;
pub mod sampling;
pub mod schedule;
pub mod shape;

/// Convenient re-exports for common types. Import with `use reward_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::sampling::{pick_distinct_weighted, pick_weighted_index};
    pub use crate::schedule::events::{
        EventSink, FnSink, MultiSink, ScheduleEvent, ScheduleEventKind, VecSink,
    };
    pub use crate::schedule::plan::{DistributionRule, PlanItem};
    pub use crate::schedule::runner::{
        build_schedule, build_schedule_with_events, ScheduleConfig, ScheduleRunner,
    };
    pub use crate::schedule::{seed_for_location, ItemId, Schedule, SlotEntry};
    pub use crate::shape::{normalized_position, shape_weight};
}
