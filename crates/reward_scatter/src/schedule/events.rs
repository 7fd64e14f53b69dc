//! Event types and sinks for observing schedule generation.
//!
//! This module defines [`ScheduleEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while executing
//! [`crate::schedule::runner::build_schedule_with_events`] or
//! [`crate::schedule::runner::ScheduleRunner::run_with_events`].
use crate::schedule::ItemId;

/// Describes events emitted while a schedule is generated.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScheduleEvent {
    /// Emitted when schedule generation starts.
    RunStarted {
        /// Number of slots in the schedule under construction.
        total_slots: usize,
        /// Number of plans supplied by the caller.
        plan_count: usize,
    },

    /// Emitted when schedule generation finishes.
    RunFinished {
        /// Units placed across all plans.
        placed_total: u32,
        /// Units requested across all plans.
        requested_total: u32,
    },

    /// Emitted when a plan's placement loop starts.
    PlanStarted {
        /// Index of the plan in the caller-supplied order.
        index: usize,
        /// Item the plan distributes.
        item: ItemId,
        /// Units the plan wants to place.
        quantity: u32,
        /// Resolved inclusive slot window.
        window: (usize, usize),
    },

    /// Emitted when a plan's placement loop ends.
    PlanFinished {
        /// Index of the plan in the caller-supplied order.
        index: usize,
        /// Item the plan distributes.
        item: ItemId,
        /// Units actually placed.
        placed: u32,
        /// Units left unplaced under the constraints.
        undelivered: u32,
    },

    /// Emitted after peak slots were designated for a plan.
    PeaksDesignated {
        /// Index of the plan in the caller-supplied order.
        index: usize,
        /// Item the plan distributes.
        item: ItemId,
        /// Absolute slot indices of the designated peaks.
        slots: Vec<usize>,
    },

    /// Emitted for every unit committed to a slot.
    UnitPlaced {
        /// Index of the plan in the caller-supplied order.
        index: usize,
        /// Item that was placed.
        item: ItemId,
        /// Absolute slot index the unit landed on.
        slot: usize,
        /// Whether this draw ran with soft constraints dropped.
        relaxed: bool,
    },

    /// Emitted when a plan's weights collapsed and soft constraints were dropped.
    ConstraintsRelaxed {
        /// Index of the plan in the caller-supplied order.
        index: usize,
        /// Item the plan distributes.
        item: ItemId,
        /// Units still unplaced at the moment of relaxation.
        remaining: u32,
    },

    /// Non-fatal warning generated during scheduling.
    Warning {
        /// Context string (e.g. plan index, item id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of a [`ScheduleEvent`], used by sinks to filter cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEventKind {
    RunStarted,
    RunFinished,
    PlanStarted,
    PlanFinished,
    PeaksDesignated,
    UnitPlaced,
    ConstraintsRelaxed,
    Warning,
}

impl ScheduleEvent {
    /// The kind of this event.
    pub fn kind(&self) -> ScheduleEventKind {
        match self {
            ScheduleEvent::RunStarted { .. } => ScheduleEventKind::RunStarted,
            ScheduleEvent::RunFinished { .. } => ScheduleEventKind::RunFinished,
            ScheduleEvent::PlanStarted { .. } => ScheduleEventKind::PlanStarted,
            ScheduleEvent::PlanFinished { .. } => ScheduleEventKind::PlanFinished,
            ScheduleEvent::PeaksDesignated { .. } => ScheduleEventKind::PeaksDesignated,
            ScheduleEvent::UnitPlaced { .. } => ScheduleEventKind::UnitPlaced,
            ScheduleEvent::ConstraintsRelaxed { .. } => ScheduleEventKind::ConstraintsRelaxed,
            ScheduleEvent::Warning { .. } => ScheduleEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ScheduleEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScheduleEvent);

    /// Whether the sink cares about events of `kind`. Emitters may skip
    /// constructing events a sink does not want.
    fn wants(&self, _kind: ScheduleEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ScheduleEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScheduleEvent) {}

    #[inline]
    fn wants(&self, _kind: ScheduleEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ScheduleEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScheduleEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScheduleEvent),
{
    #[inline]
    fn send(&mut self, event: ScheduleEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScheduleEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
        }
    }

    pub fn into_inner(self) -> Vec<ScheduleEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScheduleEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ScheduleEvent) {
        if self.sinks.is_empty() {
            return;
        }
        let last_idx = self.sinks.len() - 1;
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: ScheduleEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
