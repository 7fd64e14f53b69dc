//! Planning module for defining reward plans and their distribution rules.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::schedule::ItemId;

/// Placement window, shaping and constraint parameters for one plan.
///
/// Rules come from externally authored configuration, so every field is
/// clamped or treated as disabled rather than rejected.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistributionRule {
    /// First slot index (inclusive) the plan may place into.
    pub earliest_index: usize,
    /// Last slot index (inclusive), or `None` for "through the last slot".
    pub latest_index: Option<usize>,
    /// Symmetric window bias in `[-1, 1]`: -1 favors the window start,
    /// 0 is centered, +1 favors the window end.
    pub mean: f32,
    /// Concentration of the bias; 0 means no preference (uniform).
    pub kappa: f32,
    /// Multiplicative bonus applied to designated peak slots; 0 disables peaks.
    pub peak_boost: f32,
    /// Unit capacity of each peak slot; 0 disables peaks.
    pub peak_max_per_slot: u32,
    /// Minimum index gap between two placements of the same plan's item;
    /// 0 disables the constraint.
    pub min_distance_between_same: usize,
}

impl Default for DistributionRule {
    fn default() -> Self {
        Self {
            earliest_index: 0,
            latest_index: None,
            mean: 0.0,
            kappa: 0.0,
            peak_boost: 0.0,
            peak_max_per_slot: 0,
            min_distance_between_same: 0,
        }
    }
}

impl DistributionRule {
    /// Creates a rule with no bias and no constraints over the whole sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive window bounds. `latest` of `None` means "last slot".
    pub fn with_window(mut self, earliest: usize, latest: Option<usize>) -> Self {
        self.earliest_index = earliest;
        self.latest_index = latest;
        self
    }

    /// Sets the shaping bias and concentration.
    pub fn with_shape(mut self, mean: f32, kappa: f32) -> Self {
        self.mean = mean;
        self.kappa = kappa;
        self
    }

    /// Sets the peak bonus and per-peak unit capacity.
    pub fn with_peaks(mut self, boost: f32, max_per_slot: u32) -> Self {
        self.peak_boost = boost;
        self.peak_max_per_slot = max_per_slot;
        self
    }

    /// Sets the minimum gap between placements of the same item.
    pub fn with_min_distance(mut self, distance: usize) -> Self {
        self.min_distance_between_same = distance;
        self
    }

    /// Whether peak designation is active for this rule.
    pub fn peaks_enabled(&self) -> bool {
        self.peak_boost > 0.0 && self.peak_max_per_slot > 0
    }

    /// Resolves the inclusive `(earliest, latest)` window against a slot count.
    ///
    /// The earliest bound is clamped into `[0, total_slots - 1]`; a `latest_index`
    /// of `None` resolves to the last slot and an explicit bound is clamped into
    /// `[earliest, total_slots - 1]`. Only `total_slots == 0` leaves no window.
    pub fn resolve_window(&self, total_slots: usize) -> Option<(usize, usize)> {
        if total_slots == 0 {
            return None;
        }
        let earliest = self.earliest_index.min(total_slots - 1);
        let latest = match self.latest_index {
            None => total_slots - 1,
            Some(latest) => latest.clamp(earliest, total_slots - 1),
        };
        Some((earliest, latest))
    }
}

/// A request to distribute `quantity` units of one item across slots.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanItem {
    /// Item to place.
    pub item: ItemId,
    /// Total number of discrete units to place.
    pub quantity: u32,
    /// Distribution rule governing where the units may land.
    pub rule: DistributionRule,
}

impl PlanItem {
    /// Creates a plan with the default (unconstrained, uniform) rule.
    pub fn new(item: ItemId, quantity: u32) -> Self {
        Self {
            item,
            quantity,
            rule: DistributionRule::default(),
        }
    }

    /// Replaces the distribution rule.
    pub fn with_rule(mut self, rule: DistributionRule) -> Self {
        self.rule = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_builder_sets_fields() {
        let rule = DistributionRule::new()
            .with_window(2, Some(8))
            .with_shape(-0.5, 3.0)
            .with_peaks(4.0, 2)
            .with_min_distance(3);

        assert_eq!(rule.earliest_index, 2);
        assert_eq!(rule.latest_index, Some(8));
        assert_eq!(rule.mean, -0.5);
        assert_eq!(rule.kappa, 3.0);
        assert!(rule.peaks_enabled());
        assert_eq!(rule.min_distance_between_same, 3);
    }

    #[test]
    fn peaks_require_both_boost_and_capacity() {
        assert!(!DistributionRule::new().with_peaks(2.0, 0).peaks_enabled());
        assert!(!DistributionRule::new().with_peaks(0.0, 3).peaks_enabled());
        assert!(DistributionRule::new().with_peaks(2.0, 3).peaks_enabled());
    }

    #[test]
    fn window_resolves_to_last_slot_without_explicit_latest() {
        let rule = DistributionRule::new().with_window(3, None);
        assert_eq!(rule.resolve_window(10), Some((3, 9)));
    }

    #[test]
    fn window_clamps_out_of_range_bounds() {
        let rule = DistributionRule::new().with_window(50, Some(80));
        assert_eq!(rule.resolve_window(10), Some((9, 9)));

        let rule = DistributionRule::new().with_window(4, Some(2));
        assert_eq!(rule.resolve_window(10), Some((4, 4)));
    }

    #[test]
    fn window_is_none_only_for_zero_slots() {
        let rule = DistributionRule::default();
        assert_eq!(rule.resolve_window(0), None);
        assert_eq!(rule.resolve_window(1), Some((0, 0)));
    }

    #[test]
    fn plan_builder_attaches_rule() {
        let plan = PlanItem::new(ItemId(5), 7)
            .with_rule(DistributionRule::new().with_min_distance(2));
        assert_eq!(plan.item, ItemId(5));
        assert_eq!(plan.quantity, 7);
        assert_eq!(plan.rule.min_distance_between_same, 2);
    }
}
