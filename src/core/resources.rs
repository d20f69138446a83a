//! Resource ledger: the five-field resource vector and signed deltas.
//!
//! ## Fields
//!
//! - `money`: no hard ceiling
//! - `health`, `knowledge`, `experience`: nominally 0-100 by content, never
//!   clamped here
//! - `time`: years remaining, floored at 0 when duration is consumed
//!
//! All values are `i64`. The ledger is pure: every operation returns a new
//! vector and none of them can fail. Callers check [`ResourceVector::affordable`]
//! before applying a cost.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Identifies one field of the resource vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Money,
    Health,
    Knowledge,
    Experience,
    Time,
}

impl ResourceKind {
    /// All kinds in display order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Money,
        ResourceKind::Health,
        ResourceKind::Knowledge,
        ResourceKind::Experience,
        ResourceKind::Time,
    ];
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Money => "money",
            ResourceKind::Health => "health",
            ResourceKind::Knowledge => "knowledge",
            ResourceKind::Experience => "experience",
            ResourceKind::Time => "time",
        };
        f.write_str(name)
    }
}

/// The player's resources.
///
/// ## Example
///
/// ```
/// use journey_engine::core::{ResourceDelta, ResourceVector};
///
/// let start = ResourceVector::new(100, 100, 0, 0, 30);
/// let cost = ResourceDelta::new().money(-20);
///
/// assert!(start.affordable(&cost));
/// assert_eq!(start.apply(&cost).money, 80);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceVector {
    pub money: i64,
    pub health: i64,
    pub knowledge: i64,
    pub experience: i64,
    /// Years remaining.
    pub time: i64,
}

impl ResourceVector {
    #[must_use]
    pub const fn new(money: i64, health: i64, knowledge: i64, experience: i64, time: i64) -> Self {
        Self {
            money,
            health,
            knowledge,
            experience,
            time,
        }
    }

    /// Read a single field.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Money => self.money,
            ResourceKind::Health => self.health,
            ResourceKind::Knowledge => self.knowledge,
            ResourceKind::Experience => self.experience,
            ResourceKind::Time => self.time,
        }
    }

    fn slot(&mut self, kind: ResourceKind) -> &mut i64 {
        match kind {
            ResourceKind::Money => &mut self.money,
            ResourceKind::Health => &mut self.health,
            ResourceKind::Knowledge => &mut self.knowledge,
            ResourceKind::Experience => &mut self.experience,
            ResourceKind::Time => &mut self.time,
        }
    }

    /// Add a delta field by field. Absent fields leave the value unchanged.
    ///
    /// No clamping is applied, so a field may go negative. Sums saturate at
    /// the `i64` bounds.
    #[must_use]
    pub fn apply(&self, delta: &ResourceDelta) -> Self {
        let mut next = *self;
        for (kind, amount) in delta.entries() {
            let slot = next.slot(kind);
            *slot = slot.saturating_add(amount);
        }
        next
    }

    /// Spend `years` of the time budget, flooring at 0.
    #[must_use]
    pub fn consume_time(&self, years: u32) -> Self {
        Self {
            time: self.time.saturating_sub(i64::from(years)).max(0),
            ..*self
        }
    }

    /// Check whether applying `cost` keeps every present field non-negative.
    ///
    /// Only the cost is considered; a paired reward never rescues an
    /// unaffordable cost.
    #[must_use]
    pub fn affordable(&self, cost: &ResourceDelta) -> bool {
        cost.entries().all(|(kind, amount)| self.get(kind).saturating_add(amount) >= 0)
    }

    /// The fields for which `cost` is unaffordable.
    #[must_use]
    pub fn shortfalls(&self, cost: &ResourceDelta) -> Vec<ResourceKind> {
        cost.entries()
            .filter(|&(kind, amount)| self.get(kind).saturating_add(amount) < 0)
            .map(|(kind, _)| kind)
            .collect()
    }

    /// Per-field difference `self - before`, omitting unchanged fields.
    #[must_use]
    pub fn diff(&self, before: &ResourceVector) -> ResourceDelta {
        let mut delta = ResourceDelta::new();
        for kind in ResourceKind::ALL {
            let change = self.get(kind).saturating_sub(before.get(kind));
            if change != 0 {
                delta.set(kind, change);
            }
        }
        delta
    }
}

/// Equivalent of [`ResourceVector::affordable`] for callers that pre-check
/// a decision before submitting it.
#[must_use]
pub fn has_enough_resources(resources: &ResourceVector, cost: &ResourceDelta) -> bool {
    resources.affordable(cost)
}

/// A signed change to a [`ResourceVector`].
///
/// Every field is optional; `None` means no change. Costs are usually
/// expressed with negative values, rewards with positive ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
}

impl ResourceDelta {
    /// An empty delta.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            money: None,
            health: None,
            knowledge: None,
            experience: None,
            time: None,
        }
    }

    #[must_use]
    pub const fn money(mut self, amount: i64) -> Self {
        self.money = Some(amount);
        self
    }

    #[must_use]
    pub const fn health(mut self, amount: i64) -> Self {
        self.health = Some(amount);
        self
    }

    #[must_use]
    pub const fn knowledge(mut self, amount: i64) -> Self {
        self.knowledge = Some(amount);
        self
    }

    #[must_use]
    pub const fn experience(mut self, amount: i64) -> Self {
        self.experience = Some(amount);
        self
    }

    #[must_use]
    pub const fn time(mut self, amount: i64) -> Self {
        self.time = Some(amount);
        self
    }

    /// Read a field, `None` if absent.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> Option<i64> {
        match kind {
            ResourceKind::Money => self.money,
            ResourceKind::Health => self.health,
            ResourceKind::Knowledge => self.knowledge,
            ResourceKind::Experience => self.experience,
            ResourceKind::Time => self.time,
        }
    }

    /// Set a field.
    pub fn set(&mut self, kind: ResourceKind, amount: i64) {
        let slot = match kind {
            ResourceKind::Money => &mut self.money,
            ResourceKind::Health => &mut self.health,
            ResourceKind::Knowledge => &mut self.knowledge,
            ResourceKind::Experience => &mut self.experience,
            ResourceKind::Time => &mut self.time,
        };
        *slot = Some(amount);
    }

    /// Iterate over present fields.
    pub fn entries(&self) -> impl Iterator<Item = (ResourceKind, i64)> + '_ {
        ResourceKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|amount| (kind, amount)))
    }

    /// True if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

impl Add for ResourceDelta {
    type Output = ResourceDelta;

    /// Field-wise sum. A field is present if it is present on either side.
    fn add(self, rhs: ResourceDelta) -> ResourceDelta {
        let mut out = self;
        out += rhs;
        out
    }
}

impl AddAssign for ResourceDelta {
    fn add_assign(&mut self, rhs: ResourceDelta) {
        for (kind, amount) in rhs.entries() {
            let current = self.get(kind).unwrap_or(0);
            self.set(kind, current.saturating_add(amount));
        }
    }
}

impl std::iter::Sum for ResourceDelta {
    fn sum<I: Iterator<Item = ResourceDelta>>(iter: I) -> Self {
        iter.fold(ResourceDelta::new(), |acc, d| acc + d)
    }
}

impl std::fmt::Display for ResourceDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (kind, amount) in self.entries() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{kind} {amount:+}")?;
            first = false;
        }
        if first {
            f.write_str("no change")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> ResourceVector {
        ResourceVector::new(100, 100, 0, 0, 30)
    }

    #[test]
    fn test_apply_adds_present_fields_only() {
        let delta = ResourceDelta::new().money(-20).knowledge(15);
        let next = start().apply(&delta);

        assert_eq!(next, ResourceVector::new(80, 100, 15, 0, 30));
    }

    #[test]
    fn test_apply_does_not_clamp() {
        let next = start().apply(&ResourceDelta::new().knowledge(-8).health(-150));

        assert_eq!(next.knowledge, -8);
        assert_eq!(next.health, -50);
    }

    #[test]
    fn test_extreme_amounts_saturate() {
        let rich = start().apply(&ResourceDelta::new().money(i64::MAX).health(i64::MIN));
        assert_eq!(rich.money, i64::MAX);
        assert_eq!(rich.health, i64::MIN);

        let broke = ResourceVector::new(i64::MIN, 0, 0, 0, i64::MIN);
        assert!(!broke.affordable(&ResourceDelta::new().money(-1)));
        assert_eq!(broke.shortfalls(&ResourceDelta::new().money(i64::MIN)), vec![ResourceKind::Money]);
        assert_eq!(broke.consume_time(5).time, 0);
        assert_eq!(rich.diff(&broke).money, Some(i64::MAX));

        let total = ResourceDelta::new().money(i64::MAX) + ResourceDelta::new().money(1);
        assert_eq!(total.money, Some(i64::MAX));
    }

    #[test]
    fn test_consume_time_floors_at_zero() {
        let r = start();
        assert_eq!(r.consume_time(2).time, 28);
        assert_eq!(r.consume_time(45).time, 0);
        assert_eq!(r.consume_time(0), r);
    }

    #[test]
    fn test_affordable_checks_cost_in_isolation() {
        let r = ResourceVector::new(10, 100, 0, 0, 30);

        assert!(r.affordable(&ResourceDelta::new().money(-10)));
        assert!(!r.affordable(&ResourceDelta::new().money(-11)));
        // Zero and absent fields are trivially affordable
        assert!(r.affordable(&ResourceDelta::new().knowledge(0)));
        assert!(r.affordable(&ResourceDelta::new()));
        assert!(has_enough_resources(&r, &ResourceDelta::new().health(-100)));
    }

    #[test]
    fn test_shortfalls() {
        let r = ResourceVector::new(10, 5, 0, 0, 30);
        let cost = ResourceDelta::new().money(-20).health(-5).knowledge(-1);

        assert_eq!(r.shortfalls(&cost), vec![ResourceKind::Money, ResourceKind::Knowledge]);
    }

    #[test]
    fn test_delta_sum_is_fieldwise() {
        let order = ResourceDelta::new().knowledge(-8).experience(-5).money(-15).health(-3);
        let qual = ResourceDelta::new().knowledge(-3).money(-5);

        let total = order + qual;
        assert_eq!(total, ResourceDelta::new().knowledge(-11).experience(-5).money(-20).health(-3));

        let summed: ResourceDelta = vec![order, qual].into_iter().sum();
        assert_eq!(summed, total);
    }

    #[test]
    fn test_diff() {
        let before = start();
        let after = before.apply(&ResourceDelta::new().money(-20).knowledge(15));

        assert_eq!(after.diff(&before), ResourceDelta::new().money(-20).knowledge(15));
        assert!(before.diff(&before).is_empty());
    }

    #[test]
    fn test_delta_display() {
        let delta = ResourceDelta::new().money(-15).knowledge(8);
        assert_eq!(delta.to_string(), "money -15, knowledge +8");
        assert_eq!(ResourceDelta::new().to_string(), "no change");
    }

    #[test]
    fn test_delta_serde_skips_absent_fields() {
        let delta = ResourceDelta::new().money(-20);
        let json = serde_json::to_string(&delta).unwrap();
        assert_eq!(json, r#"{"money":-20}"#);

        let parsed: ResourceDelta = serde_json::from_str(r#"{"knowledge": 15}"#).unwrap();
        assert_eq!(parsed, ResourceDelta::new().knowledge(15));
    }
}
