//! Catalog definitions - static journey content.
//!
//! A [`Location`] is one stop in the journey. It owns the [`Decision`]s a
//! player may take there and the [`GameEvent`]s that may fire after one of
//! them. None of these change during a game; per-game progress lives in
//! `GameState`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ResourceDelta;

/// Unique identifier for a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub u16);

impl LocationId {
    /// Create a new location ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Location({})", self.0)
    }
}

/// Identifier for a decision, unique within its location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(pub u32);

impl DecisionId {
    /// Create a new decision ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Decision({})", self.0)
    }
}

/// Identifier for an event, unique within its location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl EventId {
    /// Create a new event ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// A player-selectable action at a location.
///
/// ## Example
///
/// ```
/// use journey_engine::catalog::{Decision, DecisionId};
/// use journey_engine::core::ResourceDelta;
///
/// let study = Decision::new(DecisionId::new(1), "Study abroad")
///     .with_cost(ResourceDelta::new().money(-20))
///     .with_reward(ResourceDelta::new().knowledge(15))
///     .with_duration(2);
///
/// assert_eq!(study.net().money, Some(-20));
/// assert_eq!(study.net().knowledge, Some(15));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,

    /// Display name.
    pub name: String,

    /// Applied first; usually negative.
    #[serde(default)]
    pub cost: ResourceDelta,

    /// Applied after the cost.
    #[serde(default)]
    pub reward: ResourceDelta,

    /// Years consumed.
    #[serde(default)]
    pub duration: u32,

    /// Decisions at the same location that should be taken first.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub required_decisions: SmallVec<[DecisionId; 4]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_knowledge: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_experience: Option<i64>,
}

impl Decision {
    /// Create a free, instantaneous decision.
    #[must_use]
    pub fn new(id: DecisionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cost: ResourceDelta::new(),
            reward: ResourceDelta::new(),
            duration: 0,
            required_decisions: SmallVec::new(),
            min_knowledge: None,
            min_experience: None,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: ResourceDelta) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_reward(mut self, reward: ResourceDelta) -> Self {
        self.reward = reward;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, years: u32) -> Self {
        self.duration = years;
        self
    }

    /// Add a prerequisite decision (builder pattern).
    #[must_use]
    pub fn requires(mut self, decision: DecisionId) -> Self {
        self.required_decisions.push(decision);
        self
    }

    #[must_use]
    pub fn with_min_knowledge(mut self, min: i64) -> Self {
        self.min_knowledge = Some(min);
        self
    }

    #[must_use]
    pub fn with_min_experience(mut self, min: i64) -> Self {
        self.min_experience = Some(min);
        self
    }

    /// Cost plus reward, the change shown to the player.
    #[must_use]
    pub fn net(&self) -> ResourceDelta {
        self.cost + self.reward
    }
}

/// A randomized resource modifier tied to a location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,

    /// Display name.
    pub name: String,

    /// Applied when the event is acknowledged.
    #[serde(default)]
    pub effect: ResourceDelta,

    /// Chance of firing on a single roll, in `[0, 1]`.
    #[serde(default)]
    pub probability: f64,
}

impl GameEvent {
    #[must_use]
    pub fn new(id: EventId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            effect: ResourceDelta::new(),
            probability: 0.0,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: ResourceDelta) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }
}

/// One stop in the journey.
///
/// The location's position in the journey is its index in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,

    /// Display name.
    pub name: String,

    /// Knowledge needed before the location counts as settled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_knowledge: Option<i64>,

    /// Experience needed before the location counts as settled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_experience: Option<i64>,

    /// Decisions that must be taken here to avoid a strike.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_decisions_count: Option<usize>,

    #[serde(default)]
    pub decisions: Vec<Decision>,

    #[serde(default)]
    pub events: Vec<GameEvent>,
}

impl Location {
    #[must_use]
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            required_knowledge: None,
            required_experience: None,
            min_decisions_count: None,
            decisions: Vec::new(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_required_knowledge(mut self, required: i64) -> Self {
        self.required_knowledge = Some(required);
        self
    }

    #[must_use]
    pub fn with_required_experience(mut self, required: i64) -> Self {
        self.required_experience = Some(required);
        self
    }

    #[must_use]
    pub fn with_min_decisions(mut self, count: usize) -> Self {
        self.min_decisions_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_decision(mut self, decision: Decision) -> Self {
        self.decisions.push(decision);
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Find a decision by ID.
    #[must_use]
    pub fn decision(&self, id: DecisionId) -> Option<&Decision> {
        self.decisions.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_builder() {
        let d = Decision::new(DecisionId::new(3), "Apprentice")
            .with_cost(ResourceDelta::new().money(-10))
            .with_reward(ResourceDelta::new().experience(12).money(4))
            .with_duration(1)
            .requires(DecisionId::new(1))
            .requires(DecisionId::new(2))
            .with_min_knowledge(20);

        assert_eq!(d.required_decisions.as_slice(), &[DecisionId::new(1), DecisionId::new(2)]);
        assert_eq!(d.min_knowledge, Some(20));
        assert_eq!(d.min_experience, None);
        assert_eq!(d.net(), ResourceDelta::new().money(-6).experience(12));
    }

    #[test]
    fn test_location_lookup() {
        let loc = Location::new(LocationId::new(0), "Port")
            .with_decision(Decision::new(DecisionId::new(1), "Work"))
            .with_decision(Decision::new(DecisionId::new(2), "Read"));

        assert_eq!(loc.decision(DecisionId::new(2)).map(|d| d.name.as_str()), Some("Read"));
        assert!(loc.decision(DecisionId::new(9)).is_none());
    }

    #[test]
    fn test_location_json_defaults() {
        let json = r#"{
            "id": 4,
            "name": "Harbor",
            "min_decisions_count": 2,
            "decisions": [
                { "id": 1, "name": "Sign on", "cost": { "health": -5 }, "duration": 1 },
                { "id": 2, "name": "Learn", "required_decisions": [1], "min_knowledge": 10 }
            ]
        }"#;

        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.id, LocationId::new(4));
        assert_eq!(loc.min_decisions_count, Some(2));
        assert!(loc.events.is_empty());
        assert_eq!(loc.decisions[0].cost, ResourceDelta::new().health(-5));
        assert_eq!(loc.decisions[1].duration, 0);
        assert_eq!(loc.decisions[1].required_decisions.as_slice(), &[DecisionId::new(1)]);
    }
}
