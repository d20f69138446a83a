//! Rules configuration.
//!
//! Every tunable constant the engine uses lives in [`RulesConfig`]:
//! starting resources, the calendar window, penalty vectors, strike limits,
//! victory thresholds, and the policy attached to each validation gate.
//!
//! `RulesConfig::default()` is the stock journey. A different rule set can be
//! loaded from JSON with [`RulesConfig::from_json`]; omitted fields keep their
//! defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resources::{ResourceDelta, ResourceVector};

/// How a validation gate treats a violation.
///
/// ## Example
///
/// ```
/// use journey_engine::core::{GatePolicy, RulesConfig};
///
/// let rules = RulesConfig::default();
/// assert_eq!(rules.gates.order, GatePolicy::SoftPenalty);
/// assert_eq!(rules.gates.affordability, GatePolicy::HardGate);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    /// The action is refused and state is left untouched.
    HardGate,
    /// The action goes ahead. The order and qualification gates charge
    /// their penalty vector; affordability has none and charges nothing.
    SoftPenalty,
}

/// Policy for each check in decision resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatePolicies {
    /// Prerequisite decisions not yet taken at this location.
    pub order: GatePolicy,
    /// `min_knowledge` / `min_experience` not met.
    pub qualification: GatePolicy,
    /// Cost would drive a resource below zero.
    ///
    /// `SoftPenalty` lets an unaffordable cost through with no extra charge.
    pub affordability: GatePolicy,
}

impl Default for GatePolicies {
    fn default() -> Self {
        Self {
            order: GatePolicy::SoftPenalty,
            qualification: GatePolicy::SoftPenalty,
            affordability: GatePolicy::HardGate,
        }
    }
}

/// Under-qualification penalty, charged per failed stat gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualificationPenalty {
    /// Knowledge lost when the knowledge gate fails.
    pub knowledge: i64,
    /// Experience lost when the experience gate fails.
    pub experience: i64,
    /// Money lost when either gate fails (charged once).
    pub money: i64,
}

impl Default for QualificationPenalty {
    fn default() -> Self {
        Self {
            knowledge: -3,
            experience: -2,
            money: -5,
        }
    }
}

impl QualificationPenalty {
    /// The penalty vector for a given combination of failed gates.
    ///
    /// Empty if neither gate failed.
    #[must_use]
    pub fn for_failures(&self, knowledge_failed: bool, experience_failed: bool) -> ResourceDelta {
        let mut delta = ResourceDelta::new();
        if knowledge_failed {
            delta.knowledge = Some(self.knowledge);
        }
        if experience_failed {
            delta.experience = Some(self.experience);
        }
        if knowledge_failed || experience_failed {
            delta.money = Some(self.money);
        }
        delta
    }
}

/// Thresholds every one of which must hold for victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VictoryThresholds {
    pub knowledge: i64,
    pub experience: i64,
    pub health: i64,
    pub money: i64,
}

impl Default for VictoryThresholds {
    fn default() -> Self {
        Self {
            knowledge: 75,
            experience: 70,
            health: 15,
            money: 20,
        }
    }
}

/// Stat levels that unlock the scholar/veteran achievements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementThresholds {
    pub knowledge: i64,
    pub experience: i64,
}

impl Default for AchievementThresholds {
    fn default() -> Self {
        Self {
            knowledge: 90,
            experience: 90,
        }
    }
}

/// Complete rule set for a journey.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Resources at game start (and after restart).
    pub initial_resources: ResourceVector,

    /// Calendar year at game start.
    pub start_year: i32,

    /// Last calendar year; `current_year` never exceeds it.
    pub end_year: i32,

    /// Charged when a decision is taken before its prerequisites.
    pub order_penalty: ResourceDelta,

    /// Charged when a decision's stat minimums are not met.
    pub qualification_penalty: QualificationPenalty,

    /// Charged once when a location is left short of its decision count.
    pub location_failure_penalty: ResourceDelta,

    /// Failed locations that end the game.
    pub max_failed_locations: usize,

    /// Locations that may go uncompleted and still allow victory.
    pub max_skipped_locations: usize,

    pub victory: VictoryThresholds,

    pub achievements: AchievementThresholds,

    pub gates: GatePolicies,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_resources: ResourceVector::new(100, 100, 0, 0, 30),
            start_year: 1911,
            end_year: 1941,
            order_penalty: ResourceDelta::new()
                .knowledge(-8)
                .experience(-5)
                .money(-15)
                .health(-3),
            qualification_penalty: QualificationPenalty::default(),
            location_failure_penalty: ResourceDelta::new()
                .knowledge(-10)
                .experience(-8)
                .money(-20)
                .health(-5),
            max_failed_locations: 3,
            max_skipped_locations: 2,
            victory: VictoryThresholds::default(),
            achievements: AchievementThresholds::default(),
            gates: GatePolicies::default(),
        }
    }
}

/// Errors from loading or validating a [`RulesConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("end year {end} is before start year {start}")]
    InvertedCalendar { start: i32, end: i32 },

    #[error("max_failed_locations must be at least 1")]
    NoStrikesAllowed,

    #[error("initial time budget {0} is negative")]
    NegativeTimeBudget(i64),

    #[error("{0} changes time; only decision durations may")]
    PenaltyMovesTime(&'static str),

    #[error("invalid rules JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RulesConfig {
    /// Parse and validate a rule set from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end_year < self.start_year {
            return Err(ConfigError::InvertedCalendar {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if self.max_failed_locations == 0 {
            return Err(ConfigError::NoStrikesAllowed);
        }
        if self.initial_resources.time < 0 {
            return Err(ConfigError::NegativeTimeBudget(self.initial_resources.time));
        }
        if self.order_penalty.time.is_some() {
            return Err(ConfigError::PenaltyMovesTime("order_penalty"));
        }
        if self.location_failure_penalty.time.is_some() {
            return Err(ConfigError::PenaltyMovesTime("location_failure_penalty"));
        }
        Ok(())
    }
}
