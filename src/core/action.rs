//! Player actions and the decision audit trail.
//!
//! Every state change is driven by one [`Action`]. The engine's reducer takes
//! the current `GameState` and an action and produces the next state; nothing
//! else mutates it.

use serde::{Deserialize, Serialize};

use super::resources::ResourceVector;
use crate::catalog::{DecisionId, LocationId};

/// A discrete player action.
///
/// ## Example
///
/// ```
/// use journey_engine::catalog::DecisionId;
/// use journey_engine::core::Action;
///
/// let pick = Action::SelectDecision(DecisionId::new(3));
/// assert_eq!(pick.name(), "select_decision");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Leave the intro screen and begin the journey.
    Start,
    /// Take a decision at the current location.
    SelectDecision(DecisionId),
    /// Apply the pending event and carry on.
    AcknowledgeEvent,
    /// Stay at a settled location and keep taking decisions.
    Continue,
    /// Move on to the next location (or finish the journey at the last one).
    AdvanceLocation,
    /// Throw the current game away and start over.
    Restart,
}

impl Action {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::SelectDecision(_) => "select_decision",
            Action::AcknowledgeEvent => "acknowledge_event",
            Action::Continue => "continue",
            Action::AdvanceLocation => "advance_location",
            Action::Restart => "restart",
        }
    }
}

/// One entry in the append-only decision history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Where the decision was taken.
    pub location: LocationId,

    /// The decision taken.
    pub decision: DecisionId,

    /// Calendar year after the decision's duration elapsed.
    pub year: i32,

    /// Resources before any penalty or cost.
    pub resources_before: ResourceVector,

    /// Resources after penalties, cost, reward and time.
    pub resources_after: ResourceVector,
}

impl DecisionRecord {
    #[must_use]
    pub fn new(
        location: LocationId,
        decision: DecisionId,
        year: i32,
        resources_before: ResourceVector,
        resources_after: ResourceVector,
    ) -> Self {
        Self {
            location,
            decision,
            year,
            resources_before,
            resources_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization() {
        let action = Action::SelectDecision(DecisionId::new(5));
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"select_decision":5}"#);

        let parsed: Action = serde_json::from_str(r#""advance_location""#).unwrap();
        assert_eq!(parsed, Action::AdvanceLocation);
    }

    #[test]
    fn test_decision_record() {
        let before = ResourceVector::new(100, 100, 0, 0, 30);
        let after = ResourceVector::new(80, 100, 15, 0, 28);
        let record = DecisionRecord::new(LocationId::new(1), DecisionId::new(2), 1913, before, after);

        assert_eq!(record.location, LocationId::new(1));
        assert_eq!(record.year, 1913);
        assert_eq!(record.resources_after.diff(&record.resources_before).knowledge, Some(15));
    }
}
